/// An append-ordered collection that disallows duplicate logical entries.
///
/// Equality is supplied by the caller, so the same container backs plugin
/// selection (matched by script name), branch selection (string equality),
/// and environment entries (matched by variable name).
#[derive(Debug, Clone)]
pub struct OrderedUniqueSet<T> {
    items: Vec<T>,
    matches: fn(&T, &T) -> bool,
}

impl<T> OrderedUniqueSet<T> {
    pub fn new(matches: fn(&T, &T) -> bool) -> Self {
        Self {
            items: Vec::new(),
            matches,
        }
    }

    /// Builds a set from an initial sequence, dropping logical duplicates
    /// while keeping the first occurrence's position.
    pub fn seeded(initial: Vec<T>, matches: fn(&T, &T) -> bool) -> Self {
        let mut set = Self::new(matches);
        for item in initial {
            set.add(item);
        }
        set
    }

    /// Appends the item unless a logically equal one is already present.
    /// Returns whether the set changed.
    pub fn add(&mut self, item: T) -> bool {
        if self.contains(&item) {
            return false;
        }

        self.items.push(item);
        true
    }

    /// Removes the first logically equal item, preserving the order of the
    /// remaining items. No-op when absent.
    pub fn remove(&mut self, item: &T) -> Option<T> {
        let index = self
            .items
            .iter()
            .position(|existing| (self.matches)(existing, item))?;
        Some(self.items.remove(index))
    }

    pub fn toggle(&mut self, item: T, present: bool) {
        if present {
            self.add(item);
        } else {
            self.remove(&item);
        }
    }

    /// Removes any logically equal item, then appends the new one. The
    /// replacement always ends up at the end of the sequence.
    pub fn replace(&mut self, item: T) {
        self.remove(&item);
        self.items.push(item);
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items
            .iter()
            .any(|existing| (self.matches)(existing, item))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }
}
