/// Post-commit page transitions. The engine decides where to go; rendering
/// the destination belongs to the caller.
pub trait Navigator {
    fn go_to(&self, path: &str) -> anyhow::Result<()>;
    fn go_back(&self) -> anyhow::Result<()>;
}

/// Announces destinations on stdout; the CLI's stand-in for a router.
#[derive(Debug, Default)]
pub struct ConsoleNavigator;

impl ConsoleNavigator {
    pub fn new() -> Self {
        Self
    }
}

impl Navigator for ConsoleNavigator {
    fn go_to(&self, path: &str) -> anyhow::Result<()> {
        println!("next: {path}");
        Ok(())
    }

    fn go_back(&self) -> anyhow::Result<()> {
        println!("next: previous view");
        Ok(())
    }
}
