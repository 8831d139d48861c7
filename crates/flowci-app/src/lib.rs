pub mod commit;
pub mod delete;
pub mod editor;
pub mod plugins;

pub use commit::EditOutcome;
pub use delete::{DeleteConfirmation, DeleteError, DeleteOutcome, DeleteState, DeleteStateError};
pub use editor::{EditorSession, EnvEntry};
pub use plugins::CatalogOutcome;

use anyhow::{Context, Result, anyhow, bail};
use flowci_core::cache::CacheStore;
use flowci_core::config::{FlowciConfig, load_config, resolve_config_path};
use flowci_core::exceptions::ExceptionSink;
use flowci_core::navigator::Navigator;
use flowci_core::transport::FlowTransport;

/// Use-case layer over the collaborator seams. One instance per process; the
/// editor session and delete confirmation it hands out each belong to a
/// single edit session with no concurrent writers.
pub struct App<'a> {
    pub transport: &'a dyn FlowTransport,
    pub cache: &'a dyn CacheStore,
    pub navigator: &'a dyn Navigator,
    pub exceptions: &'a dyn ExceptionSink,
}

impl<'a> App<'a> {
    pub fn new(
        transport: &'a dyn FlowTransport,
        cache: &'a dyn CacheStore,
        navigator: &'a dyn Navigator,
        exceptions: &'a dyn ExceptionSink,
    ) -> Self {
        Self {
            transport,
            cache,
            navigator,
            exceptions,
        }
    }
}

pub fn ensure_config_ready() -> Result<FlowciConfig> {
    let config_path = resolve_config_path().context("failed to resolve config path")?;

    if !config_path.exists() {
        bail!(
            "missing config at {}\nCreate ~/.config/flowci/config.toml with the API base URL and retry.",
            config_path.display()
        );
    }

    load_config(&config_path).map_err(|error| {
        anyhow!(
            "invalid config at {}: {error}\nFix the config and retry.",
            config_path.display()
        )
    })
}
