pub mod cli;
pub mod dispatch;
pub mod prompt;

use anyhow::{Context, Result};
use clap::Parser;
use flowci_app::App;
use flowci_core::cache::JsonFileCache;
use flowci_core::exceptions::StderrExceptionSink;
use flowci_core::navigator::ConsoleNavigator;
use flowci_core::transport::HttpTransport;

use crate::cli::Cli;
use crate::prompt::InquirePromptDriver;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = flowci_app::ensure_config_ready()?;

    let transport = HttpTransport::new(&config.api.base_url, config.api.timeout())
        .context("failed to build the HTTP transport")?;
    let cache = JsonFileCache::open_default().context("failed to open the local cache")?;
    let navigator = ConsoleNavigator::new();
    let exceptions = StderrExceptionSink::new();
    let app = App::new(&transport, &cache, &navigator, &exceptions);
    let mut prompt = InquirePromptDriver::new();

    dispatch::run_with_deps(cli, &app, &mut prompt)
}
