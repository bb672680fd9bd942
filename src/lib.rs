pub mod cli;
pub mod core;
pub mod providers;
pub mod server;

use anyhow::Result;
use tracing::debug;

/// Application commands runnable against a loaded configuration.
pub enum AppCommand {
    /// Run the normalizing market-data proxy.
    Serve,
    /// Run the terminal dashboard against a proxy.
    Watch,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => core::config::AppConfig::load_from_path(path)?,
        None => core::config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    match command {
        AppCommand::Serve => server::run(&config).await,
        AppCommand::Watch => cli::watch::run(&config).await,
    }
}
