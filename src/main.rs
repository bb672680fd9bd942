use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use coindeck::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for coindeck::AppCommand {
    fn from(cmd: Commands) -> coindeck::AppCommand {
        match cmd {
            Commands::Serve => coindeck::AppCommand::Serve,
            Commands::Watch => coindeck::AppCommand::Watch,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Run the market-data proxy server
    Serve,
    /// Run the terminal dashboard
    Watch,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = match (&cli.command, cli.verbose) {
        (_, true) => "debug",
        // Log lines would corrupt the alternate-screen dashboard
        (Some(Commands::Watch), false) => "off",
        _ => "info",
    };
    init_logging(default_level);

    let result = match cli.command {
        Some(Commands::Setup) => coindeck::cli::setup::setup(cli.config_path.as_deref()),
        Some(cmd) => coindeck::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
