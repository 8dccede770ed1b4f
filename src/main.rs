use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod app;
mod ui;

use app::App;
use podflow::api::Endpoint;
use podflow::config::Config;
use podflow::logging::init_logging;
use ui::terminal_guard::install_panic_hook;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "podflow")]
#[command(about = "Terminal wizard for producing podcast episodes through automation webhooks")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Path to an additional config file
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the effective configuration as TOML
    Config,

    /// Print the resolved webhook URL of each stage
    Endpoints,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    let is_tui_mode = cli.command.is_none();
    let session_id = Uuid::new_v4();
    let logging = init_logging(&config, is_tui_mode, cli.debug, session_id)?;

    match cli.command {
        Some(Commands::Config) => cmd_config(&config),
        Some(Commands::Endpoints) => {
            cmd_endpoints(&config);
            Ok(())
        }
        None => run_tui(config, session_id, logging.log_file_path.clone()).await,
    }
}

async fn run_tui(config: Config, session_id: Uuid, log_file_path: Option<PathBuf>) -> Result<()> {
    install_panic_hook();

    let mut app = App::new(config, session_id)?;
    let result = app.run().await;

    // Print log file path on exit if logs were written
    if let Some(log_path) = log_file_path {
        if let Ok(metadata) = log_path.metadata() {
            if metadata.len() > 0 {
                eprintln!("Session log: {}", log_path.display());
            }
        }
    }

    result
}

fn cmd_config(config: &Config) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

fn cmd_endpoints(config: &Config) {
    for endpoint in Endpoint::all() {
        println!(
            "{:<20} {}",
            endpoint.to_string(),
            config.webhooks.url_for(*endpoint)
        );
    }
}
