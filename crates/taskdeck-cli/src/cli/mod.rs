//! CLI entry and dispatch.
//!
//! Running `taskdeck` with no subcommand launches the interactive TUI;
//! the subcommands cover the pieces that are useful from scripts
//! (credential inspection, config).

use anyhow::{Context, Result};
use clap::Parser;
use taskdeck_core::config::{Config, paths};
use taskdeck_core::credentials;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(version)]
#[command(about = "Terminal client for the taskdeck task service")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override the API base URL from config
    #[arg(long, value_name = "URL")]
    api_url: Option<String>,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Print the signed-in user, if any
    Whoami,
    /// Clear the persisted credentials
    Logout,
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Print the config file path
    Path,
    /// Print the effective configuration
    Show,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }

    match cli.command {
        None => run_tui(config),
        Some(Commands::Whoami) => whoami(),
        Some(Commands::Logout) => logout(),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => {
                println!("{}", paths::config_path().display());
                Ok(())
            }
            ConfigCommands::Show => {
                let rendered =
                    toml::to_string_pretty(&config).context("Failed to render config")?;
                print!("{rendered}");
                Ok(())
            }
        },
    }
}

fn run_tui(config: Config) -> Result<()> {
    // Stdout belongs to the TUI; logs go to a rolling file instead.
    let _guard = init_file_logging(&config);

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    runtime.block_on(taskdeck_tui::run(config))
}

/// Routes tracing output to `<home>/logs/taskdeck.log`.
///
/// RUST_LOG wins over the configured filter. Returns the worker guard
/// that flushes the writer; drop it only at exit.
fn init_file_logging(config: &Config) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let log_dir = paths::log_dir();
    std::fs::create_dir_all(&log_dir).ok()?;

    let appender = tracing_appender::rolling::daily(log_dir, "taskdeck.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_filter.clone()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Some(guard)
}

fn whoami() -> Result<()> {
    match credentials::load() {
        Some(stored) => {
            println!("{} <{}>", stored.user.name, stored.user.email);
            Ok(())
        }
        None => {
            anyhow::bail!("Not signed in.");
        }
    }
}

fn logout() -> Result<()> {
    credentials::clear()?;
    println!("Signed out.");
    Ok(())
}
