//! FortressTalk - terminal front-end for the FortressTalk private messenger
//!
//! Discussions, calls, contacts and settings run on local mock data; the
//! backend features show an informational notice.

mod commands;
mod config;
mod i18n;
mod models;
mod notice;
mod preferences;
mod session;
mod tui;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use i18n::Catalog;

#[derive(Parser)]
#[command(name = "fortresstalk")]
#[command(about = "Terminal front-end for the FortressTalk private messenger", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// UI language (e.g. fr, en); defaults to config, then $LANG
    #[arg(short, long, global = true)]
    locale: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the terminal user interface (default)
    Tui,

    /// List discussions
    Chats {
        /// Only show conversations whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Show the call history
    Calls,

    /// List contacts
    Contacts {
        /// Only show contacts whose name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Print the transcript of a conversation
    Read {
        /// Conversation ID (from `chats` output)
        conversation_id: String,
    },

    /// Send a message in a throwaway session
    Send {
        /// Conversation ID (from `chats` output)
        #[arg(short, long)]
        to: String,

        /// Message content
        message: String,

        /// Wait for the simulated reply indicator to clear
        #[arg(short, long)]
        wait: bool,
    },

    /// Call a contact
    Call {
        /// Contact name
        name: String,

        /// Video instead of audio
        #[arg(long)]
        video: bool,
    },

    /// Show the settings toggles
    Settings,

    /// Show the config file location and effective values
    Config,
}

fn init_logging(verbose: bool, capture: Option<tui::LogBuffer>) {
    let filter = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());
    let registry = tracing_subscriber::registry().with(filter);

    match capture {
        // Stderr would draw over the alternate screen.
        Some(buffer) => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(buffer),
            )
            .init(),
        None => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    let log_buffer = matches!(command, Commands::Tui).then(tui::LogBuffer::new);
    init_logging(cli.verbose, log_buffer.clone());

    let config = Config::load()?;
    let locale = i18n::resolve_locale(cli.locale.as_deref(), config.locale.as_deref());
    let catalog = Catalog::builtin(&locale).context("Failed to load string tables")?;
    tracing::debug!("Using locale {}", catalog.locale());
    let timings = config.typing_timings();

    match command {
        Commands::Tui => {
            let logs = log_buffer.unwrap_or_default();
            tui::run(Box::new(catalog), &config, logs).await?;
        }
        Commands::Chats { search } => {
            commands::list_chats(&catalog, search.as_deref())?;
        }
        Commands::Calls => {
            commands::list_calls(&catalog)?;
        }
        Commands::Contacts { search } => {
            commands::list_contacts(&catalog, search.as_deref())?;
        }
        Commands::Read { conversation_id } => {
            commands::read_messages(&conversation_id, timings)?;
        }
        Commands::Send { to, message, wait } => {
            commands::send_message(&catalog, &to, &message, timings, wait).await?;
        }
        Commands::Call { name, video } => {
            commands::call(&catalog, &name, video)?;
        }
        Commands::Settings => {
            commands::show_settings(&catalog, &config)?;
        }
        Commands::Config => {
            commands::show_config(&config, &catalog)?;
        }
    }

    Ok(())
}
