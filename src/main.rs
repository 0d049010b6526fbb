use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use natasha::DispatchMode;

mod cli;

#[derive(Parser)]
#[command(name = "natasha")]
#[command(about = "Voice assistant - speak a command, natasha searches, opens or plays it")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.natasha/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Dispatch mode: "local" or "relayed" (overrides the config)
    #[arg(short, long, global = true)]
    mode: Option<DispatchMode>,

    /// Action Gateway base URL (overrides the config)
    #[arg(short, long, global = true)]
    gateway: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Dispatch a typed command, e.g. `natasha run open browser`
    Run {
        /// The command words
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },

    /// Listen for one voice command and dispatch it
    Listen {
        /// Transcribe this WAV file instead of recording
        #[arg(long)]
        audio: Option<PathBuf>,
    },

    /// Show how a command is classified without dispatching it
    Classify {
        /// The command words
        #[arg(required = true, num_args = 1..)]
        words: Vec<String>,
    },

    /// Run the reference Action Gateway server
    Serve {
        /// Address to bind (defaults to [server].bind)
        #[arg(long)]
        bind: Option<String>,
    },

    /// Initialize ~/.natasha/config.toml
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    let overrides = cli::Overrides {
        config_path: cli.config,
        mode: cli.mode,
        gateway: cli.gateway,
    };

    match cli.command {
        Some(Commands::Run { words }) => {
            cli::run::run_command(&overrides, &words.join(" ")).await?;
        }
        Some(Commands::Listen { audio }) => {
            cli::run::listen_command(&overrides, audio).await?;
        }
        Some(Commands::Classify { words }) => {
            cli::classify::classify_command(&words.join(" "));
        }
        Some(Commands::Serve { bind }) => {
            cli::serve::serve_command(&overrides, bind).await?;
        }
        Some(Commands::Init { force }) => {
            cli::init::init_command(overrides.config_path, force)?;
        }
        None => {
            // Default: one voice activation
            cli::run::listen_command(&overrides, None).await?;
        }
    }

    Ok(())
}
