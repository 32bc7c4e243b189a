//! `ragelang` - roasts you when you leave a line with a compile error.
//!
//! # Usage
//!
//! ```bash
//! # Editor host bridge: LSP-framed JSON-RPC on stdin/stdout
//! ragelang serve
//!
//! # One-shot roast of a line
//! ragelang trigger src/main.rs --line 12 --error "expected `;`"
//!
//! # Settings
//! ragelang toggle
//! ragelang set-cooldown 5
//! ragelang set-api-key <KEY>
//! ragelang config
//! ```
//!
//! Logs go to stderr (stdout carries protocol frames in `serve`). The filter comes from
//! `RAGELANG_LOG` or `RUST_LOG` (default `info`); set `RAGELANG_LOG_PATH` to append logs to a
//! file instead.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod logging;
mod sinks;

#[derive(Parser)]
#[command(name = "ragelang")]
#[command(version)]
#[command(about = "Roasts you for the compile errors you walk away from", long_about = None)]
struct Cli {
    /// Config file (default: <config dir>/ragelang/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the editor host bridge on stdio
    Serve,

    /// Roast a line of a file right now
    Trigger {
        /// File to roast
        file: PathBuf,

        /// Zero-based line
        #[arg(short, long, default_value_t = 0)]
        line: usize,

        /// Editor language id (guessed from the extension when omitted)
        #[arg(long)]
        language: Option<String>,

        /// Error message on the line (repeatable)
        #[arg(short, long = "error")]
        errors: Vec<String>,
    },

    /// Enable or disable automatic roasts
    Toggle,

    /// Store the Gemini API key
    SetApiKey {
        /// API key
        key: String,
    },

    /// Set the minimum number of seconds between two automatic roasts
    SetCooldown {
        /// Whole seconds
        seconds: String,
    },

    /// Print the effective configuration
    Config,
}

fn main() -> Result<()> {
    logging::init();

    let cli = Cli::parse();
    let config_path = match cli.config {
        Some(path) => path,
        None => ragelang_core::RoastConfig::default_path()?,
    };

    match cli.command {
        Commands::Serve => commands::serve::execute(&config_path),
        Commands::Trigger {
            file,
            line,
            language,
            errors,
        } => commands::trigger::execute(&config_path, &file, line, language.as_deref(), errors),
        Commands::Toggle => commands::settings::toggle(&config_path),
        Commands::SetApiKey { key } => commands::settings::set_api_key(&config_path, &key),
        Commands::SetCooldown { seconds } => {
            commands::settings::set_cooldown(&config_path, &seconds)
        }
        Commands::Config => commands::settings::show(&config_path),
    }
}
