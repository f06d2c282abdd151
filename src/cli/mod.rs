//! CLI argument definitions for Mylime.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::FlagOverrides;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (commit ",
    env!("MYLIME_GIT_COMMIT"),
    ", built ",
    env!("MYLIME_BUILD_TIMESTAMP"),
    ")"
);

/// Mylime - a command-line skeleton with layered configuration.
///
/// Settings are resolved per key from flags, then environment variables
/// (VERBOSE, LOG-FORMAT or LOG_FORMAT, SENTINEL), then the config file,
/// then built-in defaults.
#[derive(Parser, Debug)]
#[command(name = "mylime")]
#[command(author, version, long_version = LONG_VERSION, about = "A command-line skeleton with layered configuration and structured logging")]
pub struct Cli {
    /// Config file (default is $HOME/.mylime.yaml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable verbose mode (--verbose=false turns it off explicitly)
    #[arg(
        short,
        long,
        global = true,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub verbose: Option<bool>,

    /// json or text (default is text)
    #[arg(long = "log-format", global = true, value_name = "FORMAT")]
    pub log_format: Option<String>,

    /// Path to the sentinel file
    #[arg(long, global = true, value_name = "PATH")]
    pub sentinel: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Flags that were explicitly given, for the config resolver.
    pub fn flag_overrides(&self) -> FlagOverrides {
        FlagOverrides {
            verbose: self.verbose,
            log_format: self.log_format.clone(),
            sentinel: self.sentinel.clone(),
        }
    }
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configuration inspection
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration and where each value came from
    Show {
        /// Output as JSON instead of human-readable text
        #[arg(long)]
        json: bool,
    },
}
