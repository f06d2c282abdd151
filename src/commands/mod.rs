//! Command implementations for Mylime CLI.
//!
//! - `config show` - Report the effective configuration and its sources

use std::path::PathBuf;

use serde::Serialize;

use crate::config::{EffectiveConfig, LOG_FORMAT_KEY, SENTINEL_KEY, VERBOSE_KEY};

/// Command results that can be serialized to JSON or formatted for humans.
pub trait CommandResult {
    /// Serialize to JSON string.
    fn to_json(&self) -> String;

    /// Format for human-readable output.
    fn to_human(&self) -> String;
}

/// Result of `mylime config show`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigShow {
    pub verbose: bool,
    #[serde(rename = "log-format")]
    pub log_format: String,
    pub sentinel: String,
    #[serde(rename = "config-file")]
    pub config_file: Option<PathBuf>,
    pub sources: ConfigSources,
}

/// Where each setting of [`ConfigShow`] came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSources {
    pub verbose: String,
    #[serde(rename = "log-format")]
    pub log_format: String,
    pub sentinel: String,
}

impl CommandResult for ConfigShow {
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_default()
    }

    fn to_human(&self) -> String {
        let mut lines = vec![
            format!(
                "{} = {} ({})",
                VERBOSE_KEY, self.verbose, self.sources.verbose
            ),
            format!(
                "{} = {:?} ({})",
                LOG_FORMAT_KEY, self.log_format, self.sources.log_format
            ),
            format!(
                "{} = {:?} ({})",
                SENTINEL_KEY, self.sentinel, self.sources.sentinel
            ),
        ];
        match &self.config_file {
            Some(path) => lines.push(format!("config file: {}", path.display())),
            None => lines.push("config file: none".to_string()),
        }
        lines.join("\n")
    }
}

/// Summarize the effective configuration.
pub fn config_show(config: &EffectiveConfig) -> ConfigShow {
    let sources = ConfigSources {
        verbose: config.verbose.source.to_string(),
        log_format: config.log_format.source.to_string(),
        sentinel: config.sentinel.source.to_string(),
    };

    tracing::debug!(loaded = config.config_file.is_loaded(), "config show");

    ConfigShow {
        verbose: config.verbose(),
        log_format: config.log_format_setting().to_string(),
        sentinel: config.sentinel().to_string(),
        config_file: config.config_file.loaded_path().map(|p| p.to_path_buf()),
        sources,
    }
}
