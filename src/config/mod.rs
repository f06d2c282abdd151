//! Configuration resolution for Mylime.
//!
//! Three settings are recognized:
//! - `verbose` - enable debug-level logging
//! - `log-format` - "json" or "text"
//! - `sentinel` - path to the sentinel file (stored, not acted upon)
//!
//! ## Config file
//!
//! Located at `--config <path>` when given, otherwise `~/.mylime.yaml`
//! (then `~/.mylime.yml`, then `~/.mylime`). The file is optional; a missing
//! or malformed file is reported but never fails startup.
//!
//! ## Precedence
//!
//! CLI flag > environment variable > config file > defaults, per setting.
//!
//! Use the [`resolver`] module for precedence resolution.

pub mod resolver;
pub mod schema;

pub use resolver::{
    ConfigFileOutcome, EffectiveConfig, EnvSnapshot, FlagOverrides, ResolveInputs, Resolved,
    ValueSource, announce_config_file, resolve,
};
pub use schema::{FileFormat, FileSettings, LOG_FORMAT_KEY, LogFormat, SENTINEL_KEY, VERBOSE_KEY};
