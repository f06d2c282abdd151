//! Precedence resolution for the effective configuration.
//!
//! Each setting is resolved independently. Precedence (highest to lowest):
//!
//! 1. CLI flags that were explicitly given
//! 2. Environment variables named after the setting key (`VERBOSE`,
//!    `LOG-FORMAT` or `LOG_FORMAT`, `SENTINEL`)
//! 3. The config file (`--config <path>`, or `~/.mylime.yaml`)
//! 4. Built-in defaults
//!
//! A missing, unreadable or malformed config file never fails resolution.
//! It is reported through [`ConfigFileOutcome`] and the file layer is skipped.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use crate::config::schema::{
    FileFormat, FileSettings, LOG_FORMAT_KEY, LogFormat, SENTINEL_KEY, VERBOSE_KEY, parse_bool,
};
use crate::{Error, Result};

/// Base name of the config file looked up in the home directory.
pub const DEFAULT_CONFIG_NAME: &str = ".mylime";

/// Extensions tried, in order, for the default config file. An extension-less
/// `.mylime` is tried last.
pub const DEFAULT_CONFIG_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Tracks where a resolved value came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueSource {
    /// Value from an explicitly given CLI flag
    Flag,
    /// Value from the named environment variable
    Env(String),
    /// Value from the config file at this path
    File(PathBuf),
    /// Built-in default value
    Default,
}

impl std::fmt::Display for ValueSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueSource::Flag => write!(f, "flag"),
            ValueSource::Env(name) => write!(f, "env:{}", name),
            ValueSource::File(path) => write!(f, "file:{}", path.display()),
            ValueSource::Default => write!(f, "default"),
        }
    }
}

/// A resolved value with its source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved<T> {
    /// The resolved value
    pub value: T,
    /// Where the value came from
    pub source: ValueSource,
}

impl<T> Resolved<T> {
    /// Create a new resolved value.
    pub fn new(value: T, source: ValueSource) -> Self {
        Self { value, source }
    }
}

/// Values given explicitly on the command line.
///
/// `None` means the flag was not passed. `Some(String::new())` is an
/// explicit empty value and still wins over lower layers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagOverrides {
    pub verbose: Option<bool>,
    pub log_format: Option<String>,
    pub sentinel: Option<String>,
}

impl FlagOverrides {
    /// Create empty overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set verbose override.
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Set log format override.
    pub fn with_log_format(mut self, format: impl Into<String>) -> Self {
        self.log_format = Some(format.into());
        self
    }

    /// Set sentinel path override.
    pub fn with_sentinel(mut self, sentinel: impl Into<String>) -> Self {
        self.sentinel = Some(sentinel.into());
        self
    }
}

/// A captured view of the process environment.
#[derive(Debug, Clone, Default)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Capture the current process environment. Non-UTF-8 entries are skipped.
    pub fn from_process() -> Self {
        Self {
            vars: std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
                .collect(),
        }
    }

    /// Build a snapshot from explicit pairs.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Look up the variable bound to a setting key.
    ///
    /// Returns the variable name that matched together with its value.
    /// Empty values count as unset.
    pub fn lookup(&self, key: &str) -> Option<(String, &str)> {
        env_var_names(key).into_iter().find_map(|name| {
            let value = self.vars.get(&name)?;
            if value.is_empty() {
                None
            } else {
                Some((name, value.as_str()))
            }
        })
    }
}

/// Environment variable names consulted for a setting key, in order.
pub fn env_var_names(key: &str) -> Vec<String> {
    let upper = key.to_ascii_uppercase();
    let underscored = upper.replace('-', "_");
    if underscored == upper {
        vec![upper]
    } else {
        vec![upper, underscored]
    }
}

/// What happened when looking for the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigFileOutcome {
    /// The file was read and decoded
    Loaded(PathBuf),
    /// No file exists at the location
    NotFound(PathBuf),
    /// The file exists but could not be read
    Unreadable { path: PathBuf, reason: String },
    /// The file was read but could not be decoded
    Malformed { path: PathBuf, reason: String },
    /// An explicit path whose extension names no supported format; not read
    Unsupported(PathBuf),
}

impl ConfigFileOutcome {
    /// The location that was consulted.
    pub fn path(&self) -> &Path {
        match self {
            ConfigFileOutcome::Loaded(path)
            | ConfigFileOutcome::NotFound(path)
            | ConfigFileOutcome::Unsupported(path) => path,
            ConfigFileOutcome::Unreadable { path, .. }
            | ConfigFileOutcome::Malformed { path, .. } => path,
        }
    }

    /// Path of the file that contributed settings, if any.
    pub fn loaded_path(&self) -> Option<&Path> {
        match self {
            ConfigFileOutcome::Loaded(path) => Some(path),
            _ => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, ConfigFileOutcome::Loaded(_))
    }
}

/// Everything the resolver reads.
#[derive(Debug, Clone, Default)]
pub struct ResolveInputs {
    /// Flags given on the command line
    pub flags: FlagOverrides,
    /// Environment to consult
    pub env: EnvSnapshot,
    /// `--config` value; an empty path counts as not given
    pub config_path: Option<PathBuf>,
    /// Home directory used for the default config location
    pub home_dir: Option<PathBuf>,
}

impl ResolveInputs {
    /// Inputs backed by the real process environment and home directory.
    pub fn from_process(flags: FlagOverrides, config_path: Option<PathBuf>) -> Self {
        Self {
            flags,
            env: EnvSnapshot::from_process(),
            config_path,
            home_dir: dirs::home_dir(),
        }
    }
}

/// Fully resolved configuration with source tracking.
///
/// Built once at startup and not modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub verbose: Resolved<bool>,
    /// Raw `log-format` value; empty means no format was requested
    pub log_format: Resolved<String>,
    /// Sentinel path; stored and reported, not acted upon
    pub sentinel: Resolved<String>,
    pub config_file: ConfigFileOutcome,
}

impl EffectiveConfig {
    pub fn verbose(&self) -> bool {
        self.verbose.value
    }

    /// Get the raw log format setting.
    pub fn log_format_setting(&self) -> &str {
        &self.log_format.value
    }

    /// Get the logger encoding selected by the log format setting.
    pub fn log_format(&self) -> LogFormat {
        LogFormat::from_setting(&self.log_format.value)
    }

    pub fn sentinel(&self) -> &str {
        &self.sentinel.value
    }

    /// Whether logging customization was requested.
    pub fn wants_logging(&self) -> bool {
        self.verbose() || !self.log_format.value.is_empty()
    }
}

/// Resolve the effective configuration.
///
/// Fails only when no `--config` path is given and the home directory
/// cannot be determined.
pub fn resolve(inputs: &ResolveInputs) -> Result<EffectiveConfig> {
    let (path, format) = locate_config_file(inputs)?;
    let (file, config_file) = load_config_file(&path, format);
    let file_source = || ValueSource::File(path.clone());

    let verbose = if let Some(verbose) = inputs.flags.verbose {
        Resolved::new(verbose, ValueSource::Flag)
    } else if let Some((name, verbose)) = inputs
        .env
        .lookup(VERBOSE_KEY)
        .and_then(|(name, raw)| Some((name, parse_bool(raw)?)))
    {
        Resolved::new(verbose, ValueSource::Env(name))
    } else if let Some(verbose) = file.verbose {
        Resolved::new(verbose, file_source())
    } else {
        Resolved::new(false, ValueSource::Default)
    };

    let log_format = resolve_string(
        inputs.flags.log_format.as_deref(),
        &inputs.env,
        LOG_FORMAT_KEY,
        file.log_format.as_deref(),
        file_source,
    );

    let sentinel = resolve_string(
        inputs.flags.sentinel.as_deref(),
        &inputs.env,
        SENTINEL_KEY,
        file.sentinel.as_deref(),
        file_source,
    );

    Ok(EffectiveConfig {
        verbose,
        log_format,
        sentinel,
        config_file,
    })
}

fn resolve_string(
    flag: Option<&str>,
    env: &EnvSnapshot,
    key: &str,
    file: Option<&str>,
    file_source: impl Fn() -> ValueSource,
) -> Resolved<String> {
    if let Some(value) = flag {
        Resolved::new(value.to_string(), ValueSource::Flag)
    } else if let Some((name, value)) = env.lookup(key) {
        Resolved::new(value.to_string(), ValueSource::Env(name))
    } else if let Some(value) = file {
        Resolved::new(value.to_string(), file_source())
    } else {
        Resolved::new(String::new(), ValueSource::Default)
    }
}

/// Pick the config file location and its decoder.
///
/// An explicit path is used as is and decoded according to its extension;
/// the format is `None` when the extension is not supported. Otherwise the
/// first existing default candidate in the home directory is used, falling
/// back to `~/.mylime.yaml` when none exists. Default candidates are YAML.
pub fn locate_config_file(inputs: &ResolveInputs) -> Result<(PathBuf, Option<FileFormat>)> {
    if let Some(path) = inputs
        .config_path
        .as_ref()
        .filter(|p| !p.as_os_str().is_empty())
    {
        return Ok((path.clone(), FileFormat::from_path(path)));
    }

    let home = inputs.home_dir.as_ref().ok_or(Error::HomeDirUnavailable)?;
    let candidates = default_config_candidates(home);
    let found = candidates.iter().find(|p| p.is_file()).cloned();
    let path = found.unwrap_or_else(|| candidates[0].clone());
    Ok((path, Some(FileFormat::Yaml)))
}

/// Default config file candidates in `home`, in lookup order.
pub fn default_config_candidates(home: &Path) -> Vec<PathBuf> {
    DEFAULT_CONFIG_EXTENSIONS
        .iter()
        .map(|ext| home.join(format!("{}.{}", DEFAULT_CONFIG_NAME, ext)))
        .chain(std::iter::once(home.join(DEFAULT_CONFIG_NAME)))
        .collect()
}

/// Read and decode the config file at `path`.
///
/// Any failure yields empty settings along with an outcome describing it.
/// Without a format the file is not read at all.
pub fn load_config_file(
    path: &Path,
    format: Option<FileFormat>,
) -> (FileSettings, ConfigFileOutcome) {
    let Some(format) = format else {
        return (
            FileSettings::default(),
            ConfigFileOutcome::Unsupported(path.to_path_buf()),
        );
    };

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return (
                FileSettings::default(),
                ConfigFileOutcome::NotFound(path.to_path_buf()),
            );
        }
        Err(e) => {
            return (
                FileSettings::default(),
                ConfigFileOutcome::Unreadable {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                },
            );
        }
    };

    match FileSettings::parse(&content, format) {
        Ok(settings) => (settings, ConfigFileOutcome::Loaded(path.to_path_buf())),
        Err(reason) => (
            FileSettings::default(),
            ConfigFileOutcome::Malformed {
                path: path.to_path_buf(),
                reason,
            },
        ),
    }
}

/// Write the "Using config file" notice when a file was loaded.
pub fn announce_config_file<W: Write>(outcome: &ConfigFileOutcome, out: &mut W) -> io::Result<()> {
    if let Some(path) = outcome.loaded_path() {
        writeln!(out, "Using config file: {}", path.display())?;
    }
    Ok(())
}
