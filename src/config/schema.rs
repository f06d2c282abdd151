//! Schema definitions for the optional configuration file.
//!
//! This module provides:
//! - The recognized setting keys
//! - `LogFormat`, the logger encoding selected by the `log-format` setting
//! - `FileSettings`, the values a config file can supply
//! - Lenient coercion of file and environment values

use serde_json::{Map, Value};
use std::path::Path;

/// Key of the verbose setting.
pub const VERBOSE_KEY: &str = "verbose";

/// Key of the log format setting.
pub const LOG_FORMAT_KEY: &str = "log-format";

/// Key of the sentinel path setting.
pub const SENTINEL_KEY: &str = "sentinel";

/// Encoding used by the structured logger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON object per record
    Json,
    /// Human-readable text records (default)
    #[default]
    Text,
}

impl LogFormat {
    /// Map a raw `log-format` setting to an encoding.
    ///
    /// Only the exact string `json` selects JSON; any other value, including
    /// an empty or unrecognized one, falls back to text.
    pub fn from_setting(s: &str) -> Self {
        match s {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        }
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogFormat::Json => "json",
            LogFormat::Text => "text",
        }
    }
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Decoder used for a config file, chosen from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Yaml,
    Json,
    Toml,
}

impl FileFormat {
    /// Pick the decoder for `path` from its extension.
    ///
    /// Returns `None` for a missing or unrecognized extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "yaml" | "yml" => Some(FileFormat::Yaml),
            "json" => Some(FileFormat::Json),
            "toml" => Some(FileFormat::Toml),
            _ => None,
        }
    }
}

/// Settings supplied by a config file.
///
/// Each field is `None` when the file does not provide that key, so the
/// resolver can fall through to the default.
///
/// # YAML Schema
///
/// ```yaml
/// verbose: true
/// log-format: json   # or text
/// sentinel: /var/run/mylime.sentinel
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSettings {
    pub verbose: Option<bool>,
    pub log_format: Option<String>,
    pub sentinel: Option<String>,
}

impl FileSettings {
    /// Parse file content with the given decoder.
    ///
    /// Returns the decoder's message when the content cannot be decoded or
    /// its root is not a mapping. An empty document yields empty settings.
    pub fn parse(content: &str, format: FileFormat) -> Result<Self, String> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let value: Value = match format {
            FileFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string())?,
            FileFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string())?,
            FileFormat::Toml => toml::from_str(content).map_err(|e| e.to_string())?,
        };

        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => Ok(Self::from_map(&map)),
            other => Err(format!(
                "expected a mapping at the document root, found {}",
                value_kind(&other)
            )),
        }
    }

    fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            verbose: lookup(map, VERBOSE_KEY).and_then(coerce_bool),
            log_format: lookup(map, LOG_FORMAT_KEY).and_then(coerce_string),
            sentinel: lookup(map, SENTINEL_KEY).and_then(coerce_string),
        }
    }
}

/// Parse a boolean the way the environment and config layers accept it.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

// Keys match case-insensitively.
fn lookup<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(key))
        .map(|(_, v)| v)
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => parse_bool(s),
        Value::Number(n) => n.as_f64().map(|f| f != 0.0),
        _ => None,
    }
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a sequence",
        Value::Object(_) => "a mapping",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    // ==================== LogFormat Tests ====================

    #[test]
    fn test_log_format_from_setting() {
        assert_eq!(LogFormat::from_setting("json"), LogFormat::Json);
        assert_eq!(LogFormat::from_setting("text"), LogFormat::Text);
        assert_eq!(LogFormat::from_setting(""), LogFormat::Text);
        assert_eq!(LogFormat::from_setting("xml"), LogFormat::Text);
        assert_eq!(LogFormat::from_setting("JSON"), LogFormat::Text);
    }

    #[test]
    fn test_log_format_display() {
        assert_eq!(LogFormat::Json.to_string(), "json");
        assert_eq!(LogFormat::Text.to_string(), "text");
        assert_eq!(LogFormat::default(), LogFormat::Text);
    }

    // ==================== FileFormat Tests ====================

    #[test]
    fn test_file_format_from_path() {
        assert_eq!(
            FileFormat::from_path(&PathBuf::from("/home/u/.mylime.yaml")),
            Some(FileFormat::Yaml)
        );
        assert_eq!(
            FileFormat::from_path(&PathBuf::from("conf.yml")),
            Some(FileFormat::Yaml)
        );
        assert_eq!(
            FileFormat::from_path(&PathBuf::from("conf.JSON")),
            Some(FileFormat::Json)
        );
        assert_eq!(
            FileFormat::from_path(&PathBuf::from("conf.toml")),
            Some(FileFormat::Toml)
        );
    }

    #[test]
    fn test_file_format_unsupported_extension() {
        assert_eq!(FileFormat::from_path(&PathBuf::from("settings.conf")), None);
        assert_eq!(FileFormat::from_path(&PathBuf::from("/etc/mylime")), None);
        // A leading dot is part of the file name, not an extension.
        assert_eq!(FileFormat::from_path(&PathBuf::from("/home/u/.mylime")), None);
    }

    // ==================== Parsing Tests ====================

    #[test]
    fn test_parse_yaml_all_keys() {
        let content = "verbose: true\nlog-format: json\nsentinel: /tmp/s.flag\n";
        let settings = FileSettings::parse(content, FileFormat::Yaml).unwrap();

        assert_eq!(settings.verbose, Some(true));
        assert_eq!(settings.log_format.as_deref(), Some("json"));
        assert_eq!(settings.sentinel.as_deref(), Some("/tmp/s.flag"));
    }

    #[test]
    fn test_parse_yaml_partial() {
        let settings = FileSettings::parse("sentinel: here\n", FileFormat::Yaml).unwrap();

        assert_eq!(settings.verbose, None);
        assert_eq!(settings.log_format, None);
        assert_eq!(settings.sentinel.as_deref(), Some("here"));
    }

    #[test]
    fn test_parse_empty_document() {
        let settings = FileSettings::parse("", FileFormat::Yaml).unwrap();
        assert_eq!(settings, FileSettings::default());
    }

    #[test]
    fn test_parse_keys_case_insensitive() {
        let content = "Verbose: true\nLOG-FORMAT: text\n";
        let settings = FileSettings::parse(content, FileFormat::Yaml).unwrap();

        assert_eq!(settings.verbose, Some(true));
        assert_eq!(settings.log_format.as_deref(), Some("text"));
    }

    #[test]
    fn test_parse_unknown_keys_ignored() {
        let content = "verbose: false\ncolor: auto\nnested:\n  a: 1\n";
        let settings = FileSettings::parse(content, FileFormat::Yaml).unwrap();

        assert_eq!(settings.verbose, Some(false));
        assert_eq!(settings.log_format, None);
    }

    #[test]
    fn test_parse_lenient_values() {
        let content = "verbose: \"T\"\nlog-format: 42\nsentinel: true\n";
        let settings = FileSettings::parse(content, FileFormat::Yaml).unwrap();

        assert_eq!(settings.verbose, Some(true));
        assert_eq!(settings.log_format.as_deref(), Some("42"));
        assert_eq!(settings.sentinel.as_deref(), Some("true"));
    }

    #[test]
    fn test_parse_numeric_verbose() {
        let settings = FileSettings::parse("verbose: 0\n", FileFormat::Yaml).unwrap();
        assert_eq!(settings.verbose, Some(false));

        let settings = FileSettings::parse("verbose: 3\n", FileFormat::Yaml).unwrap();
        assert_eq!(settings.verbose, Some(true));
    }

    #[test]
    fn test_parse_unrecognized_bool_is_absent() {
        let settings = FileSettings::parse("verbose: maybe\n", FileFormat::Yaml).unwrap();
        assert_eq!(settings.verbose, None);
    }

    #[test]
    fn test_parse_malformed_yaml() {
        let result = FileSettings::parse("verbose: [unterminated\n", FileFormat::Yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_non_mapping_root() {
        let err = FileSettings::parse("- a\n- b\n", FileFormat::Yaml).unwrap_err();
        assert!(err.contains("sequence"), "unexpected message: {err}");

        let err = FileSettings::parse("just a string", FileFormat::Yaml).unwrap_err();
        assert!(err.contains("string"), "unexpected message: {err}");
    }

    #[test]
    fn test_parse_json() {
        let content = r#"{"verbose": true, "log-format": "json"}"#;
        let settings = FileSettings::parse(content, FileFormat::Json).unwrap();

        assert_eq!(settings.verbose, Some(true));
        assert_eq!(settings.log_format.as_deref(), Some("json"));
        assert_eq!(settings.sentinel, None);
    }

    #[test]
    fn test_parse_toml() {
        let content = "verbose = true\n\"log-format\" = \"text\"\nsentinel = \"/srv/flag\"\n";
        let settings = FileSettings::parse(content, FileFormat::Toml).unwrap();

        assert_eq!(settings.verbose, Some(true));
        assert_eq!(settings.log_format.as_deref(), Some("text"));
        assert_eq!(settings.sentinel.as_deref(), Some("/srv/flag"));
    }

    #[test]
    fn test_parse_bool_accepted_forms() {
        for s in ["1", "t", "T", "TRUE", "true", "True"] {
            assert_eq!(parse_bool(s), Some(true), "{s}");
        }
        for s in ["0", "f", "F", "FALSE", "false", "False"] {
            assert_eq!(parse_bool(s), Some(false), "{s}");
        }
        assert_eq!(parse_bool("yes"), None);
        assert_eq!(parse_bool(""), None);
    }
}
