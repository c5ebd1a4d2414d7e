//! Router configuration and its external key names.
//!
//! Configuration arrives as a plain string-keyed map (parsing a properties
//! file or similar is the caller's concern). Reading a map applies no
//! defaulting: absent keys stay unset and are absorbed downstream, either
//! by the lazy pattern defaults or by the [`FALLBACK_FILE_NAME`].

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use crate::enums::Level;

/// Key naming the directory that holds all log files.
pub const KEY_DIRECTORY: &str = "log.directory";
/// Key naming the date pattern used for rotation suffixes.
pub const KEY_DATE_PATTERN: &str = "log.datepattern";
/// Key switching file-based rolling on (`"true"`) or off (anything else).
pub const KEY_ROLLING: &str = "log.rolling";

/// Default log directory name.
pub const DEFAULT_DIRECTORY: &str = "log";
/// Default rotation date pattern.
pub const DEFAULT_DATE_PATTERN: &str = "dd-MM-yyyy";
/// Default record format template.
pub const DEFAULT_CONVERSION_PATTERN: &str = "[%p] %d %c %M - %m%n";
/// File name used when a level has no configured entry.
pub const FALLBACK_FILE_NAME: &str = "default.log";

/// Configuration owned by a router instance.
///
/// Two construction paths exist: [`RouterConfig::default`] populates every
/// field with its documented literal default, while [`RouterConfig::from_map`]
/// copies exactly what the map supplies and leaves the rest unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RouterConfig {
    /// Directory (relative to the resolved base) holding all log files
    pub log_directory: String,

    /// Per-level log file names; levels without an entry fall back to
    /// [`FALLBACK_FILE_NAME`]
    file_names: HashMap<Level, String>,

    /// Rotation date pattern; lazily defaulted on first read
    date_pattern: Option<String>,

    /// Record format template; defaulted on read without being stored
    conversion_pattern: Option<String>,

    /// Whether file-based rolling is active
    pub rolling: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        let file_names = Level::LEVELS
            .iter()
            .map(|level| (*level, level.default_file_name().to_string()))
            .collect();

        Self {
            log_directory: DEFAULT_DIRECTORY.to_string(),
            file_names,
            date_pattern: Some(DEFAULT_DATE_PATTERN.to_string()),
            conversion_pattern: None,
            rolling: false,
        }
    }
}

impl RouterConfig {
    /// Build a configuration from a string-keyed map.
    ///
    /// Reads exactly the documented keys. Absent keys yield unset fields;
    /// `log.rolling` resolves to `true` only for the literal string
    /// `"true"`.
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        let mut file_names = HashMap::new();
        for level in Level::LEVELS {
            if let Some(name) = map.get(level.file_key()) {
                file_names.insert(level, name.clone());
            }
        }

        Self {
            log_directory: map.get(KEY_DIRECTORY).cloned().unwrap_or_default(),
            file_names,
            date_pattern: map.get(KEY_DATE_PATTERN).cloned(),
            conversion_pattern: None,
            rolling: map.get(KEY_ROLLING).map(|v| v == "true").unwrap_or(false),
        }
    }

    /// The log file name configured for `level`, or [`FALLBACK_FILE_NAME`]
    /// when the level has no entry.
    pub fn file_name(&self, level: Level) -> &str {
        self.file_names
            .get(&level)
            .map(String::as_str)
            .unwrap_or(FALLBACK_FILE_NAME)
    }

    /// The rotation date pattern.
    ///
    /// An unset pattern is assigned its default on first read, so this read
    /// has a one-time side effect and every later read returns the same
    /// value.
    pub fn date_pattern(&mut self) -> &str {
        if self.date_pattern.is_none() {
            self.date_pattern = Some(DEFAULT_DATE_PATTERN.to_string());
        }
        self.date_pattern.as_deref().unwrap_or(DEFAULT_DATE_PATTERN)
    }

    /// Override the rotation date pattern.
    pub fn set_date_pattern(&mut self, pattern: impl Into<String>) {
        self.date_pattern = Some(pattern.into());
    }

    /// The record format template, without persisting the default.
    pub fn conversion_pattern(&self) -> &str {
        self.conversion_pattern
            .as_deref()
            .unwrap_or(DEFAULT_CONVERSION_PATTERN)
    }

    /// Override the record format template.
    pub fn set_conversion_pattern(&mut self, pattern: impl Into<String>) {
        self.conversion_pattern = Some(pattern.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RouterConfig::default();
        assert!(!config.rolling);
        assert_eq!(config.log_directory, "log");
        assert_eq!(config.date_pattern.as_deref(), Some("dd-MM-yyyy"));
        for level in Level::LEVELS {
            assert_eq!(config.file_name(level), level.default_file_name());
        }
    }

    #[test]
    fn test_conversion_pattern_default_is_not_persisted() {
        let config = RouterConfig::default();
        assert_eq!(config.conversion_pattern(), "[%p] %d %c %M - %m%n");
        assert!(config.conversion_pattern.is_none());
    }

    #[test]
    fn test_from_map_reads_only_supplied_keys() {
        let mut map = HashMap::new();
        map.insert("log.directory".to_string(), "var/logs".to_string());
        map.insert("log.debug".to_string(), "dbg.log".to_string());
        map.insert("log.rolling".to_string(), "true".to_string());

        let config = RouterConfig::from_map(&map);
        assert_eq!(config.log_directory, "var/logs");
        assert!(config.rolling);
        assert_eq!(config.file_name(Level::Debug), "dbg.log");
        // Levels the map does not mention fall back to the literal default
        assert_eq!(config.file_name(Level::Fatal), "default.log");
        assert!(config.date_pattern.is_none());
    }

    #[test]
    fn test_rolling_requires_literal_true() {
        let mut map = HashMap::new();
        map.insert("log.rolling".to_string(), "TRUE".to_string());
        assert!(!RouterConfig::from_map(&map).rolling);

        map.insert("log.rolling".to_string(), "yes".to_string());
        assert!(!RouterConfig::from_map(&map).rolling);

        map.insert("log.rolling".to_string(), "true".to_string());
        assert!(RouterConfig::from_map(&map).rolling);
    }

    #[test]
    fn test_date_pattern_lazily_defaulted() {
        let mut config = RouterConfig::from_map(&HashMap::new());
        assert!(config.date_pattern.is_none());
        assert_eq!(config.date_pattern(), "dd-MM-yyyy");
        // The first read persisted the default
        assert_eq!(config.date_pattern.as_deref(), Some("dd-MM-yyyy"));
        assert_eq!(config.date_pattern(), "dd-MM-yyyy");
    }
}
