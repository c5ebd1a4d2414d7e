//! Log level enumeration and its priority ordering.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use crate::errors::{RelayError, Result};

/// Log level for routing and threshold decisions.
///
/// Variants are declared in ascending priority order, so the derived `Ord`
/// gives the usual threshold semantics: a channel set to [`Level::Warn`]
/// passes `Warn`, `Error`, and `Fatal` records and drops the rest.
/// [`Level::All`] is the lowest threshold and passes everything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    /// Lowest threshold, passes every record
    All,
    /// Debug messages
    Debug,
    /// Informational messages
    Info,
    /// Warnings
    Warn,
    /// Errors
    Error,
    /// Fatal errors
    Fatal,
}

impl Level {
    /// All six levels, in priority order.
    pub const LEVELS: [Level; 6] = [
        Level::All,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    /// Whether a record at `severity` passes this level used as a threshold.
    pub fn enables(self, severity: Level) -> bool {
        severity >= self
    }

    /// The configuration key naming this level's log file.
    pub fn file_key(self) -> &'static str {
        match self {
            Level::All => "log.all",
            Level::Debug => "log.debug",
            Level::Info => "log.info",
            Level::Warn => "log.warn",
            Level::Error => "log.error",
            Level::Fatal => "log.fatal",
        }
    }

    /// The built-in default file name for this level.
    pub fn default_file_name(self) -> &'static str {
        match self {
            Level::All => "all.log",
            Level::Debug => "debug.log",
            Level::Info => "info.log",
            Level::Warn => "warn.log",
            Level::Error => "error.log",
            Level::Fatal => "fatal.log",
        }
    }
}

impl FromStr for Level {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "ALL" => Ok(Level::All),
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARN" | "WARNING" => Ok(Level::Warn),
            "ERROR" => Ok(Level::Error),
            "FATAL" => Ok(Level::Fatal),
            _ => Err(RelayError::Config(format!("Invalid log level: {}", s))),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::All => write!(f, "ALL"),
            Level::Debug => write!(f, "DEBUG"),
            Level::Info => write!(f, "INFO"),
            Level::Warn => write!(f, "WARN"),
            Level::Error => write!(f, "ERROR"),
            Level::Fatal => write!(f, "FATAL"),
        }
    }
}
