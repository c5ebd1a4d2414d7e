//! # Logrelay Types
//!
//! Levels, configuration, errors, and traits shared by the logrelay crates.
//!
//! This crate provides the building blocks for the logrelay routing facade:
//!
//! - The [`Level`] enumeration with its priority ordering
//! - The [`RouterConfig`] value and its string configuration keys
//! - The [`ResourceRoot`] trait for anchoring relative log paths
//! - Error types and result aliases
//!
//! ## Example
//!
//! ```
//! use logrelay_types::{Level, RouterConfig};
//!
//! let config = RouterConfig::default();
//! assert!(!config.rolling);
//! assert_eq!(config.file_name(Level::Debug), "debug.log");
//!
//! // Levels order by priority
//! assert!(Level::Fatal > Level::Warn);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod enums;
pub mod config;
pub mod traits;

// Re-export common types for convenience
pub use errors::{RelayError, Result};
pub use enums::Level;
pub use config::RouterConfig;
pub use traits::ResourceRoot;
