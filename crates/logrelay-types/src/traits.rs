//! Core trait definitions for logrelay abstractions.

use std::path::PathBuf;
use crate::errors::Result;

/// Resolves the absolute base directory that anchors relative log paths.
///
/// The router composes every rolling-file path as
/// `<base>/<log_directory>/<file_name>`, where `<base>` comes from this
/// trait. The default implementation resolves the directory containing the
/// running executable; embedders (and tests) can substitute their own.
pub trait ResourceRoot: Send + Sync {
    /// Resolve the absolute base directory.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RelayError::PathResolution`] when no absolute
    /// location can be determined.
    fn resolve(&self) -> Result<PathBuf>;
}
