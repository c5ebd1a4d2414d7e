//! The routing facade: per-call channel resolution and destination setup.
//!
//! Every logging verb funnels through one resolution step: pick the channel
//! (caller-supplied source key, or the router's own type name), attach the
//! level's rolling-file destination if rolling is on, move the channel's
//! threshold to the call's level, then emit. Destination setup failures
//! never reach the caller; the router warns through `tracing` and falls
//! back to the console.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use logrelay_types::{Level, RelayError, ResourceRoot, Result, RouterConfig};

use crate::append::{ConsoleAppender, DailyRollingFile};
use crate::channel::{Channel, Registry};
use crate::layout::PatternLayout;

/// Resolves the base directory to the one containing the running executable.
#[derive(Debug, Default)]
pub struct ExeRoot;

impl ResourceRoot for ExeRoot {
    fn resolve(&self) -> Result<PathBuf> {
        let exe = std::env::current_exe()
            .map_err(|e| RelayError::PathResolution(format!("cannot locate executable: {}", e)))?;
        exe.parent()
            .map(Path::to_path_buf)
            .ok_or_else(|| {
                RelayError::PathResolution(format!("executable has no parent: {:?}", exe))
            })
    }
}

/// Resolves the base directory to a fixed path chosen by the embedder.
#[derive(Debug, Clone)]
pub struct FixedRoot(PathBuf);

impl FixedRoot {
    /// Anchor log paths at `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self(base.into())
    }
}

impl ResourceRoot for FixedRoot {
    fn resolve(&self) -> Result<PathBuf> {
        Ok(self.0.clone())
    }
}

/// Routes leveled log requests to per-level destinations.
///
/// The router owns its configuration (no process-wide state) and re-reads
/// it on every call, so [`LogRouter::set_configuration`] takes effect on
/// the next logging call. Channels live in an internal registry for the
/// router's lifetime.
///
/// Each verb comes in three shapes: `log_x(message)` routes to the default
/// channel, `log_x_from(source, message)` routes to the channel named by
/// `source`, and `log_x_with(source, message, cause)` additionally records
/// an error value alongside the message.
pub struct LogRouter {
    config: RwLock<RouterConfig>,
    registry: Registry,
    root: Box<dyn ResourceRoot>,
}

impl LogRouter {
    /// Create a router with built-in defaults (rolling off).
    pub fn new() -> Self {
        Self {
            config: RwLock::new(RouterConfig::default()),
            registry: Registry::new(),
            root: Box::new(ExeRoot),
        }
    }

    /// Create a router configured from a string-keyed map.
    ///
    /// See [`RouterConfig::from_map`] for the recognized keys.
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        Self {
            config: RwLock::new(RouterConfig::from_map(map)),
            registry: Registry::new(),
            root: Box::new(ExeRoot),
        }
    }

    /// Substitute the base-directory resolution used for rolling files.
    pub fn with_resource_root(mut self, root: impl ResourceRoot + 'static) -> Self {
        self.root = Box::new(root);
        self
    }

    /// Replace the whole configuration from a map.
    ///
    /// Not incremental: every field is overwritten, so keys absent from the
    /// map reset to their unset state (and `log.rolling` to off).
    pub fn set_configuration(&self, map: &HashMap<String, String>) {
        *self.config.write() = RouterConfig::from_map(map);
    }

    /// Whether file-based rolling is active.
    pub fn rolling_on(&self) -> bool {
        self.config.read().rolling
    }

    /// Switch file-based rolling on or off.
    pub fn set_rolling_on(&self, rolling: bool) {
        self.config.write().rolling = rolling;
    }

    /// The rotation date pattern, lazily defaulted on first read.
    pub fn date_pattern(&self) -> String {
        self.config.write().date_pattern().to_string()
    }

    /// Override the rotation date pattern.
    pub fn set_date_pattern(&self, pattern: impl Into<String>) {
        self.config.write().set_date_pattern(pattern);
    }

    /// The record format template.
    pub fn conversion_pattern(&self) -> String {
        self.config.read().conversion_pattern().to_string()
    }

    /// Override the record format template.
    pub fn set_conversion_pattern(&self, pattern: impl Into<String>) {
        self.config.write().set_conversion_pattern(pattern);
    }

    /// Record a fatal message on the default channel.
    pub fn log_fatal(&self, message: &str) {
        self.resolve_channel(None, Level::Fatal).fatal(message, None);
    }

    /// Record a fatal message on the channel named by `source`.
    pub fn log_fatal_from(&self, source: &str, message: &str) {
        self.resolve_channel(Some(source), Level::Fatal)
            .fatal(message, None);
    }

    /// Record a fatal message with an associated error value.
    pub fn log_fatal_with(&self, source: &str, message: &str, cause: &dyn std::error::Error) {
        self.resolve_channel(Some(source), Level::Fatal)
            .fatal(message, Some(cause));
    }

    /// Record a message at the ALL level on the default channel.
    ///
    /// ALL-level records emit through the backend's fatal path.
    pub fn log_all(&self, message: &str) {
        self.resolve_channel(None, Level::All).fatal(message, None);
    }

    /// Record a message at the ALL level on the channel named by `source`.
    pub fn log_all_from(&self, source: &str, message: &str) {
        self.resolve_channel(Some(source), Level::All)
            .fatal(message, None);
    }

    /// Record a message at the ALL level with an associated error value.
    pub fn log_all_with(&self, source: &str, message: &str, cause: &dyn std::error::Error) {
        self.resolve_channel(Some(source), Level::All)
            .fatal(message, Some(cause));
    }

    /// Record a warning on the default channel.
    pub fn log_warning(&self, message: &str) {
        self.resolve_channel(None, Level::Warn).warn(message, None);
    }

    /// Record a warning on the channel named by `source`.
    pub fn log_warning_from(&self, source: &str, message: &str) {
        self.resolve_channel(Some(source), Level::Warn)
            .warn(message, None);
    }

    /// Record a warning with an associated error value.
    pub fn log_warning_with(&self, source: &str, message: &str, cause: &dyn std::error::Error) {
        self.resolve_channel(Some(source), Level::Warn)
            .warn(message, Some(cause));
    }

    /// Record an informational message on the default channel.
    pub fn log_info(&self, message: &str) {
        self.resolve_channel(None, Level::Info).info(message, None);
    }

    /// Record an informational message on the channel named by `source`.
    pub fn log_info_from(&self, source: &str, message: &str) {
        self.resolve_channel(Some(source), Level::Info)
            .info(message, None);
    }

    /// Record an informational message with an associated error value.
    pub fn log_info_with(&self, source: &str, message: &str, cause: &dyn std::error::Error) {
        self.resolve_channel(Some(source), Level::Info)
            .info(message, Some(cause));
    }

    /// Record a debug message on the default channel.
    pub fn log_debug(&self, message: &str) {
        self.resolve_channel(None, Level::Debug).debug(message, None);
    }

    /// Record a debug message on the channel named by `source`.
    pub fn log_debug_from(&self, source: &str, message: &str) {
        self.resolve_channel(Some(source), Level::Debug)
            .debug(message, None);
    }

    /// Record a debug message with an associated error value.
    pub fn log_debug_with(&self, source: &str, message: &str, cause: &dyn std::error::Error) {
        self.resolve_channel(Some(source), Level::Debug)
            .debug(message, Some(cause));
    }

    /// Record an error message on the default channel.
    pub fn log_error(&self, message: &str) {
        self.resolve_channel(None, Level::Error).error(message, None);
    }

    /// Record an error message on the channel named by `source`.
    ///
    /// Emits through the backend's debug path; with the channel threshold
    /// at ERROR the record is filtered out, so only the destination setup
    /// side effects occur. Kept for compatibility with the historical
    /// severity routing.
    pub fn log_error_from(&self, source: &str, message: &str) {
        self.resolve_channel(Some(source), Level::Error)
            .debug(message, None);
    }

    /// Record an error message with an associated error value.
    ///
    /// Same severity routing as [`LogRouter::log_error_from`].
    pub fn log_error_with(&self, source: &str, message: &str, cause: &dyn std::error::Error) {
        self.resolve_channel(Some(source), Level::Error)
            .debug(message, Some(cause));
    }

    /// Resolve the channel a call at `level` routes to.
    ///
    /// When rolling is on, the level's rolling-file destination is attached
    /// on first resolution; a setup failure downgrades to a console
    /// destination and never reaches the caller. The channel's threshold is
    /// always moved to `level` before returning.
    fn resolve_channel(&self, source: Option<&str>, level: Level) -> Arc<Channel> {
        let name = source.unwrap_or_else(|| std::any::type_name::<Self>());
        let channel = self.registry.channel(name);

        if self.rolling_on() && channel.claim_destination(level) {
            let file_name = self.config.read().file_name(level).to_string();
            match self.build_rolling_destination(&file_name) {
                Ok(destination) => channel.attach(Box::new(destination)),
                Err(err) => {
                    tracing::warn!(
                        channel = name,
                        file = %file_name,
                        error = %err,
                        "cannot create rolling log file, falling back to console"
                    );
                    channel.attach(Box::new(ConsoleAppender::new(PatternLayout::new(
                        self.conversion_pattern(),
                    ))));
                }
            }
        }

        channel.set_level(level);
        channel
    }

    /// Build the rolling-file destination for `file_name`.
    ///
    /// The full path is `<base>/<log_directory>/<file_name>`; rotated files
    /// gain a `.<formatted-date>` suffix per the configured date pattern.
    fn build_rolling_destination(&self, file_name: &str) -> Result<DailyRollingFile> {
        let base = self.root.resolve()?;
        let date_pattern = self.date_pattern();
        let (directory, conversion) = {
            let config = self.config.read();
            (
                config.log_directory.clone(),
                config.conversion_pattern().to_string(),
            )
        };

        let path = base.join(directory).join(file_name);
        DailyRollingFile::open(path, &date_pattern, PatternLayout::new(conversion))
    }
}

impl Default for LogRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::{Error as IoError, ErrorKind};

    struct FailingRoot;

    impl ResourceRoot for FailingRoot {
        fn resolve(&self) -> Result<PathBuf> {
            Err(RelayError::PathResolution(
                "no resource anchor available".to_string(),
            ))
        }
    }

    fn rolling_router(base: &Path) -> LogRouter {
        let router = LogRouter::new().with_resource_root(FixedRoot::new(base));
        router.set_rolling_on(true);
        router
    }

    #[test]
    fn test_default_accessors() {
        let router = LogRouter::new();
        assert!(!router.rolling_on());
        assert_eq!(router.date_pattern(), "dd-MM-yyyy");
        assert_eq!(router.conversion_pattern(), "[%p] %d %c %M - %m%n");
    }

    #[test]
    fn test_rolling_creates_distinct_per_level_files() {
        let dir = tempfile::tempdir().unwrap();
        let router = rolling_router(dir.path());

        router.log_debug_from("app::worker", "queue drained");
        router.log_fatal_from("app::worker", "disk gone");

        let debug_file = dir.path().join("log").join("debug.log");
        let fatal_file = dir.path().join("log").join("fatal.log");
        assert!(debug_file.exists());
        assert!(fatal_file.exists());

        let debug_contents = fs::read_to_string(&debug_file).unwrap();
        assert!(debug_contents.contains("queue drained"));
        assert!(debug_contents.contains("[DEBUG]"));
        assert!(debug_contents.contains("app::worker"));

        let fatal_contents = fs::read_to_string(&fatal_file).unwrap();
        assert!(fatal_contents.contains("disk gone"));
        assert!(fatal_contents.contains("[FATAL]"));
    }

    #[test]
    fn test_rolling_off_creates_no_files() {
        let dir = tempfile::tempdir().unwrap();
        let router = LogRouter::new().with_resource_root(FixedRoot::new(dir.path()));

        router.log_debug("nothing on disk");
        router.log_fatal("still nothing");
        router.log_info_from("app", "or here");

        assert!(!dir.path().join("log").exists());
    }

    #[test]
    fn test_failing_root_falls_back_to_console() {
        let router = LogRouter::new().with_resource_root(FailingRoot);
        router.set_rolling_on(true);

        // Must complete without error; the destination downgrades to console
        router.log_info("emitted despite setup failure");
        router.log_warning_from("app", "still fine");

        let channel = router.registry.channel("app");
        assert_eq!(channel.appender_count(), 1);
    }

    #[test]
    fn test_set_configuration_fully_replaces() {
        let mut map = HashMap::new();
        map.insert("log.rolling".to_string(), "true".to_string());
        map.insert("log.directory".to_string(), "elsewhere".to_string());
        let router = LogRouter::from_map(&map);
        assert!(router.rolling_on());

        router.set_configuration(&HashMap::new());
        assert!(!router.rolling_on());
        // The replacement left the date pattern unset, so the next read
        // falls back to (and persists) the default
        assert_eq!(router.date_pattern(), "dd-MM-yyyy");
        assert_eq!(router.date_pattern(), "dd-MM-yyyy");
    }

    #[test]
    fn test_unconfigured_levels_use_fallback_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut map = HashMap::new();
        map.insert("log.rolling".to_string(), "true".to_string());
        let router =
            LogRouter::from_map(&map).with_resource_root(FixedRoot::new(dir.path()));

        router.log_info_from("app", "fell through");

        // No log.info entry and an unset directory: the record lands in
        // <base>/default.log
        let fallback = dir.path().join("default.log");
        assert!(fallback.exists());
        assert!(fs::read_to_string(&fallback).unwrap().contains("fell through"));
    }

    #[test]
    fn test_same_source_resolves_same_channel() {
        let dir = tempfile::tempdir().unwrap();
        let router = rolling_router(dir.path());

        let one = router.resolve_channel(Some("app::db"), Level::Warn);
        let two = router.resolve_channel(Some("app::db"), Level::Fatal);
        assert!(Arc::ptr_eq(&one, &two));

        let err = IoError::new(ErrorKind::Other, "broken pipe");
        router.log_warning_from("app::db", "two-arg shape");
        router.log_warning_with("app::db", "three-arg shape", &err);
        router.log_warning("one-arg shape");

        // "app::db" plus the router's default channel
        assert_eq!(router.registry.len(), 2);
    }

    #[test]
    fn test_default_channel_is_named_after_router_type() {
        let router = LogRouter::new();
        let channel = router.resolve_channel(None, Level::Info);
        assert_eq!(channel.name(), std::any::type_name::<LogRouter>());
    }

    #[test]
    fn test_all_emits_through_fatal_path() {
        let dir = tempfile::tempdir().unwrap();
        let router = rolling_router(dir.path());

        router.log_all_from("app", "seen by everyone");

        let all_file = dir.path().join("log").join("all.log");
        let contents = fs::read_to_string(&all_file).unwrap();
        assert!(contents.contains("[FATAL]"));
        assert!(contents.contains("fatal"));
        assert!(contents.contains("seen by everyone"));
    }

    #[test]
    fn test_error_from_routes_through_debug_path() {
        let dir = tempfile::tempdir().unwrap();
        let router = rolling_router(dir.path());

        router.log_error_from("app", "swallowed by the threshold");

        // The destination is attached, but the debug-path record is below
        // the ERROR threshold and never lands
        let error_file = dir.path().join("log").join("error.log");
        assert!(error_file.exists());
        assert_eq!(fs::read_to_string(&error_file).unwrap(), "");

        router.log_error("recorded");
        let default_file = dir.path().join("log").join("error.log");
        let contents = fs::read_to_string(&default_file).unwrap();
        assert!(contents.contains("recorded"));
        assert!(contents.contains("[ERROR]"));
    }

    #[test]
    fn test_destination_attached_once_per_level() {
        let dir = tempfile::tempdir().unwrap();
        let router = rolling_router(dir.path());

        router.log_debug_from("app", "first");
        router.log_debug_from("app", "second");
        router.log_info_from("app", "third");

        let channel = router.registry.channel("app");
        // One destination for DEBUG, one for INFO; repeats attach nothing
        assert_eq!(channel.appender_count(), 2);

        let debug_file = dir.path().join("log").join("debug.log");
        let contents = fs::read_to_string(&debug_file).unwrap();
        assert_eq!(
            contents.lines().filter(|l| l.contains("first")).count(),
            1
        );
    }

    #[test]
    fn test_cause_is_recorded() {
        let dir = tempfile::tempdir().unwrap();
        let router = rolling_router(dir.path());

        let err = IoError::new(ErrorKind::PermissionDenied, "access denied");
        router.log_fatal_with("app", "cannot write state", &err);

        let fatal_file = dir.path().join("log").join("fatal.log");
        let contents = fs::read_to_string(&fatal_file).unwrap();
        assert!(contents.contains("cannot write state"));
        assert!(contents.contains("access denied"));
    }

    #[test]
    fn test_reconfiguration_applies_on_next_call() {
        let dir = tempfile::tempdir().unwrap();
        let router = LogRouter::new().with_resource_root(FixedRoot::new(dir.path()));

        router.log_info("before reconfiguration");
        assert!(!dir.path().join("log").exists());

        let mut map = HashMap::new();
        map.insert("log.rolling".to_string(), "true".to_string());
        map.insert("log.directory".to_string(), "log".to_string());
        map.insert("log.info".to_string(), "info.log".to_string());
        router.set_configuration(&map);

        router.log_info_from("app", "after reconfiguration");
        assert!(dir.path().join("log").join("info.log").exists());
    }
}
