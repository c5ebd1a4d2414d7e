//! Named channels and the registry that owns them.
//!
//! A channel is a named logging endpoint: it carries a level threshold and
//! the destinations attached to it. Channels are created lazily on first
//! reference and live as long as the registry. The router only ever attaches
//! destinations and moves the threshold; nothing removes a channel.

use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use logrelay_types::Level;

use crate::append::{Append, ConsoleAppender};
use crate::layout::Record;

/// A named logging endpoint with a level threshold and attached destinations.
pub struct Channel {
    name: String,
    level: RwLock<Level>,
    appenders: RwLock<Vec<Box<dyn Append>>>,
    attached_levels: Mutex<HashSet<Level>>,
    fallback: Arc<ConsoleAppender>,
}

impl Channel {
    fn new(name: &str, fallback: Arc<ConsoleAppender>) -> Self {
        Self {
            name: name.to_string(),
            level: RwLock::new(Level::All),
            appenders: RwLock::new(Vec::new()),
            attached_levels: Mutex::new(HashSet::new()),
            fallback,
        }
    }

    /// The channel's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current level threshold.
    pub fn level(&self) -> Level {
        *self.level.read()
    }

    /// Move the level threshold.
    pub fn set_level(&self, level: Level) {
        *self.level.write() = level;
    }

    /// Attach a destination. Destinations are never detached.
    pub fn attach(&self, appender: Box<dyn Append>) {
        self.appenders.write().push(appender);
    }

    /// Number of destinations currently attached.
    pub fn appender_count(&self) -> usize {
        self.appenders.read().len()
    }

    /// Claim the right to attach this level's destination.
    ///
    /// Returns true exactly once per level, so each per-level destination is
    /// attached at most once no matter how often the channel is resolved.
    pub fn claim_destination(&self, level: Level) -> bool {
        self.attached_levels.lock().insert(level)
    }

    /// Emit through the fatal path.
    pub fn fatal(&self, message: &str, cause: Option<&dyn std::error::Error>) {
        self.emit(Level::Fatal, "fatal", message, cause);
    }

    /// Emit through the error path.
    pub fn error(&self, message: &str, cause: Option<&dyn std::error::Error>) {
        self.emit(Level::Error, "error", message, cause);
    }

    /// Emit through the warn path.
    pub fn warn(&self, message: &str, cause: Option<&dyn std::error::Error>) {
        self.emit(Level::Warn, "warn", message, cause);
    }

    /// Emit through the info path.
    pub fn info(&self, message: &str, cause: Option<&dyn std::error::Error>) {
        self.emit(Level::Info, "info", message, cause);
    }

    /// Emit through the debug path.
    pub fn debug(&self, message: &str, cause: Option<&dyn std::error::Error>) {
        self.emit(Level::Debug, "debug", message, cause);
    }

    fn emit(
        &self,
        severity: Level,
        method: &'static str,
        message: &str,
        cause: Option<&dyn std::error::Error>,
    ) {
        if !self.level().enables(severity) {
            return;
        }

        let record = Record::new(severity, &self.name, method, message, cause);
        let appenders = self.appenders.read();
        if appenders.is_empty() {
            if let Err(err) = self.fallback.append(&record) {
                tracing::warn!(channel = %self.name, error = %err, "failed to write log record");
            }
            return;
        }
        for appender in appenders.iter() {
            if let Err(err) = appender.append(&record) {
                tracing::warn!(channel = %self.name, error = %err, "failed to write log record");
            }
        }
    }
}

/// Thread-safe name-to-channel map with a shared console fallback.
pub struct Registry {
    channels: Mutex<HashMap<String, Arc<Channel>>>,
    console: Arc<ConsoleAppender>,
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            channels: Mutex::new(HashMap::new()),
            console: Arc::new(ConsoleAppender::default()),
        }
    }

    /// Get the channel with this name, creating it on first reference.
    pub fn channel(&self, name: &str) -> Arc<Channel> {
        let mut channels = self.channels.lock();
        if let Some(channel) = channels.get(name) {
            return Arc::clone(channel);
        }
        let channel = Arc::new(Channel::new(name, Arc::clone(&self.console)));
        channels.insert(name.to_string(), Arc::clone(&channel));
        channel
    }

    /// Number of channels created so far.
    pub fn len(&self) -> usize {
        self.channels.lock().len()
    }

    /// Whether no channel has been created yet.
    pub fn is_empty(&self) -> bool {
        self.channels.lock().is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}
