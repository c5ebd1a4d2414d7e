//! Destinations for formatted log records.
//!
//! A destination is anything implementing [`Append`]. Two are provided:
//! [`ConsoleAppender`] for stderr output and [`DailyRollingFile`] for
//! date-rolled files. Rotation seals the current file under a
//! `<name>.<formatted-date>` suffix whenever the date stamp changes between
//! writes.

use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use logrelay_types::Result;

use crate::layout::{PatternLayout, Record};
use crate::time;

/// A sink for formatted log records.
pub trait Append: Send + Sync {
    /// Write one record to the destination.
    fn append(&self, record: &Record) -> Result<()>;
}

/// Writes formatted records to stderr.
#[derive(Debug)]
pub struct ConsoleAppender {
    layout: PatternLayout,
}

impl ConsoleAppender {
    /// Create a console destination with the given layout.
    pub fn new(layout: PatternLayout) -> Self {
        Self { layout }
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new(PatternLayout::default())
    }
}

impl Append for ConsoleAppender {
    fn append(&self, record: &Record) -> Result<()> {
        let mut err = std::io::stderr().lock();
        err.write_all(self.layout.render(record).as_bytes())?;
        Ok(())
    }
}

struct RollState {
    file: File,
    stamp: String,
}

/// A file destination that rolls on date change.
///
/// Records append to the base file. When the formatted date stamp differs
/// from the one the file was opened under, the current file is renamed to
/// `<path>.<previous-stamp>` and a fresh base file is started.
pub struct DailyRollingFile {
    path: PathBuf,
    date_pattern: String,
    layout: PatternLayout,
    state: Mutex<RollState>,
}

impl DailyRollingFile {
    /// Open (or create) the base file, ready to accept writes.
    ///
    /// Parent directories are created as needed. `date_pattern` uses
    /// `dd-MM-yyyy` style tokens; see [`crate::time::to_chrono_format`].
    pub fn open(path: PathBuf, date_pattern: &str, layout: PatternLayout) -> Result<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let stamp = time::format_stamp(chrono::Local::now(), date_pattern);

        Ok(Self {
            path,
            date_pattern: date_pattern.to_string(),
            layout,
            state: Mutex::new(RollState { file, stamp }),
        })
    }

    /// The base file path records append to.
    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    fn roll_if_needed(&self, state: &mut RollState) -> Result<()> {
        let stamp = time::format_stamp(chrono::Local::now(), &self.date_pattern);
        if stamp == state.stamp {
            return Ok(());
        }

        state.file.flush()?;
        let mut sealed = self.path.clone().into_os_string();
        sealed.push(".");
        sealed.push(&state.stamp);
        fs::rename(&self.path, &sealed)?;

        state.file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        state.stamp = stamp;
        Ok(())
    }
}

impl Append for DailyRollingFile {
    fn append(&self, record: &Record) -> Result<()> {
        let mut state = self.state.lock();
        self.roll_if_needed(&mut state)?;
        state.file.write_all(self.layout.render(record).as_bytes())?;
        Ok(())
    }
}
