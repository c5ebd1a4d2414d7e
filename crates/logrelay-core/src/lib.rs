//! # Logrelay Core
//!
//! The routing core of the logrelay facade: a channel registry, console and
//! rolling-file destinations, a pattern-based text layout, and the
//! [`LogRouter`] that wires them together per logging call.
//!
//! This crate provides:
//!
//! - **Routing**: per-call channel resolution keyed by a caller-supplied
//!   source name (or the router's own type name)
//! - **Destinations**: console output and date-rolled files, one per level
//! - **Layout**: `[%p] %d %c %M - %m%n` style record templates
//! - **Configuration**: string-keyed map construction with full-overwrite
//!   reconfiguration
//!
//! ## Example
//!
//! ```no_run
//! use logrelay_core::LogRouter;
//!
//! let router = LogRouter::new();
//! router.set_rolling_on(true);
//!
//! router.log_info("service started");
//! router.log_warning_from("billing::invoices", "retrying upstream call");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod append;
pub mod channel;
pub mod layout;
pub mod router;
pub mod time;

// Re-export commonly used items
pub use append::{Append, ConsoleAppender, DailyRollingFile};
pub use channel::{Channel, Registry};
pub use layout::{PatternLayout, Record};
pub use router::{ExeRoot, FixedRoot, LogRouter};
pub use logrelay_types::{Level, RelayError, Result, RouterConfig};

/// Logrelay version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
