//! Log records and the pattern-driven text layout.

use chrono::{DateTime, Local};
use logrelay_types::config::DEFAULT_CONVERSION_PATTERN;
use logrelay_types::Level;

/// A single log record handed to destinations.
#[derive(Debug, Clone)]
pub struct Record {
    /// Severity of this record
    pub level: Level,
    /// Name of the channel that emitted it
    pub channel: String,
    /// Backend emission method that produced it (`"fatal"`, `"warn"`, ...)
    pub method: &'static str,
    /// The message text
    pub message: String,
    /// Associated error text, if the caller supplied a cause
    pub cause: Option<String>,
    /// Local time the record was created
    pub timestamp: DateTime<Local>,
}

impl Record {
    /// Create a record stamped with the current local time.
    pub fn new(
        level: Level,
        channel: &str,
        method: &'static str,
        message: &str,
        cause: Option<&dyn std::error::Error>,
    ) -> Self {
        Self {
            level,
            channel: channel.to_string(),
            method,
            message: message.to_string(),
            cause: cause.map(|e| e.to_string()),
            timestamp: Local::now(),
        }
    }
}

/// Text layout driven by a conversion template.
///
/// Supported tokens: `%p` level, `%d` timestamp, `%c` channel name, `%M`
/// emitting method, `%m` message, `%n` newline, `%%` literal percent.
/// Unrecognized tokens pass through untouched. A record's cause, when
/// present, is rendered on a following line.
#[derive(Debug, Clone)]
pub struct PatternLayout {
    pattern: String,
}

impl PatternLayout {
    /// Create a layout from a conversion template.
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    /// Render a record to its final text form.
    pub fn render(&self, record: &Record) -> String {
        let mut out = String::with_capacity(self.pattern.len() + record.message.len());
        let mut chars = self.pattern.chars();

        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('p') => out.push_str(&record.level.to_string()),
                Some('d') => {
                    out.push_str(&record.timestamp.format("%Y-%m-%d %H:%M:%S").to_string())
                }
                Some('c') => out.push_str(&record.channel),
                Some('M') => out.push_str(record.method),
                Some('m') => out.push_str(&record.message),
                Some('n') => out.push('\n'),
                Some('%') => out.push('%'),
                Some(other) => {
                    out.push('%');
                    out.push(other);
                }
                None => out.push('%'),
            }
        }

        if let Some(cause) = &record.cause {
            if !out.ends_with('\n') {
                out.push('\n');
            }
            out.push_str(cause);
            out.push('\n');
        }

        out
    }
}

impl Default for PatternLayout {
    fn default() -> Self {
        Self::new(DEFAULT_CONVERSION_PATTERN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(message: &str, cause: Option<String>) -> Record {
        Record {
            level: Level::Warn,
            channel: "billing::invoices".to_string(),
            method: "warn",
            message: message.to_string(),
            cause,
            timestamp: Local.with_ymd_and_hms(2024, 1, 31, 9, 5, 7).unwrap(),
        }
    }

    #[test]
    fn test_default_pattern_render() {
        let layout = PatternLayout::default();
        let line = layout.render(&record("low balance", None));
        assert_eq!(
            line,
            "[WARN] 2024-01-31 09:05:07 billing::invoices warn - low balance\n"
        );
    }

    #[test]
    fn test_cause_appends_on_following_line() {
        let layout = PatternLayout::default();
        let line = layout.render(&record("charge failed", Some("card declined".to_string())));
        assert!(line.ends_with("charge failed\ncard declined\n"));
    }

    #[test]
    fn test_unknown_tokens_pass_through() {
        let layout = PatternLayout::new("%m %x 100%%");
        let line = layout.render(&record("hello", None));
        assert_eq!(line, "hello %x 100%");
    }
}
