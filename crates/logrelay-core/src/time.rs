//! Date-pattern helpers for rotation stamps.

use chrono::{DateTime, Local};

/// Translate a `dd-MM-yyyy` style date pattern into a `chrono` format string.
///
/// Recognized tokens: `yyyy`/`yy` (year), `MM` (month), `dd` (day), `HH`
/// (hour), `mm` (minute), `ss` (second). Everything else passes through as
/// literal text, so separators like `-` and `.` keep their place.
pub fn to_chrono_format(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let mut run = 1;
        while i + run < chars.len() && chars[i + run] == c {
            run += 1;
        }

        match c {
            'y' => out.push_str(if run >= 4 { "%Y" } else { "%y" }),
            'M' => out.push_str("%m"),
            'd' => out.push_str("%d"),
            'H' => out.push_str("%H"),
            'm' => out.push_str("%M"),
            's' => out.push_str("%S"),
            '%' => out.push_str("%%"),
            _ => {
                for _ in 0..run {
                    out.push(c);
                }
            }
        }

        i += run;
    }

    out
}

/// Format `moment` according to a `dd-MM-yyyy` style pattern.
pub fn format_stamp(moment: DateTime<Local>, pattern: &str) -> String {
    moment.format(&to_chrono_format(pattern)).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_to_chrono_format() {
        assert_eq!(to_chrono_format("dd-MM-yyyy"), "%d-%m-%Y");
        assert_eq!(to_chrono_format("yyyy.MM.dd"), "%Y.%m.%d");
        assert_eq!(to_chrono_format("dd-MM-yy HH:mm:ss"), "%d-%m-%y %H:%M:%S");
    }

    #[test]
    fn test_format_stamp() {
        let moment = Local.with_ymd_and_hms(2024, 1, 31, 9, 5, 0).unwrap();
        assert_eq!(format_stamp(moment, "dd-MM-yyyy"), "31-01-2024");
        assert_eq!(format_stamp(moment, "yyyy-MM"), "2024-01");
    }
}
