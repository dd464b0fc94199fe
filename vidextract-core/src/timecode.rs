//! Time code helpers for the `hh:mm:ss.fff` strings used by `-ss` and `-t`.
//!
//! A time code equal to [`UNSET`] means "not set" and the corresponding flag
//! is omitted from the argument string.

/// The time code treated as "unset".
pub const UNSET: &str = "00:00:00.000";

/// Returns true when `text` carries the unset time code.
#[must_use]
pub fn is_unset(text: &str) -> bool {
    text.contains(UNSET)
}

/// Formats a second count plus milliseconds as `hh:mm:ss.fff`.
///
/// Hours are not wrapped at 24, so `90_000` seconds renders as `25:00:00.000`.
#[must_use]
pub fn format_timecode(seconds: u32, millis: u16) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}.{:03}", millis.min(999))
}

/// Parses the leading `hh:mm:ss` of `text` into whole seconds.
///
/// Anything after the eighth character (typically `.fff`) is ignored.
#[must_use]
pub fn parse_total_seconds(text: &str) -> Option<u32> {
    let hours: u32 = text.get(0..2)?.parse().ok()?;
    if text.get(2..3)? != ":" {
        return None;
    }
    let minutes: u32 = text.get(3..5)?.parse().ok()?;
    if text.get(5..6)? != ":" {
        return None;
    }
    let secs: u32 = text.get(6..8)?.parse().ok()?;
    Some(hours * 3600 + minutes * 60 + secs)
}

/// Milliseconds component of a strict time code, if present.
#[must_use]
pub fn parse_millis(text: &str) -> Option<u16> {
    if !is_valid_timecode(text) {
        return None;
    }
    text.get(9..12)?.parse().ok()
}

/// Renders `new_seconds` as a time code, keeping the milliseconds of `old`.
///
/// Used when a slider moves: the whole-second part follows the slider while
/// the milliseconds typed by the user survive.
#[must_use]
pub fn replace_seconds(old: &str, new_seconds: u32) -> String {
    format_timecode(new_seconds, parse_millis(old).unwrap_or(0))
}

/// Strict `hh:mm:ss.fff` check (exactly 12 characters).
#[must_use]
pub fn is_valid_timecode(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() == 12
        && bytes[2] == b':'
        && bytes[5] == b':'
        && bytes[8] == b'.'
        && [0..2, 3..5, 6..8, 9..12]
            .into_iter()
            .all(|range| bytes[range].iter().all(u8::is_ascii_digit))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_timecode() {
        assert_eq!(format_timecode(0, 0), "00:00:00.000");
        assert_eq!(format_timecode(59, 5), "00:00:59.005");
        assert_eq!(format_timecode(3661, 250), "01:01:01.250");
        assert_eq!(format_timecode(86_399, 999), "23:59:59.999");
        assert_eq!(format_timecode(90_000, 0), "25:00:00.000");
    }

    #[test]
    fn test_parse_total_seconds() {
        assert_eq!(parse_total_seconds("00:00:00.000"), Some(0));
        assert_eq!(parse_total_seconds("01:02:03.456"), Some(3723));
        assert_eq!(parse_total_seconds("00:01:23"), Some(83));
        assert_eq!(parse_total_seconds("1:02:03"), None);
        assert_eq!(parse_total_seconds("00-01-23"), None);
        assert_eq!(parse_total_seconds("ab:cd:ef"), None);
        assert_eq!(parse_total_seconds(""), None);
    }

    #[test]
    fn test_seconds_round_trip_within_a_day() {
        for seconds in (0..86_400).step_by(7).chain([86_399]) {
            let text = format_timecode(seconds, 0);
            assert_eq!(parse_total_seconds(&text), Some(seconds), "{text}");
        }
    }

    #[test]
    fn test_replace_seconds_keeps_millis() {
        assert_eq!(replace_seconds("00:00:10.123", 75), "00:01:15.123");
        assert_eq!(replace_seconds("garbage", 75), "00:01:15.000");
    }

    #[test]
    fn test_is_valid_timecode() {
        assert!(is_valid_timecode("00:00:00.000"));
        assert!(is_valid_timecode("12:34:56.789"));
        assert!(!is_valid_timecode("12:34:56"));
        assert!(!is_valid_timecode("12:34:56.78"));
        assert!(!is_valid_timecode("12-34:56.789"));
        assert!(!is_valid_timecode("1a:34:56.789"));
    }

    #[test]
    fn test_is_unset() {
        assert!(is_unset("00:00:00.000"));
        assert!(!is_unset("00:00:00.001"));
        assert!(!is_unset(""));
    }
}
