//! Selectable values offered for each free-form field.
//!
//! Any other text is accepted too; these lists are what front-ends offer as
//! completions and what the CLI prints in its help.

pub const CHANNELS: [u32; 12] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];

pub const SAMPLE_RATES: [u32; 8] = [11025, 16000, 22050, 44100, 48000, 88200, 96000, 192000];

/// kb/s
pub const AUDIO_BITRATES: [u32; 9] = [64, 96, 112, 128, 160, 192, 224, 256, 320];

pub const FRAME_RATES: [u32; 15] = [1, 2, 3, 4, 5, 10, 15, 20, 24, 25, 30, 48, 50, 60, 120];

/// Video containers accepted as outputs (lowercase extensions).
pub const VIDEO_CONTAINERS: [&str; 7] = ["avi", "flv", "mov", "mkv", "mp4", "webm", "wmv"];

/// Audio containers accepted as extraction targets.
pub const AUDIO_CONTAINERS: [&str; 7] = ["mp2", "mp3", "mp4", "m4a", "wav", "ogg", "wma"];

/// Joins a list for display, e.g. in `--help`.
#[must_use]
pub fn describe<T: ToString>(values: &[T]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// True unless `text` is a number missing from `values`. The "Default"
/// sentinel and other non-numeric text count as common.
#[must_use]
pub fn is_common(values: &[u32], text: &str) -> bool {
    match text.trim().parse::<u32>() {
        Ok(value) => values.contains(&value),
        Err(_) => true,
    }
}

/// True when `path` has one of `extensions`, case-insensitively.
#[must_use]
pub fn has_extension(path: &std::path::Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_describe() {
        assert_eq!(describe(&[64, 96]), "64, 96");
        assert_eq!(describe(&VIDEO_CONTAINERS[..2]), "avi, flv");
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension(Path::new("a.MKV"), &VIDEO_CONTAINERS));
        assert!(has_extension(Path::new("a.m4a"), &AUDIO_CONTAINERS));
        assert!(!has_extension(Path::new("a.gif"), &VIDEO_CONTAINERS));
        assert!(!has_extension(Path::new("noext"), &AUDIO_CONTAINERS));
    }

    #[test]
    fn test_is_common() {
        assert!(is_common(&SAMPLE_RATES, "44100"));
        assert!(is_common(&SAMPLE_RATES, " 48000 "));
        assert!(!is_common(&SAMPLE_RATES, "44000"));
        assert!(is_common(&CHANNELS, "Default"));
        assert!(!is_common(&CHANNELS, "13"));
    }

    #[test]
    fn test_bitrates_never_exceed_mp3_limit() {
        assert!(AUDIO_BITRATES.iter().all(|b| *b <= 320));
    }
}
