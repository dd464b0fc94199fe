// ============================================================================
// vidextract-core/src/probe.rs
// ============================================================================
//
// PROBE PARSER: Media Properties from the Transcoder's Diagnostic Output
//
// Running the transcoder with only an input (`-i <file>`) makes it print the
// container and stream summary to stderr and exit with an error because no
// output was given. This module scrapes that summary.
//
// Parsing is best effort and never fails: a field whose value cannot be read
// stays `None`. Lines are matched by substring and fields accumulate across
// lines, so the order of the `Duration:`, `Video:` and `Audio:` lines does not
// matter. When several streams of one kind exist, the last one wins.
//
// AI-ASSISTANT-INFO: ffmpeg -i output scraping into ProbeInfo

// ---- Internal crate imports ----
use crate::arguments::FfmpegArgs;
use crate::config::CoreConfig;
use crate::error::command_wait_error;
use crate::events::OutputStream;
use crate::external;
use crate::timecode;

// ---- External crate imports ----
use log::{debug, warn};
use serde::Serialize;

// ---- Standard library imports ----
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Constant added to the parsed duration. The fractional part of the
/// duration is truncated first, so this rounds any partial second up (and a
/// whole-second duration one past its end).
pub const DURATION_BIAS_SECONDS: u32 = 1;

/// Media properties scraped from a probe run. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProbeInfo {
    /// `(width, height)` in pixels
    pub resolution: Option<(u32, u32)>,
    pub channels: Option<u32>,
    /// Hz
    pub sample_rate: Option<u32>,
    /// kb/s
    pub audio_bit_rate: Option<u32>,
    /// kb/s
    pub video_bit_rate: Option<u32>,
    pub fps: Option<f64>,
    /// Whole seconds, including [`DURATION_BIAS_SECONDS`]
    pub duration_seconds: Option<u32>,
}

impl ProbeInfo {
    /// True when nothing could be parsed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == ProbeInfo::default()
    }

    /// Folds one diagnostic line into the accumulated fields.
    pub fn parse_line(&mut self, line: &str) {
        if let Some(pos) = line.find("Duration: ") {
            if let Some(seconds) = parse_duration(&line[pos + "Duration: ".len()..]) {
                self.duration_seconds = Some(seconds);
            }
        } else if line.contains("Video: ") {
            self.parse_video(line);
        } else if line.contains("Audio: ") {
            self.parse_audio(line);
        }
    }

    fn parse_video(&mut self, line: &str) {
        let words: Vec<&str> = line.split(' ').collect();
        for (i, word) in words.iter().enumerate() {
            let previous = i.checked_sub(1).map(|p| words[p]);
            match *word {
                "fps" | "fps," => {
                    if let Some(fps) = previous.and_then(|p| p.parse::<f64>().ok()) {
                        self.fps = Some(fps);
                    }
                    continue;
                }
                "kb/s" | "kb/s," => {
                    if let Some(rate) = previous.and_then(|p| p.parse().ok()) {
                        self.video_bit_rate = Some(rate);
                    }
                    continue;
                }
                _ => {}
            }
            if let Some(size) = parse_resolution(word) {
                self.resolution = Some(size);
            }
        }
    }

    fn parse_audio(&mut self, line: &str) {
        let words: Vec<&str> = line.split(' ').collect();
        for (i, word) in words.iter().enumerate() {
            let previous = i.checked_sub(1).map(|p| words[p]);
            match *word {
                "Hz" | "Hz," => {
                    if let Some(rate) = previous.and_then(|p| p.parse().ok()) {
                        self.sample_rate = Some(rate);
                    }
                }
                "kb/s" | "kb/s," => {
                    if let Some(rate) = previous.and_then(|p| p.parse().ok()) {
                        self.audio_bit_rate = Some(rate);
                    }
                }
                other => {
                    if let Some(channels) = channel_layout(other) {
                        self.channels = Some(channels);
                    }
                }
            }
        }
    }
}

/// `hh:mm:ss.xx...` to whole seconds plus the bias.
fn parse_duration(text: &str) -> Option<u32> {
    let seconds = timecode::parse_total_seconds(text.get(..8)?)?;
    Some(seconds + DURATION_BIAS_SECONDS)
}

/// `<int>x<int>` once commas are stripped.
fn parse_resolution(word: &str) -> Option<(u32, u32)> {
    let cleaned = word.replace(',', "");
    let (w, h) = cleaned.split_once('x')?;
    if h.contains('x') {
        return None;
    }
    Some((w.parse().ok()?, h.parse().ok()?))
}

fn channel_layout(word: &str) -> Option<u32> {
    match word {
        "mono," => Some(1),
        "stereo," => Some(2),
        "2.1," => Some(3),
        "quad," => Some(4),
        "5.0," => Some(5),
        "5.1," => Some(6),
        "7.1," => Some(8),
        _ => None,
    }
}

/// Parses a complete diagnostic dump.
#[must_use]
pub fn parse_output(output: &str) -> ProbeInfo {
    let mut info = ProbeInfo::default();
    for line in output.lines() {
        info.parse_line(line);
    }
    info
}

/// Parses diagnostic output as it is read from `reader`.
///
/// Lines that are not valid UTF-8 (Latin-1 metadata, for one) are decoded
/// lossily so that parsing continues past them.
pub fn parse_reader<R: Read>(reader: R) -> ProbeInfo {
    let mut info = ProbeInfo::default();
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf) {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                info.parse_line(line.trim_end_matches(['\r', '\n']));
            }
            Err(e) => {
                warn!("Error reading probe output: {}", e);
                break;
            }
        }
    }
    info
}

/// Probes `input` with the configured transcoder.
///
/// Returns an empty `ProbeInfo` without spawning anything when either the
/// input or the transcoder is missing. The transcoder's nonzero exit status is
/// expected and ignored; spawn and wait failures are logged and yield whatever
/// was parsed so far.
pub fn probe(config: &CoreConfig, input: &Path) -> ProbeInfo {
    if !input.is_file() {
        debug!("Probe skipped, input {} does not exist", input.display());
        return ProbeInfo::default();
    }
    let Ok(executable) = external::ensure_executable(config) else {
        debug!("Probe skipped, {} not found", config.ffmpeg_path.display());
        return ProbeInfo::default();
    };

    let args = FfmpegArgs::new().input(input);
    let mut child = match external::spawn_ffmpeg(&executable, &args) {
        Ok(child) => child,
        Err(e) => {
            warn!("{}", e);
            return ProbeInfo::default();
        }
    };

    let stdout_reader = child
        .stdout
        .take()
        .map(|out| external::spawn_line_reader(out, OutputStream::Stdout, |_, _| {}));

    let info = child.stderr.take().map(parse_reader).unwrap_or_default();

    if let Err(e) = child.wait() {
        warn!("{}", command_wait_error(executable.display().to_string(), e));
    }
    if let Some(handle) = stdout_reader {
        let _ = handle.join();
    }

    debug!("Probe of {}: {:?}", input.display(), info);
    info
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
Input #0, mov,mp4,m4a,3gp,3g2,mj2, from 'clip.mp4':
  Metadata:
    major_brand     : isom
  Duration: 00:01:23.45, start: 0.000000, bitrate: 1500 kb/s
    Stream #0:0(und): Video: h264 (High) (avc1 / 0x31637661), yuv420p, 1920x1080 [SAR 1:1 DAR 16:9], 1372 kb/s, 24 fps, 24 tbr, 12288 tbn, 48 tbc (default)
    Stream #0:1(und): Audio: aac (LC) (mp4a / 0x6134706D), 44100 Hz, stereo, fltp, 128 kb/s (default)
At least one output file must be specified";

    #[test]
    fn test_duration_line() {
        let mut info = ProbeInfo::default();
        info.parse_line("  Duration: 00:01:23.45, start: 0.000000, bitrate: 1500 kb/s");
        assert_eq!(info.duration_seconds, Some(84));
    }

    #[test]
    fn test_duration_not_available() {
        let mut info = ProbeInfo::default();
        info.parse_line("  Duration: N/A, start: 0.000000, bitrate: N/A");
        assert_eq!(info.duration_seconds, None);
    }

    #[test]
    fn test_audio_line() {
        let mut info = ProbeInfo::default();
        info.parse_line("Stream #0:1: Audio: aac, 44100 Hz, stereo, fltp, 128 kb/s");
        assert_eq!(info.channels, Some(2));
        assert_eq!(info.sample_rate, Some(44100));
        assert_eq!(info.audio_bit_rate, Some(128));
        assert_eq!(info.video_bit_rate, None);
    }

    #[test]
    fn test_video_line() {
        let mut info = ProbeInfo::default();
        info.parse_line("Stream #0:0: Video: h264, yuv420p, 1920x1080, 24 fps");
        assert_eq!(info.resolution, Some((1920, 1080)));
        assert_eq!(info.fps, Some(24.0));
    }

    #[test]
    fn test_full_output() {
        let info = parse_output(SAMPLE);
        assert_eq!(info.duration_seconds, Some(84));
        assert_eq!(info.resolution, Some((1920, 1080)));
        assert_eq!(info.video_bit_rate, Some(1372));
        assert_eq!(info.fps, Some(24.0));
        assert_eq!(info.channels, Some(2));
        assert_eq!(info.sample_rate, Some(44100));
        assert_eq!(info.audio_bit_rate, Some(128));
    }

    #[test]
    fn test_fractional_fps_uses_dot() {
        let info = parse_output("Stream #0:0: Video: h264, yuv420p, 1280x720, 29.97 fps, 29.97 tbr");
        assert_eq!(info.fps, Some(29.97));
        assert_eq!(info.resolution, Some((1280, 720)));
    }

    #[test]
    fn test_channel_layouts() {
        for (layout, expected) in [
            ("mono,", 1),
            ("stereo,", 2),
            ("2.1,", 3),
            ("quad,", 4),
            ("5.0,", 5),
            ("5.1,", 6),
            ("7.1,", 8),
        ] {
            let info = parse_output(&format!("Stream #0:1: Audio: ac3, 48000 Hz, {layout} fltp"));
            assert_eq!(info.channels, Some(expected), "{layout}");
        }
    }

    #[test]
    fn test_garbage_leaves_fields_unset() {
        let info = parse_output("Stream #0:0: Video: h264, axb, fps, kb/s\nnothing here\n");
        assert!(info.is_empty());
    }

    #[test]
    fn test_non_utf8_line_does_not_stop_parsing() {
        let mut bytes = b"  Duration: 00:01:23.45, start: 0.000000, bitrate: 1500 kb/s\n".to_vec();
        bytes.extend_from_slice(b"    title           : caf\xe9\n");
        bytes.extend_from_slice(b"    Stream #0:0: Video: h264, yuv420p, 1920x1080, 24 fps\r\n");
        bytes.extend_from_slice(b"    Stream #0:1: Audio: aac, 48000 Hz, mono, fltp, 96 kb/s");

        let info = parse_reader(std::io::Cursor::new(bytes));
        assert_eq!(info.duration_seconds, Some(84));
        assert_eq!(info.resolution, Some((1920, 1080)));
        assert_eq!(info.fps, Some(24.0));
        assert_eq!(info.channels, Some(1));
        assert_eq!(info.sample_rate, Some(48000));
        assert_eq!(info.audio_bit_rate, Some(96));
    }

    #[test]
    fn test_probe_missing_input_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let config = CoreConfig::new(dir.path().join("ffmpeg"));
        assert!(probe(&config, &dir.path().join("missing.mp4")).is_empty());
    }

    #[test]
    fn test_probe_missing_executable_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("clip.mp4");
        std::fs::write(&input, b"not really a video").unwrap();
        let config = CoreConfig::new(dir.path().join("no-ffmpeg-here"));
        assert!(probe(&config, &input).is_empty());
    }
}
