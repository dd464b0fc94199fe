// ============================================================================
// vidextract-core/src/arguments.rs
// ============================================================================
//
// ARGUMENT BUILDER: Command Lines for the Six Supported Operations
//
// This module turns typed task parameters into the flat argument string the
// transcoder understands, and wraps it into a `Job`. Building never fails:
// free-form numeric fields that do not parse (the "Default" sentinel, or
// plain garbage) simply drop their flag, and the unset time code
// `00:00:00.000` drops `-ss`/`-t`.
//
// KEY COMPONENTS:
// - FfmpegArgs: Ordered argument tokens with a quoted display form
// - *Params: One parameter struct per task
// - JobBuilder: Applies the configuration (overwrite flag) and emits jobs
// - Output path suggestions and image sequence helpers
//
// AI-ASSISTANT-INFO: ffmpeg argument construction for vidextract jobs

// ---- Internal crate imports ----
use crate::config::CoreConfig;
use crate::job::{Job, Task};
use crate::timecode;

// ---- Standard library imports ----
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

/// Sentinel shown in selection lists for "let the transcoder decide".
pub const DEFAULT_CHOICE: &str = "Default";

// ============================================================================
// ARGUMENT LIST
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Plain(String),
    Path(String),
}

/// Ordered transcoder arguments.
///
/// The `Display` form is the flat command-line string (paths wrapped in double
/// quotes); [`FfmpegArgs::tokens`] is the argv handed to the child process,
/// which is spawned without a shell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FfmpegArgs {
    tokens: Vec<Token>,
}

impl FfmpegArgs {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `-i "<path>"`.
    #[must_use]
    pub fn input(self, path: impl AsRef<Path>) -> Self {
        self.flag("-i").path(path)
    }

    /// Adds the output path.
    #[must_use]
    pub fn output(self, path: impl AsRef<Path>) -> Self {
        self.path(path)
    }

    /// Adds a single bare token.
    #[must_use]
    pub fn flag(mut self, flag: impl Into<String>) -> Self {
        self.tokens.push(Token::Plain(flag.into()));
        self
    }

    /// Adds a flag followed by its value.
    #[must_use]
    pub fn arg(self, flag: impl Into<String>, value: impl fmt::Display) -> Self {
        self.flag(flag).flag(value.to_string())
    }

    /// Adds a flag and value only when `value` is present.
    #[must_use]
    pub fn arg_opt<T: fmt::Display>(self, flag: &str, value: Option<T>) -> Self {
        match value {
            Some(v) => self.arg(flag, v),
            None => self,
        }
    }

    /// Adds a bare token only when `enabled`.
    #[must_use]
    pub fn flag_if(self, enabled: bool, flag: &str) -> Self {
        if enabled { self.flag(flag) } else { self }
    }

    /// Adds a path token, quoted in the display form.
    #[must_use]
    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.tokens
            .push(Token::Path(path.as_ref().to_string_lossy().into_owned()));
        self
    }

    /// Argument vector for the child process.
    #[must_use]
    pub fn tokens(&self) -> Vec<&str> {
        self.tokens
            .iter()
            .map(|t| match t {
                Token::Plain(s) | Token::Path(s) => s.as_str(),
            })
            .collect()
    }

    /// Same as [`FfmpegArgs::tokens`], as `OsStr` for `Command::args`.
    pub fn os_tokens(&self) -> impl Iterator<Item = &OsStr> {
        self.tokens.iter().map(|t| match t {
            Token::Plain(s) | Token::Path(s) => OsStr::new(s.as_str()),
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl fmt::Display for FfmpegArgs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.tokens.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match token {
                Token::Plain(s) => f.write_str(s)?,
                Token::Path(s) => write!(f, "\"{s}\"")?,
            }
        }
        Ok(())
    }
}

// ============================================================================
// FIELD HELPERS
// ============================================================================

/// Parses a free-form numeric field. Returns `None` for the "Default"
/// sentinel and for anything else that is not an integer.
#[must_use]
pub fn numeric_override(text: &str) -> Option<i32> {
    text.trim().parse().ok()
}

/// Returns the time code when it is set, `None` for `00:00:00.000`.
#[must_use]
pub fn time_override(text: &str) -> Option<&str> {
    (!timecode::is_unset(text)).then_some(text)
}

/// Normalises a frame rate typed with a decimal comma.
#[must_use]
pub fn normalize_fps(text: &str) -> String {
    text.trim().replace(',', ".")
}

/// MP3 tops out at 320 kb/s; larger numeric bitrates are clamped when the
/// output is an MP3 file. Non-numeric values pass through untouched.
#[must_use]
pub fn clamp_mp3_bitrate(output: &Path, bitrate: &str) -> String {
    let is_mp3 = output
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("mp3"));
    match numeric_override(bitrate) {
        Some(value) if is_mp3 && value > 320 => "320".to_string(),
        _ => bitrate.to_string(),
    }
}

// ============================================================================
// TASK PARAMETERS
// ============================================================================

/// Parameters for extracting the audio track of a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractAudioParams {
    pub input: PathBuf,
    pub output: PathBuf,
    /// Channel count or "Default"
    pub channels: String,
    /// Sample rate in Hz or "Default"
    pub sample_rate: String,
    /// Bitrate in kb/s or "Default"
    pub bitrate: String,
    /// `hh:mm:ss.fff`, unset when `00:00:00.000`
    pub start: String,
    /// `hh:mm:ss.fff`, unset when `00:00:00.000`
    pub duration: String,
}

impl ExtractAudioParams {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            channels: DEFAULT_CHOICE.to_string(),
            sample_rate: DEFAULT_CHOICE.to_string(),
            bitrate: DEFAULT_CHOICE.to_string(),
            start: timecode::UNSET.to_string(),
            duration: timecode::UNSET.to_string(),
        }
    }
}

/// Parameters for stripping the audio from a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveAudioParams {
    pub input: PathBuf,
    pub output: PathBuf,
}

/// Still image formats for frame extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    Bmp,
    Jpg,
    #[default]
    Png,
}

impl ImageFormat {
    pub const ALL: [ImageFormat; 3] = [ImageFormat::Bmp, ImageFormat::Jpg, ImageFormat::Png];

    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Bmp => "bmp",
            ImageFormat::Jpg => "jpg",
            ImageFormat::Png => "png",
        }
    }

    /// Parses a format name or extension, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().trim_start_matches('.').to_ascii_lowercase().as_str() {
            "bmp" => Some(ImageFormat::Bmp),
            "jpg" | "jpeg" => Some(ImageFormat::Jpg),
            "png" => Some(ImageFormat::Png),
            _ => None,
        }
    }

    /// File name pattern used inside the output directory.
    #[must_use]
    pub fn sequence_pattern(self) -> String {
        format!("image_%d.{}", self.extension())
    }
}

/// Parameters for dumping frames of a video into a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractImagesParams {
    pub input: PathBuf,
    /// Directory that receives the numbered images
    pub output_dir: PathBuf,
    pub format: ImageFormat,
    /// Frames per second to sample; a decimal comma is accepted
    pub fps: String,
    /// 0 keeps the source size (both must be positive to emit `-s`)
    pub width: u32,
    pub height: u32,
    pub start: String,
    pub duration: String,
}

impl ExtractImagesParams {
    pub fn new(input: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output_dir: output_dir.into(),
            format: ImageFormat::default(),
            fps: "30".to_string(),
            width: 0,
            height: 0,
            start: timecode::UNSET.to_string(),
            duration: timecode::UNSET.to_string(),
        }
    }

    /// Full output pattern handed to the image2 muxer.
    #[must_use]
    pub fn output_pattern(&self) -> PathBuf {
        self.output_dir.join(self.format.sequence_pattern())
    }
}

/// Parameters for scaling a video and optionally re-targeting bitrates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeVideoParams {
    pub input: PathBuf,
    pub output: PathBuf,
    /// 0 keeps the input width (`iw`)
    pub width: u32,
    /// 0 keeps the input height (`ih`)
    pub height: u32,
    /// kb/s or "Default"
    pub video_bitrate: String,
    /// kb/s or "Default"
    pub audio_bitrate: String,
}

impl ResizeVideoParams {
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            width: 0,
            height: 0,
            video_bitrate: DEFAULT_CHOICE.to_string(),
            audio_bitrate: DEFAULT_CHOICE.to_string(),
        }
    }
}

/// Parameters for cropping a rectangle out of a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropVideoParams {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Top-left corner, ignored when `centered`
    pub x: u32,
    pub y: u32,
    /// Let the crop filter center the rectangle
    pub centered: bool,
}

/// Parameters for assembling a numbered image sequence into a video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateVideoParams {
    /// Image sequence pattern such as `/frames/image_%d.png`
    pub input_pattern: PathBuf,
    pub output: PathBuf,
    pub fps: String,
}

/// Builds `<dir>/<pattern>`, inserting `%d` before the extension when the
/// pattern does not already contain it.
#[must_use]
pub fn image_sequence_pattern(dir: &Path, pattern: &str) -> PathBuf {
    if pattern.contains("%d") {
        return dir.join(pattern);
    }
    let file = match pattern.rsplit_once('.') {
        Some((stem, ext)) => format!("{stem}%d.{ext}"),
        None => format!("{pattern}%d"),
    };
    dir.join(file)
}

/// Counts the files in `dir` matching `pattern`, where `%d` stands for any
/// run of characters. A missing directory counts as zero.
#[must_use]
pub fn count_sequence_images(dir: &Path, pattern: &str) -> usize {
    let (prefix, suffix) = pattern.split_once("%d").unwrap_or((pattern, ""));
    let Ok(entries) = std::fs::read_dir(dir) else {
        return 0;
    };
    entries
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file())
        .filter(|e| {
            let name = e.file_name().to_string_lossy().into_owned();
            if pattern.contains("%d") {
                name.len() >= prefix.len() + suffix.len()
                    && name.starts_with(prefix)
                    && name.ends_with(suffix)
            } else {
                name == pattern
            }
        })
        .count()
}

// ============================================================================
// JOB BUILDER
// ============================================================================

/// Builds jobs for the six operations using an explicit configuration.
#[derive(Debug, Clone, Copy)]
pub struct JobBuilder<'a> {
    config: &'a CoreConfig,
}

impl<'a> JobBuilder<'a> {
    #[must_use]
    pub fn new(config: &'a CoreConfig) -> Self {
        Self { config }
    }

    fn overwrite(&self) -> bool {
        self.config.overwrite
    }

    /// `-i "<in>" -vn [-ac] [-ar] [-ab] [-ss] [-t] [-y] "<out>"`
    #[must_use]
    pub fn extract_audio(&self, p: &ExtractAudioParams) -> Job {
        let args = FfmpegArgs::new()
            .input(&p.input)
            .flag("-vn")
            .arg_opt("-ac", numeric_override(&p.channels))
            .arg_opt("-ar", numeric_override(&p.sample_rate))
            .arg_opt("-ab", numeric_override(&p.bitrate))
            .arg_opt("-ss", time_override(&p.start))
            .arg_opt("-t", time_override(&p.duration))
            .flag_if(self.overwrite(), "-y")
            .output(&p.output);
        Job::new(&p.input, &p.output, args, Task::ExtractAudio)
    }

    /// `-i "<in>" -an [-y] "<out>"`
    #[must_use]
    pub fn remove_audio(&self, p: &RemoveAudioParams) -> Job {
        let args = FfmpegArgs::new()
            .input(&p.input)
            .flag("-an")
            .flag_if(self.overwrite(), "-y")
            .output(&p.output);
        Job::new(&p.input, &p.output, args, Task::RemoveAudio)
    }

    /// `-i "<in>" -r <fps> [-t] [-ss] [-s <w>x<h>] [-y] -f image2 "<dir>/image_%d.<ext>"`
    ///
    /// The job's output is the directory, so cleanup removes every image.
    #[must_use]
    pub fn extract_images(&self, p: &ExtractImagesParams) -> Job {
        let size = (p.width > 0 && p.height > 0).then(|| format!("{}x{}", p.width, p.height));
        let args = FfmpegArgs::new()
            .input(&p.input)
            .arg("-r", normalize_fps(&p.fps))
            .arg_opt("-t", time_override(&p.duration))
            .arg_opt("-ss", time_override(&p.start))
            .arg_opt("-s", size)
            .flag_if(self.overwrite(), "-y")
            .arg("-f", "image2")
            .output(p.output_pattern());
        Job::new(&p.input, &p.output_dir, args, Task::ExtractImages)
    }

    /// `-i "<in>" [-b:v <n>k] [-b:a <n>k] -vf scale=w=<w|iw>:h=<h|ih> [-y] "<out>"`
    #[must_use]
    pub fn resize_video(&self, p: &ResizeVideoParams) -> Job {
        let w = if p.width == 0 { "iw".to_string() } else { p.width.to_string() };
        let h = if p.height == 0 { "ih".to_string() } else { p.height.to_string() };
        let args = FfmpegArgs::new()
            .input(&p.input)
            .arg_opt("-b:v", numeric_override(&p.video_bitrate).map(|v| format!("{v}k")))
            .arg_opt("-b:a", numeric_override(&p.audio_bitrate).map(|v| format!("{v}k")))
            .arg("-vf", format!("scale=w={w}:h={h}"))
            .flag_if(self.overwrite(), "-y")
            .output(&p.output);
        Job::new(&p.input, &p.output, args, Task::ResizeVideo)
    }

    /// `-i "<in>" -vf crop=<w>:<h>[:<x>:<y>] [-y] "<out>"`
    #[must_use]
    pub fn crop_video(&self, p: &CropVideoParams) -> Job {
        let mut filter = format!("crop={}:{}", p.width, p.height);
        if !p.centered {
            filter.push_str(&format!(":{}:{}", p.x, p.y));
        }
        let args = FfmpegArgs::new()
            .input(&p.input)
            .arg("-vf", filter)
            .flag_if(self.overwrite(), "-y")
            .output(&p.output);
        Job::new(&p.input, &p.output, args, Task::CropVideo)
    }

    /// `-f image2 -i "<pattern>" -r <fps> [-y] "<out>"`
    #[must_use]
    pub fn create_video(&self, p: &CreateVideoParams) -> Job {
        let args = FfmpegArgs::new()
            .arg("-f", "image2")
            .input(&p.input_pattern)
            .arg("-r", normalize_fps(&p.fps))
            .flag_if(self.overwrite(), "-y")
            .output(&p.output);
        Job::new(&p.input_pattern, &p.output, args, Task::CreateVideo)
    }
}

// ============================================================================
// OUTPUT SUGGESTIONS
// ============================================================================

fn with_suffix(input: &Path, suffix: &str, extension: Option<&OsStr>) -> PathBuf {
    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let mut name = format!("{stem}{suffix}");
    if let Some(ext) = extension {
        name.push('.');
        name.push_str(&ext.to_string_lossy());
    }
    input.with_file_name(name)
}

/// Default output path offered for `task` given the chosen input.
///
/// For `CreateVideo` the input is the image directory.
#[must_use]
pub fn suggest_output(task: Task, input: &Path) -> PathBuf {
    match task {
        Task::ExtractAudio => input.with_extension("mp3"),
        Task::RemoveAudio => with_suffix(input, "_noaudio", input.extension()),
        Task::ExtractImages => with_suffix(input, "_Images", None),
        Task::ResizeVideo => with_suffix(input, "_resized", input.extension()),
        Task::CropVideo => with_suffix(input, "_new", input.extension()),
        Task::CreateVideo => input.join("MyVideo.avi"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(overwrite: bool) -> CoreConfig {
        CoreConfig {
            overwrite,
            ..CoreConfig::default()
        }
    }

    #[test]
    fn test_args_display_quotes_paths_only() {
        let args = FfmpegArgs::new()
            .input("/videos/my clip.mp4")
            .arg("-r", 24)
            .output("/out/x.mp4");
        assert_eq!(args.to_string(), r#"-i "/videos/my clip.mp4" -r 24 "/out/x.mp4""#);
        assert_eq!(args.tokens(), vec!["-i", "/videos/my clip.mp4", "-r", "24", "/out/x.mp4"]);
    }

    #[test]
    fn test_numeric_override() {
        assert_eq!(numeric_override("128"), Some(128));
        assert_eq!(numeric_override(" 44100 "), Some(44100));
        assert_eq!(numeric_override("Default"), None);
        assert_eq!(numeric_override("Default (2)"), None);
        assert_eq!(numeric_override("12k"), None);
        assert_eq!(numeric_override(""), None);
    }

    #[test]
    fn test_extract_audio_all_defaults() {
        let cfg = config(false);
        let job = JobBuilder::new(&cfg).extract_audio(&ExtractAudioParams::new("a.mp4", "a.mp3"));
        assert_eq!(job.arguments().to_string(), r#"-i "a.mp4" -vn "a.mp3""#);
        assert_eq!(job.task(), Task::ExtractAudio);
        assert_eq!(job.input(), Path::new("a.mp4"));
        assert_eq!(job.output(), Path::new("a.mp3"));
    }

    #[test]
    fn test_extract_audio_all_flags() {
        let cfg = config(true);
        let params = ExtractAudioParams {
            channels: "2".into(),
            sample_rate: "44100".into(),
            bitrate: "192".into(),
            start: "00:00:10.500".into(),
            duration: "00:01:00.000".into(),
            ..ExtractAudioParams::new("a.mp4", "a.mp3")
        };
        let job = JobBuilder::new(&cfg).extract_audio(&params);
        assert_eq!(
            job.arguments().to_string(),
            r#"-i "a.mp4" -vn -ac 2 -ar 44100 -ab 192 -ss 00:00:10.500 -t 00:01:00.000 -y "a.mp3""#
        );
    }

    #[test]
    fn test_extract_audio_malformed_numbers_are_dropped() {
        let cfg = config(false);
        let params = ExtractAudioParams {
            channels: "stereo".into(),
            sample_rate: "44.1k".into(),
            bitrate: "Default".into(),
            ..ExtractAudioParams::new("a.mp4", "a.mp3")
        };
        let job = JobBuilder::new(&cfg).extract_audio(&params);
        assert_eq!(job.arguments().to_string(), r#"-i "a.mp4" -vn "a.mp3""#);
    }

    #[test]
    fn test_remove_audio() {
        let params = RemoveAudioParams {
            input: "v.mkv".into(),
            output: "v_noaudio.mkv".into(),
        };
        let off = config(false);
        let on = config(true);
        assert_eq!(
            JobBuilder::new(&off).remove_audio(&params).arguments().to_string(),
            r#"-i "v.mkv" -an "v_noaudio.mkv""#
        );
        assert_eq!(
            JobBuilder::new(&on).remove_audio(&params).arguments().to_string(),
            r#"-i "v.mkv" -an -y "v_noaudio.mkv""#
        );
    }

    #[test]
    fn test_extract_images_defaults() {
        let cfg = config(false);
        let params = ExtractImagesParams::new("v.mp4", "/tmp/v_Images");
        let job = JobBuilder::new(&cfg).extract_images(&params);
        assert_eq!(
            job.arguments().to_string(),
            r#"-i "v.mp4" -r 30 -f image2 "/tmp/v_Images/image_%d.png""#
        );
        assert_eq!(job.output(), Path::new("/tmp/v_Images"));
    }

    #[test]
    fn test_extract_images_full() {
        let cfg = config(true);
        let params = ExtractImagesParams {
            format: ImageFormat::Jpg,
            fps: "29,97".into(),
            width: 640,
            height: 360,
            start: "00:00:05.000".into(),
            duration: "00:00:02.000".into(),
            ..ExtractImagesParams::new("v.mp4", "/tmp/frames")
        };
        let job = JobBuilder::new(&cfg).extract_images(&params);
        assert_eq!(
            job.arguments().to_string(),
            r#"-i "v.mp4" -r 29.97 -t 00:00:02.000 -ss 00:00:05.000 -s 640x360 -y -f image2 "/tmp/frames/image_%d.jpg""#
        );
    }

    #[test]
    fn test_extract_images_size_needs_both_dimensions() {
        let cfg = config(false);
        let params = ExtractImagesParams {
            width: 640,
            height: 0,
            ..ExtractImagesParams::new("v.mp4", "out")
        };
        let args = JobBuilder::new(&cfg).extract_images(&params).arguments().to_string();
        assert!(!args.contains("-s "));
    }

    #[test]
    fn test_resize_video() {
        let cfg = config(false);
        let params = ResizeVideoParams::new("in.mp4", "out.mp4");
        assert_eq!(
            JobBuilder::new(&cfg).resize_video(&params).arguments().to_string(),
            r#"-i "in.mp4" -vf scale=w=iw:h=ih "out.mp4""#
        );

        let params = ResizeVideoParams {
            width: 1280,
            video_bitrate: "2500".into(),
            audio_bitrate: "128".into(),
            ..ResizeVideoParams::new("in.mp4", "out.mp4")
        };
        let cfg = config(true);
        assert_eq!(
            JobBuilder::new(&cfg).resize_video(&params).arguments().to_string(),
            r#"-i "in.mp4" -b:v 2500k -b:a 128k -vf scale=w=1280:h=ih -y "out.mp4""#
        );
    }

    #[test]
    fn test_crop_video() {
        let cfg = config(false);
        let mut params = CropVideoParams {
            input: "in.mp4".into(),
            output: "out.mp4".into(),
            width: 640,
            height: 480,
            x: 10,
            y: 20,
            centered: false,
        };
        assert_eq!(
            JobBuilder::new(&cfg).crop_video(&params).arguments().to_string(),
            r#"-i "in.mp4" -vf crop=640:480:10:20 "out.mp4""#
        );
        params.centered = true;
        assert_eq!(
            JobBuilder::new(&cfg).crop_video(&params).arguments().to_string(),
            r#"-i "in.mp4" -vf crop=640:480 "out.mp4""#
        );
    }

    #[test]
    fn test_create_video() {
        let cfg = config(true);
        let params = CreateVideoParams {
            input_pattern: image_sequence_pattern(Path::new("/frames"), "image_%d.png"),
            output: "/frames/MyVideo.avi".into(),
            fps: "60".into(),
        };
        let job = JobBuilder::new(&cfg).create_video(&params);
        assert_eq!(
            job.arguments().to_string(),
            r#"-f image2 -i "/frames/image_%d.png" -r 60 -y "/frames/MyVideo.avi""#
        );
        assert_eq!(job.task(), Task::CreateVideo);
    }

    #[test]
    fn test_image_sequence_pattern_inserts_counter() {
        assert_eq!(
            image_sequence_pattern(Path::new("/f"), "frame.jpg"),
            PathBuf::from("/f/frame%d.jpg")
        );
        assert_eq!(
            image_sequence_pattern(Path::new("/f"), "frame"),
            PathBuf::from("/f/frame%d")
        );
        assert_eq!(
            image_sequence_pattern(Path::new("/f"), "img_%d.bmp"),
            PathBuf::from("/f/img_%d.bmp")
        );
    }

    #[test]
    fn test_count_sequence_images() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["image_1.png", "image_2.png", "image_10.png", "image_1.jpg", "other.png"] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }
        assert_eq!(count_sequence_images(dir.path(), "image_%d.png"), 3);
        assert_eq!(count_sequence_images(dir.path(), "image_%d.jpg"), 1);
        assert_eq!(count_sequence_images(dir.path(), "other.png"), 1);
        assert_eq!(count_sequence_images(&dir.path().join("missing"), "image_%d.png"), 0);
    }

    #[test]
    fn test_clamp_mp3_bitrate() {
        assert_eq!(clamp_mp3_bitrate(Path::new("a.mp3"), "448"), "320");
        assert_eq!(clamp_mp3_bitrate(Path::new("a.MP3"), "256"), "256");
        assert_eq!(clamp_mp3_bitrate(Path::new("a.ogg"), "448"), "448");
        assert_eq!(clamp_mp3_bitrate(Path::new("a.mp3"), "Default"), "Default");
    }

    #[test]
    fn test_suggest_output() {
        let input = Path::new("/videos/holiday.mp4");
        assert_eq!(suggest_output(Task::ExtractAudio, input), PathBuf::from("/videos/holiday.mp3"));
        assert_eq!(
            suggest_output(Task::RemoveAudio, input),
            PathBuf::from("/videos/holiday_noaudio.mp4")
        );
        assert_eq!(
            suggest_output(Task::ExtractImages, input),
            PathBuf::from("/videos/holiday_Images")
        );
        assert_eq!(
            suggest_output(Task::ResizeVideo, input),
            PathBuf::from("/videos/holiday_resized.mp4")
        );
        assert_eq!(suggest_output(Task::CropVideo, input), PathBuf::from("/videos/holiday_new.mp4"));
        assert_eq!(
            suggest_output(Task::CreateVideo, Path::new("/frames")),
            PathBuf::from("/frames/MyVideo.avi")
        );
    }

    #[test]
    fn test_image_format_from_name() {
        assert_eq!(ImageFormat::from_name("PNG"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_name(".jpeg"), Some(ImageFormat::Jpg));
        assert_eq!(ImageFormat::from_name("gif"), None);
    }
}
