// vidextract-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use vidextract_core::ImageFormat;
use vidextract_core::config::DEFAULT_SETTINGS_FILE;
use vidextract_core::presets::{AUDIO_BITRATES, CHANNELS, FRAME_RATES, SAMPLE_RATES, describe};
use vidextract_core::timecode::UNSET;

/// Sentinel accepted by every rate/bitrate/channel option.
const DEFAULT: &str = "Default";

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "vidextract: ffmpeg front-end for common extraction tasks",
    long_about = "Extracts audio and images from videos, removes audio, resizes, crops, \
                  and assembles image sequences into videos by driving ffmpeg."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalArgs,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Settings file to load (missing or unreadable files fall back to defaults)
    #[arg(long, global = true, value_name = "FILE", default_value = DEFAULT_SETTINGS_FILE)]
    pub settings: PathBuf,

    /// Path to the ffmpeg executable (overrides the settings file)
    #[arg(long, global = true, value_name = "PATH", env = "VIDEXTRACT_FFMPEG")]
    pub ffmpeg: Option<PathBuf>,

    /// Overwrite existing output files (passes -y to ffmpeg)
    #[arg(long, global = true)]
    pub overwrite: bool,

    /// Do not reveal the output in the file browser after success
    #[arg(long, global = true)]
    pub no_reveal: bool,

    /// Append ffmpeg output to this log file (cleared at start)
    #[arg(long, global = true, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Print ffmpeg's output lines while a job runs
    #[arg(long, global = true)]
    pub show_output: bool,

    /// Emit job events as JSON lines on stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extracts the audio track of a video into an audio file
    ExtractAudio(ExtractAudioArgs),
    /// Copies a video without its audio track
    RemoveAudio(RemoveAudioArgs),
    /// Dumps video frames as numbered images into a directory
    ExtractImages(ExtractImagesArgs),
    /// Scales a video, optionally changing its bitrates
    ResizeVideo(ResizeVideoArgs),
    /// Crops a rectangle out of a video
    CropVideo(CropVideoArgs),
    /// Assembles a numbered image sequence into a video
    CreateVideo(CreateVideoArgs),
    /// Prints duration, resolution, frame rate and audio properties of a file
    Probe(ProbeArgs),
    /// Shows the effective settings, or writes them with --save
    Settings(SettingsArgs),
}

#[derive(Args, Debug)]
pub struct ExtractAudioArgs {
    /// Video file to read
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Audio file to write (defaults to INPUT with an .mp3 extension)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    #[arg(long, value_name = "N", default_value = DEFAULT, help = choices_help("Channel count", &CHANNELS))]
    pub channels: String,

    #[arg(long, value_name = "HZ", default_value = DEFAULT, help = choices_help("Sample rate in Hz", &SAMPLE_RATES))]
    pub sample_rate: String,

    #[arg(long, value_name = "KBPS", default_value = DEFAULT, help = choices_help("Bitrate in kb/s", &AUDIO_BITRATES))]
    pub bitrate: String,

    /// Start position, hh:mm:ss.fff or seconds
    #[arg(long, value_name = "TIME", default_value = UNSET)]
    pub start: String,

    /// Length to extract, hh:mm:ss.fff or seconds
    #[arg(long, value_name = "TIME", default_value = UNSET)]
    pub duration: String,
}

#[derive(Args, Debug)]
pub struct RemoveAudioArgs {
    /// Video file to read
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Video file to write (defaults to INPUT_noaudio)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ExtractImagesArgs {
    /// Video file to read
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Directory receiving the images (defaults to INPUT_Images)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Image format: bmp, jpg or png
    #[arg(long, value_name = "FORMAT", default_value = "png", value_parser = parse_image_format)]
    pub format: ImageFormat,

    #[arg(long, value_name = "FPS", default_value = "30", help = fps_help("Frames per second to extract"))]
    pub fps: String,

    /// Image width in pixels, 0 keeps the source size
    #[arg(long, value_name = "PX", default_value_t = 0)]
    pub width: u32,

    /// Image height in pixels, 0 keeps the source size
    #[arg(long, value_name = "PX", default_value_t = 0)]
    pub height: u32,

    /// Start position, hh:mm:ss.fff or seconds
    #[arg(long, value_name = "TIME", default_value = UNSET)]
    pub start: String,

    /// Length to extract, hh:mm:ss.fff or seconds
    #[arg(long, value_name = "TIME", default_value = UNSET)]
    pub duration: String,
}

#[derive(Args, Debug)]
pub struct ResizeVideoArgs {
    /// Video file to read
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Video file to write (defaults to INPUT_resized)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// New width in pixels, 0 keeps the input width
    #[arg(long, value_name = "PX", default_value_t = 0)]
    pub width: u32,

    /// New height in pixels, 0 keeps the input height
    #[arg(long, value_name = "PX", default_value_t = 0)]
    pub height: u32,

    /// Video bitrate in kb/s, or "Default"
    #[arg(long, value_name = "KBPS", default_value = DEFAULT)]
    pub video_bitrate: String,

    #[arg(long, value_name = "KBPS", default_value = DEFAULT, help = choices_help("Audio bitrate in kb/s", &AUDIO_BITRATES))]
    pub audio_bitrate: String,
}

#[derive(Args, Debug)]
pub struct CropVideoArgs {
    /// Video file to read
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Video file to write (defaults to INPUT_new)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Width of the kept rectangle
    #[arg(long, value_name = "PX")]
    pub width: u32,

    /// Height of the kept rectangle
    #[arg(long, value_name = "PX")]
    pub height: u32,

    /// Left edge of the rectangle
    #[arg(short, long, value_name = "PX", default_value_t = 0)]
    pub x: u32,

    /// Top edge of the rectangle
    #[arg(short, long, value_name = "PX", default_value_t = 0)]
    pub y: u32,

    /// Center the rectangle (ignores -x and -y)
    #[arg(long)]
    pub center: bool,
}

#[derive(Args, Debug)]
pub struct CreateVideoArgs {
    /// Directory holding the images
    #[arg(value_name = "DIR")]
    pub dir: PathBuf,

    /// Image file name pattern; %d is inserted before the extension if missing
    #[arg(long, value_name = "PATTERN", default_value = "image_%d.png")]
    pub pattern: String,

    /// Video file to write (defaults to DIR/MyVideo.avi)
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    #[arg(long, value_name = "FPS", default_value = "25", help = fps_help("Frames per second of the resulting video"))]
    pub fps: String,
}

#[derive(Args, Debug)]
pub struct ProbeArgs {
    /// Media file to inspect
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}

#[derive(Args, Debug)]
pub struct SettingsArgs {
    /// Write the effective settings (including command-line overrides) to the settings file
    #[arg(long)]
    pub save: bool,

    /// Remember this operation index (0-5) as the last used one
    #[arg(long, value_name = "INDEX", value_parser = clap::value_parser!(u8).range(0..=5))]
    pub last_tab: Option<u8>,
}

fn choices_help(what: &str, values: &[u32]) -> String {
    format!("{what}, or \"Default\" [common: {}]", describe(values))
}

fn fps_help(what: &str) -> String {
    format!(
        "{what}, a decimal comma is accepted [common: {}]",
        describe(&FRAME_RATES)
    )
}

fn parse_image_format(value: &str) -> Result<ImageFormat, String> {
    ImageFormat::from_name(value)
        .ok_or_else(|| format!("unsupported image format '{value}' (use bmp, jpg or png)"))
}
