//! Core library for running ffmpeg extraction and conversion jobs.
//!
//! This crate builds ffmpeg argument lists for six fixed operations (extract
//! audio, remove audio, extract images, resize, crop, create video from
//! images), runs them as child processes with cancellation support, and
//! scrapes media properties from ffmpeg's probe output.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use vidextract_core::{CoreConfig, EventDispatcher, JobBuilder, JobRunner, RemoveAudioParams};
//!
//! let config = CoreConfig {
//!     overwrite: true,
//!     ..CoreConfig::new("/usr/bin/ffmpeg")
//! };
//! let job = JobBuilder::new(&config).remove_audio(&RemoveAudioParams {
//!     input: "clip.mp4".into(),
//!     output: "clip_noaudio.mp4".into(),
//! });
//!
//! let runner = JobRunner::new(config, EventDispatcher::new());
//! let handle = runner.spawn(job).unwrap();
//! let finished = handle.join().unwrap();
//! println!("{:?}", finished.result());
//! ```

pub mod arguments;
pub mod config;
pub mod error;
pub mod events;
pub mod external;
pub mod job;
pub mod joblog;
pub mod presets;
pub mod probe;
pub mod runner;
pub mod settings;
pub mod timecode;

// Re-exports for public API
pub use arguments::{
    CreateVideoParams, CropVideoParams, ExtractAudioParams, ExtractImagesParams, FfmpegArgs,
    ImageFormat, JobBuilder, RemoveAudioParams, ResizeVideoParams, suggest_output,
};
pub use config::CoreConfig;
pub use error::{CoreError, CoreResult};
pub use events::{ChannelEventHandler, EventDispatcher, EventHandler, JobEvent, OutputStream};
pub use job::{Job, JobId, JobResult, Task};
pub use joblog::JobLog;
pub use probe::{ProbeInfo, probe};
pub use runner::{JobHandle, JobRunner};
pub use settings::{load_settings, save_settings};
