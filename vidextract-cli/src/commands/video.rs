//! resize-video, crop-video and create-video commands.

use log::{debug, warn};
use vidextract_core::arguments::{count_sequence_images, image_sequence_pattern};
use vidextract_core::presets::{AUDIO_BITRATES, VIDEO_CONTAINERS, has_extension};
use vidextract_core::{
    CoreError, CreateVideoParams, CropVideoParams, JobBuilder, JobResult, ResizeVideoParams, Task,
    suggest_output,
};

use super::{RunOptions, require_input, run_job, warn_uncommon};
use crate::cli::{CreateVideoArgs, CropVideoArgs, ResizeVideoArgs};
use crate::error::CliResult;

fn warn_unusual_container(output: &std::path::Path) {
    if !has_extension(output, &VIDEO_CONTAINERS) {
        warn!("{} does not have a common video extension", output.display());
    }
}

pub fn run_resize_video(options: &RunOptions, args: ResizeVideoArgs) -> CliResult<JobResult> {
    require_input(&args.input)?;
    let output = args
        .output
        .unwrap_or_else(|| suggest_output(Task::ResizeVideo, &args.input));
    warn_unusual_container(&output);
    warn_uncommon("--audio-bitrate", &args.audio_bitrate, &AUDIO_BITRATES);

    let params = ResizeVideoParams {
        input: args.input,
        output,
        width: args.width,
        height: args.height,
        video_bitrate: args.video_bitrate,
        audio_bitrate: args.audio_bitrate,
    };
    let job = JobBuilder::new(&options.config).resize_video(&params);
    run_job(options, job)
}

pub fn run_crop_video(options: &RunOptions, args: CropVideoArgs) -> CliResult<JobResult> {
    require_input(&args.input)?;
    if args.width == 0 || args.height == 0 {
        return Err(CoreError::OperationFailed(
            "Crop width and height must be positive".to_string(),
        ));
    }
    let output = args
        .output
        .unwrap_or_else(|| suggest_output(Task::CropVideo, &args.input));
    warn_unusual_container(&output);

    let params = CropVideoParams {
        input: args.input,
        output,
        width: args.width,
        height: args.height,
        x: args.x,
        y: args.y,
        centered: args.center,
    };
    let job = JobBuilder::new(&options.config).crop_video(&params);
    run_job(options, job)
}

pub fn run_create_video(options: &RunOptions, args: CreateVideoArgs) -> CliResult<JobResult> {
    if !args.dir.is_dir() {
        return Err(CoreError::PathError(format!(
            "Image directory not found: {}",
            args.dir.display()
        )));
    }

    let input_pattern = image_sequence_pattern(&args.dir, &args.pattern);
    let file_pattern = input_pattern
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let count = count_sequence_images(&args.dir, &file_pattern);
    debug!("Images in folder: {}", count);
    if count == 0 {
        return Err(CoreError::PathError(format!(
            "No images matching {} in {}",
            file_pattern,
            args.dir.display()
        )));
    }

    let output = args
        .output
        .unwrap_or_else(|| suggest_output(Task::CreateVideo, &args.dir));
    warn_unusual_container(&output);

    let params = CreateVideoParams {
        input_pattern,
        output,
        fps: args.fps,
    };
    let job = JobBuilder::new(&options.config).create_video(&params);
    run_job(options, job)
}
