//! extract-images command.

use vidextract_core::{ExtractImagesParams, JobBuilder, JobResult, Task, suggest_output};

use super::{RunOptions, require_input, run_job, timecode_arg};
use crate::cli::ExtractImagesArgs;
use crate::error::CliResult;

pub fn run_extract_images(options: &RunOptions, args: ExtractImagesArgs) -> CliResult<JobResult> {
    require_input(&args.input)?;
    let start = timecode_arg("--start", &args.start)?;
    let duration = timecode_arg("--duration", &args.duration)?;

    let output_dir = args
        .output
        .unwrap_or_else(|| suggest_output(Task::ExtractImages, &args.input));
    let params = ExtractImagesParams {
        input: args.input,
        output_dir,
        format: args.format,
        fps: args.fps,
        width: args.width,
        height: args.height,
        start,
        duration,
    };
    let job = JobBuilder::new(&options.config).extract_images(&params);
    run_job(options, job)
}
