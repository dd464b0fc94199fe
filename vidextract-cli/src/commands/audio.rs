//! extract-audio and remove-audio commands.

use log::{info, warn};
use vidextract_core::arguments::clamp_mp3_bitrate;
use vidextract_core::presets::{
    AUDIO_BITRATES, AUDIO_CONTAINERS, CHANNELS, SAMPLE_RATES, VIDEO_CONTAINERS, has_extension,
};
use vidextract_core::{
    ExtractAudioParams, JobBuilder, JobResult, RemoveAudioParams, Task, suggest_output,
};

use super::{RunOptions, require_input, run_job, timecode_arg, warn_uncommon};
use crate::cli::{ExtractAudioArgs, RemoveAudioArgs};
use crate::error::CliResult;

/// Builds the extract-audio parameters from the command line.
pub fn extract_audio_params(args: ExtractAudioArgs) -> CliResult<ExtractAudioParams> {
    let start = timecode_arg("--start", &args.start)?;
    let duration = timecode_arg("--duration", &args.duration)?;

    let output = args
        .output
        .unwrap_or_else(|| suggest_output(Task::ExtractAudio, &args.input));
    if !has_extension(&output, &AUDIO_CONTAINERS) {
        warn!("{} does not have a common audio extension", output.display());
    }

    warn_uncommon("--channels", &args.channels, &CHANNELS);
    warn_uncommon("--sample-rate", &args.sample_rate, &SAMPLE_RATES);
    warn_uncommon("--bitrate", &args.bitrate, &AUDIO_BITRATES);

    let bitrate = clamp_mp3_bitrate(&output, &args.bitrate);
    if bitrate != args.bitrate {
        info!("MP3 bitrate limited to {} kb/s", bitrate);
    }

    Ok(ExtractAudioParams {
        input: args.input,
        output,
        channels: args.channels,
        sample_rate: args.sample_rate,
        bitrate,
        start,
        duration,
    })
}

pub fn run_extract_audio(options: &RunOptions, args: ExtractAudioArgs) -> CliResult<JobResult> {
    require_input(&args.input)?;
    let params = extract_audio_params(args)?;
    let job = JobBuilder::new(&options.config).extract_audio(&params);
    run_job(options, job)
}

pub fn run_remove_audio(options: &RunOptions, args: RemoveAudioArgs) -> CliResult<JobResult> {
    require_input(&args.input)?;
    let output = args
        .output
        .unwrap_or_else(|| suggest_output(Task::RemoveAudio, &args.input));
    if !has_extension(&output, &VIDEO_CONTAINERS) {
        warn!("{} does not have a common video extension", output.display());
    }

    let params = RemoveAudioParams {
        input: args.input,
        output,
    };
    let job = JobBuilder::new(&options.config).remove_audio(&params);
    run_job(options, job)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{Cli, Commands};
    use clap::Parser;
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> ExtractAudioArgs {
        match Cli::parse_from(args).command {
            Commands::ExtractAudio(args) => args,
            other => panic!("Expected ExtractAudio, got {other:?}"),
        }
    }

    #[test]
    fn test_default_output_and_clamp() {
        let params = extract_audio_params(parse(&[
            "vidextract",
            "extract-audio",
            "/videos/clip.mp4",
            "--bitrate",
            "448",
        ]))
        .unwrap();
        assert_eq!(params.output, PathBuf::from("/videos/clip.mp3"));
        assert_eq!(params.bitrate, "320");
    }

    #[test]
    fn test_no_clamp_for_other_formats() {
        let params = extract_audio_params(parse(&[
            "vidextract",
            "extract-audio",
            "clip.mp4",
            "-o",
            "clip.wav",
            "--bitrate",
            "448",
        ]))
        .unwrap();
        assert_eq!(params.bitrate, "448");
    }

    #[test]
    fn test_seconds_become_timecodes() {
        let params = extract_audio_params(parse(&[
            "vidextract",
            "extract-audio",
            "clip.mp4",
            "--start",
            "75",
            "--duration",
            "00:00:30.250",
        ]))
        .unwrap();
        assert_eq!(params.start, "00:01:15.000");
        assert_eq!(params.duration, "00:00:30.250");
    }

    #[test]
    fn test_invalid_start_rejected() {
        let result = extract_audio_params(parse(&[
            "vidextract",
            "extract-audio",
            "clip.mp4",
            "--start",
            "10s",
        ]));
        assert!(result.is_err());
    }
}
