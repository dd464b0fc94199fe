//! Command implementations for the CLI.
//!
//! Each submodule builds a job (or probes, or edits settings); the shared
//! [`run_job`] executes it on a background worker and prints its events.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crossbeam_channel::RecvTimeoutError;
use vidextract_core::events::json_handler::JsonEventHandler;
use vidextract_core::presets::{describe, is_common};
use vidextract_core::timecode::{is_valid_timecode, replace_seconds};
use vidextract_core::{
    ChannelEventHandler, CoreConfig, CoreError, EventDispatcher, Job, JobEvent, JobResult,
    JobRunner,
};

use crate::error::CliResult;
use crate::output::print_event;

/// Module containing the extract-audio and remove-audio commands.
pub mod audio;
/// Module containing the extract-images command.
pub mod images;
/// Module containing the probe command.
pub mod probe;
/// Module containing the settings command.
pub mod settings;
/// Module containing the resize-video, crop-video and create-video commands.
pub mod video;

const EVENT_POLL: Duration = Duration::from_millis(100);

/// Options shared by every job command.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub config: CoreConfig,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

/// Fails unless `path` is an existing file.
pub fn require_input(path: &Path) -> CliResult<()> {
    if path.is_file() {
        Ok(())
    } else {
        Err(CoreError::PathError(format!(
            "Input file not found: {}",
            path.display()
        )))
    }
}

/// Logs a warning when `value` is a number outside the `common` list.
pub fn warn_uncommon(option: &str, value: &str, common: &[u32]) {
    if !is_common(common, value) {
        log::warn!("{option} {value} is unusual (common: {})", describe(common));
    }
}

/// Accepts a `hh:mm:ss.fff` time code, or a second count with up to three
/// decimals (`90`, `90.5`) which is converted to one.
pub fn timecode_arg(option: &str, value: &str) -> CliResult<String> {
    if is_valid_timecode(value) {
        return Ok(value.to_string());
    }
    let (whole, fraction) = value.split_once('.').unwrap_or((value, ""));
    let fraction_ok = fraction.len() <= 3 && fraction.bytes().all(|b| b.is_ascii_digit());
    match whole.parse::<u32>() {
        Ok(seconds) if fraction_ok && !whole.starts_with('+') => {
            Ok(replace_seconds(&format!("00:00:00.{fraction:0<3}"), seconds))
        }
        _ => Err(CoreError::OperationFailed(format!(
            "Invalid {option} '{value}', expected hh:mm:ss.fff or seconds"
        ))),
    }
}

/// Kills the runner's children on Ctrl+C or SIGTERM. The worker then
/// classifies the job as cancelled and removes its output.
fn install_interrupt_handler(runner: &JobRunner) {
    let runner = runner.clone();
    let installed = ctrlc::set_handler(move || {
        log::info!("Interrupted, stopping running jobs");
        runner.shutdown();
    });
    if let Err(e) = installed {
        log::warn!("Could not install interrupt handler: {}", e);
    }
}

/// Runs `job` on a worker thread, printing events until it finishes.
pub fn run_job(options: &RunOptions, job: Job) -> CliResult<JobResult> {
    let (handler, receiver) = ChannelEventHandler::new();
    let mut events = EventDispatcher::new();
    events.add_handler(Arc::new(handler));
    if options.json {
        events.add_handler(Arc::new(JsonEventHandler::new()));
    }

    let runner = JobRunner::new(options.config.clone(), events);
    install_interrupt_handler(&runner);
    let handle = runner.spawn(job)?;
    let show = |event: JobEvent| {
        if !options.json {
            print_event(&event, options.config.output_log);
        }
    };

    loop {
        match receiver.recv_timeout(EVENT_POLL) {
            Ok(event) => show(event),
            Err(RecvTimeoutError::Timeout) if handle.is_finished() => break,
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    receiver.try_iter().for_each(show);

    let job = handle.join()?;
    Ok(job.result())
}
