//! Job model: one user-requested transcoding operation and its lifecycle result.
//!
//! A [`Job`] is created by the argument builder, handed to the job runner, and
//! mutated exactly once when the child process exits.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

use crate::arguments::FfmpegArgs;
use crate::error::{CoreError, CoreResult};

static NEXT_JOB_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique job identifier, used as the key of the in-flight registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct JobId(u64);

impl JobId {
    fn next() -> Self {
        Self(NEXT_JOB_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[must_use]
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The six fixed operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Task {
    ExtractAudio,
    RemoveAudio,
    ExtractImages,
    ResizeVideo,
    CropVideo,
    CreateVideo,
}

impl Task {
    pub const ALL: [Task; 6] = [
        Task::ExtractAudio,
        Task::RemoveAudio,
        Task::ExtractImages,
        Task::ResizeVideo,
        Task::CropVideo,
        Task::CreateVideo,
    ];

    /// Human readable label, also used as the queue group name.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Task::ExtractAudio => "Extract audio",
            Task::RemoveAudio => "Remove audio",
            Task::ExtractImages => "Extract images",
            Task::ResizeVideo => "Resize video",
            Task::CropVideo => "Crop video",
            Task::CreateVideo => "Create video",
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Lifecycle result of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum JobResult {
    #[default]
    NotAvailable,
    Success,
    Cancel,
    Error,
}

impl JobResult {
    /// Classifies a child exit code.
    ///
    /// `None` means the process was terminated by a signal, which is what the
    /// forced-kill path produces on Unix; `-1` is the kill sentinel elsewhere.
    #[must_use]
    pub fn from_exit_code(code: Option<i32>) -> Self {
        match code {
            None | Some(-1) => JobResult::Cancel,
            Some(0) => JobResult::Success,
            Some(_) => JobResult::Error,
        }
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        self != JobResult::NotAvailable
    }
}

/// One transcoding job: paths, built arguments, task kind and result.
#[derive(Debug, Clone, Serialize)]
pub struct Job {
    id: JobId,
    input: PathBuf,
    output: PathBuf,
    #[serde(serialize_with = "serialize_args")]
    arguments: FfmpegArgs,
    task: Task,
    result: JobResult,
}

fn serialize_args<S: serde::Serializer>(args: &FfmpegArgs, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&args.to_string())
}

impl Job {
    pub fn new(
        input: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        arguments: FfmpegArgs,
        task: Task,
    ) -> Self {
        Self {
            id: JobId::next(),
            input: input.into(),
            output: output.into(),
            arguments,
            task,
            result: JobResult::NotAvailable,
        }
    }

    #[must_use]
    pub fn id(&self) -> JobId {
        self.id
    }

    #[must_use]
    pub fn input(&self) -> &Path {
        &self.input
    }

    #[must_use]
    pub fn output(&self) -> &Path {
        &self.output
    }

    #[must_use]
    pub fn arguments(&self) -> &FfmpegArgs {
        &self.arguments
    }

    #[must_use]
    pub fn task(&self) -> Task {
        self.task
    }

    #[must_use]
    pub fn result(&self) -> JobResult {
        self.result
    }

    /// Records the terminal result. Fails if a result was already recorded or
    /// if `result` is `NotAvailable`.
    pub fn set_result(&mut self, result: JobResult) -> CoreResult<()> {
        if self.result.is_terminal() {
            return Err(CoreError::ResultAlreadySet {
                id: self.id,
                current: self.result,
            });
        }
        if !result.is_terminal() {
            return Err(CoreError::OperationFailed(format!(
                "Job {} cannot be reset to {:?}",
                self.id, result
            )));
        }
        self.result = result;
        Ok(())
    }
}
