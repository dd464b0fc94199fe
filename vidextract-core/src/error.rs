// ============================================================================
// vidextract-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Core Error Types
//
// This module defines the error type shared by the argument builder, the job
// runner and the settings loader. Probe parsing never surfaces errors: a field
// that fails to parse is simply left unset.
//
// KEY COMPONENTS:
// - CoreError: All failure modes of the core library
// - CoreResult: Result alias used throughout the crate
// - Helper constructors for process-related errors
//
// AI-ASSISTANT-INFO: Error types and helpers for vidextract-core

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::job::{JobId, JobResult};

/// Errors produced by the vidextract core library.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The configured transcoder does not exist; no process was spawned.
    #[error("{} not found", .0.display())]
    ExecutableNotFound(PathBuf),

    #[error("Failed to start {0}: {1}")]
    CommandStart(String, #[source] io::Error),

    #[error("Failed while waiting for {0}: {1}")]
    CommandWait(String, #[source] io::Error),

    #[error("Path error: {0}")]
    PathError(String),

    #[error("No running job with id {0}")]
    JobNotFound(JobId),

    /// A job result may only move from `NotAvailable` to a terminal value once.
    #[error("Job {id} already finished with result {current:?}")]
    ResultAlreadySet { id: JobId, current: JobResult },

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    OperationFailed(String),
}

/// Result alias used throughout vidextract-core.
pub type CoreResult<T> = Result<T, CoreError>;

pub(crate) fn command_start_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandStart(cmd.into(), err)
}

pub(crate) fn command_wait_error(cmd: impl Into<String>, err: io::Error) -> CoreError {
    CoreError::CommandWait(cmd.into(), err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executable_not_found_message() {
        let err = CoreError::ExecutableNotFound(PathBuf::from("/opt/ffmpeg/bin/ffmpeg"));
        assert_eq!(err.to_string(), "/opt/ffmpeg/bin/ffmpeg not found");
    }

    #[test]
    fn test_io_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let err: CoreError = io_err.into();
        assert!(matches!(err, CoreError::Io(_)));
    }
}
