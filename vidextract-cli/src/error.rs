// ============================================================================
// vidextract-cli/src/error.rs
// ============================================================================
//
// CLI ERROR HANDLING: Error types and utilities for the CLI
//
// The CLI reuses the core error type and adds context on top of it. Job
// outcomes (Cancel, Error) are not errors here: they are mapped to exit codes
// by `exit_code_for`.
//
// KEY COMPONENTS:
// - CliResult: Type alias for CLI operations
// - CliErrorContext: Context extension for Result
// - Exit code mapping for finished jobs
//
// AI-ASSISTANT-INFO: CLI error handling utilities

// ---- Internal crate imports ----
use vidextract_core::{CoreError, CoreResult, JobResult};

// ---- Standard library imports ----
use std::fmt;

// ============================================================================
// RESULT TYPE ALIAS
// ============================================================================

/// Type alias for CLI results using CoreError.
pub type CliResult<T> = CoreResult<T>;

/// Exit code for a job cancelled by a signal or kill.
pub const EXIT_CANCELLED: i32 = 130;

/// Process exit code for a finished job.
#[must_use]
pub fn exit_code_for(result: JobResult) -> i32 {
    match result {
        JobResult::Success => 0,
        JobResult::Cancel => EXIT_CANCELLED,
        JobResult::Error | JobResult::NotAvailable => 1,
    }
}

// ============================================================================
// ERROR CONVERSION UTILITIES
// ============================================================================

/// Extension trait for adding context to errors in the CLI.
pub trait CliErrorContext<T> {
    /// Add context using a closure (for lazy evaluation).
    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C;
}

impl<T, E> CliErrorContext<T> for Result<T, E>
where
    E: Into<CoreError>,
{
    fn cli_with_context<C, F>(self, f: F) -> CliResult<T>
    where
        C: fmt::Display,
        F: FnOnce() -> C,
    {
        self.map_err(|e| {
            let core_error: CoreError = e.into();
            CoreError::OperationFailed(format!("{}: {}", f(), core_error))
        })
    }
}
