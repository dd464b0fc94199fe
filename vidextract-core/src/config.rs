// ============================================================================
// vidextract-core/src/config.rs
// ============================================================================
//
// CONFIGURATION: Core Configuration Structure and Constants
//
// This module defines the explicit configuration value that is passed to the
// argument builder and the job runner. Nothing in the core reads ambient
// mutable state: every behaviour switch (overwrite, reveal in file browser,
// file logging) and the transcoder location live here.
//
// KEY COMPONENTS:
// - CoreConfig: Configuration consumed by the core library
// - Default constants: executable name, settings and log file names
// - Executable resolution through the system PATH
//
// USAGE:
// Instances are built by the presentation layer (vidextract-cli), usually by
// loading the settings file (see `settings`) and applying command-line
// overrides on top.
//
// AI-ASSISTANT-INFO: Configuration value object for vidextract-core

// ---- Standard library imports ----
use std::path::{Path, PathBuf};

// ============================================================================
// DEFAULT CONSTANTS
// ============================================================================

/// Default transcoder executable name.
#[cfg(windows)]
pub const DEFAULT_FFMPEG: &str = "ffmpeg.exe";
/// Default transcoder executable name.
#[cfg(not(windows))]
pub const DEFAULT_FFMPEG: &str = "ffmpeg";

/// Default settings file name, resolved relative to the working directory.
pub const DEFAULT_SETTINGS_FILE: &str = "vidextract.cfg";

/// Default job output log file name.
pub const DEFAULT_LOG_FILE: &str = "vidextract.log";

/// Highest valid value of the persisted `last tab` directive.
pub const MAX_TAB_INDEX: u8 = 5;

// ============================================================================
// CORE CONFIGURATION
// ============================================================================

/// Configuration passed explicitly into the argument builder and job runner.
///
/// # Examples
///
/// ```rust
/// use vidextract_core::CoreConfig;
/// use std::path::PathBuf;
///
/// let config = CoreConfig {
///     ffmpeg_path: PathBuf::from("/usr/bin/ffmpeg"),
///     overwrite: true,
///     ..CoreConfig::default()
/// };
/// assert!(config.open_explorer);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoreConfig {
    // ---- Transcoder ----

    /// Path to the transcoder executable
    pub ffmpeg_path: PathBuf,

    // ---- Behaviour Switches ----

    /// Reveal the output in the system file browser after a successful job
    pub open_explorer: bool,

    /// Whether the presentation layer should look for a newer release
    pub check_updates: bool,

    /// Append child process output to `log_file`
    pub file_log: bool,

    /// Forward child process output to the on-screen log
    pub output_log: bool,

    /// Emit `-y` so the transcoder overwrites existing outputs
    pub overwrite: bool,

    // ---- Presentation State ----

    /// Last selected operation tab (0-5), persisted only when set
    pub last_tab: Option<u8>,

    // ---- Paths ----

    /// Job output log file
    pub log_file: PathBuf,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from(DEFAULT_FFMPEG),
            open_explorer: true,
            check_updates: true,
            file_log: false,
            output_log: false,
            overwrite: false,
            last_tab: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl CoreConfig {
    /// Creates a configuration with defaults and the given transcoder path.
    pub fn new(ffmpeg_path: impl Into<PathBuf>) -> Self {
        Self {
            ffmpeg_path: ffmpeg_path.into(),
            ..Self::default()
        }
    }

    /// Returns the transcoder path if it exists.
    ///
    /// A bare executable name (no directory component) that does not exist in
    /// the working directory is looked up on the system PATH.
    #[must_use]
    pub fn resolved_ffmpeg(&self) -> Option<PathBuf> {
        resolve_executable(&self.ffmpeg_path)
    }
}

/// Resolves `path` to an existing file, searching PATH for bare names.
///
/// A bare name found in the working directory comes back as `./<name>` so
/// that it can be spawned as is.
#[must_use]
pub fn resolve_executable(path: &Path) -> Option<PathBuf> {
    let is_bare_name = path.parent().is_none_or(|p| p.as_os_str().is_empty());
    if path.is_file() {
        // `Command::new` looks bare names up on PATH, not in the working directory
        return Some(if is_bare_name {
            Path::new(".").join(path)
        } else {
            path.to_path_buf()
        });
    }
    if is_bare_name && !path.as_os_str().is_empty() {
        if let Ok(found) = which::which(path) {
            log::debug!("Resolved {} to {}", path.display(), found.display());
            return Some(found);
        }
    }
    None
}
