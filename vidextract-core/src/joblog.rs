//! Plain-text job output log.
//!
//! Separate from the diagnostic `log` facade: this file receives the echoed
//! command line and every line the transcoder prints, unformatted. The file
//! is opened, appended and closed on every write, so several job threads can
//! share one [`JobLog`] without holding a handle.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::config::CoreConfig;

#[derive(Debug)]
pub struct JobLog {
    path: PathBuf,
    enabled: bool,
    // Serialises appends so lines from concurrent jobs never interleave
    write_lock: Mutex<()>,
}

impl JobLog {
    pub fn new(path: impl Into<PathBuf>, enabled: bool) -> Self {
        Self {
            path: path.into(),
            enabled,
            write_lock: Mutex::new(()),
        }
    }

    /// Log configured by `file_log` and `log_file`.
    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(&config.log_file, config.file_log)
    }

    /// A log that never writes.
    pub fn disabled() -> Self {
        Self::new(PathBuf::new(), false)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Truncates the file. Called once at application start.
    pub fn clear(&self) -> io::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, b"")
    }

    /// Appends one line.
    pub fn append(&self, line: &str) -> io::Result<()> {
        if !self.enabled {
            return Ok(());
        }
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")
    }

    /// Appends one line, reporting failures through the diagnostic logger
    /// instead of the caller.
    pub fn write(&self, line: &str) {
        if let Err(e) = self.append(line) {
            log::warn!("Could not write to {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("job.log");
        let log = JobLog::new(&path, true);

        log.clear().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");

        log.write("ffmpeg -i \"a.mp4\" -an \"b.mp4\"");
        log.write("frame=  10");
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "ffmpeg -i \"a.mp4\" -an \"b.mp4\"\nframe=  10\n"
        );

        log.clear().unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "");
    }

    #[test]
    fn test_disabled_log_never_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("job.log");
        let log = JobLog::new(&path, false);
        log.clear().unwrap();
        log.write("ignored");
        assert!(!path.exists());
    }

    #[test]
    fn test_from_config() {
        let config = CoreConfig {
            file_log: true,
            log_file: PathBuf::from("custom.log"),
            ..CoreConfig::default()
        };
        let log = JobLog::from_config(&config);
        assert!(log.is_enabled());
        assert_eq!(log.path(), Path::new("custom.log"));
    }
}
