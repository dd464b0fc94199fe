//! Post-job file system actions: reveal, remove, alert.

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::process::Command;
use std::thread;

use log::{debug, warn};

/// Opens the system file browser with `path` selected.
///
/// Returns `false` when the path does not exist or the browser could not be
/// launched. Linux file managers have no portable "select" switch, so the
/// parent directory is opened instead.
pub fn reveal_in_file_browser(path: &Path) -> bool {
    if !path.exists() {
        debug!("Nothing to reveal at {}", path.display());
        return false;
    }

    #[cfg(target_os = "windows")]
    let result = {
        let mut select = std::ffi::OsString::from("/select,");
        select.push(path.as_os_str());
        let mut command = Command::new("explorer");
        command.arg(select);
        launch(command)
    };

    #[cfg(target_os = "macos")]
    let result = {
        let mut command = Command::new("open");
        command.arg("-R").arg(path);
        launch(command)
    };

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    let result = {
        let target = if path.is_dir() {
            path
        } else {
            path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."))
        };
        let mut command = Command::new("xdg-open");
        command.arg(target);
        launch(command)
    };

    match result {
        Ok(()) => true,
        Err(e) => {
            warn!("Could not open file browser for {}: {}", path.display(), e);
            false
        }
    }
}

/// Starts a helper program without waiting for it. The child is reaped on a
/// detached thread.
fn launch(mut command: Command) -> io::Result<()> {
    let mut child = command.spawn()?;
    thread::Builder::new()
        .name("file-browser".into())
        .spawn(move || {
            if let Err(e) = child.wait() {
                debug!("Waiting for file browser failed: {}", e);
            }
        })?;
    Ok(())
}

/// Removes a job output, recursively when it is a directory.
///
/// A missing path is not an error.
pub fn remove_output(path: &Path) -> io::Result<()> {
    let result = if path.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    match result {
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

/// Audible alert: rings the terminal bell on stderr.
pub fn alert() {
    let mut stderr = io::stderr();
    let _ = stderr.write_all(b"\x07");
    let _ = stderr.flush();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remove_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("out.mp3");
        fs::write(&file, b"partial").unwrap();
        remove_output(&file).unwrap();
        assert!(!file.exists());
    }

    #[test]
    fn test_remove_directory_recursively() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join("clip_Images");
        fs::create_dir(&images).unwrap();
        fs::write(images.join("image_1.png"), b"x").unwrap();
        fs::write(images.join("image_2.png"), b"x").unwrap();
        remove_output(&images).unwrap();
        assert!(!images.exists());
    }

    #[test]
    fn test_remove_missing_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        remove_output(&dir.path().join("never-created.mp4")).unwrap();
    }

    #[cfg(unix)]
    #[test]
    fn test_launch_reports_spawn_failure() {
        assert!(launch(Command::new("true")).is_ok());
        let err = launch(Command::new("/nonexistent/file-browser")).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_reveal_missing_path_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!reveal_in_file_browser(&dir.path().join("missing.mp4")));
    }
}
