// ============================================================================
// vidextract-core/src/external/mod.rs
// ============================================================================
//
// EXTERNAL TOOLS: Transcoder Processes and File System Side Effects
//
// This module holds everything that touches the outside world on behalf of a
// job: checking that the transcoder exists, spawning it with piped output,
// forwarding its output line by line, and the post-job file system actions
// (reveal in file browser, remove partial output, audible alert).
//
// KEY COMPONENTS:
// - ensure_executable: Existence check that runs before any spawn
// - spawn_ffmpeg: Child process creation without a shell
// - spawn_line_reader: One thread per pipe, forwarding lines in order
//
// AI-ASSISTANT-INFO: Process spawning and file system helpers for vidextract

// ---- Internal crate imports ----
use crate::arguments::FfmpegArgs;
use crate::config::CoreConfig;
use crate::error::{CoreError, CoreResult, command_start_error};
use crate::events::OutputStream;

// ---- External crate imports ----
use log::{debug, warn};

// ---- Standard library imports ----
use std::io::{BufRead, BufReader, Read};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};

// ============================================================================
// SUBMODULES
// ============================================================================

/// Reveal, remove and alert helpers used by the completion handler
pub mod file_browser;

pub use file_browser::{alert, remove_output, reveal_in_file_browser};

// ============================================================================
// TRANSCODER PROCESSES
// ============================================================================

/// Returns the resolved transcoder path, or `ExecutableNotFound` carrying the
/// configured path when it does not exist.
pub fn ensure_executable(config: &CoreConfig) -> CoreResult<PathBuf> {
    config
        .resolved_ffmpeg()
        .ok_or_else(|| CoreError::ExecutableNotFound(config.ffmpeg_path.clone()))
}

/// Flat command line used for logging: `<path> <arguments>`.
#[must_use]
pub fn command_line(executable: &std::path::Path, args: &FfmpegArgs) -> String {
    format!("{} {}", executable.display(), args)
}

/// Spawns the transcoder with stdout and stderr piped and stdin closed.
pub fn spawn_ffmpeg(executable: &std::path::Path, args: &FfmpegArgs) -> CoreResult<Child> {
    debug!("Spawning {}", command_line(executable, args));
    let mut cmd = Command::new(executable);
    cmd.args(args.os_tokens())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    cmd.spawn()
        .map_err(|e| command_start_error(executable.display().to_string(), e))
}

/// Reads `pipe` on a dedicated thread and hands every line to `on_line`.
///
/// Lines that are not valid UTF-8 are converted lossily. The thread ends
/// when the pipe closes.
pub fn spawn_line_reader<R, F>(pipe: R, stream: OutputStream, mut on_line: F) -> JoinHandle<()>
where
    R: Read + Send + 'static,
    F: FnMut(OutputStream, String) + Send + 'static,
{
    thread::spawn(move || {
        let mut reader = BufReader::new(pipe);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    on_line(stream, line.trim_end_matches(['\r', '\n']).to_string());
                }
                Err(e) => {
                    warn!("Error reading {:?}: {}", stream, e);
                    break;
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_ensure_executable_missing() {
        let dir = tempfile::tempdir().unwrap();
        let config = CoreConfig::new(dir.path().join("ffmpeg"));
        let err = ensure_executable(&config).unwrap_err();
        assert!(matches!(err, CoreError::ExecutableNotFound(p) if p == dir.path().join("ffmpeg")));
    }

    #[test]
    fn test_command_line_format() {
        let args = FfmpegArgs::new().input("a b.mp4").flag("-an").output("c.mp4");
        assert_eq!(
            command_line(std::path::Path::new("/usr/bin/ffmpeg"), &args),
            r#"/usr/bin/ffmpeg -i "a b.mp4" -an "c.mp4""#
        );
    }

    #[test]
    fn test_line_reader_forwards_lines_in_order() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let input = Cursor::new(b"first\r\nsecond\n\xffthird".to_vec());
        spawn_line_reader(input, OutputStream::Stderr, move |stream, line| {
            sink.lock().unwrap().push((stream, line));
        })
        .join()
        .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], (OutputStream::Stderr, "first".to_string()));
        assert_eq!(seen[1].1, "second");
        assert!(seen[2].1.ends_with("third"));
    }
}
