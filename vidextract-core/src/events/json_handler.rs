//! JSON lines event handler
//!
//! Writes one JSON object per job event, for consumption by scripts wrapping
//! the command-line tool.

use super::{EventHandler, JobEvent, OutputStream};
use crate::job::JobResult;
use serde_json::json;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

/// Event handler that writes events as JSON lines
pub struct JsonEventHandler {
    output: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventHandler {
    /// Create a handler writing to stdout
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    /// Create a handler with a custom writer
    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            output: Mutex::new(writer),
        }
    }

    fn get_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs()
    }

    fn write_json(&self, value: serde_json::Value) {
        if let Ok(mut output) = self.output.lock() {
            if let Ok(json_str) = serde_json::to_string(&value) {
                let _ = writeln!(output, "{}", json_str);
                let _ = output.flush();
            }
        }
    }

    fn result_name(result: JobResult) -> &'static str {
        match result {
            JobResult::NotAvailable => "not_available",
            JobResult::Success => "success",
            JobResult::Cancel => "cancel",
            JobResult::Error => "error",
        }
    }
}

impl Default for JsonEventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for JsonEventHandler {
    fn handle(&self, event: &JobEvent) {
        let timestamp = Self::get_timestamp();

        let value = match event {
            JobEvent::Queued {
                id,
                task,
                input,
                output,
            } => json!({
                "type": "queued",
                "job": id.as_u64(),
                "task": task.label(),
                "input": input.display().to_string(),
                "output": output.display().to_string(),
                "timestamp": timestamp
            }),
            JobEvent::Started { id, command_line } => json!({
                "type": "started",
                "job": id.as_u64(),
                "command_line": command_line,
                "timestamp": timestamp
            }),
            JobEvent::OutputLine { id, stream, line } => json!({
                "type": "output",
                "job": id.as_u64(),
                "stream": match stream {
                    OutputStream::Stdout => "stdout",
                    OutputStream::Stderr => "stderr",
                },
                "line": line,
                "timestamp": timestamp
            }),
            JobEvent::Finished {
                id,
                task,
                output,
                result,
                exit_code,
            } => json!({
                "type": "finished",
                "job": id.as_u64(),
                "task": task.label(),
                "output": output.display().to_string(),
                "result": Self::result_name(*result),
                "exit_code": exit_code,
                "timestamp": timestamp
            }),
            JobEvent::ExecutableMissing { path } => json!({
                "type": "executable_missing",
                "path": path.display().to_string(),
                "timestamp": timestamp
            }),
            JobEvent::Alert => json!({
                "type": "alert",
                "timestamp": timestamp
            }),
        };
        self.write_json(value);
    }
}
