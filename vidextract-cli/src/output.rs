//! Human-readable terminal output.

use console::style;
use std::fmt::Display;
use vidextract_core::{JobEvent, JobResult, OutputStream, ProbeInfo};

/// Print an info line with label and value, with the label colored
pub fn print_info<T: Display>(label: &str, value: T) {
    println!("{}: {}", style(label).cyan(), value);
}

pub fn print_success(message: &str) {
    println!("{}", style(message).green().bold());
}

pub fn print_warning(message: &str) {
    println!("{}", style(message).yellow());
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", style("Error:").red().bold(), message);
}

/// Prints one job event. Output lines are shown only when `show_output` is set.
pub fn print_event(event: &JobEvent, show_output: bool) {
    match event {
        JobEvent::Queued { id, task, input, .. } => {
            print_info(&format!("{task} {id}"), input.display());
        }
        JobEvent::Started { command_line, .. } => {
            println!("{} {}", style("Running").bold(), command_line);
        }
        JobEvent::OutputLine { stream, line, .. } if show_output => match stream {
            OutputStream::Stdout => println!("{line}"),
            OutputStream::Stderr => println!("{}", style(line).dim()),
        },
        JobEvent::OutputLine { .. } => {}
        JobEvent::Finished { output, result, exit_code, .. } => match result {
            JobResult::Success => print_success(&format!("Done: {}", output.display())),
            JobResult::Cancel => print_warning("Cancelled, output removed"),
            JobResult::Error => print_error(&format!(
                "ffmpeg failed (exit code {}), output removed",
                exit_code.map_or_else(|| "none".to_string(), |c| c.to_string())
            )),
            JobResult::NotAvailable => {}
        },
        // Reported by main through the returned error
        JobEvent::ExecutableMissing { .. } | JobEvent::Alert => {}
    }
}

fn or_unknown<T: Display>(value: Option<T>, unit: &str) -> String {
    value.map_or_else(|| "unknown".to_string(), |v| format!("{v}{unit}"))
}

/// Prints the fields of a probe result, one per line.
pub fn print_probe(info: &ProbeInfo) {
    print_info("Duration", or_unknown(info.duration_seconds, " s"));
    print_info(
        "Resolution",
        info.resolution
            .map_or_else(|| "unknown".to_string(), |(w, h)| format!("{w}x{h}")),
    );
    print_info("Frame rate", or_unknown(info.fps, " fps"));
    print_info("Video bitrate", or_unknown(info.video_bit_rate, " kb/s"));
    print_info("Audio channels", or_unknown(info.channels, ""));
    print_info("Sample rate", or_unknown(info.sample_rate, " Hz"));
    print_info("Audio bitrate", or_unknown(info.audio_bit_rate, " kb/s"));
}
