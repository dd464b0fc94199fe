// ============================================================================
// vidextract-cli/src/logging.rs
// ============================================================================
//
// LOGGING: Diagnostic Logger Setup
//
// Diagnostics go through the `log` facade with `env_logger` as the backend.
// They are written to stderr so that stdout stays clean for probe output and
// JSON events. The ffmpeg output log is a separate plain file (JobLog).
//
// USAGE:
// - default: warnings and errors
// - --verbose: debug output from vidextract crates
// - RUST_LOG overrides both
//
// AI-ASSISTANT-INFO: env_logger initialisation and timestamp helper

use console::style;
use log::LevelFilter;
use std::io::Write;

/// Returns the current local timestamp formatted as "YYYY-MM-DD HH:MM:SS".
pub fn get_timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Installs the global logger. Safe to call once per process.
pub fn init_logging(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(default_level)
        .parse_env("RUST_LOG")
        .format(|buf, record| {
            let level = match record.level() {
                log::Level::Error => style("ERROR").red().bold(),
                log::Level::Warn => style("WARN ").yellow(),
                log::Level::Info => style("INFO ").green(),
                log::Level::Debug => style("DEBUG").blue(),
                log::Level::Trace => style("TRACE").magenta(),
            };
            writeln!(
                buf,
                "{} {} {}",
                style(get_timestamp()).dim(),
                level,
                record.args()
            )
        });

    if builder.try_init().is_err() {
        log::debug!("Logger already initialised");
    }
}
