// ============================================================================
// vidextract-core/src/settings.rs
// ============================================================================
//
// SETTINGS FILE: Persisted CoreConfig in a Line-Oriented Directive Format
//
// One directive per line, matched case-insensitively by substring:
//
//   no windows      do not reveal outputs in the file browser
//   no update       clear the update-check flag
//   file log        write the job output log file
//   output          forward transcoder output to the screen
//   overwrite       pass -y to the transcoder
//   last tab <0-5>  last selected operation
//   ffmpeg <path>   transcoder location
//
// A directive that is absent leaves the default. A missing or unreadable file
// yields the defaults; loading never fails.
//
// AI-ASSISTANT-INFO: Load/save of the key-presence settings file

// ---- Internal crate imports ----
use crate::config::{CoreConfig, MAX_TAB_INDEX};
use crate::error::{CoreError, CoreResult};

// ---- External crate imports ----
use log::{debug, info};

// ---- Standard library imports ----
use std::fs;
use std::path::{Path, PathBuf};

const FFMPEG_DIRECTIVE: &str = "ffmpeg ";
const LAST_TAB_DIRECTIVE: &str = "last tab ";

/// Applies the directives in `text` on top of the defaults.
#[must_use]
pub fn parse_settings(text: &str) -> CoreConfig {
    let mut config = CoreConfig::default();
    for line in text.lines() {
        let lower = line.to_lowercase();

        // The path may contain any other directive's keyword, so this line
        // is consumed on its own. Its case is preserved.
        if let Some(pos) = lower.find(FFMPEG_DIRECTIVE) {
            let path = line
                .get(pos + FFMPEG_DIRECTIVE.len()..)
                .unwrap_or_default()
                .trim();
            if !path.is_empty() {
                config.ffmpeg_path = PathBuf::from(path);
            }
            continue;
        }

        if lower.contains("no windows") {
            config.open_explorer = false;
        }
        if lower.contains("no update") {
            config.check_updates = false;
        }
        if lower.contains("file log") {
            config.file_log = true;
        }
        if lower.contains("output") {
            config.output_log = true;
        }
        if lower.contains("overwrite") {
            config.overwrite = true;
        }
        if let Some(pos) = lower.find(LAST_TAB_DIRECTIVE) {
            let value = lower[pos + LAST_TAB_DIRECTIVE.len()..].trim();
            if let Ok(index) = value.parse::<u8>() {
                if index <= MAX_TAB_INDEX {
                    config.last_tab = Some(index);
                }
            }
        }
    }
    config
}

/// Renders `config` as directives, always ending with the `ffmpeg` line.
#[must_use]
pub fn render_settings(config: &CoreConfig) -> String {
    let mut lines: Vec<String> = Vec::new();
    if !config.open_explorer {
        lines.push("no windows".into());
    }
    if !config.check_updates {
        lines.push("no update".into());
    }
    if config.file_log {
        lines.push("file log".into());
    }
    if config.output_log {
        lines.push("output".into());
    }
    if let Some(tab) = config.last_tab.filter(|t| *t <= MAX_TAB_INDEX) {
        lines.push(format!("{LAST_TAB_DIRECTIVE}{tab}"));
    }
    if config.overwrite {
        lines.push("overwrite".into());
    }
    lines.push(format!("{FFMPEG_DIRECTIVE}{}", config.ffmpeg_path.display()));

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Loads the settings file, falling back to defaults when it cannot be read.
pub fn load_settings(path: &Path) -> CoreConfig {
    match fs::read(path) {
        Ok(bytes) => {
            debug!("Loaded settings from {}", path.display());
            parse_settings(&String::from_utf8_lossy(&bytes))
        }
        Err(e) => {
            debug!("Using default settings ({}: {})", path.display(), e);
            CoreConfig::default()
        }
    }
}

/// Rewrites the settings file from `config`.
pub fn save_settings(path: &Path, config: &CoreConfig) -> CoreResult<()> {
    fs::write(path, render_settings(config))
        .map_err(|e| CoreError::Settings(format!("Cannot write {}: {}", path.display(), e)))?;
    info!("Settings saved to {}", path.display());
    Ok(())
}
