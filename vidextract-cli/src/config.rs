// vidextract-cli/src/config.rs
//
// Builds the effective CoreConfig: settings file first, command-line flags on
// top.

use crate::cli::GlobalArgs;
use vidextract_core::{CoreConfig, load_settings};

/// Loads the settings file named by `--settings` and applies overrides.
pub fn effective_config(args: &GlobalArgs) -> CoreConfig {
    let mut config = load_settings(&args.settings);

    if let Some(ffmpeg) = &args.ffmpeg {
        config.ffmpeg_path = ffmpeg.clone();
    }
    if args.overwrite {
        config.overwrite = true;
    }
    if args.no_reveal {
        config.open_explorer = false;
    }
    if let Some(log_file) = &args.log_file {
        config.log_file = log_file.clone();
        config.file_log = true;
    }
    if args.show_output {
        config.output_log = true;
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn test_flags_override_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join("vidextract.cfg");
        std::fs::write(&settings, "file log\nffmpeg /from/settings/ffmpeg\n").unwrap();

        let cli = Cli::parse_from([
            "vidextract",
            "settings",
            "--settings",
            settings.to_str().unwrap(),
            "--ffmpeg",
            "/from/flag/ffmpeg",
            "--overwrite",
            "--no-reveal",
        ]);
        let config = effective_config(&cli.global);
        assert_eq!(config.ffmpeg_path, PathBuf::from("/from/flag/ffmpeg"));
        assert!(config.file_log);
        assert!(config.overwrite);
        assert!(!config.open_explorer);
    }

    #[test]
    fn test_log_file_flag_enables_file_log() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from([
            "vidextract",
            "settings",
            "--settings",
            dir.path().join("absent.cfg").to_str().unwrap(),
            "--log-file",
            "run.log",
        ]);
        let config = effective_config(&cli.global);
        assert!(config.file_log);
        assert_eq!(config.log_file, PathBuf::from("run.log"));
    }
}
