//! settings command.

use std::path::Path;

use vidextract_core::settings::render_settings;
use vidextract_core::{CoreConfig, save_settings};

use crate::cli::SettingsArgs;
use crate::error::{CliErrorContext, CliResult};
use crate::output::{print_info, print_success};

fn yes_no(flag: bool) -> &'static str {
    if flag { "yes" } else { "no" }
}

/// Prints the effective settings; with `--save` writes them to `path`.
pub fn run_settings(config: &CoreConfig, path: &Path, args: SettingsArgs) -> CliResult<()> {
    let mut config = config.clone();
    if args.last_tab.is_some() {
        config.last_tab = args.last_tab;
    }

    print_info("Settings file", path.display());
    print_info("ffmpeg", config.ffmpeg_path.display());
    print_info(
        "ffmpeg found",
        config
            .resolved_ffmpeg()
            .map_or_else(|| "no".to_string(), |p| p.display().to_string()),
    );
    print_info("Reveal output", yes_no(config.open_explorer));
    print_info("Check for updates", yes_no(config.check_updates));
    print_info("Overwrite outputs", yes_no(config.overwrite));
    print_info("Show ffmpeg output", yes_no(config.output_log));
    print_info(
        "Log file",
        if config.file_log {
            config.log_file.display().to_string()
        } else {
            "disabled".to_string()
        },
    );
    if let Some(tab) = config.last_tab {
        print_info("Last operation", tab);
    }

    if args.save {
        save_settings(path, &config).cli_with_context(|| "Saving settings")?;
        print_success(&format!("Saved {}", path.display()));
        log::debug!("Wrote:\n{}", render_settings(&config));
    }
    Ok(())
}
