// vidextract-cli/src/lib.rs
//
// Library portion of the vidextract CLI application.
// Contains argument definitions, command logic and dispatch.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;

// Re-export items needed by the binary or integration tests
pub use cli::{Cli, Commands, GlobalArgs};
pub use error::{CliResult, exit_code_for};

use commands::RunOptions;
use error::CliErrorContext;
use vidextract_core::JobLog;

/// Executes the parsed command line and returns the process exit code.
pub fn run(cli: Cli) -> CliResult<i32> {
    let config = config::effective_config(&cli.global);
    let json = cli.global.json;

    let job_command = !matches!(cli.command, Commands::Probe(_) | Commands::Settings(_));
    if job_command {
        JobLog::from_config(&config)
            .clear()
            .cli_with_context(|| format!("Clearing log file {}", config.log_file.display()))?;
    }

    let options = RunOptions { config, json };
    let result = match cli.command {
        Commands::ExtractAudio(args) => commands::audio::run_extract_audio(&options, args)?,
        Commands::RemoveAudio(args) => commands::audio::run_remove_audio(&options, args)?,
        Commands::ExtractImages(args) => commands::images::run_extract_images(&options, args)?,
        Commands::ResizeVideo(args) => commands::video::run_resize_video(&options, args)?,
        Commands::CropVideo(args) => commands::video::run_crop_video(&options, args)?,
        Commands::CreateVideo(args) => commands::video::run_create_video(&options, args)?,
        Commands::Probe(args) => {
            commands::probe::run_probe(&options.config, args, json)?;
            return Ok(0);
        }
        Commands::Settings(args) => {
            commands::settings::run_settings(&options.config, &cli.global.settings, args)?;
            return Ok(0);
        }
    };
    Ok(exit_code_for(result))
}
