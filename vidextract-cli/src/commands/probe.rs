//! probe command.

use vidextract_core::{CoreConfig, CoreError, probe};

use super::require_input;
use crate::cli::ProbeArgs;
use crate::error::CliResult;
use crate::output::{print_info, print_probe, print_warning};

/// Probes a file and prints the result. An empty result (unreadable file,
/// missing ffmpeg) is not an error.
pub fn run_probe(config: &CoreConfig, args: ProbeArgs, json: bool) -> CliResult<()> {
    require_input(&args.input)?;
    if config.resolved_ffmpeg().is_none() {
        return Err(CoreError::ExecutableNotFound(config.ffmpeg_path.clone()));
    }

    let info = probe(config, &args.input);
    if json {
        let text = serde_json::to_string_pretty(&info)
            .map_err(|e| CoreError::OperationFailed(format!("Cannot serialise probe result: {e}")))?;
        println!("{text}");
        return Ok(());
    }

    print_info("File", args.input.display());
    if info.is_empty() {
        print_warning("No media information found");
    } else {
        print_probe(&info);
    }
    Ok(())
}
