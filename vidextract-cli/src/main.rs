// vidextract-cli/src/main.rs
//
// Entry point for the `vidextract` binary: parses arguments, initialises
// logging, dispatches to the command implementations in the library and turns
// the outcome into a process exit code (0 success, 1 failure, 130 cancelled).

use clap::Parser;
use std::process;
use vidextract_cli::output::print_error;
use vidextract_cli::{Cli, logging, run};

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.global.verbose);

    let code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            print_error(&e.to_string());
            1
        }
    };
    process::exit(code);
}
