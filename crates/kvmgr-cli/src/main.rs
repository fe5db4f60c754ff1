use kvmgr_core::logging;

mod cli;

use crate::cli::CliCommand;

fn main() {
    // Initialize logging as early as possible; fall back to stderr when the
    // state dir is unwritable.
    if logging::init().is_err() {
        logging::init_stderr();
    }

    // Parse CLI and dispatch.
    if let Err(err) = CliCommand::run_from_args() {
        eprintln!("kvmgr error: {:#}", err);
        std::process::exit(1);
    }
}
