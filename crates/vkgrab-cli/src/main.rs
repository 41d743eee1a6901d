use vkgrab_core::logging;

mod cli;

use crate::cli::Cli;

/// Conventional exit status after SIGINT.
const EXIT_INTERRUPTED: i32 = 130;

#[tokio::main]
async fn main() {
    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    match Cli::run_from_args().await {
        Ok(summary) if summary.interrupted => std::process::exit(EXIT_INTERRUPTED),
        Ok(_) => {}
        Err(err) => {
            eprintln!("vkgrab error: {:#}", err);
            std::process::exit(1);
        }
    }
}
