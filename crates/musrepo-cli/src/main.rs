use clap::Parser;
use musrepo_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Verbose runs log to the terminal; otherwise to the XDG state file.
    if cli.verbose {
        logging::init_logging_stderr(true);
    } else if logging::init_logging(false).is_err() {
        logging::init_logging_stderr(false);
    }

    match cli.run().await {
        Ok(summary) if summary.any_failed() => std::process::exit(1),
        Ok(_) => {}
        Err(err) => {
            eprintln!("musrepo error: {:#}", err);
            std::process::exit(1);
        }
    }
}
