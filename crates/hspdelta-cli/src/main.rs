//! hspdelta CLI
//!
//! Prints a change report for one host's historical system profiles.

use clap::Parser;
use hspdelta_core::logging_facility;

mod args;
mod report;

fn main() {
    // a missing .env file is fine
    dotenvy::dotenv().ok();

    let cli = args::Cli::parse();
    logging_facility::init(cli.log_format.profile());

    if let Err(e) = report::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
