//! Loading challan console - dispatch challans from a loading session draft
//!
//! Edits a loading session stored as a JSON or TOML draft and prints it as a
//! PDF challan with a CSV copy, or exports it as CSV/XLSX.

mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;

fn main() {
    let cli = Cli::parse();
    challan_app::logging::init(cli.verbose);

    if let Err(e) = commands::execute(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
