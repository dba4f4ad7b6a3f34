//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use clap::Parser;

fn main() {
    env_logger::init();
    let cli = roadside_cli::Cli::parse();
    if let Err(err) = roadside_cli::run(&cli) {
        eprintln!("roadside: {err}");
        std::process::exit(1);
    }
}
