mod cli;
mod config;
mod core;
mod error;
mod logging;
mod models;

#[cfg(feature = "gui")]
mod gui;

use clap::Parser;

fn main() {
    let cli = cli::Cli::parse();
    logging::init(cli.verbose);

    match cli::run(cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
