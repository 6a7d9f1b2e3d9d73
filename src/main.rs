//! chartgen - generate a Helm chart from the Keycloak operator manifest
//!
//! Thin entry point: parse arguments, set up logging, run, and turn any
//! failure into a coloured message and exit status 1.

use clap::Parser;
use kube_chartgen::cli::Cli;
use kube_chartgen::core::user_friendly_error;

fn main() {
    let cli = Cli::parse();

    // Set up colored output for Windows
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    cli.build_config().init_logging();

    match cli.execute() {
        Ok(summary) => println!("{summary}"),
        Err(e) => {
            user_friendly_error(e).display();
            std::process::exit(1);
        }
    }
}
