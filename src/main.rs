//! Binary entry point. Everything lives in `cli::run`; this only turns
//! its error into an exit code.

use cinedb::cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
