//! pim-attributes CLI entry point
//!
//! Parses arguments and dispatches via `cli::run`. Errors go to stderr with
//! exit code 1; a rejected attribute bag exits with code 2.

use pim_attributes::cli;

fn main() {
    match cli::run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}
