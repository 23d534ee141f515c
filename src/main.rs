//! mealcart entry point
//!
//! Minimal: dispatch to the CLI, print errors to stderr, exit non-zero
//! on failure. All startup logic lives in the cli module.

use mealcart::cli;

#[tokio::main]
async fn main() {
    if let Err(e) = cli::run().await {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
