use anyhow::Result;
use env_logger::Env;

use minnow::cli;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    // Run the CLI application
    cli::run()
}
