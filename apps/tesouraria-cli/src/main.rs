//! # Tesouraria Console Entry Point
//!
//! ## Startup Sequence
//! 1. Parse binary flags
//! 2. Load configuration (defaults, TOML file, environment)
//! 3. Initialize tracing (logging to stderr)
//! 4. Build the denomination table and an empty session
//! 5. Run the console until `quit` or end of input

use clap::Parser;

fn main() -> anyhow::Result<()> {
    // The actual setup is in lib.rs for better testability
    let args = tesouraria_cli::Args::parse();
    tesouraria_cli::run(args)
}
