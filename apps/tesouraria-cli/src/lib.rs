//! # Tesouraria Console
//!
//! Line-oriented operator console over `tesouraria-core`.
//!
//! ## Module Organization
//! ```text
//! src/
//! ├── lib.rs          ◄─── You are here (startup)
//! ├── main.rs         ◄─── Binary entry point
//! ├── console.rs      ◄─── Read/print loop, reset confirmation
//! ├── error.rs        ◄─── CliError / ErrorCode
//! ├── render.rs       ◄─── Text and JSON reports
//! ├── commands/       ◄─── One function per operator command
//! └── state/          ◄─── AppConfig, SessionState
//! ```
//!
//! ## Output Streams
//! Replies and reports go to stdout. Logs go to stderr, so a piped session
//! (`tesouraria --no-prompt < turno.txt > relatorio.txt`) keeps them apart.

pub mod commands;
pub mod console;
pub mod error;
pub mod render;
pub mod state;

use std::io;
use std::path::{Path, PathBuf};

use clap::Parser;
use tesouraria_core::DenominationTable;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::console::Console;
use crate::error::CliError;
use crate::state::{AppConfig, ConfigError, SessionState};

/// Binary flags.
#[derive(Debug, Parser)]
#[command(name = "tesouraria", version, about = "Cash-drawer reconciliation console")]
pub struct Args {
    /// Optional config file path (TOML).
    #[arg(long, env = "TESOURARIA_CONFIG")]
    pub config: Option<PathBuf>,

    /// Do not print the banner or the `> ` prompt (for piped scripts).
    #[arg(long)]
    pub no_prompt: bool,
}

/// Runs the console.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                    Console Startup                                      │
/// │                                                                         │
/// │  1. Load Configuration ───────────────────────────────────────────────► │
/// │     • Defaults                                                          │
/// │     • --config file (TOML), if given                                    │
/// │     • TESOURARIA_* environment variables                                │
/// │                                                                         │
/// │  2. Build Denomination Table ─────────────────────────────────────────► │
/// │     • Configured list, else the BRL table                               │
/// │                                                                         │
/// │  3. Initialize Tracing ───────────────────────────────────────────────► │
/// │     • RUST_LOG, else log_filter from config                             │
/// │     • Writes to stderr                                                  │
/// │                                                                         │
/// │  4. Initialize State ─────────────────────────────────────────────────► │
/// │     • SessionState: empty LedgerStore, draft at default_direction      │
/// │                                                                         │
/// │  5. Run Console ──────────────────────────────────────────────────────► │
/// │     • stdin → commands → stdout, until quit or end of input            │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Startup failures in steps 1 to 3 surface as `CONFIG_ERROR`.
pub fn run(args: Args) -> anyhow::Result<()> {
    let (config, table) = load_settings(args.config.as_deref())?;

    init_tracing(&config.log_filter).map_err(CliError::from)?;

    info!(version = env!("CARGO_PKG_VERSION"), "Starting Tesouraria console");
    if let Some(path) = &args.config {
        info!(?path, "Configuration file loaded");
    }
    info!(denominations = table.len(), "Denomination table ready");

    let mut session = SessionState::new(table, config.default_direction);

    let stdin = io::stdin();
    let stdout = io::stdout();
    Console::new(stdin.lock(), stdout.lock())
        .with_prompt(!args.no_prompt)
        .run(&mut session)?;

    info!(
        version = session.store().version(),
        transactions = session.store().transactions().len(),
        "Session ended"
    );
    Ok(())
}

/// Loads the configuration and builds the denomination table from it.
pub fn load_settings(path: Option<&Path>) -> Result<(AppConfig, DenominationTable), CliError> {
    let config = AppConfig::load(path)?;
    let table = config.denomination_table()?;
    Ok((config, table))
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show every command as it is parsed
/// - `RUST_LOG=tesouraria_cli=trace` - Trace the console only
/// - Default: `log_filter` from config (`warn,tesouraria_cli=info`)
fn init_tracing(config_filter: &str) -> Result<(), ConfigError> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(config_filter).map_err(|e| ConfigError::InvalidValue {
            key: "log_filter".to_string(),
            reason: e.to_string(),
        })?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
