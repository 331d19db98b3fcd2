//! # State Module
//!
//! Manages application state for the console.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      run()                                      │   │
//! │  │  let config  = AppConfig::load(--config)?;                      │   │
//! │  │  let session = SessionState::new(table, direction);             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │               ┌──────────────┴──────────────┐                           │
//! │               ▼                             ▼                           │
//! │  ┌────────────────────────┐    ┌────────────────────────────┐          │
//! │  │   AppConfig            │    │   SessionState             │          │
//! │  │                        │    │                            │          │
//! │  │  log_filter            │    │  LedgerStore (owned)       │          │
//! │  │  default_direction     │    │  started_at                │          │
//! │  │  denominations         │    │  default_direction         │          │
//! │  └────────────────────────┘    └────────────────────────────┘          │
//! │                                                                         │
//! │  AppConfig is read-only after startup. SessionState is owned by the    │
//! │  console loop; commands borrow it mutably one line at a time.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod session;

pub use config::{AppConfig, ConfigError, DenominationSetting, DEFAULT_LOG_FILTER};
pub use session::SessionState;
