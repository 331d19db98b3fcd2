//! # Configuration State
//!
//! Stores application configuration loaded at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`TESOURARIA_*`)
//! 2. Config file (`--config path.toml`)
//! 3. Defaults (this file)
//!
//! ## Example
//! ```toml
//! log_filter = "info,tesouraria_cli=debug"
//! default_direction = "in"
//!
//! [[denominations]]
//! value = "100"
//! category = "note"
//!
//! [[denominations]]
//! value = "0.50"
//! category = "coin"
//! label = "Cinquenta centavos"
//! ```

use std::path::Path;

use ::config::builder::DefaultState;
use ::config::ConfigBuilder;
use serde::Deserialize;
use tesouraria_core::{Category, CoreError, Denomination, DenominationTable, Direction, Money};

/// Default tracing filter when neither `RUST_LOG` nor `log_filter` is set.
pub const DEFAULT_LOG_FILTER: &str = "warn,tesouraria_cli=info";

const ENV_PREFIX: &str = "TESOURARIA";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Tracing filter directives (`RUST_LOG` syntax). `RUST_LOG` wins.
    pub log_filter: String,

    /// Direction the draft form starts with, and returns to on reset.
    pub default_direction: Direction,

    /// Denomination table override. Empty means the standard BRL table.
    pub denominations: Vec<DenominationSetting>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            default_direction: Direction::default(),
            denominations: Vec::new(),
        }
    }
}

/// One configured denomination, as written in the config file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DenominationSetting {
    /// Decimal face value, e.g. `"200"` or `"0.05"`.
    pub value: String,
    pub category: Category,
    #[serde(default)]
    pub label: Option<String>,
}

impl DenominationSetting {
    fn to_denomination(&self) -> Result<Denomination, ConfigError> {
        let value = Money::parse_decimal(&self.value).ok_or_else(|| ConfigError::InvalidValue {
            key: "denominations.value".to_string(),
            reason: format!("'{}' is not a decimal amount", self.value),
        })?;

        let label = match &self.label {
            Some(label) => label.clone(),
            None => default_label(value, self.category),
        };

        Ok(Denomination::new(value, self.category, label))
    }
}

/// `R$ 200` for whole-real notes, the full amount (`R$ 0,50`) otherwise.
fn default_label(value: Money, category: Category) -> String {
    if category == Category::Note && value.cents_part() == 0 {
        format!("R$ {}", value.reais())
    } else {
        value.to_string()
    }
}

impl AppConfig {
    /// Loads configuration from an optional TOML file and the environment.
    ///
    /// A path that was given but cannot be read is an error; there is no
    /// implicit config file.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ::config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(::config::File::from(path).required(true));
        }
        builder = builder.add_source(environment());

        Self::from_builder(builder)
    }

    fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let settings: AppConfig = builder.build()?.try_deserialize()?;
        Ok(settings)
    }

    /// Builds the session's denomination table.
    ///
    /// ## Errors
    /// A value that is not a decimal amount, or a table the core rejects
    /// (duplicate values, non-positive values, blank labels).
    pub fn denomination_table(&self) -> Result<DenominationTable, ConfigError> {
        if self.denominations.is_empty() {
            return Ok(DenominationTable::brl());
        }

        let denominations = self
            .denominations
            .iter()
            .map(DenominationSetting::to_denomination)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(DenominationTable::new(denominations)?)
    }
}

/// `TESOURARIA_DEFAULT_DIRECTION=in` sets `default_direction`, and so on.
fn environment() -> ::config::Environment {
    ::config::Environment::with_prefix(ENV_PREFIX)
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not load configuration: {0}")]
    Load(#[from] ::config::ConfigError),

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Invalid denomination table: {0}")]
    InvalidDenominations(#[from] CoreError),
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ::config::{File, FileFormat};

    fn from_toml(toml: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::from_builder(
            ::config::Config::builder().add_source(File::from_str(toml, FileFormat::Toml)),
        )
    }

    #[test]
    fn test_defaults_when_nothing_configured() {
        let config = from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.denomination_table().unwrap(), DenominationTable::brl());
    }

    #[test]
    fn test_file_overrides() {
        let config = from_toml(
            r#"
            log_filter = "debug"
            default_direction = "in"
            "#,
        )
        .unwrap();

        assert_eq!(config.log_filter, "debug");
        assert_eq!(config.default_direction, Direction::In);
    }

    #[test]
    fn test_custom_denominations() {
        let config = from_toml(
            r#"
            [[denominations]]
            value = "0.50"
            category = "coin"

            [[denominations]]
            value = "100"
            category = "note"

            [[denominations]]
            value = "0.25"
            category = "coin"
            label = "Vinte e cinco"
            "#,
        )
        .unwrap();

        let table = config.denomination_table().unwrap();
        let labels: Vec<_> = table.iter().map(|d| d.label.as_str()).collect();

        // Notes are listed before coins regardless of file order
        assert_eq!(labels, vec!["R$ 100", "R$ 0,50", "Vinte e cinco"]);
    }

    #[test]
    fn test_bad_denomination_value() {
        let config = from_toml(
            r#"
            [[denominations]]
            value = "dez"
            category = "note"
            "#,
        )
        .unwrap();

        assert!(matches!(
            config.denomination_table(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_duplicate_denominations_rejected() {
        let config = from_toml(
            r#"
            [[denominations]]
            value = "1"
            category = "note"

            [[denominations]]
            value = "1.00"
            category = "coin"
            "#,
        )
        .unwrap();

        assert!(matches!(
            config.denomination_table(),
            Err(ConfigError::InvalidDenominations(_))
        ));
    }

    #[test]
    fn test_unknown_direction_is_load_error() {
        let result = from_toml(r#"default_direction = "sideways""#);
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_environment_overrides_file() {
        let mut vars = ::config::Map::new();
        vars.insert("TESOURARIA_DEFAULT_DIRECTION".to_string(), "in".to_string());
        vars.insert("TESOURARIA_LOG_FILTER".to_string(), "trace".to_string());

        let config = AppConfig::from_builder(
            ::config::Config::builder()
                .add_source(File::from_str(
                    r#"
                    default_direction = "out"
                    log_filter = "debug"
                    "#,
                    FileFormat::Toml,
                ))
                .add_source(environment().source(Some(vars))),
        )
        .unwrap();

        assert_eq!(config.default_direction, Direction::In);
        assert_eq!(config.log_filter, "trace");
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/tesouraria.toml")));
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
