//! # CLI Configuration
//!
//! Display preferences and the rate table location.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Command-line flags (highest priority, applied by the caller)       │
//! │     --currency EUR, --schedule rates-2026.toml                         │
//! │                                                                         │
//! │  2. Environment Variables                                              │
//! │     AGRI_CURRENCY=UAH                                                  │
//! │     AGRI_SCHEDULE_PATH=/etc/agri/rates.toml                            │
//! │                                                                         │
//! │  3. TOML Config File                                                   │
//! │     --config <FILE>, or the platform config dir:                       │
//! │     ~/.config/agri-subsidies/agri.toml (Linux)                         │
//! │                                                                         │
//! │  4. Default Values (lowest priority)                                   │
//! │     PLN display, built-in 2025 rate table                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # agri.toml
//! [display]
//! currency = "EUR"   # PLN | EUR | UAH
//!
//! [schedule]
//! path = "/etc/agri/rates-2025.toml"
//! ```

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use agri_core::{Currency, FarmInput, RateSchedule};

use crate::error::{AppError, AppResult};

/// Environment variable overriding the display currency.
pub const ENV_CURRENCY: &str = "AGRI_CURRENCY";

/// Environment variable pointing at a rate table file.
pub const ENV_SCHEDULE_PATH: &str = "AGRI_SCHEDULE_PATH";

// =============================================================================
// Sections
// =============================================================================

/// How results are presented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Currency totals are shown in. Default: PLN.
    #[serde(default = "default_currency")]
    pub currency: Currency,
}

fn default_currency() -> Currency {
    Currency::Pln
}

impl Default for DisplaySettings {
    fn default() -> Self {
        DisplaySettings {
            currency: default_currency(),
        }
    }
}

/// Where the rate table comes from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScheduleSettings {
    /// A JSON or TOML rate table. `None` uses the built-in 2025 table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub schedule: ScheduleSettings,
}

impl AppConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (agri.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading config from file");
                let contents = read_file(&path)?;
                config = toml::from_str(&contents).map_err(|source| AppError::Toml {
                    path: path.clone(),
                    source,
                })?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Validates the configuration.
    pub fn validate(&self) -> AppResult<()> {
        if let Some(ref path) = self.schedule.path {
            if path.as_os_str().is_empty() {
                return Err(AppError::InvalidConfig(
                    "schedule.path must not be empty".into(),
                ));
            }
            document_kind(path)?;
        }
        Ok(())
    }

    /// Applies overrides looked up by variable name.
    ///
    /// `lookup` is `std::env::var` in production; tests pass a map.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(code) = lookup(ENV_CURRENCY) {
            match code.parse::<Currency>() {
                Ok(currency) => {
                    debug!(%currency, "Overriding display currency from environment");
                    self.display.currency = currency;
                }
                Err(e) => warn!(value = %code, "Ignoring {}: {}", ENV_CURRENCY, e),
            }
        }

        if let Some(path) = lookup(ENV_SCHEDULE_PATH) {
            debug!(path = %path, "Overriding schedule path from environment");
            self.schedule.path = Some(PathBuf::from(path));
        }
    }

    /// Builds the rate schedule this configuration points at.
    ///
    /// A file-backed table must pass [`RateSchedule::validate`] before it is
    /// handed to the engine.
    pub fn load_schedule(&self) -> AppResult<RateSchedule> {
        match self.schedule.path {
            Some(ref path) => {
                info!(?path, "Loading rate schedule from file");
                let schedule: RateSchedule = load_document(path)?;
                schedule.validate()?;
                info!(
                    program_year = schedule.program_year,
                    base_currency = %schedule.base_currency,
                    "Rate schedule accepted"
                );
                Ok(schedule)
            }
            None => {
                debug!("Using built-in 2025 rate schedule");
                Ok(RateSchedule::program_2025())
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("org", "agri", "agri-subsidies")
            .map(|dirs| dirs.config_dir().join("agri.toml"))
    }
}

// =============================================================================
// Document Loading
// =============================================================================

/// Serialization formats accepted for farm files and rate tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Json,
    Toml,
}

/// Picks the format from the file extension.
pub fn document_kind(path: &Path) -> AppResult<DocumentKind> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("json") => Ok(DocumentKind::Json),
        Some("toml") => Ok(DocumentKind::Toml),
        _ => Err(AppError::UnsupportedFormat(path.to_path_buf())),
    }
}

/// Reads and deserializes a JSON or TOML document.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> AppResult<T> {
    let kind = document_kind(path)?;
    let contents = read_file(path)?;

    match kind {
        DocumentKind::Json => serde_json::from_str(&contents).map_err(|source| AppError::Json {
            path: path.to_path_buf(),
            source,
        }),
        DocumentKind::Toml => toml::from_str(&contents).map_err(|source| AppError::Toml {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Loads a farm file, routing every entry through [`FarmInput::set_field`].
///
/// Unlike a plain deserialize, an unknown or misspelled key is rejected
/// with the same [`InputError::UnknownField`](agri_core::InputError) a
/// `--set` edit would get.
pub fn load_farm_input(path: &Path) -> AppResult<FarmInput> {
    let fields: BTreeMap<String, Value> = load_document(path)?;
    debug!(?path, fields = fields.len(), "Farm document parsed");

    let farm = FarmInput::from_fields(
        fields
            .iter()
            .map(|(key, value)| (key.as_str(), field_text(value))),
    )?;
    Ok(farm)
}

/// Scalar text as `set_field` parses it. Arrays, tables and null fall
/// through as JSON and fail that parse.
fn field_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

fn read_file(path: &Path) -> AppResult<String> {
    std::fs::read_to_string(path).map_err(|source| AppError::Read {
        path: path.to_path_buf(),
        source,
    })
}
