//! # Application Error Type
//!
//! Unified error type for the CLI boundary.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  config file / farm file / rate table                                   │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  read ── Io ──┐                                                         │
//! │  parse ─ Toml / Json / UnsupportedFormat ──┐                            │
//! │  check ─ Schedule (agri-core) ─────────────┼──► AppError ──► anyhow     │
//! │  edit ── Input (agri-core) / Assignment ───┘         (main prints it)   │
//! │                                                                         │
//! │  The pure engine never appears here: calculate() cannot fail.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use agri_core::{InputError, ScheduleError};
use thiserror::Error;

/// Errors raised while loading inputs or writing outputs.
#[derive(Debug, Error)]
pub enum AppError {
    // =========================================================================
    // File Errors
    // =========================================================================
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid TOML in {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Only `.json` and `.toml` documents are understood.
    #[error("Unsupported file type: {0} (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A loaded rate table failed its integrity check.
    #[error("Rate schedule rejected: {0}")]
    Schedule(#[from] ScheduleError),

    // =========================================================================
    // Input Errors
    // =========================================================================
    #[error(transparent)]
    Input(#[from] InputError),

    /// A `--set` argument not of the form `field=value`.
    #[error("Expected field=value, got '{0}'")]
    InvalidAssignment(String),

    #[error("Failed to render output: {0}")]
    Render(#[from] serde_json::Error),
}

/// Result type alias for CLI operations.
pub type AppResult<T> = Result<T, AppError>;
