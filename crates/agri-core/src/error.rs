//! # Error Types
//!
//! Domain-specific error types for agri-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  agri-core errors (this file)                                          │
//! │  ├── ScheduleError    - Rate table fails its integrity check           │
//! │  └── InputError       - Farm input edited with a bad key or value      │
//! │                                                                         │
//! │  Advisory only (validation.rs, NOT an error)                           │
//! │  └── ValidationIssue  - Out-of-policy input, calculation still runs    │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── AppError         - Config/file/parse failures at the boundary     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. `calculate` and `convert` never fail: they have no error type at all
//! 2. Schedule integrity is checked once, where the table is loaded
//! 3. Errors are enum variants, never String

use thiserror::Error;

use crate::currency::Currency;

// =============================================================================
// Schedule Error
// =============================================================================

/// A rate table that does not satisfy the schedule invariants.
///
/// ## When This Occurs
/// Only from [`RateSchedule::validate`](crate::rates::RateSchedule::validate),
/// typically right after a table was deserialized from a file.
#[derive(Debug, Error, PartialEq)]
pub enum ScheduleError {
    /// A per-unit rate is zero, negative or not a number.
    #[error("Rate {item} must be strictly positive, got {value}")]
    NonPositiveRate { item: String, value: f64 },

    /// A policy limit (area cap, payment cap, head-count limit) is not positive.
    #[error("Limit {item} must be strictly positive, got {value}")]
    NonPositiveLimit { item: String, value: f64 },

    /// A currency conversion factor is not positive.
    #[error("Conversion factor for {currency} must be strictly positive, got {value}")]
    NonPositiveFactor { currency: Currency, value: f64 },

    /// The base currency does not convert to itself with factor exactly 1.
    #[error("Base currency {currency} must have conversion factor 1, got {value}")]
    BaseFactorNotOne { currency: Currency, value: f64 },

    /// The program calendar dates are out of order.
    #[error("Program calendar is inconsistent: {reason}")]
    InvalidCalendar { reason: String },
}

// =============================================================================
// Input Error
// =============================================================================

/// Errors raised when a form layer edits a [`FarmInput`](crate::types::FarmInput)
/// field by key.
#[derive(Debug, Error, PartialEq)]
pub enum InputError {
    /// No field with this key exists.
    #[error("Unknown farm field: {0}")]
    UnknownField(String),

    /// The value could not be parsed for the field's type.
    #[error("Invalid value for {field}: '{value}'")]
    InvalidValue { field: String, value: String },

    /// Currency code is not one of the supported codes.
    #[error("Unknown currency: '{0}'. Valid options: EUR, PLN, UAH")]
    UnknownCurrency(String),
}

/// Convenience type alias for schedule integrity checks.
pub type ScheduleResult<T> = Result<T, ScheduleError>;

// =============================================================================
// Unit Tests
// =============================================================================
