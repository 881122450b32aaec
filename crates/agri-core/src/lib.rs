//! # agri-core: Pure Subsidy Logic
//!
//! This crate computes agricultural subsidy entitlements for one farm and
//! one program year. It holds the rate tables, the calculation engine and
//! the advisory validator as pure functions with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Agri Subsidies Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (agri binary)                       │   │
//! │  │   config ──► farm file ──► session ──► text / JSON / CSV        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ &FarmInput, &RateSchedule              │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ agri-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌─────────────┐  ┌──────────┐  │   │
//! │  │   │   types   │  │   rates   │  │ calculation │  │validation│  │   │
//! │  │   │ FarmInput │  │ Schedule  │  │  calculate  │  │ validate │  │   │
//! │  │   │ Crop, ... │  │ Calendar  │  │  Result     │  │  Issue   │  │   │
//! │  │   └───────────┘  └───────────┘  └─────────────┘  └──────────┘  │   │
//! │  │                        ┌───────────┐                            │   │
//! │  │                        │ currency  │ convert, format_amount     │   │
//! │  │                        └───────────┘                            │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • NO NETWORK • PURE FUNCTIONS        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Farm input and the named crop/animal/ecoscheme lists
//! - [`rates`] - Rate schedule, policy limits, program calendar
//! - [`calculation`] - The engine and its itemized result
//! - [`validation`] - Advisory warnings
//! - [`currency`] - Conversion and display formatting
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Injected Rates**: the schedule is a value passed by reference, never a global
//! 2. **Total Functions**: `calculate` and `convert` accept any number and never fail
//! 3. **One Named List**: crops, animals and ecoschemes are enums shared by every consumer
//! 4. **Advisory Validation**: warnings never change what is paid
//!
//! ## Example Usage
//!
//! ```rust
//! use agri_core::{calculate, validate, Currency, FarmInput, RateSchedule};
//!
//! let schedule = RateSchedule::program_2025();
//! let mut farm = FarmInput::with_total_area(3.0);
//! farm.is_small_farm = true;
//!
//! let result = calculate(&farm, &schedule, Some(Currency::Pln));
//! assert_eq!(result.direct_payments.small_farms_payment, 675.0);
//! assert!(validate(&farm, &schedule).is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculation;
pub mod currency;
pub mod error;
pub mod rates;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculation::{
    calculate, AnimalPayments, CalculationResult, CropPayments, DirectPayments,
    EcoschemePayments,
};
pub use currency::{convert, format_amount, Currency, CurrencyRates};
pub use error::{InputError, ScheduleError, ScheduleResult};
pub use rates::{ProgramCalendar, ProgramPhase, RateSchedule};
pub use types::*;
pub use validation::{validate, validate_farm_input, ValidationIssue};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Upper sanity bound on the total declared area, in hectares.
///
/// Anything above this is almost certainly a typo (an extra zero, or square
/// metres entered as hectares). Advisory only.
pub const MAX_REASONABLE_AREA_HA: f64 = 10_000.0;

/// Attribution printed on exported reports.
pub const RATES_SOURCE: &str = "ARiMR/MRiRW 2025";
