//! # Currency Module
//!
//! Supported display currencies, the conversion factors a rate schedule
//! carries for them, and locale-style formatting for presentation.
//!
//! ## Where Conversion Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Every rate in the schedule is in the BASE currency (EUR).             │
//! │                                                                         │
//! │  calculate() ──► line items (EUR) ──► grand total (EUR)                │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                              convert(total, PLN, schedule)  ← HERE      │
//! │                                              │                          │
//! │                                              ▼                          │
//! │                         format_amount(x, PLN) → "1 234,56 zł"           │
//! │                         (presentation only, rounds to 2 places)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use agri_core::currency::{convert, Currency};
//! use agri_core::rates::RateSchedule;
//!
//! let schedule = RateSchedule::program_2025();
//! assert_eq!(convert(100.0, Currency::Eur, &schedule), 100.0);
//! assert_eq!(convert(100.0, Currency::Pln, &schedule), 100.0 * 4.45);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::InputError;
use crate::rates::RateSchedule;

// =============================================================================
// Currency
// =============================================================================

/// A currency the results can be displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Polish złoty.
    Pln,
    /// Euro, the base currency of the published rate tables.
    Eur,
    /// Ukrainian hryvnia.
    Uah,
}

impl Currency {
    /// All currencies, in the order the UI cycles through them.
    pub const ALL: [Currency; 3] = [Currency::Pln, Currency::Eur, Currency::Uah];

    /// ISO 4217 code.
    pub const fn code(&self) -> &'static str {
        match self {
            Currency::Pln => "PLN",
            Currency::Eur => "EUR",
            Currency::Uah => "UAH",
        }
    }

    /// The next currency in the toggle cycle (PLN → EUR → UAH → PLN).
    pub fn next(&self) -> Currency {
        match self {
            Currency::Pln => Currency::Eur,
            Currency::Eur => Currency::Uah,
            Currency::Uah => Currency::Pln,
        }
    }

    /// Presentation settings for this currency.
    pub const fn style(&self) -> CurrencyStyle {
        match self {
            Currency::Pln => CurrencyStyle {
                symbol: "zł",
                locale: "pl-PL",
                group_separator: ' ',
                decimal_separator: ',',
            },
            Currency::Eur => CurrencyStyle {
                symbol: "€",
                locale: "de-DE",
                group_separator: '.',
                decimal_separator: ',',
            },
            Currency::Uah => CurrencyStyle {
                symbol: "₴",
                locale: "uk-UA",
                group_separator: ' ',
                decimal_separator: ',',
            },
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "PLN" => Ok(Currency::Pln),
            "EUR" => Ok(Currency::Eur),
            "UAH" => Ok(Currency::Uah),
            _ => Err(InputError::UnknownCurrency(s.to_string())),
        }
    }
}

// =============================================================================
// Conversion Factors
// =============================================================================

/// Conversion factors from the base currency, one per supported currency.
///
/// A fixed struct rather than a map: every currency always has a factor, so
/// lookup can never miss.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurrencyRates {
    #[serde(rename = "EUR")]
    pub eur: f64,
    #[serde(rename = "PLN")]
    pub pln: f64,
    #[serde(rename = "UAH")]
    pub uah: f64,
}

impl CurrencyRates {
    /// Factor that converts one base-currency unit into `currency`.
    #[inline]
    pub const fn factor(&self, currency: Currency) -> f64 {
        match currency {
            Currency::Eur => self.eur,
            Currency::Pln => self.pln,
            Currency::Uah => self.uah,
        }
    }
}

/// Converts a base-currency amount into `target`.
///
/// A single multiplication by the schedule's stored factor. No rounding;
/// the base currency's factor is exactly 1, so converting to it is the
/// identity.
#[inline]
pub fn convert(amount: f64, target: Currency, schedule: &RateSchedule) -> f64 {
    amount * schedule.currency_rates.factor(target)
}

// =============================================================================
// Presentation
// =============================================================================

/// Locale conventions used when rendering amounts for people.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyStyle {
    pub symbol: &'static str,
    pub locale: &'static str,
    pub group_separator: char,
    pub decimal_separator: char,
}

/// Formats an amount (already in `currency`) with two decimals, thousands
/// grouping and a trailing symbol, e.g. `1.234,56 €`.
///
/// ## Note
/// For display only. Never feed the result back into a calculation.
pub fn format_amount(amount: f64, currency: Currency) -> String {
    let style = currency.style();
    let hundredths = (amount.abs() * 100.0).round() as u64;
    let whole = (hundredths / 100).to_string();
    let frac = hundredths % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(style.group_separator);
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && hundredths > 0 { "-" } else { "" };
    format!(
        "{}{}{}{:02} {}",
        sign, grouped, style.decimal_separator, frac, style.symbol
    )
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_base_is_identity() {
        let schedule = RateSchedule::program_2025();
        for amount in [0.0, 1.0, -17.5, 1672.2, 123_456.789] {
            assert_eq!(convert(amount, Currency::Eur, &schedule), amount);
        }
    }

    #[test]
    fn test_convert_other_currencies() {
        let schedule = RateSchedule::program_2025();
        assert_eq!(convert(100.0, Currency::Pln, &schedule), 445.0);
        assert_eq!(convert(100.0, Currency::Uah, &schedule), 4520.0);
    }

    #[test]
    fn test_convert_round_trip() {
        let schedule = RateSchedule::program_2025();
        let amount = 1672.2;
        for currency in Currency::ALL {
            let back = convert(amount, currency, &schedule)
                / schedule.currency_rates.factor(currency);
            assert!((back - amount).abs() < 1e-9);
        }
    }

    #[test]
    fn test_currency_cycle() {
        assert_eq!(Currency::Pln.next(), Currency::Eur);
        assert_eq!(Currency::Eur.next(), Currency::Uah);
        assert_eq!(Currency::Uah.next(), Currency::Pln);
    }

    #[test]
    fn test_currency_parsing() {
        assert_eq!("eur".parse::<Currency>().unwrap(), Currency::Eur);
        assert_eq!(" PLN ".parse::<Currency>().unwrap(), Currency::Pln);
        assert_eq!("Uah".parse::<Currency>().unwrap(), Currency::Uah);
        assert!("USD".parse::<Currency>().is_err());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(1234.56, Currency::Pln), "1 234,56 zł");
        assert_eq!(format_amount(1234.56, Currency::Eur), "1.234,56 €");
        assert_eq!(format_amount(1234.56, Currency::Uah), "1 234,56 ₴");
        assert_eq!(format_amount(0.0, Currency::Eur), "0,00 €");
        assert_eq!(format_amount(999.5, Currency::Eur), "999,50 €");
        assert_eq!(format_amount(1_234_567.0, Currency::Eur), "1.234.567,00 €");
        assert_eq!(format_amount(-550.0, Currency::Pln), "-550,00 zł");
    }

    #[test]
    fn test_serde_codes() {
        let json = serde_json::to_string(&Currency::Pln).unwrap();
        assert_eq!(json, "\"PLN\"");
        let parsed: Currency = serde_json::from_str("\"UAH\"").unwrap();
        assert_eq!(parsed, Currency::Uah);
    }
}
