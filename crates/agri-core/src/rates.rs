//! # Rate Schedule
//!
//! The published rate table for one program year: per-unit rates, policy
//! caps, currency conversion factors and the application calendar.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  RateSchedule::program_2025()  ─┐                                       │
//! │                                 ├──► validate() ──► Arc<RateSchedule>   │
//! │  TOML/JSON table (CLI loader)  ─┘         │               │             │
//! │                                           │               ├──► calculate│
//! │                              ScheduleError at the         ├──► validate │
//! │                              loading boundary             └──► convert  │
//! │                                                                         │
//! │  Never mutated after construction: any number of threads may read it.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The schedule is always passed in explicitly. Two program years (or two
//! jurisdictions) can live side by side in one process.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::currency::{Currency, CurrencyRates};
use crate::error::{ScheduleError, ScheduleResult};
use crate::types::{AnimalType, Crop, Ecoscheme};

// =============================================================================
// Rate Groups
// =============================================================================

/// Per-hectare rates of the decoupled direct payments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectPaymentRates {
    pub basic_income_support: f64,
    pub redistributive_payment: f64,
    pub young_farmers_payment: f64,
    pub small_farms_payment: f64,
    pub supplementary_basic_payment: f64,
}

/// Per-hectare coupled crop rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CropRates {
    pub leguminous_crops: f64,
    pub fodder_crops: f64,
    pub starch_potatoes: f64,
    pub sugar_beets: f64,
    pub tomatoes: f64,
    pub hops: f64,
    pub strawberries: f64,
    pub flax: f64,
    pub fiber_hemp: f64,
}

impl CropRates {
    pub fn rate(&self, crop: Crop) -> f64 {
        match crop {
            Crop::Leguminous => self.leguminous_crops,
            Crop::Fodder => self.fodder_crops,
            Crop::StarchPotatoes => self.starch_potatoes,
            Crop::SugarBeets => self.sugar_beets,
            Crop::Tomatoes => self.tomatoes,
            Crop::Hops => self.hops,
            Crop::Strawberries => self.strawberries,
            Crop::Flax => self.flax,
            Crop::FiberHemp => self.fiber_hemp,
        }
    }
}

/// A per-head rate with an optional cap on the number of paid heads.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnimalRate {
    pub rate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<f64>,
}

impl AnimalRate {
    pub const fn unlimited(rate: f64) -> Self {
        AnimalRate { rate, limit: None }
    }

    pub const fn limited(rate: f64, limit: f64) -> Self {
        AnimalRate {
            rate,
            limit: Some(limit),
        }
    }

    /// Number of heads actually paid for: the declared count clamped to
    /// the limit, if there is one.
    #[inline]
    pub fn eligible_heads(&self, declared: f64) -> f64 {
        match self.limit {
            Some(limit) => declared.min(limit),
            None => declared,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalRates {
    pub cattle: AnimalRate,
    pub cows: AnimalRate,
    pub sheep: AnimalRate,
    pub goats: AnimalRate,
}

impl AnimalRates {
    pub fn get(&self, animal: AnimalType) -> AnimalRate {
        match animal {
            AnimalType::Cattle => self.cattle,
            AnimalType::Cows => self.cows,
            AnimalType::Sheep => self.sheep,
            AnimalType::Goats => self.goats,
        }
    }
}

/// Per-hectare ecoscheme rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EcoschemeRates {
    pub honey_plants: f64,
    pub extensive_grassland: f64,
    pub winter_cover: f64,
    pub crop_diversification: f64,
    pub water_retention: f64,
    pub fallow_land: f64,
    pub biological_protection: f64,
    pub micro_fertilizers: f64,
    pub ipr_orchard: f64,
    pub ipr_berry: f64,
    pub ipr_agricultural: f64,
    pub ipr_vegetable: f64,
    pub elite_seed_cereals: f64,
    pub elite_seed_legumes: f64,
    pub elite_seed_potatoes: f64,
}

impl EcoschemeRates {
    pub fn rate(&self, scheme: Ecoscheme) -> f64 {
        match scheme {
            Ecoscheme::HoneyPlants => self.honey_plants,
            Ecoscheme::ExtensiveGrassland => self.extensive_grassland,
            Ecoscheme::WinterCover => self.winter_cover,
            Ecoscheme::CropDiversification => self.crop_diversification,
            Ecoscheme::WaterRetention => self.water_retention,
            Ecoscheme::FallowLand => self.fallow_land,
            Ecoscheme::BiologicalProtection => self.biological_protection,
            Ecoscheme::MicroFertilizers => self.micro_fertilizers,
            Ecoscheme::IprOrchard => self.ipr_orchard,
            Ecoscheme::IprBerry => self.ipr_berry,
            Ecoscheme::IprAgricultural => self.ipr_agricultural,
            Ecoscheme::IprVegetable => self.ipr_vegetable,
            Ecoscheme::EliteSeedCereals => self.elite_seed_cereals,
            Ecoscheme::EliteSeedLegumes => self.elite_seed_legumes,
            Ecoscheme::EliteSeedPotatoes => self.elite_seed_potatoes,
        }
    }
}

/// Policy limits applied by the engine and the validator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PolicyLimits {
    /// Hectares eligible for the redistributive payment.
    pub redistributive_max_ha: f64,

    /// Eligibility threshold for the small-farm payment (inclusive).
    pub small_farms_max_ha: f64,

    /// Absolute ceiling on the small-farm payment, in base currency.
    pub small_farms_payment_cap: f64,

    /// Advisory cap on the combined ecoscheme area.
    pub ecoschemes_max_ha: f64,
}

// =============================================================================
// Program Calendar
// =============================================================================

/// Where a given date falls within the application campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgramPhase {
    /// Before the application window opens.
    NotOpen,
    /// Inside the regular application window.
    Open,
    /// After the regular window, still accepted with a late penalty.
    LateSubmission,
    /// No further applications accepted.
    Closed,
}

impl ProgramPhase {
    pub const fn label(&self) -> &'static str {
        match self {
            ProgramPhase::NotOpen => "Not yet open",
            ProgramPhase::Open => "Application window open",
            ProgramPhase::LateSubmission => "Late submission (reduced payment)",
            ProgramPhase::Closed => "Closed",
        }
    }
}

/// Application and payment deadlines of a program year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgramCalendar {
    pub application_start: NaiveDate,
    pub application_end: NaiveDate,
    pub late_submission_end: NaiveDate,
    pub changes_deadline: NaiveDate,
    pub payment_start: NaiveDate,
    pub payment_end: NaiveDate,
}

impl ProgramCalendar {
    /// Deadlines of the 2025 campaign.
    pub fn program_2025() -> Option<Self> {
        Some(ProgramCalendar {
            application_start: NaiveDate::from_ymd_opt(2025, 3, 15)?,
            application_end: NaiveDate::from_ymd_opt(2025, 6, 16)?,
            late_submission_end: NaiveDate::from_ymd_opt(2025, 7, 11)?,
            changes_deadline: NaiveDate::from_ymd_opt(2025, 7, 1)?,
            payment_start: NaiveDate::from_ymd_opt(2025, 12, 1)?,
            payment_end: NaiveDate::from_ymd_opt(2026, 6, 30)?,
        })
    }

    /// Campaign phase on `date`. Window end dates are inclusive.
    pub fn phase_on(&self, date: NaiveDate) -> ProgramPhase {
        if date < self.application_start {
            ProgramPhase::NotOpen
        } else if date <= self.application_end {
            ProgramPhase::Open
        } else if date <= self.late_submission_end {
            ProgramPhase::LateSubmission
        } else {
            ProgramPhase::Closed
        }
    }

    /// Whether `date` falls inside the payment period.
    pub fn is_payment_period(&self, date: NaiveDate) -> bool {
        date >= self.payment_start && date <= self.payment_end
    }

    fn validate(&self) -> ScheduleResult<()> {
        if self.application_start > self.application_end {
            return Err(ScheduleError::InvalidCalendar {
                reason: "application window ends before it starts".to_string(),
            });
        }
        if self.application_end > self.late_submission_end {
            return Err(ScheduleError::InvalidCalendar {
                reason: "late submission ends before the regular window".to_string(),
            });
        }
        if self.payment_start > self.payment_end {
            return Err(ScheduleError::InvalidCalendar {
                reason: "payment period ends before it starts".to_string(),
            });
        }
        Ok(())
    }
}

// =============================================================================
// Rate Schedule
// =============================================================================

/// Immutable reference data for one program year.
///
/// ## Invariants (checked by [`RateSchedule::validate`])
/// - Every rate, limit and conversion factor is strictly positive
/// - The base currency's conversion factor is exactly `1`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSchedule {
    /// Program year the rates were published for.
    pub program_year: i32,

    /// Currency every rate and cap is expressed in.
    pub base_currency: Currency,

    pub direct_payments: DirectPaymentRates,
    pub crop_payments: CropRates,
    pub animal_payments: AnimalRates,
    pub ecoschemes: EcoschemeRates,
    pub limits: PolicyLimits,
    pub currency_rates: CurrencyRates,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calendar: Option<ProgramCalendar>,
}

impl RateSchedule {
    /// The 2025 rates published by the Ministry of Agriculture and Rural
    /// Development (ARiMR). All amounts in EUR.
    pub fn program_2025() -> Self {
        RateSchedule {
            program_year: 2025,
            base_currency: Currency::Eur,
            direct_payments: DirectPaymentRates {
                basic_income_support: 114.42,
                redistributive_payment: 39.80,
                young_farmers_payment: 58.12,
                small_farms_payment: 225.00,
                supplementary_basic_payment: 13.00,
            },
            crop_payments: CropRates {
                leguminous_crops: 206.09,
                fodder_crops: 103.70,
                starch_potatoes: 383.94,
                sugar_beets: 300.75,
                tomatoes: 550.00,
                hops: 436.67,
                strawberries: 272.14,
                flax: 101.85,
                fiber_hemp: 29.55,
            },
            animal_payments: AnimalRates {
                cattle: AnimalRate::limited(75.73, 20.0),
                cows: AnimalRate::limited(96.64, 20.0),
                sheep: AnimalRate::unlimited(25.80),
                goats: AnimalRate::unlimited(11.27),
            },
            ecoschemes: EcoschemeRates {
                honey_plants: 269.21,
                extensive_grassland: 112.35,
                winter_cover: 112.35,
                crop_diversification: 67.41,
                water_retention: 63.15,
                fallow_land: 126.52,
                biological_protection: 89.89,
                micro_fertilizers: 22.47,
                ipr_orchard: 342.70,
                ipr_berry: 309.21,
                ipr_agricultural: 146.07,
                ipr_vegetable: 309.21,
                elite_seed_cereals: 26.74,
                elite_seed_legumes: 43.37,
                elite_seed_potatoes: 112.13,
            },
            limits: PolicyLimits {
                redistributive_max_ha: 30.0,
                small_farms_max_ha: 5.0,
                small_farms_payment_cap: 1125.0,
                ecoschemes_max_ha: 300.0,
            },
            currency_rates: CurrencyRates {
                eur: 1.0,
                pln: 4.45,
                uah: 45.20,
            },
            calendar: ProgramCalendar::program_2025(),
        }
    }

    /// Checks the schedule invariants.
    ///
    /// Call this once where the table is built or loaded. The calculation
    /// functions assume a valid schedule and never re-check it.
    pub fn validate(&self) -> ScheduleResult<()> {
        let direct = &self.direct_payments;
        for (item, value) in [
            ("directPayments.basicIncomeSupport", direct.basic_income_support),
            ("directPayments.redistributivePayment", direct.redistributive_payment),
            ("directPayments.youngFarmersPayment", direct.young_farmers_payment),
            ("directPayments.smallFarmsPayment", direct.small_farms_payment),
            (
                "directPayments.supplementaryBasicPayment",
                direct.supplementary_basic_payment,
            ),
        ] {
            ensure_positive_rate(item, value)?;
        }

        for crop in Crop::ALL {
            ensure_positive_rate(
                &format!("cropPayments.{}", crop.item_key()),
                self.crop_payments.rate(crop),
            )?;
        }

        for animal in AnimalType::ALL {
            let entry = self.animal_payments.get(animal);
            ensure_positive_rate(&format!("animalPayments.{}", animal.item_key()), entry.rate)?;
            if let Some(limit) = entry.limit {
                ensure_positive_limit(
                    &format!("animalPayments.{}.limit", animal.item_key()),
                    limit,
                )?;
            }
        }

        for scheme in Ecoscheme::ALL {
            ensure_positive_rate(
                &format!("ecoschemes.{}", scheme.item_key()),
                self.ecoschemes.rate(scheme),
            )?;
        }

        let limits = &self.limits;
        for (item, value) in [
            ("limits.redistributiveMaxHa", limits.redistributive_max_ha),
            ("limits.smallFarmsMaxHa", limits.small_farms_max_ha),
            ("limits.smallFarmsPaymentCap", limits.small_farms_payment_cap),
            ("limits.ecoschemesMaxHa", limits.ecoschemes_max_ha),
        ] {
            ensure_positive_limit(item, value)?;
        }

        for currency in Currency::ALL {
            let value = self.currency_rates.factor(currency);
            if !(value > 0.0) {
                return Err(ScheduleError::NonPositiveFactor { currency, value });
            }
        }

        let base = self.currency_rates.factor(self.base_currency);
        if base != 1.0 {
            return Err(ScheduleError::BaseFactorNotOne {
                currency: self.base_currency,
                value: base,
            });
        }

        if let Some(calendar) = &self.calendar {
            calendar.validate()?;
        }

        Ok(())
    }
}

// `!(x > 0.0)` also rejects NaN.
fn ensure_positive_rate(item: &str, value: f64) -> ScheduleResult<()> {
    if !(value > 0.0) {
        return Err(ScheduleError::NonPositiveRate {
            item: item.to_string(),
            value,
        });
    }
    Ok(())
}

fn ensure_positive_limit(item: &str, value: f64) -> ScheduleResult<()> {
    if !(value > 0.0) {
        return Err(ScheduleError::NonPositiveLimit {
            item: item.to_string(),
            value,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
