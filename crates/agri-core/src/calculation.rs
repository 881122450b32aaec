//! # Calculation Engine
//!
//! Maps a [`FarmInput`] and a [`RateSchedule`] to an itemized
//! [`CalculationResult`].
//!
//! ## Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  FarmInput ─┬─► direct payments   (5 items, area & payment caps)  ─┐    │
//! │             ├─► crop payments     (9 items, area × rate)          ─┤    │
//! │             ├─► animal payments   (4 items, head-count limits)    ─┼─►  │
//! │             └─► ecoschemes        (15 items, never clamped)       ─┘    │
//! │                                                                    │    │
//! │                              grand total (base currency) ◄─────────┘    │
//! │                                        │                                │
//! │                                        ▼                                │
//! │                              convert(grand total, target)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Guarantees
//! - Total: no input makes these functions fail or panic, negative and zero
//!   values included. Nothing is divided.
//! - Pure: nothing is mutated, nothing is cached, any thread may call it.
//! - Every category `total` is an explicit sum of its named line items, and
//!   `grand_total` is the sum of the four category totals.
//!
//! ## Example
//! ```rust
//! use agri_core::{calculate, Currency, FarmInput, RateSchedule};
//!
//! let schedule = RateSchedule::program_2025();
//! let farm = FarmInput::with_total_area(10.0);
//!
//! let result = calculate(&farm, &schedule, Some(Currency::Eur));
//! assert_eq!(result.grand_total, result.direct_payments.total);
//! assert_eq!(result.grand_total_converted, result.grand_total);
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::currency::{convert, Currency};
use crate::rates::RateSchedule;
use crate::types::{AnimalType, Crop, Ecoscheme, FarmInput};

// =============================================================================
// Result Types
// =============================================================================

/// Decoupled direct payments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct DirectPayments {
    pub basic_income_support: f64,
    pub redistributive_payment: f64,
    pub young_farmers_payment: f64,
    pub small_farms_payment: f64,
    pub supplementary_basic_payment: f64,
    pub total: f64,
}

impl DirectPayments {
    fn new(
        basic_income_support: f64,
        redistributive_payment: f64,
        young_farmers_payment: f64,
        small_farms_payment: f64,
        supplementary_basic_payment: f64,
    ) -> Self {
        let total = basic_income_support
            + redistributive_payment
            + young_farmers_payment
            + small_farms_payment
            + supplementary_basic_payment;

        DirectPayments {
            basic_income_support,
            redistributive_payment,
            young_farmers_payment,
            small_farms_payment,
            supplementary_basic_payment,
            total,
        }
    }

    /// Line items with display labels, in payment order.
    pub fn line_items(&self) -> [(&'static str, f64); 5] {
        [
            ("Basic income support", self.basic_income_support),
            ("Redistributive payment", self.redistributive_payment),
            ("Young farmers payment", self.young_farmers_payment),
            ("Small farms payment", self.small_farms_payment),
            ("Supplementary basic payment", self.supplementary_basic_payment),
        ]
    }
}

/// Coupled crop payments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CropPayments {
    pub leguminous_crops: f64,
    pub fodder_crops: f64,
    pub starch_potatoes: f64,
    pub sugar_beets: f64,
    pub tomatoes: f64,
    pub hops: f64,
    pub strawberries: f64,
    pub flax: f64,
    pub fiber_hemp: f64,
    pub total: f64,
}

impl CropPayments {
    fn from_fn(mut amount: impl FnMut(Crop) -> f64) -> Self {
        let leguminous_crops = amount(Crop::Leguminous);
        let fodder_crops = amount(Crop::Fodder);
        let starch_potatoes = amount(Crop::StarchPotatoes);
        let sugar_beets = amount(Crop::SugarBeets);
        let tomatoes = amount(Crop::Tomatoes);
        let hops = amount(Crop::Hops);
        let strawberries = amount(Crop::Strawberries);
        let flax = amount(Crop::Flax);
        let fiber_hemp = amount(Crop::FiberHemp);

        let total = leguminous_crops
            + fodder_crops
            + starch_potatoes
            + sugar_beets
            + tomatoes
            + hops
            + strawberries
            + flax
            + fiber_hemp;

        CropPayments {
            leguminous_crops,
            fodder_crops,
            starch_potatoes,
            sugar_beets,
            tomatoes,
            hops,
            strawberries,
            flax,
            fiber_hemp,
            total,
        }
    }

    pub fn amount(&self, crop: Crop) -> f64 {
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

    pub fn line_items(&self) -> impl Iterator<Item = (Crop, f64)> + '_ {
        Crop::ALL.into_iter().map(move |crop| (crop, self.amount(crop)))
    }
}

/// Per-head livestock payments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct AnimalPayments {
    pub cattle: f64,
    pub cows: f64,
    pub sheep: f64,
    pub goats: f64,
    pub total: f64,
}

impl AnimalPayments {
    fn from_fn(mut amount: impl FnMut(AnimalType) -> f64) -> Self {
        let cattle = amount(AnimalType::Cattle);
        let cows = amount(AnimalType::Cows);
        let sheep = amount(AnimalType::Sheep);
        let goats = amount(AnimalType::Goats);

        AnimalPayments {
            cattle,
            cows,
            sheep,
            goats,
            total: cattle + cows + sheep + goats,
        }
    }

    pub fn amount(&self, animal: AnimalType) -> f64 {
        match animal {
            AnimalType::Cattle => self.cattle,
            AnimalType::Cows => self.cows,
            AnimalType::Sheep => self.sheep,
            AnimalType::Goats => self.goats,
        }
    }

    pub fn line_items(&self) -> impl Iterator<Item = (AnimalType, f64)> + '_ {
        AnimalType::ALL
            .into_iter()
            .map(move |animal| (animal, self.amount(animal)))
    }
}

/// Ecoscheme top-up payments.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct EcoschemePayments {
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
    pub total: f64,
}

impl EcoschemePayments {
    fn from_fn(mut amount: impl FnMut(Ecoscheme) -> f64) -> Self {
        let honey_plants = amount(Ecoscheme::HoneyPlants);
        let extensive_grassland = amount(Ecoscheme::ExtensiveGrassland);
        let winter_cover = amount(Ecoscheme::WinterCover);
        let crop_diversification = amount(Ecoscheme::CropDiversification);
        let water_retention = amount(Ecoscheme::WaterRetention);
        let fallow_land = amount(Ecoscheme::FallowLand);
        let biological_protection = amount(Ecoscheme::BiologicalProtection);
        let micro_fertilizers = amount(Ecoscheme::MicroFertilizers);
        let ipr_orchard = amount(Ecoscheme::IprOrchard);
        let ipr_berry = amount(Ecoscheme::IprBerry);
        let ipr_agricultural = amount(Ecoscheme::IprAgricultural);
        let ipr_vegetable = amount(Ecoscheme::IprVegetable);
        let elite_seed_cereals = amount(Ecoscheme::EliteSeedCereals);
        let elite_seed_legumes = amount(Ecoscheme::EliteSeedLegumes);
        let elite_seed_potatoes = amount(Ecoscheme::EliteSeedPotatoes);

        let total = honey_plants
            + extensive_grassland
            + winter_cover
            + crop_diversification
            + water_retention
            + fallow_land
            + biological_protection
            + micro_fertilizers
            + ipr_orchard
            + ipr_berry
            + ipr_agricultural
            + ipr_vegetable
            + elite_seed_cereals
            + elite_seed_legumes
            + elite_seed_potatoes;

        EcoschemePayments {
            honey_plants,
            extensive_grassland,
            winter_cover,
            crop_diversification,
            water_retention,
            fallow_land,
            biological_protection,
            micro_fertilizers,
            ipr_orchard,
            ipr_berry,
            ipr_agricultural,
            ipr_vegetable,
            elite_seed_cereals,
            elite_seed_legumes,
            elite_seed_potatoes,
            total,
        }
    }

    pub fn amount(&self, scheme: Ecoscheme) -> f64 {
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

    pub fn line_items(&self) -> impl Iterator<Item = (Ecoscheme, f64)> + '_ {
        Ecoscheme::ALL
            .into_iter()
            .map(move |scheme| (scheme, self.amount(scheme)))
    }
}

/// The full itemized entitlement.
///
/// Every amount except `grand_total_converted` is in the schedule's base
/// currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub direct_payments: DirectPayments,
    pub crop_payments: CropPayments,
    pub animal_payments: AnimalPayments,
    pub ecoschemes: EcoschemePayments,

    /// Sum of the four category totals, in base currency.
    pub grand_total: f64,

    /// `grand_total` converted into `currency`.
    pub grand_total_converted: f64,

    /// Currency of `grand_total_converted`.
    pub currency: Currency,
}

// =============================================================================
// Engine
// =============================================================================

/// Computes the full entitlement for `farm` under `schedule`.
///
/// `target` selects the currency of `grand_total_converted`; `None` means
/// the schedule's base currency.
pub fn calculate(
    farm: &FarmInput,
    schedule: &RateSchedule,
    target: Option<Currency>,
) -> CalculationResult {
    let currency = target.unwrap_or(schedule.base_currency);

    let direct_payments = calculate_direct_payments(farm, schedule);
    let crop_payments = calculate_crop_payments(farm, schedule);
    let animal_payments = calculate_animal_payments(farm, schedule);
    let ecoschemes = calculate_ecoschemes(farm, schedule);

    let grand_total = direct_payments.total
        + crop_payments.total
        + animal_payments.total
        + ecoschemes.total;

    CalculationResult {
        direct_payments,
        crop_payments,
        animal_payments,
        ecoschemes,
        grand_total,
        grand_total_converted: convert(grand_total, currency, schedule),
        currency,
    }
}

/// Direct payments.
///
/// ## Rules
/// ```text
/// basic income support     area × rate
/// redistributive           min(area, redistributive cap) × rate
/// young farmers            area × rate        only if young-farmer flag
/// small farms              min(area × rate, payment cap)
///                          only if small-farm flag AND area ≤ threshold,
///                          otherwise exactly 0 (a cliff, not a phase-out)
/// supplementary basic      area × rate
/// ```
pub fn calculate_direct_payments(farm: &FarmInput, schedule: &RateSchedule) -> DirectPayments {
    let rates = &schedule.direct_payments;
    let limits = &schedule.limits;
    let area = farm.total_area;

    let basic_income_support = area * rates.basic_income_support;

    let redistributive_area = area.min(limits.redistributive_max_ha);
    let redistributive_payment = redistributive_area * rates.redistributive_payment;

    let young_farmers_payment = if farm.is_young_farmer {
        area * rates.young_farmers_payment
    } else {
        0.0
    };

    let small_farms_payment = if farm.is_small_farm && area <= limits.small_farms_max_ha {
        (area * rates.small_farms_payment).min(limits.small_farms_payment_cap)
    } else {
        0.0
    };

    let supplementary_basic_payment = area * rates.supplementary_basic_payment;

    DirectPayments::new(
        basic_income_support,
        redistributive_payment,
        young_farmers_payment,
        small_farms_payment,
        supplementary_basic_payment,
    )
}

/// Crop payments: declared area × rate for each crop, no caps.
pub fn calculate_crop_payments(farm: &FarmInput, schedule: &RateSchedule) -> CropPayments {
    CropPayments::from_fn(|crop| farm.crops.area(crop) * schedule.crop_payments.rate(crop))
}

/// Animal payments: eligible heads × rate, where eligible heads is the
/// declared count clamped to the type's own limit (if it has one).
pub fn calculate_animal_payments(farm: &FarmInput, schedule: &RateSchedule) -> AnimalPayments {
    AnimalPayments::from_fn(|animal| {
        let entry = schedule.animal_payments.get(animal);
        entry.eligible_heads(farm.animals.count(animal)) * entry.rate
    })
}

/// Ecoscheme payments: declared area × rate for each practice.
///
/// The aggregate area cap is NOT applied here; going over it is reported by
/// the validator, and payment is still computed on the full declared area.
pub fn calculate_ecoschemes(farm: &FarmInput, schedule: &RateSchedule) -> EcoschemePayments {
    EcoschemePayments::from_fn(|scheme| {
        farm.ecoschemes.area(scheme) * schedule.ecoschemes.rate(scheme)
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
