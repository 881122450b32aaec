//! # Domain Types
//!
//! The farm snapshot the engine reads, and the fixed item lists that name
//! every crop, animal type and ecoscheme practice.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                            FarmInput                                    │
//! │                                                                         │
//! │  total_area (ha)      is_young_farmer      is_small_farm               │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │   CropAreas     │   │  AnimalCounts   │   │   EcoschemeAreas    │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  9 × ha         │   │  4 × head       │   │  15 × ha            │   │
//! │  │  keyed by Crop  │   │  by AnimalType  │   │  keyed by Ecoscheme │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## One List Per Category
//! `Crop::ALL`, `AnimalType::ALL` and `Ecoscheme::ALL` are the only place
//! the items of a category are enumerated. The engine, the validator and
//! the reports all go through them, so adding a practice means touching one
//! enum and its accessors, never a positional slice or a name filter.
//!
//! ## Wire Format
//! Fields serialize flat and camelCase (`totalArea`, `leguminousArea`,
//! `cattleCount`, `honeyPlantsArea`, ...), the shape the form layer sends.
//! Missing fields default to zero / false.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::InputError;

// =============================================================================
// Item Lists
// =============================================================================

/// Crops with a coupled per-hectare payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Crop {
    Leguminous,
    Fodder,
    StarchPotatoes,
    SugarBeets,
    Tomatoes,
    Hops,
    Strawberries,
    Flax,
    FiberHemp,
}

impl Crop {
    pub const ALL: [Crop; 9] = [
        Crop::Leguminous,
        Crop::Fodder,
        Crop::StarchPotatoes,
        Crop::SugarBeets,
        Crop::Tomatoes,
        Crop::Hops,
        Crop::Strawberries,
        Crop::Flax,
        Crop::FiberHemp,
    ];

    /// Key of the declared area in a farm input.
    pub const fn input_key(&self) -> &'static str {
        match self {
            Crop::Leguminous => "leguminousArea",
            Crop::Fodder => "fodderArea",
            Crop::StarchPotatoes => "starchPotatoesArea",
            Crop::SugarBeets => "sugarBeetsArea",
            Crop::Tomatoes => "tomatoesArea",
            Crop::Hops => "hopsArea",
            Crop::Strawberries => "strawberriesArea",
            Crop::Flax => "flaxArea",
            Crop::FiberHemp => "fiberHempArea",
        }
    }

    /// Key of the rate and of the result line item.
    pub const fn item_key(&self) -> &'static str {
        match self {
            Crop::Leguminous => "leguminousCrops",
            Crop::Fodder => "fodderCrops",
            Crop::StarchPotatoes => "starchPotatoes",
            Crop::SugarBeets => "sugarBeets",
            Crop::Tomatoes => "tomatoes",
            Crop::Hops => "hops",
            Crop::Strawberries => "strawberries",
            Crop::Flax => "flax",
            Crop::FiberHemp => "fiberHemp",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Crop::Leguminous => "Leguminous crops for seed",
            Crop::Fodder => "Fodder crops",
            Crop::StarchPotatoes => "Starch potatoes",
            Crop::SugarBeets => "Sugar beets",
            Crop::Tomatoes => "Tomatoes",
            Crop::Hops => "Hops",
            Crop::Strawberries => "Strawberries",
            Crop::Flax => "Flax",
            Crop::FiberHemp => "Fiber hemp",
        }
    }
}

/// Livestock with a per-head payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnimalType {
    /// Cattle up to 24 months old.
    Cattle,
    Cows,
    Sheep,
    Goats,
}

impl AnimalType {
    pub const ALL: [AnimalType; 4] = [
        AnimalType::Cattle,
        AnimalType::Cows,
        AnimalType::Sheep,
        AnimalType::Goats,
    ];

    pub const fn input_key(&self) -> &'static str {
        match self {
            AnimalType::Cattle => "cattleCount",
            AnimalType::Cows => "cowsCount",
            AnimalType::Sheep => "sheepCount",
            AnimalType::Goats => "goatsCount",
        }
    }

    pub const fn item_key(&self) -> &'static str {
        match self {
            AnimalType::Cattle => "cattle",
            AnimalType::Cows => "cows",
            AnimalType::Sheep => "sheep",
            AnimalType::Goats => "goats",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            AnimalType::Cattle => "Cattle (up to 24 months)",
            AnimalType::Cows => "Cows",
            AnimalType::Sheep => "Sheep",
            AnimalType::Goats => "Goats",
        }
    }
}

/// Voluntary environmental practices paid per hectare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ecoscheme {
    HoneyPlants,
    ExtensiveGrassland,
    WinterCover,
    CropDiversification,
    WaterRetention,
    FallowLand,
    BiologicalProtection,
    MicroFertilizers,
    IprOrchard,
    IprBerry,
    IprAgricultural,
    IprVegetable,
    EliteSeedCereals,
    EliteSeedLegumes,
    EliteSeedPotatoes,
}

impl Ecoscheme {
    /// Every ecoscheme practice area. The aggregate area cap is checked
    /// against exactly this list.
    pub const ALL: [Ecoscheme; 15] = [
        Ecoscheme::HoneyPlants,
        Ecoscheme::ExtensiveGrassland,
        Ecoscheme::WinterCover,
        Ecoscheme::CropDiversification,
        Ecoscheme::WaterRetention,
        Ecoscheme::FallowLand,
        Ecoscheme::BiologicalProtection,
        Ecoscheme::MicroFertilizers,
        Ecoscheme::IprOrchard,
        Ecoscheme::IprBerry,
        Ecoscheme::IprAgricultural,
        Ecoscheme::IprVegetable,
        Ecoscheme::EliteSeedCereals,
        Ecoscheme::EliteSeedLegumes,
        Ecoscheme::EliteSeedPotatoes,
    ];

    pub const fn input_key(&self) -> &'static str {
        match self {
            Ecoscheme::HoneyPlants => "honeyPlantsArea",
            Ecoscheme::ExtensiveGrassland => "extensiveGrasslandArea",
            Ecoscheme::WinterCover => "winterCoverArea",
            Ecoscheme::CropDiversification => "cropDiversificationArea",
            Ecoscheme::WaterRetention => "waterRetentionArea",
            Ecoscheme::FallowLand => "fallowLandArea",
            Ecoscheme::BiologicalProtection => "biologicalProtectionArea",
            Ecoscheme::MicroFertilizers => "microFertilizersArea",
            Ecoscheme::IprOrchard => "iprOrchardArea",
            Ecoscheme::IprBerry => "iprBerryArea",
            Ecoscheme::IprAgricultural => "iprAgriculturalArea",
            Ecoscheme::IprVegetable => "iprVegetableArea",
            Ecoscheme::EliteSeedCereals => "eliteSeedCerealsArea",
            Ecoscheme::EliteSeedLegumes => "eliteSeedLegumesArea",
            Ecoscheme::EliteSeedPotatoes => "eliteSeedPotatoesArea",
        }
    }

    pub const fn item_key(&self) -> &'static str {
        match self {
            Ecoscheme::HoneyPlants => "honeyPlants",
            Ecoscheme::ExtensiveGrassland => "extensiveGrassland",
            Ecoscheme::WinterCover => "winterCover",
            Ecoscheme::CropDiversification => "cropDiversification",
            Ecoscheme::WaterRetention => "waterRetention",
            Ecoscheme::FallowLand => "fallowLand",
            Ecoscheme::BiologicalProtection => "biologicalProtection",
            Ecoscheme::MicroFertilizers => "microFertilizers",
            Ecoscheme::IprOrchard => "iprOrchard",
            Ecoscheme::IprBerry => "iprBerry",
            Ecoscheme::IprAgricultural => "iprAgricultural",
            Ecoscheme::IprVegetable => "iprVegetable",
            Ecoscheme::EliteSeedCereals => "eliteSeedCereals",
            Ecoscheme::EliteSeedLegumes => "eliteSeedLegumes",
            Ecoscheme::EliteSeedPotatoes => "eliteSeedPotatoes",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Ecoscheme::HoneyPlants => "Honey plant areas",
            Ecoscheme::ExtensiveGrassland => "Extensive grassland use",
            Ecoscheme::WinterCover => "Winter cover crops",
            Ecoscheme::CropDiversification => "Diversified crop structure",
            Ecoscheme::WaterRetention => "Water retention on grassland",
            Ecoscheme::FallowLand => "Fallow land",
            Ecoscheme::BiologicalProtection => "Biological crop protection",
            Ecoscheme::MicroFertilizers => "Microbiological fertilizers",
            Ecoscheme::IprOrchard => "IPR - orchard crops",
            Ecoscheme::IprBerry => "IPR - berry crops",
            Ecoscheme::IprAgricultural => "IPR - agricultural crops",
            Ecoscheme::IprVegetable => "IPR - vegetable crops",
            Ecoscheme::EliteSeedCereals => "Elite seed - cereals",
            Ecoscheme::EliteSeedLegumes => "Elite seed - legumes",
            Ecoscheme::EliteSeedPotatoes => "Elite seed - potatoes",
        }
    }
}

// =============================================================================
// Declared Quantities
// =============================================================================

/// Declared hectares per crop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct CropAreas {
    pub leguminous_area: f64,
    pub fodder_area: f64,
    pub starch_potatoes_area: f64,
    pub sugar_beets_area: f64,
    pub tomatoes_area: f64,
    pub hops_area: f64,
    pub strawberries_area: f64,
    pub flax_area: f64,
    pub fiber_hemp_area: f64,
}

impl CropAreas {
    pub fn area(&self, crop: Crop) -> f64 {
        match crop {
            Crop::Leguminous => self.leguminous_area,
            Crop::Fodder => self.fodder_area,
            Crop::StarchPotatoes => self.starch_potatoes_area,
            Crop::SugarBeets => self.sugar_beets_area,
            Crop::Tomatoes => self.tomatoes_area,
            Crop::Hops => self.hops_area,
            Crop::Strawberries => self.strawberries_area,
            Crop::Flax => self.flax_area,
            Crop::FiberHemp => self.fiber_hemp_area,
        }
    }

    pub fn area_mut(&mut self, crop: Crop) -> &mut f64 {
        match crop {
            Crop::Leguminous => &mut self.leguminous_area,
            Crop::Fodder => &mut self.fodder_area,
            Crop::StarchPotatoes => &mut self.starch_potatoes_area,
            Crop::SugarBeets => &mut self.sugar_beets_area,
            Crop::Tomatoes => &mut self.tomatoes_area,
            Crop::Hops => &mut self.hops_area,
            Crop::Strawberries => &mut self.strawberries_area,
            Crop::Flax => &mut self.flax_area,
            Crop::FiberHemp => &mut self.fiber_hemp_area,
        }
    }
}

/// Declared head counts per animal type.
///
/// Counts are whole animals but kept as `f64` so every quantity flows
/// through the same arithmetic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct AnimalCounts {
    pub cattle_count: f64,
    pub cows_count: f64,
    pub sheep_count: f64,
    pub goats_count: f64,
}

impl AnimalCounts {
    pub fn count(&self, animal: AnimalType) -> f64 {
        match animal {
            AnimalType::Cattle => self.cattle_count,
            AnimalType::Cows => self.cows_count,
            AnimalType::Sheep => self.sheep_count,
            AnimalType::Goats => self.goats_count,
        }
    }

    pub fn count_mut(&mut self, animal: AnimalType) -> &mut f64 {
        match animal {
            AnimalType::Cattle => &mut self.cattle_count,
            AnimalType::Cows => &mut self.cows_count,
            AnimalType::Sheep => &mut self.sheep_count,
            AnimalType::Goats => &mut self.goats_count,
        }
    }
}

/// Declared hectares per ecoscheme practice.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct EcoschemeAreas {
    pub honey_plants_area: f64,
    pub extensive_grassland_area: f64,
    pub winter_cover_area: f64,
    pub crop_diversification_area: f64,
    pub water_retention_area: f64,
    pub fallow_land_area: f64,
    pub biological_protection_area: f64,
    pub micro_fertilizers_area: f64,
    pub ipr_orchard_area: f64,
    pub ipr_berry_area: f64,
    pub ipr_agricultural_area: f64,
    pub ipr_vegetable_area: f64,
    pub elite_seed_cereals_area: f64,
    pub elite_seed_legumes_area: f64,
    pub elite_seed_potatoes_area: f64,
}

impl EcoschemeAreas {
    pub fn area(&self, scheme: Ecoscheme) -> f64 {
        match scheme {
            Ecoscheme::HoneyPlants => self.honey_plants_area,
            Ecoscheme::ExtensiveGrassland => self.extensive_grassland_area,
            Ecoscheme::WinterCover => self.winter_cover_area,
            Ecoscheme::CropDiversification => self.crop_diversification_area,
            Ecoscheme::WaterRetention => self.water_retention_area,
            Ecoscheme::FallowLand => self.fallow_land_area,
            Ecoscheme::BiologicalProtection => self.biological_protection_area,
            Ecoscheme::MicroFertilizers => self.micro_fertilizers_area,
            Ecoscheme::IprOrchard => self.ipr_orchard_area,
            Ecoscheme::IprBerry => self.ipr_berry_area,
            Ecoscheme::IprAgricultural => self.ipr_agricultural_area,
            Ecoscheme::IprVegetable => self.ipr_vegetable_area,
            Ecoscheme::EliteSeedCereals => self.elite_seed_cereals_area,
            Ecoscheme::EliteSeedLegumes => self.elite_seed_legumes_area,
            Ecoscheme::EliteSeedPotatoes => self.elite_seed_potatoes_area,
        }
    }

    pub fn area_mut(&mut self, scheme: Ecoscheme) -> &mut f64 {
        match scheme {
            Ecoscheme::HoneyPlants => &mut self.honey_plants_area,
            Ecoscheme::ExtensiveGrassland => &mut self.extensive_grassland_area,
            Ecoscheme::WinterCover => &mut self.winter_cover_area,
            Ecoscheme::CropDiversification => &mut self.crop_diversification_area,
            Ecoscheme::WaterRetention => &mut self.water_retention_area,
            Ecoscheme::FallowLand => &mut self.fallow_land_area,
            Ecoscheme::BiologicalProtection => &mut self.biological_protection_area,
            Ecoscheme::MicroFertilizers => &mut self.micro_fertilizers_area,
            Ecoscheme::IprOrchard => &mut self.ipr_orchard_area,
            Ecoscheme::IprBerry => &mut self.ipr_berry_area,
            Ecoscheme::IprAgricultural => &mut self.ipr_agricultural_area,
            Ecoscheme::IprVegetable => &mut self.ipr_vegetable_area,
            Ecoscheme::EliteSeedCereals => &mut self.elite_seed_cereals_area,
            Ecoscheme::EliteSeedLegumes => &mut self.elite_seed_legumes_area,
            Ecoscheme::EliteSeedPotatoes => &mut self.elite_seed_potatoes_area,
        }
    }

    /// Combined declared area of all practices in [`Ecoscheme::ALL`].
    pub fn total_area(&self) -> f64 {
        Ecoscheme::ALL
            .iter()
            .fold(0.0, |sum, scheme| sum + self.area(*scheme))
    }
}

// =============================================================================
// Farm Input
// =============================================================================

/// One snapshot of a farm's declarable attributes.
///
/// The engine only ever borrows it; it is never mutated during a
/// calculation.
///
/// `Deserialize` is lenient (missing keys are zero, unknown keys are
/// dropped) so it round-trips its own JSON. Untrusted documents go through
/// [`FarmInput::from_fields`] instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct FarmInput {
    /// Total declared agricultural area in hectares.
    pub total_area: f64,

    /// Young-farmer eligibility (gates the whole young-farmer payment).
    pub is_young_farmer: bool,

    /// Small-farm scheme participation.
    pub is_small_farm: bool,

    #[serde(flatten)]
    pub crops: CropAreas,

    #[serde(flatten)]
    pub animals: AnimalCounts,

    #[serde(flatten)]
    pub ecoschemes: EcoschemeAreas,
}

impl FarmInput {
    /// A farm of the given total area with every other field zero.
    pub fn with_total_area(total_area: f64) -> Self {
        FarmInput {
            total_area,
            ..Default::default()
        }
    }

    /// Every key accepted by [`FarmInput::set_field`], in form order.
    pub fn field_keys() -> impl Iterator<Item = &'static str> {
        ["totalArea", "isYoungFarmer", "isSmallFarm"]
            .into_iter()
            .chain(Crop::ALL.iter().map(|c| c.input_key()))
            .chain(AnimalType::ALL.iter().map(|a| a.input_key()))
            .chain(Ecoscheme::ALL.iter().map(|e| e.input_key()))
    }

    /// Sets one field by its wire key, parsing `value` for the field's type.
    ///
    /// This is how a form layer applies a single edit. Numbers must be
    /// finite; range checks are left to the validator.
    ///
    /// ## Example
    /// ```rust
    /// use agri_core::FarmInput;
    ///
    /// let mut farm = FarmInput::default();
    /// farm.set_field("totalArea", "12.5").unwrap();
    /// farm.set_field("isYoungFarmer", "true").unwrap();
    /// farm.set_field("honeyPlantsArea", "2").unwrap();
    /// assert_eq!(farm.total_area, 12.5);
    /// assert!(farm.is_young_farmer);
    /// assert!(farm.set_field("barleyArea", "1").is_err());
    /// ```
    pub fn set_field(&mut self, key: &str, value: &str) -> Result<(), InputError> {
        match key {
            "totalArea" => self.total_area = parse_number(key, value)?,
            "isYoungFarmer" => self.is_young_farmer = parse_flag(key, value)?,
            "isSmallFarm" => self.is_small_farm = parse_flag(key, value)?,
            _ => {
                let slot = if let Some(crop) = Crop::ALL.iter().find(|c| c.input_key() == key) {
                    self.crops.area_mut(*crop)
                } else if let Some(animal) = AnimalType::ALL.iter().find(|a| a.input_key() == key)
                {
                    self.animals.count_mut(*animal)
                } else if let Some(scheme) = Ecoscheme::ALL.iter().find(|e| e.input_key() == key)
                {
                    self.ecoschemes.area_mut(*scheme)
                } else {
                    return Err(InputError::UnknownField(key.to_string()));
                };
                *slot = parse_number(key, value)?;
            }
        }
        Ok(())
    }

    /// Builds a farm from `(key, value)` pairs through [`FarmInput::set_field`].
    ///
    /// The strict counterpart of deserializing: an unknown or misspelled key
    /// is an error instead of being dropped. Keys not given stay zero.
    pub fn from_fields<I, K, V>(fields: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut farm = FarmInput::default();
        for (key, value) in fields {
            farm.set_field(key.as_ref(), value.as_ref())?;
        }
        Ok(farm)
    }
}

fn parse_number(field: &str, value: &str) -> Result<f64, InputError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| InputError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        })
}

fn parse_flag(field: &str, value: &str) -> Result<bool, InputError> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(InputError::InvalidValue {
            field: field.to_string(),
            value: value.to_string(),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
