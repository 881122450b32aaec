//! # Validation Module
//!
//! Advisory checks over a [`FarmInput`].
//!
//! ## Advisory, Not Blocking
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   FarmInput ──┬──► calculate() ──► CalculationResult   (always runs)   │
//! │               │                                                         │
//! │               └──► validate()  ──► Vec<String>          (warnings)      │
//! │                                                                         │
//! │   The two never talk to each other. An input with warnings is still    │
//! │   calculated in full; the caller decides what to show.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use agri_core::validation::validate;
//! use agri_core::{FarmInput, RateSchedule};
//!
//! let schedule = RateSchedule::program_2025();
//! let issues = validate(&FarmInput::with_total_area(-1.0), &schedule);
//! assert_eq!(issues, vec!["Total area cannot be negative".to_string()]);
//! ```

use thiserror::Error;

use crate::rates::RateSchedule;
use crate::types::{AnimalType, FarmInput};
use crate::MAX_REASONABLE_AREA_HA;

/// One out-of-policy observation about a farm input.
///
/// The `Display` text is the human-readable warning.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationIssue {
    #[error("Total area cannot be negative")]
    NegativeTotalArea { total_area: f64 },

    #[error("Total area seems unreasonably large (>{} ha)", grouped(.limit))]
    UnreasonableTotalArea { total_area: f64, limit: f64 },

    #[error("Ecoschemes total area exceeds limit ({limit} ha)")]
    EcoschemeAreaExceeded { declared: f64, limit: f64 },

    /// Payments are per head; a fractional count is most likely a typo.
    #[error("Head count for {} should be a whole number, got {count}", .animal.label())]
    FractionalHeadCount { animal: AnimalType, count: f64 },
}

/// `10000` as `10,000`. Any fraction is kept as written.
fn grouped(value: &f64) -> String {
    let text = value.to_string();
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (unsigned, None),
    };

    let mut out = String::from(sign);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(fraction);
    }
    out
}

/// Runs every check and returns the typed issues, in rule order.
///
/// Never fails. An empty list means nothing to flag.
pub fn validate_farm_input(farm: &FarmInput, schedule: &RateSchedule) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if farm.total_area < 0.0 {
        issues.push(ValidationIssue::NegativeTotalArea {
            total_area: farm.total_area,
        });
    }

    if farm.total_area > MAX_REASONABLE_AREA_HA {
        issues.push(ValidationIssue::UnreasonableTotalArea {
            total_area: farm.total_area,
            limit: MAX_REASONABLE_AREA_HA,
        });
    }

    let declared = farm.ecoschemes.total_area();
    let limit = schedule.limits.ecoschemes_max_ha;
    if declared > limit {
        issues.push(ValidationIssue::EcoschemeAreaExceeded { declared, limit });
    }

    for animal in AnimalType::ALL {
        let count = farm.animals.count(animal);
        if count.fract() != 0.0 {
            issues.push(ValidationIssue::FractionalHeadCount { animal, count });
        }
    }

    issues
}

/// Same checks as [`validate_farm_input`], rendered as warning strings.
pub fn validate(farm: &FarmInput, schedule: &RateSchedule) -> Vec<String> {
    validate_farm_input(farm, schedule)
        .iter()
        .map(ToString::to_string)
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::calculate;

    #[test]
    fn test_clean_input_has_no_issues() {
        let schedule = RateSchedule::program_2025();
        assert!(validate(&FarmInput::with_total_area(25.0), &schedule).is_empty());
        assert!(validate(&FarmInput::default(), &schedule).is_empty());
    }

    #[test]
    fn test_negative_area() {
        let schedule = RateSchedule::program_2025();
        let issues = validate_farm_input(&FarmInput::with_total_area(-0.5), &schedule);
        assert_eq!(
            issues,
            vec![ValidationIssue::NegativeTotalArea { total_area: -0.5 }]
        );
    }

    #[test]
    fn test_unreasonable_area_bound_is_exclusive() {
        let schedule = RateSchedule::program_2025();
        assert!(validate(&FarmInput::with_total_area(10_000.0), &schedule).is_empty());

        let issues = validate(&FarmInput::with_total_area(10_000.5), &schedule);
        assert_eq!(
            issues,
            vec!["Total area seems unreasonably large (>10,000 ha)".to_string()]
        );
    }

    #[test]
    fn test_unreasonable_area_message_follows_limit() {
        let issue = ValidationIssue::UnreasonableTotalArea {
            total_area: 3_000.0,
            limit: 2_500.0,
        };
        assert_eq!(
            issue.to_string(),
            "Total area seems unreasonably large (>2,500 ha)"
        );

        let schedule = RateSchedule::program_2025();
        let issues = validate_farm_input(&FarmInput::with_total_area(20_000.0), &schedule);
        assert_eq!(
            issues,
            vec![ValidationIssue::UnreasonableTotalArea {
                total_area: 20_000.0,
                limit: MAX_REASONABLE_AREA_HA,
            }]
        );
    }

    #[test]
    fn test_grouped() {
        assert_eq!(grouped(&300.0), "300");
        assert_eq!(grouped(&10_000.0), "10,000");
        assert_eq!(grouped(&1_234_567.5), "1,234,567.5");
        assert_eq!(grouped(&-2_500.0), "-2,500");
    }

    #[test]
    fn test_fractional_head_count_is_flagged_but_paid() {
        let schedule = RateSchedule::program_2025();
        let mut farm = FarmInput::default();
        farm.animals.cattle_count = 2.5;
        farm.animals.sheep_count = 40.0;

        let issues = validate_farm_input(&farm, &schedule);
        assert_eq!(
            issues,
            vec![ValidationIssue::FractionalHeadCount {
                animal: AnimalType::Cattle,
                count: 2.5
            }]
        );
        assert_eq!(
            issues[0].to_string(),
            "Head count for Cattle (up to 24 months) should be a whole number, got 2.5"
        );

        let result = calculate(&farm, &schedule, None);
        assert!((result.animal_payments.cattle - 2.5 * 75.73).abs() < 1e-9);
    }

    #[test]
    fn test_whole_head_counts_pass() {
        let schedule = RateSchedule::program_2025();
        let mut farm = FarmInput::default();
        farm.animals.cows_count = 25.0;
        farm.animals.goats_count = 3.0;
        assert!(validate(&farm, &schedule).is_empty());
    }

    #[test]
    fn test_ecoscheme_area_over_cap_is_flagged_but_paid() {
        let schedule = RateSchedule::program_2025();
        let mut farm = FarmInput::with_total_area(400.0);
        farm.ecoschemes.honey_plants_area = 200.0;
        farm.ecoschemes.extensive_grassland_area = 150.0;

        let issues = validate(&farm, &schedule);
        assert_eq!(
            issues,
            vec!["Ecoschemes total area exceeds limit (300 ha)".to_string()]
        );

        let result = calculate(&farm, &schedule, None);
        assert_eq!(
            result.ecoschemes.total,
            200.0 * schedule.ecoschemes.honey_plants
                + 150.0 * schedule.ecoschemes.extensive_grassland
        );
    }

    #[test]
    fn test_ecoscheme_cap_is_inclusive() {
        let schedule = RateSchedule::program_2025();
        let mut farm = FarmInput::default();
        farm.ecoschemes.winter_cover_area = 300.0;
        assert!(validate(&farm, &schedule).is_empty());
    }

    #[test]
    fn test_ecoscheme_cap_read_from_schedule() {
        let mut schedule = RateSchedule::program_2025();
        schedule.limits.ecoschemes_max_ha = 10.0;
        let mut farm = FarmInput::default();
        farm.ecoschemes.fallow_land_area = 6.0;
        farm.ecoschemes.ipr_berry_area = 6.0;

        let issues = validate_farm_input(&farm, &schedule);
        assert_eq!(
            issues,
            vec![ValidationIssue::EcoschemeAreaExceeded {
                declared: 12.0,
                limit: 10.0
            }]
        );
        assert_eq!(
            issues[0].to_string(),
            "Ecoschemes total area exceeds limit (10 ha)"
        );
    }

    #[test]
    fn test_crop_areas_do_not_count_towards_ecoscheme_cap() {
        let schedule = RateSchedule::program_2025();
        let mut farm = FarmInput::with_total_area(500.0);
        farm.crops.leguminous_area = 450.0;
        assert!(validate(&farm, &schedule).is_empty());
    }
}
