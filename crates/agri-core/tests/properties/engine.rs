//! Property tests for the calculation engine and the validator.

use proptest::prelude::*;

use agri_core::calculation::{calculate_animal_payments, calculate_direct_payments};
use agri_core::{
    calculate, validate, AnimalType, Crop, Currency, Ecoscheme, FarmInput, RateSchedule,
};

fn area() -> impl Strategy<Value = f64> {
    prop_oneof![Just(0.0), 0.0..2_000.0f64]
}

fn head_count() -> impl Strategy<Value = f64> {
    (0u32..200).prop_map(f64::from)
}

fn farm_input() -> impl Strategy<Value = FarmInput> {
    (
        area(),
        any::<bool>(),
        any::<bool>(),
        proptest::collection::vec(area(), Crop::ALL.len()),
        proptest::collection::vec(head_count(), AnimalType::ALL.len()),
        proptest::collection::vec(0.0..60.0f64, Ecoscheme::ALL.len()),
    )
        .prop_map(|(total, young, small, crops, animals, ecoschemes)| {
            let mut farm = FarmInput::with_total_area(total);
            farm.is_young_farmer = young;
            farm.is_small_farm = small;
            for (crop, value) in Crop::ALL.into_iter().zip(crops) {
                *farm.crops.area_mut(crop) = value;
            }
            for (animal, value) in AnimalType::ALL.into_iter().zip(animals) {
                *farm.animals.count_mut(animal) = value;
            }
            for (scheme, value) in Ecoscheme::ALL.into_iter().zip(ecoschemes) {
                *farm.ecoschemes.area_mut(scheme) = value;
            }
            farm
        })
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: every category total is the exact sum of its line items,
    /// and the grand total is the exact sum of the category totals.
    #[test]
    fn property_totals_are_exact_sums(farm in farm_input()) {
        let schedule = RateSchedule::program_2025();
        let result = calculate(&farm, &schedule, None);

        let direct = &result.direct_payments;
        prop_assert_eq!(
            direct.total,
            direct.basic_income_support
                + direct.redistributive_payment
                + direct.young_farmers_payment
                + direct.small_farms_payment
                + direct.supplementary_basic_payment
        );

        let animals = &result.animal_payments;
        prop_assert_eq!(
            animals.total,
            animals.cattle + animals.cows + animals.sheep + animals.goats
        );

        let crop_sum = result
            .crop_payments
            .line_items()
            .fold(0.0, |acc, (_, amount)| acc + amount);
        prop_assert_eq!(result.crop_payments.total, crop_sum);

        let eco_sum = result
            .ecoschemes
            .line_items()
            .fold(0.0, |acc, (_, amount)| acc + amount);
        prop_assert_eq!(result.ecoschemes.total, eco_sum);

        prop_assert_eq!(
            result.grand_total,
            result.direct_payments.total
                + result.crop_payments.total
                + result.animal_payments.total
                + result.ecoschemes.total
        );
    }

    /// PROPERTY: basic income support never decreases as area grows.
    #[test]
    fn property_basic_support_monotone(a in area(), b in area()) {
        let schedule = RateSchedule::program_2025();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        let low_pay = calculate_direct_payments(&FarmInput::with_total_area(low), &schedule);
        let high_pay = calculate_direct_payments(&FarmInput::with_total_area(high), &schedule);
        prop_assert!(low_pay.basic_income_support <= high_pay.basic_income_support);
    }

    /// PROPERTY: the redistributive payment never exceeds cap × rate.
    #[test]
    fn property_redistributive_bounded(total in area()) {
        let schedule = RateSchedule::program_2025();
        let direct = calculate_direct_payments(&FarmInput::with_total_area(total), &schedule);
        let ceiling = schedule.limits.redistributive_max_ha
            * schedule.direct_payments.redistributive_payment;
        prop_assert!(direct.redistributive_payment <= ceiling);
    }

    /// PROPERTY: the redistributive payment never decreases as area grows,
    /// and is flat at exactly cap × rate once the area reaches the cap.
    #[test]
    fn property_redistributive_monotone(a in area(), b in area()) {
        let schedule = RateSchedule::program_2025();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        let low_pay = calculate_direct_payments(&FarmInput::with_total_area(low), &schedule)
            .redistributive_payment;
        let high_pay = calculate_direct_payments(&FarmInput::with_total_area(high), &schedule)
            .redistributive_payment;
        prop_assert!(low_pay <= high_pay);

        let cap = schedule.limits.redistributive_max_ha;
        if low >= cap {
            let ceiling = cap * schedule.direct_payments.redistributive_payment;
            prop_assert_eq!(low_pay, ceiling);
            prop_assert_eq!(high_pay, ceiling);
        }
    }

    /// PROPERTY: the small-farm payment is zero above the threshold and
    /// never exceeds the absolute cap.
    #[test]
    fn property_small_farm_step_and_cap(total in area()) {
        let schedule = RateSchedule::program_2025();
        let mut farm = FarmInput::with_total_area(total);
        farm.is_small_farm = true;

        let payment = calculate_direct_payments(&farm, &schedule).small_farms_payment;
        prop_assert!(payment <= schedule.limits.small_farms_payment_cap);
        if total > schedule.limits.small_farms_max_ha {
            prop_assert_eq!(payment, 0.0);
        }
    }

    /// PROPERTY: limited animal types are paid for at most `limit` heads.
    #[test]
    fn property_animal_limits_respected(count in head_count()) {
        let schedule = RateSchedule::program_2025();
        let mut farm = FarmInput::default();
        for animal in AnimalType::ALL {
            *farm.animals.count_mut(animal) = count;
        }

        let animals = calculate_animal_payments(&farm, &schedule);
        for (animal, amount) in animals.line_items() {
            let entry = schedule.animal_payments.get(animal);
            match entry.limit {
                Some(limit) => prop_assert!(amount <= limit * entry.rate),
                None => prop_assert_eq!(amount, count * entry.rate),
            }
        }
    }

    /// PROPERTY: a limited animal payment never decreases as the herd grows,
    /// and stops growing once the count reaches the limit.
    #[test]
    fn property_animal_payment_monotone(a in head_count(), b in head_count()) {
        let schedule = RateSchedule::program_2025();
        let (low, high) = if a <= b { (a, b) } else { (b, a) };

        for animal in [AnimalType::Cattle, AnimalType::Cows] {
            let mut small_herd = FarmInput::default();
            *small_herd.animals.count_mut(animal) = low;
            let mut large_herd = FarmInput::default();
            *large_herd.animals.count_mut(animal) = high;

            let low_pay = calculate_animal_payments(&small_herd, &schedule).total;
            let high_pay = calculate_animal_payments(&large_herd, &schedule).total;
            prop_assert!(low_pay <= high_pay);

            let entry = schedule.animal_payments.get(animal);
            if let Some(limit) = entry.limit {
                if low >= limit {
                    prop_assert_eq!(low_pay, high_pay);
                    prop_assert_eq!(low_pay, limit * entry.rate);
                }
            }
        }
    }

    /// PROPERTY: ecoscheme payments are never clamped, whatever the validator says.
    #[test]
    fn property_ecoschemes_unclamped(farm in farm_input()) {
        let schedule = RateSchedule::program_2025();
        let result = calculate(&farm, &schedule, None);

        for (scheme, amount) in result.ecoschemes.line_items() {
            prop_assert_eq!(amount, farm.ecoschemes.area(scheme) * schedule.ecoschemes.rate(scheme));
        }

        let over_cap = farm.ecoschemes.total_area() > schedule.limits.ecoschemes_max_ha;
        let flagged = validate(&farm, &schedule)
            .iter()
            .any(|issue| issue.starts_with("Ecoschemes total area exceeds limit"));
        prop_assert_eq!(over_cap, flagged);
    }

    /// PROPERTY: the target currency only changes the converted total.
    #[test]
    fn property_target_currency_only_affects_conversion(farm in farm_input()) {
        let schedule = RateSchedule::program_2025();
        let base = calculate(&farm, &schedule, Some(Currency::Eur));
        prop_assert_eq!(base.grand_total_converted, base.grand_total);

        for currency in Currency::ALL {
            let other = calculate(&farm, &schedule, Some(currency));
            prop_assert_eq!(&other.direct_payments, &base.direct_payments);
            prop_assert_eq!(other.grand_total, base.grand_total);
            prop_assert_eq!(other.currency, currency);
        }
    }
}
