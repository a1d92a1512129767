//! Emission calculator: activity data in, scored report out.
//!
//! [`calculate`] is a pure function over the factor tables. Each item is
//! rounded to two decimals before it is summed, so a category subtotal is
//! always the sum of its visible line items.

pub mod advice;
pub mod report;

use std::collections::BTreeMap;

use crate::activity::{ActivityData, Category};
use crate::factors::{
    self, DEFAULT_COST_PER_KG, DEFAULT_FOOD_FACTOR, DEFAULT_PLASTIC_FACTOR, DEFAULT_SHOPPING_FACTOR,
    DEFAULT_WATER_FACTOR, ELECTRICITY_FACTOR, FOOD, PLASTIC, SHOPPING, SHOPPING_COST_PER_KG,
    TREE_ABSORPTION_KG, WATER, WATER_FACTOR_BASIS_LITERS,
};

pub use advice::Badge;
pub use report::{CategoryTotals, EmissionReport, UnknownInputs};

/// Round to two decimals, exact ties to even.
pub fn round2(value: f64) -> f64 {
    round_to(value, 100.0)
}

/// Round to one decimal, exact ties to even.
pub fn round1(value: f64) -> f64 {
    round_to(value, 10.0)
}

fn round_to(value: f64, scale: f64) -> f64 {
    let scaled = value * scale;
    // Too large to scale; such values carry no fractional part anyway.
    if !scaled.is_finite() {
        return value;
    }
    scaled.round_ties_even() / scale
}

/// Score `data` against the factor tables.
pub fn calculate(data: &ActivityData) -> EmissionReport {
    let mut unknown_inputs = UnknownInputs::default();
    let mut totals = CategoryTotals::default();

    // Transport: unknown modes count as zero-emission.
    let mut transport_details = BTreeMap::new();
    for (mode, km) in data.transport.iter() {
        let factor = factors::transport_factor(mode).unwrap_or(0.0);
        let emission = round2(km.magnitude() * factor);
        transport_details.insert(mode.to_string(), emission);
        totals.transport += emission;
    }

    totals.electricity = round2(data.electricity_kwh * ELECTRICITY_FACTOR);

    let mut food_details = BTreeMap::new();
    for (item, kg) in data.food.iter() {
        let factor = FOOD.get(&item.to_lowercase()).unwrap_or_else(|| {
            unknown_inputs.food.push(item.to_string());
            DEFAULT_FOOD_FACTOR
        });
        let emission = round2(kg.magnitude() * factor);
        food_details.insert(item.to_string(), emission);
        totals.food += emission;
    }

    let shopping_category = data.shopping.category.to_lowercase();
    let cost_per_kg = SHOPPING_COST_PER_KG
        .get(&shopping_category)
        .unwrap_or(DEFAULT_COST_PER_KG);
    let shopping_factor = SHOPPING
        .get(&shopping_category)
        .unwrap_or(DEFAULT_SHOPPING_FACTOR);
    totals.shopping = round2(data.shopping.spend / cost_per_kg * shopping_factor);

    let flown = data.flight.km > 0.0;
    if flown {
        totals.flight = round2(data.flight.km * factors::flight_factor(&data.flight.class));
    }

    let water_factor = WATER
        .get(&data.water.source.to_lowercase())
        .unwrap_or(DEFAULT_WATER_FACTOR);
    totals.water = round2(data.water.liters / WATER_FACTOR_BASIS_LITERS * water_factor);

    let resin = data.plastic.resin.to_uppercase();
    let plastic_factor = PLASTIC.get(&resin).unwrap_or_else(|| {
        unknown_inputs.plastic.push(resin.clone());
        DEFAULT_PLASTIC_FACTOR
    });
    totals.plastic = round2(data.plastic.kg * plastic_factor);

    let total = totals.sum();
    let category_percentages = (total > 0.0).then(|| {
        Category::ALL
            .iter()
            .map(|category| (*category, round1(totals.get(*category) / total * 100.0)))
            .collect::<BTreeMap<_, _>>()
    });

    let total_emission = round2(total);
    // Saturates at u64::MAX for astronomically large totals.
    let trees_required = (total_emission / TREE_ABSORPTION_KG).ceil() as u64;

    let mut rounded = totals;
    rounded.transport = round2(totals.transport);
    rounded.food = round2(totals.food);

    tracing::debug!(total = total_emission, trees_required, "footprint calculated");

    EmissionReport {
        transport_details,
        food_details,
        tips: advice::tips(&rounded, total_emission),
        badges: advice::badges(&rounded, total_emission),
        totals: rounded,
        flown,
        total_emission,
        category_percentages,
        unknown_inputs,
        trees_required,
    }
}
