//! The scored result of one analysis.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use super::advice::Badge;
use crate::activity::Category;

/// Emission per category, kg CO₂. Flight is `0.0` when nothing was flown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct CategoryTotals {
    pub transport: f64,
    pub electricity: f64,
    pub food: f64,
    pub shopping: f64,
    pub flight: f64,
    pub water: f64,
    pub plastic: f64,
}

impl CategoryTotals {
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Transport => self.transport,
            Category::Electricity => self.electricity,
            Category::Food => self.food,
            Category::Shopping => self.shopping,
            Category::Flight => self.flight,
            Category::Water => self.water,
            Category::Plastic => self.plastic,
        }
    }

    /// Sum of all categories, capped at `f64::MAX`.
    pub fn sum(&self) -> f64 {
        Category::ALL
            .iter()
            .map(|c| self.get(*c))
            .sum::<f64>()
            .min(f64::MAX)
    }
}

/// Inputs that had no factor of their own and were charged a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UnknownInputs {
    pub food: Vec<String>,
    pub plastic: Vec<String>,
}

impl UnknownInputs {
    pub fn is_empty(&self) -> bool {
        self.food.is_empty() && self.plastic.is_empty()
    }
}

/// Carbon-footprint report. Built once by [`calculate`](super::calculate)
/// and read-only afterwards.
#[derive(Debug, Clone, Serialize)]
pub struct EmissionReport {
    pub(super) transport_details: BTreeMap<String, f64>,
    pub(super) food_details: BTreeMap<String, f64>,
    pub(super) totals: CategoryTotals,
    pub(super) flown: bool,
    pub(super) total_emission: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) category_percentages: Option<BTreeMap<Category, f64>>,
    pub(super) unknown_inputs: UnknownInputs,
    pub(super) trees_required: u64,
    pub(super) tips: Vec<String>,
    pub(super) badges: Vec<Badge>,
}

impl EmissionReport {
    /// Mode → kg CO₂.
    pub fn transport_details(&self) -> &BTreeMap<String, f64> {
        &self.transport_details
    }

    /// Food item → kg CO₂.
    pub fn food_details(&self) -> &BTreeMap<String, f64> {
        &self.food_details
    }

    pub fn totals(&self) -> &CategoryTotals {
        &self.totals
    }

    pub fn category_total(&self, category: Category) -> f64 {
        self.totals.get(category)
    }

    /// Flight emission, or `None` when no flight distance was found.
    pub fn flight(&self) -> Option<f64> {
        self.flown.then_some(self.totals.flight)
    }

    /// Grand total, kg CO₂, rounded to two decimals.
    pub fn total(&self) -> f64 {
        self.total_emission
    }

    /// Share of the total per category, in percent. `None` when the total is
    /// zero.
    pub fn percentages(&self) -> Option<&BTreeMap<Category, f64>> {
        self.category_percentages.as_ref()
    }

    pub fn unknown_inputs(&self) -> &UnknownInputs {
        &self.unknown_inputs
    }

    /// Trees needed to absorb the total.
    pub fn trees_required(&self) -> u64 {
        self.trees_required
    }

    pub fn tips(&self) -> &[String] {
        &self.tips
    }

    pub fn badges(&self) -> &[Badge] {
        &self.badges
    }
}

impl fmt::Display for EmissionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Carbon Footprint Report")?;
        writeln!(f)?;
        writeln!(f, "Total Emissions: {} kg CO₂", self.total_emission)?;
        writeln!(f)?;
        writeln!(f, "Breakdown:")?;
        for category in Category::ALL {
            if category == Category::Flight && !self.flown {
                continue;
            }
            let name = category.as_str();
            let mut chars = name.chars();
            let title: String = chars
                .next()
                .map(|c| c.to_uppercase().chain(chars).collect())
                .unwrap_or_default();
            writeln!(f, "- {title}: {} kg", self.totals.get(category))?;
        }
        writeln!(f)?;
        write!(f, "Tips:")?;
        for tip in &self.tips {
            write!(f, "\n- {tip}")?;
        }
        Ok(())
    }
}
