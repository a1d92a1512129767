//! Structured activity data produced by extraction.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::factors;
use crate::units::{CanonicalUnit, Quantity};

/// The seven activity categories, in extraction order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Transport,
    Electricity,
    Food,
    Shopping,
    Flight,
    Water,
    Plastic,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Transport,
        Category::Electricity,
        Category::Food,
        Category::Shopping,
        Category::Flight,
        Category::Water,
        Category::Plastic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Electricity => "electricity",
            Self::Food => "food",
            Self::Shopping => "shopping",
            Self::Flight => "flight",
            Self::Water => "water",
            Self::Plastic => "plastic",
        }
    }

    /// Unit the category's quantities are accumulated in.
    pub fn canonical_unit(&self) -> CanonicalUnit {
        match self {
            Self::Transport | Self::Flight => CanonicalUnit::Kilometer,
            Self::Electricity => CanonicalUnit::KilowattHour,
            Self::Food | Self::Plastic => CanonicalUnit::Kilogram,
            Self::Shopping => CanonicalUnit::Currency,
            Self::Water => CanonicalUnit::Liter,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Item name → accumulated quantity for one category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryExtraction {
    category: Category,
    items: BTreeMap<String, Quantity>,
}

impl CategoryExtraction {
    pub fn new(category: Category) -> Self {
        Self {
            category,
            items: BTreeMap::new(),
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Add `magnitude` (already canonical) to `item`, creating it on first use.
    pub fn add(&mut self, item: &str, magnitude: f64) {
        let unit = self.category.canonical_unit();
        self.items
            .entry(item.to_string())
            .or_insert_with(|| Quantity::zero(unit))
            .accumulate(magnitude);
    }

    pub fn get(&self, item: &str) -> Option<f64> {
        self.items.get(item).map(Quantity::magnitude)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Quantity)> {
        self.items.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all item magnitudes.
    pub fn total(&self) -> f64 {
        self.items.values().map(Quantity::magnitude).sum()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ShoppingActivity {
    /// Spend in currency units (or weight-derived spend equivalent).
    pub spend: f64,
    pub category: String,
}

impl Default for ShoppingActivity {
    fn default() -> Self {
        Self {
            spend: 0.0,
            category: factors::DEFAULT_SHOPPING_CATEGORY.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FlightActivity {
    pub km: f64,
    pub class: String,
}

impl Default for FlightActivity {
    fn default() -> Self {
        Self {
            km: 0.0,
            class: factors::DEFAULT_FLIGHT_CLASS.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WaterActivity {
    pub liters: f64,
    pub source: String,
}

impl Default for WaterActivity {
    fn default() -> Self {
        Self {
            liters: 0.0,
            source: factors::DEFAULT_WATER_SOURCE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlasticActivity {
    pub kg: f64,
    /// Resin code, upper case (`PET`, `HDPE`, `PVC`, ...).
    pub resin: String,
}

impl Default for PlasticActivity {
    fn default() -> Self {
        Self {
            kg: 0.0,
            resin: factors::DEFAULT_PLASTIC_RESIN.to_string(),
        }
    }
}

/// Everything the extractors found in one input, ready for scoring.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityData {
    /// Mode → km.
    pub transport: CategoryExtraction,
    pub electricity_kwh: f64,
    /// Food item → kg.
    pub food: CategoryExtraction,
    pub shopping: ShoppingActivity,
    pub flight: FlightActivity,
    pub water: WaterActivity,
    pub plastic: PlasticActivity,
}

impl Default for ActivityData {
    fn default() -> Self {
        Self {
            transport: CategoryExtraction::new(Category::Transport),
            electricity_kwh: 0.0,
            food: CategoryExtraction::new(Category::Food),
            shopping: ShoppingActivity::default(),
            flight: FlightActivity::default(),
            water: WaterActivity::default(),
            plastic: PlasticActivity::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_item_accumulates() {
        let mut food = CategoryExtraction::new(Category::Food);
        food.add("rice", 0.2);
        food.add("rice", 0.3);
        food.add("egg", 0.1);
        assert_eq!(food.len(), 2);
        assert!((food.get("rice").unwrap() - 0.5).abs() < 1e-12);
        assert!((food.total() - 0.6).abs() < 1e-12);
    }

    #[test]
    fn quantities_carry_the_category_unit() {
        let mut transport = CategoryExtraction::new(Category::Transport);
        transport.add("bus", 4.0);
        let (_, q) = transport.iter().next().unwrap();
        assert_eq!(q.unit(), CanonicalUnit::Kilometer);
    }

    #[test]
    fn defaults_match_factor_tables() {
        let data = ActivityData::default();
        assert_eq!(data.shopping.category, "clothes");
        assert_eq!(data.flight.class, "domestic");
        assert_eq!(data.water.source, "tap");
        assert_eq!(data.plastic.resin, "PET");
    }
}
