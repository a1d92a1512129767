//! Emission-factor tables.
//!
//! All tables are compiled into the binary and never change at runtime.
//! Entry order is part of the contract: extractors walk the tables in
//! declaration order, and an earlier item claims a stretch of text before a
//! later one gets to look at it.

use std::sync::LazyLock;

/// An ordered, immutable name → factor table (kg CO₂ per unit).
#[derive(Debug, Clone, Copy)]
pub struct FactorTable {
    name: &'static str,
    entries: &'static [(&'static str, f64)],
}

impl FactorTable {
    pub const fn new(name: &'static str, entries: &'static [(&'static str, f64)]) -> Self {
        Self { name, entries }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Exact-key lookup.
    pub fn get(&self, key: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, factor)| *factor)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Keys in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(name, _)| *name)
    }

    pub fn entries(&self) -> &'static [(&'static str, f64)] {
        self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Transport (kg CO₂ per km) ───────────────────────────────────────────

pub const TRANSPORT_PERSONAL: FactorTable = FactorTable::new(
    "transport.personal",
    &[
        ("car", 0.12),
        ("bike", 0.08),
        ("electric_car", 0.04),
        ("electric_scooter", 0.02),
        ("bicycle", 0.0),
        ("walk", 0.0),
    ],
);

pub const TRANSPORT_PUBLIC: FactorTable = FactorTable::new(
    "transport.public",
    &[
        ("bus", 0.06),
        ("metro", 0.04),
        ("train", 0.05),
        ("diesel_train", 0.07),
        ("auto", 0.09),
        ("cab", 0.13),
        ("e_rickshaw", 0.01),
    ],
);

pub const TRANSPORT_AIR: FactorTable = FactorTable::new(
    "transport.air",
    &[("flight_domestic", 0.18), ("flight_international", 0.22)],
);

/// Transport sub-groups in lookup order.
pub const TRANSPORT_GROUPS: [FactorTable; 3] = [TRANSPORT_PERSONAL, TRANSPORT_PUBLIC, TRANSPORT_AIR];

/// Personal, public and air transport collapsed into a single ordered list.
pub static TRANSPORT_FLAT: LazyLock<Vec<(&'static str, f64)>> = LazyLock::new(|| {
    TRANSPORT_GROUPS
        .iter()
        .flat_map(|group| group.entries().iter().copied())
        .collect()
});

/// Factor for a transport mode from any sub-group.
pub fn transport_factor(mode: &str) -> Option<f64> {
    TRANSPORT_FLAT
        .iter()
        .find(|(name, _)| *name == mode)
        .map(|(_, factor)| *factor)
}

/// Air factor used when a flight class has no entry of its own.
pub const DEFAULT_AIR_FACTOR: f64 = 0.18;

/// Factor for a flight class such as `"domestic"`.
pub fn flight_factor(class: &str) -> f64 {
    TRANSPORT_AIR
        .get(&format!("flight_{}", class.to_lowercase()))
        .unwrap_or(DEFAULT_AIR_FACTOR)
}

// ── Electricity ─────────────────────────────────────────────────────────

/// kg CO₂ per kWh of grid electricity.
pub const ELECTRICITY_FACTOR: f64 = 0.7;

// ── Food (kg CO₂ per kg) ────────────────────────────────────────────────

pub const FOOD: FactorTable = FactorTable::new(
    "food",
    &[
        ("meat", 7.0),
        ("beef", 60.0),
        ("lamb", 24.0),
        ("chicken", 6.0),
        ("fish", 5.0),
        ("egg", 4.5),
        ("milk", 3.0),
        ("paneer", 4.0),
        ("cheese", 10.0),
        ("yogurt", 2.2),
        ("curd", 2.2),
        ("butter", 12.0),
        ("ghee", 9.0),
        ("cream", 6.0),
        ("rice", 2.5),
        ("basmati", 2.4),
        ("brown rice", 2.2),
        ("wheat", 1.3),
        ("flour", 1.2),
        ("maida", 1.4),
        ("bread", 1.8),
        ("chapati", 1.3),
        ("roti", 1.3),
        ("paratha", 2.0),
        ("poha", 1.2),
        ("idli", 1.5),
        ("dosa", 1.7),
        ("upma", 1.6),
        ("potato", 0.4),
        ("onion", 0.3),
        ("tomato", 0.4),
        ("carrot", 0.3),
        ("spinach", 0.2),
        ("cabbage", 0.3),
        ("cauliflower", 0.3),
        ("brinjal", 0.4),
        ("okra", 0.4),
        ("apple", 0.4),
        ("banana", 0.3),
        ("orange", 0.5),
        ("grapes", 0.6),
        ("mango", 0.7),
        ("pineapple", 0.7),
        ("papaya", 0.5),
        ("pomegranate", 0.6),
        ("vegetables", 0.5),
        ("fruits", 0.4),
        ("vegan", 1.2),
        ("junk", 7.0),
        ("processed", 8.0),
        ("chocolate", 19.0),
        ("icecream", 3.5),
        ("coffee", 17.0),
        ("tea", 1.8),
        ("sugar", 1.2),
        ("oil", 6.0),
        ("chips", 5.5),
        ("biscuit", 3.2),
        ("noodles", 4.0),
        ("pizza", 6.0),
        ("burger", 7.5),
        ("soft drink", 3.0),
        ("juice", 2.0),
    ],
);

/// Factor charged per kg for food that is not in [`FOOD`].
pub const DEFAULT_FOOD_FACTOR: f64 = 5.0;

// ── Shopping ────────────────────────────────────────────────────────────

/// kg CO₂ per kg of goods bought.
pub const SHOPPING: FactorTable = FactorTable::new(
    "shopping",
    &[("clothes", 2.0), ("gadgets", 6.0), ("groceries", 1.2)],
);

/// Assumed price per kg of goods, used to turn a spend into a mass.
pub const SHOPPING_COST_PER_KG: FactorTable = FactorTable::new(
    "shopping.cost_per_kg",
    &[("clothes", 500.0), ("gadgets", 3000.0), ("groceries", 150.0)],
);

pub const DEFAULT_SHOPPING_CATEGORY: &str = "clothes";
pub const DEFAULT_SHOPPING_FACTOR: f64 = 1.5;
pub const DEFAULT_COST_PER_KG: f64 = 100.0;

// ── Water (kg CO₂ per 100 liters) ───────────────────────────────────────

pub const WATER: FactorTable = FactorTable::new("water", &[("tap", 0.25), ("bottled", 1.5)]);

pub const DEFAULT_WATER_SOURCE: &str = "tap";
pub const DEFAULT_WATER_FACTOR: f64 = 0.25;

/// Water factors are quoted per this many liters.
pub const WATER_FACTOR_BASIS_LITERS: f64 = 100.0;

// ── Plastic (kg CO₂ per kg) ─────────────────────────────────────────────

pub const PLASTIC: FactorTable = FactorTable::new("plastic", &[("PET", 6.0), ("HDPE", 4.0), ("PVC", 5.0)]);

pub const DEFAULT_PLASTIC_RESIN: &str = "PET";

/// Factor charged per kg for an unrecognized resin code.
pub const DEFAULT_PLASTIC_FACTOR: f64 = 5.0;

// ── Flights ─────────────────────────────────────────────────────────────

pub const DEFAULT_FLIGHT_CLASS: &str = "domestic";

// ── Offsetting ──────────────────────────────────────────────────────────

/// kg CO₂ one tree is assumed to absorb; the report's tree count divides by this.
pub const TREE_ABSORPTION_KG: f64 = 0.7;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flattened_transport_keeps_group_order() {
        let keys: Vec<_> = TRANSPORT_FLAT.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys.first(), Some(&"car"));
        assert_eq!(keys.last(), Some(&"flight_international"));
        assert_eq!(
            keys.len(),
            TRANSPORT_PERSONAL.len() + TRANSPORT_PUBLIC.len() + TRANSPORT_AIR.len()
        );
    }

    #[test]
    fn transport_lookup_spans_all_groups() {
        assert_eq!(transport_factor("car"), Some(0.12));
        assert_eq!(transport_factor("cab"), Some(0.13));
        assert_eq!(transport_factor("flight_domestic"), Some(0.18));
        assert_eq!(transport_factor("hovercraft"), None);
    }

    #[test]
    fn flight_class_defaults() {
        assert_eq!(flight_factor("international"), 0.22);
        assert_eq!(flight_factor("Domestic"), 0.18);
        assert_eq!(flight_factor("business"), DEFAULT_AIR_FACTOR);
    }

    #[test]
    fn shopping_tables_cover_the_same_categories() {
        for key in SHOPPING.keys() {
            assert!(SHOPPING_COST_PER_KG.contains(key), "missing cost for {key}");
        }
        assert!(SHOPPING.contains(DEFAULT_SHOPPING_CATEGORY));
    }

    #[test]
    fn food_table_lookup() {
        assert_eq!(FOOD.get("chicken"), Some(6.0));
        assert_eq!(FOOD.get("soft drink"), Some(3.0));
        assert!(!FOOD.contains("tofu"));
    }
}
