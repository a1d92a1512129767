//! Tips and badges derived from category emissions.

use std::fmt;

use serde::{Serialize, Serializer};

use super::report::CategoryTotals;
use crate::activity::Category;

/// Below this total (kg CO₂) the footprint is praised instead of criticized.
pub const LOW_FOOTPRINT_KG: f64 = 200.0;

const LOW_FOOTPRINT_TIP: &str =
    "Great job! Your footprint is impressively low. Keep up the eco-friendly habits!";

// ── Tips ────────────────────────────────────────────────────────────────

/// What a tip threshold is compared against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Category(Category),
    Total,
}

struct Rung {
    scope: Scope,
    /// The tip fires when the emission is strictly above this.
    above: f64,
    /// `{value}` is replaced by the emission.
    template: &'static str,
}

const RUNGS: &[Rung] = &[
    Rung {
        scope: Scope::Category(Category::Transport),
        above: 50.0,
        template: "Your transport emissions are quite high ({value} kg CO₂). Try switching to public transport, biking, or walking more often.",
    },
    Rung {
        scope: Scope::Category(Category::Transport),
        above: 150.0,
        template: "Transport alone is {value} kg CO₂. Combining trips or car-pooling on regular routes would make the biggest dent.",
    },
    Rung {
        scope: Scope::Category(Category::Food),
        above: 30.0,
        template: "Your food-related emissions are {value} kg CO₂. Consider reducing red meat and processed foods, and try more plant-based meals.",
    },
    Rung {
        scope: Scope::Category(Category::Food),
        above: 80.0,
        template: "Food accounts for {value} kg CO₂. Replacing beef and lamb with lentils or paneer a few days a week cuts this sharply.",
    },
    Rung {
        scope: Scope::Category(Category::Plastic),
        above: 2.0,
        template: "Your plastic use adds {value} kg CO₂. Try shifting to reusable or biodegradable alternatives to cut down plastic impact.",
    },
    Rung {
        scope: Scope::Category(Category::Plastic),
        above: 10.0,
        template: "Plastic is responsible for {value} kg CO₂. Carry your own bags and bottles, and avoid single-use packaging.",
    },
    Rung {
        scope: Scope::Category(Category::Electricity),
        above: 20.0,
        template: "Your electricity use produced {value} kg CO₂. Reduce usage by unplugging unused devices and using energy-efficient appliances.",
    },
    Rung {
        scope: Scope::Category(Category::Electricity),
        above: 60.0,
        template: "Electricity emissions reached {value} kg CO₂. Check air conditioning and water heating first, or look into rooftop solar.",
    },
    Rung {
        scope: Scope::Category(Category::Shopping),
        above: 10.0,
        template: "Your shopping emissions are {value} kg CO₂. Consider buying only what you need and supporting eco-friendly brands.",
    },
    Rung {
        scope: Scope::Category(Category::Shopping),
        above: 40.0,
        template: "Shopping came to {value} kg CO₂. Repairing, renting, or buying second-hand avoids most of a new product's footprint.",
    },
    Rung {
        scope: Scope::Category(Category::Water),
        above: 100.0,
        template: "Your water use adds {value} kg CO₂. Try shorter showers, fixing leaks, and using water-efficient fixtures.",
    },
    Rung {
        scope: Scope::Category(Category::Water),
        above: 300.0,
        template: "Water accounts for {value} kg CO₂. Switching from bottled to filtered tap water makes the largest difference.",
    },
    Rung {
        scope: Scope::Category(Category::Flight),
        above: 100.0,
        template: "Your flights produced {value} kg CO₂. Prefer trains for short routes where you can.",
    },
    Rung {
        scope: Scope::Category(Category::Flight),
        above: 500.0,
        template: "Flying accounts for {value} kg CO₂. Fewer, longer trips and economy seats have a much smaller footprint.",
    },
    Rung {
        scope: Scope::Total,
        above: 1000.0,
        template: "Your total footprint is {value} kg CO₂. Setting monthly sustainability goals can help you bring this down over time.",
    },
    Rung {
        scope: Scope::Total,
        above: 2500.0,
        template: "At {value} kg CO₂ your footprint is well above average. Pick the largest category above and tackle it first.",
    },
];

/// Every tip whose threshold is exceeded, in ladder order, then the
/// low-footprint tip when it applies.
pub fn tips(totals: &CategoryTotals, total: f64) -> Vec<String> {
    let mut tips: Vec<String> = RUNGS
        .iter()
        .filter_map(|rung| {
            let value = match rung.scope {
                Scope::Category(category) => totals.get(category),
                Scope::Total => total,
            };
            (value > rung.above).then(|| rung.template.replace("{value}", &format!("{value:?}")))
        })
        .collect();
    if total < LOW_FOOTPRINT_KG {
        tips.push(LOW_FOOTPRINT_TIP.to_string());
    }
    tips
}

// ── Badges ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Badge {
    LowCarbonHero,
    BelowGlobalAverage,
    PlasticReducer,
    EcoCommuter,
    GreenEater,
    EnergySaver,
    MinimalShopper,
    WaterWise,
}

impl Badge {
    pub fn name(&self) -> &'static str {
        match self {
            Self::LowCarbonHero => "Low Carbon Hero",
            Self::BelowGlobalAverage => "Below Global Average",
            Self::PlasticReducer => "Plastic Reducer",
            Self::EcoCommuter => "Eco Commuter",
            Self::GreenEater => "Green Eater",
            Self::EnergySaver => "Energy Saver",
            Self::MinimalShopper => "Minimal Shopper",
            Self::WaterWise => "Water Wise",
        }
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Badge {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Badges earned, in a fixed order.
pub fn badges(totals: &CategoryTotals, total: f64) -> Vec<Badge> {
    let earned = [
        (Badge::LowCarbonHero, total < 100.0),
        (Badge::BelowGlobalAverage, total < 4000.0),
        (Badge::PlasticReducer, totals.plastic < 1.0),
        (Badge::EcoCommuter, totals.transport < 10.0),
        (Badge::GreenEater, totals.food < 5.0),
        (Badge::EnergySaver, totals.electricity < 10.0),
        (Badge::MinimalShopper, totals.shopping < 2.0),
        (Badge::WaterWise, totals.water < 10.0),
    ];
    earned
        .into_iter()
        .filter_map(|(badge, ok)| ok.then_some(badge))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_footprint_gets_praise_and_every_badge() {
        let totals = CategoryTotals::default();
        assert_eq!(tips(&totals, 0.0), [LOW_FOOTPRINT_TIP]);
        assert_eq!(badges(&totals, 0.0).len(), 8);
    }

    #[test]
    fn both_rungs_fire_above_very_high() {
        let totals = CategoryTotals {
            transport: 200.0,
            ..Default::default()
        };
        let tips = tips(&totals, 200.0);
        assert_eq!(tips.len(), 2);
        assert!(tips[0].contains("(200.0 kg CO₂)"));
        assert!(tips[1].starts_with("Transport alone"));
    }

    #[test]
    fn thresholds_are_strict() {
        let totals = CategoryTotals {
            food: 30.0,
            ..Default::default()
        };
        assert!(tips(&totals, 30.0).iter().all(|t| !t.contains("food")));
        let totals = CategoryTotals {
            food: 30.5,
            ..Default::default()
        };
        assert!(tips(&totals, 30.5)[0].contains("30.5 kg CO₂"));
    }

    #[test]
    fn total_ladder_and_no_praise() {
        let totals = CategoryTotals {
            flight: 3000.0,
            ..Default::default()
        };
        let tips = tips(&totals, 3000.0);
        // flight high, flight very high, total high, total very high
        assert_eq!(tips.len(), 4);
        assert!(!tips.iter().any(|t| t.starts_with("Great job")));
    }

    #[test]
    fn badges_drop_as_categories_grow() {
        let totals = CategoryTotals {
            transport: 12.0,
            plastic: 1.0,
            ..Default::default()
        };
        let earned = badges(&totals, 150.0);
        assert!(!earned.contains(&Badge::LowCarbonHero));
        assert!(earned.contains(&Badge::BelowGlobalAverage));
        assert!(!earned.contains(&Badge::EcoCommuter));
        assert!(!earned.contains(&Badge::PlasticReducer));
        assert!(earned.contains(&Badge::GreenEater));
    }

    #[test]
    fn badge_serializes_as_its_name() {
        let json = serde_json::to_string(&Badge::WaterWise).unwrap();
        assert_eq!(json, "\"Water Wise\"");
    }
}
