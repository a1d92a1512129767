//! Unit conversion to canonical units.
//!
//! Every extracted magnitude is brought into one of a handful of canonical
//! units before it is accumulated: kilograms for mass, liters for volume,
//! kilometers for distance. Energy (kWh) and currency amounts are already
//! canonical and pass through untouched.
//!
//! Conversion never fails. A magnitude that does not parse becomes `0.0`, and
//! a unit that is not recognized is assumed to already be canonical.

use std::fmt;

use serde::Serialize;

/// Kilometers per statute mile.
pub const KM_PER_MILE: f64 = 1.60934;

/// The fixed set of units quantities are stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CanonicalUnit {
    Kilogram,
    Liter,
    Kilometer,
    KilowattHour,
    Currency,
}

impl fmt::Display for CanonicalUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kilogram => write!(f, "kg"),
            Self::Liter => write!(f, "l"),
            Self::Kilometer => write!(f, "km"),
            Self::KilowattHour => write!(f, "kWh"),
            Self::Currency => write!(f, "rs"),
        }
    }
}

/// A non-negative magnitude in a canonical unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quantity {
    magnitude: f64,
    unit: CanonicalUnit,
}

impl Quantity {
    /// Build a quantity, clamping negative or non-finite magnitudes to zero.
    pub fn new(magnitude: f64, unit: CanonicalUnit) -> Self {
        let magnitude = if magnitude.is_finite() && magnitude > 0.0 {
            magnitude
        } else {
            0.0
        };
        Self { magnitude, unit }
    }

    pub fn zero(unit: CanonicalUnit) -> Self {
        Self::new(0.0, unit)
    }

    pub fn magnitude(&self) -> f64 {
        self.magnitude
    }

    pub fn unit(&self) -> CanonicalUnit {
        self.unit
    }

    /// Add a magnitude already expressed in this quantity's unit. The sum
    /// saturates at `f64::MAX`.
    pub fn accumulate(&mut self, magnitude: f64) {
        *self = Self::new((self.magnitude + magnitude).min(f64::MAX), self.unit);
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.magnitude, self.unit)
    }
}

/// How a value in a recognized unit maps onto its canonical unit.
#[derive(Clone, Copy)]
enum Scale {
    Identity,
    Divide(f64),
    Multiply(f64),
}

struct UnitEntry {
    names: &'static [&'static str],
    canonical: CanonicalUnit,
    scale: Scale,
}

const UNITS: &[UnitEntry] = &[
    UnitEntry { names: &["g", "gram", "grams"], canonical: CanonicalUnit::Kilogram, scale: Scale::Divide(1000.0) },
    UnitEntry { names: &["kg", "kgs", "kilogram", "kilograms"], canonical: CanonicalUnit::Kilogram, scale: Scale::Identity },
    UnitEntry { names: &["ml", "milliliter", "milliliters", "millilitre", "millilitres"], canonical: CanonicalUnit::Liter, scale: Scale::Divide(1000.0) },
    UnitEntry { names: &["l", "liter", "liters", "litre", "litres"], canonical: CanonicalUnit::Liter, scale: Scale::Identity },
    UnitEntry { names: &["km", "kms", "kilometer", "kilometers", "kilometre", "kilometres"], canonical: CanonicalUnit::Kilometer, scale: Scale::Identity },
    UnitEntry { names: &["mile", "miles"], canonical: CanonicalUnit::Kilometer, scale: Scale::Multiply(KM_PER_MILE) },
    UnitEntry { names: &["kwh", "kilowatt-hour", "kilowatt-hours"], canonical: CanonicalUnit::KilowattHour, scale: Scale::Identity },
    UnitEntry { names: &["rs", "rupee", "rupees", "inr", "₹"], canonical: CanonicalUnit::Currency, scale: Scale::Identity },
];

fn lookup(unit: &str) -> Option<&'static UnitEntry> {
    let unit = unit.trim().to_lowercase();
    UNITS.iter().find(|entry| entry.names.contains(&unit.as_str()))
}

/// Canonical unit a unit token converts into, if it is recognized.
pub fn classify(unit: &str) -> Option<CanonicalUnit> {
    lookup(unit).map(|entry| entry.canonical)
}

/// Parse a captured magnitude. Anything that is not a finite number is `None`.
pub fn parse_magnitude(raw: &str) -> Option<f64> {
    raw.trim()
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Convert a value in `unit` to its canonical unit.
///
/// Unrecognized units leave the value unchanged.
pub fn to_standard(value: f64, unit: &str) -> f64 {
    match lookup(unit).map(|entry| entry.scale) {
        Some(Scale::Divide(d)) => value / d,
        Some(Scale::Multiply(m)) => value * m,
        Some(Scale::Identity) | None => value,
    }
}

/// Inverse of [`to_standard`]: express a canonical value in `unit`.
pub fn from_standard(value: f64, unit: &str) -> f64 {
    match lookup(unit).map(|entry| entry.scale) {
        Some(Scale::Divide(d)) => value * d,
        Some(Scale::Multiply(m)) => value / m,
        Some(Scale::Identity) | None => value,
    }
}

/// Convert a raw magnitude string and unit token into the canonical unit.
///
/// - missing or unparseable magnitude → `0.0`
/// - missing or empty unit → the parsed magnitude unchanged
pub fn convert(magnitude: Option<&str>, unit: Option<&str>) -> f64 {
    let Some(value) = magnitude.and_then(parse_magnitude) else {
        return 0.0;
    };
    match unit {
        Some(unit) if !unit.trim().is_empty() => to_standard(value, unit),
        _ => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn grams_and_milliliters_scale_down() {
        assert_eq!(convert(Some("1000"), Some("g")), 1.0);
        assert!(approx(convert(Some("1"), Some("ml")), 0.001));
        assert!(approx(convert(Some("250"), Some("grams")), 0.25));
    }

    #[test]
    fn canonical_units_pass_through() {
        assert_eq!(convert(Some("3"), Some("kg")), 3.0);
        assert_eq!(convert(Some("2.5"), Some("litres")), 2.5);
        assert_eq!(convert(Some("12"), Some("km")), 12.0);
        assert_eq!(convert(Some("40"), Some("kwh")), 40.0);
    }

    #[test]
    fn miles_become_kilometers() {
        assert!(approx(convert(Some("10"), Some("miles")), 16.0934));
        assert!(approx(convert(Some("1"), Some("MILE")), KM_PER_MILE));
    }

    #[test]
    fn missing_or_bad_magnitude_is_zero() {
        assert_eq!(convert(None, Some("kg")), 0.0);
        assert_eq!(convert(Some("lots"), Some("kg")), 0.0);
        assert_eq!(convert(Some("nan"), None), 0.0);
        assert_eq!(convert(Some("inf"), Some("km")), 0.0);
    }

    #[test]
    fn missing_or_unknown_unit_keeps_value() {
        assert_eq!(convert(Some("7"), None), 7.0);
        assert_eq!(convert(Some("7"), Some("")), 7.0);
        assert_eq!(convert(Some("7"), Some("furlongs")), 7.0);
    }

    #[test]
    fn unit_matching_ignores_case() {
        assert_eq!(convert(Some("500"), Some("G")), 0.5);
        assert_eq!(classify("KM"), Some(CanonicalUnit::Kilometer));
        assert_eq!(classify("parsecs"), None);
    }

    #[test]
    fn miles_round_trip() {
        for x in [0.0, 1.0, 12.5, 420.0] {
            let miles = from_standard(x, "miles");
            assert!(approx(convert(Some(&miles.to_string()), Some("km")), miles));
            assert!(approx(to_standard(miles, "miles"), x));
        }
    }

    #[test]
    fn quantity_clamps_negative_and_non_finite() {
        assert_eq!(Quantity::new(-4.0, CanonicalUnit::Kilogram).magnitude(), 0.0);
        assert_eq!(Quantity::new(f64::NAN, CanonicalUnit::Liter).magnitude(), 0.0);
        let mut q = Quantity::zero(CanonicalUnit::Kilometer);
        q.accumulate(2.0);
        q.accumulate(3.5);
        assert_eq!(q.magnitude(), 5.5);
    }

    #[test]
    fn accumulate_saturates_instead_of_zeroing() {
        let mut q = Quantity::new(1e308, CanonicalUnit::Kilometer);
        q.accumulate(1e308);
        assert_eq!(q.magnitude(), f64::MAX);
        q.accumulate(1.0);
        assert_eq!(q.magnitude(), f64::MAX);
    }
}
