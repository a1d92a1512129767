//! Water: liters and their source. The first complete match is the only one
//! counted.

use std::sync::LazyLock;

use super::{NUM, Rule, VOLUME_UNIT, compile_rules, first_match};
use crate::activity::{Category, WaterActivity};
use crate::span::SpanTracker;

const SOURCE: &str = r"(?P<qual>tap|bottled)";

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    let patterns = [
        format!(r"{NUM}\s*{VOLUME_UNIT}.*?(?:{SOURCE}\s*)?\bwater\b"),
        format!(r"\b{SOURCE}\s*water\b.*?{NUM}\s*{VOLUME_UNIT}"),
        format!(r"\bwater\s*{SOURCE}\b.*?{NUM}\s*{VOLUME_UNIT}"),
        format!(r"\bdrank\s*{NUM}\s*{VOLUME_UNIT}\s*of\s*(?:{SOURCE}\s*)?water\b"),
    ];
    let patterns: Vec<&str> = patterns.iter().map(String::as_str).collect();
    compile_rules(&patterns, None)
});

pub fn extract(text: &str) -> (WaterActivity, SpanTracker) {
    let mut tracker = SpanTracker::new(Category::Water);
    let mut water = WaterActivity::default();
    if let Some(hit) = first_match(&RULES, text, &mut tracker) {
        water.liters = hit.value;
        if let Some(source) = hit.qual {
            water.source = source.to_string();
        }
    }
    (water, tracker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_then_source() {
        let (water, _) = extract("drank 2 l of bottled water");
        assert_eq!(water.liters, 2.0);
        assert_eq!(water.source, "bottled");
    }

    #[test]
    fn source_then_volume() {
        let (water, _) = extract("tap water around 150 liters");
        assert_eq!(water.liters, 150.0);
        assert_eq!(water.source, "tap");
    }

    #[test]
    fn milliliters_scale_down() {
        let (water, _) = extract("500ml water");
        assert!((water.liters - 0.5).abs() < 1e-12);
        assert_eq!(water.source, "tap");
    }

    #[test]
    fn only_the_first_reading_counts() {
        let (water, tracker) = extract("1 l water in the morning, 3 l water at night");
        assert_eq!(water.liters, 1.0);
        assert_eq!(tracker.spans().len(), 1);
    }

    #[test]
    fn unit_must_be_a_whole_word() {
        let (water, _) = extract("2 lemons in water");
        assert_eq!(water.liters, 0.0);
    }
}
