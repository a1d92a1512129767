//! Electricity: one running kWh total.

use std::sync::LazyLock;

use super::{ENERGY_UNIT, NUM, Rule, apply_rules, compile_rules};
use crate::activity::Category;
use crate::span::SpanTracker;

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    let patterns = [
        format!(r"{NUM}\s*{ENERGY_UNIT}"),
        format!(r"\b(?:used|consumed)\b.*?{NUM}\s*{ENERGY_UNIT}"),
        format!(r"\belectricity\b.*?{NUM}\s*{ENERGY_UNIT}"),
        format!(r"{NUM}\s*{ENERGY_UNIT}\s*used"),
    ];
    let patterns: Vec<&str> = patterns.iter().map(String::as_str).collect();
    compile_rules(&patterns, Some("kwh"))
});

pub fn extract(text: &str) -> (f64, SpanTracker) {
    let mut tracker = SpanTracker::new(Category::Electricity);
    let kwh = apply_rules(&RULES, text, &mut tracker)
        .iter()
        .map(|hit| hit.value)
        .sum();
    (kwh, tracker)
}
