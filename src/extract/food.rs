//! Food: kilograms per food item.
//!
//! Volumes are taken at face value (1 l counts as 1 kg).

use std::sync::LazyLock;

use super::{MASS_OR_VOLUME_UNIT, NUM, Rule, apply_rules, compile_item_rules};
use crate::activity::{Category, CategoryExtraction};
use crate::factors::FOOD;
use crate::span::SpanTracker;

static ITEM_RULES: LazyLock<Vec<(&'static str, Vec<Rule>)>> = LazyLock::new(|| {
    let unit = MASS_OR_VOLUME_UNIT;
    let templates = [
        // 200g chicken, 1 kg of rice
        format!(r"{NUM}\s*{unit}\s+(?:of\s+)?{{item}}"),
        // rice weighed about 2 kg
        format!(
            r"{{item}}\s*(?:amount|weighed|weighing|measured|totaled)?\s*(?:is|was)?\s*(?:about|around)?\s*{NUM}\s*{unit}"
        ),
        format!(r"\b(?:ate|had|consumed)\s+(?:about|around)?\s*{NUM}\s*{unit}\s+(?:of\s+)?{{item}}"),
        format!(r"{{item}}.*?(?:about|around)?\s*{NUM}\s*{unit}"),
        // paneer: 250g
        format!(r"{{item}}\s*[:\-]?\s*{NUM}\s*{unit}"),
    ];
    let templates: Vec<&str> = templates.iter().map(String::as_str).collect();
    compile_item_rules(FOOD.keys(), &templates, None)
});

pub fn extract(text: &str) -> (CategoryExtraction, SpanTracker) {
    let mut tracker = SpanTracker::new(Category::Food);
    let mut items = CategoryExtraction::new(Category::Food);
    for (item, rules) in ITEM_RULES.iter() {
        for hit in apply_rules(rules, text, &mut tracker) {
            items.add(item, hit.value);
        }
    }
    (items, tracker)
}
