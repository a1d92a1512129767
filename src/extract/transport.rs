//! Transport: distance per mode.
//!
//! Modes come from the flattened transport table (personal, public, air) and
//! are tried in that order, so an earlier mode claims a phrase first.

use std::sync::LazyLock;

use super::{DISTANCE_UNIT, NUM, Rule, apply_rules, compile_item_rules};
use crate::activity::{Category, CategoryExtraction};
use crate::factors::TRANSPORT_FLAT;
use crate::span::SpanTracker;

static MODE_RULES: LazyLock<Vec<(&'static str, Vec<Rule>)>> = LazyLock::new(|| {
    let templates = [
        // car 12 km
        format!(r"{{item}}.*?{NUM}\s*{DISTANCE_UNIT}"),
        // 12 km by car
        format!(r"{NUM}\s*{DISTANCE_UNIT}.*?{{item}}"),
        format!(
            r"\b(?:rode|used|took|travelled|drove|drive|commuted|covered|went by|on a)\b.*?{{item}}.*?{NUM}\s*{DISTANCE_UNIT}"
        ),
        format!(r"\bdistance\b.*?{NUM}\s*{DISTANCE_UNIT}.*?{{item}}"),
        format!(r"\bi\b.*?{{item}}.*?{NUM}\s*{DISTANCE_UNIT}"),
        format!(
            r"{{item}}.*?\b(?:covered|went|ran|moved|trip|journey|ride|travelled)\b.*?{NUM}\s*{DISTANCE_UNIT}"
        ),
        // compact: "cab ride 10km"
        format!(r"{{item}}.*?{NUM}{DISTANCE_UNIT}"),
        format!(r"{{item}}.*?\b(?:commuted|traveled|used)\b.*?{NUM}\s*{DISTANCE_UNIT}"),
        format!(r"\bdrove\s+{NUM}\s*{DISTANCE_UNIT}\s+in\s+a\s+{{item}}"),
        format!(r"\bused\s+a\s+{{item}}\s+for\s+{NUM}\s*{DISTANCE_UNIT}"),
    ];
    let templates: Vec<&str> = templates.iter().map(String::as_str).collect();
    compile_item_rules(TRANSPORT_FLAT.iter().map(|(mode, _)| *mode), &templates, None)
});

/// Kilometers per transport mode.
pub fn extract(text: &str) -> (CategoryExtraction, SpanTracker) {
    let mut tracker = SpanTracker::new(Category::Transport);
    let mut modes = CategoryExtraction::new(Category::Transport);
    for (mode, rules) in MODE_RULES.iter() {
        for hit in apply_rules(rules, text, &mut tracker) {
            modes.add(mode, hit.value);
        }
    }
    (modes, tracker)
}
