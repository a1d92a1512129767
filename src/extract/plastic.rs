//! Plastic: kilograms and resin code. Like water, the first complete match
//! is the only one counted.

use std::sync::LazyLock;

use super::{MASS_UNIT, NUM, Rule, compile_rules, first_match};
use crate::activity::{Category, PlasticActivity};
use crate::span::SpanTracker;

const RESIN: &str = r"(?P<qual>pet|hdpe|pvc)";

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    let patterns = [
        format!(r"\bused\s*{NUM}\s*{MASS_UNIT}\s*(?:of\s*)?(?:{RESIN}\s*)?plastic"),
        format!(r"{NUM}\s*{MASS_UNIT}\s*(?:of\s*)?(?:{RESIN}\s*)?plastic"),
        format!(r"\bplastic.*?(?:{RESIN}\s*)?{NUM}\s*{MASS_UNIT}"),
    ];
    let patterns: Vec<&str> = patterns.iter().map(String::as_str).collect();
    compile_rules(&patterns, None)
});

pub fn extract(text: &str) -> (PlasticActivity, SpanTracker) {
    let mut tracker = SpanTracker::new(Category::Plastic);
    let mut plastic = PlasticActivity::default();
    if let Some(hit) = first_match(&RULES, text, &mut tracker) {
        plastic.kg = hit.value;
        if let Some(resin) = hit.qual {
            plastic.resin = resin.to_uppercase();
        }
    }
    (plastic, tracker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resin_is_uppercased() {
        let (plastic, _) = extract("used 5kg of pet plastic");
        assert_eq!(plastic.kg, 5.0);
        assert_eq!(plastic.resin, "PET");
    }

    #[test]
    fn grams_and_default_resin() {
        let (plastic, _) = extract("threw away 200 g plastic");
        assert!((plastic.kg - 0.2).abs() < 1e-12);
        assert_eq!(plastic.resin, "PET");
    }

    #[test]
    fn plastic_before_quantity() {
        let (plastic, _) = extract("plastic waste hdpe 2 kg");
        assert_eq!(plastic.kg, 2.0);
        assert_eq!(plastic.resin, "HDPE");
    }

    #[test]
    fn nothing_found() {
        let (plastic, tracker) = extract("no plastic today");
        assert_eq!(plastic.kg, 0.0);
        assert!(tracker.is_empty());
    }
}
