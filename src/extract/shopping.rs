//! Shopping: spend and the category it went to.
//!
//! Two rule families share one tracker. Currency rules read the amount as
//! spend; weight rules turn kilograms into a spend equivalent. When neither
//! finds anything but the alias normalizer saw a shopping label, a flat
//! placeholder spend is assumed for that category.

use std::sync::LazyLock;

use super::{CURRENCY_UNIT, NUM, Rule, apply_rules, compile_item_rules};
use crate::activity::{Category, ShoppingActivity};
use crate::factors::SHOPPING;
use crate::span::SpanTracker;

/// Spend assigned per kilogram bought when only a weight is given.
// TODO: confirm with the factor owners; this is not derived from SHOPPING_COST_PER_KG.
pub const WEIGHT_SPEND_EQUIVALENT: f64 = 100.0;

/// Spend assumed when a shopping label is mentioned without an amount.
pub const PLACEHOLDER_SPEND: f64 = 2000.0;

struct CategoryRules {
    category: &'static str,
    currency: Vec<Rule>,
    weight: Vec<Rule>,
}

static RULES: LazyLock<Vec<CategoryRules>> = LazyLock::new(|| {
    let cur = CURRENCY_UNIT;
    let currency = [
        format!(r"{{item}}.*?(?:for|cost|price|worth|at)?\s*₹?\s*{NUM}\s*{cur}"),
        format!(
            r"\b(?:bought|purchased|got|ordered)\b.*?{{item}}.*?(?:for|cost|price|worth|at)?\s*₹?\s*{NUM}\s*{cur}"
        ),
        format!(r"\bspent\s*₹?\s*{NUM}\s*{cur}\s*(?:on\s*)?{{item}}"),
        format!(r"₹?\s*{NUM}\s*{cur}\s*(?:(?:for|on)\s*)?{{item}}"),
        format!(r"\bpurchase of\s*{{item}}.*?(?:cost|price|was)?\s*₹?\s*{NUM}\s*{cur}"),
        format!(r"\bmy\s*{{item}}.*?(?:cost|price|was)?\s*₹?\s*{NUM}\s*{cur}"),
    ];
    let weight = [
        format!(
            r"(?:\b(?:bought|purchased|got)\b)?\s*{NUM}\s*(?P<unit>kg|kgs|kilograms?)\b\s+(?:of\s+)?{{item}}"
        ),
        format!(
            r"{{item}}.*?(?:amount|weighed|weighing)?\s*(?:is|was)?\s*{NUM}\s*(?P<unit>kg|kgs|kilograms?)\b"
        ),
    ];
    let currency: Vec<&str> = currency.iter().map(String::as_str).collect();
    let weight: Vec<&str> = weight.iter().map(String::as_str).collect();

    let currency = compile_item_rules(SHOPPING.keys(), &currency, Some("rs"));
    let weight = compile_item_rules(SHOPPING.keys(), &weight, None);
    currency
        .into_iter()
        .zip(weight)
        .map(|((category, currency), (_, weight))| CategoryRules {
            category,
            currency,
            weight,
        })
        .collect()
});

/// Spend and category, given the shopping labels the alias step matched.
pub fn extract<'a>(
    text: &str,
    matched_labels: impl IntoIterator<Item = &'a str>,
) -> (ShoppingActivity, SpanTracker) {
    let mut tracker = SpanTracker::new(Category::Shopping);
    let mut shopping = ShoppingActivity::default();

    for rules in RULES.iter() {
        for hit in apply_rules(&rules.currency, text, &mut tracker) {
            shopping.spend += hit.value;
            shopping.category = rules.category.to_string();
        }
        for hit in apply_rules(&rules.weight, text, &mut tracker) {
            shopping.spend += hit.value * WEIGHT_SPEND_EQUIVALENT;
            shopping.category = rules.category.to_string();
        }
    }

    if shopping.spend == 0.0 {
        if let Some(label) = matched_labels.into_iter().find(|label| SHOPPING.contains(label)) {
            tracing::debug!(category = label, spend = PLACEHOLDER_SPEND, "placeholder spend");
            shopping.spend = PLACEHOLDER_SPEND;
            shopping.category = label.to_string();
        }
    }

    (shopping, tracker)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(text: &str) -> ShoppingActivity {
        extract(text, std::iter::empty()).0
    }

    #[test]
    fn spent_on_category() {
        let shopping = run("spent 3000 rs on gadgets");
        assert_eq!(shopping.spend, 3000.0);
        assert_eq!(shopping.category, "gadgets");
    }

    #[test]
    fn rupee_sign_and_separators() {
        let shopping = run("bought clothes for ₹1,200");
        assert_eq!(shopping.spend, 1200.0);
        assert_eq!(shopping.category, "clothes");
    }

    #[test]
    fn weight_becomes_spend_equivalent() {
        let shopping = run("purchased 3 kg of groceries");
        assert_eq!(shopping.spend, 300.0);
        assert_eq!(shopping.category, "groceries");
    }

    #[test]
    fn placeholder_when_only_a_label_matched() {
        let (shopping, tracker) = extract("got new gadgets", ["gadgets"]);
        assert_eq!(shopping.spend, PLACEHOLDER_SPEND);
        assert_eq!(shopping.category, "gadgets");
        assert!(tracker.is_empty());
    }

    #[test]
    fn placeholder_ignores_labels_without_factors() {
        let (shopping, _) = extract("nothing bought", ["furniture"]);
        assert_eq!(shopping.spend, 0.0);
        assert_eq!(shopping.category, "clothes");
    }

    #[test]
    fn found_spend_beats_placeholder() {
        let (shopping, _) = extract("spent 500 rs on clothes", ["gadgets"]);
        assert_eq!(shopping.spend, 500.0);
        assert_eq!(shopping.category, "clothes");
    }
}
