//! Category extractors: ordered regex rule lists over normalized text.
//!
//! Each category owns an ordered list of [`Rule`]s and a [`SpanTracker`].
//! [`apply_rules`] walks the rules in priority order and accepts a match only
//! when it carries both a magnitude and a unit and does not overlap a span the
//! same category already claimed. Categories are independent: one phrase may
//! be claimed by transport and by food at the same time.
//!
//! Rules use named captures: `num` for the magnitude, `unit` for the unit
//! token, and `qual` for a qualifier (flight class, water source, resin code).
//! Rules without a unit slot carry an implied unit instead.

pub mod electricity;
pub mod fallback;
pub mod flight;
pub mod food;
pub mod plastic;
pub mod shopping;
pub mod transport;
pub mod water;

use regex::Regex;

use crate::activity::{ActivityData, Category};
use crate::alias::NormalizedText;
use crate::lingua::Doc;
use crate::span::{Span, SpanTracker};
use crate::units;

// ── Pattern fragments ───────────────────────────────────────────────────

/// A magnitude: digits, optional thousands separators, optional decimals.
pub(crate) const NUM: &str = r"(?P<num>\d+(?:,\d{3})*(?:\.\d+)?)";

pub(crate) const DISTANCE_UNIT: &str = r"(?P<unit>km|kms|kilometers?|kilometres?|miles?)\b";

pub(crate) const MASS_UNIT: &str = r"(?P<unit>kg|kgs|kilograms?|g|grams?)\b";

pub(crate) const VOLUME_UNIT: &str = r"(?P<unit>ml|milliliters?|millilitres?|l|liters?|litres?)\b";

pub(crate) const MASS_OR_VOLUME_UNIT: &str =
    r"(?P<unit>kg|kgs|kilograms?|g|grams?|ml|milliliters?|millilitres?|l|liters?|litres?)\b";

pub(crate) const ENERGY_UNIT: &str = r"(?P<unit>kwh|kilowatt-hours?)\b";

/// Currency token after an amount; optional in every rule that uses it.
pub(crate) const CURRENCY_UNIT: &str = r"(?:(?P<unit>rs|rupees?|inr)\b)?";

// ── Rules ───────────────────────────────────────────────────────────────

/// One compiled extraction pattern.
#[derive(Debug, Clone)]
pub struct Rule {
    regex: Regex,
    implied_unit: Option<&'static str>,
}

impl Rule {
    /// Compile a built-in pattern.
    ///
    /// # Panics
    ///
    /// If `pattern` is not a valid regex. Only called on the patterns
    /// compiled into this crate, all of which are exercised by tests.
    pub fn new(pattern: &str) -> Self {
        let regex = Regex::new(pattern)
            .unwrap_or_else(|e| panic!("invalid built-in rule {pattern:?}: {e}"));
        Self {
            regex,
            implied_unit: None,
        }
    }

    /// Unit to assume when the pattern has no `unit` slot or it did not
    /// participate in the match.
    pub fn with_implied_unit(mut self, unit: &'static str) -> Self {
        self.implied_unit = Some(unit);
        self
    }

    /// Build one rule from a template, replacing `{item}` with the item name
    /// as a whole-word literal.
    pub fn for_item(template: &str, item: &str) -> Self {
        let item_pattern = format!(r"\b{}\b", regex::escape(item));
        Self::new(&template.replace("{item}", &item_pattern))
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }

    /// All non-overlapping matches in `text`, left to right.
    pub fn matches<'t>(&self, text: &'t str) -> impl Iterator<Item = RuleMatch<'t>> {
        self.regex.captures_iter(text).filter_map(move |caps| {
            let whole = caps.get(0)?;
            Some(RuleMatch {
                span: Span::from(whole),
                num: caps.name("num").map(|m| m.as_str()),
                unit: caps
                    .name("unit")
                    .map(|m| m.as_str())
                    .or(self.implied_unit),
                qual: caps.name("qual").map(|m| m.as_str()),
            })
        })
    }
}

/// Compile a list of built-in patterns sharing an implied unit.
pub(crate) fn compile_rules(patterns: &[&str], implied_unit: Option<&'static str>) -> Vec<Rule> {
    patterns
        .iter()
        .map(|pattern| {
            let rule = Rule::new(pattern);
            match implied_unit {
                Some(unit) => rule.with_implied_unit(unit),
                None => rule,
            }
        })
        .collect()
}

/// Instantiate item templates for every item, preserving item order.
pub(crate) fn compile_item_rules<'a>(
    items: impl IntoIterator<Item = &'a str>,
    templates: &[&str],
    implied_unit: Option<&'static str>,
) -> Vec<(&'a str, Vec<Rule>)> {
    items
        .into_iter()
        .map(|item| {
            let rules = templates
                .iter()
                .map(|template| {
                    let rule = Rule::for_item(template, item);
                    match implied_unit {
                        Some(unit) => rule.with_implied_unit(unit),
                        None => rule,
                    }
                })
                .collect();
            (item, rules)
        })
        .collect()
}

/// A raw regex hit with its named captures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleMatch<'t> {
    pub span: Span,
    pub num: Option<&'t str>,
    pub unit: Option<&'t str>,
    pub qual: Option<&'t str>,
}

/// A match that was accepted and claimed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Accepted<'t> {
    pub span: Span,
    /// Magnitude converted to the canonical unit.
    pub value: f64,
    pub qual: Option<&'t str>,
}

fn accept<'t>(m: RuleMatch<'t>, tracker: &mut SpanTracker) -> Option<Accepted<'t>> {
    let (Some(num), Some(unit)) = (m.num, m.unit) else {
        return None;
    };
    if !tracker.claim(m.span) {
        return None;
    }
    let value = units::convert(Some(num), Some(unit));
    tracing::debug!(
        category = %tracker.category(),
        start = m.span.start,
        end = m.span.end,
        value,
        "accepted match"
    );
    Some(Accepted {
        span: m.span,
        value,
        qual: m.qual,
    })
}

/// Run `rules` in order over `text`, accepting every complete,
/// non-overlapping match.
pub fn apply_rules<'t>(rules: &[Rule], text: &'t str, tracker: &mut SpanTracker) -> Vec<Accepted<'t>> {
    let mut accepted = Vec::new();
    for rule in rules {
        for m in rule.matches(text) {
            if tracker.overlaps(m.span) {
                tracing::debug!(
                    category = %tracker.category(),
                    start = m.span.start,
                    end = m.span.end,
                    "skipped overlapping match"
                );
                continue;
            }
            accepted.extend(accept(m, tracker));
        }
    }
    accepted
}

/// Stop at the first complete match of the first rule that has one.
pub fn first_match<'t>(rules: &[Rule], text: &'t str, tracker: &mut SpanTracker) -> Option<Accepted<'t>> {
    rules
        .iter()
        .flat_map(|rule| rule.matches(text))
        .find_map(|m| accept(m, tracker))
}

// ── Pipeline ────────────────────────────────────────────────────────────

/// Extracted activity plus the span trackers that justify it.
#[derive(Debug, Clone)]
pub struct Extraction {
    pub activity: ActivityData,
    trackers: Vec<SpanTracker>,
    fallbacks: Vec<Category>,
}

impl Extraction {
    /// Tracker of `category`.
    pub fn tracker(&self, category: Category) -> Option<&SpanTracker> {
        self.trackers.iter().find(|t| t.category() == category)
    }

    pub fn trackers(&self) -> &[SpanTracker] {
        &self.trackers
    }

    /// Categories whose values came from a fallback detector.
    pub fn fallbacks(&self) -> &[Category] {
        &self.fallbacks
    }

    /// Run the lemma-based detectors for categories the rules left empty.
    pub fn apply_fallbacks(&mut self, doc: &Doc) {
        if self.activity.food.is_empty() {
            let found = fallback::food(doc);
            if !found.is_empty() {
                tracing::debug!(items = found.len(), "food fallback");
                self.activity.food = found;
                self.fallbacks.push(Category::Food);
            }
        }

        if self.activity.shopping.spend == 0.0 {
            let hint = fallback::shopping(doc);
            let mut used = false;
            if let Some(spend) = hint.spend.filter(|spend| *spend > 0.0) {
                self.activity.shopping.spend = spend;
                used = true;
            }
            if let Some(category) = hint.category {
                self.activity.shopping.category = category.to_string();
                used = true;
            }
            if used {
                tracing::debug!(
                    spend = self.activity.shopping.spend,
                    category = %self.activity.shopping.category,
                    "shopping fallback"
                );
                self.fallbacks.push(Category::Shopping);
            }
        }
    }
}

/// Run all seven extractors over alias-normalized text, in category order.
pub fn run(normalized: &NormalizedText) -> Extraction {
    let text = normalized.text.as_str();

    let (transport, transport_spans) = transport::extract(text);
    let (electricity_kwh, electricity_spans) = electricity::extract(text);
    let (food, food_spans) = food::extract(text);
    let (shopping, shopping_spans) = shopping::extract(text, normalized.labels_in("shopping"));
    let (flight, flight_spans) = flight::extract(text);
    let (water, water_spans) = water::extract(text);
    let (plastic, plastic_spans) = plastic::extract(text);

    Extraction {
        activity: ActivityData {
            transport,
            electricity_kwh,
            food,
            shopping,
            flight,
            water,
            plastic,
        },
        trackers: vec![
            transport_spans,
            electricity_spans,
            food_spans,
            shopping_spans,
            flight_spans,
            water_spans,
            plastic_spans,
        ],
        fallbacks: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalized(text: &str) -> NormalizedText {
        NormalizedText {
            text: text.to_string(),
            matched: Default::default(),
        }
    }

    #[test]
    fn item_template_is_whole_word() {
        let rule = Rule::for_item(&format!(r"{{item}}.*?{NUM}\s*{DISTANCE_UNIT}"), "bus");
        assert!(rule.as_str().starts_with(r"\bbus\b"));
        assert_eq!(rule.matches("business trip 40 km").count(), 0);
        assert_eq!(rule.matches("bus ride 40 km").count(), 1);
    }

    #[test]
    fn implied_unit_fills_missing_slot() {
        let rule = Rule::new(&format!(r"spent\s*{NUM}\s*{CURRENCY_UNIT}")).with_implied_unit("rs");
        let m = rule.matches("spent 300 on food").next().unwrap();
        assert_eq!(m.num, Some("300"));
        assert_eq!(m.unit, Some("rs"));
        let m = rule.matches("spent 300 rupees").next().unwrap();
        assert_eq!(m.unit, Some("rupees"));
    }

    #[test]
    fn overlapping_matches_are_skipped() {
        let rules = compile_rules(
            &[
                format!(r"{NUM}\s*{DISTANCE_UNIT}").as_str(),
                format!(r"drove\s+{NUM}\s*{DISTANCE_UNIT}").as_str(),
            ],
            None,
        );
        let mut tracker = SpanTracker::new(Category::Transport);
        let accepted = apply_rules(&rules, "drove 5 km and 3 miles", &mut tracker);
        assert_eq!(accepted.len(), 2);
        assert_eq!(accepted[0].value, 5.0);
        assert!((accepted[1].value - 3.0 * units::KM_PER_MILE).abs() < 1e-9);
        assert_eq!(tracker.spans().len(), 2);
    }

    #[test]
    fn incomplete_match_is_not_claimed() {
        let rules = compile_rules(&[format!(r"{NUM}\s*(?:(?P<unit>km)\b)?").as_str()], None);
        let mut tracker = SpanTracker::new(Category::Transport);
        let accepted = apply_rules(&rules, "7 apples", &mut tracker);
        assert!(accepted.is_empty());
        assert!(tracker.is_empty());
    }

    #[test]
    fn first_match_stops_early() {
        let rules = compile_rules(
            &[
                format!(r"a\s*{NUM}\s*{VOLUME_UNIT}").as_str(),
                format!(r"{NUM}\s*{VOLUME_UNIT}").as_str(),
            ],
            None,
        );
        let mut tracker = SpanTracker::new(Category::Water);
        let hit = first_match(&rules, "1 l then a 2 l", &mut tracker).unwrap();
        assert_eq!(hit.value, 2.0);
        assert_eq!(tracker.spans().len(), 1);
    }

    #[test]
    fn run_returns_one_tracker_per_category() {
        let extraction = run(&normalized("drove 10km in a car"));
        assert_eq!(extraction.trackers().len(), Category::ALL.len());
        for category in Category::ALL {
            assert!(extraction.tracker(category).is_some());
        }
        assert_eq!(extraction.activity.transport.get("car"), Some(10.0));
    }

    #[test]
    fn fallbacks_fill_empty_categories_only() {
        use crate::lingua::{LinguisticProvider, RuleBasedProvider};

        let text = "ate rice and bought a shirt for 500 rs";
        let doc = RuleBasedProvider::new().analyze(text).unwrap();
        let mut extraction = run(&normalized(text));
        assert!(extraction.activity.food.is_empty());
        extraction.apply_fallbacks(&doc);
        assert_eq!(extraction.activity.food.get("rice"), Some(0.15));
        assert!(extraction.fallbacks().contains(&Category::Food));
    }
}
