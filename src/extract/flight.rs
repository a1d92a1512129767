//! Flights: distance plus an optional class.

use std::sync::LazyLock;

use super::{DISTANCE_UNIT, NUM, Rule, apply_rules, compile_rules};
use crate::activity::{Category, FlightActivity};
use crate::span::SpanTracker;

const CLASS: &str = r"(?P<qual>domestic|international|business|economy)";

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    let patterns = [
        // 800 km international flight
        format!(r"{NUM}\s*{DISTANCE_UNIT}\s+(?:{CLASS}\s*)?flights?\b"),
        // domestic flight of 600 km
        format!(r"\b(?:{CLASS}\s*)?flights?\s+of\s+{NUM}\s*{DISTANCE_UNIT}"),
        format!(r"\bflights?\b.*?{NUM}\s*{DISTANCE_UNIT}(?:\s+{CLASS})?"),
    ];
    let patterns: Vec<&str> = patterns.iter().map(String::as_str).collect();
    compile_rules(&patterns, None)
});

pub fn extract(text: &str) -> (FlightActivity, SpanTracker) {
    let mut tracker = SpanTracker::new(Category::Flight);
    let mut flight = FlightActivity::default();
    for hit in apply_rules(&RULES, text, &mut tracker) {
        flight.km += hit.value;
        if let Some(class) = hit.qual {
            flight.class = class.to_string();
        }
    }
    (flight, tracker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_then_class() {
        let (flight, _) = extract("took a 800 km international flight");
        assert_eq!(flight.km, 800.0);
        assert_eq!(flight.class, "international");
    }

    #[test]
    fn class_then_distance() {
        let (flight, _) = extract("a business flight of 1200 km");
        assert_eq!(flight.km, 1200.0);
        assert_eq!(flight.class, "business");
    }

    #[test]
    fn class_defaults_to_domestic() {
        let (flight, _) = extract("my flight was 500 miles long");
        assert!((flight.km - 500.0 * crate::units::KM_PER_MILE).abs() < 1e-9);
        assert_eq!(flight.class, "domestic");
    }

    #[test]
    fn last_class_wins() {
        let (flight, tracker) =
            extract("300 km domestic flight, then 2000 km international flight");
        assert_eq!(flight.km, 2300.0);
        assert_eq!(flight.class, "international");
        assert_eq!(tracker.spans().len(), 2);
    }

    #[test]
    fn no_flight_keyword_no_flight() {
        let (flight, tracker) = extract("drove 300 km");
        assert_eq!(flight.km, 0.0);
        assert!(tracker.is_empty());
    }
}
