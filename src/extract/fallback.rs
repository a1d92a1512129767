//! Lemma-based detectors for text the rules could not read.
//!
//! These only run for a category the rules left empty: food mentioned
//! without a quantity, or a purchase whose amount is phrased as "500 rs".

use crate::activity::{Category, CategoryExtraction};
use crate::factors::FOOD;
use crate::lingua::Doc;
use crate::units::parse_magnitude;

/// Quantity assumed for each food mention without an amount, in kg.
pub const DEFAULT_FOOD_PORTION_KG: f64 = 0.15;

const CLOTHES_KEYWORDS: &[&str] = &[
    "shirt", "jeans", "clothes", "dress", "saree", "tshirt", "hoodie", "shoes", "jacket", "kurta",
    "suit", "trousers", "cap", "shorts",
];

const GADGETS_KEYWORDS: &[&str] = &[
    "phone", "mobile", "laptop", "tablet", "camera", "charger", "tv", "watch", "headphones",
    "airpods", "smartwatch", "monitor", "mouse", "keyboard", "gadgets",
];

const GROCERIES_KEYWORDS: &[&str] = &[
    "rice", "flour", "atta", "dal", "grocery", "groceries", "sugar", "salt", "oil", "bread", "wheat",
    "vegetables", "milk", "butter", "jam", "apple", "banana", "soap", "detergent", "toothpaste",
    "snacks", "coffee", "tea", "juice", "chocolate", "candy", "cake", "biscuits",
];

const SHOPPING_KEYWORDS: [(&str, &[&str]); 3] = [
    ("clothes", CLOTHES_KEYWORDS),
    ("gadgets", GADGETS_KEYWORDS),
    ("groceries", GROCERIES_KEYWORDS),
];

/// Every token whose lemma is a known food counts as one default portion.
pub fn food(doc: &Doc) -> CategoryExtraction {
    let mut items = CategoryExtraction::new(Category::Food);
    for token in doc.tokens() {
        if FOOD.contains(&token.lemma) {
            items.add(&token.lemma, DEFAULT_FOOD_PORTION_KG);
        }
    }
    items
}

/// What the shopping detector found. Either part may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShoppingHint {
    pub spend: Option<f64>,
    pub category: Option<&'static str>,
}

/// Look for "<number> rs" amounts and category keywords; later mentions win.
pub fn shopping(doc: &Doc) -> ShoppingHint {
    let mut hint = ShoppingHint::default();
    for (index, token) in doc.tokens().iter().enumerate() {
        for (category, keywords) in SHOPPING_KEYWORDS {
            if keywords.contains(&token.lemma.as_str()) || keywords.contains(&token.lower.as_str()) {
                hint.category = Some(category);
            }
        }

        if matches!(token.lower.as_str(), "rs" | "rupees") {
            if let Some(prev) = doc.nbor(index, -1).filter(|prev| prev.like_num) {
                hint.spend = parse_magnitude(&prev.text);
            }
        }
    }
    hint
}
