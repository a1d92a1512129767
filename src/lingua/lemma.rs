//! Lightweight English lemmatization.
//!
//! Rule-based and deliberately small: irregular verbs that show up in
//! activity descriptions, a few irregular or invariant nouns, then plural
//! suffix stripping. Not a full morphology engine.

const IRREGULAR: &[(&str, &str)] = &[
    ("ate", "eat"),
    ("eaten", "eat"),
    ("drove", "drive"),
    ("driven", "drive"),
    ("rode", "ride"),
    ("ridden", "ride"),
    ("took", "take"),
    ("taken", "take"),
    ("went", "go"),
    ("gone", "go"),
    ("flew", "fly"),
    ("flown", "fly"),
    ("drank", "drink"),
    ("drunk", "drink"),
    ("spent", "spend"),
    ("bought", "buy"),
    ("got", "get"),
    ("had", "have"),
    ("has", "have"),
    ("was", "be"),
    ("were", "be"),
    ("is", "be"),
    ("are", "be"),
    ("children", "child"),
    ("men", "man"),
    ("women", "woman"),
    ("feet", "foot"),
    ("teeth", "tooth"),
    ("mice", "mouse"),
    ("leaves", "leaf"),
    ("loaves", "loaf"),
    ("knives", "knife"),
    ("shoes", "shoe"),
];

/// Words whose plural form is also their dictionary form.
const INVARIANT: &[&str] = &[
    "clothes", "jeans", "trousers", "shorts", "pants", "scissors", "glasses", "news", "series",
    "species", "chips", "noodles", "grapes", "vegetables", "fruits", "gadgets", "groceries",
    "rupees", "rs", "kms", "kgs",
];

/// Dictionary form of a lowercase word.
pub fn lemmatize(lower: &str) -> String {
    if let Some((_, lemma)) = IRREGULAR.iter().find(|(form, _)| *form == lower) {
        return (*lemma).to_string();
    }
    if INVARIANT.contains(&lower) || lower.len() <= 3 {
        return lower.to_string();
    }
    singularize(lower)
}

/// Strip a regular English plural suffix.
fn singularize(word: &str) -> String {
    // -ies → -y (berries → berry)
    if let Some(stem) = word.strip_suffix("ies") {
        if stem.len() >= 2 {
            return format!("{stem}y");
        }
    }

    // -oes → -o (potatoes → potato)
    if let Some(stem) = word.strip_suffix("oes") {
        return format!("{stem}o");
    }

    // -ches, -shes, -sses, -xes, -zes → drop "es"
    for suffix in ["ches", "shes", "sses", "xes", "zes"] {
        if word.ends_with(suffix) {
            return word[..word.len() - 2].to_string();
        }
    }

    if word.ends_with("ss") || word.ends_with("us") || word.ends_with("is") {
        return word.to_string();
    }

    match word.strip_suffix('s') {
        Some(stem) => stem.to_string(),
        None => word.to_string(),
    }
}
