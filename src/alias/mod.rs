//! Alias normalization: rewriting colloquial phrases to canonical labels.
//!
//! An alias table maps category → canonical label → variant phrases
//! (`transport.cab = ["taxi", "uber"]`). Before extraction runs, every variant
//! found in the input is replaced by its label, so the extractors only ever
//! have to know the canonical vocabulary of the factor tables.
//!
//! The default table is bundled into the binary from `data/aliases.toml`; an
//! external table can replace it at startup with [`AliasTable::load`].

pub mod error;

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::lingua::{LinguisticProvider, PhraseMatch, PhraseVocab};

pub use error::{AliasError, AliasResult};

const BUNDLED_ALIASES: &str = include_str!("../../data/aliases.toml");

/// Upper bound on rewrite passes per input.
pub const MAX_PASSES: usize = 8;

// ── Alias table ─────────────────────────────────────────────────────────

/// Category → canonical label → variant phrases.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasTable {
    categories: BTreeMap<String, BTreeMap<String, Vec<String>>>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The table compiled into the binary.
    ///
    /// Falls back to an empty table (with a warning) if the bundled TOML
    /// does not parse.
    pub fn bundled() -> Self {
        match Self::from_toml_str(BUNDLED_ALIASES, "<bundled>") {
            Ok(table) => table,
            Err(e) => {
                tracing::warn!("Failed to parse bundled alias table: {e}");
                Self::default()
            }
        }
    }

    /// Parse a TOML table. `origin` names the source in error messages.
    pub fn from_toml_str(content: &str, origin: &str) -> AliasResult<Self> {
        toml::from_str(content).map_err(|e| AliasError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Parse a JSON table. `origin` names the source in error messages.
    pub fn from_json_str(content: &str, origin: &str) -> AliasResult<Self> {
        serde_json::from_str(content).map_err(|e| AliasError::Parse {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Load a table from disk. `.json` files are read as JSON, anything else
    /// as TOML.
    pub fn load(path: &Path) -> AliasResult<Self> {
        let origin = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| AliasError::Io {
            path: origin.clone(),
            source,
        })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&content, &origin)
        } else {
            Self::from_toml_str(&content, &origin)
        }
    }

    /// Add variants for `label`, creating the category and label as needed.
    pub fn insert<I, S>(&mut self, category: &str, label: &str, variants: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories
            .entry(category.to_string())
            .or_default()
            .entry(label.to_string())
            .or_default()
            .extend(variants.into_iter().map(Into::into));
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    /// Canonical labels of `category`, sorted.
    pub fn labels(&self, category: &str) -> Vec<&str> {
        self.categories
            .get(category)
            .map(|labels| labels.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn variants(&self, category: &str, label: &str) -> &[String] {
        self.categories
            .get(category)
            .and_then(|labels| labels.get(label))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of variant phrases.
    pub fn len(&self) -> usize {
        self.categories
            .values()
            .flat_map(|labels| labels.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── Normalization result ────────────────────────────────────────────────

/// A `(category, label)` pair whose variants fired during normalization.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct MatchedLabel {
    pub category: String,
    pub label: String,
}

/// Normalized text plus the labels that were substituted into it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NormalizedText {
    pub text: String,
    pub matched: BTreeSet<MatchedLabel>,
}

impl NormalizedText {
    /// Labels matched in `category`, sorted.
    pub fn labels_in<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.matched
            .iter()
            .filter(move |m| m.category == category)
            .map(|m| m.label.as_str())
    }
}

// ── Normalizer ──────────────────────────────────────────────────────────

/// Validated, compiled alias table.
#[derive(Debug, Clone, Default)]
pub struct AliasNormalizer {
    /// One vocabulary per category, in category name order.
    vocabs: Vec<(String, PhraseVocab)>,
    variant_count: usize,
}

fn lower_tokens(provider: &dyn LinguisticProvider, phrase: &str) -> AliasResult<Vec<String>> {
    let doc = provider.analyze(phrase)?;
    Ok(doc.tokens().iter().map(|t| t.lower.clone()).collect())
}

fn contains_run(haystack: &[String], needle: &[String]) -> bool {
    !needle.is_empty() && haystack.windows(needle.len()).any(|w| w == needle)
}

impl AliasNormalizer {
    /// Validate `table` and compile one phrase vocabulary per category.
    ///
    /// Rejects empty variants, labels that are themselves variants, and
    /// labels containing a variant as a word sequence. Those last two would
    /// let a rewritten label be rewritten again.
    pub fn compile(table: &AliasTable, provider: &dyn LinguisticProvider) -> AliasResult<Self> {
        let mut labels: Vec<(&str, &str, Vec<String>)> = Vec::new();
        let mut variants: Vec<(&str, &str, Vec<String>)> = Vec::new();

        for (category, entries) in &table.categories {
            for (label, phrases) in entries {
                labels.push((category.as_str(), label.as_str(), lower_tokens(provider, label)?));
                for phrase in phrases {
                    let tokens = lower_tokens(provider, phrase)?;
                    if tokens.is_empty() {
                        return Err(AliasError::EmptyVariant {
                            category: category.clone(),
                            label: label.clone(),
                        });
                    }
                    variants.push((label.as_str(), phrase.as_str(), tokens));
                }
            }
        }

        for (category, label, label_tokens) in &labels {
            for (owner, phrase, variant_tokens) in &variants {
                if label_tokens == variant_tokens {
                    return Err(AliasError::LabelIsVariant {
                        category: category.to_string(),
                        label: label.to_string(),
                        owner: owner.to_string(),
                    });
                }
                if contains_run(label_tokens, variant_tokens) {
                    return Err(AliasError::LabelContainsVariant {
                        category: category.to_string(),
                        label: label.to_string(),
                        variant: phrase.to_string(),
                    });
                }
            }
        }

        let mut vocabs = Vec::with_capacity(table.categories.len());
        for (category, entries) in &table.categories {
            let pairs: Vec<(String, Vec<String>)> = entries
                .iter()
                .map(|(label, phrases)| (label.clone(), phrases.clone()))
                .collect();
            vocabs.push((category.clone(), provider.compile_vocab(&pairs)?));
        }

        Ok(Self {
            vocabs,
            variant_count: variants.len(),
        })
    }

    /// Number of compiled variant phrases.
    pub fn variant_count(&self) -> usize {
        self.variant_count
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.vocabs.iter().map(|(category, _)| category.as_str())
    }

    /// Replace every variant in `text` with its canonical label.
    ///
    /// Matches from all categories are merged; where they overlap the
    /// leftmost wins, then the longest, then the first category by name.
    /// Passes repeat until nothing is left to rewrite.
    pub fn normalize(
        &self,
        provider: &dyn LinguisticProvider,
        text: &str,
    ) -> AliasResult<NormalizedText> {
        let mut current = text.to_string();
        let mut matched = BTreeSet::new();

        for pass in 0..MAX_PASSES {
            let doc = provider.analyze(&current)?;
            let mut hits: Vec<(usize, PhraseMatch)> = Vec::new();
            for (index, (_, vocab)) in self.vocabs.iter().enumerate() {
                if vocab.is_empty() {
                    continue;
                }
                hits.extend(
                    provider
                        .match_phrases(&doc, vocab)?
                        .into_iter()
                        .map(|hit| (index, hit)),
                );
            }

            if hits.is_empty() {
                return Ok(NormalizedText {
                    text: current,
                    matched,
                });
            }

            hits.sort_by(|(ai, a), (bi, b)| {
                a.span
                    .start
                    .cmp(&b.span.start)
                    .then(b.span.len().cmp(&a.span.len()))
                    .then(ai.cmp(bi))
            });

            let mut rewritten = String::with_capacity(current.len());
            let mut cursor = 0;
            for (index, hit) in hits {
                if hit.span.start < cursor {
                    continue;
                }
                let category = &self.vocabs[index].0;
                tracing::debug!(
                    pass,
                    category = %category,
                    label = %hit.label,
                    variant = &current[hit.span.start..hit.span.end],
                    "alias rewrite"
                );
                rewritten.push_str(&current[cursor..hit.span.start]);
                rewritten.push_str(&hit.label);
                cursor = hit.span.end;
                matched.insert(MatchedLabel {
                    category: category.clone(),
                    label: hit.label,
                });
            }
            rewritten.push_str(&current[cursor..]);
            current = rewritten;
        }

        tracing::warn!(
            passes = MAX_PASSES,
            "alias normalization did not settle; returning last rewrite"
        );
        Ok(NormalizedText {
            text: current,
            matched,
        })
    }
}
