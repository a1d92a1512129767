//! Linguistic provider interface: tokens, lemmas and phrase matching.
//!
//! The extraction engine consumes language analysis through the
//! [`LinguisticProvider`] trait and never depends on a particular NLP stack.
//! [`RuleBasedProvider`] is the bundled implementation: a span-tracking
//! tokenizer with a small English lemmatizer, enough for alias matching and
//! the fallback detectors.

pub mod error;
pub mod lemma;
pub mod tokenize;

use crate::span::Span;

pub use error::{LinguisticError, LinguisticResult};
pub use tokenize::RuleBasedProvider;

/// One token of analyzed text.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// Surface text as it appears in the input.
    pub text: String,
    /// Lowercased surface text.
    pub lower: String,
    /// Lowercase dictionary form.
    pub lemma: String,
    /// Byte range in the analyzed text.
    pub span: Span,
    /// Whether the token reads as a number ("12", "3,000", "0.5").
    pub like_num: bool,
}

/// Analyzed text: the source plus its tokens in order.
#[derive(Debug, Clone)]
pub struct Doc {
    text: String,
    tokens: Vec<Token>,
}

impl Doc {
    pub fn new(text: impl Into<String>, tokens: Vec<Token>) -> Self {
        Self {
            text: text.into(),
            tokens,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Token at `index + offset`, if it exists.
    pub fn nbor(&self, index: usize, offset: isize) -> Option<&Token> {
        let target = index.checked_add_signed(offset)?;
        self.tokens.get(target)
    }
}

/// A label together with the lowercase token sequences that stand for it.
#[derive(Debug, Clone)]
pub struct PhraseEntry {
    pub label: String,
    pub patterns: Vec<Vec<String>>,
}

/// Compiled phrase list for [`LinguisticProvider::match_phrases`].
#[derive(Debug, Clone, Default)]
pub struct PhraseVocab {
    entries: Vec<PhraseEntry>,
}

impl PhraseVocab {
    pub fn new(entries: Vec<PhraseEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PhraseEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Longest pattern starting at token `start`, first entry wins ties.
    fn longest_at<'a>(&'a self, tokens: &[Token], start: usize) -> Option<(&'a str, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for entry in &self.entries {
            for pattern in &entry.patterns {
                let len = pattern.len();
                if len == 0 || start + len > tokens.len() {
                    continue;
                }
                let hit = tokens[start..start + len]
                    .iter()
                    .zip(pattern)
                    .all(|(token, word)| token.lower == *word);
                if hit && best.is_none_or(|(_, best_len)| len > best_len) {
                    best = Some((entry.label.as_str(), len));
                }
            }
        }
        best
    }

    /// Greedy leftmost-longest scan; returned matches never overlap.
    pub fn find_in(&self, doc: &Doc) -> Vec<PhraseMatch> {
        let tokens = doc.tokens();
        let mut matches = Vec::new();
        let mut i = 0;
        while i < tokens.len() {
            match self.longest_at(tokens, i) {
                Some((label, len)) => {
                    matches.push(PhraseMatch {
                        label: label.to_string(),
                        span: Span::new(tokens[i].span.start, tokens[i + len - 1].span.end),
                        token_start: i,
                        token_end: i + len,
                    });
                    i += len;
                }
                None => i += 1,
            }
        }
        matches
    }
}

/// A phrase-list hit.
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseMatch {
    pub label: String,
    /// Byte range in the doc text.
    pub span: Span,
    /// Token range `[token_start, token_end)`.
    pub token_start: usize,
    pub token_end: usize,
}

/// Tokenizer + lemmatizer + phrase matcher consumed by the engine.
///
/// Implementations must be stateless per call; one provider instance is
/// shared by every analysis the engine runs.
pub trait LinguisticProvider: Send + Sync {
    /// Short identifier used in diagnostics.
    fn name(&self) -> &str;

    /// Tokenize and lemmatize `text`.
    fn analyze(&self, text: &str) -> LinguisticResult<Doc>;

    /// Turn `(label, phrases)` pairs into a matchable vocabulary.
    ///
    /// Phrases are tokenized with [`analyze`](Self::analyze) so that they
    /// line up with document tokens; matching is on lowercase forms.
    fn compile_vocab(&self, entries: &[(String, Vec<String>)]) -> LinguisticResult<PhraseVocab> {
        let mut compiled = Vec::with_capacity(entries.len());
        for (label, phrases) in entries {
            let mut patterns = Vec::with_capacity(phrases.len());
            for phrase in phrases {
                let doc = self.analyze(phrase)?;
                patterns.push(doc.tokens().iter().map(|t| t.lower.clone()).collect());
            }
            compiled.push(PhraseEntry {
                label: label.clone(),
                patterns,
            });
        }
        Ok(PhraseVocab::new(compiled))
    }

    /// All non-overlapping vocabulary hits in `doc`.
    fn match_phrases(&self, doc: &Doc, vocab: &PhraseVocab) -> LinguisticResult<Vec<PhraseMatch>> {
        Ok(vocab.find_in(doc))
    }
}
