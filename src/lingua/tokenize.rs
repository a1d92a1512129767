//! Rule-based tokenizer: the bundled [`LinguisticProvider`].
//!
//! Splits on whitespace, separates punctuation into single-character tokens,
//! and breaks letter/digit runs apart so "10km" becomes `10` + `km` and
//! "3,000rs" becomes `3,000` + `rs`. Underscores stay inside words, which
//! keeps canonical labels such as `electric_car` in one piece.

use super::lemma::lemmatize;
use super::{Doc, LinguisticProvider, LinguisticResult, Token};
use crate::span::Span;
use crate::units::parse_magnitude;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharKind {
    Digit,
    Word,
    Other,
}

fn kind_of(c: char) -> CharKind {
    if c.is_ascii_digit() {
        CharKind::Digit
    } else if c.is_alphabetic() || c == '_' {
        CharKind::Word
    } else {
        CharKind::Other
    }
}

/// Tokenize `text` into lemmatized tokens with byte spans.
pub fn tokenize(text: &str) -> Vec<Token> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (start, c) = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let kind = kind_of(c);
        let mut j = i + 1;
        match kind {
            CharKind::Digit => {
                while j < chars.len() {
                    let d = chars[j].1;
                    let next_is_digit = chars.get(j + 1).is_some_and(|(_, n)| n.is_ascii_digit());
                    if d.is_ascii_digit() {
                        j += 1;
                    } else if (d == '.' || d == ',') && next_is_digit {
                        j += 2;
                    } else {
                        break;
                    }
                }
            }
            CharKind::Word => {
                while j < chars.len() {
                    let d = chars[j].1;
                    let next_is_alpha = chars.get(j + 1).is_some_and(|(_, n)| n.is_alphabetic());
                    if kind_of(d) == CharKind::Word {
                        j += 1;
                    } else if d == '\'' && next_is_alpha {
                        j += 2;
                    } else {
                        break;
                    }
                }
            }
            CharKind::Other => {}
        }

        let end = chars.get(j).map(|(b, _)| *b).unwrap_or(text.len());
        let surface = &text[start..end];
        let lower = surface.to_lowercase();
        let like_num = kind == CharKind::Digit && parse_magnitude(surface).is_some();
        let lemma = if kind == CharKind::Word {
            lemmatize(&lower)
        } else {
            lower.clone()
        };

        tokens.push(Token {
            text: surface.to_string(),
            lower,
            lemma,
            span: Span::new(start, end),
            like_num,
        });
        i = j;
    }

    tokens
}

/// The bundled provider. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleBasedProvider;

impl RuleBasedProvider {
    pub fn new() -> Self {
        Self
    }
}

impl LinguisticProvider for RuleBasedProvider {
    fn name(&self) -> &str {
        "rule-based"
    }

    fn analyze(&self, text: &str) -> LinguisticResult<Doc> {
        Ok(Doc::new(text, tokenize(text)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(input: &str) -> Vec<String> {
        tokenize(input).into_iter().map(|t| t.text).collect()
    }

    #[test]
    fn splits_numbers_from_units() {
        assert_eq!(texts("drove 10km"), ["drove", "10", "km"]);
        assert_eq!(texts("200g chicken"), ["200", "g", "chicken"]);
        assert_eq!(texts("3,000rs"), ["3,000", "rs"]);
        assert_eq!(texts("2.5 kg"), ["2.5", "kg"]);
    }

    #[test]
    fn punctuation_is_its_own_token() {
        assert_eq!(texts("bus, metro."), ["bus", ",", "metro", "."]);
        assert_eq!(texts("t-shirt"), ["t", "-", "shirt"]);
        assert_eq!(texts("₹500"), ["₹", "500"]);
    }

    #[test]
    fn underscores_and_apostrophes_stay_in_words() {
        assert_eq!(texts("took the e_rickshaw"), ["took", "the", "e_rickshaw"]);
        assert_eq!(texts("didn't drive"), ["didn't", "drive"]);
    }

    #[test]
    fn spans_index_the_source() {
        let input = "  ate  200g rice";
        for token in tokenize(input) {
            assert_eq!(&input[token.span.start..token.span.end], token.text);
        }
    }

    #[test]
    fn like_num_only_for_numbers() {
        let tokens = tokenize("spent 3,000 rs on 2 shirts");
        let nums: Vec<_> = tokens.iter().filter(|t| t.like_num).map(|t| t.text.as_str()).collect();
        assert_eq!(nums, ["3,000", "2"]);
    }

    #[test]
    fn words_are_lemmatized() {
        let tokens = tokenize("Ate Eggs");
        assert_eq!(tokens[0].lower, "ate");
        assert_eq!(tokens[0].lemma, "eat");
        assert_eq!(tokens[1].lemma, "egg");
    }

    #[test]
    fn empty_input_has_no_tokens() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   \n\t").is_empty());
    }
}
