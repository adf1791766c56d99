//! Quality scoring of rendered text.
//!
//! Estimates linguistic plausibility from a pluggable word-validity
//! capability plus script consistency, and provides a total, deterministic
//! comparison for choosing between candidate renderings.

use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashSet;

/// ASCII-alphabetic token of length >= 2.
static TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z]{2,}").unwrap());

/// Tokens sampled per text; scoring cost stays bounded on huge inputs.
const MAX_TOKENS: usize = 120;

/// Words shorter than this are sampled but not judged.
const MIN_JUDGED_LEN: usize = 3;

/// Margin by which one score must beat the other before it decides the
/// comparison; closer scores fall through to the length preference.
const SCORE_MARGIN: f64 = 0.05;

/// Weight of the valid-word ratio vs. the ascii ratio.
const WORD_WEIGHT: f64 = 0.85;
const ASCII_WEIGHT: f64 = 0.15;

/// Pluggable word-validity capability (e.g. a dictionary lookup).
///
/// A host whose dictionary is unavailable should supply an implementation
/// that returns false for everything; the score then degrades toward 0
/// instead of erroring.
pub trait WordValidator {
    fn is_valid_word(&self, word: &str) -> bool;
}

/// Set-backed validator over lowercase words.
#[derive(Debug, Clone, Default)]
pub struct DictionaryValidator {
    words: FxHashSet<String>,
}

impl DictionaryValidator {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }
}

impl WordValidator for DictionaryValidator {
    fn is_valid_word(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }
}

/// Scores rendered text in [0, 1].
///
/// 0.85 x fraction of sampled alphabetic tokens judged dictionary-valid
/// (tokens of 3+ characters only) + 0.15 x fraction of letter characters
/// that are ASCII.
pub fn score(text: &str, validator: &dyn WordValidator) -> f64 {
    let tokens: Vec<&str> = TOKEN
        .find_iter(text)
        .take(MAX_TOKENS)
        .map(|m| m.as_str())
        .collect();
    let judged: Vec<&str> = tokens
        .iter()
        .copied()
        .filter(|t| t.len() >= MIN_JUDGED_LEN)
        .collect();
    let valid_ratio = if judged.is_empty() {
        0.0
    } else {
        let valid = judged.iter().filter(|t| validator.is_valid_word(t)).count();
        valid as f64 / judged.len() as f64
    };

    let mut letters = 0usize;
    let mut ascii_letters = 0usize;
    for c in text.chars() {
        if c.is_alphabetic() {
            letters += 1;
            if c.is_ascii_alphabetic() {
                ascii_letters += 1;
            }
        }
    }
    let ascii_ratio = if letters == 0 {
        0.0
    } else {
        ascii_letters as f64 / letters as f64
    };

    (WORD_WEIGHT * valid_ratio + ASCII_WEIGHT * ascii_ratio).clamp(0.0, 1.0)
}

/// Picks the better of two candidate texts.
///
/// The higher-scoring text wins when it beats the other by more than the
/// margin; otherwise the longer text wins; exact ties keep the primary.
/// `a_score` lets a caller reuse a score it already computed for `a`.
/// Returns the chosen text together with its score.
pub fn choose_better(
    a: &str,
    a_score: Option<f64>,
    b: &str,
    validator: &dyn WordValidator,
) -> (String, f64) {
    let sa = a_score.unwrap_or_else(|| score(a, validator));
    let sb = score(b, validator);

    if sa - sb > SCORE_MARGIN {
        return (a.to_string(), sa);
    }
    if sb - sa > SCORE_MARGIN {
        return (b.to_string(), sb);
    }
    if b.chars().count() > a.chars().count() {
        (b.to_string(), sb)
    } else {
        (a.to_string(), sa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> DictionaryValidator {
        DictionaryValidator::new(["hello", "world", "table", "the"])
    }

    #[test]
    fn all_valid_words_score_high() {
        let s = score("hello world table", &dict());
        // valid ratio 1.0, ascii ratio 1.0
        assert_eq!(s, 1.0);
    }

    #[test]
    fn gibberish_scores_low() {
        let s = score("qzx vbnk wqrtl", &dict());
        assert!(s <= ASCII_WEIGHT + 1e-9);
    }

    #[test]
    fn short_tokens_are_not_judged() {
        // "ab" is sampled but below the judged length; only "the" counts.
        assert_eq!(score("ab the", &dict()), 1.0);
    }

    #[test]
    fn no_letters_scores_zero() {
        assert_eq!(score("1234 5678", &dict()), 0.0);
    }

    #[test]
    fn empty_dictionary_degrades_not_errors() {
        let none = DictionaryValidator::default();
        let s = score("hello world", &none);
        assert!(s <= ASCII_WEIGHT + 1e-9);
    }

    #[test]
    fn margin_and_length_tiebreak() {
        let v = dict();
        // Clear margin: valid text wins even though it's shorter.
        let (text, _) = choose_better("hello world", None, "qzxqzx vbnkvbnk wqrtl", &v);
        assert_eq!(text, "hello world");
        // Same score: longer text wins.
        let (text, _) = choose_better("hello", None, "hello world", &v);
        assert_eq!(text, "hello world");
        // Exact tie: primary wins.
        let (text, _) = choose_better("hello", None, "world", &v);
        assert_eq!(text, "hello");
    }
}
