//! Tests for quality scoring and candidate selection.

use layline_core::{DictionaryValidator, WordValidator, choose_better, score};

fn dict() -> DictionaryValidator {
    DictionaryValidator::new(["the", "quick", "brown", "fox", "hello", "world"])
}

#[test]
fn scores_stay_in_unit_interval() {
    let v = dict();
    for text in [
        "",
        "the quick brown fox",
        "zzzz qqqq",
        "12345",
        "héllo wörld",
        "a b c d e",
    ] {
        let s = score(text, &v);
        assert!((0.0..=1.0).contains(&s), "score({text:?}) = {s}");
    }
}

#[test]
fn dictionary_text_outscores_gibberish() {
    let v = dict();
    assert!(score("the quick brown fox", &v) > score("eht kciuq nworb xof", &v));
}

#[test]
fn case_is_ignored_by_the_dictionary() {
    let v = dict();
    assert_eq!(score("HELLO World", &v), score("hello world", &v));
}

#[test]
fn non_ascii_letters_lower_the_script_component() {
    let v = dict();
    // Same dictionary hits, but the accented variant has non-ASCII letters.
    assert!(score("hello world", &v) > score("hello wörld", &v));
}

#[test]
fn choose_better_agrees_with_score() {
    let v = dict();
    let good = "the quick brown fox";
    let bad = "qzxw vbnk trlp";

    let (text, s) = choose_better(good, None, bad, &v);
    assert_eq!(text, good);
    assert_eq!(s, score(good, &v));

    // Symmetric case: the better text also wins from the second slot.
    let (text, s) = choose_better(bad, None, good, &v);
    assert_eq!(text, good);
    assert_eq!(s, score(good, &v));
}

#[test]
fn precomputed_score_matches_fresh_computation() {
    let v = dict();
    let a = "hello world";
    let b = "qzxw vbnk";
    let fresh = choose_better(a, None, b, &v);
    let cached = choose_better(a, Some(score(a, &v)), b, &v);
    assert_eq!(fresh, cached);
}

#[test]
fn near_tie_prefers_longer_text() {
    let v = dict();
    let (text, _) = choose_better("hello world", None, "hello brown world", &v);
    assert_eq!(text, "hello brown world");
}

#[test]
fn exact_tie_keeps_the_first_candidate() {
    let v = dict();
    let (text, _) = choose_better("hello", None, "world", &v);
    assert_eq!(text, "hello");
}

#[test]
fn custom_validator_plugs_in() {
    struct Vowelish;
    impl WordValidator for Vowelish {
        fn is_valid_word(&self, word: &str) -> bool {
            word.chars().any(|c| "aeiou".contains(c))
        }
    }
    assert!(score("ocean", &Vowelish) > score("rhythm", &Vowelish));
}
