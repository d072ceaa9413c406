use lazy_static::lazy_static;
use regex::Regex;

use super::weight::UNIT_TOKENS;

const STOPWORDS: &[&str] = &[
    "with", "and", "or", "the", "a", "an", "in", "on", "at", "to", "for", "of",
];

const PORTION_WORDS: &[&str] = &[
    "extra", "large", "small", "medium", "big", "regular", "half", "bowl", "plate", "serving",
    "portion",
];

lazy_static! {
    static ref QUANTITY_RE: Regex = Regex::new(&format!(
        r"(?i)\d+(?:\.\d+)?\s*(?:{})s?\b",
        UNIT_TOKENS.join("|")
    ))
    .expect("quantity pattern is valid");
    static ref STOPWORD_RE: Regex =
        Regex::new(&format!(r"(?i)\b(?:{})\b", STOPWORDS.join("|"))).expect("stopword pattern is valid");
    static ref PORTION_RE: Regex =
        Regex::new(&format!(r"(?i)\b(?:{})s?\b", PORTION_WORDS.join("|")))
            .expect("portion pattern is valid");
    static ref PUNCTUATION_RE: Regex = Regex::new(r"[^\w\s]").expect("punctuation pattern is valid");
    static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").expect("whitespace pattern is valid");
}

/// Reduce a free-text description to the key used for table matching:
/// quantities, stopwords, portion words and punctuation removed, lowercase,
/// single-spaced. May return an empty string.
pub fn normalize(text: &str) -> String {
    let text = QUANTITY_RE.replace_all(text, " ");
    let text = STOPWORD_RE.replace_all(&text, " ");
    let text = PORTION_RE.replace_all(&text, " ");
    let text = PUNCTUATION_RE.replace_all(&text, "");
    let text = WHITESPACE_RE.replace_all(&text, " ");
    text.to_lowercase().trim().to_string()
}
