//! Stopword-ratio language detection.

use super::{stopwords, words, Language};

/// Minimum share of stopwords before a language is claimed.
const MIN_STOPWORD_RATIO: f64 = 0.05;

/// Classify `text` as Spanish, English or unknown.
///
/// Spanish wins only when its stopword ratio beats English and clears the
/// threshold; English only needs to clear the threshold.
pub fn detect(text: &str) -> Language {
    let tokens = words(text);
    if tokens.is_empty() {
        return Language::Unknown;
    }

    let total = tokens.len() as f64;
    let spanish = tokens
        .iter()
        .filter(|w| stopwords::spanish().contains(w.as_str()))
        .count() as f64
        / total;
    let english = tokens
        .iter()
        .filter(|w| stopwords::english().contains(w.as_str()))
        .count() as f64
        / total;

    if spanish > english && spanish > MIN_STOPWORD_RATIO {
        Language::Es
    } else if english > MIN_STOPWORD_RATIO {
        Language::En
    } else {
        Language::Unknown
    }
}
