//! Structural statistics and key-phrase extraction.

use super::{char_len, paragraphs, stopwords, word_frequencies, words, Language, TextStats};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

/// Average reading speed in words per minute.
pub const WORDS_PER_MINUTE: f64 = 200.0;

/// Maximum number of key phrases returned.
pub const MAX_KEY_PHRASES: usize = 5;

/// Number of frequent words a key phrase may draw on.
const IMPORTANT_WORDS: usize = 15;

static TERMINALS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]+").expect("valid terminal punctuation regex"));

/// Count words, sentences and paragraphs and estimate reading time.
pub fn analyze_structure(text: &str) -> TextStats {
    let word_count = text.split_whitespace().count();

    TextStats {
        word_count,
        sentence_count: TERMINALS.find_iter(text).count(),
        paragraph_count: paragraphs(text).len(),
        reading_time_minutes: word_count as f64 / WORDS_PER_MINUTE,
    }
}

/// Split on runs of terminal punctuation, dropping the punctuation itself.
pub(crate) fn split_on_terminals(text: &str) -> impl Iterator<Item = &str> {
    TERMINALS.split(text).map(str::trim)
}

/// Pick up to five source sentences that mention the text's frequent words.
///
/// Sentences are returned in document order. Only sentences strictly
/// between 20 and 150 characters qualify.
pub fn extract_key_phrases(text: &str, language: Language) -> Vec<String> {
    let stop = stopwords::for_language(language);

    let important: HashSet<String> = word_frequencies(text, stop)
        .into_iter()
        .take(IMPORTANT_WORDS)
        .filter(|(_, count)| *count > 1)
        .map(|(word, _)| word)
        .collect();

    if important.is_empty() {
        return Vec::new();
    }

    split_on_terminals(text)
        .filter(|sentence| {
            let len = char_len(sentence);
            len > 20 && len < 150
        })
        .filter(|sentence| words(sentence).iter().any(|w| important.contains(w)))
        .take(MAX_KEY_PHRASES)
        .map(str::to_string)
        .collect()
}
