//! Content analysis: language detection, structural statistics and key phrases.
//!
//! Everything in this module is a pure function of its input.

mod language;
mod lexical;
pub mod stopwords;

pub use language::detect;
pub use lexical::{analyze_structure, extract_key_phrases, MAX_KEY_PHRASES, WORDS_PER_MINUTE};

pub(crate) use lexical::split_on_terminals;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

static WORD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b\w+\b").expect("valid word regex"));

/// Languages the detector can recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Es,
    En,
    #[default]
    Unknown,
}

impl std::str::FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "es" | "spanish" | "español" => Ok(Language::Es),
            "en" | "english" => Ok(Language::En),
            "unknown" => Ok(Language::Unknown),
            _ => Err(format!("Unknown language: {}", s)),
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Language::Es => write!(f, "es"),
            Language::En => write!(f, "en"),
            Language::Unknown => write!(f, "unknown"),
        }
    }
}

/// Structural statistics of a text.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextStats {
    /// Whitespace-delimited tokens.
    pub word_count: usize,
    /// Runs of terminal punctuation.
    pub sentence_count: usize,
    /// Non-empty blocks separated by a blank line.
    pub paragraph_count: usize,
    /// `word_count / 200`.
    pub reading_time_minutes: f64,
}

/// Result of analyzing one text.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Length of the input in characters.
    pub original_length: usize,
    #[serde(flatten)]
    pub stats: TextStats,
    pub language: Language,
    /// At most five salient sentences, in document order.
    pub key_phrases: Vec<String>,
}

impl AnalysisResult {
    /// Zeroed analysis used for empty or whitespace-only input.
    pub fn empty(original_length: usize) -> Self {
        Self {
            original_length,
            ..Self::default()
        }
    }
}

/// Run statistics, language detection and key-phrase extraction on `text`.
pub fn analyze(text: &str) -> AnalysisResult {
    if text.trim().is_empty() {
        return AnalysisResult::empty(char_len(text));
    }

    let language = detect(text);
    AnalysisResult {
        original_length: char_len(text),
        stats: analyze_structure(text),
        language,
        key_phrases: extract_key_phrases(text, language),
    }
}

/// Length in characters rather than bytes.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Lowercase word tokens.
pub(crate) fn words(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    WORD.find_iter(&lower).map(|m| m.as_str().to_string()).collect()
}

/// Lowercase word tokens that carry content: not stopwords, longer than three characters.
pub(crate) fn content_words(text: &str, stop: &HashSet<&'static str>) -> Vec<String> {
    words(text)
        .into_iter()
        .filter(|w| char_len(w) > 3 && !stop.contains(w.as_str()))
        .collect()
}

/// Content-word frequencies, most frequent first.
///
/// Ties keep first-occurrence order so results are deterministic.
pub(crate) fn word_frequencies(text: &str, stop: &HashSet<&'static str>) -> Vec<(String, usize)> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut counts: Vec<(String, usize)> = Vec::new();

    for word in content_words(text, stop) {
        match index.get(&word) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(word.clone(), counts.len());
                counts.push((word, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Trimmed, non-empty blocks separated by a blank line.
pub(crate) fn paragraphs(text: &str) -> Vec<&str> {
    text.split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}
