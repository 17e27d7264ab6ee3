//! Paragraph-scoring extractive summarizer.

use super::{simple, truncate_at_sentence, SummaryMethod};
use crate::analysis::{char_len, content_words, paragraphs, stopwords, word_frequencies, words, Language};
use std::collections::HashSet;
use tracing::debug;

/// Paragraphs at or below this many characters are never selected.
const MIN_PARAGRAPH_CHARS: usize = 50;

/// Frequent body words added to the important-word set.
const FREQUENT_WORDS: usize = 10;

/// Selection stops once the summary reaches this share of `max_length`.
const FILL_RATIO: f64 = 0.8;

/// Extractive summary text together with the strategy that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractiveSummary {
    pub text: String,
    pub method: SummaryMethod,
}

/// Summarize `text` by scoring its paragraphs.
///
/// Texts without at least two blank-line separated blocks, or without any
/// paragraph longer than 50 characters, are handed to the simple summarizer.
/// Selected paragraphs are emitted in document order.
pub fn summarize_traditional(
    text: &str,
    title: Option<&str>,
    language: Language,
    key_phrases: &[String],
    max_length: usize,
) -> ExtractiveSummary {
    let blocks = paragraphs(text);
    let candidates: Vec<&str> = blocks
        .iter()
        .copied()
        .filter(|p| char_len(p) > MIN_PARAGRAPH_CHARS)
        .collect();

    if blocks.len() < 2 || candidates.is_empty() {
        debug!(
            "Not enough paragraph structure ({} blocks, {} candidates), using simple summary",
            blocks.len(),
            candidates.len()
        );
        return ExtractiveSummary {
            text: simple::summarize_simple(text, max_length),
            method: SummaryMethod::SimpleFallback,
        };
    }

    let important = important_words(text, title, language);
    let phrases: Vec<String> = key_phrases
        .iter()
        .map(|p| p.to_lowercase())
        .filter(|p| !p.trim().is_empty())
        .collect();

    let scores: Vec<u32> = candidates
        .iter()
        .enumerate()
        .map(|(i, p)| score_paragraph(p, i, candidates.len(), &important, &phrases))
        .collect();

    let selected = select(&candidates, &scores, max_length);
    debug!("Selected paragraphs {:?} with scores {:?}", selected, scores);

    let summary = selected
        .iter()
        .map(|&i| candidates[i])
        .collect::<Vec<_>>()
        .join("\n\n");

    ExtractiveSummary {
        text: truncate_at_sentence(&summary, max_length),
        method: SummaryMethod::TraditionalExtractive,
    }
}

/// Title words plus the most frequent body words.
fn important_words(text: &str, title: Option<&str>, language: Language) -> HashSet<String> {
    let stop = stopwords::for_language(language);

    let mut important: HashSet<String> = title
        .map(|t| content_words(t, stop).into_iter().collect())
        .unwrap_or_default();

    important.extend(
        word_frequencies(text, stop)
            .into_iter()
            .take(FREQUENT_WORDS)
            .map(|(word, _)| word),
    );

    important
}

fn score_paragraph(
    paragraph: &str,
    index: usize,
    total: usize,
    important: &HashSet<String>,
    key_phrases: &[String],
) -> u32 {
    let paragraph_words: HashSet<String> = words(paragraph).into_iter().collect();
    let mut score = 2 * paragraph_words.intersection(important).count() as u32;

    if index == 0 {
        score += 3;
    } else if index == total - 1 {
        score += 2;
    } else if (index as f64) < total as f64 * 0.3 {
        score += 1;
    }

    let len = char_len(paragraph);
    if (100..=300).contains(&len) {
        score += 1;
    }

    let lower = paragraph.to_lowercase();
    if key_phrases.iter().any(|phrase| lower.contains(phrase.as_str())) {
        score += 2;
    }

    score
}

/// Indices of the paragraphs to keep, in document order.
fn select(candidates: &[&str], scores: &[u32], max_length: usize) -> Vec<usize> {
    let mut ranked: Vec<usize> = (0..candidates.len()).collect();
    // Stable: equal scores keep document order.
    ranked.sort_by(|&a, &b| scores[b].cmp(&scores[a]));

    let mut selected = Vec::new();
    let mut length = 0usize;

    for i in ranked {
        let len = char_len(candidates[i]);
        if length + len <= max_length {
            selected.push(i);
            length += len;
        }
        if length as f64 >= max_length as f64 * FILL_RATIO {
            break;
        }
    }

    match selected.len() {
        0 => selected.push(0),
        1 => {
            if let Some(extra) = (0..candidates.len()).find(|i| !selected.contains(i)) {
                if length + char_len(candidates[extra]) <= max_length {
                    selected.push(extra);
                }
            }
        }
        _ => {}
    }

    selected.sort_unstable();
    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn para(topic: &str, filler: &str, len: usize) -> String {
        let mut text = format!("{} ", topic);
        while char_len(&text) < len {
            text.push_str(filler);
            text.push(' ');
        }
        let mut text = text.trim_end().to_string();
        text.push('.');
        text
    }

    /// `topic`, a padding word, and a full stop: exactly `len` characters.
    fn exact(topic: &str, len: usize) -> String {
        let mut text = format!("{} ", topic);
        while char_len(&text) < len - 1 {
            text.push('z');
        }
        text.push('.');
        text
    }

    #[test]
    fn test_single_block_uses_simple_fallback() {
        let text = "Only one block of text here, long enough to matter for the summarizer. \
                    It has two sentences in it.";
        let out = summarize_traditional(text, None, Language::En, &[], 500);
        assert_eq!(out.method, SummaryMethod::SimpleFallback);
        assert!(!out.text.is_empty());
    }

    #[test]
    fn test_short_paragraphs_use_simple_fallback() {
        let text = "Tiny one.\n\nTiny two.\n\nTiny three.";
        let out = summarize_traditional(text, None, Language::En, &[], 500);
        assert_eq!(out.method, SummaryMethod::SimpleFallback);
    }

    #[test]
    fn test_summary_respects_max_length() {
        let text = (0..12)
            .map(|i| para(&format!("Section {} about satellites", i), "orbit telemetry", 220))
            .collect::<Vec<_>>()
            .join("\n\n");

        for max in [60, 150, 300, 500, 1000] {
            let out = summarize_traditional(&text, Some("Satellites"), Language::En, &[], max);
            assert_eq!(out.method, SummaryMethod::TraditionalExtractive);
            assert!(char_len(&out.text) <= max, "max {} got {}", max, char_len(&out.text));
            assert!(!out.text.is_empty());
        }
    }

    #[test]
    fn test_paragraphs_restored_to_document_order() {
        let first = para("Opening remarks on the harbor project", "general background", 120);
        let middle = para("It is so", "and it was the one of the two", 120);
        let last = para("Harbor project budget harbor project timeline", "harbor project", 120);
        let text = format!("{}\n\n{}\n\n{}", first, middle, last);

        let out = summarize_traditional(&text, Some("Harbor project"), Language::En, &[], 320);
        let first_pos = out.text.find("Opening remarks");
        let last_pos = out.text.find("Harbor project budget");
        assert!(first_pos.is_some() && last_pos.is_some());
        assert!(first_pos < last_pos);
        assert!(!out.text.contains("It is so"));
    }

    #[test]
    fn test_forced_first_paragraph_when_nothing_fits() {
        let a = para("Alpha paragraph", "words words", 200);
        let b = para("Beta paragraph", "more words", 200);
        let text = format!("{}\n\n{}", a, b);

        let out = summarize_traditional(&text, None, Language::En, &[], 80);
        assert!(out.text.starts_with("Alpha paragraph"));
        assert!(char_len(&out.text) <= 80);
    }

    #[test]
    fn test_second_paragraph_added_after_early_stop() {
        let a = exact("Alpha rockets rockets", 260);
        let b = exact("Beta note", 55);
        let c = exact("Gamma other", 400);
        let text = format!("{}\n\n{}\n\n{}", a, b, c);

        // `a` alone passes 80% of the budget, which ends the greedy pass;
        // `b` still fits and is added as the second paragraph.
        let out = summarize_traditional(&text, Some("Rockets"), Language::En, &[], 320);
        assert_eq!(out.text, format!("{}\n\n{}", a, b));
    }

    #[test]
    fn test_key_phrase_boosts_paragraph() {
        let d = para("Closing paragraph mentions the lighthouse keeper", "quiet evening", 120);
        let phrases = vec!["mentions the lighthouse keeper".to_string()];

        let with = score_paragraph(&d, 3, 4, &HashSet::new(), &phrases);
        let without = score_paragraph(&d, 3, 4, &HashSet::new(), &[]);
        assert_eq!(with, 2 + 1 + 2);
        assert_eq!(with - without, 2);
    }

    #[test]
    fn test_position_scores() {
        let important = HashSet::new();
        let p = "x".repeat(60);
        assert_eq!(score_paragraph(&p, 0, 10, &important, &[]), 3);
        assert_eq!(score_paragraph(&p, 9, 10, &important, &[]), 2);
        assert_eq!(score_paragraph(&p, 2, 10, &important, &[]), 1);
        assert_eq!(score_paragraph(&p, 3, 10, &important, &[]), 0);
    }
}
