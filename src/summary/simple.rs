//! Fallback summarizer for texts with little or no paragraph structure.

use super::{truncate_at_sentence, truncate_at_word};
use crate::analysis::{char_len, paragraphs};
use regex::Regex;
use std::sync::LazyLock;

/// Paragraphs at or below this many characters are skipped.
const MIN_PARAGRAPH_CHARS: usize = 50;

/// Sentences at or below this many characters are skipped.
const MIN_SENTENCE_CHARS: usize = 20;

/// Maximum number of sentences in a sentence-based summary.
const MAX_SENTENCES: usize = 3;

static SENTENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^.!?]+[.!?]*").expect("valid sentence regex"));

/// Summarize by taking the leading material of `text`.
///
/// With two or more paragraphs, the substantial ones are taken in order until
/// `max_length` is reached. Otherwise up to three sentences are taken. Never
/// returns more than `max_length` characters.
pub fn summarize_simple(text: &str, max_length: usize) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let blocks = paragraphs(text);
    if blocks.len() >= 2 {
        let summary = leading_paragraphs(&blocks, max_length);
        if !summary.is_empty() {
            return summary;
        }
    }

    leading_sentences(text, max_length)
}

fn leading_paragraphs(blocks: &[&str], max_length: usize) -> String {
    let mut parts = Vec::new();
    let mut total = 0usize;

    for paragraph in blocks {
        if total >= max_length {
            break;
        }
        let len = char_len(paragraph);
        if len > MIN_PARAGRAPH_CHARS {
            parts.push(*paragraph);
            total += len;
        }
    }

    truncate_at_sentence(&parts.join("\n\n"), max_length)
}

fn leading_sentences(text: &str, max_length: usize) -> String {
    let sentences: Vec<&str> = SENTENCE
        .find_iter(text)
        .map(|m| m.as_str().trim())
        .filter(|s| char_len(s) > MIN_SENTENCE_CHARS)
        .collect();

    let Some(first) = sentences.first() else {
        return truncate_at_word(text.trim(), max_length);
    };

    let mut summary = String::new();
    for sentence in sentences.iter().take(MAX_SENTENCES) {
        let separator = usize::from(!summary.is_empty());
        if char_len(&summary) + separator + char_len(sentence) > max_length {
            break;
        }
        if separator == 1 {
            summary.push(' ');
        }
        summary.push_str(sentence);
    }

    if summary.is_empty() {
        truncate_at_word(first, max_length)
    } else {
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(summarize_simple("", 100), "");
        assert_eq!(summarize_simple(" \n\n \t", 100), "");
    }

    #[test]
    fn test_sentences_capped_at_three() {
        let text = "The first sentence is long enough to count. \
                    The second sentence is also long enough. \
                    The third sentence continues the same idea. \
                    The fourth sentence should never appear here.";
        let summary = summarize_simple(text, 1000);
        assert!(summary.contains("third sentence"));
        assert!(!summary.contains("fourth"));
        assert!(summary.ends_with('.'));
    }

    #[test]
    fn test_sentences_respect_budget() {
        let text = "The first sentence is long enough to count. \
                    The second sentence is also long enough.";
        let summary = summarize_simple(text, 50);
        assert_eq!(summary, "The first sentence is long enough to count.");
    }

    #[test]
    fn test_first_sentence_cut_when_nothing_fits() {
        let text = "Hola mundo. Este es un ejemplo de texto de prueba con varias palabras repetidas repetidas repetidas.";
        let summary = summarize_simple(text, 50);
        assert!(!summary.is_empty());
        assert!(char_len(&summary) <= 50);
        assert!(summary.starts_with("Este es un ejemplo"));
    }

    #[test]
    fn test_short_text_without_long_sentences() {
        assert_eq!(summarize_simple("Hello world.", 100), "Hello world.");
    }

    #[test]
    fn test_leading_paragraphs() {
        let p1 = "A paragraph that is comfortably longer than fifty characters in total.";
        let p2 = "short";
        let p3 = "Another paragraph that is comfortably longer than fifty characters.";
        let text = format!("{}\n\n{}\n\n{}", p1, p2, p3);

        let summary = summarize_simple(&text, 1000);
        assert_eq!(summary, format!("{}\n\n{}", p1, p3));
    }

    #[test]
    fn test_leading_paragraphs_truncated() {
        let p = "Sentence one is here. Sentence two follows it closely. ".repeat(4);
        let text = format!("{}\n\n{}", p.trim(), p.trim());
        let summary = summarize_simple(&text, 120);
        assert!(char_len(&summary) <= 120);
        assert!(summary.ends_with('.'));
    }

    #[test]
    fn test_long_unbroken_text_uses_sentences() {
        let sentence = "Streams of news arrive every morning from many feeds. ";
        let text = sentence.repeat(400);
        assert!(char_len(&text) >= 20_000);

        let summary = summarize_simple(&text, 500);
        assert_eq!(summary.matches('.').count(), 3);
        assert!(char_len(&summary) <= 500);
    }
}
