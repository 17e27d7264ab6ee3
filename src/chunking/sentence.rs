//! Sentence-aligned sliding-window chunker.

use super::{TextChunk, TokenBudget, SAFETY_MARGIN_TOKENS};
use crate::error::{BriefcastError, Result};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static SENTENCE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?]\s+").expect("valid sentence end regex"));

/// Split `text` into chunks that each fit next to `prompt` within `budget`.
///
/// Windows are cut after the last sentence end they contain past the previous
/// cut, or hard-cut at the window edge when there is none. The next window
/// starts `overlap` characters before the cut but always advances by at least
/// half of the chunk just emitted, and never past the cut, so chunks cover the
/// text without gaps and every chunk ends after its predecessor.
pub fn split_into_chunks(text: &str, prompt: &str, budget: &TokenBudget) -> Result<Vec<TextChunk>> {
    let prompt_tokens = budget.estimate_tokens(prompt);
    let available = budget
        .max_context_tokens
        .checked_sub(budget.max_output_tokens + prompt_tokens + SAFETY_MARGIN_TOKENS)
        .unwrap_or(0);

    let chunk_chars = (available as f64 * budget.chars_per_token) as usize;
    if chunk_chars == 0 {
        return Err(BriefcastError::ContextBudgetExceeded(format!(
            "prompt uses ~{} tokens, leaving no room for text in a {}-token context",
            prompt_tokens, budget.max_context_tokens
        )));
    }
    let overlap_chars = (budget.overlap_tokens as f64 * budget.chars_per_token) as usize;

    // Byte offset of every character, plus the end of the text.
    let offsets: Vec<usize> = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .collect();
    let total = offsets.len() - 1;

    let mut spans: Vec<(usize, usize)> = Vec::new();
    let mut start = 0usize;
    let mut prev_cut = 0usize;

    while start < total {
        let end = start + chunk_chars;
        if end >= total {
            spans.push((start, total));
            break;
        }

        let window = &text[offsets[start]..offsets[end]];
        // Sentence ends inside the overlap were already used by the previous chunk.
        let cut = SENTENCE_END
            .find_iter(window)
            .last()
            .map(|m| start + window[..m.end()].chars().count())
            .filter(|&cut| cut > prev_cut)
            .unwrap_or(end);
        spans.push((start, cut));
        prev_cut = cut;

        let min_step = ((cut - start) / 2).max(1);
        start = cut
            .saturating_sub(overlap_chars)
            .max(start + min_step)
            .min(cut);
    }

    let is_partial = spans.len() > 1;
    debug!(
        "Split {} chars into {} chunks (window {} chars, overlap {} chars)",
        total,
        spans.len(),
        chunk_chars,
        overlap_chars
    );

    Ok(spans
        .into_iter()
        .enumerate()
        .map(|(index, (start, end))| TextChunk {
            text: text[offsets[start]..offsets[end]].to_string(),
            is_partial,
            index,
            start_char: start,
            end_char: end,
        })
        .collect())
}
