//! Token-budget chunking for the external summarizer.
//!
//! Token counts are estimated from character counts with a fixed ratio; no
//! tokenizer is involved.

mod sentence;

pub use sentence::split_into_chunks;

use crate::analysis::char_len;
use crate::config::SummarizerSettings;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Tokens held back from every chunk to absorb estimation error.
pub const SAFETY_MARGIN_TOKENS: usize = 100;

/// A contiguous slice of the original text sized for one summarizer call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextChunk {
    pub text: String,
    /// True when the chunk is a fragment of a longer text.
    pub is_partial: bool,
    /// Position of the chunk, left to right.
    pub index: usize,
    /// Character offset of the first character in the original text.
    pub start_char: usize,
    /// Character offset one past the last character in the original text.
    pub end_char: usize,
}

impl TextChunk {
    /// Length of this chunk in characters.
    pub fn char_len(&self) -> usize {
        self.end_char - self.start_char
    }
}

/// Context budget of the external summarizer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TokenBudget {
    /// Total context window (input + output).
    pub max_context_tokens: usize,
    /// Tokens reserved for the generated output.
    pub max_output_tokens: usize,
    /// Overlap between consecutive chunks.
    pub overlap_tokens: usize,
    /// Characters per token used for estimation.
    pub chars_per_token: f64,
}

impl Default for TokenBudget {
    fn default() -> Self {
        Self {
            max_context_tokens: 4096,
            max_output_tokens: 500,
            overlap_tokens: 200,
            chars_per_token: 3.5,
        }
    }
}

impl From<&SummarizerSettings> for TokenBudget {
    fn from(settings: &SummarizerSettings) -> Self {
        Self {
            max_context_tokens: settings.max_context_tokens,
            max_output_tokens: settings.max_output_tokens,
            overlap_tokens: settings.chunk_overlap_tokens,
            chars_per_token: settings.chars_per_token,
        }
    }
}

impl TokenBudget {
    /// Estimated token count of `text`.
    pub fn estimate_tokens(&self, text: &str) -> usize {
        self.tokens_for_chars(char_len(text))
    }

    fn tokens_for_chars(&self, chars: usize) -> usize {
        (chars as f64 / self.chars_per_token) as usize
    }

    /// Tokens available for input once the output is reserved.
    pub fn input_tokens(&self) -> usize {
        self.max_context_tokens.saturating_sub(self.max_output_tokens)
    }

    /// Whether `prompt` followed by `text` fits in one call.
    pub fn fits_in_budget(&self, text: &str, prompt: &str) -> bool {
        self.tokens_for_chars(char_len(text) + char_len(prompt)) <= self.input_tokens()
    }

    /// Split `text` into overlapping, sentence-aligned chunks that fit next to `prompt`.
    pub fn split_into_chunks(&self, text: &str, prompt: &str) -> Result<Vec<TextChunk>> {
        split_into_chunks(text, prompt, self)
    }
}
