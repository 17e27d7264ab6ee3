//! Chunk command implementation.

use crate::analysis::{self, Language};
use crate::chunking::TokenBudget;
use crate::cli::{read_input, Output};
use crate::config::{Prompts, Settings};
use anyhow::Result;

/// Run the chunk command: print the chunk plan without calling any summarizer.
pub fn run_chunk(input: &str, prompt: Option<String>, settings: Settings) -> Result<()> {
    let text = read_input(input)?;
    let budget = TokenBudget::from(&settings.summarizer);

    let prompt = match prompt {
        Some(p) => p,
        None => {
            let prompts = Prompts::load(
                settings.prompts.custom_dir.as_deref(),
                Some(&settings.prompts.variables),
            )?;
            let analysis = analysis::analyze(&text);
            let language = match analysis.language {
                Language::Unknown => settings.content.summary_language.parse().unwrap_or_default(),
                known => known,
            };
            prompts.summary_prompt(
                language,
                None,
                &analysis.key_phrases,
                settings.content.max_summary_length,
            )
        }
    };

    Output::header("Budget");
    Output::kv("Text", &format!("~{} tokens", budget.estimate_tokens(&text)));
    Output::kv("Prompt", &format!("~{} tokens", budget.estimate_tokens(&prompt)));
    Output::kv("Input budget", &format!("{} tokens", budget.input_tokens()));

    if budget.fits_in_budget(&text, &prompt) {
        Output::success("Text fits in a single call, no chunking needed.");
        return Ok(());
    }

    let chunks = budget.split_into_chunks(&text, &prompt)?;
    Output::header(&format!("Chunks ({})", chunks.len()));
    for chunk in &chunks {
        Output::chunk_info(
            chunk.index,
            chunk.start_char,
            chunk.end_char,
            budget.estimate_tokens(&chunk.text),
            &chunk.text,
        );
    }

    Ok(())
}
