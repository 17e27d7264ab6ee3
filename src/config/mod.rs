//! Configuration module for Briefcast.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{LanguagePrompts, Prompts, SummarizePrompts};
pub use settings::{
    ContentSettings, GeneralSettings, PromptSettings, Settings, StorageSettings,
    SummarizerSettings,
};
