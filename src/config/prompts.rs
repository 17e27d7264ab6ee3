//! Prompt templates for the external summarizer.
//!
//! Prompts can be customized by placing a `summarize.toml` file in the custom prompts directory.

use crate::analysis::Language;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub summarize: SummarizePrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: HashMap<String, String>,
}

/// Summarization prompts, one set per supported language.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizePrompts {
    pub es: LanguagePrompts,
    pub en: LanguagePrompts,
}

impl Default for SummarizePrompts {
    fn default() -> Self {
        Self {
            es: LanguagePrompts::spanish(),
            en: LanguagePrompts::english(),
        }
    }
}

/// Prompts for a single language.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguagePrompts {
    /// Main instruction. Variables: `title_line`, `key_phrases_line`, `max_length`.
    pub summary: String,
    /// Appended to the instruction when the text is a fragment of a longer document.
    pub partial_note: String,
    /// Instruction for merging partial summaries. Variables: `max_words`.
    pub combine: String,
    /// Line announcing the title. Variables: `title`.
    pub title_line: String,
    /// Line listing key phrases. Variables: `key_phrases`.
    pub key_phrases_line: String,
}

impl LanguagePrompts {
    fn spanish() -> Self {
        Self {
            summary: r#"Resume el siguiente contenido en español de manera concisa y clara.
Destaca los puntos principales y las conclusiones más importantes.
Mantén un tono objetivo e informativo.
{{title_line}}
{{key_phrases_line}}
Longitud máxima: {{max_length}} caracteres."#
                .to_string(),
            partial_note: "NOTA: Este es un fragmento de un texto más largo. Enfócate en resumir solo este fragmento:".to_string(),
            combine: "Combina los siguientes resúmenes parciales en un resumen coherente y completo de máximo {{max_words}} palabras:".to_string(),
            title_line: "El título del contenido es: {{title}}".to_string(),
            key_phrases_line: "Frases clave identificadas: {{key_phrases}}".to_string(),
        }
    }

    fn english() -> Self {
        Self {
            summary: r#"Summarize the following content concisely and clearly.
Highlight the main points and most important conclusions.
Maintain an objective and informative tone.
{{title_line}}
{{key_phrases_line}}
Maximum length: {{max_length}} characters."#
                .to_string(),
            partial_note: "NOTE: This is a fragment of a longer text. Focus on summarizing only this fragment:".to_string(),
            combine: "Combine the following partial summaries into one coherent, complete summary of at most {{max_words}} words:".to_string(),
            title_line: "The content title is: {{title}}".to_string(),
            key_phrases_line: "Key phrases identified: {{key_phrases}}".to_string(),
        }
    }
}

impl Default for LanguagePrompts {
    fn default() -> Self {
        Self::english()
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let summarize_path = custom_path.join("summarize.toml");
            if summarize_path.exists() {
                let content = std::fs::read_to_string(&summarize_path)?;
                prompts.summarize = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(&self, template: &str, vars: &HashMap<String, String>) -> String {
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }

    /// Prompt set for a language. `Unknown` uses English.
    pub fn for_language(&self, language: Language) -> &LanguagePrompts {
        match language {
            Language::Es => &self.summarize.es,
            Language::En | Language::Unknown => &self.summarize.en,
        }
    }

    /// Build the main summarization instruction.
    ///
    /// At most three key phrases are quoted; empty lines are dropped when
    /// there is no title or no key phrase.
    pub fn summary_prompt(
        &self,
        language: Language,
        title: Option<&str>,
        key_phrases: &[String],
        max_length: usize,
    ) -> String {
        let set = self.for_language(language);
        let mut vars = HashMap::new();

        let title_line = match title.map(str::trim).filter(|t| !t.is_empty()) {
            Some(t) => {
                let mut line_vars = HashMap::new();
                line_vars.insert("title".to_string(), t.to_string());
                Self::render(&set.title_line, &line_vars)
            }
            None => String::new(),
        };

        let key_phrases_line = if key_phrases.is_empty() {
            String::new()
        } else {
            let joined = key_phrases
                .iter()
                .take(3)
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(", ");
            let mut line_vars = HashMap::new();
            line_vars.insert("key_phrases".to_string(), joined);
            Self::render(&set.key_phrases_line, &line_vars)
        };

        vars.insert("title_line".to_string(), title_line);
        vars.insert("key_phrases_line".to_string(), key_phrases_line);
        vars.insert("max_length".to_string(), max_length.to_string());

        self.render_with_custom(&set.summary, &vars)
            .lines()
            .filter(|line| !line.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Build the instruction used to merge partial summaries.
    pub fn combine_prompt(&self, language: Language, max_words: usize) -> String {
        let mut vars = HashMap::new();
        vars.insert("max_words".to_string(), max_words.to_string());
        self.render_with_custom(&self.for_language(language).combine, &vars)
    }

    /// Note appended to the instruction for fragments of a longer text.
    pub fn partial_note(&self, language: Language) -> &str {
        &self.for_language(language).partial_note
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_prompts() {
        let prompts = Prompts::default();
        assert!(!prompts.summarize.es.summary.is_empty());
        assert!(!prompts.summarize.en.combine.is_empty());
    }

    #[test]
    fn test_render_template() {
        let template = "Hello {{name}}, you have {{count}} messages.";
        let mut vars = HashMap::new();
        vars.insert("name".to_string(), "Alice".to_string());
        vars.insert("count".to_string(), "5".to_string());

        let result = Prompts::render(template, &vars);
        assert_eq!(result, "Hello Alice, you have 5 messages.");
    }

    #[test]
    fn test_summary_prompt_spanish_with_title() {
        let prompts = Prompts::default();
        let phrases = vec![
            "uno".to_string(),
            "dos".to_string(),
            "tres".to_string(),
            "cuatro".to_string(),
        ];
        let prompt = prompts.summary_prompt(Language::Es, Some("Noticias"), &phrases, 400);

        assert!(prompt.starts_with("Resume el siguiente contenido"));
        assert!(prompt.contains("El título del contenido es: Noticias"));
        assert!(prompt.contains("uno, dos, tres"));
        assert!(!prompt.contains("cuatro"));
        assert!(prompt.contains("400 caracteres"));
    }

    #[test]
    fn test_summary_prompt_drops_empty_lines() {
        let prompts = Prompts::default();
        let prompt = prompts.summary_prompt(Language::Unknown, None, &[], 500);
        assert!(!prompt.contains("\n\n"));
        assert!(!prompt.contains("{{"));
        assert!(prompt.contains("Maximum length: 500 characters."));
    }

    #[test]
    fn test_custom_variables_are_overridden() {
        let mut prompts = Prompts::default();
        prompts.variables.insert("max_words".to_string(), "999".to_string());
        let combine = prompts.combine_prompt(Language::En, 100);
        assert!(combine.contains("at most 100 words"));
    }
}
