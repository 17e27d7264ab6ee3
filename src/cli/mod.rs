//! CLI module for Briefcast.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Briefcast - Content analysis and summarization
///
/// Detects the language of a text, extracts key phrases and summarizes it with a
/// local language model, falling back to extractive summaries when none is reachable.
#[derive(Parser, Debug)]
#[command(name = "briefcast")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "BRIEFCAST_CONFIG")]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyze and summarize a text file
    Analyze {
        /// Text file to read ('-' for stdin)
        input: String,

        /// Content title, used for scoring and in the prompt
        #[arg(short, long)]
        title: Option<String>,

        /// Maximum summary length in characters
        #[arg(short, long)]
        max_length: Option<usize>,

        /// Skip the external summarizer and use the extractive summary
        #[arg(long)]
        no_external: bool,

        /// Report a failed external summary instead of falling back to the extractive one
        #[arg(long)]
        no_fallback: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Store the summary under this item ID
        #[arg(long)]
        save: Option<String>,
    },

    /// Show how a text would be chunked for the external summarizer
    Chunk {
        /// Text file to read ('-' for stdin)
        input: String,

        /// Instruction placed before each chunk (defaults to the summary prompt)
        #[arg(short, long)]
        prompt: Option<String>,
    },

    /// Show summarizer availability and context budget
    Status,

    /// List stored summaries, or show one item with its processing log
    History {
        /// Item ID to show
        item_id: Option<String>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}

/// Read command input from a file path, or stdin for `-`.
pub fn read_input(input: &str) -> anyhow::Result<String> {
    use std::io::Read;

    if input == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        let path = shellexpand::tilde(input).to_string();
        std::fs::read_to_string(&path).map_err(|e| anyhow::anyhow!("Failed to read {}: {}", input, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze_flags() {
        let cli = Cli::parse_from([
            "briefcast", "analyze", "notes.txt", "--title", "Notes", "--max-length", "300", "--no-external",
            "--save", "item-7",
        ]);
        match cli.command {
            Commands::Analyze {
                input,
                title,
                max_length,
                no_external,
                no_fallback,
                json,
                save,
            } => {
                assert_eq!(input, "notes.txt");
                assert_eq!(title.as_deref(), Some("Notes"));
                assert_eq!(max_length, Some(300));
                assert!(no_external);
                assert!(!no_fallback);
                assert!(!json);
                assert_eq!(save.as_deref(), Some("item-7"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_read_input_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("input.txt");
        std::fs::write(&path, "Some text.").unwrap();
        assert_eq!(read_input(path.to_str().unwrap()).unwrap(), "Some text.");
        assert!(read_input(dir.path().join("missing.txt").to_str().unwrap()).is_err());
    }
}
