//! CLI command implementations.

mod analyze;
mod chunk;
mod config;
mod history;
mod status;

pub use analyze::{run_analyze, AnalyzeOptions};
pub use chunk::run_chunk;
pub use config::run_config;
pub use history::run_history;
pub use status::run_status;
