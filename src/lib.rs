pub mod checker;
pub mod cli;
pub mod config;
pub mod dict;
pub mod error;

pub use checker::SpellChecker;
pub use config::Config;
pub use error::CarouselError;

use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct CheckResult {
    pub error_count: usize,
    pub errors: Vec<Misspelling>,
}

/// A misspelling as reported by check mode.
#[derive(Debug, Clone, Serialize)]
pub struct Misspelling {
    pub word: String,
    pub line: usize,
    pub column: usize,
    pub context: String,
    pub suggestions: Vec<String>,
}
