pub mod carousel;
pub mod dictionary;
pub mod replace;
pub mod suggestions;
pub mod tokenizer;

pub use carousel::{Carousel, MisspellingEntry, Selection};
pub use dictionary::Dictionary;
pub use replace::{add_to_dictionary, apply_replacement, paginate, Correction, Page, Scope};
pub use suggestions::{edit_distance, max_allowed_distance, suggest, Suggestion};
pub use tokenizer::{context_window, tokenize, Token};

use crate::{CheckResult, Config, Misspelling};
use anyhow::{Context, Result};
use std::fs;

/// Collect every token whose word is not in the dictionary, in text order.
pub fn check_spelling(tokens: &[Token], dictionary: &Dictionary) -> Carousel {
    let mut carousel = Carousel::new();
    for token in tokens.iter().filter(|t| !dictionary.contains(&t.word)) {
        carousel.append(&token.word, token.start, token.end, token.original_index);
    }
    log::debug!(
        "{} of {} word(s) not found in the dictionary",
        carousel.len(),
        tokens.len()
    );
    carousel
}

pub struct SpellChecker {
    dictionary: Dictionary,
    max_suggestions: usize,
    context_radius: usize,
}

impl SpellChecker {
    pub fn new(config: &Config) -> Result<Self> {
        let mut dictionary = match &config.dictionary {
            Some(path) => Dictionary::load_from_path(path)?,
            None => Dictionary::load(&config.language)?,
        };

        if let Some(personal_dict_path) = &config.personal_dictionary {
            if personal_dict_path.exists() {
                let content = fs::read_to_string(personal_dict_path)
                    .context("Failed to read personal dictionary")?;
                dictionary.extend(Dictionary::from_word_list(&content).iter());
            }
        }

        log::info!("dictionary ready with {} words", dictionary.len());
        Ok(Self::with_dictionary(dictionary, config))
    }

    pub fn with_dictionary(dictionary: Dictionary, config: &Config) -> Self {
        Self {
            dictionary,
            max_suggestions: config.max_suggestions,
            context_radius: config.context_radius,
        }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    pub fn dictionary_mut(&mut self) -> &mut Dictionary {
        &mut self.dictionary
    }

    pub fn context_radius(&self) -> usize {
        self.context_radius
    }

    /// Report every misspelling in `text` without changing it.
    pub fn check(&self, text: &str) -> Result<CheckResult> {
        let tokens = tokenize(text);
        let mut carousel = check_spelling(&tokens, &self.dictionary);
        let mut errors = Vec::with_capacity(carousel.len());

        for index in 0..carousel.len() {
            let suggestions: Vec<String> = carousel
                .suggestions_for(index, &self.dictionary)?
                .iter()
                .take(self.max_suggestions)
                .map(|s| s.candidate.clone())
                .collect();

            let Some(entry) = carousel.get(index) else {
                continue;
            };
            let (line, column) = line_and_column(text, entry.start);
            let window = context_window(&tokens, entry.original_index, self.context_radius);

            errors.push(Misspelling {
                word: entry.word.clone(),
                line,
                column,
                context: tokenizer::render_context(window),
                suggestions,
            });
        }

        Ok(CheckResult {
            error_count: errors.len(),
            errors,
        })
    }

    /// Replace every misspelling that has a suggestion with the best one.
    pub fn fix_auto(&self, text: &str) -> Result<(String, usize)> {
        let mut text = text.to_string();
        let mut carousel = check_spelling(&tokenize(&text), &self.dictionary);
        let mut fixed_count = 0;
        let mut index = 0;

        while index < carousel.len() {
            let top = carousel
                .suggestions_for(index, &self.dictionary)?
                .first()
                .map(|s| s.candidate.clone());

            match top {
                Some(word) => {
                    let correction =
                        apply_replacement(&text, &carousel, index, &word, Scope::AllOccurrences)?;
                    fixed_count += correction.replaced;
                    correction.commit(&mut text, &mut carousel);
                }
                None => index += 1,
            }
        }

        Ok((text, fixed_count))
    }
}

/// 1-based line and column (in characters) of a byte offset.
pub fn line_and_column(text: &str, offset: usize) -> (usize, usize) {
    let before = &text[..offset.min(text.len())];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    (line, before[line_start..].chars().count() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(words: &[&str]) -> SpellChecker {
        let dictionary: Dictionary = words.iter().collect();
        SpellChecker::with_dictionary(dictionary, &Config::default())
    }

    #[test]
    fn test_check_spelling_end_to_end() {
        let dictionary: Dictionary = ["i", "go"].into_iter().collect();
        let carousel = check_spelling(&tokenize("I wil go"), &dictionary);

        assert_eq!(carousel.len(), 1);
        let entry = carousel.current_entry().unwrap();
        assert_eq!((entry.word.as_str(), entry.start, entry.end), ("wil", 2, 5));
        assert_eq!(entry.original_index, 1);
    }

    #[test]
    fn test_check_spelling_keeps_duplicates() {
        let dictionary: Dictionary = ["a"].into_iter().collect();
        let carousel = check_spelling(&tokenize("teh a Teh"), &dictionary);
        assert_eq!(carousel.len(), 2);
        assert_eq!(carousel.distinct_words().len(), 1);
    }

    #[test]
    fn test_check_report() {
        let checker = checker(&["the", "cat", "sat", "on", "mat"]);
        let result = checker.check("the cat\nsat on teh mat").unwrap();

        assert_eq!(result.error_count, 1);
        let error = &result.errors[0];
        assert_eq!(error.word, "teh");
        assert_eq!((error.line, error.column), (2, 8));
        assert_eq!(error.suggestions, vec!["the".to_string()]);
        assert_eq!(error.context, "...the cat sat on teh mat...");
    }

    #[test]
    fn test_check_report_counts_every_occurrence() {
        let checker = checker(&["the", "cat"]);
        let result = checker.check("teh cat, Teh cat").unwrap();
        assert_eq!(result.error_count, 2);
        assert_eq!(result.errors.len(), result.error_count);
        assert_eq!(result.errors[1].column, 10);
    }

    #[test]
    fn test_fix_auto() {
        let checker = checker(&["the", "cat", "is", "here"]);
        let (text, fixed) = checker.fix_auto("Teh cat is heer, teh end").unwrap();
        assert_eq!(text, "The cat is here, the end");
        assert_eq!(fixed, 3);
    }

    #[test]
    fn test_fix_auto_without_suggestions() {
        let checker = checker(&["cat"]);
        let (text, fixed) = checker.fix_auto("xyzzyq cat").unwrap();
        assert_eq!(text, "xyzzyq cat");
        assert_eq!(fixed, 0);
    }

    #[test]
    fn test_line_and_column() {
        let text = "ab\ncdé f";
        assert_eq!(line_and_column(text, 0), (1, 1));
        assert_eq!(line_and_column(text, 3), (2, 1));
        assert_eq!(line_and_column(text, 8), (2, 5));
    }
}
