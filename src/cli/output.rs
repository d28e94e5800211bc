use crate::checker::{Carousel, MisspellingEntry, Page, Suggestion};
use crate::CheckResult;
use anyhow::Result;
use colored::*;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonOutput<'a> {
    source: &'a str,
    total_errors: usize,
    errors: &'a [crate::Misspelling],
}

pub fn print_errors(
    source: &str,
    result: &CheckResult,
    colored_output: bool,
    format: &OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => print_text_errors(source, result, colored_output),
        OutputFormat::Json => print_json_errors(source, result)?,
    }
    Ok(())
}

fn print_text_errors(source: &str, result: &CheckResult, colored_output: bool) {
    if result.errors.is_empty() {
        return;
    }

    if colored_output {
        println!("\n{}", source.bold().underline());
    } else {
        println!("\n{}", source);
    }

    for error in &result.errors {
        let line_info = format!("{}:{}", error.line, error.column);
        let word = paint(&error.word, colored_output, |w| w.red().bold());

        if colored_output {
            println!(
                "  {} {} {}",
                line_info.blue().bold(),
                word,
                highlight(&error.context, &error.word, colored_output)
            );
        } else {
            println!("  {} {} {}", line_info, word, error.context);
        }

        if !error.suggestions.is_empty() {
            let arrow = paint("→", colored_output, |a| a.dimmed());
            let suggestions = error
                .suggestions
                .iter()
                .map(|s| paint(s, colored_output, |s| s.green()))
                .collect::<Vec<_>>()
                .join(", ");
            println!("    {} {}", arrow, suggestions);
        }
    }
}

fn print_json_errors(source: &str, result: &CheckResult) -> Result<()> {
    let output = JsonOutput {
        source,
        total_errors: result.error_count,
        errors: &result.errors,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn paint(text: &str, colored_output: bool, style: impl Fn(&str) -> ColoredString) -> String {
    if colored_output {
        style(text).to_string()
    } else {
        text.to_string()
    }
}

fn highlight(context: &str, word: &str, colored: bool) -> String {
    if colored {
        context.replace(word, &word.red().bold().to_string())
    } else {
        context.to_string()
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}

pub fn print_check_summary(total_errors: usize, sources: usize, colored: bool) {
    println!();
    if total_errors == 0 {
        println!("{}", paint("✓ No spelling errors found!", colored, |s| s.green().bold()));
        return;
    }

    println!(
        "{} {} {} found in {} {}",
        paint("✗", colored, |s| s.red().bold()),
        paint(&total_errors.to_string(), colored, |s| s.red().bold()),
        plural(total_errors, "error", "errors"),
        sources,
        plural(sources, "input", "inputs")
    );
}

pub fn print_fix_summary(total_fixed: usize, sources: usize, colored: bool) {
    println!();
    if total_fixed == 0 {
        println!("{}", paint("No corrections applied.", colored, |s| s.green().bold()));
        return;
    }

    println!(
        "{} {} {} applied to {} {}",
        paint("✓", colored, |s| s.green().bold()),
        paint(&total_fixed.to_string(), colored, |s| s.green().bold()),
        plural(total_fixed, "correction", "corrections"),
        sources,
        plural(sources, "input", "inputs")
    );
}

/// Show the entry under the cursor together with its neighbours.
pub fn print_carousel_position(carousel: &Carousel, colored: bool) {
    let (Some(current), Some(previous), Some(next)) = (
        carousel.current_entry(),
        carousel.previous_entry(),
        carousel.next_entry(),
    ) else {
        return;
    };

    println!(
        "\n{} ({} of {})",
        paint("Misspelled words", colored, |s| s.yellow().bold()),
        carousel.current() + 1,
        carousel.len()
    );
    println!(
        "  {}  [{}]  {}",
        paint(&previous.word, colored, |s| s.dimmed()),
        paint(&current.word, colored, |s| s.red().bold()),
        paint(&next.word, colored, |s| s.dimmed())
    );
}

pub fn print_misspelling_list(carousel: &Carousel) {
    for (i, entry) in carousel.iter().enumerate() {
        println!("{}. {}", i + 1, entry.word);
    }
}

pub fn print_selected(entry: &MisspellingEntry, context: &str, colored: bool) {
    println!(
        "\nYou have selected the word \"{}\"",
        paint(&entry.word, colored, |s| s.red().bold())
    );
    println!("Context: {}", highlight(context, &entry.word, colored));
}

pub fn print_suggestion_page(suggestions: &[Suggestion], page: &Page, colored: bool) {
    if page.is_empty() {
        println!("{}", paint("Sorry, no suggestions available", colored, |s| s.yellow()));
        return;
    }

    println!("{}", paint("Suggested replacements:", colored, |s| s.cyan().bold()));
    for (i, suggestion) in suggestions[page.start..page.end].iter().enumerate() {
        println!(
            "  {}. {} {}",
            page.start + i + 1,
            paint(&suggestion.candidate, colored, |s| s.green()),
            paint(&format!("(distance {})", suggestion.distance), colored, |s| s.dimmed())
        );
    }
}

pub fn print_preview(text: &str, colored: bool) {
    println!("\n{}", paint("Your new text is:", colored, |s| s.cyan().bold()));
    println!("{}", text);
}
