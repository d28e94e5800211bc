use crate::checker::dictionary::Dictionary;
use crate::config::Config;
use anyhow::{Context, Result};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

// Pinned to a commit so downloads are reproducible.
const WORDLIST_BASE_URL: &str =
    "https://raw.githubusercontent.com/dwyl/english-words/6e4bc58ad764c3e6df8b5be4048671962c9d6a23";
const WORDLIST_VERSION: &str = "2023.12";

fn data_dir() -> Result<PathBuf> {
    Config::data_dir().context("Failed to get data directory")
}

/// Languages with a compiled `.dict` file in `dir`, sorted by name.
pub fn installed_languages(dir: &Path) -> Result<Vec<(String, u64)>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut languages = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) != Some("dict") {
            continue;
        }
        if let Some(language) = path.file_stem().and_then(|s| s.to_str()) {
            languages.push((language.to_string(), fs::metadata(&path)?.len()));
        }
    }
    languages.sort();
    Ok(languages)
}

fn wordlist_url(language: &str) -> Result<String> {
    match language {
        "en_US" | "en_GB" => Ok(format!("{}/words_alpha.txt", WORDLIST_BASE_URL)),
        other => anyhow::bail!(
            "Language '{}' is not supported. Only 'en_US' and 'en_GB' are currently available.",
            other
        ),
    }
}

/// Turn a downloaded word list into dictionary entries.
pub fn parse_wordlist(content: &str) -> Vec<String> {
    content
        .lines()
        .map(|line| line.trim().to_lowercase())
        .filter(|line| !line.is_empty())
        .collect()
}

pub fn list_dictionaries() -> Result<()> {
    let dir = data_dir()?;
    let languages = installed_languages(&dir)?;

    if languages.is_empty() {
        println!("{}", "No dictionaries installed.".yellow());
        println!(
            "Run {} to download one. Until then a small built-in word list is used.",
            "spellfix dict download en_US".cyan()
        );
        return Ok(());
    }

    println!("{}\n", "Installed dictionaries:".bold());
    for (language, size) in &languages {
        println!(
            "  {} {} ({})",
            "✓".green(),
            language.cyan().bold(),
            format!("{}KB", size / 1024).dimmed()
        );
    }
    println!("\nData directory: {}", dir.display().to_string().dimmed());

    Ok(())
}

pub fn download_dictionary(language: &str) -> Result<()> {
    let url = wordlist_url(language)?;
    println!(
        "{} dictionary for {} (version: {})...",
        "Downloading".cyan().bold(),
        language.yellow(),
        WORDLIST_VERSION.dimmed()
    );
    println!("Source: {}", url.dimmed());

    let dir = data_dir()?;
    fs::create_dir_all(&dir).context("Failed to create data directory")?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_message("Downloading...");

    let response = reqwest::blocking::get(&url).context("Failed to download dictionary")?;
    if !response.status().is_success() {
        pb.finish_and_clear();
        anyhow::bail!("Failed to download dictionary: HTTP {}", response.status());
    }
    let content = response.text().context("Failed to read dictionary download")?;
    pb.finish_with_message("Download complete");

    let words = parse_wordlist(&content);
    log::info!("building {} dictionary from {} words", language, words.len());
    println!("Found {} words", words.len().to_string().yellow());

    let dict_path = dir.join(format!("{}.dict", language));
    Dictionary::build_from_words(&words, &dict_path)?;

    println!(
        "{} Dictionary installed: {}",
        "✓".green().bold(),
        dict_path.display().to_string().cyan()
    );
    Ok(())
}

pub fn update_dictionaries() -> Result<()> {
    let languages = installed_languages(&data_dir()?)?;
    if languages.is_empty() {
        println!("{}", "No dictionaries to update.".yellow());
        return Ok(());
    }

    println!(
        "{} {} {}...\n",
        "Updating".cyan().bold(),
        languages.len(),
        if languages.len() == 1 { "dictionary" } else { "dictionaries" }
    );
    for (language, _) in languages {
        download_dictionary(&language)?;
        println!();
    }
    println!("{} All dictionaries updated!", "✓".green().bold());

    Ok(())
}

pub fn show_info(language: &str) -> Result<()> {
    let dict_path = data_dir()?.join(format!("{}.dict", language));

    if !dict_path.exists() {
        println!("{} Dictionary for {} not found.", "✗".red().bold(), language.yellow());
        println!(
            "Run {} to download it.",
            format!("spellfix dict download {}", language).cyan()
        );
        return Ok(());
    }

    let metadata = fs::metadata(&dict_path)?;
    println!("{}", format!("Dictionary: {}", language).bold());
    println!("  Path: {}", dict_path.display());
    println!("  Size: {} KB", metadata.len() / 1024);
    println!("  Version: {}", WORDLIST_VERSION);
    println!("  Format: FST set");
    match Dictionary::count_compiled(&dict_path) {
        Ok(count) => println!("  Words: {}", count),
        Err(e) => println!("  {}: {}", "Error loading dictionary".red(), e),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_installed_languages() {
        let dir = tempdir().unwrap();
        Dictionary::build_from_words(&["apple".to_string()], &dir.path().join("en_US.dict"))
            .unwrap();
        Dictionary::build_from_words(&["pomme".to_string()], &dir.path().join("fr_FR.dict"))
            .unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

        let names: Vec<String> = installed_languages(dir.path())
            .unwrap()
            .into_iter()
            .map(|(language, _)| language)
            .collect();
        assert_eq!(names, vec!["en_US", "fr_FR"]);
    }

    #[test]
    fn test_installed_languages_missing_dir() {
        let dir = tempdir().unwrap();
        assert!(installed_languages(&dir.path().join("absent")).unwrap().is_empty());
    }

    #[test]
    fn test_parse_wordlist() {
        assert_eq!(
            parse_wordlist("Apple\r\n\n  banana \nA\n"),
            vec!["apple", "banana", "a"]
        );
    }

    #[test]
    fn test_unsupported_language() {
        assert!(wordlist_url("xx_YY").is_err());
        assert!(wordlist_url("en_GB").unwrap().ends_with("words_alpha.txt"));
    }
}
