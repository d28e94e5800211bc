use anyhow::{Context, Result};
use fst::{Set, SetBuilder, Streamer};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

/// Fold a word into the form used for dictionary comparisons.
pub fn fold(word: &str) -> String {
    word.to_lowercase()
}

/// Set of known words, stored case-folded.
#[derive(Debug, Clone, Default)]
pub struct Dictionary {
    words: HashSet<String>,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the installed dictionary for a language, falling back to the
    /// embedded bootstrap list when none has been downloaded yet.
    pub fn load(language: &str) -> Result<Self> {
        match Self::installed_path(language) {
            Some(path) if path.exists() => Self::load_from_path(&path),
            _ => {
                log::warn!(
                    "no dictionary installed for {}, using the built-in word list",
                    language
                );
                Ok(Self::embedded())
            }
        }
    }

    /// Load from a compiled `.dict` FST file or a plain word list.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let dictionary = if path.extension().and_then(|e| e.to_str()) == Some("dict") {
            Self::load_fst(path)?
        } else {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read dictionary: {}", path.display()))?;
            Self::from_word_list(&content)
        };

        log::debug!(
            "loaded {} words from {}",
            dictionary.len(),
            path.display()
        );
        Ok(dictionary)
    }

    fn load_fst(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to open dictionary: {}", path.display()))?;
        let set = Set::new(bytes).context("Failed to parse dictionary")?;

        let mut words = HashSet::with_capacity(set.len());
        let mut stream = set.stream();
        while let Some(key) = stream.next() {
            if let Ok(word) = std::str::from_utf8(key) {
                words.insert(fold(word));
            }
        }

        Ok(Self { words })
    }

    /// Build from whitespace-separated words. Lines starting with `#` are comments.
    pub fn from_word_list(content: &str) -> Self {
        content
            .lines()
            .filter(|line| !line.trim_start().starts_with('#'))
            .flat_map(str::split_whitespace)
            .collect()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&fold(word))
    }

    /// Insert a word; returns `false` if it was already known.
    pub fn insert(&mut self, word: &str) -> bool {
        self.words.insert(fold(word))
    }

    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for word in words {
            self.insert(word.as_ref());
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    /// Compile a word list into an FST set at `output_path`.
    pub fn build_from_words(words: &[String], output_path: &Path) -> Result<()> {
        let mut sorted_words: Vec<String> = words.iter().map(|w| fold(w)).collect();
        sorted_words.sort();
        sorted_words.dedup();

        let file = File::create(output_path)
            .with_context(|| format!("Failed to create dictionary: {}", output_path.display()))?;

        let writer = BufWriter::new(file);
        let mut builder = SetBuilder::new(writer).context("Failed to create FST builder")?;
        builder
            .extend_iter(sorted_words.iter().map(String::as_bytes))
            .context("Failed to insert word into dictionary")?;
        builder.finish().context("Failed to finalize dictionary")?;

        Ok(())
    }

    /// Count the words in a compiled dictionary without loading it into a set.
    pub fn count_compiled(path: &Path) -> Result<usize> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to open dictionary: {}", path.display()))?;
        let set = Set::new(bytes).context("Failed to parse dictionary")?;
        Ok(set.len())
    }

    pub fn installed_path(language: &str) -> Option<PathBuf> {
        crate::config::Config::data_dir().map(|dir| dir.join(format!("{}.dict", language)))
    }

    /// A small list of very common English words for use before a real
    /// dictionary has been downloaded.
    pub fn embedded() -> Self {
        BOOTSTRAP_WORDS.iter().copied().collect()
    }
}

impl<S: AsRef<str>> FromIterator<S> for Dictionary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut dictionary = Self::new();
        dictionary.extend(iter);
        dictionary
    }
}

const BOOTSTRAP_WORDS: &[&str] = &[
    "a", "about", "after", "again", "all", "also", "an", "and", "any", "are", "as", "at",
    "back", "be", "because", "been", "before", "but", "by", "can", "come", "could", "day",
    "did", "do", "does", "down", "each", "even", "first", "for", "from", "get", "give",
    "go", "good", "had", "has", "have", "he", "her", "here", "him", "his", "how", "i",
    "if", "in", "into", "is", "it", "its", "just", "know", "like", "little", "look",
    "made", "make", "many", "may", "me", "more", "most", "my", "new", "no", "not", "now",
    "of", "on", "one", "only", "or", "other", "our", "out", "over", "people", "said",
    "say", "see", "she", "so", "some", "take", "than", "that", "the", "their", "them",
    "then", "there", "these", "they", "think", "this", "time", "to", "two", "up", "us",
    "use", "was", "way", "we", "well", "were", "what", "when", "which", "who", "will",
    "with", "word", "work", "would", "write", "year", "you", "your",
];

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_build_and_load_dictionary() {
        let dir = tempdir().unwrap();
        let dict_path = dir.path().join("test.dict");

        let words = vec!["hello".to_string(), "World".to_string(), "test".to_string()];

        Dictionary::build_from_words(&words, &dict_path).unwrap();

        let dict = Dictionary::load_from_path(&dict_path).unwrap();
        assert!(dict.contains("hello"));
        assert!(dict.contains("world"));
        assert!(!dict.contains("notfound"));
        assert_eq!(Dictionary::count_compiled(&dict_path).unwrap(), 3);
    }

    #[test]
    fn test_load_word_list() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("words.txt");
        fs::write(&path, "# comment line\nApple banana\ncherry\n\n").unwrap();

        let dict = Dictionary::load_from_path(&path).unwrap();
        assert_eq!(dict.len(), 3);
        assert!(dict.contains("apple"));
        assert!(!dict.contains("comment"));
    }

    #[test]
    fn test_case_insensitive_membership() {
        let mut dict = Dictionary::new();
        assert!(dict.insert("Rust"));
        assert!(!dict.insert("RUST"));
        assert!(dict.contains("rust"));
        assert!(dict.contains("rUsT"));
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn test_embedded_list() {
        let dict = Dictionary::embedded();
        assert!(dict.contains("the"));
        assert!(dict.contains("will"));
        assert!(!dict.is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(Dictionary::load_from_path(&dir.path().join("nope.txt")).is_err());
    }
}
