//! Circular collection of the misspellings found in one pass over a text.
//!
//! Entries are kept in text order. A single cursor marks the entry the user
//! is looking at; stepping past either end wraps around.

use crate::checker::dictionary::{fold, Dictionary};
use crate::checker::suggestions::{suggest, Suggestion};
use crate::error::{CarouselError, Result};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MisspellingEntry {
    pub word: String,
    pub start: usize,
    pub end: usize,
    pub original_index: usize,
    pub suggestions: Vec<String>,
}

impl MisspellingEntry {
    pub fn folded(&self) -> String {
        fold(&self.word)
    }

    fn matches(&self, folded: &str) -> bool {
        fold(&self.word) == folded
    }
}

/// How the shell picked the entry it wants to work on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The entry under the cursor.
    Current,
    /// The first entry whose word matches, ignoring case.
    Word(String),
    /// A position in the list, as printed to the user.
    Index(usize),
}

#[derive(Debug, Clone, Default)]
pub struct Carousel {
    entries: Vec<MisspellingEntry>,
    current: usize,
    // Ranked suggestions per folded word, computed at most once per pass.
    memo: HashMap<String, Vec<Suggestion>>,
}

impl Carousel {
    pub fn new() -> Self {
        Self::default()
    }

    fn new_entry(
        &self,
        word: &str,
        start: usize,
        end: usize,
        original_index: usize,
    ) -> MisspellingEntry {
        let suggestions = self
            .memo
            .get(&fold(word))
            .map(|ranked| candidates(ranked))
            .unwrap_or_default();

        MisspellingEntry {
            word: word.to_string(),
            start,
            end,
            original_index,
            suggestions,
        }
    }

    pub fn append(&mut self, word: &str, start: usize, end: usize, original_index: usize) {
        let entry = self.new_entry(word, start, end, original_index);
        self.entries.push(entry);
    }

    /// Insert before the cursor's entry; the cursor then points at the new entry.
    pub fn insert_at_current(
        &mut self,
        word: &str,
        start: usize,
        end: usize,
        original_index: usize,
    ) {
        let entry = self.new_entry(word, start, end, original_index);
        self.entries.insert(self.current, entry);
    }

    pub fn step_right(&mut self) {
        if !self.entries.is_empty() {
            self.current = (self.current + 1) % self.entries.len();
        }
    }

    pub fn step_left(&mut self) {
        if !self.entries.is_empty() {
            self.current = (self.current + self.entries.len() - 1) % self.entries.len();
        }
    }

    /// Remove the entry at `index` and keep the cursor on a neighbour.
    ///
    /// If the removed entry sat at or before the cursor, the cursor moves
    /// one step left (wrapping), so deleting the current entry lands on its
    /// predecessor.
    pub fn delete(&mut self, index: usize) -> Result<MisspellingEntry> {
        if self.entries.is_empty() {
            return Err(CarouselError::EmptyCollection);
        }
        self.check_index(index)?;

        Ok(self.remove_unchecked(index))
    }

    // Callers guarantee `index < self.entries.len()`.
    fn remove_unchecked(&mut self, index: usize) -> MisspellingEntry {
        let removed = self.entries.remove(index);
        if self.entries.is_empty() {
            self.current = 0;
        } else if index <= self.current {
            self.step_left();
        }

        log::trace!(
            "removed '{}' at {}, {} left",
            removed.word,
            index,
            self.entries.len()
        );
        removed
    }

    pub fn delete_current(&mut self) -> Result<MisspellingEntry> {
        self.delete(self.current)
    }

    pub fn find_by_word(&self, word: &str) -> Option<&MisspellingEntry> {
        self.index_of_word(word).map(|index| &self.entries[index])
    }

    pub fn index_of_word(&self, word: &str) -> Option<usize> {
        let folded = fold(word.trim());
        self.entries.iter().position(|entry| entry.matches(&folded))
    }

    /// Remove every entry spelled like `word`; returns how many were removed.
    pub fn remove_all_matching(&mut self, word: &str) -> usize {
        let folded = fold(word.trim());
        let mut removed = 0;

        while let Some(index) = self.entries.iter().position(|entry| entry.matches(&folded)) {
            self.remove_unchecked(index);
            removed += 1;
        }

        removed
    }

    pub fn current_entry(&self) -> Option<&MisspellingEntry> {
        self.entries.get(self.current)
    }

    pub fn previous_entry(&self) -> Option<&MisspellingEntry> {
        if self.entries.is_empty() {
            return None;
        }
        let index = (self.current + self.entries.len() - 1) % self.entries.len();
        self.entries.get(index)
    }

    pub fn next_entry(&self) -> Option<&MisspellingEntry> {
        if self.entries.is_empty() {
            return None;
        }
        self.entries.get((self.current + 1) % self.entries.len())
    }

    /// Folded spellings of every pending entry.
    pub fn distinct_words(&self) -> BTreeSet<String> {
        self.entries.iter().map(MisspellingEntry::folded).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn set_current(&mut self, index: usize) -> Result<()> {
        self.check_index(index)?;
        self.current = index;
        Ok(())
    }

    pub fn get(&self, index: usize) -> Option<&MisspellingEntry> {
        self.entries.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MisspellingEntry> {
        self.entries.iter()
    }

    /// Turn a selection into the index of the entry it refers to.
    pub fn resolve(&self, selection: &Selection) -> Result<usize> {
        match selection {
            Selection::Current if self.entries.is_empty() => Err(CarouselError::EmptyCollection),
            Selection::Current => Ok(self.current),
            Selection::Word(word) => self
                .index_of_word(word)
                .ok_or_else(|| CarouselError::WordNotFound(word.trim().to_string())),
            Selection::Index(index) => self.check_index(*index).map(|_| *index),
        }
    }

    /// Ranked suggestions for the entry at `index`.
    ///
    /// The first request for a spelling runs the search and copies the result
    /// to every entry with that spelling; later requests reuse it.
    pub fn suggestions_for(
        &mut self,
        index: usize,
        dictionary: &Dictionary,
    ) -> Result<&[Suggestion]> {
        self.check_index(index)?;
        let folded = self.entries[index].folded();

        if !self.memo.contains_key(&folded) {
            let ranked = suggest(&folded, dictionary);
            let names = candidates(&ranked);
            for entry in self.entries.iter_mut().filter(|e| e.matches(&folded)) {
                entry.suggestions = names.clone();
            }
            self.memo.insert(folded.clone(), ranked);
        }

        Ok(self.memo.get(&folded).map(Vec::as_slice).unwrap_or_default())
    }

    /// Forget all computed suggestions, e.g. after the dictionary changed.
    pub fn clear_suggestions(&mut self) {
        self.memo.clear();
        for entry in &mut self.entries {
            entry.suggestions.clear();
        }
    }

    /// Move every entry that starts at or after `position` by `delta` bytes.
    pub(crate) fn shift_after(&mut self, position: usize, delta: isize) {
        if delta == 0 {
            return;
        }
        for entry in self.entries.iter_mut().filter(|e| e.start >= position) {
            entry.start = entry.start.saturating_add_signed(delta);
            entry.end = entry.end.saturating_add_signed(delta);
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.entries.len() {
            Ok(())
        } else {
            Err(CarouselError::InvalidIndex {
                index,
                len: self.entries.len(),
            })
        }
    }
}

fn candidates(ranked: &[Suggestion]) -> Vec<String> {
    ranked.iter().map(|s| s.candidate.clone()).collect()
}
