//! Applying corrections back into the text.
//!
//! Every splice shifts the pending entries that follow it by the change in
//! length, so offsets stay valid for later replacements of any word.

use crate::checker::carousel::{Carousel, MisspellingEntry};
use crate::checker::dictionary::{fold, Dictionary};
use crate::checker::tokenizer::is_capitalized;
use crate::error::{CarouselError, Result};

/// Number of suggestions shown per page.
pub const PAGE_SIZE: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    SingleOccurrence,
    AllOccurrences,
}

/// A replacement that has been worked out but not yet accepted.
///
/// Nothing changes for the caller until [`Correction::commit`] is called;
/// dropping the value discards it.
#[derive(Debug, Clone)]
pub struct Correction {
    pub text: String,
    pub carousel: Carousel,
    pub replaced: usize,
}

impl Correction {
    pub fn commit(self, text: &mut String, carousel: &mut Carousel) {
        *text = self.text;
        *carousel = self.carousel;
    }
}

/// Capitalize the replacement's first letter if the original's is uppercase.
pub fn match_capitalization(original: &str, replacement: &str) -> String {
    if !is_capitalized(original) {
        return replacement.to_string();
    }

    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Replace the misspelling at `index` with `new_word`, either just there or
/// wherever the same word (ignoring case) is still pending.
pub fn apply_replacement(
    text: &str,
    carousel: &Carousel,
    index: usize,
    new_word: &str,
    scope: Scope,
) -> Result<Correction> {
    let target = carousel
        .get(index)
        .map(MisspellingEntry::folded)
        .ok_or(CarouselError::InvalidIndex {
            index,
            len: carousel.len(),
        })?;

    let mut text = text.to_string();
    let mut carousel = carousel.clone();
    let mut replaced = 0;

    match scope {
        Scope::SingleOccurrence => {
            splice(&mut text, &mut carousel, index, new_word)?;
            replaced += 1;
        }
        Scope::AllOccurrences => {
            while let Some(next) = first_occurrence(&carousel, &target) {
                splice(&mut text, &mut carousel, next, new_word)?;
                replaced += 1;
            }
        }
    }

    log::debug!(
        "replaced {} occurrence(s) of '{}' with '{}'",
        replaced,
        target,
        new_word
    );

    Ok(Correction {
        text,
        carousel,
        replaced,
    })
}

fn first_occurrence(carousel: &Carousel, folded: &str) -> Option<usize> {
    carousel
        .iter()
        .enumerate()
        .filter(|(_, entry)| entry.folded() == folded)
        .min_by_key(|(_, entry)| entry.start)
        .map(|(index, _)| index)
}

fn splice(text: &mut String, carousel: &mut Carousel, index: usize, new_word: &str) -> Result<()> {
    let entry = carousel.get(index).ok_or(CarouselError::InvalidIndex {
        index,
        len: carousel.len(),
    })?;
    let (start, end) = (entry.start, entry.end);
    // The range must still hold the misspelled word in this text.
    if text.get(start..end) != Some(entry.word.as_str()) {
        return Err(CarouselError::InvalidPosition(format!("{}..{}", start, end)));
    }

    let entry = carousel.delete(index)?;
    let replacement = match_capitalization(&entry.word, new_word);
    text.replace_range(start..end, &replacement);

    let delta = replacement.len() as isize - (end - start) as isize;
    carousel.shift_after(end, delta);
    Ok(())
}

/// Learn `word`: add it to the dictionary and drop every pending occurrence.
/// Cached suggestions are dropped too so the new word can be offered.
/// Returns the number of entries removed.
pub fn add_to_dictionary(
    dictionary: &mut Dictionary,
    carousel: &mut Carousel,
    word: &str,
) -> usize {
    let word = word.trim();
    dictionary.insert(word);
    let removed = carousel.remove_all_matching(word);
    carousel.clear_suggestions();
    log::debug!("learned '{}', {} occurrence(s) resolved", fold(word), removed);
    removed
}

/// A window of at most [`PAGE_SIZE`] suggestions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub start: usize,
    pub end: usize,
    pub has_more: bool,
    pub has_previous: bool,
}

impl Page {
    pub fn first(len: usize) -> Self {
        paginate(0, PAGE_SIZE, len)
    }

    pub fn next(&self, len: usize) -> Self {
        paginate(self.end, self.end + PAGE_SIZE, len)
    }

    pub fn previous(&self, len: usize) -> Self {
        let start = self.start.saturating_sub(PAGE_SIZE);
        paginate(start, start + PAGE_SIZE, len)
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Clamp `[start, end)` to a list of `len` items, pulling `start` back near
/// the end of the list so a full page is shown when possible.
pub fn paginate(start: usize, end: usize, len: usize) -> Page {
    let end = end.min(len);
    let mut start = start.min(end);
    if end - start < PAGE_SIZE {
        start = end.saturating_sub(PAGE_SIZE);
    }

    Page {
        start,
        end,
        has_more: end < len,
        has_previous: start > 0,
    }
}
