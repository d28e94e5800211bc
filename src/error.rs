use thiserror::Error;

/// Errors surfaced by the misspelling carousel and the operations built on it.
///
/// None of these abort a pass: the caller decides whether to re-prompt or
/// keep its current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarouselError {
    #[error("index {index} is out of range for {len} misspelling(s)")]
    InvalidIndex { index: usize, len: usize },

    #[error("there are no misspellings left")]
    EmptyCollection,

    #[error("'{0}' is not in the list of misspellings")]
    WordNotFound(String),

    #[error("'{0}' is not a valid position")]
    InvalidPosition(String),
}

pub type Result<T> = std::result::Result<T, CarouselError>;

/// Parse a 1-based position typed by a user into a 0-based index.
pub fn parse_position(input: &str) -> Result<usize> {
    let trimmed = input.trim();
    match trimmed.parse::<i64>() {
        Ok(n) if n >= 1 => Ok((n - 1) as usize),
        _ => Err(CarouselError::InvalidPosition(trimmed.to_string())),
    }
}
