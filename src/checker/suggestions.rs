use crate::checker::dictionary::{fold, Dictionary};
use serde::Serialize;

/// A dictionary word proposed as a replacement, with its distance from the misspelling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub candidate: String,
    pub distance: usize,
}

/// Largest edit distance (and length difference) accepted for a word.
pub fn max_allowed_distance(word: &str) -> usize {
    match word.chars().count() {
        0..=4 => 1,
        5..=7 => 2,
        _ => 3,
    }
}

/// Rank every dictionary word within `max_allowed_distance(word)` of `word`.
///
/// Results are ordered by distance, then alphabetically, so the output does
/// not depend on the dictionary's iteration order.
pub fn suggest(word: &str, dictionary: &Dictionary) -> Vec<Suggestion> {
    let target = fold(word.trim());
    let target_len = target.chars().count();
    let max_distance = max_allowed_distance(&target);

    let mut suggestions: Vec<Suggestion> = dictionary
        .iter()
        .filter(|candidate| candidate.chars().count().abs_diff(target_len) <= max_distance)
        .filter_map(|candidate| {
            let distance = edit_distance(&target, candidate);
            (distance <= max_distance).then(|| Suggestion {
                candidate: candidate.to_string(),
                distance,
            })
        })
        .collect();

    suggestions.sort_by(|a, b| {
        a.distance
            .cmp(&b.distance)
            .then_with(|| a.candidate.cmp(&b.candidate))
    });

    log::debug!(
        "{} suggestion(s) for '{}' within distance {}",
        suggestions.len(),
        word,
        max_distance
    );
    suggestions
}

/// Optimal string alignment distance: insertions, deletions, substitutions
/// and swaps of two adjacent characters all cost 1.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (m, n) = (a.len(), b.len());

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in dp[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=m {
        for j in 1..=n {
            let cost = usize::from(a[i - 1] != b[j - 1]);

            dp[i][j] = (dp[i - 1][j] + 1) // deletion
                .min(dp[i][j - 1] + 1) // insertion
                .min(dp[i - 1][j - 1] + cost); // substitution

            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                dp[i][j] = dp[i][j].min(dp[i - 2][j - 2] + 1);
            }
        }
    }

    dp[m][n]
}
