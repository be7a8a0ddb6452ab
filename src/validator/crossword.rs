use std::collections::{BTreeMap, BTreeSet};

use crate::puzzle::{ClueKey, Crossword};

/// Outcome of a full verification pass over the crossword.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrosswordCheck {
    pub errors: BTreeSet<ClueKey>,
}

impl CrosswordCheck {
    /// All-or-nothing: solved only when no clue is wrong or missing.
    pub fn is_solved(&self) -> bool {
        self.errors.is_empty()
    }
}

pub fn normalize_cell(text: &str) -> String {
    text.trim().to_uppercase()
}

/// Check every clue against the player's entries. Missing entries count as
/// wrong.
pub fn validate_crossword(
    puzzle: &Crossword,
    entries: &BTreeMap<ClueKey, String>,
) -> CrosswordCheck {
    let errors = puzzle
        .clues()
        .filter(|(key, clue)| {
            let entry = entries.get(key).map(String::as_str).unwrap_or_default();
            normalize_cell(entry) != clue.answer
        })
        .map(|(key, _)| key)
        .collect();
    CrosswordCheck { errors }
}
