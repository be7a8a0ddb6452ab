//! Crossword definition and clue keys.

use std::collections::BTreeSet;
use std::fmt;

use serde::Deserialize;

use crate::error::{TourError, TourResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Across,
    Down,
}

/// Identifies one clue's cell group, rendered as `"{direction}-{number}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClueKey {
    pub direction: Direction,
    pub number: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Clue {
    pub number: u32,
    pub clue: String,
    pub answer: String,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Crossword {
    #[serde(default)]
    pub across: Vec<Clue>,
    #[serde(default)]
    pub down: Vec<Clue>,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Across => "across",
            Direction::Down => "down",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ClueKey {
    pub fn across(number: u32) -> Self {
        ClueKey {
            direction: Direction::Across,
            number,
        }
    }

    pub fn down(number: u32) -> Self {
        ClueKey {
            direction: Direction::Down,
            number,
        }
    }
}

impl fmt::Display for ClueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.direction, self.number)
    }
}

impl Crossword {
    /// Every clue with its key, across first, each list in authored order.
    pub fn clues(&self) -> impl Iterator<Item = (ClueKey, &Clue)> {
        let across = self.across.iter().map(|c| (ClueKey::across(c.number), c));
        let down = self.down.iter().map(|c| (ClueKey::down(c.number), c));
        across.chain(down)
    }

    pub fn clue(&self, key: ClueKey) -> Option<&Clue> {
        let list = match key.direction {
            Direction::Across => &self.across,
            Direction::Down => &self.down,
        };
        list.iter().find(|c| c.number == key.number)
    }

    pub fn len(&self) -> usize {
        self.across.len() + self.down.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn validate(&self) -> TourResult<()> {
        if self.is_empty() {
            return Err(TourError::InvalidCrossword("no clues".into()));
        }
        let mut seen = BTreeSet::new();
        for (key, clue) in self.clues() {
            if !seen.insert(key) {
                return Err(TourError::InvalidCrossword(format!(
                    "duplicate clue `{key}`"
                )));
            }
            if clue.answer.is_empty() || !clue.answer.chars().all(|c| c.is_ascii_uppercase()) {
                return Err(TourError::InvalidCrossword(format!(
                    "answer for `{key}` must be uppercase letters, got `{}`",
                    clue.answer
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clue(number: u32, answer: &str) -> Clue {
        Clue {
            number,
            clue: format!("clue {number}"),
            answer: answer.to_string(),
        }
    }

    #[test]
    fn clue_key_display() {
        assert_eq!(ClueKey::across(7).to_string(), "across-7");
        assert_eq!(ClueKey::down(12).to_string(), "down-12");
    }

    #[test]
    fn same_number_in_both_directions_is_distinct() {
        let puzzle = Crossword {
            across: vec![clue(2, "FERMI")],
            down: vec![clue(2, "GINSBURG")],
        };
        assert!(puzzle.validate().is_ok());
        assert_eq!(puzzle.clue(ClueKey::down(2)).unwrap().answer, "GINSBURG");
        let keys: Vec<_> = puzzle.clues().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, ["across-2", "down-2"]);
    }

    #[test]
    fn lowercase_answer_is_invalid() {
        let puzzle = Crossword {
            across: vec![clue(1, "Fermi")],
            down: vec![],
        };
        assert!(matches!(
            puzzle.validate(),
            Err(TourError::InvalidCrossword(_))
        ));
    }

    #[test]
    fn duplicate_clue_is_invalid() {
        let puzzle = Crossword {
            across: vec![clue(1, "OWL"), clue(1, "OBAMA")],
            down: vec![],
        };
        assert!(puzzle.validate().is_err());
    }
}
