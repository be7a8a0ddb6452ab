use std::collections::BTreeSet;

use crate::puzzle::{ClueKey, Step};

/// Where the player is in the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub index: usize,
    pub total: usize,
    pub is_end: bool,
}

impl Progress {
    /// "Lesson N", counted from the intro as lesson 0, or "Completed" at the end.
    pub fn lesson_label(&self) -> String {
        if self.is_end {
            "Completed".to_string()
        } else {
            format!("Lesson {}", self.index)
        }
    }

    pub fn position_label(&self) -> String {
        format!("{} / {}", self.index + 1, self.total)
    }
}

/// Everything the front-end needs to render the current step.
#[derive(Debug, Clone)]
pub struct StepView<'s> {
    pub step: &'s Step,
    pub progress: Progress,
    pub is_success: bool,
    pub show_hint: bool,
    pub error_pulse: bool,
    /// Whether a hint toggle should be offered.
    pub hint_available: bool,
    /// Hint text, present only while the hint is shown.
    pub hint: Option<&'s str>,
    /// Reveal text, present only after the gate is passed.
    pub reveal: Option<&'s str>,
    pub can_advance: bool,
    pub crossword_errors: BTreeSet<ClueKey>,
}
