//! A validated tour script: ordered steps plus the shared crossword.

use std::collections::HashSet;

use serde::Deserialize;

use super::crossword::Crossword;
use super::types::{Puzzle, Step, StepKind};
use crate::error::{TourError, TourResult};

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct TourMeta {
    pub name: String,
    #[serde(default)]
    pub area: String,
}

/// The fixed, read-only script a session plays through.
///
/// Always non-empty and always ends in exactly one [`StepKind::End`] step.
#[derive(Debug, Clone)]
pub struct Script {
    meta: TourMeta,
    steps: Vec<Step>,
    crossword: Option<Crossword>,
}

impl Script {
    pub fn new(meta: TourMeta, steps: Vec<Step>, crossword: Option<Crossword>) -> TourResult<Self> {
        let last = steps.last().ok_or(TourError::Empty)?;
        if last.kind() != StepKind::End {
            return Err(TourError::invalid_step(
                last.id(),
                "the last step must be an end step",
            ));
        }

        let mut ids = HashSet::new();
        for (index, step) in steps.iter().enumerate() {
            if !ids.insert(step.id()) {
                return Err(TourError::DuplicateStep(step.id().to_string()));
            }
            if step.kind() == StepKind::End && index + 1 != steps.len() {
                return Err(TourError::invalid_step(
                    step.id(),
                    "only the last step may be an end step",
                ));
            }
            validate_puzzle(step, crossword.as_ref())?;
        }

        if let Some(crossword) = &crossword {
            crossword.validate()?;
        }

        Ok(Script {
            meta,
            steps,
            crossword,
        })
    }

    pub fn meta(&self) -> &TourMeta {
        &self.meta
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }

    /// The step at `index`, clamped to the terminal step.
    pub fn step(&self, index: usize) -> &Step {
        &self.steps[index.min(self.last_index())]
    }

    pub fn crossword(&self) -> Option<&Crossword> {
        self.crossword.as_ref()
    }
}

fn validate_puzzle(step: &Step, crossword: Option<&Crossword>) -> TourResult<()> {
    match &step.puzzle {
        Puzzle::FreeText { answer, .. } => {
            if answer.variants().iter().all(|a| a.trim().is_empty()) {
                return Err(TourError::invalid_step(step.id(), "free-text answer is empty"));
            }
        }
        Puzzle::MultipleChoice {
            choices, answer, ..
        } => {
            if choices.is_empty() {
                return Err(TourError::invalid_step(step.id(), "no choices declared"));
            }
            let mut seen = HashSet::new();
            for choice in choices {
                if !seen.insert(choice.id.as_str()) {
                    return Err(TourError::invalid_step(
                        step.id(),
                        format!("duplicate choice id `{}`", choice.id),
                    ));
                }
            }
            if !seen.contains(answer.as_str()) {
                return Err(TourError::invalid_step(
                    step.id(),
                    format!("answer `{answer}` is not one of the choices"),
                ));
            }
        }
        Puzzle::Crossword { .. } => {
            if crossword.is_none() {
                return Err(TourError::InvalidCrossword(format!(
                    "step `{}` needs a crossword definition",
                    step.id()
                )));
            }
        }
        Puzzle::Reading | Puzzle::End => {}
    }
    Ok(())
}
