use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use tracing::{debug, info};

use super::pulse::ErrorPulse;
use super::view::{Progress, StepView};
use crate::error::{TourError, TourResult};
use crate::puzzle::{ClueKey, Puzzle, Script, Step, StepKind};
use crate::validator::{validate_choice, validate_crossword, validate_text};

/// What a submission did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
    /// The submission does not apply to the current step, or its gate is
    /// already passed.
    Ignored,
}

/// The state after a submission, with the verdict that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: SessionState,
    pub verdict: Verdict,
}

/// Mutable state of one play-through.
///
/// Every transition takes the current value and returns a new one; the
/// script itself is never touched. The index only ever moves forward by one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    step_index: usize,
    is_success: bool,
    show_hint: bool,
    error_pulse: Option<ErrorPulse>,
    crossword_answers: BTreeMap<ClueKey, String>,
    crossword_errors: BTreeSet<ClueKey>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step_index(&self) -> usize {
        self.step_index
    }

    pub fn is_success(&self) -> bool {
        self.is_success
    }

    pub fn show_hint(&self) -> bool {
        self.show_hint
    }

    pub fn error_pulse(&self) -> Option<ErrorPulse> {
        self.error_pulse
    }

    pub fn is_pulsing(&self, now: Instant) -> bool {
        self.error_pulse.is_some_and(|pulse| pulse.is_active(now))
    }

    pub fn crossword_answers(&self) -> &BTreeMap<ClueKey, String> {
        &self.crossword_answers
    }

    pub fn crossword_entry(&self, key: ClueKey) -> &str {
        self.crossword_answers
            .get(&key)
            .map(String::as_str)
            .unwrap_or_default()
    }

    pub fn crossword_errors(&self) -> &BTreeSet<ClueKey> {
        &self.crossword_errors
    }

    pub fn current_step<'s>(&self, script: &'s Script) -> &'s Step {
        script.step(self.step_index)
    }

    pub fn is_terminal(&self, script: &Script) -> bool {
        self.step_index >= script.last_index()
    }

    /// Submit free text, or the empty "Begin" action on a gate with no answer.
    pub fn submit_text(&self, script: &Script, input: &str, now: Instant) -> Transition {
        let step = self.current_step(script);
        if self.is_success {
            return self.ignored();
        }
        let answer = match &step.puzzle {
            Puzzle::FreeText { answer, .. } => Some(answer),
            Puzzle::Reading | Puzzle::End => None,
            Puzzle::MultipleChoice { .. } | Puzzle::Crossword { .. } => {
                debug!(step = step.id(), "text submission ignored by this step");
                return self.ignored();
            }
        };

        debug!(step = step.id(), input, "text submitted");
        if validate_text(answer, input) {
            self.pass(step)
        } else {
            self.fail(step, now)
        }
    }

    /// Select a choice by id. Ids the step does not declare are rejected.
    pub fn select_choice(
        &self,
        script: &Script,
        choice_id: &str,
        now: Instant,
    ) -> TourResult<Transition> {
        let step = self.current_step(script);
        let Puzzle::MultipleChoice {
            choices, answer, ..
        } = &step.puzzle
        else {
            debug!(step = step.id(), "choice ignored by this step");
            return Ok(self.ignored());
        };
        if !choices.iter().any(|c| c.id == choice_id) {
            return Err(TourError::UnknownChoice(choice_id.to_string()));
        }
        if self.is_success {
            return Ok(self.ignored());
        }

        debug!(step = step.id(), choice = choice_id, "choice selected");
        if validate_choice(answer, choice_id) {
            Ok(self.pass(step))
        } else {
            Ok(self.fail(step, now))
        }
    }

    /// Replace one clue's entry. Clears that clue's error flag without
    /// re-checking anything else.
    pub fn edit_cell(&self, script: &Script, key: ClueKey, text: &str) -> TourResult<SessionState> {
        let step = self.current_step(script);
        if step.kind() != StepKind::Crossword || self.is_success {
            return Ok(self.clone());
        }
        let known = script
            .crossword()
            .is_some_and(|crossword| crossword.clue(key).is_some());
        if !known {
            return Err(TourError::UnknownClue(key.to_string()));
        }

        let mut next = self.clone();
        next.crossword_answers.insert(key, text.to_string());
        next.crossword_errors.remove(&key);
        Ok(next)
    }

    /// Check every clue and replace the error set with the result.
    pub fn verify_crossword(&self, script: &Script) -> Transition {
        let step = self.current_step(script);
        let crossword = match (&step.puzzle, script.crossword()) {
            (Puzzle::Crossword { .. }, Some(crossword)) if !self.is_success => crossword,
            _ => return self.ignored(),
        };

        let check = validate_crossword(crossword, &self.crossword_answers);
        debug!(
            step = step.id(),
            wrong = check.errors.len(),
            "crossword verified"
        );
        if check.is_solved() {
            let mut transition = self.pass(step);
            transition.state.crossword_errors.clear();
            transition
        } else {
            let mut next = self.clone();
            next.crossword_errors = check.errors;
            Transition {
                state: next,
                verdict: Verdict::Incorrect,
            }
        }
    }

    /// Flip hint visibility, when the current gate has a hint to show.
    pub fn toggle_hint(&self, script: &Script) -> SessionState {
        let step = self.current_step(script);
        let mut next = self.clone();
        if !self.is_success && step.puzzle.hint().is_some() {
            next.show_hint = !self.show_hint;
        }
        next
    }

    /// Move to the next step once the current gate is passed. A no-op
    /// otherwise, and always a no-op on the terminal step.
    pub fn advance(&self, script: &Script) -> SessionState {
        if !self.is_success || self.is_terminal(script) {
            return self.clone();
        }
        let next = SessionState {
            step_index: self.step_index + 1,
            ..SessionState::default()
        };
        info!(
            from = self.current_step(script).id(),
            to = next.current_step(script).id(),
            "advanced"
        );
        if next.is_terminal(script) {
            info!(tour = %script.meta().name, "tour finished");
        }
        next
    }

    /// Drop the error pulse once it has expired.
    pub fn tick(&self, now: Instant) -> SessionState {
        let mut next = self.clone();
        if self.error_pulse.is_some() && !self.is_pulsing(now) {
            next.error_pulse = None;
        }
        next
    }

    pub fn view<'s>(&self, script: &'s Script, now: Instant) -> StepView<'s> {
        let step = self.current_step(script);
        let hint_available = !self.is_success && step.puzzle.hint().is_some();
        StepView {
            step,
            progress: Progress {
                index: self.step_index,
                total: script.len(),
                is_end: step.kind() == StepKind::End,
            },
            is_success: self.is_success,
            show_hint: self.show_hint,
            error_pulse: self.is_pulsing(now),
            hint_available,
            hint: step.puzzle.hint().filter(|_| self.show_hint),
            reveal: step
                .narrative
                .reveal
                .as_deref()
                .filter(|_| self.is_success),
            can_advance: self.is_success && !self.is_terminal(script),
            crossword_errors: self.crossword_errors.clone(),
        }
    }

    fn ignored(&self) -> Transition {
        Transition {
            state: self.clone(),
            verdict: Verdict::Ignored,
        }
    }

    fn pass(&self, step: &Step) -> Transition {
        info!(step = step.id(), "gate passed");
        let mut next = self.clone();
        next.is_success = true;
        Transition {
            state: next,
            verdict: Verdict::Correct,
        }
    }

    fn fail(&self, step: &Step, now: Instant) -> Transition {
        debug!(step = step.id(), "wrong answer");
        let mut next = self.clone();
        next.error_pulse = Some(ErrorPulse::start(now));
        Transition {
            state: next,
            verdict: Verdict::Incorrect,
        }
    }
}
