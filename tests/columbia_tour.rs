use std::collections::BTreeSet;
use std::path::Path;
use std::time::Instant;

use walk_mystery::puzzle::{load_tour, ClueKey, Puzzle, Script, StepKind};
use walk_mystery::session::{SessionState, Verdict, PULSE_DURATION};

fn columbia() -> Script {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tour/columbia");
    load_tour(&dir).unwrap()
}

fn solve_crossword(script: &Script, state: SessionState) -> SessionState {
    let crossword = script.crossword().unwrap();
    let mut state = state;
    for (key, clue) in crossword.clues() {
        state = state
            .edit_cell(script, key, &clue.answer.to_lowercase())
            .unwrap();
    }
    state
}

/// Pass the current gate with its known answer.
fn solve(script: &Script, state: &SessionState) -> SessionState {
    let now = Instant::now();
    let step = state.current_step(script);
    let t = match &step.puzzle {
        Puzzle::Reading | Puzzle::End => state.submit_text(script, "", now),
        Puzzle::FreeText { answer, .. } => state.submit_text(script, &answer.variants()[0], now),
        Puzzle::MultipleChoice { answer, .. } => {
            state.select_choice(script, answer, now).unwrap()
        }
        Puzzle::Crossword { .. } => solve_crossword(script, state.clone()).verify_crossword(script),
    };
    assert_eq!(t.verdict, Verdict::Correct, "step {}", step.id());
    t.state
}

#[test]
fn bundled_tour_loads() {
    let script = columbia();
    assert_eq!(script.meta().name, "WalkMystery");
    assert_eq!(script.len(), 10);
    assert_eq!(script.crossword().unwrap().len(), 10);
    assert_eq!(script.step(0).kind(), StepKind::Reading);
    assert_eq!(script.step(script.last_index()).kind(), StepKind::End);
}

#[test]
fn full_play_through_reaches_the_end() {
    let script = columbia();
    let mut state = SessionState::new();
    let mut visited = vec![state.current_step(&script).id().to_string()];

    while !state.is_terminal(&script) {
        let solved = solve(&script, &state);
        assert!(solved.is_success());
        state = solved.advance(&script);
        visited.push(state.current_step(&script).id().to_string());
    }

    assert_eq!(visited.len(), script.len());
    assert_eq!(visited.last().map(String::as_str), Some("end"));
    assert_eq!(state.advance(&script).step_index(), script.last_index());
}

#[test]
fn hamilton_gate() {
    let script = columbia();
    let state = solve(&script, &SessionState::new()).advance(&script);
    assert_eq!(state.current_step(&script).id(), "stop-1-hamilton-identity");
    assert_eq!(
        state.current_step(&script).puzzle.hint(),
        Some("He is on the $10 bill.")
    );

    let now = Instant::now();
    assert_eq!(
        state.submit_text(&script, " hamilton ", now).verdict,
        Verdict::Correct
    );

    let failed = state.submit_text(&script, "hamiltons", now);
    assert_eq!(failed.verdict, Verdict::Incorrect);
    assert!(failed.state.is_pulsing(now));
    assert!(!failed.state.tick(now + PULSE_DURATION).is_pulsing(now + PULSE_DURATION));
}

#[test]
fn journalism_accepts_every_listed_alternative() {
    let script = columbia();
    let mut state = SessionState::new();
    while state.current_step(&script).id() != "stop-3-journalism" {
        state = solve(&script, &state).advance(&script);
    }
    for attempt in ["Journalism", "journalism school", "PULITZER HALL", "Journalism Building"] {
        let t = state.submit_text(&script, attempt, Instant::now());
        assert_eq!(t.verdict, Verdict::Correct, "{attempt}");
    }
}

#[test]
fn crossword_single_mistake_is_pinpointed() {
    let script = columbia();
    let mut state = SessionState::new();
    while state.current_step(&script).kind() != StepKind::Crossword {
        state = solve(&script, &state).advance(&script);
    }

    let filled = solve_crossword(&script, state);
    let solved = filled.verify_crossword(&script);
    assert_eq!(solved.verdict, Verdict::Correct);
    assert!(solved.state.crossword_errors().is_empty());

    let typo = filled
        .edit_cell(&script, ClueKey::across(7), "HAMILTONN")
        .unwrap()
        .verify_crossword(&script);
    assert_eq!(typo.verdict, Verdict::Incorrect);
    assert_eq!(
        typo.state.crossword_errors(),
        &BTreeSet::from([ClueKey::across(7)])
    );
}
