//! Answer checks for each kind of gate. Pure functions; the session decides
//! what a pass or a failure does to its state.

pub mod answer;
pub mod crossword;

pub use answer::{normalize_text, validate_choice, validate_text};
pub use crossword::{normalize_cell, validate_crossword, CrosswordCheck};
