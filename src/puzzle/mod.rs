pub mod crossword;
pub mod loader;
pub mod script;
pub mod types;

pub use crossword::{Clue, ClueKey, Crossword, Direction};
pub use loader::{load_crossword, load_step, load_tour};
pub use script::{Script, TourMeta};
pub use types::{Answer, Choice, Puzzle, Step, StepKind};
