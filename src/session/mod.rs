//! One play-through of a tour: the step runner.

pub mod pulse;
pub mod state;
pub mod view;

pub use pulse::{ErrorPulse, PULSE_DURATION};
pub use state::{SessionState, Transition, Verdict};
pub use view::{Progress, StepView};
