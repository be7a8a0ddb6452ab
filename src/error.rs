//! Error types for loading and playing a tour.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for tour operations.
pub type TourResult<T> = Result<T, TourError>;

/// Errors raised while loading a tour script or driving a session.
///
/// Wrong answers are not errors; they are reported through the session's
/// verdicts and error pulse.
#[derive(Debug, Error)]
pub enum TourError {
    /// A tour file could not be read.
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A tour file is not valid TOML for its expected shape.
    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The step file pattern could not be built from the tour directory.
    #[error("invalid step file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    /// The tour directory holds no step files.
    #[error("tour has no steps")]
    Empty,

    /// Two steps share an id.
    #[error("duplicate step id `{0}`")]
    DuplicateStep(String),

    /// A step's definition is internally inconsistent.
    #[error("invalid step `{step}`: {reason}")]
    InvalidStep { step: String, reason: String },

    /// The crossword definition is malformed or missing.
    #[error("invalid crossword: {0}")]
    InvalidCrossword(String),

    /// A choice id that the current step does not declare.
    #[error("unknown choice `{0}`")]
    UnknownChoice(String),

    /// A crossword clue key that the puzzle does not declare.
    #[error("unknown crossword clue `{0}`")]
    UnknownClue(String),
}

impl TourError {
    pub(crate) fn invalid_step(step: &str, reason: impl Into<String>) -> Self {
        TourError::InvalidStep {
            step: step.to_string(),
            reason: reason.into(),
        }
    }
}
