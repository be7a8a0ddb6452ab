use crate::puzzle::Answer;

/// Trim surrounding whitespace and case-fold.
pub fn normalize_text(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Check a free-text submission.
///
/// A gate without an answer accepts anything, including the empty "Begin"
/// action of a reading step.
pub fn validate_text(answer: Option<&Answer>, submitted: &str) -> bool {
    let Some(answer) = answer else {
        return true;
    };
    let submitted = normalize_text(submitted);
    answer
        .variants()
        .iter()
        .any(|accepted| normalize_text(accepted) == submitted)
}

/// Choice ids are short fixed tokens, compared exactly.
pub fn validate_choice(answer: &str, selected: &str) -> bool {
    answer == selected
}
