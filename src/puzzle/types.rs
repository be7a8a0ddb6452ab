use serde::Deserialize;

/// One entry in the tour script: a screen of narrative plus its gate.
#[derive(Debug, Deserialize, Clone)]
pub struct Step {
    pub meta: StepMeta,
    pub narrative: Narrative,
    pub puzzle: Puzzle,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StepMeta {
    pub id: String,
    pub title: String,
    /// Asset reference, resolved by the front-end.
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Narrative {
    pub content: String,
    #[serde(default)]
    pub reveal: Option<String>, // Shown only once the gate is passed
}

/// The gate in front of the next step. Each kind carries only what it needs.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Puzzle {
    Reading,
    FreeText {
        #[serde(default)]
        question: Option<String>,
        answer: Answer,
        #[serde(default)]
        hint: Option<String>,
    },
    MultipleChoice {
        #[serde(default)]
        question: Option<String>,
        choices: Vec<Choice>,
        answer: String,
        #[serde(default)]
        hint: Option<String>,
    },
    Crossword {
        #[serde(default)]
        question: Option<String>,
        #[serde(default)]
        hint: Option<String>,
    },
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    Reading,
    FreeTextInput,
    MultipleChoice,
    Crossword,
    End,
}

/// Accepted answer for a free-text step: one canonical string or a list of
/// alternatives.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Answer {
    One(String),
    AnyOf(Vec<String>),
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Choice {
    pub id: String,
    pub label: String,
}

impl Answer {
    pub fn variants(&self) -> &[String] {
        match self {
            Answer::One(answer) => std::slice::from_ref(answer),
            Answer::AnyOf(answers) => answers,
        }
    }
}

impl Puzzle {
    pub fn kind(&self) -> StepKind {
        match self {
            Puzzle::Reading => StepKind::Reading,
            Puzzle::FreeText { .. } => StepKind::FreeTextInput,
            Puzzle::MultipleChoice { .. } => StepKind::MultipleChoice,
            Puzzle::Crossword { .. } => StepKind::Crossword,
            Puzzle::End => StepKind::End,
        }
    }

    pub fn question(&self) -> Option<&str> {
        match self {
            Puzzle::FreeText { question, .. }
            | Puzzle::MultipleChoice { question, .. }
            | Puzzle::Crossword { question, .. } => question.as_deref(),
            Puzzle::Reading | Puzzle::End => None,
        }
    }

    /// The hint, if this kind of gate offers one and it is not blank.
    pub fn hint(&self) -> Option<&str> {
        let hint = match self {
            Puzzle::FreeText { hint, .. }
            | Puzzle::MultipleChoice { hint, .. }
            | Puzzle::Crossword { hint, .. } => hint.as_deref(),
            Puzzle::Reading | Puzzle::End => None,
        };
        hint.filter(|h| !h.trim().is_empty())
    }

    pub fn choices(&self) -> &[Choice] {
        match self {
            Puzzle::MultipleChoice { choices, .. } => choices,
            _ => &[],
        }
    }
}

impl Step {
    pub fn id(&self) -> &str {
        &self.meta.id
    }

    pub fn kind(&self) -> StepKind {
        self.puzzle.kind()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(src: &str) -> Step {
        toml::from_str(src).unwrap()
    }

    #[test]
    fn free_text_with_single_answer() {
        let step = parse(
            r#"
            [meta]
            id = "stop-1"
            title = "Stop 1"

            [narrative]
            content = "Who is our first instructor?"

            [puzzle]
            type = "free_text"
            answer = "Hamilton"
            hint = "He is on the $10 bill."
            "#,
        );
        assert_eq!(step.kind(), StepKind::FreeTextInput);
        assert_eq!(step.puzzle.hint(), Some("He is on the $10 bill."));
        match &step.puzzle {
            Puzzle::FreeText { answer, .. } => {
                assert_eq!(answer.variants(), ["Hamilton".to_string()])
            }
            other => panic!("unexpected puzzle {other:?}"),
        }
    }

    #[test]
    fn free_text_with_answer_list() {
        let step = parse(
            r#"
            [meta]
            id = "stop-3"
            title = "Stop 3"

            [narrative]
            content = "Where is the next class held?"

            [puzzle]
            type = "free_text"
            answer = ["Journalism", "Pulitzer Hall"]
            "#,
        );
        match &step.puzzle {
            Puzzle::FreeText { answer, hint, .. } => {
                assert_eq!(answer.variants().len(), 2);
                assert!(hint.is_none());
            }
            other => panic!("unexpected puzzle {other:?}"),
        }
    }

    #[test]
    fn multiple_choice_keeps_choice_order() {
        let step = parse(
            r#"
            [meta]
            id = "stop-5"
            title = "Stop 5"

            [narrative]
            content = "Where did he end up?"

            [puzzle]
            type = "multiple_choice"
            answer = "d"

            [[puzzle.choices]]
            id = "a"
            label = "Applied Physics"

            [[puzzle.choices]]
            id = "d"
            label = "Civil Engineering"
            "#,
        );
        let ids: Vec<_> = step.puzzle.choices().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, ["a", "d"]);
    }

    #[test]
    fn reading_and_end_offer_no_hint() {
        assert_eq!(Puzzle::Reading.hint(), None);
        assert_eq!(Puzzle::End.hint(), None);
        let blank = Puzzle::Crossword {
            question: None,
            hint: Some("   ".into()),
        };
        assert_eq!(blank.hint(), None);
    }

    #[test]
    fn multiple_choice_without_choices_is_rejected() {
        let result: Result<Step, _> = toml::from_str(
            r#"
            [meta]
            id = "x"
            title = "X"

            [narrative]
            content = "..."

            [puzzle]
            type = "multiple_choice"
            answer = "a"
            "#,
        );
        assert!(result.is_err());
    }
}
