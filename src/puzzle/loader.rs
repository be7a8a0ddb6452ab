use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::debug;

use super::crossword::Crossword;
use super::script::{Script, TourMeta};
use super::types::Step;
use crate::error::{TourError, TourResult};

pub const TOUR_FILE: &str = "tour.toml";
pub const CROSSWORD_FILE: &str = "crossword.toml";
const STEP_PATTERN: &str = "step_*.toml";

#[derive(Debug, Deserialize)]
struct TourFile {
    tour: TourMeta,
}

fn read_toml<T: DeserializeOwned>(path: &Path) -> TourResult<T> {
    let content = std::fs::read_to_string(path).map_err(|source| TourError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| TourError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_step(path: &Path) -> TourResult<Step> {
    read_toml(path)
}

pub fn load_crossword(path: &Path) -> TourResult<Crossword> {
    read_toml(path)
}

/// Load every `step_*.toml` in `tour_dir`, in filename order.
pub fn load_steps(tour_dir: &Path) -> TourResult<Vec<Step>> {
    // The directory is taken literally; only the file name is a pattern
    let dir = glob::Pattern::escape(&tour_dir.to_string_lossy());
    let pattern = Path::new(&dir).join(STEP_PATTERN);
    let mut paths = glob::glob(&pattern.to_string_lossy())?
        .map(|entry| {
            entry.map_err(|e| TourError::Io {
                path: e.path().to_path_buf(),
                source: e.into_error(),
            })
        })
        .collect::<TourResult<Vec<_>>>()?;

    // Sort by filename so step_01, step_02, step_03 are in order
    paths.sort();

    paths.iter().map(|path| load_step(path)).collect()
}

/// Load and validate a whole tour directory.
pub fn load_tour(tour_dir: &Path) -> TourResult<Script> {
    let TourFile { tour } = read_toml(&tour_dir.join(TOUR_FILE))?;
    let steps = load_steps(tour_dir)?;

    let crossword_path = tour_dir.join(CROSSWORD_FILE);
    let crossword = if crossword_path.is_file() {
        Some(load_crossword(&crossword_path)?)
    } else {
        None
    };

    debug!(
        tour = %tour.name,
        steps = steps.len(),
        crossword = crossword.is_some(),
        "loaded tour files"
    );
    Script::new(tour, steps, crossword)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::puzzle::types::StepKind;
    use std::fs;
    use tempfile::TempDir;

    const TOUR: &str = r#"
[tour]
name = "Test Walk"
area = "Campus"
"#;

    const READING: &str = r#"
[meta]
id = "intro"
title = "New Message"

[narrative]
content = "Class has begun."
"#;

    const CROSSWORD_STEP: &str = r#"
[meta]
id = "final-exam"
title = "Final Evaluation"

[narrative]
content = "Recall their names."

[puzzle]
type = "crossword"
"#;

    const END: &str = r#"
[meta]
id = "end"
title = "Seminar Complete"

[narrative]
content = "The ghosts fade."

[puzzle]
type = "end"
"#;

    const CROSSWORD: &str = r#"
[[across]]
number = 7
clue = "First Treasury Secretary"
answer = "HAMILTON"

[[down]]
number = 5
clue = "44th US President"
answer = "OBAMA"
"#;

    fn write(dir: &TempDir, name: &str, content: &str) {
        fs::write(dir.path().join(name), content).unwrap();
    }

    fn reading_step() -> String {
        format!("{READING}\n[puzzle]\ntype = \"reading\"\n")
    }

    #[test]
    fn loads_steps_in_filename_order() {
        let dir = TempDir::new().unwrap();
        write(&dir, TOUR_FILE, TOUR);
        write(&dir, "step_02.toml", END);
        write(&dir, "step_01.toml", &reading_step());
        write(&dir, "notes.toml", "not a step");

        let script = load_tour(dir.path()).unwrap();
        assert_eq!(script.meta().name, "Test Walk");
        let ids: Vec<_> = script.steps().iter().map(|s| s.id()).collect();
        assert_eq!(ids, ["intro", "end"]);
        assert!(script.crossword().is_none());
    }

    #[test]
    fn loads_crossword_when_present() {
        let dir = TempDir::new().unwrap();
        write(&dir, TOUR_FILE, TOUR);
        write(&dir, "step_01.toml", CROSSWORD_STEP);
        write(&dir, "step_02.toml", END);
        write(&dir, CROSSWORD_FILE, CROSSWORD);

        let script = load_tour(dir.path()).unwrap();
        assert_eq!(script.step(0).kind(), StepKind::Crossword);
        assert_eq!(script.crossword().map(Crossword::len), Some(2));
    }

    #[test]
    fn directory_name_is_not_a_pattern() {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("tour[1]");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join(TOUR_FILE), TOUR).unwrap();
        fs::write(dir.join("step_01.toml"), reading_step()).unwrap();
        fs::write(dir.join("step_02.toml"), END).unwrap();

        let script = load_tour(&dir).unwrap();
        assert_eq!(script.len(), 2);
    }

    #[test]
    fn unreadable_step_fails_the_load() {
        let dir = TempDir::new().unwrap();
        write(&dir, TOUR_FILE, TOUR);
        write(&dir, "step_01.toml", &reading_step());
        fs::create_dir(dir.path().join("step_02.toml")).unwrap();
        write(&dir, "step_03.toml", END);

        match load_tour(dir.path()) {
            Err(TourError::Io { path, .. }) => assert!(path.ends_with("step_02.toml")),
            other => panic!("expected io error, got {other:?}"),
        }
    }

    #[test]
    fn missing_crossword_file_fails_validation() {
        let dir = TempDir::new().unwrap();
        write(&dir, TOUR_FILE, TOUR);
        write(&dir, "step_01.toml", CROSSWORD_STEP);
        write(&dir, "step_02.toml", END);

        assert!(matches!(
            load_tour(dir.path()),
            Err(TourError::InvalidCrossword(_))
        ));
    }

    #[test]
    fn missing_tour_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, "step_01.toml", END);
        assert!(matches!(load_tour(dir.path()), Err(TourError::Io { .. })));
    }

    #[test]
    fn directory_without_steps_is_empty() {
        let dir = TempDir::new().unwrap();
        write(&dir, TOUR_FILE, TOUR);
        assert!(matches!(load_tour(dir.path()), Err(TourError::Empty)));
    }

    #[test]
    fn malformed_step_reports_its_path() {
        let dir = TempDir::new().unwrap();
        write(&dir, TOUR_FILE, TOUR);
        write(&dir, "step_01.toml", "[meta]\nid = 3\n");
        match load_tour(dir.path()) {
            Err(TourError::Parse { path, .. }) => assert!(path.ends_with("step_01.toml")),
            other => panic!("expected parse error, got {other:?}"),
        }
    }
}
