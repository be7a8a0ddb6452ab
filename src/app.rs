use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};
use tui_textarea::TextArea;

use walk_mystery::puzzle::{ClueKey, Script, Step, StepKind};
use walk_mystery::session::{SessionState, Transition, Verdict};

pub enum Screen {
    TitleScreen,
    Playing,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    NewGame,
    Quit,
}

impl MenuOption {
    pub const ALL: [MenuOption; 2] = [MenuOption::NewGame, MenuOption::Quit];

    pub fn label(self) -> &'static str {
        match self {
            MenuOption::NewGame => "NEW GAME",
            MenuOption::Quit => "QUIT",
        }
    }

    fn next(&self) -> Self {
        match self {
            MenuOption::NewGame => MenuOption::Quit,
            MenuOption::Quit => MenuOption::NewGame,
        }
    }
}

pub struct App<'a> {
    pub script: Script,
    pub session: SessionState,
    pub screen: Screen,
    pub menu_selection: MenuOption,
    pub input: TextArea<'a>,
    pub choice_cursor: usize,
    pub clue_cursor: usize,
    pub message: String,
    pub message_style: Style,
    pub should_quit: bool,
}

fn answer_box<'a>() -> TextArea<'a> {
    let mut input = TextArea::default();
    input.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Your answer [Enter: Submit] "),
    );
    input.set_placeholder_text("Type your answer...");
    input.set_cursor_line_style(Style::default());
    input
}

impl<'a> App<'a> {
    pub fn new(script: Script) -> Self {
        App {
            script,
            session: SessionState::new(),
            screen: Screen::TitleScreen,
            menu_selection: MenuOption::NewGame,
            input: answer_box(),
            choice_cursor: 0,
            clue_cursor: 0,
            message: String::new(),
            message_style: Style::default().fg(Color::Yellow),
            should_quit: false,
        }
    }

    pub fn step(&self) -> &Step {
        self.session.current_step(&self.script)
    }

    /// Crossword clue keys in display order.
    pub fn clue_keys(&self) -> Vec<ClueKey> {
        self.script
            .crossword()
            .map(|crossword| crossword.clues().map(|(key, _)| key).collect())
            .unwrap_or_default()
    }

    fn start_game(&mut self) {
        self.session = SessionState::new();
        self.screen = Screen::Playing;
        self.reset_step_widgets();
    }

    fn reset_step_widgets(&mut self) {
        self.input = answer_box();
        self.choice_cursor = 0;
        self.clue_cursor = 0;
        self.message = match self.step().kind() {
            StepKind::Reading => "Press ENTER to begin.".to_string(),
            StepKind::FreeTextInput => "Type your answer and press ENTER.".to_string(),
            StepKind::MultipleChoice => "Pick an answer with ↑/↓ and ENTER.".to_string(),
            StepKind::Crossword => {
                "Fill in every clue (Tab to move), then ENTER to verify.".to_string()
            }
            StepKind::End => "Press ENTER to leave the seminar.".to_string(),
        };
        self.message_style = Style::default().fg(Color::Yellow);
    }

    fn apply(&mut self, transition: Transition) {
        self.session = transition.state;
        match transition.verdict {
            Verdict::Correct => {
                self.message = if self.session.is_terminal(&self.script) {
                    "Solved!".to_string()
                } else {
                    "Solved!  [ Press ENTER for the next lesson ]".to_string()
                };
                self.message_style = Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD);
            }
            Verdict::Incorrect => {
                let wrong = self.session.crossword_errors().len();
                self.message = if wrong > 0 {
                    format!("{wrong} answer(s) need another look.")
                } else {
                    "Not quite. The spirits shake their heads.".to_string()
                };
                self.message_style = Style::default().fg(Color::Red);
            }
            Verdict::Ignored => {}
        }
    }

    fn advance(&mut self) {
        let before = self.session.step_index();
        self.session = self.session.advance(&self.script);
        if self.session.step_index() != before {
            self.reset_step_widgets();
        }
    }

    fn toggle_hint(&mut self) {
        self.session = self.session.toggle_hint(&self.script);
    }

    fn submit_text(&mut self, now: Instant) {
        let text = self.input.lines().join(" ");
        let transition = self.session.submit_text(&self.script, &text, now);
        self.apply(transition);
    }

    fn select_choice(&mut self, id: &str, now: Instant) {
        match self.session.select_choice(&self.script, id, now) {
            Ok(transition) => self.apply(transition),
            Err(e) => {
                self.message = e.to_string();
                self.message_style = Style::default().fg(Color::Magenta);
            }
        }
    }

    fn edit_clue(&mut self, edit: impl FnOnce(&mut String, usize)) {
        let keys = self.clue_keys();
        let Some(&key) = keys.get(self.clue_cursor) else {
            return;
        };
        let max_len = self
            .script
            .crossword()
            .and_then(|crossword| crossword.clue(key))
            .map_or(0, |clue| clue.answer.chars().count());
        let mut text = self.session.crossword_entry(key).to_string();
        edit(&mut text, max_len);
        match self.session.edit_cell(&self.script, key, &text) {
            Ok(next) => self.session = next,
            Err(e) => {
                self.message = e.to_string();
                self.message_style = Style::default().fg(Color::Magenta);
            }
        }
    }

    fn move_clue_cursor(&mut self, forward: bool) {
        let count = self.clue_keys().len();
        if count == 0 {
            return;
        }
        self.clue_cursor = if forward {
            (self.clue_cursor + 1) % count
        } else {
            (self.clue_cursor + count - 1) % count
        };
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.screen {
            Screen::TitleScreen => {
                match key.code {
                    KeyCode::Up | KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('k') => {
                        self.menu_selection = self.menu_selection.next();
                    }
                    KeyCode::Enter => match self.menu_selection {
                        MenuOption::NewGame => self.start_game(),
                        MenuOption::Quit => self.should_quit = true,
                    },
                    KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                    _ => {}
                }
                return;
            }
            Screen::Finished => {
                self.should_quit = true;
                return;
            }
            Screen::Playing => {}
        }

        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            KeyCode::F(1) => {
                self.toggle_hint();
                return;
            }
            _ => {}
        }

        if self.step().kind() == StepKind::End {
            if key.code == KeyCode::Enter {
                self.screen = Screen::Finished;
                self.should_quit = true;
            }
            return;
        }

        if self.session.is_success() {
            if key.code == KeyCode::Enter {
                self.advance();
            }
            return;
        }

        match self.step().kind() {
            StepKind::Reading => {
                if key.code == KeyCode::Enter {
                    let transition = self.session.submit_text(&self.script, "", now);
                    self.apply(transition);
                }
            }
            StepKind::FreeTextInput => match key.code {
                KeyCode::Enter => {
                    // Blank answers cannot be submitted
                    if self.input.lines().iter().any(|l| !l.trim().is_empty()) {
                        self.submit_text(now);
                    }
                }
                _ => {
                    self.input.input(key);
                }
            },
            StepKind::MultipleChoice => self.handle_choice_key(key, now),
            StepKind::Crossword => match key.code {
                KeyCode::Tab | KeyCode::Down => self.move_clue_cursor(true),
                KeyCode::BackTab | KeyCode::Up => self.move_clue_cursor(false),
                KeyCode::Enter => {
                    let transition = self.session.verify_crossword(&self.script);
                    self.apply(transition);
                }
                KeyCode::Backspace => self.edit_clue(|text, _| {
                    text.pop();
                }),
                KeyCode::Char(c) if c.is_alphabetic() => self.edit_clue(|text, max_len| {
                    if text.chars().count() < max_len {
                        text.push(c);
                    }
                }),
                _ => {}
            },
            StepKind::End => {}
        }
    }

    fn handle_choice_key(&mut self, key: KeyEvent, now: Instant) {
        let ids: Vec<String> = self
            .step()
            .puzzle
            .choices()
            .iter()
            .map(|choice| choice.id.clone())
            .collect();
        let count = ids.len();
        if count == 0 {
            return;
        }
        match key.code {
            KeyCode::Up => self.choice_cursor = (self.choice_cursor + count - 1) % count,
            KeyCode::Down => self.choice_cursor = (self.choice_cursor + 1) % count,
            KeyCode::Enter => {
                if let Some(id) = ids.get(self.choice_cursor) {
                    self.select_choice(id, now);
                }
            }
            KeyCode::Char(c) => {
                let typed = c.to_string();
                if let Some(id) = ids.iter().find(|id| id.eq_ignore_ascii_case(&typed)) {
                    self.select_choice(id, now);
                }
            }
            _ => {}
        }
    }
}
