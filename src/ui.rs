use std::time::Instant;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use walk_mystery::puzzle::StepKind;
use walk_mystery::session::StepView;

use crate::app::{App, MenuOption, Screen};

pub fn draw_ui(f: &mut Frame, app: &App, now: Instant) {
    if matches!(app.screen, Screen::TitleScreen) {
        draw_title_screen(f, app);
        return;
    }

    let view = app.session.view(&app.script, now);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(f.area());

    // Status bar
    let meta = app.script.meta();
    let status = Line::from(vec![
        Span::styled(
            format!(" {} ", meta.name.to_uppercase()),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ),
        Span::raw("  "),
        Span::styled(
            format!(" {} ", meta.area),
            Style::default().fg(Color::White).bg(Color::DarkGray),
        ),
        Span::raw("  "),
        Span::styled(
            format!(" {} ", view.progress.lesson_label()),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  "),
        Span::styled(
            format!(" {} ", view.progress.position_label()),
            Style::default().fg(Color::Cyan),
        ),
    ]);
    let status_block = Paragraph::new(status).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(status_block, chunks[0]);

    // The card flashes red while a wrong answer is pulsing
    let card_style = if view.error_pulse {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    };

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_story(f, &view, card_style, main_chunks[0]);
    render_interaction(f, app, &view, card_style, main_chunks[1]);

    let message = Paragraph::new(app.message.as_str())
        .block(Block::default().borders(Borders::ALL).title(" Field Notes "))
        .wrap(Wrap { trim: false })
        .style(app.message_style);
    f.render_widget(message, chunks[2]);
}

fn render_story(f: &mut Frame, view: &StepView, card_style: Style, area: Rect) {
    let step = view.step;
    let mut lines = Vec::new();
    if let Some(image) = &step.meta.image {
        lines.push(Line::styled(
            format!("[image: {image}]"),
            Style::default().fg(Color::DarkGray),
        ));
        lines.push(Line::raw(""));
    }
    lines.extend(step.narrative.content.trim().lines().map(Line::raw));
    if let Some(reveal) = view.reveal {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Solved!",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ));
        lines.extend(
            reveal
                .trim()
                .lines()
                .map(|l| Line::styled(l.to_string(), Style::default().fg(Color::Green))),
        );
    }

    let story = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(card_style)
                .title(format!(" {} ", step.meta.title)),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(story, area);
}

fn render_interaction(f: &mut Frame, app: &App, view: &StepView, card_style: Style, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(card_style)
        .title(if view.hint_available {
            " Lesson [F1: Hint | Esc: Quit] "
        } else {
            " Lesson [Esc: Quit] "
        });
    let inner = block.inner(area);
    f.render_widget(block, area);

    if view.is_success || view.step.kind() == StepKind::End {
        let text = if view.can_advance {
            "Next Lesson  →  [ ENTER ]"
        } else if view.step.kind() == StepKind::End {
            "The wind settles. Press ENTER to leave."
        } else {
            "Class dismissed."
        };
        let done = Paragraph::new(text)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::Green).add_modifier(Modifier::BOLD));
        f.render_widget(done, inner);
        return;
    }

    let hint_height = if view.hint.is_some() { 4 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(3),
            Constraint::Length(hint_height),
        ])
        .split(inner);

    if let Some(question) = view.step.puzzle.question() {
        let question = Paragraph::new(question)
            .wrap(Wrap { trim: true })
            .style(Style::default().add_modifier(Modifier::BOLD));
        f.render_widget(question, chunks[0]);
    }

    match view.step.kind() {
        StepKind::Reading => {
            let begin = Paragraph::new("[ Begin ]  press ENTER")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Black).bg(Color::Yellow));
            f.render_widget(begin, chunks[1]);
        }
        StepKind::FreeTextInput => {
            let input_area = Rect {
                height: chunks[1].height.min(3),
                ..chunks[1]
            };
            f.render_widget(&app.input, input_area);
        }
        StepKind::MultipleChoice => render_choices(f, app, view, chunks[1]),
        StepKind::Crossword => render_crossword(f, app, view, chunks[1]),
        StepKind::End => {}
    }

    if let Some(hint) = view.hint {
        let hint = Paragraph::new(hint)
            .block(Block::default().borders(Borders::ALL).title(" Hint "))
            .wrap(Wrap { trim: true })
            .style(Style::default().fg(Color::Yellow));
        f.render_widget(hint, chunks[2]);
    }
}

fn render_choices(f: &mut Frame, app: &App, view: &StepView, area: Rect) {
    let lines: Vec<Line> = view
        .step
        .puzzle
        .choices()
        .iter()
        .enumerate()
        .map(|(i, choice)| {
            let style = if i == app.choice_cursor {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::styled(
                format!(" {}. {} ", choice.id.to_uppercase(), choice.label),
                style,
            )
        })
        .collect();
    f.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), area);
}

fn render_crossword(f: &mut Frame, app: &App, view: &StepView, area: Rect) {
    let Some(crossword) = app.script.crossword() else {
        return;
    };
    let mut lines = Vec::new();
    let mut current_direction = None;
    for (i, (key, clue)) in crossword.clues().enumerate() {
        if current_direction != Some(key.direction) {
            current_direction = Some(key.direction);
            lines.push(Line::styled(
                key.direction.as_str().to_uppercase(),
                Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            ));
        }

        let entry = app.session.crossword_entry(key);
        let blanks = clue.answer.chars().count().saturating_sub(entry.chars().count());
        let cells = format!("{}{}", entry.to_uppercase(), "_".repeat(blanks));

        let cell_style = if view.crossword_errors.contains(&key) {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let marker = if i == app.clue_cursor { "▶ " } else { "  " };
        lines.push(Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{:<10}", cells), cell_style),
            Span::styled(
                format!(" {}. {}", clue.number, clue.clue),
                Style::default().fg(Color::DarkGray),
            ),
        ]));
    }
    f.render_widget(Paragraph::new(lines), area);
}

fn draw_title_screen(f: &mut Frame, app: &App) {
    let area = f.area();
    let meta = app.script.meta();

    let title_art = format!(
        r#"
    ╔═══════════════════════════════════════════════════════════╗
    ║                                                           ║
    ║         W A L K   ·   M Y S T E R Y                       ║
    ║                                                           ║
    ║         "Class has begun. Step outside... if you dare."   ║
    ║                                                           ║
    ╚═══════════════════════════════════════════════════════════╝

    {}  ·  {}
"#,
        meta.name, meta.area
    );

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(11),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    let title = Paragraph::new(title_art)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    for (option, row) in MenuOption::ALL.into_iter().zip([chunks[1], chunks[2]]) {
        let style = if option == app.menu_selection {
            Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let item = Paragraph::new(format!("  {}  ", option.label()))
            .style(style)
            .alignment(Alignment::Center);
        f.render_widget(item, row);
    }

    let help = Paragraph::new("↑/↓ choose  •  ENTER start walking  •  q leave")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[3]);
}
