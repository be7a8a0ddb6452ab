mod app;
mod ui;

use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use walk_mystery::config::Config;
use walk_mystery::logging;
use walk_mystery::puzzle::{load_tour, Script};

use app::{App, Screen};
use ui::draw_ui;

/// How often the loop wakes without input, so an expiring pulse is redrawn.
const FRAME_INTERVAL: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    let config = Config::parse();
    logging::init(&config)?;

    let script = load_tour(&config.tour)
        .with_context(|| format!("failed to load tour from {}", config.tour.display()))?;
    info!(
        tour = %script.meta().name,
        steps = script.len(),
        "tour loaded"
    );

    if config.check {
        print_summary(&script);
        return Ok(());
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(script);
    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    result?;

    if matches!(app.screen, Screen::Finished) {
        println!("\nSeminar complete. Your history is just beginning.\n");
    }

    Ok(())
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<()> {
    while !app.should_quit {
        let now = Instant::now();
        app.session = app.session.tick(now);
        terminal.draw(|f| draw_ui(f, &*app, now))?;

        if !event::poll(FRAME_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key, Instant::now());
            }
        }
    }
    Ok(())
}

fn print_summary(script: &Script) {
    let meta = script.meta();
    println!("{} ({})", meta.name, meta.area);
    println!("  steps:           {}", script.len());
    println!(
        "  crossword clues: {}",
        script.crossword().map_or(0, |c| c.len())
    );
    for (index, step) in script.steps().iter().enumerate() {
        println!("  {:>2}. {:<28} {:?}", index + 1, step.id(), step.kind());
    }
}
