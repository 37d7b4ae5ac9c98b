pub mod app;
pub mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use cellar_core::{BlobStore, DisplayMode, ReportStore};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::tui::app::App;

pub fn run<S: BlobStore>(store: &ReportStore<S>, year: i32) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(store, year);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<B: Backend, S: BlobStore>(terminal: &mut Terminal<B>, app: &mut App<S>) -> Result<()> {
    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('m') => app.set_mode(DisplayMode::Monthly),
                    KeyCode::Char('a') => app.set_mode(DisplayMode::Annual),
                    KeyCode::Tab => app.toggle_mode(),
                    KeyCode::Left | KeyCode::Char('h') => app.previous_year(),
                    KeyCode::Right | KeyCode::Char('l') => app.next_year(),
                    _ => {}
                }
            }
        }
    }
}
