use std::io;

use anyhow::Result;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use multiscroll_core::AppConfig;
use multiscroll_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    scroll::FlingConfigExt,
    widgets::{StatusBarWidget, SyncedTableWidget},
};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

pub fn run(config: &AppConfig) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, SetTitle("multiscroll"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, config);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(terminal: &mut Term, config: &AppConfig) -> Result<()> {
    let mut app = App::new(config);
    app.resize(terminal.size()?.width);
    tracing::info!(rows = app.rows.len(), "Table demo started");

    let mut event_handler =
        EventHandler::new(config.ui.tick_rate_ms, config.ui.fling.frame_duration());

    // Track if we need high frame rate while flings run
    let mut needs_fast_update = false;

    loop {
        terminal.draw(|frame| {
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(1), Constraint::Length(1)])
                .split(frame.area());

            SyncedTableWidget::render(frame, layout[0], &app);
            StatusBarWidget::render(frame, layout[1], &app);
        })?;

        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };
        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => app.apply(handle_key_event(key)),
                AppEvent::Resize(width, _) => app.resize(width),
                AppEvent::Tick(elapsed) => app.on_tick(elapsed),
            }
        }

        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            break;
        }
    }

    tracing::info!(displacement = app.scroller.displacement(), "Table demo finished");
    Ok(())
}
