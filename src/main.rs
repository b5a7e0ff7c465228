//! Key Highlight - typing practice in the terminal
//!
//! Letter, word, zone and reveal drills on top of the highlighting engines.

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode as CtKeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::Style,
    symbols::border,
    widgets::{Block, Borders},
    Terminal,
};
use std::fs::File;
use std::io::stdout;
use std::time::Instant;

use key_highlight::{
    config::{self, Config},
    ui::{App, AppState, AppView, HelpPanel, KeyboardVisual, StatsPanel, StatusBar, TabBar, TargetLine, ThemeColors},
};

/// Log to a file next to the config so the terminal UI stays clean
fn init_logging() {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if let Ok(dir) = config::app_dir() {
        if let Ok(file) = File::create(dir.join("key-highlight.log")) {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }
    }
    builder.init();
}

fn load_config() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("using default config: {}", e);
            Config::default()
        }
    }
}

fn main() -> Result<()> {
    init_logging();
    let config = load_config();
    let colors = ThemeColors::from_theme(config.ui.theme);
    let tick_rate = config.refresh_interval();
    let mut app = App::new(config);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    loop {
        app.tick(Instant::now());

        terminal.draw(|frame| {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(1), // Tab bar
                    Constraint::Length(3), // Target text
                    Constraint::Length(6), // Keyboard visual
                    Constraint::Min(5),    // Stats or help
                    Constraint::Length(1), // Status bar
                ])
                .split(frame.area());

            let tab_names: Vec<&str> = AppView::all().iter().map(|v| v.name()).collect();
            frame.render_widget(TabBar::new(&tab_names, app.view.index()), chunks[0]);

            let target_block = Block::default()
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .border_style(Style::default().fg(colors.dim));
            let target_inner = target_block.inner(chunks[1]);
            frame.render_widget(target_block, chunks[1]);
            match app.view {
                AppView::Letters => frame.render_widget(
                    TargetLine::new(app.tracker.target(), app.tracker.position(), colors),
                    target_inner,
                ),
                AppView::Words => frame.render_widget(
                    TargetLine::new(app.sequence.keys(), app.sequence.current_index(), colors),
                    target_inner,
                ),
                AppView::Reveal => {
                    let shown = app.revealer.revealed_count();
                    frame.render_widget(
                        TargetLine::new(app.revealer.keys(), shown, colors).visible(shown),
                        target_inner,
                    )
                }
                AppView::Zones | AppView::Help => {}
            }

            let kb_block = Block::default()
                .title(" ⌨ Keyboard ")
                .borders(Borders::ALL)
                .border_set(border::ROUNDED)
                .border_style(Style::default().fg(colors.dim));
            let kb_inner = kb_block.inner(chunks[2]);
            frame.render_widget(kb_block, chunks[2]);
            frame.render_widget(KeyboardVisual::new(app.highlights(), colors), kb_inner);

            match app.view {
                AppView::Help => frame.render_widget(HelpPanel, chunks[3]),
                _ => {
                    let lines = app.current_lines();
                    frame.render_widget(StatsPanel::new(&lines, app.view.name(), colors), chunks[3]);
                }
            }

            let elapsed = app.elapsed_formatted();
            let status = StatusBar::new(app.view.name(), &elapsed, app.total_presses)
                .message(app.get_status());
            frame.render_widget(status, chunks[4]);
        })?;

        // Wake up early for pending engine timers
        let timeout = app
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(Instant::now()).min(tick_rate))
            .unwrap_or(tick_rate);

        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    CtKeyCode::Esc => app.quit(),
                    CtKeyCode::BackTab => app.prev_view(),
                    CtKeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
                        app.prev_view()
                    }
                    CtKeyCode::Tab => app.next_view(),
                    CtKeyCode::F(1) => app.view = AppView::Help,
                    CtKeyCode::F(2) => app.reset_current(),
                    CtKeyCode::F(3) => app.reset_all(),
                    CtKeyCode::F(4) => {
                        let filename = format!(
                            "typing_report_{}.json",
                            chrono::Utc::now().format("%Y%m%d_%H%M%S")
                        );
                        if let Err(e) = app.export_report(&filename) {
                            log::warn!("report export failed: {}", e);
                            app.set_status(format!("Export failed: {}", e));
                        }
                    }
                    CtKeyCode::Backspace => app.handle_backspace(),
                    CtKeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                        app.handle_char(c)
                    }
                    _ => {}
                }
            }
        }

        if app.state == AppState::Quitting {
            break;
        }
    }

    app.shutdown();

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    println!("\nKey Highlight session complete.");
    println!("Keys pressed: {}", app.total_presses);
    println!("Session duration: {}", app.elapsed_formatted());

    Ok(())
}
