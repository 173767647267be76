use std::io;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::core::monitor::{Monitor, TickReport, TickUpdate};

use super::event_handler::MonitorEvent;
use super::render::render_ui;

/// Monitor application state
pub struct MonitorApp {
    pub monitor: Monitor,
    pub report: Option<TickReport>,
    pub last_failure: Option<String>,
    pub should_quit: bool,
    pub show_help: bool,
    pub interval_ms: u64,
}

impl MonitorApp {
    pub fn new(monitor: Monitor, interval_ms: u64) -> Self {
        Self {
            monitor,
            report: None,
            last_failure: None,
            should_quit: false,
            show_help: false,
            interval_ms,
        }
    }

    /// Run one pipeline tick and fold the outcome into the UI state.
    ///
    /// A failed collection keeps the previous report on screen and shows
    /// the failure banner; the loop itself never stops on a bad tick.
    pub fn update(&mut self) {
        match self.monitor.tick() {
            TickUpdate::Report(report) => {
                self.report = Some(report);
                self.last_failure = None;
            }
            TickUpdate::CollectionFailed { error, .. } => {
                self.last_failure = Some(error);
            }
            TickUpdate::Pending => {}
        }
    }

    /// Handle keyboard events
    pub fn handle_event(&mut self, event: MonitorEvent) {
        match event {
            MonitorEvent::Quit => self.should_quit = true,
            MonitorEvent::ToggleHelp => self.show_help = !self.show_help,
            MonitorEvent::None => {}
        }
    }
}

/// Run the monitor TUI application
pub fn run_monitor_app(monitor: Monitor, interval_ms: u64) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = MonitorApp::new(monitor, interval_ms);
    let tick_rate = Duration::from_millis(app.interval_ms);

    // Wait for the CPU measurement interval before the first collection
    std::thread::sleep(sysinfo::MINIMUM_CPU_UPDATE_INTERVAL);
    app.update();

    let mut last_tick = Instant::now();

    // Main loop
    loop {
        terminal.draw(|frame| render_ui(frame, &app))?;

        // Handle events with timeout
        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout).context("Event poll failed")? {
            if let Event::Key(key) = event::read().context("Event read failed")? {
                if key.kind == KeyEventKind::Press {
                    let monitor_event = match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => MonitorEvent::Quit,
                        KeyCode::Char('?') | KeyCode::Char('h') => MonitorEvent::ToggleHelp,
                        _ => MonitorEvent::None,
                    };
                    app.handle_event(monitor_event);
                }
            }
        }

        if app.should_quit {
            break;
        }

        // Update metrics on tick
        if last_tick.elapsed() >= tick_rate {
            app.update();
            last_tick = Instant::now();
        }
    }

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}
