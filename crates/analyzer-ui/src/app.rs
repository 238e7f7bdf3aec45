//! Application state and TUI event loop for the chart viewer.
//!
//! [`App`] owns the theme and the list of chart pages, and pages through them
//! one at a time until the user quits or advances past the last chart.

use std::io::{self, Stdout};
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Frame, Terminal};

use analyzer_core::error::{AnalyzerError, Result};

use crate::chart_view::{self, ChartPage};
use crate::themes::Theme;

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the chart viewer.
pub struct App {
    /// Active colour theme.
    pub theme: Theme,
    /// Every chart, in display order.
    pub pages: Vec<ChartPage>,
    /// Index of the chart on screen.
    pub index: usize,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
}

impl App {
    pub fn new(theme_name: &str, pages: Vec<ChartPage>) -> Self {
        Self {
            theme: Theme::from_name(theme_name),
            pages,
            index: 0,
            should_quit: false,
        }
    }

    pub fn current(&self) -> Option<&ChartPage> {
        self.pages.get(self.index)
    }

    // ── Event loop ────────────────────────────────────────────────────────────

    /// Show the charts until the user quits.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout. The terminal is
    /// restored even when drawing or reading events fails.
    pub fn run(self) -> Result<()> {
        self.run_terminal()
            .map_err(|e| AnalyzerError::Terminal(e.to_string()))
    }

    fn run_terminal(mut self) -> io::Result<()> {
        tracing::debug!(pages = self.pages.len(), "Starting chart viewer");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = match Terminal::new(backend) {
            Ok(t) => t,
            Err(e) => {
                let _ = disable_raw_mode();
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                return Err(e);
            }
        };

        let result = self.event_loop(&mut terminal);

        let restored = restore_terminal(&mut terminal);
        tracing::debug!(last_index = self.index, "Chart viewer closed");

        result.and(restored)
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
        let tick_rate = Duration::from_millis(250);

        while !self.should_quit {
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Apply one key press to the paging state.
    ///
    /// Advancing past the last chart ends the session, like closing the
    /// final chart window.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Right | KeyCode::Char('n') | KeyCode::Char(' ') | KeyCode::Enter => {
                self.next();
            }
            KeyCode::Left | KeyCode::Char('p') => self.previous(),
            _ => {}
        }
    }

    fn next(&mut self) {
        if self.index + 1 >= self.pages.len() {
            self.should_quit = true;
        } else {
            self.index += 1;
        }
    }

    fn previous(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Render the current chart into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        match self.current() {
            Some(page) => chart_view::render_chart_page(
                frame,
                area,
                page,
                self.index,
                self.pages.len(),
                &self.theme,
            ),
            None => chart_view::render_no_data(frame, area, &self.theme),
        }
    }
}

// ── Terminal restore ──────────────────────────────────────────────────────────

/// Leave raw mode and the alternate screen and show the cursor. Every step
/// runs even when an earlier one fails.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    let steps = [
        disable_raw_mode(),
        execute!(terminal.backend_mut(), LeaveAlternateScreen),
        terminal.show_cursor(),
    ];
    first_error(steps)
}

/// The first failure among already-run steps, or `Ok(())`.
fn first_error(results: impl IntoIterator<Item = io::Result<()>>) -> io::Result<()> {
    results.into_iter().collect()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
