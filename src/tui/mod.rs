// SPDX-FileCopyrightText: 2026 charhop contributors
// SPDX-License-Identifier: MIT

//! Interactive pager with jump-to-character hotspot navigation.
//!
//! The pager owns the cursor and the visible window; the engine only
//! ever sees char offsets and a revision token. Hotspot labels are
//! painted over the buffer text at their occurrence's screen cell;
//! occurrences outside the window are simply not renderable and are
//! skipped, never an error.

mod theme;


use std::cell::RefCell;
use std::error::Error;
use std::io;
use std::path::Path;
use std::rc::Rc;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::Paragraph,
};

use crate::config::Config;
use crate::engine::{Assignment, JumpEngine, KeyOutcome, NavListener, NavState};
use crate::model::Region;
use crate::text::{Buffer, TextSource};
use theme::TuiTheme;

/// Runs the pager over the file at `path`.
pub fn run(path: &Path, config: Config) -> Result<(), Box<dyn Error>> {
    let contents = std::fs::read_to_string(path)
        .map_err(|err| format!("cannot read {}: {err}", path.display()))?;
    run_with_buffer(Buffer::new(contents), config)
}

pub fn run_with_buffer(buffer: Buffer, config: Config) -> Result<(), Box<dyn Error>> {
    let theme = TuiTheme::from_env()?;
    let mut terminal = TerminalSession::new()?;
    let mut app = App::new(buffer, config, theme);

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key(key),
                _ => {}
            }
        }
    }

    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.size());

    app.view_height = chunks[0].height as usize;
    app.view_width = chunks[0].width as usize;

    frame.render_widget(Paragraph::new(app.buffer_text()), chunks[0]);
    frame.render_widget(Paragraph::new(app.footer_line()), chunks[1]);
}

/// Turns engine transitions into user feedback, the render side of the
/// engine's listener interface.
#[derive(Clone, Default)]
struct FeedbackListener {
    message: Rc<RefCell<Option<String>>>,
}

impl NavListener for FeedbackListener {
    fn on_state_changed(&mut self, state: NavState) {
        let mut message = self.message.borrow_mut();
        *message = match state {
            NavState::TargetNotFound => Some("No occurrences in view".to_owned()),
            _ => None,
        };
    }

    fn on_assignment_changed(&mut self, _assignment: Option<&Assignment>) {
        // The pager redraws every frame from the engine's current
        // assignment; nothing to cache here.
    }
}

struct App {
    buffer: Buffer,
    engine: JumpEngine,
    feedback: Rc<RefCell<Option<String>>>,
    theme: TuiTheme,
    cursor: usize,
    scroll: usize,
    view_height: usize,
    view_width: usize,
    toast: Option<String>,
    should_quit: bool,
}

impl App {
    fn new(buffer: Buffer, config: Config, theme: TuiTheme) -> Self {
        let mut engine = JumpEngine::new(config.case_sensitive);
        let listener = FeedbackListener::default();
        let feedback = Rc::clone(&listener.message);
        engine.subscribe(Box::new(listener));
        Self {
            buffer,
            engine,
            feedback,
            theme,
            cursor: 0,
            scroll: 0,
            view_height: 24,
            view_width: 80,
            toast: None,
            should_quit: false,
        }
    }

    /// Char offset one past the last character of the visible window.
    fn visible_end(&self) -> usize {
        match self.buffer.line_start(self.scroll + self.view_height) {
            Some(start) => start.saturating_sub(1),
            None => self.buffer.len(),
        }
    }

    /// The region a jump scans: strictly after the cursor through the
    /// end of the visible window.
    fn jump_region(&self) -> Region {
        Region::after_cursor(self.cursor, self.visible_end())
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        self.toast = None;
        match self.engine.state() {
            NavState::Idle => self.handle_idle_key(key.code),
            NavState::AwaitingTarget => self.handle_target_key(key.code),
            NavState::AwaitingDecision => self.handle_decision_key(key.code),
            NavState::TargetNotFound => self.handle_not_found_key(key.code),
        }
    }

    fn handle_idle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('f') => self.engine.begin_search(),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor_vertically(-1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor_vertically(1),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor_horizontally(-1),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor_horizontally(1),
            KeyCode::PageUp => self.move_cursor_vertically(-(self.view_height as isize)),
            KeyCode::PageDown => self.move_cursor_vertically(self.view_height as isize),
            KeyCode::Char('g') => self.cursor = 0,
            KeyCode::Char('G') => self.cursor = self.buffer.len().saturating_sub(1),
            KeyCode::Home => self.move_cursor_to_line_edge(true),
            KeyCode::End => self.move_cursor_to_line_edge(false),
            _ => {}
        }
        self.ensure_cursor_visible();
    }

    fn handle_target_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.engine.cancel(),
            KeyCode::Char(target) => {
                let region = self.jump_region();
                self.engine.set_target(&self.buffer, region, target);
            }
            _ => {}
        }
    }

    fn handle_decision_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc => self.engine.cancel(),
            KeyCode::Char(key) => match self.engine.resolve_key(&self.buffer, key) {
                KeyOutcome::Jumped(occurrence) => {
                    self.cursor = occurrence.offset();
                    self.ensure_cursor_visible();
                }
                KeyOutcome::Narrowed | KeyOutcome::NotFound => {}
            },
            // Scrolling changes the visible region; the assignment is
            // recomputed wholesale, never patched.
            KeyCode::Up => self.scroll_and_rescan(-1),
            KeyCode::Down => self.scroll_and_rescan(1),
            KeyCode::PageUp => self.scroll_and_rescan(-(self.view_height as isize)),
            KeyCode::PageDown => self.scroll_and_rescan(self.view_height as isize),
            _ => {}
        }
    }

    fn handle_not_found_key(&mut self, code: KeyCode) {
        match code {
            // Scrolling changes the visible region, which may re-expose
            // occurrences of the same target character. The cursor stays
            // put; only the window moves.
            KeyCode::Up | KeyCode::Char('k') => self.scroll_and_retry(-1),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_and_retry(1),
            KeyCode::PageUp => self.scroll_and_retry(-(self.view_height as isize)),
            KeyCode::PageDown => self.scroll_and_retry(self.view_height as isize),
            _ => self.engine.cancel(),
        }
    }

    fn scroll_and_rescan(&mut self, lines: isize) {
        self.scroll_by(lines);
        let region = self.jump_region();
        self.engine.rescan(&self.buffer, region);
    }

    fn scroll_and_retry(&mut self, lines: isize) {
        self.scroll_by(lines);
        let region = self.jump_region();
        self.engine.retry_with_same_char(&self.buffer, region);
    }

    fn move_cursor_horizontally(&mut self, delta: isize) {
        if delta < 0 {
            self.cursor = self.cursor.saturating_sub(delta.unsigned_abs());
        } else {
            let max = self.buffer.len().saturating_sub(1);
            self.cursor = (self.cursor + delta as usize).min(max);
        }
    }

    fn move_cursor_vertically(&mut self, delta: isize) {
        let Some((line, column)) = self.buffer.position(self.cursor) else {
            return;
        };
        let target = line.saturating_add_signed(delta).min(self.buffer.line_count() - 1);
        let Some(start) = self.buffer.line_start(target) else {
            return;
        };
        let width = self.buffer.line(target).map_or(0, <[char]>::len);
        self.cursor = start + column.min(width.saturating_sub(1));
    }

    fn move_cursor_to_line_edge(&mut self, start: bool) {
        let Some((line, _)) = self.buffer.position(self.cursor) else {
            return;
        };
        let Some(line_start) = self.buffer.line_start(line) else {
            return;
        };
        let width = self.buffer.line(line).map_or(0, <[char]>::len);
        self.cursor = if start {
            line_start
        } else {
            line_start + width.saturating_sub(1)
        };
    }

    fn scroll_by(&mut self, lines: isize) {
        let max = self.buffer.line_count().saturating_sub(1);
        self.scroll = self.scroll.saturating_add_signed(lines).min(max);
    }

    fn ensure_cursor_visible(&mut self) {
        let Some((line, _)) = self.buffer.position(self.cursor) else {
            return;
        };
        if line < self.scroll {
            self.scroll = line;
        } else if self.view_height > 0 && line >= self.scroll + self.view_height {
            self.scroll = line + 1 - self.view_height;
        }
    }

    fn buffer_text(&self) -> Text<'static> {
        let hotspots = visible_hotspots(
            self.engine.assignment(),
            &self.buffer,
            self.scroll,
            self.view_height,
            self.view_width,
        );
        let cursor_cell = screen_position(
            &self.buffer,
            self.scroll,
            self.view_height,
            self.view_width,
            self.cursor,
        );

        let mut lines = Vec::with_capacity(self.view_height);
        for row in 0..self.view_height {
            let Some(chars) = self.buffer.line(self.scroll + row) else {
                break;
            };
            let mut cells: Vec<(char, Style)> = chars
                .iter()
                .take(self.view_width)
                .map(|&ch| (ch, self.theme.base_style()))
                .collect();
            for hotspot in hotspots.iter().filter(|hotspot| hotspot.row == row) {
                if let Some(cell) = cells.get_mut(hotspot.column) {
                    *cell = (hotspot.label, self.theme.hotspot_style(hotspot.is_group));
                }
            }
            if let Some((cursor_row, cursor_column)) = cursor_cell {
                if cursor_row == row {
                    if let Some(cell) = cells.get_mut(cursor_column) {
                        cell.1 = cell.1.patch(self.theme.cursor_style());
                    } else if cells.is_empty() {
                        // Cursor on an empty line still needs a cell.
                        cells.push((' ', self.theme.cursor_style()));
                    }
                }
            }
            lines.push(cells_to_line(&cells));
        }
        Text::from(lines)
    }

    fn footer_line(&self) -> Line<'static> {
        let message = self.toast.clone().or_else(|| self.feedback.borrow().clone());
        footer_line(self.engine.state(), self.engine.target(), message.as_deref(), &self.theme)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ScreenHotspot {
    row: usize,
    column: usize,
    label: char,
    is_group: bool,
}

/// Hotspots of `assignment` that land inside the rendered window.
/// Off-screen occurrences are unrenderable and silently skipped.
fn visible_hotspots(
    assignment: Option<&Assignment>,
    buffer: &Buffer,
    scroll: usize,
    view_height: usize,
    view_width: usize,
) -> Vec<ScreenHotspot> {
    let Some(assignment) = assignment else {
        return Vec::new();
    };
    let mut hotspots = Vec::with_capacity(assignment.occurrence_count());
    for entry in assignment.entries() {
        for occurrence in entry.occurrences() {
            let Some((row, column)) =
                screen_position(buffer, scroll, view_height, view_width, occurrence.offset())
            else {
                continue;
            };
            hotspots.push(ScreenHotspot {
                row,
                column,
                label: entry.symbol(),
                is_group: entry.is_group(),
            });
        }
    }
    hotspots
}

/// Window-relative `(row, column)` of a char offset, or `None` when the
/// offset is outside the rendered window.
fn screen_position(
    buffer: &Buffer,
    scroll: usize,
    view_height: usize,
    view_width: usize,
    offset: usize,
) -> Option<(usize, usize)> {
    let (line, column) = buffer.position(offset)?;
    if line < scroll || line >= scroll + view_height || column >= view_width {
        return None;
    }
    Some((line - scroll, column))
}

fn cells_to_line(cells: &[(char, Style)]) -> Line<'static> {
    let mut spans: Vec<Span<'static>> = Vec::new();
    let mut run = String::new();
    let mut run_style: Option<Style> = None;
    for &(ch, style) in cells {
        match run_style {
            Some(current) if current == style => run.push(ch),
            Some(current) => {
                spans.push(Span::styled(std::mem::take(&mut run), current));
                run.push(ch);
                run_style = Some(style);
            }
            None => {
                run.push(ch);
                run_style = Some(style);
            }
        }
    }
    if let Some(style) = run_style {
        spans.push(Span::styled(run, style));
    }
    Line::from(spans)
}

fn footer_line(
    state: NavState,
    target: Option<char>,
    message: Option<&str>,
    theme: &TuiTheme,
) -> Line<'static> {
    if let Some(message) = message {
        return Line::from(Span::styled(format!(" {message} "), theme.toast_style()));
    }

    match state {
        NavState::Idle => {
            let mut spans = Vec::new();
            for (key, label) in
                [("f", "jump"), ("h j k l", "move"), ("g G", "top/bottom"), ("q", "quit")]
            {
                spans.push(Span::styled(format!(" {key} "), theme.footer_key_style()));
                spans.push(Span::styled(format!("{label} "), theme.footer_label_style()));
            }
            Line::from(spans)
        }
        NavState::AwaitingTarget => Line::from(Span::styled(
            " jump: type a character (Esc cancels) ".to_owned(),
            theme.prompt_style(),
        )),
        NavState::AwaitingDecision => {
            let target = target.unwrap_or(' ');
            Line::from(Span::styled(
                format!(" jump '{target}': type a label (Esc cancels) "),
                theme.prompt_style(),
            ))
        }
        NavState::TargetNotFound => Line::from(Span::styled(
            " no occurrences; scroll to retry, any other key cancels ".to_owned(),
            theme.prompt_style(),
        )),
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}
