/// Terminal backends for the display surface and the input source.
///
/// `TerminalCanvas` rasterizes the logical screen onto character cells using
/// half-block glyphs, so each cell shows two logical rows.  `TerminalInput`
/// turns crossterm key events into `InputEvent`s.

use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    style::{self, Attribute, Color, Print},
    terminal, QueueableCommand,
};

use crate::config::GameConfig;
use crate::display::{Canvas, FontSize, Label};
use crate::entities::{InputEvent, Key, Rect};
use crate::game::InputSource;

/// Upper half filled with the foreground colour, lower half with the background.
const HALF_BLOCK: char = '▀';

/// A key counts as held while its last press/repeat is younger than this.
/// Only used on terminals that never report key releases; OS key repeat
/// (≥ 15 Hz) refreshes it well before expiry.
pub const HOLD_WINDOW: Duration = Duration::from_millis(150);

// ── Canvas ────────────────────────────────────────────────────────────────────

struct TextOverlay {
    col: u16,
    row: u16,
    text: String,
    color: Color,
    bold: bool,
}

pub struct TerminalCanvas<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    logical_width: i32,
    logical_height: i32,
    /// One colour per half-cell, `cols` wide and `rows * 2` tall.
    pixels: Vec<Color>,
    background: Color,
    overlays: Vec<TextOverlay>,
    follow_terminal_size: bool,
}

impl<W: Write> TerminalCanvas<W> {
    /// A canvas of a fixed `cols`×`rows` cells.
    pub fn new(out: W, cols: u16, rows: u16, config: &GameConfig) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        TerminalCanvas {
            out,
            cols,
            rows,
            logical_width: config.width,
            logical_height: config.height,
            pixels: vec![Color::Black; cols as usize * rows as usize * 2],
            background: Color::Black,
            overlays: Vec::new(),
            follow_terminal_size: false,
        }
    }

    /// A canvas that tracks the real terminal size, re-checked every present.
    pub fn fit_terminal(out: W, config: &GameConfig) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let mut canvas = Self::new(out, cols, rows, config);
        canvas.follow_terminal_size = true;
        Ok(canvas)
    }

    pub fn cell_size(&self) -> (u16, u16) {
        (self.cols, self.rows)
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
        self.pixels = vec![self.background; self.cols as usize * self.rows as usize * 2];
        self.overlays.clear();
    }

    /// Colour of the half-cell at `(col, pixel_row)`, where each cell row
    /// holds two pixel rows.
    pub fn pixel(&self, col: u16, pixel_row: u16) -> Option<Color> {
        if col >= self.cols || pixel_row >= self.rows * 2 {
            return None;
        }
        Some(self.pixels[pixel_row as usize * self.cols as usize + col as usize])
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn pixel_rows(&self) -> i32 {
        self.rows as i32 * 2
    }

    fn to_col(&self, x: i32) -> i32 {
        x * self.cols as i32 / self.logical_width
    }

    fn to_pixel_row(&self, y: i32) -> i32 {
        y * self.pixel_rows() / self.logical_height
    }

    /// Logical pixels covered by `cells` cells along an axis, rounded up.
    fn span(cells: i32, logical: i32, available: i32) -> i32 {
        (cells * logical + available - 1) / available
    }
}

impl<W: Write> Canvas for TerminalCanvas<W> {
    fn clear(&mut self, color: Color) {
        self.background = color;
        self.pixels.iter_mut().for_each(|p| *p = color);
        self.overlays.clear();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        if rect.width <= 0 || rect.height <= 0 {
            return;
        }
        // Anything visible covers at least one half-cell.
        let c0 = self.to_col(rect.x);
        let c1 = self.to_col(rect.right()).max(c0 + 1);
        let r0 = self.to_pixel_row(rect.y);
        let r1 = self.to_pixel_row(rect.bottom()).max(r0 + 1);

        let cols = self.cols as i32;
        for row in r0.max(0)..r1.min(self.pixel_rows()) {
            for col in c0.max(0)..c1.min(cols) {
                self.pixels[(row * cols + col) as usize] = color;
            }
        }
    }

    fn render_text(&self, text: &str, color: Color, size: FontSize) -> Label {
        let text = match size {
            FontSize::Large => text.to_uppercase(),
            FontSize::Small | FontSize::Medium => text.to_string(),
        };
        let chars = text.chars().count() as i32;
        let width = Self::span(chars, self.logical_width, self.cols as i32);
        let height = Self::span(1, self.logical_height, self.rows as i32);
        Label {
            text,
            color,
            size,
            rect: Rect::new(0, 0, width, height),
        }
    }

    fn blit_text(&mut self, label: &Label) {
        let col = self.to_col(label.rect.x).clamp(0, self.cols as i32 - 1);
        let row = (self.to_pixel_row(label.rect.y) / 2).clamp(0, self.rows as i32 - 1);
        let room = self.cols as usize - col as usize;
        self.overlays.push(TextOverlay {
            col: col as u16,
            row: row as u16,
            text: label.text.chars().take(room).collect(),
            color: label.color,
            bold: label.size != FontSize::Small,
        });
    }

    fn present(&mut self) -> io::Result<()> {
        if self.follow_terminal_size {
            let (cols, rows) = terminal::size()?;
            if (cols, rows) != (self.cols, self.rows) {
                // The frame was drawn for the old size; show it next time.
                self.resize(cols, rows);
                self.out.queue(terminal::Clear(terminal::ClearType::All))?;
                return self.out.flush();
            }
        }

        let cols = self.cols as usize;
        for row in 0..self.rows as usize {
            self.out.queue(cursor::MoveTo(0, row as u16))?;
            let mut current: Option<(Color, Color)> = None;
            for col in 0..cols {
                let top = self.pixels[row * 2 * cols + col];
                let bottom = self.pixels[(row * 2 + 1) * cols + col];
                if current != Some((top, bottom)) {
                    self.out.queue(style::SetForegroundColor(top))?;
                    self.out.queue(style::SetBackgroundColor(bottom))?;
                    current = Some((top, bottom));
                }
                if top == bottom {
                    self.out.queue(Print(' '))?;
                } else {
                    self.out.queue(Print(HALF_BLOCK))?;
                }
            }
        }

        for overlay in &self.overlays {
            self.out.queue(cursor::MoveTo(overlay.col, overlay.row))?;
            self.out.queue(style::SetBackgroundColor(self.background))?;
            self.out.queue(style::SetForegroundColor(overlay.color))?;
            if overlay.bold {
                self.out.queue(style::SetAttribute(Attribute::Bold))?;
            }
            self.out.queue(Print(&overlay.text))?;
            if overlay.bold {
                self.out.queue(style::SetAttribute(Attribute::NormalIntensity))?;
            }
        }

        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

fn key_for(code: KeyCode) -> Option<Key> {
    match code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Key::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Key::Right),
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Some(Key::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Some(Key::Down),
        KeyCode::Char('c') | KeyCode::Char('C') => Some(Key::Start),
        KeyCode::Char('p') | KeyCode::Char('P') => Some(Key::Pause),
        KeyCode::Char('q') | KeyCode::Char('Q') => Some(Key::Quit),
        _ => None,
    }
}

fn is_direction(key: Key) -> bool {
    matches!(key, Key::Left | Key::Right | Key::Up | Key::Down)
}

/// Map one crossterm event to a game event.  Ctrl+C and Esc stand in for
/// closing the window.  Auto-repeat only refreshes direction keys so holding
/// P or C does not toggle the game every repeat.
pub fn translate_event(ev: &Event) -> Option<InputEvent> {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind,
        ..
    }) = ev
    else {
        return None;
    };

    if *kind != KeyEventKind::Release {
        if *code == KeyCode::Esc {
            return Some(InputEvent::Close);
        }
        if *code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return Some(InputEvent::Close);
        }
    }

    let key = key_for(*code)?;
    match kind {
        KeyEventKind::Press => Some(InputEvent::KeyDown(key)),
        KeyEventKind::Repeat if is_direction(key) => Some(InputEvent::KeyDown(key)),
        KeyEventKind::Repeat => None,
        KeyEventKind::Release => Some(InputEvent::KeyUp(key)),
    }
}

pub struct TerminalInput {
    rx: mpsc::Receiver<Event>,
    /// Whether the terminal sends `Release` events (keyboard enhancement).
    reports_release: bool,
    /// Direction key → when it was last pressed or repeated.
    last_seen: HashMap<Key, Instant>,
}

impl TerminalInput {
    /// Start a thread that does nothing but block on `event::read`, sending
    /// events through a channel so the frame loop never blocks on I/O.
    pub fn spawn(reports_release: bool) -> Self {
        let (tx, rx) = mpsc::channel::<Event>();
        thread::spawn(move || loop {
            match event::read() {
                Ok(ev) => {
                    if tx.send(ev).is_err() {
                        break; // receiver dropped → program exiting
                    }
                }
                Err(e) => {
                    log::warn!("terminal event reader stopped: {e}");
                    break;
                }
            }
        });
        Self::from_receiver(rx, reports_release)
    }

    pub fn from_receiver(rx: mpsc::Receiver<Event>, reports_release: bool) -> Self {
        TerminalInput {
            rx,
            reports_release,
            last_seen: HashMap::new(),
        }
    }

    /// Drain pending events as of `now`.  Without release reporting, a
    /// direction key not refreshed within `HOLD_WINDOW` gets a synthesized
    /// `KeyUp`.
    pub fn poll_at(&mut self, now: Instant) -> Vec<InputEvent> {
        let mut events = Vec::new();

        while let Ok(raw) = self.rx.try_recv() {
            let Some(event) = translate_event(&raw) else {
                continue;
            };
            match event {
                InputEvent::KeyDown(key) if is_direction(key) => {
                    self.last_seen.insert(key, now);
                }
                InputEvent::KeyUp(key) => {
                    self.last_seen.remove(&key);
                }
                _ => {}
            }
            events.push(event);
        }

        if !self.reports_release {
            let mut expired: Vec<Key> = self
                .last_seen
                .iter()
                .filter(|(_, seen)| now.saturating_duration_since(**seen) > HOLD_WINDOW)
                .map(|(key, _)| *key)
                .collect();
            // HashMap order is arbitrary; keep the output stable.
            expired.sort_by_key(|key| *key as u8);
            for key in expired {
                self.last_seen.remove(&key);
                events.push(InputEvent::KeyUp(key));
            }
        }

        events
    }
}

impl InputSource for TerminalInput {
    fn poll(&mut self) -> Vec<InputEvent> {
        self.poll_at(Instant::now())
    }
}
