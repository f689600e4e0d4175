/// Rendering layer — translates game state into draw commands.
///
/// Everything here talks to a `Canvas`, the logical 320×240 drawing surface.
/// No game logic is performed; this module only turns state into rectangles
/// and text.

use std::io;

use crossterm::style::Color;

use crate::compute::{player_rect, projectile_rect};
use crate::config::GameConfig;
use crate::entities::{GameState, GameStatus, Rect};

// ── Colour palette ────────────────────────────────────────────────────────────

pub const C_BACKGROUND: Color = Color::Black;
pub const C_PLAYER: Color = Color::White;
pub const C_PROJECTILE: Color = Color::Yellow;
pub const C_TEXT: Color = Color::White;
pub const C_GAME_OVER: Color = Color::Red;

const START_PROMPT: &str = "Press C to play, P to pause or Q to quit.";

// ── Drawing surface ───────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontSize {
    Small,
    Medium,
    Large,
}

/// Rendered text plus its bounding box in logical pixels.  Move `rect` to
/// place the label before blitting it.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub text: String,
    pub color: Color,
    pub size: FontSize,
    pub rect: Rect,
}

pub trait Canvas {
    fn clear(&mut self, color: Color);
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Lay out `text` with its bounding box at the origin.
    fn render_text(&self, text: &str, color: Color, size: FontSize) -> Label;
    /// Draw a label at the position held in `label.rect`.
    fn blit_text(&mut self, label: &Label);
    /// Show everything drawn since the last present.
    fn present(&mut self) -> io::Result<()>;
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<C: Canvas>(canvas: &mut C, state: &GameState, config: &GameConfig) -> io::Result<()> {
    canvas.clear(C_BACKGROUND);

    match state.status {
        GameStatus::Intro => draw_intro(canvas, config),
        GameStatus::Playing => {
            draw_round(canvas, state, config);
            draw_hud(canvas, state, config);
        }
        GameStatus::Paused => {
            draw_round(canvas, state, config);
            draw_hud(canvas, state, config);
            draw_paused(canvas, config);
        }
        GameStatus::GameOver => draw_game_over(canvas, state, config),
        GameStatus::Terminated => return Ok(()),
    }

    canvas.present()
}

/// Survival time as `MM:SS` at the play frame rate.
pub fn format_elapsed(frame_count: u64, play_fps: u32) -> String {
    let total_seconds = frame_count / u64::from(play_fps.max(1));
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

// ── Text helpers ──────────────────────────────────────────────────────────────

/// Draw `msg` centred horizontally, `y_displace` pixels below screen centre.
pub fn message_to_screen<C: Canvas>(
    canvas: &mut C,
    config: &GameConfig,
    msg: &str,
    color: Color,
    y_displace: i32,
    size: FontSize,
) {
    let mut label = canvas.render_text(msg, color, size);
    label.rect = label
        .rect
        .centered_at(config.width / 2, config.height / 2 + y_displace);
    canvas.blit_text(&label);
}

// ── Screens ───────────────────────────────────────────────────────────────────

fn draw_intro<C: Canvas>(canvas: &mut C, config: &GameConfig) {
    message_to_screen(
        canvas,
        config,
        "Welcome to BulletHell Training",
        C_TEXT,
        -100,
        FontSize::Large,
    );
    message_to_screen(canvas, config, START_PROMPT, C_TEXT, 0, FontSize::Small);
}

fn draw_round<C: Canvas>(canvas: &mut C, state: &GameState, config: &GameConfig) {
    for p in &state.projectiles {
        canvas.fill_rect(projectile_rect(p, config), C_PROJECTILE);
    }
    canvas.fill_rect(player_rect(&state.player, config), C_PLAYER);
}

fn draw_hud<C: Canvas>(canvas: &mut C, state: &GameState, config: &GameConfig) {
    // Score — top left
    let score = canvas.render_text(
        &format!("Score: {}", state.frame_count),
        C_TEXT,
        FontSize::Small,
    );
    canvas.blit_text(&score);

    // Elapsed time — top right
    let mut time = canvas.render_text(
        &format!("Time: {}", format_elapsed(state.frame_count, config.play_fps)),
        C_TEXT,
        FontSize::Small,
    );
    time.rect.x = config.width - time.rect.width;
    canvas.blit_text(&time);
}

fn draw_paused<C: Canvas>(canvas: &mut C, config: &GameConfig) {
    message_to_screen(canvas, config, "Paused", C_TEXT, -20, FontSize::Large);
    message_to_screen(canvas, config, "Press P to resume", C_TEXT, 10, FontSize::Small);
}

fn draw_game_over<C: Canvas>(canvas: &mut C, state: &GameState, config: &GameConfig) {
    message_to_screen(canvas, config, "Game Over", C_GAME_OVER, -50, FontSize::Large);
    message_to_screen(
        canvas,
        config,
        &format!("Total Score: {}", state.frame_count),
        C_TEXT,
        -20,
        FontSize::Medium,
    );
    message_to_screen(canvas, config, START_PROMPT, C_TEXT, 10, FontSize::Small);
}
