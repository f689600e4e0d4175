/// All game entity types — pure data, no simulation logic.

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in logical screen pixels.  `x`/`y` is the top-left
/// corner; the right and bottom edges are exclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// True when the two rectangles share at least one pixel.  Rectangles that
    /// only touch along an edge do not intersect.
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Move the rectangle so its centre lands on `(cx, cy)`.
    pub fn centered_at(&self, cx: i32, cy: i32) -> Rect {
        Rect {
            x: cx - self.width / 2,
            y: cy - self.height / 2,
            ..*self
        }
    }
}

// ── Input ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    /// Start a round from the intro screen, or restart after game over.
    Start,
    Pause,
    Quit,
}

/// One discrete event delivered by the input source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// The window (terminal session) is going away.  Ends the program from
    /// any state.
    Close,
    KeyDown(Key),
    KeyUp(Key),
}

/// Direction keys currently held down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

// ── Entities ──────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    /// Accumulated sub-pixel position.
    pub fx: f64,
    pub fy: f64,
    /// Display position: `fx`/`fy` truncated toward zero.
    pub x: i32,
    pub y: i32,
    /// Per-tick displacement, fixed at launch.
    pub change_x: f64,
    pub change_y: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub change_x: i32,
    pub change_y: i32,
}

// ── Master game state ─────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Intro,
    Playing,
    Paused,
    GameOver,
    Terminated,
}

/// Everything one round owns.  Cloneable so pure update functions can
/// return a new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub projectiles: Vec<Projectile>,
    pub held: HeldKeys,
    /// Ticks survived without a collision.  Doubles as the score.
    pub frame_count: u64,
    pub status: GameStatus,
}
