/// Pure game-logic functions.
///
/// Every public function takes immutable references to the current
/// `GameState` / entity and the `GameConfig` (and, where needed, an RNG
/// handle) and returns a brand-new value.  Side effects are limited to the
/// injected RNG.

use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{
    GameState, GameStatus, HeldKeys, InputEvent, Key, Player, Projectile, Rect,
};

// ── Projectile kinematics ────────────────────────────────────────────────────

/// Per-tick displacement for a projectile travelling from `start` toward
/// `dest` at `speed` pixels per tick.
pub fn aim(start_x: f64, start_y: f64, dest_x: f64, dest_y: f64, speed: f64) -> (f64, f64) {
    let angle = (dest_y - start_y).atan2(dest_x - start_x);
    (angle.cos() * speed, angle.sin() * speed)
}

pub fn launch_projectile(
    start_x: i32,
    start_y: i32,
    dest_x: i32,
    dest_y: i32,
    speed: f64,
) -> Projectile {
    let (change_x, change_y) = aim(
        start_x as f64,
        start_y as f64,
        dest_x as f64,
        dest_y as f64,
        speed,
    );
    Projectile {
        fx: start_x as f64,
        fy: start_y as f64,
        x: start_x,
        y: start_y,
        change_x,
        change_y,
    }
}

/// Move a projectile one tick.  Returns `None` once its display position has
/// left the screen; positions on the edge itself are still on screen.
pub fn advance_projectile(p: &Projectile, config: &GameConfig) -> Option<Projectile> {
    let fx = p.fx + p.change_x;
    let fy = p.fy + p.change_y;
    // `as` truncates toward zero, so -0.5 still displays at 0.
    let x = fx as i32;
    let y = fy as i32;
    if x < 0 || x > config.width || y < 0 || y > config.height {
        return None;
    }
    Some(Projectile { fx, fy, x, y, ..p.clone() })
}

pub fn projectile_rect(p: &Projectile, config: &GameConfig) -> Rect {
    Rect::new(p.x, p.y, config.projectile_size, config.projectile_size)
}

// ── Player controller ────────────────────────────────────────────────────────

pub fn player_rect(player: &Player, config: &GameConfig) -> Rect {
    Rect::new(player.x, player.y, config.player_width, config.player_height)
}

/// Record a direction key going down or up.  Non-direction keys leave the set
/// untouched, as does releasing a key that was never pressed.
pub fn set_held(held: HeldKeys, key: Key, down: bool) -> HeldKeys {
    match key {
        Key::Left => HeldKeys { left: down, ..held },
        Key::Right => HeldKeys { right: down, ..held },
        Key::Up => HeldKeys { up: down, ..held },
        Key::Down => HeldKeys { down, ..held },
        Key::Start | Key::Pause | Key::Quit => held,
    }
}

/// Velocity implied by the held keys.  Opposite keys cancel.
pub fn velocity(held: &HeldKeys) -> (i32, i32) {
    let axis = |neg: bool, pos: bool| pos as i32 - neg as i32;
    (axis(held.left, held.right), axis(held.up, held.down))
}

/// Apply one tick of velocity, then clamp each axis to the screen.
pub fn advance_player(player: &Player, config: &GameConfig) -> Player {
    let x = (player.x + player.change_x).clamp(0, config.width - config.player_width);
    let y = (player.y + player.change_y).clamp(0, config.height - config.player_height);
    Player { x, y, ..player.clone() }
}

// ── Spawn policy ─────────────────────────────────────────────────────────────

/// Pick a projectile on a random screen edge, aimed at a random point on the
/// screen, with a speed inside the configured band.
pub fn spawn_projectile(config: &GameConfig, rng: &mut impl Rng) -> Projectile {
    let edge: f64 = rng.gen();
    let (start_x, start_y) = if edge < 0.25 {
        (0, rng.gen_range(0..config.height))
    } else if edge < 0.50 {
        (config.width, rng.gen_range(0..config.height))
    } else if edge < 0.75 {
        (rng.gen_range(0..config.width), 0)
    } else {
        (rng.gen_range(0..config.width), config.height)
    };

    let dest_x = rng.gen_range(0..config.width);
    let dest_y = rng.gen_range(0..config.height);
    let speed = rng.gen_range(config.min_speed..=config.max_speed);

    launch_projectile(start_x, start_y, dest_x, dest_y, speed)
}

// ── Constructors ─────────────────────────────────────────────────────────────

fn centered_player(config: &GameConfig) -> Player {
    Player {
        x: config.width / 2,
        y: config.height / 2,
        change_x: 0,
        change_y: 0,
    }
}

/// The title screen: no projectiles, nothing moving.
pub fn intro_state(config: &GameConfig) -> GameState {
    GameState {
        player: centered_player(config),
        projectiles: Vec::new(),
        held: HeldKeys::default(),
        frame_count: 0,
        status: GameStatus::Intro,
    }
}

/// A fresh round with the full projectile population already in flight.
pub fn new_round(config: &GameConfig, rng: &mut impl Rng) -> GameState {
    let projectiles = (0..config.population)
        .map(|_| spawn_projectile(config, rng))
        .collect();
    GameState {
        player: centered_player(config),
        projectiles,
        held: HeldKeys::default(),
        frame_count: 0,
        status: GameStatus::Playing,
    }
}

// ── Input-driven state transitions ───────────────────────────────────────────

fn with_status(state: &GameState, status: GameStatus) -> GameState {
    GameState {
        status,
        ..state.clone()
    }
}

fn steer(state: &GameState, key: Key, down: bool) -> GameState {
    let held = set_held(state.held, key, down);
    let (change_x, change_y) = velocity(&held);
    GameState {
        held,
        player: Player {
            change_x,
            change_y,
            ..state.player.clone()
        },
        ..state.clone()
    }
}

/// Feed one input event through the state machine.
///
/// `Close` ends the program from anywhere.  Start begins a round from the
/// intro or game-over screen, Quit exits from every screen except an active
/// round, and Pause toggles between playing and paused.
pub fn apply_input(
    state: &GameState,
    event: InputEvent,
    config: &GameConfig,
    rng: &mut impl Rng,
) -> GameState {
    use GameStatus::*;

    match (state.status, event) {
        (Terminated, _) => state.clone(),
        (_, InputEvent::Close) => with_status(state, Terminated),

        (Intro | GameOver, InputEvent::KeyDown(Key::Start)) => new_round(config, rng),
        (Intro | Paused | GameOver, InputEvent::KeyDown(Key::Quit)) => {
            with_status(state, Terminated)
        }

        (Playing, InputEvent::KeyDown(Key::Pause)) => with_status(state, Paused),
        (Paused, InputEvent::KeyDown(Key::Pause)) => with_status(state, Playing),

        (Playing | Paused, InputEvent::KeyDown(key)) => steer(state, key, true),
        (_, InputEvent::KeyUp(key)) => steer(state, key, false),

        _ => state.clone(),
    }
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance a round by one frame.  Does nothing unless the round is playing.
/// All randomness comes through `rng` so callers control determinism.
pub fn tick(state: &GameState, config: &GameConfig, rng: &mut impl Rng) -> GameState {
    if state.status != GameStatus::Playing {
        return state.clone();
    }

    // ── 1. Move projectiles, dropping those that left the screen ─────────────
    let mut projectiles: Vec<Projectile> = state
        .projectiles
        .iter()
        .filter_map(|p| advance_projectile(p, config))
        .collect();

    // ── 2. Move the player ───────────────────────────────────────────────────
    let player = advance_player(&state.player, config);

    // ── 3. Top the population back up, one per frame ─────────────────────────
    if projectiles.len() < config.population {
        projectiles.push(spawn_projectile(config, rng));
    }

    // ── 4. Collision: player ↔ every projectile ──────────────────────────────
    let hitbox = player_rect(&player, config);
    let before = projectiles.len();
    projectiles.retain(|p| !projectile_rect(p, config).intersects(&hitbox));
    let hit = projectiles.len() < before;

    // ── 5. Score the frame, or end the round ─────────────────────────────────
    let (status, frame_count) = if hit {
        (GameStatus::GameOver, state.frame_count)
    } else {
        (GameStatus::Playing, state.frame_count + 1)
    };

    GameState {
        player,
        projectiles,
        held: state.held,
        frame_count,
        status,
    }
}
