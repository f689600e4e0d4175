/// The frame loop: poll input, advance the simulation, render, then wait out
/// the rest of the frame.  One loop drives every screen; restarting a round
/// is a state transition, never a nested call.

use std::thread;
use std::time::{Duration, Instant};

use rand::Rng;

use crate::compute::{apply_input, intro_state, tick};
use crate::config::GameConfig;
use crate::display::{render, Canvas};
use crate::entities::{GameState, GameStatus, InputEvent};
use crate::error::GameError;

/// Source of discrete input events, drained once per frame.
pub trait InputSource {
    fn poll(&mut self) -> Vec<InputEvent>;
}

/// Blocks until the current frame's time budget is used up.
pub trait Pacer {
    fn wait(&mut self, fps: u32);
}

/// Sleeps away whatever is left of `1 / fps` since the previous wait.
pub struct FramePacer {
    frame_start: Instant,
}

impl FramePacer {
    pub fn new() -> Self {
        FramePacer {
            frame_start: Instant::now(),
        }
    }
}

impl Default for FramePacer {
    fn default() -> Self {
        Self::new()
    }
}

impl Pacer for FramePacer {
    fn wait(&mut self, fps: u32) {
        let budget = Duration::from_secs(1) / fps.max(1);
        let elapsed = self.frame_start.elapsed();
        if elapsed < budget {
            thread::sleep(budget - elapsed);
        }
        self.frame_start = Instant::now();
    }
}

/// Frames per second for the screen `status` is showing.
pub fn frame_rate(status: GameStatus, config: &GameConfig) -> u32 {
    match status {
        GameStatus::Playing => config.play_fps,
        _ => config.intro_fps,
    }
}

/// Apply this frame's events in order, then tick the round once.
pub fn step_frame(
    state: &GameState,
    events: &[InputEvent],
    config: &GameConfig,
    rng: &mut impl Rng,
) -> GameState {
    let mut next = state.clone();
    for &event in events {
        next = apply_input(&next, event, config, rng);
        if next.status == GameStatus::Terminated {
            return next;
        }
    }
    tick(&next, config, rng)
}

fn log_transition(before: &GameState, after: &GameState) {
    if before.status == after.status {
        return;
    }
    match (before.status, after.status) {
        (GameStatus::Intro | GameStatus::GameOver, GameStatus::Playing) => {
            log::info!("round started with {} projectiles", after.projectiles.len());
        }
        (_, GameStatus::GameOver) => {
            log::info!("round over, score {}", after.frame_count);
        }
        (_, GameStatus::Paused) => log::info!("paused at frame {}", after.frame_count),
        (GameStatus::Paused, GameStatus::Playing) => log::info!("resumed"),
        (_, GameStatus::Terminated) => log::info!("quit from {:?}", before.status),
        _ => {}
    }
}

/// Run until the player quits or closes the window.  Returns the last state,
/// whose `frame_count` is the score of the final round.
pub fn run<C, I, P, R>(
    canvas: &mut C,
    input: &mut I,
    pacer: &mut P,
    config: &GameConfig,
    rng: &mut R,
) -> Result<GameState, GameError>
where
    C: Canvas,
    I: InputSource,
    P: Pacer,
    R: Rng,
{
    let mut state = intro_state(config);

    loop {
        let events = input.poll();
        let next = step_frame(&state, &events, config, rng);
        log_transition(&state, &next);
        state = next;

        if state.status == GameStatus::Terminated {
            return Ok(state);
        }

        render(canvas, &state, config)?;
        pacer.wait(frame_rate(state.status, config));
    }
}
