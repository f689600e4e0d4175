/// Process-wide settings, built once before the frame loop starts and handed
/// to every component that needs screen size, population or pacing.
use std::path::PathBuf;

use clap::Parser;

use crate::error::ConfigError;

pub const SCREEN_WIDTH: i32 = 320;
pub const SCREEN_HEIGHT: i32 = 240;
pub const PLAYER_SIZE: i32 = 4;
pub const PROJECTILE_SIZE: i32 = 2;
pub const DEFAULT_POPULATION: usize = 50;
pub const DEFAULT_MIN_SPEED: f64 = 0.7;
pub const DEFAULT_MAX_SPEED: f64 = 3.0;
pub const DEFAULT_PLAY_FPS: u32 = 60;
pub const DEFAULT_INTRO_FPS: u32 = 15;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    pub width: i32,
    pub height: i32,
    pub player_width: i32,
    pub player_height: i32,
    pub projectile_size: i32,
    /// Live projectiles maintained during a round.
    pub population: usize,
    pub min_speed: f64,
    pub max_speed: f64,
    pub play_fps: u32,
    /// Rate for the intro, pause and game-over screens.
    pub intro_fps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            player_width: PLAYER_SIZE,
            player_height: PLAYER_SIZE,
            projectile_size: PROJECTILE_SIZE,
            population: DEFAULT_POPULATION,
            min_speed: DEFAULT_MIN_SPEED,
            max_speed: DEFAULT_MAX_SPEED,
            play_fps: DEFAULT_PLAY_FPS,
            intro_fps: DEFAULT_INTRO_FPS,
        }
    }
}

impl GameConfig {
    pub fn validate(self) -> Result<Self, ConfigError> {
        if self.population == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if !self.min_speed.is_finite() || self.min_speed <= 0.0 {
            return Err(ConfigError::NonPositiveSpeed { min: self.min_speed });
        }
        if !self.max_speed.is_finite() || self.min_speed > self.max_speed {
            return Err(ConfigError::InvertedSpeedBand {
                min: self.min_speed,
                max: self.max_speed,
            });
        }
        if self.play_fps == 0 || self.intro_fps == 0 {
            return Err(ConfigError::ZeroFrameRate);
        }
        if self.width < self.player_width || self.height < self.player_height {
            return Err(ConfigError::ScreenTooSmall {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

// ── Command line ──────────────────────────────────────────────────────────────

/// Dodge the bullets for as long as you can.
#[derive(Parser, Debug)]
#[command(name = "bullet_hell")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Seed for the projectile RNG (random when omitted)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of live projectiles to maintain
    #[arg(short = 'n', long, default_value_t = DEFAULT_POPULATION)]
    pub projectiles: usize,

    /// Slowest projectile speed, in pixels per tick
    #[arg(long, default_value_t = DEFAULT_MIN_SPEED)]
    pub min_speed: f64,

    /// Fastest projectile speed, in pixels per tick
    #[arg(long, default_value_t = DEFAULT_MAX_SPEED)]
    pub max_speed: f64,

    /// Simulation rate while playing
    #[arg(long, default_value_t = DEFAULT_PLAY_FPS)]
    pub fps: u32,

    /// Refresh rate of the intro, pause and game-over screens
    #[arg(long, default_value_t = DEFAULT_INTRO_FPS)]
    pub intro_fps: u32,

    /// Write logs to this file (filtered by RUST_LOG, default "info")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    pub fn game_config(&self) -> Result<GameConfig, ConfigError> {
        GameConfig {
            population: self.projectiles,
            min_speed: self.min_speed,
            max_speed: self.max_speed,
            play_fps: self.fps,
            intro_fps: self.intro_fps,
            ..GameConfig::default()
        }
        .validate()
    }
}
