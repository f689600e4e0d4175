/// Error types for the shell around the simulation.  The simulation itself
/// never fails: losing a round is a state transition, not an error.
use std::io;

use thiserror::Error;

/// Settings rejected while building a `GameConfig`.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("projectile population must be at least 1")]
    EmptyPopulation,

    #[error("projectile speeds must be positive (got min {min})")]
    NonPositiveSpeed { min: f64 },

    #[error("min speed {min} is greater than max speed {max}")]
    InvertedSpeedBand { min: f64, max: f64 },

    #[error("frame rate must be at least 1")]
    ZeroFrameRate,

    #[error("screen {width}x{height} cannot fit the player")]
    ScreenTooSmall { width: i32, height: i32 },
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error("terminal I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
