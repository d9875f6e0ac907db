//! Error types
//!
//! Only configuration and storage can fail. Rejected player actions are
//! reported as game events, not errors.

use thiserror::Error;

/// Invalid configuration, reported before any simulation state exists
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("starting robot count {value} is outside {min}..={max}")]
    StartRobots {
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("robots per level {value} is outside {min}..={max}")]
    RobotsPerLevel {
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("teleport charges {value} is outside {min}..={max}")]
    Teleports {
        value: u32,
        min: u32,
        max: u32,
    },

    #[error("unknown skill level: {0}")]
    UnknownSkill(String),

    #[error("arena {rows}x{cols} is smaller than the {min}x{min} minimum")]
    ArenaTooSmall { rows: i32, cols: i32, min: i32 },

    #[error("arena {rows}x{cols} is larger than the {max}x{max} maximum")]
    ArenaTooLarge { rows: i32, cols: i32, max: i32 },

    #[error("display name must not be empty")]
    EmptyName,
}

/// High score or settings storage failure
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed high score line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// The terminal cannot host the game
#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("terminal is {cols}x{rows}, the arena needs at least {need_cols}x{need_rows}")]
    TooSmall {
        cols: u16,
        rows: u16,
        need_cols: u16,
        need_rows: u16,
    },

    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
