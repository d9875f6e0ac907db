//! Term Robots - a robot-pursuit arcade game for the terminal
//!
//! Core modules:
//! - `sim`: Deterministic arena simulation (spatial map, collisions, scoring, levels)
//! - `render`: Draw-request seam consumed by a renderer
//! - `input`: Command seam produced by an input decoder
//! - `terminal`: crossterm-backed renderer and key decoder
//! - `persistence`: High score storage
//! - `session`: Frame loop tying the seams together
//! - `settings`: Validated configuration

pub mod error;
pub mod highscores;
pub mod input;
pub mod persistence;
pub mod render;
pub mod session;
pub mod settings;
pub mod sim;
pub mod terminal;

pub use error::{ConfigError, PersistenceError, TerminalError};
pub use highscores::{HighScoreEntry, HighScores};
pub use settings::{Settings, Skill};

/// Game configuration constants
pub mod consts {
    /// Default playable interior (walls sit one cell outside it)
    pub const DEFAULT_ROWS: i32 = 20;
    pub const DEFAULT_COLS: i32 = 60;
    /// Smallest arena the simulation accepts
    pub const MIN_ARENA_EXTENT: i32 = 5;
    /// Largest arena the terminal layer can address
    pub const MAX_ARENA_EXTENT: i32 = 200;

    /// Robot count at level 1 (allowed range and default)
    pub const START_ROBOTS_RANGE: std::ops::RangeInclusive<u32> = 5..=15;
    pub const DEFAULT_START_ROBOTS: u32 = 10;
    /// Extra robots added per level
    pub const ROBOTS_PER_LEVEL_RANGE: std::ops::RangeInclusive<u32> = 1..=5;
    pub const DEFAULT_ROBOTS_PER_LEVEL: u32 = 2;
    /// Teleport charges granted per level
    pub const TELEPORTS_RANGE: std::ops::RangeInclusive<u32> = 1..=10;
    pub const DEFAULT_TELEPORTS: u32 = 3;

    /// Ticks of robot paralysis after an EMP
    pub const EMP_COOLDOWN_TICKS: u32 = 3;
    /// Chance a robot is wrecked / crushes through when it runs into a shrub
    pub const OBSTACLE_EVENT_CHANCE: f64 = 0.1;

    /// Rejection-sampling attempts before falling back to an explicit scan
    pub const MAX_PLACEMENT_ATTEMPTS: u32 = 1000;

    /// Frame clock: how long the input wait blocks before an idle tick
    pub const FRAME_TIMEOUT_MS: u64 = 150;
    /// How long the title card waits for a key
    pub const INTRO_DELAY_MS: u64 = 1500;
}
