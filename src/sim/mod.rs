//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One input event per tick, fully resolved before the next
//! - Seeded RNG only
//! - Stable iteration order (map placement order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod level;
pub mod map;
pub mod player;
pub mod robots;
pub mod score;
pub mod state;
pub mod tick;

pub use collision::{Outcome, Resolution, Target, resolve};
pub use level::start_level;
pub use map::{Arena, SpatialMap};
pub use player::{Command, Direction, PlayerAction};
pub use robots::{StepResult, step_robots};
pub use score::{ScoreEvent, ScoringLedger};
pub use state::{
    Coord, EntityKind, GameEvent, GamePhase, GameState, LevelState, RepeatMode, Rules,
};
pub use tick::{TickInput, TickSummary, tick};
