//! Collision resolution on the grid
//!
//! Decides what happens when a robot or the player tries to enter a cell, and
//! applies that decision to the spatial map. Robots and the player share the
//! same outcome vocabulary but use different tables.

use rand::Rng;

use super::map::{Arena, SpatialMap};
use super::score::ScoreEvent;
use super::state::{Coord, EntityKind};
use crate::consts::OBSTACLE_EVENT_CHANCE;
use crate::settings::Skill;

/// What a mover finds in the cell it wants to enter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Open,
    /// Past the walls
    OutOfBounds,
    Occupied(EntityKind),
}

impl Target {
    /// Inspect `coord`
    pub fn at(map: &SpatialMap, arena: &Arena, coord: Coord) -> Self {
        if !arena.contains(coord) {
            return Target::OutOfBounds;
        }
        match map.occupant_at(coord) {
            Some(kind) => Target::Occupied(kind),
            None => Target::Open,
        }
    }
}

/// Result of an attempted move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Mover now occupies the target
    Moved,
    /// Mover is gone and the target cell is junk
    MergedIntoJunk,
    /// Target shrub now hides the mover
    CrushedObstacle,
    /// Mover wrecked itself on a shrub and became junk where it stood
    DestroyedAtObstacle,
    /// Target cell became debris; the player is out
    PlayerKilled,
    /// Nothing moved
    Blocked,
}

/// Outcome plus the score event it triggers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub outcome: Outcome,
    pub score: Option<ScoreEvent>,
}

impl Resolution {
    fn new(outcome: Outcome, score: Option<ScoreEvent>) -> Self {
        Self { outcome, score }
    }
}

/// Decide the outcome of `mover` entering `target`
///
/// Only robot-into-shrub draws from `rng`; both rolls are independent and
/// gated by the skill level.
pub fn resolve<R: Rng>(mover: EntityKind, target: Target, skill: Skill, rng: &mut R) -> Resolution {
    match mover {
        EntityKind::Robot | EntityKind::CrushedObstacle => resolve_robot(target, skill, rng),
        EntityKind::Player => resolve_player(target),
        _ => Resolution::new(Outcome::Blocked, None),
    }
}

fn resolve_robot<R: Rng>(target: Target, skill: Skill, rng: &mut R) -> Resolution {
    use EntityKind::*;

    match target {
        Target::Open => Resolution::new(Outcome::Moved, None),
        Target::Occupied(Robot | CrushedObstacle) => {
            Resolution::new(Outcome::MergedIntoJunk, Some(ScoreEvent::RobotsCollided))
        }
        Target::Occupied(Junk | Debris) => {
            Resolution::new(Outcome::MergedIntoJunk, Some(ScoreEvent::RobotJunked))
        }
        Target::Occupied(Obstacle) => {
            let wrecked =
                skill.robots_wreck_on_obstacles() && rng.random_bool(OBSTACLE_EVENT_CHANCE);
            if wrecked {
                return Resolution::new(
                    Outcome::DestroyedAtObstacle,
                    Some(ScoreEvent::RobotWrecked),
                );
            }
            let crushed = skill.robots_crush_obstacles() && rng.random_bool(OBSTACLE_EVENT_CHANCE);
            if crushed {
                Resolution::new(Outcome::CrushedObstacle, None)
            } else {
                Resolution::new(Outcome::Blocked, None)
            }
        }
        Target::Occupied(Player) => Resolution::new(Outcome::PlayerKilled, None),
        Target::Occupied(Wall) | Target::OutOfBounds => Resolution::new(Outcome::Blocked, None),
    }
}

fn resolve_player(target: Target) -> Resolution {
    use EntityKind::*;

    match target {
        Target::Open | Target::Occupied(Player) => Resolution::new(Outcome::Moved, None),
        Target::Occupied(Robot | CrushedObstacle) => {
            Resolution::new(Outcome::PlayerKilled, Some(ScoreEvent::PlayerHitRobot))
        }
        Target::Occupied(Junk | Debris) => {
            Resolution::new(Outcome::PlayerKilled, Some(ScoreEvent::PlayerHitJunk))
        }
        Target::Occupied(Obstacle) => {
            Resolution::new(Outcome::Blocked, Some(ScoreEvent::PlayerBumpedObstacle))
        }
        Target::Occupied(Wall) | Target::OutOfBounds => {
            Resolution::new(Outcome::Blocked, Some(ScoreEvent::PlayerBumpedWall))
        }
    }
}

/// Write `outcome` for `mover` travelling `from` -> `to` into the map
pub fn apply(map: &mut SpatialMap, mover: EntityKind, from: Coord, to: Coord, outcome: Outcome) {
    match outcome {
        Outcome::Moved => {
            map.clear(from);
            map.place(to, mover);
        }
        Outcome::MergedIntoJunk => {
            map.clear(from);
            map.place(to, EntityKind::Junk);
        }
        Outcome::CrushedObstacle => {
            map.clear(from);
            map.place(to, EntityKind::CrushedObstacle);
        }
        Outcome::DestroyedAtObstacle => map.place(from, EntityKind::Junk),
        Outcome::PlayerKilled => {
            map.clear(from);
            map.place(to, EntityKind::Debris);
        }
        Outcome::Blocked => {}
    }
}
