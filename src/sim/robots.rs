//! Robot pursuit
//!
//! One call advances every robot by one step toward the player. Robots are
//! processed in map placement order from a snapshot taken before anything
//! moves, so no robot moves twice and none is skipped by mid-step mutation.

use super::collision::{self, Outcome, Target};
use super::score::ScoreEvent;
use super::state::{Coord, EntityKind, GameEvent, GameState};

/// What a robot step produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    /// EMP held the robots in place; this many frozen steps remain
    Frozen { remaining: u32 },
    /// Robots moved; some remain
    Advanced,
    /// A robot reached the player
    PlayerKilled { at: Coord },
    /// No robots remain
    WaveCleared,
}

/// Turn every crushed shrub back into a robot; returns how many reverted
pub fn revert_crushed(state: &mut GameState) -> usize {
    let crushed = state.map.coordinates_of(EntityKind::CrushedObstacle);
    for coord in &crushed {
        state.map.place(*coord, EntityKind::Robot);
    }
    crushed.len()
}

/// Advance all robots one step toward the player
pub fn step_robots(state: &mut GameState, repeat: bool) -> StepResult {
    if state.level.emp_cooldown > 0 {
        state.level.emp_cooldown -= 1;
        log::debug!("Robots frozen, {} steps left", state.level.emp_cooldown);
        return StepResult::Frozen {
            remaining: state.level.emp_cooldown,
        };
    }

    revert_crushed(state);

    let arena = state.rules.arena;
    let skill = state.rules.skill;
    let movers = state.map.coordinates_of(EntityKind::Robot);

    for from in movers {
        // Earlier robots may have turned this one into junk
        if state.map.occupant_at(from) != Some(EntityKind::Robot) {
            continue;
        }

        let to = from.step_toward(state.player);
        let target = Target::at(&state.map, &arena, to);
        let resolution = collision::resolve(EntityKind::Robot, target, skill, &mut state.rng);
        collision::apply(&mut state.map, EntityKind::Robot, from, to, resolution.outcome);
        if let Some(event) = resolution.score {
            state.ledger.record(event, repeat);
        }

        match resolution.outcome {
            Outcome::MergedIntoJunk => {
                if resolution.score == Some(ScoreEvent::RobotsCollided) {
                    log::debug!("Robots collided at {:?}", to);
                    state.push_event(GameEvent::RobotsCollided { at: to });
                } else {
                    state.push_event(GameEvent::RobotJunked { at: to });
                }
            }
            Outcome::DestroyedAtObstacle => {
                state.push_event(GameEvent::RobotWrecked { at: from });
            }
            Outcome::CrushedObstacle => {
                state.push_event(GameEvent::ObstacleCrushed { at: to });
            }
            Outcome::PlayerKilled => {
                log::info!("Robot from {:?} caught the player at {:?}", from, to);
                state.push_event(GameEvent::PlayerKilled { at: to });
                return StepResult::PlayerKilled { at: to };
            }
            Outcome::Moved | Outcome::Blocked => {}
        }
    }

    if state.robots_remaining() == 0 {
        StepResult::WaveCleared
    } else {
        StepResult::Advanced
    }
}

/// Bonus awarded when the wave is cleared
pub fn wave_bonus(state: &GameState) -> ScoreEvent {
    ScoreEvent::WaveCleared {
        teleports_left: state.level.teleports,
        emp_unused: state.level.emp_available,
    }
}
