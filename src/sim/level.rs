//! Level lifecycle
//!
//! Populates the arena at level start and escalates the robot count between
//! levels. Placement is rejection-sampled with a bounded number of attempts,
//! falling back to a uniform pick over an explicit scan of qualifying cells.

use rand::Rng;

use super::map::{Arena, SpatialMap};
use super::state::{
    Coord, EntityKind, GameEvent, GamePhase, GameState, LevelState, RepeatMode,
};
use crate::consts::MAX_PLACEMENT_ATTEMPTS;

/// Shrubs keep this many cells away from the walls
const OBSTACLE_WALL_BUFFER: i32 = 1;

/// Pick a random empty cell `margin` away from the walls that satisfies `accept`
pub fn sample_empty_cell<R: Rng>(
    rng: &mut R,
    arena: &Arena,
    map: &SpatialMap,
    margin: i32,
    accept: impl Fn(Coord) -> bool,
) -> Option<Coord> {
    for _ in 0..MAX_PLACEMENT_ATTEMPTS {
        let coord = arena.random_cell(rng, margin)?;
        if map.is_empty_at(coord) && accept(coord) {
            return Some(coord);
        }
    }

    let candidates: Vec<Coord> = arena
        .cells(margin)
        .into_iter()
        .filter(|c| map.is_empty_at(*c) && accept(*c))
        .collect();
    if candidates.is_empty() {
        return None;
    }
    log::debug!(
        "Rejection sampling gave up, picking from {} scanned cells",
        candidates.len()
    );
    Some(candidates[rng.random_range(0..candidates.len())])
}

/// Start a level: reset per-level counters, clear the arena and repopulate it
///
/// A fresh game also resets the score and the robot count; otherwise the
/// robot count grows by the configured increment.
pub fn start_level(state: &mut GameState, fresh_game: bool) {
    let rules = state.rules.clone();
    let (number, robot_target) = if fresh_game {
        state.ledger.reset();
        (1, rules.start_robots)
    } else {
        (
            state.level.number + 1,
            state.level.robot_target + rules.robots_per_level,
        )
    };

    state.level = LevelState {
        number,
        robot_target,
        obstacle_count: 0,
        teleports: rules.teleports,
        emp_available: true,
        emp_cooldown: 0,
    };
    state.repeat = RepeatMode::Off;
    state.phase = GamePhase::Playing;

    state.map.clear_all();
    state.player = rules.arena.center();
    state.map.place(state.player, EntityKind::Player);

    let wanted = state.rng.random_range(rules.skill.obstacle_range());
    let mut placed = 0;
    for _ in 0..wanted {
        let Some(coord) = sample_empty_cell(
            &mut state.rng,
            &rules.arena,
            &state.map,
            OBSTACLE_WALL_BUFFER,
            |_| true,
        ) else {
            log::warn!("Arena full after {} of {} shrubs", placed, wanted);
            break;
        };
        state.map.place(coord, EntityKind::Obstacle);
        placed += 1;
    }
    state.level.obstacle_count = placed;

    let player = state.player;
    let safe = rules.skill.safe_radius();
    for _ in 0..robot_target {
        let safe_spot = sample_empty_cell(&mut state.rng, &rules.arena, &state.map, 0, |c| {
            c.row_distance(player) > safe && c.col_distance(player) > safe
        });
        let coord = match safe_spot {
            Some(coord) => coord,
            None => {
                log::warn!("No cell outside the safe radius {}, spawning closer", safe);
                match sample_empty_cell(&mut state.rng, &rules.arena, &state.map, 0, |_| true) {
                    Some(coord) => coord,
                    None => {
                        log::warn!("Arena full, level {} starts short of robots", number);
                        break;
                    }
                }
            }
        };
        state.map.place(coord, EntityKind::Robot);
    }

    log::info!(
        "Level {}: {} robots, {} shrubs, skill {}",
        number,
        state.robots_remaining(),
        placed,
        rules.skill.as_str()
    );
    state.full_redraw = true;
    state.push_event(GameEvent::LevelStarted {
        level: number,
        robots: robot_target,
    });
}
