//! Turn-based simulation tick
//!
//! One input event is resolved completely (player, robots, scoring, level
//! transition) before the next one is read. Nothing here blocks.

use super::player::{self, Command, PlayerAction};
use super::robots::{self, StepResult};
use super::state::{GameEvent, GamePhase, GameState, RepeatMode};
use super::level;

/// Input for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickInput {
    /// A decoded command
    Command(Command),
    /// The input wait timed out
    Idle,
}

/// What a tick did, for the caller's bookkeeping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickSummary {
    /// Whether any simulation state changed
    pub acted: bool,
    /// Points gained or lost this tick
    pub score_delta: i64,
    /// Whether the robots took a step
    pub robots_moved: bool,
    pub wave_cleared: bool,
}

/// Advance the game by one input event
pub fn tick(state: &mut GameState, input: TickInput) -> TickSummary {
    let mut summary = TickSummary::default();
    if state.phase != GamePhase::Playing {
        return summary;
    }

    state.events.clear();
    state.ledger.begin_tick();

    let Some((command, repeat)) = player::next_command(state, input) else {
        summary.acted = !state.events.is_empty();
        return summary;
    };
    summary.acted = true;

    let action = player::apply_command(state, command, repeat);
    player::update_repeat(state, command, action);

    match action {
        PlayerAction::NoTurn => {}
        PlayerAction::Quit => {
            log::info!("Player quit at level {}", state.level.number);
            state.phase = GamePhase::Quit;
        }
        PlayerAction::Eliminated { .. } => end_game(state),
        PlayerAction::TurnTaken(_) => {
            match robots::step_robots(state, repeat) {
                StepResult::PlayerKilled { .. } => end_game(state),
                StepResult::WaveCleared => {
                    let bonus = robots::wave_bonus(state);
                    let points = state.ledger.record(bonus, repeat);
                    let cleared = state.level.number;
                    log::info!("Level {} cleared, bonus {}", cleared, points);
                    level::start_level(state, false);
                    state.push_event(GameEvent::WaveCleared {
                        level: cleared,
                        bonus: points,
                    });
                    summary.wave_cleared = true;
                    summary.robots_moved = true;
                }
                StepResult::Advanced => summary.robots_moved = true,
                StepResult::Frozen { .. } => {}
            }
        }
    }

    summary.score_delta = state.ledger.tick_delta();
    summary
}

fn end_game(state: &mut GameState) {
    log::info!(
        "Game over at level {} with score {}",
        state.level.number,
        state.score()
    );
    state.repeat = RepeatMode::Off;
    state.phase = GamePhase::GameOver;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::EMP_COOLDOWN_TICKS;
    use crate::settings::{Settings, Skill};
    use crate::sim::map::Arena;
    use crate::sim::player::Direction;
    use crate::sim::state::{Coord, EntityKind, Rules};

    fn bare_state(rows: i32, cols: i32, player: Coord) -> GameState {
        let rules = Rules {
            arena: Arena::new(rows, cols),
            start_robots: 5,
            robots_per_level: 1,
            teleports: 3,
            skill: Skill::Normal,
        };
        let mut state = GameState::empty(rules, 11);
        state.map.clear(state.player);
        state.player = player;
        state.map.place(player, EntityKind::Player);
        state.full_redraw = false;
        state
    }

    fn cmd(command: Command) -> TickInput {
        TickInput::Command(command)
    }

    #[test]
    fn test_wall_bump_costs_25_and_keeps_position() {
        let mut state = bare_state(9, 9, Coord::new(1, 5));
        state.map.place(Coord::new(9, 9), EntityKind::Robot);

        let summary = tick(&mut state, cmd(Command::Move(Direction::North)));

        assert_eq!(state.player, Coord::new(1, 5));
        assert_eq!(summary.score_delta, -25);
        assert!(summary.robots_moved);
        assert_eq!(state.map.occupant_at(Coord::new(8, 8)), Some(EntityKind::Robot));
    }

    #[test]
    fn test_converging_robots_score_twenty() {
        let mut state = bare_state(5, 5, Coord::new(1, 1));
        state.map.place(Coord::new(1, 3), EntityKind::Robot);
        state.map.place(Coord::new(2, 3), EntityKind::Robot);
        state.map.place(Coord::new(5, 5), EntityKind::Robot);

        let summary = tick(&mut state, cmd(Command::Wait));

        assert_eq!(state.map.occupant_at(Coord::new(1, 2)), Some(EntityKind::Junk));
        assert_eq!(summary.score_delta, 20);
        assert!(!summary.wave_cleared);
    }

    #[test]
    fn test_emp_freezes_for_three_ticks() {
        let mut state = bare_state(20, 20, Coord::new(10, 10));
        let robots = [(1, 1), (1, 20), (20, 1), (20, 20)];
        for (row, col) in robots {
            state.map.place(Coord::new(row, col), EntityKind::Robot);
        }

        let summary = tick(&mut state, cmd(Command::ActivateEmp));
        assert_eq!(summary.score_delta, -20);
        assert!(!summary.robots_moved);
        assert_eq!(state.level.emp_cooldown, EMP_COOLDOWN_TICKS);

        for _ in 0..3 {
            let summary = tick(&mut state, cmd(Command::Wait));
            assert!(!summary.robots_moved);
            for (row, col) in robots {
                assert_eq!(state.map.occupant_at(Coord::new(row, col)), Some(EntityKind::Robot));
            }
        }
        assert_eq!(state.level.emp_cooldown, 0);

        let summary = tick(&mut state, cmd(Command::Wait));
        assert!(summary.robots_moved);
        assert_eq!(state.map.occupant_at(Coord::new(2, 2)), Some(EntityKind::Robot));
        assert_eq!(state.map.occupant_at(Coord::new(19, 19)), Some(EntityKind::Robot));
    }

    #[test]
    fn test_wave_clear_awards_bonus_and_starts_next_level() {
        let mut state = bare_state(20, 60, Coord::new(10, 30));
        state.map.place(Coord::new(10, 27), EntityKind::Robot);
        state.map.place(Coord::new(10, 28), EntityKind::Junk);
        state.level.teleports = 2;

        let summary = tick(&mut state, cmd(Command::Wait));

        assert!(summary.wave_cleared);
        // +10 for the junked robot, then 10 * 2 teleports + 25 for the unused EMP
        assert_eq!(summary.score_delta, 10 + 45);
        assert_eq!(state.level.number, 2);
        assert_eq!(state.map.count(EntityKind::Robot), 6);
        assert_eq!(state.level.teleports, 3);
        assert!(state.full_redraw);
        assert!(matches!(
            state.events.last(),
            Some(GameEvent::WaveCleared { level: 1, bonus: 45 })
        ));
    }

    #[test]
    fn test_robot_catches_player_ends_game() {
        let mut state = bare_state(9, 9, Coord::new(5, 5));
        state.map.place(Coord::new(3, 3), EntityKind::Robot);

        tick(&mut state, cmd(Command::Move(Direction::NorthWest)));

        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.map.occupant_at(Coord::new(4, 4)), Some(EntityKind::Debris));

        // Further input is ignored
        let summary = tick(&mut state, cmd(Command::Wait));
        assert_eq!(summary, TickSummary::default());
    }

    #[test]
    fn test_rejected_actions_do_not_advance_robots() {
        let mut state = bare_state(9, 9, Coord::new(5, 5));
        let robot = Coord::new(1, 1);
        state.map.place(robot, EntityKind::Robot);
        state.level.teleports = 0;

        for input in [Command::Teleport, Command::Invalid] {
            let summary = tick(&mut state, cmd(input));
            assert!(summary.acted);
            assert!(!summary.robots_moved);
            assert_eq!(summary.score_delta, 0);
        }
        assert_eq!(state.map.occupant_at(robot), Some(EntityKind::Robot));
        assert_eq!(state.message, "No-op");
    }

    #[test]
    fn test_idle_ticks_drive_repeat_until_blocked() {
        let mut state = bare_state(9, 9, Coord::new(5, 2));
        state.map.place(Coord::new(9, 9), EntityKind::Robot);
        state.map.place(Coord::new(1, 9), EntityKind::Robot);

        assert!(!tick(&mut state, TickInput::Idle).acted);
        tick(&mut state, cmd(Command::ToggleRepeat));
        assert_eq!(state.repeat, RepeatMode::Armed);

        tick(&mut state, cmd(Command::Move(Direction::West)));
        assert_eq!(state.player, Coord::new(5, 1));
        assert_eq!(state.repeat, RepeatMode::Active(Command::Move(Direction::West)));

        // The wall stops the run: halved penalty, repeat cleared
        let summary = tick(&mut state, TickInput::Idle);
        assert!(summary.acted);
        assert_eq!(summary.score_delta, -5);
        assert_eq!(state.repeat, RepeatMode::Off);

        assert!(!tick(&mut state, TickInput::Idle).acted);
    }

    #[test]
    fn test_quit() {
        let mut state = bare_state(9, 9, Coord::new(5, 5));
        tick(&mut state, cmd(Command::Quit));
        assert_eq!(state.phase, GamePhase::Quit);
    }

    #[test]
    fn test_single_player_invariant_over_a_game() {
        let rules = Settings::default().rules();
        let mut state = GameState::new(rules, 8080);
        let script = [
            Command::Move(Direction::North),
            Command::Wait,
            Command::Teleport,
            Command::Move(Direction::SouthEast),
            Command::ActivateEmp,
            Command::Wait,
            Command::Move(Direction::West),
            Command::Teleport,
            Command::Wait,
            Command::Wait,
        ];
        for command in script.iter().cycle().take(200) {
            tick(&mut state, cmd(*command));
            if state.phase != GamePhase::Playing {
                break;
            }
            assert_eq!(state.map.count(EntityKind::Player), 1);
            assert_eq!(state.map.occupant_at(state.player), Some(EntityKind::Player));
        }
    }

    #[test]
    fn test_determinism() {
        let rules = Settings::default().rules();
        let mut state1 = GameState::new(rules.clone(), 99999);
        let mut state2 = GameState::new(rules, 99999);
        let inputs = [
            cmd(Command::Move(Direction::East)),
            cmd(Command::Teleport),
            TickInput::Idle,
            cmd(Command::Wait),
            cmd(Command::Move(Direction::South)),
        ];
        for input in inputs {
            tick(&mut state1, input);
            tick(&mut state2, input);
        }
        assert_eq!(state1.player, state2.player);
        assert_eq!(state1.score(), state2.score());
        let cells1: Vec<_> = state1.map.occupied().collect();
        let cells2: Vec<_> = state2.map.occupied().collect();
        assert_eq!(cells1, cells2);
    }
}
