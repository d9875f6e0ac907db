//! Player controller
//!
//! Turns one decoded command into a player state transition. Movement goes
//! through the collision tables; teleport and EMP spend per-level resources.

use super::collision::{self, Outcome, Target};
use super::level::sample_empty_cell;
use super::score::ScoreEvent;
use super::state::{Coord, EntityKind, GameEvent, GameState, RepeatMode};
use super::tick::TickInput;
use crate::consts::EMP_COOLDOWN_TICKS;

/// The eight compass moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    West,
    East,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// (row, col) delta
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::North => (-1, 0),
            Direction::South => (1, 0),
            Direction::West => (0, -1),
            Direction::East => (0, 1),
            Direction::NorthWest => (-1, -1),
            Direction::NorthEast => (-1, 1),
            Direction::SouthWest => (1, -1),
            Direction::SouthEast => (1, 1),
        }
    }
}

/// A decoded player command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Move(Direction),
    Wait,
    ToggleRepeat,
    Teleport,
    ActivateEmp,
    Quit,
    Invalid,
}

impl Command {
    /// Commands that can be auto-repeated
    pub fn is_movement(&self) -> bool {
        matches!(self, Command::Move(_) | Command::Wait)
    }
}

/// What the player's command amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    /// The player used their turn; robots step next
    TurnTaken(Outcome),
    /// Nothing that costs a turn happened
    NoTurn,
    /// The player walked into something deadly
    Eliminated { at: Coord },
    Quit,
}

/// Pick the command to run this tick, handling repeat mode
///
/// Returns the command and whether it runs in repeat context, or `None` when
/// the tick has nothing to execute.
pub fn next_command(state: &mut GameState, input: TickInput) -> Option<(Command, bool)> {
    match input {
        TickInput::Idle => match state.repeat {
            RepeatMode::Active(command) => Some((command, true)),
            _ => None,
        },
        TickInput::Command(Command::ToggleRepeat) => {
            if state.repeat.is_engaged() {
                state.repeat = RepeatMode::Off;
                state.push_event(GameEvent::RepeatCancelled);
            } else {
                state.repeat = RepeatMode::Armed;
                state.push_event(GameEvent::RepeatArmed);
            }
            None
        }
        TickInput::Command(command) => {
            if let RepeatMode::Active(_) = state.repeat {
                state.repeat = RepeatMode::Off;
                state.push_event(GameEvent::RepeatCancelled);
            }
            let repeat = state.repeat == RepeatMode::Armed && command.is_movement();
            Some((command, repeat))
        }
    }
}

/// Execute one command against the arena
pub fn apply_command(state: &mut GameState, command: Command, repeat: bool) -> PlayerAction {
    match command {
        Command::Move(direction) => move_player(state, direction, repeat),
        Command::Wait => PlayerAction::TurnTaken(Outcome::Moved),
        Command::Teleport => teleport(state),
        Command::ActivateEmp => activate_emp(state),
        Command::Quit => PlayerAction::Quit,
        Command::ToggleRepeat => PlayerAction::NoTurn,
        Command::Invalid => {
            state.push_event(GameEvent::InvalidCommand);
            PlayerAction::NoTurn
        }
    }
}

/// Remember or drop the repeated command after it ran
pub fn update_repeat(state: &mut GameState, command: Command, action: PlayerAction) {
    if !command.is_movement() {
        return;
    }
    state.repeat = match (state.repeat, action) {
        (RepeatMode::Off, _) => RepeatMode::Off,
        (RepeatMode::Armed, PlayerAction::TurnTaken(Outcome::Moved)) => {
            RepeatMode::Active(command)
        }
        (RepeatMode::Active(c), PlayerAction::TurnTaken(Outcome::Moved)) => RepeatMode::Active(c),
        _ => RepeatMode::Off,
    };
}

fn move_player(state: &mut GameState, direction: Direction, repeat: bool) -> PlayerAction {
    let (d_row, d_col) = direction.delta();
    let from = state.player;
    let to = from.offset(d_row, d_col);
    let target = Target::at(&state.map, &state.rules.arena, to);
    let resolution =
        collision::resolve(EntityKind::Player, target, state.rules.skill, &mut state.rng);
    collision::apply(&mut state.map, EntityKind::Player, from, to, resolution.outcome);
    if let Some(event) = resolution.score {
        state.ledger.record(event, repeat);
    }

    match resolution.outcome {
        Outcome::Moved => {
            state.player = to;
            PlayerAction::TurnTaken(Outcome::Moved)
        }
        Outcome::PlayerKilled => {
            log::info!("Player walked into {:?} at {:?}", target, to);
            state.push_event(GameEvent::PlayerKilled { at: to });
            PlayerAction::Eliminated { at: to }
        }
        outcome => {
            let by = match target {
                Target::Occupied(kind) => Some(kind),
                _ => None,
            };
            state.push_event(GameEvent::PlayerBlocked { by });
            PlayerAction::TurnTaken(outcome)
        }
    }
}

/// Jump to a random empty cell far from the current position
fn teleport(state: &mut GameState) -> PlayerAction {
    if state.level.teleports == 0 {
        state.push_event(GameEvent::TeleportUnavailable);
        return PlayerAction::NoTurn;
    }

    let from = state.player;
    let (min_rows, min_cols) = state.rules.arena.teleport_span();
    let destination = sample_empty_cell(
        &mut state.rng,
        &state.rules.arena,
        &state.map,
        0,
        |c| c.row_distance(from) >= min_rows && c.col_distance(from) >= min_cols,
    );
    let Some(to) = destination else {
        log::warn!("No teleport destination far enough from {:?}", from);
        state.push_event(GameEvent::TeleportUnavailable);
        return PlayerAction::NoTurn;
    };

    state.ledger.record(
        ScoreEvent::Teleport {
            charges_before: state.level.teleports,
        },
        false,
    );
    state.level.teleports -= 1;
    state.map.clear(from);
    state.map.place(to, EntityKind::Player);
    state.player = to;
    log::debug!("Teleported {:?} -> {:?}", from, to);
    state.push_event(GameEvent::Teleported { from, to });
    PlayerAction::TurnTaken(Outcome::Moved)
}

/// Freeze the robots for a few steps, once per level
fn activate_emp(state: &mut GameState) -> PlayerAction {
    if !state.level.emp_available {
        state.push_event(GameEvent::EmpUnavailable);
        return PlayerAction::NoTurn;
    }
    let robots = state.robots_remaining() as u32;
    state.level.emp_available = false;
    state.level.emp_cooldown = EMP_COOLDOWN_TICKS;
    state.ledger.record(ScoreEvent::Emp { robots }, false);
    log::debug!("EMP fired with {} robots", robots);
    state.push_event(GameEvent::EmpFired { robots });
    PlayerAction::NoTurn
}
