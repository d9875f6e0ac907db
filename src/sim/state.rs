//! Game state and core simulation types
//!
//! Everything a tick reads or writes is reachable from [`GameState`]; there is
//! no ambient session state.

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::map::{Arena, SpatialMap};
use super::score::ScoringLedger;
use crate::settings::Skill;

/// A grid position, 1-indexed from the top-left interior cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self::new(self.row + d_row, self.col + d_col)
    }

    /// One step toward `target`, moving each axis independently by at most one
    pub fn step_toward(self, target: Coord) -> Self {
        self.offset(
            (target.row - self.row).signum(),
            (target.col - self.col).signum(),
        )
    }

    pub fn row_distance(self, other: Coord) -> i32 {
        (self.row - other.row).abs()
    }

    pub fn col_distance(self, other: Coord) -> i32 {
        (self.col - other.col).abs()
    }
}

/// What can occupy a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Player,
    Robot,
    /// Shrub
    Obstacle,
    /// A robot standing in a flattened shrub; becomes a Robot again next step
    CrushedObstacle,
    Junk,
    /// What is left of the player
    Debris,
    /// Border cell; drawn, never stored in the map
    Wall,
}

impl EntityKind {
    /// Robots that still count toward the wave
    pub fn is_adversary(self) -> bool {
        matches!(self, EntityKind::Robot | EntityKind::CrushedObstacle)
    }
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    Playing,
    /// Player eliminated
    GameOver,
    /// Player asked to leave
    Quit,
}

/// Something that happened during a tick, for the status line and logs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    LevelStarted { level: u32, robots: u32 },
    RobotsCollided { at: Coord },
    RobotJunked { at: Coord },
    RobotWrecked { at: Coord },
    ObstacleCrushed { at: Coord },
    PlayerKilled { at: Coord },
    PlayerBlocked { by: Option<EntityKind> },
    Teleported { from: Coord, to: Coord },
    TeleportUnavailable,
    EmpFired { robots: u32 },
    EmpUnavailable,
    WaveCleared { level: u32, bonus: i64 },
    RepeatArmed,
    RepeatCancelled,
    InvalidCommand,
}

impl GameEvent {
    /// Status line text
    pub fn message(&self) -> String {
        match self {
            GameEvent::LevelStarted { level, robots } => {
                format!("Level {level}: {robots} robots incoming")
            }
            GameEvent::RobotsCollided { .. } => "Robots collided!".to_string(),
            GameEvent::RobotJunked { .. } => "A robot ran into the junk".to_string(),
            GameEvent::RobotWrecked { .. } => "A robot wrecked itself on a shrub".to_string(),
            GameEvent::ObstacleCrushed { .. } => "A robot crushed a shrub".to_string(),
            GameEvent::PlayerKilled { .. } => "You were destroyed!".to_string(),
            GameEvent::PlayerBlocked { by: Some(EntityKind::Obstacle) } => {
                "A shrub is in the way".to_string()
            }
            GameEvent::PlayerBlocked { .. } => "You bumped into the wall".to_string(),
            GameEvent::Teleported { .. } => "Teleported".to_string(),
            GameEvent::TeleportUnavailable => "Teleport unavailable".to_string(),
            GameEvent::EmpFired { robots } => format!("EMP! {robots} robots frozen"),
            GameEvent::EmpUnavailable => "EMP already used this level".to_string(),
            GameEvent::WaveCleared { level, bonus } => {
                format!("Level {level} cleared! Bonus {bonus}")
            }
            GameEvent::RepeatArmed => "Repeat armed".to_string(),
            GameEvent::RepeatCancelled => "Repeat off".to_string(),
            GameEvent::InvalidCommand => "No-op".to_string(),
        }
    }
}

/// Auto-repeat state of the player controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepeatMode {
    #[default]
    Off,
    /// Waiting for the next movement command to remember
    Armed,
    /// Reissuing this command on every idle tick
    Active(super::player::Command),
}

impl RepeatMode {
    pub fn is_engaged(&self) -> bool {
        !matches!(self, RepeatMode::Off)
    }
}

/// Simulation rules fixed for the whole game
#[derive(Debug, Clone, PartialEq)]
pub struct Rules {
    pub arena: Arena,
    pub start_robots: u32,
    pub robots_per_level: u32,
    pub teleports: u32,
    pub skill: Skill,
}

/// Per-level counters, reset by the level director
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LevelState {
    /// 1-based level number
    pub number: u32,
    pub robot_target: u32,
    pub obstacle_count: u32,
    pub teleports: u32,
    pub emp_available: bool,
    /// Robot steps left to skip
    pub emp_cooldown: u32,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub rules: Rules,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub map: SpatialMap,
    /// Mirrors the single Player entry in `map`
    pub player: Coord,
    pub level: LevelState,
    pub ledger: ScoringLedger,
    pub repeat: RepeatMode,
    pub phase: GamePhase,
    /// Events raised by the current tick
    pub events: Vec<GameEvent>,
    /// Last status message shown to the player
    pub message: String,
    /// Set when the whole arena must be repainted
    pub full_redraw: bool,
}

impl GameState {
    /// Create a game and start level 1
    pub fn new(rules: Rules, seed: u64) -> Self {
        let mut state = Self::empty(rules, seed);
        super::level::start_level(&mut state, true);
        state
    }

    /// A game with an empty arena and no level started; the player sits at the center
    pub fn empty(rules: Rules, seed: u64) -> Self {
        let player = rules.arena.center();
        let mut map = SpatialMap::new();
        map.place(player, EntityKind::Player);
        Self {
            level: LevelState {
                number: 1,
                robot_target: rules.start_robots,
                obstacle_count: 0,
                teleports: rules.teleports,
                emp_available: true,
                emp_cooldown: 0,
            },
            rules,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            map,
            player,
            ledger: ScoringLedger::new(),
            repeat: RepeatMode::Off,
            phase: GamePhase::Playing,
            events: Vec::new(),
            message: String::new(),
            full_redraw: true,
        }
    }

    pub fn score(&self) -> i64 {
        self.ledger.total()
    }

    /// Robots still standing, including those inside crushed shrubs
    pub fn robots_remaining(&self) -> usize {
        self.map
            .occupied()
            .filter(|(_, kind)| kind.is_adversary())
            .count()
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.message = event.message();
        self.events.push(event);
    }

    /// Two status lines: counters, then the latest message
    pub fn status_lines(&self) -> [String; 2] {
        let emp = if self.level.emp_cooldown > 0 {
            format!("frozen {}", self.level.emp_cooldown)
        } else if self.level.emp_available {
            "ready".to_string()
        } else {
            "used".to_string()
        };
        let repeat = if self.repeat.is_engaged() { "  [repeat]" } else { "" };
        [
            format!(
                "Level {}  Score {}  Robots {}  Teleports {}  EMP {}{}",
                self.level.number,
                self.score(),
                self.robots_remaining(),
                self.level.teleports,
                emp,
                repeat
            ),
            self.message.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_toward_moves_diagonally() {
        let robot = Coord::new(1, 1);
        assert_eq!(robot.step_toward(Coord::new(5, 5)), Coord::new(2, 2));
        assert_eq!(robot.step_toward(Coord::new(1, 9)), Coord::new(1, 2));
        assert_eq!(robot.step_toward(Coord::new(0, 1)), Coord::new(0, 1));
        assert_eq!(robot.step_toward(robot), robot);
    }

    #[test]
    fn test_empty_state_has_single_player() {
        let rules = crate::Settings::default().rules();
        let state = GameState::empty(rules.clone(), 7);
        assert_eq!(state.player, rules.arena.center());
        assert_eq!(state.map.count(EntityKind::Player), 1);
        assert_eq!(state.robots_remaining(), 0);
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_robots_remaining_counts_crushed_shrubs() {
        let mut state = GameState::empty(crate::Settings::default().rules(), 7);
        state.map.place(Coord::new(1, 1), EntityKind::Robot);
        state.map.place(Coord::new(1, 3), EntityKind::CrushedObstacle);
        state.map.place(Coord::new(1, 5), EntityKind::Junk);
        state.map.place(Coord::new(1, 7), EntityKind::Obstacle);
        state.map.place(Coord::new(1, 9), EntityKind::Debris);
        assert_eq!(state.robots_remaining(), 2);
        assert!(!EntityKind::Player.is_adversary());
    }

    #[test]
    fn test_status_lines_track_message() {
        let mut state = GameState::empty(crate::Settings::default().rules(), 7);
        state.push_event(GameEvent::TeleportUnavailable);
        let [counters, message] = state.status_lines();
        assert!(counters.starts_with("Level 1  Score 0  Robots 0  Teleports 3"));
        assert!(counters.contains("EMP ready"));
        assert_eq!(message, "Teleport unavailable");
    }
}
