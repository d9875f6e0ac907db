//! Scoring ledger
//!
//! Score events carry their own point values; the ledger only sums them.
//! Repeated (auto-reissued) actions score differently from deliberate ones.

/// A scoring occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreEvent {
    /// Two robots (or a robot and a crushed shrub) merged into junk
    RobotsCollided,
    /// A robot walked into junk
    RobotJunked,
    /// A robot wrecked itself on a shrub
    RobotWrecked,
    /// Player walked into a robot
    PlayerHitRobot,
    /// Player walked into junk
    PlayerHitJunk,
    PlayerBumpedObstacle,
    PlayerBumpedWall,
    /// Teleport used with this many charges left before the jump
    Teleport { charges_before: u32 },
    /// EMP fired with this many robots on the board
    Emp { robots: u32 },
    /// Wave clear bonus
    WaveCleared { teleports_left: u32, emp_unused: bool },
}

impl ScoreEvent {
    /// Point delta; `repeat` is true under an active repeat action
    pub fn points(&self, repeat: bool) -> i64 {
        let pick = |normal: i64, repeated: i64| if repeat { repeated } else { normal };
        match *self {
            ScoreEvent::RobotsCollided => pick(20, 30),
            ScoreEvent::RobotJunked | ScoreEvent::RobotWrecked => pick(10, 15),
            ScoreEvent::PlayerHitRobot => pick(-250, -100),
            ScoreEvent::PlayerHitJunk => pick(-1000, -500),
            ScoreEvent::PlayerBumpedObstacle => pick(-50, -10),
            ScoreEvent::PlayerBumpedWall => pick(-25, -5),
            ScoreEvent::Teleport { charges_before } => -10 * charges_before as i64,
            ScoreEvent::Emp { robots } => -5 * robots as i64,
            ScoreEvent::WaveCleared {
                teleports_left,
                emp_unused,
            } => 10 * teleports_left as i64 + if emp_unused { 25 } else { 0 },
        }
    }
}

/// Running score plus the delta of the tick in progress
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoringLedger {
    total: i64,
    tick_delta: i64,
}

impl ScoringLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an event and return the points it was worth
    pub fn record(&mut self, event: ScoreEvent, repeat: bool) -> i64 {
        let points = event.points(repeat);
        self.total += points;
        self.tick_delta += points;
        points
    }

    /// Start accumulating a new tick delta
    pub fn begin_tick(&mut self) {
        self.tick_delta = 0;
    }

    /// Fresh game
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    /// Points gained or lost since `begin_tick`
    pub fn tick_delta(&self) -> i64 {
        self.tick_delta
    }
}
