//! Game settings and preferences
//!
//! Persisted as JSON next to the high score table. Command-line flags are
//! layered on top of whatever was loaded, then the result is validated.

use std::fs;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{ConfigError, PersistenceError};
use crate::sim::{Arena, Rules};

/// Skill levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Skill {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Skill {
    pub const ALL: [Skill; 3] = [Skill::Easy, Skill::Normal, Skill::Hard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Skill::Easy => "easy",
            Skill::Normal => "normal",
            Skill::Hard => "hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "easy" | "e" => Some(Skill::Easy),
            "normal" | "n" => Some(Skill::Normal),
            "hard" | "h" => Some(Skill::Hard),
            _ => None,
        }
    }

    /// Number of shrubs scattered at level start
    pub fn obstacle_range(&self) -> RangeInclusive<u32> {
        match self {
            Skill::Easy => 20..=30,
            Skill::Normal => 12..=20,
            Skill::Hard => 6..=12,
        }
    }

    /// Robots spawn with both row and column distance from the player above this
    pub fn safe_radius(&self) -> i32 {
        match self {
            Skill::Easy => 6,
            Skill::Normal => 4,
            Skill::Hard => 2,
        }
    }

    /// Whether a robot can wreck itself on a shrub
    pub fn robots_wreck_on_obstacles(&self) -> bool {
        !matches!(self, Skill::Hard)
    }

    /// Whether a robot can crush its way into a shrub
    pub fn robots_crush_obstacles(&self) -> bool {
        !matches!(self, Skill::Easy)
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Rules ===
    /// Robots on level 1
    pub start_robots: u32,
    /// Robots added on each following level
    pub robots_per_level: u32,
    /// Teleport charges granted per level
    pub teleports: u32,
    pub skill: Skill,

    // === Arena ===
    pub rows: i32,
    pub cols: i32,

    // === Presentation ===
    /// Name recorded in the high score table
    pub name: String,
    pub color: bool,
    /// Skip the title card delay
    pub fast_intro: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            start_robots: DEFAULT_START_ROBOTS,
            robots_per_level: DEFAULT_ROBOTS_PER_LEVEL,
            teleports: DEFAULT_TELEPORTS,
            skill: Skill::Normal,

            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,

            name: "player".to_string(),
            color: true,
            fast_intro: false,
        }
    }
}

impl Settings {
    /// File name used inside the data directory
    const FILE_NAME: &'static str = "settings.json";

    /// Check every value against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(self.start_robots, START_ROBOTS_RANGE, |value, min, max| {
            ConfigError::StartRobots { value, min, max }
        })?;
        check_range(
            self.robots_per_level,
            ROBOTS_PER_LEVEL_RANGE,
            |value, min, max| ConfigError::RobotsPerLevel { value, min, max },
        )?;
        check_range(self.teleports, TELEPORTS_RANGE, |value, min, max| {
            ConfigError::Teleports { value, min, max }
        })?;
        if self.rows < MIN_ARENA_EXTENT || self.cols < MIN_ARENA_EXTENT {
            return Err(ConfigError::ArenaTooSmall {
                rows: self.rows,
                cols: self.cols,
                min: MIN_ARENA_EXTENT,
            });
        }
        if self.rows > MAX_ARENA_EXTENT || self.cols > MAX_ARENA_EXTENT {
            return Err(ConfigError::ArenaTooLarge {
                rows: self.rows,
                cols: self.cols,
                max: MAX_ARENA_EXTENT,
            });
        }
        if self.name.trim().is_empty() {
            return Err(ConfigError::EmptyName);
        }
        Ok(())
    }

    /// The subset of settings the simulation cares about
    pub fn rules(&self) -> Rules {
        Rules {
            arena: Arena::new(self.rows, self.cols),
            start_robots: self.start_robots,
            robots_per_level: self.robots_per_level,
            teleports: self.teleports,
            skill: self.skill,
        }
    }

    /// Per-user data directory (`~/.term-robots`)
    pub fn data_dir() -> Option<PathBuf> {
        std::env::var_os("HOME").map(|home| PathBuf::from(home).join(".term-robots"))
    }

    /// Settings file location inside `dir`
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(Self::FILE_NAME)
    }

    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self, PersistenceError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load settings, falling back to defaults when the file is missing or unreadable
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(PersistenceError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("Using default settings");
                Self::default()
            }
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON, creating the parent directory if needed
    pub fn save(&self, path: &Path) -> Result<(), PersistenceError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        log::info!("Settings saved");
        Ok(())
    }
}

fn check_range(
    value: u32,
    allowed: RangeInclusive<u32>,
    err: impl FnOnce(u32, u32, u32) -> ConfigError,
) -> Result<(), ConfigError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(err(value, *allowed.start(), *allowed.end()))
    }
}
