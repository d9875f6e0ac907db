//! High score leaderboard system
//!
//! One table per skill level, top 5 scores each. Storage lives behind
//! [`crate::persistence::HighScoreStore`].

use crate::error::PersistenceError;
use crate::persistence::HighScoreStore;
use crate::settings::Skill;

/// Maximum number of high scores to keep per skill
pub const MAX_HIGH_SCORES: usize = 5;

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreEntry {
    pub skill: Skill,
    pub score: i64,
    /// Player's display name
    pub name: String,
}

impl HighScoreEntry {
    pub fn new(skill: Skill, score: i64, name: impl Into<String>) -> Self {
        Self {
            skill,
            score,
            name: name.into(),
        }
    }
}

/// High score leaderboard for one skill level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScores {
    pub skill: Skill,
    /// Sorted by score, highest first
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new(skill: Skill) -> Self {
        Self {
            skill,
            entries: Vec::new(),
        }
    }

    /// Build from unsorted entries, keeping only this skill's top scores
    pub fn from_entries(skill: Skill, entries: impl IntoIterator<Item = HighScoreEntry>) -> Self {
        Self {
            skill,
            entries: top_entries(skill, entries),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: i64) -> bool {
        if score <= 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a new entry to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, entry: HighScoreEntry) -> Option<usize> {
        if entry.skill != self.skill || !self.qualifies(entry.score) {
            return None;
        }

        // Find insertion point (sorted descending by score)
        let pos = self.entries.iter().position(|e| entry.score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        // Trim to max size
        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }

    /// Check if the leaderboard is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<i64> {
        self.entries.first().map(|e| e.score)
    }

    /// One display line per entry
    pub fn lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, e)| format!("{}. {:>7}  {}", i + 1, e.score, e.name))
            .collect()
    }
}

/// `skill`'s entries, highest score first, at most [`MAX_HIGH_SCORES`]
pub fn top_entries(
    skill: Skill,
    entries: impl IntoIterator<Item = HighScoreEntry>,
) -> Vec<HighScoreEntry> {
    let mut entries: Vec<_> = entries.into_iter().filter(|e| e.skill == skill).collect();
    // Stable: equal scores keep their stored order
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(MAX_HIGH_SCORES);
    entries
}

/// Record a finished game's score; returns the rank it reached, if any
///
/// Called at most once per game over.
pub fn submit_score(
    store: &mut dyn HighScoreStore,
    candidate: HighScoreEntry,
) -> Result<(HighScores, Option<usize>), PersistenceError> {
    let skill = candidate.skill;
    let mut scores = HighScores::from_entries(skill, store.load(skill)?);
    let rank = scores.add_score(candidate);
    if rank.is_some() {
        store.save(skill, &scores.entries)?;
        log::info!("High score saved at rank {:?} ({})", rank, skill.as_str());
    }
    Ok((scores, rank))
}
