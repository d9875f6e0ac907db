//! High score persistence
//!
//! The game only ever hands over finished tables; it never touches storage
//! directly. The file store keeps every skill in one text file:
//! - One `skill,score,name` line per entry, unsorted
//! - Names may contain commas (everything after the second comma)
//! - Writes go to a temporary file that is renamed over the original
//! - Lines that fail to parse are logged and dropped on the next save

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PersistenceError;
use crate::highscores::{HighScoreEntry, top_entries};
use crate::settings::Skill;

/// Storage for per-skill high score tables
pub trait HighScoreStore {
    /// Entries for `skill`, highest score first
    fn load(&self, skill: Skill) -> Result<Vec<HighScoreEntry>, PersistenceError>;

    /// Replace the table for `skill`, keeping at most the top 5
    fn save(&mut self, skill: Skill, entries: &[HighScoreEntry]) -> Result<(), PersistenceError>;
}

/// Text file holding all skill tables
#[derive(Debug, Clone)]
pub struct FileHighScoreStore {
    path: PathBuf,
}

impl FileHighScoreStore {
    /// File name used inside the data directory
    pub const FILE_NAME: &'static str = "scores";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(Self::FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every readable entry in the file, in file order
    fn read_all(&self) -> Result<Vec<HighScoreEntry>, PersistenceError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let entries = text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .filter_map(|(i, line)| match parse_line(i + 1, line) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Skipping entry in {}: {}", self.path.display(), e);
                    None
                }
            })
            .collect();
        Ok(entries)
    }
}

impl HighScoreStore for FileHighScoreStore {
    fn load(&self, skill: Skill) -> Result<Vec<HighScoreEntry>, PersistenceError> {
        Ok(top_entries(skill, self.read_all()?))
    }

    fn save(&mut self, skill: Skill, entries: &[HighScoreEntry]) -> Result<(), PersistenceError> {
        let mut kept: Vec<HighScoreEntry> = self
            .read_all()?
            .into_iter()
            .filter(|e| e.skill != skill)
            .collect();
        kept.extend(top_entries(skill, entries.iter().cloned()));

        let mut text = String::new();
        for entry in &kept {
            text.push_str(&format_line(entry));
            text.push('\n');
        }

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, text)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("Wrote {} score lines to {}", kept.len(), self.path.display());
        Ok(())
    }
}

/// In-memory tables, used when there is nowhere to write
#[derive(Debug, Clone, Default)]
pub struct MemoryHighScoreStore {
    tables: HashMap<Skill, Vec<HighScoreEntry>>,
}

impl HighScoreStore for MemoryHighScoreStore {
    fn load(&self, skill: Skill) -> Result<Vec<HighScoreEntry>, PersistenceError> {
        Ok(self.tables.get(&skill).cloned().unwrap_or_default())
    }

    fn save(&mut self, skill: Skill, entries: &[HighScoreEntry]) -> Result<(), PersistenceError> {
        self.tables
            .insert(skill, top_entries(skill, entries.iter().cloned()));
        Ok(())
    }
}

fn parse_line(line_no: usize, line: &str) -> Result<HighScoreEntry, PersistenceError> {
    let malformed = |reason: &str| PersistenceError::Malformed {
        line: line_no,
        reason: reason.to_string(),
    };

    let mut fields = line.splitn(3, ',');
    let (Some(skill), Some(score), Some(name)) = (fields.next(), fields.next(), fields.next())
    else {
        return Err(malformed("expected skill,score,name"));
    };
    let skill = Skill::from_str(skill).ok_or_else(|| malformed("unknown skill"))?;
    let score = score
        .trim()
        .parse::<i64>()
        .map_err(|_| malformed("score is not a number"))?;
    Ok(HighScoreEntry::new(skill, score, name))
}

fn format_line(entry: &HighScoreEntry) -> String {
    let name: String = entry
        .name
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .collect();
    format!("{},{},{}", entry.skill.as_str(), entry.score, name)
}
