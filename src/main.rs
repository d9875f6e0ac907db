//! Term Robots entry point
//!
//! Parses flags, layers them over saved settings, then runs a session on the
//! terminal. Configuration problems are reported before the screen is taken.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use term_robots::persistence::{FileHighScoreStore, HighScoreStore, MemoryHighScoreStore};
use term_robots::session::Session;
use term_robots::terminal::{self, TerminalGuard, TerminalInput, TerminalRenderer};
use term_robots::{ConfigError, Settings, Skill};

#[derive(Parser, Debug)]
#[command(name = "term-robots", version)]
#[command(about = "Dodge the robots until they wreck each other")]
struct Cli {
    /// Robots on level 1 (5-15)
    #[arg(short = 'r', long)]
    robots: Option<u32>,
    /// Extra robots per level (1-5)
    #[arg(short = 'i', long)]
    increment: Option<u32>,
    /// Teleport charges per level (1-10)
    #[arg(short = 't', long)]
    teleports: Option<u32>,
    /// easy, normal or hard
    #[arg(short = 's', long)]
    skill: Option<String>,
    /// Name recorded with high scores
    #[arg(short = 'n', long)]
    name: Option<String>,
    /// Plain characters only
    #[arg(long)]
    no_color: bool,
    /// Skip the intro pause
    #[arg(short = 'f', long)]
    fast: bool,
    /// Arena rows
    #[arg(long)]
    rows: Option<i32>,
    /// Arena columns
    #[arg(long)]
    cols: Option<i32>,
    /// Seed for the first game; random if omitted
    #[arg(long)]
    seed: Option<u64>,
    /// Settings file (defaults to ~/.term-robots/settings.json)
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Cli {
    /// Layer flags over `settings`
    fn apply(&self, settings: &mut Settings) -> Result<(), ConfigError> {
        if let Some(robots) = self.robots {
            settings.start_robots = robots;
        }
        if let Some(increment) = self.increment {
            settings.robots_per_level = increment;
        }
        if let Some(teleports) = self.teleports {
            settings.teleports = teleports;
        }
        if let Some(skill) = &self.skill {
            settings.skill =
                Skill::from_str(skill).ok_or_else(|| ConfigError::UnknownSkill(skill.clone()))?;
        }
        if let Some(name) = &self.name {
            settings.name = name.trim().to_string();
        }
        if let Some(rows) = self.rows {
            settings.rows = rows;
        }
        if let Some(cols) = self.cols {
            settings.cols = cols;
        }
        if self.no_color {
            settings.color = false;
        }
        if self.fast {
            settings.fast_intro = true;
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let data_dir = Settings::data_dir();
    let settings_path = cli
        .config
        .clone()
        .or_else(|| data_dir.as_deref().map(Settings::path_in));

    let mut settings = settings_path
        .as_deref()
        .map(Settings::load_or_default)
        .unwrap_or_default();
    cli.apply(&mut settings)?;
    settings.validate().context("invalid configuration")?;

    if let Some(path) = &settings_path {
        if let Err(e) = settings.save(path) {
            log::warn!("Could not save settings to {}: {}", path.display(), e);
        }
    }

    let mut store: Box<dyn HighScoreStore> = match &data_dir {
        Some(dir) => Box::new(FileHighScoreStore::in_dir(dir)),
        None => {
            log::warn!("No home directory, high scores last for this session only");
            Box::new(MemoryHighScoreStore::default())
        }
    };

    let rules = settings.rules();
    terminal::ensure_fits(rules.arena)?;

    let seed = cli.seed.unwrap_or_else(rand::random);
    log::info!("Term Robots starting with seed {}", seed);

    let summary = {
        let _guard = TerminalGuard::enter().context("could not set up the terminal")?;
        let mut input = TerminalInput::new();
        let mut out = TerminalRenderer::new(io::stdout(), rules.arena, settings.color);
        Session::new(&settings, &mut input, &mut out, store.as_mut()).run(seed)?
    };

    match summary.best_score {
        Some(best) => println!(
            "Thanks for playing! {} game(s), best score {}",
            summary.games, best
        ),
        None => println!("Thanks for playing!"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_settings() {
        let cli = Cli::parse_from([
            "term-robots",
            "-r",
            "12",
            "--skill",
            "hard",
            "--name",
            " ada ",
            "--no-color",
            "-f",
        ]);
        let mut settings = Settings::default();
        cli.apply(&mut settings).unwrap();
        assert_eq!(settings.start_robots, 12);
        assert_eq!(settings.skill, Skill::Hard);
        assert_eq!(settings.name, "ada");
        assert!(!settings.color);
        assert!(settings.fast_intro);
        assert_eq!(settings.teleports, Settings::default().teleports);
    }

    #[test]
    fn test_bad_flags_are_configuration_errors() {
        let cli = Cli::parse_from(["term-robots", "--skill", "insane"]);
        assert_eq!(
            cli.apply(&mut Settings::default()),
            Err(ConfigError::UnknownSkill("insane".to_string()))
        );

        let cli = Cli::parse_from(["term-robots", "--robots", "40"]);
        let mut settings = Settings::default();
        cli.apply(&mut settings).unwrap();
        assert!(matches!(
            settings.validate(),
            Err(ConfigError::StartRobots { value: 40, .. })
        ));
    }
}
