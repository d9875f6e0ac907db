//! Play session: intro, games, score submission and replay
//!
//! Owns the frame loop. Each poll either times out or yields one command;
//! both go through a single [`tick`], and the screen is refreshed only when
//! the tick changed something.

use std::io;
use std::time::Duration;

use crate::consts::{FRAME_TIMEOUT_MS, INTRO_DELAY_MS};
use crate::highscores::{self, HighScoreEntry, HighScores};
use crate::input::InputAdapter;
use crate::persistence::HighScoreStore;
use crate::render::{self, RenderAdapter};
use crate::settings::Settings;
use crate::sim::{GamePhase, GameState, tick};

/// How a session went
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub games: u32,
    pub best_score: Option<i64>,
    /// Highest leaderboard rank reached, if any
    pub best_rank: Option<usize>,
}

/// Adapters a session talks to
pub struct Session<'a> {
    settings: &'a Settings,
    input: &'a mut dyn InputAdapter,
    out: &'a mut dyn RenderAdapter,
    store: &'a mut dyn HighScoreStore,
}

impl<'a> Session<'a> {
    pub fn new(
        settings: &'a Settings,
        input: &'a mut dyn InputAdapter,
        out: &'a mut dyn RenderAdapter,
        store: &'a mut dyn HighScoreStore,
    ) -> Self {
        Self {
            settings,
            input,
            out,
            store,
        }
    }

    /// Play games until the player declines a replay or quits
    ///
    /// Game `n` (0-based) is seeded with `seed + n`.
    pub fn run(&mut self, seed: u64) -> io::Result<SessionSummary> {
        let mut summary = SessionSummary::default();
        let rules = self.settings.rules();

        loop {
            let game_seed = seed.wrapping_add(u64::from(summary.games));
            let mut state = GameState::new(rules.clone(), game_seed);
            log::info!("Game {} started with seed {}", summary.games + 1, game_seed);

            if summary.games == 0 {
                self.intro(&state)?;
            }
            self.play(&mut state)?;
            summary.games += 1;

            let score = state.score();
            summary.best_score = Some(summary.best_score.map_or(score, |best| best.max(score)));

            let (scores, rank) = self.submit(&state);
            if let Some(rank) = rank {
                summary.best_rank = Some(summary.best_rank.map_or(rank, |best| best.min(rank)));
            }

            let mut lines = render::game_over_lines(&state, &scores, rank);
            lines.push(String::new());
            if state.phase == GamePhase::Quit {
                lines.push("Press any key".to_string());
                self.out.card(render::game_over_title(state.phase), &lines)?;
                self.out.flush()?;
                self.input
                    .wait_any_key(Duration::from_millis(INTRO_DELAY_MS * 2))?;
                break;
            }

            lines.push("Play again? (y/n)".to_string());
            self.out.card(render::game_over_title(state.phase), &lines)?;
            self.out.flush()?;
            if !self.input.confirm()? {
                break;
            }
        }

        log::info!(
            "Session over after {} games, best score {:?}",
            summary.games,
            summary.best_score
        );
        Ok(summary)
    }

    fn intro(&mut self, state: &GameState) -> io::Result<()> {
        self.out.card("ROBOTS", &render::intro_lines(state))?;
        self.out.flush()?;
        if !self.settings.fast_intro {
            self.input
                .wait_any_key(Duration::from_millis(INTRO_DELAY_MS))?;
        }
        Ok(())
    }

    /// Run ticks until the game leaves the playing phase
    fn play(&mut self, state: &mut GameState) -> io::Result<()> {
        let timeout = Duration::from_millis(FRAME_TIMEOUT_MS);
        render::present(state, self.out)?;
        while state.phase == GamePhase::Playing {
            let input = self.input.poll(timeout)?;
            let summary = tick(state, input);
            if summary.acted {
                render::present(state, self.out)?;
            }
        }
        Ok(())
    }

    /// Hand the final score to the store; storage trouble never ends the session
    fn submit(&mut self, state: &GameState) -> (HighScores, Option<usize>) {
        let skill = self.settings.skill;
        let candidate = HighScoreEntry::new(skill, state.score(), self.settings.name.clone());
        match highscores::submit_score(self.store, candidate) {
            Ok(result) => result,
            Err(e) => {
                log::warn!("Could not update high scores: {}", e);
                (HighScores::new(skill), None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScriptedInput;
    use crate::persistence::MemoryHighScoreStore;
    use crate::render::DrawRequest;
    use crate::settings::Skill;
    use crate::sim::{Arena, Command, Direction};

    #[derive(Default)]
    struct Recorder {
        cards: Vec<(String, Vec<String>)>,
        draws: usize,
    }

    impl RenderAdapter for Recorder {
        fn clear_arena(&mut self, _arena: Arena) -> io::Result<()> {
            Ok(())
        }

        fn draw(&mut self, _request: DrawRequest) -> io::Result<()> {
            self.draws += 1;
            Ok(())
        }

        fn status(&mut self, _lines: &[String]) -> io::Result<()> {
            Ok(())
        }

        fn card(&mut self, title: &str, lines: &[String]) -> io::Result<()> {
            self.cards.push((title.to_string(), lines.to_vec()));
            Ok(())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn settings() -> Settings {
        Settings {
            name: "tester".to_string(),
            fast_intro: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_quit_ends_session_after_one_game() {
        let settings = settings();
        let mut input = ScriptedInput::new([Command::Wait, Command::Quit]);
        let mut out = Recorder::default();
        let mut store = MemoryHighScoreStore::default();

        let summary = Session::new(&settings, &mut input, &mut out, &mut store)
            .run(42)
            .unwrap();

        assert_eq!(summary.games, 1);
        assert!(out.draws > 0);
        let titles: Vec<_> = out.cards.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(titles, vec!["ROBOTS", "GAME ENDED"]);
    }

    #[test]
    fn test_replay_after_game_over() {
        let settings = Settings {
            rows: 5,
            cols: 5,
            start_robots: 15,
            skill: Skill::Hard,
            ..settings()
        };
        let mut input =
            ScriptedInput::new(std::iter::repeat_n(Command::Wait, 300)).with_answers([true]);
        let mut out = Recorder::default();
        let mut store = MemoryHighScoreStore::default();

        let summary = Session::new(&settings, &mut input, &mut out, &mut store)
            .run(1)
            .unwrap();

        let titles: Vec<_> = out.cards.iter().map(|(t, _)| t.as_str()).collect();
        assert_eq!(titles[0], "ROBOTS");
        assert_eq!(titles.len() as u32, summary.games + 1);
        // Only a real game over offers the replay that was accepted
        let expected = if titles[1] == "GAME OVER" { 2 } else { 1 };
        assert_eq!(summary.games, expected);
        assert_eq!(titles.iter().filter(|t| **t == "ROBOTS").count(), 1);
    }

    #[test]
    fn test_positive_score_reaches_the_store() {
        let settings = Settings {
            skill: Skill::Easy,
            ..settings()
        };
        let mut store = MemoryHighScoreStore::default();
        // Same seed, same board: wait until the robots pile up or catch us
        let waits = std::iter::repeat_n(Command::Wait, 400);
        let mut input = ScriptedInput::new(waits);
        let mut out = Recorder::default();

        let summary = Session::new(&settings, &mut input, &mut out, &mut store)
            .run(7)
            .unwrap();

        let best = summary.best_score.unwrap_or_default();
        let stored = store.load(Skill::Easy).unwrap();
        if best > 0 {
            assert_eq!(stored[0].score, best);
            assert_eq!(stored[0].name, "tester");
            assert_eq!(summary.best_rank, Some(1));
        } else {
            assert!(stored.is_empty());
        }
    }

    #[test]
    fn test_moves_are_presented() {
        let settings = settings();
        let mut input = ScriptedInput::new([
            Command::Move(Direction::North),
            Command::Invalid,
            Command::Quit,
        ]);
        let mut out = Recorder::default();
        let mut store = MemoryHighScoreStore::default();
        Session::new(&settings, &mut input, &mut out, &mut store)
            .run(3)
            .unwrap();
        let (_, lines) = &out.cards[1];
        assert!(lines[0].starts_with("Final score"));
    }
}
