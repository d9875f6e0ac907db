//! Rendering seam
//!
//! The simulation never draws. After each tick [`present`] turns the map's
//! dirty cells into [`DrawRequest`]s and hands them, together with the status
//! lines, to whatever [`RenderAdapter`] is plugged in.

use std::io;

use crate::highscores::HighScores;
use crate::sim::{Arena, Coord, EntityKind, GamePhase, GameState};

/// Redraw one cell; `kind: None` blanks it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawRequest {
    pub at: Coord,
    pub kind: Option<EntityKind>,
}

/// Output side of the game
pub trait RenderAdapter {
    /// Wipe the screen and draw the empty arena with its border
    fn clear_arena(&mut self, arena: Arena) -> io::Result<()>;

    fn draw(&mut self, request: DrawRequest) -> io::Result<()>;

    /// Replace the status area with `lines`
    fn status(&mut self, lines: &[String]) -> io::Result<()>;

    /// Full-screen text card (intro, game over)
    fn card(&mut self, title: &str, lines: &[String]) -> io::Result<()>;

    fn flush(&mut self) -> io::Result<()>;
}

/// Push everything that changed since the last call to `out`
pub fn present(state: &mut GameState, out: &mut dyn RenderAdapter) -> io::Result<()> {
    if state.full_redraw {
        out.clear_arena(state.rules.arena)?;
        for (at, kind) in state.map.occupied() {
            out.draw(DrawRequest {
                at,
                kind: Some(kind),
            })?;
        }
        // Everything is already on screen
        state.map.take_dirty();
        state.full_redraw = false;
    } else {
        for at in state.map.take_dirty() {
            out.draw(DrawRequest {
                at,
                kind: state.map.occupant_at(at),
            })?;
        }
    }

    out.status(&state.status_lines())?;
    out.flush()
}

/// Lines for the title card shown before the first level
pub fn intro_lines(state: &GameState) -> Vec<String> {
    let rules = &state.rules;
    vec![
        format!(
            "{} robots, {} more each level, skill {}",
            rules.start_robots,
            rules.robots_per_level,
            rules.skill.as_str()
        ),
        String::new(),
        "Move     h j k l y u b n or arrows".to_string(),
        "Wait     . w or space".to_string(),
        format!("Teleport t ({} per level)", rules.teleports),
        "EMP      e (once per level)".to_string(),
        "Repeat   r, then a move".to_string(),
        "Quit     q".to_string(),
        String::new(),
        "Press any key".to_string(),
    ]
}

/// Lines for the end-of-game card
pub fn game_over_lines(state: &GameState, scores: &HighScores, rank: Option<usize>) -> Vec<String> {
    let mut lines = vec![format!(
        "Final score {} on level {}",
        state.score(),
        state.level.number
    )];
    match (rank, scores.top_score()) {
        (Some(rank), _) => lines.push(format!("New high score, rank {rank}!")),
        (None, Some(best)) => lines.push(format!("Best to beat: {best}")),
        (None, None) => {}
    }
    lines.push(String::new());
    lines.push(format!("Top scores ({})", scores.skill.as_str()));
    if scores.is_empty() {
        lines.push("(none yet)".to_string());
    } else {
        lines.extend(scores.lines());
    }
    lines
}

/// Card title for a finished game
pub fn game_over_title(phase: GamePhase) -> &'static str {
    match phase {
        GamePhase::Quit => "GAME ENDED",
        _ => "GAME OVER",
    }
}
