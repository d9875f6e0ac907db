//! Terminal renderer
//!
//! Cells map one-to-one onto terminal characters: arena cell (row, col) is
//! drawn at screen column `col`, screen row `row`, leaving row and column 0
//! for the wall. Commands are batched with `queue!` and flushed once per
//! frame.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use super::STATUS_LINES;
use crate::render::{DrawRequest, RenderAdapter};
use crate::sim::{Arena, EntityKind};

/// Character for a cell's occupant
pub fn glyph(kind: Option<EntityKind>) -> char {
    match kind {
        None => ' ',
        Some(EntityKind::Player) => '@',
        Some(EntityKind::Robot) => '+',
        Some(EntityKind::Obstacle) => '%',
        Some(EntityKind::CrushedObstacle) => '&',
        Some(EntityKind::Junk) => '*',
        Some(EntityKind::Debris) => 'X',
        Some(EntityKind::Wall) => '#',
    }
}

fn color(kind: Option<EntityKind>) -> Color {
    match kind {
        None => Color::Reset,
        Some(EntityKind::Player) => Color::Yellow,
        Some(EntityKind::Robot) => Color::Red,
        Some(EntityKind::Obstacle) => Color::Green,
        Some(EntityKind::CrushedObstacle) => Color::DarkYellow,
        Some(EntityKind::Junk) => Color::DarkGrey,
        Some(EntityKind::Debris) => Color::Magenta,
        Some(EntityKind::Wall) => Color::Blue,
    }
}

/// Draws onto any writer speaking ANSI, normally stdout
pub struct TerminalRenderer<W: Write> {
    out: W,
    color: bool,
    arena: Arena,
}

impl<W: Write> TerminalRenderer<W> {
    pub fn new(out: W, arena: Arena, color: bool) -> Self {
        Self { out, color, arena }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn put(&mut self, x: u16, y: u16, kind: Option<EntityKind>) -> io::Result<()> {
        queue!(self.out, MoveTo(x, y))?;
        if self.color {
            queue!(
                self.out,
                SetForegroundColor(color(kind)),
                Print(glyph(kind)),
                ResetColor
            )
        } else {
            queue!(self.out, Print(glyph(kind)))
        }
    }

    fn width(&self) -> usize {
        (self.arena.cols + 2).max(0) as usize
    }
}

impl<W: Write> RenderAdapter for TerminalRenderer<W> {
    fn clear_arena(&mut self, arena: Arena) -> io::Result<()> {
        self.arena = arena;
        queue!(self.out, Clear(ClearType::All))?;
        for wall in arena.wall_cells() {
            self.put(wall.col as u16, wall.row as u16, Some(EntityKind::Wall))?;
        }
        Ok(())
    }

    fn draw(&mut self, request: DrawRequest) -> io::Result<()> {
        if !self.arena.contains(request.at) {
            log::debug!("Ignoring draw outside the arena at {:?}", request.at);
            return Ok(());
        }
        self.put(request.at.col as u16, request.at.row as u16, request.kind)
    }

    fn status(&mut self, lines: &[String]) -> io::Result<()> {
        let top = (self.arena.rows + 2).max(0) as u16;
        let width = self.width();
        for (i, line) in lines.iter().take(STATUS_LINES as usize).enumerate() {
            let text: String = line.chars().take(width).collect();
            queue!(
                self.out,
                MoveTo(0, top + i as u16),
                Clear(ClearType::CurrentLine),
                Print(text)
            )?;
        }
        Ok(())
    }

    fn card(&mut self, title: &str, lines: &[String]) -> io::Result<()> {
        let width = self.width();
        queue!(self.out, Clear(ClearType::All))?;

        let pad = width.saturating_sub(title.chars().count()) / 2;
        queue!(self.out, MoveTo(pad as u16, 1))?;
        if self.color {
            queue!(
                self.out,
                SetForegroundColor(Color::Yellow),
                Print(title),
                ResetColor
            )?;
        } else {
            queue!(self.out, Print(title))?;
        }

        for (i, line) in lines.iter().enumerate() {
            queue!(self.out, MoveTo(2, 3 + i as u16), Print(line))?;
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
