//! Keyboard decoding
//!
//! Vi-style keys and arrows move, everything unknown is an invalid command.
//! crossterm already turns escape sequences into key codes.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::input::InputAdapter;
use crate::sim::{Command, Direction, TickInput};

/// Map one key event to a command; `None` for releases
pub fn decode_key(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Command::Quit);
    }

    let command = match key.code {
        KeyCode::Up => Command::Move(Direction::North),
        KeyCode::Down => Command::Move(Direction::South),
        KeyCode::Left => Command::Move(Direction::West),
        KeyCode::Right => Command::Move(Direction::East),
        KeyCode::Esc => Command::Quit,
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'k' => Command::Move(Direction::North),
            'j' => Command::Move(Direction::South),
            'h' => Command::Move(Direction::West),
            'l' => Command::Move(Direction::East),
            'y' => Command::Move(Direction::NorthWest),
            'u' => Command::Move(Direction::NorthEast),
            'b' => Command::Move(Direction::SouthWest),
            'n' => Command::Move(Direction::SouthEast),
            '.' | 'w' | ' ' => Command::Wait,
            'r' => Command::ToggleRepeat,
            't' => Command::Teleport,
            'e' => Command::ActivateEmp,
            'q' => Command::Quit,
            _ => Command::Invalid,
        },
        _ => Command::Invalid,
    };
    Some(command)
}

/// Reads keys from the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalInput;

impl TerminalInput {
    pub fn new() -> Self {
        Self
    }

    /// Next key press within `timeout`
    fn next_press(&mut self, timeout: Duration) -> io::Result<Option<KeyEvent>> {
        let deadline = Instant::now() + timeout;
        loop {
            let left = deadline.saturating_duration_since(Instant::now());
            if left.is_zero() || !event::poll(left)? {
                return Ok(None);
            }
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => return Ok(Some(key)),
                _ => {}
            }
        }
    }
}

impl InputAdapter for TerminalInput {
    fn poll(&mut self, timeout: Duration) -> io::Result<TickInput> {
        Ok(self
            .next_press(timeout)?
            .and_then(decode_key)
            .map_or(TickInput::Idle, TickInput::Command))
    }

    fn wait_any_key(&mut self, timeout: Duration) -> io::Result<bool> {
        Ok(self.next_press(timeout)?.is_some())
    }

    fn confirm(&mut self) -> io::Result<bool> {
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                match key.code {
                    KeyCode::Char('y' | 'Y') | KeyCode::Enter => return Ok(true),
                    KeyCode::Char('n' | 'N' | 'q' | 'Q') | KeyCode::Esc => return Ok(false),
                    _ => {}
                }
            }
        }
    }
}
