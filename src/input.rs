//! Input seam
//!
//! Adapters decode whatever the device produces into one [`TickInput`] per
//! poll. Raw key codes and escape sequences never reach the simulation.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crate::sim::{Command, TickInput};

/// Input side of the game
pub trait InputAdapter {
    /// Wait up to `timeout` for one command; [`TickInput::Idle`] on timeout
    fn poll(&mut self, timeout: Duration) -> io::Result<TickInput>;

    /// Block until any key is pressed or `timeout` runs out
    ///
    /// Returns true if a key was pressed.
    fn wait_any_key(&mut self, timeout: Duration) -> io::Result<bool>;

    /// Block until the player answers yes or no
    fn confirm(&mut self) -> io::Result<bool>;
}

/// Replays a fixed list of commands, then quits
///
/// Used for headless runs and tests.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    inputs: VecDeque<TickInput>,
    answers: VecDeque<bool>,
}

impl ScriptedInput {
    pub fn new(commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            inputs: commands.into_iter().map(TickInput::Command).collect(),
            answers: VecDeque::new(),
        }
    }

    /// Queue answers for [`InputAdapter::confirm`]; once exhausted it answers no
    pub fn with_answers(mut self, answers: impl IntoIterator<Item = bool>) -> Self {
        self.answers.extend(answers);
        self
    }

    pub fn is_exhausted(&self) -> bool {
        self.inputs.is_empty()
    }
}

impl InputAdapter for ScriptedInput {
    fn poll(&mut self, _timeout: Duration) -> io::Result<TickInput> {
        Ok(self
            .inputs
            .pop_front()
            .unwrap_or(TickInput::Command(Command::Quit)))
    }

    fn wait_any_key(&mut self, _timeout: Duration) -> io::Result<bool> {
        Ok(false)
    }

    fn confirm(&mut self) -> io::Result<bool> {
        Ok(self.answers.pop_front().unwrap_or(false))
    }
}
