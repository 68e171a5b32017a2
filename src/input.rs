//! Input command latching
//!
//! Turns device events (keys, clicks, touches) into per-tick `TickInput`.
//! The simulation never sees a device, only commands.

use crate::sim::TickInput;

/// A device-agnostic command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft(bool),
    MoveRight(bool),
    /// Shoot (edge-triggered)
    Fire,
    Start,
    Restart,
}

impl Command {
    /// Map a keyboard key name to a command. Unknown keys map to `None`.
    ///
    /// Fire/Start/Restart only trigger on press; releases are dropped.
    pub fn from_key(key: &str, pressed: bool) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" | "A" => Some(Command::MoveLeft(pressed)),
            "ArrowRight" | "d" | "D" => Some(Command::MoveRight(pressed)),
            " " | "Space" | "w" | "W" if pressed => Some(Command::Fire),
            "Enter" if pressed => Some(Command::Start),
            "r" | "R" if pressed => Some(Command::Restart),
            _ => None,
        }
    }
}

/// Held directions plus pending one-shot commands
#[derive(Debug, Clone, Default)]
pub struct InputState {
    left: bool,
    right: bool,
    fire: bool,
    start: bool,
    restart: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::MoveLeft(active) => self.left = active,
            Command::MoveRight(active) => self.right = active,
            Command::Fire => self.fire = true,
            Command::Start => self.start = true,
            Command::Restart => self.restart = true,
        }
    }

    /// Apply a key event, ignoring keys that mean nothing to the game
    pub fn apply_key(&mut self, key: &str, pressed: bool) {
        if let Some(command) = Command::from_key(key, pressed) {
            self.apply(command);
        }
    }

    /// Input for the next tick; one-shot commands are consumed
    pub fn take_tick_input(&mut self) -> TickInput {
        let input = TickInput {
            left: self.left,
            right: self.right,
            fire: self.fire,
            start: self.start,
            restart: self.restart,
        };
        self.fire = false;
        self.start = false;
        self.restart = false;
        input
    }
}
