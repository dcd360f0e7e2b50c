//! Command flags and key polling
//!
//! The host polls keys once per display frame; the resulting flags are
//! latched until the next fixed tick consumes them.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A single control command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    RollLeft,
    RollRight,
    PitchUp,
    PitchDown,
    YawLeft,
    YawRight,
    MoveForward,
    MoveBackward,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Bleed off linear velocity (kinematic controller only)
    StopMovement,
    /// Bleed off roll/pitch/yaw rates (kinematic controller only)
    StopRotation,
}

impl Command {
    /// Every command, in bit order
    pub const ALL: [Command; 14] = [
        Command::RollLeft,
        Command::RollRight,
        Command::PitchUp,
        Command::PitchDown,
        Command::YawLeft,
        Command::YawRight,
        Command::MoveForward,
        Command::MoveBackward,
        Command::MoveLeft,
        Command::MoveRight,
        Command::MoveUp,
        Command::MoveDown,
        Command::StopMovement,
        Command::StopRotation,
    ];

    #[inline]
    fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Commands active during one elapsed frame (bitmask)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InputFrame(u16);

impl InputFrame {
    pub const EMPTY: InputFrame = InputFrame(0);

    /// Build a frame from a list of commands
    pub fn from_commands(commands: &[Command]) -> Self {
        let mut frame = Self::EMPTY;
        for &command in commands {
            frame.set(command);
        }
        frame
    }

    pub fn set(&mut self, command: Command) {
        self.0 |= command.bit();
    }

    pub fn clear(&mut self, command: Command) {
        self.0 &= !command.bit();
    }

    #[inline]
    pub fn is_set(&self, command: Command) -> bool {
        self.0 & command.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Combine with another frame (flags are sticky until consumed)
    pub fn merge(&mut self, other: InputFrame) {
        self.0 |= other.0;
    }

    /// Return the current flags and reset to empty
    pub fn take(&mut self) -> InputFrame {
        std::mem::take(self)
    }

    /// Iterate the set commands in bit order
    pub fn iter(&self) -> impl Iterator<Item = Command> + '_ {
        Command::ALL.into_iter().filter(|c| self.is_set(*c))
    }
}

impl FromIterator<Command> for InputFrame {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        let mut frame = Self::EMPTY;
        for command in iter {
            frame.set(command);
        }
        frame
    }
}

/// Physical keys the bindings can refer to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    A,
    D,
    E,
    I,
    J,
    K,
    L,
    O,
    Q,
    S,
    U,
    W,
    LeftShift,
    RightShift,
    Space,
    Up,
    Down,
    Left,
    Right,
}

/// Host key query
pub trait KeyState {
    fn is_down(&self, key: Key) -> bool;
}

impl KeyState for HashSet<Key> {
    fn is_down(&self, key: Key) -> bool {
        self.contains(&key)
    }
}

impl KeyState for [Key] {
    fn is_down(&self, key: Key) -> bool {
        self.contains(&key)
    }
}

impl<const N: usize> KeyState for [Key; N] {
    fn is_down(&self, key: Key) -> bool {
        self.contains(&key)
    }
}

/// Command -> key table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyBindings {
    pub bindings: Vec<(Command, Key)>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            bindings: vec![
                (Command::RollLeft, Key::U),
                (Command::RollRight, Key::O),
                (Command::PitchDown, Key::I),
                (Command::PitchUp, Key::K),
                (Command::YawLeft, Key::J),
                (Command::YawRight, Key::L),
                (Command::MoveForward, Key::W),
                (Command::MoveBackward, Key::S),
                (Command::MoveLeft, Key::A),
                (Command::MoveRight, Key::D),
                (Command::MoveUp, Key::E),
                (Command::MoveDown, Key::Q),
                (Command::StopMovement, Key::LeftShift),
                (Command::StopRotation, Key::RightShift),
            ],
        }
    }
}

impl KeyBindings {
    /// Key bound to a command (first match wins)
    pub fn key_for(&self, command: Command) -> Option<Key> {
        self.bindings
            .iter()
            .find(|(c, _)| *c == command)
            .map(|(_, k)| *k)
    }

    /// Rebind a command, replacing any existing binding for it
    pub fn bind(&mut self, command: Command, key: Key) {
        self.bindings.retain(|(c, _)| *c != command);
        self.bindings.push((command, key));
    }

    /// Commands whose keys are currently held
    pub fn poll<S: KeyState + ?Sized>(&self, keys: &S) -> InputFrame {
        self.bindings
            .iter()
            .filter(|(_, key)| keys.is_down(*key))
            .map(|(command, _)| *command)
            .collect()
    }
}

/// Pending input between display frames and fixed ticks
///
/// Not cleared per display frame: a flag stays set until a tick consumes it,
/// so a tap shorter than one tick still reaches the controller.
#[derive(Debug, Clone, Default)]
pub struct InputLatch {
    pending: InputFrame,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-frame read step: OR held keys into the pending frame
    pub fn read<S: KeyState + ?Sized>(&mut self, keys: &S, bindings: &KeyBindings) {
        self.pending.merge(bindings.poll(keys));
    }

    /// Latch an already-built frame (scripted or network input)
    pub fn push(&mut self, frame: InputFrame) {
        self.pending.merge(frame);
    }

    /// Hand the pending frame to a tick and reset it
    pub fn consume(&mut self) -> InputFrame {
        self.pending.take()
    }

    pub fn pending(&self) -> InputFrame {
        self.pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_set_and_clear() {
        let mut frame = InputFrame::default();
        assert!(frame.is_empty());
        frame.set(Command::PitchUp);
        frame.set(Command::MoveDown);
        assert!(frame.is_set(Command::PitchUp));
        assert!(frame.is_set(Command::MoveDown));
        assert!(!frame.is_set(Command::PitchDown));
        frame.clear(Command::PitchUp);
        assert!(!frame.is_set(Command::PitchUp));
        assert_eq!(frame.iter().collect::<Vec<_>>(), vec![Command::MoveDown]);
    }

    #[test]
    fn test_all_commands_have_distinct_bits() {
        let frame: InputFrame = Command::ALL.into_iter().collect();
        assert_eq!(frame.iter().count(), Command::ALL.len());
    }

    #[test]
    fn test_take_resets() {
        let mut frame = InputFrame::from_commands(&[Command::RollLeft]);
        let taken = frame.take();
        assert!(taken.is_set(Command::RollLeft));
        assert!(frame.is_empty());
    }

    #[test]
    fn test_default_bindings_poll() {
        let bindings = KeyBindings::default();
        let frame = bindings.poll(&[Key::W, Key::U, Key::RightShift]);
        assert!(frame.is_set(Command::MoveForward));
        assert!(frame.is_set(Command::RollLeft));
        assert!(frame.is_set(Command::StopRotation));
        assert_eq!(frame.iter().count(), 3);
    }

    #[test]
    fn test_rebind() {
        let mut bindings = KeyBindings::default();
        bindings.bind(Command::MoveForward, Key::Up);
        assert_eq!(bindings.key_for(Command::MoveForward), Some(Key::Up));
        assert!(!bindings.poll(&[Key::W]).is_set(Command::MoveForward));
        assert!(bindings.poll(&[Key::Up]).is_set(Command::MoveForward));
    }

    #[test]
    fn test_latch_is_sticky_until_consumed() {
        let bindings = KeyBindings::default();
        let mut latch = InputLatch::new();

        // Key tapped in one frame, released in the next: flag survives
        latch.read(&[Key::A], &bindings);
        latch.read(&[] as &[Key], &bindings);
        let frame = latch.consume();
        assert!(frame.is_set(Command::MoveLeft));
        assert!(latch.pending().is_empty());
    }

    #[test]
    fn test_hashset_key_state() {
        let held: HashSet<Key> = [Key::E, Key::Q].into_iter().collect();
        let frame = KeyBindings::default().poll(&held);
        assert!(frame.is_set(Command::MoveUp));
        assert!(frame.is_set(Command::MoveDown));
    }
}
