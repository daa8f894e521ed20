//! Keyboard input handling for the car.
//!
//! This module defines the [`GameKey`] enum for abstracting driving actions from physical keys,
//! and provides [`InputLatch`] for remembering which drive keys are currently held between
//! physics steps.

use winit::keyboard;

/// One of the four held driving inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DriveKey {
    /// Throttle (Up Arrow).
    Up,
    /// Brake (Down Arrow).
    Down,
    /// Steer counter-clockwise (Left Arrow).
    Left,
    /// Steer clockwise (Right Arrow).
    Right,
}

/// Every action a keyboard key can trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKey {
    /// A held driving input.
    Drive(DriveKey),
    /// Engage the pit limiter (P). Acts on press only.
    PitLimiter,
}

/// Held state of the four drive keys.
///
/// Events set and clear flags; the physics step only reads them. Pressing a key that is
/// already held or releasing one that is not held is a no-op.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputLatch {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    fn flag_mut(&mut self, key: DriveKey) -> &mut bool {
        match key {
            DriveKey::Up => &mut self.up,
            DriveKey::Down => &mut self.down,
            DriveKey::Left => &mut self.left,
            DriveKey::Right => &mut self.right,
        }
    }

    /// Marks a key as held.
    pub fn set(&mut self, key: DriveKey) {
        *self.flag_mut(key) = true;
    }

    /// Marks a key as released.
    pub fn clear(&mut self, key: DriveKey) {
        *self.flag_mut(key) = false;
    }

    /// Checks if a key is currently held.
    pub fn is_held(&self, key: DriveKey) -> bool {
        match key {
            DriveKey::Up => self.up,
            DriveKey::Down => self.down,
            DriveKey::Left => self.left,
            DriveKey::Right => self.right,
        }
    }

    /// Releases every key.
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }
}

macro_rules! match_char_key {
    ($c:expr, {
        $($key:literal => $variant:expr),* $(,)?
    }) => {{
        match $c.to_ascii_lowercase().as_str() {
            $($key => Some($variant),)*
            _ => None,
        }
    }};
}

macro_rules! match_named_key {
    ($k:expr, {
        $($key:ident => $variant:expr),* $(,)?
    }) => {{
        match $k {
            $(winit::keyboard::NamedKey::$key => Some($variant),)*
            _ => None,
        }
    }};
}

/// Converts a winit [`keyboard::Key`] to a [`GameKey`] if it matches a mapped action.
///
/// The arrow keys map to the drive inputs and `P` (either case) to the pit limiter.
///
/// # Arguments
/// * `key` - The logical key from a winit keyboard event.
///
/// # Returns
/// * `Some(GameKey)` if the key maps to a game action.
/// * `None` otherwise.
pub fn winit_key_to_game_key(key: &keyboard::Key) -> Option<GameKey> {
    match key {
        keyboard::Key::Named(named) => match_named_key!(named, {
            ArrowUp => GameKey::Drive(DriveKey::Up),
            ArrowDown => GameKey::Drive(DriveKey::Down),
            ArrowLeft => GameKey::Drive(DriveKey::Left),
            ArrowRight => GameKey::Drive(DriveKey::Right),
        }),

        keyboard::Key::Character(c) => match_char_key!(c, {
            "p" => GameKey::PitLimiter,
        }),

        _ => None,
    }
}
