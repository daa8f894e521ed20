//! The single simulated car.

use crate::game::keys::{DriveKey, InputLatch};
use crate::game::track::{CAR_HEIGHT, CAR_WIDTH};
use glam::DVec2;

/// Where the car sits when the process starts: the straight below the infield.
pub const START_POSITION: DVec2 = DVec2::new(500.0, 600.0);

/// Mutable state of the car.
///
/// `position` is the top-left reference corner of the unrotated body; the body is
/// drawn rotated about [`CarState::center`]. `heading` is in degrees and grows
/// clockwise on screen; it is never wrapped.
#[derive(Debug, Clone, PartialEq)]
pub struct CarState {
    pub position: DVec2,
    pub heading: f64,
    pub speed: f64,
    pub engine_on: bool,
    pub in_pit: bool,
    pub laps_completed: u32,
    /// Whether the car ended the previous step inside the lap zone.
    pub in_lap_zone: bool,
    pub input: InputLatch,
}

impl Default for CarState {
    fn default() -> Self {
        Self::new()
    }
}

impl CarState {
    pub fn new() -> Self {
        Self {
            position: START_POSITION,
            heading: 0.0,
            speed: 0.0,
            engine_on: false,
            in_pit: false,
            laps_completed: 0,
            in_lap_zone: false,
            input: InputLatch::new(),
        }
    }

    /// Latches a drive key. Ignored while the engine is off.
    pub fn press(&mut self, key: DriveKey) {
        if self.engine_on {
            self.input.set(key);
        }
    }

    /// Unlatches a drive key whatever the engine state.
    pub fn release(&mut self, key: DriveKey) {
        self.input.clear(key);
    }

    /// Flips the engine and returns the new state. Stopping the engine kills
    /// all speed at once; held keys stay latched.
    pub fn toggle_engine(&mut self) -> bool {
        self.engine_on = !self.engine_on;
        if !self.engine_on {
            self.speed = 0.0;
        }
        self.engine_on
    }

    /// Engages the pit limiter if the engine is running and it is not already
    /// engaged. Returns whether this call engaged it.
    pub fn request_pit(&mut self) -> bool {
        if !self.engine_on || self.in_pit {
            return false;
        }
        self.in_pit = true;
        true
    }

    /// Rotation pivot of the body.
    pub fn center(&self) -> DVec2 {
        self.position + DVec2::new(CAR_WIDTH / 2.0, CAR_HEIGHT / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let car = CarState::new();
        assert_eq!(car.position, DVec2::new(500.0, 600.0));
        assert_eq!(car.speed, 0.0);
        assert_eq!(car.heading, 0.0);
        assert!(!car.engine_on);
        assert!(!car.in_pit);
        assert_eq!(car.laps_completed, 0);
        assert_eq!(car.input, InputLatch::default());
        assert_eq!(car.center(), DVec2::new(530.0, 615.0));
    }

    #[test]
    fn test_press_ignored_while_engine_off() {
        let mut car = CarState::new();
        car.press(DriveKey::Up);
        assert!(!car.input.up);

        car.toggle_engine();
        car.press(DriveKey::Up);
        assert!(car.input.up);
    }

    #[test]
    fn test_release_clears_even_when_engine_off() {
        let mut car = CarState::new();
        car.toggle_engine();
        car.press(DriveKey::Left);
        car.toggle_engine();
        assert!(car.input.left);

        car.release(DriveKey::Left);
        assert!(!car.input.left);
    }

    #[test]
    fn test_engine_off_zeroes_speed() {
        let mut car = CarState::new();
        assert!(car.toggle_engine());
        car.speed = 12.3;
        assert!(!car.toggle_engine());
        assert_eq!(car.speed, 0.0);
    }

    #[test]
    fn test_pit_request_needs_running_engine() {
        let mut car = CarState::new();
        assert!(!car.request_pit());
        assert!(!car.in_pit);

        car.toggle_engine();
        assert!(car.request_pit());
        assert!(car.in_pit);
        assert!(!car.request_pit());
    }
}
