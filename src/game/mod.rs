//! Game state management module.
//!
//! This module defines the [`GameState`] struct, which owns the car, the track and the
//! fixed-step clock, and exposes the immediate input actions plus the per-frame tick.

pub mod car;
pub mod clock;
pub mod keys;
pub mod physics;
pub mod track;

use self::car::CarState;
use self::clock::FixedStepClock;
use self::keys::GameKey;
use self::physics::StepOutcome;
use self::track::Track;
use crate::settings::Settings;
use std::time::{Duration, Instant};

/// Represents the entire mutable state of the game.
///
/// This struct is updated every frame and contains:
/// - The car and its latched input.
/// - The static track geometry.
/// - Timing information for the fixed-step clock and FPS calculation.
pub struct GameState {
    pub car: CarState,
    pub track: Track,
    pub settings: Settings,
    pub clock: FixedStepClock,
    /// Time of the last frame.
    pub last_frame_time: Instant,
    /// Number of frames rendered since the last FPS update.
    pub frame_count: u32,
    /// Frames per second over the last full second.
    pub current_fps: u32,
    /// Time of the last FPS update.
    pub last_fps_time: Instant,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl GameState {
    pub fn new(settings: Settings) -> Self {
        let now = Instant::now();
        Self {
            car: CarState::new(),
            track: Track::daytona(),
            clock: FixedStepClock::new(
                settings.frame.steps_per_second,
                settings.frame.max_steps_per_frame,
            ),
            settings,
            last_frame_time: now,
            frame_count: 0,
            current_fps: 0,
            last_fps_time: now,
        }
    }

    /// Routes a key press to the car.
    pub fn key_pressed(&mut self, key: GameKey) {
        match key {
            GameKey::Drive(drive) => self.car.press(drive),
            GameKey::PitLimiter => {
                if self.car.request_pit() {
                    log::info!(
                        "Pit limiter engaged at {:.0}/{:.0}",
                        self.car.position.x,
                        self.car.position.y
                    );
                }
            }
        }
    }

    /// Routes a key release to the car. Only drive keys have a release action.
    pub fn key_released(&mut self, key: GameKey) {
        if let GameKey::Drive(drive) = key {
            self.car.release(drive);
        }
    }

    /// Releases every held key. Release events are not delivered while the window is unfocused.
    pub fn focus_lost(&mut self) {
        log::debug!("Focus lost; releasing held keys");
        self.car.input.clear_all();
    }

    /// Flips the engine and returns the new state.
    pub fn toggle_engine(&mut self) -> bool {
        let engine_on = self.car.toggle_engine();
        log::info!("Engine {}", if engine_on { "started" } else { "stopped" });
        engine_on
    }

    /// Runs one physics step and logs any lap or pit event.
    pub fn step(&mut self) -> StepOutcome {
        let outcome = physics::update(&mut self.car, &self.track, &self.settings.physics);
        if outcome.lap_completed {
            log::info!(
                "Lap {}/{} completed",
                self.car.laps_completed,
                self.settings.physics.lap_target
            );
        }
        if outcome.pit_exited {
            log::info!("Pit limiter released");
        }
        outcome
    }

    /// Feeds `elapsed` wall time into the clock and runs every step that is due.
    ///
    /// # Returns
    /// The number of physics steps executed.
    pub fn tick(&mut self, elapsed: Duration) -> u32 {
        let steps = self.clock.advance(elapsed);
        for _ in 0..steps {
            self.step();
        }
        steps
    }

    /// Records a rendered frame for the FPS counter and returns the time since
    /// the previous frame.
    pub fn frame_elapsed(&mut self, current_time: Instant) -> Duration {
        self.frame_count += 1;
        if current_time.duration_since(self.last_fps_time).as_secs_f32() >= 1.0 {
            self.current_fps = self.frame_count;
            self.frame_count = 0;
            self.last_fps_time = current_time;
            log::debug!("{} fps", self.current_fps);
        }

        let elapsed = current_time.duration_since(self.last_frame_time);
        self.last_frame_time = current_time;
        elapsed
    }

    pub fn laps_text(&self) -> String {
        format!(
            "Laps: {}/{}",
            self.car.laps_completed, self.settings.physics.lap_target
        )
    }
}

#[cfg(test)]
mod tests {
    use super::keys::DriveKey;
    use super::*;

    #[test]
    fn test_tick_runs_due_steps() {
        let mut game = GameState::default();
        game.toggle_engine();
        game.key_pressed(GameKey::Drive(DriveKey::Up));

        let step = game.clock.step();
        assert_eq!(game.tick(step * 3), 3);
        assert!((game.car.speed - 3.0 * 0.45).abs() < 1e-9);
    }

    #[test]
    fn test_pit_key_has_no_release_action() {
        let mut game = GameState::default();
        game.toggle_engine();
        game.key_pressed(GameKey::PitLimiter);
        game.key_released(GameKey::PitLimiter);
        assert!(game.car.in_pit);
    }

    #[test]
    fn test_focus_loss_releases_held_keys() {
        let mut game = GameState::default();
        game.toggle_engine();
        game.key_pressed(GameKey::Drive(DriveKey::Up));
        game.key_pressed(GameKey::Drive(DriveKey::Left));
        assert!(game.car.input.is_held(DriveKey::Up));

        game.focus_lost();
        for key in [DriveKey::Up, DriveKey::Down, DriveKey::Left, DriveKey::Right] {
            assert!(!game.car.input.is_held(key));
        }
        game.step();
        assert_eq!(game.car.heading, 0.0);
    }

    /// A key held down before the engine starts latches on its next repeated press.
    #[test]
    fn test_repeated_press_latches_after_engine_start() {
        let mut game = GameState::default();
        game.key_pressed(GameKey::Drive(DriveKey::Up));
        assert!(!game.car.input.is_held(DriveKey::Up));

        game.toggle_engine();
        game.key_pressed(GameKey::Drive(DriveKey::Up));
        game.key_pressed(GameKey::Drive(DriveKey::Up));
        assert!(game.car.input.is_held(DriveKey::Up));

        game.key_released(GameKey::Drive(DriveKey::Up));
        assert!(!game.car.input.is_held(DriveKey::Up));
    }

    #[test]
    fn test_frame_elapsed_counts_frames() {
        let mut game = GameState::default();
        let start = game.last_frame_time;
        let elapsed = game.frame_elapsed(start + Duration::from_millis(16));
        assert_eq!(elapsed, Duration::from_millis(16));
        assert_eq!(game.frame_count, 1);

        game.frame_elapsed(start + Duration::from_millis(1100));
        assert_eq!(game.current_fps, 2);
        assert_eq!(game.frame_count, 0);
    }

    #[test]
    fn test_laps_text() {
        let mut game = GameState::default();
        assert_eq!(game.laps_text(), "Laps: 0/5");
        game.car.laps_completed = 3;
        assert_eq!(game.laps_text(), "Laps: 3/5");
    }
}
