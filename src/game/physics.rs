//! Per-step car physics.
//!
//! One call to [`update`] advances the car by exactly one fixed step. All
//! constants are per step, not per second; the frame driver decides how many
//! steps to run.

use crate::game::car::CarState;
use crate::game::track::Track;
use crate::settings::PhysicsSettings;

/// Discrete events produced by a single step, for logging and UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// The lap counter went up this step.
    pub lap_completed: bool,
    /// The pit limiter released this step.
    pub pit_exited: bool,
}

/// Advances `car` by one step on `track`.
///
/// # Arguments
/// * `car` - The car to mutate.
/// * `track` - Containment ellipse and timing zones.
/// * `physics` - Per-step rates and limits.
///
/// # Returns
/// The lap and pit events that happened during the step.
pub fn update(car: &mut CarState, track: &Track, physics: &PhysicsSettings) -> StepOutcome {
    let mut outcome = StepOutcome::default();

    if car.engine_on {
        if car.input.up {
            car.speed = (car.speed + physics.acceleration).min(physics.max_speed);
        }
        if car.input.down {
            car.speed = (car.speed - physics.braking).max(0.0);
        }
        if car.input.left {
            car.heading -= physics.turn_rate;
        }
        if car.input.right {
            car.heading += physics.turn_rate;
        }
    }

    apply_friction(car, physics.friction);

    let heading = car.heading.to_radians();
    car.position.x += car.speed * heading.cos();
    car.position.y += car.speed * heading.sin();

    // Soft wall: only the position is corrected, speed carries on.
    car.position = track.contain(car.position);

    if car.in_pit {
        car.speed = car.speed.min(physics.pit_speed_limit);
        if track.pit_exit.contains(car.position) {
            car.in_pit = false;
            outcome.pit_exited = true;
        }
    }

    let in_zone = track.lap_zone.contains(car.position);
    if in_zone && !car.in_lap_zone && car.speed > 0.0 && car.laps_completed < physics.lap_target {
        car.laps_completed += 1;
        outcome.lap_completed = true;
    }
    car.in_lap_zone = in_zone;

    outcome
}

fn apply_friction(car: &mut CarState, friction: f64) {
    if car.speed > 0.0 {
        car.speed = (car.speed - friction).max(0.0);
    } else if car.speed < 0.0 {
        car.speed = (car.speed + friction).min(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::keys::DriveKey;
    use glam::DVec2;

    const EPSILON: f64 = 1e-9;

    fn running_car() -> CarState {
        let mut car = CarState::new();
        car.toggle_engine();
        car
    }

    fn frictionless() -> PhysicsSettings {
        PhysicsSettings {
            friction: 0.0,
            ..PhysicsSettings::default()
        }
    }

    #[test]
    fn test_throttle_without_friction_is_linear_then_capped() {
        let track = Track::daytona();
        let physics = frictionless();
        for steps in [1_u32, 5, 29, 30, 31, 60] {
            let mut car = running_car();
            // Park at the center so containment never interferes.
            car.position = track.center;
            car.press(DriveKey::Up);
            for _ in 0..steps {
                update(&mut car, &track, &physics);
                car.position = track.center;
            }
            let expected = (f64::from(steps) * 0.5).min(15.0);
            assert!(
                (car.speed - expected).abs() < EPSILON,
                "{steps} steps: {} != {expected}",
                car.speed
            );
        }
    }

    #[test]
    fn test_throttle_with_default_friction() {
        let track = Track::daytona();
        let physics = PhysicsSettings::default();
        let mut car = running_car();
        car.press(DriveKey::Up);
        for _ in 0..4 {
            update(&mut car, &track, &physics);
        }
        assert!((car.speed - 4.0 * 0.45).abs() < EPSILON);
    }

    #[test]
    fn test_speed_stays_in_bounds() {
        let track = Track::daytona();
        let physics = PhysicsSettings::default();
        let mut car = running_car();
        car.press(DriveKey::Up);
        car.press(DriveKey::Right);
        for step in 0..600 {
            if step == 300 {
                car.release(DriveKey::Up);
                car.press(DriveKey::Down);
            }
            update(&mut car, &track, &physics);
            assert!(car.speed >= 0.0 && car.speed <= physics.max_speed);
            assert!(track.normalized_distance(car.position) <= 1.0 + EPSILON);
        }
        assert_eq!(car.speed, 0.0);
    }

    #[test]
    fn test_steering_changes_heading_by_turn_rate() {
        let track = Track::daytona();
        let physics = PhysicsSettings::default();
        let mut car = running_car();
        car.press(DriveKey::Left);
        update(&mut car, &track, &physics);
        update(&mut car, &track, &physics);
        assert!((car.heading + 6.0).abs() < EPSILON);

        car.release(DriveKey::Left);
        car.press(DriveKey::Right);
        update(&mut car, &track, &physics);
        assert!((car.heading + 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_latched_keys_ignored_with_engine_off() {
        let track = Track::daytona();
        let physics = PhysicsSettings::default();
        let mut car = running_car();
        car.press(DriveKey::Up);
        car.press(DriveKey::Left);
        car.toggle_engine();

        update(&mut car, &track, &physics);
        assert_eq!(car.speed, 0.0);
        assert_eq!(car.heading, 0.0);
        assert_eq!(car.position, DVec2::new(500.0, 600.0));
    }

    #[test]
    fn test_friction_applies_with_engine_off() {
        let track = Track::daytona();
        let physics = PhysicsSettings::default();
        let mut car = CarState::new();
        car.speed = 0.12;
        update(&mut car, &track, &physics);
        assert!((car.speed - 0.07).abs() < EPSILON);
        update(&mut car, &track, &physics);
        update(&mut car, &track, &physics);
        assert_eq!(car.speed, 0.0);
    }

    #[test]
    fn test_outside_position_is_projected_onto_edge() {
        let track = Track::daytona();
        let physics = PhysicsSettings::default();
        let mut car = CarState::new();
        let outside = DVec2::new(950.0, 500.0);
        car.position = outside;

        update(&mut car, &track, &physics);

        assert!((track.normalized_distance(car.position) - 1.0).abs() < EPSILON);
        let before = (outside - track.center).normalize();
        let after = (car.position - track.center).normalize();
        assert!((before - after).length() < EPSILON);
    }

    #[test]
    fn test_containment_keeps_speed() {
        let track = Track::daytona();
        let physics = frictionless();
        let mut car = running_car();
        car.position = DVec2::new(895.0, 400.0);
        car.speed = 10.0;

        update(&mut car, &track, &physics);

        assert!((car.position.x - 900.0).abs() < EPSILON);
        assert_eq!(car.speed, 10.0);
    }

    #[test]
    fn test_lap_counts_once_per_zone_entry() {
        let track = Track::daytona();
        let physics = frictionless();
        let mut car = running_car();
        car.position = DVec2::new(500.0, 110.0);
        car.heading = 0.0;
        car.speed = 0.1;

        for _ in 0..3 {
            update(&mut car, &track, &physics);
        }
        assert_eq!(car.laps_completed, 1);
        assert!(car.in_lap_zone);

        // Leave the zone and come back in.
        car.position = DVec2::new(500.0, 300.0);
        update(&mut car, &track, &physics);
        assert!(!car.in_lap_zone);
        car.position = DVec2::new(500.0, 110.0);
        let outcome = update(&mut car, &track, &physics);
        assert!(outcome.lap_completed);
        assert_eq!(car.laps_completed, 2);
    }

    #[test]
    fn test_stationary_car_in_zone_counts_nothing() {
        let track = Track::daytona();
        let physics = PhysicsSettings::default();
        let mut car = CarState::new();
        car.position = DVec2::new(500.0, 110.0);
        update(&mut car, &track, &physics);
        assert_eq!(car.laps_completed, 0);
    }

    #[test]
    fn test_laps_saturate_at_target() {
        let track = Track::daytona();
        let physics = frictionless();
        let mut car = running_car();
        car.speed = 0.1;
        let mut previous = 0;
        for _ in 0..10 {
            car.position = DVec2::new(500.0, 300.0);
            update(&mut car, &track, &physics);
            car.position = DVec2::new(500.0, 110.0);
            update(&mut car, &track, &physics);
            assert!(car.laps_completed >= previous);
            previous = car.laps_completed;
        }
        assert_eq!(car.laps_completed, physics.lap_target);
    }

    #[test]
    fn test_pit_limiter_caps_speed_until_exit() {
        let track = Track::daytona();
        let physics = frictionless();
        let mut car = running_car();
        car.position = DVec2::new(300.0, 400.0);
        car.heading = 90.0;
        car.speed = 10.0;
        assert!(car.request_pit());

        let outcome = update(&mut car, &track, &physics);
        assert_eq!(car.speed, 2.0);
        assert!(car.in_pit);
        assert!(!outcome.pit_exited);

        // The limiter never raises a slower car.
        car.speed = 1.0;
        update(&mut car, &track, &physics);
        assert_eq!(car.speed, 1.0);

        car.position = DVec2::new(500.0, 680.0);
        let outcome = update(&mut car, &track, &physics);
        assert!(outcome.pit_exited);
        assert!(!car.in_pit);
    }
}
