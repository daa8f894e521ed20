//! Draws the track and the car onto a [`DrawSurface`].

use crate::game::car::CarState;
use crate::game::track::{CAR_HEIGHT, CAR_WIDTH, Track};
use crate::renderer::canvas::{
    BEIGE, BLACK, DARK_GRAY, DrawSurface, LIGHT_GRAY, RED, Stroke, WHITE, YELLOW,
};
use glam::DVec2;

const TRACK_STROKE: Stroke = Stroke::new(DARK_GRAY, 5.0);
const PIT_STROKE: Stroke = Stroke::new(BEIGE, 4.0);
const START_LINE_STROKE: Stroke = Stroke::new(WHITE, 3.0);
const LANE_STROKE: Stroke = Stroke::new(YELLOW, 2.0);

const LABEL_FONT_SIZE: f64 = 13.0;
const LABEL_OFFSET: DVec2 = DVec2::new(-20.0, -10.0);
const LAPS_FONT_SIZE: f64 = 20.0;
/// Baseline of the lap readout, below the engine button.
const LAPS_BASELINE: DVec2 = DVec2::new(20.0, 80.0);

/// Renders one frame of the race. Reads state only.
///
/// # Arguments
/// * `car` - The car to draw, with its lap count.
/// * `track` - Geometry of the oval and its painted features.
/// * `lap_target` - Laps needed to finish, shown in the readout.
/// * `surface` - Destination for the draw calls.
pub fn draw_scene(car: &CarState, track: &Track, lap_target: u32, surface: &mut impl DrawSurface) {
    surface.clear(WHITE);

    surface.stroke_ellipse(track.outline(), TRACK_STROKE);

    surface.stroke_rect(track.pit_lane, PIT_STROKE);
    surface.fill_rect(track.pit_lane, LIGHT_GRAY);

    let (start, end) = track.start_line;
    surface.stroke_line(start, end, START_LINE_STROKE);

    for lane in track.lane_markings() {
        surface.stroke_ellipse(lane, LANE_STROKE);
    }

    surface.fill_rotated_rect(
        car.center(),
        DVec2::new(CAR_WIDTH, CAR_HEIGHT),
        car.heading,
        RED,
    );
    surface.fill_text(
        "User Car",
        car.position + LABEL_OFFSET,
        LABEL_FONT_SIZE,
        BLACK,
    );

    surface.fill_text(
        &format!("Laps: {}/{}", car.laps_completed, lap_target),
        LAPS_BASELINE,
        LAPS_FONT_SIZE,
        BLACK,
    );
}
