//! Static oval track geometry.
//!
//! All coordinates live on a fixed 1000x800 logical canvas with the origin at
//! the top-left and y growing downward. The drivable area is the ellipse
//! inscribed 100 units inside the canvas edges; the start/finish zone sits at
//! the top of the oval and the pit lane at the bottom.

use glam::DVec2;

/// Logical canvas width.
pub const CANVAS_WIDTH: f64 = 1000.0;
/// Logical canvas height.
pub const CANVAS_HEIGHT: f64 = 800.0;
/// Car body width along its heading.
pub const CAR_WIDTH: f64 = 60.0;
/// Car body height across its heading.
pub const CAR_HEIGHT: f64 = 30.0;

const TRACK_INSET: f64 = 100.0;
const LANE_SPACING: f64 = 50.0;
const ZONE_HALF_WIDTH: f64 = 50.0;
const LAP_ZONE_BOTTOM: f64 = 120.0;
const PIT_DEPTH: f64 = 150.0;
const PIT_HALF_WIDTH: f64 = 60.0;
const START_LINE_LENGTH: f64 = 80.0;

/// Axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle circumscribing the ellipse with the given center and radii.
    pub fn around_ellipse(center: DVec2, radii: DVec2) -> Self {
        Self::new(
            center.x - radii.x,
            center.y - radii.y,
            radii.x * 2.0,
            radii.y * 2.0,
        )
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Half extents, i.e. the radii of the inscribed ellipse.
    pub fn half_size(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Shrinks the rectangle by `amount` on every side.
    pub fn inset(&self, amount: f64) -> Self {
        Self::new(
            self.x + amount,
            self.y + amount,
            self.width - amount * 2.0,
            self.height - amount * 2.0,
        )
    }
}

/// Open region test used for the lap and pit-exit bands. Bounds are exclusive
/// and may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zone {
    pub min: DVec2,
    pub max: DVec2,
}

impl Zone {
    pub fn contains(&self, point: DVec2) -> bool {
        point.x > self.min.x && point.x < self.max.x && point.y > self.min.y && point.y < self.max.y
    }
}

/// The Daytona oval: containment ellipse, timing zones and painted features.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub center: DVec2,
    pub radii: DVec2,
    /// Entering this band while moving completes a lap.
    pub lap_zone: Zone,
    /// Reaching this band releases the pit limiter.
    pub pit_exit: Zone,
    /// Painted pit lane box.
    pub pit_lane: Rect,
    /// Start/finish line endpoints.
    pub start_line: (DVec2, DVec2),
}

impl Default for Track {
    fn default() -> Self {
        Self::daytona()
    }
}

impl Track {
    pub fn daytona() -> Self {
        let center = DVec2::new(CANVAS_WIDTH / 2.0, CANVAS_HEIGHT / 2.0);
        let radii = DVec2::new(
            (CANVAS_WIDTH - TRACK_INSET * 2.0) / 2.0,
            (CANVAS_HEIGHT - TRACK_INSET * 2.0) / 2.0,
        );
        let mid_x = CANVAS_WIDTH / 2.0;

        Self {
            center,
            radii,
            lap_zone: Zone {
                min: DVec2::new(mid_x - ZONE_HALF_WIDTH, f64::NEG_INFINITY),
                max: DVec2::new(mid_x + ZONE_HALF_WIDTH, LAP_ZONE_BOTTOM),
            },
            pit_exit: Zone {
                min: DVec2::new(mid_x - ZONE_HALF_WIDTH, CANVAS_HEIGHT - PIT_DEPTH),
                max: DVec2::new(mid_x + ZONE_HALF_WIDTH, f64::INFINITY),
            },
            pit_lane: Rect::new(
                mid_x - PIT_HALF_WIDTH,
                CANVAS_HEIGHT - PIT_DEPTH,
                PIT_HALF_WIDTH * 2.0,
                PIT_DEPTH,
            ),
            start_line: (
                DVec2::new(mid_x, TRACK_INSET),
                DVec2::new(mid_x, TRACK_INSET + START_LINE_LENGTH),
            ),
        }
    }

    /// Bounding box of the outer track edge.
    pub fn outline(&self) -> Rect {
        Rect::around_ellipse(self.center, self.radii)
    }

    /// Bounding boxes of the painted lane markings, outermost first.
    pub fn lane_markings(&self) -> [Rect; 2] {
        let outline = self.outline();
        [outline.inset(LANE_SPACING), outline.inset(LANE_SPACING * 2.0)]
    }

    /// Elliptical distance of `point` from the center: 0 at the center, 1 on
    /// the track edge, above 1 outside.
    pub fn normalized_distance(&self, point: DVec2) -> f64 {
        let offset = (point - self.center) / self.radii;
        offset.length()
    }

    /// Projects `point` back onto the edge along the ray from the center if it
    /// lies outside; points inside are returned unchanged.
    pub fn contain(&self, point: DVec2) -> DVec2 {
        let distance = self.normalized_distance(point);
        if distance > 1.0 {
            self.center + (point - self.center) / distance
        } else {
            point
        }
    }
}
