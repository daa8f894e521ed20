//! Immediate-mode 2D drawing surface.
//!
//! Scene code draws onto a [`DrawSurface`] in logical canvas units. [`Frame`] is the GPU-backed
//! implementation: shapes are tessellated into a [`ShapeBatch`] and text is queued as
//! [`TextItem`]s, both of which the [`WgpuRenderer`](crate::renderer::wgpu_lib::WgpuRenderer)
//! consumes once per frame.

use crate::game::track::Rect;
use crate::renderer::shapes::ShapeBatch;
use glam::{DVec2, Vec2};

/// Linear RGBA color, each channel in `0.0..=1.0`.
pub type Rgba = [f32; 4];

pub const WHITE: Rgba = [1.0, 1.0, 1.0, 1.0];
pub const BLACK: Rgba = [0.0, 0.0, 0.0, 1.0];
pub const RED: Rgba = [1.0, 0.0, 0.0, 1.0];
pub const YELLOW: Rgba = [1.0, 1.0, 0.0, 1.0];
pub const DARK_GRAY: Rgba = rgb(169, 169, 169);
pub const LIGHT_GRAY: Rgba = rgb(211, 211, 211);
pub const BEIGE: Rgba = rgb(245, 245, 220);

/// Builds an opaque color from 8-bit channels.
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
    [r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0]
}

/// Outline color and line width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Rgba,
    pub width: f64,
}

impl Stroke {
    pub const fn new(color: Rgba, width: f64) -> Self {
        Self { color, width }
    }
}

/// Drawing operations available to scene code.
///
/// Coordinates are logical canvas units with the origin at the top-left. Strokes are centered on
/// the geometric outline.
pub trait DrawSurface {
    /// Discards everything drawn so far and fills the surface with `color`.
    fn clear(&mut self, color: Rgba);

    /// Outlines the ellipse inscribed in `bounds`.
    fn stroke_ellipse(&mut self, bounds: Rect, stroke: Stroke);

    fn fill_rect(&mut self, rect: Rect, color: Rgba);

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke);

    fn stroke_line(&mut self, from: DVec2, to: DVec2, stroke: Stroke);

    /// Fills a `size` rectangle centered on `center`, rotated clockwise by `angle_degrees`.
    fn fill_rotated_rect(&mut self, center: DVec2, size: DVec2, angle_degrees: f64, color: Rgba);

    /// Draws a single line of text whose baseline starts at `baseline`.
    fn fill_text(&mut self, text: &str, baseline: DVec2, font_size: f64, color: Rgba);
}

/// A queued line of text, positioned by its top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub left: f32,
    pub top: f32,
    pub font_size: f32,
    pub color: Rgba,
}

/// Everything to be presented in one frame.
#[derive(Debug, Clone)]
pub struct Frame {
    pub clear_color: Rgba,
    pub shapes: ShapeBatch,
    pub texts: Vec<TextItem>,
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

impl Frame {
    pub fn new() -> Self {
        Self {
            clear_color: WHITE,
            shapes: ShapeBatch::new(),
            texts: Vec::new(),
        }
    }

    /// Empties the frame while keeping its allocations.
    pub fn reset(&mut self) {
        self.clear_color = WHITE;
        self.shapes.clear();
        self.texts.clear();
    }
}

fn to_vec2(point: DVec2) -> Vec2 {
    point.as_vec2()
}

impl DrawSurface for Frame {
    fn clear(&mut self, color: Rgba) {
        self.clear_color = color;
        self.shapes.clear();
        self.texts.clear();
    }

    fn stroke_ellipse(&mut self, bounds: Rect, stroke: Stroke) {
        self.shapes.stroke_ellipse(
            to_vec2(bounds.center()),
            to_vec2(bounds.half_size()),
            stroke.width as f32,
            stroke.color,
        );
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        self.shapes.fill_rect(
            Vec2::new(rect.x as f32, rect.y as f32),
            Vec2::new(rect.width as f32, rect.height as f32),
            color,
        );
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: Stroke) {
        self.shapes.stroke_rect(
            Vec2::new(rect.x as f32, rect.y as f32),
            Vec2::new(rect.width as f32, rect.height as f32),
            stroke.width as f32,
            stroke.color,
        );
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, stroke: Stroke) {
        self.shapes
            .line(to_vec2(from), to_vec2(to), stroke.width as f32, stroke.color);
    }

    fn fill_rotated_rect(&mut self, center: DVec2, size: DVec2, angle_degrees: f64, color: Rgba) {
        self.shapes.fill_rotated_rect(
            to_vec2(center),
            to_vec2(size),
            angle_degrees.to_radians() as f32,
            color,
        );
    }

    fn fill_text(&mut self, text: &str, baseline: DVec2, font_size: f64, color: Rgba) {
        self.texts.push(TextItem {
            text: text.to_string(),
            left: baseline.x as f32,
            top: (baseline.y - font_size) as f32,
            font_size: font_size as f32,
            color,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_is_positioned_from_baseline() {
        let mut frame = Frame::new();
        frame.fill_text("Laps: 0/5", DVec2::new(20.0, 80.0), 20.0, BLACK);
        assert_eq!(
            frame.texts,
            vec![TextItem {
                text: "Laps: 0/5".to_string(),
                left: 20.0,
                top: 60.0,
                font_size: 20.0,
                color: BLACK,
            }]
        );
    }

    #[test]
    fn test_clear_discards_queued_work() {
        let mut frame = Frame::new();
        frame.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), RED);
        frame.fill_text("x", DVec2::ZERO, 12.0, BLACK);
        frame.clear(BEIGE);

        assert_eq!(frame.clear_color, BEIGE);
        assert!(frame.shapes.is_empty());
        assert!(frame.texts.is_empty());

        frame.reset();
        assert_eq!(frame.clear_color, WHITE);
    }

    #[test]
    fn test_palette() {
        assert_eq!(rgb(255, 0, 0), RED);
        assert!((DARK_GRAY[0] - 169.0 / 255.0).abs() < f32::EPSILON);
        assert_eq!(BEIGE[3], 1.0);
    }
}
