//! # Button Configuration Module
//!
//! Styling, positioning, and state types for UI buttons. All measurements are in logical canvas
//! units.
//!
//! ## Usage Example
//!
//! ```rust
//! let style = ButtonStyle {
//!     background_color: rgb(59, 130, 246),
//!     hover_color: rgb(37, 99, 235),
//!     ..Default::default()
//! };
//!
//! let position = ButtonPosition::new(20.0, 20.0, 0.0, 0.0);
//! ```

use crate::renderer::canvas::{Rgba, rgb};

/// Complete visual description of a button.
///
/// The default implementation uses a neutral slate scheme with white text.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonStyle {
    /// Background color in normal state
    pub background_color: Rgba,

    /// Background color when mouse is hovering over button
    pub hover_color: Rgba,

    /// Background color while a press is held on the button
    pub pressed_color: Rgba,

    pub border_color: Rgba,

    /// Width of the button border; 0 disables the border
    pub border_width: f64,

    /// Internal padding as (horizontal, vertical)
    pub padding: (f64, f64),

    pub font_size: f64,

    pub text_color: Rgba,
}

impl Default for ButtonStyle {
    fn default() -> Self {
        Self {
            background_color: rgb(55, 65, 81), // slate-700
            hover_color: rgb(71, 85, 105),     // slate-600
            pressed_color: rgb(30, 41, 59),    // slate-800
            border_color: rgb(71, 85, 105),
            border_width: 1.0,
            padding: (12.0, 6.0),
            font_size: 14.0,
            text_color: rgb(248, 250, 252), // slate-50
        }
    }
}

/// Top-left corner and size of a button, in logical canvas units.
#[derive(Debug, Clone, PartialEq)]
pub struct ButtonPosition {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ButtonPosition {
    /// A zero `width` or `height` is filled in from the text when the button is added to a
    /// [`ButtonManager`](super::ButtonManager).
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Current interaction state of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    Normal,
    /// Cursor is over the button
    Hover,
    /// A press started on the button and the cursor is still over it
    Pressed,
}
