//! Button module - contains all button-related functionality for the UI system
//!
//! This module provides the clickable buttons drawn over the track, including:
//! - Button creation and management
//! - Interactive states (normal, hover, pressed)
//! - Mouse input handling with click detection on release
//! - Drawing onto any [`DrawSurface`]
//!
//! Buttons are laid out in logical canvas units. Mouse positions arrive from winit in physical
//! pixels and are converted with [`ButtonManager::set_pixels_per_unit`].
//!
//! # Examples
//!
//! ```rust
//! let button = Button::new("engine", "Start Engine")
//!     .with_style(create_primary_button_style())
//!     .with_position(ButtonPosition::new(20.0, 20.0, 0.0, 0.0));
//! ```

/// Button styling and theme definitions.
pub mod styles;
/// Button type definitions and enums.
pub mod types;
/// Button utility functions and extensions.
pub mod utils;

pub use styles::*;
pub use types::{ButtonPosition, ButtonState, ButtonStyle};
pub use utils::ColorExt;

use crate::game::track::Rect;
use crate::renderer::canvas::{DrawSurface, Rgba, Stroke};
use std::collections::HashMap;
use utils::estimate_text_width;
use winit::event::{ElementState, MouseButton, WindowEvent};

/// Ratio of a glyph's cap height to the font size, used to center text vertically.
const CAP_HEIGHT_FACTOR: f64 = 0.7;

/// Represents a UI button with text, styling, and interactive behavior
#[derive(Debug, Clone)]
pub struct Button {
    /// Unique identifier for the button
    pub id: String,
    /// The text displayed on the button
    pub text: String,
    pub style: ButtonStyle,
    pub position: ButtonPosition,
    /// Current interactive state (normal, hover, pressed)
    pub state: ButtonState,
}

impl Button {
    /// Creates a new button with the given ID and text
    ///
    /// # Arguments
    /// * `id` - Unique identifier for the button
    /// * `text` - The text to display on the button
    ///
    /// # Returns
    /// A new Button instance with default styling, sized to its text at the origin
    pub fn new(id: &str, text: &str) -> Self {
        Self {
            id: id.to_string(),
            text: text.to_string(),
            style: ButtonStyle::default(),
            position: ButtonPosition::new(0.0, 0.0, 0.0, 0.0),
            state: ButtonState::Normal,
        }
    }

    /// Sets the button's visual style
    pub fn with_style(mut self, style: ButtonStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the button's position and size
    pub fn with_position(mut self, position: ButtonPosition) -> Self {
        self.position = position;
        self
    }

    /// Size that wraps the text plus padding.
    pub fn fitted_size(&self) -> (f64, f64) {
        let (horizontal, vertical) = self.style.padding;
        (
            estimate_text_width(&self.text, self.style.font_size) + 2.0 * horizontal,
            self.style.font_size + 2.0 * vertical,
        )
    }

    fn fit_to_text(&mut self) {
        let (width, height) = self.fitted_size();
        self.position.width = width;
        self.position.height = height;
    }

    /// Checks if the given point (x, y) is within the button's bounds
    ///
    /// # Arguments
    /// * `x` - X coordinate of the point to test, in logical units
    /// * `y` - Y coordinate of the point to test, in logical units
    pub fn contains_point(&self, x: f64, y: f64) -> bool {
        let position = &self.position;
        x >= position.x
            && x <= position.x + position.width
            && y >= position.y
            && y <= position.y + position.height
    }

    /// The button's bounds as a [`Rect`].
    pub fn bounds(&self) -> Rect {
        let position = &self.position;
        Rect::new(position.x, position.y, position.width, position.height)
    }

    fn background_color(&self) -> Rgba {
        match self.state {
            ButtonState::Normal => self.style.background_color,
            ButtonState::Hover => self.style.hover_color,
            ButtonState::Pressed => self.style.pressed_color,
        }
    }

    /// Draws the background, border and centered label.
    pub fn draw(&self, surface: &mut impl DrawSurface) {
        let bounds = self.bounds();
        surface.fill_rect(bounds, self.background_color());
        if self.style.border_width > 0.0 {
            surface.stroke_rect(
                bounds,
                Stroke::new(self.style.border_color, self.style.border_width),
            );
        }

        let text_width = estimate_text_width(&self.text, self.style.font_size);
        let baseline = glam::DVec2::new(
            bounds.x + (bounds.width - text_width) / 2.0,
            bounds.y + (bounds.height + self.style.font_size * CAP_HEIGHT_FACTOR) / 2.0,
        );
        surface.fill_text(
            &self.text,
            baseline,
            self.style.font_size,
            self.style.text_color,
        );
    }
}

/// Manages a collection of buttons and handles their drawing and interaction
///
/// ButtonManager is responsible for:
/// - Storing buttons in insertion order for drawing
/// - Tracking the mouse and updating button states
/// - Reporting clicks (press and release over the same button)
pub struct ButtonManager {
    /// Map of button ID to Button instance
    pub buttons: HashMap<String, Button>,
    /// Ordered list of button IDs to maintain rendering order
    pub button_order: Vec<String>,
    /// Current mouse cursor position in logical units
    pub mouse_position: (f64, f64),
    /// Whether the left mouse button is currently pressed
    pub mouse_pressed: bool,
    /// Button the current press started on, if any
    pub pressed_button: Option<String>,
    /// ID of the button that was just clicked (if any)
    pub just_clicked: Option<String>,
    /// Physical pixels per logical unit
    pub pixels_per_unit: f64,
}

impl Default for ButtonManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ButtonManager {
    pub fn new() -> Self {
        Self {
            buttons: HashMap::new(),
            button_order: Vec::new(),
            mouse_position: (-1.0, -1.0),
            mouse_pressed: false,
            pressed_button: None,
            just_clicked: None,
            pixels_per_unit: 1.0,
        }
    }

    /// Adds a button, sizing it to its text if no size was given.
    pub fn add_button(&mut self, mut button: Button) {
        if button.position.width <= 0.0 || button.position.height <= 0.0 {
            button.fit_to_text();
        }
        if !self.buttons.contains_key(&button.id) {
            self.button_order.push(button.id.clone());
        }
        self.buttons.insert(button.id.clone(), button);
    }

    pub fn get_button(&self, id: &str) -> Option<&Button> {
        self.buttons.get(id)
    }

    /// Replaces a button's label and style, refitting its size.
    pub fn restyle_button(&mut self, id: &str, text: &str, style: ButtonStyle) {
        if let Some(button) = self.buttons.get_mut(id) {
            button.text = text.to_string();
            button.style = style;
            button.fit_to_text();
        }
        self.update_button_states();
    }

    /// Sets the physical-pixel scale used to convert cursor positions.
    pub fn set_pixels_per_unit(&mut self, pixels_per_unit: f64) {
        if pixels_per_unit > 0.0 {
            self.pixels_per_unit = pixels_per_unit;
        }
    }

    /// Checks if a specific button was clicked since the last check, consuming the click.
    pub fn is_button_clicked(&mut self, id: &str) -> bool {
        if self.just_clicked.as_deref() == Some(id) {
            self.just_clicked = None;
            if let Some(button) = self.buttons.get(id) {
                log::debug!("Button '{}' was clicked", button.text);
            }
            return true;
        }
        false
    }

    /// Handles window events for button interaction
    ///
    /// # Arguments
    /// * `event` - The window event to process
    ///
    /// # Returns
    /// `true` if the event was a mouse event the buttons consumed
    pub fn handle_input(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button: MouseButton::Left,
                ..
            } => self.mouse_down(),
            WindowEvent::MouseInput {
                state: ElementState::Released,
                button: MouseButton::Left,
                ..
            } => self.mouse_up().is_some(),
            WindowEvent::CursorMoved { position, .. } => {
                self.mouse_moved(
                    position.x / self.pixels_per_unit,
                    position.y / self.pixels_per_unit,
                );
                false
            }
            WindowEvent::CursorLeft { .. } => {
                self.mouse_moved(-1.0, -1.0);
                false
            }
            _ => false,
        }
    }

    /// Moves the cursor to `(x, y)` in logical units.
    pub fn mouse_moved(&mut self, x: f64, y: f64) {
        self.mouse_position = (x, y);
        self.update_button_states();
    }

    /// Starts a press. Returns whether it landed on a button.
    pub fn mouse_down(&mut self) -> bool {
        self.mouse_pressed = true;
        self.pressed_button = self.button_at(self.mouse_position);
        self.update_button_states();
        self.pressed_button.is_some()
    }

    /// Ends a press. A click is reported when the release happens over the button the press
    /// started on.
    pub fn mouse_up(&mut self) -> Option<String> {
        let released_over = self.button_at(self.mouse_position);
        let clicked = match (self.pressed_button.take(), released_over) {
            (Some(pressed), Some(released)) if pressed == released => Some(pressed),
            _ => None,
        };
        self.mouse_pressed = false;
        if clicked.is_some() {
            self.just_clicked = clicked.clone();
        }
        self.update_button_states();
        clicked
    }

    fn button_at(&self, (x, y): (f64, f64)) -> Option<String> {
        self.button_order
            .iter()
            .rev()
            .filter_map(|id| self.buttons.get(id))
            .find(|button| button.contains_point(x, y))
            .map(|button| button.id.clone())
    }

    /// Updates button states based on the mouse position and press state
    pub fn update_button_states(&mut self) {
        let hovered = self.button_at(self.mouse_position);
        for button in self.buttons.values_mut() {
            button.state = if hovered.as_deref() != Some(button.id.as_str()) {
                ButtonState::Normal
            } else if self.mouse_pressed && self.pressed_button.as_ref() == Some(&button.id) {
                ButtonState::Pressed
            } else {
                ButtonState::Hover
            };
        }
    }

    /// Draws all buttons in the order they were added.
    pub fn draw(&self, surface: &mut impl DrawSurface) {
        for button in self.button_order.iter().filter_map(|id| self.buttons.get(id)) {
            button.draw(surface);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::canvas::Frame;

    fn manager_with_engine_button() -> ButtonManager {
        let mut manager = ButtonManager::new();
        manager.add_button(
            Button::new("engine", "Start Engine")
                .with_style(create_primary_button_style())
                .with_position(ButtonPosition::new(20.0, 20.0, 0.0, 0.0)),
        );
        manager
    }

    #[test]
    fn test_button_is_fitted_to_text() {
        let manager = manager_with_engine_button();
        let button = manager.get_button("engine").expect("button exists");
        let (width, height) = button.fitted_size();
        assert_eq!(button.position.width, width);
        assert_eq!(button.position.height, height);
        assert!(button.contains_point(21.0, 21.0));
        assert!(!button.contains_point(19.0, 21.0));
    }

    #[test]
    fn test_click_requires_press_and_release_over_button() {
        let mut manager = manager_with_engine_button();
        manager.mouse_moved(30.0, 30.0);
        assert_eq!(manager.buttons["engine"].state, ButtonState::Hover);

        assert!(manager.mouse_down());
        assert_eq!(manager.buttons["engine"].state, ButtonState::Pressed);
        assert_eq!(manager.mouse_up(), Some("engine".to_string()));
        assert!(manager.is_button_clicked("engine"));
        assert!(!manager.is_button_clicked("engine"));

        // Dragging off before release cancels the click.
        manager.mouse_down();
        manager.mouse_moved(500.0, 500.0);
        assert_eq!(manager.mouse_up(), None);
        assert_eq!(manager.buttons["engine"].state, ButtonState::Normal);
    }

    #[test]
    fn test_press_outside_buttons_is_not_consumed() {
        let mut manager = manager_with_engine_button();
        manager.mouse_moved(500.0, 500.0);
        assert!(!manager.mouse_down());
        manager.mouse_moved(30.0, 30.0);
        assert_eq!(manager.mouse_up(), None);
    }

    #[test]
    fn test_restyle_refits_and_keeps_order() {
        let mut manager = manager_with_engine_button();
        let before = manager.buttons["engine"].position.width;
        manager.restyle_button("engine", "Stop Engine", create_danger_button_style());
        let button = &manager.buttons["engine"];
        assert_eq!(button.text, "Stop Engine");
        assert!(button.position.width < before);
        assert_eq!(manager.button_order, vec!["engine".to_string()]);
    }

    #[test]
    fn test_draw_emits_background_and_label() {
        let manager = manager_with_engine_button();
        let mut frame = Frame::new();
        manager.draw(&mut frame);
        assert!(!frame.shapes.is_empty());
        assert_eq!(frame.texts.len(), 1);
        assert_eq!(frame.texts[0].text, "Start Engine");
        let button = &manager.buttons["engine"];
        assert!(f64::from(frame.texts[0].left) > button.position.x);
    }
}
