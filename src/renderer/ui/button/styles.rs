//! # Button Styles Module
//!
//! Predefined button styles with semantic color variants:
//! - **Primary (Green)**: starting things, such as the engine
//! - **Danger (Red)**: stopping things
//!
//! Hover, pressed and border shades are derived from the base color so each variant only names one
//! color.

use crate::renderer::canvas::{Rgba, WHITE, rgb};
use crate::renderer::ui::button::ButtonStyle;
use crate::renderer::ui::button::utils::ColorExt;

fn style_from_base(base: Rgba) -> ButtonStyle {
    ButtonStyle {
        background_color: base,
        hover_color: base.darken(0.2),
        pressed_color: base.darken(0.4),
        border_color: base.darken(0.2),
        border_width: 1.0,
        padding: (12.0, 6.0),
        font_size: 14.0,
        text_color: WHITE,
    }
}

/// Green style for the primary action on screen.
///
/// ## Example
/// ```rust
/// let start_style = create_primary_button_style();
/// ```
pub fn create_primary_button_style() -> ButtonStyle {
    style_from_base(rgb(30, 110, 30))
}

/// Red style for actions that stop or tear something down.
pub fn create_danger_button_style() -> ButtonStyle {
    style_from_base(rgb(160, 30, 20))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_share_layout() {
        let primary = create_primary_button_style();
        let danger = create_danger_button_style();
        assert_ne!(primary.background_color, danger.background_color);
        assert_eq!(primary.padding, danger.padding);
        assert_eq!(primary.font_size, danger.font_size);
        assert_eq!(primary.hover_color, primary.background_color.darken(0.2));
    }
}
