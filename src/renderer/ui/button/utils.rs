use crate::renderer::canvas::Rgba;

/// Average advance of a sans-serif glyph as a fraction of the font size.
const AVERAGE_GLYPH_ADVANCE: f64 = 0.55;

/// Derives hover, pressed and border shades from a single base color.
pub trait ColorExt {
    /// Scales the color channels toward black by `factor` (clamped to 0..=1), keeping alpha.
    fn darken(&self, factor: f32) -> Self;
}

impl ColorExt for Rgba {
    fn darken(&self, factor: f32) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        [
            self[0] * (1.0 - factor),
            self[1] * (1.0 - factor),
            self[2] * (1.0 - factor),
            self[3],
        ]
    }
}

/// Rough single-line width of `text` at `font_size`, used for button sizing and centering.
pub fn estimate_text_width(text: &str, font_size: f64) -> f64 {
    text.chars().count() as f64 * font_size * AVERAGE_GLYPH_ADVANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_darken_keeps_alpha_and_clamps() {
        let color: Rgba = [0.5, 0.25, 1.0, 0.8];
        assert_eq!(color.darken(0.5), [0.25, 0.125, 0.5, 0.8]);
        assert_eq!(color.darken(0.0), color);
        assert_eq!(color.darken(2.0), [0.0, 0.0, 0.0, 0.8]);
    }

    #[test]
    fn test_text_width_scales_with_length() {
        assert_eq!(estimate_text_width("", 18.0), 0.0);
        let short = estimate_text_width("Stop", 18.0);
        let long = estimate_text_width("Stop Engine", 18.0);
        assert!(long > short);
        assert!((estimate_text_width("ab", 10.0) - 11.0).abs() < 1e-9);
    }
}
