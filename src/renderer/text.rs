//! Glyphon-backed text rendering.
//!
//! Text arrives each frame as a list of [`TextItem`]s in logical canvas units. Shaped buffers are
//! pooled by position in that list and only reshaped when their content or size changes, which
//! keeps the steady-state cost to a `prepare` call.

use crate::renderer::canvas::{Rgba, TextItem};
use glyphon::{
    Attrs, Buffer, Cache, Color, ColorMode, Family, FontSystem, Metrics, PrepareError,
    RenderError, Resolution, Shaping, SwashCache, TextArea, TextAtlas, TextBounds,
    TextRenderer as GlyphonTextRenderer, Viewport,
};
use wgpu::{Device, MultisampleState, Queue, RenderPass};

/// Line height as a multiple of the font size.
const LINE_HEIGHT_FACTOR: f32 = 1.25;

/// Converts a linear `[r, g, b, a]` color to glyphon's 8-bit color.
pub fn to_glyphon_color(color: Rgba) -> Color {
    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color::rgba(
        channel(color[0]),
        channel(color[1]),
        channel(color[2]),
        channel(color[3]),
    )
}

fn text_prepared(result: Result<(), PrepareError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            log::warn!("Skipping text this frame: {err}");
            false
        }
    }
}

fn text_rendered(result: Result<(), RenderError>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            log::warn!("Failed to draw text: {err}");
            false
        }
    }
}

/// A shaped buffer and the inputs it was shaped from.
#[derive(Debug)]
struct TextBuffer {
    buffer: Buffer,
    text_content: String,
    font_size: f32,
}

pub struct TextRenderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    viewport: Viewport,
    atlas: TextAtlas,
    text_renderer: GlyphonTextRenderer,
    text_buffers: Vec<TextBuffer>,
}

impl TextRenderer {
    /// Creates the glyph atlas and renderer for `surface_format`.
    ///
    /// Non-sRGB surfaces get a web color mode atlas so text colors match the untouched shape
    /// colors.
    pub fn new(device: &Device, queue: &Queue, surface_format: wgpu::TextureFormat) -> Self {
        let font_system = FontSystem::new();
        let swash_cache = SwashCache::new();
        let cache = Cache::new(device);
        let viewport = Viewport::new(device, &cache);
        let color_mode = if surface_format.is_srgb() {
            ColorMode::Accurate
        } else {
            ColorMode::Web
        };
        let mut atlas =
            TextAtlas::with_color_mode(device, queue, &cache, surface_format, color_mode);
        let text_renderer =
            GlyphonTextRenderer::new(&mut atlas, device, MultisampleState::default(), None);

        Self {
            font_system,
            swash_cache,
            viewport,
            atlas,
            text_renderer,
            text_buffers: Vec::new(),
        }
    }

    /// Updates the viewport resolution after the surface changes size.
    pub fn resize(&mut self, queue: &Queue, resolution: Resolution) {
        self.viewport.update(queue, resolution);
    }

    /// Shapes any changed items and uploads glyphs for this frame.
    ///
    /// Returns whether the text is ready to draw. A failed upload is logged and the frame is
    /// drawn without text.
    ///
    /// # Arguments
    /// * `items` - Text queued for the frame, in logical canvas units.
    /// * `scale` - Physical pixels per logical unit.
    /// * `resolution` - Current surface size in physical pixels.
    pub fn prepare(
        &mut self,
        device: &Device,
        queue: &Queue,
        items: &[TextItem],
        scale: f32,
        resolution: Resolution,
    ) -> bool {
        self.viewport.update(queue, resolution);

        while self.text_buffers.len() < items.len() {
            let metrics = Metrics::new(1.0, LINE_HEIGHT_FACTOR);
            self.text_buffers.push(TextBuffer {
                buffer: Buffer::new(&mut self.font_system, metrics),
                text_content: String::new(),
                font_size: 0.0,
            });
        }

        for (item, text_buffer) in items.iter().zip(self.text_buffers.iter_mut()) {
            if text_buffer.text_content == item.text && text_buffer.font_size == item.font_size {
                continue;
            }
            log::debug!("Shaping text '{}' at {}px", item.text, item.font_size);

            let metrics = Metrics::new(item.font_size, item.font_size * LINE_HEIGHT_FACTOR);
            text_buffer
                .buffer
                .set_metrics(&mut self.font_system, metrics);
            text_buffer
                .buffer
                .set_size(&mut self.font_system, None, None);
            text_buffer.buffer.set_text(
                &mut self.font_system,
                &item.text,
                Attrs::new().family(Family::SansSerif),
                Shaping::Advanced,
            );
            text_buffer
                .buffer
                .shape_until_scroll(&mut self.font_system, false);

            text_buffer.text_content.clone_from(&item.text);
            text_buffer.font_size = item.font_size;
        }

        let bounds = TextBounds {
            left: 0,
            top: 0,
            right: resolution.width as i32,
            bottom: resolution.height as i32,
        };
        let text_areas: Vec<TextArea> = items
            .iter()
            .zip(self.text_buffers.iter())
            .map(|(item, text_buffer)| TextArea {
                buffer: &text_buffer.buffer,
                left: item.left * scale,
                top: item.top * scale,
                scale,
                bounds,
                default_color: to_glyphon_color(item.color),
                custom_glyphs: &[],
            })
            .collect();

        let result = self.text_renderer.prepare(
            device,
            queue,
            &mut self.font_system,
            &mut self.atlas,
            &self.viewport,
            text_areas,
            &mut self.swash_cache,
        );
        text_prepared(result)
    }

    /// Draws everything uploaded by the last successful [`TextRenderer::prepare`].
    ///
    /// Failures are logged; the rest of the frame is unaffected.
    pub fn render(&mut self, render_pass: &mut RenderPass) {
        let result = self
            .text_renderer
            .render(&self.atlas, &self.viewport, render_pass);
        text_rendered(result);
    }

    /// Frees atlas space used by glyphs that were not drawn this frame.
    pub fn trim(&mut self) {
        self.atlas.trim();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_conversion() {
        let color = to_glyphon_color([1.0, 0.0, 0.5, 1.0]);
        assert_eq!((color.r(), color.g(), color.b(), color.a()), (255, 0, 128, 255));

        let clamped = to_glyphon_color([2.0, -1.0, 0.0, 0.0]);
        assert_eq!((clamped.r(), clamped.g()), (255, 0));
    }

    #[test]
    fn test_text_failures_do_not_propagate() {
        assert!(text_prepared(Ok(())));
        assert!(!text_prepared(Err(PrepareError::AtlasFull)));

        assert!(text_rendered(Ok(())));
        assert!(!text_rendered(Err(RenderError::RemovedFromAtlas)));
        assert!(!text_rendered(Err(RenderError::ScreenResolutionChanged)));
    }
}
