//! # Shape Renderer
//!
//! Tessellates filled and stroked 2D primitives into one colored triangle list and draws it with a
//! single indexed draw call per frame.
//!
//! ## Core Components
//!
//! - `ShapeVertex`: position and color of one tessellated vertex
//! - `ShapeBatch`: CPU-side triangle list in logical canvas coordinates
//! - `ShapeRenderer`: pipeline that uploads a batch and draws it
//!
//! Every primitive is built from quads, so strokes, ellipse rings and rotated rectangles all share
//! the same vertex format and shader.

use crate::game::track::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::renderer::canvas::Rgba;
use glam::Vec2;
use std::mem;
use wgpu::{
    self, BlendState, BufferUsages, ColorTargetState, ColorWrites, Device, FragmentState,
    MultisampleState, PrimitiveState, RenderPass, RenderPipeline, VertexAttribute,
    VertexBufferLayout, VertexFormat, VertexState, util::DeviceExt,
};

/// Number of quads used to approximate a full ellipse ring.
pub const ELLIPSE_SEGMENTS: usize = 96;

/// Vertex data for shape rendering.
///
/// `#[repr(C)]` keeps the layout stable for the GPU buffer: 24 bytes per vertex.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShapeVertex {
    /// Position in logical canvas units on the CPU side, normalized device coordinates once
    /// uploaded.
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl ShapeVertex {
    /// Vertex buffer layout: location 0 is the position, location 1 the color.
    fn desc<'a>() -> VertexBufferLayout<'a> {
        VertexBufferLayout {
            array_stride: mem::size_of::<ShapeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: VertexFormat::Float32x2,
                },
                VertexAttribute {
                    offset: mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// A triangle list being assembled for the current frame.
#[derive(Debug, Clone, Default)]
pub struct ShapeBatch {
    vertices: Vec<ShapeVertex>,
    indices: Vec<u32>,
}

impl ShapeBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.indices.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn vertices(&self) -> &[ShapeVertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Appends an arbitrary quad given its corners in winding order.
    pub fn quad(&mut self, corners: [Vec2; 4], color: Rgba) {
        let base = self.vertices.len() as u32;
        self.vertices
            .extend(corners.iter().map(|corner| ShapeVertex {
                position: corner.to_array(),
                color,
            }));
        // Two triangles per quad: (0,1,2) and (0,2,3)
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Axis-aligned filled rectangle from its top-left corner and size.
    pub fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba) {
        self.quad(
            [
                origin,
                origin + Vec2::new(size.x, 0.0),
                origin + size,
                origin + Vec2::new(0.0, size.y),
            ],
            color,
        );
    }

    /// Rectangle outline made of four bands centered on the edges.
    pub fn stroke_rect(&mut self, origin: Vec2, size: Vec2, width: f32, color: Rgba) {
        let half = width / 2.0;
        let outer = origin - Vec2::splat(half);
        let outer_size = size + Vec2::splat(width);

        // Top and bottom bands span the full outer width; the sides fill the gap between them.
        self.fill_rect(outer, Vec2::new(outer_size.x, width), color);
        self.fill_rect(
            Vec2::new(outer.x, origin.y + size.y - half),
            Vec2::new(outer_size.x, width),
            color,
        );
        let side_height = (size.y - width).max(0.0);
        self.fill_rect(
            Vec2::new(outer.x, origin.y + half),
            Vec2::new(width, side_height),
            color,
        );
        self.fill_rect(
            Vec2::new(origin.x + size.x - half, origin.y + half),
            Vec2::new(width, side_height),
            color,
        );
    }

    /// Straight line segment with butt caps.
    pub fn line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        let direction = (to - from).normalize_or_zero();
        if direction == Vec2::ZERO {
            return;
        }
        let offset = direction.perp() * (width / 2.0);
        self.quad([from + offset, to + offset, to - offset, from - offset], color);
    }

    /// Ring of `ELLIPSE_SEGMENTS` quads straddling the ellipse with the given center and radii.
    pub fn stroke_ellipse(&mut self, center: Vec2, radii: Vec2, width: f32, color: Rgba) {
        let half = width / 2.0;
        let outer = radii + Vec2::splat(half);
        let inner = (radii - Vec2::splat(half)).max(Vec2::ZERO);

        let point = |index: usize, radii: Vec2| {
            let angle = index as f32 / ELLIPSE_SEGMENTS as f32 * std::f32::consts::TAU;
            center + Vec2::new(angle.cos(), angle.sin()) * radii
        };

        for index in 0..ELLIPSE_SEGMENTS {
            let next = index + 1;
            self.quad(
                [
                    point(index, outer),
                    point(next, outer),
                    point(next, inner),
                    point(index, inner),
                ],
                color,
            );
        }
    }

    /// Filled rectangle of `size` centered on `center`, rotated by `angle_radians` (clockwise on
    /// screen since y points down).
    pub fn fill_rotated_rect(&mut self, center: Vec2, size: Vec2, angle_radians: f32, color: Rgba) {
        let rotation = Vec2::from_angle(angle_radians);
        let half = size / 2.0;
        let corners = [
            Vec2::new(-half.x, -half.y),
            Vec2::new(half.x, -half.y),
            Vec2::new(half.x, half.y),
            Vec2::new(-half.x, half.y),
        ]
        .map(|corner| center + rotation.rotate(corner));
        self.quad(corners, color);
    }
}

/// Converts a logical canvas position to normalized device coordinates.
///
/// Canvas space: (0,0) = top-left, positive Y = down.
/// NDC space: (-1,-1) = bottom-left, (1,1) = top-right.
pub fn to_ndc(position: [f32; 2]) -> [f32; 2] {
    [
        position[0] / CANVAS_WIDTH as f32 * 2.0 - 1.0,
        1.0 - position[1] / CANVAS_HEIGHT as f32 * 2.0,
    ]
}

/// Pipeline that draws a [`ShapeBatch`] stretched over the whole render target.
pub struct ShapeRenderer {
    render_pipeline: RenderPipeline,
    /// Scratch buffer reused for the NDC copy of each batch.
    upload: Vec<ShapeVertex>,
}

impl ShapeRenderer {
    /// Creates the shape pipeline for `surface_format`.
    ///
    /// Alpha blending is enabled and culling is off since tessellated quads have mixed winding.
    pub fn new(device: &Device, surface_format: wgpu::TextureFormat) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Shape Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/shape.wgsl").into()),
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Shape Pipeline Layout"),
                bind_group_layouts: &[],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Shape Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[ShapeVertex::desc()],
                compilation_options: Default::default(),
            },
            fragment: Some(FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(ColorTargetState {
                    format: surface_format,
                    blend: Some(BlendState::ALPHA_BLENDING),
                    write_mask: ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        Self {
            render_pipeline,
            upload: Vec::new(),
        }
    }

    /// Uploads `batch` and records a single indexed draw into `render_pass`.
    pub fn render(&mut self, device: &Device, render_pass: &mut RenderPass, batch: &ShapeBatch) {
        if batch.is_empty() {
            return;
        }

        self.upload.clear();
        self.upload
            .extend(batch.vertices().iter().map(|vertex| ShapeVertex {
                position: to_ndc(vertex.position),
                color: vertex.color,
            }));

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Shape Vertex Buffer"),
            contents: bytemuck::cast_slice(&self.upload),
            usage: BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Shape Index Buffer"),
            contents: bytemuck::cast_slice(batch.indices()),
            usage: BufferUsages::INDEX,
        });

        render_pass.set_pipeline(&self.render_pipeline);
        render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
        render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        render_pass.draw_indexed(0..batch.indices().len() as u32, 0, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba = [1.0, 0.0, 0.0, 1.0];

    fn assert_close(a: Vec2, b: Vec2) {
        assert!((a - b).length() < 1e-3, "{a} != {b}");
    }

    fn position(batch: &ShapeBatch, index: usize) -> Vec2 {
        Vec2::from_array(batch.vertices()[index].position)
    }

    #[test]
    fn test_quads_share_index_pattern() {
        let mut batch = ShapeBatch::new();
        batch.fill_rect(Vec2::ZERO, Vec2::new(10.0, 5.0), RED);
        batch.fill_rect(Vec2::new(20.0, 20.0), Vec2::new(1.0, 1.0), RED);
        assert_eq!(batch.vertices().len(), 8);
        assert_eq!(batch.indices(), &[0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]);
        assert_close(position(&batch, 2), Vec2::new(10.0, 5.0));
    }

    #[test]
    fn test_stroke_rect_covers_edges() {
        let mut batch = ShapeBatch::new();
        batch.stroke_rect(Vec2::new(440.0, 650.0), Vec2::new(120.0, 150.0), 4.0, RED);
        assert_eq!(batch.vertices().len(), 16);
        // Top band starts half a stroke outside the corner.
        assert_close(position(&batch, 0), Vec2::new(438.0, 648.0));
        // Bottom band ends half a stroke outside the opposite corner.
        assert_close(position(&batch, 6), Vec2::new(562.0, 802.0));
    }

    #[test]
    fn test_ellipse_ring_straddles_outline() {
        let mut batch = ShapeBatch::new();
        let center = Vec2::new(500.0, 400.0);
        let radii = Vec2::new(400.0, 300.0);
        batch.stroke_ellipse(center, radii, 6.0, RED);
        assert_eq!(batch.vertices().len(), ELLIPSE_SEGMENTS * 4);
        assert_close(position(&batch, 0), Vec2::new(903.0, 400.0));
        assert_close(position(&batch, 3), Vec2::new(897.0, 400.0));
    }

    #[test]
    fn test_line_is_offset_along_normal() {
        let mut batch = ShapeBatch::new();
        batch.line(Vec2::new(500.0, 100.0), Vec2::new(500.0, 180.0), 4.0, RED);
        let xs: Vec<f32> = batch.vertices().iter().map(|v| v.position[0]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::MAX, f32::min), 498.0);
        assert_eq!(xs.iter().cloned().fold(f32::MIN, f32::max), 502.0);

        let mut degenerate = ShapeBatch::new();
        degenerate.line(Vec2::ONE, Vec2::ONE, 4.0, RED);
        assert!(degenerate.is_empty());
    }

    #[test]
    fn test_rotated_rect_quarter_turn() {
        let mut batch = ShapeBatch::new();
        batch.fill_rotated_rect(
            Vec2::new(530.0, 615.0),
            Vec2::new(60.0, 30.0),
            std::f32::consts::FRAC_PI_2,
            RED,
        );
        // The 60-long side now runs vertically.
        assert_close(position(&batch, 0), Vec2::new(545.0, 585.0));
        assert_close(position(&batch, 2), Vec2::new(515.0, 645.0));
    }

    #[test]
    fn test_ndc_conversion() {
        assert_eq!(to_ndc([0.0, 0.0]), [-1.0, 1.0]);
        assert_eq!(to_ndc([1000.0, 800.0]), [1.0, -1.0]);
        assert_eq!(to_ndc([500.0, 400.0]), [0.0, 0.0]);
    }
}
