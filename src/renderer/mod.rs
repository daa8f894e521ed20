//! Main renderer module.
//!
//! Scene code draws onto the [`canvas::DrawSurface`] abstraction; the [`wgpu_lib::WgpuRenderer`]
//! turns a finished [`canvas::Frame`] into GPU work.

/// Drawing surface trait and the per-frame draw list.
pub mod canvas;
/// Track and car drawing.
pub mod scene;
/// Shape tessellation and batch rendering.
pub mod shapes;
/// Text rendering system.
pub mod text;
/// User interface rendering components.
pub mod ui;
/// Core WGPU library and utilities.
pub mod wgpu_lib;
