//! Error types for the application shell.
//!
//! The simulation itself has no failure modes; everything here comes from the
//! window system or the GPU. Settings problems have their own
//! [`SettingsError`](crate::settings::SettingsError) and fall back to defaults.

use thiserror::Error;
use winit::error::{EventLoopError, OsError};

/// Failures while creating or driving GPU resources.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible graphics adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
    #[error("failed to acquire surface texture: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

/// Top-level errors that abort startup or the event loop.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("failed to create event loop: {0}")]
    CreateEventLoop(#[source] EventLoopError),
    #[error("event loop failed: {0}")]
    EventLoopRun(#[source] EventLoopError),
    #[error("failed to create window: {0}")]
    CreateWindow(#[from] OsError),
    #[error("failed to install Ctrl+C handler: {0}")]
    SignalHandler(#[from] ctrlc::Error),
    #[error(transparent)]
    Render(#[from] RenderError),
}
