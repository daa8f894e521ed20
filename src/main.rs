//! Daytona - a 2D oval-track racing game
//!
//! One car on the Daytona oval: start the engine, drive with the arrow keys, and complete five
//! laps. `P` engages the pit limiter until the car reaches the pit exit.
//!
//! # Architecture
//! - `app/`: Window lifecycle, event handling and the frame driver
//! - `game/`: Car state, input latch, per-step physics, track geometry and the fixed-step clock
//! - `renderer/`: Drawing surface abstraction, scene drawing, and the wgpu/glyphon backend
//! - `settings`: Optional `daytona.yaml` tuning
//!
//! # Usage
//! Run the application with `cargo run`. Set `RUST_LOG=debug` for per-frame detail.

pub mod app;
pub mod error;
pub mod game;
pub mod renderer;
pub mod settings;

use crate::error::AppError;
use crate::settings::Settings;
use env_logger::Env;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use winit::event_loop::{ControlFlow, EventLoop};

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    let _ = env_logger::Builder::from_env(
        Env::default().default_filter_or("info,wgpu_hal=off,wgpu_core=off,wgpu=off,naga=off"),
    )
    .format_timestamp_secs()
    .try_init();

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

/// Loads settings, creates the event loop and runs the game until the window closes.
fn run() -> Result<(), AppError> {
    let settings = Settings::load().unwrap_or_else(|err| {
        log::warn!("{err}; using default settings");
        Settings::default()
    });
    log::debug!("{settings:?}");

    let event_loop = EventLoop::new().map_err(AppError::CreateEventLoop)?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let shutdown = Arc::new(AtomicBool::new(false));
    let handler_flag = shutdown.clone();
    ctrlc::set_handler(move || handler_flag.store(true, Ordering::Relaxed))?;

    let mut app = app::App::new(settings, shutdown);
    event_loop
        .run_app(&mut app)
        .map_err(AppError::EventLoopRun)?;

    match app.take_error() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}
