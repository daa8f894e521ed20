//! Application module.
//!
//! This module contains the windowing shell around the simulation: lifecycle, event routing,
//! and the per-frame update/render driver.
//!
//! # Module Structure
//!
//! - [`app_state`]: Contains the [`AppState`] struct which holds all session state
//! - [`event_handler`]: Contains the [`App`] struct and event handling logic
//! - [`update`]: Contains the frame driver
//!
//! # Event Flow
//!
//! 1. **Input Events**: Keys and mouse events mutate the car or the buttons immediately
//! 2. **Simulation**: On each redraw the fixed-step clock decides how many physics steps run
//! 3. **Rendering**: The current state is drawn and presented, and the next redraw requested
//!
//! # Threading Model
//!
//! Everything runs on the event loop thread. The only other thread is the Ctrl+C handler,
//! which just sets an atomic flag.

pub mod app_state;
pub mod event_handler;
pub mod update;

pub use app_state::AppState;
pub use event_handler::App;
