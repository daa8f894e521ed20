//! User interface module.
//!
//! Widgets drawn over the race scene. Currently just the engine button.
/// Button UI components and utilities.
pub mod button;
