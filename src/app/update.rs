//! Update logic for the racing app.
//!
//! Contains the per-frame driver: advance the simulation by the steps that are due, then draw
//! and present one frame.

use crate::error::AppError;
use crate::renderer::scene::draw_scene;
use std::time::Instant;
use winit::event_loop::ActiveEventLoop;

use super::event_handler::App;

impl App {
    /// Feeds the wall time since the previous frame into the fixed-step clock and runs the
    /// physics steps that are due.
    pub fn handle_frame_timing(&mut self, current_time: Instant) {
        if let Some(state) = self.state.as_mut() {
            let elapsed = state.game_state.frame_elapsed(current_time);
            let steps = state.game_state.tick(elapsed);
            log::trace!("Frame after {elapsed:?} ran {steps} physics steps");
        }
    }

    /// Draws the current state and presents it, then schedules the next frame.
    ///
    /// # Rendering Pipeline
    /// 1. **Scene**: Track, car and lap readout are drawn into the reusable frame
    /// 2. **UI Overlays**: Buttons are drawn on top
    /// 3. **Frame Submission**: The frame is rendered and presented
    ///
    /// Rendering failures other than a lost or outdated surface stop the event loop.
    pub fn handle_redraw(&mut self, event_loop: &ActiveEventLoop) {
        let Some(window) = self.window.clone() else {
            return;
        };
        if window.is_minimized().unwrap_or(false) {
            window.request_redraw();
            return;
        }
        let Some(state) = self.state.as_mut() else {
            return;
        };

        state.frame.reset();
        draw_scene(
            &state.game_state.car,
            &state.game_state.track,
            state.game_state.settings.physics.lap_target,
            &mut state.frame,
        );
        state.buttons.draw(&mut state.frame);

        if let Err(err) = state.wgpu_renderer.render(&state.frame) {
            self.fail(event_loop, AppError::from(err));
            return;
        }

        window.request_redraw();
    }
}
