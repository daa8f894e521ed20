//! Event handler module.
//!
//! Contains the App struct and its event handling logic.

use crate::app::app_state::AppState;
use crate::error::{AppError, RenderError};
use crate::game::keys::winit_key_to_game_key;
use crate::game::track::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::settings::Settings;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    event_loop::ActiveEventLoop,
    window::{Window, WindowId},
};

/// Title of the game window.
pub const WINDOW_TITLE: &str = "2D Car Racing Game - Daytona Track";

/// Main application struct that manages the game lifecycle and event handling.
///
/// This struct implements the [`ApplicationHandler`] trait to handle all window events.
/// It manages the WGPU instance, application state, and window lifecycle.
///
/// # Lifecycle
/// 1. Created with `App::new()` - initializes WGPU instance
/// 2. `resumed` creates the window, surface and [`AppState`]
/// 3. Events are handled via `ApplicationHandler` trait methods
/// 4. Application runs until the window is closed or Ctrl+C is received
pub struct App {
    /// The WGPU instance for graphics operations.
    pub instance: wgpu::Instance,
    /// The current application state, None until initialized.
    pub state: Option<AppState>,
    /// The application window, None until set.
    pub window: Option<Arc<Window>>,
    /// Tuning handed to the game state on startup.
    pub settings: Settings,
    /// Set from the Ctrl+C handler.
    pub shutdown: Arc<AtomicBool>,
    /// First fatal error, reported once the event loop returns.
    pub error: Option<AppError>,
}

impl App {
    /// Creates a new [`App`] instance with default WGPU configuration.
    ///
    /// # Arguments
    /// - `settings`: Physics and frame tuning for the race.
    /// - `shutdown`: Flag that stops the event loop once set.
    pub fn new(settings: Settings, shutdown: Arc<AtomicBool>) -> Self {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        Self {
            instance,
            state: None,
            window: None,
            settings,
            shutdown,
            error: None,
        }
    }

    /// Takes the fatal error recorded while the event loop ran, if any.
    pub fn take_error(&mut self) -> Option<AppError> {
        self.error.take()
    }

    /// Records a fatal error and stops the event loop.
    pub fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        log::error!("{error}");
        self.error.get_or_insert(error);
        event_loop.exit();
    }

    /// Creates the WGPU surface for `window` and initializes the race.
    ///
    /// # Arguments
    /// - `window`: The window to associate with this application
    pub async fn set_window(&mut self, window: Window) -> Result<(), AppError> {
        let window = Arc::new(window);

        let surface = self
            .instance
            .create_surface(window.clone())
            .map_err(RenderError::from)?;

        let state = AppState::new(&self.instance, surface, &window, self.settings.clone()).await?;

        window.request_redraw();
        self.window.get_or_insert(window);
        self.state.get_or_insert(state);
        Ok(())
    }

    /// Handles window resize events and updates all rendering systems.
    ///
    /// Zero sizes (minimized windows) are ignored.
    pub fn handle_resized(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        match &mut self.state {
            Some(state) => state.resize_surface(width, height),
            None => log::warn!("Cannot resize surface without state initialized"),
        }
    }
}

impl ApplicationHandler for App {
    /// Creates the fixed-size game window on first resume.
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(CANVAS_WIDTH, CANVAS_HEIGHT))
            .with_resizable(false);
        let window = match event_loop.create_window(attributes) {
            Ok(window) => window,
            Err(err) => {
                self.fail(event_loop, err.into());
                return;
            }
        };

        if let Err(err) = pollster::block_on(self.set_window(window)) {
            self.fail(event_loop, err);
            return;
        }
        log::info!("Window created; click \"Start Engine\" and drive with the arrow keys");
    }

    /// Handles window events including input, resize, and close requests.
    ///
    /// # Event Types Handled
    /// - **CloseRequested**: Initiates application shutdown
    /// - **Resized**: Calls `handle_resized()` to update rendering
    /// - **KeyboardInput**: Latches drive keys and requests the pit limiter. Repeated presses
    ///   are kept so a key held before the engine starts still latches.
    /// - **Focused**: Releases every held key when focus is lost
    /// - **Mouse events**: Forwarded to the button manager
    /// - **RedrawRequested**: Runs the due physics steps and renders a frame
    fn window_event(&mut self, event_loop: &ActiveEventLoop, _: WindowId, event: WindowEvent) {
        let Some(state) = self.state.as_mut() else {
            return;
        };

        state.handle_button_input(&event);

        match event {
            WindowEvent::CloseRequested => {
                log::info!("The close button was pressed; stopping");
                event_loop.exit();
            }

            WindowEvent::Resized(new_size) => {
                self.handle_resized(new_size.width, new_size.height);
            }

            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: key,
                        state: key_state,
                        ..
                    },
                ..
            } => {
                if let Some(game_key) = winit_key_to_game_key(&key) {
                    match key_state {
                        ElementState::Pressed => state.game_state.key_pressed(game_key),
                        ElementState::Released => state.game_state.key_released(game_key),
                    }
                }
            }

            WindowEvent::Focused(false) => state.game_state.focus_lost(),

            WindowEvent::RedrawRequested => {
                let current_time = Instant::now();
                self.handle_frame_timing(current_time);
                self.handle_redraw(event_loop);
            }

            _ => {}
        }
    }

    /// Stops the event loop once Ctrl+C has been received.
    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.shutdown.load(Ordering::Relaxed) {
            log::info!("Interrupt received; stopping");
            event_loop.exit();
        }
    }
}
