//! AppState module.
//!
//! This module defines the [`AppState`] struct, which holds all state required for a running
//! race session: the GPU renderer, the game state, the engine button and the reusable frame.

use crate::error::RenderError;
use crate::game::GameState;
use crate::renderer::canvas::Frame;
use crate::renderer::ui::button::{
    Button, ButtonManager, ButtonPosition, ButtonStyle, create_danger_button_style,
    create_primary_button_style,
};
use crate::renderer::wgpu_lib::WgpuRenderer;
use crate::settings::Settings;
use winit::event::WindowEvent;
use winit::window::Window;

/// ID of the engine start/stop button.
pub const ENGINE_BUTTON: &str = "engine";

/// Label and style of the engine button for the given engine state.
pub fn engine_button_appearance(engine_on: bool) -> (&'static str, ButtonStyle) {
    if engine_on {
        ("Stop Engine", create_danger_button_style())
    } else {
        ("Start Engine", create_primary_button_style())
    }
}

/// Creates the button manager holding the engine button at (20, 20).
pub fn engine_buttons(engine_on: bool) -> ButtonManager {
    let mut buttons = ButtonManager::new();
    let (label, style) = engine_button_appearance(engine_on);
    buttons.add_button(
        Button::new(ENGINE_BUTTON, label)
            .with_style(style)
            .with_position(ButtonPosition::new(20.0, 20.0, 0.0, 0.0)),
    );
    buttons
}

/// Toggles the engine if the engine button was clicked, relabelling the button to match.
///
/// # Returns
/// Whether a click was consumed.
pub fn apply_engine_click(game_state: &mut GameState, buttons: &mut ButtonManager) -> bool {
    if !buttons.is_button_clicked(ENGINE_BUTTON) {
        return false;
    }
    let engine_on = game_state.toggle_engine();
    let (label, style) = engine_button_appearance(engine_on);
    buttons.restyle_button(ENGINE_BUTTON, label, style);
    true
}

/// Holds all state required for a running race session.
pub struct AppState {
    /// The WGPU renderer that presents each frame.
    pub wgpu_renderer: WgpuRenderer,
    /// The car, the track and the fixed-step clock.
    pub game_state: GameState,
    /// Buttons drawn over the scene.
    pub buttons: ButtonManager,
    /// Draw list reused across frames.
    pub frame: Frame,
}

impl AppState {
    /// Asynchronously creates a new [`AppState`] with an initialized renderer and a fresh race.
    ///
    /// # Arguments
    /// - `instance`: The WGPU instance.
    /// - `surface`: The WGPU surface for rendering.
    /// - `window`: The application window.
    /// - `settings`: Physics and frame tuning.
    pub async fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        window: &Window,
        settings: Settings,
    ) -> Result<Self, RenderError> {
        let size = window.inner_size();
        let wgpu_renderer = WgpuRenderer::new(instance, surface, size.width, size.height).await?;

        let game_state = GameState::new(settings);

        let mut buttons = engine_buttons(game_state.car.engine_on);
        buttons.set_pixels_per_unit(f64::from(wgpu_renderer.scale()));

        Ok(Self {
            wgpu_renderer,
            game_state,
            buttons,
            frame: Frame::new(),
        })
    }

    /// Resizes the surface and keeps mouse hit-testing in step with the new scale.
    pub fn resize_surface(&mut self, width: u32, height: u32) {
        self.wgpu_renderer.resize(width, height);
        self.buttons
            .set_pixels_per_unit(f64::from(self.wgpu_renderer.scale()));
    }

    /// Forwards a window event to the buttons and applies an engine click.
    pub fn handle_button_input(&mut self, event: &WindowEvent) {
        if self.buttons.handle_input(event) {
            apply_engine_click(&mut self.game_state, &mut self.buttons);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::keys::{DriveKey, GameKey};

    #[test]
    fn test_engine_button_follows_engine_state() {
        let (off_label, off_style) = engine_button_appearance(false);
        let (on_label, on_style) = engine_button_appearance(true);
        assert_eq!(off_label, "Start Engine");
        assert_eq!(on_label, "Stop Engine");
        assert_eq!(off_style, create_primary_button_style());
        assert_eq!(on_style, create_danger_button_style());
    }

    fn click_engine_button(game_state: &mut GameState, buttons: &mut ButtonManager) -> bool {
        buttons.mouse_moved(30.0, 30.0);
        buttons.mouse_down();
        buttons.mouse_up();
        apply_engine_click(game_state, buttons)
    }

    #[test]
    fn test_engine_click_toggles_and_relabels() {
        let mut game_state = GameState::new(Settings::default());
        let mut buttons = engine_buttons(game_state.car.engine_on);
        assert_eq!(buttons.buttons[ENGINE_BUTTON].text, "Start Engine");

        assert!(click_engine_button(&mut game_state, &mut buttons));
        assert!(game_state.car.engine_on);
        assert_eq!(buttons.buttons[ENGINE_BUTTON].text, "Stop Engine");
        assert_eq!(
            buttons.buttons[ENGINE_BUTTON].style,
            create_danger_button_style()
        );

        game_state.key_pressed(GameKey::Drive(DriveKey::Up));
        for _ in 0..10 {
            game_state.step();
        }
        assert!(game_state.car.speed > 0.0);

        assert!(click_engine_button(&mut game_state, &mut buttons));
        assert!(!game_state.car.engine_on);
        assert_eq!(game_state.car.speed, 0.0);
        assert_eq!(buttons.buttons[ENGINE_BUTTON].text, "Start Engine");
    }

    #[test]
    fn test_click_elsewhere_leaves_engine_alone() {
        let mut game_state = GameState::new(Settings::default());
        let mut buttons = engine_buttons(false);
        buttons.mouse_moved(500.0, 500.0);
        buttons.mouse_down();
        buttons.mouse_up();
        assert!(!apply_engine_click(&mut game_state, &mut buttons));
        assert!(!game_state.car.engine_on);
    }
}
