/*
 * Input Module
 *
 * This module handles user input events for the viewer.
 *
 * Features:
 * - The mouse cursor acts as the predator when the AI hunter is off
 * - Mouse wheel zoom
 * - Space pauses, A toggles the AI predator, R resets the flock
 */

use nannou::prelude::*;
use nannou::winit::event::{MouseScrollDelta, TouchPhase, WindowEvent};

use crate::app::Model;

// Mouse moved event handler
pub fn mouse_moved(app: &App, model: &mut Model, pos: Point2) {
    let world_pos = model.camera.screen_to_world(pos, app.window_rect());
    model.mouse_position = Some(world_pos);
}

// Mouse wheel event handler for zooming
pub fn mouse_wheel(_app: &App, model: &mut Model, delta: MouseScrollDelta, _phase: TouchPhase) {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => model.camera.zoom_by(y),
        MouseScrollDelta::PixelDelta(pos) => model.camera.zoom_by(pos.y as f32 * 0.01),
    }
}

// Keyboard shortcuts
pub fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    if model.egui.ctx().wants_keyboard_input() {
        return;
    }

    match key {
        Key::Space => model.params.pause_simulation = !model.params.pause_simulation,
        Key::A => {
            model.params.ai_predator = !model.params.ai_predator;
            log::debug!("ai predator {}", if model.params.ai_predator { "on" } else { "off" });
        }
        Key::R => model.params.reset_requested = true,
        Key::D => model.params.show_debug = !model.params.show_debug,
        _ => {}
    }
}

// Pass raw window events to egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &WindowEvent) {
    model.egui.handle_raw_event(event);
}
