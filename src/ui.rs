/*
 * UI Module
 *
 * This module contains functions for creating and updating the user interface
 * using nannou_egui. It provides controls for the steering weights, flock size,
 * predator mode and pause state, plus a small on-canvas stats overlay.
 */

use nannou_egui::{egui, Egui};

use crate::app::ViewerParams;
use crate::debug::DebugInfo;
use crate::params::FlockParams;

// Draw the control panel. Slider edits land directly in `params` and `flock`;
// the caller diffs `flock` against the simulation to apply them.
pub fn update_ui(egui: &mut Egui, params: &mut ViewerParams, flock: &mut FlockParams, debug_info: &DebugInfo) {
    let ctx = egui.begin_frame();

    egui::Window::new("Simulation Controls")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.collapsing("Boid Parameters", |ui| {
                ui.add(egui::Slider::new(&mut params.num_boids, ViewerParams::get_num_boids_range()).text("Number of Boids"));

                if ui.button("Reset Boids").clicked() {
                    params.reset_requested = true;
                }

                ui.add(egui::Slider::new(&mut flock.max_speed, FlockParams::get_max_speed_range()).text("Max Speed"));
            });

            ui.collapsing("Flocking Behavior", |ui| {
                let range = FlockParams::get_weight_range;
                ui.add(egui::Slider::new(&mut flock.separation_weight, range()).text("Separation Weight"));
                ui.add(egui::Slider::new(&mut flock.alignment_weight, range()).text("Alignment Weight"));
                ui.add(egui::Slider::new(&mut flock.cohesion_weight, range()).text("Cohesion Weight"));
                ui.add(egui::Slider::new(&mut flock.wander_weight, range()).text("Wander Weight"));
                ui.add(egui::Slider::new(&mut flock.flee_weight, range()).text("Flee Weight"));
            });

            ui.collapsing("Predator", |ui| {
                ui.checkbox(&mut params.ai_predator, "AI Predator");
                ui.label(if params.ai_predator {
                    "The predator hunts the nearest boid"
                } else {
                    "Move the mouse to scare the flock"
                });
                ui.label(format!("Boids eaten: {}", debug_info.boids_eaten));
            });

            ui.collapsing("Performance", |ui| {
                ui.label(format!("FPS: {:.1}", debug_info.fps));
                ui.label(format!("Frame time: {:.2} ms", debug_info.frame_time.as_secs_f64() * 1000.0));
                ui.label(format!("Tick time: {:.2} ms", debug_info.tick_millis()));
                ui.label(format!("Tick: {}", debug_info.tick));
                ui.label(format!("Boids: {}", debug_info.boid_count));
                ui.label(format!("Workers: {}", debug_info.workers));
            });

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });
}

// Draw debug information on the screen
pub fn draw_debug_info(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: nannou::geom::Rect, camera_zoom: f32) {
    let margin = 20.0;
    let line_height = 20.0;
    let panel_width = 200.0;

    let debug_texts = [
        format!("FPS: {:.1}", debug_info.fps),
        format!("Tick time: {:.2} ms", debug_info.tick_millis()),
        format!("Boids: {}", debug_info.boid_count),
        format!("Eaten: {}", debug_info.boids_eaten),
        format!("Workers: {}", debug_info.workers),
        format!("Zoom: {:.2}x", camera_zoom),
    ];

    let panel_height = line_height * debug_texts.len() as f32 + margin;
    draw.rect()
        .x_y(window_rect.right() - panel_width / 2.0, window_rect.top() - panel_height / 2.0)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.right() - panel_width + margin;
    let text_y = window_rect.top() - margin;

    for (i, text) in debug_texts.iter().enumerate() {
        draw.text(text)
            .x_y(text_x + 70.0, text_y - i as f32 * line_height)
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
