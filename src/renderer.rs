/*
 * Renderer Module
 *
 * This module handles the rendering of the simulation. It draws the world
 * border, every boid as a triangle pointing along its velocity, the predator
 * and the optional debug overlay. All state is read back through the
 * Simulation accessors.
 */

use nannou::prelude::*;

use crate::app::Model;
use crate::boid::AgentState;
use crate::camera::Camera;
use crate::ui;
use crate::vector::Vec2 as WorldVec;
use crate::BOID_SIZE;

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);

    let window_rect = app.window_rect();
    let camera = &model.camera;
    let scale = camera.scale(window_rect);

    // World boundary
    let world = model.sim.world();
    let top_left = camera.world_to_screen(WorldVec::ZERO, window_rect);
    let bottom_right = camera.world_to_screen(WorldVec::new(world.width, world.height), window_rect);
    let world_rect = Rect::from_corners(top_left, bottom_right);

    draw.rect()
        .xy(world_rect.xy())
        .wh(world_rect.wh())
        .no_fill()
        .stroke_weight(1.0)
        .stroke(rgba(0.3, 0.3, 0.3, 1.0));

    for agent in model.sim.full_state() {
        draw_boid(&draw, camera, window_rect, scale, &agent);
    }

    draw_predator(&draw, model, window_rect, scale);

    if model.params.show_debug {
        ui::draw_debug_info(&draw, &model.debug_info, window_rect, camera.zoom);
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        log::warn!("failed to draw frame: {err}");
    }

    if let Err(err) = model.egui.draw_to_frame(&frame) {
        log::warn!("failed to draw ui: {err}");
    }
}

// A small triangle pointing along the velocity
fn draw_boid(draw: &Draw, camera: &Camera, window_rect: Rect, scale: f32, agent: &AgentState) {
    let pos = camera.world_to_screen(agent.position, window_rect);
    // Screen y is up, world y is down
    let angle = (-agent.velocity.y).atan2(agent.velocity.x);
    let size = BOID_SIZE * scale;

    let points = [pt2(size * 2.0, 0.0), pt2(-size, size), pt2(-size, -size)];

    draw.polygon()
        .points(points)
        .xy(pos)
        .rotate(angle)
        .color(rgb8(200, 220, 255));
}

fn draw_predator(draw: &Draw, model: &Model, window_rect: Rect, scale: f32) {
    let camera = &model.camera;

    if model.params.ai_predator {
        let predator = &model.predator;
        let pos = camera.world_to_screen(predator.position, window_rect);

        // Hunt range
        draw.ellipse()
            .xy(pos)
            .radius(predator.hunt_radius * scale)
            .no_fill()
            .stroke_weight(1.0)
            .stroke(rgba(1.0, 0.2, 0.2, 0.25));

        draw.ellipse()
            .xy(pos)
            .radius(predator.eat_radius * 0.5 * scale)
            .color(rgb8(255, 60, 60));

        let heading = camera.world_to_screen(predator.position + predator.velocity * 6.0, window_rect);
        draw.line().start(pos).end(heading).weight(2.0).color(rgb8(255, 60, 60));
    } else if let Some(mouse) = model.mouse_position {
        let pos = camera.world_to_screen(mouse, window_rect);
        draw.ellipse()
            .xy(pos)
            .radius(model.flock.flee_radius * scale)
            .no_fill()
            .stroke_weight(1.0)
            .stroke(rgba(1.0, 0.4, 0.2, 0.5));
    }
}
