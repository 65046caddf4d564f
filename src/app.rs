/*
 * Application Module
 *
 * This module defines the viewer's model and per-frame update. The viewer is
 * a thin host around Simulation: it feeds the predator position in, advances
 * one tick per frame and reads positions and velocities back out for drawing.
 * The predator is either the mouse cursor or an AI hunter that eats boids.
 */

use nannou::prelude::*;
use nannou_egui::Egui;
use std::time::Instant;

use crate::camera::Camera;
use crate::debug::DebugInfo;
use crate::input;
use crate::params::{FlockParams, SimulationConfig};
use crate::predator::Predator;
use crate::renderer;
use crate::simulation::Simulation;
use crate::ui;
use crate::vector::Vec2 as WorldVec;
use crate::{DEFAULT_BOID_COUNT, DEFAULT_WORLD_HEIGHT, DEFAULT_WORLD_WIDTH};

// Parked predator position used before the mouse first moves
pub const IDLE_PREDATOR: WorldVec = WorldVec::new(-1000.0, -1000.0);

// Viewer-only settings adjusted from the UI
pub struct ViewerParams {
    pub num_boids: usize,
    pub pause_simulation: bool,
    pub ai_predator: bool,
    pub show_debug: bool,
    pub reset_requested: bool,
}

impl Default for ViewerParams {
    fn default() -> Self {
        Self {
            num_boids: DEFAULT_BOID_COUNT,
            pause_simulation: false,
            ai_predator: false,
            show_debug: false,
            reset_requested: false,
        }
    }
}

impl ViewerParams {
    pub fn get_num_boids_range() -> std::ops::RangeInclusive<usize> {
        1..=20_000
    }
}

// Main model for the application
pub struct Model {
    pub sim: Simulation,
    pub predator: Predator,
    pub params: ViewerParams,
    // Working copy of the steering parameters edited by the UI
    pub flock: FlockParams,
    pub egui: Egui,
    pub camera: Camera,
    pub mouse_position: Option<WorldVec>,
    pub debug_info: DebugInfo,
}

fn fatal(message: &str, err: impl std::fmt::Display) -> ! {
    log::error!("{message}: {err}");
    std::process::exit(1)
}

fn build_simulation(count: usize) -> Simulation {
    let config = SimulationConfig::new(count, DEFAULT_WORLD_WIDTH, DEFAULT_WORLD_HEIGHT);
    match Simulation::with_config(config) {
        Ok(sim) => sim,
        Err(err) => fatal("failed to start simulation", err),
    }
}

fn spawn_predator(sim: &Simulation) -> Predator {
    Predator::centered(sim.world(), random())
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let window_id = match app
        .new_window()
        .title("Boid Flocking Simulation")
        .size(DEFAULT_WORLD_WIDTH as u32, DEFAULT_WORLD_HEIGHT as u32)
        .view(renderer::view)
        .mouse_moved(input::mouse_moved)
        .mouse_wheel(input::mouse_wheel)
        .key_pressed(input::key_pressed)
        .raw_event(input::raw_window_event)
        .build()
    {
        Ok(id) => id,
        Err(err) => fatal("failed to create window", err),
    };

    let egui = match app.window(window_id) {
        Some(window) => Egui::from_window(&window),
        None => fatal("window disappeared", format!("{window_id:?}")),
    };

    let params = ViewerParams::default();
    let sim = build_simulation(params.num_boids);
    let predator = spawn_predator(&sim);

    Model {
        camera: Camera::new(sim.world()),
        flock: sim.flock_params().clone(),
        sim,
        predator,
        params,
        egui,
        mouse_position: None,
        debug_info: DebugInfo::default(),
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.egui.set_elapsed_time(update.since_start);

    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;

    ui::update_ui(&mut model.egui, &mut model.params, &mut model.flock, &model.debug_info);

    if model.params.reset_requested {
        reset(model);
    }

    if &model.flock != model.sim.flock_params() {
        if let Err(err) = model.sim.set_flock_params(model.flock.clone()) {
            log::warn!("rejected flock parameters: {err}");
            model.flock = model.sim.flock_params().clone();
        }
    }

    if !model.params.pause_simulation {
        let target = if model.params.ai_predator {
            let eaten = model.predator.hunt(&model.sim.full_state(), model.sim.world());
            model.sim.remove_agents(&eaten);
            model.predator.position
        } else {
            model.mouse_position.unwrap_or(IDLE_PREDATOR)
        };

        let start = Instant::now();
        model.sim.step(target);
        model.debug_info.tick_time = start.elapsed();
    }

    model.debug_info.tick = model.sim.tick();
    model.debug_info.boid_count = model.sim.len();
    model.debug_info.boids_eaten = model.predator.eaten();
    model.debug_info.workers = model.sim.workers();
}

// Rebuild the flock with the current boid count and tuning
pub fn reset(model: &mut Model) {
    model.params.reset_requested = false;

    let mut sim = build_simulation(model.params.num_boids);
    if let Err(err) = sim.set_flock_params(model.flock.clone()) {
        log::warn!("keeping default flock parameters: {err}");
        model.flock = sim.flock_params().clone();
    }
    model.predator = spawn_predator(&sim);
    model.sim = sim;
    model.camera.reset();
    log::info!("simulation reset with {} boids", model.sim.len());
}
