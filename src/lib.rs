/*
 * Boid Flocking Engine - Module Definitions
 *
 * This file defines the module structure of the flocking engine: the
 * simulation core (vector math, toroidal world, boids, spatial grid and the
 * parallel update loop), an autonomous predator, and behind the `viewer`
 * feature an interactive nannou front end.
 */

// Re-export key components for easier access
pub use boid::{AgentState, Boid};
pub use error::SimulationError;
pub use params::{FlockParams, SimulationConfig};
pub use predator::Predator;
pub use simulation::Simulation;
pub use spatial_grid::SpatialGrid;
pub use vector::{SteeringVector, Vec2};
pub use world::World;

// Define modules
pub mod boid;
pub mod error;
pub mod params;
pub mod predator;
pub mod simulation;
pub mod spatial_grid;
pub mod vector;
pub mod world;

#[cfg(feature = "viewer")]
pub mod app;
#[cfg(feature = "viewer")]
pub mod camera;
#[cfg(feature = "viewer")]
pub mod debug;
#[cfg(feature = "viewer")]
pub mod input;
#[cfg(feature = "viewer")]
pub mod renderer;
#[cfg(feature = "viewer")]
pub mod ui;

// Constants
pub const DEFAULT_CELL_SIZE: f32 = 50.0;
pub const DEFAULT_MAX_NEIGHBORS: usize = 64;
pub const BOID_SIZE: f32 = 3.0;
pub const DEFAULT_WORLD_WIDTH: f32 = 1200.0;
pub const DEFAULT_WORLD_HEIGHT: f32 = 800.0;
pub const DEFAULT_BOID_COUNT: usize = 5000;
