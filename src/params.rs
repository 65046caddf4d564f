/*
 * Simulation Parameters Module
 *
 * This module defines the tunable steering constants (FlockParams) and the
 * construction-time configuration of a simulation (SimulationConfig).
 * Defaults reproduce the reference flock: slow boids, soft separation,
 * weak alignment and a strong but local panic response to the predator.
 */

use crate::error::SimulationError;
use crate::spatial_grid::SpatialGrid;
use crate::{DEFAULT_CELL_SIZE, DEFAULT_MAX_NEIGHBORS};

/// Steering constants shared by every boid.
#[derive(Debug, Clone, PartialEq)]
pub struct FlockParams {
    pub max_speed: f32,
    pub max_force: f32,
    // Initial speed is drawn from this range at spawn time
    pub min_initial_speed: f32,
    pub max_initial_speed: f32,

    pub separation_radius: f32,
    pub alignment_radius: f32,
    pub flee_radius: f32,
    /// Squared distance under which a neighbor is treated as overlapping and
    /// ignored by separation.
    pub overlap_distance_sq: f32,

    pub separation_weight: f32,
    pub alignment_weight: f32,
    pub cohesion_weight: f32,
    pub wander_weight: f32,
    pub flee_weight: f32,

    /// Full width of the per-tick wander angle perturbation.
    pub wander_jitter: f32,
    pub wander_radius: f32,
    pub wander_distance: f32,
    /// Flee steering is clamped to `max_force * flee_force_scale`.
    pub flee_force_scale: f32,
}

impl Default for FlockParams {
    fn default() -> Self {
        Self {
            max_speed: 2.5,
            max_force: 0.15,
            min_initial_speed: 1.0,
            max_initial_speed: 2.5,
            separation_radius: 25.0,
            alignment_radius: 50.0,
            flee_radius: 100.0,
            overlap_distance_sq: 0.01,
            separation_weight: 1.5,
            alignment_weight: 0.3,
            cohesion_weight: 0.5,
            wander_weight: 0.8,
            flee_weight: 3.0,
            wander_jitter: 0.5,
            wander_radius: 2.0,
            wander_distance: 4.0,
            flee_force_scale: 2.0,
        }
    }
}

impl FlockParams {
    #[inline]
    pub fn separation_radius_sq(&self) -> f32 {
        self.separation_radius * self.separation_radius
    }

    #[inline]
    pub fn alignment_radius_sq(&self) -> f32 {
        self.alignment_radius * self.alignment_radius
    }

    #[inline]
    pub fn flee_radius_sq(&self) -> f32 {
        self.flee_radius * self.flee_radius
    }

    // The largest radius that is answered through the spatial grid
    pub fn max_neighbor_radius(&self) -> f32 {
        f32::max(self.separation_radius, self.alignment_radius)
    }

    /// Checks the values against a grid of the given cell size.
    pub fn validate(&self, cell_size: f32) -> Result<(), SimulationError> {
        let values = [
            self.max_speed,
            self.max_force,
            self.min_initial_speed,
            self.max_initial_speed,
            self.separation_radius,
            self.alignment_radius,
            self.flee_radius,
            self.overlap_distance_sq,
            self.separation_weight,
            self.alignment_weight,
            self.cohesion_weight,
            self.wander_weight,
            self.flee_weight,
            self.wander_jitter,
            self.wander_radius,
            self.wander_distance,
            self.flee_force_scale,
        ];
        if values.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(SimulationError::InvalidConfig(
                "flock parameters must be finite and non-negative",
            ));
        }
        if self.min_initial_speed > self.max_initial_speed {
            return Err(SimulationError::InvalidConfig(
                "min_initial_speed must not exceed max_initial_speed",
            ));
        }
        if self.max_neighbor_radius() > cell_size {
            return Err(SimulationError::InvalidConfig(
                "neighbor radii must not exceed the grid cell size",
            ));
        }
        Ok(())
    }

    // Get parameter ranges for UI sliders
    pub fn get_weight_range() -> std::ops::RangeInclusive<f32> {
        0.0..=5.0
    }

    pub fn get_max_speed_range() -> std::ops::RangeInclusive<f32> {
        0.5..=10.0
    }
}

/// Upper bound on grid buckets a world may need at its cell size.
pub const MAX_GRID_BUCKETS: usize = 1 << 22;

/// Everything needed to construct a simulation.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub count: usize,
    pub width: f32,
    pub height: f32,
    pub cell_size: f32,
    /// Cap on the neighbor candidates gathered per boid each tick.
    pub max_neighbors: usize,
    /// Worker threads for the update phase; rayon's thread count when unset.
    pub workers: Option<usize>,
    /// Master seed; drawn from entropy when unset.
    pub seed: Option<u64>,
    pub flock: FlockParams,
}

impl SimulationConfig {
    pub fn new(count: usize, width: f32, height: f32) -> Self {
        Self {
            count,
            width,
            height,
            cell_size: DEFAULT_CELL_SIZE,
            max_neighbors: DEFAULT_MAX_NEIGHBORS,
            workers: None,
            seed: None,
            flock: FlockParams::default(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn with_max_neighbors(mut self, max_neighbors: usize) -> Self {
        self.max_neighbors = max_neighbors;
        self
    }

    pub fn with_flock(mut self, flock: FlockParams) -> Self {
        self.flock = flock;
        self
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.count == 0 {
            return Err(SimulationError::InvalidConfig("count must be positive"));
        }
        if !self.width.is_finite() || self.width <= 0.0 {
            return Err(SimulationError::InvalidConfig("width must be positive and finite"));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(SimulationError::InvalidConfig("height must be positive and finite"));
        }
        if !self.cell_size.is_finite() || self.cell_size <= 0.0 {
            return Err(SimulationError::InvalidConfig("cell_size must be positive and finite"));
        }
        let (cols, rows) = SpatialGrid::bucket_counts(self.width, self.height, self.cell_size);
        match cols.checked_mul(rows) {
            Some(buckets) if buckets <= MAX_GRID_BUCKETS => {}
            _ => return Err(SimulationError::InvalidConfig("grid has too many buckets")),
        }
        if self.max_neighbors == 0 {
            return Err(SimulationError::InvalidConfig("max_neighbors must be positive"));
        }
        if self.workers == Some(0) {
            return Err(SimulationError::InvalidConfig("workers must be positive"));
        }
        self.flock.validate(self.cell_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(SimulationConfig::new(100, 1200.0, 800.0).validate().is_ok());
    }

    #[test]
    fn rejects_degenerate_construction_input() {
        let bad = [
            SimulationConfig::new(0, 100.0, 100.0),
            SimulationConfig::new(10, 0.0, 100.0),
            SimulationConfig::new(10, 100.0, -5.0),
            SimulationConfig::new(10, f32::NAN, 100.0),
            SimulationConfig::new(10, 100.0, f32::INFINITY),
            SimulationConfig::new(10, 100.0, 100.0).with_workers(0),
            SimulationConfig::new(10, 100.0, 100.0).with_max_neighbors(0),
            SimulationConfig::new(10, 100.0, 100.0).with_cell_size(0.0),
            SimulationConfig::new(1, 1.0e30, 1.0e30),
            SimulationConfig::new(1, 1.0e6, 1.0e6),
        ];
        for config in bad {
            assert!(
                matches!(config.validate(), Err(SimulationError::InvalidConfig(_))),
                "{config:?} should be rejected"
            );
        }
    }

    #[test]
    fn grid_bucket_cap_is_inclusive() {
        // 2048 x 2048 buckets of 50 units
        let at_cap = SimulationConfig::new(1, 2048.0 * 50.0, 2048.0 * 50.0);
        assert!(at_cap.validate().is_ok());

        let over_cap = SimulationConfig::new(1, 2049.0 * 50.0, 2048.0 * 50.0);
        assert!(matches!(
            over_cap.validate(),
            Err(SimulationError::InvalidConfig("grid has too many buckets"))
        ));
    }

    #[test]
    fn radius_wider_than_cell_is_rejected() {
        let config = SimulationConfig::new(10, 500.0, 500.0).with_cell_size(40.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn negative_weight_is_rejected() {
        let flock = FlockParams {
            cohesion_weight: -1.0,
            ..FlockParams::default()
        };
        assert!(flock.validate(DEFAULT_CELL_SIZE).is_err());
    }
}
