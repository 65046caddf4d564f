/*
 * Debug Information Module
 *
 * This module defines the DebugInfo struct that contains performance metrics
 * and simulation counters displayed by the viewer.
 */

use std::time::Duration;

// Debug information to display
#[derive(Debug, Clone, Default)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    // Wall time of the last Simulation::step
    pub tick_time: Duration,
    pub tick: u64,
    pub boid_count: usize,
    pub boids_eaten: usize,
    pub workers: usize,
}

impl DebugInfo {
    pub fn tick_millis(&self) -> f64 {
        self.tick_time.as_secs_f64() * 1000.0
    }
}
