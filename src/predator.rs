/*
 * Predator Module
 *
 * An autonomous hunter for the flock. Each tick it eats every boid inside its
 * eat radius, chases the nearest boid when one is within hunting range and
 * otherwise drifts toward the flock's centre, with some wander on top.
 * The indices it returns are meant for Simulation::remove_agents.
 */

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::boid::{jitter, seek, wander_force, AgentState};
use crate::vector::{SteeringVector, Vec2};
use crate::world::World;

const HUNT_WEIGHT: f32 = 2.0;
const CENTER_WEIGHT: f32 = 1.0;
const WANDER_WEIGHT: f32 = 0.5;
const WANDER_JITTER: f32 = 0.5;
const WANDER_RADIUS: f32 = 2.0;
const WANDER_DISTANCE: f32 = 4.0;

#[derive(Debug, Clone)]
pub struct Predator {
    pub position: Vec2,
    pub velocity: Vec2,
    pub max_speed: f32,
    pub max_force: f32,
    pub hunt_radius: f32,
    pub eat_radius: f32,
    pub wander_angle: f32,
    eaten: usize,
    rng: SmallRng,
}

impl Predator {
    pub fn new(position: Vec2, seed: u64) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            max_speed: 3.5,
            max_force: 0.2,
            hunt_radius: 200.0,
            eat_radius: 20.0,
            wander_angle: 0.0,
            eaten: 0,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    // Spawn in the middle of the world
    pub fn centered(world: World, seed: u64) -> Self {
        Self::new(Vec2::new(world.width / 2.0, world.height / 2.0), seed)
    }

    /// Total number of boids this predator has claimed.
    pub fn eaten(&self) -> usize {
        self.eaten
    }

    /// Runs one hunting step against the current flock and returns the
    /// indices of the boids caught this tick.
    pub fn hunt(&mut self, boids: &[AgentState], world: World) -> Vec<usize> {
        if boids.is_empty() {
            return Vec::new();
        }

        let eat_radius_sq = self.eat_radius * self.eat_radius;
        let hunt_radius_sq = self.hunt_radius * self.hunt_radius;

        let mut caught = Vec::new();
        let mut nearest = 0;
        let mut nearest_dist_sq = f32::INFINITY;
        let mut center = Vec2::ZERO;

        for (i, boid) in boids.iter().enumerate() {
            let dist_sq = boid.position.distance_squared(self.position);
            if dist_sq < eat_radius_sq {
                caught.push(i);
            }
            if dist_sq < nearest_dist_sq {
                nearest_dist_sq = dist_sq;
                nearest = i;
            }
            center += boid.position;
        }
        self.eaten += caught.len();

        let (target, weight) = if nearest_dist_sq < hunt_radius_sq {
            (boids[nearest].position, HUNT_WEIGHT)
        } else {
            (center / boids.len() as f32, CENTER_WEIGHT)
        };
        // A target right on top of the predator exerts no pull
        if target != self.position {
            self.velocity += seek(self.position, self.velocity, target, self.max_speed, self.max_force) * weight;
        }

        self.wander_angle += jitter(&mut self.rng, WANDER_JITTER);
        let wander = wander_force(
            self.velocity,
            self.wander_angle,
            WANDER_DISTANCE,
            WANDER_RADIUS,
            self.max_force,
        );
        self.velocity += wander * WANDER_WEIGHT;

        self.velocity.limit(self.max_speed);
        self.position = world.wrap_modulo(self.position + self.velocity);

        caught
    }
}
