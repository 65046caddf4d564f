/*
 * Boid Module
 *
 * This module defines the Boid struct and its behavior.
 * Each tick a boid sums five steering contributions into its acceleration:
 * 1. Separation: Avoid crowding neighbors
 * 2. Alignment: Steer towards the average heading of neighbors
 * 3. Cohesion: Steer towards the average position of neighbors
 * 4. Wander: A bounded random walk of the heading
 * 5. Flee: Panic away from a nearby predator
 *
 * Neighbor distances are measured on the toroidal world, so boids on
 * opposite edges flock together.
 */

use bytemuck::{Pod, Zeroable};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;

use crate::params::FlockParams;
use crate::vector::{SteeringVector, Vec2};
use crate::world::World;

/// Position and velocity of one boid, laid out as four packed floats.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, Pod, Zeroable)]
pub struct AgentState {
    pub position: Vec2,
    pub velocity: Vec2,
}

#[derive(Debug, Clone)]
pub struct Boid {
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
    pub max_speed: f32,
    pub max_force: f32,
    pub wander_angle: f32,
    pub world: World,
    // Private random source driving wander; never shared between boids
    rng: SmallRng,
}

// Kinematic equality; the random source is not part of a boid's value
impl PartialEq for Boid {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
            && self.velocity == other.velocity
            && self.acceleration == other.acceleration
            && self.max_speed == other.max_speed
            && self.max_force == other.max_force
            && self.wander_angle == other.wander_angle
            && self.world == other.world
    }
}

impl Boid {
    /// Spawns a boid at `position` with a random heading and speed drawn from
    /// its own generator seeded by `seed`.
    pub fn new(position: Vec2, world: World, params: &FlockParams, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);

        let angle = rng.gen_range(0.0..TAU);
        let speed = if params.min_initial_speed < params.max_initial_speed {
            rng.gen_range(params.min_initial_speed..params.max_initial_speed)
        } else {
            params.min_initial_speed
        };

        Self {
            position,
            velocity: Vec2::from_angle(angle) * speed,
            acceleration: Vec2::ZERO,
            max_speed: params.max_speed,
            max_force: params.max_force,
            wander_angle: angle,
            world,
            rng,
        }
    }

    pub fn state(&self) -> AgentState {
        AgentState {
            position: self.position,
            velocity: self.velocity,
        }
    }

    // Apply a force to the boid
    #[inline]
    pub fn apply_force(&mut self, force: Vec2) {
        self.acceleration += force;
    }

    /// Accumulates every steering contribution for this tick. `neighbors`
    /// must not contain the boid itself.
    pub fn flock<'a, I>(&mut self, neighbors: I, predator: Vec2, params: &FlockParams)
    where
        I: IntoIterator<Item = &'a AgentState>,
    {
        let separation_radius_sq = params.separation_radius_sq();
        let alignment_radius_sq = params.alignment_radius_sq();

        let mut separation = Vec2::ZERO;
        let mut velocity_sum = Vec2::ZERO;
        let mut position_sum = Vec2::ZERO;
        let mut separation_count = 0usize;
        let mut flock_count = 0usize;

        // Process all neighbors in a single pass
        for other in neighbors {
            let diff = self.world.wrapped_diff(self.position, other.position);
            let d_squared = diff.length_squared();

            if d_squared < alignment_radius_sq {
                // Unwrapped neighbor position, on this boid's side of the edge
                position_sum += self.position - diff;
                velocity_sum += other.velocity;
                flock_count += 1;
            }

            if d_squared < separation_radius_sq && d_squared > params.overlap_distance_sq {
                let mut away = diff;
                away.normalize_mut();
                separation += away / d_squared.sqrt();
                separation_count += 1;
            }
        }

        if separation_count > 0 {
            let mut steer = separation / separation_count as f32;
            steer.normalize_mut();
            let steer = (steer * self.max_speed - self.velocity).limited(self.max_force);
            self.apply_force(steer * params.separation_weight);
        }

        if flock_count > 0 {
            let average_velocity = velocity_sum / flock_count as f32;
            let align = (average_velocity - self.velocity).limited(self.max_force);
            self.apply_force(align * params.alignment_weight);

            let center = position_sum / flock_count as f32;
            let cohesion = seek(self.position, self.velocity, center, self.max_speed, self.max_force);
            self.apply_force(cohesion * params.cohesion_weight);
        }

        let wander = self.wander(params);
        self.apply_force(wander * params.wander_weight);

        let flee = self.flee(predator, params);
        self.apply_force(flee * params.flee_weight);
    }

    // Advance the wander angle and return the resulting steering force
    pub fn wander(&mut self, params: &FlockParams) -> Vec2 {
        self.wander_angle += jitter(&mut self.rng, params.wander_jitter);
        wander_force(
            self.velocity,
            self.wander_angle,
            params.wander_distance,
            params.wander_radius,
            self.max_force,
        )
    }

    // Steer directly away from the predator when it is inside the panic radius.
    // Distance here is plain subtraction, not toroidal.
    pub fn flee(&self, predator: Vec2, params: &FlockParams) -> Vec2 {
        let mut diff = self.position - predator;
        if diff.length_squared() < params.flee_radius_sq() {
            diff.normalize_mut();
            (diff * self.max_speed - self.velocity).limited(self.max_force * params.flee_force_scale)
        } else {
            Vec2::ZERO
        }
    }

    // Update the boid's position based on its velocity and acceleration
    pub fn update(&mut self) {
        self.velocity += self.acceleration;
        self.velocity.limit(self.max_speed);
        self.position += self.velocity;
        self.acceleration = Vec2::ZERO;
    }
}

// Reynolds seek: desired velocity at full speed toward `target`, minus current velocity
pub fn seek(position: Vec2, velocity: Vec2, target: Vec2, max_speed: f32, max_force: f32) -> Vec2 {
    let mut desired = target - position;
    desired.normalize_mut();
    (desired * max_speed - velocity).limited(max_force)
}

// Point projected ahead of the heading plus an offset on the wander circle
pub fn wander_force(velocity: Vec2, angle: f32, distance: f32, radius: f32, max_force: f32) -> Vec2 {
    let mut circle_center = velocity;
    circle_center.normalize_mut();
    let displacement = Vec2::new(angle.cos(), angle.sin()) * radius;
    (circle_center * distance + displacement).limited(max_force)
}

// Uniform perturbation in [-width/2, width/2)
#[inline]
pub fn jitter<R: Rng + ?Sized>(rng: &mut R, width: f32) -> f32 {
    if width > 0.0 {
        rng.gen_range(-width / 2.0..width / 2.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world() -> World {
        World::new(1200.0, 800.0)
    }

    fn boid_at(x: f32, y: f32, velocity: Vec2) -> Boid {
        let mut boid = Boid::new(Vec2::new(x, y), world(), &FlockParams::default(), 1);
        boid.velocity = velocity;
        boid
    }

    fn state(x: f32, y: f32, vx: f32, vy: f32) -> AgentState {
        AgentState {
            position: Vec2::new(x, y),
            velocity: Vec2::new(vx, vy),
        }
    }

    // Parameters with only one behavior switched on
    fn only(f: impl FnOnce(&mut FlockParams)) -> FlockParams {
        let mut params = FlockParams {
            separation_weight: 0.0,
            alignment_weight: 0.0,
            cohesion_weight: 0.0,
            wander_weight: 0.0,
            flee_weight: 0.0,
            ..FlockParams::default()
        };
        f(&mut params);
        params
    }

    const FAR: Vec2 = Vec2::new(-10_000.0, -10_000.0);

    #[test]
    fn spawn_respects_speed_range() {
        let params = FlockParams::default();
        for seed in 0..100 {
            let boid = Boid::new(Vec2::new(10.0, 10.0), world(), &params, seed);
            let speed = boid.velocity.length();
            assert!(speed >= params.min_initial_speed - 1e-4);
            assert!(speed <= params.max_initial_speed + 1e-4);
        }
    }

    #[test]
    fn update_clamps_speed_and_resets_acceleration() {
        let mut boid = boid_at(100.0, 100.0, Vec2::new(2.0, 0.0));
        boid.apply_force(Vec2::new(10.0, 10.0));
        boid.update();
        assert!(boid.velocity.length() <= boid.max_speed + 1e-4);
        assert_eq!(boid.acceleration, Vec2::ZERO);
        assert!(boid.position.x > 100.0);
    }

    #[test]
    fn separation_pushes_away_from_close_neighbor() {
        let params = only(|p| p.separation_weight = 1.5);
        let mut boid = boid_at(100.0, 100.0, Vec2::ZERO);
        let neighbors = [state(110.0, 100.0, 0.0, 0.0)];
        boid.flock(&neighbors, FAR, &params);
        assert!(boid.acceleration.x < 0.0);
        assert!(boid.acceleration.y.abs() < 1e-6);
    }

    #[test]
    fn separation_sees_neighbors_across_the_edge() {
        let params = only(|p| p.separation_weight = 1.5);
        let mut boid = boid_at(2.0, 400.0, Vec2::ZERO);
        let neighbors = [state(1195.0, 400.0, 0.0, 0.0)];
        boid.flock(&neighbors, FAR, &params);
        // Neighbor sits just left of us through the wrap, so we are pushed right
        assert!(boid.acceleration.x > 0.0);
    }

    #[test]
    fn coincident_neighbors_do_not_produce_nan() {
        let params = FlockParams::default();
        let mut boid = boid_at(300.0, 300.0, Vec2::ZERO);
        let neighbors = [state(300.0, 300.0, 0.0, 0.0), state(300.0, 300.0, 0.0, 0.0)];
        boid.flock(&neighbors, Vec2::new(300.0, 300.0), &params);
        assert!(boid.acceleration.is_finite());
        boid.update();
        assert!(boid.position.is_finite());
        assert!(boid.velocity.is_finite());
    }

    #[test]
    fn alignment_steers_toward_average_velocity() {
        let params = only(|p| p.alignment_weight = 1.0);
        let mut boid = boid_at(100.0, 100.0, Vec2::ZERO);
        let neighbors = [state(130.0, 100.0, 0.0, 2.0), state(100.0, 130.0, 0.0, 2.0)];
        boid.flock(&neighbors, FAR, &params);
        assert!(boid.acceleration.y > 0.0);
        assert!(boid.acceleration.length() <= boid.max_force + 1e-5);
    }

    #[test]
    fn cohesion_uses_unwrapped_positions() {
        let params = only(|p| p.cohesion_weight = 1.0);
        let mut boid = boid_at(1190.0, 400.0, Vec2::ZERO);
        // Neighbor at x=20 is 30 units to the right through the wrap
        let neighbors = [state(20.0, 400.0, 0.0, 0.0)];
        boid.flock(&neighbors, FAR, &params);
        assert!(boid.acceleration.x > 0.0);
    }

    #[test]
    fn neighbors_outside_radius_are_ignored() {
        let params = only(|p| {
            p.separation_weight = 1.5;
            p.alignment_weight = 0.3;
            p.cohesion_weight = 0.5;
        });
        let mut boid = boid_at(100.0, 100.0, Vec2::new(1.0, 0.0));
        let neighbors = [state(300.0, 300.0, -2.0, 0.0)];
        boid.flock(&neighbors, FAR, &params);
        assert_eq!(boid.acceleration, Vec2::ZERO);
    }

    #[test]
    fn flee_only_inside_panic_radius() {
        let params = FlockParams::default();
        let boid = boid_at(100.0, 100.0, Vec2::ZERO);

        let near = boid.flee(Vec2::new(150.0, 100.0), &params);
        assert!(near.x < 0.0);
        assert!(near.length() <= boid.max_force * params.flee_force_scale + 1e-5);

        assert_eq!(boid.flee(Vec2::new(250.0, 100.0), &params), Vec2::ZERO);
        // No toroidal shortcut for the predator
        assert_eq!(boid.flee(Vec2::new(1190.0, 100.0), &params), Vec2::ZERO);
    }

    #[test]
    fn flee_is_summed_with_flocking_forces() {
        let params = FlockParams {
            wander_weight: 0.0,
            ..FlockParams::default()
        };
        let predator = Vec2::new(160.0, 100.0);
        let mut boid = boid_at(100.0, 100.0, Vec2::new(0.0, 1.0));
        let flee_only = boid.flee(predator, &params) * params.flee_weight;
        assert!(flee_only.length() > 0.0);

        let neighbors = [state(115.0, 105.0, 1.0, 1.0), state(90.0, 120.0, -1.0, 0.5)];
        boid.flock(&neighbors, predator, &params);
        assert!((boid.acceleration - flee_only).length() > 1e-4);
        assert!(boid.acceleration.length() > 0.0);
    }

    #[test]
    fn wander_stays_bounded() {
        let params = FlockParams::default();
        let mut boid = boid_at(100.0, 100.0, Vec2::new(1.0, 0.0));
        let mut previous = boid.wander_angle;
        for _ in 0..1000 {
            let force = boid.wander(&params);
            assert!(force.length() <= boid.max_force + 1e-5);
            assert!((boid.wander_angle - previous).abs() <= params.wander_jitter / 2.0 + 1e-4);
            previous = boid.wander_angle;
        }
    }

    #[test]
    fn same_seed_gives_same_boid() {
        let params = FlockParams::default();
        let a = Boid::new(Vec2::new(5.0, 5.0), world(), &params, 42);
        let b = Boid::new(Vec2::new(5.0, 5.0), world(), &params, 42);
        assert_eq!(a, b);
        assert_eq!(a.clone().wander(&params), b.clone().wander(&params));
    }

    #[test]
    fn seek_with_target_on_position_does_not_blow_up() {
        let force = seek(Vec2::ONE, Vec2::new(1.0, 0.0), Vec2::ONE, 2.5, 0.15);
        assert!(force.is_finite());
        assert!(force.length() <= 0.15 + 1e-6);
    }

    #[test]
    fn agent_state_is_four_packed_floats() {
        let states = [state(1.0, 2.0, 3.0, 4.0), state(5.0, 6.0, 7.0, 8.0)];
        let flat: &[f32] = bytemuck::cast_slice(&states);
        assert_eq!(flat, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
    }
}
