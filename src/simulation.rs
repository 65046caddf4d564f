/*
 * Simulation Module
 *
 * This module owns the boid population and advances it one tick at a time:
 * 1. Rebuild the spatial grid from current positions (sequential)
 * 2. Snapshot every boid's position and velocity
 * 3. Query, flock, integrate and wrap every boid in parallel, one contiguous
 *    chunk of the population per worker
 *
 * Workers write only to their own chunk and read neighbors from the grid and
 * the snapshot, both of which stay untouched for the whole parallel phase.
 * With a fixed seed a run is reproducible; summation order follows bucket
 * order, so bit-identical results across different worker counts or hardware
 * are not promised.
 */

use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::boid::{AgentState, Boid};
use crate::error::SimulationError;
use crate::params::{FlockParams, SimulationConfig};
use crate::spatial_grid::SpatialGrid;
use crate::vector::Vec2;
use crate::world::World;

pub struct Simulation {
    boids: Vec<Boid>,
    world: World,
    grid: SpatialGrid,
    flock: FlockParams,
    cell_size: f32,
    max_neighbors: usize,
    workers: usize,
    pool: ThreadPool,
    // Read-only view of the population for the parallel phase, reused each tick
    snapshot: Vec<AgentState>,
    tick: u64,
}

impl Simulation {
    /// Creates `count` boids at random positions in a `width` x `height` world
    /// using the default tuning.
    pub fn new(count: usize, width: f32, height: f32) -> Result<Self, SimulationError> {
        Self::with_config(SimulationConfig::new(count, width, height))
    }

    pub fn with_config(config: SimulationConfig) -> Result<Self, SimulationError> {
        config.validate()?;

        let workers = config.workers.unwrap_or_else(rayon::current_num_threads).max(1);
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("boid-worker-{i}"))
            .build()?;

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let world = World::new(config.width, config.height);
        let boids: Vec<Boid> = (0..config.count)
            .map(|_| {
                let position = Vec2::new(
                    rng.gen_range(0.0..config.width),
                    rng.gen_range(0.0..config.height),
                );
                Boid::new(position, world, &config.flock, rng.gen())
            })
            .collect();

        let grid = SpatialGrid::new(config.width, config.height, config.cell_size);

        info!(
            "spawned {} boids in a {}x{} world ({}x{} grid, {} workers)",
            boids.len(),
            config.width,
            config.height,
            grid.cols(),
            grid.rows(),
            workers
        );

        Ok(Self {
            snapshot: Vec::with_capacity(boids.len()),
            boids,
            world,
            grid,
            flock: config.flock,
            cell_size: config.cell_size,
            max_neighbors: config.max_neighbors,
            workers,
            pool,
            tick: 0,
        })
    }

    /// Advances the whole population by exactly one tick.
    pub fn step(&mut self, predator: Vec2) {
        self.tick += 1;
        if self.boids.is_empty() {
            return;
        }

        self.rebuild_grid();

        self.snapshot.clear();
        self.snapshot.extend(self.boids.iter().map(Boid::state));

        let grid = &self.grid;
        let snapshot = &self.snapshot;
        let params = &self.flock;
        let world = self.world;
        let max_neighbors = self.max_neighbors;

        // One contiguous chunk per worker
        let chunk_size = self.boids.len().div_ceil(self.workers);
        let boids = &mut self.boids;

        self.pool.install(|| {
            boids
                .par_chunks_mut(chunk_size)
                .enumerate()
                .for_each(|(chunk_idx, chunk)| {
                    let mut neighbors = Vec::with_capacity(max_neighbors);

                    for (offset, boid) in chunk.iter_mut().enumerate() {
                        let i = chunk_idx * chunk_size + offset;

                        grid.query_into(boid.position, max_neighbors, &mut neighbors);
                        let others = neighbors
                            .iter()
                            .filter(|&&j| j != i)
                            .map(|&j| &snapshot[j]);

                        boid.flock(others, predator, params);
                        boid.update();
                        world.wrap_position(&mut boid.position);
                    }
                });
        });

        trace!("tick {} advanced {} boids", self.tick, self.boids.len());
    }

    // Clear the grid and insert every boid by index
    fn rebuild_grid(&mut self) {
        self.grid.clear();
        for (i, boid) in self.boids.iter().enumerate() {
            self.grid.insert(i, boid.position);
        }
    }

    /// Removes the boids at `indices`. Out-of-range and duplicate indices are
    /// ignored; the relative order of the survivors is kept. Returns how many
    /// boids were removed.
    pub fn remove_agents(&mut self, indices: &[usize]) -> usize {
        let mut sorted: Vec<usize> = indices.to_vec();
        // Highest first so earlier removals do not shift later ones
        sorted.sort_unstable_by(|a, b| b.cmp(a));
        sorted.dedup();

        let before = self.boids.len();
        for index in sorted {
            if index < self.boids.len() {
                self.boids.remove(index);
            }
        }

        let removed = before - self.boids.len();
        if removed > 0 {
            debug!("removed {} boids, {} remaining", removed, self.boids.len());
        }
        removed
    }

    /// Positions as x, y pairs in boid order.
    pub fn positions(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(self.boids.len() * 2);
        for boid in &self.boids {
            out.push(boid.position.x);
            out.push(boid.position.y);
        }
        out
    }

    pub fn full_state(&self) -> Vec<AgentState> {
        self.boids.iter().map(Boid::state).collect()
    }

    /// Full state as x, y, vx, vy quadruples in boid order.
    pub fn full_state_flat(&self) -> Vec<f32> {
        let states = self.full_state();
        bytemuck::cast_slice::<AgentState, f32>(&states).to_vec()
    }

    pub fn agents(&self) -> &[Boid] {
        &self.boids
    }

    /// Direct access for hosts that place or steer boids themselves. The grid
    /// and snapshot are rebuilt from these values on the next step.
    pub fn agents_mut(&mut self) -> &mut [Boid] {
        &mut self.boids
    }

    pub fn len(&self) -> usize {
        self.boids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boids.is_empty()
    }

    pub fn world(&self) -> World {
        self.world
    }

    pub fn width(&self) -> f32 {
        self.world.width
    }

    pub fn height(&self) -> f32 {
        self.world.height
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Number of completed calls to [`Simulation::step`].
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    pub fn flock_params(&self) -> &FlockParams {
        &self.flock
    }

    /// Replaces the steering parameters after checking them against the grid.
    /// Speed and force limits are pushed to every boid.
    pub fn set_flock_params(&mut self, flock: FlockParams) -> Result<(), SimulationError> {
        flock.validate(self.cell_size)?;

        for boid in &mut self.boids {
            boid.max_speed = flock.max_speed;
            boid.max_force = flock.max_force;
        }
        debug!("flock parameters updated: {:?}", flock);
        self.flock = flock;
        Ok(())
    }
}
