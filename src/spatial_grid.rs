/*
 * Spatial Grid Module
 *
 * This module defines the SpatialGrid struct for efficient neighbor lookups.
 * It divides the world into a uniform grid of buckets holding boid indices,
 * so a neighbor query only scans the 3x3 window around a point instead of
 * the whole population.
 *
 * The grid is toroidal on both paths: insertion and query wrap bucket
 * coordinates modulo the grid dimensions. Bucket dimensions are fixed at
 * construction; bucket contents are rebuilt every tick.
 */

use crate::vector::Vec2;

pub struct SpatialGrid {
    cols: usize,
    rows: usize,
    // Effective bucket extent; never smaller than the requested cell size
    cell_width: f32,
    cell_height: f32,
    // Row-major buckets of indices into the agent arena
    cells: Vec<Vec<usize>>,
    // Distinct column/row offsets visited by a query
    col_offsets: Vec<isize>,
    row_offsets: Vec<isize>,
}

impl SpatialGrid {
    pub fn new(width: f32, height: f32, cell_size: f32) -> Self {
        let (cols, rows) = Self::bucket_counts(width, height, cell_size);

        Self {
            cols,
            rows,
            cell_width: width / cols as f32,
            cell_height: height / rows as f32,
            cells: vec![Vec::new(); cols * rows],
            col_offsets: window_offsets(cols),
            row_offsets: window_offsets(rows),
        }
    }

    // Round the bucket count down so every bucket is at least one cell wide.
    // Float to usize casts saturate, so huge extents stay finite here.
    pub fn bucket_counts(width: f32, height: f32, cell_size: f32) -> (usize, usize) {
        let cols = ((width / cell_size).floor() as usize).max(1);
        let rows = ((height / cell_size).floor() as usize).max(1);
        (cols, rows)
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cell_extent(&self) -> Vec2 {
        Vec2::new(self.cell_width, self.cell_height)
    }

    // Number of indices currently stored across all buckets
    pub fn len(&self) -> usize {
        self.cells.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Vec::is_empty)
    }

    // Bucket coordinates of a point, wrapped onto the torus
    #[inline]
    pub fn cell_coords(&self, position: Vec2) -> (usize, usize) {
        let cx = (position.x / self.cell_width).floor() as i64;
        let cy = (position.y / self.cell_height).floor() as i64;
        (
            cx.rem_euclid(self.cols as i64) as usize,
            cy.rem_euclid(self.rows as i64) as usize,
        )
    }

    #[inline]
    fn cell_index(&self, cx: usize, cy: usize) -> usize {
        cy * self.cols + cx
    }

    // Clear the grid, keeping bucket allocations for the next rebuild
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.clear();
        }
    }

    // Insert a boid index into the bucket containing `position`
    #[inline]
    pub fn insert(&mut self, index: usize, position: Vec2) {
        let (cx, cy) = self.cell_coords(position);
        let cell = self.cell_index(cx, cy);
        self.cells[cell].push(index);
    }

    /// Indices from the 3x3 bucket window around `point`, at most
    /// `max_results` of them.
    pub fn query(&self, point: Vec2, max_results: usize) -> Vec<usize> {
        let mut result = Vec::with_capacity(max_results.min(self.len()));
        self.query_into(point, max_results, &mut result);
        result
    }

    /// Allocation-free variant of [`SpatialGrid::query`]: `out` is cleared and
    /// refilled. Truncation follows bucket order (rows, then columns, then
    /// insertion order) and is silent.
    pub fn query_into(&self, point: Vec2, max_results: usize, out: &mut Vec<usize>) {
        out.clear();
        if max_results == 0 {
            return;
        }

        let (cx, cy) = self.cell_coords(point);
        let cols = self.cols as isize;
        let rows = self.rows as isize;

        for &dy in &self.row_offsets {
            let y = (cy as isize + dy).rem_euclid(rows) as usize;

            for &dx in &self.col_offsets {
                let x = (cx as isize + dx).rem_euclid(cols) as usize;
                let bucket = &self.cells[self.cell_index(x, y)];

                let room = max_results - out.len();
                if bucket.len() >= room {
                    out.extend_from_slice(&bucket[..room]);
                    return;
                }
                out.extend_from_slice(bucket);
            }
        }
    }
}

// Offsets covering the 3x3 window; narrow grids would otherwise visit the
// same bucket more than once after wrapping
fn window_offsets(dim: usize) -> Vec<isize> {
    if dim >= 3 {
        vec![-1, 0, 1]
    } else {
        (0..dim as isize).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::World;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn bucket_count_rounds_down() {
        let grid = SpatialGrid::new(1220.0, 800.0, 50.0);
        assert_eq!(grid.cols(), 24);
        assert_eq!(grid.rows(), 16);
        assert!(grid.cell_extent().x >= 50.0);
    }

    #[test]
    fn insertion_wraps_out_of_bounds_points() {
        let mut grid = SpatialGrid::new(200.0, 200.0, 50.0);
        assert_eq!(grid.cell_coords(Vec2::new(200.0, 0.0)), (0, 0));
        assert_eq!(grid.cell_coords(Vec2::new(-1.0, 201.0)), (3, 0));

        grid.insert(0, Vec2::new(-10.0, -10.0));
        assert_eq!(grid.len(), 1);
        assert_eq!(grid.query(Vec2::new(190.0, 190.0), 8), vec![0]);
    }

    #[test]
    fn clear_empties_every_bucket() {
        let mut grid = SpatialGrid::new(300.0, 300.0, 50.0);
        for i in 0..20 {
            grid.insert(i, Vec2::new(i as f32 * 14.0, i as f32 * 9.0));
        }
        assert!(!grid.is_empty());
        grid.clear();
        assert!(grid.is_empty());
        assert!(grid.query(Vec2::new(100.0, 100.0), 64).is_empty());
    }

    #[test]
    fn query_wraps_across_world_edges() {
        let mut grid = SpatialGrid::new(500.0, 500.0, 50.0);
        grid.insert(0, Vec2::new(495.0, 495.0));
        grid.insert(1, Vec2::new(250.0, 250.0));

        let found = grid.query(Vec2::new(5.0, 5.0), 64);
        assert_eq!(found, vec![0]);
    }

    #[test]
    fn query_is_superset_of_true_neighbors() {
        let world = World::new(1210.0, 790.0);
        let cell = 50.0;
        let mut grid = SpatialGrid::new(world.width, world.height, cell);
        let mut rng = StdRng::seed_from_u64(11);

        let points: Vec<Vec2> = (0..2000)
            .map(|_| Vec2::new(rng.gen_range(0.0..world.width), rng.gen_range(0.0..world.height)))
            .collect();
        for (i, p) in points.iter().enumerate() {
            grid.insert(i, *p);
        }

        for _ in 0..200 {
            let q = Vec2::new(rng.gen_range(0.0..world.width), rng.gen_range(0.0..world.height));
            let found = grid.query(q, usize::MAX);
            for (i, p) in points.iter().enumerate() {
                if world.wrapped_diff(*p, q).length() < cell {
                    assert!(found.contains(&i), "point {i} within {cell} of {q:?} missing");
                }
            }
        }
    }

    #[test]
    fn query_truncates_deterministically() {
        let mut grid = SpatialGrid::new(500.0, 500.0, 50.0);
        for i in 0..10 {
            grid.insert(i, Vec2::new(260.0, 260.0));
        }

        let first = grid.query(Vec2::new(260.0, 260.0), 4);
        assert_eq!(first, vec![0, 1, 2, 3]);
        assert_eq!(grid.query(Vec2::new(260.0, 260.0), 4), first);
        assert!(grid.query(Vec2::new(260.0, 260.0), 0).is_empty());
    }

    #[test]
    fn narrow_grid_visits_each_bucket_once() {
        let mut grid = SpatialGrid::new(80.0, 80.0, 50.0);
        assert_eq!((grid.cols(), grid.rows()), (1, 1));
        grid.insert(0, Vec2::new(10.0, 10.0));
        grid.insert(1, Vec2::new(70.0, 70.0));

        let mut found = grid.query(Vec2::new(40.0, 40.0), 64);
        found.sort_unstable();
        assert_eq!(found, vec![0, 1]);
    }
}
