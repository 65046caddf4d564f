/*
 * World Module
 *
 * Bounds of the toroidal world the boids live in. Every edge wraps to the
 * opposite edge, both for motion (boundary wrap at the end of a tick) and
 * for distance math (shortest displacement between two points).
 */

use crate::vector::Vec2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct World {
    pub width: f32,
    pub height: f32,
}

impl World {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    // Shortest displacement from `b` to `a` on the torus, corrected per axis
    #[inline]
    pub fn wrapped_diff(&self, a: Vec2, b: Vec2) -> Vec2 {
        let mut dx = a.x - b.x;
        let mut dy = a.y - b.y;

        let half_width = self.width / 2.0;
        let half_height = self.height / 2.0;

        if dx > half_width {
            dx -= self.width;
        } else if dx < -half_width {
            dx += self.width;
        }

        if dy > half_height {
            dy -= self.height;
        } else if dy < -half_height {
            dy += self.height;
        }

        Vec2::new(dx, dy)
    }

    // Send a position that left [0, width] x [0, height] to the opposite edge.
    // The edge itself is kept; only strictly outside coordinates jump.
    #[inline]
    pub fn wrap_position(&self, position: &mut Vec2) {
        if position.x > self.width {
            position.x = 0.0;
        } else if position.x < 0.0 {
            position.x = self.width;
        }

        if position.y > self.height {
            position.y = 0.0;
        } else if position.y < 0.0 {
            position.y = self.height;
        }
    }

    // Modulo wrap used by the predator, which may overshoot by more than one step
    #[inline]
    pub fn wrap_modulo(&self, position: Vec2) -> Vec2 {
        Vec2::new(wrap_axis(position.x, self.width), wrap_axis(position.y, self.height))
    }

    pub fn contains(&self, position: Vec2) -> bool {
        (0.0..=self.width).contains(&position.x) && (0.0..=self.height).contains(&position.y)
    }

    pub fn half_diagonal(&self) -> f32 {
        Vec2::new(self.width, self.height).length() / 2.0
    }
}

// rem_euclid can round a tiny negative value up to `extent` itself
#[inline]
fn wrap_axis(value: f32, extent: f32) -> f32 {
    let wrapped = value.rem_euclid(extent);
    if wrapped >= extent {
        0.0
    } else {
        wrapped
    }
}
