/*
 * Vector Module
 *
 * The simulation uses glam's Vec2 as its vector primitive. This module adds
 * the two in-place steering operations the flocking rules lean on:
 * normalize (identity on a zero vector) and limit (magnitude clamp).
 */

pub use glam::Vec2;

// In-place helpers used by every steering rule
pub trait SteeringVector {
    /// Scales the vector to unit length. A zero-length vector is left as is.
    fn normalize_mut(&mut self);

    /// Clamps the magnitude to `max`, keeping the direction.
    fn limit(&mut self, max: f32);

    /// Returns a limited copy.
    fn limited(self, max: f32) -> Self;
}

impl SteeringVector for Vec2 {
    #[inline]
    fn normalize_mut(&mut self) {
        let length = self.length();
        if length > 0.0 {
            *self /= length;
        }
    }

    #[inline]
    fn limit(&mut self, max: f32) {
        if self.length_squared() > max * max {
            self.normalize_mut();
            *self *= max;
        }
    }

    #[inline]
    fn limited(mut self, max: f32) -> Self {
        self.limit(max);
        self
    }
}
