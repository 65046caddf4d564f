/*
 * Camera Module
 *
 * This module defines the Camera struct that maps between simulation space
 * (origin top-left, y down, [0, width] x [0, height]) and nannou's window
 * space (origin centre, y up). The world is fitted to the window and can be
 * zoomed with the mouse wheel.
 */

use nannou::prelude::*;

use crate::vector::Vec2 as WorldVec;
use crate::world::World;

pub struct Camera {
    pub world: World,
    pub zoom: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Camera {
    pub fn new(world: World) -> Self {
        Self {
            world,
            zoom: 1.0,
            min_zoom: 0.25,
            max_zoom: 8.0,
        }
    }

    // Pixels per world unit
    pub fn scale(&self, window_rect: Rect) -> f32 {
        let fit = f32::min(window_rect.w() / self.world.width, window_rect.h() / self.world.height);
        fit * self.zoom
    }

    // Convert a point from world space to screen space
    pub fn world_to_screen(&self, point: WorldVec, window_rect: Rect) -> Point2 {
        let scale = self.scale(window_rect);
        pt2(
            (point.x - self.world.width / 2.0) * scale + window_rect.x(),
            (self.world.height / 2.0 - point.y) * scale + window_rect.y(),
        )
    }

    // Convert a point from screen space to world space
    pub fn screen_to_world(&self, point: Point2, window_rect: Rect) -> WorldVec {
        let scale = self.scale(window_rect);
        WorldVec::new(
            (point.x - window_rect.x()) / scale + self.world.width / 2.0,
            self.world.height / 2.0 - (point.y - window_rect.y()) / scale,
        )
    }

    // Handle mouse wheel events for zooming
    pub fn zoom_by(&mut self, scroll: f32) {
        let zoom_factor = 1.0 + scroll * 0.1;
        self.zoom = (self.zoom * zoom_factor).clamp(self.min_zoom, self.max_zoom);
    }

    pub fn reset(&mut self) {
        self.zoom = 1.0;
    }
}
