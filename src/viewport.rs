/*
 * Viewport Module
 *
 * The simulation lives on a fixed render surface (500 x 500 by default)
 * with its origin in the top-left corner and y pointing down. nannou windows
 * put the origin in the centre with y pointing up. The viewport converts
 * between the two and scales the surface uniformly to fit the window.
 */

use nannou::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub surface: Vec2,
    pub scale: f32,
}

impl Viewport {
    pub fn new(surface: Vec2) -> Self {
        Self {
            surface,
            scale: 1.0,
        }
    }

    // Refit the surface into the window, keeping its aspect ratio
    pub fn fit(&mut self, window_rect: Rect) {
        let scale = (window_rect.w() / self.surface.x).min(window_rect.h() / self.surface.y);
        if scale.is_finite() && scale > 0.0 {
            self.scale = scale;
        }
    }

    // Convert a point from surface space to window space
    pub fn surface_to_window(&self, point: Vec2) -> Vec2 {
        let centred = point - self.surface / 2.0;
        vec2(centred.x, -centred.y) * self.scale
    }

    // Convert a point from window space to surface space
    pub fn window_to_surface(&self, point: Vec2) -> Vec2 {
        let unscaled = point / self.scale;
        vec2(unscaled.x, -unscaled.y) + self.surface / 2.0
    }
}
