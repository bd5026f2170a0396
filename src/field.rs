/*
 * Field Module
 *
 * Geometry shared by the mesh and the ants: the layout of the rest grid in
 * render-surface space, the axis-aligned bounds of that grid, and the
 * deformed-field lookup that maps a logical (rest space) coordinate onto the
 * current, possibly distorted, mesh.
 *
 * Render-surface space has its origin in the top-left corner with y pointing
 * down, so an angle of PI / 2 heads towards the bottom edge.
 */

use nannou::prelude::*;

use crate::particle::Particle;

// Unit vector for a heading angle
#[inline]
pub fn heading_vector(angle: f32) -> Vec2 {
    vec2(angle.cos(), angle.sin())
}

// Heading angle that points from `from` towards `to`
#[inline]
pub fn angle_towards(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

// Axis-aligned rectangle in render-surface space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Bounds {
    // Strict containment: points on the edge are outside
    pub fn contains(&self, point: Vec2) -> bool {
        point.x > self.left && point.x < self.right && point.y > self.top && point.y < self.bottom
    }
}

/// Placement of an N x N particle grid centred on the render surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridLayout {
    pub size: usize,
    pub spacing: f32,
    pub origin: Vec2,
}

impl GridLayout {
    pub fn centered(size: usize, spacing: f32, surface: Vec2) -> Self {
        let extent = size.saturating_sub(1) as f32 * spacing;
        let origin = surface / 2.0 - vec2(extent, extent) / 2.0;
        Self {
            size,
            spacing,
            origin,
        }
    }

    #[inline]
    pub fn index(&self, col: usize, row: usize) -> usize {
        row * self.size + col
    }

    pub fn rest_position(&self, col: usize, row: usize) -> Vec2 {
        self.origin + vec2(col as f32, row as f32) * self.spacing
    }

    // Side length of the rest grid
    pub fn extent(&self) -> f32 {
        self.size.saturating_sub(1) as f32 * self.spacing
    }

    pub fn bounds(&self) -> Bounds {
        let extent = self.extent();
        Bounds {
            left: self.origin.x,
            right: self.origin.x + extent,
            top: self.origin.y,
            bottom: self.origin.y + extent,
        }
    }

    // Fractional grid coordinates of a rest-space point
    #[inline]
    pub fn grid_coords(&self, logical: Vec2) -> Vec2 {
        (logical - self.origin) / self.spacing
    }

    // Index of the grid particle closest to a rest-space point, if the point
    // rounds onto the grid
    pub fn nearest_index(&self, logical: Vec2) -> Option<usize> {
        let coords = self.grid_coords(logical);
        let col = coords.x.round();
        let row = coords.y.round();
        let limit = self.size as f32;
        if col < 0.0 || row < 0.0 || col >= limit || row >= limit {
            return None;
        }
        Some(self.index(col as usize, row as usize))
    }
}

/// Read-only view of the mesh used to warp rest-space coordinates.
#[derive(Clone, Copy)]
pub struct DeformedField<'a> {
    layout: &'a GridLayout,
    particles: &'a [Particle],
}

impl<'a> DeformedField<'a> {
    pub fn new(layout: &'a GridLayout, particles: &'a [Particle]) -> Self {
        Self { layout, particles }
    }

    /// Bilinear interpolation of the four particles enclosing `logical`.
    /// Coordinates outside the grid are returned unchanged.
    pub fn deformed_position(&self, logical: Vec2) -> Vec2 {
        let coords = self.layout.grid_coords(logical);
        let (x0, x1) = (coords.x.floor(), coords.x.ceil());
        let (y0, y1) = (coords.y.floor(), coords.y.ceil());

        let limit = self.layout.size as f32;
        if !(x0 >= 0.0 && y0 >= 0.0 && x1 < limit && y1 < limit) {
            return logical;
        }

        let (x0, x1, y0, y1) = (x0 as usize, x1 as usize, y0 as usize, y1 as usize);
        let corner = |col: usize, row: usize| {
            self.particles
                .get(self.layout.index(col, row))
                .map(|p| p.position)
        };
        let (Some(p00), Some(p10), Some(p01), Some(p11)) =
            (corner(x0, y0), corner(x1, y0), corner(x0, y1), corner(x1, y1))
        else {
            return logical;
        };

        let fx = coords.x - x0 as f32;
        let fy = coords.y - y0 as f32;

        p00 * ((1.0 - fx) * (1.0 - fy))
            + p10 * (fx * (1.0 - fy))
            + p01 * ((1.0 - fx) * fy)
            + p11 * (fx * fy)
    }
}
