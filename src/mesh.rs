/*
 * Constraint Mesh Module
 *
 * This module owns the particle grid and the sticks between neighbours.
 * Each tick the mesh is advanced in three steps:
 * 1. Damped Verlet inertia plus a spring pull back towards the rest grid
 * 2. A "pinch" that drags particles near the grabbed particle towards it
 * 3. A fixed number of Gauss-Seidel passes over the stick constraints
 *
 * Pinned particles are positioned from outside (by the pointer) and are
 * skipped by all three steps, though they still anchor their sticks.
 */

use nannou::prelude::*;
use tracing::debug;

use crate::field::{Bounds, DeformedField, GridLayout};
use crate::params::MeshParams;
use crate::particle::{Particle, Stick};

pub struct ConstraintMesh {
    pub layout: GridLayout,
    pub params: MeshParams,
    pub particles: Vec<Particle>,
    pub sticks: Vec<Stick>,
    // Index of the particle currently held by the pointer
    drag: Option<usize>,
}

impl ConstraintMesh {
    pub fn new(grid_size: usize, surface: Vec2, params: MeshParams) -> Self {
        let layout = GridLayout::centered(grid_size, params.spacing, surface);
        let size = layout.size;

        let mut particles = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                particles.push(Particle::at_rest(layout.rest_position(col, row)));
            }
        }

        let mut sticks = Vec::with_capacity(2 * size * size.saturating_sub(1));
        for row in 0..size {
            for col in 0..size.saturating_sub(1) {
                sticks.push(Stick::new(
                    layout.index(col, row),
                    layout.index(col + 1, row),
                    params.spacing,
                ));
            }
        }
        for row in 0..size.saturating_sub(1) {
            for col in 0..size {
                sticks.push(Stick::new(
                    layout.index(col, row),
                    layout.index(col, row + 1),
                    params.spacing,
                ));
            }
        }

        debug!(grid_size, sticks = sticks.len(), "built constraint mesh");

        Self {
            layout,
            params,
            particles,
            sticks,
            drag: None,
        }
    }

    pub fn field(&self) -> DeformedField<'_> {
        DeformedField::new(&self.layout, &self.particles)
    }

    pub fn bounds(&self) -> Bounds {
        self.layout.bounds()
    }

    pub fn drag(&self) -> Option<usize> {
        self.drag
    }

    // Advance the mesh by one tick
    pub fn integrate(&mut self) {
        self.apply_inertia();
        self.relax_constraints();
    }

    // Inertia, return-to-rest and pinch, without constraint relaxation
    pub fn apply_inertia(&mut self) {
        let damping = self.params.damping;
        let return_force = self.params.return_force;
        let pinch_radius = self.params.pinch_radius;
        let pinch_scale = self.params.pinch_strength * self.params.pinch_gain;
        let drag_point = self.drag.map(|index| self.particles[index].position);

        for p in &mut self.particles {
            if p.pinned {
                // The pointer owns this particle; only forget its last move
                p.previous = p.position;
                continue;
            }

            let velocity = (p.position - p.previous) * damping;
            p.previous = p.position;
            p.position += velocity;

            p.position += (p.rest - p.position) * return_force;

            if let Some(target) = drag_point {
                let to_drag = target - p.position;
                let dist = to_drag.length();
                if dist > 0.0 && dist < pinch_radius {
                    let falloff = 1.0 - dist / pinch_radius;
                    // Displacement is proportional to the remaining distance
                    p.position += to_drag * (falloff * falloff * pinch_scale);
                }
            }
        }
    }

    pub fn relax_constraints(&mut self) {
        for _ in 0..self.params.relaxation_passes {
            for stick in &self.sticks {
                stick.satisfy(&mut self.particles);
            }
        }
    }

    // Sum of all stick errors, used to watch relaxation quality
    pub fn constraint_error(&self) -> f32 {
        self.sticks.iter().map(|s| s.error(&self.particles)).sum()
    }

    // True when every particle sits within epsilon (Manhattan) of rest
    pub fn is_still(&self) -> bool {
        let epsilon = self.params.stillness_epsilon;
        self.particles.iter().all(|p| p.displacement() <= epsilon)
    }

    // Closest particle strictly inside the capture radius
    pub fn nearest_particle(&self, point: Vec2) -> Option<usize> {
        let mut closest = None;
        let mut min_dist = self.params.capture_radius;
        for (i, p) in self.particles.iter().enumerate() {
            let dist = p.position.distance(point);
            if dist < min_dist {
                min_dist = dist;
                closest = Some(i);
            }
        }
        closest
    }

    // Pin a particle and make it the drag target. Refused while another drag
    // is active.
    pub fn grab(&mut self, index: usize) -> bool {
        if self.drag.is_some() || index >= self.particles.len() {
            return false;
        }
        self.particles[index].pinned = true;
        self.drag = Some(index);
        true
    }

    // Move the dragged particle to the pointer. `previous` is left alone so
    // the release velocity covers every move since the last tick.
    pub fn drag_to(&mut self, point: Vec2) {
        if let Some(index) = self.drag {
            self.particles[index].position = point;
        }
    }

    // Unpin the dragged particle, returning its index
    pub fn release(&mut self) -> Option<usize> {
        let index = self.drag.take()?;
        self.particles[index].pinned = false;
        Some(index)
    }

    // Implied velocity of a particle over the last step
    pub fn velocity_at(&self, index: usize) -> Vec2 {
        self.particles
            .get(index)
            .map(Particle::velocity)
            .unwrap_or(Vec2::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mesh(size: usize) -> ConstraintMesh {
        ConstraintMesh::new(size, vec2(500.0, 500.0), MeshParams::default())
    }

    fn max_rest_distance(mesh: &ConstraintMesh) -> f32 {
        mesh.particles
            .iter()
            .map(|p| p.position.distance(p.rest))
            .fold(0.0, f32::max)
    }

    #[test]
    fn builds_axis_aligned_sticks_only() {
        let mesh = mesh(18);
        assert_eq!(mesh.particles.len(), 18 * 18);
        assert_eq!(mesh.sticks.len(), 2 * 18 * 17);
        for stick in &mesh.sticks {
            let a = mesh.particles[stick.a].rest;
            let b = mesh.particles[stick.b].rest;
            assert!((a.distance(b) - 22.0).abs() < 1e-3);
            assert!(a.x == b.x || a.y == b.y);
        }
        assert!(mesh.is_still());
    }

    #[test]
    fn undisturbed_mesh_stays_put() {
        let mut mesh = mesh(12);
        for _ in 0..100 {
            mesh.integrate();
        }
        assert!(max_rest_distance(&mesh) < 1e-3);
        assert!(mesh.is_still());
    }

    // Neighbouring particles overshoot each other, so distance to rest is not
    // monotone per tick; the peak over each window is.
    #[test]
    fn displaced_mesh_returns_to_rest() {
        let mut mesh = mesh(12);
        let centre = mesh.layout.index(6, 6);
        mesh.particles[centre].position += vec2(15.0, -10.0);
        mesh.particles[mesh.layout.index(2, 9)].position += vec2(-8.0, 6.0);
        assert!(!mesh.is_still());

        // The spring is underdamped, so compare the envelope per window
        let mut previous_peak = f32::INFINITY;
        for _ in 0..8 {
            let mut peak: f32 = 0.0;
            for _ in 0..120 {
                mesh.integrate();
                peak = peak.max(max_rest_distance(&mesh));
            }
            assert!(peak <= previous_peak + 1e-4);
            previous_peak = peak;
        }

        assert!(max_rest_distance(&mesh) < 0.05);
        assert!(mesh.is_still());
    }

    // Gauss-Seidel passes share endpoints, so a single stick's error can grow
    // while a neighbour is corrected; the sum still falls.
    #[test]
    fn relaxation_reduces_total_error() {
        let mut mesh = mesh(6);
        mesh.particles[mesh.layout.index(5, 5)].position += vec2(5.0, 5.0);
        mesh.particles[mesh.layout.index(2, 3)].position += vec2(-9.0, 4.0);

        let before = mesh.constraint_error();
        mesh.relax_constraints();
        let after = mesh.constraint_error();

        assert!(after < before, "{after} >= {before}");
    }

    #[test]
    fn pinned_particle_holds_drag_position() {
        let mut mesh = mesh(18);
        let index = mesh.layout.index(4, 4);
        assert!(mesh.grab(index));

        let target = vec2(300.0, 40.0);
        mesh.drag_to(target);
        for _ in 0..30 {
            mesh.integrate();
            assert_eq!(mesh.particles[index].position, target);
        }
        assert!(!mesh.is_still());
    }

    #[test]
    fn pinch_pulls_neighbours_towards_drag() {
        let mut mesh = mesh(18);
        let index = mesh.layout.index(9, 9);
        let neighbour = mesh.layout.index(11, 9);
        let far = mesh.layout.index(0, 0);
        mesh.grab(index);
        mesh.drag_to(mesh.particles[index].rest + vec2(0.0, -40.0));

        let before = mesh.particles[neighbour].position;
        mesh.apply_inertia();
        let after = mesh.particles[neighbour].position;

        assert!(after.y < before.y);
        assert_eq!(mesh.particles[far].position, mesh.particles[far].rest);
    }

    #[test]
    fn single_drag_only() {
        let mut mesh = mesh(10);
        assert!(mesh.grab(0));
        assert!(!mesh.grab(5));
        assert!(!mesh.particles[5].pinned);
        assert_eq!(mesh.release(), Some(0));
        assert!(!mesh.particles[0].pinned);
        assert_eq!(mesh.release(), None);
    }

    #[test]
    fn nearest_particle_respects_capture_radius() {
        let mesh = mesh(18);
        let rest = mesh.particles[mesh.layout.index(3, 7)].rest;
        assert_eq!(
            mesh.nearest_particle(rest + vec2(4.0, 3.0)),
            Some(mesh.layout.index(3, 7))
        );
        assert_eq!(mesh.nearest_particle(vec2(5.0, 5.0)), None);
    }

    #[test]
    fn release_velocity_is_pointer_motion_since_last_tick() {
        let mut mesh = mesh(10);
        mesh.grab(0);
        mesh.drag_to(vec2(40.0, 40.0));
        mesh.integrate();
        assert_eq!(mesh.velocity_at(0), Vec2::ZERO);

        mesh.drag_to(vec2(43.0, 44.0));
        mesh.release();
        assert_eq!(mesh.velocity_at(0), vec2(3.0, 4.0));
    }

    #[test]
    fn release_velocity_sums_moves_between_ticks() {
        let mut mesh = mesh(10);
        let start = mesh.particles[0].rest;
        mesh.grab(0);
        mesh.integrate();
        assert_eq!(mesh.velocity_at(0), Vec2::ZERO);

        for step in 1..=5 {
            mesh.drag_to(start + vec2(step as f32, 0.0));
        }
        mesh.release();

        assert_eq!(mesh.velocity_at(0), vec2(5.0, 0.0));
    }

    #[test]
    fn release_velocity_restarts_each_tick() {
        let mut mesh = mesh(10);
        let start = mesh.particles[0].rest;
        mesh.grab(0);
        mesh.drag_to(start + vec2(10.0, 0.0));
        mesh.integrate();
        mesh.drag_to(start + vec2(12.0, 1.0));
        mesh.drag_to(start + vec2(14.0, 2.0));
        mesh.release();

        assert_eq!(mesh.velocity_at(0), vec2(4.0, 2.0));
    }
}
