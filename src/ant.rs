/*
 * Ant Module
 *
 * This module defines the Ant struct and its per-tick behaviour.
 * Every ant keeps two positions:
 * - `logical`: where it really is on the undistorted plane
 * - `position`: where it is drawn, i.e. `logical` pushed through the
 *   deformed field while the ant walks on the mesh
 *
 * Lifecycle: an ant spawns on a surface edge and walks towards the centre
 * (Approaching) until it steps onto the mesh (Wandering). Slipping off the
 * mesh sends it back towards the centre (Homing) until it is on the mesh
 * again. A recoiling mesh can throw a wandering ant off (Flung), after which
 * it coasts and fades out. Only flung ants ever fade out.
 */

use nannou::prelude::*;
use rand::Rng;
use std::f32::consts::{PI, TAU};

use crate::field::{angle_towards, heading_vector, Bounds, DeformedField};
use crate::params::AntParams;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AntState {
    Approaching,
    Wandering,
    Homing,
    Flung,
}

#[derive(Clone, Debug)]
pub struct Ant {
    pub position: Vec2,
    pub logical: Vec2,
    pub previous: Vec2,
    pub velocity: Vec2,
    // Direction of the last move
    pub heading: f32,
    pub wander_heading: f32,
    pub speed: f32,
    pub size: f32,
    pub max_size: f32,
    pub opacity: f32,
    pub state: AntState,
    // Mesh rectangle as it was when the ant spawned
    pub mesh_bounds: Bounds,
}

impl Ant {
    pub fn new(position: Vec2, heading: f32, mesh_bounds: Bounds, params: &AntParams) -> Self {
        Self {
            position,
            logical: position,
            previous: position,
            velocity: Vec2::ZERO,
            heading,
            wander_heading: heading,
            speed: params.speed,
            size: 0.0,
            max_size: params.max_size,
            opacity: 0.0,
            state: AntState::Approaching,
            mesh_bounds,
        }
    }

    pub fn is_on_grid(&self) -> bool {
        self.state == AntState::Wandering
    }

    pub fn is_alive(&self) -> bool {
        self.opacity > 0.0
    }

    // How far the mesh currently displaces the ant from its logical spot
    pub fn snap_offset(&self) -> Vec2 {
        self.logical - self.position
    }

    // Throw the ant off the mesh with the given initial velocity
    pub fn fling(&mut self, velocity: Vec2) {
        self.state = AntState::Flung;
        self.velocity = velocity;
    }

    // Advance one tick. Returns false once the ant should be retired.
    pub fn update<R: Rng>(
        &mut self,
        field: &DeformedField<'_>,
        centre: Vec2,
        params: &AntParams,
        rng: &mut R,
    ) -> bool {
        if self.state == AntState::Flung {
            self.coast(params);
            return self.is_alive();
        }

        if self.opacity < 1.0 {
            self.opacity = (self.opacity + params.fade_in_step).min(1.0);
            self.size = (self.size + params.growth_step).min(self.max_size);
        }

        let inside = self.mesh_bounds.contains(self.logical);
        match self.state {
            AntState::Approaching | AntState::Homing if inside => {
                self.state = AntState::Wandering;
                self.wander_heading = rng.gen_range(0.0..TAU);
            }
            AntState::Wandering if !inside => {
                self.state = AntState::Homing;
            }
            _ => {}
        }

        if self.state == AntState::Wandering {
            self.wander(field, params, rng);
        } else {
            self.head_to(centre);
        }

        self.is_alive()
    }

    fn coast(&mut self, params: &AntParams) {
        self.position += self.velocity;
        self.velocity *= params.fling_damping;
        self.opacity -= params.fling_fade;
        self.size *= params.fling_shrink;
    }

    fn wander<R: Rng>(&mut self, field: &DeformedField<'_>, params: &AntParams, rng: &mut R) {
        let jitter = params.wander_jitter;
        self.wander_heading += rng.gen_range(-0.5..0.5) * jitter;
        self.heading = self.wander_heading;

        // Steering away from an edge takes effect from the next step
        let margin = params.boundary_margin;
        let bounds = self.mesh_bounds;
        if self.logical.x < bounds.left + margin {
            self.wander_heading = 0.0;
        } else if self.logical.x > bounds.right - margin {
            self.wander_heading = PI;
        }
        if self.logical.y < bounds.top + margin {
            self.wander_heading = PI / 2.0;
        } else if self.logical.y > bounds.bottom - margin {
            self.wander_heading = -PI / 2.0;
        }

        self.logical += heading_vector(self.heading) * self.speed;

        let deformed = field.deformed_position(self.logical);
        self.previous = self.position;
        self.velocity = deformed - self.previous;
        self.position = deformed;
    }

    // Straight line towards `target` on the undistorted plane
    fn head_to(&mut self, target: Vec2) {
        let remaining = self.logical.distance(target);
        if remaining <= 0.0 {
            return;
        }

        self.heading = angle_towards(self.logical, target);
        let step = heading_vector(self.heading) * self.speed.min(remaining);
        self.logical += step;
        self.position += step;
        self.previous = self.position;
    }
}
