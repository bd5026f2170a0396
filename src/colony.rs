/*
 * Colony Module
 *
 * Owns the live ants. Once per tick the colony:
 * - checks whether the mesh has come to rest, and for how long
 * - spawns a new ant on a random surface edge when the mesh has been still
 *   long enough, respecting the population cap and the spawn interval
 * - advances every ant and drops the ones that have faded out
 *
 * When the pointer lets go of the mesh, the colony also decides which ants
 * are thrown off by the recoil.
 */

use std::f32::consts::PI;
use std::time::Duration;

use nannou::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::ant::{Ant, AntState};
use crate::mesh::ConstraintMesh;
use crate::params::AntParams;

pub struct Colony {
    pub ants: Vec<Ant>,
    pub params: AntParams,
    surface: Vec2,
    is_still: bool,
    // Elapsed time at which the mesh last became still
    still_since: Option<Duration>,
    last_spawn: Option<Duration>,
    rng: StdRng,
}

impl Colony {
    pub fn new(params: AntParams, surface: Vec2) -> Self {
        Self::with_rng(params, surface, StdRng::from_entropy())
    }

    pub fn with_seed(params: AntParams, surface: Vec2, seed: u64) -> Self {
        Self::with_rng(params, surface, StdRng::seed_from_u64(seed))
    }

    fn with_rng(params: AntParams, surface: Vec2, rng: StdRng) -> Self {
        Self {
            ants: Vec::with_capacity(params.max_ants),
            params,
            surface,
            is_still: false,
            still_since: None,
            last_spawn: None,
            rng,
        }
    }

    pub fn len(&self) -> usize {
        self.ants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ants.is_empty()
    }

    pub fn is_still(&self) -> bool {
        self.is_still
    }

    // How long the mesh has been still, as of `now`
    pub fn stillness(&self, now: Duration) -> Duration {
        match (self.is_still, self.still_since) {
            (true, Some(since)) => now.saturating_sub(since),
            _ => Duration::ZERO,
        }
    }

    pub fn centre(&self) -> Vec2 {
        self.surface / 2.0
    }

    // Run one tick against the mesh as it stands after integration
    pub fn update(&mut self, mesh: &ConstraintMesh, now: Duration) {
        self.track_stillness(mesh.is_still(), now);

        if self.stillness(now) > self.params.stillness_threshold && self.can_spawn(now) {
            self.spawn(mesh);
            self.last_spawn = Some(now);
        }

        let field = mesh.field();
        let centre = self.centre();
        let params = self.params;
        let rng = &mut self.rng;
        self.ants.retain_mut(|ant| {
            let alive = ant.update(&field, centre, &params, &mut *rng);
            if !alive {
                trace!(x = ant.position.x, y = ant.position.y, "ant retired");
            }
            alive
        });
    }

    fn track_stillness(&mut self, still: bool, now: Duration) {
        if still && !self.is_still {
            self.still_since = Some(now);
        }
        self.is_still = still;
    }

    fn can_spawn(&self, now: Duration) -> bool {
        if self.ants.len() >= self.params.max_ants {
            return false;
        }
        match self.last_spawn {
            Some(last) => now.saturating_sub(last) > self.params.spawn_interval,
            None => true,
        }
    }

    // Drop a new ant on a random edge of the surface, facing inwards
    pub fn spawn(&mut self, mesh: &ConstraintMesh) {
        let (width, height) = (self.surface.x, self.surface.y);
        let (position, heading) = match self.rng.gen_range(0..4) {
            0 => (vec2(self.rng.gen_range(0.0..width), 0.0), PI / 2.0),
            1 => (vec2(width, self.rng.gen_range(0.0..height)), PI),
            2 => (vec2(self.rng.gen_range(0.0..width), height), -PI / 2.0),
            _ => (vec2(0.0, self.rng.gen_range(0.0..height)), 0.0),
        };

        debug!(x = position.x, y = position.y, ants = self.ants.len() + 1, "spawned ant");
        self.ants
            .push(Ant::new(position, heading, mesh.bounds(), &self.params));
    }

    // Throw wandering ants off the mesh if it is recoiling fast enough under
    // them and has dragged them far enough from their logical spot
    pub fn fling_on_release(&mut self, mesh: &ConstraintMesh) -> usize {
        let params = self.params;
        let mut flung = 0;

        for ant in self.ants.iter_mut().filter(|ant| ant.is_on_grid()) {
            let Some(index) = mesh.layout.nearest_index(ant.logical) else {
                continue;
            };

            let mesh_speed = mesh.velocity_at(index).length();
            let snap = ant.snap_offset();
            let displacement = snap.length();

            if mesh_speed >= params.fling_mesh_speed
                && displacement >= params.fling_snap_distance
            {
                ant.fling(snap * params.fling_fraction);
                flung += 1;
                debug!(mesh_speed, displacement, "ant flung off the mesh");
            }
        }

        flung
    }

    pub fn count_in(&self, state: AntState) -> usize {
        self.ants.iter().filter(|ant| ant.state == state).count()
    }
}
