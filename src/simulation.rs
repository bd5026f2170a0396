/*
 * Simulation Module
 *
 * The simulation context for one mounted exhibit. It owns the mesh, the ant
 * colony and the parameters, and exposes the two entry points a host needs:
 * `tick` once per display refresh and `handle_pointer` for input.
 *
 * Within a tick the order is fixed: mesh integration and relaxation first,
 * then the ants, which read the mesh as it stands after this tick. Rendering
 * happens afterwards from the host's view callback.
 */

use std::time::Duration;

use nannou::prelude::*;
use tracing::info;

use crate::colony::Colony;
use crate::error::ConfigError;
use crate::interaction::{self, PointerEvent};
use crate::mesh::ConstraintMesh;
use crate::params::SimulationParams;

// Timing handed to each tick by the host scheduler
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickContext {
    // Wall-clock time since the exhibit was mounted
    pub elapsed: Duration,
}

impl TickContext {
    pub fn at(elapsed: Duration) -> Self {
        Self { elapsed }
    }
}

pub struct Simulation {
    pub params: SimulationParams,
    pub mesh: ConstraintMesh,
    pub colony: Colony,
    ticks: u64,
}

impl Simulation {
    pub fn new(params: SimulationParams) -> Result<Self, ConfigError> {
        params.validate()?;
        let colony = Colony::new(params.ants, surface_of(&params));
        Ok(Self::assemble(params, colony))
    }

    // Same as `new` but with reproducible ant randomness
    pub fn with_seed(params: SimulationParams, seed: u64) -> Result<Self, ConfigError> {
        params.validate()?;
        let colony = Colony::with_seed(params.ants, surface_of(&params), seed);
        Ok(Self::assemble(params, colony))
    }

    fn assemble(params: SimulationParams, colony: Colony) -> Self {
        let mesh = ConstraintMesh::new(params.grid_size, surface_of(&params), params.mesh);
        info!(
            grid_size = params.grid_size,
            width = params.surface_width,
            height = params.surface_height,
            "simulation mounted"
        );
        Self {
            params,
            mesh,
            colony,
            ticks: 0,
        }
    }

    pub fn surface(&self) -> Vec2 {
        surface_of(&self.params)
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    // Rebuild the particle grid from scratch for a new grid size. Any drag in
    // progress is dropped; live ants carry on with their old mesh rectangle.
    pub fn set_grid_size(&mut self, grid_size: usize) -> Result<(), ConfigError> {
        let previous = self.params.grid_size;
        self.params.grid_size = grid_size;
        if let Err(err) = self.params.validate() {
            self.params.grid_size = previous;
            return Err(err);
        }

        self.mesh = ConstraintMesh::new(grid_size, self.surface(), self.params.mesh);
        info!(from = previous, to = grid_size, "mesh rebuilt");
        Ok(())
    }

    pub fn tick(&mut self, ctx: TickContext) {
        self.mesh.integrate();
        self.colony.update(&self.mesh, ctx.elapsed);
        self.ticks += 1;
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) {
        interaction::handle(event, &mut self.mesh, &mut self.colony);
    }

    pub fn is_dragging(&self) -> bool {
        self.mesh.drag().is_some()
    }
}

fn surface_of(params: &SimulationParams) -> Vec2 {
    vec2(params.surface_width, params.surface_height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_params() {
        let mut params = SimulationParams::default();
        params.grid_size = 0;
        assert!(matches!(
            Simulation::new(params),
            Err(ConfigError::GridTooSmall(0))
        ));
    }

    #[test]
    fn grid_resize_rebuilds_mesh() {
        let mut sim = Simulation::with_seed(SimulationParams::default(), 1).unwrap();
        assert_eq!(sim.mesh.particles.len(), 18 * 18);

        sim.set_grid_size(10).unwrap();
        assert_eq!(sim.params.grid_size, 10);
        assert_eq!(sim.mesh.particles.len(), 100);
        assert_eq!(sim.mesh.sticks.len(), 2 * 10 * 9);
    }

    #[test]
    fn bad_grid_resize_keeps_old_mesh() {
        let mut sim = Simulation::with_seed(SimulationParams::default(), 1).unwrap();
        assert_eq!(sim.set_grid_size(1), Err(ConfigError::GridTooSmall(1)));
        assert_eq!(sim.params.grid_size, 18);
        assert_eq!(sim.mesh.particles.len(), 18 * 18);
    }

    #[test]
    fn resize_drops_active_drag() {
        let mut sim = Simulation::with_seed(SimulationParams::default(), 1).unwrap();
        let point = sim.mesh.particles[0].rest;
        sim.handle_pointer(PointerEvent::Start(point));
        assert!(sim.is_dragging());

        sim.set_grid_size(12).unwrap();
        assert!(!sim.is_dragging());
        sim.handle_pointer(PointerEvent::End);
        sim.tick(TickContext::default());
    }

    #[test]
    fn tick_counts() {
        let mut sim = Simulation::with_seed(SimulationParams::default(), 1).unwrap();
        for i in 0..5 {
            sim.tick(TickContext::at(Duration::from_millis(i * 16)));
        }
        assert_eq!(sim.ticks(), 5);
        assert!(sim.colony.is_still());
    }
}
