/*
 * Simulation Parameters Module
 *
 * This module defines the SimulationParams struct that contains the tunable
 * constants of the ant mesh exhibit. The grid size can be changed through the
 * UI; everything else is fixed at startup. Change detection works the same way
 * as for any slider-driven parameter: snapshot before the UI runs, compare
 * afterwards.
 */

use std::time::Duration;

use crate::error::ConfigError;

// Constants driving the constraint mesh solver
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshParams {
    pub spacing: f32,
    pub damping: f32,
    pub return_force: f32,
    pub pinch_radius: f32,
    pub pinch_strength: f32,
    pub pinch_gain: f32,
    pub relaxation_passes: usize,
    pub capture_radius: f32,
    pub stillness_epsilon: f32,
}

impl Default for MeshParams {
    fn default() -> Self {
        Self {
            spacing: 22.0,
            damping: 0.95,
            return_force: 0.015,
            pinch_radius: 150.0,
            pinch_strength: 0.25,
            pinch_gain: 0.1,
            relaxation_passes: 3,
            capture_radius: 30.0,
            stillness_epsilon: 0.5,
        }
    }
}

// Constants driving ant spawning, wandering and flinging
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AntParams {
    pub stillness_threshold: Duration,
    pub spawn_interval: Duration,
    pub max_ants: usize,
    pub speed: f32,
    pub max_size: f32,
    pub fade_in_step: f32,
    pub growth_step: f32,
    pub wander_jitter: f32,
    pub boundary_margin: f32,
    pub fling_mesh_speed: f32,
    pub fling_snap_distance: f32,
    pub fling_fraction: f32,
    pub fling_damping: f32,
    pub fling_fade: f32,
    pub fling_shrink: f32,
}

impl Default for AntParams {
    fn default() -> Self {
        Self {
            stillness_threshold: Duration::from_millis(2000),
            spawn_interval: Duration::from_millis(800),
            max_ants: 15,
            speed: 0.8,
            max_size: 4.0,
            fade_in_step: 0.02,
            growth_step: 0.1,
            wander_jitter: 0.3,
            boundary_margin: 20.0,
            fling_mesh_speed: 2.0,
            fling_snap_distance: 7.0,
            fling_fraction: 0.3,
            fling_damping: 0.98,
            fling_fade: 0.005,
            fling_shrink: 0.98,
        }
    }
}

pub struct SimulationParams {
    pub grid_size: usize,
    pub surface_width: f32,
    pub surface_height: f32,
    pub mesh: MeshParams,
    pub ants: AntParams,
    pub show_debug: bool,
    pub pause_simulation: bool,

    // Internal state for tracking changes
    previous_values: Option<ParamSnapshot>,
}

// A snapshot of the UI-editable values used for change detection
struct ParamSnapshot {
    grid_size: usize,
    show_debug: bool,
    pause_simulation: bool,
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self {
            grid_size: 18,
            surface_width: 500.0,
            surface_height: 500.0,
            mesh: MeshParams::default(),
            ants: AntParams::default(),
            show_debug: false,
            pause_simulation: false,
            previous_values: None,
        }
    }
}

impl Clone for SimulationParams {
    fn clone(&self) -> Self {
        Self {
            grid_size: self.grid_size,
            surface_width: self.surface_width,
            surface_height: self.surface_height,
            mesh: self.mesh,
            ants: self.ants,
            show_debug: self.show_debug,
            pause_simulation: self.pause_simulation,
            previous_values: None,
        }
    }
}

impl SimulationParams {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < 2 {
            return Err(ConfigError::GridTooSmall(self.grid_size));
        }
        if !(self.mesh.spacing > 0.0) {
            return Err(ConfigError::InvalidSpacing(self.mesh.spacing));
        }
        if !(self.surface_width > 0.0 && self.surface_height > 0.0) {
            return Err(ConfigError::InvalidSurface {
                width: self.surface_width,
                height: self.surface_height,
            });
        }
        if !(0.0..=1.0).contains(&self.mesh.damping) {
            return Err(ConfigError::InvalidDamping(self.mesh.damping));
        }
        if self.mesh.relaxation_passes == 0 {
            return Err(ConfigError::NoRelaxationPasses);
        }
        // Zero would fling ants sitting exactly on their logical spot
        if !(self.ants.fling_snap_distance > 0.0) {
            return Err(ConfigError::InvalidFlingSnap(self.ants.fling_snap_distance));
        }
        Ok(())
    }

    // Take a snapshot of current parameter values for change detection
    pub fn take_snapshot(&mut self) {
        self.previous_values = Some(ParamSnapshot {
            grid_size: self.grid_size,
            show_debug: self.show_debug,
            pause_simulation: self.pause_simulation,
        });
    }

    // Returns (grid_size_changed, any_ui_changed)
    pub fn detect_changes(&self) -> (bool, bool) {
        let Some(prev) = &self.previous_values else {
            return (false, false);
        };

        let grid_size_changed = self.grid_size != prev.grid_size;
        let ui_changed = grid_size_changed
            || self.show_debug != prev.show_debug
            || self.pause_simulation != prev.pause_simulation;

        (grid_size_changed, ui_changed)
    }

    // Range offered by the grid size slider
    pub fn get_grid_size_range() -> std::ops::RangeInclusive<usize> {
        10..=24
    }
}
