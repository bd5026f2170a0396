/*
 * Error Module
 *
 * Configuration errors raised when a simulation is built or rebuilt.
 * The per-tick simulation itself has no error path.
 */

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid size {0} is too small, the mesh needs at least 2 particles per side")]
    GridTooSmall(usize),
    #[error("particle spacing {0} must be positive")]
    InvalidSpacing(f32),
    #[error("render surface {width}x{height} must have a positive area")]
    InvalidSurface { width: f32, height: f32 },
    #[error("damping {0} must be between 0.0 and 1.0")]
    InvalidDamping(f32),
    #[error("at least one constraint relaxation pass is required")]
    NoRelaxationPasses,
    #[error("fling snap distance {0} must be positive")]
    InvalidFlingSnap(f32),
}
