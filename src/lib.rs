/*
 * Ant Mesh Exhibit - Module Definitions
 *
 * A deformable sheet of particles held together by distance constraints,
 * pinched and dragged with the pointer, with small ants that wander across
 * the deformed surface and get flung off when the sheet snaps back.
 */

// Re-export key components for easier access
pub use ant::{Ant, AntState};
pub use colony::Colony;
pub use debug::DebugInfo;
pub use error::ConfigError;
pub use field::{Bounds, DeformedField, GridLayout};
pub use interaction::PointerEvent;
pub use mesh::ConstraintMesh;
pub use params::{AntParams, MeshParams, SimulationParams};
pub use particle::{Particle, Stick};
pub use simulation::{Simulation, TickContext};
pub use viewport::Viewport;
pub use app::Model;

// Define modules
pub mod ant;
pub mod app;
pub mod colony;
pub mod debug;
pub mod error;
pub mod field;
pub mod input;
pub mod interaction;
pub mod mesh;
pub mod params;
pub mod particle;
pub mod renderer;
pub mod simulation;
pub mod ui;
pub mod viewport;
