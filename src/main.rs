/*
 * Ant Mesh Exhibit
 *
 * Opens a window with a grid of particles joined by springy sticks. Grab
 * the mesh near a particle and drag to pinch it; let go and it snaps back.
 * Leave it alone for a couple of seconds and ants start wandering in,
 * riding the mesh as it deforms. Snap the mesh hard enough and they fly off.
 *
 * Set RUST_LOG (e.g. `RUST_LOG=ant_mesh=debug`) to see mesh and ant events.
 */

use ant_mesh::app::{model, update};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() {
    init_tracing();
    info!("starting ant mesh exhibit");

    nannou::app(model).update(update).run();
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
