/*
 * Interaction Module
 *
 * Turns pointer and touch gestures into mesh operations. Mouse and touch
 * input are both reduced to the same three events, already expressed in
 * render-surface coordinates.
 */

use nannou::prelude::*;
use tracing::debug;

use crate::colony::Colony;
use crate::mesh::ConstraintMesh;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Start(Vec2),
    Move(Vec2),
    End,
}

// Grab the nearest particle within reach, unless a drag is already running
pub fn start_drag(mesh: &mut ConstraintMesh, point: Vec2) -> Option<usize> {
    if mesh.drag().is_some() {
        return None;
    }
    let index = mesh.nearest_particle(point)?;
    mesh.grab(index).then(|| {
        debug!(index, x = point.x, y = point.y, "drag started");
        index
    })
}

pub fn move_drag(mesh: &mut ConstraintMesh, point: Vec2) {
    mesh.drag_to(point);
}

// Let go of the mesh; the recoil may throw ants off
pub fn end_drag(mesh: &mut ConstraintMesh, colony: &mut Colony) {
    if let Some(index) = mesh.release() {
        let flung = colony.fling_on_release(mesh);
        debug!(index, flung, "drag released");
    }
}

pub fn handle(event: PointerEvent, mesh: &mut ConstraintMesh, colony: &mut Colony) {
    match event {
        PointerEvent::Start(point) => {
            start_drag(mesh, point);
        }
        PointerEvent::Move(point) => move_drag(mesh, point),
        PointerEvent::End => end_drag(mesh, colony),
    }
}
