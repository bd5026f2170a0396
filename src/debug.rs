/*
 * Debug Information Module
 *
 * Frame statistics and simulation counters shown in the UI panel and in
 * the optional on-canvas overlay.
 */

use std::time::Duration;

use crate::ant::AntState;
use crate::simulation::Simulation;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct DebugInfo {
    pub fps: f32,
    pub frame_time: Duration,
    pub ticks: u64,
    pub particles: usize,
    pub ants: usize,
    pub wandering_ants: usize,
    pub flung_ants: usize,
    pub still_for: Duration,
    pub dragging: bool,
}

impl DebugInfo {
    pub fn refresh(&mut self, sim: &Simulation, now: Duration) {
        self.ticks = sim.ticks();
        self.particles = sim.mesh.particles.len();
        self.ants = sim.colony.len();
        self.wandering_ants = sim.colony.count_in(AntState::Wandering);
        self.flung_ants = sim.colony.count_in(AntState::Flung);
        self.still_for = sim.colony.stillness(now);
        self.dragging = sim.is_dragging();
    }

    pub fn lines(&self) -> Vec<String> {
        vec![
            format!("FPS: {:.1}", self.fps),
            format!("Frame time: {:.2} ms", self.frame_time.as_secs_f64() * 1000.0),
            format!("Ticks: {}", self.ticks),
            format!("Particles: {}", self.particles),
            format!(
                "Ants: {} ({} wandering, {} flung)",
                self.ants, self.wandering_ants, self.flung_ants
            ),
            format!("Still for: {:.1} s", self.still_for.as_secs_f32()),
            format!("Dragging: {}", if self.dragging { "yes" } else { "no" }),
        ]
    }
}
