// End-to-end scenarios driven through the public `Simulation` surface, the
// same way the nannou host drives it: pointer events plus one tick per frame.

use std::time::Duration;

use ant_mesh::{Ant, AntState, PointerEvent, Simulation, SimulationParams, TickContext};
use nannou::prelude::*;

const FRAME: Duration = Duration::from_micros(16_667);

fn simulation(seed: u64) -> Simulation {
    Simulation::with_seed(SimulationParams::default(), seed).unwrap()
}

// Hold the pointer at `point` for `ticks` frames without advancing the clock
fn hold(sim: &mut Simulation, point: Vec2, ticks: usize) {
    for _ in 0..ticks {
        sim.handle_pointer(PointerEvent::Move(point));
        sim.tick(TickContext::default());
    }
}

#[test]
fn ants_arrive_after_three_seconds_of_stillness() {
    let mut sim = simulation(7);
    let mut now = Duration::ZERO;
    let mut first_spawn = None;

    while now <= Duration::from_millis(3000) {
        sim.tick(TickContext::at(now));
        if first_spawn.is_none() && !sim.colony.is_empty() {
            first_spawn = Some(now);
        }
        now += FRAME;
    }

    let first_spawn = first_spawn.expect("no ant spawned");
    assert!(first_spawn > Duration::from_millis(2000));
    assert!(first_spawn <= Duration::from_millis(2800));
    assert!(sim.colony.len() >= 1);
}

#[test]
fn population_stays_capped_over_a_long_run() {
    let mut sim = simulation(11);
    let mut now = Duration::ZERO;

    while now < Duration::from_secs(60) {
        sim.tick(TickContext::at(now));
        assert!(sim.colony.len() <= sim.params.ants.max_ants);
        now += FRAME;
    }
    assert_eq!(sim.colony.len(), sim.params.ants.max_ants);
}

#[test]
fn dragged_particle_follows_the_pointer_exactly() {
    let mut sim = simulation(1);
    let index = sim.mesh.layout.index(5, 5);
    let start = sim.mesh.particles[index].rest;
    sim.handle_pointer(PointerEvent::Start(start + vec2(3.0, -2.0)));
    assert_eq!(sim.mesh.drag(), Some(index));

    for step in 1..=40 {
        let target = start + vec2(step as f32 * 2.0, step as f32);
        sim.handle_pointer(PointerEvent::Move(target));
        sim.tick(TickContext::default());
        assert_eq!(sim.mesh.particles[index].position, target);
    }
}

#[test]
fn pointer_far_from_mesh_grabs_nothing() {
    let mut sim = simulation(1);
    sim.handle_pointer(PointerEvent::Start(vec2(5.0, 5.0)));
    assert!(!sim.is_dragging());

    sim.handle_pointer(PointerEvent::Move(vec2(250.0, 250.0)));
    sim.tick(TickContext::default());
    assert!(sim.mesh.is_still());
}

#[test]
fn slow_release_after_long_hold_flings_nobody() {
    let mut sim = simulation(3);
    let corner = sim.mesh.particles[0].rest;
    let target = corner + vec2(200.0, 200.0) / 2.0_f32.sqrt();

    sim.handle_pointer(PointerEvent::Start(corner));
    assert_eq!(sim.mesh.drag(), Some(0));
    hold(&mut sim, target, 600);

    let bounds = sim.mesh.bounds();
    let params = sim.colony.params;
    let logicals = [vec2(150.0, 150.0), vec2(120.0, 180.0), vec2(190.0, 110.0)];
    for logical in logicals {
        assert!(logical.distance(target) < sim.params.mesh.pinch_radius);

        let mut riding = Ant::new(logical, 0.0, bounds, &params);
        riding.state = AntState::Wandering;
        riding.opacity = 1.0;
        riding.position = sim.mesh.field().deformed_position(logical);
        sim.colony.ants.push(riding);

        // Far from its logical spot, so only the mesh speed can hold it back
        let mut stretched = Ant::new(logical, 0.0, bounds, &params);
        stretched.state = AntState::Wandering;
        stretched.opacity = 1.0;
        stretched.position = logical - vec2(20.0, 0.0);
        sim.colony.ants.push(stretched);
    }

    sim.handle_pointer(PointerEvent::End);
    assert!(!sim.is_dragging());
    assert!(!sim.mesh.particles[0].pinned);
    assert_eq!(sim.colony.count_in(AntState::Flung), 0);
    assert_eq!(sim.colony.count_in(AntState::Wandering), 6);
}

#[test]
fn mesh_settles_after_release() {
    let mut sim = simulation(5);
    let index = sim.mesh.layout.index(9, 9);
    let rest = sim.mesh.particles[index].rest;

    sim.handle_pointer(PointerEvent::Start(rest));
    hold(&mut sim, rest + vec2(60.0, -40.0), 120);
    assert!(!sim.mesh.is_still());

    sim.handle_pointer(PointerEvent::End);
    for _ in 0..2000 {
        sim.tick(TickContext::default());
    }

    assert!(sim.mesh.is_still());
    let worst = sim
        .mesh
        .particles
        .iter()
        .map(|p| p.position.distance(p.rest))
        .fold(0.0, f32::max);
    assert!(worst < 0.05, "worst displacement {worst}");
}

#[test]
fn field_is_identity_outside_the_grid() {
    let mut sim = simulation(2);
    let index = sim.mesh.layout.index(0, 0);
    sim.handle_pointer(PointerEvent::Start(sim.mesh.particles[index].rest));
    hold(&mut sim, vec2(40.0, 40.0), 30);

    let field = sim.mesh.field();
    for point in [vec2(10.0, 10.0), vec2(480.0, 250.0), vec2(250.0, 495.0)] {
        assert_eq!(field.deformed_position(point), point);
    }
}

#[test]
fn homing_ant_is_never_retired() {
    let mut sim = simulation(9);
    let bounds = sim.mesh.bounds();
    let params = sim.colony.params;
    let mut ant = Ant::new(vec2(2.0, 250.0), 0.0, bounds, &params);
    ant.state = AntState::Homing;
    ant.opacity = 1.0;
    sim.colony.ants.push(ant);

    // Clock held at zero, so no new ants join
    for _ in 0..5000 {
        sim.tick(TickContext::default());
        assert_eq!(sim.colony.len(), 1);
    }

    let ant = &sim.colony.ants[0];
    assert_eq!(ant.opacity, 1.0);
    assert_ne!(ant.state, AntState::Flung);
}

#[test]
fn resizing_the_grid_keeps_ants_alive() {
    let mut sim = simulation(4);
    let mut now = Duration::ZERO;
    while sim.colony.is_empty() {
        sim.tick(TickContext::at(now));
        now += FRAME;
    }

    sim.set_grid_size(24).unwrap();
    assert_eq!(sim.mesh.particles.len(), 24 * 24);
    assert_eq!(sim.colony.len(), 1);

    sim.tick(TickContext::at(now));
    assert!(sim.colony.len() >= 1);
}
