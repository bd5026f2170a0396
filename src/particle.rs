/*
 * Particle Module
 *
 * Grid particles and the sticks that join axis-adjacent neighbours.
 * Particles are integrated Verlet style: the velocity is implied by the
 * difference between the current and previous positions.
 */

use nannou::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec2,
    pub previous: Vec2,
    pub rest: Vec2,
    pub pinned: bool,
}

impl Particle {
    pub fn at_rest(rest: Vec2) -> Self {
        Self {
            position: rest,
            previous: rest,
            rest,
            pinned: false,
        }
    }

    // Implied velocity of the last step
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.position - self.previous
    }

    // Manhattan distance from the rest position
    #[inline]
    pub fn displacement(&self) -> f32 {
        let offset = (self.position - self.rest).abs();
        offset.x + offset.y
    }
}

// A soft distance constraint between two particles, by index
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stick {
    pub a: usize,
    pub b: usize,
    pub length: f32,
}

impl Stick {
    pub fn new(a: usize, b: usize, length: f32) -> Self {
        Self { a, b, length }
    }

    pub fn current_length(&self, particles: &[Particle]) -> f32 {
        particles[self.a].position.distance(particles[self.b].position)
    }

    // Absolute deviation from the rest length
    pub fn error(&self, particles: &[Particle]) -> f32 {
        (self.current_length(particles) - self.length).abs()
    }

    // Move both endpoints half of the way towards the rest length. Pinned
    // endpoints take no share of the correction.
    pub fn satisfy(&self, particles: &mut [Particle]) {
        let delta = particles[self.b].position - particles[self.a].position;
        let dist = delta.length();
        if dist <= 0.0 {
            return;
        }

        let percent = (self.length - dist) / dist / 2.0;
        let offset = delta * percent;

        if !particles[self.a].pinned {
            particles[self.a].position -= offset;
        }
        if !particles[self.b].pinned {
            particles[self.b].position += offset;
        }
    }
}
