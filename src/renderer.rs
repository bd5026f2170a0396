/*
 * Renderer Module
 *
 * This module handles the rendering of the ant mesh exhibit.
 * Every frame the surface is cleared, each stick is stroked as a thin line
 * between its two particles, and each ant is filled as a circle with its
 * own opacity. Drawing goes through the `Canvas` trait so the paint step can
 * run without a window; `DrawCanvas` adapts it to nannou's `Draw`.
 */

use nannou::prelude::*;
use tracing::warn;

use crate::app::Model;
use crate::simulation::Simulation;
use crate::ui;
use crate::viewport::Viewport;

pub const EDGE_WEIGHT: f32 = 1.0;

pub fn background_colour() -> Rgb<u8> {
    rgb(255, 255, 255)
}

pub fn edge_colour() -> Rgb<u8> {
    rgb(0xc9, 0xcd, 0xd1)
}

pub fn ant_colour() -> Rgb<u8> {
    rgb(0x37, 0x41, 0x51)
}

// A 2D surface the paint step can draw on, in render-surface coordinates
pub trait Canvas {
    fn clear(&mut self, colour: Rgb<u8>);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, weight: f32, colour: Rgb<u8>);
    fn fill_circle(&mut self, centre: Vec2, radius: f32, colour: Rgb<u8>, alpha: f32);
}

// Paint the current mesh and ants
pub fn paint<C: Canvas>(sim: &Simulation, canvas: &mut C) {
    canvas.clear(background_colour());

    let particles = &sim.mesh.particles;
    for stick in &sim.mesh.sticks {
        canvas.stroke_line(
            particles[stick.a].position,
            particles[stick.b].position,
            EDGE_WEIGHT,
            edge_colour(),
        );
    }

    for ant in &sim.colony.ants {
        canvas.fill_circle(
            ant.position,
            ant.size.max(0.0),
            ant_colour(),
            ant.opacity.clamp(0.0, 1.0),
        );
    }
}

pub struct DrawCanvas<'a> {
    draw: &'a Draw,
    viewport: &'a Viewport,
}

impl<'a> DrawCanvas<'a> {
    pub fn new(draw: &'a Draw, viewport: &'a Viewport) -> Self {
        Self { draw, viewport }
    }
}

impl Canvas for DrawCanvas<'_> {
    fn clear(&mut self, colour: Rgb<u8>) {
        self.draw.background().color(colour);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, weight: f32, colour: Rgb<u8>) {
        self.draw
            .line()
            .start(self.viewport.surface_to_window(from))
            .end(self.viewport.surface_to_window(to))
            .weight(weight * self.viewport.scale)
            .color(colour);
    }

    fn fill_circle(&mut self, centre: Vec2, radius: f32, colour: Rgb<u8>, alpha: f32) {
        self.draw
            .ellipse()
            .xy(self.viewport.surface_to_window(centre))
            .radius(radius * self.viewport.scale)
            .color(rgba(
                colour.red as f32 / 255.0,
                colour.green as f32 / 255.0,
                colour.blue as f32 / 255.0,
                alpha,
            ));
    }
}

// Render the model
pub fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();

    let mut canvas = DrawCanvas::new(&draw, &model.viewport);
    paint(&model.simulation, &mut canvas);

    if model.params.show_debug {
        ui::draw_debug_info(&draw, &model.debug_info, app.window_rect());
    }

    if let Err(err) = draw.to_frame(app, &frame) {
        warn!(?err, "failed to draw frame");
    }

    if let Err(err) = model.egui.draw_to_frame(&frame) {
        warn!(?err, "failed to draw ui");
    }
}
