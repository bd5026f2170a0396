/*
 * Application Module
 *
 * This module defines the nannou model for the ant mesh exhibit: window
 * creation, the per-frame update and the wiring of input callbacks. The
 * simulation itself knows nothing about nannou's scheduling; the update
 * callback simply calls `Simulation::tick` once per frame with the time
 * elapsed since the exhibit was mounted.
 */

use nannou::prelude::*;
use nannou::winit::window::CursorIcon;
use nannou_egui::Egui;
use tracing::warn;

use crate::debug::DebugInfo;
use crate::input;
use crate::params::SimulationParams;
use crate::renderer::view;
use crate::simulation::{Simulation, TickContext};
use crate::ui;
use crate::viewport::Viewport;

// Main model for the application
pub struct Model {
    pub window_id: WindowId,
    pub simulation: Simulation,
    // UI-facing copy of the parameters, pushed into the simulation on change
    pub params: SimulationParams,
    pub egui: Egui,
    pub debug_info: DebugInfo,
    pub viewport: Viewport,
    pub mouse_position: Vec2,
    // Touch currently driving the drag, if any
    pub active_touch: Option<u64>,
    pub cursor_grabbing: bool,
}

// Initialize the model
pub fn model(app: &App) -> Model {
    let params = SimulationParams::default();

    // Leave some room around the surface for the controls
    let window_width = params.surface_width + 200.0;
    let window_height = params.surface_height + 100.0;

    let window_id = app
        .new_window()
        .title("Ant Mesh")
        .size(window_width as u32, window_height as u32)
        .view(view)
        .mouse_moved(input::mouse_moved)
        .mouse_pressed(input::mouse_pressed)
        .mouse_released(input::mouse_released)
        .mouse_exited(input::mouse_exited)
        .touch(input::touch)
        .raw_event(input::raw_window_event)
        .build()
        .expect("Failed to build window");

    let window = app.window(window_id).expect("Window vanished after creation");
    window.set_cursor_icon(CursorIcon::Grab);
    let egui = Egui::from_window(&window);

    let simulation = Simulation::new(params.clone()).expect("Default parameters are invalid");
    let mut viewport = Viewport::new(simulation.surface());
    viewport.fit(window.rect());

    Model {
        window_id,
        simulation,
        params,
        egui,
        debug_info: DebugInfo::default(),
        viewport,
        mouse_position: Vec2::ZERO,
        active_touch: None,
        cursor_grabbing: false,
    }
}

// Update the model
pub fn update(app: &App, model: &mut Model, update: Update) {
    model.debug_info.fps = app.fps();
    model.debug_info.frame_time = update.since_last;
    model.egui.set_elapsed_time(update.since_start);

    let (grid_size_changed, _) = ui::update_ui(&mut model.egui, &mut model.params, &model.debug_info);

    if grid_size_changed {
        if let Err(err) = model.simulation.set_grid_size(model.params.grid_size) {
            warn!(%err, "keeping previous grid size");
            model.params.grid_size = model.simulation.params.grid_size;
        }
    }

    if let Some(window) = app.window(model.window_id) {
        model.viewport.fit(window.rect());
    }

    if !model.params.pause_simulation {
        model.simulation.tick(TickContext::at(update.since_start));
    }

    model.debug_info.refresh(&model.simulation, update.since_start);
    update_cursor(app, model);
}

fn update_cursor(app: &App, model: &mut Model) {
    let grabbing = model.simulation.is_dragging();
    if grabbing == model.cursor_grabbing {
        return;
    }
    if let Some(window) = app.window(model.window_id) {
        window.set_cursor_icon(if grabbing {
            CursorIcon::Grabbing
        } else {
            CursorIcon::Grab
        });
        model.cursor_grabbing = grabbing;
    }
}
