/*
 * Input Module
 *
 * This module handles user input events for the ant mesh exhibit.
 * Mouse and touch gestures are converted from window space into
 * render-surface space and forwarded to the simulation as pointer events.
 *
 * Features:
 * - Grabbing and dragging the mesh with the left mouse button
 * - The same with a single finger; extra fingers are ignored
 * - Leaving the window counts as letting go
 * - Clicks on the UI panel never reach the mesh
 */

use nannou::event::TouchEvent;
use nannou::prelude::*;
use nannou::winit::event::{MouseButton, TouchPhase};

use crate::app::Model;
use crate::interaction::PointerEvent;

fn send(model: &mut Model, event: PointerEvent) {
    model.simulation.handle_pointer(event);
}

// Mouse moved event handler
pub fn mouse_moved(_app: &App, model: &mut Model, pos: Point2) {
    model.mouse_position = pos;
    if model.simulation.is_dragging() {
        let point = model.viewport.window_to_surface(pos);
        send(model, PointerEvent::Move(point));
    }
}

// Mouse pressed event handler
pub fn mouse_pressed(_app: &App, model: &mut Model, button: MouseButton) {
    if button != MouseButton::Left || model.egui.ctx().is_pointer_over_area() {
        return;
    }
    let point = model.viewport.window_to_surface(model.mouse_position);
    send(model, PointerEvent::Start(point));
}

// Mouse released event handler
pub fn mouse_released(_app: &App, model: &mut Model, button: MouseButton) {
    if button == MouseButton::Left {
        send(model, PointerEvent::End);
    }
}

pub fn mouse_exited(_app: &App, model: &mut Model) {
    send(model, PointerEvent::End);
}

// Touch handler; only the first finger down drives the mesh
pub fn touch(_app: &App, model: &mut Model, touch: TouchEvent) {
    let point = model.viewport.window_to_surface(touch.position);
    match touch.phase {
        TouchPhase::Started if model.active_touch.is_none() => {
            model.active_touch = Some(touch.id);
            send(model, PointerEvent::Start(point));
        }
        TouchPhase::Moved if model.active_touch == Some(touch.id) => {
            send(model, PointerEvent::Move(point));
        }
        TouchPhase::Ended | TouchPhase::Cancelled if model.active_touch == Some(touch.id) => {
            model.active_touch = None;
            send(model, PointerEvent::End);
        }
        _ => {}
    }
}

// Handle raw window events for egui
pub fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}
