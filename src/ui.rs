/*
 * UI Module
 *
 * The egui control panel: the grid size slider that configures the mesh,
 * a pause toggle, the debug overlay toggle and live statistics.
 * Parameter change detection is handled by the SimulationParams struct.
 */

use nannou_egui::{egui, Egui};

use crate::debug::DebugInfo;
use crate::params::SimulationParams;

// Run the panel; returns (grid_size_changed, any_ui_changed)
pub fn update_ui(
    egui: &mut Egui,
    params: &mut SimulationParams,
    debug_info: &DebugInfo,
) -> (bool, bool) {
    params.take_snapshot();

    let ctx = egui.begin_frame();

    egui::Window::new("Ant Mesh")
        .default_pos([10.0, 10.0])
        .show(&ctx, |ui| {
            ui.add(
                egui::Slider::new(&mut params.grid_size, SimulationParams::get_grid_size_range())
                    .text("Grid Size"),
            );

            ui.separator();

            ui.label(format!("FPS: {:.1}", debug_info.fps));
            ui.label(format!("Ants: {}", debug_info.ants));
            ui.label(format!("Still for: {:.1} s", debug_info.still_for.as_secs_f32()));

            ui.checkbox(&mut params.show_debug, "Show Debug Info");
            ui.checkbox(&mut params.pause_simulation, "Pause Simulation");
        });

    params.detect_changes()
}

// Draw debug information on the canvas
pub fn draw_debug_info(draw: &nannou::Draw, debug_info: &DebugInfo, window_rect: nannou::geom::Rect) {
    let margin = 20.0;
    let line_height = 20.0;
    let lines = debug_info.lines();
    let panel_width = 260.0;
    let panel_height = line_height * lines.len() as f32 + margin;
    let panel_x = window_rect.right() - panel_width / 2.0;
    let panel_y = window_rect.top() - panel_height / 2.0;

    draw.rect()
        .x_y(panel_x, panel_y)
        .w_h(panel_width, panel_height)
        .color(nannou::color::rgba(0.0, 0.0, 0.0, 0.7));

    let text_x = window_rect.right() - panel_width + margin;
    let text_y = window_rect.top() - margin;

    for (i, text) in lines.iter().enumerate() {
        let y = text_y - (i as f32 * line_height);
        draw.text(text)
            .x_y(text_x + 100.0, y)
            .w(panel_width - margin)
            .left_justify()
            .color(nannou::color::WHITE)
            .font_size(14);
    }
}
