// src/ui.rs
use egui;

/// Toggles the control panel edits; the app applies them before drawing.
pub struct UiState {
    pub outline: bool,
    pub shapes: Vec<(&'static str, bool)>,
}

pub fn build_ui(ctx: &egui::Context, state: &mut UiState) {
    egui::Window::new("Shapes")
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
        .resizable(false)
        .show(ctx, |ui| {
            ui.vertical(|ui| {
                ui.checkbox(&mut state.outline, "Outline only");
                ui.separator();
                for (label, visible) in state.shapes.iter_mut() {
                    ui.checkbox(visible, *label);
                }
            });
        });
}
