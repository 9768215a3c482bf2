// src/ui.rs

/// Everything the overlay needs from the last tick, in physical pixels.
#[derive(Debug, Clone, Default)]
pub struct HudState {
    pub distance_text: String,
    pub status: String,
    pub ortho_size: f32,
    pub panel_visible: bool,
    pub object_marker: Option<(egui::Pos2, f32)>,
    pub recent_intents: Vec<String>,
}

const MARKER_COLOR: egui::Color32 = egui::Color32::from_rgb(240, 170, 40);

pub fn build_ui(ctx: &egui::Context, hud: &HudState) {
    if let Some((center, radius)) = hud.object_marker {
        let ppp = ctx.pixels_per_point();
        let painter = ctx.layer_painter(egui::LayerId::background());
        painter.circle_filled(
            egui::pos2(center.x / ppp, center.y / ppp),
            (radius / ppp).max(2.0),
            MARKER_COLOR,
        );
    }

    egui::Window::new("AR Gestures")
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(10.0, 10.0))
        .resizable(false)
        .show(ctx, |ui| {
            ui.vertical(|ui| {
                ui.heading(hud.distance_text.as_str());
                ui.label(hud.status.as_str());
                ui.label(format!("Ortho size: {:.2}", hud.ortho_size));
                ui.separator();

                ui.label("Touch / mouse:");
                ui.label("   Tap: place object on the ground");
                ui.label("   Drag: move object, rotate camera");
                ui.label("   Pinch: scale object, zoom camera");
                ui.label("   Triple tap: sink and remove object");
                ui.label("   Right click / P: show info panel");
                ui.label("   Escape: quit");

                if !hud.recent_intents.is_empty() {
                    ui.separator();
                    for line in &hud.recent_intents {
                        ui.monospace(line.as_str());
                    }
                }
            });
        });

    if hud.panel_visible {
        egui::Window::new("Info")
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-10.0, 10.0))
            .resizable(false)
            .show(ctx, |ui| {
                ui.label("Object information panel");
            });
    }
}
