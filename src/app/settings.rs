//! Settings sidebar: live tuning of every tunnel parameter

use eframe::egui;
use crate::core::config::TUNING_BOUNDS;
use crate::theme::colors;
use super::TunnelApp;

/// Slider label for a tunable field
fn label(field: &str) -> &'static str {
    match field {
        "speed" => "Speed",
        "node_interval" => "Node interval",
        "focal_length" => "Focal length",
        "view_distance" => "View distance",
        "tunnel_size" => "Base size",
        "rotation_speed" => "Rotation",
        "color_shift" => "Color shift",
        "initial_hue" => "Initial hue",
        "scale_factor" => "Scale factor",
        "noise_scale" => "Noise scale",
        "void_probability" => "Void chance",
        "camera_smoothing" => "Camera smoothing",
        _ => "?",
    }
}

/// Decimals shown for a field; scale factor needs the fine digits
fn decimals(field: &str) -> usize {
    match field {
        "scale_factor" => 5,
        "noise_scale" => 4,
        "rotation_speed" | "void_probability" | "camera_smoothing" => 3,
        _ => 1,
    }
}

impl TunnelApp {
    pub(crate) fn render_settings(&mut self, ctx: &egui::Context) {
        let default_width = ctx.screen_rect().width() * 0.2;
        egui::SidePanel::left("settings")
            .default_width(default_width)
            .min_width(240.0)
            .resizable(true)
            .frame(egui::Frame::new().fill(colors::BG_ELEVATED).inner_margin(8.0))
            .show(ctx, |ui| {
                let group_frame = egui::Frame::new()
                    .stroke(egui::Stroke::new(1.0, colors::TEXT_MUTED.gamma_multiply(0.6)))
                    .corner_radius(4.0)
                    .inner_margin(6.0);

                group_frame.show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(egui::RichText::new("Tunnel:").color(colors::TEXT_MUTED));

                    let full_width = ui.available_width();
                    ui.spacing_mut().slider_width = full_width;

                    for (field, range) in TUNING_BOUNDS {
                        let digits = decimals(field);
                        let Some(value) = self.config.field_mut(field) else {
                            continue;
                        };
                        ui.add_space(4.0);
                        ui.label(
                            egui::RichText::new(format!("{}: {:.*}", label(field), digits, *value))
                                .color(colors::TEXT_SECONDARY),
                        );
                        let response = ui.add(
                            egui::Slider::new(value, range.clone())
                                .clamping(egui::SliderClamping::Always)
                                .show_value(false),
                        );
                        if response.double_clicked() {
                            self.config.reset_field(field);
                        }
                    }

                    ui.add_space(4.0);
                    ui.label(
                        egui::RichText::new("Base size and initial hue apply on restart")
                            .color(colors::TEXT_MUTED)
                            .small(),
                    );
                });

                ui.add_space(8.0);

                group_frame.show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(egui::RichText::new("Seed:").color(colors::TEXT_MUTED));
                    ui.label(
                        egui::RichText::new(format!("{}", self.world.seed()))
                            .color(colors::TEXT_SECONDARY)
                            .monospace(),
                    );
                    let mut pinned = self.config.seed.is_some();
                    if ui.checkbox(&mut pinned, "Replay this seed on restart").changed() {
                        self.config.seed = pinned.then(|| self.world.seed());
                    }
                    if ui.button("Restart").clicked() {
                        self.restart();
                    }
                });
            });
    }
}
