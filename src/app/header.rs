//! Header bar with controls and tunnel status

use eframe::egui;
use crate::theme::colors;
use super::TunnelApp;

impl TunnelApp {
    pub(crate) fn render_header(&mut self, ui: &mut egui::Ui) {
        let rings = self.world.chain().len();
        let z = self.world.viewpoint().z;
        let rebases = self.world.stats().rebases;

        ui.horizontal(|ui| {
            // LEFT: controls
            let settings_text = if self.show_settings { "Settings <<<" } else { "Settings >>>" };
            if ui.button(egui::RichText::new(settings_text)).clicked() {
                self.show_settings = !self.show_settings;
            }

            ui.add_space(10.0);

            let pause_text = if self.paused { "Resume" } else { "Pause" };
            if ui.button(pause_text).clicked() {
                self.paused = !self.paused;
            }
            if ui.button("Restart").clicked() {
                self.restart();
            }

            // RIGHT: status (right-to-left order)
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(format!("{} rebases", rebases))
                        .color(colors::TEXT_MUTED),
                );
                ui.label(egui::RichText::new("/").color(colors::TEXT_MUTED));

                ui.label(
                    egui::RichText::new(format!("z {:.1}", z))
                        .color(colors::TEXT_MUTED),
                );
                ui.label(egui::RichText::new("/").color(colors::TEXT_MUTED));

                ui.label(
                    egui::RichText::new(format!("{} rings", rings))
                        .color(colors::TEXT_MUTED),
                );
                ui.label(egui::RichText::new("/").color(colors::TEXT_MUTED));

                ui.label(
                    egui::RichText::new(format!("{:.0} fps", self.fps_counter.rate()))
                        .color(colors::TEXT_SECONDARY),
                );
            });
        });
    }
}
