//! Diagnostics overlay showing chain size, generation lag and rebase count

use eframe::egui;
use crate::theme::colors;
use super::TunnelApp;

/// Format a count with human-readable suffix (1234 → "1234", 52000 → "52.0k")
fn format_count(n: u64) -> String {
    if n >= 1_000_000 {
        format!("{:.1}M", n as f64 / 1_000_000.0)
    } else if n >= 10_000 {
        format!("{:.1}k", n as f64 / 1_000.0)
    } else {
        n.to_string()
    }
}

impl TunnelApp {
    pub(crate) fn draw_diagnostics(&self, ctx: &egui::Context) {
        let stats = self.world.stats();
        let chain = self.world.chain();
        let view = self.world.viewpoint();
        let lag = self.last_report.lag;
        let lagging = lag > self.config.node_interval;

        let (indicator, status_text, status_color) = if self.paused {
            ("■", "Paused", colors::TEXT_SECONDARY)
        } else if lagging {
            ("●", "Catching up", colors::WARN)
        } else {
            ("●", "Streaming", colors::OK)
        };
        let title = egui::RichText::new(format!("{} {}", indicator, status_text)).color(status_color);

        egui::Area::new(egui::Id::new("diagnostics_area"))
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-8.0, 36.0))
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(colors::BG_OVERLAY)
                    .corner_radius(4.0)
                    .inner_margin(8.0)
                    .show(ui, |ui| {
                        ui.set_min_width(220.0);
                        egui::CollapsingHeader::new(title)
                            .default_open(false)
                            .show(ui, |ui| {
                                let line = |ui: &mut egui::Ui, text: String| {
                                    ui.label(egui::RichText::new(text).color(colors::TEXT_MUTED));
                                };
                                line(ui, format!("{} rings ({} drawn, {} culled)",
                                    chain.len(), self.last_render.segments, self.last_render.culled));
                                line(ui, format!("root z {:.1} / frontier z {:.1}",
                                    chain.root().z, chain.frontier().z));
                                line(ui, format!("camera ({:.1}, {:.1}, {:.1})", view.x, view.y, view.z));
                                line(ui, format!("horizon lag {:.1}", lag));
                                line(ui, format!("{} ticks", format_count(stats.ticks)));
                                line(ui, format!("{} generated / {} pruned",
                                    format_count(stats.generated), format_count(stats.pruned)));
                                line(ui, format!("{} rebases", stats.rebases));
                            });
                    });
            });
    }
}
