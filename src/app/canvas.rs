//! Tunnel canvas: ticks the world and paints its quads with egui

use eframe::egui;

use crate::core::{Point2, QuadSink, Rgba};
use super::TunnelApp;

/// Paints quads as convex polygons, offset by `origin`
struct PainterSink<'a> {
    painter: &'a egui::Painter,
    origin: egui::Pos2,
}

#[inline]
fn color32(c: Rgba) -> egui::Color32 {
    egui::Color32::from_rgba_unmultiplied(c.r, c.g, c.b, c.a)
}

impl QuadSink for PainterSink<'_> {
    fn quad(&mut self, corners: [Point2; 4], fill: Rgba, stroke: Rgba, stroke_width: f64) {
        let points = corners
            .iter()
            .map(|p| self.origin + egui::vec2(p.x as f32, p.y as f32))
            .collect();
        self.painter.add(egui::Shape::convex_polygon(
            points,
            color32(fill),
            egui::Stroke::new(stroke_width as f32, color32(stroke)),
        ));
    }
}

impl TunnelApp {
    /// Fill the panel with the tunnel. Resizing only moves the centre.
    pub(crate) fn render_tunnel(&mut self, ui: &mut egui::Ui) {
        let available = ui.available_size();
        let (response, painter) = ui.allocate_painter(available, egui::Sense::hover());
        let rect = response.rect;

        let viewport = self.world.viewport();
        if viewport.width != rect.width() as f64 || viewport.height != rect.height() as f64 {
            self.world.resize(rect.width() as f64, rect.height() as f64);
        }

        if self.paused {
            let mut sink = PainterSink {
                painter: &painter,
                origin: rect.center(),
            };
            self.last_render = self.world.render(&self.config, &mut sink);
        } else {
            // frame() centres on the viewport itself
            let mut sink = PainterSink {
                painter: &painter,
                origin: rect.min,
            };
            let (report, render) = self.world.frame(&self.config, &mut sink);
            self.last_report = report;
            self.last_render = render;
        }
    }
}
