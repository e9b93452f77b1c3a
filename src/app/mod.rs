//! Tunnel viewer app
//!
//! This module contains the egui app that runs on both native and WASM platforms.

mod canvas;
mod diagnostics;
mod header;
mod settings;

use eframe::egui;
use tracing::info;

use crate::core::{RenderStats, TickReport, TunnelConfig, World};
use crate::theme::{colors, tunnel_visuals};
use crate::time::{now_seconds, RateMeter};

/// Tunnel viewer - runs on both native and WASM
pub struct TunnelApp {
    /// Chain + viewpoint
    pub(crate) world: World,
    /// Live-tunable parameters, read fresh every tick
    pub(crate) config: TunnelConfig,
    /// FPS counter
    pub(crate) fps_counter: RateMeter,
    /// Show settings sidebar
    pub(crate) show_settings: bool,
    /// Freeze the simulation (rendering continues)
    pub(crate) paused: bool,
    /// Most recent tick outcome
    pub(crate) last_report: TickReport,
    /// Most recent render counters
    pub(crate) last_render: RenderStats,
    /// Internal: timestamp of last 1-second stats tick
    diag_last_tick: f64,
}

impl TunnelApp {
    pub fn new(cc: &eframe::CreationContext<'_>, config: TunnelConfig) -> Self {
        cc.egui_ctx.set_visuals(tunnel_visuals());

        let world = World::new(&config);
        info!(seed = world.seed(), "Tunnel started");

        Self {
            world,
            config,
            fps_counter: RateMeter::default(),
            show_settings: true,
            paused: false,
            last_report: TickReport::default(),
            last_render: RenderStats::default(),
            diag_last_tick: 0.0,
        }
    }

    /// Restart the tunnel from a single root ring with the current config
    pub(crate) fn restart(&mut self) {
        self.world.reset(&self.config);
        self.last_report = TickReport::default();
        info!(seed = self.world.seed(), "Tunnel restarted");
    }
}

impl eframe::App for TunnelApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Request continuous repaint: one tick per rendered frame
        ctx.request_repaint();
        self.fps_counter.tick();

        // Periodic stats (~1s)
        let now = now_seconds();
        if now - self.diag_last_tick >= 1.0 {
            let stats = self.world.stats();
            info!(
                fps = format!("{:.0}", self.fps_counter.rate()),
                rings = self.world.chain().len(),
                z = format!("{:.1}", self.world.viewpoint().z),
                ticks = stats.ticks,
                rebases = stats.rebases,
                "stats"
            );
            self.diag_last_tick = now;
        }

        egui::TopBottomPanel::top("header")
            .frame(egui::Frame::new().fill(colors::BG_ELEVATED).inner_margin(4.0))
            .show(ctx, |ui| {
                self.render_header(ui);
            });

        // Settings sidebar (must be shown before CentralPanel)
        if self.show_settings {
            self.render_settings(ctx);
        }

        self.draw_diagnostics(ctx);

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(colors::BG_PRIMARY))
            .show(ctx, |ui| {
                self.render_tunnel(ui);
            });
    }
}
