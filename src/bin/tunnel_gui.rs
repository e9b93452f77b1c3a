//! Native tunnel viewer
//!
//! Run with: cargo run --features native --bin tunnel-gui
//! Config: JSON file named by ZTUNNEL_CONFIG (defaults otherwise).

use eframe::egui;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};
use ztunnel::app::TunnelApp;
use ztunnel::core::TunnelConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ztunnel=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = TunnelConfig::from_env()?;
    info!(
        env_set = std::env::var(ztunnel::core::CONFIG_ENV).is_ok(),
        "Config resolved"
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("ztunnel"),
        ..Default::default()
    };

    eframe::run_native(
        "ztunnel",
        options,
        Box::new(move |cc| Ok(Box::new(TunnelApp::new(cc, config)))),
    )?;
    Ok(())
}
