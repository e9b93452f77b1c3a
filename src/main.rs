//! Headless tunnel runner
//!
//! Drives the world at a fixed frame rate without a window and logs stats.
//! Run with: cargo run --features cli --bin tunnel-cli -- [--ticks N] [--fps N] [--check]
//! Config: JSON file named by ZTUNNEL_CONFIG (defaults otherwise).

use std::time::Duration;

use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};
use ztunnel::core::{QuadList, TunnelConfig, World};
use ztunnel::time::RateMeter;

/// Command-line options
struct Options {
    /// Stop after this many ticks (run until Ctrl-C otherwise)
    ticks: Option<u64>,
    /// Target tick rate
    fps: f64,
    /// Verify chain invariants after every tick
    check: bool,
}

fn parse_args() -> Result<Options, Box<dyn std::error::Error>> {
    let mut options = Options {
        ticks: None,
        fps: 60.0,
        check: false,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--ticks" => {
                let value = args.next().ok_or("--ticks needs a value")?;
                options.ticks = Some(value.parse()?);
            }
            "--fps" => {
                let value = args.next().ok_or("--fps needs a value")?;
                options.fps = value.parse()?;
                if !(options.fps > 0.0) {
                    return Err("--fps must be positive".into());
                }
            }
            "--check" => options.check = true,
            other => return Err(format!("unknown argument: {}", other).into()),
        }
    }
    Ok(options)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,ztunnel=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let options = parse_args()?;
    let config = TunnelConfig::from_env()?;

    let mut world = World::new(&config);
    info!(
        seed = world.seed(),
        speed = config.speed,
        node_interval = config.node_interval,
        view_distance = config.view_distance,
        "Tunnel started"
    );

    let mut frame_interval = tokio::time::interval(Duration::from_secs_f64(1.0 / options.fps));
    frame_interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
    let mut stats_interval = tokio::time::interval(Duration::from_secs(5));
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut quads = QuadList::new();
    let mut tick_rate = RateMeter::new(120);

    loop {
        tokio::select! {
            _ = frame_interval.tick() => {
                quads.clear();
                let (report, render) = world.frame(&config, &mut quads);
                tick_rate.tick();

                if options.check {
                    if let Err(violation) = world.check_invariants(&config) {
                        let message = violation.to_string();
                        error!(tick = world.stats().ticks, violation = %message, "Invariant broken");
                        return Err(violation.into());
                    }
                }
                if report.rebased {
                    info!(z = world.viewpoint().z, rings = world.chain().len(), "Origin rebased");
                }
                tracing::trace!(quads = quads.len(), culled = render.culled, "Frame rendered");

                if options.ticks.is_some_and(|limit| world.stats().ticks >= limit) {
                    break;
                }
            }
            _ = stats_interval.tick() => {
                let stats = world.stats();
                info!(
                    ticks = stats.ticks,
                    tick_rate = format!("{:.1}", tick_rate.rate()),
                    rings = world.chain().len(),
                    z = format!("{:.1}", world.viewpoint().z),
                    generated = stats.generated,
                    pruned = stats.pruned,
                    rebases = stats.rebases,
                    quads = quads.len(),
                    "stats"
                );
            }
            _ = &mut ctrl_c => {
                info!("Interrupted");
                break;
            }
        }
    }

    let stats = world.stats();
    info!(
        ticks = stats.ticks,
        generated = stats.generated,
        pruned = stats.pruned,
        rebases = stats.rebases,
        rings = world.chain().len(),
        "Finished"
    );
    Ok(())
}
