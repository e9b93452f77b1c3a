//! World state: chain + viewpoint, advanced one tick per frame
//!
//! Tick order: advance viewpoint -> locate guide -> smooth camera ->
//! grow (at most one ring) -> prune -> rebase (at most once) -> render.
//! Chain invariants hold at every tick boundary.

use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, trace};

use super::camera::{find_guide, Viewpoint};
use super::chain::{Ring, RingChain};
use super::config::TunnelConfig;
use super::generator::Generator;
use super::noise::ValueNoise;
use super::projector::Point2;
use super::renderer::{render_chain, QuadSink, RenderStats, Rgba};

/// Mixed into the seed so noise and void draws use unrelated streams
const NOISE_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// What happened during one tick
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickReport {
    pub appended: bool,
    pub pruned: usize,
    pub rebased: bool,
    /// Distance the frontier trails the view horizon
    pub lag: f64,
}

/// Cumulative counters since the last reset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WorldStats {
    pub ticks: u64,
    pub generated: u64,
    pub pruned: u64,
    pub rebases: u64,
}

/// Canvas dimensions. Only affects where the tunnel centre lands on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

impl Viewport {
    pub fn center(&self) -> Point2 {
        Point2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// A broken chain invariant
#[derive(Clone, Debug, PartialEq)]
pub enum InvariantViolation {
    /// Consecutive rings out of order
    NotIncreasing { index: usize, z: f64, next_z: f64 },
    /// Gap between consecutive rings differs from the node interval
    Spacing { index: usize, gap: f64, expected: f64 },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvariantViolation::NotIncreasing { index, z, next_z } => {
                write!(f, "ring {} at z={} is not before its successor at z={}", index, z, next_z)
            }
            InvariantViolation::Spacing { index, gap, expected } => {
                write!(f, "ring {} gap {} != node interval {}", index, gap, expected)
            }
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// The streaming tunnel: owns the chain, the viewpoint and the random source
pub struct World {
    chain: RingChain,
    view: Viewpoint,
    generator: Generator,
    rng: StdRng,
    viewport: Viewport,
    stats: WorldStats,
    seed: u64,
}

impl World {
    /// Fresh world: a single root ring at the origin
    pub fn new(config: &TunnelConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        debug!(seed, "World created");
        Self {
            chain: RingChain::new(Ring::root(0.0, config.tunnel_size, config.initial_hue)),
            view: Viewpoint::default(),
            generator: Generator::new(Box::new(ValueNoise::new(seed ^ NOISE_SEED_SALT))),
            rng: StdRng::seed_from_u64(seed),
            viewport: Viewport::default(),
            stats: WorldStats::default(),
            seed,
        }
    }

    /// Discard every ring and restart from a new root. A configured seed
    /// replays the same tunnel; otherwise a fresh one is drawn.
    pub fn reset(&mut self, config: &TunnelConfig) {
        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        self.chain = RingChain::new(Ring::root(0.0, config.tunnel_size, config.initial_hue));
        self.view = Viewpoint::default();
        self.generator.reset();
        self.generator
            .set_noise(Box::new(ValueNoise::new(seed ^ NOISE_SEED_SALT)));
        self.rng = StdRng::seed_from_u64(seed);
        self.stats = WorldStats::default();
        self.seed = seed;
        debug!(seed, "World reset");
    }

    /// Advance one frame's worth of simulation (everything but drawing)
    pub fn tick(&mut self, config: &TunnelConfig) -> TickReport {
        self.view.advance(config.speed);

        let guide = find_guide(&self.chain, self.view.z + config.lookahead);
        self.view.follow(guide, config.camera_smoothing);

        let grown = self
            .generator
            .grow(&mut self.chain, &self.view, config, &mut self.rng);
        let pruned = self.prune(config);
        let rebased = self.maybe_rebase(config);

        self.stats.ticks += 1;
        if grown.appended {
            self.stats.generated += 1;
        }

        trace!(
            tick = self.stats.ticks,
            z = self.view.z,
            rings = self.chain.len(),
            appended = grown.appended,
            pruned,
            "Tick"
        );

        TickReport {
            appended: grown.appended,
            pruned,
            rebased,
            lag: grown.lag,
        }
    }

    /// Tick, then render into `sink` in viewport coordinates
    pub fn frame(&mut self, config: &TunnelConfig, sink: &mut dyn QuadSink) -> (TickReport, RenderStats) {
        let report = self.tick(config);
        let mut centred = Offset {
            inner: sink,
            origin: self.viewport.center(),
        };
        let render = self.render(config, &mut centred);
        (report, render)
    }

    /// Draw the chain with screen coordinates relative to the canvas centre
    pub fn render(&self, config: &TunnelConfig, sink: &mut dyn QuadSink) -> RenderStats {
        render_chain(&self.chain, &self.view, config, sink)
    }

    /// Drop rings that have fallen more than two intervals behind the
    /// viewpoint. The frontier is never removed.
    pub fn prune(&mut self, config: &TunnelConfig) -> usize {
        let cutoff = self.view.z - 2.0 * config.node_interval;
        let mut removed = 0;
        while self.chain.root().z < cutoff {
            if self.chain.pop_root().is_none() {
                break;
            }
            removed += 1;
        }
        self.stats.pruned += removed as u64;
        removed
    }

    /// Rebase once if the viewpoint has passed the threshold
    pub fn maybe_rebase(&mut self, config: &TunnelConfig) -> bool {
        if self.view.z > config.rebase_threshold {
            self.rebase(config.rebase_threshold);
            true
        } else {
            false
        }
    }

    /// Subtract `offset` from the viewpoint and every ring along the travel
    /// axis. Structure and relative distances are unchanged.
    pub fn rebase(&mut self, offset: f64) {
        self.view.z -= offset;
        for ring in self.chain.iter_mut() {
            ring.z -= offset;
        }
        self.stats.rebases += 1;
        debug!(
            offset,
            z = self.view.z,
            rings = self.chain.len(),
            rebases = self.stats.rebases,
            "Origin rebased"
        );
    }

    /// Viewport resize. Tunnel state is untouched.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport = Viewport { width, height };
    }

    /// Verify ordering and spacing along the chain.
    ///
    /// Spacing is checked against the current `node_interval`; after a live
    /// interval change this reports until the older rings are pruned.
    pub fn check_invariants(&self, config: &TunnelConfig) -> Result<(), InvariantViolation> {
        for (index, (ring, next)) in self.chain.segments().enumerate() {
            if next.z <= ring.z {
                return Err(InvariantViolation::NotIncreasing {
                    index,
                    z: ring.z,
                    next_z: next.z,
                });
            }
            let gap = next.z - ring.z;
            let tolerance = 1e-9 * ring.z.abs().max(next.z.abs()).max(1.0);
            if (gap - config.node_interval).abs() > tolerance {
                return Err(InvariantViolation::Spacing {
                    index,
                    gap,
                    expected: config.node_interval,
                });
            }
        }
        Ok(())
    }

    pub fn chain(&self) -> &RingChain {
        &self.chain
    }

    pub fn viewpoint(&self) -> &Viewpoint {
        &self.view
    }

    /// Direct viewpoint access for tests and tooling
    pub fn viewpoint_mut(&mut self) -> &mut Viewpoint {
        &mut self.view
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn stats(&self) -> WorldStats {
        self.stats
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

/// Shifts centre-relative points into viewport space
struct Offset<'a> {
    inner: &'a mut dyn QuadSink,
    origin: Point2,
}

impl QuadSink for Offset<'_> {
    fn quad(&mut self, corners: [Point2; 4], fill: Rgba, stroke: Rgba, stroke_width: f64) {
        let shifted = corners.map(|c| Point2::new(c.x + self.origin.x, c.y + self.origin.y));
        self.inner.quad(shifted, fill, stroke, stroke_width);
    }
}
