//! Generator: extends the chain ahead of the viewpoint

use rand::Rng;
use tracing::{trace, warn};

use super::camera::Viewpoint;
use super::chain::{Ring, RingChain};
use super::config::TunnelConfig;
use super::noise::{map_range, NoiseField};

/// Derive the ring that follows `prev`.
///
/// Lateral offsets come from two noise samples at the new `z` (the Y sample
/// shifted in the noise domain). With `noise_scale == 0` every sample hits
/// the same point and the tunnel runs straight.
pub fn next_ring<R: Rng>(
    prev: &Ring,
    config: &TunnelConfig,
    noise: &dyn NoiseField,
    rng: &mut R,
) -> Ring {
    let z = prev.z + config.node_interval;
    let t = z * config.noise_scale;

    let x = map_range(
        noise.sample(t),
        0.0,
        1.0,
        -config.lateral_range_x,
        config.lateral_range_x,
    );
    let y = map_range(
        noise.sample(t + config.noise_y_offset),
        0.0,
        1.0,
        -config.lateral_range_y,
        config.lateral_range_y,
    );

    Ring {
        x,
        y,
        z,
        size: prev.size * config.scale_factor,
        rotation: prev.rotation + config.rotation_speed,
        hue: (prev.hue + config.color_shift).rem_euclid(config.hue_range),
        is_void: rng.gen::<f64>() < config.void_probability,
    }
}

/// Result of one `grow` call
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GrowOutcome {
    /// A ring was appended this tick
    pub appended: bool,
    /// How far the frontier trails the view horizon after this tick (0 when covered)
    pub lag: f64,
}

/// Appends at most one ring per tick while the frontier is inside the view horizon
pub struct Generator {
    noise: Box<dyn NoiseField>,
    prev_lag: f64,
    lagging: bool,
}

impl Generator {
    pub fn new(noise: Box<dyn NoiseField>) -> Self {
        Self {
            noise,
            prev_lag: f64::INFINITY,
            lagging: false,
        }
    }

    /// Grow the chain by at most one ring.
    ///
    /// Fires only while `frontier.z < view.z + view_distance`. When the
    /// viewpoint outruns generation (speed above node interval) the gap
    /// widens; that is reported once per episode rather than bursting.
    pub fn grow<R: Rng>(
        &mut self,
        chain: &mut RingChain,
        view: &Viewpoint,
        config: &TunnelConfig,
        rng: &mut R,
    ) -> GrowOutcome {
        let horizon = view.z + config.view_distance;
        let mut appended = false;

        if chain.frontier().z < horizon {
            let ring = next_ring(chain.frontier(), config, self.noise.as_ref(), rng);
            trace!(z = ring.z, size = ring.size, hue = ring.hue, is_void = ring.is_void, "Ring generated");
            appended = chain.push_frontier(ring);
        }

        let lag = (horizon - chain.frontier().z).max(0.0);
        if lag > config.node_interval && lag > self.prev_lag {
            if !self.lagging {
                warn!(lag, speed = config.speed, node_interval = config.node_interval, "Frontier falling behind view horizon");
                self.lagging = true;
            }
        } else if lag <= config.node_interval {
            self.lagging = false;
        }
        self.prev_lag = lag;

        GrowOutcome { appended, lag }
    }

    /// Forget lag history (after a reset)
    pub fn reset(&mut self) {
        self.prev_lag = f64::INFINITY;
        self.lagging = false;
    }

    /// Replace the noise field
    pub fn set_noise(&mut self, noise: Box<dyn NoiseField>) {
        self.noise = noise;
    }
}
