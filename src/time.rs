//! Platform-agnostic time utilities
//!
//! Elapsed seconds since app start, plus a sliding-window rate meter used
//! for the fps readout and the CLI tick rate.

#[cfg(all(target_arch = "wasm32", feature = "wasm"))]
pub fn now_seconds() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now() / 1000.0)
        .unwrap_or(0.0)
}

#[cfg(not(all(target_arch = "wasm32", feature = "wasm")))]
pub fn now_seconds() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64()
}

/// Events per second over the last `window` samples
#[derive(Debug, Clone)]
pub struct RateMeter {
    stamps: std::collections::VecDeque<f64>,
    window: usize,
}

impl RateMeter {
    pub fn new(window: usize) -> Self {
        Self {
            stamps: std::collections::VecDeque::with_capacity(window + 1),
            window: window.max(2),
        }
    }

    /// Record an event at the current time
    pub fn tick(&mut self) {
        self.record(now_seconds());
    }

    /// Record an event at `t` seconds
    pub fn record(&mut self, t: f64) {
        self.stamps.push_back(t);
        if self.stamps.len() > self.window {
            self.stamps.pop_front();
        }
    }

    pub fn rate(&self) -> f64 {
        let (Some(first), Some(last)) = (self.stamps.front(), self.stamps.back()) else {
            return 0.0;
        };
        let elapsed = last - first;
        if self.stamps.len() < 2 || elapsed <= 0.0 {
            return 0.0;
        }
        (self.stamps.len() as f64 - 1.0) / elapsed
    }
}

impl Default for RateMeter {
    fn default() -> Self {
        Self::new(60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_from_samples() {
        let mut meter = RateMeter::new(10);
        assert_eq!(meter.rate(), 0.0);
        for i in 0..5 {
            meter.record(i as f64 * 0.5);
        }
        assert_eq!(meter.rate(), 2.0);
    }

    #[test]
    fn test_window_slides() {
        let mut meter = RateMeter::new(3);
        // Slow start falls out of the window
        meter.record(0.0);
        meter.record(10.0);
        meter.record(10.1);
        meter.record(10.2);
        assert!((meter.rate() - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_clock_is_monotonic() {
        let a = now_seconds();
        let b = now_seconds();
        assert!(b >= a);
    }
}
