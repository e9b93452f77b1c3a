//! Viewpoint and camera controller

use super::chain::{Ring, RingChain};
use super::noise::lerp;

/// Observer position
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewpoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Viewpoint {
    /// Advance along the travel axis. Negative speed travels backward.
    #[inline]
    pub fn advance(&mut self, speed: f64) {
        self.z += speed;
    }

    /// Move a fraction `smoothing` of the way toward the guide ring's lateral
    /// position. Plain exponential smoothing: overshoot is possible when the
    /// guide jumps between ticks.
    pub fn follow(&mut self, guide: &Ring, smoothing: f64) {
        self.x = lerp(self.x, guide.x, smoothing);
        self.y = lerp(self.y, guide.y, smoothing);
    }
}

/// First ring, walking root to frontier, with `z >= target_z`.
/// Falls back to the frontier when the chain has not grown that far.
pub fn find_guide(chain: &RingChain, target_z: f64) -> &Ring {
    chain
        .iter()
        .find(|ring| ring.z >= target_z)
        .unwrap_or_else(|| chain.frontier())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_with(points: &[(f64, f64, f64)]) -> RingChain {
        let (x, y, z) = points[0];
        let mut chain = RingChain::new(Ring {
            x,
            y,
            ..Ring::root(z, 300.0, 0.0)
        });
        for &(x, y, z) in &points[1..] {
            chain.push_frontier(Ring {
                x,
                y,
                ..Ring::root(z, 300.0, 0.0)
            });
        }
        chain
    }

    #[test]
    fn test_find_guide_first_at_or_beyond() {
        let chain = chain_with(&[(0.0, 0.0, 0.0), (1.0, 0.0, 10.0), (2.0, 0.0, 20.0), (3.0, 0.0, 30.0)]);
        assert_eq!(find_guide(&chain, 15.0).z, 20.0);
        assert_eq!(find_guide(&chain, 20.0).z, 20.0);
        assert_eq!(find_guide(&chain, -100.0).z, 0.0);
    }

    #[test]
    fn test_find_guide_falls_back_to_frontier() {
        let chain = chain_with(&[(0.0, 0.0, 0.0), (5.0, 5.0, 10.0)]);
        let guide = find_guide(&chain, 400.0);
        assert_eq!(guide.z, 10.0);
        assert_eq!(guide.x, 5.0);
    }

    #[test]
    fn test_follow_closes_fraction_of_gap() {
        let guide = Ring {
            x: 100.0,
            y: -40.0,
            ..Ring::root(0.0, 300.0, 0.0)
        };
        let mut view = Viewpoint::default();
        view.follow(&guide, 0.5);
        assert_eq!((view.x, view.y), (50.0, -20.0));
        view.follow(&guide, 0.5);
        assert_eq!((view.x, view.y), (75.0, -30.0));
        // Lateral follow leaves travel alone
        assert_eq!(view.z, 0.0);
    }

    #[test]
    fn test_advance_is_linear() {
        let mut view = Viewpoint::default();
        for _ in 0..10 {
            view.advance(1.5);
        }
        assert_eq!(view.z, 15.0);
        view.advance(-2.0);
        assert_eq!(view.z, 13.0);
    }
}
