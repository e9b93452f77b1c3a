//! Projector: ring corners in world space to screen-space quads
//!
//! Screen coordinates are relative to the canvas centre, +y down.

use super::camera::Viewpoint;
use super::chain::Ring;

/// Rings at or behind the viewpoint project as if this far ahead
pub const MIN_DEPTH: f64 = 1.0;

/// Screen-space point
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A ring as seen from the viewpoint
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectedRing {
    /// Corners in order: top-left, top-right, bottom-right, bottom-left
    pub corners: [Point2; 4],
    /// Perspective scale applied (always finite and positive)
    pub scale: f64,
    /// Unclamped depth relative to the viewpoint
    pub rel_z: f64,
    pub hue: f64,
    pub is_void: bool,
}

impl ProjectedRing {
    pub const TOP_LEFT: usize = 0;
    pub const TOP_RIGHT: usize = 1;
    pub const BOTTOM_RIGHT: usize = 2;
    pub const BOTTOM_LEFT: usize = 3;
}

/// Project `ring` as seen from `view`. Pure: identical input gives
/// bit-identical output.
pub fn project(ring: &Ring, view: &Viewpoint, focal_length: f64) -> ProjectedRing {
    let rel_z = ring.z - view.z;
    let depth = rel_z.max(MIN_DEPTH);

    let scale = 0.5 * (focal_length / depth);
    let sx = (ring.x - view.x) * scale;
    let sy = (ring.y - view.y) * scale;
    let r = ring.size * scale / 4.0;

    let (sa, ca) = ring.rotation.sin_cos();
    let rot = |rx: f64, ry: f64| Point2::new(sx + (rx * ca - ry * sa), sy + (rx * sa + ry * ca));

    ProjectedRing {
        corners: [rot(-r, -r), rot(r, -r), rot(r, r), rot(-r, r)],
        scale,
        rel_z,
        hue: ring.hue,
        is_void: ring.is_void,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_unrotated_square() {
        let ring = Ring::root(100.0, 400.0, 30.0);
        let view = Viewpoint::default();
        let p = project(&ring, &view, 60.0);

        // scale = 0.5 * 60 / 100 = 0.3, half extent = 400 * 0.3 / 4 = 30
        assert!(approx(p.scale, 0.3));
        let tl = p.corners[ProjectedRing::TOP_LEFT];
        let br = p.corners[ProjectedRing::BOTTOM_RIGHT];
        assert!(approx(tl.x, -30.0) && approx(tl.y, -30.0));
        assert!(approx(br.x, 30.0) && approx(br.y, 30.0));
        assert_eq!(p.hue, 30.0);
        assert!(!p.is_void);
    }

    #[test]
    fn test_lateral_offset_relative_to_viewpoint() {
        let ring = Ring {
            x: 50.0,
            y: -20.0,
            ..Ring::root(110.0, 0.0, 0.0)
        };
        let view = Viewpoint { x: 10.0, y: 0.0, z: 10.0 };
        let p = project(&ring, &view, 60.0);
        // Zero size collapses all corners onto the centre
        for c in p.corners {
            assert!(approx(c.x, 40.0 * 0.3));
            assert!(approx(c.y, -20.0 * 0.3));
        }
    }

    #[test]
    fn test_rotation_quarter_turn_permutes_corners() {
        let ring = Ring {
            rotation: std::f64::consts::FRAC_PI_2,
            ..Ring::root(100.0, 400.0, 0.0)
        };
        let p = project(&ring, &Viewpoint::default(), 60.0);
        // (-30, -30) rotated by +90deg lands on (30, -30)
        let tl = p.corners[ProjectedRing::TOP_LEFT];
        assert!(approx(tl.x, 30.0) && approx(tl.y, -30.0));
    }

    #[test]
    fn test_depth_clamp_behind_viewpoint() {
        let ring = Ring::root(0.0, 300.0, 0.0);
        let view = Viewpoint { x: 0.0, y: 0.0, z: 900.0 };
        let p = project(&ring, &view, 60.0);
        assert_eq!(p.rel_z, -900.0);
        assert!(p.scale.is_finite());
        assert!(p.scale > 0.0);
        assert_eq!(p.scale, 30.0);
        for c in p.corners {
            assert!(c.x.is_finite() && c.y.is_finite());
        }
    }

    #[test]
    fn test_projection_is_deterministic() {
        let ring = Ring {
            x: 123.456,
            y: -789.01,
            rotation: 17.3,
            ..Ring::root(321.5, 299.97, 45.0)
        };
        let view = Viewpoint { x: 3.3, y: 4.4, z: 12.5 };
        let a = project(&ring, &view, 60.0);
        let b = project(&ring, &view, 60.0);
        for (ca, cb) in a.corners.iter().zip(b.corners.iter()) {
            assert_eq!(ca.x.to_bits(), cb.x.to_bits());
            assert_eq!(ca.y.to_bits(), cb.y.to_bits());
        }
        assert_eq!(a, b);
    }
}
