//! Renderer: walks the chain far-to-near and emits frustum faces
//!
//! Drawing itself is delegated to a `QuadSink` (egui painter in the app,
//! a recording list in tests and the CLI).

use super::camera::Viewpoint;
use super::chain::RingChain;
use super::config::TunnelConfig;
use super::projector::{project, Point2, ProjectedRing};

/// 8-bit RGBA colour, unmultiplied alpha
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba { r: 0, g: 0, b: 0, a: 0 };

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Full saturation / brightness colour for `hue` in [0, hue_range)
    pub fn from_hue(hue: f64, hue_range: f64, alpha: f64) -> Self {
        let h = (hue * 6.0 / hue_range).rem_euclid(6.0);
        let sector = h.floor();
        let f = h - sector;
        let rise = channel(f);
        let fall = channel(1.0 - f);
        let (r, g, b) = match sector as u8 {
            0 => (255, rise, 0),
            1 => (fall, 255, 0),
            2 => (0, 255, rise),
            3 => (0, fall, 255),
            4 => (rise, 0, 255),
            _ => (255, 0, fall),
        };
        Self::new(r, g, b, channel(alpha))
    }
}

#[inline]
fn channel(v: f64) -> u8 {
    (v.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// External 2D drawing primitive
pub trait QuadSink {
    /// Fill and stroke the quadrilateral `corners`
    fn quad(&mut self, corners: [Point2; 4], fill: Rgba, stroke: Rgba, stroke_width: f64);
}

/// One recorded draw call
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    pub corners: [Point2; 4],
    pub fill: Rgba,
    pub stroke: Rgba,
    pub stroke_width: f64,
}

/// Sink that records quads in draw order
#[derive(Debug, Default)]
pub struct QuadList {
    pub quads: Vec<Quad>,
}

impl QuadList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    pub fn clear(&mut self) {
        self.quads.clear();
    }
}

impl QuadSink for QuadList {
    fn quad(&mut self, corners: [Point2; 4], fill: Rgba, stroke: Rgba, stroke_width: f64) {
        self.quads.push(Quad {
            corners,
            fill,
            stroke,
            stroke_width,
        });
    }
}

/// Per-frame render counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Segments whose four faces were emitted
    pub segments: usize,
    /// Rings skipped by the visibility check (still traversed)
    pub culled: usize,
}

/// A ring is drawn only when it lies within [-node_interval, view_distance]
/// of the viewpoint
#[inline]
pub fn is_visible(rel_z: f64, config: &TunnelConfig) -> bool {
    rel_z <= config.view_distance && rel_z >= -config.node_interval
}

/// Emit the four lateral faces between `near` and its successor `far`
pub fn draw_segment(
    sink: &mut dyn QuadSink,
    near: &ProjectedRing,
    far: &ProjectedRing,
    config: &TunnelConfig,
) {
    let fill = if near.is_void || far.is_void {
        Rgba::TRANSPARENT
    } else {
        Rgba::from_hue(near.hue, config.hue_range, config.fill_alpha)
    };
    let stroke = Rgba::from_hue(near.hue, config.hue_range, 1.0);

    let (n, f) = (&near.corners, &far.corners);
    let (tl, tr, br, bl) = (
        ProjectedRing::TOP_LEFT,
        ProjectedRing::TOP_RIGHT,
        ProjectedRing::BOTTOM_RIGHT,
        ProjectedRing::BOTTOM_LEFT,
    );
    for (a, b) in [(tl, tr), (tr, br), (br, bl), (bl, tl)] {
        sink.quad([n[a], n[b], f[b], f[a]], fill, stroke, config.stroke_width);
    }
}

/// Render the whole chain, farthest segment first so nearer faces overdraw.
///
/// Walks frontier to root, projecting each ring once and reusing it as the
/// far end of the next (nearer) segment.
pub fn render_chain(
    chain: &RingChain,
    view: &Viewpoint,
    config: &TunnelConfig,
    sink: &mut dyn QuadSink,
) -> RenderStats {
    let mut stats = RenderStats::default();
    let mut farther: Option<ProjectedRing> = None;

    for ring in chain.iter().rev() {
        let projected = project(ring, view, config.focal_length);

        if is_visible(projected.rel_z, config) {
            if let Some(far) = farther.as_ref() {
                draw_segment(sink, &projected, far, config);
                stats.segments += 1;
            }
        } else {
            stats.culled += 1;
        }

        farther = Some(projected);
    }

    stats
}
