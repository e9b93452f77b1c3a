//! Path node chain: the ordered, branch-free sequence of rings
//!
//! - Ring: one cross-section sample along the travel axis
//! - RingChain: root (rear) to frontier (generation edge), never empty

use std::collections::VecDeque;

/// A single cross-section of the tunnel
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ring {
    /// Lateral position perpendicular to the travel axis
    pub x: f64,
    pub y: f64,
    /// Position along the travel axis
    pub z: f64,
    /// Cross-section scale
    pub size: f64,
    /// Accumulated roll angle (radians, unbounded)
    pub rotation: f64,
    /// Colour parameter in [0, hue_range)
    pub hue: f64,
    /// Renders as a silhouette gap (wireframe only)
    pub is_void: bool,
}

impl Ring {
    /// Create the root ring of a fresh chain: centred, unrotated, solid
    pub fn root(z: f64, size: f64, hue: f64) -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z,
            size,
            rotation: 0.0,
            hue,
            is_void: false,
        }
    }
}

/// Chain of rings ordered by strictly increasing `z`.
///
/// Backed by a deque: append at the frontier and removal at the root are
/// both O(1), and traversal is a plain iteration with no recursion.
/// Chain length stays bounded by `view_distance / node_interval` because the
/// generator and pruner keep both ends near the viewpoint.
#[derive(Clone, Debug)]
pub struct RingChain {
    rings: VecDeque<Ring>,
}

impl RingChain {
    /// Create a chain holding only `root`
    pub fn new(root: Ring) -> Self {
        let mut rings = VecDeque::with_capacity(256);
        rings.push_back(root);
        Self { rings }
    }

    /// Oldest ring, nearest the rear
    #[inline]
    pub fn root(&self) -> &Ring {
        // Never empty: `pop_root` refuses to remove the last ring
        &self.rings[0]
    }

    /// Newest ring, the generation edge
    #[inline]
    pub fn frontier(&self) -> &Ring {
        &self.rings[self.rings.len() - 1]
    }

    /// Append a new frontier. Returns false (and drops the ring) if its `z`
    /// does not lie strictly beyond the current frontier.
    pub fn push_frontier(&mut self, ring: Ring) -> bool {
        if ring.z <= self.frontier().z {
            return false;
        }
        self.rings.push_back(ring);
        true
    }

    /// Remove the root, promoting its successor. The sole remaining ring
    /// is never removed.
    pub fn pop_root(&mut self) -> Option<Ring> {
        if self.rings.len() <= 1 {
            return None;
        }
        self.rings.pop_front()
    }

    /// Root to frontier
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Ring> + ExactSizeIterator {
        self.rings.iter()
    }

    /// Root to frontier, mutable. Used for origin shifts only; callers must
    /// keep relative spacing intact.
    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Ring> {
        self.rings.iter_mut()
    }

    /// Consecutive (ring, successor) pairs, root to frontier
    pub fn segments(&self) -> impl DoubleEndedIterator<Item = (&Ring, &Ring)> {
        self.rings.iter().zip(self.rings.iter().skip(1))
    }

    /// Number of rings (always >= 1)
    pub fn len(&self) -> usize {
        self.rings.len()
    }

    /// Always false; present for API symmetry with collections
    pub fn is_empty(&self) -> bool {
        self.rings.is_empty()
    }
}
