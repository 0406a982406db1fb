//! Data types for the half-edge mesh and recovered faces.

use nalgebra::Vector2;

/// Index of a vertex inside a `HalfEdgeMesh`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VertexIx(pub usize);

/// Index of a half-edge inside a `HalfEdgeMesh`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HalfEdgeId(pub usize);

/// Directed arc of an undirected edge.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HalfEdge {
    pub origin: VertexIx,
    pub dest: VertexIx,
    /// `atan2(dy, dx)` of `dest - origin`, in (-π, π].
    pub angle: f64,
    pub twin: HalfEdgeId,
}

/// Face recovered by one closed walk.
#[derive(Clone, Debug, PartialEq)]
pub struct Face {
    /// Origin vertex ids in walk order; the cycle closes back to `path[0]`.
    pub path: Vec<String>,
    /// Positions of `path`, in the same order.
    pub polygon: Vec<Vector2<f64>>,
    /// Absolute shoelace area of `polygon`.
    pub area: f64,
}

impl Face {
    /// Side count (= walk length).
    #[inline]
    pub fn sides(&self) -> usize {
        self.path.len()
    }
}
