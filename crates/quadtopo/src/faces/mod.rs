//! Face extraction for straight-line plane graphs via half-edges.
//!
//! Purpose
//! - Turn an undirected, positioned edge set into every combinatorial face of
//!   its planar embedding, each as an ordered vertex cycle with its polygon and
//!   area, and identify the unbounded outer face.
//!
//! Method
//! - Two half-edges per edge, cross-linked as twins, tagged with `atan2` angles.
//! - Outgoing half-edges at each vertex sorted counter-clockwise (stable).
//! - Walk: from half-edge `h` into vertex `v`, continue with the entry just
//!   before `twin(h)` in `v`'s sorted list. Every half-edge lies on exactly one
//!   closed walk in a well-formed embedding.
//!
//! Layout
//! - `types.rs` (ids, half-edges, faces), `build.rs` (half-edge mesh), and
//!   `walk.rs` (face walk, areas, outer face).

mod build;
mod types;
mod walk;

pub use build::HalfEdgeMesh;
pub use types::{Face, HalfEdge, HalfEdgeId, VertexIx};
pub use walk::{extract_faces, outer_face_index, shoelace_area};
