//! Planar topology engine for a grid-drawing face puzzle.
//!
//! The player draws straight edges between grid points to subdivide a bounded
//! region; the engine decides whether every enclosed face has the shape the
//! level asks for.
//!
//! Pipeline
//! - `repair`: merge near-coincident vertices, remap edges, drop self-loops,
//!   dangling references, and duplicates.
//! - `faces`: half-edge mesh, CCW angular sort, face walk, outer-face pick.
//! - `validate`: classify internal faces by side count under a `ShapeRule`.
//! - `api::check`: repair then validate, handing the canonical graph back.
//!
//! All entry points are pure: no I/O, no cross-call state, identical inputs
//! give identical outputs.

pub mod api;
pub mod cfg;
pub mod faces;
pub mod graph;
pub mod grid;
pub mod rand;
pub mod repair;
pub mod validate;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use cfg::{GridFrame, ShapeRule, TopologyCfg};
pub use graph::{Edge, Graph, Vertex};
pub use nalgebra::Vector2 as Vec2;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::api::{check, CheckOutcome};
    pub use crate::cfg::{GridFrame, ShapeRule, TopologyCfg, MERGE_DIST};
    pub use crate::faces::{extract_faces, outer_face_index, Face, HalfEdgeMesh};
    pub use crate::graph::{Edge, Graph, Vertex};
    pub use crate::repair::{repair, repair_with_report, RepairReport};
    pub use crate::validate::{validate, Verdict};
    pub use nalgebra::Vector2 as Vec2;
}
