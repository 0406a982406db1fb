//! Check flow used by the drawing layer, plus curated re-exports.
//!
//! On every "check" request the caller hands over level content merged with
//! player geometry; the engine repairs it, validates the canonical graph, and
//! returns both so the caller can resynchronize what it displays.

pub use crate::cfg::{GridFrame, ShapeRule, TopologyCfg, MERGE_DIST};
pub use crate::faces::{extract_faces, outer_face_index, shoelace_area, Face, HalfEdgeMesh};
pub use crate::graph::{Edge, Graph, Vertex};
pub use crate::repair::{repair, repair_with_report, RepairReport};
pub use crate::validate::{validate, Verdict};

/// Result of one check: the canonical graph and its verdict.
#[derive(Clone, Debug, PartialEq)]
pub struct CheckOutcome {
    pub repaired: Graph,
    pub report: RepairReport,
    pub verdict: Verdict,
}

/// Repair `graph`, then validate the repaired graph under `cfg.rule`.
pub fn check(graph: &Graph, cfg: TopologyCfg) -> CheckOutcome {
    let (repaired, report) = repair_with_report(&graph.vertices, &graph.edges, cfg.merge_dist);
    let verdict = validate(&repaired.vertices, &repaired.edges, cfg.rule);
    tracing::debug!(
        valid = verdict.is_valid,
        message = %verdict.message,
        internal = verdict.internal_faces,
        "check"
    );
    CheckOutcome {
        repaired,
        report,
        verdict,
    }
}

/// Faces of the repaired graph, outer face removed. Convenience for callers
/// that render every enclosed face, not only the flagged ones.
pub fn internal_faces(graph: &Graph, cfg: TopologyCfg) -> Vec<Face> {
    let repaired = repair(&graph.vertices, &graph.edges, cfg.merge_dist);
    let mut faces = extract_faces(&HalfEdgeMesh::build(&repaired.vertices, &repaired.edges));
    if faces.len() >= 2 {
        if let Some(k) = outer_face_index(&faces) {
            faces.remove(k);
        }
    }
    faces
}
