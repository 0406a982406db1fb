//! Face-shape validation of a canonical puzzle graph.
//!
//! Every anomalous input is a verdict, never an error: no edges, walks that do
//! not close, missing enclosed faces, and shape violations all come back as an
//! invalid `Verdict` with a message and the offending polygons.

use nalgebra::Vector2;

use crate::cfg::ShapeRule;
use crate::faces::{extract_faces, outer_face_index, HalfEdgeMesh};
use crate::graph::{Edge, Vertex};

pub const MSG_NO_EDGES: &str = "No edges connected";
pub const MSG_INCOMPLETE: &str = "Incomplete mesh";
pub const MSG_NO_ENCLOSED: &str = "No enclosed faces found";
pub const MSG_NO_QUALIFYING: &str = "No valid faces found (need triangles or quads)";
pub const MSG_VALID: &str = "Perfect Topology!";

/// Outcome of one validation call.
#[derive(Clone, Debug, PartialEq)]
pub struct Verdict {
    pub is_valid: bool,
    pub message: String,
    /// Polygons of internal faces violating the active rule, for highlighting.
    pub invalid_faces: Vec<Vec<Vector2<f64>>>,
    /// Faces left after dropping the outer face.
    pub internal_faces: usize,
    /// Faces recovered by the walk, outer face included.
    pub total_faces: usize,
}

impl Verdict {
    fn invalid(message: impl Into<String>, total_faces: usize) -> Self {
        Self {
            is_valid: false,
            message: message.into(),
            invalid_faces: Vec::new(),
            internal_faces: 0,
            total_faces,
        }
    }
}

#[inline]
fn plural(n: usize) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Validate the internal faces of `(vertices, edges)` against `rule`.
///
/// Edges with unknown endpoints are skipped rather than failing the call.
pub fn validate(vertices: &[Vertex], edges: &[Edge], rule: ShapeRule) -> Verdict {
    if edges.is_empty() {
        return Verdict::invalid(MSG_NO_EDGES, 0);
    }

    let mesh = HalfEdgeMesh::build(vertices, edges);
    let mut faces = extract_faces(&mesh);
    let total = faces.len();
    if total < 2 {
        return Verdict::invalid(MSG_INCOMPLETE, total);
    }
    if let Some(outer) = outer_face_index(&faces) {
        faces.remove(outer);
    }
    if faces.is_empty() {
        return Verdict::invalid(MSG_NO_ENCLOSED, total);
    }

    let internal = faces.len();
    let mut qualifying = 0usize;
    let mut invalid_faces = Vec::new();
    for f in faces {
        if rule.accepts(f.sides()) {
            qualifying += 1;
        } else {
            invalid_faces.push(f.polygon);
        }
    }
    let bad = invalid_faces.len();

    let (is_valid, message) = match rule {
        ShapeRule::QuadOnly if bad > 0 => (false, format!("Found {bad} non-quad face{}", plural(bad))),
        ShapeRule::TriOrQuad if qualifying == 0 => (false, MSG_NO_QUALIFYING.to_string()),
        ShapeRule::TriOrQuad if bad == 1 => {
            (false, "Found 1 face that is not a triangle or quad".to_string())
        }
        ShapeRule::TriOrQuad if bad > 1 => {
            (false, format!("Found {bad} faces that are not triangles or quads"))
        }
        _ => (true, MSG_VALID.to_string()),
    };
    tracing::debug!(%rule, total, internal, qualifying, bad, is_valid, "validate");
    Verdict {
        is_valid,
        message,
        invalid_faces,
        internal_faces: internal,
        total_faces: total,
    }
}
