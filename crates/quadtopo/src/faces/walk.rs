//! Face walk over a `HalfEdgeMesh`, polygon areas, and outer-face selection.

use nalgebra::Vector2;

use super::build::HalfEdgeMesh;
use super::types::{Face, HalfEdgeId, VertexIx};

/// Recover every face reachable by a closed walk.
///
/// Starts are tried vertex by vertex, each vertex's half-edges in angle order.
/// Visited marks live in a local `Vec<bool>` and are dropped on return. A walk
/// that runs into an already-visited half-edge other than its start, or cannot
/// find its twin at the destination, yields no face.
pub fn extract_faces(mesh: &HalfEdgeMesh) -> Vec<Face> {
    let mut visited = vec![false; mesh.num_half_edges()];
    let mut faces = Vec::new();
    for v in 0..mesh.num_vertices() {
        for &start in mesh.outgoing(VertexIx(v)) {
            if visited[start.0] {
                continue;
            }
            if let Some(face) = walk_face(mesh, start, &mut visited) {
                faces.push(face);
            }
        }
    }
    tracing::trace!(
        half_edges = mesh.num_half_edges(),
        faces = faces.len(),
        "extract_faces"
    );
    faces
}

fn walk_face(mesh: &HalfEdgeMesh, start: HalfEdgeId, visited: &mut [bool]) -> Option<Face> {
    let mut path = Vec::new();
    let mut polygon = Vec::new();
    let mut cur = start;
    while !visited[cur.0] {
        visited[cur.0] = true;
        let origin = mesh.half_edge(cur).origin;
        path.push(mesh.vertex_id(origin).to_string());
        polygon.push(mesh.position(origin));
        let Some(next) = mesh.next_in_face(cur) else {
            tracing::debug!(start = start.0, at = cur.0, "face walk lost its twin; aborted");
            return None;
        };
        cur = next;
    }
    if cur != start {
        tracing::debug!(start = start.0, stuck = cur.0, "face walk did not close; aborted");
        return None;
    }
    let area = shoelace_area(&polygon);
    Some(Face {
        path,
        polygon,
        area,
    })
}

/// Absolute polygon area by the shoelace formula. Zero for fewer than 3 points.
pub fn shoelace_area(poly: &[Vector2<f64>]) -> f64 {
    let n = poly.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for i in 0..n {
        let p = poly[i];
        let q = poly[(i + 1) % n];
        twice += p.x * q.y - q.x * p.y;
    }
    (twice / 2.0).abs()
}

/// Index of the first face with strictly the largest area (the outer face).
pub fn outer_face_index(faces: &[Face]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (k, f) in faces.iter().enumerate() {
        match best {
            Some((_, a)) if f.area <= a => {}
            _ => best = Some((k, f.area)),
        }
    }
    best.map(|(k, _)| k)
}
