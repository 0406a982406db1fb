//! Half-edge mesh construction (twins, angles, CCW-sorted outgoing lists).

use std::collections::HashMap;

use nalgebra::Vector2;

use crate::graph::{Edge, Vertex};

use super::types::{HalfEdge, HalfEdgeId, VertexIx};

/// Half-edge arena over a positioned vertex set.
///
/// Invariants:
/// - `half_edges[2k]` and `half_edges[2k+1]` are twins (origin/dest swapped).
/// - `outgoing[v]` holds the half-edges leaving `v`, sorted by angle ascending
///   (stable, so equal angles keep edge input order).
/// - `slot[h]` is the position of `h` inside `outgoing[origin(h)]`.
#[derive(Clone, Debug, Default)]
pub struct HalfEdgeMesh {
    ids: Vec<String>,
    positions: Vec<Vector2<f64>>,
    half_edges: Vec<HalfEdge>,
    outgoing: Vec<Vec<HalfEdgeId>>,
    slot: Vec<usize>,
}

impl HalfEdgeMesh {
    /// Build from vertices and undirected edges.
    ///
    /// Edges naming an unknown vertex id, and self-loops, get no half-edges.
    /// A repeated vertex id resolves to its first occurrence.
    pub fn build(vertices: &[Vertex], edges: &[Edge]) -> Self {
        let mut index: HashMap<&str, VertexIx> = HashMap::with_capacity(vertices.len());
        let mut ids = Vec::with_capacity(vertices.len());
        let mut positions = Vec::with_capacity(vertices.len());
        for v in vertices {
            if index.contains_key(v.id.as_str()) {
                tracing::debug!(id = %v.id, "duplicate vertex id ignored");
                continue;
            }
            index.insert(v.id.as_str(), VertexIx(ids.len()));
            ids.push(v.id.clone());
            positions.push(v.pos);
        }

        let mut half_edges: Vec<HalfEdge> = Vec::with_capacity(edges.len() * 2);
        let mut outgoing: Vec<Vec<HalfEdgeId>> = vec![Vec::new(); ids.len()];
        for e in edges {
            let (Some(&u), Some(&v)) = (index.get(e.source.as_str()), index.get(e.target.as_str()))
            else {
                tracing::debug!(edge = %e.id, "edge references unknown vertex; skipped");
                continue;
            };
            if u == v {
                tracing::debug!(edge = %e.id, "self-loop skipped");
                continue;
            }
            let fwd = HalfEdgeId(half_edges.len());
            let bwd = HalfEdgeId(half_edges.len() + 1);
            let d = positions[v.0] - positions[u.0];
            let r = positions[u.0] - positions[v.0];
            half_edges.push(HalfEdge {
                origin: u,
                dest: v,
                angle: d.y.atan2(d.x),
                twin: bwd,
            });
            half_edges.push(HalfEdge {
                origin: v,
                dest: u,
                angle: r.y.atan2(r.x),
                twin: fwd,
            });
            outgoing[u.0].push(fwd);
            outgoing[v.0].push(bwd);
        }

        let mut slot = vec![0usize; half_edges.len()];
        for list in outgoing.iter_mut() {
            list.sort_by(|a, b| half_edges[a.0].angle.total_cmp(&half_edges[b.0].angle));
            for (k, h) in list.iter().enumerate() {
                slot[h.0] = k;
            }
        }

        let mesh = Self {
            ids,
            positions,
            half_edges,
            outgoing,
            slot,
        };
        mesh.check_integrity();
        mesh
    }

    #[inline]
    pub fn num_vertices(&self) -> usize {
        self.ids.len()
    }

    #[inline]
    pub fn num_half_edges(&self) -> usize {
        self.half_edges.len()
    }

    #[inline]
    pub fn half_edge(&self, h: HalfEdgeId) -> &HalfEdge {
        &self.half_edges[h.0]
    }

    /// Half-edges leaving `v`, counter-clockwise by angle.
    #[inline]
    pub fn outgoing(&self, v: VertexIx) -> &[HalfEdgeId] {
        &self.outgoing[v.0]
    }

    #[inline]
    pub fn vertex_id(&self, v: VertexIx) -> &str {
        &self.ids[v.0]
    }

    #[inline]
    pub fn position(&self, v: VertexIx) -> Vector2<f64> {
        self.positions[v.0]
    }

    /// Successor of `h` along its face: the entry just before `twin(h)` in the
    /// sorted list at `dest(h)`, wrapping around. `None` if `twin(h)` is not
    /// found there.
    pub fn next_in_face(&self, h: HalfEdgeId) -> Option<HalfEdgeId> {
        let he = &self.half_edges[h.0];
        let siblings = &self.outgoing[he.dest.0];
        let k = self.slot[he.twin.0];
        if siblings.get(k) != Some(&he.twin) {
            return None;
        }
        let prev = (k + siblings.len() - 1) % siblings.len();
        Some(siblings[prev])
    }

    /// Debug-only: twin symmetry, slot bookkeeping, and angle ordering.
    fn check_integrity(&self) {
        #[cfg(debug_assertions)]
        {
            for (k, he) in self.half_edges.iter().enumerate() {
                let tw = &self.half_edges[he.twin.0];
                debug_assert_eq!(tw.twin, HalfEdgeId(k), "half-edge {k} twin is not mutual");
                debug_assert!(
                    tw.origin == he.dest && tw.dest == he.origin,
                    "half-edge {k} twin does not swap endpoints"
                );
                debug_assert_eq!(
                    self.outgoing[he.origin.0][self.slot[k]],
                    HalfEdgeId(k),
                    "half-edge {k} slot out of sync"
                );
            }
            for (v, list) in self.outgoing.iter().enumerate() {
                debug_assert!(
                    list.windows(2).all(|w| {
                        let (a, b) = (self.half_edges[w[0].0].angle, self.half_edges[w[1].0].angle);
                        a.total_cmp(&b) != std::cmp::Ordering::Greater
                    }),
                    "outgoing list at vertex {v} not sorted by angle"
                );
            }
        }
    }
}
