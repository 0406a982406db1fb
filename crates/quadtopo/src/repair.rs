//! Topology repair: merge near-coincident vertices, remap edges, drop
//! self-loops, dangling references, and duplicate edges.
//!
//! Contract
//! - Output vertices are the accepted representatives in acceptance order.
//! - Output edges reference only output vertices, contain no self-loops, and
//!   contain at most one edge per unordered endpoint pair.
//! - Idempotent: representatives differ by more than `merge_dist` on at least
//!   one axis, so a second pass merges nothing and keeps every edge.
//! - Empty input yields empty output.

use std::collections::{HashMap, HashSet};

use crate::graph::{normalized_pair, Edge, Graph, Vertex};

/// Counts of what a repair pass changed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RepairReport {
    pub merged_vertices: usize,
    pub dropped_self_loops: usize,
    pub dropped_dangling: usize,
    pub dropped_duplicates: usize,
}

impl RepairReport {
    #[inline]
    pub fn is_noop(&self) -> bool {
        *self == RepairReport::default()
    }
}

/// Repair a raw vertex/edge collection into a canonical graph.
pub fn repair(vertices: &[Vertex], edges: &[Edge], merge_dist: f64) -> Graph {
    repair_with_report(vertices, edges, merge_dist).0
}

/// `repair` plus a summary of merged vertices and dropped edges.
pub fn repair_with_report(
    vertices: &[Vertex],
    edges: &[Edge],
    merge_dist: f64,
) -> (Graph, RepairReport) {
    let mut report = RepairReport::default();

    // Level content first; input order otherwise (stable sort).
    let mut order: Vec<&Vertex> = vertices.iter().collect();
    order.sort_by_key(|v| !v.authoritative);

    let mut reps: Vec<Vertex> = Vec::new();
    let mut redirect: HashMap<&str, usize> = HashMap::with_capacity(vertices.len());
    for v in order {
        let near = reps.iter().position(|m| {
            (m.pos.x - v.pos.x).abs() <= merge_dist && (m.pos.y - v.pos.y).abs() <= merge_dist
        });
        match near {
            Some(k) => {
                tracing::trace!(from = %v.id, into = %reps[k].id, "merge vertex");
                redirect.insert(v.id.as_str(), k);
                report.merged_vertices += 1;
            }
            None => {
                redirect.insert(v.id.as_str(), reps.len());
                reps.push(v.clone());
            }
        }
    }

    let mut seen: HashSet<(String, String)> = HashSet::with_capacity(edges.len());
    let mut clean: Vec<Edge> = Vec::with_capacity(edges.len());
    for e in edges {
        let (Some(&ku), Some(&kv)) = (
            redirect.get(e.source.as_str()),
            redirect.get(e.target.as_str()),
        ) else {
            report.dropped_dangling += 1;
            continue;
        };
        if ku == kv {
            report.dropped_self_loops += 1;
            continue;
        }
        let (u, v) = (reps[ku].id.as_str(), reps[kv].id.as_str());
        let (s, t) = normalized_pair(u, v);
        if !seen.insert((s.to_string(), t.to_string())) {
            report.dropped_duplicates += 1;
            continue;
        }
        clean.push(Edge::with_id(format!("{s}-{t}"), u, v));
    }

    tracing::debug!(
        vertices_in = vertices.len(),
        vertices_out = reps.len(),
        edges_in = edges.len(),
        edges_out = clean.len(),
        merged = report.merged_vertices,
        self_loops = report.dropped_self_loops,
        dangling = report.dropped_dangling,
        duplicates = report.dropped_duplicates,
        "repair"
    );
    (Graph::new(reps, clean), report)
}
