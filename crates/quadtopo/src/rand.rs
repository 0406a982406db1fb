//! Seeded puzzle-state generators (grid meshes) for tests and benchmarks.
//!
//! Model
//! - A `cols × rows` block of grid cells, every grid point an authoritative
//!   vertex, every cell bounded by four edges.
//! - Each cell independently gains one diagonal with probability
//!   `diagonal_prob`, splitting it into two triangles.
//! - With `jitter = Some(r)`, every grid point also gets a user vertex offset by
//!   up to `r` per axis, and each edge endpoint is drawn to either the grid
//!   vertex or its jittered twin. Repair with `r <= MERGE_DIST` collapses them.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::cfg::GridFrame;
use crate::graph::{Edge, Graph, Vertex};

/// Grid mesh generator configuration.
#[derive(Clone, Copy, Debug)]
pub struct GridMeshCfg {
    pub frame: GridFrame,
    /// Probability that a cell gets a diagonal. Clamped to [0, 1].
    pub diagonal_prob: f64,
    /// Per-axis amplitude of the jittered user duplicate of each grid point.
    pub jitter: Option<f64>,
}

impl Default for GridMeshCfg {
    fn default() -> Self {
        Self {
            frame: GridFrame::default(),
            diagonal_prob: 0.0,
            jitter: None,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

#[inline]
fn grid_id(x: usize, y: usize) -> String {
    format!("g{x}_{y}")
}

#[inline]
fn user_id(x: usize, y: usize) -> String {
    format!("u{x}_{y}")
}

/// Number of cells that received a diagonal in a generated mesh.
///
/// Every diagonal edge joins two grid points that differ on both axes. Only
/// meaningful for meshes drawn without jitter.
pub fn count_diagonals(g: &Graph) -> usize {
    let pos = |id: &str| g.position_of(id);
    g.edges
        .iter()
        .filter(|e| match (pos(&e.source), pos(&e.target)) {
            (Some(a), Some(b)) => {
                let d = b - a;
                d.x.abs() > 1e-9 && d.y.abs() > 1e-9
            }
            _ => false,
        })
        .count()
}

/// Draw a `cols × rows` grid mesh.
///
/// Vertex ids are `g{x}_{y}` (grid) and `u{x}_{y}` (jittered user duplicate).
pub fn grid_mesh(cols: usize, rows: usize, cfg: GridMeshCfg, tok: ReplayToken) -> Graph {
    let mut rng = tok.to_std_rng();
    let p_diag = cfg.diagonal_prob.clamp(0.0, 1.0);

    let mut vertices = Vec::with_capacity((cols + 1) * (rows + 1) * 2);
    for y in 0..=rows {
        for x in 0..=cols {
            let p = cfg.frame.to_display(x as f64, y as f64);
            vertices.push(Vertex::fixed(grid_id(x, y), p.x, p.y));
        }
    }
    if let Some(r) = cfg.jitter {
        let r = r.abs();
        for y in 0..=rows {
            for x in 0..=cols {
                let p = cfg.frame.to_display(x as f64, y as f64);
                let dx = (rng.gen::<f64>() * 2.0 - 1.0) * r;
                let dy = (rng.gen::<f64>() * 2.0 - 1.0) * r;
                vertices.push(Vertex::user(user_id(x, y), p.x + dx, p.y + dy));
            }
        }
    }

    let jittered = cfg.jitter.is_some();
    let endpoint = |x: usize, y: usize, rng: &mut StdRng| -> String {
        if jittered && rng.gen_bool(0.5) {
            user_id(x, y)
        } else {
            grid_id(x, y)
        }
    };

    let mut edges = Vec::new();
    for y in 0..=rows {
        for x in 0..cols {
            let a = endpoint(x, y, &mut rng);
            let b = endpoint(x + 1, y, &mut rng);
            edges.push(Edge::new(a, b));
        }
    }
    for x in 0..=cols {
        for y in 0..rows {
            let a = endpoint(x, y, &mut rng);
            let b = endpoint(x, y + 1, &mut rng);
            edges.push(Edge::new(a, b));
        }
    }
    for y in 0..rows {
        for x in 0..cols {
            if p_diag > 0.0 && rng.gen_bool(p_diag) {
                let (a, b) = if rng.gen_bool(0.5) {
                    (endpoint(x, y, &mut rng), endpoint(x + 1, y + 1, &mut rng))
                } else {
                    (endpoint(x + 1, y, &mut rng), endpoint(x, y + 1, &mut rng))
                };
                edges.push(Edge::new(a, b));
            }
        }
    }
    Graph::new(vertices, edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replay_is_deterministic() {
        let cfg = GridMeshCfg {
            diagonal_prob: 0.5,
            jitter: Some(10.0),
            ..GridMeshCfg::default()
        };
        let tok = ReplayToken { seed: 7, index: 3 };
        assert_eq!(grid_mesh(3, 2, cfg, tok), grid_mesh(3, 2, cfg, tok));
    }

    #[test]
    fn plain_grid_counts() {
        let g = grid_mesh(3, 2, GridMeshCfg::default(), ReplayToken { seed: 0, index: 0 });
        assert_eq!(g.vertices.len(), 4 * 3);
        // horizontal: 3 per row * 3 rows; vertical: 2 per column * 4 columns
        assert_eq!(g.edges.len(), 9 + 8);
        assert_eq!(count_diagonals(&g), 0);
    }

    #[test]
    fn full_diagonals() {
        let cfg = GridMeshCfg {
            diagonal_prob: 1.0,
            ..GridMeshCfg::default()
        };
        let g = grid_mesh(2, 2, cfg, ReplayToken { seed: 5, index: 0 });
        assert_eq!(count_diagonals(&g), 4);
    }

    #[test]
    fn jitter_stays_within_amplitude() {
        let cfg = GridMeshCfg {
            jitter: Some(10.0),
            ..GridMeshCfg::default()
        };
        let g = grid_mesh(2, 1, cfg, ReplayToken { seed: 11, index: 0 });
        assert_eq!(g.vertices.len(), 12);
        for v in g.vertices.iter().filter(|v| !v.authoritative) {
            let snapped = cfg.frame.snap(v.pos);
            assert!((snapped - v.pos).amax() <= 10.0 + 1e-9);
        }
    }
}
