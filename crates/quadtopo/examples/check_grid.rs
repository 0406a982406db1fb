//! Example: draw a seeded grid puzzle with sloppy user strokes, then check it
//! under both shape rules.

use quadtopo::rand::{count_diagonals, grid_mesh, GridMeshCfg, ReplayToken};
use quadtopo::{api, ShapeRule, TopologyCfg};

fn main() {
    let cfg = GridMeshCfg {
        diagonal_prob: 0.2,
        jitter: Some(8.0),
        ..GridMeshCfg::default()
    };
    let puzzle = grid_mesh(4, 3, cfg, ReplayToken { seed: 2024, index: 0 });
    println!(
        "puzzle: {} vertices, {} edges",
        puzzle.vertex_count(),
        puzzle.edge_count()
    );

    for rule in [ShapeRule::QuadOnly, ShapeRule::TriOrQuad] {
        let out = api::check(&puzzle, TopologyCfg::with_rule(rule));
        println!(
            "rule={rule:<9} valid={} internal={} flagged={} repaired={}v/{}e diagonals={}  {}",
            out.verdict.is_valid,
            out.verdict.internal_faces,
            out.verdict.invalid_faces.len(),
            out.repaired.vertex_count(),
            out.repaired.edge_count(),
            count_diagonals(&out.repaired),
            out.verdict.message
        );
    }
}
