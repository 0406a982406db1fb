mod provenance;
mod puzzle;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use quadtopo::api;
use quadtopo::{GridFrame, ShapeRule};
use serde_json::json;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

use provenance::{ensure_parent, write_sidecar, Payload};
use puzzle::{verdict_json, PuzzleFile};

#[derive(Parser)]
#[command(name = "quadtopo")]
#[command(about = "Repair and validate face-puzzle topologies")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Repair a puzzle state, validate it, and print or write the verdict
    Check {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: Option<PathBuf>,
        /// Shape rule: `quad` or `tri-quad` (overrides the puzzle file)
        #[arg(long)]
        rule: Option<ShapeRule>,
        /// Per-axis vertex merge threshold (overrides the puzzle file)
        #[arg(long)]
        merge_dist: Option<f64>,
        /// Snap player vertices to the display grid before repair
        #[arg(long, default_value_t = false)]
        snap: bool,
        /// Exit non-zero when the verdict is invalid
        #[arg(long, default_value_t = false)]
        strict_exit: bool,
    },
    /// Write the repaired puzzle state
    Repair {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        merge_dist: Option<f64>,
        #[arg(long, default_value_t = false)]
        snap: bool,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Check {
            input,
            out,
            rule,
            merge_dist,
            snap,
            strict_exit,
        } => {
            let valid = check(&input, out.as_deref(), rule, merge_dist, snap)?;
            if strict_exit && !valid {
                bail!("topology check failed for {}", input.display());
            }
            Ok(())
        }
        Action::Repair {
            input,
            out,
            merge_dist,
            snap,
        } => repair(&input, &out, merge_dist, snap),
        Action::Report => report(),
    }
}

fn snap_frame(snap: bool) -> Option<GridFrame> {
    snap.then(GridFrame::default)
}

/// Returns the verdict's validity.
fn check(
    input: &Path,
    out: Option<&Path>,
    rule: Option<ShapeRule>,
    merge_dist: Option<f64>,
    snap: bool,
) -> Result<bool> {
    let puzzle = PuzzleFile::load(input)?;
    let cfg = puzzle.resolve_cfg(rule, merge_dist)?;
    let graph = puzzle.to_graph(snap_frame(snap).as_ref());
    tracing::info!(
        input = %input.display(),
        rule = %cfg.rule,
        merge_dist = cfg.merge_dist,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "check"
    );

    let outcome = api::check(&graph, cfg);
    let doc = verdict_json(&outcome, cfg, puzzle.target_faces);
    if outcome.verdict.is_valid {
        tracing::info!(
            internal_faces = outcome.verdict.internal_faces,
            message = %outcome.verdict.message,
            "verdict"
        );
    } else {
        tracing::warn!(
            flagged = outcome.verdict.invalid_faces.len(),
            message = %outcome.verdict.message,
            "verdict"
        );
    }

    match out {
        Some(out) => {
            ensure_parent(out)?;
            std::fs::write(out, serde_json::to_vec_pretty(&doc)?)
                .with_context(|| format!("writing {}", out.display()))?;
            let params = json!({
                "input": input.to_string_lossy(),
                "rule": cfg.rule.to_string(),
                "merge_dist": cfg.merge_dist,
                "snap": snap,
            });
            write_sidecar(out, Payload::new("check", params))?;
        }
        None => println!("{}", serde_json::to_string_pretty(&doc)?),
    }
    Ok(outcome.verdict.is_valid)
}

fn repair(input: &Path, out: &Path, merge_dist: Option<f64>, snap: bool) -> Result<()> {
    let puzzle = PuzzleFile::load(input)?;
    let cfg = puzzle.resolve_cfg(None, merge_dist)?;
    let graph = puzzle.to_graph(snap_frame(snap).as_ref());
    let (repaired, report) =
        api::repair_with_report(&graph.vertices, &graph.edges, cfg.merge_dist);
    tracing::info!(
        input = %input.display(),
        out = %out.display(),
        vertices = repaired.vertex_count(),
        edges = repaired.edge_count(),
        merged = report.merged_vertices,
        dropped = report.dropped_self_loops + report.dropped_dangling + report.dropped_duplicates,
        "repair"
    );

    let file = PuzzleFile::from_repaired(&repaired, cfg, puzzle.target_faces);
    ensure_parent(out)?;
    std::fs::write(out, serde_json::to_vec_pretty(&file)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let params = json!({
        "input": input.to_string_lossy(),
        "merge_dist": cfg.merge_dist,
        "snap": snap,
    });
    write_sidecar(out, Payload::new("repair", params))?;
    Ok(())
}

fn report() -> Result<()> {
    let obj = provenance::block("report", json!({}), &[]);
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
