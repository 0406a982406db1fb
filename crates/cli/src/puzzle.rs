use anyhow::{Context, Result};
use quadtopo::api::CheckOutcome;
use quadtopo::{Edge, Graph, GridFrame, ShapeRule, TopologyCfg, Vec2, Vertex};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

/// Vertex as stored in a puzzle file.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct VertexDto {
    pub id: String,
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authoritative: Option<bool>,
}

/// Edge as stored in a puzzle file; a missing id is derived from the endpoints.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct EdgeDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
}

/// Puzzle state: level content plus whatever the player has drawn so far.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct PuzzleFile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rule: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merge_dist: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_faces: Option<usize>,
    pub vertices: Vec<VertexDto>,
    #[serde(default)]
    pub edges: Vec<EdgeDto>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_vertices: Vec<VertexDto>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_edges: Vec<EdgeDto>,
}

fn to_vertex(v: &VertexDto, default_authoritative: bool, snap: Option<&GridFrame>) -> Vertex {
    let mut pos = Vec2::new(v.x, v.y);
    if let Some(frame) = snap {
        pos = frame.snap(pos);
    }
    Vertex::new(v.id.clone(), pos, v.authoritative.unwrap_or(default_authoritative))
}

fn to_edge(e: &EdgeDto) -> Edge {
    match &e.id {
        Some(id) => Edge::with_id(id.clone(), e.source.clone(), e.target.clone()),
        None => Edge::new(e.source.clone(), e.target.clone()),
    }
}

fn vertex_dto(v: &Vertex) -> VertexDto {
    VertexDto {
        id: v.id.clone(),
        x: v.pos.x,
        y: v.pos.y,
        authoritative: None,
    }
}

fn edge_dto(e: &Edge) -> EdgeDto {
    EdgeDto {
        id: Some(e.id.clone()),
        source: e.source.clone(),
        target: e.target.clone(),
    }
}

impl PuzzleFile {
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
    }

    /// Flags win over file values, file values over defaults.
    pub fn resolve_cfg(&self, rule: Option<ShapeRule>, merge_dist: Option<f64>) -> Result<TopologyCfg> {
        let mut cfg = TopologyCfg::default();
        if let Some(name) = &self.rule {
            cfg.rule = name
                .parse()
                .with_context(|| format!("rule field `{name}` in puzzle file"))?;
        }
        if let Some(d) = self.merge_dist {
            cfg.merge_dist = d;
        }
        if let Some(r) = rule {
            cfg.rule = r;
        }
        if let Some(d) = merge_dist {
            cfg.merge_dist = d;
        }
        Ok(cfg)
    }

    /// Level content followed by player geometry. With `snap`, player vertices
    /// are moved to their nearest grid point first.
    pub fn to_graph(&self, snap: Option<&GridFrame>) -> Graph {
        let level = Graph::new(
            self.vertices.iter().map(|v| to_vertex(v, true, None)).collect(),
            self.edges.iter().map(to_edge).collect(),
        );
        let user = Graph::new(
            self.user_vertices
                .iter()
                .map(|v| to_vertex(v, false, snap))
                .collect(),
            self.user_edges.iter().map(to_edge).collect(),
        );
        Graph::merged(&level, &user)
    }

    /// Puzzle file for a repaired graph: authoritative vertices stay level
    /// content, the rest stay player geometry; all edges are canonical.
    pub fn from_repaired(graph: &Graph, cfg: TopologyCfg, target_faces: Option<usize>) -> Self {
        let (level, user): (Vec<&Vertex>, Vec<&Vertex>) =
            graph.vertices.iter().partition(|v| v.authoritative);
        Self {
            rule: Some(cfg.rule.to_string()),
            merge_dist: Some(cfg.merge_dist),
            target_faces,
            vertices: level.into_iter().map(vertex_dto).collect(),
            edges: graph.edges.iter().map(edge_dto).collect(),
            user_vertices: user.into_iter().map(vertex_dto).collect(),
            user_edges: Vec::new(),
        }
    }
}

fn polygon_json(poly: &[Vec2<f64>]) -> Value {
    Value::Array(poly.iter().map(|p| json!([p.x, p.y])).collect())
}

/// Verdict document written by `check`.
pub fn verdict_json(out: &CheckOutcome, cfg: TopologyCfg, target_faces: Option<usize>) -> Value {
    let v = &out.verdict;
    let target_met = target_faces.map(|t| v.is_valid && v.internal_faces == t);
    json!({
        "is_valid": v.is_valid,
        "message": v.message,
        "rule": cfg.rule.to_string(),
        "invalid_faces": v.invalid_faces.iter().map(|p| polygon_json(p)).collect::<Vec<_>>(),
        "internal_faces": v.internal_faces,
        "total_faces": v.total_faces,
        "target_faces": target_faces,
        "target_met": target_met,
        "repair": {
            "merged_vertices": out.report.merged_vertices,
            "dropped_self_loops": out.report.dropped_self_loops,
            "dropped_dangling": out.report.dropped_dangling,
            "dropped_duplicates": out.report.dropped_duplicates,
        },
        "repaired": PuzzleFile::from_repaired(&out.repaired, cfg, target_faces),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadtopo::api::check;

    const SQUARE: &str = r#"{
        "rule": "quad",
        "target_faces": 2,
        "vertices": [
            {"id": "t0", "x": 100, "y": 100},
            {"id": "t1", "x": 160, "y": 100},
            {"id": "t2", "x": 220, "y": 100},
            {"id": "b0", "x": 100, "y": 160},
            {"id": "b1", "x": 160, "y": 160},
            {"id": "b2", "x": 220, "y": 160}
        ],
        "edges": [
            {"source": "t0", "target": "t1"},
            {"source": "t1", "target": "t2"},
            {"source": "t2", "target": "b2"},
            {"source": "b2", "target": "b1"},
            {"source": "b1", "target": "b0"},
            {"id": "left", "source": "b0", "target": "t0"}
        ],
        "user_vertices": [
            {"id": "user_1", "x": 171, "y": 91},
            {"id": "user_2", "x": 150, "y": 172}
        ],
        "user_edges": [
            {"source": "user_1", "target": "user_2"}
        ]
    }"#;

    fn square() -> PuzzleFile {
        serde_json::from_str(SQUARE).unwrap()
    }

    #[test]
    fn parses_defaults_and_ids() {
        let p = square();
        let g = p.to_graph(None);
        assert_eq!(g.vertex_count(), 8);
        assert_eq!(g.edge_count(), 7);
        assert_eq!(g.edges[0].id, "t0-t1");
        assert_eq!(g.edges[5].id, "left");
        assert!(g.vertices[0].authoritative);
        assert!(!g.vertices[7].authoritative);
    }

    #[test]
    fn snapping_moves_only_player_vertices() {
        let p = square();
        let g = p.to_graph(Some(&GridFrame::default()));
        assert_eq!(g.position_of("user_1"), Some(Vec2::new(160.0, 100.0)));
        assert_eq!(g.position_of("user_2"), Some(Vec2::new(160.0, 160.0)));
        assert_eq!(g.position_of("t1"), Some(Vec2::new(160.0, 100.0)));
    }

    #[test]
    fn flags_override_file_settings() {
        let p = square();
        let cfg = p.resolve_cfg(None, None).unwrap();
        assert_eq!(cfg.rule, ShapeRule::QuadOnly);
        assert_eq!(cfg.merge_dist, quadtopo::cfg::MERGE_DIST);
        let cfg = p.resolve_cfg(Some(ShapeRule::TriOrQuad), Some(4.0)).unwrap();
        assert_eq!(cfg.rule, ShapeRule::TriOrQuad);
        assert_eq!(cfg.merge_dist, 4.0);

        let bad = PuzzleFile {
            rule: Some("hexagons".into()),
            ..PuzzleFile::default()
        };
        assert!(bad.resolve_cfg(None, None).is_err());
    }

    #[test]
    fn verdict_document_reports_target() {
        let p = square();
        let cfg = p.resolve_cfg(None, None).unwrap();
        let out = check(&p.to_graph(None), cfg);
        let doc = verdict_json(&out, cfg, p.target_faces);
        assert_eq!(doc["is_valid"], true);
        assert_eq!(doc["message"], "Perfect Topology!");
        assert_eq!(doc["internal_faces"], 2);
        assert_eq!(doc["target_met"], true);
        assert_eq!(doc["repair"]["merged_vertices"], 2);
        assert_eq!(doc["repaired"]["edges"].as_array().unwrap().len(), 7);
        assert!(doc["repaired"].get("user_vertices").is_none());
    }

    #[test]
    fn invalid_faces_serialize_as_point_lists() {
        let mut p = square();
        p.user_edges.push(EdgeDto {
            id: None,
            source: "t0".into(),
            target: "b1".into(),
        });
        let cfg = p.resolve_cfg(None, None).unwrap();
        let out = check(&p.to_graph(None), cfg);
        let doc = verdict_json(&out, cfg, p.target_faces);
        assert_eq!(doc["is_valid"], false);
        assert_eq!(doc["message"], "Found 2 non-quad faces");
        assert_eq!(doc["target_met"], false);
        let faces = doc["invalid_faces"].as_array().unwrap();
        assert_eq!(faces.len(), 2);
        assert_eq!(faces[0].as_array().unwrap().len(), 3);
        assert_eq!(faces[0][0].as_array().unwrap().len(), 2);
    }

    #[test]
    fn repaired_file_round_trips_through_check() {
        let p = square();
        let cfg = p.resolve_cfg(None, None).unwrap();
        let out = check(&p.to_graph(None), cfg);
        let file = PuzzleFile::from_repaired(&out.repaired, cfg, p.target_faces);
        let text = serde_json::to_string(&file).unwrap();
        let back: PuzzleFile = serde_json::from_str(&text).unwrap();
        let again = check(&back.to_graph(None), back.resolve_cfg(None, None).unwrap());
        assert_eq!(again.repaired, out.repaired);
        assert!(again.report.is_noop());
    }
}
