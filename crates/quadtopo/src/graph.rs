//! Puzzle graph model: identified vertices at 2D positions plus undirected edges
//! referencing them by id.
//!
//! - `Vertex`: id, display position, and whether it belongs to level content.
//! - `Edge`: undirected edge with an id and two endpoint ids.
//! - `Graph`: the flat vertex/edge collection handed between repair and validation.
//!
//! Graphs are rebuilt from the current drawing state on every call; nothing here
//! is incrementally maintained.

use nalgebra::Vector2;

/// Vertex of the puzzle graph.
///
/// `authoritative` marks fixed level content. Repair prefers authoritative
/// vertices as merge representatives over player-created ones.
#[derive(Clone, Debug, PartialEq)]
pub struct Vertex {
    pub id: String,
    pub pos: Vector2<f64>,
    pub authoritative: bool,
}

impl Vertex {
    #[inline]
    pub fn new(id: impl Into<String>, pos: Vector2<f64>, authoritative: bool) -> Self {
        Self {
            id: id.into(),
            pos,
            authoritative,
        }
    }
    /// Level-content vertex.
    #[inline]
    pub fn fixed(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(id, Vector2::new(x, y), true)
    }
    /// Player-created vertex.
    #[inline]
    pub fn user(id: impl Into<String>, x: f64, y: f64) -> Self {
        Self::new(id, Vector2::new(x, y), false)
    }
}

/// Undirected edge between two vertex ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
}

impl Edge {
    /// Edge with the derived id `"{source}-{target}"`.
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        let source = source.into();
        let target = target.into();
        Self {
            id: format!("{source}-{target}"),
            source,
            target,
        }
    }

    #[inline]
    pub fn with_id(id: impl Into<String>, source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            target: target.into(),
        }
    }

    /// Order-independent endpoint pair (smaller id first).
    #[inline]
    pub fn key(&self) -> (&str, &str) {
        normalized_pair(&self.source, &self.target)
    }
}

/// Sort an endpoint pair so the lexicographically smaller id comes first.
#[inline]
pub fn normalized_pair<'a>(a: &'a str, b: &'a str) -> (&'a str, &'a str) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Flat vertex/edge collection.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Graph {
    pub vertices: Vec<Vertex>,
    pub edges: Vec<Edge>,
}

impl Graph {
    pub fn new(vertices: Vec<Vertex>, edges: Vec<Edge>) -> Self {
        Self { vertices, edges }
    }

    /// Level content followed by player geometry, as assembled before each check.
    pub fn merged(fixed: &Graph, user: &Graph) -> Graph {
        let mut vertices = Vec::with_capacity(fixed.vertices.len() + user.vertices.len());
        vertices.extend_from_slice(&fixed.vertices);
        vertices.extend_from_slice(&user.vertices);
        let mut edges = Vec::with_capacity(fixed.edges.len() + user.edges.len());
        edges.extend_from_slice(&fixed.edges);
        edges.extend_from_slice(&user.edges);
        Graph { vertices, edges }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn position_of(&self, id: &str) -> Option<Vector2<f64>> {
        self.vertices.iter().find(|v| v.id == id).map(|v| v.pos)
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() && self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_key_is_order_independent() {
        let a = Edge::new("b", "a");
        let b = Edge::new("a", "b");
        assert_eq!(a.key(), ("a", "b"));
        assert_eq!(a.key(), b.key());
        assert_eq!(a.id, "b-a");
    }

    #[test]
    fn merged_keeps_fixed_content_first() {
        let fixed = Graph::new(vec![Vertex::fixed("t0", 0.0, 0.0)], vec![]);
        let user = Graph::new(
            vec![Vertex::user("u_1", 60.0, 0.0)],
            vec![Edge::new("t0", "u_1")],
        );
        let g = Graph::merged(&fixed, &user);
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert!(g.vertices[0].authoritative);
        assert!(!g.vertices[1].authoritative);
        assert_eq!(g.position_of("u_1"), Some(Vector2::new(60.0, 0.0)));
        assert_eq!(g.position_of("missing"), None);
    }
}
