//! The interaction graph: string-identified vertices, labeled multi-edges.
//!
//! One `Graph` type serves both directed and undirected interpretation;
//! the `Orientation` tag is consulted by `neighbors` at query time.
//! Construction is single-writer; after that the graph is read-only except
//! for `remove_vertex`, which exists for the lone-vertex pruning pass.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{Error, Result};

/// Opaque edge label. The SIF loader assigns the record index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EdgeId(pub u64);

impl std::fmt::Display for EdgeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Whether edges are interpreted one-way or symmetrically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Directed,
    Undirected,
}

/// A labeled edge between two gene vertices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: EdgeId,
    pub source: String,
    pub target: String,
}

impl Edge {
    /// The "other" end of the edge from the given vertex.
    pub fn other_vertex(&self, from: &str) -> Option<&str> {
        if from == self.source {
            Some(&self.target)
        } else if from == self.target {
            Some(&self.source)
        } else {
            None
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.source == self.target
    }
}

/// In-memory gene-interaction graph.
///
/// Vertices are gene identifiers (unique strings). Edges carry unique
/// labels and may repeat endpoint pairs (multi-edges); neighbor queries
/// deduplicate. Self-loops are representable — rejection is the caller's
/// concern, not the container's.
#[derive(Debug, Clone)]
pub struct Graph {
    orientation: Orientation,
    /// vertex → incident edge ids (both endpoints index every edge)
    adjacency: HashMap<String, SmallVec<[EdgeId; 4]>>,
    edges: HashMap<EdgeId, Edge>,
}

impl Graph {
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            adjacency: HashMap::new(),
            edges: HashMap::new(),
        }
    }

    pub fn undirected() -> Self {
        Self::new(Orientation::Undirected)
    }

    pub fn directed() -> Self {
        Self::new(Orientation::Directed)
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_directed(&self) -> bool {
        self.orientation == Orientation::Directed
    }

    // ========================================================================
    // Construction
    // ========================================================================

    /// Add a vertex. Idempotent: adding an existing id is a no-op.
    pub fn add_vertex(&mut self, id: impl Into<String>) {
        self.adjacency.entry(id.into()).or_default();
    }

    /// Add a labeled edge, creating missing endpoints implicitly.
    ///
    /// Fails with `DuplicateEdgeLabel` if the label is already in use.
    pub fn add_edge(
        &mut self,
        label: EdgeId,
        a: impl Into<String>,
        b: impl Into<String>,
    ) -> Result<()> {
        if self.edges.contains_key(&label) {
            return Err(Error::DuplicateEdgeLabel(label));
        }

        let source: String = a.into();
        let target: String = b.into();

        self.adjacency.entry(source.clone()).or_default().push(label);
        if source != target {
            self.adjacency.entry(target.clone()).or_default().push(label);
        }

        self.edges.insert(label, Edge { id: label, source, target });
        Ok(())
    }

    /// Remove a vertex and all its incident edges.
    pub fn remove_vertex(&mut self, id: &str) -> bool {
        let Some(incident) = self.adjacency.remove(id) else {
            return false;
        };

        for edge_id in incident {
            if let Some(edge) = self.edges.remove(&edge_id) {
                let other = if edge.source == id { &edge.target } else { &edge.source };
                if other != id {
                    if let Some(list) = self.adjacency.get_mut(other) {
                        list.retain(|e| *e != edge_id);
                    }
                }
            }
        }

        true
    }

    // ========================================================================
    // Queries
    // ========================================================================

    pub fn contains_vertex(&self, id: &str) -> bool {
        self.adjacency.contains_key(id)
    }

    /// All vertex identifiers, in no particular order.
    pub fn vertices(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    /// All edges, in no particular order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    pub fn edge(&self, label: EdgeId) -> Option<&Edge> {
        self.edges.get(&label)
    }

    /// Distinct vertices one edge away from `v`.
    ///
    /// Undirected graphs answer symmetrically regardless of which endpoint
    /// an edge was inserted as; directed graphs follow source → target.
    /// A self-loop makes a vertex its own neighbor.
    pub fn neighbors(&self, v: &str) -> HashSet<&str> {
        let mut out = HashSet::new();
        let Some(incident) = self.adjacency.get(v) else {
            return out;
        };

        for edge_id in incident {
            let edge = &self.edges[edge_id];
            match self.orientation {
                Orientation::Undirected => {
                    if let Some(other) = edge.other_vertex(v) {
                        out.insert(other);
                    }
                }
                Orientation::Directed => {
                    if edge.source == v {
                        out.insert(edge.target.as_str());
                    }
                }
            }
        }

        out
    }

    /// Distinct-neighbor count of `v`. Zero for unknown vertices.
    pub fn neighbor_count(&self, v: &str) -> usize {
        self.neighbors(v).len()
    }

    /// Incident (undirected) or outgoing (directed) edge count of `v`,
    /// counting multi-edges individually. This is the degree PageRank
    /// divides by.
    pub fn degree(&self, v: &str) -> usize {
        let Some(incident) = self.adjacency.get(v) else {
            return 0;
        };
        match self.orientation {
            Orientation::Undirected => incident.len(),
            Orientation::Directed => incident
                .iter()
                .filter(|e| self.edges[*e].source == v)
                .count(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_vertex_idempotent() {
        let mut g = Graph::undirected();
        g.add_vertex("BRCA1");
        g.add_vertex("BRCA1");
        assert_eq!(g.vertex_count(), 1);
    }

    #[test]
    fn test_add_edge_creates_endpoints() {
        let mut g = Graph::undirected();
        g.add_edge(EdgeId(0), "A", "B").unwrap();
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 1);
        assert!(g.contains_vertex("A"));
        assert!(g.contains_vertex("B"));
    }

    #[test]
    fn test_duplicate_edge_label_rejected() {
        let mut g = Graph::undirected();
        g.add_edge(EdgeId(7), "A", "B").unwrap();
        let err = g.add_edge(EdgeId(7), "B", "C").unwrap_err();
        assert!(matches!(err, Error::DuplicateEdgeLabel(EdgeId(7))));
    }

    #[test]
    fn test_neighbors_symmetric_undirected() {
        let mut g = Graph::undirected();
        g.add_edge(EdgeId(0), "A", "B").unwrap();
        assert!(g.neighbors("A").contains("B"));
        assert!(g.neighbors("B").contains("A"));
    }

    #[test]
    fn test_neighbors_directed_follow_source() {
        let mut g = Graph::directed();
        g.add_edge(EdgeId(0), "A", "B").unwrap();
        assert!(g.neighbors("A").contains("B"));
        assert!(g.neighbors("B").is_empty());
    }

    #[test]
    fn test_multi_edge_dedups_neighbors_not_degree() {
        let mut g = Graph::undirected();
        g.add_edge(EdgeId(0), "A", "B").unwrap();
        g.add_edge(EdgeId(1), "B", "A").unwrap();
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.neighbor_count("A"), 1);
        assert_eq!(g.degree("A"), 2);
    }

    #[test]
    fn test_self_loop_is_own_neighbor() {
        let mut g = Graph::undirected();
        g.add_edge(EdgeId(0), "A", "A").unwrap();
        assert!(g.neighbors("A").contains("A"));
        assert_eq!(g.degree("A"), 1);
    }

    #[test]
    fn test_remove_vertex_drops_incident_edges() {
        let mut g = Graph::undirected();
        g.add_edge(EdgeId(0), "A", "B").unwrap();
        g.add_edge(EdgeId(1), "B", "C").unwrap();

        assert!(g.remove_vertex("B"));
        assert_eq!(g.vertex_count(), 2);
        assert_eq!(g.edge_count(), 0);
        assert!(g.neighbors("A").is_empty());
        assert!(g.neighbors("C").is_empty());
    }

    #[test]
    fn test_remove_unknown_vertex() {
        let mut g = Graph::undirected();
        assert!(!g.remove_vertex("GHOST"));
    }
}
