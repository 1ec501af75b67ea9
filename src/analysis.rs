//! Set-based linkage analysis.
//!
//! Two pure set queries over an already-built graph plus evidence gene
//! sets, and a serializable summary report combining them with the
//! centrality mean:
//!
//! * **unlinked genes** — evidence-set members that never made it into
//!   the network (filtered out upstream)
//! * **linker genes** — network vertices carrying no direct evidence,
//!   present only to preserve connectivity between scored genes
//!
//! Results are unordered sets; callers must not rely on iteration order.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::centrality::PageRanks;
use crate::model::{GeneSet, Graph, Orientation};
use crate::Result;

/// Members of `genes` that are not vertices of `graph`.
pub fn unlinked_genes(graph: &Graph, genes: &GeneSet) -> GeneSet {
    genes
        .iter()
        .filter(|gene| !graph.contains_vertex(gene.as_str()))
        .cloned()
        .collect()
}

/// Vertices of `graph` that belong to none of the supplied gene sets.
pub fn linker_genes(graph: &Graph, gene_sets: &[GeneSet]) -> GeneSet {
    graph
        .vertices()
        .filter(|vertex| !gene_sets.iter().any(|set| set.contains(*vertex)))
        .map(str::to_owned)
        .collect()
}

/// Per-evidence-set linkage summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetSummary {
    pub name: String,
    pub size: usize,
    /// Genes of this set absent from the network.
    pub unlinked: GeneSet,
}

/// Network-level summary handed to reporting/visualization collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkReport {
    pub orientation: Orientation,
    pub vertex_count: usize,
    pub edge_count: usize,
    /// Mean PageRank over connected vertices.
    pub mean_page_rank: f64,
    pub sets: Vec<SetSummary>,
    /// Network vertices in none of the evidence sets.
    pub linker_genes: GeneSet,
}

impl NetworkReport {
    /// Summarize a graph against named evidence gene sets.
    pub fn build(graph: &Graph, gene_sets: &[(String, GeneSet)]) -> Result<Self> {
        info!(
            directed = graph.is_directed(),
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "summarizing network"
        );

        let ranks = PageRanks::evaluate(graph)?;

        let sets = gene_sets
            .iter()
            .map(|(name, genes)| {
                let unlinked = unlinked_genes(graph, genes);
                info!(
                    set = %name,
                    unlinked = unlinked.len(),
                    "genes of this set are not in the final network"
                );
                SetSummary {
                    name: name.clone(),
                    size: genes.len(),
                    unlinked,
                }
            })
            .collect();

        let bare_sets: Vec<GeneSet> = gene_sets.iter().map(|(_, s)| s.clone()).collect();
        let linkers = linker_genes(graph, &bare_sets);
        info!(count = linkers.len(), "linker genes in the network");

        Ok(Self {
            orientation: graph.orientation(),
            vertex_count: graph.vertex_count(),
            edge_count: graph.edge_count(),
            mean_page_rank: ranks.mean,
            sets,
            linker_genes: linkers,
        })
    }

    /// The report as pretty JSON, for reporting collaborators.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// ============================================================================
// Tests
// ============================================================================
