//! HotNet interchange export — gene index and edge list.
//!
//! The downstream clustering/heat-diffusion tool consumes two tab-
//! delimited files derived from the graph: a 1-based gene index
//! (`<index> <TAB> <gene>`) and an edge list over those indices
//! (`<source index> <TAB> <dest index>`). Undirected edges are emitted in
//! both directions; the consumer ignores the redundancy when it does not
//! need directionality. Output is sorted so repeated runs produce
//! identical files.

use std::io::Write;

use hashbrown::HashMap;
use tracing::{error, info};

use crate::model::Graph;
use crate::Result;

/// gene → 1-based index, as written by [`write_gene_index`].
pub type GeneIndex = HashMap<String, usize>;

/// Write the gene index and return the assignment for the edge-list pass.
pub fn write_gene_index(writer: &mut dyn Write, graph: &Graph) -> Result<GeneIndex> {
    let mut vertices: Vec<&str> = graph.vertices().collect();
    vertices.sort_unstable();

    let mut index = GeneIndex::new();
    for (i, vertex) in vertices.iter().enumerate() {
        let assigned = i + 1;
        writeln!(writer, "{assigned}\t{vertex}")?;
        index.insert((*vertex).to_owned(), assigned);
    }

    info!(genes = index.len(), "wrote gene index");
    Ok(index)
}

/// Write the neighbor-pair edge list, both directions per undirected
/// edge. Self-loops are skipped (and flagged); they carry no information
/// for diffusion. Returns the number of pairs written.
pub fn write_edge_list(
    writer: &mut dyn Write,
    graph: &Graph,
    index: &GeneIndex,
) -> Result<usize> {
    let mut pairs: Vec<(usize, usize)> = Vec::new();

    for source in graph.vertices() {
        for target in graph.neighbors(source) {
            if target == source {
                error!(gene = source, "ignoring self loop");
                continue;
            }
            pairs.push((index[source], index[target]));
        }
    }

    pairs.sort_unstable();
    for (source, target) in &pairs {
        writeln!(writer, "{source}\t{target}")?;
    }

    info!(pairs = pairs.len(), "wrote edge list");
    Ok(pairs.len())
}

// ============================================================================
// Tests
// ============================================================================
