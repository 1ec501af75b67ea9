//! # genenet — Gene Interaction Network Construction & Analysis
//!
//! Builds an in-memory gene-interaction network from tabular interaction
//! data, consolidates gene-importance evidence from heterogeneous sources,
//! and analyzes the resulting network (PageRank centrality, linkage gaps).
//!
//! ## Design Principles
//!
//! 1. **One graph type**: directedness is a flag consulted at query time,
//!    not a type hierarchy
//! 2. **Strict parsers**: a malformed record is a terminal error carrying
//!    its record number, never a silent skip
//! 3. **Conflicts are not errors**: cross-source score disagreement is
//!    resolved deterministically (max wins) and logged for audit
//! 4. **No ambient state**: logging goes through `tracing`; the embedding
//!    process installs the subscriber
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use genenet::{sif, centrality};
//!
//! # fn example() -> genenet::Result<()> {
//! let mut graph = sif::load_sif_file("gene_network.sif")?;
//! let removed = sif::prune_lone_vertices(&mut graph)?;
//! println!("pruned {} isolated genes", removed.len());
//!
//! let ranks = centrality::PageRanks::evaluate(&graph)?;
//! println!("mean PageRank over connected genes: {}", ranks.mean);
//! # Ok(())
//! # }
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Module | Consumes | Produces |
//! |-------|--------|----------|----------|
//! | Load | `sif` | SIF interaction file | `Graph` |
//! | Consolidate | `consolidate` | per-source `GeneScoreMap`s | merged map + conflicts |
//! | Rank | `centrality` | `Graph` | per-vertex scores + mean |
//! | Analyze | `analysis` | `Graph` + `GeneSet`s | unlinked / linker genes |
//! | Interchange | `export`, `results` | `Graph` / HotNet output | index + edge list / clusters |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod sif;
pub mod consolidate;
pub mod centrality;
pub mod analysis;
pub mod scores;
pub mod export;
pub mod results;

// ============================================================================
// Re-exports: Model
// ============================================================================

pub use model::{Edge, EdgeId, GeneScoreMap, GeneSet, Graph, Orientation};

// ============================================================================
// Re-exports: Pipeline stages
// ============================================================================

pub use analysis::NetworkReport;
pub use centrality::PageRanks;
pub use consolidate::{consolidate, Conflict};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An input record violates the format contract (wrong field count,
    /// invalid relation token, unparsable score). `record` is 1-based.
    #[error("malformed record {record}: {message}")]
    MalformedRecord { record: u64, message: String },

    /// An edge label was used twice within one graph.
    #[error("duplicate edge label {0}")]
    DuplicateEdgeLabel(EdgeId),

    /// A single evidence source listed one gene twice with differing scores.
    #[error(
        "duplicate gene '{gene}' with differing score at record {record}: {existing} vs {incoming}"
    )]
    DuplicateGeneDifferentScore {
        gene: String,
        existing: f64,
        incoming: f64,
        record: u64,
    },

    /// Pruning reached a structurally impossible state; signals an
    /// upstream data bug.
    #[error("unexpected topology: {0}")]
    UnexpectedTopology(String),

    /// A centrality summary was requested on a graph with no connected
    /// vertex; the mean would be an average over an empty set.
    #[error("graph has no connected vertices to average over")]
    NoConnectedVertices,

    /// A required input file or table cannot be located.
    #[error("unable to locate input: {0}")]
    MissingResource(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
