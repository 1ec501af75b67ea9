//! Multi-source gene-score consolidation.
//!
//! Each evidence source contributes an independent statistical signal of
//! gene relevance. Under the strongest-evidence-wins policy a gene's final
//! score is the maximum across sources: a single strong signal must not be
//! diluted by weaker or noisier ones. Cross-source disagreement is
//! expected — it is recorded and logged, never an error.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::model::GeneScoreMap;

/// One cross-source score disagreement, kept for audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conflict {
    pub gene: String,
    /// Score already in the accumulator when the disagreement was seen.
    pub kept: f64,
    /// Score the later source proposed.
    pub incoming: f64,
}

/// Merge gene-score maps into one authoritative map.
///
/// The first source is the base; each later source's entries are inserted
/// if absent, ignored if equal, and resolved to `f64::max` if different
/// (recording a [`Conflict`]). The final value per gene is order-
/// independent beyond the choice of base; the conflict log order follows
/// the input order.
///
/// An empty slice yields an empty map.
pub fn consolidate(sources: &[GeneScoreMap]) -> (GeneScoreMap, Vec<Conflict>) {
    let mut conflicts = Vec::new();

    let Some((base, rest)) = sources.split_first() else {
        return (GeneScoreMap::new(), conflicts);
    };
    let mut merged = base.clone();

    for (source_index, source) in rest.iter().enumerate() {
        for (gene, incoming) in source.iter() {
            match merged.get(gene) {
                None => merged.insert(gene, incoming),
                Some(kept) if kept == incoming => {}
                Some(kept) => {
                    info!(
                        source = source_index + 1,
                        gene,
                        kept,
                        incoming,
                        "score conflict, keeping maximum"
                    );
                    conflicts.push(Conflict {
                        gene: gene.to_owned(),
                        kept,
                        incoming,
                    });
                    merged.insert(gene, kept.max(incoming));
                }
            }
        }
    }

    (merged, conflicts)
}

// ============================================================================
// Tests
// ============================================================================
