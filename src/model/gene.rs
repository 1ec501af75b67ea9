//! Gene-score containers.
//!
//! A `GeneScoreMap` holds one numeric relevance score per gene for a
//! single evidence source (or the consolidated result of several).
//! Within one source the same gene may only repeat with the identical
//! score; a differing repeat is a hard integrity error, never a silent
//! dedup. Disagreement *across* sources is legitimate and resolved by
//! `consolidate`.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Membership-only view of a score map: the gene identifiers, scores
/// discarded.
pub type GeneSet = HashSet<String>;

/// gene identifier → relevance score, one entry per gene.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneScoreMap {
    scores: HashMap<String, f64>,
}

impl GeneScoreMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a score, enforcing the intra-source invariant: re-inserting
    /// a gene with an equal score is accepted, a differing score fails
    /// with `DuplicateGeneDifferentScore`. `record` (1-based) is carried
    /// into the error for diagnostics.
    pub fn insert_checked(&mut self, gene: impl Into<String>, score: f64, record: u64) -> Result<()> {
        let gene = gene.into();
        match self.scores.get(&gene) {
            Some(&existing) if existing != score => Err(Error::DuplicateGeneDifferentScore {
                gene,
                existing,
                incoming: score,
                record,
            }),
            Some(_) => Ok(()),
            None => {
                self.scores.insert(gene, score);
                Ok(())
            }
        }
    }

    /// Unchecked insert: last write wins. For consolidation internals and
    /// sources whose duplicate policy is keep-max.
    pub fn insert(&mut self, gene: impl Into<String>, score: f64) {
        self.scores.insert(gene.into(), score);
    }

    pub fn get(&self, gene: &str) -> Option<f64> {
        self.scores.get(gene).copied()
    }

    pub fn contains(&self, gene: &str) -> bool {
        self.scores.contains_key(gene)
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.scores.iter().map(|(g, s)| (g.as_str(), *s))
    }

    /// Drop the scores, keep the genes.
    pub fn to_gene_set(&self) -> GeneSet {
        self.scores.keys().cloned().collect()
    }
}

impl FromIterator<(String, f64)> for GeneScoreMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            scores: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
