//! PageRank centrality over the interaction graph.
//!
//! Standard power iteration with a fixed random-jump probability of 0.1
//! (0.9 follow-edges). Undirected edges redistribute rank both ways;
//! multi-edges count individually. The summary statistic is the mean
//! score over vertices that have at least one neighbor — isolated
//! vertices would only pull the mean toward the jump-probability
//! baseline, so they are excluded, and a graph with nothing to average
//! is an explicit error rather than a NaN.

use hashbrown::HashMap;
use tracing::debug;

use crate::model::Graph;
use crate::{Error, Result};

/// Probability of restarting the random walk at a uniformly chosen vertex.
pub const JUMP_PROBABILITY: f64 = 0.1;

/// Iteration cap; convergence usually arrives far earlier.
const MAX_ITERATIONS: usize = 100;

/// L1 residual below which the iteration is considered converged. Not a
/// caller contract — callers only rely on a stable ranking.
const TOLERANCE: f64 = 1e-10;

/// Per-vertex PageRank scores plus the connected-vertex mean.
#[derive(Debug, Clone)]
pub struct PageRanks {
    pub scores: HashMap<String, f64>,
    /// Arithmetic mean over vertices with at least one neighbor.
    pub mean: f64,
}

impl PageRanks {
    /// Rank every vertex and reduce to the connected-vertex mean, using
    /// the default jump probability.
    pub fn evaluate(graph: &Graph) -> Result<Self> {
        Self::evaluate_with(graph, JUMP_PROBABILITY)
    }

    pub fn evaluate_with(graph: &Graph, jump_probability: f64) -> Result<Self> {
        let scores = pagerank(graph, jump_probability);
        let mean = connected_mean(graph, &scores)?;
        Ok(Self { scores, mean })
    }
}

/// Power-iteration PageRank. Every vertex starts at 1/n; each step mixes
/// the uniform restart with rank redistributed along edges weighted by
/// 1/degree. Isolated vertices simply hold the restart baseline.
///
/// Returns an empty map for an empty graph.
pub fn pagerank(graph: &Graph, jump_probability: f64) -> HashMap<String, f64> {
    let vertices: Vec<&str> = graph.vertices().collect();
    let n = vertices.len();
    if n == 0 {
        return HashMap::new();
    }

    let index: HashMap<&str, usize> = vertices.iter().copied().zip(0..).collect();

    // Flatten edges into (from, to) transitions once, up front.
    let mut transitions: Vec<(usize, usize)> = Vec::with_capacity(graph.edge_count() * 2);
    for edge in graph.edges() {
        let s = index[edge.source.as_str()];
        let t = index[edge.target.as_str()];
        transitions.push((s, t));
        if !graph.is_directed() && s != t {
            transitions.push((t, s));
        }
    }

    let degree: Vec<f64> = vertices.iter().map(|v| graph.degree(v) as f64).collect();

    let uniform = 1.0 / n as f64;
    let restart = jump_probability * uniform;
    let follow = 1.0 - jump_probability;

    let mut rank = vec![uniform; n];
    for iteration in 0..MAX_ITERATIONS {
        let mut next = vec![restart; n];
        for &(from, to) in &transitions {
            next[to] += follow * rank[from] / degree[from];
        }

        let residual: f64 = rank
            .iter()
            .zip(&next)
            .map(|(old, new)| (old - new).abs())
            .sum();
        rank = next;

        if residual < TOLERANCE {
            debug!(iteration, residual, "pagerank converged");
            break;
        }
    }

    vertices
        .into_iter()
        .zip(rank)
        .map(|(v, r)| (v.to_owned(), r))
        .collect()
}

/// Mean score over vertices with a positive neighbor count.
///
/// Fails with `NoConnectedVertices` when the graph is empty or every
/// vertex is isolated: the average of an empty list is undefined and must
/// not be reported as a number.
fn connected_mean(graph: &Graph, scores: &HashMap<String, f64>) -> Result<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;

    for vertex in graph.vertices() {
        let neighbors = graph.neighbor_count(vertex);
        let score = scores.get(vertex).copied().unwrap_or(0.0);
        debug!(gene = vertex, neighbors, score, "vertex rank");
        if neighbors > 0 {
            sum += score;
            count += 1;
        }
    }

    if count == 0 {
        return Err(Error::NoConnectedVertices);
    }
    Ok(sum / count as f64)
}

// ============================================================================
// Tests
// ============================================================================
