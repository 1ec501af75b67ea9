//! # Network Model
//!
//! The in-memory data types every pipeline stage reads:
//! the interaction `Graph` and the gene-score containers.
//!
//! This module is pure data — no I/O, no logging, no parsing.

pub mod graph;
pub mod gene;

pub use gene::{GeneScoreMap, GeneSet};
pub use graph::{Edge, EdgeId, Graph, Orientation};
