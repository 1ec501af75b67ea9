//! SIF interaction-file loader.
//!
//! The format is tab-delimited; each record is either a single field
//! (an isolated vertex declaration) or exactly three fields
//! `source <TAB> relation <TAB> target` where the relation token is one of
//! `"-"`, `" "`, or the empty string. Anything else is a malformed record
//! and aborts the load, citing the 1-based record number.
//!
//! Edges are labeled with their 0-based record index, so labels stay
//! unique and traceable back to the input line. Every record advances the
//! index, vertex declarations included.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::Path;

use tracing::info;

use crate::model::{EdgeId, Graph};
use crate::{Error, Result};

/// Relation tokens the middle field of a 3-field record may carry.
const RELATION_TOKENS: [&str; 3] = ["-", " ", ""];

/// Load an undirected graph from a SIF stream.
pub fn load_sif(reader: impl Read) -> Result<Graph> {
    let mut graph = Graph::undirected();
    let mut record_index: u64 = 0;

    for line in BufReader::new(reader).lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let record_number = record_index + 1;
        let fields: Vec<&str> = line.split('\t').collect();

        match fields.as_slice() {
            // Individual nodes are placed at the top of the file
            [vertex] => graph.add_vertex(*vertex),
            [source, relation, target] => {
                if !RELATION_TOKENS.contains(relation) {
                    return Err(Error::MalformedRecord {
                        record: record_number,
                        message: format!(
                            "should have a dash in the middle instead of: '{relation}'"
                        ),
                    });
                }
                graph.add_edge(EdgeId(record_index), *source, *target)?;
            }
            other => {
                return Err(Error::MalformedRecord {
                    record: record_number,
                    message: format!("unexpected number of fields: {}", other.len()),
                });
            }
        }

        record_index += 1;
    }

    Ok(graph)
}

/// Load a SIF file from disk. A missing file is reported as
/// `MissingResource` rather than a bare IO error.
pub fn load_sif_file(path: impl AsRef<Path>) -> Result<Graph> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::MissingResource(path.display().to_string()),
        _ => Error::Io(e),
    })?;
    load_sif(file)
}

/// Remove every vertex left with zero neighbors after edge construction.
///
/// Returns the removed vertex ids. Fails with `UnexpectedTopology` if the
/// pruned graph would consist of a single vertex whose only connection is
/// to itself — a state the upstream interaction data must never produce.
pub fn prune_lone_vertices(graph: &mut Graph) -> Result<Vec<String>> {
    let lone: Vec<String> = graph
        .vertices()
        .filter(|v| graph.neighbor_count(v) == 0)
        .map(str::to_owned)
        .collect();

    for vertex in &lone {
        graph.remove_vertex(vertex);
        info!(gene = %vertex, "removing solitary node");
    }

    if graph.vertex_count() == 1 {
        let survivor = graph.vertices().next().map(str::to_owned).unwrap_or_default();
        if graph.neighbors(&survivor).contains(survivor.as_str()) {
            return Err(Error::UnexpectedTopology(format!(
                "pruning left a single self-referencing vertex '{survivor}'"
            )));
        }
    }

    Ok(lone)
}

// ============================================================================
// Tests
// ============================================================================
