//! HotNet cluster-result files.
//!
//! The diffusion tool writes a few `#`-prefixed statistic lines followed
//! by one cluster per line, genes tab-separated. Clusters come back as
//! plain [`GeneSet`]s for the set analyzer's consumers.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read};
use std::path::Path;

use tracing::debug;

use crate::model::GeneSet;
use crate::{Error, Result};

/// Read clusters from a HotNet result stream.
pub fn read_clusters(reader: impl Read) -> Result<Vec<GeneSet>> {
    let mut clusters = Vec::new();

    for line in BufReader::new(reader).lines() {
        let line = line?;
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let cluster: GeneSet = line.split('\t').map(str::to_owned).collect();
        clusters.push(cluster);
    }

    debug!(clusters = clusters.len(), "loaded cluster results");
    Ok(clusters)
}

/// Read a cluster result file from disk; a missing file is
/// `MissingResource`.
pub fn read_clusters_file(path: impl AsRef<Path>) -> Result<Vec<GeneSet>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::MissingResource(path.display().to_string()),
        _ => Error::Io(e),
    })?;
    read_clusters(file)
}

/// Flatten clusters into the distinct set of all clustered genes.
pub fn all_genes(clusters: &[GeneSet]) -> GeneSet {
    clusters.iter().flatten().cloned().collect()
}

// ============================================================================
// Tests
// ============================================================================
