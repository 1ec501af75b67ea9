//! Gene-score file I/O.
//!
//! The score file format is two-field TSV, `gene <TAB> score`, no header —
//! the interchange format the consolidator's output is written in and the
//! analysis stage reads evidence sets back from.

pub mod evidence;

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind, Read, Write};
use std::path::Path;

use crate::model::{GeneScoreMap, GeneSet};
use crate::{Error, Result};

/// Read a two-field TSV score stream into a checked score map.
///
/// Blank lines are skipped. A wrong field count, blank gene, gene with
/// internal whitespace, or unparsable score fails with `MalformedRecord`;
/// re-listing a gene with a different score fails with
/// `DuplicateGeneDifferentScore`.
pub fn read_score_file(reader: impl Read) -> Result<GeneScoreMap> {
    let mut map = GeneScoreMap::new();
    let mut record: u64 = 0;

    for line in BufReader::new(reader).lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        record += 1;

        let fields: Vec<&str> = line.split('\t').collect();
        let [gene, score] = fields.as_slice() else {
            return Err(Error::MalformedRecord {
                record,
                message: format!("expected 2 fields, got {}", fields.len()),
            });
        };

        if gene.is_empty() {
            return Err(Error::MalformedRecord {
                record,
                message: "blank gene identifier".into(),
            });
        }
        if gene.chars().any(char::is_whitespace) {
            return Err(Error::MalformedRecord {
                record,
                message: format!("whitespace in gene identifier '{gene}'"),
            });
        }

        let score: f64 = score.parse().map_err(|_| Error::MalformedRecord {
            record,
            message: format!("unparsable score '{score}' for gene '{gene}'"),
        })?;

        map.insert_checked(*gene, score, record)?;
    }

    Ok(map)
}

/// Read a score file from disk; a missing file is `MissingResource`.
pub fn read_score_file_path(path: impl AsRef<Path>) -> Result<GeneScoreMap> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => Error::MissingResource(path.display().to_string()),
        _ => Error::Io(e),
    })?;
    read_score_file(file)
}

/// Read only the gene identifiers from a score file.
pub fn read_gene_set(reader: impl Read) -> Result<GeneSet> {
    Ok(read_score_file(reader)?.to_gene_set())
}

/// Write a score map as two-field TSV, sorted by gene for reproducible
/// output.
pub fn write_score_file(writer: &mut dyn Write, scores: &GeneScoreMap) -> Result<()> {
    let mut entries: Vec<(&str, f64)> = scores.iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.cmp(b));

    for (gene, score) in entries {
        writeln!(writer, "{gene}\t{score}")?;
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
