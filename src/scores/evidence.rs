//! Evidence-table loaders.
//!
//! Each evidence source is a comma-delimited table with a header row and
//! its own column names for gene symbol and score — the column mapping is
//! configuration, not contract. What *is* contract: a blank score is a
//! malformed record, and a gene repeated within one source either hard-
//! fails or keeps the maximum, per the source's declared duplicate policy
//! (p-value tables legitimately list a gene once per measurement; curated
//! score tables must not repeat at all).
//!
//! Gene symbols are normalized by trimming a trailing `*` (a footnote
//! marker in the published tables).

use std::io::{BufRead, BufReader, Read};

use tracing::info;

use crate::model::GeneScoreMap;
use crate::{Error, Result};

/// Column names for one evidence source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceColumns {
    pub gene: String,
    pub score: String,
}

impl EvidenceColumns {
    pub fn new(gene: impl Into<String>, score: impl Into<String>) -> Self {
        Self { gene: gene.into(), score: score.into() }
    }
}

/// What to do when one source lists the same gene twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Differing repeat is a hard error (curated tables).
    Reject,
    /// Keep the highest score seen (per-measurement tables).
    KeepMax,
}

/// Full per-source format description.
#[derive(Debug, Clone)]
pub struct EvidenceFormat {
    pub columns: EvidenceColumns,
    /// Skip rows with a blank gene cell instead of failing (some published
    /// tables carry continuation rows).
    pub skip_blank_genes: bool,
    pub duplicates: DuplicatePolicy,
    /// Applied to each parsed score before the duplicate policy, so
    /// KeepMax compares transformed values.
    pub transform: Option<fn(f64) -> f64>,
}

impl EvidenceFormat {
    pub fn new(columns: EvidenceColumns) -> Self {
        Self {
            columns,
            skip_blank_genes: false,
            duplicates: DuplicatePolicy::Reject,
            transform: None,
        }
    }

    pub fn skip_blank_genes(mut self) -> Self {
        self.skip_blank_genes = true;
        self
    }

    pub fn keep_max_duplicates(mut self) -> Self {
        self.duplicates = DuplicatePolicy::KeepMax;
        self
    }

    pub fn map_scores(mut self, transform: fn(f64) -> f64) -> Self {
        self.transform = Some(transform);
        self
    }
}

/// Load one evidence table into a score map.
///
/// The first line is the header; data records are numbered from 1. A
/// missing configured column fails immediately; a blank score, whitespace
/// inside a gene symbol, or an unparsable number fails at its record.
pub fn load_evidence(reader: impl Read, format: &EvidenceFormat) -> Result<GeneScoreMap> {
    let mut lines = BufReader::new(reader).lines();

    let header = lines.next().transpose()?.ok_or(Error::MalformedRecord {
        record: 0,
        message: "missing header row".into(),
    })?;
    let header_fields = split_csv(&header);
    let gene_col = column_index(&header_fields, &format.columns.gene)?;
    let score_col = column_index(&header_fields, &format.columns.score)?;

    let mut map = GeneScoreMap::new();
    let mut record: u64 = 0;

    for line in lines {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        record += 1;

        let fields = split_csv(&line);
        let gene = normalize_gene(fields.get(gene_col).map_or("", String::as_str));
        let score_text = fields.get(score_col).map_or("", String::as_str).trim();

        if gene.is_empty() {
            if format.skip_blank_genes {
                continue;
            }
            return Err(Error::MalformedRecord {
                record,
                message: "blank gene symbol".into(),
            });
        }
        if gene.chars().any(char::is_whitespace) {
            return Err(Error::MalformedRecord {
                record,
                message: format!("whitespace in gene symbol '{gene}'"),
            });
        }
        if score_text.is_empty() {
            return Err(Error::MalformedRecord {
                record,
                message: format!("blank score for gene '{gene}'"),
            });
        }

        let parsed: f64 = score_text.parse().map_err(|_| Error::MalformedRecord {
            record,
            message: format!("unparsable score '{score_text}' for gene '{gene}'"),
        })?;
        let score = format.transform.map_or(parsed, |f| f(parsed));

        match format.duplicates {
            DuplicatePolicy::Reject => map.insert_checked(gene, score, record)?,
            DuplicatePolicy::KeepMax => match map.get(&gene) {
                Some(existing) if score <= existing => {}
                Some(existing) => {
                    info!(gene = %gene, old = existing, new = score, "updating score");
                    map.insert(gene, score);
                }
                None => map.insert(gene, score),
            },
        }
    }

    Ok(map)
}

/// `-log10(p)` — the usual p-value to heat-score transform.
pub fn p_value_score(p: f64) -> f64 {
    -p.log10()
}

/// Load a p-value table, converting each p-value with [`p_value_score`]
/// and keeping the strongest (maximum) score per gene. The transform runs
/// before the duplicate policy: maximizing raw p-values would keep the
/// weakest signal instead.
pub fn load_p_values(reader: impl Read, columns: EvidenceColumns) -> Result<GeneScoreMap> {
    let format = EvidenceFormat::new(columns)
        .keep_max_duplicates()
        .map_scores(p_value_score);
    load_evidence(reader, &format)
}

/// SFARI tier + syndromic flag → heat score.
///
/// Tiers map as S:100, 1S:90, 1:80, 2S:70, 2:60, 3S:50, 3:40; an
/// unrecognized tier yields `None`.
pub fn sfari_score(tier: &str, syndromic: bool) -> Option<f64> {
    match tier.trim() {
        "" if syndromic => Some(100.0),
        "1" => Some(if syndromic { 90.0 } else { 80.0 }),
        "2" => Some(if syndromic { 70.0 } else { 60.0 }),
        "3" => Some(if syndromic { 50.0 } else { 40.0 }),
        _ => None,
    }
}

/// Load a SFARI gene table (`gene-symbol`, `gene-score`, `syndromic`
/// columns), mapping tier + syndromic flag through [`sfari_score`].
/// Duplicate genes are a hard error, as in curated tables.
pub fn load_sfari(reader: impl Read) -> Result<GeneScoreMap> {
    let mut lines = BufReader::new(reader).lines();

    let header = lines.next().transpose()?.ok_or(Error::MalformedRecord {
        record: 0,
        message: "missing header row".into(),
    })?;
    let header_fields = split_csv(&header);
    let gene_col = column_index(&header_fields, "gene-symbol")?;
    let tier_col = column_index(&header_fields, "gene-score")?;
    let syndromic_col = column_index(&header_fields, "syndromic")?;

    let mut map = GeneScoreMap::new();
    let mut record: u64 = 0;

    for line in lines {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        record += 1;

        let fields = split_csv(&line);
        let gene = normalize_gene(fields.get(gene_col).map_or("", String::as_str));
        let tier = fields.get(tier_col).map_or("", String::as_str);
        let syndromic = fields.get(syndromic_col).map_or("", String::as_str).trim() == "1";

        if gene.is_empty() {
            return Err(Error::MalformedRecord {
                record,
                message: "blank gene symbol".into(),
            });
        }

        let score = sfari_score(tier, syndromic).ok_or_else(|| Error::MalformedRecord {
            record,
            message: format!("unrecognized score '{tier}' (syndromic={syndromic}) for gene '{gene}'"),
        })?;

        info!(gene = %gene, tier, syndromic, score, "sfari gene scored");
        map.insert_checked(gene, score, record)?;
    }

    Ok(map)
}

// ============================================================================
// CSV helpers
// ============================================================================

fn column_index(header: &[String], name: &str) -> Result<usize> {
    header
        .iter()
        .position(|col| col.trim() == name)
        .ok_or_else(|| Error::MalformedRecord {
            record: 0,
            message: format!("header has no column named '{name}'"),
        })
}

fn normalize_gene(raw: &str) -> String {
    raw.trim().trim_end_matches('*').to_owned()
}

/// Split one comma-delimited record. Double quotes delimit fields that
/// contain commas; a doubled quote inside a quoted field is a literal
/// quote.
fn split_csv(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            c => field.push(c),
        }
    }
    fields.push(field);
    fields
}

// ============================================================================
// Tests
// ============================================================================
