//! End-to-end score pipeline tests.
//!
//! Each test exercises: evidence tables -> per-source maps ->
//! consolidation -> score-file round trip -> cluster readback.

use genenet::scores::evidence::{self, EvidenceColumns, EvidenceFormat};
use genenet::{consolidate, results, scores, sif, Error};
use pretty_assertions::assert_eq;

// ============================================================================
// 1. Three heterogeneous sources into one authoritative map
// ============================================================================

#[test]
fn test_consolidate_three_sources() {
    let putative = "Gene symbol,Score\nCACNA1C,4\nTCF4,3\n";
    let regulatory = "Gene symbol,Score\nTCF4,5\nNRXN1*,2\n";
    let p_values = "gene,p_value\nCACNA1C,0.001\nSETD1A,0.01\n";

    let format = EvidenceFormat::new(EvidenceColumns::new("Gene symbol", "Score"));
    let a = evidence::load_evidence(putative.as_bytes(), &format).unwrap();
    let b = evidence::load_evidence(regulatory.as_bytes(), &format).unwrap();
    let c = evidence::load_p_values(p_values.as_bytes(), EvidenceColumns::new("gene", "p_value"))
        .unwrap();

    let (merged, conflicts) = consolidate(&[a, b, c]);

    // TCF4: 3 vs 5 -> 5. CACNA1C: 4 vs -log10(0.001)~=3 -> keeps 4.
    assert_eq!(merged.get("TCF4"), Some(5.0));
    assert_eq!(merged.get("CACNA1C"), Some(4.0));
    assert_eq!(merged.get("NRXN1"), Some(2.0));
    assert!((merged.get("SETD1A").unwrap() - 2.0).abs() < 1e-9);
    assert_eq!(conflicts.len(), 2);
    assert_eq!(conflicts[0].gene, "TCF4");
    assert_eq!(conflicts[1].gene, "CACNA1C");
}

// ============================================================================
// 2. Consolidated output survives the score-file round trip
// ============================================================================

#[test]
fn test_score_file_round_trip() {
    let format = EvidenceFormat::new(EvidenceColumns::new("Gene symbol", "Score"));
    let a = evidence::load_evidence("Gene symbol,Score\nA,1\nB,2\n".as_bytes(), &format).unwrap();
    let b = evidence::load_evidence("Gene symbol,Score\nB,7\nC,3\n".as_bytes(), &format).unwrap();
    let (merged, _) = consolidate(&[a, b]);

    let mut out = Vec::new();
    scores::write_score_file(&mut out, &merged).unwrap();
    assert_eq!(String::from_utf8(out.clone()).unwrap(), "A\t1\nB\t7\nC\t3\n");

    let reread = scores::read_score_file(out.as_slice()).unwrap();
    assert_eq!(reread, merged);
}

// ============================================================================
// 3. Intra-source integrity is enforced before consolidation ever runs
// ============================================================================

#[test]
fn test_intra_source_duplicate_is_fatal() {
    let table = "Gene symbol,Score\nTCF4,3\nTCF4,9\n";
    let format = EvidenceFormat::new(EvidenceColumns::new("Gene symbol", "Score"));
    match evidence::load_evidence(table.as_bytes(), &format) {
        Err(Error::DuplicateGeneDifferentScore { gene, record, .. }) => {
            assert_eq!(gene, "TCF4");
            assert_eq!(record, 2);
        }
        other => panic!("expected DuplicateGeneDifferentScore, got {other:?}"),
    }
}

// ============================================================================
// 4. SFARI tiers through consolidation
// ============================================================================

#[test]
fn test_sfari_source_consolidates() {
    let sfari = "gene-symbol,gene-score,syndromic\nCHD8,1,1\nSHANK3,2,0\n";
    let gwas = "Gene symbol,Score\nCHD8,40\n";

    let sfari_map = evidence::load_sfari(sfari.as_bytes()).unwrap();
    let gwas_map = evidence::load_evidence(
        gwas.as_bytes(),
        &EvidenceFormat::new(EvidenceColumns::new("Gene symbol", "Score")),
    )
    .unwrap();

    let (merged, conflicts) = consolidate(&[gwas_map, sfari_map]);
    // Strongest evidence wins: SFARI 1S (90) over GWAS 40.
    assert_eq!(merged.get("CHD8"), Some(90.0));
    assert_eq!(merged.get("SHANK3"), Some(60.0));
    assert_eq!(conflicts.len(), 1);
}

// ============================================================================
// 5. Cluster results feed the set analyzer
// ============================================================================

#[test]
fn test_clusters_against_network() {
    let graph = sif::load_sif("A\t-\tB\nB\t-\tC\nC\t-\tD\n".as_bytes()).unwrap();

    let cluster_file = "# delta 0.3\nA\tB\nZZ\n";
    let clusters = results::read_clusters(cluster_file.as_bytes()).unwrap();
    assert_eq!(clusters.len(), 2);

    let clustered = results::all_genes(&clusters);
    let unlinked = genenet::analysis::unlinked_genes(&graph, &clustered);
    assert_eq!(unlinked.len(), 1);
    assert!(unlinked.contains("ZZ"));

    let linkers = genenet::analysis::linker_genes(&graph, &clusters);
    assert_eq!(linkers.len(), 2);
    assert!(linkers.contains("C"));
    assert!(linkers.contains("D"));
}

// ============================================================================
// 6. Gene sets read straight from score files
// ============================================================================

#[test]
fn test_gene_set_from_score_file() {
    let graph = sif::load_sif("A\t-\tB\n".as_bytes()).unwrap();
    let gene_set = scores::read_gene_set("A\t1.5\nX\t2.0\n".as_bytes()).unwrap();

    let unlinked = genenet::analysis::unlinked_genes(&graph, &gene_set);
    assert_eq!(unlinked.len(), 1);
    assert!(unlinked.contains("X"));
}
