//! End-to-end network pipeline tests.
//!
//! Each test exercises: SIF load -> prune -> centrality -> set analysis
//! -> HotNet export, over in-memory readers and writers.

use genenet::{analysis, centrality, export, sif, Error, GeneSet, Orientation};
use pretty_assertions::assert_eq;

fn set(genes: &[&str]) -> GeneSet {
    genes.iter().map(|g| g.to_string()).collect()
}

// ============================================================================
// 1. Load, prune, and verify the documented example
// ============================================================================

#[test]
fn test_load_and_prune_example() {
    // A-B, B-C, and isolated D: pruning removes D, edges survive.
    let input = "A\t-\tB\nB\t-\tC\nD\n";
    let mut graph = sif::load_sif(input.as_bytes()).unwrap();

    assert_eq!(graph.vertex_count(), 4);
    assert_eq!(graph.edge_count(), 2);

    let removed = sif::prune_lone_vertices(&mut graph).unwrap();
    assert_eq!(removed, vec!["D".to_owned()]);

    let mut vertices: Vec<&str> = graph.vertices().collect();
    vertices.sort_unstable();
    assert_eq!(vertices, vec!["A", "B", "C"]);
    assert!(graph.neighbors("B").contains("A"));
    assert!(graph.neighbors("B").contains("C"));
    assert!(!graph.neighbors("A").contains("C"));
}

// ============================================================================
// 2. Vertex/edge count invariants over a well-formed file
// ============================================================================

#[test]
fn test_counts_match_record_shape() {
    let input = "P1\nP2\nA\t-\tB\nB\t \tC\nC\t\tA\n";
    let graph = sif::load_sif(input.as_bytes()).unwrap();

    // 5 distinct gene tokens, 3 three-field records.
    assert_eq!(graph.vertex_count(), 5);
    assert_eq!(graph.edge_count(), 3);
}

// ============================================================================
// 3. Malformed input fails with the offending record number
// ============================================================================

#[test]
fn test_bad_relation_cites_record() {
    let input = "A\t-\tB\nB\t~\tC\n";
    match sif::load_sif(input.as_bytes()) {
        Err(Error::MalformedRecord { record, message }) => {
            assert_eq!(record, 2);
            assert!(message.contains('~'));
        }
        other => panic!("expected MalformedRecord, got {other:?}"),
    }
}

// ============================================================================
// 4. Centrality over the pruned network
// ============================================================================

#[test]
fn test_mean_excludes_isolates_end_to_end() {
    // Connected pair plus an isolate that is *not* pruned: the mean must
    // come from the pair alone.
    let graph = sif::load_sif("A\t-\tB\nLONER\n".as_bytes()).unwrap();
    let ranks = centrality::PageRanks::evaluate(&graph).unwrap();

    let pair_mean = (ranks.scores["A"] + ranks.scores["B"]) / 2.0;
    assert!((ranks.mean - pair_mean).abs() < 1e-12);
}

#[test]
fn test_all_isolated_network_has_no_mean() {
    let graph = sif::load_sif("A\nB\nC\n".as_bytes()).unwrap();
    assert!(matches!(
        centrality::PageRanks::evaluate(&graph),
        Err(Error::NoConnectedVertices)
    ));
}

// ============================================================================
// 5. Network report against evidence sets
// ============================================================================

#[test]
fn test_report_over_pruned_network() {
    let mut graph = sif::load_sif("A\t-\tB\nB\t-\tC\nC\t-\tD\nGONE\n".as_bytes()).unwrap();
    sif::prune_lone_vertices(&mut graph).unwrap();

    let report = analysis::NetworkReport::build(
        &graph,
        &[
            ("putative".to_owned(), set(&["A", "GONE"])),
            ("literature".to_owned(), set(&["D"])),
        ],
    )
    .unwrap();

    assert_eq!(report.orientation, Orientation::Undirected);
    assert_eq!(report.vertex_count, 4);
    assert_eq!(report.edge_count, 3);

    // GONE was pruned out of the network, so it is unlinked.
    assert_eq!(report.sets[0].unlinked, set(&["GONE"]));
    assert!(report.sets[1].unlinked.is_empty());

    // B and C carry no evidence; they only keep A and D connected.
    assert_eq!(report.linker_genes, set(&["B", "C"]));
}

// ============================================================================
// 6. HotNet export round trip
// ============================================================================

#[test]
fn test_export_index_and_edges() {
    let mut graph = sif::load_sif("A\t-\tB\nB\t-\tC\nD\n".as_bytes()).unwrap();
    sif::prune_lone_vertices(&mut graph).unwrap();

    let mut index_out = Vec::new();
    let index = export::write_gene_index(&mut index_out, &graph).unwrap();
    assert_eq!(String::from_utf8(index_out).unwrap(), "1\tA\n2\tB\n3\tC\n");

    let mut edges_out = Vec::new();
    let pairs = export::write_edge_list(&mut edges_out, &graph, &index).unwrap();
    assert_eq!(pairs, 4);
    assert_eq!(
        String::from_utf8(edges_out).unwrap(),
        "1\t2\n2\t1\n2\t3\n3\t2\n"
    );
}

// ============================================================================
// 7. Prune guards against an all-self-loop survivor
// ============================================================================

#[test]
fn test_lone_self_loop_is_fatal() {
    let mut graph = sif::load_sif("X\t-\tX\nLONER\n".as_bytes()).unwrap();
    assert!(matches!(
        sif::prune_lone_vertices(&mut graph),
        Err(Error::UnexpectedTopology(_))
    ));
}
