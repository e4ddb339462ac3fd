//! Full pipeline over listings written to disk.

use std::fs;

use pdnlis::prelude::*;
use pdnlis::{Error, ParseError};

const LISTING: &str = "\
 ****** dc operating point listing
 irdropgpu_0_0_2_2_1.0= 12m

 ***** circuit name directory
   0 main circuit
   1 xeqckt.edge.n0_0_1_1_0_1 edge 1.00
   2 xeqckt.via.n1_0_0_1_0_1 via 1.00
   3 xeqckt.ubump.n1_0_0
                          ubump 1.00
   4 xeqckt.tsv.n0_0_1 tsv 1.00

 **** resistors

 subckt   xeqckt  xeqckt  xeqckt  xeqckt
 element  1:r     2:r     3:r     4:r
 r value  1.0     1.0     1.0     1.0
 v drop   4m      2m      1m      3m
 current  4m      2m      1m      3m
 power    16u     4u      1u      9u

 **** voltage sources
";

#[test]
fn test_analyze_file() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("pdn.lis");
    fs::write(&path, LISTING).expect("write listing");

    let analysis = analyze_file(&path, &ReportConfig::default()).expect("analysis should succeed");
    let graph = &analysis.graph;

    assert_eq!(graph.max_layer, 1);
    assert_eq!(graph.len(), 4);
    assert_eq!(graph.edges[0].start, Point3::new(0, 0, 0.0));
    assert_eq!(graph.ubumps[0].start, Point3::new(1, 0, 1.0));
    assert!((graph.ubumps[0].end.z - 1.4).abs() < 1e-12);
    assert_eq!(graph.tsvs[0].end, Point3::new(0, 0, -0.4));

    assert_eq!(analysis.report.probes.len(), 1);
    let summary = graph.summary().expect("graph is not empty");
    assert!((summary.total_power - 30e-6).abs() < 1e-15);
    assert_eq!(graph.top_power_contributors(1)[0].index, 1);
}

#[test]
fn test_analyze_file_missing() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let err = analyze_file(&dir.path().join("absent.lis"), &ReportConfig::default()).unwrap_err();
    assert!(matches!(err, Error::Parse(ParseError::Io(_))));
}
