//! # pdnlis
//!
//! Reconstructs the interconnect graph of a power-delivery network from the
//! text listing a SPICE-family simulator writes after a DC solve.
//!
//! The pipeline has two stages:
//! - [`parser`] reads the circuit name directory and the resistor report and
//!   merges them into one [`Directory`] keyed by element index
//! - [`graph`] decodes grid coordinates from instance names and produces a
//!   layer-normalized [`PdnGraph`] of edges, vias, TSVs and micro-bumps
//!
//! ## Quick Start
//!
//! ```rust
//! use pdnlis::prelude::*;
//!
//! let listing = "\
//!  ***** circuit name directory
//!   12 xeqckt.via.n3_4_0_3_4_1 via 1.0
//!
//!  **** resistors
//!  subckt   xeqckt
//!  element  12:r
//!  r value  1.0
//!  v drop   150m
//!  current  25m
//!  power    3.75m
//! ";
//!
//! let analysis = pdnlis::analyze(listing, &ReportConfig::default()).unwrap();
//! assert_eq!(analysis.graph.vias.len(), 1);
//! assert_eq!(analysis.graph.max_layer, 1);
//! ```

use std::path::Path;

mod error;

pub use error::{Error, Result};

// Re-export member crates
pub use pdnlis_core as core;
pub use pdnlis_graph as graph;
pub use pdnlis_parser as parser;

// ============================================================================
// Convenient re-exports from pdnlis_core
// ============================================================================

pub use pdnlis_core::{
    CircuitEntry, Directory, Electrical, ElementKind, Error as CoreError, format_value, normalize,
};

// ============================================================================
// Convenient re-exports from pdnlis_parser
// ============================================================================

pub use pdnlis_parser::{
    Error as ParseError, IrDropProbe, IrDropSummary, MergeStats, ParsedReport, ReportConfig,
    load_report, parse_report,
};

// ============================================================================
// Convenient re-exports from pdnlis_graph
// ============================================================================

pub use pdnlis_graph::{
    Coordinate, GraphError, GraphSummary, InterconnectKind, PdnGraph, Point3, Span, build_graph,
};

/// A parsed listing together with the graph built from it.
#[derive(Debug)]
pub struct Analysis {
    pub report: ParsedReport,
    pub graph: PdnGraph,
}

impl Analysis {
    /// Number of diagnostics raised while parsing.
    pub fn warning_count(&self) -> usize {
        self.report.directory_warnings.len() + self.report.merge.warnings.len()
    }
}

/// Parse a listing and build its interconnect graph.
pub fn analyze(text: &str, config: &ReportConfig) -> Result<Analysis> {
    let report = parse_report(text, config)?;
    finish(report)
}

/// Read a listing file and build its interconnect graph.
pub fn analyze_file(path: &Path, config: &ReportConfig) -> Result<Analysis> {
    let report = load_report(path, config)?;
    finish(report)
}

fn finish(report: ParsedReport) -> Result<Analysis> {
    let graph = build_graph(&report.directory)?;
    log::info!(
        "graph: {} spans over {} layers",
        graph.len(),
        graph.max_layer + 1
    );
    Ok(Analysis { report, graph })
}

/// Prelude module containing commonly used types and functions.
///
/// ```rust
/// use pdnlis::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{Analysis, analyze, analyze_file};
    pub use crate::{CircuitEntry, Directory, ElementKind};
    pub use crate::{ParsedReport, ReportConfig};
    pub use crate::{InterconnectKind, PdnGraph, Point3, Span};
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = "\
 ***** circuit name directory
   1 xeqckt.edge.n0_0_0_1_0_0 edge 1.0
   2 xeqckt.tsv.n1_0_0 tsv 1.0

 **** resistors
 subckt   xeqckt  xeqckt
 element  1:r     2:r
 r value  1.0     1.0
 v drop   2m      1m
 current  2m      1m
 power    4u      1u
";

    #[test]
    fn test_analyze() {
        let analysis = analyze(LISTING, &ReportConfig::default()).unwrap();
        assert_eq!(analysis.graph.len(), 2);
        assert_eq!(analysis.graph.max_layer, 0);
        assert_eq!(analysis.graph.tsvs[0].end.z, -0.4);
        assert_eq!(analysis.warning_count(), 0);
    }

    #[test]
    fn test_analyze_missing_section() {
        let err = analyze("nothing here\n", &ReportConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::Parse(ParseError::SectionNotFound { .. })
        ));
    }

    #[test]
    fn test_analyze_bad_coordinates() {
        let listing = LISTING.replace("tsv.n1_0_0", "tsv.center");
        let err = analyze(&listing, &ReportConfig::default()).unwrap_err();
        assert!(matches!(err, Error::Graph(GraphError::CoordinateParse { .. })));
        assert!(err.to_string().contains("tsv.center"));
    }

    #[test]
    fn test_prelude_imports() {
        use crate::prelude::*;

        let kind = ElementKind::from_tag("VIA");
        assert_eq!(kind, ElementKind::Via);
        assert_eq!(InterconnectKind::from_element(&kind), Some(InterconnectKind::Via));
    }
}
