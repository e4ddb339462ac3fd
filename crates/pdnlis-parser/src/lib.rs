//! Simulator listing parser for pdnlis.
//!
//! This crate reads the text listing a circuit simulator writes after solving
//! a power-delivery network. It recovers the circuit name directory, merges
//! the per-element voltage drop, current and power from the resistor report,
//! and collects IR-drop probe results.
//!
//! # Example
//!
//! ```
//! use pdnlis_parser::{ReportConfig, parse_report};
//!
//! let listing = "\
//!  ***** circuit name directory
//!   12 xeqckt.via.n3_4_0_3_4_1 via 1.00
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
//! let report = parse_report(listing, &ReportConfig::default()).unwrap();
//! let via = report.directory.get(12).unwrap();
//! assert_eq!(via.instance, "via.n3_4_0_3_4_1");
//! assert!((via.current() - 0.025).abs() < 1e-12);
//! ```

pub mod config;
pub mod directory;
pub mod error;
pub mod irdrop;
pub mod report;
pub mod resistors;
pub mod section;

pub use config::ReportConfig;
pub use directory::{DirectoryParse, parse_directory};
pub use error::{Error, Result};
pub use irdrop::{IrDropProbe, IrDropSummary};
pub use report::{ParsedReport, load_report, parse_report};
pub use resistors::{MergeOutcome, MergeStats, merge_resistor_report};
