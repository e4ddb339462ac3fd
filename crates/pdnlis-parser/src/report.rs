//! Whole-listing parsing.

use std::fs;
use std::path::Path;

use pdnlis_core::Directory;

use crate::config::ReportConfig;
use crate::directory::parse_directory;
use crate::error::{Error, Result};
use crate::irdrop::{IrDropProbe, IrDropSummary, parse_probes};
use crate::resistors::{MergeOutcome, merge_resistor_report};
use crate::section::{directory_section, resistor_tail};

/// A parsed listing: the enriched directory plus diagnostics.
#[derive(Debug)]
pub struct ParsedReport {
    /// Directory with electrical values merged in.
    pub directory: Directory,
    /// Directory records that were dropped.
    pub directory_warnings: Vec<Error>,
    /// Resistor merge statistics and skipped columns.
    pub merge: MergeOutcome,
    /// IR-drop probe results found anywhere in the listing.
    pub probes: Vec<IrDropProbe>,
}

impl ParsedReport {
    /// Summary of the IR-drop probes.
    pub fn irdrop_summary(&self) -> IrDropSummary {
        IrDropSummary::from_probes(&self.probes)
    }
}

/// Parse a listing held in memory.
///
/// Fails with [`Error::SectionNotFound`] when either the directory or the
/// resistor header is missing; no partial result is returned.
pub fn parse_report(text: &str, config: &ReportConfig) -> Result<ParsedReport> {
    let lines: Vec<&str> = text.lines().collect();

    let dir_section = directory_section(&lines, &config.directory_header).ok_or_else(|| {
        Error::SectionNotFound {
            section: config.directory_header.clone(),
        }
    })?;
    let res_section =
        resistor_tail(&lines, &config.resistor_header).ok_or_else(|| Error::SectionNotFound {
            section: config.resistor_header.clone(),
        })?;

    log::info!(
        "listing: {} lines, directory at line {}, resistors at line {}",
        lines.len(),
        dir_section.first_line,
        res_section.first_line
    );

    let parsed = parse_directory(&dir_section, config);
    let mut directory = parsed.directory;
    let merge = merge_resistor_report(&res_section, &config.resistor_header, &mut directory);
    let probes = parse_probes(lines.iter().copied());

    Ok(ParsedReport {
        directory,
        directory_warnings: parsed.warnings,
        merge,
        probes,
    })
}

/// Read and parse a listing file.
pub fn load_report(path: &Path, config: &ReportConfig) -> Result<ParsedReport> {
    let bytes = fs::read(path)?;
    let text = String::from_utf8_lossy(&bytes);
    log::debug!("read {} bytes from {}", bytes.len(), path.display());
    parse_report(&text, config)
}
