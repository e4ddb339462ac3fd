//! Resistor report merging.
//!
//! The resistor report prints its elements in groups of aligned rows:
//!
//! ```text
//!  subckt    xeqckt     xeqckt
//!  element   12:r       13:r
//!  r value   1.0000     2.0000
//!  v drop    1.5060e-01 150m
//!  current   25m        75m
//!  power     3.765e-3   11.25m
//! ```
//!
//! Every column belongs to one element. Once all six rows of a group have been
//! seen, each column's voltage drop, current and power are written into the
//! directory entry whose index precedes the `:` of the element token.

use pdnlis_core::{Directory, normalize};

use crate::error::Error;
use crate::section::{Section, is_section_header};

/// Row kinds of a resistor group, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Subckt,
    Element,
    RValue,
    VDrop,
    Current,
    Power,
}

impl RowKind {
    /// All row kinds.
    pub const ALL: [RowKind; 6] = [
        RowKind::Subckt,
        RowKind::Element,
        RowKind::RValue,
        RowKind::VDrop,
        RowKind::Current,
        RowKind::Power,
    ];

    /// Keyword words introducing the row.
    fn keyword(self) -> &'static [&'static str] {
        match self {
            RowKind::Subckt => &["subckt"],
            RowKind::Element => &["element"],
            RowKind::RValue => &["r", "value"],
            RowKind::VDrop => &["v", "drop"],
            RowKind::Current => &["current"],
            RowKind::Power => &["power"],
        }
    }

    /// Name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            RowKind::Subckt => "subckt",
            RowKind::Element => "element",
            RowKind::RValue => "r value",
            RowKind::VDrop => "v drop",
            RowKind::Current => "current",
            RowKind::Power => "power",
        }
    }
}

/// Strip a sequence of keyword words from the start of `line`, ignoring case.
fn strip_keyword<'a>(line: &'a str, words: &[&str]) -> Option<&'a str> {
    let mut rest = line;
    for word in words {
        rest = rest.trim_start();
        let head = rest.get(..word.len())?;
        if !head.eq_ignore_ascii_case(word) {
            return None;
        }
        rest = &rest[word.len()..];
        if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
            return None;
        }
    }
    Some(rest)
}

/// Classify a report line, returning its row kind and the text after the keyword.
pub fn classify_row(line: &str) -> Option<(RowKind, &str)> {
    RowKind::ALL
        .iter()
        .find_map(|&kind| strip_keyword(line, kind.keyword()).map(|rest| (kind, rest)))
}

/// Split row values on whitespace and commas.
pub fn row_tokens(rest: &str) -> Vec<String> {
    rest.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// The six rows of one complete group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupRows {
    pub subckt: Vec<String>,
    pub element: Vec<String>,
    pub r_value: Vec<String>,
    pub v_drop: Vec<String>,
    pub current: Vec<String>,
    pub power: Vec<String>,
}

/// Accumulates the rows of the group currently being read.
#[derive(Debug, Clone, Default)]
pub struct ResistorGroup {
    subckt: Option<Vec<String>>,
    element: Option<Vec<String>>,
    r_value: Option<Vec<String>>,
    v_drop: Option<Vec<String>>,
    current: Option<Vec<String>>,
    power: Option<Vec<String>>,
}

impl ResistorGroup {
    /// Create an empty group.
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, kind: RowKind) -> &mut Option<Vec<String>> {
        match kind {
            RowKind::Subckt => &mut self.subckt,
            RowKind::Element => &mut self.element,
            RowKind::RValue => &mut self.r_value,
            RowKind::VDrop => &mut self.v_drop,
            RowKind::Current => &mut self.current,
            RowKind::Power => &mut self.power,
        }
    }

    /// Record a row, replacing an earlier row of the same kind.
    pub fn set(&mut self, kind: RowKind, tokens: Vec<String>) {
        *self.slot(kind) = Some(tokens);
    }

    /// Whether all six rows are present.
    pub fn is_complete(&self) -> bool {
        self.subckt.is_some()
            && self.element.is_some()
            && self.r_value.is_some()
            && self.v_drop.is_some()
            && self.current.is_some()
            && self.power.is_some()
    }

    /// Whether no row has been seen since the last reset.
    pub fn is_empty(&self) -> bool {
        self.subckt.is_none()
            && self.element.is_none()
            && self.r_value.is_none()
            && self.v_drop.is_none()
            && self.current.is_none()
            && self.power.is_none()
    }

    /// Take the rows if the group is complete, resetting the accumulator.
    pub fn try_finalize(&mut self) -> Option<GroupRows> {
        if !self.is_complete() {
            return None;
        }
        let group = std::mem::take(self);
        Some(GroupRows {
            subckt: group.subckt.unwrap_or_default(),
            element: group.element.unwrap_or_default(),
            r_value: group.r_value.unwrap_or_default(),
            v_drop: group.v_drop.unwrap_or_default(),
            current: group.current.unwrap_or_default(),
            power: group.power.unwrap_or_default(),
        })
    }
}

/// Counters describing one merge.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Groups with all six rows.
    pub groups_completed: usize,
    /// Directory entries that received electrical values.
    pub entries_enriched: usize,
    /// Columns skipped because a token failed to parse or was missing.
    pub columns_skipped: usize,
    /// Well-formed columns whose index is not in the directory.
    pub unknown_indices: usize,
    /// Whether the section ended in the middle of a group.
    pub incomplete_group: bool,
}

/// Statistics and per-column warnings from a merge.
#[derive(Debug, Default)]
pub struct MergeOutcome {
    pub stats: MergeStats,
    pub warnings: Vec<Error>,
}

/// Parse the directory index of an `element` token such as `12:r`.
pub fn element_index(token: &str) -> Option<u32> {
    let (index, _) = token.split_once(':')?;
    index.trim().parse().ok()
}

fn column_value(row: &[String], kind: RowKind, column: usize) -> Result<f64, Error> {
    let token = row.get(column).ok_or(Error::MissingValue {
        row: kind.name(),
        column,
    })?;
    Ok(normalize(token)?)
}

/// Apply one complete group to the directory.
pub fn apply_group(
    rows: &GroupRows,
    directory: &mut Directory,
    outcome: &mut MergeOutcome,
) {
    for (column, token) in rows.element.iter().enumerate() {
        let parsed = element_index(token)
            .ok_or_else(|| Error::InvalidElementRef {
                token: token.clone(),
            })
            .and_then(|index| {
                let v_drop = column_value(&rows.v_drop, RowKind::VDrop, column)?;
                let current = column_value(&rows.current, RowKind::Current, column)?;
                let power = column_value(&rows.power, RowKind::Power, column)?;
                Ok((index, v_drop, current, power))
            });

        match parsed {
            Ok((index, v_drop, current, power)) => match directory.get_mut(index) {
                Some(entry) => {
                    entry.apply(v_drop, current, power);
                    outcome.stats.entries_enriched += 1;
                }
                None => {
                    log::debug!("resistor element {} has no directory entry", token);
                    outcome.stats.unknown_indices += 1;
                }
            },
            Err(e) => {
                log::debug!("skipping resistor column {} ({}): {}", column, token, e);
                outcome.stats.columns_skipped += 1;
                outcome.warnings.push(e);
            }
        }
    }
    outcome.stats.groups_completed += 1;
}

/// Merge the resistor report into the directory.
///
/// `section` starts at (or before) the resistor header. Rows are collected
/// after the header and merging stops at the next `****` header.
pub fn merge_resistor_report(
    section: &Section<'_>,
    header: &str,
    directory: &mut Directory,
) -> MergeOutcome {
    let header = header.to_ascii_lowercase();
    let mut outcome = MergeOutcome::default();
    let mut group = ResistorGroup::new();
    let mut in_section = false;

    for line in section.lines {
        if line.to_ascii_lowercase().contains(&header) {
            in_section = true;
            group = ResistorGroup::new();
            continue;
        }
        if !in_section {
            continue;
        }
        if is_section_header(line) {
            break;
        }

        let Some((kind, rest)) = classify_row(line) else {
            continue;
        };
        group.set(kind, row_tokens(rest));
        if let Some(rows) = group.try_finalize() {
            apply_group(&rows, directory, &mut outcome);
        }
    }

    if !group.is_empty() {
        log::warn!("resistor report ended with an incomplete group");
        outcome.stats.incomplete_group = true;
    }
    if outcome.stats.unknown_indices > 0 {
        log::warn!(
            "{} resistor elements reference indices missing from the directory",
            outcome.stats.unknown_indices
        );
    }
    log::info!(
        "resistor report: {} groups, {} entries enriched, {} columns skipped",
        outcome.stats.groups_completed,
        outcome.stats.entries_enriched,
        outcome.stats.columns_skipped
    );
    outcome
}
