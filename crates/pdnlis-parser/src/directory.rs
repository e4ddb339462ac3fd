//! Circuit name directory parsing.
//!
//! Each record has the form `<index> <instance> <kind> <multiplier>`. The
//! simulator wraps long instance names, so a record may continue on lines that
//! carry no leading index. Records are assembled by a two-state machine:
//! awaiting a record, or buffering one until it matches.

use std::mem;

use pdnlis_core::{CircuitEntry, Directory, ElementKind};

use crate::config::ReportConfig;
use crate::error::Error;
use crate::section::Section;

/// Result of parsing the directory section.
#[derive(Debug, Default)]
pub struct DirectoryParse {
    /// Parsed entries, keyed by element index.
    pub directory: Directory,
    /// Records that never matched, as [`Error::DirectoryLineUnmatched`].
    pub warnings: Vec<Error>,
}

impl DirectoryParse {
    /// Number of dropped records.
    pub fn dropped(&self) -> usize {
        self.warnings.len()
    }
}

/// Fields of one matched directory record.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryRecord<'a> {
    pub index: u32,
    pub instance: &'a str,
    pub kind: &'a str,
    pub multiplier: f64,
}

/// Match `<index> <instance> <kind> <multiplier>` at the start of `text`.
///
/// Trailing tokens are ignored, and the multiplier only needs a leading run of
/// digits and dots.
pub fn match_record(text: &str) -> Option<DirectoryRecord<'_>> {
    let mut tokens = text.split_whitespace();
    let index_tok = tokens.next()?;
    let instance = tokens.next()?;
    let kind = tokens.next()?;
    let mult_tok = tokens.next()?;

    if !index_tok.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let index = index_tok.parse().ok()?;

    if !kind.chars().all(|c| c.is_alphanumeric() || c == '_') {
        return None;
    }

    let mult_end = mult_tok
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(mult_tok.len());
    let multiplier = mult_tok[..mult_end].parse().ok()?;

    Some(DirectoryRecord {
        index,
        instance,
        kind,
        multiplier,
    })
}

/// Whether a line starts a new record rather than continuing one.
fn is_index_leading(line: &str) -> bool {
    let mut tokens = line.split_whitespace();
    match (tokens.next(), tokens.next()) {
        (Some(first), Some(_)) => first.bytes().all(|b| b.is_ascii_digit()),
        _ => false,
    }
}

#[derive(Debug, Default)]
enum State {
    #[default]
    AwaitingRecord,
    Buffering { line: usize, text: String },
}

/// Incremental directory parser fed one line at a time.
#[derive(Debug)]
pub struct DirectoryParser<'c> {
    config: &'c ReportConfig,
    state: State,
    result: DirectoryParse,
}

impl<'c> DirectoryParser<'c> {
    /// Create a parser for the given listing layout.
    pub fn new(config: &'c ReportConfig) -> Self {
        Self {
            config,
            state: State::AwaitingRecord,
            result: DirectoryParse::default(),
        }
    }

    /// Feed one physical line.
    pub fn feed(&mut self, line_no: usize, line: &str) {
        let line = line.trim();
        if line.is_empty() {
            return;
        }

        if is_index_leading(line) {
            self.drop_pending();
            self.state = State::Buffering {
                line: line_no,
                text: line.to_string(),
            };
        } else {
            match &mut self.state {
                State::Buffering { text, .. } => {
                    text.push(' ');
                    text.push_str(line);
                }
                State::AwaitingRecord => {
                    self.unmatched(line_no, line.to_string());
                    return;
                }
            }
        }

        self.try_commit();
    }

    /// Finish parsing, dropping any record still being buffered.
    pub fn finish(mut self) -> DirectoryParse {
        self.drop_pending();
        self.result
    }

    fn try_commit(&mut self) {
        let State::Buffering { text, .. } = &self.state else {
            return;
        };
        let Some(record) = match_record(text) else {
            return;
        };

        let kind = ElementKind::from_tag(record.kind);
        let instance = if kind.is_interconnect() {
            self.config.strip_prefix(record.instance)
        } else {
            record.instance
        };
        let entry = CircuitEntry::new(instance, kind, record.multiplier);
        if self.result.directory.insert(record.index, entry).is_some() {
            log::debug!("directory index {} repeated, keeping last", record.index);
        }
        self.state = State::AwaitingRecord;
    }

    fn drop_pending(&mut self) {
        if let State::Buffering { line, text } = mem::take(&mut self.state) {
            self.unmatched(line, text);
        }
    }

    fn unmatched(&mut self, line: usize, text: String) {
        log::debug!("dropping directory record at line {}: {}", line, text);
        self.result
            .warnings
            .push(Error::DirectoryLineUnmatched { line, text });
    }
}

/// Parse a directory section into a [`Directory`].
pub fn parse_directory(section: &Section<'_>, config: &ReportConfig) -> DirectoryParse {
    let mut parser = DirectoryParser::new(config);
    for (line_no, line) in section.numbered() {
        parser.feed(line_no, line);
    }
    let result = parser.finish();
    log::info!(
        "circuit directory: {} entries, {} dropped records",
        result.directory.len(),
        result.dropped()
    );
    result
}
