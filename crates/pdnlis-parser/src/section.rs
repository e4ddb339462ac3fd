//! Section boundary detection in simulator listings.
//!
//! A listing is a sequence of sections introduced by header lines. The circuit
//! name directory runs from its header to the first blank line; the resistor
//! report runs from its header to the next `****` header.

/// A contiguous run of listing lines.
#[derive(Debug, Clone, Copy)]
pub struct Section<'a> {
    /// 1-based line number of `lines[0]` in the listing.
    pub first_line: usize,
    /// The section body, header excluded.
    pub lines: &'a [&'a str],
}

impl<'a> Section<'a> {
    /// Iterate over `(line_number, line)` pairs.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &'a str)> + 'a {
        let first = self.first_line;
        self.lines
            .iter()
            .enumerate()
            .map(move |(i, line)| (first + i, *line))
    }

    /// Number of lines in the section.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the section has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Find the first line containing `header`, ignoring ASCII case.
pub fn find_header(lines: &[&str], header: &str) -> Option<usize> {
    let needle = header.to_ascii_lowercase();
    lines
        .iter()
        .position(|line| line.to_ascii_lowercase().contains(&needle))
}

/// Whether a line opens a new `****` section.
pub fn is_section_header(line: &str) -> bool {
    line.trim_start().starts_with("****")
}

/// Slice out the circuit name directory body.
///
/// Blank lines directly after the header are skipped; the first blank line
/// after that ends the section.
pub fn directory_section<'a>(lines: &'a [&'a str], header: &str) -> Option<Section<'a>> {
    let header_idx = find_header(lines, header)?;
    let mut start = header_idx + 1;
    while start < lines.len() && lines[start].trim().is_empty() {
        start += 1;
    }
    let end = lines[start..]
        .iter()
        .position(|line| line.trim().is_empty())
        .map_or(lines.len(), |offset| start + offset);

    Some(Section {
        first_line: start + 1,
        lines: &lines[start..end],
    })
}

/// Slice the listing from the resistor report header to the end.
///
/// The header line is included; the merger itself stops at the next `****`
/// header.
pub fn resistor_tail<'a>(lines: &'a [&'a str], header: &str) -> Option<Section<'a>> {
    let header_idx = find_header(lines, header)?;
    Some(Section {
        first_line: header_idx + 1,
        lines: &lines[header_idx..],
    })
}
