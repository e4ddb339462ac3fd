//! Interconnect graph construction.
//!
//! Building happens in two passes over a fully merged directory:
//!
//! 1. **Extraction**: every current-carrying edge, via, TSV and micro-bump is
//!    classified and its grid coordinates decoded from the instance name. The
//!    highest layer index seen becomes `max_layer`.
//! 2. **Normalization**: layer indices are inverted (`z' = max_layer - z`) so
//!    that layer 0 is the top of the stack. TSVs and micro-bumps only touch one
//!    grid node, so each gets a synthetic second endpoint just outside the
//!    modelled stack.

use std::fmt;

use pdnlis_core::{Directory, Electrical, ElementKind};
use serde::{Deserialize, Serialize};

use crate::coord::{Coordinate, Point3, decode_coordinates};
use crate::error::{Error, Result};

/// Layer of the synthetic upper endpoint of every TSV.
pub const TSV_TOP_Z: f64 = -0.4;

/// Offset past `max_layer` of the synthetic endpoint of every micro-bump.
pub const UBUMP_OFFSET: f64 = 0.4;

/// Kind of a graph interconnect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterconnectKind {
    Edge,
    Via,
    Tsv,
    Ubump,
}

impl InterconnectKind {
    /// Map a directory element kind; `None` for kinds outside the graph.
    pub fn from_element(kind: &ElementKind) -> Option<Self> {
        match kind {
            ElementKind::Edge => Some(InterconnectKind::Edge),
            ElementKind::Via => Some(InterconnectKind::Via),
            ElementKind::Tsv => Some(InterconnectKind::Tsv),
            ElementKind::Ubump => Some(InterconnectKind::Ubump),
            ElementKind::Other(_) => None,
        }
    }

    /// Number of grid nodes named by the instance.
    pub fn anchor_count(self) -> usize {
        match self {
            InterconnectKind::Edge | InterconnectKind::Via => 2,
            InterconnectKind::Tsv | InterconnectKind::Ubump => 1,
        }
    }
}

impl fmt::Display for InterconnectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterconnectKind::Edge => write!(f, "edge"),
            InterconnectKind::Via => write!(f, "via"),
            InterconnectKind::Tsv => write!(f, "tsv"),
            InterconnectKind::Ubump => write!(f, "ubump"),
        }
    }
}

/// Grid nodes an interconnect touches, before normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Anchors {
    Single(Coordinate),
    Dual(Coordinate, Coordinate),
}

impl Anchors {
    /// Iterate over the anchor coordinates.
    pub fn coordinates(&self) -> impl Iterator<Item = Coordinate> {
        let (first, second) = match *self {
            Anchors::Single(a) => (a, None),
            Anchors::Dual(a, b) => (a, Some(b)),
        };
        std::iter::once(first).chain(second)
    }
}

/// An interconnect as decoded from the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interconnect {
    /// Simulator element index.
    pub index: u32,
    pub instance: String,
    pub kind: InterconnectKind,
    pub anchors: Anchors,
    pub electrical: Electrical,
}

/// Output of the extraction pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    /// Highest layer index over all decoded coordinates.
    pub max_layer: i64,
    pub edges: Vec<Interconnect>,
    pub vias: Vec<Interconnect>,
    pub tsvs: Vec<Interconnect>,
    pub ubumps: Vec<Interconnect>,
}

impl Extraction {
    /// Total number of interconnects.
    pub fn len(&self) -> usize {
        self.edges.len() + self.vias.len() + self.tsvs.len() + self.ubumps.len()
    }

    /// Check if nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn bucket(&mut self, kind: InterconnectKind) -> &mut Vec<Interconnect> {
        match kind {
            InterconnectKind::Edge => &mut self.edges,
            InterconnectKind::Via => &mut self.vias,
            InterconnectKind::Tsv => &mut self.tsvs,
            InterconnectKind::Ubump => &mut self.ubumps,
        }
    }

    /// Run the normalization pass.
    pub fn normalize(self) -> PdnGraph {
        let max_layer = self.max_layer;
        let spans = |items: Vec<Interconnect>| -> Vec<Span> {
            items
                .into_iter()
                .map(|item| Span::normalized(item, max_layer))
                .collect()
        };

        PdnGraph {
            max_layer,
            edges: spans(self.edges),
            vias: spans(self.vias),
            tsvs: spans(self.tsvs),
            ubumps: spans(self.ubumps),
        }
    }
}

/// A two-endpoint interconnect in normalized coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Simulator element index.
    pub index: u32,
    pub instance: String,
    pub kind: InterconnectKind,
    /// First endpoint; for TSVs and micro-bumps the real grid node.
    pub start: Point3,
    /// Second endpoint; for TSVs and micro-bumps the synthetic one.
    pub end: Point3,
    pub electrical: Electrical,
}

impl Span {
    fn normalized(item: Interconnect, max_layer: i64) -> Self {
        let invert = |c: Coordinate| Point3::new(c.x, c.y, (max_layer - c.z) as f64);

        let (start, end) = match item.anchors {
            Anchors::Dual(a, b) => (invert(a), invert(b)),
            Anchors::Single(a) => {
                let start = invert(a);
                let end_z = match item.kind {
                    InterconnectKind::Ubump => max_layer as f64 + UBUMP_OFFSET,
                    _ => TSV_TOP_Z,
                };
                (start, Point3::new(a.x, a.y, end_z))
            }
        };

        Self {
            index: item.index,
            instance: item.instance,
            kind: item.kind,
            start,
            end,
            electrical: item.electrical,
        }
    }
}

/// The reconstructed power-delivery network.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PdnGraph {
    /// Highest layer index before inversion.
    pub max_layer: i64,
    pub edges: Vec<Span>,
    pub vias: Vec<Span>,
    pub tsvs: Vec<Span>,
    pub ubumps: Vec<Span>,
}

impl PdnGraph {
    /// Iterate over every span: edges, vias, TSVs, then micro-bumps.
    pub fn spans(&self) -> impl Iterator<Item = &Span> {
        self.edges
            .iter()
            .chain(&self.vias)
            .chain(&self.tsvs)
            .chain(&self.ubumps)
    }

    /// Total number of spans.
    pub fn len(&self) -> usize {
        self.edges.len() + self.vias.len() + self.tsvs.len() + self.ubumps.len()
    }

    /// Check if the graph has no spans.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn decode_anchors(instance: &str, kind: InterconnectKind) -> Result<Anchors> {
    let coords = decode_coordinates(instance);
    let expected = kind.anchor_count();
    let error = || Error::CoordinateParse {
        instance: instance.to_string(),
        kind: kind.to_string(),
        expected,
        found: coords.len(),
    };

    match (expected, coords.as_slice()) {
        (1, [a, ..]) => Ok(Anchors::Single(*a)),
        (2, [a, b, ..]) => Ok(Anchors::Dual(*a, *b)),
        _ => Err(error()),
    }
}

/// Run the extraction pass.
///
/// Entries without current are skipped. Fails on the first interconnect whose
/// instance name lacks the coordinates its kind requires.
pub fn extract(directory: &Directory) -> Result<Extraction> {
    let mut extraction = Extraction::default();
    let mut max_layer: Option<i64> = None;
    let mut idle = 0usize;

    for (index, entry) in directory.iter() {
        let Some(kind) = InterconnectKind::from_element(&entry.kind) else {
            continue;
        };
        if !entry.carries_current() {
            idle += 1;
            continue;
        }

        let anchors = decode_anchors(&entry.instance, kind)?;
        for c in anchors.coordinates() {
            max_layer = Some(max_layer.map_or(c.z, |m| m.max(c.z)));
        }

        extraction.bucket(kind).push(Interconnect {
            index,
            instance: entry.instance.clone(),
            kind,
            anchors,
            electrical: entry.electrical,
        });
    }

    extraction.max_layer = max_layer.unwrap_or(0);
    log::debug!("skipped {} interconnects without current", idle);
    log::info!(
        "extracted {} edges, {} vias, {} tsvs, {} ubumps; max layer {}",
        extraction.edges.len(),
        extraction.vias.len(),
        extraction.tsvs.len(),
        extraction.ubumps.len(),
        extraction.max_layer
    );
    Ok(extraction)
}

/// Build the normalized graph from a merged directory.
pub fn build_graph(directory: &Directory) -> Result<PdnGraph> {
    Ok(extract(directory)?.normalize())
}
