//! Circuit directory entries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of a directory element, from the definition column of the listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// Resistive edge between two grid nodes (`edge`).
    Edge,
    /// Vertical via between adjacent layers (`via`).
    Via,
    /// Through-substrate via (`tsv`).
    Tsv,
    /// Micro-bump (`ubump`).
    Ubump,
    /// Any other definition name, kept verbatim.
    Other(String),
}

impl ElementKind {
    /// Classify a definition tag. Tags compare case-insensitively.
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "edge" => ElementKind::Edge,
            "via" => ElementKind::Via,
            "tsv" => ElementKind::Tsv,
            "ubump" => ElementKind::Ubump,
            _ => ElementKind::Other(tag.to_string()),
        }
    }

    /// Whether this kind ends up in the interconnect graph.
    pub fn is_interconnect(&self) -> bool {
        !matches!(self, ElementKind::Other(_))
    }

    /// Whether the instance name embeds two grid coordinates.
    pub fn is_dual_anchor(&self) -> bool {
        matches!(self, ElementKind::Edge | ElementKind::Via)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Edge => write!(f, "edge"),
            ElementKind::Via => write!(f, "via"),
            ElementKind::Tsv => write!(f, "tsv"),
            ElementKind::Ubump => write!(f, "ubump"),
            ElementKind::Other(tag) => write!(f, "{}", tag),
        }
    }
}

/// Voltage drop, current and power of one element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Electrical {
    /// Voltage drop across the element (V), always non-negative.
    pub voltage_drop: f64,
    /// Current through the element (A), always non-negative.
    pub current: f64,
    /// Dissipated power (W), sign as reported.
    pub power: f64,
}

impl Electrical {
    /// Build from reported values: drop and current lose their sign, power keeps it.
    pub fn from_reported(voltage_drop: f64, current: f64, power: f64) -> Self {
        Self {
            voltage_drop: voltage_drop.abs(),
            current: current.abs(),
            power,
        }
    }
}

/// One row of the circuit name directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitEntry {
    /// Instance name, with the sub-circuit prefix already stripped for interconnect kinds.
    pub instance: String,
    /// Element kind from the definition column.
    pub kind: ElementKind,
    /// Device multiplier.
    pub multiplier: f64,
    /// Electrical values; zero until the resistor report is merged in.
    pub electrical: Electrical,
}

impl CircuitEntry {
    /// Create an entry with no electrical data yet.
    pub fn new(instance: impl Into<String>, kind: ElementKind, multiplier: f64) -> Self {
        Self {
            instance: instance.into(),
            kind,
            multiplier,
            electrical: Electrical::default(),
        }
    }

    /// Overwrite the electrical values with reported ones.
    pub fn apply(&mut self, voltage_drop: f64, current: f64, power: f64) {
        self.electrical = Electrical::from_reported(voltage_drop, current, power);
    }

    /// Voltage drop (V).
    pub fn voltage_drop(&self) -> f64 {
        self.electrical.voltage_drop
    }

    /// Current (A).
    pub fn current(&self) -> f64 {
        self.electrical.current
    }

    /// Power (W).
    pub fn power(&self) -> f64 {
        self.electrical.power
    }

    /// Entries carrying no current are unused or dangling in the simulated topology.
    ///
    /// A NaN current never counts as carrying current.
    pub fn carries_current(&self) -> bool {
        self.electrical.current > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_tag() {
        assert_eq!(ElementKind::from_tag("via"), ElementKind::Via);
        assert_eq!(ElementKind::from_tag("TSV"), ElementKind::Tsv);
        assert_eq!(ElementKind::from_tag("ubump"), ElementKind::Ubump);
        assert_eq!(ElementKind::from_tag("edge"), ElementKind::Edge);
        assert_eq!(
            ElementKind::from_tag("eqckt"),
            ElementKind::Other("eqckt".to_string())
        );
    }

    #[test]
    fn test_kind_display_roundtrips_tag() {
        for tag in ["edge", "via", "tsv", "ubump", "pkg"] {
            assert_eq!(ElementKind::from_tag(tag).to_string(), tag);
        }
    }

    #[test]
    fn test_anchor_counts() {
        assert!(ElementKind::Edge.is_dual_anchor());
        assert!(ElementKind::Via.is_dual_anchor());
        assert!(!ElementKind::Tsv.is_dual_anchor());
        assert!(!ElementKind::Ubump.is_dual_anchor());
        assert!(!ElementKind::Other("x".into()).is_interconnect());
    }

    #[test]
    fn test_apply_discards_sign_of_drop_and_current() {
        let mut entry = CircuitEntry::new("via.n0_0_0_0_0_1", ElementKind::Via, 1.0);
        assert!(!entry.carries_current());

        entry.apply(-0.15, -0.025, -3.75e-3);
        assert_eq!(entry.voltage_drop(), 0.15);
        assert_eq!(entry.current(), 0.025);
        assert_eq!(entry.power(), -3.75e-3);
        assert!(entry.carries_current());
    }

    #[test]
    fn test_nan_current_is_not_carrying() {
        let mut entry = CircuitEntry::new("edge.n0_0_0_1_0_0", ElementKind::Edge, 1.0);
        entry.apply(0.1, f64::NAN, 0.0);
        assert!(!entry.carries_current());

        entry.apply(0.1, -0.0, 0.0);
        assert!(!entry.carries_current());
    }
}
