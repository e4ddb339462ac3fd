//! IR-drop probe measurements.
//!
//! Probe results are printed as `irdrop<chiplet>_<x>_<y>_<w>_<h>_<current>= <drop>`,
//! where the name encodes the probed region and the load current. Lines for
//! the package-level probe (`irdroppcb`) are not region probes and are skipped.

use pdnlis_core::normalize;
use serde::{Deserialize, Serialize};

const PROBE_PREFIX: &str = "irdrop";
const PCB_PREFIX: &str = "irdroppcb";

/// One IR-drop probe result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IrDropProbe {
    /// Chiplet tag from the probe name.
    pub chiplet: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Load current of the probed region (A).
    pub current: f64,
    /// Measured drop (V).
    pub drop: f64,
}

/// Parse a single probe line, if it is one.
pub fn parse_probe(line: &str) -> Option<IrDropProbe> {
    let line = line.trim();
    let lower = line.to_ascii_lowercase();
    if !lower.starts_with(PROBE_PREFIX) || lower.starts_with(PCB_PREFIX) {
        return None;
    }

    let (name, value) = line.split_once('=')?;
    let body = &name.trim()[PROBE_PREFIX.len()..];
    let parts: Vec<&str> = body.split('_').collect();
    if parts.len() < 6 {
        return None;
    }

    let num = |s: &str| s.parse::<f64>().ok();
    let drop = normalize(value.split_whitespace().next()?).ok()?;

    Some(IrDropProbe {
        chiplet: parts[0].to_string(),
        x: num(parts[1])?,
        y: num(parts[2])?,
        width: num(parts[3])?,
        height: num(parts[4])?,
        current: num(parts[5])?,
        drop,
    })
}

/// Collect every probe line of a listing.
pub fn parse_probes<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<IrDropProbe> {
    lines.into_iter().filter_map(parse_probe).collect()
}

/// Worst and current-weighted IR drop across probes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct IrDropSummary {
    /// Number of probes.
    pub count: usize,
    /// Largest drop (V).
    pub worst_drop: Option<f64>,
    /// `Σ(current·drop) / Σcurrent` (V); absent when the total current is not positive.
    pub weighted_average_drop: Option<f64>,
}

impl IrDropSummary {
    /// Summarise a set of probes.
    pub fn from_probes(probes: &[IrDropProbe]) -> Self {
        let worst_drop = probes.iter().map(|p| p.drop).reduce(f64::max);
        let weighted: f64 = probes.iter().map(|p| p.current * p.drop).sum();
        let total_current: f64 = probes.iter().map(|p| p.current).sum();

        Self {
            count: probes.len(),
            worst_drop,
            weighted_average_drop: (total_current > 0.0).then(|| weighted / total_current),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_probe() {
        let probe = parse_probe("  irdrop01gpu1_4_4_42_42_2.95= 1.5060e-01").unwrap();
        assert_eq!(probe.chiplet, "01gpu1");
        assert_eq!(probe.x, 4.0);
        assert_eq!(probe.y, 4.0);
        assert_eq!(probe.width, 42.0);
        assert_eq!(probe.height, 42.0);
        assert_eq!(probe.current, 2.95);
        assert!((probe.drop - 0.1506).abs() < 1e-12);
    }

    #[test]
    fn test_parse_probe_with_suffix_and_trailer() {
        let probe = parse_probe("IRDROPcpu_0_0_10_10_1.5=  12.5m  targ= 1.0n").unwrap();
        assert!((probe.drop - 0.0125).abs() < 1e-12);
    }

    #[test]
    fn test_skipped_lines() {
        assert!(parse_probe("irdroppcb= 1.0e-02").is_none());
        assert!(parse_probe("irdropgpu_1_2_3= 1.0").is_none());
        assert!(parse_probe("irdropgpu_1_2_3_4_x= 1.0").is_none());
        assert!(parse_probe("irdropgpu_1_2_3_4_5").is_none());
        assert!(parse_probe("vdrop_1_2_3_4_5= 1.0").is_none());
    }

    #[test]
    fn test_summary() {
        let probes = parse_probes([
            "irdropa_0_0_1_1_1.0= 0.10",
            "irdropb_0_0_1_1_3.0= 0.20",
            "not a probe",
        ]);
        assert_eq!(probes.len(), 2);

        let summary = IrDropSummary::from_probes(&probes);
        assert_eq!(summary.count, 2);
        assert_eq!(summary.worst_drop, Some(0.20));
        // (1*0.1 + 3*0.2) / 4
        assert!((summary.weighted_average_drop.unwrap() - 0.175).abs() < 1e-12);
    }

    #[test]
    fn test_empty_summary() {
        let summary = IrDropSummary::from_probes(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.worst_drop, None);
        assert_eq!(summary.weighted_average_drop, None);
    }
}
