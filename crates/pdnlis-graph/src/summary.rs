//! Aggregate statistics over a reconstructed graph.

use pdnlis_core::format_value;
use serde::{Deserialize, Serialize};

use crate::builder::{PdnGraph, Span};

/// Extremes and totals over every span of a graph.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GraphSummary {
    /// Number of spans summarised.
    pub spans: usize,
    pub min_voltage_drop: f64,
    pub max_voltage_drop: f64,
    pub min_current: f64,
    pub max_current: f64,
    /// Sum of signed power (W).
    pub total_power: f64,
    /// Largest signed power (W).
    pub max_power: f64,
}

impl GraphSummary {
    /// Summarise a set of spans; `None` when there are none.
    pub fn from_spans<'a>(spans: impl IntoIterator<Item = &'a Span>) -> Option<Self> {
        let mut spans = spans.into_iter();
        let first = spans.next()?.electrical;

        let mut summary = Self {
            spans: 1,
            min_voltage_drop: first.voltage_drop,
            max_voltage_drop: first.voltage_drop,
            min_current: first.current,
            max_current: first.current,
            total_power: first.power,
            max_power: first.power,
        };

        for span in spans {
            let e = span.electrical;
            summary.spans += 1;
            summary.min_voltage_drop = summary.min_voltage_drop.min(e.voltage_drop);
            summary.max_voltage_drop = summary.max_voltage_drop.max(e.voltage_drop);
            summary.min_current = summary.min_current.min(e.current);
            summary.max_current = summary.max_current.max(e.current);
            summary.total_power += e.power;
            summary.max_power = summary.max_power.max(e.power);
        }

        Some(summary)
    }

    /// Format as human-readable text.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Interconnects: {}\n", self.spans));
        out.push_str(&format!(
            "Voltage drop: {}V .. {}V\n",
            format_value(self.min_voltage_drop),
            format_value(self.max_voltage_drop)
        ));
        out.push_str(&format!(
            "Current:      {}A .. {}A\n",
            format_value(self.min_current),
            format_value(self.max_current)
        ));
        out.push_str(&format!(
            "Power:        {}W total, {}W max\n",
            format_value(self.total_power),
            format_value(self.max_power)
        ));
        out
    }
}

impl PdnGraph {
    /// Aggregate statistics over all spans.
    pub fn summary(&self) -> Option<GraphSummary> {
        GraphSummary::from_spans(self.spans())
    }

    /// The `n` spans dissipating the most power by magnitude, largest first.
    ///
    /// Spans with equal magnitude keep their graph order.
    pub fn top_power_contributors(&self, n: usize) -> Vec<&Span> {
        let mut spans: Vec<&Span> = self.spans().collect();
        spans.sort_by(|a, b| {
            b.electrical
                .power
                .abs()
                .total_cmp(&a.electrical.power.abs())
        });
        spans.truncate(n);
        spans
    }
}
