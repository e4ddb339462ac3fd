//! Listing layout configuration.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Section headers and naming conventions of the simulator listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Substring identifying the circuit name directory header.
    pub directory_header: String,
    /// Substring identifying the resistor report header.
    pub resistor_header: String,
    /// Hierarchical prefix stripped from interconnect instance names.
    pub subcircuit_prefix: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            directory_header: "circuit name directory".to_string(),
            resistor_header: "**** resistors".to_string(),
            subcircuit_prefix: "xeqckt".to_string(),
        }
    }
}

impl ReportConfig {
    /// Decode a configuration from JSON. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))
    }

    /// Strip the sub-circuit prefix and its `.` or `:` separator.
    ///
    /// The prefix is only stripped as a whole path component: it must be
    /// followed by a separator or end the name.
    pub fn strip_prefix<'a>(&self, instance: &'a str) -> &'a str {
        if self.subcircuit_prefix.is_empty() {
            return instance;
        }
        match instance.strip_prefix(self.subcircuit_prefix.as_str()) {
            Some("") => "",
            Some(rest) => rest
                .strip_prefix('.')
                .or_else(|| rest.strip_prefix(':'))
                .unwrap_or(instance),
            None => instance,
        }
    }
}
