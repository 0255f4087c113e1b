//! # Configuration
//!
//! Knobs for the invariant checkers.
//!
//! Both options are off by default: one conflict message per conflicting
//! peer, and no sign check on dimensions.

use serde::Deserialize;

/// Main canvas configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Report each overlap/collision message at most once per candidate
    ///
    /// Off: one message per conflicting frame or sibling circle.
    pub dedupe_conflicts: bool,

    /// Reject zero or negative width, height and diameter
    ///
    /// Off: such values pass and yield degenerate or inverted shapes.
    pub require_positive_dimensions: bool,
}

impl CanvasConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set conflict deduplication
    pub fn with_dedupe_conflicts(mut self, dedupe: bool) -> Self {
        self.dedupe_conflicts = dedupe;
        self
    }

    /// Set the positive dimension check
    pub fn with_positive_dimensions(mut self, require: bool) -> Self {
        self.require_positive_dimensions = require;
        self
    }

    /// Read a configuration from JSON
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
