//! Key usage types produced by the resolver.
//!
//! Every extracted key ends in exactly one [`UsageStatus`]. A usage is built
//! once by the resolver and never modified afterwards.

use serde::Serialize;

use crate::core::{patterns::Pattern, search::Hit};

// ============================================================
// Usage Status
// ============================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UsageStatus {
    /// A template references `.Values.<key>` directly.
    Direct,

    /// No direct reference, but a helper pattern references the key or one
    /// of its parents.
    Pattern {
        pattern: Pattern,
        /// The (possibly truncated, rewritten) key the pattern matched.
        parent_key: String,
    },

    Unused,
}

// ============================================================
// Key Usage
// ============================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyUsage {
    pub key: String,
    pub status: UsageStatus,
    pub locations: Vec<Hit>,
}

impl KeyUsage {
    pub fn direct(key: impl Into<String>, locations: Vec<Hit>) -> Self {
        Self {
            key: key.into(),
            status: UsageStatus::Direct,
            locations,
        }
    }

    pub fn pattern(
        key: impl Into<String>,
        pattern: Pattern,
        parent_key: impl Into<String>,
        locations: Vec<Hit>,
    ) -> Self {
        Self {
            key: key.into(),
            status: UsageStatus::Pattern {
                pattern,
                parent_key: parent_key.into(),
            },
            locations,
        }
    }

    pub fn unused(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            status: UsageStatus::Unused,
            locations: Vec::new(),
        }
    }

    pub fn is_used(&self) -> bool {
        !matches!(self.status, UsageStatus::Unused)
    }

    pub fn is_direct(&self) -> bool {
        matches!(self.status, UsageStatus::Direct)
    }

    /// `path:line` strings for every location.
    pub fn location_strings(&self) -> Vec<String> {
        self.locations.iter().map(Hit::location).collect()
    }
}
