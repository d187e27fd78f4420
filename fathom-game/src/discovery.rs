//! Per-session discovery ledger.
//!
//! Records each uniquely captured creature with its capture context.
//! Capturing an already-discovered creature is a normal, expected no-op,
//! never an error; records are immutable for the session's lifetime and
//! enumeration preserves insertion order.

use serde::{Deserialize, Serialize};

/// Permanent record of a creature's first capture in a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryRecord {
    pub creature: String,
    /// Zone the encounter was generated in.
    pub zone: String,
    /// Depth at the moment of capture.
    pub depth: f32,
    /// Position in the session's discovery order, starting at 0.
    pub sequence: u32,
}

/// Outcome of a capture attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Capture {
    /// Whether this capture created a new record (and thus awards points).
    pub awarded: bool,
    pub record: DiscoveryRecord,
}

/// Insertion-ordered set of discovered creatures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DiscoveryLog {
    records: Vec<DiscoveryRecord>,
}

impl DiscoveryLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn contains(&self, creature: &str) -> bool {
        self.records.iter().any(|record| record.creature == creature)
    }

    /// Commit a capture. Idempotent: a repeat capture returns the existing
    /// record with `awarded: false` and changes nothing.
    pub fn capture(&mut self, creature: &str, zone: &str, depth: f32) -> Capture {
        if let Some(existing) = self.records.iter().find(|r| r.creature == creature) {
            return Capture {
                awarded: false,
                record: existing.clone(),
            };
        }
        let record = DiscoveryRecord {
            creature: creature.to_string(),
            zone: zone.to_string(),
            depth,
            sequence: u32::try_from(self.records.len()).unwrap_or(u32::MAX),
        };
        self.records.push(record.clone());
        Capture {
            awarded: true,
            record,
        }
    }

    /// Records in discovery order.
    #[must_use]
    pub fn records(&self) -> &[DiscoveryRecord] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
