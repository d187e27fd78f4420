//! Derived session scoring.
//!
//! Score is always a pure fold over the discovery ledger; nothing in the
//! engine stores a score field, so ledger and score cannot drift.

use crate::discovery::DiscoveryLog;
use crate::zones::ZoneCatalog;

/// Sum of point values over all discovered creatures.
///
/// Ids missing from the catalog contribute nothing; the session path never
/// produces them, but a directly-populated ledger is tolerated.
#[must_use]
pub fn compute_score(log: &DiscoveryLog, catalog: &ZoneCatalog) -> u32 {
    log.records()
        .iter()
        .filter_map(|record| catalog.creature(&record.creature))
        .map(|creature| creature.points)
        .sum()
}
