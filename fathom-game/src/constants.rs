//! Centralized balance and tuning constants for Fathom game logic.
//!
//! These values define the deterministic math for the core simulation.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control, rather than through external
//! JSON assets.

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_DIVE_START: &str = "log.dive.start";
pub(crate) const LOG_DIVE_STOP: &str = "log.dive.stop";
pub(crate) const LOG_OXYGEN_EXHAUSTED: &str = "log.oxygen.exhausted";
pub(crate) const LOG_OXYGEN_REFILLED: &str = "log.oxygen.refilled";
pub(crate) const LOG_ENCOUNTER_SPOTTED: &str = "log.encounter.spotted";
pub(crate) const LOG_CREATURE_CAPTURED: &str = "log.capture.awarded";
pub(crate) const LOG_ALREADY_DISCOVERED: &str = "log.capture.duplicate";

// Oxygen tuning ------------------------------------------------------------
pub(crate) const OXYGEN_MAX: f32 = 100.0;
pub(crate) const OXYGEN_DEPLETION_PER_TICK: f32 = 0.5;
// Hard floor below which further descent is refused.
pub(crate) const DESCEND_MIN_OXYGEN: f32 = 10.0;

// Encounter tuning ---------------------------------------------------------
pub(crate) const ENCOUNTER_BASE_CHANCE: f32 = 0.05;

// Depth parameters ---------------------------------------------------------
pub(crate) const DEFAULT_MAX_DEPTH: f32 = 1_000.0;

// Reference-data defaults --------------------------------------------------
pub(crate) const DEFAULT_CREATURE_POINTS: u32 = 10;

#[cfg(test)]
pub(crate) const FLOAT_EPSILON: f32 = 1e-6;
