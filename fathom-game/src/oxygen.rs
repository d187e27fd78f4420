//! Breath resource tracking.

use serde::{Deserialize, Serialize};

use crate::constants::OXYGEN_MAX;

/// Depletable oxygen supply, clamped to `[0, 100]`.
///
/// Depletion happens once per simulated tick while a dive is active;
/// the rate is a fixed constant and never scales with depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OxygenSupply {
    level: f32,
}

impl Default for OxygenSupply {
    fn default() -> Self {
        Self::full()
    }
}

impl OxygenSupply {
    pub const MAX: f32 = OXYGEN_MAX;

    /// A freshly topped-up supply.
    #[must_use]
    pub const fn full() -> Self {
        Self { level: Self::MAX }
    }

    /// A supply at an arbitrary level, clamped into range.
    #[must_use]
    pub fn with_level(level: f32) -> Self {
        Self {
            level: level.clamp(0.0, Self::MAX),
        }
    }

    #[must_use]
    pub const fn level(&self) -> f32 {
        self.level
    }

    /// Consume `amount` units, clamping at empty. Returns the new level.
    pub fn deplete(&mut self, amount: f32) -> f32 {
        self.level = (self.level - amount.max(0.0)).max(0.0);
        self.level
    }

    /// Restore the supply to maximum.
    pub const fn refill(&mut self) {
        self.level = Self::MAX;
    }

    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.level <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FLOAT_EPSILON, OXYGEN_DEPLETION_PER_TICK};

    #[test]
    fn deplete_clamps_at_empty() {
        let mut supply = OxygenSupply::with_level(1.0);
        assert_eq!(supply.deplete(0.4), 0.6);
        assert_eq!(supply.deplete(5.0), 0.0);
        assert!(supply.is_exhausted());
        assert_eq!(supply.deplete(1.0), 0.0);
    }

    #[test]
    fn with_level_clamps_into_range() {
        assert_eq!(OxygenSupply::with_level(250.0).level(), OxygenSupply::MAX);
        assert_eq!(OxygenSupply::with_level(-3.0).level(), 0.0);
    }

    #[test]
    fn negative_amounts_never_replenish() {
        let mut supply = OxygenSupply::with_level(40.0);
        assert_eq!(supply.deplete(-10.0), 40.0);
    }

    #[test]
    fn refill_restores_max() {
        let mut supply = OxygenSupply::with_level(12.5);
        supply.refill();
        assert_eq!(supply.level(), OxygenSupply::MAX);
        assert!(!supply.is_exhausted());
    }

    #[test]
    fn one_tick_from_full_leaves_ninety_nine_and_a_half() {
        let mut supply = OxygenSupply::full();
        let level = supply.deplete(OXYGEN_DEPLETION_PER_TICK);
        assert!((level - 99.5).abs() < FLOAT_EPSILON);
    }
}
