//! Encounter roll and creature selection logic.
//!
//! Pure functions over injected randomness: one uniform draw decides
//! whether an encounter happens at all, a second uniform draw picks from
//! the active zone's pool. The orchestrator decides whether and how to
//! store the result.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::ENCOUNTER_BASE_CHANCE;
use crate::data::ZoneDef;
use crate::discovery::DiscoveryLog;

/// Tunables for the per-tick encounter roll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EncounterConfig {
    /// Probability of an encounter on each active tick.
    #[serde(default = "EncounterConfig::default_chance")]
    pub chance: f32,
    /// When set, creatures already in the discovery ledger are excluded
    /// from the pool. Off by default: repeats are allowed.
    #[serde(default)]
    pub skip_discovered: bool,
}

impl EncounterConfig {
    const fn default_chance() -> f32 {
        ENCOUNTER_BASE_CHANCE
    }

    /// A config that fires on every tick. Useful for tests and scripted
    /// scenarios.
    #[must_use]
    pub const fn always() -> Self {
        Self {
            chance: 1.0,
            skip_discovered: false,
        }
    }

    /// A config that never fires.
    #[must_use]
    pub const fn never() -> Self {
        Self {
            chance: 0.0,
            skip_discovered: false,
        }
    }
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            chance: Self::default_chance(),
            skip_discovered: false,
        }
    }
}

/// Roll for an encounter in `zone`.
///
/// Returns the creature id to surface as the new pending encounter, or
/// `None` when the roll fails, the effective pool is empty, or the drawn
/// creature is already the active pending encounter (re-surfacing the same
/// candidate is always suppressed).
pub fn roll_encounter<R: Rng>(
    zone: &ZoneDef,
    pending: Option<&str>,
    discovered: &DiscoveryLog,
    cfg: &EncounterConfig,
    rng: &mut R,
) -> Option<String> {
    if zone.creatures.is_empty() {
        return None;
    }

    let roll: f32 = rng.random();
    if roll >= cfg.chance {
        return None;
    }

    let pool: Vec<&String> = if cfg.skip_discovered {
        zone.creatures
            .iter()
            .filter(|id| !discovered.contains(id.as_str()))
            .collect()
    } else {
        zone.creatures.iter().collect()
    };
    if pool.is_empty() {
        return None;
    }

    let idx = rng.random_range(0..pool.len());
    let candidate = pool[idx];
    if pending == Some(candidate.as_str()) {
        return None;
    }
    Some(candidate.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::LightLevel;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    fn zone(creatures: &[&str]) -> ZoneDef {
        ZoneDef::new("reef", "Reef", 0.0, 200.0, LightLevel::Bright, "warm", creatures)
    }

    #[test]
    fn zero_chance_never_fires() {
        let zone = zone(&["clownfish", "sea-turtle"]);
        let log = DiscoveryLog::new();
        let cfg = EncounterConfig::never();
        let mut rng = ChaCha20Rng::seed_from_u64(7);
        for _ in 0..100 {
            assert_eq!(roll_encounter(&zone, None, &log, &cfg, &mut rng), None);
        }
    }

    #[test]
    fn certain_chance_always_picks_from_the_pool() {
        let zone = zone(&["clownfish", "sea-turtle", "reef-shark"]);
        let log = DiscoveryLog::new();
        let cfg = EncounterConfig::always();
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        for _ in 0..100 {
            let pick = roll_encounter(&zone, None, &log, &cfg, &mut rng)
                .expect("chance 1.0 must fire");
            assert!(zone.creatures.iter().any(|id| id == &pick));
        }
    }

    #[test]
    fn the_pending_creature_is_never_resurfaced() {
        let zone = zone(&["clownfish"]);
        let log = DiscoveryLog::new();
        let cfg = EncounterConfig::always();
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        // Single-creature pool: with a pending clownfish every roll is
        // suppressed.
        for _ in 0..20 {
            assert_eq!(
                roll_encounter(&zone, Some("clownfish"), &log, &cfg, &mut rng),
                None
            );
        }
        // Without a pending encounter the same pool always surfaces it.
        assert_eq!(
            roll_encounter(&zone, None, &log, &cfg, &mut rng),
            Some(String::from("clownfish"))
        );
    }

    #[test]
    fn skip_discovered_drains_the_pool() {
        let zone = zone(&["clownfish", "sea-turtle"]);
        let mut log = DiscoveryLog::new();
        log.capture("clownfish", "reef", 10.0);
        let cfg = EncounterConfig {
            chance: 1.0,
            skip_discovered: true,
        };
        let mut rng = ChaCha20Rng::seed_from_u64(5);
        for _ in 0..50 {
            assert_eq!(
                roll_encounter(&zone, None, &log, &cfg, &mut rng),
                Some(String::from("sea-turtle"))
            );
        }
        log.capture("sea-turtle", "reef", 10.0);
        assert_eq!(roll_encounter(&zone, None, &log, &cfg, &mut rng), None);
    }

    #[test]
    fn discovered_creatures_repeat_by_default() {
        let zone = zone(&["clownfish"]);
        let mut log = DiscoveryLog::new();
        log.capture("clownfish", "reef", 10.0);
        let cfg = EncounterConfig::always();
        let mut rng = ChaCha20Rng::seed_from_u64(9);
        assert_eq!(
            roll_encounter(&zone, None, &log, &cfg, &mut rng),
            Some(String::from("clownfish"))
        );
    }
}
