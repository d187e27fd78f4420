//! Dive session orchestration.
//!
//! A `DiveSession` composes the oxygen supply, depth gauge, encounter
//! roll, and discovery ledger into a single two-state machine (inactive /
//! active). Every command is synchronous, runs to completion, and either
//! succeeds or leaves the session exactly as it was. The engine never
//! schedules its own ticks; an external scheduler calls [`DiveSession::tick`]
//! while the session reports itself active.

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    DESCEND_MIN_OXYGEN, LOG_ALREADY_DISCOVERED, LOG_CREATURE_CAPTURED, LOG_DIVE_START,
    LOG_DIVE_STOP, LOG_ENCOUNTER_SPOTTED, LOG_OXYGEN_EXHAUSTED, LOG_OXYGEN_REFILLED,
    OXYGEN_DEPLETION_PER_TICK,
};
use crate::depth::DepthGauge;
use crate::discovery::{DiscoveryLog, DiscoveryRecord};
use crate::encounters::{EncounterConfig, roll_encounter};
use crate::oxygen::OxygenSupply;
use crate::score::compute_score;
use crate::zones::ZoneCatalog;

/// Precondition violations reported to the caller. Never fatal; the
/// session state is untouched when one of these is returned.
#[derive(Debug, Error, PartialEq)]
pub enum DiveError {
    #[error("cannot start a dive with an empty oxygen supply")]
    CannotStart,
    #[error("oxygen too low to descend ({level:.1} below {required:.1})")]
    InsufficientOxygen { level: f32, required: f32 },
    #[error("no encounter is pending")]
    NoPendingEncounter,
}

/// An encounter surfaced to the player, tied to the zone that was active
/// at generation time. At most one exists; a newer one replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingEncounter {
    pub creature: String,
    pub zone: String,
}

/// Result of a single simulation tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    /// Whether the session is still active after the tick.
    pub active: bool,
    pub oxygen: f32,
    /// Set when this tick drained the supply and stopped the dive.
    pub forced_stop: bool,
    /// Creature surfaced as the new pending encounter, if any.
    pub encounter: Option<String>,
}

/// Result of a successful capture command.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureOutcome {
    /// False when the creature was already in the ledger.
    pub awarded: bool,
    pub record: DiscoveryRecord,
    /// Derived session score after the capture.
    pub score: u32,
}

/// Read-only projection of the session for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiveSnapshot {
    pub depth: f32,
    pub oxygen: f32,
    pub active: bool,
    /// Id of the zone containing the current depth; `None` only when no
    /// catalog is attached.
    pub zone: Option<String>,
    pub pending: Option<PendingEncounter>,
    pub discovered_count: usize,
    pub score: u32,
    pub discovered: Vec<DiscoveryRecord>,
}

/// A single dive: depth, oxygen, pending encounter, and discovery ledger,
/// driven by external ticks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiveSession {
    pub seed: u64,
    depth: DepthGauge,
    oxygen: OxygenSupply,
    active: bool,
    pending: Option<PendingEncounter>,
    discoveries: DiscoveryLog,
    #[serde(default)]
    encounter_cfg: EncounterConfig,
    /// Active ticks elapsed over the session's lifetime.
    #[serde(default)]
    pub ticks: u32,
    #[serde(default)]
    pub max_depth_reached: f32,
    pub logs: Vec<String>,
    #[serde(skip)]
    rng: Option<ChaCha20Rng>,
    #[serde(skip)]
    catalog: Option<ZoneCatalog>,
}

impl DiveSession {
    /// A fresh session at the surface with a full supply, seeded for
    /// reproducible encounter sequences.
    #[must_use]
    pub fn new(seed: u64, catalog: ZoneCatalog) -> Self {
        Self {
            seed,
            depth: DepthGauge::new(catalog.max_depth()),
            oxygen: OxygenSupply::full(),
            active: false,
            pending: None,
            discoveries: DiscoveryLog::new(),
            encounter_cfg: EncounterConfig::default(),
            ticks: 0,
            max_depth_reached: 0.0,
            logs: Vec::new(),
            rng: Some(ChaCha20Rng::seed_from_u64(seed)),
            catalog: Some(catalog),
        }
    }

    /// Replace the encounter tunables for this session.
    #[must_use]
    pub fn with_encounter_config(mut self, cfg: EncounterConfig) -> Self {
        self.encounter_cfg = cfg;
        self
    }

    /// Re-attach reference data and randomness after deserialization.
    /// The RNG restarts from the stored seed.
    #[must_use]
    pub fn rehydrate(mut self, catalog: ZoneCatalog) -> Self {
        self.catalog = Some(catalog);
        if self.rng.is_none() {
            self.rng = Some(ChaCha20Rng::seed_from_u64(self.seed));
        }
        self
    }

    /// Deterministically reseed the encounter stream.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = Some(ChaCha20Rng::seed_from_u64(seed));
    }

    // Command surface ------------------------------------------------------

    /// Activate the session. Starting an already-active session is a
    /// no-op success.
    ///
    /// # Errors
    ///
    /// Returns [`DiveError::CannotStart`] when the supply is exhausted.
    pub fn start(&mut self) -> Result<(), DiveError> {
        if self.oxygen.is_exhausted() {
            return Err(DiveError::CannotStart);
        }
        if !self.active {
            self.active = true;
            self.logs.push(String::from(LOG_DIVE_START));
        }
        Ok(())
    }

    /// Deactivate the session. Oxygen decay and encounter generation halt
    /// until the next `start`; oxygen is not replenished.
    pub fn stop(&mut self) {
        if self.active {
            self.active = false;
            self.logs.push(String::from(LOG_DIVE_STOP));
        }
    }

    /// Advance the simulation by one tick.
    ///
    /// Inactive sessions ignore ticks entirely, so a scheduler tick that
    /// fires after a stop cannot mutate anything. An active tick depletes
    /// oxygen first; reaching zero stops the dive in the same transition
    /// and skips the encounter roll.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.active {
            return TickOutcome {
                active: false,
                oxygen: self.oxygen.level(),
                forced_stop: false,
                encounter: None,
            };
        }

        self.ticks = self.ticks.saturating_add(1);
        let level = self.oxygen.deplete(OXYGEN_DEPLETION_PER_TICK);
        if self.oxygen.is_exhausted() {
            self.active = false;
            self.logs.push(String::from(LOG_OXYGEN_EXHAUSTED));
            return TickOutcome {
                active: false,
                oxygen: level,
                forced_stop: true,
                encounter: None,
            };
        }

        let encounter = self.roll_pending_encounter();
        TickOutcome {
            active: true,
            oxygen: level,
            forced_stop: false,
            encounter,
        }
    }

    fn roll_pending_encounter(&mut self) -> Option<String> {
        let catalog = self.catalog.as_ref()?;
        let rng = self.rng.as_mut()?;
        let zone = catalog.zone_for_depth(self.depth.depth());
        let creature = roll_encounter(
            zone,
            self.pending.as_ref().map(|p| p.creature.as_str()),
            &self.discoveries,
            &self.encounter_cfg,
            rng,
        )?;
        // Replace policy: a new encounter overwrites an unresolved one.
        self.pending = Some(PendingEncounter {
            creature: creature.clone(),
            zone: zone.id.clone(),
        });
        self.logs.push(String::from(LOG_ENCOUNTER_SPOTTED));
        Some(creature)
    }

    /// Move down by `step`. Valid in either state; refused while the
    /// supply is below the descent floor.
    ///
    /// # Errors
    ///
    /// Returns [`DiveError::InsufficientOxygen`] with depth unchanged when
    /// oxygen is below the required minimum.
    pub fn descend(&mut self, step: f32) -> Result<f32, DiveError> {
        let level = self.oxygen.level();
        if level < DESCEND_MIN_OXYGEN {
            return Err(DiveError::InsufficientOxygen {
                level,
                required: DESCEND_MIN_OXYGEN,
            });
        }
        let depth = self.depth.descend(step);
        if depth > self.max_depth_reached {
            self.max_depth_reached = depth;
        }
        Ok(depth)
    }

    /// Move up by `step`. Valid in either state, never guarded.
    pub fn ascend(&mut self, step: f32) -> f32 {
        self.depth.ascend(step)
    }

    /// Commit the pending encounter into the discovery ledger.
    ///
    /// Capturing an already-discovered creature clears the pending slot
    /// and reports `awarded: false` without touching the ledger.
    ///
    /// # Errors
    ///
    /// Returns [`DiveError::NoPendingEncounter`] when nothing is pending.
    pub fn capture(&mut self) -> Result<CaptureOutcome, DiveError> {
        let Some(pending) = self.pending.take() else {
            return Err(DiveError::NoPendingEncounter);
        };
        let capture = self
            .discoveries
            .capture(&pending.creature, &pending.zone, self.depth.depth());
        self.logs.push(String::from(if capture.awarded {
            LOG_CREATURE_CAPTURED
        } else {
            LOG_ALREADY_DISCOVERED
        }));
        Ok(CaptureOutcome {
            awarded: capture.awarded,
            record: capture.record,
            score: self.score(),
        })
    }

    /// Top the supply back up, e.g. after resurfacing. Host-initiated;
    /// never part of the tick loop.
    pub fn refill_oxygen(&mut self) {
        self.oxygen.refill();
        self.logs.push(String::from(LOG_OXYGEN_REFILLED));
    }

    /// Force the supply to a specific level, clamped into range. Dropping
    /// it to zero while active stops the dive, keeping the
    /// active-implies-oxygen invariant.
    pub fn set_oxygen_level(&mut self, level: f32) {
        self.oxygen = OxygenSupply::with_level(level);
        if self.active && self.oxygen.is_exhausted() {
            self.active = false;
            self.logs.push(String::from(LOG_OXYGEN_EXHAUSTED));
        }
    }

    // Query surface --------------------------------------------------------

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub const fn depth(&self) -> f32 {
        self.depth.depth()
    }

    #[must_use]
    pub const fn oxygen_level(&self) -> f32 {
        self.oxygen.level()
    }

    #[must_use]
    pub const fn pending(&self) -> Option<&PendingEncounter> {
        self.pending.as_ref()
    }

    #[must_use]
    pub const fn discoveries(&self) -> &DiscoveryLog {
        &self.discoveries
    }

    #[must_use]
    pub const fn catalog(&self) -> Option<&ZoneCatalog> {
        self.catalog.as_ref()
    }

    #[must_use]
    pub const fn encounter_config(&self) -> &EncounterConfig {
        &self.encounter_cfg
    }

    /// Derived score: pure fold over the ledger, zero without a catalog.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.catalog
            .as_ref()
            .map_or(0, |catalog| compute_score(&self.discoveries, catalog))
    }

    /// Immutable projection for the presentation layer.
    #[must_use]
    pub fn snapshot(&self) -> DiveSnapshot {
        DiveSnapshot {
            depth: self.depth.depth(),
            oxygen: self.oxygen.level(),
            active: self.active,
            zone: self
                .catalog
                .as_ref()
                .map(|catalog| catalog.zone_for_depth(self.depth.depth()).id.clone()),
            pending: self.pending.clone(),
            discovered_count: self.discoveries.len(),
            score: self.score(),
            discovered: self.discoveries.records().to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::FLOAT_EPSILON;
    use crate::data::{LightLevel, ZoneData, ZoneDef};

    fn reef_session(seed: u64) -> DiveSession {
        let catalog = ZoneCatalog::new(ZoneData::default_reef()).unwrap();
        DiveSession::new(seed, catalog)
    }

    fn single_creature_session(cfg: EncounterConfig) -> DiveSession {
        let data = ZoneData::from_parts(
            vec![ZoneDef::new(
                "only",
                "Only",
                0.0,
                100.0,
                LightLevel::Bright,
                "warm",
                &["mola"],
            )],
            vec![crate::data::Creature {
                id: String::from("mola"),
                name: String::from("Ocean Sunfish"),
                desc: String::new(),
                rarity: crate::data::Rarity::Rare,
                points: 50,
                size: crate::data::SizeClass::Giant,
            }],
        );
        DiveSession::new(1, ZoneCatalog::new(data).unwrap()).with_encounter_config(cfg)
    }

    #[test]
    fn start_then_one_tick_depletes_half_a_unit() {
        let mut session = reef_session(42);
        session.start().unwrap();
        assert!(session.is_active());
        let outcome = session.tick();
        assert!((outcome.oxygen - 99.5).abs() < FLOAT_EPSILON);
        assert!(outcome.active);
        assert!(!outcome.forced_stop);
    }

    #[test]
    fn start_with_empty_supply_is_rejected() {
        let mut session = reef_session(42);
        session.set_oxygen_level(0.0);
        assert_eq!(session.start(), Err(DiveError::CannotStart));
        assert!(!session.is_active());
        assert_eq!(session.oxygen_level(), 0.0);
    }

    #[test]
    fn start_is_idempotent_while_active() {
        let mut session = reef_session(42);
        session.start().unwrap();
        let logs_before = session.logs.len();
        session.start().unwrap();
        assert!(session.is_active());
        assert_eq!(session.logs.len(), logs_before);
    }

    #[test]
    fn exhaustion_forces_stop_in_the_same_tick() {
        let mut session = reef_session(42).with_encounter_config(EncounterConfig::never());
        session.start().unwrap();
        session.set_oxygen_level(0.5);
        let outcome = session.tick();
        assert!(outcome.forced_stop);
        assert!(!outcome.active);
        assert_eq!(outcome.oxygen, 0.0);
        assert!(!session.is_active());
        assert!(session.logs.iter().any(|l| l == "log.oxygen.exhausted"));
    }

    #[test]
    fn ticks_after_stop_change_nothing() {
        let mut session = reef_session(42).with_encounter_config(EncounterConfig::always());
        session.start().unwrap();
        session.tick();
        session.stop();
        let before = session.snapshot();
        for _ in 0..10 {
            let outcome = session.tick();
            assert!(!outcome.active);
            assert!(!outcome.forced_stop);
            assert_eq!(outcome.encounter, None);
        }
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn oxygen_is_monotonic_while_active() {
        let mut session = reef_session(42).with_encounter_config(EncounterConfig::never());
        session.start().unwrap();
        let mut prev = session.oxygen_level();
        for _ in 0..50 {
            let outcome = session.tick();
            assert!(outcome.oxygen <= prev);
            assert!(outcome.oxygen >= 0.0);
            prev = outcome.oxygen;
        }
    }

    #[test]
    fn two_hundred_ticks_drain_a_full_supply() {
        let mut session = reef_session(42).with_encounter_config(EncounterConfig::never());
        session.start().unwrap();
        let mut forced = false;
        for i in 0..250 {
            let outcome = session.tick();
            if outcome.forced_stop {
                assert_eq!(i, 199, "forced stop on the 200th tick");
                forced = true;
                break;
            }
        }
        assert!(forced);
        assert_eq!(session.oxygen_level(), 0.0);
        assert!(!session.is_active());
    }

    #[test]
    fn descend_is_refused_below_the_oxygen_floor() {
        let mut session = reef_session(42);
        session.descend(150.0).unwrap();
        session.set_oxygen_level(5.0);
        let err = session.descend(100.0).unwrap_err();
        assert_eq!(
            err,
            DiveError::InsufficientOxygen {
                level: 5.0,
                required: 10.0,
            }
        );
        assert_eq!(session.depth(), 150.0);
    }

    #[test]
    fn movement_is_legal_while_inactive() {
        let mut session = reef_session(42);
        assert!(!session.is_active());
        assert_eq!(session.descend(120.0).unwrap(), 120.0);
        assert_eq!(session.ascend(40.0), 80.0);
    }

    #[test]
    fn descend_clamps_to_the_deepest_zone() {
        let mut session = reef_session(42);
        assert_eq!(session.snapshot().zone.as_deref(), Some("sunlit"));
        let depth = session.descend(1_500.0).unwrap();
        assert_eq!(depth, 1_000.0);
        assert_eq!(session.snapshot().zone.as_deref(), Some("hadal"));
        assert_eq!(session.max_depth_reached, 1_000.0);
    }

    #[test]
    fn capture_awards_once_then_reports_duplicates() {
        let mut session = single_creature_session(EncounterConfig::always());
        session.start().unwrap();
        let outcome = session.tick();
        assert_eq!(outcome.encounter.as_deref(), Some("mola"));

        let first = session.capture().unwrap();
        assert!(first.awarded);
        assert_eq!(first.score, 50);
        assert_eq!(session.discoveries().len(), 1);

        // No pending encounter anymore: the second capture is an error.
        assert_eq!(session.capture().unwrap_err(), DiveError::NoPendingEncounter);
        assert_eq!(session.score(), 50);

        // Re-encounter the same creature and capture again: no new award.
        let outcome = session.tick();
        assert_eq!(outcome.encounter.as_deref(), Some("mola"));
        let second = session.capture().unwrap();
        assert!(!second.awarded);
        assert_eq!(second.score, 50);
        assert_eq!(session.discoveries().len(), 1);
    }

    #[test]
    fn capture_without_pending_is_an_error() {
        let mut session = reef_session(42);
        assert_eq!(session.capture().unwrap_err(), DiveError::NoPendingEncounter);
        assert!(session.discoveries().is_empty());
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn encounters_come_from_the_active_zone() {
        let mut session = reef_session(7).with_encounter_config(EncounterConfig::always());
        session.descend(900.0).unwrap();
        session.start().unwrap();
        let outcome = session.tick();
        let creature = outcome.encounter.expect("chance 1.0 must fire");
        let catalog = session.catalog().unwrap();
        let hadal = catalog.zone_for_depth(900.0);
        assert!(hadal.creatures.iter().any(|id| id == &creature));
        assert_eq!(session.pending().unwrap().zone, "hadal");
    }

    #[test]
    fn score_always_matches_the_ledger_fold() {
        let mut session = reef_session(99).with_encounter_config(EncounterConfig::always());
        session.start().unwrap();
        for _ in 0..30 {
            session.tick();
            if session.pending().is_some() {
                session.capture().unwrap();
            }
        }
        let catalog = session.catalog().unwrap();
        let expected: u32 = session
            .discoveries()
            .records()
            .iter()
            .filter_map(|r| catalog.creature(&r.creature))
            .map(|c| c.points)
            .sum();
        assert_eq!(session.score(), expected);
        assert_eq!(session.snapshot().score, expected);
    }

    #[test]
    fn refill_restores_the_supply() {
        let mut session = reef_session(42);
        session.set_oxygen_level(2.0);
        session.refill_oxygen();
        assert_eq!(session.oxygen_level(), OxygenSupply::MAX);
        assert!(session.logs.iter().any(|l| l == "log.oxygen.refilled"));
    }

    #[test]
    fn serde_roundtrip_preserves_ledger_and_score_after_rehydrate() {
        let mut session = single_creature_session(EncounterConfig::always());
        session.start().unwrap();
        session.tick();
        session.capture().unwrap();
        session.descend(60.0).unwrap();

        let json = serde_json::to_string(&session).unwrap();
        let restored: DiveSession = serde_json::from_str(&json).unwrap();
        let restored = restored.rehydrate(session.catalog().unwrap().clone());

        assert_eq!(restored.depth(), session.depth());
        assert_eq!(restored.oxygen_level(), session.oxygen_level());
        assert_eq!(restored.discoveries().records(), session.discoveries().records());
        assert_eq!(restored.score(), 50);
        assert_eq!(restored.seed, session.seed);
    }
}
