//! Validated zone catalog and depth lookup.
//!
//! Zones must partition the depth axis into contiguous, non-overlapping
//! bands starting at the surface. Malformed data is rejected once, at
//! construction, so `zone_for_depth` stays total afterwards.

use std::collections::{HashMap, HashSet};
use thiserror::Error;

use crate::data::{Creature, ZoneData, ZoneDef};

/// Errors raised when zone reference data violates catalog invariants.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    #[error("zone catalog contains no zones")]
    Empty,
    #[error("duplicate zone id {id}")]
    DuplicateZone { id: String },
    #[error("duplicate creature id {id}")]
    DuplicateCreature { id: String },
    #[error("zone {id} has an inverted depth range ({min:.1}..{max:.1})")]
    InvertedRange { id: String, min: f32, max: f32 },
    #[error("depth coverage must begin at the surface (zone {id} starts at {start:.1})")]
    SurfaceGap { id: String, start: f32 },
    #[error("gap in depth coverage between {prev} and {next} ({end:.1} to {start:.1})")]
    Gap {
        prev: String,
        next: String,
        end: f32,
        start: f32,
    },
    #[error("zones {prev} and {next} overlap ({next} starts at {start:.1} above {end:.1})")]
    Overlap {
        prev: String,
        next: String,
        end: f32,
        start: f32,
    },
    #[error("zone {id} has an empty creature pool")]
    EmptyPool { id: String },
    #[error("zone {zone} references unknown creature {creature}")]
    UnknownCreature { zone: String, creature: String },
}

/// Static, ordered table of depth bands plus the creature index.
/// Pure lookup structure; safe to share read-only across sessions.
#[derive(Debug, Clone, PartialEq)]
pub struct ZoneCatalog {
    zones: Vec<ZoneDef>,
    creatures: HashMap<String, Creature>,
    max_depth: f32,
}

impl ZoneCatalog {
    /// Validate reference data and build the catalog.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] when zones do not form a contiguous
    /// partition of `[0, max_depth]`, when a pool is empty, or when ids
    /// are duplicated or dangling.
    pub fn new(data: ZoneData) -> Result<Self, CatalogError> {
        let ZoneData {
            mut zones,
            creatures,
        } = data;

        if zones.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut index: HashMap<String, Creature> = HashMap::with_capacity(creatures.len());
        for creature in creatures {
            if index.insert(creature.id.clone(), creature.clone()).is_some() {
                return Err(CatalogError::DuplicateCreature { id: creature.id });
            }
        }

        zones.sort_by(|a, b| a.min_depth.total_cmp(&b.min_depth));

        let mut seen = HashSet::with_capacity(zones.len());
        for zone in &zones {
            if !seen.insert(zone.id.clone()) {
                return Err(CatalogError::DuplicateZone {
                    id: zone.id.clone(),
                });
            }
            if zone.max_depth <= zone.min_depth {
                return Err(CatalogError::InvertedRange {
                    id: zone.id.clone(),
                    min: zone.min_depth,
                    max: zone.max_depth,
                });
            }
            if zone.creatures.is_empty() {
                return Err(CatalogError::EmptyPool {
                    id: zone.id.clone(),
                });
            }
            for creature in &zone.creatures {
                if !index.contains_key(creature) {
                    return Err(CatalogError::UnknownCreature {
                        zone: zone.id.clone(),
                        creature: creature.clone(),
                    });
                }
            }
        }

        let first = &zones[0];
        if first.min_depth != 0.0 {
            return Err(CatalogError::SurfaceGap {
                id: first.id.clone(),
                start: first.min_depth,
            });
        }
        for pair in zones.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.min_depth > prev.max_depth {
                return Err(CatalogError::Gap {
                    prev: prev.id.clone(),
                    next: next.id.clone(),
                    end: prev.max_depth,
                    start: next.min_depth,
                });
            }
            if next.min_depth < prev.max_depth {
                return Err(CatalogError::Overlap {
                    prev: prev.id.clone(),
                    next: next.id.clone(),
                    end: prev.max_depth,
                    start: next.min_depth,
                });
            }
        }

        let max_depth = zones[zones.len() - 1].max_depth;
        Ok(Self {
            zones,
            creatures: index,
            max_depth,
        })
    }

    /// The zone whose `[min_depth, max_depth)` band contains `depth`.
    /// The deepest zone is closed at its floor so `max_depth` resolves.
    /// Total over `[0, max_depth]`; out-of-range depths clamp to the
    /// nearest band.
    #[must_use]
    pub fn zone_for_depth(&self, depth: f32) -> &ZoneDef {
        self.zones
            .iter()
            .find(|zone| depth < zone.max_depth)
            .unwrap_or_else(|| &self.zones[self.zones.len() - 1])
    }

    #[must_use]
    pub fn creature(&self, id: &str) -> Option<&Creature> {
        self.creatures.get(id)
    }

    /// Zones in ascending depth order.
    #[must_use]
    pub fn zones(&self) -> &[ZoneDef] {
        &self.zones
    }

    #[must_use]
    pub fn creature_count(&self) -> usize {
        self.creatures.len()
    }

    /// Floor of the deepest configured zone.
    #[must_use]
    pub const fn max_depth(&self) -> f32 {
        self.max_depth
    }
}
