//! Fathom Game Engine
//!
//! Platform-agnostic core game logic for the Fathom dive exploration game.
//! This crate provides all simulation mechanics without UI or
//! platform-specific dependencies: the host layer supplies zone reference
//! data, a tick scheduler, and rendering; the engine supplies a
//! deterministic session state machine.

pub mod constants;
pub mod data;
pub mod depth;
pub mod discovery;
pub mod encounters;
pub mod oxygen;
pub mod scheduler;
pub mod score;
pub mod seed;
pub mod session;
pub mod summary;
pub mod zones;

// Re-export commonly used types
pub use data::{Creature, LightLevel, Rarity, SizeClass, ZoneData, ZoneDef};
pub use depth::DepthGauge;
pub use discovery::{Capture, DiscoveryLog, DiscoveryRecord};
pub use encounters::{EncounterConfig, roll_encounter};
pub use oxygen::OxygenSupply;
pub use scheduler::{ManualScheduler, SessionRunner, TickScheduler};
pub use score::compute_score;
pub use seed::{decode_to_seed, encode_friendly, generate_code_from_entropy};
pub use session::{
    CaptureOutcome, DiveError, DiveSession, DiveSnapshot, PendingEncounter, TickOutcome,
};
pub use summary::{DiveSummary, Ending, select_ending, summarize};
pub use zones::{CatalogError, ZoneCatalog};

/// Trait for abstracting reference-data loading operations.
/// Platform-specific implementations should provide this.
pub trait ZoneSource {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Load zone and creature data from the platform-specific source
    ///
    /// # Errors
    ///
    /// Returns an error if the zone data cannot be loaded.
    fn load_zone_data(&self) -> Result<ZoneData, Self::Error>;
}

/// Zone source backed by the built-in reef catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinReef;

impl ZoneSource for BuiltinReef {
    type Error = std::convert::Infallible;

    fn load_zone_data(&self) -> Result<ZoneData, Self::Error> {
        Ok(ZoneData::default_reef())
    }
}

/// Main engine entry point for constructing dive sessions
pub struct DiveEngine<L>
where
    L: ZoneSource,
{
    zone_source: L,
}

impl<L> DiveEngine<L>
where
    L: ZoneSource,
{
    /// Create a new engine with the provided zone source
    pub const fn new(zone_source: L) -> Self {
        Self { zone_source }
    }

    /// Construct a fresh, validated session with the given seed.
    ///
    /// # Errors
    ///
    /// Returns an error if the zone data cannot be loaded or fails
    /// catalog validation.
    pub fn create_session(&self, seed: u64) -> Result<DiveSession, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
    {
        let data = self.zone_source.load_zone_data().map_err(Into::into)?;
        let catalog = ZoneCatalog::new(data)?;
        Ok(DiveSession::new(seed, catalog))
    }

    /// Rehydrate a previously serialized session with fresh reference
    /// data.
    ///
    /// # Errors
    ///
    /// Returns an error if the zone data cannot be loaded or fails
    /// catalog validation.
    pub fn restore_session(&self, session: DiveSession) -> Result<DiveSession, anyhow::Error>
    where
        L::Error: Into<anyhow::Error>,
    {
        let data = self.zone_source.load_zone_data().map_err(Into::into)?;
        let catalog = ZoneCatalog::new(data)?;
        Ok(session.rehydrate(catalog))
    }
}
