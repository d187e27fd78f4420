//! End-of-dive summary derivation.

use serde::{Deserialize, Serialize};

use crate::seed::encode_friendly;
use crate::session::DiveSession;

/// How a dive ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ending {
    /// The diver surfaced (or stopped) with oxygen to spare
    Surfaced,
    /// The supply ran dry and forced the stop
    OxygenDepleted,
}

impl std::fmt::Display for Ending {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ending::Surfaced => write!(f, "surfaced"),
            Ending::OxygenDepleted => write!(f, "oxygen_depleted"),
        }
    }
}

/// Complete summary of a dive for display on a result screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiveSummary {
    pub ending: Ending,
    pub ticks: u32,
    pub max_depth_reached: f32,
    pub discovered: usize,
    pub score: u32,
    /// Shareable code reproducing this dive's encounter stream.
    pub seed_code: String,
}

/// Select the ending based on strict priority order
#[must_use]
pub fn select_ending(session: &DiveSession) -> Ending {
    if session.oxygen_level() <= 0.0 {
        return Ending::OxygenDepleted;
    }
    Ending::Surfaced
}

/// Derive the summary of a (typically finished) session.
#[must_use]
pub fn summarize(session: &DiveSession) -> DiveSummary {
    DiveSummary {
        ending: select_ending(session),
        ticks: session.ticks,
        max_depth_reached: session.max_depth_reached,
        discovered: session.discoveries().len(),
        score: session.score(),
        seed_code: encode_friendly(session.seed),
    }
}
