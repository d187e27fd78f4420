use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::constants::DEFAULT_CREATURE_POINTS;

/// Rarity tier of a creature. Affects narrative framing and point value,
/// never encounter probability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    #[default]
    Common,
    Uncommon,
    Rare,
    Legendary,
}

impl Rarity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "common",
            Self::Uncommon => "uncommon",
            Self::Rare => "rare",
            Self::Legendary => "legendary",
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Rarity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "common" => Ok(Self::Common),
            "uncommon" => Ok(Self::Uncommon),
            "rare" => Ok(Self::Rare),
            "legendary" => Ok(Self::Legendary),
            _ => Err(()),
        }
    }
}

/// Body-size class of a creature, for presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SizeClass {
    Tiny,
    Small,
    #[default]
    Medium,
    Large,
    Giant,
}

impl SizeClass {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tiny => "tiny",
            Self::Small => "small",
            Self::Medium => "medium",
            Self::Large => "large",
            Self::Giant => "giant",
        }
    }
}

impl fmt::Display for SizeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ambient light at a depth band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LightLevel {
    #[default]
    Bright,
    Dim,
    Dark,
    Black,
}

impl LightLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bright => "bright",
            Self::Dim => "dim",
            Self::Dark => "dark",
            Self::Black => "black",
        }
    }
}

impl fmt::Display for LightLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A collectible creature in the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub rarity: Rarity,
    #[serde(default = "default_points")]
    pub points: u32,
    #[serde(default)]
    pub size: SizeClass,
}

const fn default_points() -> u32 {
    DEFAULT_CREATURE_POINTS
}

/// A depth band with its environmental descriptors and creature pool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneDef {
    pub id: String,
    pub name: String,
    pub min_depth: f32,
    pub max_depth: f32,
    #[serde(default)]
    pub light: LightLevel,
    #[serde(default = "default_temperature")]
    pub temperature: String,
    #[serde(default)]
    pub creatures: SmallVec<[String; 8]>,
}

fn default_temperature() -> String {
    String::from("temperate")
}

impl ZoneDef {
    #[must_use]
    pub fn new(
        id: &str,
        name: &str,
        min_depth: f32,
        max_depth: f32,
        light: LightLevel,
        temperature: &str,
        creatures: &[&str],
    ) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            min_depth,
            max_depth,
            light,
            temperature: temperature.to_string(),
            creatures: creatures.iter().map(|c| (*c).to_string()).collect(),
        }
    }
}

/// Container for all zone and creature reference data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ZoneData {
    #[serde(default)]
    pub zones: Vec<ZoneDef>,
    #[serde(default)]
    pub creatures: Vec<Creature>,
}

impl ZoneData {
    /// Create empty zone data (useful for tests)
    #[must_use]
    pub fn empty() -> Self {
        Self {
            zones: Vec::new(),
            creatures: Vec::new(),
        }
    }

    /// Load zone data from JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid zone data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Create zone data from pre-parsed parts
    #[must_use]
    pub fn from_parts(zones: Vec<ZoneDef>, creatures: Vec<Creature>) -> Self {
        Self { zones, creatures }
    }

    /// Built-in five-zone reef catalog spanning 0 to 1000 meters.
    /// Hosts that do not supply their own data can dive this one.
    #[must_use]
    pub fn default_reef() -> Self {
        let creature = |id: &str, name: &str, rarity: Rarity, points: u32, size: SizeClass| {
            Creature {
                id: id.to_string(),
                name: name.to_string(),
                desc: String::new(),
                rarity,
                points,
                size,
            }
        };

        let creatures = vec![
            creature("clownfish", "Clownfish", Rarity::Common, 10, SizeClass::Tiny),
            creature("parrotfish", "Parrotfish", Rarity::Common, 10, SizeClass::Small),
            creature("sea-turtle", "Green Sea Turtle", Rarity::Uncommon, 25, SizeClass::Medium),
            creature("reef-shark", "Reef Shark", Rarity::Uncommon, 25, SizeClass::Large),
            creature("lanternfish", "Lanternfish", Rarity::Common, 10, SizeClass::Tiny),
            creature("swordfish", "Swordfish", Rarity::Uncommon, 25, SizeClass::Large),
            creature("hammerhead", "Hammerhead Shark", Rarity::Rare, 50, SizeClass::Large),
            creature("anglerfish", "Anglerfish", Rarity::Rare, 50, SizeClass::Small),
            creature("gulper-eel", "Gulper Eel", Rarity::Rare, 50, SizeClass::Medium),
            creature("vampire-squid", "Vampire Squid", Rarity::Rare, 50, SizeClass::Small),
            creature("dumbo-octopus", "Dumbo Octopus", Rarity::Rare, 50, SizeClass::Small),
            creature("giant-isopod", "Giant Isopod", Rarity::Uncommon, 25, SizeClass::Small),
            creature("snailfish", "Hadal Snailfish", Rarity::Rare, 50, SizeClass::Small),
            creature("giant-squid", "Giant Squid", Rarity::Legendary, 100, SizeClass::Giant),
        ];

        let zones = vec![
            ZoneDef::new(
                "sunlit",
                "Sunlit Shallows",
                0.0,
                200.0,
                LightLevel::Bright,
                "warm",
                &["clownfish", "parrotfish", "sea-turtle", "reef-shark"],
            ),
            ZoneDef::new(
                "twilight",
                "Twilight Drop",
                200.0,
                400.0,
                LightLevel::Dim,
                "cool",
                &["lanternfish", "swordfish", "hammerhead"],
            ),
            ZoneDef::new(
                "midnight",
                "Midnight Reach",
                400.0,
                600.0,
                LightLevel::Dark,
                "cold",
                &["anglerfish", "gulper-eel", "vampire-squid"],
            ),
            ZoneDef::new(
                "abyssal",
                "Abyssal Plain",
                600.0,
                800.0,
                LightLevel::Black,
                "frigid",
                &["dumbo-octopus", "giant-isopod"],
            ),
            ZoneDef::new(
                "hadal",
                "Hadal Trench",
                800.0,
                1_000.0,
                LightLevel::Black,
                "near-freezing",
                &["snailfish", "giant-squid"],
            ),
        ];

        Self { zones, creatures }
    }
}
