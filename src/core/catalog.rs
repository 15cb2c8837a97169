/// Catalog data: the race allow-list and the augmentation tables, with
/// built-in defaults and RON overrides.
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("empty catalog: {0}")]
    Empty(&'static str),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Races the pipeline accepts from the generator collaborator. Matching
/// is case-insensitive; entries here are stored lowercase.
const DEFAULT_RACES: &[&str] = &[
    "human",
    "elf",
    "half-elf",
    "dwarf",
    "halfling",
    "gnome",
    "half-orc",
    "orc",
    "tiefling",
    "dragonborn",
    "goliath",
    "kenku",
    "lizardman",
    "lizardwoman",
    "aasimar",
    "firbolg",
    "tabaxi",
    "triton",
    "goblin",
    "kobold",
];

const DEFAULT_CLASSES: &[&str] = &[
    "Barbarian",
    "Bard",
    "Cleric",
    "Druid",
    "Fighter",
    "Monk",
    "Paladin",
    "Ranger",
    "Rogue",
    "Sorcerer",
    "Warlock",
    "Wizard",
    "Artificer",
];

const DEFAULT_GODS: &[&str] = &[
    "Aria",
    "The Bleeding Mother",
    "The Luminous Weaver",
    "The Scythe",
    "The Sapphire Dragon",
    "The Chalice of Wealth",
    "Ungeseth",
    "The Angler",
    "Razor",
    "The Eyes",
];

const DEFAULT_BLESSINGS: &[&str] = &[
    "Animosi",
    "Banshee",
    "Blood Healer",
    "Burner",
    "Cloner",
    "Eye",
    "Gravitron",
    "Greenwarden",
    "Magnetron",
    "Mimic",
    "Nymph",
    "Oblivion",
    "Shadow",
    "Shiver",
    "Silent",
    "Silk",
    "Singer",
    "Skin Healer",
    "Stoneskin",
    "Storm",
    "Strongarm",
    "Swift",
    "Telky",
    "Temporan",
    "Whisper",
    "WindWeaver",
];

/// The four fixed catalogs the pipeline draws from: the race allow-list,
/// character classes, deities, and silver-blood blessings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalogs {
    pub races: Vec<String>,
    pub classes: Vec<String>,
    pub gods: Vec<String>,
    pub blessings: Vec<String>,
}

impl Default for Catalogs {
    fn default() -> Self {
        fn owned(table: &[&str]) -> Vec<String> {
            table.iter().map(|s| s.to_string()).collect()
        }
        Catalogs {
            races: owned(DEFAULT_RACES),
            classes: owned(DEFAULT_CLASSES),
            gods: owned(DEFAULT_GODS),
            blessings: owned(DEFAULT_BLESSINGS),
        }
    }
}

// RON override helper: any catalog left out of the file keeps its default.

#[derive(Debug, Default, Deserialize)]
#[serde(rename = "Catalogs")]
struct RonCatalogs {
    #[serde(default)]
    races: Vec<String>,
    #[serde(default)]
    classes: Vec<String>,
    #[serde(default)]
    gods: Vec<String>,
    #[serde(default)]
    blessings: Vec<String>,
}

impl Catalogs {
    /// Load catalog overrides from a RON file, merged over the defaults.
    pub fn load_from_ron(path: &Path) -> Result<Catalogs, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse catalog overrides from a RON string, merged over the
    /// defaults. An omitted (or empty) catalog keeps the built-in table.
    pub fn parse_ron(input: &str) -> Result<Catalogs, CatalogError> {
        let raw: RonCatalogs = ron::from_str(input)?;
        let mut catalogs = Catalogs::default();
        if !raw.races.is_empty() {
            catalogs.races = raw.races;
        }
        if !raw.classes.is_empty() {
            catalogs.classes = raw.classes;
        }
        if !raw.gods.is_empty() {
            catalogs.gods = raw.gods;
        }
        if !raw.blessings.is_empty() {
            catalogs.blessings = raw.blessings;
        }
        catalogs.validate()?;
        Ok(catalogs)
    }

    /// Every catalog must hold at least one entry.
    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.races.is_empty() {
            return Err(CatalogError::Empty("races"));
        }
        if self.classes.is_empty() {
            return Err(CatalogError::Empty("classes"));
        }
        if self.gods.is_empty() {
            return Err(CatalogError::Empty("gods"));
        }
        if self.blessings.is_empty() {
            return Err(CatalogError::Empty("blessings"));
        }
        Ok(())
    }

    /// The race allow-list, normalized to lowercase for
    /// case-insensitive membership tests.
    pub fn allowed_races(&self) -> FxHashSet<String> {
        self.races.iter().map(|race| race.to_lowercase()).collect()
    }
}
