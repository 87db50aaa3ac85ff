use serde::{Deserialize, Serialize};

/// Highest value a base stat can take.
pub const MAX_BASE_STAT: u32 = 255;

/// A creature as fetched from the remote API.
/// Immutable once fetched; collections only keep trimmed projections of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureRecord {
    /// Positive national identifier
    pub id: u32,

    /// Lower-case API name, unique per identifier
    pub name: String,

    /// Type names in slot order
    pub types: Vec<String>,

    /// Base stats in API order
    pub stats: Vec<BaseStat>,

    pub abilities: Vec<Ability>,

    /// Height in decimetres
    pub height: u32,

    /// Weight in hectograms
    pub weight: u32,

    pub sprites: Sprites,

    pub base_experience: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseStat {
    pub name: String,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ability {
    pub name: String,
    pub hidden: bool,
}

/// Sprite image references; either may be missing upstream
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprites {
    pub normal: Option<String>,
    pub shiny: Option<String>,
}

impl Sprites {
    /// Pick the image to show.
    /// Shiny is used only when requested and available; otherwise the normal
    /// sprite, falling back to shiny when no normal sprite exists.
    pub fn pick(&self, shiny: bool) -> Option<&str> {
        if shiny {
            if let Some(url) = self.shiny.as_deref() {
                return Some(url);
            }
        }
        self.normal.as_deref().or(self.shiny.as_deref())
    }
}

impl BaseStat {
    /// Fraction of the maximum base stat, clamped to [0, 1]
    pub fn proportion(&self) -> f64 {
        f64::from(self.value.min(MAX_BASE_STAT)) / f64::from(MAX_BASE_STAT)
    }
}

impl CreatureRecord {
    /// Height in metres
    pub fn height_m(&self) -> f64 {
        f64::from(self.height) / 10.0
    }

    /// Weight in kilograms
    pub fn weight_kg(&self) -> f64 {
        f64::from(self.weight) / 10.0
    }

    pub fn total_base_stats(&self) -> u32 {
        self.stats.iter().map(|s| s.value).sum()
    }
}

impl std::fmt::Display for CreatureRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.id, self.name)
    }
}
