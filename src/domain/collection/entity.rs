use serde::{Deserialize, Serialize};

use crate::domain::creature::{BaseStat, CreatureRecord};

/// The four user collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionKind {
    History,
    Favorites,
    Team,
    Compare,
}

impl CollectionKind {
    pub const ALL: [CollectionKind; 4] = [
        CollectionKind::History,
        CollectionKind::Favorites,
        CollectionKind::Team,
        CollectionKind::Compare,
    ];

    /// Maximum number of entries the collection may hold
    pub const fn capacity(self) -> usize {
        match self {
            CollectionKind::History => 10,
            CollectionKind::Favorites => 20,
            CollectionKind::Team => 6,
            CollectionKind::Compare => 4,
        }
    }

    /// Durable storage key, or `None` for session-only collections
    pub const fn storage_key(self) -> Option<&'static str> {
        match self {
            CollectionKind::History => Some("pokemonSearchHistory"),
            CollectionKind::Favorites => Some("pokemonFavorites"),
            CollectionKind::Team => Some("pokemonTeam"),
            CollectionKind::Compare => None,
        }
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectionKind::History => write!(f, "history"),
            CollectionKind::Favorites => write!(f, "favorites"),
            CollectionKind::Team => write!(f, "team"),
            CollectionKind::Compare => write!(f, "compare"),
        }
    }
}

impl std::str::FromStr for CollectionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "history" => Ok(CollectionKind::History),
            "favorites" | "favourites" => Ok(CollectionKind::Favorites),
            "team" => Ok(CollectionKind::Team),
            "compare" => Ok(CollectionKind::Compare),
            other => Err(format!("Unknown collection: {}", other)),
        }
    }
}

/// Trimmed projection of a creature kept in a collection.
///
/// Copied out of a fetched record at mutation time and never modified
/// afterwards. Which optional fields are filled depends on the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub id: u32,
    pub name: String,
    pub sprite: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<Vec<BaseStat>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<u32>,
}

impl CollectionEntry {
    /// Projection stored in Favorites: identity, sprite and types
    pub fn favorite(record: &CreatureRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            sprite: record.sprites.normal.clone(),
            types: record.types.clone(),
            stats: None,
            height: None,
            weight: None,
        }
    }

    /// Projection stored in the Team: favorites plus base stats
    pub fn team_member(record: &CreatureRecord) -> Self {
        Self {
            stats: Some(record.stats.clone()),
            ..Self::favorite(record)
        }
    }

    /// Projection stored in Compare: team data plus height and weight
    pub fn comparison(record: &CreatureRecord) -> Self {
        Self {
            height: Some(record.height),
            weight: Some(record.weight),
            ..Self::team_member(record)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::creature::entity::fixtures::creature;

    #[test]
    fn test_projections_by_kind() {
        let record = creature(25, "pikachu");

        let fav = CollectionEntry::favorite(&record);
        assert_eq!(fav.types, vec!["electric".to_string()]);
        assert!(fav.stats.is_none());
        assert!(fav.height.is_none());

        let member = CollectionEntry::team_member(&record);
        assert_eq!(member.stats.as_ref().map(Vec::len), Some(2));
        assert!(member.weight.is_none());

        let cmp = CollectionEntry::comparison(&record);
        assert_eq!(cmp.height, Some(4));
        assert_eq!(cmp.weight, Some(60));
        assert_eq!(cmp.sprite, record.sprites.normal);
    }

    #[test]
    fn test_favorite_json_omits_absent_fields() {
        let json = serde_json::to_string(&CollectionEntry::favorite(&creature(1, "bulbasaur"))).unwrap();
        assert!(json.contains("\"types\""));
        assert!(!json.contains("\"stats\""));
        assert!(!json.contains("\"height\""));
    }

    #[test]
    fn test_kind_parsing_and_keys() {
        assert_eq!("Team".parse::<CollectionKind>(), Ok(CollectionKind::Team));
        assert!("party".parse::<CollectionKind>().is_err());
        assert_eq!(CollectionKind::Team.storage_key(), Some("pokemonTeam"));
        assert_eq!(CollectionKind::Compare.storage_key(), None);
    }
}
