// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are view-friendly representations
// - DTOs NEVER leak domain invariants
// - DTOs are simple, serializable structs
// - Conversion FROM domain entities only (never TO)
// - Display impls are the text rendering used by the CLI and the shell

use std::fmt;

use serde::Serialize;

use crate::domain::{BaseStat, CollectionEntry};
use crate::services::{BrowsePage, CollectionService, SearchResult};

/// Width of a rendered stat bar, in characters
pub const STAT_BAR_WIDTH: usize = 20;

/// Upper-case the first character of a name
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// "special-attack" → "special attack"
pub fn stat_label(name: &str) -> String {
    name.replace('-', " ")
}

/// Filled/empty bar for a proportion in [0, 1]
pub fn stat_bar(proportion: f64, width: usize) -> String {
    let filled = ((proportion.clamp(0.0, 1.0) * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

// ============================================================================
// CREATURE DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatDto {
    pub label: String,
    pub value: u32,
    /// Fraction of the maximum base stat
    pub proportion: f64,
}

impl From<&BaseStat> for StatDto {
    fn from(stat: &BaseStat) -> Self {
        Self {
            label: stat_label(&stat.name),
            value: stat.value,
            proportion: stat.proportion(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EvolutionStepDto {
    pub id: Option<u32>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatureDto {
    pub id: u32,
    pub name: String,
    pub display_name: String,
    pub types: Vec<String>,
    pub height_m: f64,
    pub weight_kg: f64,
    pub base_experience: Option<u32>,
    pub sprite: Option<String>,
    pub shiny: bool,
    pub stats: Vec<StatDto>,
    pub total_stats: u32,
    /// Ability names, hidden ones marked "(Hidden)"
    pub abilities: Vec<String>,
    pub flavor_text: String,
    pub evolution: Vec<EvolutionStepDto>,
    pub is_favorite: bool,
    pub in_team: bool,
    pub in_compare: bool,
}

impl CreatureDto {
    /// Build the displayed view of a search result, with membership markers
    /// read from the collection store
    pub fn from_result(result: &SearchResult, shiny: bool, collections: &CollectionService) -> Self {
        let record = &result.record;

        Self {
            id: record.id,
            name: record.name.clone(),
            display_name: capitalize(&record.name),
            types: record.types.clone(),
            height_m: record.height_m(),
            weight_kg: record.weight_kg(),
            base_experience: record.base_experience,
            sprite: record.sprites.pick(shiny).map(str::to_string),
            shiny,
            stats: record.stats.iter().map(StatDto::from).collect(),
            total_stats: record.total_base_stats(),
            abilities: record
                .abilities
                .iter()
                .map(|a| {
                    if a.hidden {
                        format!("{} (Hidden)", stat_label(&a.name))
                    } else {
                        stat_label(&a.name)
                    }
                })
                .collect(),
            flavor_text: result.flavor_text(),
            evolution: result
                .evolution_sequence()
                .into_iter()
                .map(|step| EvolutionStepDto {
                    id: step.id,
                    name: capitalize(&step.name),
                })
                .collect(),
            is_favorite: collections.is_favorite(record.id),
            in_team: collections.is_in_team(record.id),
            in_compare: collections.is_in_compare(record.id),
        }
    }
}

impl fmt::Display for CreatureDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.id, self.display_name)?;
        if self.is_favorite {
            write!(f, "  ★ Favorite")?;
        }
        if self.in_team {
            write!(f, "  ● In team")?;
        }
        if self.in_compare {
            write!(f, "  ◆ Comparing")?;
        }
        writeln!(f)?;

        writeln!(f, "Types: {}", self.types.join(", "))?;
        writeln!(f, "Height: {:.1} m   Weight: {:.1} kg", self.height_m, self.weight_kg)?;
        if let Some(xp) = self.base_experience {
            writeln!(f, "Base experience: {}", xp)?;
        }
        match &self.sprite {
            Some(url) if self.shiny => writeln!(f, "Sprite (shiny): {}", url)?,
            Some(url) => writeln!(f, "Sprite: {}", url)?,
            None => writeln!(f, "Sprite: unavailable")?,
        }

        if !self.flavor_text.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.flavor_text)?;
        }

        writeln!(f)?;
        writeln!(f, "Base stats (total {}):", self.total_stats)?;
        for stat in &self.stats {
            writeln!(
                f,
                "  {:<16}{:>4} {}",
                stat.label,
                stat.value,
                stat_bar(stat.proportion, STAT_BAR_WIDTH)
            )?;
        }

        if !self.abilities.is_empty() {
            writeln!(f, "Abilities: {}", self.abilities.join(", "))?;
        }

        if !self.evolution.is_empty() {
            let chain: Vec<String> = self
                .evolution
                .iter()
                .map(|step| match step.id {
                    Some(id) => format!("{} (#{})", step.name, id),
                    None => step.name.clone(),
                })
                .collect();
            writeln!(f, "Evolution: {}", chain.join(" → "))?;
        }

        Ok(())
    }
}

// ============================================================================
// COLLECTION DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionEntryDto {
    pub id: u32,
    pub name: String,
    pub sprite: Option<String>,
    pub types: Vec<String>,
    pub stats: Vec<StatDto>,
    pub height_m: Option<f64>,
    pub weight_kg: Option<f64>,
}

impl From<&CollectionEntry> for CollectionEntryDto {
    fn from(entry: &CollectionEntry) -> Self {
        Self {
            id: entry.id,
            name: capitalize(&entry.name),
            sprite: entry.sprite.clone(),
            types: entry.types.clone(),
            stats: entry
                .stats
                .as_deref()
                .unwrap_or_default()
                .iter()
                .map(StatDto::from)
                .collect(),
            height_m: entry.height.map(|h| f64::from(h) / 10.0),
            weight_kg: entry.weight.map(|w| f64::from(w) / 10.0),
        }
    }
}

impl fmt::Display for CollectionEntryDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:<5} {}", self.id, self.name)?;
        if !self.types.is_empty() {
            write!(f, " [{}]", self.types.join(", "))?;
        }
        if !self.stats.is_empty() {
            let total: u32 = self.stats.iter().map(|s| s.value).sum();
            write!(f, " total {}", total)?;
        }
        Ok(())
    }
}

/// Side-by-side rendering of the compare collection
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompareTableDto {
    pub entries: Vec<CollectionEntryDto>,
}

impl CompareTableDto {
    pub fn new(entries: &[CollectionEntry]) -> Self {
        Self {
            entries: entries.iter().map(CollectionEntryDto::from).collect(),
        }
    }

    /// Stat labels in first-seen order across all entries
    fn stat_labels(&self) -> Vec<&str> {
        let mut labels: Vec<&str> = Vec::new();
        for stat in self.entries.iter().flat_map(|e| e.stats.iter()) {
            if !labels.contains(&stat.label.as_str()) {
                labels.push(&stat.label);
            }
        }
        labels
    }
}

impl fmt::Display for CompareTableDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.entries.is_empty() {
            return writeln!(f, "Nothing to compare yet.");
        }

        write!(f, "{:<16}", "")?;
        for entry in &self.entries {
            write!(f, "{:>14}", entry.name)?;
        }
        writeln!(f)?;

        write!(f, "{:<16}", "height (m)")?;
        for entry in &self.entries {
            match entry.height_m {
                Some(h) => write!(f, "{:>14.1}", h)?,
                None => write!(f, "{:>14}", "-")?,
            }
        }
        writeln!(f)?;

        write!(f, "{:<16}", "weight (kg)")?;
        for entry in &self.entries {
            match entry.weight_kg {
                Some(w) => write!(f, "{:>14.1}", w)?,
                None => write!(f, "{:>14}", "-")?,
            }
        }
        writeln!(f)?;

        for label in self.stat_labels() {
            write!(f, "{:<16}", label)?;
            for entry in &self.entries {
                match entry.stats.iter().find(|s| s.label == label) {
                    Some(stat) => write!(f, "{:>14}", stat.value)?,
                    None => write!(f, "{:>14}", "-")?,
                }
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

// ============================================================================
// BROWSE DTOs
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrowsePageDto {
    pub page: BrowsePage,
}

impl From<BrowsePage> for BrowsePageDto {
    fn from(page: BrowsePage) -> Self {
        Self { page }
    }
}

impl fmt::Display for BrowsePageDto {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let page = &self.page;

        if page.entries.is_empty() {
            writeln!(f, "No creatures match \"{}\".", page.filter)?;
        }
        for item in &page.entries {
            match item.id {
                Some(id) => writeln!(f, "#{:<5} {}", id, capitalize(&item.name))?,
                None => writeln!(f, "{:<6} {}", "?", capitalize(&item.name))?,
            }
        }

        write!(f, "Page {} of {} ({} creatures", page.page, page.page_count, page.total)?;
        if !page.filter.is_empty() {
            write!(f, " matching \"{}\"", page.filter)?;
        }
        writeln!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::creature::entity::fixtures::creature;
    use crate::domain::{EvolutionChain, SpeciesMetadata};
    use crate::repositories::{MemoryStorage, StorageCollectionRepository};
    use crate::services::BrowseItem;
    use std::sync::Arc;

    fn collections() -> CollectionService {
        CollectionService::load(Arc::new(StorageCollectionRepository::new(Arc::new(
            MemoryStorage::new(),
        ))))
    }

    fn pikachu_result() -> SearchResult {
        SearchResult {
            record: creature(25, "pikachu"),
            species: Some(SpeciesMetadata::default()),
            evolution: EvolutionChain::from_stages(vec![
                ("pichu".to_string(), "https://pokeapi.co/api/v2/pokemon-species/172/".to_string()),
                ("pikachu".to_string(), "https://pokeapi.co/api/v2/pokemon-species/25/".to_string()),
            ]),
        }
    }

    #[test]
    fn test_formatting_helpers() {
        assert_eq!(capitalize("pikachu"), "Pikachu");
        assert_eq!(capitalize(""), "");
        assert_eq!(stat_label("special-attack"), "special attack");
        assert_eq!(stat_bar(0.5, 10), "█████░░░░░");
        assert_eq!(stat_bar(2.0, 4), "████");
    }

    #[test]
    fn test_creature_view() {
        let store = collections();
        let result = pikachu_result();
        store.toggle_favorite(CollectionEntry::favorite(&result.record));

        let view = CreatureDto::from_result(&result, false, &store);
        assert_eq!(view.display_name, "Pikachu");
        assert_eq!(view.height_m, 0.4);
        assert_eq!(view.weight_kg, 6.0);
        assert_eq!(view.stats[1].label, "special attack");
        assert_eq!(view.abilities, vec!["static", "lightning rod (Hidden)"]);
        assert_eq!(view.evolution[0].name, "Pichu");
        assert_eq!(view.evolution[0].id, Some(172));
        assert!(view.is_favorite);
        assert!(!view.in_team);

        let text = view.to_string();
        assert!(text.starts_with("#25 Pikachu  ★ Favorite"));
        assert!(text.contains("Height: 0.4 m   Weight: 6.0 kg"));
        assert!(text.contains("Pichu (#172) → Pikachu (#25)"));
    }

    #[test]
    fn test_shiny_sprite_choice() {
        let store = collections();
        let mut result = pikachu_result();

        let shiny = CreatureDto::from_result(&result, true, &store);
        assert_eq!(shiny.sprite.as_deref(), Some("https://img.example/shiny/25.png"));

        result.record.sprites.shiny = None;
        let fallback = CreatureDto::from_result(&result, true, &store);
        assert_eq!(fallback.sprite.as_deref(), Some("https://img.example/25.png"));
    }

    #[test]
    fn test_compare_table_marks_missing_values() {
        let mut bare = CollectionEntry::favorite(&creature(1, "bulbasaur"));
        bare.stats = Some(vec![BaseStat { name: "speed".to_string(), value: 45 }]);
        let table = CompareTableDto::new(&[
            CollectionEntry::comparison(&creature(25, "pikachu")),
            bare,
        ]);

        let text = table.to_string();
        assert!(text.contains("Pikachu"));
        assert!(text.contains("Bulbasaur"));
        assert!(text.lines().any(|l| l.starts_with("hp") && l.trim_end().ends_with('-')));
        assert!(text.lines().any(|l| l.starts_with("speed")));
    }

    #[test]
    fn test_browse_page_rendering() {
        let dto = BrowsePageDto::from(BrowsePage {
            filter: "pi".to_string(),
            page: 1,
            page_count: 1,
            total: 1,
            entries: vec![BrowseItem { id: Some(25), name: "pikachu".to_string() }],
        });

        let text = dto.to_string();
        assert!(text.contains("#25    Pikachu"));
        assert!(text.contains("Page 1 of 1 (1 creatures matching \"pi\")"));
    }
}
