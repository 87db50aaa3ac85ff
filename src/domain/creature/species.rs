use serde::{Deserialize, Serialize};

/// Language tag used for descriptions shown to the user
pub const DISPLAY_LANGUAGE: &str = "en";

/// Secondary descriptive data keyed by creature identifier
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesMetadata {
    pub flavor_text_entries: Vec<FlavorTextEntry>,

    /// Resource reference of the evolution chain, if the species has one
    pub evolution_chain_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlavorTextEntry {
    pub text: String,
    pub language: String,
}

/// First English description with form-feed separators turned into spaces.
///
/// Upstream text carries page breaks either as the raw form-feed character or
/// as its escaped `\f` spelling; both become a single space.
pub fn flavor_text(species: Option<&SpeciesMetadata>) -> String {
    species
        .and_then(|s| {
            s.flavor_text_entries
                .iter()
                .find(|entry| entry.language == DISPLAY_LANGUAGE)
        })
        .map(|entry| entry.text.replace('\u{000C}', " ").replace("\\f", " "))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str, language: &str) -> FlavorTextEntry {
        FlavorTextEntry {
            text: text.to_string(),
            language: language.to_string(),
        }
    }

    #[test]
    fn test_first_english_entry_wins() {
        let species = SpeciesMetadata {
            flavor_text_entries: vec![
                entry("Quand plusieurs", "fr"),
                entry("When several of\u{000C}these gather", "en"),
                entry("Second english", "en"),
            ],
            evolution_chain_url: None,
        };

        assert_eq!(flavor_text(Some(&species)), "When several of these gather");
    }

    #[test]
    fn test_escaped_form_feed_replaced() {
        let species = SpeciesMetadata {
            flavor_text_entries: vec![entry("Stores\\felectricity", "en")],
            evolution_chain_url: None,
        };

        assert_eq!(flavor_text(Some(&species)), "Stores electricity");
    }

    #[test]
    fn test_missing_species_or_language() {
        assert_eq!(flavor_text(None), "");

        let species = SpeciesMetadata {
            flavor_text_entries: vec![entry("ピカチュウ", "ja")],
            evolution_chain_url: None,
        };
        assert_eq!(flavor_text(Some(&species)), "");
    }
}
