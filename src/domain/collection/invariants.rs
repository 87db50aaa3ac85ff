use super::entity::{CollectionEntry, CollectionKind};
use crate::domain::{DomainError, DomainResult};

/// Move `name` to the front of the history, dropping any earlier exact match,
/// and cut the list to the history capacity.
pub fn push_history(history: &mut Vec<String>, name: &str) {
    history.retain(|existing| existing != name);
    history.insert(0, name.to_string());
    history.truncate(CollectionKind::History.capacity());
}

/// Remove the entry if its id is present, otherwise prepend it and cut the
/// list to `kind`'s capacity.
/// Returns whether the entry is a member afterwards.
pub fn toggle_entry(entries: &mut Vec<CollectionEntry>, entry: CollectionEntry, kind: CollectionKind) -> bool {
    if remove_by_id(entries, entry.id) {
        return false;
    }
    entries.insert(0, entry);
    entries.truncate(kind.capacity());
    true
}

/// Append an entry to a capped collection.
///
/// Capacity is checked before uniqueness; on rejection the list is unchanged.
pub fn append_bounded(
    entries: &mut Vec<CollectionEntry>,
    entry: CollectionEntry,
    kind: CollectionKind,
) -> DomainResult<()> {
    if entries.len() >= kind.capacity() {
        return Err(DomainError::CollectionFull {
            kind,
            capacity: kind.capacity(),
        });
    }
    if entries.iter().any(|existing| existing.id == entry.id) {
        return Err(DomainError::DuplicateEntry {
            kind,
            name: entry.name,
        });
    }
    entries.push(entry);
    Ok(())
}

/// Returns true if something was removed
pub fn remove_by_id(entries: &mut Vec<CollectionEntry>, id: u32) -> bool {
    let before = entries.len();
    entries.retain(|existing| existing.id != id);
    entries.len() != before
}

/// Validates a loaded entry list: within capacity, unique ids
pub fn validate_entries(entries: &[CollectionEntry], kind: CollectionKind) -> DomainResult<()> {
    if entries.len() > kind.capacity() {
        return Err(DomainError::InvariantViolation(format!(
            "{} holds {} entries, capacity is {}",
            kind,
            entries.len(),
            kind.capacity()
        )));
    }
    for (index, entry) in entries.iter().enumerate() {
        if entry.id == 0 {
            return Err(DomainError::InvariantViolation(format!(
                "{} entry '{}' has no identifier",
                kind, entry.name
            )));
        }
        if entries[..index].iter().any(|earlier| earlier.id == entry.id) {
            return Err(DomainError::InvariantViolation(format!(
                "{} contains #{} twice",
                kind, entry.id
            )));
        }
    }
    Ok(())
}

/// Validates a loaded history: within capacity, unique names
pub fn validate_history(history: &[String]) -> DomainResult<()> {
    let capacity = CollectionKind::History.capacity();
    if history.len() > capacity {
        return Err(DomainError::InvariantViolation(format!(
            "history holds {} entries, capacity is {}",
            history.len(),
            capacity
        )));
    }
    for (index, name) in history.iter().enumerate() {
        if history[..index].contains(name) {
            return Err(DomainError::InvariantViolation(format!(
                "history contains '{}' twice",
                name
            )));
        }
    }
    Ok(())
}

/// Invariants that must hold for collections:
///
/// 1. History: at most 10 names, unique, most recent first
/// 2. Favorites: at most 20 entries, unique ids, most recent first
/// 3. Team: at most 6 entries, unique ids, insertion order
/// 4. Compare: at most 4 entries, unique ids, insertion order
/// 5. A rejected insertion leaves the collection unchanged

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32) -> CollectionEntry {
        CollectionEntry {
            id,
            name: format!("creature-{id}"),
            sprite: None,
            types: Vec::new(),
            stats: None,
            height: None,
            weight: None,
        }
    }

    fn ids(entries: &[CollectionEntry]) -> Vec<u32> {
        entries.iter().map(|e| e.id).collect()
    }

    #[test]
    fn test_history_moves_existing_to_front() {
        let mut history = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        push_history(&mut history, "c");
        assert_eq!(history, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_history_is_case_sensitive() {
        let mut history = vec!["pikachu".to_string()];
        push_history(&mut history, "Pikachu");
        assert_eq!(history, vec!["Pikachu", "pikachu"]);
    }

    #[test]
    fn test_history_never_exceeds_capacity() {
        let mut history = Vec::new();
        for i in 0..25 {
            push_history(&mut history, &format!("name-{}", i % 13));
            assert!(history.len() <= 10);
            assert!(validate_history(&history).is_ok());
        }
        assert_eq!(history[0], "name-11");
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let mut favorites = Vec::new();
        assert!(toggle_entry(&mut favorites, entry(25), CollectionKind::Favorites));
        assert_eq!(ids(&favorites), vec![25]);
        assert!(!toggle_entry(&mut favorites, entry(25), CollectionKind::Favorites));
        assert!(favorites.is_empty());
    }

    #[test]
    fn test_toggle_caps_and_prepends() {
        let mut favorites = Vec::new();
        for id in 1..=25 {
            toggle_entry(&mut favorites, entry(id), CollectionKind::Favorites);
        }
        assert_eq!(favorites.len(), 20);
        assert_eq!(favorites[0].id, 25);
        assert_eq!(favorites[19].id, 6);
    }

    #[test]
    fn test_append_rejects_when_full() {
        let mut team: Vec<CollectionEntry> = (1..=6).map(entry).collect();
        let result = append_bounded(&mut team, entry(7), CollectionKind::Team);
        assert!(matches!(
            result,
            Err(DomainError::CollectionFull { capacity: 6, .. })
        ));
        assert_eq!(ids(&team), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_full_takes_precedence_over_duplicate() {
        let mut compare: Vec<CollectionEntry> = (1..=4).map(entry).collect();
        let result = append_bounded(&mut compare, entry(1), CollectionKind::Compare);
        assert!(matches!(result, Err(DomainError::CollectionFull { .. })));
    }

    #[test]
    fn test_append_rejects_duplicate() {
        let mut team = vec![entry(1), entry(2)];
        let result = append_bounded(&mut team, entry(2), CollectionKind::Team);
        assert!(matches!(result, Err(DomainError::DuplicateEntry { .. })));
        assert_eq!(ids(&team), vec![1, 2]);
    }

    #[test]
    fn test_append_preserves_order() {
        let mut compare = Vec::new();
        for id in [9, 3, 7] {
            append_bounded(&mut compare, entry(id), CollectionKind::Compare).unwrap();
        }
        assert_eq!(ids(&compare), vec![9, 3, 7]);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut team = vec![entry(1)];
        assert!(!remove_by_id(&mut team, 42));
        assert_eq!(ids(&team), vec![1]);
    }

    #[test]
    fn test_validate_entries() {
        assert!(validate_entries(&[entry(1), entry(2)], CollectionKind::Team).is_ok());
        assert!(validate_entries(&[entry(1), entry(1)], CollectionKind::Team).is_err());
        assert!(validate_entries(&[entry(0)], CollectionKind::Team).is_err());

        let too_many: Vec<CollectionEntry> = (1..=5).map(entry).collect();
        assert!(validate_entries(&too_many, CollectionKind::Compare).is_err());
    }
}
