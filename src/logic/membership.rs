use std::collections::{BTreeSet, HashMap, HashSet};

use crate::index::build_item_index;
use crate::state::types::{AnnotatedItem, Catalog, Language};

/// What: Resolve which items are in scope and annotate each with its groups.
///
/// Inputs:
/// - `catalog`: Dataset with items and groups.
/// - `selected`: Selected group IDs; empty selects every group.
/// - `language`: Language for group display names.
///
/// Output:
/// - Items in scope, in first-appearance order over the dataset's groups, each
///   annotated with the sorted display names of every group containing it.
///
/// Details:
/// - Annotation always lists every containing group, not only the selected ones.
/// - Groups are walked in dataset order, so the result does not depend on the
///   order in which groups were selected.
/// - Group references to missing item IDs are skipped.
/// - With no selection, items that belong to no group are appended in dataset
///   order with an empty annotation so the unfiltered view lists every item.
#[must_use]
pub fn resolve_membership(
    catalog: &Catalog,
    selected: &BTreeSet<String>,
    language: Language,
) -> Vec<AnnotatedItem> {
    let items = build_item_index(catalog);

    let mut memberships: HashMap<&str, BTreeSet<&str>> = HashMap::new();
    for group in &catalog.editions {
        let name = group.display_name(language);
        for id in &group.card_ids {
            memberships.entry(id.as_str()).or_default().insert(name);
        }
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut order: Vec<&str> = Vec::new();
    for group in &catalog.editions {
        if !selected.is_empty() && !selected.contains(&group.id) {
            continue;
        }
        for id in &group.card_ids {
            if seen.insert(id.as_str()) {
                order.push(id.as_str());
            }
        }
    }
    if selected.is_empty() {
        for item in &catalog.cards {
            if seen.insert(item.id.as_str()) {
                order.push(item.id.as_str());
            }
        }
    }

    let mut out = Vec::with_capacity(order.len());
    for id in order {
        let Some(item) = items.get(id) else {
            tracing::trace!(card_id = id, "skipping dangling group reference");
            continue;
        };
        let groups = memberships
            .get(id)
            .map(|names| names.iter().map(|n| (*n).to_string()).collect())
            .unwrap_or_default();
        out.push(AnnotatedItem {
            item: (*item).clone(),
            groups,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::test_support::{group, item, sample_catalog};

    fn ids(items: &[AnnotatedItem]) -> Vec<&str> {
        items.iter().map(|i| i.item.id.as_str()).collect()
    }

    #[test]
    /// What: No selection yields every item exactly once with full membership
    ///
    /// - Input: Sample catalog, item `a` in two groups, dangling `zzz`
    /// - Output: a, b, c, d once each; `a` annotated with both Base editions
    fn no_selection_includes_all_with_full_membership() {
        let catalog = sample_catalog();
        let out = resolve_membership(&catalog, &BTreeSet::new(), Language::En);
        assert_eq!(ids(&out), vec!["a", "b", "c", "d"]);
        assert_eq!(
            out[0].groups,
            vec!["Base (1st Edition)", "Base (2nd Edition)"]
        );
    }

    #[test]
    /// What: Selecting a group keeps annotation for unselected groups
    ///
    /// - Input: Only Base 2nd selected
    /// - Output: a and c; `a` still lists Base 1st
    fn selection_restricts_scope_not_annotation() {
        let catalog = sample_catalog();
        let selected: BTreeSet<String> = ["e2".to_string()].into();
        let out = resolve_membership(&catalog, &selected, Language::En);
        assert_eq!(ids(&out), vec!["a", "c"]);
        assert_eq!(out[0].groups.len(), 2);
    }

    #[test]
    /// What: German names are used and sorted for annotation
    fn annotation_uses_language_and_sorts() {
        let catalog = sample_catalog();
        let out = resolve_membership(&catalog, &BTreeSet::new(), Language::De);
        assert_eq!(
            out[0].groups,
            vec!["Basisspiel (1. Edition)", "Basisspiel (2. Edition)"]
        );
    }

    #[test]
    /// What: Ungrouped items appear only when nothing is selected
    fn ungrouped_items_only_without_selection() {
        let mut catalog = sample_catalog();
        catalog.cards.push(item("lone", "Lonely", None, "1", &[]));
        let all = resolve_membership(&catalog, &BTreeSet::new(), Language::En);
        assert_eq!(ids(&all).last(), Some(&"lone"));
        assert!(all.last().is_some_and(|i| i.groups.is_empty()));

        let selected: BTreeSet<String> = ["e1".to_string()].into();
        let some = resolve_membership(&catalog, &selected, Language::En);
        assert!(!ids(&some).contains(&"lone"));
    }

    #[test]
    /// What: Duplicate references inside one group do not duplicate items
    fn duplicate_references_deduplicated() {
        let catalog = Catalog {
            cards: vec![item("x", "X", None, "1", &[])],
            editions: vec![group("g", "G", "G", "", &["x", "x"])],
        };
        let out = resolve_membership(&catalog, &BTreeSet::new(), Language::En);
        assert_eq!(ids(&out), vec!["x"]);
        assert_eq!(out[0].groups, vec!["G"]);
    }
}
