use std::collections::BTreeSet;

use crate::state::types::{Catalog, Group, Language};

/// What: List groups that can still be added to the selection.
///
/// Inputs:
/// - `catalog`: Dataset with groups.
/// - `selected`: Currently selected group IDs.
/// - `query`: Picker search text; empty lists every unselected group.
/// - `language`: Active display language.
///
/// Output:
/// - Unselected groups in dataset order whose localized, English, or German
///   name contains `query` case-insensitively, or whose release date contains it.
///
/// Details:
/// - The release date is matched verbatim so partial years such as `"201"` work.
#[must_use]
pub fn available_groups<'a>(
    catalog: &'a Catalog,
    selected: &BTreeSet<String>,
    query: &str,
    language: Language,
) -> Vec<&'a Group> {
    let q = query.to_lowercase();
    catalog
        .editions
        .iter()
        .filter(|g| !selected.contains(&g.id))
        .filter(|g| {
            g.display_name(language).to_lowercase().contains(&q)
                || g.edition_en.to_lowercase().contains(&q)
                || g.edition_de.to_lowercase().contains(&q)
                || g.release_date.contains(query)
        })
        .collect()
}

/// Selected groups in dataset order.
#[must_use]
pub fn selected_groups<'a>(catalog: &'a Catalog, selected: &BTreeSet<String>) -> Vec<&'a Group> {
    catalog
        .editions
        .iter()
        .filter(|g| selected.contains(&g.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::test_support::sample_catalog;

    fn ids<'a>(groups: &[&'a Group]) -> Vec<&'a str> {
        groups.iter().map(|g| g.id.as_str()).collect()
    }

    #[test]
    /// What: Picker excludes selected groups and matches either language
    ///
    /// - Input: e1 selected, query "alchemisten" while displaying English
    /// - Output: Only e3 (German name match)
    fn available_groups_matches_both_languages() {
        let catalog = sample_catalog();
        let selected: BTreeSet<String> = ["e1".to_string()].into();
        let all = available_groups(&catalog, &selected, "", Language::En);
        assert_eq!(ids(&all), vec!["e2", "e3"]);
        let de = available_groups(&catalog, &selected, "ALCHEMISTEN", Language::En);
        assert_eq!(ids(&de), vec!["e3"]);
    }

    #[test]
    /// What: Release dates act as a secondary search key
    fn available_groups_matches_release_date() {
        let catalog = sample_catalog();
        let out = available_groups(&catalog, &BTreeSet::new(), "201", Language::De);
        assert_eq!(ids(&out), vec!["e2", "e3"]);
    }

    #[test]
    /// What: Selected groups come back in dataset order
    fn selected_groups_in_dataset_order() {
        let catalog = sample_catalog();
        let selected: BTreeSet<String> = ["e3".to_string(), "e1".to_string()].into();
        assert_eq!(ids(&selected_groups(&catalog, &selected)), vec!["e1", "e3"]);
    }
}
