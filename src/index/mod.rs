//! Derived lookups over the static catalog.
//!
//! Everything here is a pure function of the dataset and the display
//! language. Rebuilding on every language change is cheap, so nothing is
//! maintained incrementally.

use std::collections::{BTreeSet, HashMap};

use crate::state::types::{Catalog, Item, Language};

/// Dataset loading from disk.
pub mod load;

pub use load::{LoadError, load_catalog};

/// What: Build the item lookup keyed by item ID.
///
/// Inputs:
/// - `catalog`: Dataset to index.
///
/// Output:
/// - Map from every item ID in the dataset to its record.
///
/// Details:
/// - When an ID is duplicated the first occurrence wins, matching dataset order.
#[must_use]
pub fn build_item_index(catalog: &Catalog) -> HashMap<&str, &Item> {
    let mut map = HashMap::with_capacity(catalog.cards.len());
    for item in &catalog.cards {
        map.entry(item.id.as_str()).or_insert(item);
    }
    map
}

/// What: Map each localized group display name to its group ID.
///
/// Inputs:
/// - `catalog`: Dataset with groups.
/// - `language`: Language whose display names become the keys.
///
/// Output:
/// - Map from display name to group ID; later groups overwrite earlier ones on name clashes.
#[must_use]
pub fn build_group_name_index(catalog: &Catalog, language: Language) -> HashMap<String, String> {
    catalog
        .editions
        .iter()
        .map(|g| (g.display_name(language).to_string(), g.id.clone()))
        .collect()
}

/// What: Collect every category tag used by any item.
///
/// Inputs:
/// - `catalog`: Dataset to scan.
///
/// Output:
/// - Deduplicated tags in lexicographic order.
#[must_use]
pub fn collect_all_categories(catalog: &Catalog) -> Vec<String> {
    let set: BTreeSet<&str> = catalog
        .cards
        .iter()
        .flat_map(|c| c.types.iter().map(String::as_str))
        .collect();
    set.into_iter().map(str::to_string).collect()
}

/// Language-dependent lookups plus the language they were built for.
#[derive(Debug, Clone, Default)]
pub struct CatalogIndex {
    /// Language used for `group_name_to_id`.
    pub language: Language,
    /// Localized group display name to group ID.
    pub group_name_to_id: HashMap<String, String>,
    /// All category tags, sorted.
    pub categories: Vec<String>,
}

impl CatalogIndex {
    /// Build every derived lookup for `language`.
    #[must_use]
    pub fn build(catalog: &Catalog, language: Language) -> Self {
        Self {
            language,
            group_name_to_id: build_group_name_index(catalog, language),
            categories: collect_all_categories(catalog),
        }
    }

    /// What: Refresh the language-dependent lookups.
    ///
    /// Inputs:
    /// - `catalog`: Dataset the index was built from.
    /// - `language`: New display language.
    ///
    /// Output:
    /// - `true` when the index was rebuilt; `false` when already current.
    pub fn rebuild_for(&mut self, catalog: &Catalog, language: Language) -> bool {
        if self.language == language && !self.group_name_to_id.is_empty() {
            return false;
        }
        self.language = language;
        self.group_name_to_id = build_group_name_index(catalog, language);
        tracing::debug!(
            language = language.as_config_key(),
            groups = self.group_name_to_id.len(),
            "rebuilt group name index"
        );
        true
    }

    /// Look up a group ID by its localized display name.
    #[must_use]
    pub fn group_id_for_name(&self, name: &str) -> Option<&str> {
        self.group_name_to_id.get(name).map(String::as_str)
    }
}
