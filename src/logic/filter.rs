use std::collections::{BTreeSet, HashSet};

use crate::state::types::{AnnotatedItem, ImageFilter, Item};

/// What: Check whether an item matches a lowercase search query.
///
/// Inputs:
/// - `item`: Candidate item.
/// - `query_lower`: Query already lowercased; must be non-empty to be meaningful.
///
/// Output:
/// - `true` when either localized name contains the query case-insensitively.
#[must_use]
pub fn matches_search(item: &Item, query_lower: &str) -> bool {
    item.en.to_lowercase().contains(query_lower)
        || item
            .de
            .as_deref()
            .is_some_and(|de| de.to_lowercase().contains(query_lower))
}

/// `true` when `item` has at least one of the selected tags.
#[must_use]
pub fn matches_types(item: &Item, selected: &BTreeSet<String>) -> bool {
    item.types.iter().any(|t| selected.contains(t))
}

/// What: Check an item ID against the image-presence filter.
///
/// Inputs:
/// - `id`: Item ID.
/// - `filter`: Active image filter.
/// - `with_images`: IDs whose image was confirmed loaded this session.
///
/// Output:
/// - `true` when the item passes the filter.
#[must_use]
pub fn matches_image_filter(id: &str, filter: ImageFilter, with_images: &HashSet<String>) -> bool {
    match filter {
        ImageFilter::All => true,
        ImageFilter::With => with_images.contains(id),
        ImageFilter::Without => !with_images.contains(id),
    }
}

/// What: Apply search, category, and image filters in that order.
///
/// Inputs:
/// - `items`: Annotated items from membership resolution.
/// - `search_query`: Raw query; empty disables the search stage.
/// - `selected_types`: Selected tags; empty disables the category stage.
/// - `image_filter`: Image-presence filter.
/// - `with_images`: Image-presence set.
///
/// Output:
/// - Surviving items in their input order.
#[must_use]
pub fn apply_filters(
    items: Vec<AnnotatedItem>,
    search_query: &str,
    selected_types: &BTreeSet<String>,
    image_filter: ImageFilter,
    with_images: &HashSet<String>,
) -> Vec<AnnotatedItem> {
    let mut items = items;
    if !search_query.is_empty() {
        let q = search_query.to_lowercase();
        items.retain(|a| matches_search(&a.item, &q));
    }
    if !selected_types.is_empty() {
        items.retain(|a| matches_types(&a.item, selected_types));
    }
    if image_filter != ImageFilter::All {
        items.retain(|a| matches_image_filter(&a.item.id, image_filter, with_images));
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::test_support::item;

    fn annotated(items: Vec<Item>) -> Vec<AnnotatedItem> {
        items
            .into_iter()
            .map(|item| AnnotatedItem {
                item,
                groups: vec![],
            })
            .collect()
    }

    #[test]
    /// What: Search matches either name case-insensitively
    ///
    /// - Input: Query "BURG" against English "Moat" / German "Burggraben"
    /// - Output: Moat survives, Cellar does not
    fn search_matches_either_name() {
        let items = annotated(vec![
            item("a", "Cellar", Some("Keller"), "2", &[]),
            item("b", "Moat", Some("Burggraben"), "2", &[]),
        ]);
        let out = apply_filters(items, "BURG", &BTreeSet::new(), ImageFilter::All, &HashSet::new());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].item.id, "b");
    }

    #[test]
    /// What: Category filter uses OR semantics
    fn category_filter_is_or() {
        let items = annotated(vec![
            item("a", "A", None, "1", &["Action"]),
            item("b", "B", None, "1", &["Treasure"]),
            item("c", "C", None, "1", &["Victory"]),
        ]);
        let selected: BTreeSet<String> = ["Action".to_string(), "Treasure".to_string()].into();
        let out = apply_filters(items, "", &selected, ImageFilter::All, &HashSet::new());
        let ids: Vec<&str> = out.iter().map(|a| a.item.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    /// What: Image filter splits on the presence set
    fn image_filter_with_and_without() {
        let present: HashSet<String> = ["a".to_string()].into();
        assert!(matches_image_filter("a", ImageFilter::With, &present));
        assert!(!matches_image_filter("b", ImageFilter::With, &present));
        assert!(matches_image_filter("b", ImageFilter::Without, &present));
        assert!(!matches_image_filter("a", ImageFilter::Without, &present));
        assert!(matches_image_filter("a", ImageFilter::All, &present));
    }

    #[test]
    /// What: A query matching nothing empties the list regardless of other filters
    fn unmatched_query_yields_empty() {
        let items = annotated(vec![item("a", "Cellar", None, "2", &["Action"])]);
        let selected: BTreeSet<String> = ["Action".to_string()].into();
        let out = apply_filters(items, "zzz", &selected, ImageFilter::Without, &HashSet::new());
        assert!(out.is_empty());
    }
}
