//! Non-UI catalog logic: the filter/sort pipeline and its helpers.
//!
//! The pipeline is a pure synchronous function of the dataset, the filter
//! state, the display language, and the image-presence set. It never
//! suspends and has no fallible steps.

use std::collections::HashSet;

use crate::state::types::{AnnotatedItem, Catalog, FilterState, Language};

pub mod categories;
pub mod filter;
pub mod groups;
pub mod membership;
pub mod sort;
pub mod stats;

pub use categories::available_types;
pub use filter::apply_filters;
pub use groups::{available_groups, selected_groups};
pub use membership::resolve_membership;
pub use sort::{locale_cmp, sort_items};
pub use stats::FilterStats;

/// What: Produce the visible, ordered list for the current state.
///
/// Inputs:
/// - `catalog`: Dataset.
/// - `state`: Filter and sort state.
/// - `language`: Display language for names and group annotations.
/// - `with_images`: IDs whose image was confirmed loaded this session.
///
/// Output:
/// - Annotated items after membership, search, category, and image filtering, sorted.
///
/// Details:
/// - Stages run in that fixed order; only the final sort reorders.
/// - Output is reproducible for fixed inputs: every collection that feeds the
///   order is walked in dataset order or explicitly sorted.
#[must_use]
pub fn compute_visible_items(
    catalog: &Catalog,
    state: &FilterState,
    language: Language,
    with_images: &HashSet<String>,
) -> Vec<AnnotatedItem> {
    let resolved = resolve_membership(catalog, &state.selected_groups, language);
    let mut items = apply_filters(
        resolved,
        &state.search_query,
        &state.selected_types,
        state.image_filter,
        with_images,
    );
    sort_items(&mut items, state.sort_field, state.sort_direction, language);
    tracing::trace!(
        visible = items.len(),
        selected_groups = state.selected_groups.len(),
        "computed visible items"
    );
    items
}
