//! Central `ViewState` controller owning the session's filter and view state.

use std::collections::HashSet;
use std::path::PathBuf;

use crate::index::CatalogIndex;
use crate::logic::compute_visible_items;
use crate::state::types::{AnnotatedItem, Catalog, FilterState};
use crate::theme::Preferences;

mod methods;


/// Visible list tagged with the state generation it was computed from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibleList {
    /// Generation of the state snapshot this list reflects.
    pub generation: u64,
    /// Ordered, annotated items.
    pub items: Vec<AnnotatedItem>,
}

/// Explicit owned state for one viewing session.
///
/// Every setter bumps `generation` and recomputes the visible list. Hosts that
/// compute lists elsewhere take a [`ViewState::snapshot`] and hand it back via
/// [`ViewState::accept_visible`], which drops results older than the list
/// already displayed.
#[derive(Debug)]
pub struct ViewState {
    /// Loaded dataset.
    catalog: Catalog,
    /// Derived lookups for the active language.
    index: CatalogIndex,
    /// Active filter and sort options.
    filter: FilterState,
    /// Persisted preferences (language, card size).
    preferences: Preferences,
    /// Where preference changes are written; `None` keeps them in memory only.
    settings_path: Option<PathBuf>,
    /// Session-only toggle for rendering item images.
    show_images: bool,
    /// IDs whose image was confirmed loaded this session.
    with_images: HashSet<String>,
    /// Monotonic state generation.
    generation: u64,
    /// Currently displayed list.
    visible: VisibleList,
}

impl ViewState {
    /// What: Create the controller and compute the initial visible list.
    ///
    /// Inputs:
    /// - `catalog`: Loaded dataset.
    /// - `preferences`: Preferences read at startup.
    /// - `settings_path`: Settings file to persist changes into, if any.
    ///
    /// Output:
    /// - Controller at generation 0 with every item visible under default filters.
    #[must_use]
    pub fn new(catalog: Catalog, preferences: Preferences, settings_path: Option<PathBuf>) -> Self {
        let index = CatalogIndex::build(&catalog, preferences.language);
        let filter = FilterState::default();
        let with_images = HashSet::new();
        let items = compute_visible_items(&catalog, &filter, preferences.language, &with_images);
        tracing::info!(
            items = catalog.cards.len(),
            groups = catalog.editions.len(),
            language = preferences.language.as_config_key(),
            "view state initialized"
        );
        Self {
            catalog,
            index,
            filter,
            preferences,
            settings_path,
            show_images: true,
            with_images,
            generation: 0,
            visible: VisibleList {
                generation: 0,
                items,
            },
        }
    }
}
