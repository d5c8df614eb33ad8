//! Implementation methods for `ViewState`.

use std::collections::HashSet;
use std::path::Path;

use crate::index::CatalogIndex;
use crate::logic::{
    FilterStats, available_groups, available_types, compute_visible_items, selected_groups,
};
use crate::state::types::{
    AnnotatedItem, Catalog, FilterState, Group, ImageFilter, Language, SortDirection, SortField,
};
use crate::state::view_state::{ViewState, VisibleList};
use crate::theme::{
    CARD_SIZE_DEFAULT, DEFAULT_GROUP_COLOR, GroupColor, clamp_card_size, group_color,
    save_card_size_factor, save_language,
};

impl ViewState {
    /// Loaded dataset.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Derived lookups for the active language.
    #[must_use]
    pub const fn index(&self) -> &CatalogIndex {
        &self.index
    }

    /// Active filter and sort options.
    #[must_use]
    pub const fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// Active display language.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.preferences.language
    }

    /// Active card size factor.
    #[must_use]
    pub const fn card_size_factor(&self) -> f64 {
        self.preferences.card_size_factor
    }

    /// Whether item images are rendered this session.
    #[must_use]
    pub const fn show_images(&self) -> bool {
        self.show_images
    }

    /// IDs whose image was confirmed loaded this session.
    #[must_use]
    pub const fn with_images(&self) -> &HashSet<String> {
        &self.with_images
    }

    /// Current state generation.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Currently displayed items.
    #[must_use]
    pub fn visible(&self) -> &[AnnotatedItem] {
        &self.visible.items
    }

    /// Generation of the currently displayed list.
    #[must_use]
    pub const fn visible_generation(&self) -> u64 {
        self.visible.generation
    }

    /// What: Compute the visible list for the current state without displaying it.
    ///
    /// Output:
    /// - List tagged with the current generation.
    #[must_use]
    pub fn snapshot(&self) -> VisibleList {
        VisibleList {
            generation: self.generation,
            items: compute_visible_items(
                &self.catalog,
                &self.filter,
                self.preferences.language,
                &self.with_images,
            ),
        }
    }

    /// What: Display a computed list unless a newer one is already shown.
    ///
    /// Inputs:
    /// - `list`: Result of an earlier [`Self::snapshot`].
    ///
    /// Output:
    /// - `true` when `list` replaced the displayed list; `false` when it was stale.
    ///
    /// Details:
    /// - Last state wins: a result computed from an older generation than the
    ///   displayed one is dropped even if it arrives later.
    pub fn accept_visible(&mut self, list: VisibleList) -> bool {
        if list.generation < self.visible.generation {
            tracing::debug!(
                stale = list.generation,
                displayed = self.visible.generation,
                "dropped stale visible list"
            );
            return false;
        }
        self.visible = list;
        true
    }

    /// Bump the generation and display a freshly computed list.
    fn refresh(&mut self) {
        self.generation += 1;
        let list = self.snapshot();
        self.accept_visible(list);
    }

    /// What: Add a group to the selection if absent, remove it if present.
    ///
    /// Inputs:
    /// - `group_id`: Group ID to toggle.
    pub fn toggle_group(&mut self, group_id: &str) {
        if !self.filter.selected_groups.remove(group_id) {
            self.filter.selected_groups.insert(group_id.to_string());
        }
        self.refresh();
    }

    /// What: Toggle a group by its localized display name (badge click).
    ///
    /// Inputs:
    /// - `name`: Display name in the active language.
    ///
    /// Output:
    /// - `true` when the name resolved to a group; unknown names change nothing.
    pub fn toggle_group_by_name(&mut self, name: &str) -> bool {
        let Some(id) = self.index.group_id_for_name(name).map(str::to_string) else {
            tracing::debug!(name, "no group with this display name");
            return false;
        };
        self.toggle_group(&id);
        true
    }

    /// Deselect every group.
    pub fn clear_groups(&mut self) {
        self.filter.selected_groups.clear();
        self.refresh();
    }

    /// Replace the search text.
    pub fn set_search(&mut self, query: &str) {
        self.filter.search_query = query.to_string();
        self.refresh();
    }

    /// Add a category to the filter if absent, remove it if present.
    pub fn toggle_type(&mut self, category: &str) {
        if !self.filter.selected_types.remove(category) {
            self.filter.selected_types.insert(category.to_string());
        }
        self.refresh();
    }

    /// Deselect every category.
    pub fn clear_types(&mut self) {
        self.filter.selected_types.clear();
        self.refresh();
    }

    /// Set the image-presence filter.
    pub fn set_image_filter(&mut self, filter: ImageFilter) {
        self.filter.image_filter = filter;
        self.refresh();
    }

    /// Set the sort field.
    pub fn set_sort_field(&mut self, field: SortField) {
        self.filter.sort_field = field;
        self.refresh();
    }

    /// Set the sort direction.
    pub fn set_sort_direction(&mut self, direction: SortDirection) {
        self.filter.sort_direction = direction;
        self.refresh();
    }

    /// What: Switch the display language.
    ///
    /// Inputs:
    /// - `language`: New language.
    ///
    /// Details:
    /// - Rebuilds the group-name index and persists the choice.
    /// - The selection is kept: it holds group IDs, which do not change with language.
    pub fn set_language(&mut self, language: Language) {
        self.preferences.language = language;
        self.index.rebuild_for(&self.catalog, language);
        if let Some(path) = self.settings_path.as_deref() {
            save_language(path, language);
        }
        self.refresh();
    }

    /// What: Set the card size factor.
    ///
    /// Inputs:
    /// - `factor`: Requested factor; clamped into `[0.5, 1.0]`, NaN resets to 1.0.
    ///
    /// Output:
    /// - The factor actually applied and persisted.
    pub fn set_card_size_factor(&mut self, factor: f64) -> f64 {
        let applied = clamp_card_size(factor);
        self.preferences.card_size_factor = applied;
        if let Some(path) = self.settings_path.as_deref() {
            save_card_size_factor(path, applied);
        }
        self.refresh();
        applied
    }

    /// Reset the card size factor to its default.
    pub fn reset_card_size(&mut self) {
        self.set_card_size_factor(CARD_SIZE_DEFAULT);
    }

    /// Toggle image rendering for this session; never persisted.
    pub fn set_show_images(&mut self, show: bool) {
        self.show_images = show;
        self.refresh();
    }

    /// What: Record many image-load outcomes with a single recomputation.
    ///
    /// Inputs:
    /// - `reports`: `(card_id, loaded)` pairs applied in order.
    ///
    /// Details:
    /// - Same last-write-wins rule as [`Self::report_image_load`]; the list
    ///   is recomputed once, and only when the set changed.
    pub fn report_image_loads<'a, I>(&mut self, reports: I)
    where
        I: IntoIterator<Item = (&'a str, bool)>,
    {
        let mut changed = false;
        for (card_id, loaded) in reports {
            changed |= if loaded {
                self.with_images.insert(card_id.to_string())
            } else {
                self.with_images.remove(card_id)
            };
        }
        if changed {
            self.refresh();
        }
    }

    /// What: Record whether an item's image rendered.
    ///
    /// Inputs:
    /// - `card_id`: Item ID.
    /// - `loaded`: `true` on load success, `false` on failure.
    ///
    /// Details:
    /// - Reports for the same ID are last-write-wins.
    /// - The list is recomputed only when the set actually changed.
    pub fn report_image_load(&mut self, card_id: &str, loaded: bool) {
        self.report_image_loads([(card_id, loaded)]);
    }

    /// Forget every image-load report, e.g. after stored images changed.
    pub fn invalidate_image_presence(&mut self) {
        if self.with_images.is_empty() {
            return;
        }
        self.with_images.clear();
        self.refresh();
    }

    /// Counts for the stats panel.
    #[must_use]
    pub fn stats(&self) -> FilterStats {
        FilterStats::new(
            self.filter.selected_groups.len(),
            self.catalog.editions.len(),
            self.visible.items.len(),
            self.catalog.cards.len(),
        )
    }

    /// Unselected groups matching the picker search text.
    #[must_use]
    pub fn available_groups(&self, query: &str) -> Vec<&Group> {
        available_groups(
            &self.catalog,
            &self.filter.selected_groups,
            query,
            self.preferences.language,
        )
    }

    /// Unselected categories matching the picker search text, sorted.
    #[must_use]
    pub fn available_types(&self, query: &str) -> Vec<&str> {
        available_types(&self.index.categories, &self.filter.selected_types, query)
    }

    /// Selected groups in dataset order.
    #[must_use]
    pub fn selected_groups(&self) -> Vec<&Group> {
        selected_groups(&self.catalog, &self.filter.selected_groups)
    }

    /// What: Badge color for a group shown under its localized name.
    ///
    /// Inputs:
    /// - `display_name`: Group name in the active language.
    ///
    /// Output:
    /// - Color keyed by the group's English name; the default color when unknown.
    #[must_use]
    pub fn badge_color(&self, display_name: &str) -> GroupColor {
        self.index
            .group_id_for_name(display_name)
            .and_then(|id| self.catalog.editions.iter().find(|g| g.id == id))
            .map_or(DEFAULT_GROUP_COLOR, |g| group_color(&g.edition_en))
    }

    /// Settings file receiving preference changes, if any.
    #[must_use]
    pub fn settings_path(&self) -> Option<&Path> {
        self.settings_path.as_deref()
    }
}
