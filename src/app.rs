//! Binary runtime: wire preferences, the image store and the catalog view together.

use std::io::Write;

use cardshelf::i18n::detect_language;
use cardshelf::images::ImageStore;
use cardshelf::index::load_catalog;
use cardshelf::state::{SortDirection, ViewState};
use cardshelf::theme::{load_preferences, settings_path};

use crate::args::{Args, catalog, images};

/// Result type used by the binary runtime.
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// What: Select an edition given either its ID or its display name.
///
/// Inputs:
/// - `state`: Controller to update.
/// - `key`: Value passed to `--edition`.
///
/// Output:
/// - `true` when the edition was found and toggled.
fn select_edition(state: &mut ViewState, key: &str) -> bool {
    if state.catalog().editions.iter().any(|g| g.id == key) {
        if !state.filter().selected_groups.contains(key) {
            state.toggle_group(key);
        }
        return true;
    }
    match state.index().group_id_for_name(key).map(str::to_string) {
        Some(id) if state.filter().selected_groups.contains(&id) => true,
        Some(_) => state.toggle_group_by_name(key),
        None => false,
    }
}

/// What: Apply filter and sort flags to the controller.
///
/// Inputs:
/// - `state`: Controller to update.
/// - `args`: Parsed arguments.
///
/// Details:
/// - Unknown editions are reported and skipped rather than aborting the run.
fn apply_filters(state: &mut ViewState, args: &Args) {
    for key in &args.editions_selected {
        if !select_edition(state, key) {
            tracing::warn!(edition = %key, "unknown edition");
            eprintln!("Unknown edition: {key}");
        }
    }
    for category in &args.types {
        if !state.filter().selected_types.contains(category) {
            state.toggle_type(category);
        }
    }
    if let Some(query) = &args.search {
        state.set_search(query);
    }
    state.set_image_filter(args.images);
    state.set_sort_field(args.sort);
    if args.desc {
        state.set_sort_direction(SortDirection::Desc);
    }
}

/// What: Seed image presence from the store for every catalog card.
///
/// Inputs:
/// - `state`: Controller to update.
/// - `store`: Image store; lookup failures count as "no image".
///
/// Details:
/// - Stored blobs stand in for successfully rendered images on the command line.
async fn report_stored_images(state: &mut ViewState, store: &ImageStore) {
    let ids: Vec<String> = state.catalog().cards.iter().map(|c| c.id.clone()).collect();
    let present = store.stored_among(ids.iter().map(String::as_str)).await;
    state.report_image_loads(ids.iter().map(|id| (id.as_str(), present.contains(id))));
    tracing::debug!(with_images = present.len(), "seeded image presence");
}

/// What: Run one command-line session.
///
/// Inputs:
/// - `args`: Parsed arguments.
///
/// Output:
/// - `Ok(())` on success.
///
/// # Errors
/// - Returns `Err` when the catalog cannot be loaded, an image store
///   operation fails, or stdout cannot be written.
///
/// Details:
/// - Store maintenance runs first; when nothing else was requested the
///   catalog is never loaded.
pub async fn run(args: Args) -> Result<()> {
    let settings = settings_path();
    let preferences = load_preferences(&settings, detect_language());
    tracing::info!(
        path = %settings.display(),
        language = preferences.language.as_config_key(),
        card_size_factor = preferences.card_size_factor,
        "preferences loaded"
    );
    let store = ImageStore::open_default();

    if args.clear_images {
        images::handle_clear(&store).await?;
    }
    if !args.import_images.is_empty() {
        images::handle_import(&store, args.import_images.clone()).await?;
    }
    if args.image_count {
        images::handle_count(&store).await?;
    }

    if args.maintenance_only() {
        if let Some(language) = args.lang {
            cardshelf::theme::save_language(&settings, language);
        }
        if let Some(factor) = args.card_size {
            let applied = cardshelf::theme::clamp_card_size(factor);
            cardshelf::theme::save_card_size_factor(&settings, applied);
            println!("Card size factor: {applied}");
        }
        return Ok(());
    }

    let catalog = load_catalog(&args.data)?;
    let mut state = ViewState::new(catalog, preferences, Some(settings));
    if let Some(language) = args.lang {
        state.set_language(language);
    }
    if let Some(factor) = args.card_size {
        let applied = state.set_card_size_factor(factor);
        println!("Card size factor: {applied}");
    }

    report_stored_images(&mut state, &store).await;

    let mut out = std::io::stdout().lock();
    apply_filters(&mut state, &args);
    if args.categories {
        catalog::write_categories(&mut out, &state, &args.type_query)?;
        return Ok(());
    }
    if args.editions {
        catalog::write_editions(&mut out, &state, &args.edition_query)?;
        return Ok(());
    }

    catalog::write_items(&mut out, &state)?;
    if args.stats {
        catalog::write_stats(&mut out, &state)?;
    }
    out.flush()?;
    Ok(())
}
