//! Command-line catalog output: visible cards, categories, editions, stats.

use std::io::{self, Write};

use cardshelf::state::{AnnotatedItem, ViewState};

/// Render one visible card as a single line.
fn format_item(entry: &AnnotatedItem, state: &ViewState) -> String {
    let language = state.language();
    let item = &entry.item;
    let mut line = item.display_name(language).to_string();
    if let Some(sub) = item.subtitle(language) {
        line.push_str(&format!(" ({sub})"));
    }
    line.push_str(&format!(" | {} | {}", item.price, item.types.join(", ")));
    if !entry.groups.is_empty() {
        line.push_str(&format!(" | {}", entry.groups.join(", ")));
    }
    if state.show_images() && state.with_images().contains(&item.id) {
        line.push_str(" [image]");
    }
    line
}

/// What: Write the visible list, one card per line.
///
/// Inputs:
/// - `out`: Destination writer.
/// - `state`: Controller holding the displayed list.
///
/// Output:
/// - IO result of the writes.
///
/// # Errors
/// - Propagates write failures from `out`.
pub fn write_items(out: &mut impl Write, state: &ViewState) -> io::Result<()> {
    for entry in state.visible() {
        writeln!(out, "{}", format_item(entry, state))?;
    }
    Ok(())
}

/// What: Write the card types that can still be added to the filter.
///
/// Inputs:
/// - `out`: Destination writer.
/// - `state`: Controller with the current type selection.
/// - `query`: Picker search text; empty lists every unselected type.
///
/// Output:
/// - IO result; one sorted type per line.
///
/// # Errors
/// - Propagates write failures from `out`.
pub fn write_categories(out: &mut impl Write, state: &ViewState, query: &str) -> io::Result<()> {
    for category in state.available_types(query) {
        writeln!(out, "{category}")?;
    }
    Ok(())
}

/// What: Write the editions that can still be selected.
///
/// Inputs:
/// - `out`: Destination writer.
/// - `state`: Controller with the current selection.
/// - `query`: Picker search text matched against names and release date.
///
/// Output:
/// - IO result; each line is `id  name  (release date)`.
///
/// # Errors
/// - Propagates write failures from `out`.
pub fn write_editions(out: &mut impl Write, state: &ViewState, query: &str) -> io::Result<()> {
    for group in state.available_groups(query) {
        let name = group.display_name(state.language());
        if group.release_date.is_empty() {
            writeln!(out, "{}  {name}", group.id)?;
        } else {
            writeln!(out, "{}  {name}  ({})", group.id, group.release_date)?;
        }
    }
    Ok(())
}

/// Write group and item counts with their percentages.
///
/// # Errors
/// - Propagates write failures from `out`.
pub fn write_stats(out: &mut impl Write, state: &ViewState) -> io::Result<()> {
    let stats = state.stats();
    writeln!(
        out,
        "Editions: {}/{} ({:.0}%)  Cards: {}/{} ({:.0}%)",
        stats.groups_shown,
        stats.groups_total,
        stats.groups_ratio() * 100.0,
        stats.items_shown,
        stats.items_total,
        stats.items_ratio() * 100.0
    )
}
