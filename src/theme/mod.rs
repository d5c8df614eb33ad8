//! Presentation-adjacent configuration for cardshelf.
//!
//! Group badge colors, config directory layout, and the persisted
//! preferences (display language and card size) live here.

/// Group badge color table.
pub mod colors;
/// Settings file writing.
mod config;
/// Path resolution for config directories.
mod paths;
/// Settings file parsing.
pub mod settings;

pub use colors::{DEFAULT_GROUP_COLOR, GroupColor, group_color};
pub use config::{SETTINGS_SKELETON_CONTENT, save_card_size_factor, save_key, save_language};
pub use paths::{config_dir, images_dir, logs_dir, settings_path};
pub use settings::{
    CARD_SIZE_DEFAULT, CARD_SIZE_MAX, CARD_SIZE_MIN, Preferences, clamp_card_size,
    load_preferences, parse_card_size_factor, parse_preferences,
};

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
/// What: Provide a process-wide mutex to serialize environment-mutating tests in this module.
///
/// Output:
/// - Shared reference to a lazily-initialized `Mutex<()>`.
///
/// Details:
/// - Callers should lock the mutex to guard `HOME`/locale environment changes.
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
