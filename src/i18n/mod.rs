//! Language selection for cardshelf.
//!
//! Only the choice of display language lives here: the catalog carries its own
//! English and German names, so there are no translation tables to load.

mod detection;

pub use detection::{detect_language, detect_system_locale, language_from_locale};

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
/// Serialize tests that mutate locale environment variables.
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
