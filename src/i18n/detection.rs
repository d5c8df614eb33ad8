//! System locale detection utilities.

use std::env;

use crate::state::types::Language;

/// What: Detect system locale from environment variables.
///
/// Inputs:
/// - None (reads from environment)
///
/// Output:
/// - `Option<String>` containing locale code (e.g., "de-DE") or None if not detectable
///
/// Details:
/// - Checks `LC_ALL`, `LC_MESSAGES`, and `LANG` in that order; the first parseable one wins
#[must_use]
pub fn detect_system_locale() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .find_map(|var| env::var(var).ok().and_then(|s| parse_locale_string(&s)))
}

/// What: Parse a locale string from environment variables into a standardized format.
///
/// Inputs:
/// - `locale_str`: Locale string like "de_DE.UTF-8", "de-DE", "en_US.utf8"
///
/// Output:
/// - `Option<String>` with standardized format (e.g., "de-DE") or None if empty
///
/// Details:
/// - Removes encoding suffix and `@modifier`, converts underscores to hyphens
/// - Lowercases the language part and uppercases the region part
fn parse_locale_string(locale_str: &str) -> Option<String> {
    let trimmed = locale_str.trim();
    if trimmed.is_empty() {
        return None;
    }
    let locale_part = trimmed.split(['.', '@']).next()?;
    let normalized = locale_part.replace('_', "-");
    let mut parts = normalized.split('-');
    let language = parts.next()?.to_lowercase();
    if language.is_empty() {
        return None;
    }
    match parts.next() {
        Some(region) if !region.is_empty() => Some(format!("{language}-{}", region.to_uppercase())),
        _ => Some(language),
    }
}

/// What: Map a locale code onto a supported display language.
///
/// Inputs:
/// - `locale`: Normalized locale such as "de-AT" or "en".
///
/// Output:
/// - `Language::De` for any German locale; `Language::En` otherwise.
#[must_use]
pub fn language_from_locale(locale: &str) -> Language {
    if locale.to_lowercase().starts_with("de") {
        Language::De
    } else {
        Language::En
    }
}

/// Display language suggested by the system locale, English when undetectable.
#[must_use]
pub fn detect_language() -> Language {
    detect_system_locale().map_or(Language::En, |l| language_from_locale(&l))
}
