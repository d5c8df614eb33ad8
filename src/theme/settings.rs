use std::path::Path;

use crate::state::types::Language;

/// Smallest allowed card size factor.
pub const CARD_SIZE_MIN: f64 = 0.5;
/// Largest allowed card size factor; also the default.
pub const CARD_SIZE_MAX: f64 = 1.0;
/// Default card size factor.
pub const CARD_SIZE_DEFAULT: f64 = 1.0;

/// Preferences that survive across sessions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Preferences {
    /// Display language.
    pub language: Language,
    /// Card size factor in `[CARD_SIZE_MIN, CARD_SIZE_MAX]`.
    pub card_size_factor: f64,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            language: Language::default(),
            card_size_factor: CARD_SIZE_DEFAULT,
        }
    }
}

/// What: Parse a persisted card size factor.
///
/// Inputs:
/// - `raw`: Stored decimal string.
///
/// Output:
/// - Value clamped to `[0.5, 1.0]`; [`CARD_SIZE_DEFAULT`] when not a finite number.
#[must_use]
pub fn parse_card_size_factor(raw: &str) -> f64 {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => clamp_card_size(v),
        _ => CARD_SIZE_DEFAULT,
    }
}

/// Clamp a card size factor into the allowed range; NaN maps to the default.
#[must_use]
pub fn clamp_card_size(v: f64) -> f64 {
    if v.is_nan() {
        return CARD_SIZE_DEFAULT;
    }
    v.clamp(CARD_SIZE_MIN, CARD_SIZE_MAX)
}

/// Strip a trailing `#` or `//` comment from a value.
pub(crate) fn strip_inline_comment(mut s: &str) -> &str {
    if let Some(i) = s.find("//") {
        s = &s[..i];
    }
    if let Some(i) = s.find('#') {
        s = &s[..i];
    }
    s.trim()
}

/// What: Parse preferences from settings.conf content.
///
/// Inputs:
/// - `content`: File content in `key = value` form.
/// - `fallback_language`: Language used when none is stored or the stored one is invalid.
///
/// Output:
/// - Parsed `Preferences`; invalid values are discarded silently.
///
/// Details:
/// - Keys are normalized (`card-size-factor`, `card.size.factor` and
///   `card_size_factor` are equivalent).
#[must_use]
pub fn parse_preferences(content: &str, fallback_language: Language) -> Preferences {
    let mut prefs = Preferences {
        language: fallback_language,
        card_size_factor: CARD_SIZE_DEFAULT,
    };
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }
        let Some((raw_key, raw_val)) = trimmed.split_once('=') else {
            continue;
        };
        let key = raw_key.trim().to_lowercase().replace(['.', '-', ' '], "_");
        let val = strip_inline_comment(raw_val.trim());
        match key.as_str() {
            "language" | "lang" => {
                if let Some(lang) = Language::from_config_key(val) {
                    prefs.language = lang;
                } else {
                    tracing::debug!(value = val, "ignoring unknown language in settings");
                }
            }
            "card_size_factor" | "card_size" => {
                prefs.card_size_factor = parse_card_size_factor(val);
            }
            _ => {}
        }
    }
    prefs
}

/// What: Read preferences once at startup.
///
/// Inputs:
/// - `path`: Settings file.
/// - `fallback_language`: Language to use when none is stored.
///
/// Output:
/// - Parsed preferences, or defaults (with `fallback_language`) when the file is unreadable.
#[must_use]
pub fn load_preferences(path: &Path, fallback_language: Language) -> Preferences {
    match std::fs::read_to_string(path) {
        Ok(content) => parse_preferences(&content, fallback_language),
        Err(e) => {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = %path.display(), error = %e, "failed to read settings");
            }
            Preferences {
                language: fallback_language,
                ..Preferences::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Out-of-range and non-numeric card sizes
    ///
    /// - Input: "9.9", "abc", "0.1", "0.75", "NaN", "inf"
    /// - Output: 1.0, 1.0, 0.5, 0.75, 1.0, 1.0
    fn card_size_clamps_and_defaults() {
        assert!((parse_card_size_factor("9.9") - 1.0).abs() < f64::EPSILON);
        assert!((parse_card_size_factor("abc") - 1.0).abs() < f64::EPSILON);
        assert!((parse_card_size_factor("0.1") - 0.5).abs() < f64::EPSILON);
        assert!((parse_card_size_factor(" 0.75 ") - 0.75).abs() < f64::EPSILON);
        assert!((parse_card_size_factor("NaN") - 1.0).abs() < f64::EPSILON);
        assert!((parse_card_size_factor("inf") - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    /// What: Settings parser reads both keys and ignores junk
    fn parse_preferences_reads_keys() {
        let content = "# comment\nlanguage = de\ncard-size-factor = 0.6 # smaller\nunknown = 1\nnoequals\n";
        let prefs = parse_preferences(content, Language::En);
        assert_eq!(prefs.language, Language::De);
        assert!((prefs.card_size_factor - 0.6).abs() < f64::EPSILON);
    }

    #[test]
    /// What: Invalid language keeps the fallback
    fn parse_preferences_invalid_language_falls_back() {
        let prefs = parse_preferences("language = klingon\ncard_size_factor = abc", Language::De);
        assert_eq!(prefs.language, Language::De);
        assert!((prefs.card_size_factor - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    /// What: Missing file yields defaults with the fallback language
    fn load_preferences_missing_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let prefs = load_preferences(&dir.path().join("nope.conf"), Language::De);
        assert_eq!(prefs.language, Language::De);
        assert!((prefs.card_size_factor - 1.0).abs() < f64::EPSILON);
    }
}
