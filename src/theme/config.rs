use std::fs;
use std::path::Path;

use crate::state::types::Language;

/// Content written when settings.conf does not exist yet.
pub const SETTINGS_SKELETON_CONTENT: &str = "# cardshelf settings\n\
#\n\
# Format: key = value\n\
# Lines starting with # are comments.\n\
#\n\
# Display language: en | de\n\
# Leave unset to follow the system locale.\n\
# language = en\n\
#\n\
# Card size factor between 0.5 and 1.0\n\
card_size_factor = 1.0\n";

/// What: Replace or append one `key = value` line in settings.conf.
///
/// Inputs:
/// - `path`: Settings file to update.
/// - `key_norm`: Normalized key (lowercase with underscores).
/// - `value`: Value text to write.
///
/// Output:
/// - `Ok(())` once written; IO errors are returned to the caller.
///
/// # Errors
/// - Returns `Err` when the directory cannot be created or the file cannot be written
///
/// Details:
/// - Preserves comments and unrelated keys; starts from the skeleton when the file is missing or empty.
/// - Commented-out lines for the key are left untouched and a live line is appended instead.
pub fn save_key(path: &Path, key_norm: &str, value: &str) -> std::io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }

    let meta = fs::metadata(path).ok();
    let file_empty = meta.as_ref().is_none_or(|m| m.len() == 0);
    let mut lines: Vec<String> = if file_empty {
        SETTINGS_SKELETON_CONTENT
            .lines()
            .map(ToString::to_string)
            .collect()
    } else {
        fs::read_to_string(path)?
            .lines()
            .map(ToString::to_string)
            .collect()
    };

    let mut replaced = false;
    for line in &mut lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }
        if let Some((kraw, _)) = trimmed.split_once('=') {
            let key = kraw.trim().to_lowercase().replace(['.', '-', ' '], "_");
            if key == key_norm {
                *line = format!("{key_norm} = {value}");
                replaced = true;
            }
        }
    }
    if !replaced {
        lines.push(format!("{key_norm} = {value}"));
    }
    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(path, content)
}

/// Persist the display language, logging failures.
pub fn save_language(path: &Path, language: Language) {
    if let Err(e) = save_key(path, "language", language.as_config_key()) {
        tracing::warn!(path = %path.display(), error = %e, "failed to save language");
    }
}

/// Persist the card size factor, logging failures.
pub fn save_card_size_factor(path: &Path, factor: f64) {
    if let Err(e) = save_key(path, "card_size_factor", &format!("{factor}")) {
        tracing::warn!(path = %path.display(), error = %e, "failed to save card size factor");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::settings::parse_preferences;

    #[test]
    /// What: First save writes the skeleton plus the key
    ///
    /// - Input: Missing settings file, save language `de`
    /// - Output: File contains skeleton comments and `language = de`
    fn save_creates_from_skeleton() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("sub").join("settings.conf");
        save_language(&path, Language::De);
        let body = std::fs::read_to_string(&path).expect("read settings");
        assert!(body.starts_with("# cardshelf settings"));
        assert!(body.contains("\nlanguage = de\n"));
        assert!(body.contains("# language = en"));
    }

    #[test]
    /// What: Saving replaces existing keys and keeps comments
    fn save_replaces_and_preserves() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("settings.conf");
        std::fs::write(&path, "# mine\nCard-Size-Factor = 0.9\nother = x\n").expect("write");
        save_card_size_factor(&path, 0.55);
        let body = std::fs::read_to_string(&path).expect("read");
        assert_eq!(body, "# mine\ncard_size_factor = 0.55\nother = x\n");
        let prefs = parse_preferences(&body, Language::En);
        assert!((prefs.card_size_factor - 0.55).abs() < f64::EPSILON);
    }
}
