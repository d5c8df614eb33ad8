//! Static color triples for group badges.
//!
//! Lookup is always by the English group name so a badge keeps its color
//! when the display language changes.

/// Badge colors as `#RRGGBB` strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupColor {
    /// Fill color.
    pub background: &'static str,
    /// Label color.
    pub text: &'static str,
    /// Outline color.
    pub border: &'static str,
}

/// Color used for names missing from the table.
pub const DEFAULT_GROUP_COLOR: GroupColor = GroupColor {
    background: "#6b7280",
    text: "#ffffff",
    border: "#4b5563",
};

/// Shorthand constructor for table rows.
const fn c(background: &'static str, text: &'static str, border: &'static str) -> GroupColor {
    GroupColor {
        background,
        text,
        border,
    }
}

/// Known English group names and their colors.
const GROUP_COLORS: &[(&str, GroupColor)] = &[
    ("Base (1st Edition)", c("#3b82f6", "#ffffff", "#2563eb")),
    ("Base (2nd Edition)", c("#60a5fa", "#ffffff", "#3b82f6")),
    ("Intrigue (1st Edition)", c("#8b5cf6", "#ffffff", "#7c3aed")),
    ("Intrigue (2nd Edition)", c("#a78bfa", "#ffffff", "#8b5cf6")),
    ("Seaside (1st Edition)", c("#06b6d4", "#ffffff", "#0891b2")),
    ("Seaside (2nd Edition)", c("#22d3ee", "#ffffff", "#06b6d4")),
    ("Alchemy", c("#f59e0b", "#ffffff", "#d97706")),
    ("Prosperity (1st Edition)", c("#eab308", "#000000", "#ca8a04")),
    ("Prosperity (2nd Edition)", c("#fde047", "#000000", "#eab308")),
    ("Hinterlands (1st Edition)", c("#22c55e", "#ffffff", "#16a34a")),
    ("Hinterlands (2nd Edition)", c("#4ade80", "#ffffff", "#22c55e")),
    ("Dark Ages", c("#1f2937", "#ffffff", "#111827")),
    ("Adventures", c("#ef4444", "#ffffff", "#dc2626")),
    ("Empires", c("#f97316", "#ffffff", "#ea580c")),
    ("Nocturne", c("#6366f1", "#ffffff", "#4f46e5")),
    ("Renaissance", c("#ec4899", "#ffffff", "#db2777")),
    ("Menagerie", c("#14b8a6", "#ffffff", "#0d9488")),
    ("Allies", c("#84cc16", "#ffffff", "#65a30d")),
    ("Plunder", c("#f43f5e", "#ffffff", "#e11d48")),
    ("Promos", c("#a855f7", "#ffffff", "#9333ea")),
    ("Cornucopia (1st Edition)", c("#10b981", "#ffffff", "#059669")),
    ("Guilds (1st Edition)", c("#d97706", "#ffffff", "#b45309")),
    ("Cornucopia & Guilds (2nd Edition)", c("#34d399", "#ffffff", "#10b981")),
];

/// What: Look up the badge colors for a group.
///
/// Inputs:
/// - `english_name`: English group name (exact match).
///
/// Output:
/// - Table entry, or [`DEFAULT_GROUP_COLOR`] for unknown names.
#[must_use]
pub fn group_color(english_name: &str) -> GroupColor {
    GROUP_COLORS
        .iter()
        .find(|(name, _)| *name == english_name)
        .map_or(DEFAULT_GROUP_COLOR, |(_, color)| *color)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Known names hit the table, unknown names get gray
    fn lookup_known_and_unknown() {
        assert_eq!(group_color("Alchemy").background, "#f59e0b");
        assert_eq!(group_color("Prosperity (1st Edition)").text, "#000000");
        assert_eq!(group_color("Die Alchemisten"), DEFAULT_GROUP_COLOR);
    }

    #[test]
    /// What: Table has no duplicate names
    fn table_names_unique() {
        let mut names: Vec<&str> = GROUP_COLORS.iter().map(|(n, _)| *n).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), GROUP_COLORS.len());
    }
}
