use std::collections::BTreeSet;

/// What: List categories that can still be added to the type filter.
///
/// Inputs:
/// - `categories`: Every category tag, already sorted and deduplicated.
/// - `selected`: Currently selected tags.
/// - `query`: Picker search text; empty lists every unselected tag.
///
/// Output:
/// - Unselected tags containing `query` case-insensitively, in `categories` order.
#[must_use]
pub fn available_types<'a>(
    categories: &'a [String],
    selected: &BTreeSet<String>,
    query: &str,
) -> Vec<&'a str> {
    let q = query.to_lowercase();
    categories
        .iter()
        .filter(|c| !selected.contains(*c))
        .filter(|c| c.to_lowercase().contains(&q))
        .map(String::as_str)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categories() -> Vec<String> {
        ["Action", "Reaction", "Treasure", "Victory"]
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    /// What: Picker search hides selected tags and ignores case
    ///
    /// - Input: Action selected, query "ACT"
    /// - Output: Only Reaction
    fn available_types_excludes_selected() {
        let all = categories();
        let selected: BTreeSet<String> = ["Action".to_string()].into();
        assert_eq!(
            available_types(&all, &selected, ""),
            vec!["Reaction", "Treasure", "Victory"]
        );
        assert_eq!(available_types(&all, &selected, "ACT"), vec!["Reaction"]);
        assert!(available_types(&all, &BTreeSet::new(), "curse").is_empty());
    }
}
