use std::cmp::Ordering;

use crate::state::types::{AnnotatedItem, Language, SortDirection, SortField};

/// What: Fold a string into its primary collation key.
///
/// Inputs:
/// - `s`: Display text.
///
/// Output:
/// - Lowercased text with common Latin diacritics removed and `ß` expanded.
///
/// Details:
/// - Covers the accents present in German and French card names; other
///   characters pass through lowercased.
fn collation_key(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars().flat_map(char::to_lowercase) {
        match ch {
            'ä' | 'á' | 'à' | 'â' | 'ã' | 'å' => out.push('a'),
            'ö' | 'ó' | 'ò' | 'ô' | 'õ' | 'ø' => out.push('o'),
            'ü' | 'ú' | 'ù' | 'û' => out.push('u'),
            'é' | 'è' | 'ê' | 'ë' => out.push('e'),
            'í' | 'ì' | 'î' | 'ï' => out.push('i'),
            'ç' => out.push('c'),
            'ñ' => out.push('n'),
            'ß' => out.push_str("ss"),
            other => out.push(other),
        }
    }
    out
}

/// What: Compare two strings the way a human-facing list expects.
///
/// Inputs:
/// - `a`, `b`: Strings to compare.
///
/// Output:
/// - Ordering on the folded key, then on lowercase text, then on raw text.
///
/// Details:
/// - The final raw tiebreak keeps the ordering total and deterministic.
#[must_use]
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Compare two items by their localized display names.
fn name_cmp(a: &AnnotatedItem, b: &AnnotatedItem, language: Language) -> Ordering {
    locale_cmp(a.item.display_name(language), b.item.display_name(language))
}

/// What: Ascending comparator for one sort field.
///
/// Inputs:
/// - `a`, `b`: Items to compare.
/// - `field`: Active sort field.
/// - `language`: Language for name tiebreaks.
///
/// Output:
/// - Ascending ordering; category and group fall back to name on ties.
#[must_use]
pub fn compare_items(
    a: &AnnotatedItem,
    b: &AnnotatedItem,
    field: SortField,
    language: Language,
) -> Ordering {
    match field {
        SortField::Name => name_cmp(a, b, language),
        SortField::Price => a.item.price_value().cmp(&b.item.price_value()),
        SortField::Category => {
            let ta = a.item.types.first().map_or("", String::as_str);
            let tb = b.item.types.first().map_or("", String::as_str);
            locale_cmp(ta, tb).then_with(|| name_cmp(a, b, language))
        }
        SortField::Group => {
            let ga = a.groups.first().map_or("", String::as_str);
            let gb = b.groups.first().map_or("", String::as_str);
            locale_cmp(ga, gb).then_with(|| name_cmp(a, b, language))
        }
    }
}

/// What: Sort items in place by field and direction.
///
/// Inputs:
/// - `items`: Filtered items.
/// - `field`, `direction`: Active sort options.
/// - `language`: Language for name comparisons.
///
/// Output:
/// - `items` reordered; equal elements keep their relative order.
///
/// Details:
/// - Descending reverses the ascending comparator rather than using a separate one.
pub fn sort_items(
    items: &mut [AnnotatedItem],
    field: SortField,
    direction: SortDirection,
    language: Language,
) {
    items.sort_by(|a, b| {
        let ord = compare_items(a, b, field, language);
        match direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::test_support::item;

    fn annotated(id: &str, en: &str, de: Option<&str>, price: &str, types: &[&str], groups: &[&str]) -> AnnotatedItem {
        AnnotatedItem {
            item: item(id, en, de, price, types),
            groups: groups.iter().map(|g| (*g).to_string()).collect(),
        }
    }

    fn ids(items: &[AnnotatedItem]) -> Vec<&str> {
        items.iter().map(|i| i.item.id.as_str()).collect()
    }

    #[test]
    /// What: Folding treats umlauts as their base letters and ignores case
    fn locale_cmp_folds_case_and_umlauts() {
        assert!(locale_cmp("Äpfel", "apfel").is_gt());
        assert_eq!(locale_cmp("Äpfel", "Apfelbaum"), Ordering::Less);
        assert!(locale_cmp("straße", "strasse").is_ne());
        assert!(locale_cmp("bank", "Bank").is_gt());
        assert_eq!(locale_cmp("zebra", "Ähre"), Ordering::Greater);
    }

    #[test]
    /// What: Price sort treats unparseable prices as zero and reverses for descending
    ///
    /// - Input: Distinct prices including a decorated and a non-numeric one
    /// - Output: Ascending then exactly reversed
    fn price_sort_reverses_exactly() {
        let mut items = vec![
            annotated("a", "A", None, "5", &[], &[]),
            annotated("b", "B", None, "*", &[], &[]),
            annotated("c", "C", None, "3P", &[], &[]),
        ];
        sort_items(&mut items, SortField::Price, SortDirection::Asc, Language::En);
        let asc: Vec<String> = ids(&items).into_iter().map(str::to_string).collect();
        assert_eq!(asc, vec!["b", "c", "a"]);
        sort_items(&mut items, SortField::Price, SortDirection::Desc, Language::En);
        let mut desc: Vec<String> = ids(&items).into_iter().map(str::to_string).collect();
        desc.reverse();
        assert_eq!(asc, desc);
    }

    #[test]
    /// What: Name sort uses the German name with English fallback
    fn name_sort_uses_localized_name() {
        let mut items = vec![
            annotated("a", "Cellar", Some("Keller"), "2", &[], &[]),
            annotated("b", "Moat", Some("Burggraben"), "2", &[], &[]),
            annotated("c", "Gold", None, "6", &[], &[]),
        ];
        sort_items(&mut items, SortField::Name, SortDirection::Asc, Language::De);
        assert_eq!(ids(&items), vec!["b", "c", "a"]);
        sort_items(&mut items, SortField::Name, SortDirection::Asc, Language::En);
        assert_eq!(ids(&items), vec!["a", "c", "b"]);
    }

    #[test]
    /// What: Category and group sorts tie-break by name
    fn category_and_group_tiebreak_by_name() {
        let mut items = vec![
            annotated("a", "Zeta", None, "1", &["Action"], &["Base"]),
            annotated("b", "Alpha", None, "1", &["Action"], &["Base"]),
            annotated("c", "Mid", None, "1", &["Treasure"], &["Alchemy"]),
            annotated("d", "None", None, "1", &[], &[]),
        ];
        sort_items(&mut items, SortField::Category, SortDirection::Asc, Language::En);
        assert_eq!(ids(&items), vec!["d", "b", "a", "c"]);
        sort_items(&mut items, SortField::Group, SortDirection::Asc, Language::En);
        assert_eq!(ids(&items), vec!["d", "c", "b", "a"]);
        sort_items(&mut items, SortField::Group, SortDirection::Desc, Language::En);
        assert_eq!(ids(&items), vec!["a", "b", "c", "d"]);
    }

    #[test]
    /// What: Equal keys keep their input order in both directions
    fn sort_is_stable_for_ties() {
        let mut items = vec![
            annotated("x", "X", None, "2", &[], &[]),
            annotated("y", "Y", None, "2", &[], &[]),
        ];
        sort_items(&mut items, SortField::Price, SortDirection::Desc, Language::En);
        assert_eq!(ids(&items), vec!["x", "y"]);
    }
}
