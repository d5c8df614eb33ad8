//! Core value types used by cardshelf state.

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

/// Identifier as it may appear in a dataset: either a JSON string or a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    /// Plain string identifier.
    Text(String),
    /// Numeric identifier, kept in its canonical JSON spelling.
    Number(serde_json::Number),
}

impl RawId {
    /// Normalize into the owned string form used as a lookup key.
    fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

/// Deserialize a single identifier that may be a string or a number.
fn de_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(RawId::deserialize(d)?.into_string())
}

/// Deserialize an optional string-or-number field; `null` becomes an empty string.
fn de_opt_id<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(Option::<RawId>::deserialize(d)?
        .map(RawId::into_string)
        .unwrap_or_default())
}

/// Deserialize a list of identifiers that may mix strings and numbers; `null` is empty.
fn de_id_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(Option::<Vec<RawId>>::deserialize(d)?
        .unwrap_or_default()
        .into_iter()
        .map(RawId::into_string)
        .collect())
}

/// Deserialize a field whose `null` means the same as an absent key.
fn de_null_default<'de, D, T>(d: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(d)?.unwrap_or_default())
}

/// Display language for localized names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English; the primary name of every item.
    #[default]
    En,
    /// German; falls back to English where a German name is missing.
    De,
}

impl Language {
    /// What: Return the string key used in settings files for this language.
    ///
    /// Inputs: none
    ///
    /// Output: Static config key string (`"en"` or `"de"`).
    #[must_use]
    pub const fn as_config_key(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::De => "de",
        }
    }

    /// What: Parse a language from its settings key.
    ///
    /// Inputs: `s` config string (case-insensitive).
    ///
    /// Output: `Some(Language)` on `en`/`de`; `None` otherwise.
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "en" => Some(Self::En),
            "de" => Some(Self::De),
            _ => None,
        }
    }
}

/// Catalog entry (a card).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier.
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    /// Primary (English) name.
    pub en: String,
    /// Secondary (German) name, when the dataset has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub de: Option<String>,
    /// Price exactly as written in the dataset.
    #[serde(default, deserialize_with = "de_opt_id")]
    pub price: String,
    /// Category tags in dataset order.
    #[serde(rename = "type", default, deserialize_with = "de_null_default")]
    pub types: Vec<String>,
}

impl Item {
    /// What: Resolve the name shown for this item in `language`.
    ///
    /// Inputs:
    /// - `language`: Active display language.
    ///
    /// Output:
    /// - German name when `language` is German and a non-empty German name exists; English otherwise.
    #[must_use]
    pub fn display_name(&self, language: Language) -> &str {
        match language {
            Language::De => self
                .de
                .as_deref()
                .filter(|s| !s.is_empty())
                .unwrap_or(&self.en),
            Language::En => &self.en,
        }
    }

    /// What: Resolve the subtitle shown under the display name.
    ///
    /// Inputs:
    /// - `language`: Active display language.
    ///
    /// Output:
    /// - `Some(english_name)` in German when it differs from the display name; `None` otherwise.
    #[must_use]
    pub fn subtitle(&self, language: Language) -> Option<&str> {
        match language {
            Language::De if self.display_name(language) != self.en => Some(&self.en),
            _ => None,
        }
    }

    /// Numeric price used for sorting; see [`parse_price`].
    #[must_use]
    pub fn price_value(&self) -> i64 {
        parse_price(&self.price)
    }
}

/// What: Parse the leading integer of a price string.
///
/// Inputs:
/// - `raw`: Price text from the dataset (e.g., `"5"`, `"4P"`, `"*"`).
///
/// Output:
/// - Value of the leading optionally-signed digit run; `0` when there is none.
///
/// Details:
/// - Trailing decorations such as potion or debt markers are ignored (`"4P"` -> 4).
/// - Overflowing values saturate rather than failing.
#[must_use]
pub fn parse_price(raw: &str) -> i64 {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut value: i64 = 0;
    for b in digits.bytes().take_while(u8::is_ascii_digit) {
        value = value.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }
    if negative { -value } else { value }
}

/// Item annotated with the localized names of every group containing it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AnnotatedItem {
    /// The underlying catalog entry.
    #[serde(flatten)]
    pub item: Item,
    /// Localized group names, sorted lexicographically.
    pub groups: Vec<String>,
}

/// Named collection of items (an edition).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier.
    #[serde(deserialize_with = "de_id")]
    pub id: String,
    /// English display name; also the key for color lookup.
    pub edition_en: String,
    /// German display name.
    #[serde(default, deserialize_with = "de_null_default")]
    pub edition_de: String,
    /// Release date as written in the dataset.
    #[serde(default, deserialize_with = "de_null_default")]
    pub release_date: String,
    /// Contained item IDs; may reference IDs missing from the item list.
    #[serde(default, deserialize_with = "de_id_list")]
    pub card_ids: Vec<String>,
}

impl Group {
    /// Localized display name; German falls back to English when empty.
    #[must_use]
    pub fn display_name(&self, language: Language) -> &str {
        match language {
            Language::De if !self.edition_de.is_empty() => &self.edition_de,
            _ => &self.edition_en,
        }
    }
}

/// The static dataset: every item and every group.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// All items.
    #[serde(default)]
    pub cards: Vec<Item>,
    /// All groups.
    #[serde(default)]
    pub editions: Vec<Group>,
}

/// Image-presence filter applied after search and category filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFilter {
    /// No filtering.
    #[default]
    All,
    /// Only items whose image was confirmed loaded.
    With,
    /// Only items without a confirmed image.
    Without,
}

impl ImageFilter {
    /// Config/CLI key for this filter.
    #[must_use]
    pub const fn as_config_key(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::With => "with",
            Self::Without => "without",
        }
    }

    /// What: Parse an image filter from its key or common aliases.
    ///
    /// Inputs: `s` key string (case-insensitive).
    ///
    /// Output: `Some(ImageFilter)` on recognized value; `None` otherwise.
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "all" | "any" => Some(Self::All),
            "with" | "has-image" | "has_image" => Some(Self::With),
            "without" | "no-image" | "no_image" => Some(Self::Without),
            _ => None,
        }
    }
}

/// Field the visible list is ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    /// Localized name.
    Name,
    /// Numeric price.
    #[default]
    Price,
    /// First category tag, then name.
    Category,
    /// First group name, then name.
    Group,
}

impl SortField {
    /// Config/CLI key for this field.
    #[must_use]
    pub const fn as_config_key(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Price => "price",
            Self::Category => "type",
            Self::Group => "edition",
        }
    }

    /// What: Parse a sort field from its key or legacy aliases.
    ///
    /// Inputs: `s` key string (case-insensitive).
    ///
    /// Output: `Some(SortField)` on recognized value; `None` otherwise.
    #[must_use]
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "name" => Some(Self::Name),
            "price" | "cost" => Some(Self::Price),
            "type" | "category" => Some(Self::Category),
            "edition" | "group" => Some(Self::Group),
            _ => None,
        }
    }
}

/// Sort direction; descending reverses the ascending comparator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Asc,
    /// Largest first.
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// User-adjustable filter and sort state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    /// Selected group IDs; empty means every group.
    pub selected_groups: BTreeSet<String>,
    /// Free-text search; empty means no search filter.
    pub search_query: String,
    /// Selected category tags; an item matches when it has any of them.
    pub selected_types: BTreeSet<String>,
    /// Image-presence filter.
    pub image_filter: ImageFilter,
    /// Active sort field.
    pub sort_field: SortField,
    /// Active sort direction.
    pub sort_direction: SortDirection,
}
