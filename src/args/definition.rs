//! Command-line argument definition.

use std::path::PathBuf;

use clap::Parser;

use cardshelf::state::{ImageFilter, Language, SortField};

/// cardshelf - Browse a collectible card catalog with filters, sorting and a local image store
#[derive(Parser, Debug)]
#[command(name = "cardshelf")]
#[command(version)]
#[command(about = "Browse a collectible card catalog with filters, sorting and a local image store", long_about = None)]
#[allow(clippy::struct_excessive_bools)]
pub struct Args {
    /// Catalog JSON file with `cards` and `editions`
    #[arg(short, long, default_value = "dominion.json")]
    pub data: PathBuf,

    /// Case-insensitive text search over English and German names
    #[arg(short, long)]
    pub search: Option<String>,

    /// Restrict to an edition, by ID or display name (repeatable)
    #[arg(short, long = "edition")]
    pub editions_selected: Vec<String>,

    /// Restrict to a card type (repeatable; any match is kept)
    #[arg(short = 't', long = "type")]
    pub types: Vec<String>,

    /// Image presence filter (all, with, without)
    #[arg(long, default_value = "all", value_parser = parse_image_filter)]
    pub images: ImageFilter,

    /// Sort field (name, price, type, edition)
    #[arg(long, default_value = "price", value_parser = parse_sort_field)]
    pub sort: SortField,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Display language (en, de); persisted to settings.conf
    #[arg(long, value_parser = parse_language)]
    pub lang: Option<Language>,

    /// Card size factor between 0.5 and 1.0; persisted to settings.conf
    #[arg(long)]
    pub card_size: Option<f64>,

    /// Import image files; the card ID is taken from each file name
    #[arg(long, num_args = 1..)]
    pub import_images: Vec<PathBuf>,

    /// Remove every stored image
    #[arg(long)]
    pub clear_images: bool,

    /// Print the number of stored images
    #[arg(long)]
    pub image_count: bool,

    /// List card types not yet selected with --type and exit
    #[arg(long)]
    pub categories: bool,

    /// Filter the type list by name (use with --categories)
    #[arg(long, default_value = "")]
    pub type_query: String,

    /// List editions that can still be selected and exit
    #[arg(long)]
    pub editions: bool,

    /// Filter the edition list by name or release date (use with --editions)
    #[arg(long, default_value = "")]
    pub edition_query: String,

    /// Print filter statistics after the list
    #[arg(long)]
    pub stats: bool,

    /// Set the logging level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Enable verbose output (equivalent to --log-level debug)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Whether only image-store maintenance was requested.
    #[must_use]
    pub fn maintenance_only(&self) -> bool {
        let maintenance =
            self.clear_images || self.image_count || !self.import_images.is_empty();
        let preferences = self.lang.is_some() || self.card_size.is_some();
        let listing = self.search.is_some()
            || !self.editions_selected.is_empty()
            || !self.types.is_empty()
            || self.categories
            || self.editions
            || self.stats;
        (maintenance || preferences) && !listing
    }
}

/// Parse `--images` through the shared config keys.
fn parse_image_filter(raw: &str) -> Result<ImageFilter, String> {
    ImageFilter::from_config_key(raw).ok_or_else(|| format!("unknown image filter '{raw}'"))
}

/// Parse `--sort` through the shared config keys.
fn parse_sort_field(raw: &str) -> Result<SortField, String> {
    SortField::from_config_key(raw).ok_or_else(|| format!("unknown sort field '{raw}'"))
}

/// Parse `--lang` through the shared config keys.
fn parse_language(raw: &str) -> Result<Language, String> {
    Language::from_config_key(raw).ok_or_else(|| format!("unsupported language '{raw}'"))
}
