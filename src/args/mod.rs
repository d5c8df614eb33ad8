//! Command-line argument parsing and handling.

pub mod catalog;
pub mod definition;
pub mod images;
pub mod utils;

pub use definition::Args;
pub use utils::determine_log_level;
