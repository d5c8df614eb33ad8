//! Session state: core data types and the view-state controller.

pub mod types;
pub mod view_state;

pub use types::{
    AnnotatedItem, Catalog, FilterState, Group, ImageFilter, Item, Language, SortDirection,
    SortField,
};
pub use view_state::{ViewState, VisibleList};
