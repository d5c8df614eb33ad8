//! Library entry for cardshelf exposing the catalog pipeline, view state and
//! image store for the binary and integration tests.

pub mod i18n;
pub mod images;
pub mod index;
pub mod logic;
pub mod state;
pub mod theme;
