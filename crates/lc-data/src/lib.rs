//! Data-file loading and calendar persistence for Lanterncrawl.
//!
//! A content directory holds a `manifest.json` naming the individual JSON
//! files (zones, encounters, weathers, rest checks, the two weight grids,
//! and an optional calendar). [`load_dir`] reads them all and assembles the
//! [`Compendium`](lc_core::Compendium); [`JsonCalendarStore`] writes the
//! calendar's mutable fields back to its file.
//!
//! Load-time problems are fatal [`DataError`]s. Cross-reference issues
//! between the grids and the definition tables are collected as warnings
//! and logged; startup proceeds.

/// Fatal load-time errors.
pub mod error;
/// The content directory loader.
pub mod loader;
/// The file-backed calendar store.
pub mod store;

pub use error::{DataError, DataResult};
pub use loader::{DataSet, load_calendar, load_dir};
pub use store::JsonCalendarStore;
