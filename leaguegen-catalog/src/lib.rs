//! Base catalog data model and JSON I/O.
//!
//! This crate defines the read-only lookup tables (species, items,
//! abilities, moves) and per-release game metadata that league builds
//! resolve roster references against, without any knowledge of the
//! league or patch grammars.

pub mod json;
pub mod types;

pub use json::{load_catalogs, load_games, CatalogError};
pub use types::*;
