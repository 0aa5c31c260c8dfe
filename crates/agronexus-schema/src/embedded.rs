//! Embedded catalog data.
//!
//! The reference tables are compiled in with `include_str!()` so the default
//! registry never touches the filesystem.

/// Species table: code, display name, and husbandry reference values.
pub const SPECIES_CSV: &str = include_str!("../data/catalog/species.csv");

/// Breeds table, one row per (species, breed).
pub const BREEDS_CSV: &str = include_str!("../data/catalog/breeds.csv");

/// Categories table, one row per (species, category), in display order.
pub const CATEGORIES_CSV: &str = include_str!("../data/catalog/categories.csv");
