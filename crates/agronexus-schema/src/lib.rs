//! Livestock reference catalogs.
//!
//! This crate is the single source of truth for which species, breeds, and
//! categories an animal record may carry:
//!
//! - **Species**: top-level taxonomy (bovino, caprino, ovino, equino, suino)
//! - **Breeds**: species-scoped lineages (Nelore, Boer, Dorper, ...)
//! - **Categories**: species-scoped life stages, matched by code or display name
//!
//! The default tables are embedded at compile time. A directory holding the same
//! three CSV files can replace them at runtime.
//!
//! # Example
//!
//! ```ignore
//! use agronexus_schema::{Catalog, SchemaRegistry};
//!
//! let registry = SchemaRegistry::embedded()?;
//! assert!(registry.is_valid_breed("bovino", "Nelore"));
//! assert!(registry.is_valid_category("bovino", "Novilha"));
//! assert!(registry.is_valid_category("bovino", "novilha"));
//! ```

pub mod embedded;
mod error;
mod loader;
mod registry;
mod traits;
mod types;

pub use error::{Result, SchemaError};
pub use loader::{load_breeds, load_categories, load_species};
pub use registry::{BREEDS_FILE, CATEGORIES_FILE, SPECIES_FILE, SchemaRegistry};
pub use traits::Catalog;
pub use types::{BreedDefinition, CategoryDefinition, SpeciesDefinition, matches_ignore_case};
