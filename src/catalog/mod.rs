//! Phase Catalog: curated sentence phases and where they come from
//!
//! # Components
//! - `phases.rs`: Phase data model and catalog payload parsing
//! - `provider.rs`: Fetching phases from a JSON file or from memory
//! - `errors.rs`: Catalog fetch failures

pub mod errors;
pub mod phases;
pub mod provider;

pub use phases::Phase;
pub use provider::{JsonFileProvider, PhaseProvider};

#[cfg(test)]
pub use errors::CatalogError;
#[cfg(test)]
pub use provider::StaticProvider;
