//! Stop catalog and autocomplete matching.
//!
//! The catalog is a closed list of stop names, loaded once from a static
//! JSON resource (or derived from the transit graph). It backs both the
//! search-as-you-type suggestions and the validation that turns whatever
//! casing the user typed into the catalog's own spelling.

mod catalog;
mod error;

pub use catalog::{StopCatalog, canonicalize, suggest};
pub use error::StopError;
