//! Stop name catalog.

use std::collections::BTreeSet;
use std::path::Path;

use super::error::StopError;

/// Filter a catalog by case-insensitive substring.
///
/// Catalog order is preserved. A blank query returns the whole catalog
/// when `all_on_empty` is set (input focused, nothing typed yet) and
/// nothing otherwise (input cleared).
///
/// # Examples
///
/// ```
/// use transit_server::stops::suggest;
///
/// let catalog = ["Farmgate", "Uttara", "Mirpur"];
/// assert_eq!(suggest("far", &catalog, false), vec!["Farmgate"]);
/// assert_eq!(suggest("", &catalog, true), vec!["Farmgate", "Uttara", "Mirpur"]);
/// assert!(suggest("", &catalog, false).is_empty());
/// ```
pub fn suggest<'a, S: AsRef<str>>(
    query: &str,
    catalog: &'a [S],
    all_on_empty: bool,
) -> Vec<&'a str> {
    if query.trim().is_empty() {
        return if all_on_empty {
            catalog.iter().map(|s| s.as_ref()).collect()
        } else {
            Vec::new()
        };
    }

    let needle = query.to_lowercase();
    catalog
        .iter()
        .map(|s| s.as_ref())
        .filter(|stop| stop.to_lowercase().contains(&needle))
        .collect()
}

/// Resolve a submitted location to its catalog spelling.
///
/// Only an exact case-insensitive match is accepted.
pub fn canonicalize<'a, S: AsRef<str>>(
    input: &str,
    catalog: &'a [S],
) -> Result<&'a str, StopError> {
    let wanted = input.to_lowercase();
    catalog
        .iter()
        .map(|s| s.as_ref())
        .find(|stop| stop.to_lowercase() == wanted)
        .ok_or_else(|| StopError::UnknownStop(input.to_string()))
}

/// The closed set of stop names users may pick from.
#[derive(Debug, Clone, Default)]
pub struct StopCatalog {
    stops: Vec<String>,
}

impl StopCatalog {
    /// Create a catalog, keeping the given order.
    pub fn new(stops: Vec<String>) -> Self {
        Self { stops }
    }

    /// Build a sorted, deduplicated catalog from arbitrary names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unique: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        Self {
            stops: unique.into_iter().collect(),
        }
    }

    /// Load a catalog from a JSON array of names.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, StopError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| StopError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Parse a catalog from JSON text.
    pub fn from_json(json: &str) -> Result<Self, StopError> {
        let stops: Vec<String> = serde_json::from_str(json).map_err(|e| StopError::Json {
            message: e.to_string(),
        })?;
        Ok(Self::new(stops))
    }

    pub fn suggest(&self, query: &str, all_on_empty: bool) -> Vec<&str> {
        suggest(query, &self.stops, all_on_empty)
    }

    pub fn canonicalize(&self, input: &str) -> Result<&str, StopError> {
        canonicalize(input, &self.stops)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.canonicalize(name).is_ok()
    }

    pub fn stops(&self) -> &[String] {
        &self.stops
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
