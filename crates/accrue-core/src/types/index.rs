//! Floating-rate index identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifies a floating-rate index, e.g. `USD-LIBOR-3M` or `EUR-EURIBOR-6M`.
///
/// Index and calendar definitions live outside this library; the identifier
/// is the only handle the rate engine needs.
#[derive(Debug, Clone, Hash, Eq, PartialEq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndexId(String);

impl IndexId {
    /// Create a new index ID.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for IndexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for IndexId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for IndexId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}
