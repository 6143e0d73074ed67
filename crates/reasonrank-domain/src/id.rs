//! Node identifiers

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of a node in an argument tree
///
/// Ids are supplied by the collaborator that owns persistence, so any string
/// is accepted. [`NodeId::generate`] mints a fresh UUIDv7 id for nodes created
/// locally; UUIDv7 strings sort chronologically.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Wrap an existing identifier
    ///
    /// # Examples
    ///
    /// ```
    /// use reasonrank_domain::NodeId;
    ///
    /// let id = NodeId::new("arg-1");
    /// assert_eq!(id.as_str(), "arg-1");
    /// ```
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Generate a new UUIDv7-based identifier
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    /// Borrow the raw identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: ordering matches the ordering of the wrapped strings
        #[test]
        fn test_ordering_matches_strings(a in "[a-z0-9-]{0,12}", b in "[a-z0-9-]{0,12}") {
            let id_a = NodeId::new(a.clone());
            let id_b = NodeId::new(b.clone());

            prop_assert_eq!(id_a < id_b, a < b);
            prop_assert_eq!(id_a == id_b, a == b);
        }
    }
}
