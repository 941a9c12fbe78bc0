//! Strongly-typed ID wrappers for ledger entities
//!
//! The ledger owns its identifiers; they are opaque strings here. Newtype
//! wrappers keep category ids and group ids from being mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap an identifier issued by the ledger
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the raw identifier
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

define_id!(CategoryId);
define_id!(CategoryGroupId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display_is_raw() {
        let id = CategoryId::new("106963b3-ab82-4734-ad70-1d7dc2a52ff4");
        assert_eq!(id.to_string(), "106963b3-ab82-4734-ad70-1d7dc2a52ff4");
        assert_eq!(id.as_str(), "106963b3-ab82-4734-ad70-1d7dc2a52ff4");
    }

    #[test]
    fn test_id_serialization() {
        let id = CategoryGroupId::from("grp-1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"grp-1\"");
        let back: CategoryGroupId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
