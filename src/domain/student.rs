//! Student domain entity.

use serde::{Deserialize, Serialize};

/// Student domain entity
///
/// `id` is `None` until storage assigns one. Saving a student without an id
/// creates it; saving one with an id updates the stored record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub first_name: String,
    pub last_name: String,
}

impl Student {
    /// Create a student that has not been persisted yet
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: None,
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }

    /// Create a student carrying a storage-assigned id
    pub fn with_id(id: i64, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            ..Self::new(first_name, last_name)
        }
    }

    /// Check if storage has assigned an id
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// First and last name separated by a space
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
