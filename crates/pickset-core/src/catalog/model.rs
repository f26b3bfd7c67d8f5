//! Catalog domain models.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::selection::InterestId;

/// A catalog category, e.g. `"sports"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Stable category key, also used inside interaction tokens
    pub key: String,
    #[serde(default)]
    pub display_order: i32,
}

impl Category {
    pub fn new(key: impl Into<String>, display_order: i32) -> Self {
        Self {
            key: key.into(),
            display_order,
        }
    }
}

/// A selectable interest belonging to exactly one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interest {
    pub id: InterestId,
    /// Localization key of the interest name
    pub key_name: String,
    pub category_key: String,
    #[serde(default)]
    pub display_order: i32,
}

impl Interest {
    pub fn new(
        id: InterestId,
        key_name: impl Into<String>,
        category_key: impl Into<String>,
        display_order: i32,
    ) -> Self {
        Self {
            id,
            key_name: key_name.into(),
            category_key: category_key.into(),
            display_order,
        }
    }
}

/// Interest lookup table keyed by id.
pub type InterestIndex = HashMap<InterestId, Interest>;
