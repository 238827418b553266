//! Nested state type representing a category:subcategory pair

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::STATE_DELIMITER;

/// Error type for malformed state strings
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum NestedStateError {
    #[error("state must contain a ':' separating category and subcategory")]
    MissingDelimiter,

    #[error("subcategory must not contain ':' (states nest exactly two deep)")]
    NestedSubcategory,
}

/// A state that nests exactly two deep, e.g. `"manual:on"`
///
/// The category and subcategory are separated by a colon. The subcategory
/// must not itself contain the delimiter. Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct NestedState {
    category: String,
    subcategory: String,
}

impl NestedState {
    /// Create a NestedState from category and subcategory parts
    pub fn new(
        category: impl Into<String>,
        subcategory: impl Into<String>,
    ) -> Result<Self, NestedStateError> {
        let category = category.into();
        let subcategory = subcategory.into();

        if category.contains(STATE_DELIMITER) || subcategory.contains(STATE_DELIMITER) {
            return Err(NestedStateError::NestedSubcategory);
        }

        Ok(Self {
            category,
            subcategory,
        })
    }

    /// Get the category (outer) part of the state
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Get the subcategory (inner) part of the state
    pub fn subcategory(&self) -> &str {
        &self.subcategory
    }
}

impl FromStr for NestedState {
    type Err = NestedStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (category, subcategory) = s
            .split_once(STATE_DELIMITER)
            .ok_or(NestedStateError::MissingDelimiter)?;
        if subcategory.contains(STATE_DELIMITER) {
            return Err(NestedStateError::NestedSubcategory);
        }
        Ok(Self {
            category: category.to_string(),
            subcategory: subcategory.to_string(),
        })
    }
}

impl TryFrom<String> for NestedState {
    type Error = NestedStateError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<NestedState> for String {
    fn from(state: NestedState) -> String {
        state.to_string()
    }
}

impl fmt::Display for NestedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.category, STATE_DELIMITER, self.subcategory)
    }
}
