//! Violation reports produced by element-wise validation.

use crate::types::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A single constraint violation found inside a validated collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Violation {
    /// Position of the invalid element inside the validated collection.
    pub index: usize,
    /// The interpolated error message.
    pub message: String,
    /// The element that violated the constraint.
    pub invalid_value: Value,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element [{}]: {}", self.index, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn display_includes_index_and_message() {
        let violation = Violation {
            index: 2,
            message: "size must be between 2 and 10".to_string(),
            invalid_value: json!("f"),
        };
        assert_eq!(
            violation.to_string(),
            "element [2]: size must be between 2 and 10"
        );
    }
}
