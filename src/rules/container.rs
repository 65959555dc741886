//! Rule implementations registered for sequence and map elements.

use crate::rules::RuleExecutor;
use crate::types::Value;

/// Rejects empty sequences.
pub(crate) struct NotEmptySeq;

impl RuleExecutor for NotEmptySeq {
    fn is_valid(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::Array(items) => !items.is_empty(),
            _ => false,
        }
    }
}

/// Rejects empty maps.
pub(crate) struct NotEmptyMap;

impl RuleExecutor for NotEmptyMap {
    fn is_valid(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::Object(entries) => !entries.is_empty(),
            _ => false,
        }
    }
}

/// Inclusive element-count bounds on sequences.
pub(crate) struct SeqLength {
    pub(crate) min: u64,
    pub(crate) max: u64,
}

impl RuleExecutor for SeqLength {
    fn is_valid(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::Array(items) => {
                let len = items.len() as u64;
                len >= self.min && len <= self.max
            }
            _ => false,
        }
    }
}

/// Inclusive entry-count bounds on maps.
pub(crate) struct MapLength {
    pub(crate) min: u64,
    pub(crate) max: u64,
}

impl RuleExecutor for MapLength {
    fn is_valid(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::Object(entries) => {
                let len = entries.len() as u64;
                len >= self.min && len <= self.max
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn seq_length_counts_elements() {
        let rule = SeqLength { min: 1, max: 2 };
        assert!(!rule.is_valid(&json!([])));
        assert!(rule.is_valid(&json!([1])));
        assert!(rule.is_valid(&json!([1, 2])));
        assert!(!rule.is_valid(&json!([1, 2, 3])));
    }

    #[test]
    fn map_length_counts_entries() {
        let rule = MapLength { min: 1, max: 1 };
        assert!(!rule.is_valid(&json!({})));
        assert!(rule.is_valid(&json!({"a": 1})));
        assert!(!rule.is_valid(&json!({"a": 1, "b": 2})));
    }

    #[test]
    fn not_empty_accepts_null() {
        assert!(NotEmptySeq.is_valid(&json!(null)));
        assert!(NotEmptyMap.is_valid(&json!(null)));
        assert!(!NotEmptySeq.is_valid(&json!([])));
        assert!(!NotEmptyMap.is_valid(&json!({})));
    }
}
