//! Rule implementations for timestamp-carrying text elements.

use crate::rules::RuleExecutor;
use crate::types::Value;
use chrono::{DateTime, Utc};

fn parse(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

/// Accepts RFC 3339 timestamps strictly after the current instant.
pub(crate) struct TextFuture;

impl RuleExecutor for TextFuture {
    fn is_valid(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => parse(s).is_some_and(|t| t > Utc::now()),
            _ => false,
        }
    }
}

/// Accepts RFC 3339 timestamps strictly before the current instant.
pub(crate) struct TextPast;

impl RuleExecutor for TextPast {
    fn is_valid(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => parse(s).is_some_and(|t| t < Utc::now()),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn future_accepts_only_later_timestamps() {
        assert!(TextFuture.is_valid(&json!("2990-01-01T00:00:00Z")));
        assert!(!TextFuture.is_valid(&json!("1990-01-01T00:00:00Z")));
        assert!(!TextFuture.is_valid(&json!("not a timestamp")));
    }

    #[test]
    fn past_accepts_only_earlier_timestamps() {
        assert!(TextPast.is_valid(&json!("1990-01-01T00:00:00+02:00")));
        assert!(!TextPast.is_valid(&json!("2990-01-01T00:00:00Z")));
    }
}
