//! Rule implementations registered for numeric elements.

use crate::error::{EachError, Result};
use crate::rules::RuleExecutor;
use crate::types::Value;
use std::cmp::Ordering;

/// Compares a numeric element against an integral bound, staying in the
/// integer domain whenever the element is integral.
fn compare_bound(value: &Value, bound: i64) -> Option<Ordering> {
    if let Some(i) = value.as_i64() {
        Some(i.cmp(&bound))
    } else if let Some(u) = value.as_u64() {
        // only reached for values above i64::MAX
        if bound < 0 {
            Some(Ordering::Greater)
        } else {
            Some(u.cmp(&(bound as u64)))
        }
    } else {
        value.as_f64().and_then(|f| f.partial_cmp(&(bound as f64)))
    }
}

/// Inclusive lower bound.
pub(crate) struct NumberMin {
    pub(crate) bound: i64,
}

impl RuleExecutor for NumberMin {
    fn is_valid(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::Number(_) => {
                compare_bound(value, self.bound).is_some_and(|o| o != Ordering::Less)
            }
            _ => false,
        }
    }
}

/// Inclusive upper bound.
pub(crate) struct NumberMax {
    pub(crate) bound: i64,
}

impl RuleExecutor for NumberMax {
    fn is_valid(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::Number(_) => {
                compare_bound(value, self.bound).is_some_and(|o| o != Ordering::Greater)
            }
            _ => false,
        }
    }
}

/// Range is the explicit composition of the min and max checks; the bounds
/// are copied field by field from the range configuration.
pub(crate) struct NumberRange {
    min: NumberMin,
    max: NumberMax,
}

impl NumberRange {
    pub(crate) fn from_bounds(min: i64, max: i64) -> Self {
        Self {
            min: NumberMin { bound: min },
            max: NumberMax { bound: max },
        }
    }
}

impl RuleExecutor for NumberRange {
    fn is_valid(&self, value: &Value) -> bool {
        self.min.is_valid(value) && self.max.is_valid(value)
    }
}

/// Decimal bound, declared as a string and parsed at instantiation.
pub(crate) struct NumberDecimalBound {
    bound: f64,
    inclusive: bool,
    lower: bool,
}

impl NumberDecimalBound {
    pub(crate) fn lower(value: &str, inclusive: bool) -> Result<Self> {
        Ok(Self {
            bound: parse_decimal(value)?,
            inclusive,
            lower: true,
        })
    }

    pub(crate) fn upper(value: &str, inclusive: bool) -> Result<Self> {
        Ok(Self {
            bound: parse_decimal(value)?,
            inclusive,
            lower: false,
        })
    }
}

fn parse_decimal(value: &str) -> Result<f64> {
    value
        .trim()
        .parse()
        .map_err(|_| EachError::InvalidDecimal {
            value: value.to_string(),
        })
}

impl RuleExecutor for NumberDecimalBound {
    fn is_valid(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::Number(n) => {
                let Some(f) = n.as_f64() else { return false };
                match (self.lower, self.inclusive) {
                    (true, true) => f >= self.bound,
                    (true, false) => f > self.bound,
                    (false, true) => f <= self.bound,
                    (false, false) => f < self.bound,
                }
            }
            _ => false,
        }
    }
}

/// Bounds on the number of integral and fractional digits.
pub(crate) struct NumberDigits {
    pub(crate) integer: u32,
    pub(crate) fraction: u32,
}

impl RuleExecutor for NumberDigits {
    fn is_valid(&self, value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::Number(n) => {
                let rendered = n.to_string();
                // extreme magnitudes render in exponent form and exceed any
                // practical digit bound
                if rendered.contains(['e', 'E']) {
                    return false;
                }
                let unsigned = rendered.trim_start_matches('-');
                let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
                int_part.len() as u32 <= self.integer && frac_part.len() as u32 <= self.fraction
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
    fn min_and_max_bounds_are_inclusive() {
        let min = NumberMin { bound: 0 };
        let max = NumberMax { bound: 10 };
        assert!(min.is_valid(&json!(0)));
        assert!(!min.is_valid(&json!(-1)));
        assert!(max.is_valid(&json!(10)));
        assert!(!max.is_valid(&json!(11)));
    }

    #[test]
    fn bounds_apply_to_floats() {
        let min = NumberMin { bound: 0 };
        assert!(min.is_valid(&json!(0.5)));
        assert!(!min.is_valid(&json!(-0.5)));
    }

    #[test]
    fn u64_values_above_i64_max() {
        let min = NumberMin { bound: -1 };
        let max = NumberMax { bound: 100 };
        assert!(min.is_valid(&json!(u64::MAX)));
        assert!(!max.is_valid(&json!(u64::MAX)));
    }

    #[test]
    fn range_combines_both_bounds() {
        let rule = NumberRange::from_bounds(0, 10);
        assert!(rule.is_valid(&json!(0)));
        assert!(rule.is_valid(&json!(10)));
        assert!(rule.is_valid(&json!(5.5)));
        assert!(!rule.is_valid(&json!(-1)));
        assert!(!rule.is_valid(&json!(10.5)));
    }

    #[test]
    fn decimal_bounds_honor_inclusivity() {
        let inclusive = NumberDecimalBound::lower("0.5", true).unwrap();
        let exclusive = NumberDecimalBound::lower("0.5", false).unwrap();
        assert!(inclusive.is_valid(&json!(0.5)));
        assert!(!exclusive.is_valid(&json!(0.5)));
        assert!(exclusive.is_valid(&json!(0.6)));
    }

    #[test]
    fn unparseable_decimal_is_reported() {
        assert!(matches!(
            NumberDecimalBound::lower("zero", true),
            Err(EachError::InvalidDecimal { .. })
        ));
    }

    #[test]
    fn digits_count_integral_and_fractional_parts() {
        let rule = NumberDigits {
            integer: 2,
            fraction: 2,
        };
        assert!(rule.is_valid(&json!(12.34)));
        assert!(rule.is_valid(&json!(7)));
        assert!(rule.is_valid(&json!(-12.3)));
        assert!(!rule.is_valid(&json!(123.4)));
        assert!(!rule.is_valid(&json!(12.345)));
    }
}
