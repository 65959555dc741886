//! The value and type model behind type-directed rule resolution.
//!
//! Collection elements are dynamically-typed [`Value`]s. Each non-null value
//! has a concrete [`ValueKind`]; rule implementations are registered for a
//! [`TargetType`], which is either a concrete kind, the `Number` supertype of
//! `Int` and `Float`, or `Any`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Dynamically-typed element value validated by this crate.
pub type Value = serde_json::Value;

/// Concrete runtime kind of a collection element.
///
/// `Null` carries no kind; [`ValueKind::of`] returns `None` for it and the
/// resolver falls back to a representative rule implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    /// A boolean element.
    Bool,
    /// An integral numeric element.
    Int,
    /// A floating-point numeric element.
    Float,
    /// A string element.
    Text,
    /// An array element.
    Seq,
    /// An object element.
    Map,
}

impl ValueKind {
    /// Determines the concrete kind of a value, or `None` for `Null`.
    pub fn of(value: &Value) -> Option<ValueKind> {
        match value {
            Value::Null => None,
            Value::Bool(_) => Some(ValueKind::Bool),
            Value::Number(n) if n.is_f64() => Some(ValueKind::Float),
            Value::Number(_) => Some(ValueKind::Int),
            Value::String(_) => Some(ValueKind::Text),
            Value::Array(_) => Some(ValueKind::Seq),
            Value::Object(_) => Some(ValueKind::Map),
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Text => "text",
            ValueKind::Seq => "seq",
            ValueKind::Map => "map",
        };
        f.write_str(name)
    }
}

/// Declared type a rule implementation is registered to handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetType {
    /// Handles boolean elements only.
    Bool,
    /// Handles integral elements only.
    Int,
    /// Handles floating-point elements only.
    Float,
    /// Handles both integral and floating-point elements.
    Number,
    /// Handles string elements only.
    Text,
    /// Handles array elements only.
    Seq,
    /// Handles object elements only.
    Map,
    /// Handles elements of every kind.
    Any,
}

impl TargetType {
    /// Whether an element of the given concrete kind can be handled by a
    /// rule implementation registered for this target type.
    pub fn is_assignable_from(self, kind: ValueKind) -> bool {
        match self {
            TargetType::Any => true,
            TargetType::Number => matches!(kind, ValueKind::Int | ValueKind::Float),
            TargetType::Bool => kind == ValueKind::Bool,
            TargetType::Int => kind == ValueKind::Int,
            TargetType::Float => kind == ValueKind::Float,
            TargetType::Text => kind == ValueKind::Text,
            TargetType::Seq => kind == ValueKind::Seq,
            TargetType::Map => kind == ValueKind::Map,
        }
    }

    /// A representative concrete kind for this target, used when a rule must
    /// be resolved without a value to inspect.
    pub(crate) fn exemplar(self) -> ValueKind {
        match self {
            TargetType::Bool => ValueKind::Bool,
            TargetType::Int | TargetType::Number => ValueKind::Int,
            TargetType::Float => ValueKind::Float,
            TargetType::Text | TargetType::Any => ValueKind::Text,
            TargetType::Seq => ValueKind::Seq,
            TargetType::Map => ValueKind::Map,
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TargetType::Bool => "bool",
            TargetType::Int => "int",
            TargetType::Float => "float",
            TargetType::Number => "number",
            TargetType::Text => "text",
            TargetType::Seq => "seq",
            TargetType::Map => "map",
            TargetType::Any => "any",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_of_values() {
        assert_eq!(ValueKind::of(&json!(null)), None);
        assert_eq!(ValueKind::of(&json!(true)), Some(ValueKind::Bool));
        assert_eq!(ValueKind::of(&json!(42)), Some(ValueKind::Int));
        assert_eq!(ValueKind::of(&json!(-7)), Some(ValueKind::Int));
        assert_eq!(ValueKind::of(&json!(3.5)), Some(ValueKind::Float));
        assert_eq!(ValueKind::of(&json!("s")), Some(ValueKind::Text));
        assert_eq!(ValueKind::of(&json!([1, 2])), Some(ValueKind::Seq));
        assert_eq!(ValueKind::of(&json!({"a": 1})), Some(ValueKind::Map));
    }

    #[test]
    fn exact_targets_accept_only_their_kind() {
        assert!(TargetType::Text.is_assignable_from(ValueKind::Text));
        assert!(!TargetType::Text.is_assignable_from(ValueKind::Int));
        assert!(TargetType::Seq.is_assignable_from(ValueKind::Seq));
        assert!(!TargetType::Seq.is_assignable_from(ValueKind::Map));
    }

    #[test]
    fn number_accepts_int_and_float() {
        assert!(TargetType::Number.is_assignable_from(ValueKind::Int));
        assert!(TargetType::Number.is_assignable_from(ValueKind::Float));
        assert!(!TargetType::Number.is_assignable_from(ValueKind::Text));
    }

    #[test]
    fn any_accepts_every_kind() {
        for kind in [
            ValueKind::Bool,
            ValueKind::Int,
            ValueKind::Float,
            ValueKind::Text,
            ValueKind::Seq,
            ValueKind::Map,
        ] {
            assert!(TargetType::Any.is_assignable_from(kind));
        }
    }

    #[test]
    fn exemplar_is_assignable_to_its_target() {
        for target in [
            TargetType::Bool,
            TargetType::Int,
            TargetType::Float,
            TargetType::Number,
            TargetType::Text,
            TargetType::Seq,
            TargetType::Map,
            TargetType::Any,
        ] {
            assert!(target.is_assignable_from(target.exemplar()));
        }
    }
}
