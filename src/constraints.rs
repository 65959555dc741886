//! The constraint catalogue.
//!
//! A [`Constraint`] is the structured configuration of a single-element
//! validation rule, applied to every element of a collection by
//! [`EachValidator`](crate::core::EachValidator). Each constraint declares an
//! ordered list of bindings from a [`TargetType`] to the rule implementation
//! handling it, plus a default message template. All configuration is plain
//! data: composed constraints map their attributes onto another
//! implementation's parameters through explicit conversions, never through
//! runtime introspection.

use crate::rules::RuleImpl;
use crate::types::{TargetType, Value};
use serde::{Deserialize, Serialize};
use serde_json::Map;

/// A single element-level constraint configuration.
///
/// Constraints are serde-friendly, so rule sets can be embedded in
/// configuration files or wire payloads:
///
/// ```rust
/// use each_valid::constraints::Constraint;
///
/// let constraint: Constraint =
///     serde_json::from_str(r#"{ "rule": "length", "min": 1, "max": 10 }"#).unwrap();
/// assert_eq!(constraint, Constraint::length(1, 10));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "kebab-case")]
pub enum Constraint {
    /// Element must not be null.
    NotNull,

    /// Text, sequence or map element must not be empty.
    NotEmpty,

    /// Text element must contain at least one non-whitespace character.
    NotBlank,

    /// Size of a text (in characters), sequence or map element.
    Length {
        /// Inclusive lower size bound.
        #[serde(default)]
        min: u64,
        /// Inclusive upper size bound.
        #[serde(default = "default_length_max")]
        max: u64,
    },

    /// Text element must match the given regular expression.
    #[cfg(feature = "pattern")]
    Pattern {
        /// The regular expression the whole element must match.
        regex: String,
    },

    /// Text element must be a well-formed email address.
    #[cfg(feature = "pattern")]
    Email,

    /// Text element must be a well-formed absolute URL.
    #[cfg(feature = "pattern")]
    Url,

    /// Numeric element must be greater than or equal to the bound.
    Min {
        /// Inclusive lower bound.
        value: i64,
    },

    /// Numeric element must be less than or equal to the bound.
    Max {
        /// Inclusive upper bound.
        value: i64,
    },

    /// Numeric element must be above the decimal bound.
    DecimalMin {
        /// Decimal representation of the lower bound.
        value: String,
        /// Whether the bound itself is allowed.
        #[serde(default = "default_true")]
        inclusive: bool,
    },

    /// Numeric element must be below the decimal bound.
    DecimalMax {
        /// Decimal representation of the upper bound.
        value: String,
        /// Whether the bound itself is allowed.
        #[serde(default = "default_true")]
        inclusive: bool,
    },

    /// Numeric element must lie within the inclusive range.
    Range {
        /// Inclusive lower bound.
        #[serde(default)]
        min: i64,
        /// Inclusive upper bound.
        #[serde(default = "default_range_max")]
        max: i64,
    },

    /// Numeric element must stay within the given digit counts.
    Digits {
        /// Maximum number of integral digits.
        integer: u32,
        /// Maximum number of fractional digits.
        fraction: u32,
    },

    /// Text element must pass the Luhn checksum.
    LuhnCheck {
        /// Strip non-digit characters before checking instead of rejecting.
        #[serde(default)]
        ignore_non_digit_characters: bool,
    },

    /// Text element must pass a generic modulo-10 checksum.
    Mod10Check {
        /// Multiplier applied to digits at odd positions (from the right).
        #[serde(default = "default_mod10_multiplier")]
        multiplier: u32,
        /// Weight applied to digits at even positions (from the right).
        #[serde(default = "default_mod10_weight")]
        weight: u32,
        /// Strip non-digit characters before checking instead of rejecting.
        #[serde(default = "default_true")]
        ignore_non_digit_characters: bool,
    },

    /// Text element must pass a modulo-11 checksum.
    Mod11Check {
        /// Weights grow from 2 up to this threshold, then wrap around.
        #[serde(default = "default_mod11_threshold")]
        threshold: u32,
        /// Character standing for a computed check digit of 10.
        #[serde(default = "default_check10")]
        treat_check10_as: char,
        /// Character standing for a computed check digit of 11.
        #[serde(default = "default_check11")]
        treat_check11_as: char,
        /// Strip non-digit characters before checking instead of rejecting.
        #[serde(default)]
        ignore_non_digit_characters: bool,
    },

    /// Text element must be a plausible credit card number.
    ///
    /// Composed onto the Luhn implementation; see
    /// [`TextLuhn::from_credit_card`](crate::rules) for the explicit
    /// attribute mapping.
    CreditCardNumber {
        /// Strip non-digit characters before checking instead of rejecting.
        #[serde(default)]
        ignore_non_digit_characters: bool,
    },

    /// Text element must be an RFC 3339 timestamp in the future.
    #[cfg(feature = "temporal")]
    Future,

    /// Text element must be an RFC 3339 timestamp in the past.
    #[cfg(feature = "temporal")]
    Past,
}

fn default_length_max() -> u64 {
    u64::MAX
}

fn default_range_max() -> i64 {
    i64::MAX
}

fn default_true() -> bool {
    true
}

fn default_mod10_multiplier() -> u32 {
    3
}

fn default_mod10_weight() -> u32 {
    1
}

fn default_mod11_threshold() -> u32 {
    u32::MAX
}

fn default_check10() -> char {
    'X'
}

fn default_check11() -> char {
    '0'
}

impl Constraint {
    /// A length constraint with inclusive bounds.
    pub fn length(min: u64, max: u64) -> Self {
        Constraint::Length { min, max }
    }

    /// A numeric range constraint with inclusive bounds.
    pub fn range(min: i64, max: i64) -> Self {
        Constraint::Range { min, max }
    }

    /// A pattern constraint matching the whole element against `regex`.
    #[cfg(feature = "pattern")]
    pub fn pattern(regex: impl Into<String>) -> Self {
        Constraint::Pattern {
            regex: regex.into(),
        }
    }

    /// Stable name of this constraint kind, as used in serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            Constraint::NotNull => "not-null",
            Constraint::NotEmpty => "not-empty",
            Constraint::NotBlank => "not-blank",
            Constraint::Length { .. } => "length",
            #[cfg(feature = "pattern")]
            Constraint::Pattern { .. } => "pattern",
            #[cfg(feature = "pattern")]
            Constraint::Email => "email",
            #[cfg(feature = "pattern")]
            Constraint::Url => "url",
            Constraint::Min { .. } => "min",
            Constraint::Max { .. } => "max",
            Constraint::DecimalMin { .. } => "decimal-min",
            Constraint::DecimalMax { .. } => "decimal-max",
            Constraint::Range { .. } => "range",
            Constraint::Digits { .. } => "digits",
            Constraint::LuhnCheck { .. } => "luhn-check",
            Constraint::Mod10Check { .. } => "mod10-check",
            Constraint::Mod11Check { .. } => "mod11-check",
            Constraint::CreditCardNumber { .. } => "credit-card-number",
            #[cfg(feature = "temporal")]
            Constraint::Future => "future",
            #[cfg(feature = "temporal")]
            Constraint::Past => "past",
        }
    }

    /// Ordered bindings from target type to the rule implementation that
    /// handles it. The order is significant: the resolver picks the first
    /// entry assignable from an element's concrete kind.
    pub(crate) fn bindings(&self) -> Vec<(TargetType, RuleImpl)> {
        match self {
            Constraint::NotNull => vec![(TargetType::Any, RuleImpl::NotNullAny)],
            Constraint::NotEmpty => vec![
                (TargetType::Text, RuleImpl::NotEmptyText),
                (TargetType::Seq, RuleImpl::NotEmptySeq),
                (TargetType::Map, RuleImpl::NotEmptyMap),
            ],
            Constraint::NotBlank => vec![(TargetType::Text, RuleImpl::NotBlankText)],
            Constraint::Length { .. } => vec![
                (TargetType::Text, RuleImpl::LengthText),
                (TargetType::Seq, RuleImpl::LengthSeq),
                (TargetType::Map, RuleImpl::LengthMap),
            ],
            #[cfg(feature = "pattern")]
            Constraint::Pattern { .. } => vec![(TargetType::Text, RuleImpl::PatternText)],
            #[cfg(feature = "pattern")]
            Constraint::Email => vec![(TargetType::Text, RuleImpl::EmailText)],
            #[cfg(feature = "pattern")]
            Constraint::Url => vec![(TargetType::Text, RuleImpl::UrlText)],
            Constraint::Min { .. } => vec![(TargetType::Number, RuleImpl::MinNumber)],
            Constraint::Max { .. } => vec![(TargetType::Number, RuleImpl::MaxNumber)],
            Constraint::DecimalMin { .. } => {
                vec![(TargetType::Number, RuleImpl::DecimalMinNumber)]
            }
            Constraint::DecimalMax { .. } => {
                vec![(TargetType::Number, RuleImpl::DecimalMaxNumber)]
            }
            Constraint::Range { .. } => vec![(TargetType::Number, RuleImpl::RangeNumber)],
            Constraint::Digits { .. } => vec![(TargetType::Number, RuleImpl::DigitsNumber)],
            Constraint::LuhnCheck { .. } => vec![(TargetType::Text, RuleImpl::LuhnText)],
            Constraint::Mod10Check { .. } => vec![(TargetType::Text, RuleImpl::Mod10Text)],
            Constraint::Mod11Check { .. } => vec![(TargetType::Text, RuleImpl::Mod11Text)],
            Constraint::CreditCardNumber { .. } => vec![(TargetType::Text, RuleImpl::LuhnText)],
            #[cfg(feature = "temporal")]
            Constraint::Future => vec![(TargetType::Text, RuleImpl::FutureText)],
            #[cfg(feature = "temporal")]
            Constraint::Past => vec![(TargetType::Text, RuleImpl::PastText)],
        }
    }

    /// Default message template used when the descriptor carries no
    /// override.
    pub fn default_message(&self) -> &'static str {
        match self {
            Constraint::NotNull => "must not be null",
            Constraint::NotEmpty => "must not be empty",
            Constraint::NotBlank => "must not be blank",
            Constraint::Length { .. } => "size must be between {min} and {max}",
            #[cfg(feature = "pattern")]
            Constraint::Pattern { .. } => "must match '{regex}'",
            #[cfg(feature = "pattern")]
            Constraint::Email => "must be a well-formed email address",
            #[cfg(feature = "pattern")]
            Constraint::Url => "must be a valid URL",
            Constraint::Min { .. } => "must be greater than or equal to {value}",
            Constraint::Max { .. } => "must be less than or equal to {value}",
            Constraint::DecimalMin { .. } => "must be greater than or equal to {value}",
            Constraint::DecimalMax { .. } => "must be less than or equal to {value}",
            Constraint::Range { .. } => "must be between {min} and {max}",
            Constraint::Digits { .. } => {
                "numeric value out of bounds (<{integer} digits>.<{fraction} digits> expected)"
            }
            Constraint::LuhnCheck { .. } => "invalid check digit",
            Constraint::Mod10Check { .. } => "invalid check digit",
            Constraint::Mod11Check { .. } => "invalid check digit",
            Constraint::CreditCardNumber { .. } => "invalid credit card number",
            #[cfg(feature = "temporal")]
            Constraint::Future => "must be a future date",
            #[cfg(feature = "temporal")]
            Constraint::Past => "must be a past date",
        }
    }

    /// Attribute map exposed to message interpolation: the constraint's
    /// parameters in serialized form.
    pub(crate) fn attributes(&self) -> Map<String, Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => map,
            _ => Map::new(),
        }
    }
}

/// A constraint plus the message override attached to its declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstraintDescriptor {
    /// The element-level constraint to apply.
    #[serde(flatten)]
    pub constraint: Constraint,
    /// Message template override. When absent or empty, the constraint's
    /// default template is kept.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ConstraintDescriptor {
    /// A descriptor keeping the constraint's default message.
    pub fn new(constraint: Constraint) -> Self {
        Self {
            constraint,
            message: None,
        }
    }

    /// A descriptor with a message template override.
    pub fn with_message(constraint: Constraint, message: impl Into<String>) -> Self {
        Self {
            constraint,
            message: Some(message.into()),
        }
    }

    /// The message template in effect for this descriptor.
    pub fn message_template(&self) -> &str {
        match &self.message {
            Some(message) if !message.is_empty() => message,
            _ => self.constraint.default_message(),
        }
    }
}

impl From<Constraint> for ConstraintDescriptor {
    fn from(constraint: Constraint) -> Self {
        Self::new(constraint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn attributes_expose_parameters() {
        let attributes = Constraint::length(2, 10).attributes();
        assert_eq!(attributes.get("min"), Some(&json!(2)));
        assert_eq!(attributes.get("max"), Some(&json!(10)));
    }

    #[test]
    fn message_override_replaces_default() {
        let descriptor =
            ConstraintDescriptor::with_message(Constraint::length(2, 10), "between {min} and {max}");
        assert_eq!(descriptor.message_template(), "between {min} and {max}");
    }

    #[test]
    fn empty_override_keeps_default() {
        let descriptor = ConstraintDescriptor::with_message(Constraint::length(2, 10), "");
        assert_eq!(descriptor.message_template(), "size must be between {min} and {max}");
    }

    #[test]
    fn bindings_preserve_declaration_order() {
        let bindings = Constraint::length(0, 1).bindings();
        let targets: Vec<_> = bindings.iter().map(|(target, _)| *target).collect();
        assert_eq!(
            targets,
            vec![crate::types::TargetType::Text, crate::types::TargetType::Seq, crate::types::TargetType::Map]
        );
    }

    #[test]
    fn deserializes_with_defaults() {
        let descriptor: ConstraintDescriptor =
            serde_json::from_str(r#"{ "rule": "length", "min": 2 }"#).unwrap();
        assert_eq!(
            descriptor.constraint,
            Constraint::Length { min: 2, max: u64::MAX }
        );
        assert_eq!(descriptor.message, None);
    }

    #[test]
    fn deserializes_message_override() {
        let descriptor: ConstraintDescriptor = serde_json::from_str(
            r#"{ "rule": "range", "min": 0, "max": 10, "message": "out of range" }"#,
        )
        .unwrap();
        assert_eq!(descriptor.constraint, Constraint::range(0, 10));
        assert_eq!(descriptor.message.as_deref(), Some("out of range"));
    }
}
