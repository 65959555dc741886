//! Rule executors: the per-type checker implementations behind the
//! constraint catalogue, and the capability trait for constructing them.

pub(crate) mod container;
pub(crate) mod numeric;
#[cfg(feature = "temporal")]
pub(crate) mod temporal;
pub(crate) mod text;

use crate::constraints::{Constraint, ConstraintDescriptor};
use crate::error::{EachError, Result};
use crate::types::Value;

/// Identifier of a concrete rule implementation.
///
/// A constraint binds one implementation per target type; the resolver
/// selects among them by an element's concrete kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RuleImpl {
    /// Not-null check applicable to every element kind.
    NotNullAny,
    /// Non-empty check on text elements.
    NotEmptyText,
    /// Non-empty check on sequence elements.
    NotEmptySeq,
    /// Non-empty check on map elements.
    NotEmptyMap,
    /// Non-blank check on text elements.
    NotBlankText,
    /// Character-count bounds on text elements.
    LengthText,
    /// Element-count bounds on sequence elements.
    LengthSeq,
    /// Entry-count bounds on map elements.
    LengthMap,
    /// Regex match on text elements.
    #[cfg(feature = "pattern")]
    PatternText,
    /// Email shape check on text elements.
    #[cfg(feature = "pattern")]
    EmailText,
    /// URL shape check on text elements.
    #[cfg(feature = "pattern")]
    UrlText,
    /// Lower bound on numeric elements.
    MinNumber,
    /// Upper bound on numeric elements.
    MaxNumber,
    /// Decimal lower bound on numeric elements.
    DecimalMinNumber,
    /// Decimal upper bound on numeric elements.
    DecimalMaxNumber,
    /// Inclusive range on numeric elements.
    RangeNumber,
    /// Digit-count bounds on numeric elements.
    DigitsNumber,
    /// Luhn checksum on text elements.
    LuhnText,
    /// Generic modulo-10 checksum on text elements.
    Mod10Text,
    /// Modulo-11 checksum on text elements.
    Mod11Text,
    /// Future-timestamp check on text elements.
    #[cfg(feature = "temporal")]
    FutureText,
    /// Past-timestamp check on text elements.
    #[cfg(feature = "temporal")]
    PastText,
}

/// An instantiated, ready-to-run rule implementation.
///
/// Executors are constructed by a [`RuleExecutorFactory`] and cached per
/// element kind; they must be cheap to build and safe to share across
/// threads. Every implementation accepts `Null` elements except the
/// not-null check, so that absence is reported only where absence is the
/// violation.
pub trait RuleExecutor: Send + Sync {
    /// Checks a single element.
    fn is_valid(&self, value: &Value) -> bool;
}

/// Capability interface for turning a rule implementation identifier and a
/// constraint configuration into a ready-to-run executor.
///
/// The built-in factory covers the whole catalogue. Alternative construction
/// strategies (instrumented executors, externally wired checkers) are
/// injected through
/// [`EachValidatorBuilder::factory`](crate::core::EachValidatorBuilder::factory)
/// rather than detected at runtime.
pub trait RuleExecutorFactory: Send + Sync {
    /// Instantiates `rule`, configured from `descriptor`'s constraint.
    ///
    /// # Errors
    ///
    /// Returns an error when the constraint's parameters are unusable (a
    /// malformed regular expression, an unparseable decimal bound) or when
    /// `rule` cannot be configured from the given constraint at all.
    fn instantiate(
        &self,
        rule: RuleImpl,
        descriptor: &ConstraintDescriptor,
    ) -> Result<Box<dyn RuleExecutor>>;
}

/// Default factory constructing the built-in executors.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuiltinRuleFactory;

impl RuleExecutorFactory for BuiltinRuleFactory {
    fn instantiate(
        &self,
        rule: RuleImpl,
        descriptor: &ConstraintDescriptor,
    ) -> Result<Box<dyn RuleExecutor>> {
        let executor: Box<dyn RuleExecutor> = match (rule, &descriptor.constraint) {
            (RuleImpl::NotNullAny, Constraint::NotNull) => Box::new(NotNullAny),
            (RuleImpl::NotEmptyText, Constraint::NotEmpty) => Box::new(text::NotEmptyText),
            (RuleImpl::NotEmptySeq, Constraint::NotEmpty) => Box::new(container::NotEmptySeq),
            (RuleImpl::NotEmptyMap, Constraint::NotEmpty) => Box::new(container::NotEmptyMap),
            (RuleImpl::NotBlankText, Constraint::NotBlank) => Box::new(text::NotBlankText),
            (RuleImpl::LengthText, Constraint::Length { min, max }) => {
                Box::new(text::TextLength {
                    min: *min,
                    max: *max,
                })
            }
            (RuleImpl::LengthSeq, Constraint::Length { min, max }) => {
                Box::new(container::SeqLength {
                    min: *min,
                    max: *max,
                })
            }
            (RuleImpl::LengthMap, Constraint::Length { min, max }) => {
                Box::new(container::MapLength {
                    min: *min,
                    max: *max,
                })
            }
            #[cfg(feature = "pattern")]
            (RuleImpl::PatternText, Constraint::Pattern { regex }) => {
                Box::new(text::TextPattern::compile(regex)?)
            }
            #[cfg(feature = "pattern")]
            (RuleImpl::EmailText, Constraint::Email) => Box::new(text::TextPattern::email()?),
            #[cfg(feature = "pattern")]
            (RuleImpl::UrlText, Constraint::Url) => Box::new(text::TextPattern::url()?),
            (RuleImpl::MinNumber, Constraint::Min { value }) => {
                Box::new(numeric::NumberMin { bound: *value })
            }
            (RuleImpl::MaxNumber, Constraint::Max { value }) => {
                Box::new(numeric::NumberMax { bound: *value })
            }
            (RuleImpl::DecimalMinNumber, Constraint::DecimalMin { value, inclusive }) => {
                Box::new(numeric::NumberDecimalBound::lower(value, *inclusive)?)
            }
            (RuleImpl::DecimalMaxNumber, Constraint::DecimalMax { value, inclusive }) => {
                Box::new(numeric::NumberDecimalBound::upper(value, *inclusive)?)
            }
            (RuleImpl::RangeNumber, Constraint::Range { min, max }) => {
                Box::new(numeric::NumberRange::from_bounds(*min, *max))
            }
            (RuleImpl::DigitsNumber, Constraint::Digits { integer, fraction }) => {
                Box::new(numeric::NumberDigits {
                    integer: *integer,
                    fraction: *fraction,
                })
            }
            (
                RuleImpl::LuhnText,
                Constraint::LuhnCheck {
                    ignore_non_digit_characters,
                },
            ) => Box::new(text::TextLuhn {
                ignore_non_digit_characters: *ignore_non_digit_characters,
            }),
            (
                RuleImpl::LuhnText,
                Constraint::CreditCardNumber {
                    ignore_non_digit_characters,
                },
            ) => Box::new(text::TextLuhn::from_credit_card(*ignore_non_digit_characters)),
            (
                RuleImpl::Mod10Text,
                Constraint::Mod10Check {
                    multiplier,
                    weight,
                    ignore_non_digit_characters,
                },
            ) => Box::new(text::TextMod10 {
                multiplier: *multiplier,
                weight: *weight,
                ignore_non_digit_characters: *ignore_non_digit_characters,
            }),
            (
                RuleImpl::Mod11Text,
                Constraint::Mod11Check {
                    threshold,
                    treat_check10_as,
                    treat_check11_as,
                    ignore_non_digit_characters,
                },
            ) => Box::new(text::TextMod11 {
                threshold: *threshold,
                treat_check10_as: *treat_check10_as,
                treat_check11_as: *treat_check11_as,
                ignore_non_digit_characters: *ignore_non_digit_characters,
            }),
            #[cfg(feature = "temporal")]
            (RuleImpl::FutureText, Constraint::Future) => Box::new(temporal::TextFuture),
            #[cfg(feature = "temporal")]
            (RuleImpl::PastText, Constraint::Past) => Box::new(temporal::TextPast),
            (rule, constraint) => {
                return Err(EachError::RuleMismatch {
                    rule,
                    constraint: constraint.name(),
                });
            }
        };
        Ok(executor)
    }
}

/// Rejects null elements, accepts everything else.
pub(crate) struct NotNullAny;

impl RuleExecutor for NotNullAny {
    fn is_valid(&self, value: &Value) -> bool {
        !value.is_null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn not_null_rejects_only_null() {
        assert!(!NotNullAny.is_valid(&json!(null)));
        assert!(NotNullAny.is_valid(&json!("")));
        assert!(NotNullAny.is_valid(&json!(0)));
        assert!(NotNullAny.is_valid(&json!(false)));
    }

    #[test]
    fn builtin_factory_rejects_mismatched_pairs() {
        let descriptor = ConstraintDescriptor::new(Constraint::NotNull);
        let result = BuiltinRuleFactory.instantiate(RuleImpl::MinNumber, &descriptor);
        assert!(matches!(result, Err(EachError::RuleMismatch { .. })));
    }

    #[test]
    fn builtin_factory_covers_the_catalogue() {
        let cases = [
            (RuleImpl::NotNullAny, Constraint::NotNull),
            (RuleImpl::NotEmptySeq, Constraint::NotEmpty),
            (RuleImpl::LengthText, Constraint::length(1, 3)),
            (RuleImpl::RangeNumber, Constraint::range(0, 10)),
            (
                RuleImpl::LuhnText,
                Constraint::CreditCardNumber {
                    ignore_non_digit_characters: true,
                },
            ),
        ];
        for (rule, constraint) in cases {
            let descriptor = ConstraintDescriptor::new(constraint);
            assert!(BuiltinRuleFactory.instantiate(rule, &descriptor).is_ok());
        }
    }
}
