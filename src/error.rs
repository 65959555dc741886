//! Error types for each-valid.

use crate::rules::RuleImpl;
use crate::types::ValueKind;

/// Result type alias for each-valid operations.
pub type Result<T> = std::result::Result<T, EachError>;

/// Errors that can occur when building a validator or resolving rule
/// implementations.
///
/// None of these represent a failed validation of a collection element; an
/// invalid element is reported as a [`Violation`](crate::report::Violation).
/// Every variant here is a configuration defect and will fail identically on
/// retry.
#[derive(Debug, thiserror::Error)]
pub enum EachError {
    /// No registered rule implementation is assignable from the element's
    /// concrete kind. The declared rule bindings do not cover an
    /// actually-occurring element type.
    #[error("No rule implementation found for element kind: {kind}")]
    NoApplicableRule {
        /// Concrete kind of the element that could not be resolved.
        kind: ValueKind,
    },

    /// A constraint declares no rule implementations at all.
    #[error("No rule implementation registered for constraint: {constraint}")]
    NoRuleImplementations {
        /// Name of the constraint without implementations.
        constraint: &'static str,
    },

    /// A validator was built without any constraint.
    #[error("Rule set does not contain any constraint")]
    EmptyRuleSet,

    /// A composite rule set mixes constraints of different kinds.
    #[error("Rule sets are built from constraints of a single kind: expected '{expected}', found '{found}'")]
    MixedRuleKinds {
        /// Kind of the first declared constraint.
        expected: &'static str,
        /// The differing kind encountered later in the set.
        found: &'static str,
    },

    /// A rule implementation cannot be configured from the given constraint.
    #[error("Rule implementation {rule:?} cannot be configured from constraint '{constraint}'")]
    RuleMismatch {
        /// The implementation the factory was asked to instantiate.
        rule: RuleImpl,
        /// Name of the incompatible constraint.
        constraint: &'static str,
    },

    /// A `Pattern` constraint carries a malformed regular expression.
    #[cfg(feature = "pattern")]
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    /// A decimal bound could not be parsed.
    #[error("Invalid decimal bound: '{value}'")]
    InvalidDecimal {
        /// The unparseable bound as declared.
        value: String,
    },
}
