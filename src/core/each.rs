//! The element-wise validator.
//!
//! [`EachValidator`] applies a single-element constraint (or a composite set
//! of same-kind constraints) to every element of a collection, resolving a
//! type-appropriate executor per element and reporting indexed, interpolated
//! violations.

use crate::constraints::ConstraintDescriptor;
use crate::core::resolver::{DEFAULT_CACHE_CAPACITY, RuleBinding, RuleResolver};
use crate::error::{EachError, Result};
use crate::message;
use crate::report::Violation;
use crate::rules::{BuiltinRuleFactory, RuleExecutorFactory};
use crate::types::{Value, ValueKind};
use arc_swap::ArcSwap;
use std::sync::Arc;

/// Initialized state: rebuilt as a whole whenever the validator is
/// re-initialized, so the resolution cache never outlives the rule set it
/// was built for.
struct EachState {
    descriptors: Arc<[ConstraintDescriptor]>,
    resolver: RuleResolver,
}

/// Validates every element of a collection against a type-appropriate rule.
///
/// The validator is cheap to share: reads go through an atomic pointer swap,
/// and the only mutable state is the bounded resolution cache. A single
/// instance may validate collections from multiple threads concurrently.
///
/// # Examples
///
/// ```rust
/// use each_valid::prelude::*;
/// use serde_json::json;
///
/// # fn example() -> Result<()> {
/// let validator = EachValidator::new(Constraint::length(2, 10))?;
///
/// assert!(validator.is_valid(&[json!("fo"), json!("foo")])?);
///
/// let violations = validator.validate(&[json!("f")])?;
/// assert_eq!(violations[0].message, "size must be between 2 and 10");
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub struct EachValidator {
    state: ArcSwap<EachState>,
    factory: Arc<dyn RuleExecutorFactory>,
    cache_capacity: usize,
    stop_on_first: bool,
}

impl EachValidator {
    /// Creates a validator for a single constraint with default settings.
    pub fn new(constraint: impl Into<ConstraintDescriptor>) -> Result<Self> {
        Self::builder().constraint(constraint).build()
    }

    /// Returns a builder for composite rule sets, custom factories, or a
    /// different cache bound.
    pub fn builder() -> EachValidatorBuilder {
        EachValidatorBuilder::new()
    }

    /// Validates every element of `values` in order.
    ///
    /// An empty slice is valid: there is nothing to validate. A `Null`
    /// element is checked by a representative executor and accepted by every
    /// constraint except `NotNull`. By default validation stops at the first
    /// invalid element; see
    /// [`EachValidatorBuilder::stop_on_first`] to collect every violation.
    ///
    /// # Errors
    ///
    /// Fails only on configuration defects: an element kind no binding
    /// covers, or an executor that cannot be instantiated. An invalid
    /// element is not an error; it is reported in the returned list.
    pub fn validate(&self, values: &[Value]) -> Result<Vec<Violation>> {
        let state = self.state.load();
        let mut violations = Vec::new();

        for (index, element) in values.iter().enumerate() {
            let resolved = state.resolver.resolve(ValueKind::of(element))?;

            for (descriptor, executor) in
                state.descriptors.iter().zip(resolved.executors.iter())
            {
                if executor.is_valid(element) {
                    continue;
                }
                #[cfg(feature = "tracing")]
                tracing::debug!(index, value = %element, rule = ?resolved.rule, "element is invalid");

                let template = descriptor.message_template();
                let attributes = descriptor.constraint.attributes();
                violations.push(Violation {
                    index,
                    message: message::interpolate(template, &attributes, element),
                    invalid_value: element.clone(),
                });
                // one violation per element, the first failing constraint decides
                break;
            }

            if self.stop_on_first && !violations.is_empty() {
                break;
            }
        }
        Ok(violations)
    }

    /// Collects `values` into a slice of dynamic values and validates them.
    ///
    /// # Errors
    ///
    /// Same conditions as [`EachValidator::validate`].
    pub fn validate_iter<T, I>(&self, values: I) -> Result<Vec<Violation>>
    where
        T: Into<Value>,
        I: IntoIterator<Item = T>,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        self.validate(&values)
    }

    /// Whether every element of `values` passes the rule set.
    ///
    /// # Errors
    ///
    /// Same conditions as [`EachValidator::validate`].
    pub fn is_valid(&self, values: &[Value]) -> Result<bool> {
        Ok(self.validate(values)?.is_empty())
    }

    /// Atomically re-targets the validator to a new rule set.
    ///
    /// The resolution cache is reconstructed along with the rest of the
    /// initialized state; validations already in flight keep the previous
    /// state until they finish.
    ///
    /// # Errors
    ///
    /// Same conditions as building a validator from `constraints`.
    pub fn reinitialize(
        &self,
        constraints: impl IntoIterator<Item = ConstraintDescriptor>,
    ) -> Result<()> {
        let state = build_state(
            constraints.into_iter().collect(),
            Arc::clone(&self.factory),
            self.cache_capacity,
        )?;
        self.state.store(Arc::new(state));
        Ok(())
    }
}

/// Builder for constructing an [`EachValidator`].
///
/// # Examples
///
/// ```rust
/// use each_valid::prelude::*;
/// use serde_json::json;
///
/// # fn example() -> Result<()> {
/// let validator = EachValidator::builder()
///     .constraint(ConstraintDescriptor::with_message(
///         Constraint::length(2, 10),
///         "between {min} and {max}",
///     ))
///     .stop_on_first(false)
///     .build()?;
///
/// let violations = validator.validate(&[json!("f"), json!("x")])?;
/// assert_eq!(violations.len(), 2);
/// assert_eq!(violations[1].message, "between 2 and 10");
/// # Ok(())
/// # }
/// # example().unwrap();
/// ```
pub struct EachValidatorBuilder {
    descriptors: Vec<ConstraintDescriptor>,
    stop_on_first: bool,
    cache_capacity: usize,
    factory: Option<Arc<dyn RuleExecutorFactory>>,
}

impl EachValidatorBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            descriptors: Vec::new(),
            stop_on_first: true,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            factory: None,
        }
    }

    /// Adds a constraint to the rule set. Composite sets must share a single
    /// constraint kind; every descriptor is checked per element in
    /// declaration order.
    pub fn constraint(mut self, constraint: impl Into<ConstraintDescriptor>) -> Self {
        self.descriptors.push(constraint.into());
        self
    }

    /// Adds several constraints at once.
    pub fn constraints<I, C>(mut self, constraints: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ConstraintDescriptor>,
    {
        self.descriptors
            .extend(constraints.into_iter().map(Into::into));
        self
    }

    /// Whether to stop at the first invalid element (default) or collect a
    /// violation for every invalid element.
    pub fn stop_on_first(mut self, stop_on_first: bool) -> Self {
        self.stop_on_first = stop_on_first;
        self
    }

    /// Bounds the number of distinct element kinds memoized by the
    /// resolution cache. Defaults to 6; values below 1 are clamped.
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = capacity;
        self
    }

    /// Injects an alternative executor construction strategy.
    pub fn factory(mut self, factory: Arc<dyn RuleExecutorFactory>) -> Self {
        self.factory = Some(factory);
        self
    }

    /// Builds the validator.
    ///
    /// # Errors
    ///
    /// [`EachError::EmptyRuleSet`] without any constraint,
    /// [`EachError::MixedRuleKinds`] when composite constraints differ in
    /// kind, and [`EachError::NoRuleImplementations`] for a constraint
    /// without bindings.
    pub fn build(self) -> Result<EachValidator> {
        let factory = self
            .factory
            .unwrap_or_else(|| Arc::new(BuiltinRuleFactory));
        let state = build_state(self.descriptors, Arc::clone(&factory), self.cache_capacity)?;
        Ok(EachValidator {
            state: ArcSwap::from_pointee(state),
            factory,
            cache_capacity: self.cache_capacity,
            stop_on_first: self.stop_on_first,
        })
    }
}

impl Default for EachValidatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn build_state(
    descriptors: Vec<ConstraintDescriptor>,
    factory: Arc<dyn RuleExecutorFactory>,
    cache_capacity: usize,
) -> Result<EachState> {
    let Some(first) = descriptors.first() else {
        return Err(EachError::EmptyRuleSet);
    };
    for other in &descriptors[1..] {
        if other.constraint.name() != first.constraint.name() {
            return Err(EachError::MixedRuleKinds {
                expected: first.constraint.name(),
                found: other.constraint.name(),
            });
        }
    }
    // constraints are all of one kind, so the first one's bindings serve the
    // whole set
    let binding = RuleBinding::for_constraint(&first.constraint)?;
    let descriptors: Arc<[ConstraintDescriptor]> = descriptors.into();
    let resolver = RuleResolver::new(
        binding,
        Arc::clone(&descriptors),
        factory,
        cache_capacity,
    );
    Ok(EachState {
        descriptors,
        resolver,
    })
}
