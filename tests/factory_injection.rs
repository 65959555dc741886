//! Integration tests for injected executor factories and cache lifecycle.

use each_valid::prelude::*;
use each_valid::rules::{BuiltinRuleFactory, RuleExecutor, RuleExecutorFactory, RuleImpl};
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Delegates to the built-in factory while counting instantiations, so
/// tests can observe cache hits, misses, and evictions from the outside.
struct CountingFactory {
    instantiations: Arc<AtomicUsize>,
}

impl RuleExecutorFactory for CountingFactory {
    fn instantiate(
        &self,
        rule: RuleImpl,
        descriptor: &ConstraintDescriptor,
    ) -> Result<Box<dyn RuleExecutor>> {
        self.instantiations.fetch_add(1, Ordering::SeqCst);
        BuiltinRuleFactory.instantiate(rule, descriptor)
    }
}

fn counting_validator(
    constraint: Constraint,
    cache_capacity: usize,
) -> (EachValidator, Arc<AtomicUsize>) {
    let instantiations = Arc::new(AtomicUsize::new(0));
    let validator = EachValidator::builder()
        .constraint(constraint)
        .cache_capacity(cache_capacity)
        .factory(Arc::new(CountingFactory {
            instantiations: Arc::clone(&instantiations),
        }))
        .build()
        .unwrap();
    (validator, instantiations)
}

#[test]
fn homogeneous_elements_instantiate_once() {
    let (validator, instantiations) = counting_validator(Constraint::length(0, 10), 6);

    assert!(validator
        .is_valid(&[json!("a"), json!("b"), json!("c")])
        .unwrap());
    assert_eq!(instantiations.load(Ordering::SeqCst), 1);

    assert!(validator.is_valid(&[json!("d")]).unwrap());
    assert_eq!(instantiations.load(Ordering::SeqCst), 1);
}

#[test]
fn eviction_forces_reinstantiation_with_identical_behavior() {
    let (validator, instantiations) = counting_validator(Constraint::range(0, 10), 1);

    // int resolves, float evicts it, int resolves again
    assert!(validator.is_valid(&[json!(5)]).unwrap());
    assert!(validator.is_valid(&[json!(3.0)]).unwrap());
    assert!(validator.is_valid(&[json!(7)]).unwrap());
    assert_eq!(instantiations.load(Ordering::SeqCst), 3);

    // the freshly constructed executor still applies the same bounds
    assert!(!validator.is_valid(&[json!(11)]).unwrap());
}

#[test]
fn distinct_kinds_within_capacity_instantiate_once_each() {
    let (validator, instantiations) = counting_validator(Constraint::length(0, 10), 6);

    let mixed = vec![json!("foo"), json!([1]), json!({"a": 1})];
    assert!(validator.is_valid(&mixed).unwrap());
    assert_eq!(instantiations.load(Ordering::SeqCst), 3);

    // a second pass over the same kinds is fully cached
    assert!(validator.is_valid(&mixed).unwrap());
    assert_eq!(instantiations.load(Ordering::SeqCst), 3);
}

#[test]
fn null_elements_reuse_a_resolved_executor() {
    let (validator, instantiations) = counting_validator(Constraint::length(0, 10), 6);

    assert!(validator.is_valid(&[json!("a"), json!(null)]).unwrap());
    assert_eq!(instantiations.load(Ordering::SeqCst), 1);

    // with nothing resolved yet, the first registered target stands in
    let (validator, instantiations) = counting_validator(Constraint::length(0, 10), 6);
    assert!(validator.is_valid(&[json!(null)]).unwrap());
    assert_eq!(instantiations.load(Ordering::SeqCst), 1);
}

#[test]
fn reinitialize_reconstructs_the_cache() {
    let (validator, instantiations) = counting_validator(Constraint::length(0, 10), 6);

    assert!(validator.is_valid(&[json!("a")]).unwrap());
    assert_eq!(instantiations.load(Ordering::SeqCst), 1);

    validator
        .reinitialize([Constraint::length(0, 5).into()])
        .unwrap();

    // the previously cached text executor is gone
    assert!(validator.is_valid(&[json!("a")]).unwrap());
    assert_eq!(instantiations.load(Ordering::SeqCst), 2);
}

#[test]
fn composite_sets_instantiate_one_executor_per_constraint() {
    let instantiations = Arc::new(AtomicUsize::new(0));
    let validator = EachValidator::builder()
        .constraints([Constraint::length(2, 10), Constraint::length(0, 3)])
        .factory(Arc::new(CountingFactory {
            instantiations: Arc::clone(&instantiations),
        }))
        .build()
        .unwrap();

    assert!(validator.is_valid(&[json!("foo")]).unwrap());
    assert_eq!(instantiations.load(Ordering::SeqCst), 2);
}
