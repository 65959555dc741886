//! Per-type rule resolution with bounded caching.
//!
//! Given the ordered bindings a constraint declares and an element's
//! concrete kind, the resolver selects the first assignable rule
//! implementation, instantiates one executor per declared constraint, and
//! memoizes the result per kind in a small LRU cache.

use crate::constraints::{Constraint, ConstraintDescriptor};
use crate::core::cache::LruCache;
use crate::error::{EachError, Result};
use crate::rules::{RuleExecutor, RuleExecutorFactory, RuleImpl};
use crate::types::{TargetType, ValueKind};
use parking_lot::Mutex;
use std::sync::Arc;

/// Default bound on the number of distinct element kinds memoized per rule
/// set.
pub(crate) const DEFAULT_CACHE_CAPACITY: usize = 6;

/// Ordered mapping from target type to rule implementation, built once per
/// rule set and immutable afterward.
///
/// Iteration order is declaration order, and resolution picks the *first*
/// assignable entry. Overlapping bindings are therefore decided by position,
/// not by specificity; reordering entries changes validation outcomes.
#[derive(Debug, Clone)]
pub(crate) struct RuleBinding {
    entries: Vec<(TargetType, RuleImpl)>,
}

impl RuleBinding {
    /// Builds the binding list a constraint declares.
    pub(crate) fn for_constraint(constraint: &Constraint) -> Result<Self> {
        let entries = constraint.bindings();
        if entries.is_empty() {
            return Err(EachError::NoRuleImplementations {
                constraint: constraint.name(),
            });
        }
        Ok(Self { entries })
    }

    /// First entry whose target type is assignable from `kind`.
    fn first_assignable(&self, kind: ValueKind) -> Option<(TargetType, RuleImpl)> {
        self.entries
            .iter()
            .copied()
            .find(|(target, _)| target.is_assignable_from(kind))
    }

    /// The first declared entry. Bindings are non-empty by construction.
    fn first(&self) -> (TargetType, RuleImpl) {
        self.entries[0]
    }
}

/// The executors selected for one concrete element kind: the winning rule
/// implementation, configured once per declared constraint.
pub(crate) struct ResolvedRule {
    /// The implementation the binding scan selected. Diagnostic alongside
    /// the executors; without the `tracing` feature only tests read it.
    #[allow(dead_code)]
    pub(crate) rule: RuleImpl,
    /// One ready-to-run executor per declared constraint, in declaration
    /// order.
    pub(crate) executors: Vec<Box<dyn RuleExecutor>>,
}

/// Maps runtime elements to initialized, type-appropriate executors,
/// reusing prior work when the same concrete kind recurs.
///
/// A resolver may be shared across threads; the cache is guarded by a mutex
/// around the check-then-insert sequence. Concurrent misses for the same
/// kind may instantiate redundantly, but the first inserted entry wins and
/// instantiation is cheap and idempotent.
pub(crate) struct RuleResolver {
    binding: RuleBinding,
    descriptors: Arc<[ConstraintDescriptor]>,
    factory: Arc<dyn RuleExecutorFactory>,
    instances: Mutex<LruCache<ValueKind, Arc<ResolvedRule>>>,
}

impl RuleResolver {
    pub(crate) fn new(
        binding: RuleBinding,
        descriptors: Arc<[ConstraintDescriptor]>,
        factory: Arc<dyn RuleExecutorFactory>,
        cache_capacity: usize,
    ) -> Self {
        Self {
            binding,
            descriptors,
            factory,
            instances: Mutex::new(LruCache::new(cache_capacity)),
        }
    }

    /// Resolves the executors for an element of the given concrete kind.
    /// `None` stands for an element whose kind cannot be determined.
    ///
    /// # Errors
    ///
    /// [`EachError::NoApplicableRule`] when no binding entry is assignable
    /// from `kind`; instantiation errors propagate unchanged.
    pub(crate) fn resolve(&self, kind: Option<ValueKind>) -> Result<Arc<ResolvedRule>> {
        match kind {
            Some(kind) => self.resolve_kind(kind),
            None => self.resolve_any(),
        }
    }

    fn resolve_kind(&self, kind: ValueKind) -> Result<Arc<ResolvedRule>> {
        if let Some(found) = self.instances.lock().get(kind) {
            return Ok(Arc::clone(found));
        }
        // instantiate outside the lock; a concurrent miss for the same kind
        // re-checks before inserting so the first entry wins
        let resolved = Arc::new(self.find_and_instantiate(kind)?);
        let mut instances = self.instances.lock();
        if let Some(found) = instances.get(kind) {
            return Ok(Arc::clone(found));
        }
        instances.insert(kind, Arc::clone(&resolved));
        Ok(resolved)
    }

    /// Fallback for elements without a determinable kind: any resolved
    /// executor serves as representative, preferring the most recently used
    /// one. With a cold cache the first declared target type decides.
    fn resolve_any(&self) -> Result<Arc<ResolvedRule>> {
        if let Some(found) = self.instances.lock().most_recent() {
            return Ok(Arc::clone(found));
        }
        let (target, _) = self.binding.first();
        self.resolve_kind(target.exemplar())
    }

    fn find_and_instantiate(&self, kind: ValueKind) -> Result<ResolvedRule> {
        let (target, rule) = self
            .binding
            .first_assignable(kind)
            .ok_or(EachError::NoApplicableRule { kind })?;

        #[cfg(feature = "tracing")]
        tracing::trace!(%kind, target_type = %target, ?rule, "resolved rule implementation");
        #[cfg(not(feature = "tracing"))]
        let _ = target;

        let mut executors = Vec::with_capacity(self.descriptors.len());
        for descriptor in self.descriptors.iter() {
            executors.push(self.factory.instantiate(rule, descriptor)?);
        }
        Ok(ResolvedRule { rule, executors })
    }

    #[cfg(test)]
    pub(crate) fn cached_kinds(&self) -> Vec<ValueKind> {
        self.instances.lock().keys().copied().collect()
    }
}
