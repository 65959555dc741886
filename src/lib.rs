//! # each-valid
//!
//! Element-wise collection validation with type-directed rule resolution and
//! bounded caching.
//!
//! ## Overview
//!
//! `each-valid` applies a single-element validation rule (e.g. "string length
//! between 1 and 10") to *every element* of a heterogeneous collection.
//! Elements are dynamically-typed [`serde_json::Value`]s; rules are declared
//! as explicit, statically-typed [`Constraint`](constraints::Constraint)
//! configurations. A constraint may be handled by several rule
//! implementations, each registered for a specific target type; the validator
//! selects the implementation matching each element's concrete kind and
//! memoizes the selection in a small least-recently-used cache, so
//! near-homogeneous collections pay for resolution only once.
//!
//! ## Quick Start
//!
//! ```rust
//! use each_valid::prelude::*;
//! use serde_json::json;
//!
//! # fn example() -> each_valid::error::Result<()> {
//! let validator = EachValidator::builder()
//!     .constraint(Constraint::length(1, 10))
//!     .build()?;
//!
//! // Every element passes.
//! assert!(validator.is_valid(&[json!("alpha"), json!("beta")])?);
//!
//! // The empty string violates the minimum; the report carries the
//! // element's index and the interpolated message.
//! let violations = validator.validate(&[json!("ok"), json!("")])?;
//! assert_eq!(violations[0].index, 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Features
//!
//! - **Type-directed dispatch**: one constraint, one implementation per
//!   target type (text, sequence, map, number, ...), first registered match
//!   wins
//! - **Bounded resolution cache**: per-kind executors are reused across
//!   elements; a small LRU bound keeps memory O(1)
//! - **Indexed reports**: violations carry the element index, the offending
//!   value, and a message interpolated from the constraint's attributes
//! - **Composite rule sets**: several configurations of the same constraint
//!   checked in declaration order
//! - **Injectable construction**: executor instantiation goes through the
//!   [`RuleExecutorFactory`](rules::RuleExecutorFactory) capability trait
//!
//! ## Feature Flags
//!
//! Enable optional constraint families in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! each-valid = { version = "0.1", features = ["temporal"] }
//! ```
//!
//! `pattern` (default) provides the regex-backed text constraints, `temporal`
//! the timestamp constraints, and `tracing` emits resolution diagnostics.

#![warn(missing_docs, rust_2024_compatibility)]
#![deny(unsafe_code)]

pub mod constraints;
pub mod core;
pub mod error;
pub mod report;
pub mod rules;
pub mod types;

mod message;

/// Convenient re-exports for common usage patterns.
pub mod prelude {
    pub use crate::constraints::{Constraint, ConstraintDescriptor};
    pub use crate::core::{EachValidator, EachValidatorBuilder};
    pub use crate::error::{EachError, Result};
    pub use crate::report::Violation;
    pub use crate::types::{TargetType, Value, ValueKind};
}
