//! Core validation machinery: the element-wise validator, the per-type rule
//! resolver, and its bounded cache.

mod cache;
mod each;
mod resolver;

pub use each::{EachValidator, EachValidatorBuilder};
