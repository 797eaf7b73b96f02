//! Consistency validation.
//!
//! Referential problems between registered entities are reported as
//! findings rather than errors, so callers can tolerate warnings and act
//! only on errors.

mod result;
mod validator;

pub use result::{Finding, Severity, ValidationResult};
pub use validator::ConsistencyValidator;
