//! Field validators for recognised semantic columns.

mod patterns;

pub use patterns::{EmailMatch, FieldKind, FieldValidator, PatternValidator};
