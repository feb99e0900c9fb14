//! Essence Validation Core
//!
//! The per-field rule engine. Given a field's semantic type, its current value
//! and its declarative attributes, [`evaluate`] decides pass/fail and picks the
//! message to show. Used by the form controller and by the WASM bindings.

pub mod attributes;
pub mod engine;
pub mod field;
pub mod rules;

pub use attributes::{AttributeError, FieldAttributes, RuleMessages};
pub use engine::{evaluate, FailureReason, ValidationResult};
pub use field::{FieldType, FieldValue, TriggerEvent};
