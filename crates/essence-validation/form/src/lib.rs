//! # essence-validation
//!
//! Attaches to a form, tracks the fields marked `data-required`, validates them
//! on blur/change and on submit, and drives inline success/error messages.
//!
//! ## Architecture
//!
//! - **`essence-validation-core`** - the per-field rule engine
//! - [`FormValidator`] - one instance per form; owns the tracked field list and options
//! - [`FieldAccessor`] / [`MessageRenderer`] - collaborators the controller talks to.
//!   The browser implementation lives in `essence-validation-wasm`; [`memory`]
//!   provides a headless one for server-side re-validation and tests.
//!
//! ```rust,ignore
//! use essence_validation::{FormValidator, ValidationOptions};
//! use essence_validation::memory::{InMemoryFields, MemoryField, MessageBoard};
//!
//! let fields = InMemoryFields::new()
//!     .with(MemoryField::new("name", "text").required())
//!     .with(MemoryField::new("email", "email").value("a@b.co").required());
//!
//! let mut form = FormValidator::new(fields, MessageBoard::new(), ValidationOptions::default());
//! form.attach();
//! let outcome = form.handle_submit();
//! assert_eq!(outcome.errors, 1);
//! ```

pub mod collaborators;
pub mod config;
pub mod controller;
pub mod discovery;
pub mod error;
pub mod memory;

pub use essence_validation_core::{
    evaluate, FailureReason, FieldAttributes, FieldType, FieldValue, TriggerEvent,
    ValidationResult,
};

pub use collaborators::{FieldAccessor, FieldCandidate, FieldDeclaration, MessageKind, MessageRenderer};
pub use config::{MessageStyle, ValidationOptions};
pub use controller::{FieldBinding, FormValidator, SubmitOutcome};
pub use discovery::TrackedFields;
pub use error::{FormError, Result};
