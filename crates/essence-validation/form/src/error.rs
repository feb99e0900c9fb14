// File: form/src/error.rs
// Purpose: Errors raised by the collaborators around the rule engine
//
// Validation failures are not errors; they are `ValidationResult::Failed`.

use essence_validation_core::AttributeError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("field '{0}' is not tracked by this form")]
    NotTracked(String),

    #[error("no field named '{0}' in form")]
    FieldNotFound(String),

    #[error("invalid validation attributes on field '{field}': {source}")]
    Attributes {
        field: String,
        #[source]
        source: AttributeError,
    },

    #[error("DOM operation failed: {0}")]
    Dom(String),
}

pub type Result<T> = std::result::Result<T, FormError>;
