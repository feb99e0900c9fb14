//! Essence Validation WASM
//!
//! WebAssembly bindings for essence-validation. Attaches the form controller
//! to a real `<form>` and exposes the rule engine for one-off checks.

use essence_validation::{evaluate, FieldAttributes, FieldType, FieldValue, ValidationOptions};
use wasm_bindgen::prelude::*;

pub mod dom;
mod handle;

pub use handle::EssenceValidation;

/// Set panic hook for better error messages in the browser
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Evaluate a single value without a form
///
/// # Arguments
/// * `field_type` - Semantic type (`text`, `email`, `tel`, `checkbox`, ...)
/// * `value` - A string, or a boolean checked state for radio/checkbox
/// * `attributes` - Rule object, e.g. `{ exactLength: 11, stripWhitespace: true }`
/// * `related_value` - Value of the field named by `matchFieldName`
/// * `default_message` - Message when no more specific one applies
///
/// # Returns
/// `{ status: "passed", value }` or `{ status: "failed", reason, message, value }`
///
/// # Example (JavaScript)
/// ```javascript
/// const result = evaluateField('tel', '12345678901', {});
/// // { status: "passed", value: "12345678901" }
/// ```
#[wasm_bindgen(js_name = evaluateField)]
pub fn evaluate_field(
    field_type: &str,
    value: JsValue,
    attributes: JsValue,
    related_value: Option<String>,
    default_message: Option<String>,
) -> Result<JsValue, JsValue> {
    let attributes: FieldAttributes = if attributes.is_undefined() || attributes.is_null() {
        FieldAttributes::default()
    } else {
        serde_wasm_bindgen::from_value(attributes)
            .map_err(|e| JsValue::from_str(&format!("Failed to parse rules: {}", e)))?
    };

    let field_type = FieldType::parse(field_type);
    let value = match (value.as_bool(), value.as_string()) {
        (Some(checked), _) => FieldValue::toggle(String::new(), checked),
        (None, Some(text)) if field_type.is_toggle() => FieldValue::toggle(text, false),
        (None, Some(text)) => FieldValue::text(text),
        (None, None) => FieldValue::default(),
    };
    let default_message =
        default_message.unwrap_or_else(|| ValidationOptions::default().default_message);

    let result = evaluate(
        &field_type,
        &value,
        &attributes,
        related_value.as_deref(),
        &default_message,
    );
    Ok(serde_wasm_bindgen::to_value(&result)?)
}
