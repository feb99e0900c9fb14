// File: core/src/engine.rs
// Purpose: Ordered rule evaluation for a single field

use serde::{Deserialize, Serialize};

use crate::attributes::FieldAttributes;
use crate::field::{FieldType, FieldValue};
use crate::rules;

/// Why a field failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailureReason {
    Empty,
    WrongLength,
    WrongDateFormat,
    Mismatch,
    ForbiddenNumeric,
    MissingPrefix,
    InvalidEmail,
    Unchecked,
    Unselected,
    NotANumber,
    BadPhoneLength,
}

/// Outcome of evaluating one field
///
/// `value` is the value after normalization; failures on radio, checkbox and
/// select fields report an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum ValidationResult {
    Passed {
        value: String,
    },
    Failed {
        reason: FailureReason,
        message: String,
        value: String,
    },
}

impl ValidationResult {
    pub fn is_passed(&self) -> bool {
        matches!(self, ValidationResult::Passed { .. })
    }

    pub fn is_failed(&self) -> bool {
        !self.is_passed()
    }

    pub fn value(&self) -> &str {
        match self {
            ValidationResult::Passed { value } => value,
            ValidationResult::Failed { value, .. } => value,
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            ValidationResult::Passed { .. } => None,
            ValidationResult::Failed { message, .. } => Some(message),
        }
    }

    pub fn reason(&self) -> Option<FailureReason> {
        match self {
            ValidationResult::Passed { .. } => None,
            ValidationResult::Failed { reason, .. } => Some(*reason),
        }
    }
}

/// Evaluate a field against its type and declared attributes
///
/// Rules run in a fixed order and the first failure wins:
///
/// 1. strip spaces and periods (when `strip_whitespace` is set)
/// 2. exact length
/// 3. `DD/MM/YYYY` date format
/// 4. case-insensitive match against `related_value`
/// 5. must not be numeric
/// 6. case-sensitive prefix
/// 7. type check (email, radio/checkbox, select, number, tel)
/// 8. non-empty for text and custom types
///
/// `related_value` is the current value of the field named by
/// `match_field_name`; a missing field compares as an empty string.
///
/// Messages come from the rule-specific override, then the field's own
/// default, then `form_default_message`.
pub fn evaluate(
    field_type: &FieldType,
    value: &FieldValue,
    attributes: &FieldAttributes,
    related_value: Option<&str>,
    form_default_message: &str,
) -> ValidationResult {
    let fallback = attributes
        .default_message
        .as_deref()
        .unwrap_or(form_default_message);
    let messages = &attributes.messages;

    let text = if attributes.strip_whitespace {
        rules::strip_spaces_and_periods(value.as_str())
    } else {
        value.as_str().to_string()
    };

    if let Some(length) = attributes.exact_length {
        if !rules::has_exact_length(&text, length) {
            return failed(
                FailureReason::WrongLength,
                messages.length_error.as_deref(),
                fallback,
                text,
            );
        }
    }

    if attributes.require_date_format && !rules::is_valid_date(&text) {
        return failed(
            FailureReason::WrongDateFormat,
            messages.date_error.as_deref(),
            fallback,
            text,
        );
    }

    if attributes.match_field_name.is_some()
        && !rules::matches_ignore_case(&text, related_value.unwrap_or_default())
    {
        return failed(
            FailureReason::Mismatch,
            messages.match_error.as_deref(),
            fallback,
            text,
        );
    }

    if attributes.forbid_numeric && rules::is_numeric(&text) {
        return failed(
            FailureReason::ForbiddenNumeric,
            messages.numeric_error.as_deref(),
            fallback,
            text,
        );
    }

    if let Some(prefix) = attributes.required_prefix.as_deref() {
        if !rules::has_prefix(&text, prefix) {
            return failed(
                FailureReason::MissingPrefix,
                messages.prefix_error.as_deref(),
                fallback,
                text,
            );
        }
    }

    let type_failure = match field_type {
        FieldType::Email if !rules::is_valid_email(&text) => Some(FailureReason::InvalidEmail),
        FieldType::Radio | FieldType::Checkbox if !value.is_checked() => {
            Some(FailureReason::Unchecked)
        }
        FieldType::Select if text.is_empty() => Some(FailureReason::Unselected),
        FieldType::Number if !rules::is_finite_number(&text) => Some(FailureReason::NotANumber),
        FieldType::Tel if !rules::is_valid_phone(&text) => Some(FailureReason::BadPhoneLength),
        FieldType::Text | FieldType::Custom(_) if text.is_empty() => Some(FailureReason::Empty),
        _ => None,
    };

    match type_failure {
        Some(reason) => {
            let reported = match reason {
                FailureReason::Unchecked | FailureReason::Unselected => String::new(),
                _ => text,
            };
            failed(reason, None, fallback, reported)
        }
        None => ValidationResult::Passed { value: text },
    }
}

fn failed(
    reason: FailureReason,
    rule_message: Option<&str>,
    fallback: &str,
    value: String,
) -> ValidationResult {
    tracing::trace!(?reason, "field failed validation");
    ValidationResult::Failed {
        reason,
        message: rule_message.unwrap_or(fallback).to_string(),
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEFAULT: &str = "Please fill out this field";

    fn text(value: &str) -> FieldValue {
        FieldValue::text(value)
    }

    #[test]
    fn test_plain_text() {
        let attrs = FieldAttributes::default();
        let empty = evaluate(&FieldType::Text, &text(""), &attrs, None, DEFAULT);
        assert_eq!(empty.reason(), Some(FailureReason::Empty));
        assert_eq!(empty.message(), Some(DEFAULT));

        let filled = evaluate(&FieldType::Text, &text("hello"), &attrs, None, DEFAULT);
        assert_eq!(
            filled,
            ValidationResult::Passed {
                value: "hello".to_string()
            }
        );
    }

    #[test]
    fn test_first_failure_wins() {
        let attrs = FieldAttributes {
            exact_length: Some(4),
            required_prefix: Some("EN".to_string()),
            ..Default::default()
        };
        let result = evaluate(&FieldType::Text, &text("XX"), &attrs, None, DEFAULT);
        assert_eq!(result.reason(), Some(FailureReason::WrongLength));

        let result = evaluate(&FieldType::Text, &text("XXXX"), &attrs, None, DEFAULT);
        assert_eq!(result.reason(), Some(FailureReason::MissingPrefix));
    }

    #[test]
    fn test_strip_runs_before_length() {
        let attrs = FieldAttributes {
            exact_length: Some(6),
            strip_whitespace: true,
            ..Default::default()
        };
        let result = evaluate(&FieldType::Text, &text("AB 12.34"), &attrs, None, DEFAULT);
        assert_eq!(
            result,
            ValidationResult::Passed {
                value: "AB1234".to_string()
            }
        );
    }

    #[test]
    fn test_message_priority() {
        let mut attrs = FieldAttributes {
            exact_length: Some(3),
            ..Default::default()
        };
        let result = evaluate(&FieldType::Text, &text("ab"), &attrs, None, DEFAULT);
        assert_eq!(result.message(), Some(DEFAULT));

        attrs.default_message = Some("Field default".to_string());
        let result = evaluate(&FieldType::Text, &text("ab"), &attrs, None, DEFAULT);
        assert_eq!(result.message(), Some("Field default"));

        attrs.messages.length_error = Some("Three characters".to_string());
        let result = evaluate(&FieldType::Text, &text("ab"), &attrs, None, DEFAULT);
        assert_eq!(result.message(), Some("Three characters"));

        // Rule messages only apply to their own rule
        let bare = FieldAttributes {
            messages: attrs.messages.clone(),
            ..Default::default()
        };
        let result = evaluate(&FieldType::Text, &text(""), &bare, None, DEFAULT);
        assert_eq!(result.message(), Some(DEFAULT));
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let attrs = FieldAttributes {
            match_field_name: Some("password".to_string()),
            ..Default::default()
        };
        let ok = evaluate(&FieldType::Text, &text("Secret"), &attrs, Some("secret"), DEFAULT);
        assert!(ok.is_passed());

        let mismatch = evaluate(&FieldType::Text, &text("Secret"), &attrs, Some("other"), DEFAULT);
        assert_eq!(mismatch.reason(), Some(FailureReason::Mismatch));

        let missing = evaluate(&FieldType::Text, &text("Secret"), &attrs, None, DEFAULT);
        assert_eq!(missing.reason(), Some(FailureReason::Mismatch));
    }

    #[test]
    fn test_forbid_numeric() {
        let attrs = FieldAttributes {
            forbid_numeric: true,
            ..Default::default()
        };
        let result = evaluate(&FieldType::Text, &text("12345"), &attrs, None, DEFAULT);
        assert_eq!(result.reason(), Some(FailureReason::ForbiddenNumeric));
        assert!(evaluate(&FieldType::Text, &text("12 Main St"), &attrs, None, DEFAULT).is_passed());
    }

    #[test]
    fn test_toggle_types() {
        let attrs = FieldAttributes::default();
        let unchecked = evaluate(
            &FieldType::Checkbox,
            &FieldValue::toggle("agree", false),
            &attrs,
            None,
            DEFAULT,
        );
        assert_eq!(
            unchecked,
            ValidationResult::Failed {
                reason: FailureReason::Unchecked,
                message: DEFAULT.to_string(),
                value: String::new(),
            }
        );

        let checked = evaluate(
            &FieldType::Radio,
            &FieldValue::toggle("yes", true),
            &attrs,
            None,
            DEFAULT,
        );
        assert_eq!(checked.value(), "yes");
        assert!(checked.is_passed());
    }

    #[test]
    fn test_select() {
        let attrs = FieldAttributes::default();
        let none = evaluate(&FieldType::Select, &text(""), &attrs, None, DEFAULT);
        assert_eq!(none.reason(), Some(FailureReason::Unselected));
        assert_eq!(none.value(), "");
        assert!(evaluate(&FieldType::Select, &text("uk"), &attrs, None, DEFAULT).is_passed());
    }

    #[test]
    fn test_number_and_tel() {
        let attrs = FieldAttributes::default();
        assert!(evaluate(&FieldType::Number, &text("4.5"), &attrs, None, DEFAULT).is_passed());
        assert_eq!(
            evaluate(&FieldType::Number, &text("four"), &attrs, None, DEFAULT).reason(),
            Some(FailureReason::NotANumber)
        );
        assert!(evaluate(&FieldType::Tel, &text("12345678901"), &attrs, None, DEFAULT).is_passed());
        assert_eq!(
            evaluate(&FieldType::Tel, &text("1234567890"), &attrs, None, DEFAULT).reason(),
            Some(FailureReason::BadPhoneLength)
        );
    }

    #[test]
    fn test_custom_type_falls_back_to_text() {
        let attrs = FieldAttributes::default();
        let password = FieldType::parse("password");
        assert_eq!(
            evaluate(&password, &text(""), &attrs, None, DEFAULT).reason(),
            Some(FailureReason::Empty)
        );
        assert!(evaluate(&password, &text("hunter2"), &attrs, None, DEFAULT).is_passed());
    }

    #[test]
    fn test_result_serializes_with_status_tag() {
        let json = serde_json::to_value(ValidationResult::Failed {
            reason: FailureReason::BadPhoneLength,
            message: "Bad".to_string(),
            value: "123".to_string(),
        })
        .unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["reason"], "bad-phone-length");
    }
}
