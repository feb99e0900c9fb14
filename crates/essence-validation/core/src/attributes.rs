// File: core/src/attributes.rs
// Purpose: Declarative validation attributes carried by a field

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Marker that makes a field tracked. The only required marker recognised.
pub const REQUIRED_ATTRIBUTE: &str = "data-required";

/// Overrides the native control type
pub const TYPE_ATTRIBUTE: &str = "data-type";

pub const LENGTH_ATTRIBUTE: &str = "data-length";
pub const DATE_ATTRIBUTE: &str = "data-date";
pub const MATCH_ATTRIBUTE: &str = "data-match";
pub const NOT_NUMERIC_ATTRIBUTE: &str = "data-not-numeric";
pub const PREFIX_ATTRIBUTE: &str = "data-prefix";
pub const STRIP_ATTRIBUTE: &str = "data-strip";
pub const ERROR_MESSAGE_ATTRIBUTE: &str = "data-error-message";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    #[error("{attribute} must be a non-negative integer, got '{value}'")]
    InvalidInteger { attribute: String, value: String },
}

/// Per-rule error messages declared on a field
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleMessages {
    #[serde(default)]
    pub length_error: Option<String>,
    #[serde(default)]
    pub date_error: Option<String>,
    #[serde(default)]
    pub match_error: Option<String>,
    #[serde(default)]
    pub numeric_error: Option<String>,
    #[serde(default)]
    pub prefix_error: Option<String>,
}

/// Validation attributes for a single field
///
/// Deserializes from a camelCase object so the same rules can be handed over
/// from JavaScript:
///
/// ```javascript
/// { exactLength: 6, requiredPrefix: "EN", prefixError: "Must start with EN" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldAttributes {
    #[serde(default)]
    pub exact_length: Option<usize>,
    #[serde(default)]
    pub require_date_format: bool,
    #[serde(default)]
    pub match_field_name: Option<String>,
    #[serde(default)]
    pub forbid_numeric: bool,
    #[serde(default)]
    pub required_prefix: Option<String>,

    /// Remove spaces and periods before any rule runs
    #[serde(default)]
    pub strip_whitespace: bool,

    #[serde(flatten)]
    pub messages: RuleMessages,

    /// Field-level default message
    #[serde(default)]
    pub default_message: Option<String>,
}

impl FieldAttributes {
    /// Build the attribute bag from `(name, value)` attribute pairs
    ///
    /// Unknown attributes are ignored.
    pub fn from_data_attributes<I, K, V>(attrs: I) -> Result<Self, AttributeError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut parsed = FieldAttributes::default();

        for (name, value) in attrs {
            let name = name.as_ref();
            let value = value.as_ref();

            match name {
                LENGTH_ATTRIBUTE => {
                    let length = value.trim().parse::<usize>().map_err(|_| {
                        AttributeError::InvalidInteger {
                            attribute: name.to_string(),
                            value: value.to_string(),
                        }
                    })?;
                    parsed.exact_length = Some(length);
                }
                DATE_ATTRIBUTE => parsed.require_date_format = flag(value),
                MATCH_ATTRIBUTE => parsed.match_field_name = non_empty(value),
                NOT_NUMERIC_ATTRIBUTE => parsed.forbid_numeric = flag(value),
                PREFIX_ATTRIBUTE => parsed.required_prefix = non_empty(value),
                STRIP_ATTRIBUTE => parsed.strip_whitespace = flag(value),
                ERROR_MESSAGE_ATTRIBUTE => parsed.default_message = non_empty(value),
                "data-length-error" => parsed.messages.length_error = non_empty(value),
                "data-date-error" => parsed.messages.date_error = non_empty(value),
                "data-match-error" => parsed.messages.match_error = non_empty(value),
                "data-numeric-error" => parsed.messages.numeric_error = non_empty(value),
                "data-prefix-error" => parsed.messages.prefix_error = non_empty(value),
                _ => {}
            }
        }

        Ok(parsed)
    }
}

/// Whether a boolean-style attribute value is set
///
/// Present with an empty value counts as set; only an explicit `false` unsets it.
pub fn flag(value: &str) -> bool {
    !value.trim().eq_ignore_ascii_case("false")
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_data_attributes() {
        let attrs = FieldAttributes::from_data_attributes([
            ("data-required", ""),
            ("data-length", "11"),
            ("data-date", ""),
            ("data-match", "password"),
            ("data-not-numeric", "true"),
            ("data-prefix", "EN"),
            ("data-strip", ""),
            ("data-error-message", "Fill me in"),
            ("data-prefix-error", "Must start with EN"),
            ("class", "form-control"),
        ])
        .unwrap();

        assert_eq!(attrs.exact_length, Some(11));
        assert!(attrs.require_date_format);
        assert_eq!(attrs.match_field_name.as_deref(), Some("password"));
        assert!(attrs.forbid_numeric);
        assert_eq!(attrs.required_prefix.as_deref(), Some("EN"));
        assert!(attrs.strip_whitespace);
        assert_eq!(attrs.default_message.as_deref(), Some("Fill me in"));
        assert_eq!(
            attrs.messages.prefix_error.as_deref(),
            Some("Must start with EN")
        );
        assert!(attrs.messages.length_error.is_none());
    }

    #[test]
    fn test_explicit_false_flag() {
        let attrs =
            FieldAttributes::from_data_attributes([("data-date", "false"), ("data-strip", "False")])
                .unwrap();
        assert!(!attrs.require_date_format);
        assert!(!attrs.strip_whitespace);
    }

    #[test]
    fn test_invalid_length_is_an_error() {
        let err = FieldAttributes::from_data_attributes([("data-length", "six")]).unwrap_err();
        assert_eq!(
            err,
            AttributeError::InvalidInteger {
                attribute: "data-length".to_string(),
                value: "six".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "data-length must be a non-negative integer, got 'six'"
        );
    }

    #[test]
    fn test_deserialize_camel_case_rules() {
        let attrs: FieldAttributes = serde_json::from_str(
            r#"{"exactLength": 6, "requiredPrefix": "EN", "lengthError": "Six characters"}"#,
        )
        .unwrap();
        assert_eq!(attrs.exact_length, Some(6));
        assert_eq!(attrs.required_prefix.as_deref(), Some("EN"));
        assert_eq!(attrs.messages.length_error.as_deref(), Some("Six characters"));
        assert!(!attrs.forbid_numeric);
    }
}
