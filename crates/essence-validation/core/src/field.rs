// File: core/src/field.rs
// Purpose: Semantic field types, field values and the events that trigger evaluation

use serde::{Deserialize, Serialize};
use std::fmt;

/// Semantic type of a form field
///
/// Taken from an explicit `data-type` override when present, otherwise from
/// the native control type. Anything unrecognised is kept as `Custom` and
/// validated with the generic (non-empty) rule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    Text,
    Email,
    Number,
    Tel,
    Radio,
    Checkbox,
    Select,
    Custom(String),
}

impl FieldType {
    /// Map a type string to its semantic type
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "" | "text" | "textarea" => FieldType::Text,
            "email" => FieldType::Email,
            "number" => FieldType::Number,
            "tel" => FieldType::Tel,
            "radio" => FieldType::Radio,
            "checkbox" => FieldType::Checkbox,
            "select" | "select-one" | "select-multiple" => FieldType::Select,
            _ => FieldType::Custom(normalized),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldType::Text => "text",
            FieldType::Email => "email",
            FieldType::Number => "number",
            FieldType::Tel => "tel",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Select => "select",
            FieldType::Custom(name) => name,
        }
    }

    /// Event the field re-validates on
    pub fn trigger(&self) -> TriggerEvent {
        match self {
            FieldType::Checkbox | FieldType::Radio | FieldType::Select => TriggerEvent::Change,
            _ => TriggerEvent::Blur,
        }
    }

    /// Whether the value is a checked state rather than free text
    pub fn is_toggle(&self) -> bool {
        matches!(self, FieldType::Checkbox | FieldType::Radio)
    }
}

impl From<String> for FieldType {
    fn from(raw: String) -> Self {
        FieldType::parse(&raw)
    }
}

impl From<FieldType> for String {
    fn from(field_type: FieldType) -> Self {
        field_type.as_str().to_string()
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// DOM event a tracked field is bound to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriggerEvent {
    Blur,
    Change,
}

impl TriggerEvent {
    pub fn event_name(self) -> &'static str {
        match self {
            TriggerEvent::Blur => "blur",
            TriggerEvent::Change => "change",
        }
    }
}

/// Current value of a field
///
/// Select fields use `Text`, with an empty string meaning nothing selected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Toggle { value: String, checked: bool },
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    pub fn toggle(value: impl Into<String>, checked: bool) -> Self {
        FieldValue::Toggle {
            value: value.into(),
            checked,
        }
    }

    /// The textual value the attribute rules operate on
    pub fn as_str(&self) -> &str {
        match self {
            FieldValue::Text(value) => value,
            FieldValue::Toggle { value, .. } => value,
        }
    }

    /// Checked state; plain text values count as unchecked
    pub fn is_checked(&self) -> bool {
        matches!(self, FieldValue::Toggle { checked: true, .. })
    }
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_types() {
        assert_eq!(FieldType::parse("email"), FieldType::Email);
        assert_eq!(FieldType::parse("TEL"), FieldType::Tel);
        assert_eq!(FieldType::parse("select-one"), FieldType::Select);
        assert_eq!(FieldType::parse("textarea"), FieldType::Text);
        assert_eq!(FieldType::parse(""), FieldType::Text);
    }

    #[test]
    fn test_unknown_type_is_custom() {
        assert_eq!(
            FieldType::parse("password"),
            FieldType::Custom("password".to_string())
        );
        assert_eq!(FieldType::parse("password").as_str(), "password");
    }

    #[test]
    fn test_trigger_events() {
        assert_eq!(FieldType::Checkbox.trigger(), TriggerEvent::Change);
        assert_eq!(FieldType::Radio.trigger(), TriggerEvent::Change);
        assert_eq!(FieldType::Select.trigger(), TriggerEvent::Change);
        assert_eq!(FieldType::Text.trigger(), TriggerEvent::Blur);
        assert_eq!(FieldType::Email.trigger(), TriggerEvent::Blur);
        assert_eq!(FieldType::parse("postcode").trigger(), TriggerEvent::Blur);
        assert_eq!(TriggerEvent::Change.event_name(), "change");
    }

    #[test]
    fn test_field_value_accessors() {
        let toggle = FieldValue::toggle("yes", true);
        assert_eq!(toggle.as_str(), "yes");
        assert!(toggle.is_checked());
        assert!(!FieldValue::text("yes").is_checked());
    }

    #[test]
    fn test_type_serde_roundtrip_through_string() {
        let parsed: FieldType = serde_json::from_str("\"checkbox\"").unwrap();
        assert_eq!(parsed, FieldType::Checkbox);
        assert_eq!(serde_json::to_string(&FieldType::Tel).unwrap(), "\"tel\"");
    }
}
