// File: form/src/config.rs
// Purpose: Per-form options, overlaid on static defaults once at attach time

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Options recognised by a form validator
///
/// Any option the caller leaves out takes its default, so a partial object
/// such as `{"ajaxSubmission": true}` is a complete configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOptions {
    /// Leave native autocomplete on (default: false, autocomplete is disabled)
    #[serde(default = "default_false")]
    pub auto_complete: bool,

    /// Insert message text elements (default: true). Classes are toggled either way.
    #[serde(default = "default_true")]
    pub show_messages: bool,

    #[serde(default = "default_message")]
    pub default_message: String,

    #[serde(default = "default_success_message")]
    pub success_message: String,

    /// Selector of the ancestor that receives classes and messages
    #[serde(default = "default_message_parent")]
    pub message_parent: String,

    /// Selector of an element next to the message parent that also gets the
    /// container class; `false` or absent disables it
    #[serde(default, deserialize_with = "selector_or_false")]
    pub message_sibling: Option<String>,

    /// Always cancel the browser submission, even when the form is valid
    #[serde(default = "default_false")]
    pub ajax_submission: bool,

    #[serde(default = "default_error_msg_class")]
    pub error_msg_class: String,

    #[serde(default = "default_success_msg_class")]
    pub success_msg_class: String,

    #[serde(default = "default_error_container_class")]
    pub error_container_class: String,

    #[serde(default = "default_success_container_class")]
    pub success_container_class: String,

    /// Field name to default error message
    #[serde(default)]
    pub overwrite_default_message: HashMap<String, String>,
}

/// Where and how messages are rendered; handed to the message renderer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageStyle {
    pub parent: String,
    pub sibling: Option<String>,
    pub error_msg_class: String,
    pub success_msg_class: String,
    pub error_container_class: String,
    pub success_container_class: String,
}

// Default values
fn default_true() -> bool {
    true
}

fn default_false() -> bool {
    false
}

fn default_message() -> String {
    "Please fill out this field".to_string()
}

fn default_success_message() -> String {
    "Success!".to_string()
}

fn default_message_parent() -> String {
    "div".to_string()
}

fn default_error_msg_class() -> String {
    "error__msg".to_string()
}

fn default_success_msg_class() -> String {
    "success__msg".to_string()
}

fn default_error_container_class() -> String {
    "error".to_string()
}

fn default_success_container_class() -> String {
    "success".to_string()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SiblingOption {
    Selector(String),
    Flag(bool),
}

fn selector_or_false<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<SiblingOption>::deserialize(deserializer)? {
        None | Some(SiblingOption::Flag(false)) => Ok(None),
        Some(SiblingOption::Selector(selector)) if selector.is_empty() => Ok(None),
        Some(SiblingOption::Selector(selector)) => Ok(Some(selector)),
        Some(SiblingOption::Flag(true)) => Err(serde::de::Error::custom(
            "messageSibling must be a selector or false",
        )),
    }
}

impl Default for ValidationOptions {
    fn default() -> Self {
        Self {
            auto_complete: false,
            show_messages: true,
            default_message: default_message(),
            success_message: default_success_message(),
            message_parent: default_message_parent(),
            message_sibling: None,
            ajax_submission: false,
            error_msg_class: default_error_msg_class(),
            success_msg_class: default_success_msg_class(),
            error_container_class: default_error_container_class(),
            success_container_class: default_success_container_class(),
            overwrite_default_message: HashMap::new(),
        }
    }
}

impl ValidationOptions {
    /// Parse user options from JSON, filling in defaults
    pub fn from_json(json: &str) -> Result<Self> {
        if json.trim().is_empty() {
            return Ok(Self::default());
        }

        let options: ValidationOptions =
            serde_json::from_str(json).context("Failed to parse validation options")?;

        Ok(options)
    }

    pub fn message_style(&self) -> MessageStyle {
        MessageStyle {
            parent: self.message_parent.clone(),
            sibling: self.message_sibling.clone(),
            error_msg_class: self.error_msg_class.clone(),
            success_msg_class: self.success_msg_class.clone(),
            error_container_class: self.error_container_class.clone(),
            success_container_class: self.success_container_class.clone(),
        }
    }

    /// Default message for a field, honouring `overwriteDefaultMessage`
    pub fn default_message_for(&self, field: &str) -> Option<&str> {
        self.overwrite_default_message
            .get(field)
            .map(|message| message.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = ValidationOptions::default();
        assert!(!options.auto_complete);
        assert!(options.show_messages);
        assert!(!options.ajax_submission);
        assert_eq!(options.default_message, "Please fill out this field");
        assert_eq!(options.message_parent, "div");
        assert_eq!(options.error_msg_class, "error__msg");
        assert_eq!(options.success_container_class, "success");
        assert!(options.message_sibling.is_none());
    }

    #[test]
    fn test_empty_options() {
        assert_eq!(
            ValidationOptions::from_json("").unwrap(),
            ValidationOptions::default()
        );
        assert_eq!(
            ValidationOptions::from_json("{}").unwrap(),
            ValidationOptions::default()
        );
    }

    #[test]
    fn test_partial_options_overlay_defaults() {
        let options = ValidationOptions::from_json(
            r#"{
                "ajaxSubmission": true,
                "messageParent": ".form-group",
                "overwriteDefaultMessage": {"email": "We need your email"}
            }"#,
        )
        .unwrap();
        assert!(options.ajax_submission);
        assert_eq!(options.message_parent, ".form-group");
        assert_eq!(options.default_message_for("email"), Some("We need your email"));
        assert_eq!(options.default_message_for("name"), None);
        assert_eq!(options.error_container_class, "error");

        // Defaults are rebuilt per call, never shared
        assert!(!ValidationOptions::default().ajax_submission);
    }

    #[test]
    fn test_message_sibling_accepts_selector_or_false() {
        let options = ValidationOptions::from_json(r#"{"messageSibling": ".hint"}"#).unwrap();
        assert_eq!(options.message_sibling.as_deref(), Some(".hint"));

        let options = ValidationOptions::from_json(r#"{"messageSibling": false}"#).unwrap();
        assert!(options.message_sibling.is_none());

        assert!(ValidationOptions::from_json(r#"{"messageSibling": true}"#).is_err());
    }

    #[test]
    fn test_invalid_json_has_context() {
        let err = ValidationOptions::from_json("{not json").unwrap_err();
        assert!(err.to_string().contains("Failed to parse validation options"));
    }
}
