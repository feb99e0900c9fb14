// File: form/src/collaborators.rs
// Purpose: The boundary between the controller and whatever holds the form (DOM, memory)

use essence_validation_core::attributes::{flag, REQUIRED_ATTRIBUTE, TYPE_ATTRIBUTE};
use essence_validation_core::{FieldAttributes, FieldType, FieldValue};

use crate::error::{FormError, Result};

/// A form control seen during discovery, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCandidate {
    pub name: Option<String>,
    pub field_type: FieldType,
    pub required: bool,
}

/// Everything the rule engine needs to know about one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDeclaration {
    pub name: String,
    pub field_type: FieldType,
    pub value: FieldValue,
    pub attributes: FieldAttributes,
}

impl FieldDeclaration {
    /// Build a declaration from the raw attributes of a control
    ///
    /// `data-type` overrides `native_type`.
    pub fn from_attributes<K, V>(
        name: &str,
        native_type: &str,
        value: FieldValue,
        attrs: &[(K, V)],
    ) -> Result<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let attributes = FieldAttributes::from_data_attributes(
            attrs.iter().map(|(k, v)| (k.as_ref(), v.as_ref())),
        )
        .map_err(|source| FormError::Attributes {
            field: name.to_string(),
            source,
        })?;

        Ok(Self {
            name: name.to_string(),
            field_type: resolve_type(native_type, attrs),
            value,
            attributes,
        })
    }
}

/// Semantic type of a control: the `data-type` override, else its native type
pub fn resolve_type<K, V>(native_type: &str, attrs: &[(K, V)]) -> FieldType
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    attrs
        .iter()
        .find(|(k, v)| k.as_ref() == TYPE_ATTRIBUTE && !v.as_ref().trim().is_empty())
        .map(|(_, v)| FieldType::parse(v.as_ref()))
        .unwrap_or_else(|| FieldType::parse(native_type))
}

/// Whether the control carries the `data-required` marker
pub fn is_required<K, V>(attrs: &[(K, V)]) -> bool
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    attrs
        .iter()
        .any(|(k, v)| k.as_ref() == REQUIRED_ATTRIBUTE && flag(v.as_ref()))
}

/// Which message a field is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKind {
    Error,
    Success,
}

impl MessageKind {
    pub fn opposite(self) -> Self {
        match self {
            MessageKind::Error => MessageKind::Success,
            MessageKind::Success => MessageKind::Error,
        }
    }
}

/// Reads fields and writes normalized values back
pub trait FieldAccessor {
    /// Every input-capable control, in document order
    fn candidates(&self) -> Vec<FieldCandidate>;

    /// Declaration of the first control with this name
    fn declaration(&self, name: &str) -> Result<FieldDeclaration>;

    /// Current value of another field, for the match rule
    fn value_of(&self, name: &str) -> Option<String>;

    fn write_value(&mut self, name: &str, value: &str) -> Result<()>;

    /// Toggle the form's native autocomplete
    fn set_autocomplete(&mut self, _enabled: bool) -> Result<()> {
        Ok(())
    }
}

/// Shows and removes inline messages
pub trait MessageRenderer {
    /// Mark the field's message parent with the container class for `kind`
    /// and insert or update the message text. `None` toggles the class only.
    fn show_message(&mut self, field: &str, kind: MessageKind, message: Option<&str>) -> Result<()>;

    /// Clear the container class for `kind` and remove its message element
    fn remove_message(&mut self, field: &str, kind: MessageKind) -> Result<()>;

    /// Tell the user the form went through; used when no submit callback is set
    fn confirm_submission(&mut self) -> Result<()> {
        Ok(())
    }
}
