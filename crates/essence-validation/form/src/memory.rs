// File: form/src/memory.rs
// Purpose: Headless collaborators for re-validating posted forms without a DOM

use std::collections::HashMap;

use essence_validation_core::{FieldAttributes, FieldType, FieldValue};

use crate::collaborators::{
    FieldAccessor, FieldCandidate, FieldDeclaration, MessageKind, MessageRenderer,
};
use crate::config::ValidationOptions;
use crate::controller::{FormValidator, SubmitOutcome};
use crate::error::{FormError, Result};

/// A form control held in memory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryField {
    pub name: Option<String>,
    pub field_type: FieldType,
    pub value: FieldValue,
    pub attributes: FieldAttributes,
    pub required: bool,
}

impl MemoryField {
    pub fn new(name: impl Into<String>, field_type: &str) -> Self {
        let field_type = FieldType::parse(field_type);
        let value = if field_type.is_toggle() {
            FieldValue::toggle("on", false)
        } else {
            FieldValue::default()
        };

        Self {
            name: Some(name.into()),
            field_type,
            value,
            attributes: FieldAttributes::default(),
            required: false,
        }
    }

    /// Build a field the way the DOM layer sees it: native type plus raw attributes
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
        let declaration = FieldDeclaration::from_attributes(name, native_type, value, attrs)?;
        Ok(Self {
            name: Some(declaration.name),
            field_type: declaration.field_type,
            value: declaration.value,
            attributes: declaration.attributes,
            required: crate::collaborators::is_required(attrs),
        })
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Set the text value (or the submitted value of a toggle)
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = match self.value {
            FieldValue::Toggle { checked, .. } => FieldValue::toggle(value, checked),
            FieldValue::Text(_) => FieldValue::text(value),
        };
        self
    }

    pub fn checked(mut self, checked: bool) -> Self {
        self.value = FieldValue::toggle(self.value.as_str().to_string(), checked);
        self
    }

    pub fn attributes(mut self, attributes: FieldAttributes) -> Self {
        self.attributes = attributes;
        self
    }
}

/// Fields of one form, in document order
#[derive(Debug, Clone, Default)]
pub struct InMemoryFields {
    fields: Vec<MemoryField>,
    autocomplete: Option<bool>,
}

impl InMemoryFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, field: MemoryField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn push(&mut self, field: MemoryField) {
        self.fields.push(field);
    }

    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> Result<()> {
        let field = self
            .first_mut(name)
            .ok_or_else(|| FormError::FieldNotFound(name.to_string()))?;
        field.value = match &field.value {
            FieldValue::Toggle { checked, .. } => FieldValue::toggle(value, *checked),
            FieldValue::Text(_) => FieldValue::text(value),
        };
        Ok(())
    }

    /// Current text value of the first field with this name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.first(name).map(|field| field.value.as_str())
    }

    /// Last autocomplete state requested by a validator
    pub fn autocomplete(&self) -> Option<bool> {
        self.autocomplete
    }

    fn first(&self, name: &str) -> Option<&MemoryField> {
        self.fields
            .iter()
            .find(|field| field.name.as_deref() == Some(name))
    }

    fn first_mut(&mut self, name: &str) -> Option<&mut MemoryField> {
        self.fields
            .iter_mut()
            .find(|field| field.name.as_deref() == Some(name))
    }
}

impl FieldAccessor for InMemoryFields {
    fn candidates(&self) -> Vec<FieldCandidate> {
        self.fields
            .iter()
            .map(|field| FieldCandidate {
                name: field.name.clone(),
                field_type: field.field_type.clone(),
                required: field.required,
            })
            .collect()
    }

    /// Radio and checkbox groups count as checked when any member is
    fn declaration(&self, name: &str) -> Result<FieldDeclaration> {
        let first = self
            .first(name)
            .ok_or_else(|| FormError::FieldNotFound(name.to_string()))?;

        let value = if first.field_type.is_toggle() {
            self.fields
                .iter()
                .filter(|field| field.name.as_deref() == Some(name))
                .find(|field| field.value.is_checked())
                .map(|field| field.value.clone())
                .unwrap_or_else(|| first.value.clone())
        } else {
            first.value.clone()
        };

        Ok(FieldDeclaration {
            name: name.to_string(),
            field_type: first.field_type.clone(),
            value,
            attributes: first.attributes.clone(),
        })
    }

    fn value_of(&self, name: &str) -> Option<String> {
        self.get(name).map(str::to_string)
    }

    fn write_value(&mut self, name: &str, value: &str) -> Result<()> {
        self.set_value(name, value)
    }

    fn set_autocomplete(&mut self, enabled: bool) -> Result<()> {
        self.autocomplete = Some(enabled);
        Ok(())
    }
}

/// What a field's message parent currently shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageState {
    pub kind: MessageKind,
    /// Message text, absent when only the container class is set
    pub text: Option<String>,
}

/// Records rendered messages per field, standing in for container classes
/// and message elements
#[derive(Debug, Clone, Default)]
pub struct MessageBoard {
    states: HashMap<String, Vec<MessageState>>,
    confirmations: usize,
}

impl MessageBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages currently shown for a field
    pub fn messages(&self, field: &str) -> &[MessageState] {
        self.states.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has(&self, field: &str, kind: MessageKind) -> bool {
        self.messages(field).iter().any(|state| state.kind == kind)
    }

    pub fn error(&self, field: &str) -> Option<&str> {
        self.messages(field)
            .iter()
            .find(|state| state.kind == MessageKind::Error)
            .and_then(|state| state.text.as_deref())
    }

    /// Number of times a valid submission was confirmed
    pub fn confirmations(&self) -> usize {
        self.confirmations
    }
}

impl MessageRenderer for MessageBoard {
    fn show_message(&mut self, field: &str, kind: MessageKind, message: Option<&str>) -> Result<()> {
        let states = self.states.entry(field.to_string()).or_default();
        let text = message.map(str::to_string);
        match states.iter_mut().find(|state| state.kind == kind) {
            Some(existing) => existing.text = text,
            None => states.push(MessageState { kind, text }),
        }
        Ok(())
    }

    fn remove_message(&mut self, field: &str, kind: MessageKind) -> Result<()> {
        if let Some(states) = self.states.get_mut(field) {
            states.retain(|state| state.kind != kind);
        }
        Ok(())
    }

    fn confirm_submission(&mut self) -> Result<()> {
        self.confirmations += 1;
        Ok(())
    }
}

/// Errors and final values of a validated form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormReport {
    /// Field names to error messages
    pub errors: HashMap<String, String>,
    /// Field values after normalization
    pub values: HashMap<String, String>,
}

impl FormReport {
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    pub fn get_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(|s| s.as_str())
    }

    pub fn get_value(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(|s| s.as_str())
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Validate posted fields the same way the browser would on submit
pub fn validate_form(fields: InMemoryFields, options: ValidationOptions) -> (SubmitOutcome, FormReport) {
    let mut validator = FormValidator::new(fields, MessageBoard::new(), options)
        .with_submit_callback(|| {});
    validator.attach();
    let outcome = validator.handle_submit();

    let tracked: Vec<String> = validator.tracked().iter().map(str::to_string).collect();
    let default_message = validator.options().default_message.clone();
    let (fields, board) = validator.into_parts();

    let mut report = FormReport::default();
    for name in tracked {
        if board.has(&name, MessageKind::Error) {
            let message = board.error(&name).unwrap_or(&default_message).to_string();
            report.errors.insert(name.clone(), message);
        }
        if let Some(value) = fields.get(&name) {
            report.values.insert(name, value.to_string());
        }
    }

    (outcome, report)
}
