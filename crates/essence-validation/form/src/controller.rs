// File: form/src/controller.rs
// Purpose: Per-form validator: discovery, listener plan, per-field evaluation and submit gating

use essence_validation_core::{evaluate, rules, FieldValue, TriggerEvent, ValidationResult};
use tracing::{debug, info, trace, warn};

use crate::collaborators::{FieldAccessor, MessageKind, MessageRenderer};
use crate::config::ValidationOptions;
use crate::discovery::TrackedFields;
use crate::error::{FormError, Result};

/// Called after a submission passes validation
pub type SubmitCallback = Box<dyn FnMut()>;

/// One listener the host must bind for a tracked field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldBinding {
    pub name: String,
    pub event: TriggerEvent,
}

/// Result of handling a submit event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// Number of tracked fields that failed
    pub errors: usize,
    /// Whether the host must cancel the browser's default submission
    pub prevent_default: bool,
}

impl SubmitOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors == 0
    }
}

/// Validator attached to a single form
///
/// Holds its own options and tracked field list; nothing is shared between
/// instances.
pub struct FormValidator<F, R> {
    options: ValidationOptions,
    fields: F,
    renderer: R,
    tracked: TrackedFields,
    on_submit: Option<SubmitCallback>,
}

impl<F, R> FormValidator<F, R>
where
    F: FieldAccessor,
    R: MessageRenderer,
{
    pub fn new(fields: F, renderer: R, options: ValidationOptions) -> Self {
        Self {
            options,
            fields,
            renderer,
            tracked: TrackedFields::new(),
            on_submit: None,
        }
    }

    /// Replace the default confirmation with a callback run on valid submission
    pub fn with_submit_callback(mut self, callback: impl FnMut() + 'static) -> Self {
        self.on_submit = Some(Box::new(callback));
        self
    }

    /// Discover the required fields and return the listeners to bind
    ///
    /// Rebuilds the tracked set from scratch, so attaching twice yields the
    /// same plan rather than a doubled one.
    pub fn attach(&mut self) -> Vec<FieldBinding> {
        if let Err(err) = self.fields.set_autocomplete(self.options.auto_complete) {
            warn!(error = %err, "could not set form autocomplete");
        }

        let candidates = self.fields.candidates();
        self.tracked = TrackedFields::discover(candidates.iter().cloned());

        let bindings = self
            .tracked
            .iter()
            .filter_map(|name| {
                candidates
                    .iter()
                    .find(|c| c.name.as_deref() == Some(name))
                    .map(|c| FieldBinding {
                        name: name.to_string(),
                        event: c.field_type.trigger(),
                    })
            })
            .collect();

        debug!(fields = self.tracked.len(), "attached form validator");
        bindings
    }

    pub fn tracked(&self) -> &TrackedFields {
        &self.tracked
    }

    pub fn options(&self) -> &ValidationOptions {
        &self.options
    }

    pub fn fields(&self) -> &F {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut F {
        &mut self.fields
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_parts(self) -> (F, R) {
        (self.fields, self.renderer)
    }

    /// Evaluate one tracked field and update its message
    ///
    /// Untracked names are rejected; non-required fields are never validated.
    pub fn validate_field(&mut self, name: &str) -> Result<ValidationResult> {
        if !self.tracked.contains(name) {
            return Err(FormError::NotTracked(name.to_string()));
        }

        let mut declaration = self.fields.declaration(name)?;

        if let Some(message) = self.options.default_message_for(name) {
            declaration.attributes.default_message = Some(message.to_string());
        }

        let related = declaration
            .attributes
            .match_field_name
            .as_deref()
            .and_then(|other| self.fields.value_of(other));

        let result = evaluate(
            &declaration.field_type,
            &declaration.value,
            &declaration.attributes,
            related.as_deref(),
            &self.options.default_message,
        );
        trace!(field = name, passed = result.is_passed(), "evaluated field");

        if let (true, FieldValue::Text(original)) =
            (declaration.attributes.strip_whitespace, &declaration.value)
        {
            let normalized = rules::strip_spaces_and_periods(original);
            if normalized != *original {
                if let Err(err) = self.fields.write_value(name, &normalized) {
                    warn!(field = name, error = %err, "could not write normalized value");
                }
            }
        }

        match result.message() {
            Some(message) => {
                let message = message.to_string();
                self.render(name, MessageKind::Error, &message);
            }
            None => {
                let message = self.options.success_message.clone();
                self.render(name, MessageKind::Success, &message);
            }
        }

        Ok(result)
    }

    /// Evaluate every tracked field in order and return the error count
    ///
    /// A failing field never stops the ones after it.
    pub fn validate_submission(&mut self) -> usize {
        let names: Vec<String> = self.tracked.iter().map(str::to_string).collect();
        let mut errors = 0;

        for name in names {
            match self.validate_field(&name) {
                Ok(result) if result.is_passed() => {}
                Ok(_) => errors += 1,
                Err(err) => {
                    warn!(field = %name, error = %err, "could not validate field");
                    let message = self
                        .options
                        .default_message_for(&name)
                        .unwrap_or(&self.options.default_message)
                        .to_string();
                    self.render(&name, MessageKind::Error, &message);
                    errors += 1;
                }
            }
        }

        errors
    }

    /// Handle the form's submit event
    ///
    /// With errors the submission is cancelled. Without, it is cancelled only
    /// in AJAX mode, and the submit callback (or the renderer's confirmation)
    /// runs either way.
    pub fn handle_submit(&mut self) -> SubmitOutcome {
        let errors = self.validate_submission();

        if errors > 0 {
            info!(errors, "form submission blocked");
            return SubmitOutcome {
                errors,
                prevent_default: true,
            };
        }

        info!(ajax = self.options.ajax_submission, "form passed validation");
        match self.on_submit.as_mut() {
            Some(callback) => callback(),
            None => {
                if let Err(err) = self.renderer.confirm_submission() {
                    warn!(error = %err, "could not confirm submission");
                }
            }
        }

        SubmitOutcome {
            errors: 0,
            prevent_default: self.options.ajax_submission,
        }
    }

    fn render(&mut self, name: &str, kind: MessageKind, message: &str) {
        if let Err(err) = self.renderer.remove_message(name, kind.opposite()) {
            warn!(field = name, error = %err, "could not remove message");
        }

        let text = self.options.show_messages.then_some(message);
        if let Err(err) = self.renderer.show_message(name, kind, text) {
            warn!(field = name, error = %err, "could not show message");
        }
    }
}
