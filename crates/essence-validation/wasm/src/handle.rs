// File: wasm/src/handle.rs
// Purpose: JavaScript handle owning one form's validator and its event listeners

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use essence_validation::{FormValidator, ValidationOptions};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, HtmlFormElement};

use crate::dom::{DomFields, DomRenderer};

type DomValidator = FormValidator<DomFields, DomRenderer>;

struct Listener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// Validation attached to a single `<form>`
///
/// # Example (JavaScript)
/// ```javascript
/// const validation = new EssenceValidation(document.querySelector('#signup'), {
///     messageParent: '.form-group',
///     ajaxSubmission: true,
///     submitCallback: () => sendForm(),
/// });
/// ```
#[wasm_bindgen]
pub struct EssenceValidation {
    form: HtmlFormElement,
    validator: Rc<RefCell<DomValidator>>,
    submit_callback: Option<js_sys::Function>,
    submit_pending: Rc<Cell<bool>>,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl EssenceValidation {
    /// Parse options, discover required fields and bind listeners
    #[wasm_bindgen(constructor)]
    pub fn new(form: HtmlFormElement, options: JsValue) -> Result<EssenceValidation, JsValue> {
        let parsed: ValidationOptions = if options.is_undefined() || options.is_null() {
            ValidationOptions::default()
        } else {
            serde_wasm_bindgen::from_value(options.clone())
                .map_err(|e| JsValue::from_str(&format!("Failed to parse options: {}", e)))?
        };

        let fields = DomFields::new(form.clone());
        let renderer = DomRenderer::new(form.clone(), parsed.message_style());
        let mut validator = FormValidator::new(fields, renderer, parsed);

        // The JS callback runs from the submit listener once the validator is released
        let submit_callback = submit_callback(&options);
        let submit_pending = Rc::new(Cell::new(false));
        if submit_callback.is_some() {
            let pending = Rc::clone(&submit_pending);
            validator = validator.with_submit_callback(move || pending.set(true));
        }

        let mut handle = EssenceValidation {
            form,
            validator: Rc::new(RefCell::new(validator)),
            submit_callback,
            submit_pending,
            listeners: Vec::new(),
        };
        handle.attach()?;
        Ok(handle)
    }

    /// Rediscover fields and rebind; existing listeners are removed first
    pub fn attach(&mut self) -> Result<(), JsValue> {
        self.detach();

        let plan = self.validator.try_borrow_mut().map_err(busy)?.attach();
        let fields = DomFields::new(self.form.clone());

        for binding in plan {
            let Some(element) = fields.first_named(&binding.name) else {
                continue;
            };

            let validator = Rc::clone(&self.validator);
            let name = binding.name.clone();
            let callback = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
                match validator.try_borrow_mut() {
                    Ok(mut validator) => {
                        if let Err(err) = validator.validate_field(&name) {
                            tracing::warn!(field = %name, error = %err, "could not validate field");
                        }
                    }
                    Err(_) => tracing::debug!(field = %name, "validator busy, skipping event"),
                }
            });
            self.listen(element.into(), binding.event.event_name(), callback)?;
        }

        let validator = Rc::clone(&self.validator);
        let callback = self.submit_callback.clone();
        let pending = Rc::clone(&self.submit_pending);
        let on_submit = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            let prevent = match validator.try_borrow_mut() {
                Ok(mut validator) => validator.handle_submit().prevent_default,
                Err(_) => true,
            };
            if prevent {
                event.prevent_default();
            }
            if pending.replace(false) {
                if let Some(callback) = &callback {
                    if let Err(err) = callback.call0(&JsValue::NULL) {
                        tracing::warn!(error = ?err, "submit callback threw");
                    }
                }
            }
        });
        self.listen(self.form.clone().into(), "submit", on_submit)?;

        tracing::debug!(listeners = self.listeners.len(), "bound form listeners");
        Ok(())
    }

    /// Remove every listener this handle bound
    pub fn detach(&mut self) {
        for listener in self.listeners.drain(..) {
            if let Err(err) = listener
                .target
                .remove_event_listener_with_callback(listener.event, listener.callback.as_ref().unchecked_ref())
            {
                tracing::warn!(error = ?err, event = listener.event, "could not remove listener");
            }
        }
    }

    /// Validate one tracked field now and return its result
    #[wasm_bindgen(js_name = validateField)]
    pub fn validate_field(&self, name: &str) -> Result<JsValue, JsValue> {
        let result = self
            .validator
            .try_borrow_mut()
            .map_err(busy)?
            .validate_field(name)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(serde_wasm_bindgen::to_value(&result)?)
    }

    /// Validate every tracked field and return the number of failures
    #[wasm_bindgen(js_name = validateForm)]
    pub fn validate_form(&self) -> Result<usize, JsValue> {
        Ok(self
            .validator
            .try_borrow_mut()
            .map_err(busy)?
            .validate_submission())
    }

    #[wasm_bindgen(js_name = trackedFields)]
    pub fn tracked_fields(&self) -> Result<js_sys::Array, JsValue> {
        Ok(self
            .validator
            .try_borrow()
            .map_err(busy)?
            .tracked()
            .iter()
            .map(JsValue::from_str)
            .collect())
    }
}

impl EssenceValidation {
    fn listen(
        &mut self,
        target: EventTarget,
        event: &'static str,
        callback: Closure<dyn FnMut(Event)>,
    ) -> Result<(), JsValue> {
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        self.listeners.push(Listener {
            target,
            event,
            callback,
        });
        Ok(())
    }
}

impl Drop for EssenceValidation {
    fn drop(&mut self) {
        self.detach();
    }
}

fn busy(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&format!("validator is busy: {}", err))
}

/// `submitCallback` from the raw options object, when it is a function
fn submit_callback(options: &JsValue) -> Option<js_sys::Function> {
    if !options.is_object() {
        return None;
    }
    js_sys::Reflect::get(options, &JsValue::from_str("submitCallback"))
        .ok()
        .and_then(|value| value.dyn_into::<js_sys::Function>().ok())
}
