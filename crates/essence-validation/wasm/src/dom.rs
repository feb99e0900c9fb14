// File: wasm/src/dom.rs
// Purpose: Field accessor and message renderer over the browser DOM

use essence_validation::collaborators::{is_required, resolve_type};
use essence_validation::{
    FieldAccessor, FieldCandidate, FieldDeclaration, FieldType, FieldValue, FormError,
    MessageKind, MessageRenderer, MessageStyle, Result,
};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Element, HtmlFormElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

/// Input-capable descendants of a form
const CONTROL_SELECTOR: &str = "input, select, textarea";

const SUBMITTED_CONFIRMATION: &str = "Form submitted";

pub(crate) fn dom_error(err: JsValue) -> FormError {
    FormError::Dom(err.as_string().unwrap_or_else(|| format!("{:?}", err)))
}

/// Controls of `form` in document order
pub(crate) fn controls(form: &HtmlFormElement) -> Vec<Element> {
    match form.query_selector_all(CONTROL_SELECTOR) {
        Ok(list) => (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect(),
        Err(err) => {
            tracing::warn!(error = ?err, "could not query form controls");
            Vec::new()
        }
    }
}

fn named(form: &HtmlFormElement, name: &str) -> Vec<Element> {
    controls(form)
        .into_iter()
        .filter(|el| el.get_attribute("name").as_deref() == Some(name))
        .collect()
}

/// First control with this name; later duplicates are ignored
pub(crate) fn first_named(form: &HtmlFormElement, name: &str) -> Option<Element> {
    controls(form)
        .into_iter()
        .find(|el| el.get_attribute("name").as_deref() == Some(name))
}

fn data_attributes(el: &Element) -> Vec<(String, String)> {
    el.get_attribute_names()
        .iter()
        .filter_map(|name| name.as_string())
        .filter(|name| name.starts_with("data-"))
        .map(|name| {
            let value = el.get_attribute(&name).unwrap_or_default();
            (name, value)
        })
        .collect()
}

fn native_type(el: &Element) -> String {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        input.type_()
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        select.type_()
    } else if el.dyn_ref::<HtmlTextAreaElement>().is_some() {
        "textarea".to_string()
    } else {
        el.tag_name().to_ascii_lowercase()
    }
}

fn read_value(el: &Element, field_type: &FieldType) -> FieldValue {
    if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
        if field_type.is_toggle() {
            FieldValue::toggle(input.value(), input.checked())
        } else {
            FieldValue::text(input.value())
        }
    } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
        FieldValue::text(select.value())
    } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
        FieldValue::text(area.value())
    } else {
        FieldValue::default()
    }
}

/// Reads declarations straight from the form's controls
pub struct DomFields {
    form: HtmlFormElement,
}

impl DomFields {
    pub fn new(form: HtmlFormElement) -> Self {
        Self { form }
    }

    pub fn first_named(&self, name: &str) -> Option<Element> {
        first_named(&self.form, name)
    }
}

impl FieldAccessor for DomFields {
    fn candidates(&self) -> Vec<FieldCandidate> {
        controls(&self.form)
            .iter()
            .map(|el| {
                let attrs = data_attributes(el);
                FieldCandidate {
                    name: el.get_attribute("name").filter(|name| !name.is_empty()),
                    field_type: resolve_type(&native_type(el), &attrs),
                    required: is_required(&attrs),
                }
            })
            .collect()
    }

    /// Radio and checkbox groups read the checked member, if any
    fn declaration(&self, name: &str) -> Result<FieldDeclaration> {
        let first = self
            .first_named(name)
            .ok_or_else(|| FormError::FieldNotFound(name.to_string()))?;
        let attrs = data_attributes(&first);
        let native = native_type(&first);
        let field_type = resolve_type(&native, &attrs);

        let value = if field_type.is_toggle() {
            named(&self.form, name)
                .iter()
                .map(|el| read_value(el, &field_type))
                .find(FieldValue::is_checked)
                .unwrap_or_else(|| read_value(&first, &field_type))
        } else {
            read_value(&first, &field_type)
        };

        FieldDeclaration::from_attributes(name, &native, value, &attrs)
    }

    fn value_of(&self, name: &str) -> Option<String> {
        self.first_named(name)
            .map(|el| read_value(&el, &FieldType::Text).as_str().to_string())
    }

    fn write_value(&mut self, name: &str, value: &str) -> Result<()> {
        let el = self
            .first_named(name)
            .ok_or_else(|| FormError::FieldNotFound(name.to_string()))?;

        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        } else {
            return Err(FormError::Dom(format!("field '{}' does not accept text", name)));
        }
        Ok(())
    }

    fn set_autocomplete(&mut self, enabled: bool) -> Result<()> {
        self.form.set_autocomplete(if enabled { "on" } else { "off" });
        Ok(())
    }
}

/// Toggles container classes and message elements around each field
pub struct DomRenderer {
    form: HtmlFormElement,
    style: MessageStyle,
}

impl DomRenderer {
    pub fn new(form: HtmlFormElement, style: MessageStyle) -> Self {
        Self { form, style }
    }

    fn classes(&self, kind: MessageKind) -> (&str, &str) {
        match kind {
            MessageKind::Error => (
                self.style.error_container_class.as_str(),
                self.style.error_msg_class.as_str(),
            ),
            MessageKind::Success => (
                self.style.success_container_class.as_str(),
                self.style.success_msg_class.as_str(),
            ),
        }
    }

    /// Closest `messageParent` ancestor of the field
    fn container(&self, field: &str) -> Result<Option<Element>> {
        match first_named(&self.form, field) {
            Some(el) => el.closest(&self.style.parent).map_err(dom_error),
            None => {
                tracing::warn!(field, "no element to render a message for");
                Ok(None)
            }
        }
    }

    /// First following sibling of the container matching `messageSibling`
    fn sibling(&self, container: &Element) -> Result<Option<Element>> {
        let Some(selector) = self.style.sibling.as_deref() else {
            return Ok(None);
        };

        let mut next = container.next_element_sibling();
        while let Some(el) = next {
            if el.matches(selector).map_err(dom_error)? {
                return Ok(Some(el));
            }
            next = el.next_element_sibling();
        }
        Ok(None)
    }
}

impl MessageRenderer for DomRenderer {
    fn show_message(&mut self, field: &str, kind: MessageKind, message: Option<&str>) -> Result<()> {
        let Some(container) = self.container(field)? else {
            return Ok(());
        };
        let (container_class, msg_class) = self.classes(kind);

        if !container.class_list().contains(container_class) {
            container
                .class_list()
                .add_1(container_class)
                .map_err(dom_error)?;
            if let Some(sibling) = self.sibling(&container)? {
                sibling
                    .class_list()
                    .add_1(container_class)
                    .map_err(dom_error)?;
            }
        }

        let Some(text) = message else {
            return Ok(());
        };

        match container
            .query_selector(&format!(".{}", msg_class))
            .map_err(dom_error)?
        {
            Some(existing) => existing.set_text_content(Some(text)),
            None => {
                let document = container
                    .owner_document()
                    .ok_or_else(|| FormError::Dom("field is not in a document".to_string()))?;
                let element = document.create_element("div").map_err(dom_error)?;
                element.set_class_name(msg_class);
                element.set_text_content(Some(text));
                container.append_child(&element).map_err(dom_error)?;
            }
        }
        Ok(())
    }

    fn remove_message(&mut self, field: &str, kind: MessageKind) -> Result<()> {
        let Some(container) = self.container(field)? else {
            return Ok(());
        };
        let (container_class, msg_class) = self.classes(kind);

        container
            .class_list()
            .remove_1(container_class)
            .map_err(dom_error)?;
        if let Some(sibling) = self.sibling(&container)? {
            sibling
                .class_list()
                .remove_1(container_class)
                .map_err(dom_error)?;
        }

        let messages = container
            .query_selector_all(&format!(".{}", msg_class))
            .map_err(dom_error)?;
        for i in 0..messages.length() {
            if let Some(el) = messages.item(i).and_then(|node| node.dyn_into::<Element>().ok()) {
                el.remove();
            }
        }
        Ok(())
    }

    fn confirm_submission(&mut self) -> Result<()> {
        let window = web_sys::window().ok_or_else(|| FormError::Dom("no window".to_string()))?;
        window
            .alert_with_message(SUBMITTED_CONFIRMATION)
            .map_err(dom_error)
    }
}
