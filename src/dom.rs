//! Browser implementation of [`PageFields`] over the page's elements.

use crate::mounts;
use log::warn;
use marathon_pace::page::{Content, Field, Output, PageFields, Trigger};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement};

/// Looks elements up by id on every access, since the page owns them.
pub struct DomFields {
    document: Document,
}

impl DomFields {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        Self {
            document: gloo_utils::document(),
        }
    }

    fn element(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    /// Run `handler` on every click of the trigger's button, if it exists.
    pub fn on_click(&self, trigger: Trigger, handler: impl FnMut() + 'static) {
        let Some(button) = self.element(trigger.id()) else {
            return;
        };
        let closure = Closure::<dyn FnMut()>::new(handler);
        if let Err(e) =
            button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
        {
            warn!("Failed to listen on #{}: {:?}", trigger.id(), e);
            return;
        }
        // The listener lives as long as the page.
        closure.forget();
    }
}

impl PageFields for DomFields {
    fn value(&self, field: Field) -> Option<String> {
        let el = self.element(field.id())?;
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            Some(input.value())
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            Some(select.value())
        } else {
            el.get_attribute("value")
        }
    }

    fn set_value(&mut self, field: Field, value: &str) {
        let Some(el) = self.element(field.id()) else {
            return;
        };
        if let Some(input) = el.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = el.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        } else if let Err(e) = el.set_attribute("value", value) {
            warn!("Failed to set #{}: {:?}", field.id(), e);
        }
    }

    fn hide(&mut self, field: Field) {
        // The field sits in a wrapper together with its label; hide that.
        let Some(wrapper) = self
            .element(field.id())
            .and_then(|el| el.parent_element())
            .and_then(|p| p.dyn_into::<HtmlElement>().ok())
        else {
            return;
        };
        if let Err(e) = wrapper.style().set_property("display", "none") {
            warn!("Failed to hide #{}: {:?}", field.id(), e);
        }
    }

    fn has_output(&self, output: Output) -> bool {
        self.element(output.id()).is_some()
    }

    fn render(&mut self, output: Output, content: Content) {
        if let Some(host) = self.element(output.id()) {
            mounts::show(output, host, content);
        }
    }
}
