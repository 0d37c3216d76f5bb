//! Browser implementations of the element model
//!
//! Wraps `web_sys` inputs and the page document so change events can be run
//! through the same value extraction as the in-memory document.

use leptos::web_sys;
use miniform::dom::{extract_value, ElementLookup, InputElement};
use miniform::FieldValue;
use wasm_bindgen::JsCast;

/// An `<input>` element of the page.
#[derive(Clone, Debug)]
pub struct DomInput(pub web_sys::HtmlInputElement);

impl InputElement for DomInput {
    fn input_type(&self) -> String {
        self.0.type_()
    }

    fn name(&self) -> String {
        self.0.name()
    }

    fn checked(&self) -> bool {
        self.0.checked()
    }

    fn value(&self) -> String {
        self.0.value()
    }
}

/// The page document.
#[derive(Clone, Debug)]
pub struct DomDocument(pub web_sys::Document);

impl DomDocument {
    /// The document of the current window, if there is one.
    pub fn current() -> Option<Self> {
        web_sys::window().and_then(|w| w.document()).map(DomDocument)
    }
}

impl ElementLookup for DomDocument {
    type Element = DomInput;

    // Non-input elements sharing the name (e.g. a <select>) are skipped.
    fn elements_by_name(&self, name: &str) -> Vec<DomInput> {
        let nodes = self.0.get_elements_by_name(name);
        (0..nodes.length())
            .filter_map(|i| nodes.get(i))
            .filter_map(|node| node.dyn_into::<web_sys::HtmlInputElement>().ok())
            .map(DomInput)
            .collect()
    }
}

/// Value of the input that fired `ev`.
///
/// Returns `None` when the event target is not an `<input>` or there is no
/// document to look sibling inputs up in.
pub fn event_value(ev: &web_sys::Event) -> Option<FieldValue> {
    let input = ev
        .target()?
        .dyn_into::<web_sys::HtmlInputElement>()
        .ok()
        .map(DomInput)?;
    let document = DomDocument::current()?;
    Some(extract_value(&input, &document))
}
