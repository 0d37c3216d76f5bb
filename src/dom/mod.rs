//! Reading values out of changed input elements
//!
//! Change events carry the element that changed. What counts as that
//! element's value depends on its kind: a named checkbox stands for the
//! whole group sharing its name, a named radio for the selected member of its
//! group, and everything else for its own value.
//!
//! The element model is abstract so the same classification runs against a
//! browser document (see the `miniform-ui` crate) and the in-memory document
//! in [`memory`].

pub mod memory;

use crate::value::FieldValue;

/// The parts of an `<input>` element value extraction reads.
pub trait InputElement {
    /// The `type` attribute, e.g. `"text"` or `"checkbox"`.
    fn input_type(&self) -> String;
    /// The `name` attribute, empty when unset.
    fn name(&self) -> String;
    fn checked(&self) -> bool;
    fn value(&self) -> String;
}

/// Lookup of elements sharing a `name` attribute.
pub trait ElementLookup {
    type Element: InputElement;

    /// Every element named `name`, in document order.
    fn elements_by_name(&self, name: &str) -> Vec<Self::Element>;
}

/// Input kinds that need group-aware extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Checkbox,
    Radio,
    Other,
}

impl InputKind {
    pub fn from_type(input_type: &str) -> Self {
        if input_type.eq_ignore_ascii_case("checkbox") {
            InputKind::Checkbox
        } else if input_type.eq_ignore_ascii_case("radio") {
            InputKind::Radio
        } else {
            InputKind::Other
        }
    }
}

/// Value of the element that fired a change event.
pub fn extract_value<I, L>(input: &I, lookup: &L) -> FieldValue
where
    I: InputElement + ?Sized,
    L: ElementLookup + ?Sized,
{
    match InputKind::from_type(&input.input_type()) {
        InputKind::Checkbox => checkbox_value(input, lookup),
        InputKind::Radio => radio_value(input, lookup),
        InputKind::Other => FieldValue::Text(input.value()),
    }
}

fn checkbox_value<I, L>(input: &I, lookup: &L) -> FieldValue
where
    I: InputElement + ?Sized,
    L: ElementLookup + ?Sized,
{
    let name = input.name();
    if name.is_empty() {
        return FieldValue::Bool(input.checked());
    }
    FieldValue::List(
        lookup
            .elements_by_name(&name)
            .iter()
            .filter(|element| element.checked())
            .map(InputElement::value)
            .collect(),
    )
}

// An unnamed radio reports its checked state like a lone checkbox.
fn radio_value<I, L>(input: &I, lookup: &L) -> FieldValue
where
    I: InputElement + ?Sized,
    L: ElementLookup + ?Sized,
{
    let name = input.name();
    if name.is_empty() {
        return FieldValue::Bool(input.checked());
    }
    lookup
        .elements_by_name(&name)
        .iter()
        .find(|element| element.checked())
        .map(|element| FieldValue::Text(element.value()))
        .unwrap_or(FieldValue::Absent)
}
