//! In-memory document
//!
//! A flat list of inputs in document order, enough to drive value extraction
//! without a browser. Used by the headless driver and by tests.

use std::ops::Index;

use super::{ElementLookup, InputElement, InputKind};

/// Identifies an input within a [`MemoryDocument`].
pub type InputId = usize;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryInput {
    pub input_type: String,
    pub name: String,
    pub value: String,
    pub checked: bool,
}

impl MemoryInput {
    pub fn new(input_type: impl Into<String>) -> Self {
        Self {
            input_type: input_type.into(),
            ..Default::default()
        }
    }

    pub fn text(name: impl Into<String>) -> Self {
        Self::new("text").with_name(name)
    }

    pub fn checkbox(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new("checkbox").with_name(name).with_value(value)
    }

    pub fn radio(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new("radio").with_name(name).with_value(value)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn kind(&self) -> InputKind {
        InputKind::from_type(&self.input_type)
    }
}

impl InputElement for MemoryInput {
    fn input_type(&self) -> String {
        self.input_type.clone()
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn checked(&self) -> bool {
        self.checked
    }

    fn value(&self) -> String {
        self.value.clone()
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryDocument {
    inputs: Vec<MemoryInput>,
}

impl MemoryDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an input and return its id.
    pub fn push(&mut self, input: MemoryInput) -> InputId {
        self.inputs.push(input);
        self.inputs.len() - 1
    }

    pub fn get(&self, id: InputId) -> Option<&MemoryInput> {
        self.inputs.get(id)
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// First input named `name`.
    pub fn find_named(&self, name: &str) -> Option<InputId> {
        self.inputs.iter().position(|input| input.name == name)
    }

    /// The input named `name` whose value is `value`.
    pub fn find(&self, name: &str, value: &str) -> Option<InputId> {
        self.inputs
            .iter()
            .position(|input| input.name == name && input.value == value)
    }

    /// Type into a text-like input.
    pub fn set_value(&mut self, id: InputId, value: impl Into<String>) -> Option<&MemoryInput> {
        let input = self.inputs.get_mut(id)?;
        input.value = value.into();
        Some(&*input)
    }

    /// Set a checkbox or radio. Checking a named radio unchecks the rest of
    /// its group, as a browser does.
    pub fn set_checked(&mut self, id: InputId, checked: bool) -> Option<&MemoryInput> {
        let (kind, name) = {
            let input = self.inputs.get(id)?;
            (input.kind(), input.name.clone())
        };
        if checked && kind == InputKind::Radio && !name.is_empty() {
            for other in self.inputs.iter_mut() {
                if other.name == name && other.kind() == InputKind::Radio {
                    other.checked = false;
                }
            }
        }
        let input = self.inputs.get_mut(id)?;
        input.checked = checked;
        Some(&*input)
    }

    /// Click an input: checkboxes flip, radios only ever become checked.
    pub fn toggle(&mut self, id: InputId) -> Option<&MemoryInput> {
        let input = self.inputs.get(id)?;
        let checked = input.kind() == InputKind::Radio || !input.checked;
        self.set_checked(id, checked)
    }
}

impl Index<InputId> for MemoryDocument {
    type Output = MemoryInput;

    fn index(&self, id: InputId) -> &MemoryInput {
        &self.inputs[id]
    }
}

impl ElementLookup for MemoryDocument {
    type Element = MemoryInput;

    fn elements_by_name(&self, name: &str) -> Vec<MemoryInput> {
        self.inputs
            .iter()
            .filter(|input| input.name == name)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checking_radio_unchecks_group() {
        let mut doc = MemoryDocument::new();
        let s = doc.push(MemoryInput::radio("size", "S"));
        let m = doc.push(MemoryInput::radio("size", "M"));
        let other = doc.push(MemoryInput::radio("color", "red").with_checked(true));

        doc.set_checked(s, true);
        doc.set_checked(m, true);
        assert!(!doc[s].checked);
        assert!(doc[m].checked);
        assert!(doc[other].checked);
    }

    #[test]
    fn test_toggle_checkbox() {
        let mut doc = MemoryDocument::new();
        let id = doc.push(MemoryInput::checkbox("terms", "yes"));
        assert!(doc.toggle(id).unwrap().checked);
        assert!(!doc.toggle(id).unwrap().checked);
    }

    #[test]
    fn test_toggle_never_unchecks_radio() {
        let mut doc = MemoryDocument::new();
        let s = doc.push(MemoryInput::radio("size", "S"));
        let m = doc.push(MemoryInput::radio("size", "M").with_checked(true));

        assert!(doc.toggle(s).unwrap().checked);
        assert!(doc.toggle(s).unwrap().checked);
        assert!(!doc[m].checked);
    }

    #[test]
    fn test_lookup_keeps_document_order() {
        let mut doc = MemoryDocument::new();
        doc.push(MemoryInput::checkbox("c", "2"));
        doc.push(MemoryInput::text("x"));
        doc.push(MemoryInput::checkbox("c", "1"));
        let values: Vec<String> = doc.elements_by_name("c").into_iter().map(|i| i.value).collect();
        assert_eq!(values, vec!["2", "1"]);
        assert_eq!(doc.find("c", "1"), Some(2));
        assert_eq!(doc.find_named("x"), Some(1));
        assert!(doc.set_value(9, "nope").is_none());
    }
}
