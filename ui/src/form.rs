//! Leptos binding for form schemes
//!
//! `use_form_data` mounts a [`FormBinding`] inside a signal when a component
//! is created and hands back one [`FieldData`] per field: reactive value and
//! error plus a change callback ready for `on:input` / `on:change`.
//! `with_form_data` wraps a component so it receives its props and the form
//! data together, nested as [`FormProps::data`].

use leptos::prelude::*;
use leptos::web_sys;
use miniform::{FieldValue, FormBinding, FormSnapshot, SchemeSource};

use crate::dom::event_value;

// ============================================================================
// Field Data
// ============================================================================

/// Reactive state of one field, as consumed by inputs.
pub struct FieldData<V = FieldValue, E = String>
where
    V: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    pub name: String,
    pub value: Signal<V>,
    pub error: Signal<Option<E>>,
    /// Reads the changed input's value and re-validates the field.
    pub on_change: Callback<web_sys::Event>,
}

impl<V, E> Clone for FieldData<V, E>
where
    V: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            value: self.value,
            error: self.error,
            on_change: self.on_change,
        }
    }
}

// ============================================================================
// Form Data
// ============================================================================

/// All fields of a mounted form.
pub struct FormData<V = FieldValue, E = String>
where
    V: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    binding: RwSignal<FormBinding<V, E>>,
    fields: Vec<FieldData<V, E>>,
}

impl<V, E> Clone for FormData<V, E>
where
    V: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            binding: self.binding,
            fields: self.fields.clone(),
        }
    }
}

impl<V, E> FormData<V, E>
where
    V: Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    pub fn field(&self, name: &str) -> Option<FieldData<V, E>> {
        self.fields.iter().find(|f| f.name == name).cloned()
    }

    /// Fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldData<V, E>> {
        self.fields.iter()
    }

    /// Set a field directly, bypassing the DOM.
    pub fn set(&self, name: &str, value: V) {
        self.binding.update(|binding| {
            if let Err(e) = binding.change(name, value) {
                log::warn!("{}", e);
            }
        });
    }

    /// Whether no field currently reports an error.
    pub fn is_valid(&self) -> Signal<bool> {
        let binding = self.binding;
        Signal::derive(move || binding.with(|b| b.is_valid()))
    }

    pub fn snapshot(&self) -> FormSnapshot<V, E> {
        self.binding.with_untracked(|b| b.snapshot())
    }
}

/// Mount a form for the calling component.
///
/// Components run once, so the scheme is resolved with the props the
/// component was created with and stays fixed for its lifetime.
pub fn use_form_data<P, V, E>(source: &SchemeSource<P, V, E>, props: &P) -> FormData<V, E>
where
    V: From<FieldValue> + Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    let mounted = FormBinding::mount(source, props);
    let defaults: Vec<(String, V)> = mounted
        .state()
        .iter()
        .map(|(name, field)| (name.clone(), field.value.clone()))
        .collect();
    let binding = RwSignal::new(mounted);

    let fields = defaults
        .into_iter()
        .map(|(name, default)| field_data(binding, name, default))
        .collect();

    FormData { binding, fields }
}

fn field_data<V, E>(binding: RwSignal<FormBinding<V, E>>, name: String, default: V) -> FieldData<V, E>
where
    V: From<FieldValue> + Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
{
    let value = {
        let name = name.clone();
        Signal::derive(move || {
            binding.with(|b| {
                b.field(&name)
                    .map(|f| f.value.clone())
                    .unwrap_or_else(|| default.clone())
            })
        })
    };

    let error = {
        let name = name.clone();
        Signal::derive(move || binding.with(|b| b.field(&name).and_then(|f| f.error.clone())))
    };

    let on_change = {
        let name = name.clone();
        Callback::new(move |ev: web_sys::Event| {
            let Some(value) = event_value(&ev) else {
                log::warn!("Ignoring change on '{}': target is not an input", name);
                return;
            };
            log::debug!("Field '{}' changed to {:?}", name, value);
            binding.update(|b| {
                if let Err(e) = b.change(&name, V::from(value)) {
                    log::warn!("{}", e);
                }
            });
        })
    };

    FieldData {
        name,
        value,
        error,
        on_change,
    }
}

// ============================================================================
// Wrapper
// ============================================================================

/// Props handed to a component wrapped by [`with_form_data`].
pub struct FormProps<P, V = FieldValue, E = String>
where
    V: Send + Sync + 'static,
    E: Send + Sync + 'static,
{
    /// The wrapper's own props, passed through untouched.
    pub props: P,
    pub data: FormData<V, E>,
}

/// Wrap `component` so every instance mounts its own form from `source`.
pub fn with_form_data<P, V, E, F, IV>(
    source: impl Into<SchemeSource<P, V, E>>,
    component: F,
) -> impl Fn(P) -> AnyView
where
    V: From<FieldValue> + Clone + Send + Sync + 'static,
    E: Clone + Send + Sync + 'static,
    F: Fn(FormProps<P, V, E>) -> IV,
    IV: IntoView + 'static,
{
    let source = source.into();
    move |props: P| {
        let data = use_form_data(&source, &props);
        component(FormProps { props, data }).into_any()
    }
}
