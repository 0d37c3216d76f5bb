//! Form binding state
//!
//! `FormBinding` is the per-instance state a bound component owns. It is
//! built once when the component mounts: the scheme is resolved, its rules
//! are frozen, and every field is validated against its default value. From
//! then on the only way to mutate it is [`FormBinding::change`], which
//! re-validates the changed field and leaves every other field untouched.

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

use crate::error::{FormError, Result};
use crate::rule::{first_failure, Rule};
use crate::scheme::{FormScheme, SchemeSource};
use crate::snapshot::{FieldSnapshot, FormSnapshot};
use crate::value::FieldValue;

// ============================================================================
// Field State
// ============================================================================

/// Current value and error of one field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldState<V = FieldValue, E = String> {
    pub value: V,
    pub error: Option<E>,
}

impl<V, E> FieldState<V, E> {
    pub fn is_valid(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-field state in declaration order.
pub type FormState<V = FieldValue, E = String> = IndexMap<String, FieldState<V, E>>;

// ============================================================================
// Change Handler
// ============================================================================

/// A change handler bound to one field name.
///
/// Handlers are created once per field at mount and can be cloned freely;
/// every clone dispatches to the same field.
pub struct ChangeHandler<V = FieldValue, E = String> {
    field: Arc<str>,
    apply: Arc<dyn Fn(&mut FormBinding<V, E>, V) -> Result<()> + Send + Sync>,
}

impl<V, E> ChangeHandler<V, E> {
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Apply a new value to the handler's field.
    pub fn call(&self, binding: &mut FormBinding<V, E>, value: V) -> Result<()> {
        (self.apply)(binding, value)
    }
}

impl<V, E> Clone for ChangeHandler<V, E> {
    fn clone(&self) -> Self {
        Self {
            field: Arc::clone(&self.field),
            apply: Arc::clone(&self.apply),
        }
    }
}

impl<V, E> fmt::Debug for ChangeHandler<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeHandler").field("field", &self.field).finish()
    }
}

// ============================================================================
// Form Binding
// ============================================================================

/// Frozen rules plus live state for one mounted form.
pub struct FormBinding<V = FieldValue, E = String> {
    rules: IndexMap<String, Vec<Rule<V, E>>>,
    state: FormState<V, E>,
}

impl<V: Clone, E: Clone> FormBinding<V, E> {
    /// Mount a form: resolve `source` against `props` and validate defaults.
    ///
    /// The scheme is resolved exactly once here. Props passed to later calls
    /// never reach the producer again.
    pub fn mount<P>(source: &SchemeSource<P, V, E>, props: &P) -> Self {
        Self::from_scheme(source.resolve(props))
    }

    /// Bind an already resolved scheme.
    pub fn from_scheme(scheme: FormScheme<V, E>) -> Self {
        let mut rules = IndexMap::with_capacity(scheme.len());
        let mut defaults = Vec::with_capacity(scheme.len());
        for (name, field) in scheme {
            defaults.push((name.clone(), field.value));
            rules.insert(name, field.rules);
        }

        let mut binding = Self {
            rules,
            state: IndexMap::with_capacity(defaults.len()),
        };
        for (name, value) in defaults {
            let error = binding.check(&name, &value);
            binding.state.insert(name, FieldState { value, error });
        }

        debug!(fields = binding.state.len(), "Mounted form binding");
        binding
    }

    /// Error of the first rule of `field` that fires for `value`.
    ///
    /// Validation has no side effects: the same field and value always
    /// produce the same result.
    pub fn validate(&self, field: &str, value: &V) -> Result<Option<E>> {
        if !self.rules.contains_key(field) {
            return Err(FormError::UnknownField(field.to_string()));
        }
        Ok(self.check(field, value))
    }

    /// Set `field` to `value`, re-validating it. Other fields keep their
    /// value and error as they were.
    pub fn change(&mut self, field: &str, value: V) -> Result<&FieldState<V, E>> {
        let error = self.validate(field, &value)?;
        debug!(field, valid = error.is_none(), "Field changed");

        let entry = self
            .state
            .get_mut(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?;
        entry.value = value;
        entry.error = error;
        Ok(&*entry)
    }

    /// A change handler bound to `field`.
    pub fn handler(&self, field: &str) -> Result<ChangeHandler<V, E>>
    where
        V: 'static,
        E: 'static,
    {
        if !self.state.contains_key(field) {
            return Err(FormError::UnknownField(field.to_string()));
        }
        let name: Arc<str> = Arc::from(field);
        let target = Arc::clone(&name);
        Ok(ChangeHandler {
            field: name,
            apply: Arc::new(move |binding: &mut FormBinding<V, E>, value: V| {
                binding.change(&target, value).map(|_| ())
            }),
        })
    }

    /// One handler per field, in declaration order.
    pub fn handlers(&self) -> Vec<ChangeHandler<V, E>>
    where
        V: 'static,
        E: 'static,
    {
        self.state
            .keys()
            .filter_map(|name| self.handler(name).ok())
            .collect()
    }

    pub fn field(&self, name: &str) -> Option<&FieldState<V, E>> {
        self.state.get(name)
    }

    pub fn state(&self) -> &FormState<V, E> {
        &self.state
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.state.keys().map(String::as_str)
    }

    /// Whether no field currently reports an error.
    pub fn is_valid(&self) -> bool {
        self.state.values().all(FieldState::is_valid)
    }

    /// Fields that currently report an error, in declaration order.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &E)> {
        self.state
            .iter()
            .filter_map(|(name, field)| field.error.as_ref().map(|e| (name.as_str(), e)))
    }

    pub fn snapshot(&self) -> FormSnapshot<V, E> {
        self.state
            .iter()
            .map(|(name, field)| {
                (
                    name.clone(),
                    FieldSnapshot {
                        value: field.value.clone(),
                        error: field.error.clone(),
                    },
                )
            })
            .collect()
    }

    fn check(&self, field: &str, value: &V) -> Option<E> {
        let rules = self.rules.get(field).map(Vec::as_slice).unwrap_or(&[]);
        let error = first_failure(rules, value).cloned();
        trace!(field, rules = rules.len(), failed = error.is_some(), "Validated field");
        error
    }
}

impl<V: Clone, E: Clone> Clone for FormBinding<V, E> {
    fn clone(&self) -> Self {
        Self {
            rules: self.rules.clone(),
            state: self.state.clone(),
        }
    }
}

impl<V: fmt::Debug, E: fmt::Debug> fmt::Debug for FormBinding<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormBinding").field("state", &self.state).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::{create_form_scheme_fn, FieldScheme};

    fn age_scheme() -> FormScheme {
        FormScheme::new()
            .field(
                "age",
                FieldScheme::new(0).rule("too young", |v: &FieldValue| {
                    v.as_f64().map_or(false, |n| n < 18.0)
                }),
            )
            .field("nickname", FieldScheme::new(""))
    }

    #[test]
    fn test_defaults_are_validated_on_mount() {
        let binding = FormBinding::from_scheme(age_scheme());
        let age = binding.field("age").unwrap();
        assert_eq!(age.value, FieldValue::from(0));
        assert_eq!(age.error.as_deref(), Some("too young"));

        let nickname = binding.field("nickname").unwrap();
        assert!(nickname.error.is_none());
        assert!(!binding.is_valid());
    }

    #[test]
    fn test_change_revalidates_field() {
        let mut binding = FormBinding::from_scheme(age_scheme());
        let age = binding.change("age", FieldValue::from("25")).unwrap();
        assert_eq!(age.value, FieldValue::from("25"));
        assert!(age.error.is_none());
        assert!(binding.is_valid());

        binding.change("age", FieldValue::from(12)).unwrap();
        assert_eq!(binding.field("age").unwrap().error.as_deref(), Some("too young"));
    }

    #[test]
    fn test_change_leaves_other_fields_untouched() {
        let mut binding = FormBinding::from_scheme(age_scheme());
        binding.change("nickname", FieldValue::from("kit")).unwrap();
        let before = binding.field("nickname").cloned();

        binding.change("age", FieldValue::from(40)).unwrap();
        assert_eq!(binding.field("nickname").cloned(), before);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut binding = FormBinding::from_scheme(age_scheme());
        assert_eq!(
            binding.change("email", FieldValue::from("a@b")).unwrap_err(),
            FormError::UnknownField("email".to_string())
        );
        assert!(binding.validate("email", &FieldValue::Absent).is_err());
        assert!(binding.handler("email").is_err());
        assert_eq!(binding.state().len(), 2);
    }

    #[test]
    fn test_handler_dispatches_to_its_field() {
        let mut binding = FormBinding::from_scheme(age_scheme());
        let handlers = binding.handlers();
        assert_eq!(handlers.len(), 2);
        assert_eq!(handlers[0].field(), "age");

        let on_age = handlers[0].clone();
        on_age.call(&mut binding, FieldValue::from(30)).unwrap();
        assert_eq!(binding.field("age").unwrap().value, FieldValue::from(30));
        assert!(binding.field("age").unwrap().is_valid());
    }

    #[test]
    fn test_errors_lists_failing_fields() {
        let binding = FormBinding::from_scheme(age_scheme());
        let errors: Vec<(&str, &String)> = binding.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].0, "age");
    }

    #[test]
    fn test_mount_resolves_producer_with_props() {
        let source = create_form_scheme_fn(|min: &f64| {
            let min = *min;
            FormScheme::<FieldValue, String>::new().field(
                "qty",
                FieldScheme::new(1).rule("below minimum", move |v: &FieldValue| {
                    v.as_f64().map_or(true, |n| n < min)
                }),
            )
        });
        let binding = FormBinding::mount(&source, &5.0);
        assert_eq!(binding.field("qty").unwrap().error.as_deref(), Some("below minimum"));
    }
}
