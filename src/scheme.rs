//! Declarative form schemes
//!
//! A scheme lists every field of a form with its default value and the rules
//! that validate it. Schemes are plain data: they are built in code, either
//! directly or by a producer function of the component's external props.

use indexmap::IndexMap;
use std::fmt;
use std::sync::Arc;

use crate::rule::Rule;
use crate::value::FieldValue;

// ============================================================================
// Field Scheme
// ============================================================================

/// Default value and ordered rules for one field.
pub struct FieldScheme<V = FieldValue, E = String> {
    pub value: V,
    pub rules: Vec<Rule<V, E>>,
}

impl<V, E> FieldScheme<V, E> {
    /// A field with no rules.
    pub fn new(value: impl Into<V>) -> Self {
        Self {
            value: value.into(),
            rules: Vec::new(),
        }
    }

    /// Append a rule. Rules are checked in the order they are added.
    pub fn rule(mut self, error: impl Into<E>, predicate: impl Fn(&V) -> bool + Send + Sync + 'static) -> Self {
        self.rules.push(Rule::new(error.into(), predicate));
        self
    }

    /// Replace the rule list.
    pub fn with_rules(mut self, rules: Vec<Rule<V, E>>) -> Self {
        self.rules = rules;
        self
    }
}

impl<V: Clone, E: Clone> Clone for FieldScheme<V, E> {
    fn clone(&self) -> Self {
        Self {
            value: self.value.clone(),
            rules: self.rules.clone(),
        }
    }
}

impl<V: fmt::Debug, E: fmt::Debug> fmt::Debug for FieldScheme<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldScheme")
            .field("value", &self.value)
            .field("rules", &self.rules)
            .finish()
    }
}

// ============================================================================
// Form Scheme
// ============================================================================

/// All fields of one form, in declaration order.
pub struct FormScheme<V = FieldValue, E = String> {
    fields: IndexMap<String, FieldScheme<V, E>>,
}

impl<V, E> FormScheme<V, E> {
    pub fn new() -> Self {
        Self {
            fields: IndexMap::new(),
        }
    }

    /// Declare a field. Declaring the same name twice replaces the earlier
    /// scheme but keeps its position.
    pub fn field(mut self, name: impl Into<String>, scheme: FieldScheme<V, E>) -> Self {
        self.fields.insert(name.into(), scheme);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldScheme<V, E>> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldScheme<V, E>)> {
        self.fields.iter().map(|(name, scheme)| (name.as_str(), scheme))
    }
}

impl<V, E> Default for FormScheme<V, E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone, E: Clone> Clone for FormScheme<V, E> {
    fn clone(&self) -> Self {
        Self {
            fields: self.fields.clone(),
        }
    }
}

impl<V: fmt::Debug, E: fmt::Debug> fmt::Debug for FormScheme<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.fields.iter()).finish()
    }
}

impl<V, E> IntoIterator for FormScheme<V, E> {
    type Item = (String, FieldScheme<V, E>);
    type IntoIter = indexmap::map::IntoIter<String, FieldScheme<V, E>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<N: Into<String>, V, E> FromIterator<(N, FieldScheme<V, E>)> for FormScheme<V, E> {
    fn from_iter<I: IntoIterator<Item = (N, FieldScheme<V, E>)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(name, scheme)| (name.into(), scheme)).collect(),
        }
    }
}

// ============================================================================
// Scheme Source
// ============================================================================

/// Producer of a scheme from external props.
pub type SchemeProducer<P, V, E> = Arc<dyn Fn(&P) -> FormScheme<V, E> + Send + Sync>;

/// Where a bound form gets its scheme from.
pub enum SchemeSource<P, V = FieldValue, E = String> {
    /// A scheme that does not depend on props.
    Fixed(FormScheme<V, E>),
    /// A scheme computed from the props the form is mounted with.
    Producer(SchemeProducer<P, V, E>),
}

impl<P, V: Clone, E: Clone> SchemeSource<P, V, E> {
    /// Produce the scheme for `props`.
    ///
    /// Callers resolve once per mounted instance and keep the result; the
    /// source itself holds no state.
    pub fn resolve(&self, props: &P) -> FormScheme<V, E> {
        match self {
            SchemeSource::Fixed(scheme) => scheme.clone(),
            SchemeSource::Producer(producer) => producer(props),
        }
    }
}

impl<P, V: Clone, E: Clone> Clone for SchemeSource<P, V, E> {
    fn clone(&self) -> Self {
        match self {
            SchemeSource::Fixed(scheme) => SchemeSource::Fixed(scheme.clone()),
            SchemeSource::Producer(producer) => SchemeSource::Producer(Arc::clone(producer)),
        }
    }
}

impl<P, V, E> From<FormScheme<V, E>> for SchemeSource<P, V, E> {
    fn from(scheme: FormScheme<V, E>) -> Self {
        SchemeSource::Fixed(scheme)
    }
}

/// Declare a fixed scheme. Returns it unchanged; exists so call sites read
/// the same whether or not the scheme depends on props.
pub fn create_form_scheme<V, E>(scheme: FormScheme<V, E>) -> FormScheme<V, E> {
    scheme
}

/// Declare a scheme computed from props.
pub fn create_form_scheme_fn<P, V, E>(
    producer: impl Fn(&P) -> FormScheme<V, E> + Send + Sync + 'static,
) -> SchemeSource<P, V, E> {
    SchemeSource::Producer(Arc::new(producer))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Limits {
        max: usize,
    }

    fn login() -> FormScheme {
        FormScheme::new()
            .field("user", FieldScheme::new("").rule("required", |v: &FieldValue| !v.is_truthy()))
            .field("remember", FieldScheme::new(false))
    }

    #[test]
    fn test_declaration_order_is_kept() {
        let scheme = FormScheme::<FieldValue, String>::new()
            .field("zeta", FieldScheme::new(1))
            .field("alpha", FieldScheme::new(2))
            .field("mid", FieldScheme::new(3));
        let names: Vec<&str> = scheme.names().collect();
        assert_eq!(names, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_redeclared_field_replaces_in_place() {
        let scheme = login().field("user", FieldScheme::new("admin"));
        assert_eq!(scheme.len(), 2);
        assert_eq!(scheme.names().next(), Some("user"));
        let user = scheme.get("user").unwrap();
        assert_eq!(user.value.as_str(), Some("admin"));
        assert!(user.rules.is_empty());
    }

    #[test]
    fn test_create_form_scheme_is_identity() {
        let scheme = create_form_scheme(login());
        assert_eq!(scheme.len(), 2);
        assert_eq!(scheme.get("user").unwrap().rules.len(), 1);
    }

    #[test]
    fn test_producer_receives_props() {
        let source = create_form_scheme_fn(|props: &Limits| {
            let max = props.max;
            FormScheme::<FieldValue, String>::new().field(
                "bio",
                FieldScheme::new("").rule("too long", move |v: &FieldValue| {
                    v.as_str().map_or(false, |s| s.len() > max)
                }),
            )
        });

        let scheme = source.resolve(&Limits { max: 3 });
        let bio = scheme.get("bio").unwrap();
        assert!(bio.rules[0].fires(&FieldValue::from("abcd")));
        assert!(!bio.rules[0].fires(&FieldValue::from("abc")));
    }

    #[test]
    fn test_fixed_source_ignores_props() {
        let source: SchemeSource<Limits> = login().into();
        let scheme = source.resolve(&Limits { max: 0 });
        assert_eq!(scheme.len(), 2);
    }
}
