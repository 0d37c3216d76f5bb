//! Validation rules
//!
//! A rule pairs an error value with a predicate. The rule fires when the
//! predicate returns `true` for a candidate value, and the field then reports
//! that error.

use std::fmt;
use std::sync::Arc;

use crate::value::FieldValue;

/// Shared predicate over a candidate value.
pub type Predicate<V> = Arc<dyn Fn(&V) -> bool + Send + Sync>;

/// One validation condition for a field.
pub struct Rule<V = FieldValue, E = String> {
    error: E,
    predicate: Predicate<V>,
}

impl<V, E> Rule<V, E> {
    pub fn new(error: E, predicate: impl Fn(&V) -> bool + Send + Sync + 'static) -> Self {
        Self {
            error,
            predicate: Arc::new(predicate),
        }
    }

    /// The error reported when this rule fires.
    pub fn error(&self) -> &E {
        &self.error
    }

    /// Whether the rule fires for `value`.
    pub fn fires(&self, value: &V) -> bool {
        (self.predicate)(value)
    }
}

impl<V, E: Clone> Clone for Rule<V, E> {
    fn clone(&self) -> Self {
        Self {
            error: self.error.clone(),
            predicate: Arc::clone(&self.predicate),
        }
    }
}

impl<V, E: fmt::Debug> fmt::Debug for Rule<V, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("error", &self.error)
            .finish_non_exhaustive()
    }
}

/// Returns the error of the first rule that fires for `value`.
///
/// Rules are scanned in declaration order and the scan stops at the first
/// match, so an earlier, broader rule shadows a later, more specific one.
pub fn first_failure<'a, V, E>(rules: &'a [Rule<V, E>], value: &V) -> Option<&'a E> {
    rules.iter().find(|rule| rule.fires(value)).map(Rule::error)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> Vec<Rule<i32, &'static str>> {
        vec![
            Rule::new("negative", |v: &i32| *v < 0),
            Rule::new("small", |v: &i32| *v < 10),
            Rule::new("odd", |v: &i32| v % 2 != 0),
        ]
    }

    #[test]
    fn test_no_rules_never_fail() {
        let empty: Vec<Rule<i32, &str>> = vec![];
        assert_eq!(first_failure(&empty, &-5), None);
    }

    #[test]
    fn test_first_declared_rule_wins() {
        let rules = rules();
        // -3 matches all three rules
        assert_eq!(first_failure(&rules, &-3), Some(&"negative"));
        assert_eq!(first_failure(&rules, &3), Some(&"small"));
        assert_eq!(first_failure(&rules, &13), Some(&"odd"));
        assert_eq!(first_failure(&rules, &12), None);
    }

    #[test]
    fn test_validation_is_repeatable() {
        let rules = rules();
        let first = first_failure(&rules, &5).copied();
        let second = first_failure(&rules, &5).copied();
        assert_eq!(first, second);
    }

    #[test]
    fn test_clone_shares_predicate() {
        let rule = Rule::new("empty".to_string(), |v: &String| v.is_empty());
        let cloned = rule.clone();
        assert!(cloned.fires(&String::new()));
        assert_eq!(cloned.error(), "empty");
    }
}
