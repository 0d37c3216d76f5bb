//! Rendering form state into component props
//!
//! A bound component receives its external props plus the form data. Two
//! conventions exist for merging them: spreading every field flat onto the
//! props, or nesting all fields under a single key. Both are supported here
//! for JSON props; the Leptos wrapper always nests.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{FormError, Result};

/// Default key form data is nested under.
pub const DEFAULT_DATA_KEY: &str = "data";

/// Serializable value and error of one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldSnapshot<V, E> {
    pub value: V,
    pub error: Option<E>,
}

/// Serializable state of a whole form, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FormSnapshot<V, E> {
    fields: IndexMap<String, FieldSnapshot<V, E>>,
}

impl<V, E> FormSnapshot<V, E> {
    pub fn get(&self, name: &str) -> Option<&FieldSnapshot<V, E>> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<V, E> FromIterator<(String, FieldSnapshot<V, E>)> for FormSnapshot<V, E> {
    fn from_iter<I: IntoIterator<Item = (String, FieldSnapshot<V, E>)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

/// How form data is merged into a component's props.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "convention", rename_all = "lowercase")]
pub enum PropsConvention {
    /// Every field becomes a top-level prop; fields override props of the
    /// same name.
    Flat,
    /// All fields live under one prop.
    Nested { key: String },
}

impl Default for PropsConvention {
    fn default() -> Self {
        PropsConvention::Nested {
            key: DEFAULT_DATA_KEY.to_string(),
        }
    }
}

/// Merge `snapshot` into `props` following `convention`.
pub fn render_props<V: Serialize, E: Serialize>(
    props: Value,
    snapshot: &FormSnapshot<V, E>,
    convention: &PropsConvention,
) -> Result<Value> {
    let mut merged = match props {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => return Err(FormError::PropsNotObject(json_kind(&other).to_string())),
    };

    let data = serde_json::to_value(snapshot).map_err(|e| FormError::Serialize(e.to_string()))?;
    match convention {
        PropsConvention::Flat => {
            if let Value::Object(fields) = data {
                merged.extend(fields);
            }
        }
        PropsConvention::Nested { key } => {
            merged.insert(key.clone(), data);
        }
    }

    Ok(Value::Object(merged))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
