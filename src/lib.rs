//! # miniform - declarative form state
//!
//! miniform binds a declarative form scheme to component state. A scheme
//! names each field with a default value and an ordered list of rules; the
//! bound form keeps a current value and error per field and re-validates a
//! field every time it changes.
//!
//! ## Quick Start
//!
//! ```rust
//! use miniform::{FieldScheme, FieldValue, FormBinding, FormScheme};
//!
//! let scheme = FormScheme::new().field(
//!     "age",
//!     FieldScheme::new(0).rule("too young", |v: &FieldValue| {
//!         v.as_f64().map_or(false, |n| n < 18.0)
//!     }),
//! );
//!
//! let mut form: FormBinding = FormBinding::from_scheme(scheme);
//! assert_eq!(form.field("age").unwrap().error.as_deref(), Some("too young"));
//!
//! form.change("age", FieldValue::from("25")).unwrap();
//! assert!(form.field("age").unwrap().error.is_none());
//! ```
//!
//! ## Architecture
//!
//! - **Rules & schemes**: [`Rule`], [`FieldScheme`], [`FormScheme`], [`SchemeSource`]
//! - **Binding**: [`FormBinding`], the owned per-instance state
//! - **DOM**: [`dom::extract_value`] over an abstract element model
//! - **Rendering**: [`snapshot::render_props`] merges form data into props
//! - **Driver**: [`driver::HeadlessForm`] runs a form without a browser
//!
//! The Leptos binding lives in the `miniform-ui` crate.

pub mod cli;
pub mod config;
pub mod dom;
pub mod driver;
pub mod error;
pub mod form;
pub mod rule;
pub mod scheme;
pub mod snapshot;
pub mod value;

pub use error::FormError;
pub use form::{ChangeHandler, FieldState, FormBinding, FormState};
pub use rule::Rule;
pub use scheme::{create_form_scheme, create_form_scheme_fn, FieldScheme, FormScheme, SchemeSource};
pub use snapshot::{FormSnapshot, PropsConvention};
pub use value::FieldValue;
