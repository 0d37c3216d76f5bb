//! Headless form driver
//!
//! Runs a bound form against an in-memory document. Each command mutates the
//! document the way a user would, then dispatches a change event for the
//! touched input: its value is extracted exactly as in a browser and handed
//! to [`FormBinding::change`].
//!
//! Commands, one per line:
//!
//! ```text
//! set <field> <text...>     type into the field's first input
//! check <field> <value>     check the input with that value
//! uncheck <field> <value>   uncheck the input with that value
//! select <field> <value>    pick a radio option
//! toggle <field>            flip the field's first input
//! show                      no change
//! ```

use indexmap::IndexMap;
use tracing::debug;

use crate::dom::memory::{InputId, MemoryDocument, MemoryInput};
use crate::dom::extract_value;
use crate::error::{FormError, Result};
use crate::form::FormBinding;
use crate::scheme::{create_form_scheme_fn, FieldScheme, FormScheme, SchemeSource};
use crate::value::FieldValue;

// ============================================================================
// Commands
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set { field: String, text: String },
    Check { field: String, value: String },
    Uncheck { field: String, value: String },
    Select { field: String, value: String },
    Toggle { field: String },
    Show,
}

impl Command {
    /// Parse one line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim_start();
        let (field, arg) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        let arg = arg.trim();

        let require = |value: &str, argument: &str| -> Result<String> {
            if value.is_empty() {
                Err(FormError::MissingArgument {
                    command: verb.to_string(),
                    argument: argument.to_string(),
                })
            } else {
                Ok(value.to_string())
            }
        };

        let command = match verb {
            "show" => Command::Show,
            // Setting an empty string is a legitimate edit.
            "set" => Command::Set {
                field: require(field, "field")?,
                text: arg.to_string(),
            },
            "check" => Command::Check {
                field: require(field, "field")?,
                value: require(arg, "value")?,
            },
            "uncheck" => Command::Uncheck {
                field: require(field, "field")?,
                value: require(arg, "value")?,
            },
            "select" => Command::Select {
                field: require(field, "field")?,
                value: require(arg, "value")?,
            },
            "toggle" => Command::Toggle {
                field: require(field, "field")?,
            },
            other => return Err(FormError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }
}

// ============================================================================
// Headless Form
// ============================================================================

/// A form binding wired to inputs of an in-memory document.
pub struct HeadlessForm {
    binding: FormBinding,
    document: MemoryDocument,
    inputs: IndexMap<String, Vec<InputId>>,
}

impl HeadlessForm {
    pub fn new(binding: FormBinding) -> Self {
        Self {
            binding,
            document: MemoryDocument::new(),
            inputs: IndexMap::new(),
        }
    }

    /// Add `input` to the document as a control for `field`.
    pub fn attach(&mut self, field: &str, input: MemoryInput) -> Result<InputId> {
        if self.binding.field(field).is_none() {
            return Err(FormError::UnknownField(field.to_string()));
        }
        let id = self.document.push(input);
        self.inputs.entry(field.to_string()).or_default().push(id);
        Ok(id)
    }

    pub fn binding(&self) -> &FormBinding {
        &self.binding
    }

    pub fn document(&self) -> &MemoryDocument {
        &self.document
    }

    /// Parse and apply one line. Returns whether a command ran.
    pub fn run_line(&mut self, line: &str) -> Result<bool> {
        match Command::parse(line)? {
            Some(command) => {
                self.apply(&command)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub fn apply(&mut self, command: &Command) -> Result<()> {
        debug!(?command, "Applying command");
        let (field, id) = match command {
            Command::Show => return Ok(()),
            Command::Set { field, text } => {
                let id = self.first_input(field)?;
                self.document.set_value(id, text.as_str());
                (field, id)
            }
            Command::Check { field, value } | Command::Select { field, value } => {
                let id = self.input_with_value(field, value)?;
                self.document.set_checked(id, true);
                (field, id)
            }
            Command::Uncheck { field, value } => {
                let id = self.input_with_value(field, value)?;
                self.document.set_checked(id, false);
                (field, id)
            }
            Command::Toggle { field } => {
                let id = self.first_input(field)?;
                self.document.toggle(id);
                (field, id)
            }
        };
        self.dispatch(field, id)
    }

    /// Fire a change event for input `id` on behalf of `field`.
    pub fn dispatch(&mut self, field: &str, id: InputId) -> Result<()> {
        let value = match self.document.get(id) {
            Some(input) => extract_value(input, &self.document),
            None => return Err(FormError::UnknownInput {
                field: field.to_string(),
                value: id.to_string(),
            }),
        };
        self.binding.change(field, value)?;
        Ok(())
    }

    fn first_input(&self, field: &str) -> Result<InputId> {
        self.inputs
            .get(field)
            .and_then(|ids| ids.first().copied())
            .ok_or_else(|| FormError::UnknownField(field.to_string()))
    }

    fn input_with_value(&self, field: &str, value: &str) -> Result<InputId> {
        let ids = self
            .inputs
            .get(field)
            .ok_or_else(|| FormError::UnknownField(field.to_string()))?;
        ids.iter()
            .copied()
            .find(|id| self.document[*id].value == value)
            .ok_or_else(|| FormError::UnknownInput {
                field: field.to_string(),
                value: value.to_string(),
            })
    }
}

// ============================================================================
// Signup Demo
// ============================================================================

/// External props of the demo signup form.
#[derive(Debug, Clone, PartialEq)]
pub struct SignupProps {
    pub min_age: f64,
}

impl Default for SignupProps {
    fn default() -> Self {
        Self { min_age: 18.0 }
    }
}

pub const SIGNUP_COLORS: [&str; 4] = ["red", "green", "blue", "yellow"];
pub const SIGNUP_SIZES: [&str; 3] = ["S", "M", "L"];

/// Scheme of the demo signup form.
pub fn signup_scheme() -> SchemeSource<SignupProps> {
    create_form_scheme_fn(|props: &SignupProps| {
        let min_age = props.min_age;
        FormScheme::new()
            .field(
                "name",
                FieldScheme::new("")
                    .rule("Name is required", |v: &FieldValue| !v.is_truthy())
                    .rule("Name is too long", |v: &FieldValue| {
                        v.as_str().map_or(false, |s| s.chars().count() > 40)
                    }),
            )
            .field(
                "age",
                FieldScheme::new(0)
                    .rule("Age must be a number", |v: &FieldValue| v.as_f64().is_none())
                    .rule(format!("Must be at least {}", min_age), move |v: &FieldValue| {
                        v.as_f64().map_or(false, |n| n < min_age)
                    }),
            )
            .field(
                "colors",
                FieldScheme::new(FieldValue::List(Vec::new())).rule(
                    "Pick at least one color",
                    |v: &FieldValue| v.as_list().map_or(true, |items| items.is_empty()),
                ),
            )
            .field(
                "size",
                FieldScheme::new(FieldValue::Absent).rule("Pick a size", FieldValue::is_absent),
            )
            .field(
                "terms",
                FieldScheme::new(false)
                    .rule("You must accept the terms", |v: &FieldValue| !v.is_truthy()),
            )
    })
}

/// The demo signup form, mounted with `props` and wired to its inputs.
pub fn signup(props: &SignupProps) -> Result<HeadlessForm> {
    let mut form = HeadlessForm::new(FormBinding::mount(&signup_scheme(), props));
    form.attach("name", MemoryInput::text("name"))?;
    form.attach("age", MemoryInput::new("number").with_name("age").with_value("0"))?;
    for color in SIGNUP_COLORS {
        form.attach("colors", MemoryInput::checkbox("colors", color))?;
    }
    for size in SIGNUP_SIZES {
        form.attach("size", MemoryInput::radio("size", size))?;
    }
    // Unnamed, so it reports a plain boolean.
    form.attach("terms", MemoryInput::new("checkbox").with_value("on"))?;
    Ok(form)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("  # comment").unwrap(), None);
        assert_eq!(Command::parse("").unwrap(), None);
        assert_eq!(Command::parse("show").unwrap(), Some(Command::Show));
        assert_eq!(
            Command::parse("set name  Ada Lovelace ").unwrap(),
            Some(Command::Set {
                field: "name".to_string(),
                text: "Ada Lovelace".to_string(),
            })
        );
        assert_eq!(
            Command::parse("set name").unwrap(),
            Some(Command::Set {
                field: "name".to_string(),
                text: String::new(),
            })
        );
        assert_eq!(
            Command::parse("select size M").unwrap(),
            Some(Command::Select {
                field: "size".to_string(),
                value: "M".to_string(),
            })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            Command::parse("check colors"),
            Err(FormError::MissingArgument { .. })
        ));
        assert!(matches!(Command::parse("toggle"), Err(FormError::MissingArgument { .. })));
        assert_eq!(
            Command::parse("submit now"),
            Err(FormError::UnknownCommand("submit".to_string()))
        );
    }

    #[test]
    fn test_signup_initial_state() {
        let form = signup(&SignupProps::default()).unwrap();
        let binding = form.binding();
        assert_eq!(binding.names().collect::<Vec<_>>(), vec!["name", "age", "colors", "size", "terms"]);
        assert_eq!(binding.errors().count(), 5);
        assert_eq!(form.document().len(), 2 + SIGNUP_COLORS.len() + SIGNUP_SIZES.len() + 1);
    }

    #[test]
    fn test_signup_session() {
        let mut form = signup(&SignupProps::default()).unwrap();
        for line in [
            "set name Ada",
            "set age 36",
            "check colors blue",
            "check colors red",
            "select size M",
            "toggle terms",
        ] {
            assert!(form.run_line(line).unwrap());
        }

        let binding = form.binding();
        assert!(binding.is_valid());
        assert_eq!(
            binding.field("colors").unwrap().value,
            FieldValue::List(vec!["red".to_string(), "blue".to_string()])
        );
        assert_eq!(binding.field("size").unwrap().value, FieldValue::from("M"));
        assert_eq!(binding.field("terms").unwrap().value, FieldValue::Bool(true));
    }

    #[test]
    fn test_unknown_input_value() {
        let mut form = signup(&SignupProps::default()).unwrap();
        assert_eq!(
            form.run_line("select size XL"),
            Err(FormError::UnknownInput {
                field: "size".to_string(),
                value: "XL".to_string(),
            })
        );
        assert!(matches!(form.run_line("set email x"), Err(FormError::UnknownField(_))));
    }

    #[test]
    fn test_toggle_keeps_radio_selected() {
        let mut form = signup(&SignupProps::default()).unwrap();
        form.run_line("toggle size").unwrap();
        form.run_line("toggle size").unwrap();
        assert_eq!(form.binding().field("size").unwrap().value, FieldValue::from("S"));
    }

    #[test]
    fn test_attach_rejects_unknown_field() {
        let mut form = signup(&SignupProps::default()).unwrap();
        assert!(form.attach("email", MemoryInput::text("email")).is_err());
    }
}
