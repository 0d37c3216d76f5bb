//! Error types for form binding.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The field is not declared in the form's scheme.
    #[error("unknown field: {0}")]
    UnknownField(String),

    /// A driver command that is not recognised.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// A driver command missing one of its arguments.
    #[error("missing argument for '{command}': {argument}")]
    MissingArgument { command: String, argument: String },

    /// No input bound to the field carries the requested value.
    #[error("no input for field '{field}' with value '{value}'")]
    UnknownInput { field: String, value: String },

    /// Props must be a JSON object to have form data merged into them.
    #[error("props must be a JSON object, got {0}")]
    PropsNotObject(String),

    /// The form snapshot could not be turned into JSON.
    #[error("failed to serialize form data: {0}")]
    Serialize(String),
}

pub type Result<T, E = FormError> = std::result::Result<T, E>;
