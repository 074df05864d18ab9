//! Error types for the prompt-signatures toolkit
//!
//! Structural problems in a signature definition are fatal at definition
//! time (`SchemaError`). Referencing a field the signature never declared is
//! a programmer error (`UnknownFieldError`). Data-quality findings are not
//! errors at all; they are returned as [`Violation`](crate::Violation)
//! records by the validation calls.

use thiserror::Error;

/// A signature definition is malformed.
///
/// Raised by [`Signature::define`](crate::Signature::define) and by the
/// builder before any signature value exists. Never recovered automatically.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The signature name is empty
    #[error("Signature name must not be empty")]
    EmptyName,

    /// A field was declared with an empty name
    #[error("Field name must not be empty")]
    EmptyFieldName,

    /// Two fields share one name; inputs and outputs share a namespace
    #[error("Duplicate field name '{name}'")]
    DuplicateField { name: String },

    /// The field list contains no input fields
    #[error("Signature declares no input fields")]
    NoInputs,

    /// The field list contains no output fields
    #[error("Signature declares no output fields")]
    NoOutputs,

    /// An enumeration field lists no allowed values
    #[error("Enumeration field '{field}' declares no allowed values")]
    EmptyEnumeration { field: String },

    /// An enumeration field lists the same allowed value twice
    #[error("Enumeration field '{field}' repeats allowed value '{value}'")]
    DuplicateEnumValue { field: String, value: String },

    /// Declared length bounds cannot be satisfied by any value
    #[error("Field '{field}' declares conflicting length bounds: min {min} exceeds max {max}")]
    ConflictingLengthBounds {
        field: String,
        min: usize,
        max: usize,
    },
}

/// A field name was used that the signature does not declare.
///
/// Signals a programmer error (or a binding produced against the wrong
/// signature); propagated to the caller unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown field '{field}': not declared by signature '{signature}'")]
pub struct UnknownFieldError {
    /// Name of the signature that was consulted
    pub signature: String,
    /// The undeclared field name
    pub field: String,
}

impl UnknownFieldError {
    /// Create an unknown-field error
    pub fn new(signature: impl Into<String>, field: impl Into<String>) -> Self {
        UnknownFieldError {
            signature: signature.into(),
            field: field.into(),
        }
    }
}

/// Error type for the `promptsig` binary surface.
///
/// Core library calls never return this; it wraps file access, per-format
/// parsing, and the core errors for exit-code mapping.
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid invocation or input data
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File access or I/O error
    #[error("File error: {0}")]
    FileError(String),

    /// Signature or binding file parsing error
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Output serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The loaded signature definition is malformed
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A field name was used that the signature does not declare
    #[error(transparent)]
    UnknownField(#[from] UnknownFieldError),
}

impl CliError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        CliError::InvalidInput(msg.into())
    }

    /// Create a file error
    pub fn file_error(msg: impl Into<String>) -> Self {
        CliError::FileError(msg.into())
    }

    /// Create a parse error
    pub fn parse_error(msg: impl Into<String>) -> Self {
        CliError::ParseError(msg.into())
    }

    /// Create a serialization error
    pub fn serialization_error(msg: impl Into<String>) -> Self {
        CliError::SerializationError(msg.into())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::FileError(err.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::ParseError(format!("JSON error: {}", err))
    }
}

impl From<serde_yaml::Error> for CliError {
    fn from(err: serde_yaml::Error) -> Self {
        CliError::ParseError(format!("YAML error: {}", err))
    }
}

impl From<toml::de::Error> for CliError {
    fn from(err: toml::de::Error) -> Self {
        CliError::ParseError(format!("TOML error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_display() {
        let err = SchemaError::DuplicateField {
            name: "question".to_string(),
        };
        assert_eq!(err.to_string(), "Duplicate field name 'question'");

        let err = SchemaError::ConflictingLengthBounds {
            field: "answer".to_string(),
            min: 50,
            max: 10,
        };
        assert_eq!(
            err.to_string(),
            "Field 'answer' declares conflicting length bounds: min 50 exceeds max 10"
        );
    }

    #[test]
    fn test_unknown_field_display() {
        let err = UnknownFieldError::new("BasicQA", "bogus_field");
        assert_eq!(
            err.to_string(),
            "Unknown field 'bogus_field': not declared by signature 'BasicQA'"
        );
    }

    #[test]
    fn test_cli_error_constructors() {
        let err = CliError::invalid_input("test");
        assert!(matches!(err, CliError::InvalidInput(_)));

        let err = CliError::file_error("test");
        assert!(matches!(err, CliError::FileError(_)));

        let err = CliError::parse_error("test");
        assert!(matches!(err, CliError::ParseError(_)));
    }

    #[test]
    fn test_cli_error_wraps_core_errors() {
        let err: CliError = SchemaError::NoInputs.into();
        assert_eq!(err.to_string(), "Signature declares no input fields");

        let err: CliError = UnknownFieldError::new("BasicQA", "oops").into();
        assert!(matches!(err, CliError::UnknownField(_)));
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.yaml");
        let err: CliError = io.into();
        assert!(matches!(err, CliError::FileError(_)));
    }
}
