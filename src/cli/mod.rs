//! Command-line interface for the signature toolkit
//!
//! Provides the promptsig commands: listing the built-in catalog, showing a
//! signature with its rendered guidance, checking definition files against
//! the schema rules, and validating bindings.

pub mod commands;
pub mod output;

pub use commands::{PromptSigCli, PromptSigCommands, RoleScope};
pub use output::{OutputFormat, ValidationReport, ViolationOutput};

use crate::error::CliError;
use crate::validate::Violation;

/// CLI exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command completed; any checked binding satisfied its signature
    Success = 0,
    /// The binding broke at least one declared rule
    Violations = 1,
    /// Invalid arguments or unparseable input
    InvalidInput = 3,
    /// File could not be read
    FileError = 4,
    /// The signature definition broke a schema rule
    SchemaError = 5,
    /// Internal error
    InternalError = 10,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl ExitCode {
    /// Derive the exit code from a validation outcome
    pub fn from_validation(violations: &[Violation]) -> Self {
        if violations.is_empty() {
            ExitCode::Success
        } else {
            ExitCode::Violations
        }
    }

    /// Derive the exit code from a command error
    pub fn from_error(error: &CliError) -> Self {
        match error {
            CliError::InvalidInput(_) | CliError::ParseError(_) | CliError::UnknownField(_) => {
                ExitCode::InvalidInput
            }
            CliError::FileError(_) => ExitCode::FileError,
            CliError::Schema(_) => ExitCode::SchemaError,
            CliError::SerializationError(_) => ExitCode::InternalError,
        }
    }
}

/// Run the CLI with the given arguments
pub fn run(cli: PromptSigCli) -> Result<ExitCode, CliError> {
    match cli.command {
        PromptSigCommands::Catalog { format } => {
            commands::execute_catalog(format.unwrap_or_default())
        }

        PromptSigCommands::Show {
            name,
            signature,
            field,
            format,
        } => commands::execute_show(name, signature, field, format.unwrap_or_default()),

        PromptSigCommands::Check { signature, format } => {
            commands::execute_check(signature, format.unwrap_or_default())
        }

        PromptSigCommands::Validate {
            name,
            signature,
            binding,
            role,
            format,
        } => commands::execute_validate(
            name,
            signature,
            binding,
            role.unwrap_or_default(),
            format.unwrap_or_default(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{SchemaError, UnknownFieldError};
    use crate::validate::ViolationRule;

    #[test]
    fn test_exit_code_values() {
        assert_eq!(i32::from(ExitCode::Success), 0);
        assert_eq!(i32::from(ExitCode::Violations), 1);
        assert_eq!(i32::from(ExitCode::InvalidInput), 3);
        assert_eq!(i32::from(ExitCode::FileError), 4);
        assert_eq!(i32::from(ExitCode::SchemaError), 5);
        assert_eq!(i32::from(ExitCode::InternalError), 10);
    }

    #[test]
    fn test_exit_code_from_validation() {
        assert_eq!(ExitCode::from_validation(&[]), ExitCode::Success);

        let violations = vec![Violation::new(
            "question",
            ViolationRule::Presence,
            "missing",
        )];
        assert_eq!(ExitCode::from_validation(&violations), ExitCode::Violations);
    }

    #[test]
    fn test_exit_code_from_error() {
        assert_eq!(
            ExitCode::from_error(&CliError::invalid_input("bad flag")),
            ExitCode::InvalidInput
        );
        assert_eq!(
            ExitCode::from_error(&CliError::parse_error("bad json")),
            ExitCode::InvalidInput
        );
        assert_eq!(
            ExitCode::from_error(&CliError::UnknownField(UnknownFieldError::new(
                "BasicQA",
                "bogus_field"
            ))),
            ExitCode::InvalidInput
        );
        assert_eq!(
            ExitCode::from_error(&CliError::file_error("missing file")),
            ExitCode::FileError
        );
        assert_eq!(
            ExitCode::from_error(&CliError::Schema(SchemaError::NoInputs)),
            ExitCode::SchemaError
        );
        assert_eq!(
            ExitCode::from_error(&CliError::serialization_error("bad output")),
            ExitCode::InternalError
        );
    }
}
