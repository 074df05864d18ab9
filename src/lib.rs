//! Prompt Signatures
//!
//! A declaration-first toolkit for language-model task contracts. A
//! signature names a task and declares its input and output fields up front,
//! with types, constraints, and guidance; the library renders that
//! declaration into a plain-text briefing and validates runtime bindings
//! against it.
//!
//! ## Features
//!
//! - **Typed Signatures**: Named contracts with ordered input and output fields
//! - **Field Constraints**: Enumerated values, enforced length bounds, and advisory format hints
//! - **Guidance Rendering**: Deterministic plain-text briefings for models and reviewers
//! - **Binding Validation**: Presence, membership, and length checks with structured violations
//! - **Built-in Catalog**: Worked signatures at three quality tiers, from bare names to production-grade
//! - **CLI Support**: catalog, show, check, and validate commands with machine-readable output
//! - **File Formats**: Signature and binding files in JSON, YAML, or TOML
//!
//! ## Architecture
//!
//! The toolkit follows a declaration-first, immutable-contract design:
//!
//! 1. **CLI** (`cli/`): Command-line interface for listing, showing, checking,
//!    and validating with table, JSON, and YAML output.
//!
//! 2. **Signature** (`signature`): The declaration model: signatures, field
//!    specs, roles, value types, and constraints.
//!
//! 3. **Binding** (`binding`): Flat name-to-value maps produced or consumed
//!    when a signature is exercised.
//!
//! 4. **Validation** (`validate`): Checks a binding against a signature and
//!    reports violations without mutating either.
//!
//! 5. **Catalog** (`catalog`): Built-in example signatures used by the CLI,
//!    the walkthrough, and the tests.
//!
//! 6. **Errors** (`error`): Schema errors, unknown-field errors, and the CLI
//!    error type with exit-code mapping.
//!
//! ## CLI Usage
//!
//! ```bash
//! # List the built-in signature catalog
//! promptsig catalog
//!
//! # Show a signature and its rendered guidance
//! promptsig show --name production-qa
//!
//! # Check a signature definition file against the schema rules
//! promptsig check --signature signature.yaml
//!
//! # Validate a binding against a signature
//! promptsig validate --name production-qa --binding binding.json
//! ```
//!
//! ## Example
//!
//! ```rust
//! use prompt_signatures::{Binding, FieldSpec, Signature};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Declare the contract: one input, one output
//!     let signature = Signature::define(
//!         "BasicQA",
//!         "Answer questions with short factoid answers.",
//!         vec![
//!             FieldSpec::input("question"),
//!             FieldSpec::output("answer"),
//!         ],
//!     )?;
//!
//!     // Render the briefing a model would receive
//!     let guidance = signature.render_guidance();
//!     assert!(guidance.contains("- question (text)"));
//!
//!     // Validate a runtime binding against the contract
//!     let binding = Binding::new()
//!         .set("question", "What is the capital of France?")
//!         .set("answer", "Paris");
//!     let violations = signature.validate_binding(&binding)?;
//!     assert!(violations.is_empty());
//!     Ok(())
//! }
//! ```

// Core modules
pub mod binding;
pub mod catalog;
pub mod cli;
pub mod error;
pub mod signature;
pub mod validate;

// Guidance rendering lives in its own module but surfaces as Signature methods
mod render;

// Re-export the declaration model
pub use signature::{
    FieldConstraint, FieldSpec, LengthBounds, LengthCheck, Role, Signature, SignatureBuilder,
    SignatureDef, ValueType,
};

// Re-export binding and validation types
pub use binding::Binding;
pub use validate::{Violation, ViolationRule};

// Re-export the built-in catalog
pub use catalog::{CatalogEntry, Tier};

// Re-export error types
pub use error::{CliError, SchemaError, UnknownFieldError};

// Re-export CLI types for command-line usage
pub use cli::{ExitCode, OutputFormat, PromptSigCli, PromptSigCommands, RoleScope};

/// Toolkit version (from Cargo.toml)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Run the CLI application
///
/// This is the main entry point for the promptsig binary.
///
/// # Example
///
/// ```rust,no_run
/// use clap::Parser;
/// use prompt_signatures::{run_cli, PromptSigCli};
///
/// fn main() {
///     let cli = PromptSigCli::parse();
///     let exit_code = run_cli(cli);
///     std::process::exit(exit_code.into());
/// }
/// ```
pub fn run_cli(cli: PromptSigCli) -> ExitCode {
    match cli::run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from_error(&e)
        }
    }
}
