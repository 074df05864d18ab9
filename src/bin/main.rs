//! Prompt Signature CLI
//!
//! Command-line interface for the prompt signature toolkit.
//!
//! # Usage
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
//! # Validate a binding file against a signature
//! promptsig validate --name production-qa --binding binding.json --role outputs
//! ```
//!
//! # Exit Codes
//!
//! - 0: Success - any checked binding satisfied its signature
//! - 1: The binding broke at least one declared rule
//! - 3: Invalid input or arguments
//! - 4: File not found or inaccessible
//! - 5: The signature definition broke a schema rule
//! - 10: Internal error

use clap::Parser;
use prompt_signatures::{run_cli, PromptSigCli};

fn main() {
    // Parse CLI arguments
    let cli = PromptSigCli::parse();

    // Initialize tracing subscriber for logging; -v raises the level, -q mutes it
    let level = if cli.quiet {
        tracing::Level::ERROR
    } else {
        match cli.verbose {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            _ => tracing::Level::DEBUG,
        }
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_target(false)
        .init();

    // Run the CLI and exit with appropriate code
    let exit_code = run_cli(cli);
    std::process::exit(exit_code.into());
}
