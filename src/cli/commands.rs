//! CLI command definitions and execution
//!
//! Clap command structures for the promptsig binary plus the command
//! handlers: catalog listing, signature display, definition checking, and
//! binding validation.

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::binding::Binding;
use crate::catalog::{self, CatalogEntry, Tier};
use crate::cli::output::{truncate, OutputFormat, ValidationReport};
use crate::cli::ExitCode;
use crate::error::{CliError, SchemaError};
use crate::render::field_notes;
use crate::signature::{Role, Signature, SignatureDef};

/// Main CLI structure for the signature toolkit
#[derive(Parser)]
#[command(name = "promptsig")]
#[command(about = "Declare, inspect, and validate prompt signatures", version)]
pub struct PromptSigCli {
    #[command(subcommand)]
    pub command: PromptSigCommands,

    /// Enable verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum PromptSigCommands {
    /// List the built-in signature catalog
    Catalog {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: Option<OutputFormat>,
    },

    /// Show a signature and its rendered guidance
    Show {
        /// Catalog slug or signature name to show
        #[arg(short, long)]
        name: Option<String>,

        /// Path to a signature definition file (json, yaml, or toml)
        #[arg(short, long)]
        signature: Option<PathBuf>,

        /// Show the guidance line for a single declared field
        #[arg(long)]
        field: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: Option<OutputFormat>,
    },

    /// Check a signature definition file against the schema rules
    Check {
        /// Path to the signature definition file
        #[arg(short, long)]
        signature: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: Option<OutputFormat>,
    },

    /// Validate a binding file against a signature
    Validate {
        /// Catalog slug or signature name to validate against
        #[arg(short, long)]
        name: Option<String>,

        /// Path to a signature definition file (json, yaml, or toml)
        #[arg(short, long)]
        signature: Option<PathBuf>,

        /// Path to the binding file (a flat map of field name to value)
        #[arg(short, long)]
        binding: PathBuf,

        /// Which declared roles to check
        #[arg(short, long, value_enum, default_value = "all")]
        role: Option<RoleScope>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: Option<OutputFormat>,
    },
}

/// Which declared roles a validation run covers
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, ValueEnum)]
pub enum RoleScope {
    /// Check every declared field
    #[default]
    All,
    /// Check input fields only
    Inputs,
    /// Check output fields only
    Outputs,
}

impl fmt::Display for RoleScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoleScope::All => write!(f, "all"),
            RoleScope::Inputs => write!(f, "inputs"),
            RoleScope::Outputs => write!(f, "outputs"),
        }
    }
}

/// Execute the catalog command
pub fn execute_catalog(format: OutputFormat) -> Result<ExitCode, CliError> {
    let entries = catalog::entries();
    tracing::debug!(count = entries.len(), "Listing built-in signatures");

    match format {
        OutputFormat::Json => {
            let rows: Vec<CatalogRow> = entries.iter().map(CatalogRow::from_entry).collect();
            let json = serde_json::to_string_pretty(&rows)
                .map_err(|e| CliError::SerializationError(e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let rows: Vec<CatalogRow> = entries.iter().map(CatalogRow::from_entry).collect();
            let yaml = serde_yaml::to_string(&rows)
                .map_err(|e| CliError::SerializationError(e.to_string()))?;
            println!("{}", yaml);
        }
        OutputFormat::Table => print_catalog_table(&entries),
    }

    Ok(ExitCode::Success)
}

/// Execute the show command
pub fn execute_show(
    name: Option<String>,
    signature_path: Option<PathBuf>,
    field: Option<String>,
    format: OutputFormat,
) -> Result<ExitCode, CliError> {
    let (signature, tier) = resolve_signature(name.as_deref(), signature_path.as_deref())?;

    if let Some(field_name) = field {
        let spec = signature.field(&field_name)?;
        match format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(spec)
                    .map_err(|e| CliError::SerializationError(e.to_string()))?;
                println!("{}", json);
            }
            OutputFormat::Yaml => {
                let yaml = serde_yaml::to_string(spec)
                    .map_err(|e| CliError::SerializationError(e.to_string()))?;
                println!("{}", yaml);
            }
            OutputFormat::Table => {
                let line = signature.render_field_guidance(&field_name)?;
                println!("{}", line);
            }
        }
        return Ok(ExitCode::Success);
    }

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&signature)
                .map_err(|e| CliError::SerializationError(e.to_string()))?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&signature)
                .map_err(|e| CliError::SerializationError(e.to_string()))?;
            println!("{}", yaml);
        }
        OutputFormat::Table => print_signature_table(&signature, tier),
    }

    Ok(ExitCode::Success)
}

/// Execute the check command
pub fn execute_check(signature_path: PathBuf, format: OutputFormat) -> Result<ExitCode, CliError> {
    let content = fs::read_to_string(&signature_path).map_err(|e| {
        CliError::file_error(format!(
            "Failed to read signature file '{}': {}",
            signature_path.display(),
            e
        ))
    })?;
    let def = parse_signature_file(&signature_path, &content)?;

    let report = match Signature::try_from(def) {
        Ok(signature) => {
            tracing::info!(signature = %signature.name(), "Signature definition is well formed");
            CheckReport::well_formed(&signature)
        }
        Err(error) => {
            tracing::warn!(error = %error, "Signature definition is malformed");
            CheckReport::malformed(error)
        }
    };
    report.render(format)?;

    Ok(if report.valid {
        ExitCode::Success
    } else {
        ExitCode::SchemaError
    })
}

/// Execute the validate command
pub fn execute_validate(
    name: Option<String>,
    signature_path: Option<PathBuf>,
    binding_path: PathBuf,
    role: RoleScope,
    format: OutputFormat,
) -> Result<ExitCode, CliError> {
    let (signature, _tier) = resolve_signature(name.as_deref(), signature_path.as_deref())?;
    let binding = load_binding_file(&binding_path)?;

    tracing::info!(
        signature = %signature.name(),
        binding = %binding_path.display(),
        role = %role,
        "Validating binding"
    );

    let violations = match role {
        RoleScope::All => signature.validate_binding(&binding)?,
        RoleScope::Inputs => signature.validate_inputs(&binding)?,
        RoleScope::Outputs => signature.validate_outputs(&binding)?,
    };

    let report = ValidationReport::from_violations(signature.name(), &violations);
    report.render(format)?;

    Ok(ExitCode::from_validation(&violations))
}

/// Resolve a signature from a catalog key or a definition file
fn resolve_signature(
    name: Option<&str>,
    path: Option<&Path>,
) -> Result<(Signature, Option<Tier>), CliError> {
    match (name, path) {
        (Some(_), Some(_)) => Err(CliError::invalid_input(
            "Pass either --name or --signature, not both",
        )),
        (None, None) => Err(CliError::invalid_input(
            "Pass a catalog name with --name or a definition file with --signature",
        )),
        (Some(key), None) => {
            let entry = catalog::find(key).ok_or_else(|| {
                CliError::invalid_input(format!(
                    "No built-in signature named '{}'. Run 'promptsig catalog' to list them",
                    key
                ))
            })?;
            Ok((entry.signature, Some(entry.tier)))
        }
        (None, Some(path)) => {
            let signature = load_signature_file(path)?;
            Ok((signature, None))
        }
    }
}

/// Load and define a signature from a definition file
pub fn load_signature_file(path: &Path) -> Result<Signature, CliError> {
    let content = fs::read_to_string(path).map_err(|e| {
        CliError::file_error(format!(
            "Failed to read signature file '{}': {}",
            path.display(),
            e
        ))
    })?;
    let def = parse_signature_file(path, &content)?;
    let signature = Signature::try_from(def)?;
    tracing::debug!(signature = %signature.name(), "Loaded signature definition");
    Ok(signature)
}

/// Load a binding from a flat map file
pub fn load_binding_file(path: &Path) -> Result<Binding, CliError> {
    let content = fs::read_to_string(path).map_err(|e| {
        CliError::file_error(format!(
            "Failed to read binding file '{}': {}",
            path.display(),
            e
        ))
    })?;
    parse_binding_file(path, &content)
}

/// Parse a signature definition based on file extension
pub fn parse_signature_file(path: &Path, content: &str) -> Result<SignatureDef, CliError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "json" => serde_json::from_str(content)
            .map_err(|e| CliError::parse_error(format!("Invalid JSON: {}", e))),
        "yaml" | "yml" => serde_yaml::from_str(content)
            .map_err(|e| CliError::parse_error(format!("Invalid YAML: {}", e))),
        "toml" => toml::from_str(content)
            .map_err(|e| CliError::parse_error(format!("Invalid TOML: {}", e))),
        _ => Err(CliError::invalid_input(format!(
            "Unsupported file format: {}. Supported formats: json, yaml, yml, toml",
            extension
        ))),
    }
}

/// Parse a binding file based on file extension
pub fn parse_binding_file(path: &Path, content: &str) -> Result<Binding, CliError> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "json" => serde_json::from_str(content)
            .map_err(|e| CliError::parse_error(format!("Invalid JSON: {}", e))),
        "yaml" | "yml" => serde_yaml::from_str(content)
            .map_err(|e| CliError::parse_error(format!("Invalid YAML: {}", e))),
        "toml" => toml::from_str(content)
            .map_err(|e| CliError::parse_error(format!("Invalid TOML: {}", e))),
        _ => Err(CliError::invalid_input(format!(
            "Unsupported file format: {}. Supported formats: json, yaml, yml, toml",
            extension
        ))),
    }
}

/// Catalog listing row for structured output
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CatalogRow {
    slug: String,
    name: String,
    tier: String,
    inputs: usize,
    outputs: usize,
    description: String,
}

impl CatalogRow {
    fn from_entry(entry: &CatalogEntry) -> Self {
        Self {
            slug: entry.slug.to_string(),
            name: entry.signature.name().to_string(),
            tier: entry.tier.to_string(),
            inputs: entry.signature.inputs().count(),
            outputs: entry.signature.outputs().count(),
            description: entry.signature.description().to_string(),
        }
    }
}

/// Schema check result for a signature definition file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    /// Whether the definition satisfies every schema rule
    pub valid: bool,
    /// Signature name, when the definition is well formed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    /// Number of declared input fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inputs: Option<usize>,
    /// Number of declared output fields
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outputs: Option<usize>,
    /// Schema error message, when the definition is malformed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckReport {
    fn well_formed(signature: &Signature) -> Self {
        Self {
            valid: true,
            signature: Some(signature.name().to_string()),
            inputs: Some(signature.inputs().count()),
            outputs: Some(signature.outputs().count()),
            error: None,
        }
    }

    fn malformed(error: SchemaError) -> Self {
        Self {
            valid: false,
            signature: None,
            inputs: None,
            outputs: None,
            error: Some(error.to_string()),
        }
    }

    fn render(&self, format: OutputFormat) -> Result<(), CliError> {
        match format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(self)
                    .map_err(|e| CliError::SerializationError(e.to_string()))?;
                println!("{}", json);
            }
            OutputFormat::Yaml => {
                let yaml = serde_yaml::to_string(self)
                    .map_err(|e| CliError::SerializationError(e.to_string()))?;
                println!("{}", yaml);
            }
            OutputFormat::Table => {
                println!();
                if self.valid {
                    println!(
                        "{} Signature '{}' is well formed ({} inputs, {} outputs)",
                        "+".green(),
                        self.signature.as_deref().unwrap_or(""),
                        self.inputs.unwrap_or(0),
                        self.outputs.unwrap_or(0)
                    );
                } else {
                    println!(
                        "{} {}",
                        "x".red(),
                        self.error
                            .as_deref()
                            .unwrap_or("Signature definition is malformed")
                    );
                }
                println!();
            }
        }
        Ok(())
    }
}

/// Print the catalog listing as a human-readable table
fn print_catalog_table(entries: &[CatalogEntry]) {
    println!();
    println!("{}", "Signature Catalog".cyan().bold());
    println!("{}", "=".repeat(60));
    println!();

    for entry in entries {
        let tier_label = match entry.tier {
            Tier::Minimal => "minimal".yellow(),
            Tier::Descriptive => "descriptive".blue(),
            Tier::Production => "production".green(),
        };
        println!(
            "{} {} ({})",
            format!("{:<20}", entry.slug).bold(),
            entry.signature.name(),
            tier_label
        );
        println!(
            "  {} {} in / {} out. {}",
            "Fields:".dimmed(),
            entry.signature.inputs().count(),
            entry.signature.outputs().count(),
            truncate(entry.signature.description(), 48).dimmed()
        );
    }
    println!();
}

/// Print signature details as a human-readable table
fn print_signature_table(signature: &Signature, tier: Option<Tier>) {
    println!();
    println!(
        "{}",
        format!("Signature: {}", signature.name()).cyan().bold()
    );
    println!("{}", "=".repeat(60));
    println!();

    if let Some(tier) = tier {
        println!("{} {}", "Tier:".dimmed(), tier);
    }
    if !signature.description().is_empty() {
        println!("{} {}", "Task:".dimmed(), signature.description());
    }
    println!();

    println!("{}", "Fields:".cyan().bold());
    for field in signature.fields() {
        let role_label = match field.role {
            Role::Input => "input ".blue(),
            Role::Output => "output".green(),
        };
        println!(
            "  {} {} {}",
            role_label,
            format!("{:<20}", field.name).bold(),
            field_notes(field).yellow()
        );
        if let Some(description) = &field.description {
            println!("         {}", description.dimmed());
        }
    }
    println!();

    println!("{}", "Guidance:".cyan().bold());
    println!("{}", "-".repeat(60));
    println!("{}", signature.render_guidance());
}
