//! Output formatting for the promptsig CLI
//!
//! Structured output in JSON, YAML, and human-readable table formats, with
//! rule-based coloring for binding violations.

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

use crate::error::CliError;
use crate::validate::{Violation, ViolationRule};

/// Output format options for CLI results
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum OutputFormat {
    /// Human-readable table format with colors
    #[default]
    Table,
    /// JSON format for machine processing
    Json,
    /// YAML format for configuration output
    Yaml,
}

/// Binding validation report for rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Name of the signature the binding was checked against
    pub signature: String,
    /// Whether the binding satisfied every check
    pub satisfied: bool,
    /// Total number of violations
    pub violation_count: usize,
    /// Violations of the presence rule
    pub presence_count: usize,
    /// Violations of the enumeration-membership rule
    pub membership_count: usize,
    /// Violations of the length-bound rule
    pub length_count: usize,
    /// The violations themselves, in field declaration order
    pub violations: Vec<ViolationOutput>,
    /// Summary message
    pub summary: String,
}

/// Individual violation output structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViolationOutput {
    /// Rule that was broken
    pub rule: String,
    /// Offending field name
    pub field: String,
    /// Human-readable message
    pub message: String,
    /// What the signature declares
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// The offending raw value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// Suggested fix (if available)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationReport {
    /// Create a report from validation results
    pub fn from_violations(signature: &str, violations: &[Violation]) -> Self {
        let presence_count = violations
            .iter()
            .filter(|v| v.rule == ViolationRule::Presence)
            .count();
        let membership_count = violations
            .iter()
            .filter(|v| v.rule == ViolationRule::Membership)
            .count();
        let length_count = violations
            .iter()
            .filter(|v| v.rule == ViolationRule::Length)
            .count();

        let satisfied = violations.is_empty();
        let summary = if satisfied {
            format!("Binding satisfies signature '{}'", signature)
        } else {
            format!(
                "Binding violates signature '{}' with {} violation(s)",
                signature,
                violations.len()
            )
        };

        Self {
            signature: signature.to_string(),
            satisfied,
            violation_count: violations.len(),
            presence_count,
            membership_count,
            length_count,
            violations: violations.iter().map(ViolationOutput::from_violation).collect(),
            summary,
        }
    }

    /// Render the report in the requested format
    pub fn render(&self, format: OutputFormat) -> Result<(), CliError> {
        match format {
            OutputFormat::Json => self.render_json(),
            OutputFormat::Yaml => self.render_yaml(),
            OutputFormat::Table => self.render_table(),
        }
    }

    /// Render as JSON
    fn render_json(&self) -> Result<(), CliError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| CliError::SerializationError(e.to_string()))?;
        println!("{}", json);
        Ok(())
    }

    /// Render as YAML
    fn render_yaml(&self) -> Result<(), CliError> {
        let yaml = serde_yaml::to_string(self)
            .map_err(|e| CliError::SerializationError(e.to_string()))?;
        println!("{}", yaml);
        Ok(())
    }

    /// Render as human-readable table
    fn render_table(&self) -> Result<(), CliError> {
        let mut stdout = io::stdout();

        writeln!(stdout).ok();
        writeln!(stdout, "{}", "Binding Validation".cyan().bold()).ok();
        writeln!(stdout, "{}", "=".repeat(60)).ok();
        writeln!(stdout).ok();
        writeln!(stdout, "Signature: {}", self.signature.bold()).ok();
        writeln!(stdout).ok();

        let status_icon = if self.satisfied { "+".green() } else { "x".red() };
        writeln!(stdout, "{} {}", status_icon, self.summary).ok();
        writeln!(stdout).ok();

        if !self.satisfied {
            writeln!(stdout, "{}", "Statistics:".cyan().bold()).ok();
            if self.presence_count > 0 {
                writeln!(
                    stdout,
                    "  Presence:   {}",
                    self.presence_count.to_string().red()
                )
                .ok();
            }
            if self.membership_count > 0 {
                writeln!(
                    stdout,
                    "  Membership: {}",
                    self.membership_count.to_string().magenta()
                )
                .ok();
            }
            if self.length_count > 0 {
                writeln!(
                    stdout,
                    "  Length:     {}",
                    self.length_count.to_string().yellow()
                )
                .ok();
            }
            writeln!(stdout).ok();

            writeln!(stdout, "{}", "Violations:".cyan().bold()).ok();
            writeln!(stdout, "{}", "-".repeat(60)).ok();
            for violation in &self.violations {
                violation.render_table_row(&mut stdout);
            }
        }

        stdout.flush().ok();
        Ok(())
    }
}

impl ViolationOutput {
    /// Create from a violation record
    pub fn from_violation(violation: &Violation) -> Self {
        Self {
            rule: violation.rule.to_string(),
            field: violation.field.clone(),
            message: violation.message.clone(),
            expected: violation.expected.clone(),
            value: violation.value.clone(),
            suggestion: violation.suggestion.clone(),
        }
    }

    /// Render a single violation as a table row
    fn render_table_row(&self, stdout: &mut io::Stdout) {
        let icon = RuleColorizer::icon(&self.rule);
        let label = RuleColorizer::label(&self.rule);

        writeln!(stdout).ok();
        writeln!(stdout, "{} {} {}", icon, label, self.message).ok();
        writeln!(stdout, "  {} {}", "Field:".dimmed(), self.field.cyan()).ok();

        if let Some(expected) = &self.expected {
            writeln!(stdout, "  {} {}", "Expected:".dimmed(), expected).ok();
        }
        if let Some(value) = &self.value {
            writeln!(stdout, "  {} {}", "Value:".dimmed(), value.yellow()).ok();
        }
        if let Some(suggestion) = &self.suggestion {
            writeln!(stdout, "  {} {}", "Fix:".dimmed(), suggestion.green()).ok();
        }
    }
}

/// Rule coloring utilities
pub struct RuleColorizer;

impl RuleColorizer {
    /// Get the icon for a violation rule
    pub fn icon(rule: &str) -> String {
        match rule {
            "presence" => "x".red().to_string(),
            "membership" => "x".magenta().to_string(),
            "length" => "x".yellow().to_string(),
            _ => "-".white().to_string(),
        }
    }

    /// Get the colored rule label
    pub fn label(rule: &str) -> String {
        match rule {
            "presence" => "PRESENCE".red().bold().to_string(),
            "membership" => "MEMBERSHIP".magenta().bold().to_string(),
            "length" => "LENGTH".yellow().bold().to_string(),
            other => other.to_uppercase().white().to_string(),
        }
    }
}

/// Truncate text for table cells, appending an ellipsis when shortened
pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_chars).collect();
        format!("{}...", kept.trim_end())
    }
}
