//! Binding validation
//!
//! Checks a [`Binding`] against a [`Signature`] and reports data-quality
//! failures as structured [`Violation`] records: presence of required
//! fields, case-sensitive membership for enumeration fields, and declared
//! length bounds in characters. Violations never raise; the only error out
//! of validation is [`UnknownFieldError`], for binding keys the signature
//! never declared.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::binding::Binding;
use crate::error::UnknownFieldError;
use crate::signature::{FieldSpec, LengthCheck, Role, Signature, ValueType};

/// The rule a violation broke
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationRule {
    /// A required field has no value
    Presence,
    /// An enumeration field's value is not one of the allowed literals
    Membership,
    /// A value's character count falls outside the declared bounds
    Length,
}

impl ViolationRule {
    /// Get the rule as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationRule::Presence => "presence",
            ViolationRule::Membership => "membership",
            ViolationRule::Length => "length",
        }
    }
}

impl fmt::Display for ViolationRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One data-quality failure found while validating a binding
///
/// Informational, not an error: callers decide whether to retry, reject, or
/// request correction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Name of the offending field
    pub field: String,

    /// Which rule was broken
    pub rule: ViolationRule,

    /// Human-readable account of the failure
    pub message: String,

    /// What the signature declares for this field
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,

    /// The offending raw value; absent for presence violations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    /// How to fix it, when a fix is apparent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl Violation {
    /// Create a new violation
    pub fn new(
        field: impl Into<String>,
        rule: ViolationRule,
        message: impl Into<String>,
    ) -> Self {
        Violation {
            field: field.into(),
            rule,
            message: message.into(),
            expected: None,
            value: None,
            suggestion: None,
        }
    }

    /// Add the declared expectation
    pub fn with_expected(mut self, expected: impl Into<String>) -> Self {
        self.expected = Some(expected.into());
        self
    }

    /// Add the offending raw value
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// Add a correction suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.rule, self.field, self.message)
    }
}

impl Signature {
    /// Validate a binding against every declared field
    ///
    /// Returns the violations in field declaration order (empty when all
    /// checks pass). Fails with [`UnknownFieldError`] before reporting any
    /// violations when the binding contains a key this signature never
    /// declared.
    pub fn validate_binding(&self, binding: &Binding) -> Result<Vec<Violation>, UnknownFieldError> {
        self.validate_scoped(binding, None)
    }

    /// Validate only the input fields, for checking a request before
    /// invocation; unknown keys are still rejected
    pub fn validate_inputs(&self, binding: &Binding) -> Result<Vec<Violation>, UnknownFieldError> {
        self.validate_scoped(binding, Some(Role::Input))
    }

    /// Validate only the output fields, for checking a parsed reply
    pub fn validate_outputs(&self, binding: &Binding) -> Result<Vec<Violation>, UnknownFieldError> {
        self.validate_scoped(binding, Some(Role::Output))
    }

    fn validate_scoped(
        &self,
        binding: &Binding,
        scope: Option<Role>,
    ) -> Result<Vec<Violation>, UnknownFieldError> {
        // Binding keys iterate in key order, so the first offender is stable.
        for key in binding.keys() {
            if !self.contains_field(key) {
                return Err(UnknownFieldError::new(self.name(), key));
            }
        }

        let mut violations = Vec::new();
        for field in self.fields() {
            if scope.is_some_and(|role| field.role != role) {
                continue;
            }
            match binding.get(&field.name) {
                None => {
                    if field.required {
                        violations.push(presence_violation(field));
                    }
                }
                Some(value) => check_value(field, value, &mut violations),
            }
        }
        Ok(violations)
    }
}

fn presence_violation(field: &FieldSpec) -> Violation {
    Violation::new(
        &field.name,
        ViolationRule::Presence,
        format!("Required {} field '{}' is missing", field.role, field.name),
    )
    .with_suggestion(format!("Supply a value for '{}'", field.name))
}

fn check_value(field: &FieldSpec, value: &str, violations: &mut Vec<Violation>) {
    if let ValueType::Enumeration { allowed } = &field.value_type {
        if !allowed.iter().any(|candidate| candidate == value) {
            let mut violation = Violation::new(
                &field.name,
                ViolationRule::Membership,
                format!("Invalid value '{}': not one of the allowed values", value),
            )
            .with_expected(field.value_type.describe())
            .with_value(value);

            let near = close_matches(allowed, value);
            if !near.is_empty() {
                violation = violation.with_suggestion(format!("Did you mean: {}?", near.join(", ")));
            }
            violations.push(violation);
        }
    }

    let bounds = field.length_bounds();
    if bounds.is_unbounded() {
        return;
    }
    match bounds.check(value.chars().count()) {
        LengthCheck::Valid => {}
        LengthCheck::TooShort { len, min } => {
            violations.push(
                Violation::new(
                    &field.name,
                    ViolationRule::Length,
                    format!("Value length {} is below minimum {}", len, min),
                )
                .with_expected(bounds.describe())
                .with_value(value)
                .with_suggestion(format!("Provide at least {} characters", min)),
            );
        }
        LengthCheck::TooLong { len, max } => {
            violations.push(
                Violation::new(
                    &field.name,
                    ViolationRule::Length,
                    format!("Value length {} exceeds maximum {}", len, max),
                )
                .with_expected(bounds.describe())
                .with_value(value)
                .with_suggestion(format!("Shorten the value to at most {} characters", max)),
            );
        }
    }
}

/// Allowed values within edit distance 2 of the supplied value, compared
/// case-insensitively, in declaration order
fn close_matches(allowed: &[String], value: &str) -> Vec<String> {
    let lowered = value.to_lowercase();
    allowed
        .iter()
        .filter(|candidate| levenshtein_distance(&candidate.to_lowercase(), &lowered) <= 2)
        .cloned()
        .collect()
}

fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    let mut current = vec![0; b_chars.len() + 1];

    for (i, a_char) in a_chars.iter().enumerate() {
        current[0] = i + 1;
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = if a_char == b_char { 0 } else { 1 };
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b_chars.len()]
}
