//! Signature definitions for language-model tasks
//!
//! A [`Signature`] is a named contract for one model invocation: a task
//! description plus an ordered list of input and output fields. Fields are
//! declared once, up front, and the signature is immutable afterwards, so a
//! malformed contract is caught before any prompting happens.
//!
//! One structural type covers every quality tier: a bare field is just a
//! name and a role; descriptions, enumerated value sets, and length bounds
//! are optional refinements added to the same [`FieldSpec`] without renaming
//! or reordering anything.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{SchemaError, UnknownFieldError};

/// Whether a field is consumed or produced by the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Supplied by the caller, sent to the model
    Input,
    /// Expected back from the model's reply
    Output,
}

impl Role {
    /// Get the role as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Input => "input",
            Role::Output => "output",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Semantic type of a field's value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ValueType {
    /// Unrestricted text
    FreeText,
    /// Exactly one of a fixed set of literal strings, in declaration order
    Enumeration { allowed: Vec<String> },
}

impl ValueType {
    /// Create an enumeration type from literal values
    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ValueType::Enumeration {
            allowed: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Get the type tag as a string
    pub fn type_name(&self) -> &'static str {
        match self {
            ValueType::FreeText => "free_text",
            ValueType::Enumeration { .. } => "enumeration",
        }
    }

    /// Whether this is the unrestricted text type
    pub fn is_free_text(&self) -> bool {
        matches!(self, ValueType::FreeText)
    }

    /// Human-readable description of the type, used in guidance and reports
    pub fn describe(&self) -> String {
        match self {
            ValueType::FreeText => "text".to_string(),
            ValueType::Enumeration { allowed } => {
                let values: Vec<String> =
                    allowed.iter().map(|v| format!("\"{}\"", v)).collect();
                format!("one of: {}", values.join(", "))
            }
        }
    }
}

impl Default for ValueType {
    fn default() -> Self {
        ValueType::FreeText
    }
}

/// A declared constraint on a field's value
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldConstraint {
    /// Minimum length in characters (enforced)
    MinLength { chars: usize },
    /// Maximum length in characters (enforced)
    MaxLength { chars: usize },
    /// Expected format, carried as guidance text only (never enforced)
    Format { hint: String },
}

impl FieldConstraint {
    /// Create a minimum length constraint
    pub fn min_length(chars: usize) -> Self {
        FieldConstraint::MinLength { chars }
    }

    /// Create a maximum length constraint
    pub fn max_length(chars: usize) -> Self {
        FieldConstraint::MaxLength { chars }
    }

    /// Create a format hint
    pub fn format(hint: impl Into<String>) -> Self {
        FieldConstraint::Format { hint: hint.into() }
    }

    /// Get a human-readable description of the constraint
    pub fn description(&self) -> String {
        match self {
            FieldConstraint::MinLength { chars } => {
                format!("at least {} characters", chars)
            }
            FieldConstraint::MaxLength { chars } => {
                format!("at most {} characters", chars)
            }
            FieldConstraint::Format { hint } => format!("format: {}", hint),
        }
    }
}

/// Effective character-count bounds for one field
///
/// Collapses a field's length constraints into a single checkable range:
/// the strictest minimum and the strictest maximum win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthBounds {
    /// Minimum length in characters (inclusive)
    pub min: Option<usize>,
    /// Maximum length in characters (inclusive)
    pub max: Option<usize>,
}

impl LengthBounds {
    /// Create unbounded length bounds
    pub fn unbounded() -> Self {
        LengthBounds {
            min: None,
            max: None,
        }
    }

    /// Whether no bound is declared in either direction
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }

    /// Check a character count against the bounds
    pub fn check(&self, len: usize) -> LengthCheck {
        if let Some(min) = self.min {
            if len < min {
                return LengthCheck::TooShort { len, min };
            }
        }
        if let Some(max) = self.max {
            if len > max {
                return LengthCheck::TooLong { len, max };
            }
        }
        LengthCheck::Valid
    }

    /// Get a description of the bounds
    pub fn describe(&self) -> String {
        match (self.min, self.max) {
            (Some(min), Some(max)) if min == max => format!("exactly {} characters", min),
            (Some(min), Some(max)) => format!("{}-{} characters", min, max),
            (Some(min), None) => format!("at least {} characters", min),
            (None, Some(max)) => format!("at most {} characters", max),
            (None, None) => "any length".to_string(),
        }
    }
}

/// Result of a length-bounds check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthCheck {
    Valid,
    TooShort { len: usize, min: usize },
    TooLong { len: usize, max: usize },
}

/// One named slot within a signature
///
/// Every quality tier uses this same type. A minimal field is a name and a
/// role; richer tiers add a description, an enumerated value set, or length
/// bounds through the consuming builder methods.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Field name, unique across the whole signature
    pub name: String,

    /// Whether the field is an input or an output
    pub role: Role,

    /// Semantic type of the value; defaults to unrestricted text
    #[serde(default, skip_serializing_if = "ValueType::is_free_text")]
    pub value_type: ValueType,

    /// Guidance text for the model (and for humans reading the contract)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Declared constraints; length bounds are enforced, format hints are not
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub constraints: Vec<FieldConstraint>,

    /// Whether a binding must supply a value for this field
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub required: bool,
}

fn default_true() -> bool {
    true
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_true(value: &bool) -> bool {
    *value
}

impl FieldSpec {
    /// Create a field with a name and a role, free-text and required
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        FieldSpec {
            name: name.into(),
            role,
            value_type: ValueType::FreeText,
            description: None,
            constraints: Vec::new(),
            required: true,
        }
    }

    /// Create an input field
    pub fn input(name: impl Into<String>) -> Self {
        Self::new(name, Role::Input)
    }

    /// Create an output field
    pub fn output(name: impl Into<String>) -> Self {
        Self::new(name, Role::Output)
    }

    /// Set the guidance text
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the value type
    pub fn with_value_type(mut self, value_type: ValueType) -> Self {
        self.value_type = value_type;
        self
    }

    /// Restrict the value to a fixed set of literals
    pub fn with_enumeration<I, S>(self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_value_type(ValueType::enumeration(values))
    }

    /// Add a constraint
    pub fn with_constraint(mut self, constraint: FieldConstraint) -> Self {
        self.constraints.push(constraint);
        self
    }

    /// Require at least `chars` characters
    pub fn min_chars(self, chars: usize) -> Self {
        self.with_constraint(FieldConstraint::min_length(chars))
    }

    /// Allow at most `chars` characters
    pub fn max_chars(self, chars: usize) -> Self {
        self.with_constraint(FieldConstraint::max_length(chars))
    }

    /// Attach a format hint (guidance only, never enforced)
    pub fn with_format(self, hint: impl Into<String>) -> Self {
        self.with_constraint(FieldConstraint::format(hint))
    }

    /// Mark the field as optional; bindings may omit it
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Effective length bounds collapsed from the declared constraints
    pub fn length_bounds(&self) -> LengthBounds {
        let mut bounds = LengthBounds::unbounded();
        for constraint in &self.constraints {
            match constraint {
                FieldConstraint::MinLength { chars } => {
                    bounds.min = Some(bounds.min.map_or(*chars, |min| min.max(*chars)));
                }
                FieldConstraint::MaxLength { chars } => {
                    bounds.max = Some(bounds.max.map_or(*chars, |max| max.min(*chars)));
                }
                FieldConstraint::Format { .. } => {}
            }
        }
        bounds
    }

    /// Format hints declared on the field, in declaration order
    pub fn format_hints(&self) -> Vec<&str> {
        self.constraints
            .iter()
            .filter_map(|constraint| match constraint {
                FieldConstraint::Format { hint } => Some(hint.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// A named, immutable contract for one model-invocation task
///
/// Built once via [`Signature::define`] or [`Signature::builder`]; every
/// structural invariant is checked there, so an existing `Signature` is
/// always well formed. Fields keep their declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SignatureDef")]
pub struct Signature {
    name: String,
    description: String,
    fields: Vec<FieldSpec>,
}

impl Signature {
    /// Define a signature, checking every structural invariant
    ///
    /// Fails with [`SchemaError`] when any two fields share a name (inputs
    /// and outputs share one namespace), when the field list has no inputs
    /// or no outputs, when an enumeration field declares no allowed values
    /// or repeats one, when a name is empty, or when declared length bounds
    /// conflict.
    pub fn define(
        name: impl Into<String>,
        description: impl Into<String>,
        fields: Vec<FieldSpec>,
    ) -> Result<Self, SchemaError> {
        let name = name.into();
        let description = description.into();

        if name.trim().is_empty() {
            return Err(SchemaError::EmptyName);
        }

        let mut seen: HashSet<&str> = HashSet::new();
        for field in &fields {
            if field.name.trim().is_empty() {
                return Err(SchemaError::EmptyFieldName);
            }
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    name: field.name.clone(),
                });
            }

            if let ValueType::Enumeration { allowed } = &field.value_type {
                if allowed.is_empty() {
                    return Err(SchemaError::EmptyEnumeration {
                        field: field.name.clone(),
                    });
                }
                let mut values: HashSet<&str> = HashSet::new();
                for value in allowed {
                    if !values.insert(value.as_str()) {
                        return Err(SchemaError::DuplicateEnumValue {
                            field: field.name.clone(),
                            value: value.clone(),
                        });
                    }
                }
            }

            let bounds = field.length_bounds();
            if let (Some(min), Some(max)) = (bounds.min, bounds.max) {
                if min > max {
                    return Err(SchemaError::ConflictingLengthBounds {
                        field: field.name.clone(),
                        min,
                        max,
                    });
                }
            }
        }

        if !fields.iter().any(|f| f.role == Role::Input) {
            return Err(SchemaError::NoInputs);
        }
        if !fields.iter().any(|f| f.role == Role::Output) {
            return Err(SchemaError::NoOutputs);
        }

        Ok(Signature {
            name,
            description,
            fields,
        })
    }

    /// Start a builder for fluent declaration
    pub fn builder(name: impl Into<String>) -> SignatureBuilder {
        SignatureBuilder::new(name)
    }

    /// Name of the signature
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Task description, the instruction text for a downstream model
    pub fn description(&self) -> &str {
        &self.description
    }

    /// All fields in declaration order
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Field names in declaration order
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    /// Input fields in declaration order
    pub fn inputs(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.role == Role::Input)
    }

    /// Output fields in declaration order
    pub fn outputs(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.role == Role::Output)
    }

    /// Whether a field with this name is declared
    pub fn contains_field(&self, name: &str) -> bool {
        self.fields.iter().any(|f| f.name == name)
    }

    /// Look up a declared field by name
    pub fn field(&self, name: &str) -> Result<&FieldSpec, UnknownFieldError> {
        self.fields
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| UnknownFieldError::new(&self.name, name))
    }
}

/// Serde-facing mirror of a signature definition
///
/// Files and other serialized forms deserialize into this plain struct and
/// are then gated through [`Signature::define`], so loading a definition
/// enforces the same invariants as declaring one in code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignatureDef {
    /// Signature name
    pub name: String,
    /// Task description
    #[serde(default)]
    pub description: String,
    /// Fields in declaration order
    pub fields: Vec<FieldSpec>,
}

impl TryFrom<SignatureDef> for Signature {
    type Error = SchemaError;

    fn try_from(def: SignatureDef) -> Result<Self, Self::Error> {
        Signature::define(def.name, def.description, def.fields)
    }
}

impl From<Signature> for SignatureDef {
    fn from(signature: Signature) -> Self {
        SignatureDef {
            name: signature.name,
            description: signature.description,
            fields: signature.fields,
        }
    }
}

/// Fluent builder for [`Signature`]
///
/// Terminates in [`SignatureBuilder::define`], which runs the same checks
/// as [`Signature::define`].
#[derive(Debug, Clone, Default)]
pub struct SignatureBuilder {
    name: String,
    description: String,
    fields: Vec<FieldSpec>,
}

impl SignatureBuilder {
    /// Create a builder for a named signature
    pub fn new(name: impl Into<String>) -> Self {
        SignatureBuilder {
            name: name.into(),
            description: String::new(),
            fields: Vec::new(),
        }
    }

    /// Set the task description
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append a field; declaration order is preserved
    pub fn field(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    /// Check the declaration and build the signature
    pub fn define(self) -> Result<Signature, SchemaError> {
        Signature::define(self.name, self.description, self.fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn qa_fields() -> Vec<FieldSpec> {
        vec![FieldSpec::input("question"), FieldSpec::output("answer")]
    }

    #[test]
    fn test_define_minimal_signature() {
        let sig = Signature::define(
            "BasicQA",
            "Answer questions with short factoid answers.",
            qa_fields(),
        )
        .unwrap();

        assert_eq!(sig.name(), "BasicQA");
        assert_eq!(sig.field_names(), vec!["question", "answer"]);
        assert_eq!(sig.inputs().count(), 1);
        assert_eq!(sig.outputs().count(), 1);
    }

    #[test]
    fn test_define_preserves_declaration_order() {
        let sig = Signature::define(
            "Extractor",
            "Extract structured data.",
            vec![
                FieldSpec::input("article_text"),
                FieldSpec::output("title"),
                FieldSpec::output("author"),
                FieldSpec::output("summary"),
            ],
        )
        .unwrap();

        assert_eq!(
            sig.field_names(),
            vec!["article_text", "title", "author", "summary"]
        );
    }

    #[test]
    fn test_duplicate_field_name_rejected() {
        let err = Signature::define(
            "Broken",
            "desc",
            vec![
                FieldSpec::input("text"),
                FieldSpec::output("text"),
                FieldSpec::output("extra"),
            ],
        )
        .unwrap_err();

        assert_eq!(
            err,
            SchemaError::DuplicateField {
                name: "text".to_string()
            }
        );
    }

    #[test]
    fn test_missing_roles_rejected() {
        let err = Signature::define("NoOut", "desc", vec![FieldSpec::input("question")])
            .unwrap_err();
        assert_eq!(err, SchemaError::NoOutputs);

        let err = Signature::define("NoIn", "desc", vec![FieldSpec::output("answer")])
            .unwrap_err();
        assert_eq!(err, SchemaError::NoInputs);
    }

    #[test]
    fn test_empty_names_rejected() {
        let err = Signature::define("", "desc", qa_fields()).unwrap_err();
        assert_eq!(err, SchemaError::EmptyName);

        let err = Signature::define(
            "Sig",
            "desc",
            vec![FieldSpec::input("  "), FieldSpec::output("answer")],
        )
        .unwrap_err();
        assert_eq!(err, SchemaError::EmptyFieldName);
    }

    #[test]
    fn test_enumeration_invariants() {
        let empty = FieldSpec::output("confidence").with_enumeration(Vec::<String>::new());
        let err = Signature::define(
            "Sig",
            "desc",
            vec![FieldSpec::input("question"), empty],
        )
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::EmptyEnumeration {
                field: "confidence".to_string()
            }
        );

        let duplicated =
            FieldSpec::output("confidence").with_enumeration(["high", "medium", "high"]);
        let err = Signature::define(
            "Sig",
            "desc",
            vec![FieldSpec::input("question"), duplicated],
        )
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::DuplicateEnumValue {
                field: "confidence".to_string(),
                value: "high".to_string()
            }
        );
    }

    #[test]
    fn test_conflicting_length_bounds_rejected() {
        let field = FieldSpec::output("answer").min_chars(100).max_chars(20);
        let err = Signature::define(
            "Sig",
            "desc",
            vec![FieldSpec::input("question"), field],
        )
        .unwrap_err();
        assert_eq!(
            err,
            SchemaError::ConflictingLengthBounds {
                field: "answer".to_string(),
                min: 100,
                max: 20
            }
        );
    }

    #[test]
    fn test_builder_matches_define() {
        let built = Signature::builder("BasicQA")
            .description("Answer questions with short factoid answers.")
            .field(FieldSpec::input("question"))
            .field(FieldSpec::output("answer"))
            .define()
            .unwrap();

        let defined = Signature::define(
            "BasicQA",
            "Answer questions with short factoid answers.",
            qa_fields(),
        )
        .unwrap();

        assert_eq!(built, defined);
    }

    #[test]
    fn test_field_lookup() {
        let sig = Signature::define("BasicQA", "desc", qa_fields()).unwrap();

        assert_eq!(sig.field("question").unwrap().role, Role::Input);
        let err = sig.field("bogus_field").unwrap_err();
        assert_eq!(err.signature, "BasicQA");
        assert_eq!(err.field, "bogus_field");
    }

    #[test]
    fn test_field_builders() {
        let field = FieldSpec::output("confidence")
            .with_description("Confidence level in the answer")
            .with_enumeration(["high", "medium", "low"])
            .optional();

        assert_eq!(field.role, Role::Output);
        assert!(!field.required);
        assert_eq!(field.value_type.type_name(), "enumeration");
        assert_eq!(
            field.value_type.describe(),
            "one of: \"high\", \"medium\", \"low\""
        );
    }

    #[test]
    fn test_effective_length_bounds() {
        let field = FieldSpec::input("question")
            .min_chars(10)
            .max_chars(500)
            .min_chars(20)
            .with_format("plain sentence");

        let bounds = field.length_bounds();
        assert_eq!(bounds.min, Some(20));
        assert_eq!(bounds.max, Some(500));
        assert_eq!(bounds.describe(), "20-500 characters");
        assert!(matches!(bounds.check(100), LengthCheck::Valid));
        assert!(matches!(
            bounds.check(5),
            LengthCheck::TooShort { len: 5, min: 20 }
        ));
        assert!(matches!(
            bounds.check(501),
            LengthCheck::TooLong { len: 501, max: 500 }
        ));
        assert_eq!(field.format_hints(), vec!["plain sentence"]);
    }

    #[test]
    fn test_tier_upgrade_keeps_names_and_order() {
        let bare = Signature::define(
            "SentimentAnalysis",
            "Analyze sentiment.",
            vec![FieldSpec::input("text"), FieldSpec::output("sentiment")],
        )
        .unwrap();

        let refined = Signature::define(
            "SentimentAnalysis",
            "Analyze the emotional tone of the provided text.",
            vec![
                FieldSpec::input("text").with_description("Text to analyze"),
                FieldSpec::output("sentiment")
                    .with_description("Overall sentiment")
                    .with_enumeration(["positive", "negative", "neutral"]),
            ],
        )
        .unwrap();

        assert_eq!(bare.field_names(), refined.field_names());
    }

    #[test]
    fn test_serde_round_trip_json() {
        let sig = Signature::define(
            "ProductionQA",
            "Answer questions with confidence assessment.",
            vec![
                FieldSpec::input("question").min_chars(10).max_chars(500),
                FieldSpec::output("answer").with_description("Direct answer"),
                FieldSpec::output("confidence").with_enumeration(["high", "medium", "low"]),
            ],
        )
        .unwrap();

        let json = serde_json::to_string(&sig).unwrap();
        let restored: Signature = serde_json::from_str(&json).unwrap();
        assert_eq!(sig, restored);
    }

    #[test]
    fn test_minimal_yaml_definition() {
        let yaml = r#"
name: BasicQA
description: Answer questions with short factoid answers.
fields:
  - name: question
    role: input
  - name: answer
    role: output
"#;
        let sig: Signature = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(sig.field_names(), vec!["question", "answer"]);
        assert!(sig.field("question").unwrap().value_type.is_free_text());
        assert!(sig.field("question").unwrap().required);
    }

    #[test]
    fn test_malformed_definition_fails_deserialization() {
        let yaml = r#"
name: Broken
description: Duplicate names.
fields:
  - name: text
    role: input
  - name: text
    role: output
"#;
        let result: Result<Signature, _> = serde_yaml::from_str(yaml);
        assert!(result.is_err());
    }

    #[test]
    fn test_signature_def_gate() {
        let def = SignatureDef {
            name: "OnlyInputs".to_string(),
            description: String::new(),
            fields: vec![FieldSpec::input("question")],
        };
        let err = Signature::try_from(def).unwrap_err();
        assert_eq!(err, SchemaError::NoOutputs);
    }
}
