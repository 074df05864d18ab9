//! Guidance rendering
//!
//! Turns a signature into the plain-text briefing a downstream model (or a
//! human reader) receives: the task description followed by every field's
//! name, type, constraints, and guidance, inputs first, then outputs, all in
//! declaration order. Pure string assembly; rendering the same signature
//! twice yields byte-identical text.

use crate::error::UnknownFieldError;
use crate::signature::{FieldSpec, Signature};

impl Signature {
    /// Render the full briefing for this signature
    pub fn render_guidance(&self) -> String {
        let mut text = String::new();

        if !self.description().is_empty() {
            text.push_str("Task: ");
            text.push_str(self.description());
            text.push_str("\n\n");
        }

        text.push_str("Input fields:\n");
        for field in self.inputs() {
            text.push_str("- ");
            text.push_str(&field_line(field));
            text.push('\n');
        }

        text.push_str("\nOutput fields:\n");
        for field in self.outputs() {
            text.push_str("- ");
            text.push_str(&field_line(field));
            text.push('\n');
        }

        text
    }

    /// Render the briefing line for one declared field
    pub fn render_field_guidance(&self, name: &str) -> Result<String, UnknownFieldError> {
        self.field(name).map(field_line)
    }
}

/// One field as `name (notes): description`
fn field_line(field: &FieldSpec) -> String {
    let mut line = format!("{} ({})", field.name, field_notes(field));
    if let Some(description) = &field.description {
        line.push_str(": ");
        line.push_str(description);
    }
    line
}

/// Parenthetical notes: type, enforced bounds, format hints, optional marker
pub(crate) fn field_notes(field: &FieldSpec) -> String {
    let mut notes = field.value_type.describe();

    let bounds = field.length_bounds();
    if !bounds.is_unbounded() {
        notes.push_str("; ");
        notes.push_str(&bounds.describe());
    }

    for hint in field.format_hints() {
        notes.push_str("; format: ");
        notes.push_str(hint);
    }

    if !field.required {
        notes.push_str("; optional");
    }

    notes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::FieldSpec;

    fn production_qa() -> Signature {
        Signature::builder("ProductionQA")
            .description("Answer questions with confidence assessment.")
            .field(
                FieldSpec::input("question")
                    .with_description("User's question")
                    .min_chars(10)
                    .max_chars(500),
            )
            .field(FieldSpec::input("context").with_description("Retrieved passages"))
            .field(FieldSpec::output("answer").with_description("Direct answer"))
            .field(
                FieldSpec::output("confidence")
                    .with_description("Confidence level")
                    .with_enumeration(["high", "medium", "low"]),
            )
            .field(
                FieldSpec::output("evidence")
                    .with_description("Supporting quote")
                    .optional(),
            )
            .define()
            .unwrap()
    }

    #[test]
    fn test_guidance_contains_description_and_names() {
        let sig = Signature::define(
            "BasicQA",
            "Answer questions with short factoid answers.",
            vec![FieldSpec::input("question"), FieldSpec::output("answer")],
        )
        .unwrap();

        let text = sig.render_guidance();
        assert!(text.contains("Answer questions with short factoid answers."));
        assert!(text.contains("question"));
        assert!(text.contains("answer"));
        assert!(text.contains("Input fields:"));
        assert!(text.contains("Output fields:"));
    }

    #[test]
    fn test_guidance_is_deterministic() {
        let sig = production_qa();
        assert_eq!(sig.render_guidance(), sig.render_guidance());
    }

    #[test]
    fn test_guidance_field_notes() {
        let text = production_qa().render_guidance();

        assert!(text.contains("- question (text; 10-500 characters): User's question"));
        assert!(text.contains(
            "- confidence (one of: \"high\", \"medium\", \"low\"): Confidence level"
        ));
        assert!(text.contains("- evidence (text; optional): Supporting quote"));
    }

    #[test]
    fn test_inputs_render_before_outputs() {
        let text = production_qa().render_guidance();
        let inputs_at = text.find("Input fields:").unwrap();
        let outputs_at = text.find("Output fields:").unwrap();
        assert!(inputs_at < outputs_at);

        let question_at = text.find("- question").unwrap();
        let context_at = text.find("- context").unwrap();
        assert!(question_at < context_at);
    }

    #[test]
    fn test_format_hint_rendered() {
        let sig = Signature::define(
            "Extractor",
            "Extract publication data.",
            vec![
                FieldSpec::input("article_text"),
                FieldSpec::output("publication_date").with_format("YYYY-MM-DD"),
            ],
        )
        .unwrap();

        assert!(sig
            .render_guidance()
            .contains("- publication_date (text; format: YYYY-MM-DD)"));
    }

    #[test]
    fn test_field_guidance_single_line() {
        let sig = production_qa();
        let line = sig.render_field_guidance("confidence").unwrap();
        assert_eq!(
            line,
            "confidence (one of: \"high\", \"medium\", \"low\"): Confidence level"
        );

        let err = sig.render_field_guidance("bogus_field").unwrap_err();
        assert_eq!(err.field, "bogus_field");
    }

    #[test]
    fn test_empty_description_omits_task_line() {
        let sig = Signature::define(
            "Bare",
            "",
            vec![FieldSpec::input("text"), FieldSpec::output("label")],
        )
        .unwrap();

        let text = sig.render_guidance();
        assert!(!text.contains("Task:"));
        assert!(text.starts_with("Input fields:"));
    }
}
