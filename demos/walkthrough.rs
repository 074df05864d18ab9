//! Tier-by-tier tour of the prompt signature toolkit

use prompt_signatures::{catalog, Binding, FieldSpec, Signature};
use std::error::Error;

type Result<T> = std::result::Result<T, Box<dyn Error>>;

fn main() -> Result<()> {
    // Example 1: A minimal signature, names only
    minimal_signature_example()?;

    // Example 2: Refinement from bare names to production constraints
    refinement_example()?;

    // Example 3: Validating bindings against a production signature
    validation_example()?;

    // Example 4: Unknown fields are errors, not violations
    unknown_field_example()?;

    // Example 5: Declaring a custom signature
    custom_signature_example()?;

    Ok(())
}

/// Example 1: A minimal signature, names only
fn minimal_signature_example() -> Result<()> {
    println!("=== Minimal Signature Example ===");

    // Names carry the whole contract; every field is implicit free text
    let signature = catalog::basic_qa();
    println!(
        "Signature '{}' declares {} fields",
        signature.name(),
        signature.fields().len()
    );
    println!();
    println!("{}", signature.render_guidance());

    Ok(())
}

/// Example 2: Refinement from bare names to production constraints
fn refinement_example() -> Result<()> {
    println!("=== Refinement Example ===");

    let v1 = catalog::sentiment_v1();
    let v2 = catalog::sentiment_v2();
    let v3 = catalog::sentiment_v3();

    // Field names stay stable across tiers; each tier adds guidance
    // and constraints without renaming anything
    println!("v1 fields: {:?}", v1.field_names());
    println!("v2 fields: {:?}", v2.field_names());
    println!("v3 fields: {:?}", v3.field_names());
    println!();
    println!("Production-tier guidance:");
    println!();
    println!("{}", v3.render_guidance());

    Ok(())
}

/// Example 3: Validating bindings against a production signature
fn validation_example() -> Result<()> {
    println!("=== Validation Example ===");

    let signature = catalog::production_qa();

    // A complete, well-formed binding passes every check
    let good = Binding::new()
        .set("question", "What is the capital of France?")
        .set(
            "context",
            "France is a country in Western Europe. Its capital is Paris.",
        )
        .set("answer", "Paris")
        .set("confidence", "high")
        .set("evidence", "Its capital is Paris.");
    let violations = signature.validate_binding(&good)?;
    println!("Well-formed binding: {} violations", violations.len());

    // A flawed binding reports one violation per broken rule
    let flawed = Binding::new()
        .set("question", "Too short")
        .set("context", "France is a country in Western Europe.")
        .set("answer", "Paris")
        .set("confidence", "certain");
    let violations = signature.validate_binding(&flawed)?;
    println!("Flawed binding: {} violations", violations.len());
    for violation in &violations {
        println!("  {}", violation);
    }
    println!();

    Ok(())
}

/// Example 4: Unknown fields are errors, not violations
fn unknown_field_example() -> Result<()> {
    println!("=== Unknown Field Example ===");

    let signature = catalog::basic_qa();
    let binding = Binding::new()
        .set("question", "What is the capital of France?")
        .set("bogus_field", "anything");

    // An undeclared field name means the caller and the contract disagree,
    // so validation refuses to produce a report at all
    match signature.validate_binding(&binding) {
        Ok(_) => println!("Unexpected: undeclared field accepted"),
        Err(e) => println!("Rejected: {}", e),
    }
    println!();

    Ok(())
}

/// Example 5: Declaring a custom signature
fn custom_signature_example() -> Result<()> {
    println!("=== Custom Signature Example ===");

    let signature = Signature::builder("SupportTriage")
        .description("Route customer messages to the right support queue.")
        .field(
            FieldSpec::input("message")
                .with_description("Customer message (10-2000 characters)")
                .min_chars(10)
                .max_chars(2000),
        )
        .field(
            FieldSpec::output("queue")
                .with_enumeration(["billing", "technical", "account", "other"])
                .with_description("Destination support queue"),
        )
        .field(FieldSpec::output("summary").with_description("One-sentence summary for the agent"))
        .define()?;

    println!("{}", signature.render_guidance());

    let binding = Binding::new()
        .set("message", "I was charged twice for my subscription this month.")
        .set("queue", "billing")
        .set("summary", "Duplicate subscription charge.");
    let violations = signature.validate_binding(&binding)?;
    println!("Binding violations: {}", violations.len());

    Ok(())
}
