//! Composite rule sets and message overrides.

use each_valid::prelude::*;
use serde_json::json;

fn main() -> Result<()> {
    // Two configurations of the same constraint kind, checked per element
    // in declaration order, each with its own message.
    let validator = EachValidator::builder()
        .constraint(ConstraintDescriptor::with_message(
            Constraint::length(3, u64::MAX),
            "'{validated_value}' is shorter than {min} characters",
        ))
        .constraint(ConstraintDescriptor::with_message(
            Constraint::length(0, 8),
            "'{validated_value}' is longer than {max} characters",
        ))
        .stop_on_first(false)
        .build()?;

    let tags = vec![
        json!("rust"),
        json!("ab"),
        json!("observability"),
        json!("cache"),
    ];

    for violation in validator.validate(&tags)? {
        println!("tag {}: {}", violation.index, violation.message);
    }

    Ok(())
}
