//! Basic element-wise validation of a heterogeneous collection.

use each_valid::prelude::*;
use serde_json::json;

fn main() -> Result<()> {
    // Every element of the collection must have a size between 1 and 10:
    // characters for text, elements for sequences, entries for maps.
    let validator = EachValidator::new(Constraint::length(1, 10))?;

    let values = vec![
        json!("alpha"),
        json!([1, 2, 3]),
        json!({"name": "beta"}),
        json!(""),
    ];

    match validator.validate(&values)? {
        violations if violations.is_empty() => println!("all elements are valid"),
        violations => {
            for violation in violations {
                println!("{violation}");
            }
        }
    }

    // Numeric constraints dispatch on the element's concrete kind; int and
    // float elements share the range rule.
    let range = EachValidator::new(Constraint::range(0, 100))?;
    println!(
        "mixed numbers valid: {}",
        range.is_valid(&[json!(5), json!(99.5)])?
    );

    Ok(())
}
