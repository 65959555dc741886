//! Message template interpolation.
//!
//! Templates substitute `{name}` placeholders from the constraint's
//! attribute map, plus the builtin `{validated_value}` placeholder carrying
//! the offending element. Unknown placeholders are preserved verbatim.

use crate::types::Value;
use serde_json::Map;

/// Builtin placeholder replaced with the validated element itself.
const VALIDATED_VALUE: &str = "validated_value";

/// Interpolates a message template against the given attribute map.
pub(crate) fn interpolate(
    template: &str,
    attributes: &Map<String, Value>,
    validated_value: &Value,
) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open..];
        match tail.find('}') {
            Some(close) => {
                let name = &tail[1..close];
                if name == VALIDATED_VALUE {
                    out.push_str(&render(validated_value));
                } else if let Some(value) = attributes.get(name) {
                    out.push_str(&render(value));
                } else {
                    out.push_str(&tail[..=close]);
                }
                rest = &tail[close + 1..];
            }
            // unterminated placeholder, keep the rest as-is
            None => {
                out.push_str(tail);
                return out;
            }
        }
    }
    out.push_str(rest);
    out
}

/// Renders an attribute value for embedding in a message. Strings are
/// embedded without quotes, everything else in its JSON form.
fn render(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
