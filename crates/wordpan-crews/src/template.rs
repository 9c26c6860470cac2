//! `{placeholder}` interpolation for agent and task prompts.

use serde_json::{Map, Value};

/// Replaces `{name}` with `inputs[name]`.
///
/// Strings are inserted verbatim, other values as compact JSON. Placeholders
/// without a matching input, and braces that do not wrap an identifier, are
/// left untouched.
pub fn render(template: &str, inputs: &Map<String, Value>) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];

        let key_len = after
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
            .unwrap_or(after.len());
        let key = &after[..key_len];

        if key_len > 0 && after[key_len..].starts_with('}') {
            if let Some(value) = inputs.get(key) {
                match value {
                    Value::String(s) => out.push_str(s),
                    other => out.push_str(&other.to_string()),
                }
                rest = &after[key_len + 1..];
                continue;
            }
        }

        out.push('{');
        rest = after;
    }

    out.push_str(rest);
    out
}
