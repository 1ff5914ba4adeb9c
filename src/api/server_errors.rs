//! Mapping of backend validation responses onto form fields
//!
//! A rejected create/update answers with a body like
//! `{"message": "...", "errors": {"amount": ["..."]}}`. The messages are
//! attached to the matching form fields the same way local validation
//! failures are.

use serde_json::Value;

use crate::error::{QuokkaError, QuokkaResult};
use crate::models::{FieldErrors, FormField};

/// Parse a server error body into field errors
///
/// Accepts both the wrapped form (`{"errors": {...}}`) and a bare field map.
/// A single string is treated like a one-element message list. When the
/// body has no field errors, its top-level `message` becomes a general error.
pub fn parse_server_errors<F: FormField>(body: &str) -> QuokkaResult<FieldErrors<F>> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| QuokkaError::Json(format!("Failed to parse server error body: {}", e)))?;

    let Value::Object(root) = &value else {
        return Err(QuokkaError::Json(
            "Server error body must be a JSON object".into(),
        ));
    };

    let field_map = match root.get("errors") {
        Some(Value::Object(errors)) => errors,
        _ => root,
    };

    let entries: Vec<(&str, Vec<String>)> = field_map
        .iter()
        .filter(|(key, _)| key.as_str() != "message")
        .filter_map(|(key, messages)| messages_of(messages).map(|m| (key.as_str(), m)))
        .collect();

    let mut errors = FieldErrors::from_api_map(entries);

    if errors.is_empty() {
        if let Some(Value::String(message)) = root.get("message") {
            errors.add_general(message.clone());
        }
    }

    Ok(errors)
}

fn messages_of(value: &Value) -> Option<Vec<String>> {
    match value {
        Value::String(message) => Some(vec![message.clone()]),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
        ),
        _ => None,
    }
}
