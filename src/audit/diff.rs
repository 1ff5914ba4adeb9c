//! Diff generation for audit logging
//!
//! Summarises what changed between two serialized states, e.g. a settings
//! file before and after `quokka config set-min-amount`.

use serde_json::Value;

/// Short arrays (hourly-based id lists) are printed inline, longer ones as a count
const INLINE_ARRAY_LIMIT: usize = 8;

/// Generate a human-readable diff between two JSON values
///
/// Nested objects are walked and reported with dotted paths.
pub fn generate_diff(before: &Value, after: &Value) -> Option<String> {
    let mut changes = Vec::new();
    collect_changes(before, after, "", &mut changes);

    if changes.is_empty() {
        None
    } else {
        Some(changes.join(", "))
    }
}

fn collect_changes(before: &Value, after: &Value, path: &str, changes: &mut Vec<String>) {
    match (before, after) {
        (Value::Object(before_obj), Value::Object(after_obj)) => {
            for (key, before_val) in before_obj {
                let field = join_path(path, key);
                match after_obj.get(key) {
                    Some(after_val) => collect_changes(before_val, after_val, &field, changes),
                    None => changes.push(format!("{}: {} -> (removed)", field, format_value(before_val))),
                }
            }

            for (key, after_val) in after_obj {
                if !before_obj.contains_key(key) {
                    changes.push(format!(
                        "{}: (added) -> {}",
                        join_path(path, key),
                        format_value(after_val)
                    ));
                }
            }
        }
        _ if before != after => {
            let change = format!("{} -> {}", format_value(before), format_value(after));
            if path.is_empty() {
                changes.push(change);
            } else {
                changes.push(format!("{}: {}", path, change));
            }
        }
        _ => {}
    }
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

fn format_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => {
            if s.chars().count() > 50 {
                let head: String = s.chars().take(47).collect();
                format!("\"{}...\"", head)
            } else {
                format!("\"{}\"", s)
            }
        }
        Value::Array(items) if items.len() <= INLINE_ARRAY_LIMIT && items.iter().all(is_scalar) => {
            let inner: Vec<String> = items.iter().map(format_value).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(obj) => format!("{{{} fields}}", obj.len()),
    }
}

fn is_scalar(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}
