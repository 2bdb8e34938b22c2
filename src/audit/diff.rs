//! Field-level change summaries for audit entries

use serde_json::Value;

/// Bookkeeping fields that change on every write and are not worth reporting
const IGNORED_FIELDS: &[&str] = &["updated_at"];

/// Describe each top-level field that differs between two JSON objects
///
/// Non-object values are compared as a whole.
pub fn changed_fields(before: &Value, after: &Value) -> Vec<String> {
    let (Value::Object(before_obj), Value::Object(after_obj)) = (before, after) else {
        return if before == after {
            Vec::new()
        } else {
            vec![format!("{} -> {}", render(before), render(after))]
        };
    };

    let mut changes = Vec::new();
    for (key, old) in before_obj {
        if IGNORED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        match after_obj.get(key) {
            Some(new) if new != old => {
                changes.push(format!("{}: {} -> {}", key, render(old), render(new)))
            }
            Some(_) => {}
            None => changes.push(format!("{}: {} -> (removed)", key, render(old))),
        }
    }
    for (key, new) in after_obj {
        if !before_obj.contains_key(key) && !IGNORED_FIELDS.contains(&key.as_str()) {
            changes.push(format!("{}: (added) -> {}", key, render(new)));
        }
    }
    changes
}

fn render(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > 40 => {
            let head: String = s.chars().take(37).collect();
            format!("\"{}...\"", head)
        }
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_nested_rule_change() {
        let before = json!({"rule": {"frequency": "monthly"}, "updated_at": "a"});
        let after = json!({"rule": {"frequency": "weekly"}, "updated_at": "b"});
        assert_eq!(
            changed_fields(&before, &after),
            vec!["rule: {1 fields} -> {1 fields}".to_string()]
        );
    }

    #[test]
    fn test_added_and_removed_fields() {
        let before = json!({"recurring_id": "x"});
        let after = json!({"paid": true});
        let changes = changed_fields(&before, &after);
        assert_eq!(
            changes,
            vec![
                "recurring_id: \"x\" -> (removed)".to_string(),
                "paid: (added) -> true".to_string(),
            ]
        );
    }

    #[test]
    fn test_identical_values() {
        assert!(changed_fields(&json!({"a": 1}), &json!({"a": 1})).is_empty());
        assert_eq!(changed_fields(&json!(1), &json!(2)), vec!["1 -> 2".to_string()]);
    }

    #[test]
    fn test_long_strings_truncated() {
        let long = "x".repeat(60);
        let changes = changed_fields(&json!({"d": ""}), &json!({"d": long}));
        assert!(changes[0].ends_with("...\""));
    }
}
