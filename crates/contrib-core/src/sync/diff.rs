//! Field-level differences between two JSON values

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use similar::TextDiff;

/// Maximum recursion depth for diff operations
const MAX_DIFF_DEPTH: usize = 64;

/// One difference at a dotted path such as `icon.dark` or `[2]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "change", rename_all = "lowercase")]
pub enum FieldChange {
    Added { path: String, value: Value },
    Removed { path: String, value: Value },
    Modified { path: String, old: Value, new: Value },
}

impl FieldChange {
    pub fn path(&self) -> &str {
        match self {
            FieldChange::Added { path, .. }
            | FieldChange::Removed { path, .. }
            | FieldChange::Modified { path, .. } => path,
        }
    }
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldChange::Added { path, value } => write!(f, "+ {path}: {value}"),
            FieldChange::Removed { path, value } => write!(f, "- {path}: {value}"),
            FieldChange::Modified { path, old, new } => write!(f, "~ {path}: {old} -> {new}"),
        }
    }
}

/// Lists every difference from `old` to `new`.
pub fn diff_values(old: &Value, new: &Value) -> Vec<FieldChange> {
    let mut changes = Vec::new();
    diff_at(old, new, String::new(), &mut changes, 0);
    changes
}

fn diff_at(old: &Value, new: &Value, path: String, changes: &mut Vec<FieldChange>, depth: usize) {
    if depth > MAX_DIFF_DEPTH {
        if old != new {
            changes.push(FieldChange::Modified {
                path,
                old: old.clone(),
                new: new.clone(),
            });
        }
        return;
    }

    match (old, new) {
        (Value::Object(old_obj), Value::Object(new_obj)) => {
            for (key, old_value) in old_obj {
                let child = join_key(&path, key);
                match new_obj.get(key) {
                    Some(new_value) => diff_at(old_value, new_value, child, changes, depth + 1),
                    None => changes.push(FieldChange::Removed {
                        path: child,
                        value: old_value.clone(),
                    }),
                }
            }
            for (key, new_value) in new_obj {
                if !old_obj.contains_key(key) {
                    changes.push(FieldChange::Added {
                        path: join_key(&path, key),
                        value: new_value.clone(),
                    });
                }
            }
        }
        (Value::Array(old_arr), Value::Array(new_arr)) => {
            for i in 0..old_arr.len().max(new_arr.len()) {
                let child = format!("{path}[{i}]");
                match (old_arr.get(i), new_arr.get(i)) {
                    (Some(o), Some(n)) => diff_at(o, n, child, changes, depth + 1),
                    (Some(o), None) => changes.push(FieldChange::Removed {
                        path: child,
                        value: o.clone(),
                    }),
                    (None, Some(n)) => changes.push(FieldChange::Added {
                        path: child,
                        value: n.clone(),
                    }),
                    (None, None) => {}
                }
            }
        }
        _ => {
            if old != new {
                changes.push(FieldChange::Modified {
                    path,
                    old: old.clone(),
                    new: new.clone(),
                });
            }
        }
    }
}

fn join_key(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

/// Similarity ratio (0.0 to 1.0) of the compact JSON forms of two values.
pub fn similarity(old: &Value, new: &Value) -> f64 {
    if old == new {
        return 1.0;
    }
    let old_text = old.to_string();
    let new_text = new.to_string();
    f64::from(TextDiff::from_chars(&old_text, &new_text).ratio())
}
