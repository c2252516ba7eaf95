//! Pattern matching for field expectations.
//!
//! Patterns are tried in order: glob, then regex, then literal comparison.
//! Non-string values are matched against their JSON rendering.

use glob::Pattern;
use regex::Regex;
use serde_json::Value;

/// Match a pattern against a single field value.
///
/// Supports three matching modes (tried in order):
/// 1. **Glob patterns**: e.g., `*.txt`, `order-*`
/// 2. **Regex**: e.g., `^v\d+\.\d+$`
/// 3. **Literal match**: exact string comparison
///
/// # Example
///
/// ```rust
/// use attest::value_matches;
/// use serde_json::json;
///
/// assert!(value_matches("order-*", &json!("order-1041")));
/// assert!(value_matches(r"^\d+$", &json!(42)));
/// assert!(!value_matches("order-*", &json!("invoice-7")));
/// ```
pub fn value_matches(pattern: &str, actual: &Value) -> bool {
    let actual_str = match actual {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    // Try glob pattern first
    if let Ok(glob) = Pattern::new(pattern) {
        if glob.matches(&actual_str) {
            return true;
        }
    }

    // Try regex
    if let Ok(re) = Regex::new(pattern) {
        if re.is_match(&actual_str) {
            return true;
        }
    }

    // Literal fallback
    actual_str == pattern
}
