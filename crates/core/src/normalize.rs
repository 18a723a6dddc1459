use once_cell::sync::Lazy;
use serde_json::Value;
use std::collections::HashSet;

/// Tokens that spreadsheets and CSV exports use for "no value". Compared
/// against the trimmed, lower-cased form of a string; the original string is
/// never altered when it survives the check.
static MISSING_TOKENS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["nan", "null", "none", "n/a", "na", ""]
        .into_iter()
        .collect()
});

fn is_missing_token(raw: &str) -> bool {
    MISSING_TOKENS.contains(raw.trim().to_lowercase().as_str())
}

/// Maps placeholder values to `Value::Null` so the index never stores the
/// literal text "NaN", "null", etc. Everything else passes through
/// unchanged. Idempotent.
pub fn normalize_value(value: Value) -> Value {
    match value {
        Value::Null => Value::Null,
        Value::Number(number) => match number.as_f64() {
            Some(float) if !float.is_finite() => Value::Null,
            _ => Value::Number(number),
        },
        Value::String(text) => {
            if is_missing_token(&text) {
                Value::Null
            } else {
                Value::String(text)
            }
        }
        other => other,
    }
}

/// Float counterpart for callers that hold an `f64` before it reaches JSON
/// (a JSON number can never be NaN or infinite, so the `Value` path alone
/// cannot express this rule).
pub fn normalize_f64(value: f64) -> Option<f64> {
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}
