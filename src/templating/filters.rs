//! Custom Tera filters for chart templates.
//!
//! - `reindent(width=N)`: prefix every non-empty line with `N` spaces. Used to
//!   splice pre-serialized YAML (role rules) under a parent key.

use std::collections::HashMap;

use tera::Value;

/// Indent every non-empty line of `text` by `width` spaces.
///
/// Blank lines stay empty so no trailing whitespace is introduced.
///
/// ```
/// use kube_chartgen::templating::indent;
///
/// assert_eq!(indent("a:\n\n  b: 1", 2), "  a:\n\n    b: 1");
/// ```
pub fn indent(text: &str, width: usize) -> String {
    let pad = " ".repeat(width);
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{pad}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Tera adapter for [`indent`].
///
/// # Errors
///
/// Fails when the input is not a string or `width` is missing or not a
/// non-negative integer.
pub fn reindent_filter(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let text = value.as_str().ok_or_else(|| tera::Error::msg("reindent filter requires a string"))?;
    let width = args
        .get("width")
        .and_then(Value::as_u64)
        .ok_or_else(|| tera::Error::msg("reindent filter requires a non-negative integer `width`"))?;
    let width = usize::try_from(width).map_err(|_| tera::Error::msg("reindent width is too large"))?;

    Ok(Value::String(indent(text, width)))
}
