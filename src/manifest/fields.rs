//! Typed access to the fields of a decoded manifest document.
//!
//! Manifest documents carry no schema. Instead of letting a missing or
//! mistyped field quietly turn into an empty string or a zero, every lookup
//! goes through [`Fields`], which yields either a typed value, `None` for an
//! absent optional field, or a [`ChartError::Field`] naming the resource and
//! the dotted path of the offending field.

use serde_yaml::{Mapping, Value};

use crate::core::{ChartError, FieldProblem};

/// Describe the shape of a YAML value for error messages.
fn shape(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

/// A view over one mapping inside a manifest document.
#[derive(Debug, Clone)]
pub struct Fields<'a> {
    resource: &'a str,
    path: String,
    map: &'a Mapping,
}

impl<'a> Fields<'a> {
    /// View the top-level mapping of the resource described by `resource`.
    pub fn new(resource: &'a str, map: &'a Mapping) -> Self {
        Self {
            resource,
            path: String::new(),
            map,
        }
    }

    fn child_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    fn problem(&self, path: String, problem: FieldProblem) -> ChartError {
        ChartError::Field {
            resource: self.resource.to_string(),
            path,
            problem,
        }
    }

    fn wrong_shape(&self, key: &str, expected: &'static str, found: &Value) -> ChartError {
        self.problem(
            self.child_path(key),
            FieldProblem::WrongShape {
                expected,
                found: shape(found),
            },
        )
    }

    /// Raw value of `key`; explicit YAML nulls count as absent.
    pub fn get(&self, key: &str) -> Option<&'a Value> {
        match self.map.get(key) {
            None | Some(Value::Null) => None,
            Some(value) => Some(value),
        }
    }

    /// Whether `key` holds a non-null value.
    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn str(&self, key: &str) -> Result<Option<&'a str>, ChartError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(other) => Err(self.wrong_shape(key, "a string", other)),
        }
    }

    pub fn require_str(&self, key: &str) -> Result<&'a str, ChartError> {
        self.str(key)?.ok_or_else(|| self.problem(self.child_path(key), FieldProblem::Missing))
    }

    /// Non-negative integer that fits in 32 bits.
    pub fn uint(&self, key: &str) -> Result<Option<u32>, ChartError> {
        let Some(value) = self.get(key) else {
            return Ok(None);
        };
        value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(Some)
            .ok_or_else(|| self.wrong_shape(key, "a non-negative integer", value))
    }

    /// A resource quantity such as `500m` or `1`, kept in its textual form.
    pub fn quantity(&self, key: &str) -> Result<Option<String>, ChartError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(other) => Err(self.wrong_shape(key, "a quantity", other)),
        }
    }

    pub fn map(&self, key: &str) -> Result<Option<Fields<'a>>, ChartError> {
        match self.get(key) {
            None => Ok(None),
            Some(Value::Mapping(map)) => Ok(Some(Fields {
                resource: self.resource,
                path: self.child_path(key),
                map,
            })),
            Some(other) => Err(self.wrong_shape(key, "a mapping", other)),
        }
    }

    pub fn require_map(&self, key: &str) -> Result<Fields<'a>, ChartError> {
        self.map(key)?.ok_or_else(|| self.problem(self.child_path(key), FieldProblem::Missing))
    }

    /// Elements of a sequence; an absent sequence is empty.
    pub fn seq(&self, key: &str) -> Result<&'a [Value], ChartError> {
        match self.get(key) {
            None => Ok(&[]),
            Some(Value::Sequence(items)) => Ok(items.as_slice()),
            Some(other) => Err(self.wrong_shape(key, "a sequence", other)),
        }
    }

    /// View element `index` of sequence `key`, which must be a mapping.
    pub fn item(&self, key: &str, index: usize, value: &'a Value) -> Result<Fields<'a>, ChartError> {
        let path = format!("{}[{index}]", self.child_path(key));
        match value {
            Value::Mapping(map) => Ok(Fields {
                resource: self.resource,
                path,
                map,
            }),
            other => Err(self.problem(
                path,
                FieldProblem::WrongShape {
                    expected: "a mapping",
                    found: shape(other),
                },
            )),
        }
    }

    /// All mapping elements of sequence `key`, in order.
    pub fn items(&self, key: &str) -> Result<Vec<Fields<'a>>, ChartError> {
        self.seq(key)?.iter().enumerate().map(|(i, value)| self.item(key, i, value)).collect()
    }
}
