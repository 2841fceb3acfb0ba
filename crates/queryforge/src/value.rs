use indexmap::IndexMap;
use std::collections::BTreeSet;

/// A GraphQL input literal as it will appear in the rendered document.
///
/// `VarRef` carries the referenced variable's name including its leading
/// `$` sigil, matching the keys of the document's variable maps.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum Value {
    VarRef(String),
    Int(i64),
    Float(f64),
    String(String),
    Bool(bool),
    Null,
    Enum(String),
    List(Vec<Value>),
    Object(IndexMap<String, Value>),
}

impl Value {
    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(str) = self {
            Some(str.as_str())
        } else {
            None
        }
    }

    /// Convert a loosely-typed JSON value into a literal, without any
    /// schema awareness. Whole numbers become `Int`, everything else
    /// numeric becomes `Float`.
    pub fn from_json(json: &serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Null,

            serde_json::Value::Bool(value) => Value::Bool(*value),

            serde_json::Value::Number(num) => {
                if let Some(int) = num.as_i64() {
                    Value::Int(int)
                } else {
                    Value::Float(num.as_f64().unwrap_or(f64::MAX))
                }
            },

            serde_json::Value::String(value) => Value::String(value.clone()),

            serde_json::Value::Array(values) => Value::List(
                values.iter().map(Value::from_json).collect(),
            ),

            serde_json::Value::Object(entries) => Value::Object(
                entries.iter()
                    .map(|(key, value)| (key.clone(), Value::from_json(value)))
                    .collect(),
            ),
        }
    }

    /// Convert back to JSON for transport payloads (e.g. the `variables`
    /// object POSTed at execution time).
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::VarRef(name) => serde_json::Value::String(name.clone()),
            Value::Int(value) => serde_json::Value::from(*value),
            Value::Float(value) => serde_json::Value::from(*value),
            Value::String(value) => serde_json::Value::String(value.clone()),
            Value::Bool(value) => serde_json::Value::Bool(*value),
            Value::Null => serde_json::Value::Null,
            Value::Enum(value) => serde_json::Value::String(value.clone()),
            Value::List(values) => serde_json::Value::Array(
                values.iter().map(Value::to_json).collect(),
            ),
            Value::Object(entries) => serde_json::Value::Object(
                entries.iter()
                    .map(|(key, value)| (key.clone(), value.to_json()))
                    .collect(),
            ),
        }
    }

    /// Render this literal as GraphQL source text. Only genuine strings are
    /// quoted; numbers, booleans, null, enum values, and variable
    /// references render bare.
    pub fn to_graphql(&self) -> String {
        match self {
            Value::VarRef(name) => name.clone(),

            Value::Int(value) => value.to_string(),

            Value::Float(value) => {
                let rendered = value.to_string();
                // A float literal must not be mistaken for an int literal.
                if rendered.contains('.') || rendered.contains('e') {
                    rendered
                } else {
                    format!("{rendered}.0")
                }
            },

            Value::String(value) => quote_string(value),

            Value::Bool(value) => value.to_string(),

            Value::Null => "null".to_string(),

            Value::Enum(value) => value.clone(),

            Value::List(values) => format!(
                "[{}]",
                values.iter()
                    .map(Value::to_graphql)
                    .collect::<Vec<_>>()
                    .join(", "),
            ),

            Value::Object(entries) => format!(
                "{{{}}}",
                entries.iter()
                    .map(|(key, value)| format!("{key}: {}", value.to_graphql()))
                    .collect::<Vec<_>>()
                    .join(", "),
            ),
        }
    }

    /// True if this literal references the given variable anywhere within
    /// it. A bare string equal to the variable name counts as a reference
    /// (the legacy implicit-string form).
    pub fn references_variable(&self, variable_name: &str) -> bool {
        match self {
            Value::VarRef(name) => name == variable_name,
            Value::String(value) => value == variable_name,
            Value::List(values) => values.iter().any(
                |value| value.references_variable(variable_name),
            ),
            Value::Object(entries) => entries.values().any(
                |value| value.references_variable(variable_name),
            ),
            _ => false,
        }
    }

    /// Collect every explicit `VarRef` name reachable from this literal.
    /// Bare strings are not candidates here; they only count when matched
    /// against a concrete name via [`references_variable`](Self::references_variable).
    pub fn collect_variable_refs<'val>(&'val self, found: &mut BTreeSet<&'val str>) {
        match self {
            Value::VarRef(name) => {
                found.insert(name.as_str());
            },
            Value::List(values) => {
                for value in values {
                    value.collect_variable_refs(found);
                }
            },
            Value::Object(entries) => {
                for value in entries.values() {
                    value.collect_variable_refs(found);
                }
            },
            _ => {},
        }
    }
}

/// Quote and escape a string per the GraphQL string-literal grammar.
pub(crate) fn quote_string(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for ch in value.chars() {
        match ch {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            ch if ch.is_control() => {
                quoted.push_str(&format!("\\u{:04x}", ch as u32));
            },
            ch => quoted.push(ch),
        }
    }
    quoted.push('"');
    quoted
}
