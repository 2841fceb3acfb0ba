//! Strict scalar coercion.
//!
//! Callers arrive through a protocol boundary that may flatten numbers and
//! booleans to strings, so each coercion recovers original intent from
//! either the native JSON type or an unambiguous string form. Anything
//! ambiguous is rejected with a [`TypeMismatch`](EngineError::TypeMismatch)
//! naming the expected type; there is no silent fallback.

use crate::error::EngineError;
use crate::error::Result;
use crate::oracle::Lookup;
use crate::oracle::TypeKind;
use crate::oracle::TypeOracle;
use crate::typeexpr::TypeExpr;
use crate::validators;
use crate::value::Value;
use indexmap::IndexMap;

fn mismatch(expected: &str, got: &serde_json::Value) -> EngineError {
    EngineError::TypeMismatch {
        expected: expected.to_string(),
        value: got.to_string(),
    }
}

/// Coerce to a GraphQL `Int`: native whole numbers, or strings that parse
/// as an integer with nothing left over. Booleans, genuine floats, and
/// non-numeric strings are rejected.
pub fn coerce_int(json: &serde_json::Value) -> Result<i64> {
    match json {
        serde_json::Value::Number(num) => {
            num.as_i64().ok_or_else(|| mismatch("Int", json))
        },
        serde_json::Value::String(text) => {
            text.trim().parse::<i64>().map_err(|_| mismatch("Int", json))
        },
        _ => Err(mismatch("Int", json)),
    }
}

/// Coerce to a GraphQL `Float`: native numbers, or finite numeric strings
/// (decimals and sign allowed). Empty and non-finite strings are rejected.
pub fn coerce_float(json: &serde_json::Value) -> Result<f64> {
    match json {
        serde_json::Value::Number(num) => {
            num.as_f64().ok_or_else(|| mismatch("Float", json))
        },
        serde_json::Value::String(text) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Err(mismatch("Float", json));
            }
            match trimmed.parse::<f64>() {
                Ok(parsed) if parsed.is_finite() => Ok(parsed),
                _ => Err(mismatch("Float", json)),
            }
        },
        _ => Err(mismatch("Float", json)),
    }
}

/// Coerce to a GraphQL `Boolean`: native booleans, or the case-insensitive
/// strings `"true"`/`"false"`. Numeric 0/1 and any other token are
/// rejected.
pub fn coerce_boolean(json: &serde_json::Value) -> Result<bool> {
    match json {
        serde_json::Value::Bool(value) => Ok(*value),
        serde_json::Value::String(text) => {
            match text.trim().to_ascii_lowercase().as_str() {
                "true" => Ok(true),
                "false" => Ok(false),
                _ => Err(mismatch("Boolean", json)),
            }
        },
        _ => Err(mismatch("Boolean", json)),
    }
}

/// Coerce to `String`/`ID`: strings pass through the structural
/// validators; non-integral numbers are accepted for `ID` and
/// stringified; everything else is rejected.
pub fn coerce_string(json: &serde_json::Value, type_name: &str) -> Result<String> {
    match json {
        serde_json::Value::String(text) => {
            validators::validate_string_value(text)?;
            Ok(text.clone())
        },
        serde_json::Value::Number(num) if type_name == "ID" => Ok(num.to_string()),
        _ => Err(mismatch(type_name, json)),
    }
}

/// Coerce a loosely-typed JSON value against a resolved type annotation,
/// recursing through list wrappers and input-object fields. `oracle`
/// supplies enum members and input field types where it can; an `Unknown`
/// answer skips that schema-aware check (never the scalar checks above).
pub fn coerce_value(
    json: &serde_json::Value,
    target: &TypeExpr,
    oracle: &dyn TypeOracle,
) -> Result<Value> {
    if json.is_null() {
        return if target.nullable() {
            Ok(Value::Null)
        } else {
            Err(mismatch(&target.to_graphql_string(), json))
        };
    }

    match target {
        TypeExpr::List { of, .. } => {
            match json {
                serde_json::Value::Array(items) => Ok(Value::List(
                    items.iter()
                        .map(|item| coerce_value(item, of, oracle))
                        .collect::<Result<Vec<_>>>()?,
                )),
                // A single value coerces to a one-item list per the
                // GraphQL input coercion rules.
                _ => Ok(Value::List(vec![coerce_value(json, of, oracle)?])),
            }
        },

        TypeExpr::Named { name, .. } => coerce_named(json, name, oracle),
    }
}

fn coerce_named(
    json: &serde_json::Value,
    type_name: &str,
    oracle: &dyn TypeOracle,
) -> Result<Value> {
    match type_name {
        "Int" => return Ok(Value::Int(coerce_int(json)?)),
        "Float" => return Ok(Value::Float(coerce_float(json)?)),
        "Boolean" => return Ok(Value::Bool(coerce_boolean(json)?)),
        "String" | "ID" => {
            // Integral IDs keep their numeric form so they render
            // unquoted.
            if type_name == "ID"
                && let serde_json::Value::Number(num) = json
                && let Some(int) = num.as_i64() {
                return Ok(Value::Int(int));
            }
            return Ok(Value::String(coerce_string(json, type_name)?));
        },
        _ => {},
    }

    match oracle.type_kind(type_name) {
        Lookup::Known(TypeKind::Enum) => coerce_enum(json, type_name, oracle),
        Lookup::Known(TypeKind::InputObject) => {
            coerce_input_object(json, type_name, oracle)
        },
        Lookup::Known(TypeKind::Scalar) => {
            // Custom scalar: accept any JSON shape as-is.
            Ok(Value::from_json(json))
        },
        Lookup::Known(kind) => Err(EngineError::TypeMismatch {
            expected: format!("{type_name} (an input type)"),
            value: format!("{} kind `{}`", type_name, kind.name()),
        }),
        // Schema unavailable for this name: pass the value through.
        Lookup::Unknown => Ok(Value::from_json(json)),
    }
}

fn coerce_enum(
    json: &serde_json::Value,
    enum_name: &str,
    oracle: &dyn TypeOracle,
) -> Result<Value> {
    let serde_json::Value::String(member) = json else {
        return Err(mismatch(enum_name, json));
    };
    validators::validate_string_value(member)?;
    if let Lookup::Known(members) = oracle.enum_members(enum_name)
        && !members.iter().any(|candidate| candidate == member) {
        return Err(EngineError::TypeMismatch {
            expected: format!("enum {enum_name} ({})", members.join(", ")),
            value: member.clone(),
        });
    }
    Ok(Value::Enum(member.clone()))
}

fn coerce_input_object(
    json: &serde_json::Value,
    input_object: &str,
    oracle: &dyn TypeOracle,
) -> Result<Value> {
    let serde_json::Value::Object(entries) = json else {
        return Err(mismatch(input_object, json));
    };

    let mut coerced = IndexMap::new();
    for (key, entry) in entries {
        validators::validate_name("input field", key)?;
        let value = match oracle.input_field_type(input_object, key) {
            Lookup::Known(field_type) => coerce_value(entry, &field_type, oracle)?,
            Lookup::Unknown => Value::from_json(entry),
        };
        coerced.insert(key.clone(), value);
    }
    Ok(Value::Object(coerced))
}
