use crate::coerce;
use crate::engine::Engine;
use crate::error::EngineError;
use crate::error::Result;
use crate::model::Argument;
use crate::model::QueryDocument;
use crate::oracle::Lookup;
use crate::oracle::TypeKind;
use crate::typeexpr::TypeExpr;
use crate::validators;
use crate::value::Value;

#[derive(Clone, Debug, serde::Serialize)]
pub struct SetArgumentResponse {
    pub session_id: String,
    pub field_path: String,
    pub argument_name: String,
    /// How the argument was stored: `literal`, `typed`, or `variable`.
    pub stored_as: &'static str,
    pub message: String,
}

impl Engine {
    /// Set an argument from a plain string. Stored as a bare literal
    /// unless the schema resolves the argument to a non-string scalar or
    /// enum, in which case the string is coerced so that e.g. pagination
    /// arguments supplied as `"10"` still serialize unquoted.
    pub async fn set_string_argument(
        &self,
        session_id: &str,
        field_path: &str,
        argument_name: &str,
        value: &str,
    ) -> Result<SetArgumentResponse> {
        validators::validate_name("argument", argument_name)?;
        validators::validate_string_value(value)?;
        if let Ok(int) = value.trim().parse::<i64>() {
            validators::validate_pagination_value(argument_name, int)?;
        }

        let document = self.load_session(session_id).await?;
        document.node_at(field_path)?;

        let argument = match self.argument_type_at(&document, field_path, argument_name) {
            Lookup::Known(target) => {
                coerce_string_for_target(value, &target, self)?
            },
            Lookup::Unknown => Argument::Literal(value.to_string()),
        };

        self.store_argument(
            session_id, document, field_path, argument_name, argument,
        ).await
    }

    /// Set an argument from a native JSON value the caller declares to be
    /// correctly typed. The value is still coerced/validated against the
    /// resolved schema type before being stored.
    pub async fn set_typed_argument(
        &self,
        session_id: &str,
        field_path: &str,
        argument_name: &str,
        value: &serde_json::Value,
    ) -> Result<SetArgumentResponse> {
        validators::validate_name("argument", argument_name)?;
        validate_json_value(argument_name, value)?;

        let document = self.load_session(session_id).await?;
        document.node_at(field_path)?;

        let coerced = match self.argument_type_at(&document, field_path, argument_name) {
            Lookup::Known(target) => coerce::coerce_value(value, &target, self.oracle())?,
            Lookup::Unknown => Value::from_json(value),
        };

        self.store_argument(
            session_id, document, field_path, argument_name, Argument::Typed(coerced),
        ).await
    }

    /// Bind an argument to a previously declared variable.
    pub async fn set_variable_argument(
        &self,
        session_id: &str,
        field_path: &str,
        argument_name: &str,
        variable_name: &str,
    ) -> Result<SetArgumentResponse> {
        validators::validate_name("argument", argument_name)?;
        validators::validate_variable_name(variable_name)?;

        let document = self.load_session(session_id).await?;
        document.node_at(field_path)?;
        if !document.is_variable_declared(variable_name) {
            return Err(EngineError::UndeclaredVariable {
                name: variable_name.to_string(),
            });
        }

        self.store_argument(
            session_id,
            document,
            field_path,
            argument_name,
            Argument::Variable(variable_name.to_string()),
        ).await
    }

    /// Bind a nested input-object value (arbitrary depth) to an
    /// argument. Nested scalar leaves are coerced per-field whenever the
    /// oracle can resolve the corresponding input field types.
    pub async fn set_input_object_argument(
        &self,
        session_id: &str,
        field_path: &str,
        argument_name: &str,
        fields: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<SetArgumentResponse> {
        validators::validate_name("argument", argument_name)?;
        let as_json = serde_json::Value::Object(fields.clone());
        validate_json_value(argument_name, &as_json)?;

        let document = self.load_session(session_id).await?;
        document.node_at(field_path)?;

        let coerced = match self.argument_type_at(&document, field_path, argument_name) {
            Lookup::Known(target) => {
                if let Lookup::Known(kind) =
                    self.oracle().type_kind(target.innermost_name())
                    && kind != TypeKind::InputObject {
                    return Err(EngineError::TypeMismatch {
                        expected: format!(
                            "input object for argument `{argument_name}`",
                        ),
                        value: format!(
                            "`{}` is {} kind",
                            target.innermost_name(),
                            kind.name(),
                        ),
                    });
                }
                coerce::coerce_value(&as_json, &target, self.oracle())?
            },
            Lookup::Unknown => Value::from_json(&as_json),
        };

        self.store_argument(
            session_id, document, field_path, argument_name, Argument::Typed(coerced),
        ).await
    }

    async fn store_argument(
        &self,
        session_id: &str,
        mut document: QueryDocument,
        field_path: &str,
        argument_name: &str,
        argument: Argument,
    ) -> Result<SetArgumentResponse> {
        let stored_as = match &argument {
            Argument::Literal(_) => "literal",
            Argument::Typed(_) => "typed",
            Argument::Variable(_) => "variable",
        };
        let node = document.node_at_mut(field_path)?;
        node.arguments.insert(argument_name.to_string(), argument);
        self.save_session(session_id, document).await?;
        tracing::debug!(
            session_id = %session_id,
            field_path = %field_path,
            argument = %argument_name,
            stored_as,
            "set argument",
        );
        Ok(SetArgumentResponse {
            session_id: session_id.to_string(),
            field_path: field_path.to_string(),
            argument_name: argument_name.to_string(),
            stored_as,
            message: format!(
                "Set {stored_as} argument `{argument_name}` on `{field_path}`",
            ),
        })
    }

    /// Resolve the schema type of an argument on the field at
    /// `field_path`, walking the document tree and the oracle in
    /// lock-step from the operation's root type. Any unresolvable hop
    /// yields `Unknown`.
    pub(crate) fn argument_type_at(
        &self,
        document: &QueryDocument,
        field_path: &str,
        argument_name: &str,
    ) -> Lookup<TypeExpr> {
        if field_path.is_empty() {
            return Lookup::Unknown;
        }
        let mut parent_type = document.root_type.clone();
        let mut node = &document.root;
        let segments: Vec<&str> = field_path.split('.').collect();

        for (index, segment) in segments.iter().enumerate() {
            let Some(child) = node.children.get(*segment) else {
                return Lookup::Unknown;
            };
            node = child;
            if index + 1 == segments.len() {
                return self.oracle().argument_type(
                    &parent_type,
                    &node.name,
                    argument_name,
                );
            }
            match self.oracle().field_type(&parent_type, &node.name) {
                Lookup::Known(field_type) => {
                    parent_type = field_type.innermost_name().to_string();
                },
                Lookup::Unknown => return Lookup::Unknown,
            }
        }
        Lookup::Unknown
    }
}

/// Generic validators applied to loosely-typed JSON before coercion:
/// string ceilings and the pagination bound.
fn validate_json_value(argument_name: &str, value: &serde_json::Value) -> Result<()> {
    match value {
        serde_json::Value::String(text) => validators::validate_string_value(text),
        serde_json::Value::Number(num) => {
            if let Some(int) = num.as_i64() {
                validators::validate_pagination_value(argument_name, int)?;
            }
            Ok(())
        },
        serde_json::Value::Array(items) => {
            for item in items {
                validate_json_value(argument_name, item)?;
            }
            Ok(())
        },
        serde_json::Value::Object(entries) => {
            for (name, entry) in entries {
                validate_json_value(name, entry)?;
            }
            Ok(())
        },
        _ => Ok(()),
    }
}

/// Best-effort recovery of a string supplied for a non-string target.
fn coerce_string_for_target(
    value: &str,
    target: &TypeExpr,
    engine: &Engine,
) -> Result<Argument> {
    let json = serde_json::Value::String(value.to_string());
    match target.innermost_name() {
        "Int" | "Float" | "Boolean" => Ok(Argument::Typed(
            coerce::coerce_value(&json, target, engine.oracle())?,
        )),
        name => match engine.oracle().type_kind(name) {
            Lookup::Known(TypeKind::Enum) => Ok(Argument::Typed(
                coerce::coerce_value(&json, target, engine.oracle())?,
            )),
            _ => Ok(Argument::Literal(value.to_string())),
        },
    }
}
