use crate::coerce;
use crate::engine::Engine;
use crate::error::EngineError;
use crate::error::Result;
use crate::model::DirectiveApplication;
use crate::model::FieldNode;
use crate::typeexpr::TypeExpr;
use crate::validators;
use indexmap::IndexMap;

#[derive(Clone, Debug, serde::Serialize)]
pub struct SetVariableResponse {
    pub session_id: String,
    pub variable_name: String,
    pub variable_type: Option<String>,
    pub message: String,
}

/// One dependent removed by the cascade, identified precisely enough to
/// assert on: the field path (empty for the operation level), what kind
/// of dependent it was, and its name.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct CascadedRemoval {
    pub path: String,
    pub kind: &'static str,
    pub name: String,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct RemoveVariableResponse {
    pub session_id: String,
    pub variable_name: String,
    pub removed: Vec<CascadedRemoval>,
    pub message: String,
}

impl Engine {
    /// Declare a variable: name (with `$` sigil), GraphQL type string,
    /// optional default literal coerced against that type.
    pub async fn set_query_variable(
        &self,
        session_id: &str,
        variable_name: &str,
        variable_type: &str,
        default_value: Option<&serde_json::Value>,
    ) -> Result<SetVariableResponse> {
        validators::validate_variable_name(variable_name)?;
        let parsed_type = TypeExpr::parse(variable_type)?;

        let mut document = self.load_session(session_id).await?;
        if document.is_variable_declared(variable_name) {
            return Err(EngineError::VariableConflict {
                name: variable_name.to_string(),
            });
        }

        if let Some(default) = default_value {
            let coerced = coerce::coerce_value(default, &parsed_type, self.oracle())?;
            document.variable_defaults.insert(variable_name.to_string(), coerced);
        }
        document.variable_types.insert(
            variable_name.to_string(),
            parsed_type.to_graphql_string(),
        );

        self.save_session(session_id, document).await?;
        Ok(SetVariableResponse {
            session_id: session_id.to_string(),
            variable_name: variable_name.to_string(),
            variable_type: Some(parsed_type.to_graphql_string()),
            message: format!(
                "Declared variable `{variable_name}: {}`",
                parsed_type.to_graphql_string(),
            ),
        })
    }

    /// Bind a runtime value to a declared variable, independently
    /// coerced/validated against its declared type.
    pub async fn set_variable_value(
        &self,
        session_id: &str,
        variable_name: &str,
        value: &serde_json::Value,
    ) -> Result<SetVariableResponse> {
        validators::validate_variable_name(variable_name)?;

        let mut document = self.load_session(session_id).await?;
        let Some(declared_type) = document.variable_types.get(variable_name) else {
            return Err(EngineError::UndeclaredVariable {
                name: variable_name.to_string(),
            });
        };

        let parsed_type = TypeExpr::parse(declared_type)?;
        let coerced = coerce::coerce_value(value, &parsed_type, self.oracle())?;
        document.variable_values.insert(
            variable_name.to_string(),
            coerced.to_json(),
        );

        self.save_session(session_id, document).await?;
        Ok(SetVariableResponse {
            session_id: session_id.to_string(),
            variable_name: variable_name.to_string(),
            variable_type: Some(parsed_type.to_graphql_string()),
            message: format!("Bound value for `{variable_name}`"),
        })
    }

    /// Remove a variable declaration and cascade-remove every argument
    /// and directive application referencing it, at any depth — the
    /// field tree, inline fragments, named fragments' selections, and
    /// operation-level directives are all walked. The response
    /// enumerates each removed dependent so the cascade is observable.
    pub async fn remove_query_variable(
        &self,
        session_id: &str,
        variable_name: &str,
    ) -> Result<RemoveVariableResponse> {
        let mut document = self.load_session(session_id).await?;
        if !document.is_variable_declared(variable_name) {
            return Err(EngineError::UndeclaredVariable {
                name: variable_name.to_string(),
            });
        }

        document.variable_types.shift_remove(variable_name);
        document.variable_defaults.shift_remove(variable_name);
        document.variable_values.shift_remove(variable_name);

        let mut removed = Vec::new();
        scrub_selections(
            &mut document.root.children,
            "",
            variable_name,
            &mut removed,
        );
        for fragment in document.fragments.values_mut() {
            let base = format!("fragment:{}", fragment.name);
            scrub_selections(
                &mut fragment.selections,
                &base,
                variable_name,
                &mut removed,
            );
        }
        scrub_directives(
            &mut document.directives,
            "",
            variable_name,
            &mut removed,
        );

        self.save_session(session_id, document).await?;
        tracing::debug!(
            session_id = %session_id,
            variable = %variable_name,
            cascaded = removed.len(),
            "removed variable",
        );

        let message = if removed.is_empty() {
            format!(
                "Removed variable `{variable_name}`; nothing referenced it",
            )
        } else {
            format!(
                "Removed variable `{variable_name}` and {} dependent(s): {}",
                removed.len(),
                removed.iter()
                    .map(|removal| format!(
                        "{} `{}` at `{}`",
                        removal.kind, removal.name, removal.path,
                    ))
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        };

        Ok(RemoveVariableResponse {
            session_id: session_id.to_string(),
            variable_name: variable_name.to_string(),
            removed,
            message,
        })
    }
}

fn scrub_selections(
    selections: &mut IndexMap<String, FieldNode>,
    base_path: &str,
    variable_name: &str,
    removed: &mut Vec<CascadedRemoval>,
) {
    for (key, node) in selections.iter_mut() {
        let path = if base_path.is_empty() {
            key.clone()
        } else {
            format!("{base_path}.{key}")
        };

        let doomed: Vec<String> = node.arguments.iter()
            .filter(|(_, argument)| argument.references_variable(variable_name))
            .map(|(name, _)| name.clone())
            .collect();
        for name in doomed {
            node.arguments.shift_remove(&name);
            removed.push(CascadedRemoval {
                path: path.clone(),
                kind: "argument",
                name,
            });
        }

        scrub_directives(&mut node.directives, &path, variable_name, removed);

        scrub_selections(&mut node.children, &path, variable_name, removed);
        for inline in node.inline_fragments.iter_mut() {
            scrub_selections(&mut inline.selections, &path, variable_name, removed);
        }
    }
}

/// A directive application is removed wholesale when any of its arguments
/// references the variable; a dangling `@include` with no condition would
/// not be a valid document.
fn scrub_directives(
    directives: &mut Vec<DirectiveApplication>,
    path: &str,
    variable_name: &str,
    removed: &mut Vec<CascadedRemoval>,
) {
    directives.retain(|directive| {
        let references = directive.arguments.iter()
            .any(|(_, argument)| argument.references_variable(variable_name));
        if references {
            removed.push(CascadedRemoval {
                path: path.to_string(),
                kind: "directive",
                name: format!("@{}", directive.name),
            });
        }
        !references
    });
}
