use crate::engine::Engine;
use crate::error::EngineError;
use crate::error::Result;
use crate::model::Argument;
use crate::model::DirectiveApplication;
use crate::model::QueryDocument;
use crate::validators;
use crate::value::Value;

#[derive(Clone, Debug, serde::Serialize)]
pub struct SetDirectiveResponse {
    pub session_id: String,
    /// Empty for operation-level directives.
    pub field_path: String,
    pub directive_name: String,
    pub message: String,
}

impl Engine {
    /// Attach a directive to the field at `field_path`. A leading `@` on
    /// the name is accepted and stripped. Reapplying the same directive
    /// merges arguments into the existing application.
    pub async fn set_field_directive(
        &self,
        session_id: &str,
        field_path: &str,
        directive_name: &str,
        arguments: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<SetDirectiveResponse> {
        let directive_name = directive_name.trim_start_matches('@');
        validators::validate_name("directive", directive_name)?;

        let mut document = self.load_session(session_id).await?;
        let converted = convert_directive_arguments(&document, arguments)?;
        let node = document.node_at_mut(field_path)?;
        apply_directive(&mut node.directives, directive_name, converted);

        self.save_session(session_id, document).await?;
        Ok(SetDirectiveResponse {
            session_id: session_id.to_string(),
            field_path: field_path.to_string(),
            directive_name: directive_name.to_string(),
            message: format!(
                "Set directive `@{directive_name}` on `{field_path}`",
            ),
        })
    }

    /// Attach a directive to the operation itself, rendered between the
    /// operation header and the selection set.
    pub async fn set_operation_directive(
        &self,
        session_id: &str,
        directive_name: &str,
        arguments: &serde_json::Map<String, serde_json::Value>,
    ) -> Result<SetDirectiveResponse> {
        let directive_name = directive_name.trim_start_matches('@');
        validators::validate_name("directive", directive_name)?;

        let mut document = self.load_session(session_id).await?;
        let converted = convert_directive_arguments(&document, arguments)?;
        apply_directive(&mut document.directives, directive_name, converted);

        self.save_session(session_id, document).await?;
        Ok(SetDirectiveResponse {
            session_id: session_id.to_string(),
            field_path: String::new(),
            directive_name: directive_name.to_string(),
            message: format!("Set operation directive `@{directive_name}`"),
        })
    }
}

fn apply_directive(
    directives: &mut Vec<DirectiveApplication>,
    directive_name: &str,
    arguments: Vec<(String, Argument)>,
) {
    match directives.iter_mut()
        .find(|directive| directive.name == directive_name) {
        Some(existing) => existing.merge_arguments(arguments),
        None => {
            let mut directive = DirectiveApplication::new(directive_name);
            directive.merge_arguments(arguments);
            directives.push(directive);
        },
    }
}

/// JSON strings with a `$` sigil become variable references — the usual
/// shape for `@include(if: $flag)` — and must already be declared.
/// Everything else is stored as a typed value.
fn convert_directive_arguments(
    document: &QueryDocument,
    arguments: &serde_json::Map<String, serde_json::Value>,
) -> Result<Vec<(String, Argument)>> {
    let mut converted = Vec::with_capacity(arguments.len());
    for (name, value) in arguments {
        validators::validate_name("argument", name)?;
        let argument = match value {
            serde_json::Value::String(text) if text.starts_with('$') => {
                validators::validate_variable_name(text)?;
                if !document.is_variable_declared(text) {
                    return Err(EngineError::UndeclaredVariable {
                        name: text.clone(),
                    });
                }
                Argument::Variable(text.clone())
            },
            serde_json::Value::String(text) => {
                validators::validate_string_value(text)?;
                Argument::Typed(Value::String(text.clone()))
            },
            other => Argument::Typed(Value::from_json(other)),
        };
        converted.push((name.clone(), argument));
    }
    Ok(converted)
}
