//! JSON build scripts: a declarative list of engine calls replayed
//! against a fresh in-memory session, so a finished operation can be
//! rendered or validated from the command line.

use queryforge::engine::Engine;
use queryforge::engine::FieldSelection;
use queryforge::engine::StartSessionParams;
use std::path::Path;

#[derive(Debug, serde::Deserialize)]
pub(crate) struct Script {
    #[serde(default)]
    pub operation_kind: Option<String>,
    #[serde(default)]
    pub operation_name: Option<String>,
    pub steps: Vec<ScriptStep>,
}

/// One engine call, tagged by `"op"`. Field names mirror the engine's
/// parameter names.
#[derive(Debug, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub(crate) enum ScriptStep {
    SelectField {
        #[serde(default)]
        parent_path: String,
        field_name: String,
        alias: Option<String>,
    },
    SelectFields {
        selections: Vec<FieldSelection>,
    },
    SetStringArgument {
        field_path: String,
        argument_name: String,
        value: String,
    },
    SetTypedArgument {
        field_path: String,
        argument_name: String,
        value: serde_json::Value,
    },
    SetVariableArgument {
        field_path: String,
        argument_name: String,
        variable_name: String,
    },
    SetInputObjectArgument {
        field_path: String,
        argument_name: String,
        fields: serde_json::Map<String, serde_json::Value>,
    },
    SetQueryVariable {
        variable_name: String,
        variable_type: String,
        default_value: Option<serde_json::Value>,
    },
    SetVariableValue {
        variable_name: String,
        value: serde_json::Value,
    },
    RemoveQueryVariable {
        variable_name: String,
    },
    DefineNamedFragment {
        fragment_name: String,
        on_type: String,
        field_names: Vec<String>,
    },
    ApplyNamedFragment {
        parent_path: String,
        fragment_name: String,
    },
    ApplyInlineFragment {
        parent_path: String,
        type_name: String,
        field_names: Vec<String>,
    },
    SetFieldDirective {
        field_path: String,
        directive_name: String,
        #[serde(default)]
        arguments: serde_json::Map<String, serde_json::Value>,
    },
    SetOperationDirective {
        directive_name: String,
        #[serde(default)]
        arguments: serde_json::Map<String, serde_json::Value>,
    },
}

pub(crate) fn load(path: &Path) -> anyhow::Result<Script> {
    let text = std::fs::read_to_string(path)?;
    let script = serde_json::from_str(&text)?;
    Ok(script)
}

/// Start a session and replay every step in order, failing on the first
/// engine error. Returns the session id for follow-up reads.
pub(crate) async fn replay(engine: &Engine, script: Script) -> anyhow::Result<String> {
    let session = engine
        .start_session(StartSessionParams {
            operation_kind: script.operation_kind,
            operation_name: script.operation_name,
            ..Default::default()
        })
        .await?;
    let session_id = session.session_id;

    for (index, step) in script.steps.into_iter().enumerate() {
        log::debug!("Replaying step {index}: {step:?}");
        apply(engine, &session_id, step)
            .await
            .map_err(|err| anyhow::anyhow!("step {index} failed: {err}"))?;
    }

    Ok(session_id)
}

async fn apply(
    engine: &Engine,
    session_id: &str,
    step: ScriptStep,
) -> queryforge::Result<()> {
    match step {
        ScriptStep::SelectField { parent_path, field_name, alias } => {
            engine
                .select_field(session_id, &parent_path, &field_name, alias.as_deref())
                .await?;
        },
        ScriptStep::SelectFields { selections } => {
            engine.select_fields(session_id, &selections).await?;
        },
        ScriptStep::SetStringArgument { field_path, argument_name, value } => {
            engine
                .set_string_argument(session_id, &field_path, &argument_name, &value)
                .await?;
        },
        ScriptStep::SetTypedArgument { field_path, argument_name, value } => {
            engine
                .set_typed_argument(session_id, &field_path, &argument_name, &value)
                .await?;
        },
        ScriptStep::SetVariableArgument {
            field_path,
            argument_name,
            variable_name,
        } => {
            engine
                .set_variable_argument(
                    session_id,
                    &field_path,
                    &argument_name,
                    &variable_name,
                )
                .await?;
        },
        ScriptStep::SetInputObjectArgument {
            field_path,
            argument_name,
            fields,
        } => {
            engine
                .set_input_object_argument(
                    session_id,
                    &field_path,
                    &argument_name,
                    &fields,
                )
                .await?;
        },
        ScriptStep::SetQueryVariable {
            variable_name,
            variable_type,
            default_value,
        } => {
            engine
                .set_query_variable(
                    session_id,
                    &variable_name,
                    &variable_type,
                    default_value.as_ref(),
                )
                .await?;
        },
        ScriptStep::SetVariableValue { variable_name, value } => {
            engine.set_variable_value(session_id, &variable_name, &value).await?;
        },
        ScriptStep::RemoveQueryVariable { variable_name } => {
            engine.remove_query_variable(session_id, &variable_name).await?;
        },
        ScriptStep::DefineNamedFragment {
            fragment_name,
            on_type,
            field_names,
        } => {
            engine
                .define_named_fragment(
                    session_id,
                    &fragment_name,
                    &on_type,
                    &field_names,
                )
                .await?;
        },
        ScriptStep::ApplyNamedFragment { parent_path, fragment_name } => {
            engine
                .apply_named_fragment(session_id, &parent_path, &fragment_name)
                .await?;
        },
        ScriptStep::ApplyInlineFragment {
            parent_path,
            type_name,
            field_names,
        } => {
            engine
                .apply_inline_fragment(
                    session_id,
                    &parent_path,
                    &type_name,
                    &field_names,
                )
                .await?;
        },
        ScriptStep::SetFieldDirective {
            field_path,
            directive_name,
            arguments,
        } => {
            engine
                .set_field_directive(
                    session_id,
                    &field_path,
                    &directive_name,
                    &arguments,
                )
                .await?;
        },
        ScriptStep::SetOperationDirective { directive_name, arguments } => {
            engine
                .set_operation_directive(session_id, &directive_name, &arguments)
                .await?;
        },
    }
    Ok(())
}
