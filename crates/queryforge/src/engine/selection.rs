use crate::engine::Engine;
use crate::error::EngineError;
use crate::error::Result;
use crate::model::FieldNode;
use crate::model::QueryDocument;
use crate::validators;

/// One entry in a batch selection call.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct FieldSelection {
    #[serde(default)]
    pub parent_path: String,
    pub field_name: String,
    pub alias: Option<String>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct SelectFieldResponse {
    pub session_id: String,
    pub path: String,
    pub message: String,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct SelectFieldsResponse {
    pub session_id: String,
    pub paths: Vec<String>,
    pub message: String,
}

impl Engine {
    /// Add a field selection under `parent_path` (empty for the root).
    ///
    /// Selection is deliberately schema-unaware: fields are accepted
    /// without existence checks so a document can be built incrementally
    /// and validated before execution. Re-selecting an existing path
    /// merges — previously set arguments and children are preserved.
    pub async fn select_field(
        &self,
        session_id: &str,
        parent_path: &str,
        field_name: &str,
        alias: Option<&str>,
    ) -> Result<SelectFieldResponse> {
        let mut document = self.load_session(session_id).await?;
        let path = apply_selection(&mut document, parent_path, field_name, alias)?;
        self.save_session(session_id, document).await?;
        tracing::debug!(session_id = %session_id, path = %path, "selected field");
        Ok(SelectFieldResponse {
            session_id: session_id.to_string(),
            message: format!("Selected field at `{path}`"),
            path,
        })
    }

    /// Batch form of [`select_field`](Engine::select_field). All
    /// selections are applied against the loaded document and saved once;
    /// any failure abandons the whole batch (no partial writes).
    pub async fn select_fields(
        &self,
        session_id: &str,
        selections: &[FieldSelection],
    ) -> Result<SelectFieldsResponse> {
        let mut document = self.load_session(session_id).await?;
        let mut paths = Vec::with_capacity(selections.len());
        for selection in selections {
            paths.push(apply_selection(
                &mut document,
                &selection.parent_path,
                &selection.field_name,
                selection.alias.as_deref(),
            )?);
        }
        self.save_session(session_id, document).await?;
        Ok(SelectFieldsResponse {
            session_id: session_id.to_string(),
            message: format!("Selected {} fields", paths.len()),
            paths,
        })
    }
}

fn apply_selection(
    document: &mut QueryDocument,
    parent_path: &str,
    field_name: &str,
    alias: Option<&str>,
) -> Result<String> {
    validators::validate_name("field", field_name)?;
    if let Some(alias) = alias {
        validators::validate_name("alias", alias)?;
    }

    let parent = document.node_at_mut(parent_path)?;
    let key = alias.unwrap_or(field_name).to_string();

    match parent.children.get(&key) {
        // Merge semantics: the node (with its arguments and children)
        // stays as-is, but the selection must not silently change which
        // schema field the key refers to.
        Some(existing) if existing.name != field_name => {
            return Err(EngineError::InvalidValue {
                reason: format!(
                    "key `{key}` already selects field `{}`; use a \
                    different alias to select `{field_name}`",
                    existing.name,
                ),
            });
        },
        Some(_) => {},
        None => {
            let mut node = FieldNode::new(field_name);
            node.alias = alias.map(str::to_string);
            parent.children.insert(key.clone(), node);
        },
    }

    Ok(if parent_path.is_empty() {
        key
    } else {
        format!("{parent_path}.{key}")
    })
}
