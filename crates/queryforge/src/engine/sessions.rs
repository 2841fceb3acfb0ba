use crate::engine::Engine;
use crate::error::Result;
use crate::model::OperationKind;
use crate::model::QueryDocument;
use crate::validators;
use indexmap::IndexMap;

#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct StartSessionParams {
    /// Caller-supplied session id; a v4 UUID is generated when absent.
    pub session_id: Option<String>,
    /// `query` (default), `mutation`, or `subscription`.
    pub operation_kind: Option<String>,
    pub operation_name: Option<String>,
    /// Target GraphQL endpoint URL; execution requires it.
    pub endpoint: Option<String>,
    /// Request headers merged into every execution request.
    #[serde(default)]
    pub headers: IndexMap<String, String>,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct StartSessionResponse {
    pub session_id: String,
    pub operation_kind: OperationKind,
    pub operation_name: Option<String>,
    pub message: String,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct EndSessionResponse {
    pub session_id: String,
    pub ended: bool,
    pub message: String,
}

impl Engine {
    pub async fn start_session(
        &self,
        params: StartSessionParams,
    ) -> Result<StartSessionResponse> {
        let operation_kind = match params.operation_kind.as_deref() {
            Some(keyword) => OperationKind::parse(keyword)?,
            None => OperationKind::Query,
        };
        if let Some(name) = &params.operation_name {
            validators::validate_name("operation", name)?;
        }

        let session_id = params.session_id
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());
        let operation_name = params.operation_name.clone();

        let mut document = QueryDocument::new(operation_kind, params.operation_name);
        document.endpoint = params.endpoint;
        document.headers = params.headers;

        self.save_session(&session_id, document).await?;
        tracing::info!(
            session_id = %session_id,
            kind = operation_kind.keyword(),
            "started query-building session",
        );

        Ok(StartSessionResponse {
            session_id: session_id.clone(),
            operation_kind,
            operation_name,
            message: format!(
                "Started {} session `{session_id}`",
                operation_kind.keyword(),
            ),
        })
    }

    pub async fn end_session(&self, session_id: &str) -> Result<EndSessionResponse> {
        let ended = self.store.delete(session_id).await?;
        tracing::info!(session_id = %session_id, ended, "ended session");
        Ok(EndSessionResponse {
            session_id: session_id.to_string(),
            ended,
            message: if ended {
                format!("Session `{session_id}` ended")
            } else {
                format!("Session `{session_id}` did not exist")
            },
        })
    }
}
