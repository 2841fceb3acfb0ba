use crate::complexity;
use crate::complexity::ComplexityAnalysis;
use crate::engine::Engine;
use crate::error::EngineError;
use crate::error::Result;
use crate::serialize;

#[derive(Clone, Debug, serde::Serialize)]
pub struct ExecuteResponse {
    pub session_id: String,
    pub query_string: String,
    pub data: Option<serde_json::Value>,
    /// Errors reported by the endpoint, passed through verbatim.
    pub errors: Option<Vec<serde_json::Value>>,
    pub execution_time_ms: u64,
    pub complexity: ComplexityAnalysis,
}

impl Engine {
    /// Execute the session's document against its configured endpoint.
    ///
    /// Fails fast before any network I/O when the session has no endpoint
    /// or the document exceeds a complexity ceiling (including the
    /// absolute score ceiling). Only bound variable values travel with
    /// the request; declared defaults stay in the document text.
    pub async fn execute_query(&self, session_id: &str) -> Result<ExecuteResponse> {
        let document = self.load_session(session_id).await?;

        let Some(endpoint) = document.endpoint.clone() else {
            return Err(EngineError::EndpointUnconfigured);
        };

        let analysis = complexity::analyze(&document, self.limits());
        if !analysis.valid {
            return Err(EngineError::ComplexityExceeded {
                message: analysis.errors.join("; "),
            });
        }
        if analysis.score > self.limits().max_score {
            return Err(EngineError::ComplexityExceeded {
                message: format!(
                    "score {} exceeds the maximum of {}",
                    analysis.score,
                    self.limits().max_score,
                ),
            });
        }

        let query_string = serialize::render(&document);
        let variables = serde_json::Value::Object(
            document.variable_values.iter()
                .map(|(name, value)| {
                    // Transport payload keys carry no sigil.
                    (name.trim_start_matches('$').to_string(), value.clone())
                })
                .collect(),
        );

        tracing::info!(
            session_id = %session_id,
            endpoint = %endpoint,
            score = analysis.score,
            "executing query",
        );

        let (envelope, execution_time_ms) = self.gateway
            .execute(
                &endpoint,
                &document.headers,
                &query_string,
                &variables,
                document.operation_name.as_deref(),
                analysis.score,
            )
            .await?;

        tracing::info!(
            session_id = %session_id,
            execution_time_ms,
            endpoint_errors = envelope.errors.as_ref().map_or(0, Vec::len),
            "query executed",
        );

        Ok(ExecuteResponse {
            session_id: session_id.to_string(),
            query_string,
            data: envelope.data,
            errors: envelope.errors,
            execution_time_ms,
            complexity: analysis,
        })
    }
}
