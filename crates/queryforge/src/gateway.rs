//! The Execution Gateway: POSTs the finished document to the configured
//! GraphQL endpoint.
//!
//! Both awaits are timeout-bounded: a request timeout that escalates when
//! the complexity score is high, and a shorter timeout for parsing the
//! response body. Cancellation is "fail past the timeout" — in-flight
//! work is not cooperatively cancelled.

use crate::complexity::HIGH_COMPLEXITY_SCORE;
use crate::error::EngineError;
use crate::error::Result;
use indexmap::IndexMap;
use std::time::Duration;
use std::time::Instant;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const ESCALATED_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const BODY_PARSE_TIMEOUT: Duration = Duration::from_secs(10);

/// The `{data, errors}` envelope returned by a GraphQL endpoint.
#[derive(Clone, Debug, serde::Deserialize, serde::Serialize)]
pub struct GraphQLResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Option<Vec<serde_json::Value>>,
}

pub struct ExecutionGateway {
    client: reqwest::Client,
}

impl ExecutionGateway {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// POST `{query, variables, operationName}` to `endpoint` with the
    /// session's headers. `score` selects the request timeout. Returns
    /// the parsed envelope and the elapsed milliseconds.
    pub async fn execute(
        &self,
        endpoint: &str,
        headers: &IndexMap<String, String>,
        query: &str,
        variables: &serde_json::Value,
        operation_name: Option<&str>,
        score: usize,
    ) -> Result<(GraphQLResponse, u64)> {
        let timeout = if score > HIGH_COMPLEXITY_SCORE {
            ESCALATED_REQUEST_TIMEOUT
        } else {
            REQUEST_TIMEOUT
        };

        let body = serde_json::json!({
            "query": query,
            "variables": variables,
            "operationName": operation_name,
        });

        let mut request = self.client
            .post(endpoint)
            .timeout(timeout)
            .json(&body);
        for (name, value) in headers {
            request = request.header(name.as_str(), value.as_str());
        }

        let started = Instant::now();
        let response = request.send().await.map_err(|err| {
            let elapsed_ms = started.elapsed().as_millis() as u64;
            if err.is_timeout() {
                EngineError::ExecutionTimeout {
                    elapsed_ms,
                    query: query.to_string(),
                }
            } else {
                EngineError::RequestFailed {
                    reason: err.to_string(),
                    elapsed_ms,
                    query: query.to_string(),
                }
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(EngineError::HttpFailure {
                status: status.as_u16(),
                elapsed_ms: started.elapsed().as_millis() as u64,
                query: query.to_string(),
            });
        }

        let envelope = tokio::time::timeout(
            BODY_PARSE_TIMEOUT,
            response.json::<GraphQLResponse>(),
        )
        .await
        .map_err(|_| EngineError::ExecutionTimeout {
            elapsed_ms: started.elapsed().as_millis() as u64,
            query: query.to_string(),
        })?
        .map_err(|err| EngineError::RequestFailed {
            reason: format!("invalid response body: {err}"),
            elapsed_ms: started.elapsed().as_millis() as u64,
            query: query.to_string(),
        })?;

        Ok((envelope, started.elapsed().as_millis() as u64))
    }
}

impl Default for ExecutionGateway {
    fn default() -> Self {
        Self::new()
    }
}
