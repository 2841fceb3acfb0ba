//! Rendering of operation outcomes into the JSON envelope an external
//! adapter (CLI, RPC server) hands back to its caller.

use crate::error::EngineError;

/// Wrap an operation outcome: `{"success": true, ...fields}` on success,
/// `{"success": false, "error": "..."}` on failure. Success payloads that
/// do not serialize to a JSON object are nested under `"result"`.
pub fn to_payload<T: serde::Serialize>(
    outcome: &Result<T, EngineError>,
) -> serde_json::Value {
    match outcome {
        Ok(response) => {
            let mut payload = match serde_json::to_value(response) {
                Ok(serde_json::Value::Object(fields)) => fields,
                Ok(other) => {
                    let mut fields = serde_json::Map::new();
                    fields.insert("result".to_string(), other);
                    fields
                },
                Err(err) => {
                    let mut fields = serde_json::Map::new();
                    fields.insert(
                        "error".to_string(),
                        serde_json::Value::String(format!(
                            "response serialization failed: {err}",
                        )),
                    );
                    fields.insert("success".to_string(), false.into());
                    return serde_json::Value::Object(fields);
                },
            };
            payload.insert("success".to_string(), true.into());
            serde_json::Value::Object(payload)
        },
        Err(err) => serde_json::json!({
            "success": false,
            "error": err.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(serde::Serialize)]
    struct Sample {
        path: String,
    }

    #[test]
    fn success_payloads_flatten_response_fields() {
        let outcome: Result<Sample, EngineError> = Ok(Sample {
            path: "user".to_string(),
        });
        let payload = to_payload(&outcome);
        assert_eq!(payload["success"], true);
        assert_eq!(payload["path"], "user");
    }

    #[test]
    fn error_payloads_carry_the_display_message() {
        let outcome: Result<Sample, EngineError> = Err(EngineError::PathNotFound {
            path: "user.bad".to_string(),
        });
        let payload = to_payload(&outcome);
        assert_eq!(payload["success"], false);
        assert_eq!(payload["error"], "No field exists at path `user.bad`");
    }
}
