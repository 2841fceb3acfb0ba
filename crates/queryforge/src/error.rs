use thiserror::Error;

/// Result type used throughout the `queryforge` engine.
pub type Result<T> = std::result::Result<T, EngineError>;

/// The engine's operation-boundary error taxonomy.
///
/// Every operation returns one of these instead of panicking; the external
/// adapter renders them as an `{error: "..."}` payload (see
/// [`to_payload`](crate::response::to_payload)). A failed operation never
/// saves the session, so the document model is left untouched.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("Session `{session_id}` was not found or has expired")]
    SessionNotFound {
        session_id: String,
    },

    #[error("No field exists at path `{path}`")]
    PathNotFound {
        path: String,
    },

    #[error("Invalid {kind} name: `{name}`")]
    InvalidName {
        kind: &'static str,
        name: String,
    },

    #[error("Variable `{name}` has not been declared")]
    UndeclaredVariable {
        name: String,
    },

    #[error("Variable `{name}` is already declared")]
    VariableConflict {
        name: String,
    },

    #[error("Fragment `{name}` is already defined")]
    FragmentAlreadyExists {
        name: String,
    },

    #[error("Fragment `{name}` has not been defined")]
    FragmentNotFound {
        name: String,
    },

    #[error("Expected a value of type `{expected}` but got `{value}`")]
    TypeMismatch {
        expected: String,
        value: String,
    },

    #[error("Invalid value: {reason}")]
    InvalidValue {
        reason: String,
    },

    #[error("Query complexity exceeded: {message}")]
    ComplexityExceeded {
        message: String,
    },

    #[error("No GraphQL endpoint is configured for this session")]
    EndpointUnconfigured,

    #[error("Execution timed out after {elapsed_ms}ms; query was: {query}")]
    ExecutionTimeout {
        elapsed_ms: u64,
        query: String,
    },

    #[error("Endpoint returned HTTP {status} after {elapsed_ms}ms; query was: {query}")]
    HttpFailure {
        status: u16,
        elapsed_ms: u64,
        query: String,
    },

    #[error("Request failed: {reason} (after {elapsed_ms}ms); query was: {query}")]
    RequestFailed {
        reason: String,
        elapsed_ms: u64,
        query: String,
    },

    #[error("Session store failure: {0}")]
    Store(String),
}
