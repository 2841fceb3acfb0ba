//! Session-scoped construction, validation, and execution of GraphQL
//! operations.
//!
//! A caller starts a session, then builds up one operation through
//! incremental calls: selecting fields at dot-separated paths, binding
//! arguments (literal, typed, or variable-referencing), declaring
//! variables, defining and applying fragments, and attaching directives.
//! The document can be serialized, complexity-checked, and validated at
//! any point, and finally executed against the session's configured
//! endpoint.
//!
//! The [`engine::Engine`] is the operation surface. It owns nothing
//! per-session itself: documents live behind a pluggable
//! [`store::SessionStore`], and schema awareness comes from a pluggable
//! [`oracle::TypeOracle`] that is allowed to not know the answer —
//! schema-aware checks degrade gracefully, scalar coercion against a
//! resolved type never does.
//!
//! ```no_run
//! use queryforge::engine::Engine;
//! use queryforge::engine::StartSessionParams;
//! use queryforge::oracle::NullOracle;
//! use queryforge::store::InMemorySessionStore;
//! use std::sync::Arc;
//!
//! # async fn demo() -> queryforge::error::Result<()> {
//! let engine = Engine::new(
//!     Arc::new(InMemorySessionStore::default()),
//!     Arc::new(NullOracle),
//! );
//! let session = engine.start_session(StartSessionParams::default()).await?;
//! engine.select_field(&session.session_id, "", "viewer", None).await?;
//! engine.select_field(&session.session_id, "viewer", "name", None).await?;
//! let current = engine.get_current_query(&session.session_id).await?;
//! assert_eq!(current.query_string, "query { viewer { name } }");
//! # Ok(())
//! # }
//! ```

pub mod coerce;
pub mod complexity;
pub mod engine;
pub mod error;
pub mod gateway;
pub mod model;
pub mod oracle;
pub mod response;
pub mod serialize;
pub mod store;
pub mod typeexpr;
pub mod validators;
pub mod value;

pub use engine::Engine;
pub use error::EngineError;
pub use error::Result;
