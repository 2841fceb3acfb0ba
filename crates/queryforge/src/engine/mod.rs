//! The operation surface: every mutation/read is an independent async
//! unit of work that loads the session's document, applies a validated
//! change, and saves it back (read-only for analysis/serialization).
//!
//! The engine holds no cross-call mutable state of its own — everything
//! per-session lives behind the injected [`SessionStore`].

mod arguments;
mod directives;
mod execute;
mod fragments;
mod inspect;
mod selection;
mod sessions;
mod variables;

#[cfg(test)]
mod tests;

pub use arguments::SetArgumentResponse;
pub use directives::SetDirectiveResponse;
pub use execute::ExecuteResponse;
pub use fragments::ApplyFragmentResponse;
pub use fragments::DefineFragmentResponse;
pub use inspect::CurrentQueryResponse;
pub use inspect::ValidationReport;
pub use selection::FieldSelection;
pub use selection::SelectFieldResponse;
pub use selection::SelectFieldsResponse;
pub use sessions::EndSessionResponse;
pub use sessions::StartSessionParams;
pub use sessions::StartSessionResponse;
pub use variables::CascadedRemoval;
pub use variables::RemoveVariableResponse;
pub use variables::SetVariableResponse;

use crate::complexity::ComplexityLimits;
use crate::error::EngineError;
use crate::error::Result;
use crate::gateway::ExecutionGateway;
use crate::model::QueryDocument;
use crate::oracle::TypeOracle;
use crate::store::SessionStore;
use std::sync::Arc;

pub struct Engine {
    store: Arc<dyn SessionStore>,
    oracle: Arc<dyn TypeOracle>,
    limits: ComplexityLimits,
    gateway: ExecutionGateway,
}

impl Engine {
    pub fn new(store: Arc<dyn SessionStore>, oracle: Arc<dyn TypeOracle>) -> Self {
        Self {
            store,
            oracle,
            limits: ComplexityLimits::default(),
            gateway: ExecutionGateway::new(),
        }
    }

    pub fn with_limits(mut self, limits: ComplexityLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn limits(&self) -> &ComplexityLimits {
        &self.limits
    }

    pub(crate) fn oracle(&self) -> &dyn TypeOracle {
        self.oracle.as_ref()
    }

    pub(crate) async fn load_session(&self, session_id: &str) -> Result<QueryDocument> {
        self.store
            .load(session_id)
            .await?
            .ok_or_else(|| EngineError::SessionNotFound {
                session_id: session_id.to_string(),
            })
    }

    pub(crate) async fn save_session(
        &self,
        session_id: &str,
        document: QueryDocument,
    ) -> Result<()> {
        self.store.save(session_id, document).await
    }
}
