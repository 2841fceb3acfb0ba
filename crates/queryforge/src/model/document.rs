use crate::error::EngineError;
use crate::error::Result;
use crate::model::DirectiveApplication;
use crate::model::FieldNode;
use crate::model::Fragment;
use crate::model::OperationKind;
use crate::value::Value;
use indexmap::IndexMap;

/// The complete per-session document model: one GraphQL operation under
/// construction, plus the endpoint configuration it will be executed
/// against. Owned exclusively by its session and persisted wholesale by
/// the Session Store between calls.
///
/// Variable state is split across three maps (declared type, declared
/// default, bound runtime value), all keyed by the variable name
/// including its leading `$` sigil.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct QueryDocument {
    pub operation_kind: OperationKind,
    /// Root type name for `operation_kind`, e.g. `Query`.
    pub root_type: String,
    pub operation_name: Option<String>,
    pub endpoint: Option<String>,
    pub headers: IndexMap<String, String>,
    /// Pseudo-node holding the root selection set in `children`.
    pub root: FieldNode,
    pub fragments: IndexMap<String, Fragment>,
    pub variable_types: IndexMap<String, String>,
    pub variable_defaults: IndexMap<String, Value>,
    pub variable_values: IndexMap<String, serde_json::Value>,
    pub directives: Vec<DirectiveApplication>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl QueryDocument {
    pub fn new(operation_kind: OperationKind, operation_name: Option<String>) -> Self {
        Self {
            operation_kind,
            root_type: operation_kind.default_root_type().to_string(),
            operation_name,
            endpoint: None,
            headers: IndexMap::new(),
            root: FieldNode::root(),
            fragments: IndexMap::new(),
            variable_types: IndexMap::new(),
            variable_defaults: IndexMap::new(),
            variable_values: IndexMap::new(),
            directives: Vec::new(),
            created_at: chrono::Utc::now(),
        }
    }

    /// Resolve a dot-separated path to a node. The empty path addresses
    /// the root. Resolution never creates nodes.
    pub fn node_at(&self, path: &str) -> Result<&FieldNode> {
        let mut node = &self.root;
        if path.is_empty() {
            return Ok(node);
        }
        for segment in path.split('.') {
            node = node.children.get(segment).ok_or_else(|| {
                EngineError::PathNotFound {
                    path: path.to_string(),
                }
            })?;
        }
        Ok(node)
    }

    pub fn node_at_mut(&mut self, path: &str) -> Result<&mut FieldNode> {
        let mut node = &mut self.root;
        if path.is_empty() {
            return Ok(node);
        }
        for segment in path.split('.') {
            node = node.children.get_mut(segment).ok_or_else(|| {
                EngineError::PathNotFound {
                    path: path.to_string(),
                }
            })?;
        }
        Ok(node)
    }

    pub fn is_variable_declared(&self, variable_name: &str) -> bool {
        self.variable_types.contains_key(variable_name)
    }
}
