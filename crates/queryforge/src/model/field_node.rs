use crate::model::Argument;
use crate::model::DirectiveApplication;
use crate::model::InlineFragment;
use indexmap::IndexMap;

/// One selected field at some path in the document tree.
///
/// `children` is keyed by the child's selection key (alias if present,
/// else field name) — the same keys path segments resolve against. A node
/// with no children, fragment spreads, or inline fragments is a leaf
/// scalar/enum selection. Insertion order is preserved everywhere so
/// rendering is deterministic.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct FieldNode {
    /// The underlying schema field name, distinct from any alias key.
    pub name: String,
    pub alias: Option<String>,
    pub arguments: IndexMap<String, Argument>,
    pub children: IndexMap<String, FieldNode>,
    pub directives: Vec<DirectiveApplication>,
    pub fragment_spreads: Vec<String>,
    pub inline_fragments: Vec<InlineFragment>,
}

impl FieldNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            arguments: IndexMap::new(),
            children: IndexMap::new(),
            directives: Vec::new(),
            fragment_spreads: Vec::new(),
            inline_fragments: Vec::new(),
        }
    }

    /// The pseudo-node holding the operation's root selection set. Only
    /// its `children` matter; it is addressed by the empty path.
    pub fn root() -> Self {
        Self::new("")
    }
}
