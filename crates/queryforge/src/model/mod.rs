//! The session-owned document model: everything the Session Store
//! persists, and the tree-navigation primitives over it.

mod argument;
mod directive_application;
mod document;
mod field_node;
mod fragment;
mod operation_kind;

pub use argument::Argument;
pub use directive_application::DirectiveApplication;
pub use document::QueryDocument;
pub use field_node::FieldNode;
pub use fragment::Fragment;
pub use fragment::InlineFragment;
pub use operation_kind::OperationKind;
