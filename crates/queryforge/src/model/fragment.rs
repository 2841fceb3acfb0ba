use crate::model::FieldNode;
use indexmap::IndexMap;

/// A named, reusable selection set bound to a type condition. Applied to
/// a field by adding its name to that node's spread list.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct Fragment {
    pub name: String,
    pub on_type: String,
    pub selections: IndexMap<String, FieldNode>,
}

/// An unnamed, type-conditioned selection set embedded directly at a
/// path — the only way to select fields specific to one member of a
/// union/interface.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct InlineFragment {
    pub on_type: String,
    pub selections: IndexMap<String, FieldNode>,
}
