use crate::engine::Engine;
use crate::error::EngineError;
use crate::error::Result;
use crate::model::FieldNode;
use crate::model::Fragment;
use crate::model::InlineFragment;
use crate::oracle::Lookup;
use crate::validators;
use indexmap::IndexMap;

#[derive(Clone, Debug, serde::Serialize)]
pub struct DefineFragmentResponse {
    pub session_id: String,
    pub fragment_name: String,
    pub on_type: String,
    pub field_names: Vec<String>,
    pub message: String,
}

#[derive(Clone, Debug, serde::Serialize)]
pub struct ApplyFragmentResponse {
    pub session_id: String,
    pub parent_path: String,
    pub message: String,
}

impl Engine {
    /// Define a named fragment. Type and field existence checks are
    /// best-effort: the oracle answering `Unknown` skips the check, a
    /// resolved answer is enforced.
    pub async fn define_named_fragment(
        &self,
        session_id: &str,
        fragment_name: &str,
        on_type: &str,
        field_names: &[String],
    ) -> Result<DefineFragmentResponse> {
        validators::validate_name("fragment", fragment_name)?;
        validators::validate_name("type", on_type)?;
        for field_name in field_names {
            validators::validate_name("field", field_name)?;
        }
        self.check_fragment_target(on_type, field_names)?;

        let mut document = self.load_session(session_id).await?;
        if document.fragments.contains_key(fragment_name) {
            return Err(EngineError::FragmentAlreadyExists {
                name: fragment_name.to_string(),
            });
        }

        document.fragments.insert(fragment_name.to_string(), Fragment {
            name: fragment_name.to_string(),
            on_type: on_type.to_string(),
            selections: leaf_selections(field_names),
        });

        self.save_session(session_id, document).await?;
        Ok(DefineFragmentResponse {
            session_id: session_id.to_string(),
            fragment_name: fragment_name.to_string(),
            on_type: on_type.to_string(),
            field_names: field_names.to_vec(),
            message: format!(
                "Defined fragment `{fragment_name}` on `{on_type}`",
            ),
        })
    }

    /// Attach a previously defined fragment's name to a path's spread
    /// list. Idempotent: reapplying the same name is a no-op.
    pub async fn apply_named_fragment(
        &self,
        session_id: &str,
        parent_path: &str,
        fragment_name: &str,
    ) -> Result<ApplyFragmentResponse> {
        let mut document = self.load_session(session_id).await?;
        if !document.fragments.contains_key(fragment_name) {
            return Err(EngineError::FragmentNotFound {
                name: fragment_name.to_string(),
            });
        }

        let node = document.node_at_mut(parent_path)?;
        let already_applied = node.fragment_spreads.iter()
            .any(|spread| spread == fragment_name);
        if !already_applied {
            node.fragment_spreads.push(fragment_name.to_string());
        }

        self.save_session(session_id, document).await?;
        Ok(ApplyFragmentResponse {
            session_id: session_id.to_string(),
            parent_path: parent_path.to_string(),
            message: if already_applied {
                format!("Fragment `{fragment_name}` was already applied")
            } else {
                format!("Applied fragment `{fragment_name}` at `{parent_path}`")
            },
        })
    }

    /// Attach a type-conditioned selection set directly at a path — the
    /// route for selecting under a union/interface member type.
    /// Reapplying with the same type condition merges field names into
    /// the existing inline fragment.
    pub async fn apply_inline_fragment(
        &self,
        session_id: &str,
        parent_path: &str,
        type_name: &str,
        field_names: &[String],
    ) -> Result<ApplyFragmentResponse> {
        validators::validate_name("type", type_name)?;
        for field_name in field_names {
            validators::validate_name("field", field_name)?;
        }
        self.check_fragment_target(type_name, field_names)?;

        let mut document = self.load_session(session_id).await?;
        let node = document.node_at_mut(parent_path)?;

        match node.inline_fragments.iter_mut()
            .find(|inline| inline.on_type == type_name) {
            Some(existing) => {
                for field_name in field_names {
                    if !existing.selections.contains_key(field_name) {
                        existing.selections.insert(
                            field_name.clone(),
                            FieldNode::new(field_name.clone()),
                        );
                    }
                }
            },
            None => {
                node.inline_fragments.push(InlineFragment {
                    on_type: type_name.to_string(),
                    selections: leaf_selections(field_names),
                });
            },
        }

        self.save_session(session_id, document).await?;
        Ok(ApplyFragmentResponse {
            session_id: session_id.to_string(),
            parent_path: parent_path.to_string(),
            message: format!(
                "Applied inline fragment on `{type_name}` at `{parent_path}`",
            ),
        })
    }

    /// Best-effort schema checks shared by named and inline fragments.
    fn check_fragment_target(
        &self,
        on_type: &str,
        field_names: &[String],
    ) -> Result<()> {
        if let Lookup::Known(kind) = self.oracle().type_kind(on_type)
            && !kind.is_fragment_eligible() {
            return Err(EngineError::InvalidValue {
                reason: format!(
                    "type `{on_type}` is {} kind and cannot carry a \
                    fragment type condition",
                    kind.name(),
                ),
            });
        }
        if let Lookup::Known(fields) = self.oracle().fields_of(on_type) {
            for field_name in field_names {
                if !fields.iter().any(|candidate| candidate == field_name) {
                    return Err(EngineError::InvalidValue {
                        reason: format!(
                            "field `{field_name}` does not exist on type \
                            `{on_type}`",
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}

fn leaf_selections(field_names: &[String]) -> IndexMap<String, FieldNode> {
    field_names.iter()
        .map(|name| (name.clone(), FieldNode::new(name.clone())))
        .collect()
}
