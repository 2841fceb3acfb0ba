//! Read-side complexity analysis over the document tree.
//!
//! Depth and field count are enforced independently; the weighted score
//! additionally gates execution (timeout escalation and an absolute
//! too-expensive ceiling).

use crate::model::FieldNode;
use crate::model::Fragment;
use crate::model::QueryDocument;
use indexmap::IndexMap;

/// Configurable ceilings for the analyzer.
#[derive(Clone, Debug)]
pub struct ComplexityLimits {
    /// Maximum selection nesting; the root selection set is depth 1.
    pub max_depth: usize,
    /// Maximum total number of field nodes across the whole tree.
    pub max_fields: usize,
    /// Absolute score above which a query is too expensive to execute.
    pub max_score: usize,
}

impl Default for ComplexityLimits {
    fn default() -> Self {
        Self {
            max_depth: 12,
            max_fields: 200,
            max_score: 1000,
        }
    }
}

/// Score above which the execution request timeout is escalated.
pub const HIGH_COMPLEXITY_SCORE: usize = 100;

/// Weight applied to depth when computing the score.
const DEPTH_WEIGHT: usize = 5;

#[derive(Clone, Debug, serde::Serialize)]
pub struct ComplexityAnalysis {
    pub depth: usize,
    pub field_count: usize,
    pub score: usize,
    pub valid: bool,
    pub errors: Vec<String>,
}

/// Walk the whole tree (children, inline fragments, and named-fragment
/// spreads expanded through their definitions) computing depth, field
/// count, and the weighted score, then check both ceilings.
pub fn analyze(document: &QueryDocument, limits: &ComplexityLimits) -> ComplexityAnalysis {
    let mut walk = Walk {
        fragments: &document.fragments,
        field_count: 0,
        max_depth: 0,
        deepest_path: String::new(),
        spread_stack: Vec::new(),
    };
    walk.selections(&document.root.children, 1, "");

    let score = walk.field_count + DEPTH_WEIGHT * walk.max_depth;
    let mut errors = Vec::new();
    if walk.max_depth > limits.max_depth {
        errors.push(format!(
            "depth {} exceeds the maximum of {} (deepest path: `{}`)",
            walk.max_depth, limits.max_depth, walk.deepest_path,
        ));
    }
    if walk.field_count > limits.max_fields {
        errors.push(format!(
            "field count {} exceeds the maximum of {}",
            walk.field_count, limits.max_fields,
        ));
    }

    ComplexityAnalysis {
        depth: walk.max_depth,
        field_count: walk.field_count,
        score,
        valid: errors.is_empty(),
        errors,
    }
}

struct Walk<'doc> {
    fragments: &'doc IndexMap<String, Fragment>,
    field_count: usize,
    max_depth: usize,
    deepest_path: String,
    /// Spread names on the current walk path, guarding against fragment
    /// cycles.
    spread_stack: Vec<&'doc str>,
}

impl<'doc> Walk<'doc> {
    fn selections(
        &mut self,
        selections: &'doc IndexMap<String, FieldNode>,
        depth: usize,
        base_path: &str,
    ) {
        for (key, node) in selections {
            let path = join_path(base_path, key);
            self.field_count += 1;
            if depth > self.max_depth {
                self.max_depth = depth;
                self.deepest_path = path.clone();
            }

            self.selections(&node.children, depth + 1, &path);

            for inline in &node.inline_fragments {
                self.selections(&inline.selections, depth + 1, &path);
            }

            for spread in &node.fragment_spreads {
                if self.spread_stack.contains(&spread.as_str()) {
                    continue;
                }
                if let Some(fragment) = self.fragments.get(spread) {
                    self.spread_stack.push(spread.as_str());
                    self.selections(&fragment.selections, depth + 1, &path);
                    self.spread_stack.pop();
                }
            }
        }
    }
}

fn join_path(base: &str, key: &str) -> String {
    if base.is_empty() {
        key.to_string()
    } else {
        format!("{base}.{key}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::OperationKind;

    fn empty_document() -> QueryDocument {
        QueryDocument::new(OperationKind::Query, None)
    }

    fn chain_of_depth(levels: usize) -> QueryDocument {
        let mut document = empty_document();
        let mut node = FieldNode::new(format!("level{levels}"));
        for level in (1..levels).rev() {
            let mut parent = FieldNode::new(format!("level{level}"));
            parent.children.insert(node.name.clone(), node);
            node = parent;
        }
        document.root.children.insert(node.name.clone(), node);
        document
    }

    #[test]
    fn counts_fields_and_depth_for_a_small_query() {
        let mut document = empty_document();
        let mut user = FieldNode::new("user");
        user.children.insert("id".to_string(), FieldNode::new("id"));
        user.children.insert("name".to_string(), FieldNode::new("name"));
        document.root.children.insert("user".to_string(), user);

        let analysis = analyze(&document, &ComplexityLimits::default());
        assert!(analysis.valid);
        assert_eq!(analysis.field_count, 3);
        assert_eq!(analysis.depth, 2);
        assert_eq!(analysis.score, 3 + 5 * 2);
    }

    #[test]
    fn field_count_over_the_ceiling_is_invalid_and_names_the_count() {
        let mut document = empty_document();
        for index in 0..201 {
            let name = format!("f{index}");
            document.root.children.insert(name.clone(), FieldNode::new(name));
        }
        let analysis = analyze(&document, &ComplexityLimits::default());
        assert!(!analysis.valid);
        assert_eq!(analysis.field_count, 201);
        assert!(analysis.errors.iter().any(|e| e.contains("field count 201")));
    }

    #[test]
    fn depth_over_the_ceiling_is_invalid_and_names_the_depth_and_path() {
        let document = chain_of_depth(13);
        let analysis = analyze(&document, &ComplexityLimits::default());
        assert!(!analysis.valid);
        assert_eq!(analysis.depth, 13);
        let error = &analysis.errors[0];
        assert!(error.contains("depth 13"));
        assert!(error.contains("level13"));
    }

    #[test]
    fn boundary_values_are_still_valid() {
        let document = chain_of_depth(12);
        let analysis = analyze(&document, &ComplexityLimits::default());
        assert!(analysis.valid);
    }

    #[test]
    fn fragment_spreads_count_through_their_definitions() {
        let mut document = empty_document();
        let mut user = FieldNode::new("user");
        user.fragment_spreads.push("UserBits".to_string());
        document.root.children.insert("user".to_string(), user);
        let mut selections = IndexMap::new();
        selections.insert("id".to_string(), FieldNode::new("id"));
        selections.insert("name".to_string(), FieldNode::new("name"));
        document.fragments.insert("UserBits".to_string(), Fragment {
            name: "UserBits".to_string(),
            on_type: "User".to_string(),
            selections,
        });

        let analysis = analyze(&document, &ComplexityLimits::default());
        assert_eq!(analysis.field_count, 3);
        assert_eq!(analysis.depth, 2);
    }
}
