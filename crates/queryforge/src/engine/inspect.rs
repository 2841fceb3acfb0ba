use crate::complexity;
use crate::complexity::ComplexityAnalysis;
use crate::engine::Engine;
use crate::error::Result;
use crate::model::Argument;
use crate::model::DirectiveApplication;
use crate::model::FieldNode;
use crate::model::OperationKind;
use crate::model::QueryDocument;
use crate::serialize;
use indexmap::IndexMap;
use std::collections::BTreeSet;

#[derive(Clone, Debug, serde::Serialize)]
pub struct CurrentQueryResponse {
    pub session_id: String,
    pub operation_kind: OperationKind,
    pub operation_name: Option<String>,
    pub query_string: String,
    /// Runtime values bound so far, keyed by `$name`.
    pub variable_values: IndexMap<String, serde_json::Value>,
    pub complexity: ComplexityAnalysis,
}

/// Aggregate validation verdict: hard errors block execution, warnings
/// flag likely mistakes (dead variables, unapplied fragments) that still
/// produce a well-formed document.
#[derive(Clone, Debug, serde::Serialize)]
pub struct ValidationReport {
    pub session_id: String,
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl Engine {
    /// Serialize the session's document as it stands, with its current
    /// complexity figures.
    pub async fn get_current_query(&self, session_id: &str) -> Result<CurrentQueryResponse> {
        let document = self.load_session(session_id).await?;
        Ok(CurrentQueryResponse {
            session_id: session_id.to_string(),
            operation_kind: document.operation_kind,
            operation_name: document.operation_name.clone(),
            query_string: serialize::render(&document),
            variable_values: document.variable_values.clone(),
            complexity: complexity::analyze(&document, self.limits()),
        })
    }

    /// Run the complexity analyzer without mutating anything.
    pub async fn analyze_complexity(&self, session_id: &str) -> Result<ComplexityAnalysis> {
        let document = self.load_session(session_id).await?;
        Ok(complexity::analyze(&document, self.limits()))
    }

    /// Full document validation: structural checks, complexity ceilings,
    /// variable accounting, and a render-then-parse round trip through a
    /// real GraphQL parser as the final word on well-formedness.
    pub async fn validate_query(&self, session_id: &str) -> Result<ValidationReport> {
        let document = self.load_session(session_id).await?;
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if document.root.children.is_empty() {
            errors.push("the operation has no field selections".to_string());
        }

        let analysis = complexity::analyze(&document, self.limits());
        errors.extend(analysis.errors);

        let referenced = referenced_variables(&document);
        for name in &referenced {
            if !document.is_variable_declared(name) {
                errors.push(format!(
                    "variable `{name}` is referenced but never declared",
                ));
            }
        }
        for name in document.variable_types.keys() {
            if !referenced.contains(name.as_str()) {
                warnings.push(format!(
                    "variable `{name}` is declared but never referenced",
                ));
            }
        }

        let applied = applied_fragments(&document.root);
        for name in document.fragments.keys() {
            if !applied.contains(name.as_str()) {
                warnings.push(format!(
                    "fragment `{name}` is defined but never applied",
                ));
            }
        }
        for name in &applied {
            if !document.fragments.contains_key(*name) {
                errors.push(format!(
                    "fragment `{name}` is applied but never defined",
                ));
            }
        }

        if errors.is_empty() {
            let rendered = serialize::render(&document);
            if let Err(parse_error) = graphql_parser::parse_query::<String>(&rendered) {
                errors.push(format!(
                    "the rendered document does not parse as GraphQL: {parse_error}",
                ));
            }
        }

        Ok(ValidationReport {
            session_id: session_id.to_string(),
            valid: errors.is_empty(),
            errors,
            warnings,
        })
    }
}

/// Every variable referenced by an argument or directive anywhere in the
/// document: the field tree, inline fragments, fragment definitions, and
/// operation-level directives.
fn referenced_variables(document: &QueryDocument) -> BTreeSet<&str> {
    let mut found = BTreeSet::new();
    collect_from_selections(&document.root.children, &mut found);
    for fragment in document.fragments.values() {
        collect_from_selections(&fragment.selections, &mut found);
    }
    collect_from_directives(&document.directives, &mut found);
    found
}

fn collect_from_selections<'doc>(
    selections: &'doc IndexMap<String, FieldNode>,
    found: &mut BTreeSet<&'doc str>,
) {
    for node in selections.values() {
        for argument in node.arguments.values() {
            collect_from_argument(argument, found);
        }
        collect_from_directives(&node.directives, found);
        collect_from_selections(&node.children, found);
        for inline in &node.inline_fragments {
            collect_from_selections(&inline.selections, found);
        }
    }
}

fn collect_from_directives<'doc>(
    directives: &'doc [DirectiveApplication],
    found: &mut BTreeSet<&'doc str>,
) {
    for directive in directives {
        for (_, argument) in &directive.arguments {
            collect_from_argument(argument, found);
        }
    }
}

fn collect_from_argument<'doc>(
    argument: &'doc Argument,
    found: &mut BTreeSet<&'doc str>,
) {
    match argument {
        Argument::Variable(name) => {
            found.insert(name.as_str());
        },
        Argument::Typed(value) => value.collect_variable_refs(found),
        Argument::Literal(_) => {},
    }
}

fn applied_fragments(root: &FieldNode) -> BTreeSet<&str> {
    let mut found = BTreeSet::new();
    collect_spreads(&root.children, &mut found);
    found
}

fn collect_spreads<'doc>(
    selections: &'doc IndexMap<String, FieldNode>,
    found: &mut BTreeSet<&'doc str>,
) {
    for node in selections.values() {
        for spread in &node.fragment_spreads {
            found.insert(spread.as_str());
        }
        collect_spreads(&node.children, found);
        for inline in &node.inline_fragments {
            collect_spreads(&inline.selections, found);
        }
    }
}
