//! Deterministic rendering of the document model to GraphQL source text.
//!
//! Rendering is a pure function of the model: identical model state
//! produces byte-identical output. Every map in the model is ordered, so
//! no sorting happens here — declaration order is rendering order.

use crate::model::FieldNode;
use crate::model::QueryDocument;
use indexmap::IndexMap;

/// Render the full document: operation header, variable declarations,
/// operation directives, the root selection set, and any named fragment
/// definitions.
pub fn render(document: &QueryDocument) -> String {
    let mut out = String::new();
    out.push_str(document.operation_kind.keyword());

    if let Some(name) = &document.operation_name {
        out.push(' ');
        out.push_str(name);
    }

    if !document.variable_types.is_empty() {
        let declarations = document.variable_types.iter()
            .map(|(name, var_type)| {
                match document.variable_defaults.get(name) {
                    Some(default) => format!(
                        "{name}: {var_type} = {}",
                        default.to_graphql(),
                    ),
                    None => format!("{name}: {var_type}"),
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("({declarations})"));
    }

    for directive in &document.directives {
        out.push(' ');
        out.push_str(&directive.to_graphql());
    }

    out.push_str(&format!(
        " {}",
        braced(&render_selections(&document.root.children)),
    ));

    for fragment in document.fragments.values() {
        out.push_str(&format!(
            "\n\nfragment {} on {} {}",
            fragment.name,
            fragment.on_type,
            braced(&render_selections(&fragment.selections)),
        ));
    }

    out
}

fn braced(inner: &str) -> String {
    if inner.is_empty() {
        "{ }".to_string()
    } else {
        format!("{{ {inner} }}")
    }
}

fn render_selections(selections: &IndexMap<String, FieldNode>) -> String {
    selections.values()
        .map(render_node)
        .collect::<Vec<_>>()
        .join(" ")
}

fn render_node(node: &FieldNode) -> String {
    let mut out = String::new();

    if let Some(alias) = &node.alias
        && alias != &node.name {
        out.push_str(alias);
        out.push_str(": ");
    }
    out.push_str(&node.name);

    if !node.arguments.is_empty() {
        let arguments = node.arguments.iter()
            .map(|(name, argument)| format!("{name}: {}", argument.to_graphql()))
            .collect::<Vec<_>>()
            .join(", ");
        out.push_str(&format!("({arguments})"));
    }

    for directive in &node.directives {
        out.push(' ');
        out.push_str(&directive.to_graphql());
    }

    let mut inner: Vec<String> = Vec::new();
    inner.extend(node.children.values().map(render_node));
    inner.extend(
        node.fragment_spreads.iter()
            .map(|spread| format!("...{spread}")),
    );
    inner.extend(node.inline_fragments.iter().map(|inline| format!(
        "... on {} {}",
        inline.on_type,
        braced(&render_selections(&inline.selections)),
    )));

    if !inner.is_empty() {
        out.push_str(&format!(" {{ {} }}", inner.join(" ")));
    }

    out
}
