use crate::value;
use crate::value::Value;

/// A value bound to a field or directive argument.
///
/// Exactly one of the three states applies at a time; all coercion,
/// serialization, and cascade-cleanup logic switches on this enum rather
/// than probing value shapes.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Argument {
    /// A bare literal: the legacy implicit-string form. Always renders
    /// quoted.
    Literal(String),

    /// A value already coerced against the schema's argument type.
    /// Renders per its literal kind (numbers and booleans unquoted).
    Typed(Value),

    /// A reference to a declared variable, stored with its `$` sigil.
    Variable(String),
}

impl Argument {
    /// True if this argument references the given variable (in bare,
    /// tagged, or reference form), at any nesting depth.
    pub fn references_variable(&self, variable_name: &str) -> bool {
        match self {
            Self::Literal(text) => text == variable_name,
            Self::Typed(value) => value.references_variable(variable_name),
            Self::Variable(name) => name == variable_name,
        }
    }

    pub fn to_graphql(&self) -> String {
        match self {
            Self::Literal(text) => value::quote_string(text),
            Self::Typed(value) => value.to_graphql(),
            Self::Variable(name) => name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literals_render_quoted_and_typed_values_do_not() {
        assert_eq!(Argument::Literal("7".to_string()).to_graphql(), "\"7\"");
        assert_eq!(Argument::Typed(Value::Int(7)).to_graphql(), "7");
        assert_eq!(
            Argument::Variable("$id".to_string()).to_graphql(),
            "$id",
        );
    }

    #[test]
    fn reference_detection_covers_all_three_states() {
        assert!(Argument::Variable("$x".to_string()).references_variable("$x"));
        assert!(Argument::Literal("$x".to_string()).references_variable("$x"));
        assert!(
            Argument::Typed(Value::VarRef("$x".to_string()))
                .references_variable("$x"),
        );
        assert!(!Argument::Typed(Value::Int(1)).references_variable("$x"));
    }
}
