use crate::model::Argument;

/// A directive attached to a field or to the operation, e.g.
/// `@include(if: $flag)`. The argument list is ordered; re-application of
/// the same directive merges arguments instead of duplicating the entry.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub struct DirectiveApplication {
    pub name: String,
    pub arguments: Vec<(String, Argument)>,
}

impl DirectiveApplication {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            arguments: vec![],
        }
    }

    /// Merge in additional arguments: same-name entries are replaced in
    /// place, new ones appended in order.
    pub fn merge_arguments(&mut self, arguments: Vec<(String, Argument)>) {
        for (name, argument) in arguments {
            if let Some(existing) = self.arguments.iter_mut()
                .find(|(existing_name, _)| *existing_name == name) {
                existing.1 = argument;
            } else {
                self.arguments.push((name, argument));
            }
        }
    }

    pub fn to_graphql(&self) -> String {
        if self.arguments.is_empty() {
            format!("@{}", self.name)
        } else {
            format!(
                "@{}({})",
                self.name,
                self.arguments.iter()
                    .map(|(name, argument)| {
                        format!("{name}: {}", argument.to_graphql())
                    })
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        }
    }
}
