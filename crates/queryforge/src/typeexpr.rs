use crate::error::EngineError;
use crate::error::Result;
use crate::validators;

/// A parsed GraphQL type annotation string, e.g. `[Int!]!`, with
/// nullability tracked at every wrapping level.
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum TypeExpr {
    Named {
        name: String,
        nullable: bool,
    },
    List {
        of: Box<TypeExpr>,
        nullable: bool,
    },
}

impl TypeExpr {
    /// Parse a GraphQL type string (`Name`, `Name!`, `[...]`, `[...]!`).
    pub fn parse(source: &str) -> Result<Self> {
        Self::parse_nullable(source.trim(), true).ok_or_else(|| {
            EngineError::InvalidName {
                kind: "type",
                name: source.to_string(),
            }
        })
    }

    fn parse_nullable(source: &str, nullable: bool) -> Option<Self> {
        if let Some(inner) = source.strip_suffix('!') {
            // A single non-null wrapper per level; `Int!!` is malformed.
            if !nullable {
                return None;
            }
            return Self::parse_nullable(inner.trim_end(), false);
        }
        if let Some(rest) = source.strip_prefix('[') {
            let inner = rest.strip_suffix(']')?;
            return Some(TypeExpr::List {
                of: Box::new(Self::parse_nullable(inner.trim(), true)?),
                nullable,
            });
        }
        if validators::is_valid_name(source) {
            Some(TypeExpr::Named {
                name: source.to_string(),
                nullable,
            })
        } else {
            None
        }
    }

    pub fn nullable(&self) -> bool {
        match self {
            Self::Named { nullable, .. } | Self::List { nullable, .. } => *nullable,
        }
    }

    /// Recursively unwrap list wrappers and return the innermost named
    /// type.
    pub fn innermost_name(&self) -> &str {
        match self {
            Self::Named { name, .. } => name.as_str(),
            Self::List { of, .. } => of.innermost_name(),
        }
    }

    pub fn to_graphql_string(&self) -> String {
        let (rendered, nullable) = match self {
            Self::Named { name, nullable } => (name.clone(), *nullable),
            Self::List { of, nullable } => (
                format!("[{}]", of.to_graphql_string()),
                *nullable,
            ),
        };
        if nullable {
            rendered
        } else {
            format!("{rendered}!")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_named_types_with_nullability() {
        assert_eq!(TypeExpr::parse("Int").unwrap(), TypeExpr::Named {
            name: "Int".to_string(),
            nullable: true,
        });
        assert_eq!(TypeExpr::parse("ID!").unwrap(), TypeExpr::Named {
            name: "ID".to_string(),
            nullable: false,
        });
    }

    #[test]
    fn parses_nested_list_wrappers() {
        let expr = TypeExpr::parse("[Int!]!").unwrap();
        assert_eq!(expr, TypeExpr::List {
            of: Box::new(TypeExpr::Named {
                name: "Int".to_string(),
                nullable: false,
            }),
            nullable: false,
        });
        assert_eq!(expr.innermost_name(), "Int");
    }

    #[test]
    fn rendering_round_trips_the_source_string() {
        for source in ["Int", "ID!", "[String]", "[Int!]!", "[[Float]!]"] {
            assert_eq!(
                TypeExpr::parse(source).unwrap().to_graphql_string(),
                source,
            );
        }
    }

    #[test]
    fn rejects_malformed_type_strings() {
        for source in ["", "!", "[Int", "Int]", "[]", "In t", "Int!!"] {
            assert!(TypeExpr::parse(source).is_err(), "accepted `{source}`");
        }
    }
}
