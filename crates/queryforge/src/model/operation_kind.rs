use crate::error::EngineError;
use crate::error::Result;

#[derive(Clone, Copy, Debug, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Query,
    Mutation,
    Subscription,
}

impl OperationKind {
    pub fn parse(keyword: &str) -> Result<Self> {
        match keyword {
            "query" => Ok(Self::Query),
            "mutation" => Ok(Self::Mutation),
            "subscription" => Ok(Self::Subscription),
            other => Err(EngineError::InvalidValue {
                reason: format!(
                    "operation kind must be `query`, `mutation`, or \
                    `subscription`; got `{other}`",
                ),
            }),
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
        }
    }

    /// The conventional root type name for this operation kind.
    pub fn default_root_type(&self) -> &'static str {
        match self {
            Self::Query => "Query",
            Self::Mutation => "Mutation",
            Self::Subscription => "Subscription",
        }
    }
}
