//! Operation-level tests exercising the engine end to end against the
//! in-memory store, with and without a schema catalog.

mod arguments;
mod directives;
mod fragments;
mod sessions;

use crate::engine::Engine;
use crate::engine::StartSessionParams;
use crate::oracle::NullOracle;
use crate::oracle::SchemaCatalog;
use crate::store::InMemorySessionStore;
use std::sync::Arc;

const TEST_SDL: &str = r#"
    type Query {
        user(id: ID!): User
        posts(first: Int, filter: PostFilter): [Post!]
        search(term: String!): [SearchResult!]
    }

    type User implements Node {
        id: ID!
        name: String!
        status: Status
        posts(first: Int): [Post!]
    }

    type Post implements Node {
        id: ID!
        title: String!
    }

    interface Node {
        id: ID!
    }

    union SearchResult = User | Post

    enum Status {
        ACTIVE
        BANNED
    }

    input PostFilter {
        titleContains: String
        limit: Int
    }
"#;

/// An engine with no schema: every schema-aware check degrades to a skip.
fn schemaless_engine() -> Engine {
    Engine::new(
        Arc::new(InMemorySessionStore::default()),
        Arc::new(NullOracle),
    )
}

/// An engine resolving types through the test schema.
fn schema_engine() -> Engine {
    Engine::new(
        Arc::new(InMemorySessionStore::default()),
        Arc::new(SchemaCatalog::from_sdl(TEST_SDL).unwrap()),
    )
}

async fn named_session(engine: &Engine, operation_name: &str) -> String {
    engine
        .start_session(StartSessionParams {
            operation_name: Some(operation_name.to_string()),
            ..Default::default()
        })
        .await
        .unwrap()
        .session_id
}

async fn query_string(engine: &Engine, session_id: &str) -> String {
    engine.get_current_query(session_id).await.unwrap().query_string
}
