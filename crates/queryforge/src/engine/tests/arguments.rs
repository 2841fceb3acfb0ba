use super::named_session;
use super::query_string;
use super::schema_engine;
use super::schemaless_engine;
use crate::engine::Engine;
use crate::error::EngineError;
use crate::oracle::SchemaCatalog;
use crate::store::InMemorySessionStore;
use std::sync::Arc;

/// A schema whose `id` argument is `Int!` rather than `ID!`, for the
/// strict-rejection half of the id-argument scenario.
fn int_id_engine() -> Engine {
    Engine::new(
        Arc::new(InMemorySessionStore::default()),
        Arc::new(SchemaCatalog::from_sdl(r#"
            type Query {
                user(id: Int!): User
            }

            type User {
                id: Int!
                name: String!
            }
        "#).unwrap()),
    )
}

#[tokio::test]
async fn string_arguments_stay_literal_without_a_schema() {
    let engine = schemaless_engine();
    let session_id = named_session(&engine, "Q").await;

    engine.select_field(&session_id, "", "user", None).await.unwrap();
    let response = engine
        .set_string_argument(&session_id, "user", "name", "ada")
        .await
        .unwrap();
    assert_eq!(response.stored_as, "literal");
    assert_eq!(
        query_string(&engine, &session_id).await,
        "query Q { user(name: \"ada\") }",
    );
}

#[tokio::test]
async fn string_arguments_coerce_against_resolved_int_targets() {
    let engine = schema_engine();
    let session_id = named_session(&engine, "Q").await;

    engine.select_field(&session_id, "", "posts", None).await.unwrap();
    let response = engine
        .set_string_argument(&session_id, "posts", "first", "10")
        .await
        .unwrap();
    assert_eq!(response.stored_as, "typed");
    assert_eq!(
        query_string(&engine, &session_id).await,
        "query Q { posts(first: 10) }",
    );
}

#[tokio::test]
async fn unparseable_strings_against_resolved_int_targets_are_rejected() {
    let engine = schema_engine();
    let session_id = named_session(&engine, "Q").await;

    engine.select_field(&session_id, "", "posts", None).await.unwrap();
    let err = engine
        .set_string_argument(&session_id, "posts", "first", "abc")
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::TypeMismatch { .. }));
}

#[tokio::test]
async fn typed_arguments_coerce_and_render_per_kind() {
    let engine = schema_engine();
    let session_id = named_session(&engine, "Q1").await;

    engine.select_field(&session_id, "", "user", None).await.unwrap();
    engine
        .set_typed_argument(&session_id, "user", "id", &serde_json::json!(7))
        .await
        .unwrap();
    engine.select_field(&session_id, "user", "id", None).await.unwrap();
    engine.select_field(&session_id, "user", "name", None).await.unwrap();

    assert_eq!(
        query_string(&engine, &session_id).await,
        "query Q1 { user(id: 7) { id name } }",
    );
}

#[tokio::test]
async fn int_typed_ids_render_unquoted_and_reject_non_numeric_strings() {
    let engine = int_id_engine();
    let session_id = named_session(&engine, "Q1").await;

    engine.select_field(&session_id, "", "user", None).await.unwrap();
    engine
        .set_typed_argument(&session_id, "user", "id", &serde_json::json!(7))
        .await
        .unwrap();
    assert_eq!(
        query_string(&engine, &session_id).await,
        "query Q1 { user(id: 7) }",
    );

    let err = engine
        .set_typed_argument(&session_id, "user", "id", &serde_json::json!("abc"))
        .await
        .unwrap_err();
    let EngineError::TypeMismatch { expected, .. } = err else {
        panic!("expected a type mismatch, got {err:?}");
    };
    assert!(expected.contains("Int"));
}

#[tokio::test]
async fn id_typed_arguments_accept_arbitrary_strings() {
    // `ID` is a string-or-int scalar: "abc" is a legitimate identifier,
    // so only the Int-typed variant of the scenario above rejects it.
    let engine = schema_engine();
    let session_id = named_session(&engine, "Q").await;

    engine.select_field(&session_id, "", "user", None).await.unwrap();
    engine
        .set_typed_argument(&session_id, "user", "id", &serde_json::json!("abc"))
        .await
        .unwrap();
    assert_eq!(
        query_string(&engine, &session_id).await,
        "query Q { user(id: \"abc\") }",
    );
}

#[tokio::test]
async fn typed_arguments_fail_coercion_against_the_resolved_type() {
    let engine = schema_engine();
    let session_id = named_session(&engine, "Q").await;

    engine.select_field(&session_id, "", "posts", None).await.unwrap();
    let err = engine
        .set_typed_argument(
            &session_id,
            "posts",
            "first",
            &serde_json::json!("abc"),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::TypeMismatch { .. }));
}

#[tokio::test]
async fn argument_types_resolve_through_nested_field_paths() {
    let engine = schema_engine();
    let session_id = named_session(&engine, "Q").await;

    engine.select_field(&session_id, "", "user", None).await.unwrap();
    engine.select_field(&session_id, "user", "posts", None).await.unwrap();
    // `user.posts(first:)` resolves through Query -> User -> posts.
    engine
        .set_string_argument(&session_id, "user.posts", "first", "3")
        .await
        .unwrap();
    assert_eq!(
        query_string(&engine, &session_id).await,
        "query Q { user { posts(first: 3) } }",
    );
}

#[tokio::test]
async fn pagination_arguments_enforce_the_ceiling_in_every_entry_point() {
    let engine = schemaless_engine();
    let session_id = named_session(&engine, "Q").await;
    engine.select_field(&session_id, "", "posts", None).await.unwrap();

    assert!(engine
        .set_string_argument(&session_id, "posts", "first", "1001")
        .await
        .is_err());
    assert!(engine
        .set_typed_argument(&session_id, "posts", "limit", &serde_json::json!(1001))
        .await
        .is_err());
    assert!(engine
        .set_typed_argument(&session_id, "posts", "first", &serde_json::json!(1000))
        .await
        .is_ok());
}

#[tokio::test]
async fn variable_arguments_require_a_declaration_first() {
    let engine = schemaless_engine();
    let session_id = named_session(&engine, "Q").await;
    engine.select_field(&session_id, "", "posts", None).await.unwrap();

    assert_eq!(
        engine
            .set_variable_argument(&session_id, "posts", "first", "$limit")
            .await
            .unwrap_err(),
        EngineError::UndeclaredVariable {
            name: "$limit".to_string(),
        },
    );

    engine
        .set_query_variable(&session_id, "$limit", "Int", None)
        .await
        .unwrap();
    engine
        .set_variable_argument(&session_id, "posts", "first", "$limit")
        .await
        .unwrap();
    assert_eq!(
        query_string(&engine, &session_id).await,
        "query Q($limit: Int) { posts(first: $limit) }",
    );
}

#[tokio::test]
async fn input_object_arguments_coerce_nested_fields() {
    let engine = schema_engine();
    let session_id = named_session(&engine, "Q").await;
    engine.select_field(&session_id, "", "posts", None).await.unwrap();

    let serde_json::Value::Object(fields) = serde_json::json!({
        "titleContains": "rust",
        "limit": "10",
    }) else {
        panic!("expected an object literal");
    };
    engine
        .set_input_object_argument(&session_id, "posts", "filter", &fields)
        .await
        .unwrap();
    assert_eq!(
        query_string(&engine, &session_id).await,
        "query Q { posts(filter: {titleContains: \"rust\", limit: 10}) }",
    );
}

#[tokio::test]
async fn input_object_arguments_reject_non_input_object_targets() {
    let engine = schema_engine();
    let session_id = named_session(&engine, "Q").await;
    engine.select_field(&session_id, "", "posts", None).await.unwrap();

    let serde_json::Value::Object(fields) = serde_json::json!({"x": 1}) else {
        panic!("expected an object literal");
    };
    let err = engine
        .set_input_object_argument(&session_id, "posts", "first", &fields)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::TypeMismatch { .. }));
}

#[tokio::test]
async fn arguments_on_missing_paths_fail_without_side_effects() {
    let engine = schemaless_engine();
    let session_id = named_session(&engine, "Q").await;

    assert_eq!(
        engine
            .set_string_argument(&session_id, "nowhere", "x", "1")
            .await
            .unwrap_err(),
        EngineError::PathNotFound {
            path: "nowhere".to_string(),
        },
    );
    assert_eq!(query_string(&engine, &session_id).await, "query Q { }");
}

#[tokio::test]
async fn oversized_strings_are_rejected_before_storage() {
    let engine = schemaless_engine();
    let session_id = named_session(&engine, "Q").await;
    engine.select_field(&session_id, "", "user", None).await.unwrap();

    let oversized = "x".repeat(8193);
    assert!(engine
        .set_string_argument(&session_id, "user", "name", &oversized)
        .await
        .is_err());
}
