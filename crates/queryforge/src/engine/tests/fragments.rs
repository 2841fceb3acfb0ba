use super::named_session;
use super::query_string;
use super::schema_engine;
use super::schemaless_engine;
use crate::error::EngineError;

fn names(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

#[tokio::test]
async fn defined_fragments_render_after_the_operation() {
    let engine = schemaless_engine();
    let session_id = named_session(&engine, "Q").await;

    engine.select_field(&session_id, "", "user", None).await.unwrap();
    engine
        .define_named_fragment(&session_id, "UserBits", "User", &names(&["id", "name"]))
        .await
        .unwrap();
    engine
        .apply_named_fragment(&session_id, "user", "UserBits")
        .await
        .unwrap();

    assert_eq!(
        query_string(&engine, &session_id).await,
        "query Q { user { ...UserBits } }\
        \n\nfragment UserBits on User { id name }",
    );
}

#[tokio::test]
async fn duplicate_definitions_and_unknown_applications_are_rejected() {
    let engine = schemaless_engine();
    let session_id = named_session(&engine, "Q").await;
    engine.select_field(&session_id, "", "user", None).await.unwrap();

    engine
        .define_named_fragment(&session_id, "UserBits", "User", &names(&["id"]))
        .await
        .unwrap();
    assert_eq!(
        engine
            .define_named_fragment(&session_id, "UserBits", "User", &names(&["name"]))
            .await
            .unwrap_err(),
        EngineError::FragmentAlreadyExists {
            name: "UserBits".to_string(),
        },
    );
    assert_eq!(
        engine
            .apply_named_fragment(&session_id, "user", "Missing")
            .await
            .unwrap_err(),
        EngineError::FragmentNotFound {
            name: "Missing".to_string(),
        },
    );
}

#[tokio::test]
async fn reapplying_a_named_fragment_is_idempotent() {
    let engine = schemaless_engine();
    let session_id = named_session(&engine, "Q").await;
    engine.select_field(&session_id, "", "user", None).await.unwrap();
    engine
        .define_named_fragment(&session_id, "UserBits", "User", &names(&["id"]))
        .await
        .unwrap();

    engine.apply_named_fragment(&session_id, "user", "UserBits").await.unwrap();
    engine.apply_named_fragment(&session_id, "user", "UserBits").await.unwrap();

    assert_eq!(
        query_string(&engine, &session_id).await,
        "query Q { user { ...UserBits } }\
        \n\nfragment UserBits on User { id }",
    );
}

#[tokio::test]
async fn inline_fragments_with_the_same_condition_merge() {
    let engine = schemaless_engine();
    let session_id = named_session(&engine, "Q").await;
    engine.select_field(&session_id, "", "search", None).await.unwrap();

    engine
        .apply_inline_fragment(&session_id, "search", "Post", &names(&["id"]))
        .await
        .unwrap();
    engine
        .apply_inline_fragment(&session_id, "search", "Post", &names(&["id", "title"]))
        .await
        .unwrap();
    engine
        .apply_inline_fragment(&session_id, "search", "User", &names(&["name"]))
        .await
        .unwrap();

    assert_eq!(
        query_string(&engine, &session_id).await,
        "query Q { search \
        { ... on Post { id title } ... on User { name } } }",
    );
}

#[tokio::test]
async fn schema_checks_reject_bad_conditions_and_unknown_fields() {
    let engine = schema_engine();
    let session_id = named_session(&engine, "Q").await;
    engine.select_field(&session_id, "", "search", None).await.unwrap();

    // Enums cannot carry a type condition.
    assert!(matches!(
        engine
            .apply_inline_fragment(&session_id, "search", "Status", &names(&["id"]))
            .await
            .unwrap_err(),
        EngineError::InvalidValue { .. },
    ));
    // `Post` has no `author` field.
    assert!(matches!(
        engine
            .define_named_fragment(&session_id, "Bad", "Post", &names(&["author"]))
            .await
            .unwrap_err(),
        EngineError::InvalidValue { .. },
    ));
    // Unknown type names skip the check rather than failing.
    engine
        .apply_inline_fragment(&session_id, "search", "Mystery", &names(&["anything"]))
        .await
        .unwrap();
}
