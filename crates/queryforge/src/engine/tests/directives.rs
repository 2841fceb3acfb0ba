use super::named_session;
use super::query_string;
use super::schemaless_engine;
use crate::error::EngineError;

fn args(json: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
    let serde_json::Value::Object(map) = json else {
        panic!("expected an object literal");
    };
    map
}

#[tokio::test]
async fn field_directives_render_with_typed_and_variable_arguments() {
    let engine = schemaless_engine();
    let session_id = named_session(&engine, "Q").await;

    engine.select_field(&session_id, "", "user", None).await.unwrap();
    engine
        .set_query_variable(&session_id, "$flag", "Boolean!", None)
        .await
        .unwrap();
    // Leading `@` is accepted and stripped.
    engine
        .set_field_directive(
            &session_id,
            "user",
            "@include",
            &args(serde_json::json!({"if": "$flag"})),
        )
        .await
        .unwrap();
    engine
        .set_field_directive(
            &session_id,
            "user",
            "cached",
            &args(serde_json::json!({"ttl": 60})),
        )
        .await
        .unwrap();

    assert_eq!(
        query_string(&engine, &session_id).await,
        "query Q($flag: Boolean!) { user @include(if: $flag) @cached(ttl: 60) }",
    );
}

#[tokio::test]
async fn sigil_strings_must_reference_declared_variables() {
    let engine = schemaless_engine();
    let session_id = named_session(&engine, "Q").await;
    engine.select_field(&session_id, "", "user", None).await.unwrap();

    assert_eq!(
        engine
            .set_field_directive(
                &session_id,
                "user",
                "include",
                &args(serde_json::json!({"if": "$missing"})),
            )
            .await
            .unwrap_err(),
        EngineError::UndeclaredVariable {
            name: "$missing".to_string(),
        },
    );
}

#[tokio::test]
async fn reapplying_a_directive_merges_its_arguments() {
    let engine = schemaless_engine();
    let session_id = named_session(&engine, "Q").await;
    engine.select_field(&session_id, "", "user", None).await.unwrap();

    engine
        .set_field_directive(
            &session_id,
            "user",
            "cached",
            &args(serde_json::json!({"ttl": 60})),
        )
        .await
        .unwrap();
    engine
        .set_field_directive(
            &session_id,
            "user",
            "cached",
            &args(serde_json::json!({"ttl": 120, "scope": "PUBLIC"})),
        )
        .await
        .unwrap();

    assert_eq!(
        query_string(&engine, &session_id).await,
        "query Q { user @cached(ttl: 120, scope: \"PUBLIC\") }",
    );
}

#[tokio::test]
async fn operation_directives_render_between_header_and_selections() {
    let engine = schemaless_engine();
    let session_id = named_session(&engine, "Q").await;

    engine.select_field(&session_id, "", "user", None).await.unwrap();
    engine
        .set_operation_directive(
            &session_id,
            "persisted",
            &args(serde_json::json!({})),
        )
        .await
        .unwrap();

    assert_eq!(
        query_string(&engine, &session_id).await,
        "query Q @persisted { user }",
    );
}
