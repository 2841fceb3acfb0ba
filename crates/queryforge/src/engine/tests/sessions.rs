use super::schemaless_engine;
use crate::engine::StartSessionParams;
use crate::error::EngineError;
use crate::model::OperationKind;

#[tokio::test]
async fn default_session_is_an_anonymous_query_with_a_generated_id() {
    let engine = schemaless_engine();
    let response = engine
        .start_session(StartSessionParams::default())
        .await
        .unwrap();
    assert_eq!(response.operation_kind, OperationKind::Query);
    assert!(response.operation_name.is_none());
    assert!(!response.session_id.is_empty());
}

#[tokio::test]
async fn explicit_kind_name_and_id_are_honored() {
    let engine = schemaless_engine();
    let response = engine
        .start_session(StartSessionParams {
            session_id: Some("s1".to_string()),
            operation_kind: Some("mutation".to_string()),
            operation_name: Some("AddUser".to_string()),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(response.session_id, "s1");
    assert_eq!(response.operation_kind, OperationKind::Mutation);

    let current = engine.get_current_query("s1").await.unwrap();
    assert_eq!(current.query_string, "mutation AddUser { }");
}

#[tokio::test]
async fn unknown_operation_kinds_and_bad_names_are_rejected() {
    let engine = schemaless_engine();
    assert!(engine
        .start_session(StartSessionParams {
            operation_kind: Some("subscription!".to_string()),
            ..Default::default()
        })
        .await
        .is_err());
    assert_eq!(
        engine
            .start_session(StartSessionParams {
                operation_name: Some("bad name".to_string()),
                ..Default::default()
            })
            .await
            .unwrap_err(),
        EngineError::InvalidName {
            kind: "operation",
            name: "bad name".to_string(),
        },
    );
}

#[tokio::test]
async fn ending_a_session_removes_it_and_reports_prior_existence() {
    let engine = schemaless_engine();
    let session_id = super::named_session(&engine, "Q").await;

    let ended = engine.end_session(&session_id).await.unwrap();
    assert!(ended.ended);
    let again = engine.end_session(&session_id).await.unwrap();
    assert!(!again.ended);

    assert_eq!(
        engine.get_current_query(&session_id).await.unwrap_err(),
        EngineError::SessionNotFound {
            session_id: session_id.clone(),
        },
    );
}

#[tokio::test]
async fn operations_against_a_missing_session_fail_cleanly() {
    let engine = schemaless_engine();
    assert_eq!(
        engine.select_field("ghost", "", "user", None).await.unwrap_err(),
        EngineError::SessionNotFound {
            session_id: "ghost".to_string(),
        },
    );
}
