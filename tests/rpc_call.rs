use mockito::Matcher;
use serde_json::{json, Value};

use limesurvey_rpc::config::init_test_logging;
use limesurvey_rpc::{CallContext, RpcError};

mod common;
use common::{client_for, failure, success, ENDPOINT_PATH};

#[tokio::test]
async fn test_request_is_posted_as_json_envelope() {
    let _ = init_test_logging();
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("POST", ENDPOINT_PATH)
        .match_header("content-type", "application/json")
        .match_header("accept", "application/json")
        .match_body(Matcher::Json(json!({
            "id": 1,
            "method": "get_session_key",
            "params": ["admin", "secret"]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(success(json!("k3y")))
        .expect(1)
        .create_async()
        .await;

    let mut client = client_for(&server.url());
    client
        .authenticate(&CallContext::new(), "admin", "secret")
        .await
        .unwrap();

    assert_eq!(client.session_key(), "k3y");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_surveys_decodes_records() {
    let _ = init_test_logging();
    let mut server = mockito::Server::new_async().await;

    let _login = server
        .mock("POST", ENDPOINT_PATH)
        .match_body(Matcher::PartialJson(json!({"method": "get_session_key"})))
        .with_body(success(json!("k3y")))
        .create_async()
        .await;
    let list = server
        .mock("POST", ENDPOINT_PATH)
        .match_body(Matcher::Json(json!({
            "id": 1,
            "method": "list_surveys",
            "params": ["k3y", null]
        })))
        .with_body(success(json!([
            {
                "sid": 42,
                "surveyls_title": "Customer feedback",
                "startdate": "2024-01-01 00:00:00",
                "expires": null,
                "active": "Y"
            },
            {
                "sid": 43,
                "surveyls_title": "Exit interview",
                "startdate": null,
                "expires": null,
                "active": "N",
                "language": "de"
            }
        ])))
        .expect(1)
        .create_async()
        .await;

    let ctx = CallContext::new();
    let mut client = client_for(&server.url());
    client.authenticate(&ctx, "admin", "secret").await.unwrap();

    let surveys = client.list_surveys(&ctx).await.unwrap();
    assert_eq!(surveys.len(), 2);
    assert_eq!(surveys[0].survey_id, 42);
    assert_eq!(surveys[0].active, "Y");
    assert_eq!(surveys[0].expires, "");
    assert_eq!(surveys[1].title, "Exit interview");
    assert!(!surveys[1].is_active());
    list.assert_async().await;
}

#[tokio::test]
async fn test_remote_error_wins_over_result() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", ENDPOINT_PATH)
        .with_body(
            json!({"id": 1, "result": [{"sid": 1}], "error": "Invalid session key"}).to_string(),
        )
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client.list_surveys(&CallContext::new()).await.unwrap_err();

    match err {
        RpcError::Remote { message, .. } => assert_eq!(message, "Invalid session key"),
        other => panic!("Expected Remote error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unknown_top_level_member_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", ENDPOINT_PATH)
        .with_body(r#"{"id": 1, "result": "k3y", "error": null, "extra": true}"#)
        .create_async()
        .await;

    let mut client = client_for(&server.url());
    let err = client
        .authenticate(&CallContext::new(), "admin", "secret")
        .await
        .unwrap_err();

    assert!(matches!(err, RpcError::Decode { .. }), "got {:?}", err);
    assert!(!client.is_authenticated());
}

#[tokio::test]
async fn test_non_json_body_is_decode_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", ENDPOINT_PATH)
        .with_status(500)
        .with_header("content-type", "text/html")
        .with_body("<html><body>Internal Server Error</body></html>")
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client
        .rpc()
        .call::<_, Value>(&CallContext::new(), "list_surveys", &json!(["k", null]))
        .await
        .unwrap_err();

    assert!(matches!(err, RpcError::Decode { .. }), "got {:?}", err);
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_structured_remote_error_keeps_value() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", ENDPOINT_PATH)
        .with_body(failure(json!({"code": 403, "status": "No permission"})))
        .create_async()
        .await;

    let client = client_for(&server.url());
    let err = client
        .call_authenticated::<Value>(&CallContext::new(), "get_summary", vec![json!(42)])
        .await
        .unwrap_err();

    match err {
        RpcError::Remote { message, value } => {
            assert!(message.contains("No permission"));
            assert_eq!(value["code"], 403);
        }
        other => panic!("Expected Remote error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_one_exchange_per_call() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", ENDPOINT_PATH)
        .with_body(success(json!([])))
        .expect(3)
        .create_async()
        .await;

    let ctx = CallContext::new();
    let client = client_for(&server.url());
    for _ in 0..3 {
        assert!(client.list_surveys(&ctx).await.unwrap().is_empty());
    }

    mock.assert_async().await;
}
