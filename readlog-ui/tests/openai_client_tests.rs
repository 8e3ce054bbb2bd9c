//! OpenAI client tests against a local mock server

use mockito::{Matcher, Server};
use readlog_common::config::OpenAiSettings;
use readlog_ui::feedback::{FeedbackError, FeedbackProvider, OpenAiClient};

fn client_for(server: &Server) -> OpenAiClient {
    let settings = OpenAiSettings {
        base_url: format!("{}/v1", server.url()),
        timeout_secs: 5,
        ..Default::default()
    };
    OpenAiClient::new("sk-test".to_string(), &settings).unwrap()
}

#[tokio::test]
async fn test_feedback_returned_from_first_choice() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat/completions")
        .match_header("authorization", "Bearer sk-test")
        .match_body(Matcher::PartialJson(serde_json::json!({
            "model": "gpt-4",
            "max_tokens": 1500
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r###"{"choices":[{"index":0,"message":{"role":"assistant","content":"## Rating\n8/10"}}]}"###,
        )
        .create_async()
        .await;

    let text = client_for(&server)
        .request_feedback("Holes", "Stanley digs holes.")
        .await
        .unwrap();

    assert_eq!(text, "## Rating\n8/10");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_unauthorized_is_invalid_key() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(401)
        .create_async()
        .await;

    let err = client_for(&server)
        .request_feedback("Holes", "Stanley digs holes.")
        .await
        .unwrap_err();

    assert!(matches!(err, FeedbackError::InvalidApiKey));
}

#[tokio::test]
async fn test_server_error_keeps_status_and_body() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .with_body("overloaded")
        .create_async()
        .await;

    let err = client_for(&server)
        .request_feedback("Holes", "Stanley digs holes.")
        .await
        .unwrap_err();

    match err {
        FeedbackError::Api(status, body) => {
            assert_eq!(status, 500);
            assert_eq!(body, "overloaded");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_malformed_json_is_parse_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("invalid json")
        .create_async()
        .await;

    let err = client_for(&server)
        .request_feedback("Holes", "Stanley digs holes.")
        .await
        .unwrap_err();

    assert!(matches!(err, FeedbackError::Parse(_)));
}

#[tokio::test]
async fn test_no_choices_is_empty_response() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"choices":[]}"#)
        .create_async()
        .await;

    let err = client_for(&server)
        .request_feedback("Holes", "Stanley digs holes.")
        .await
        .unwrap_err();

    assert!(matches!(err, FeedbackError::EmptyResponse));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let settings = OpenAiSettings {
        base_url: "http://127.0.0.1:1/v1".to_string(),
        timeout_secs: 2,
        ..Default::default()
    };
    let client = OpenAiClient::new("sk-test".to_string(), &settings).unwrap();

    let err = client
        .request_feedback("Holes", "Stanley digs holes.")
        .await
        .unwrap_err();

    assert!(matches!(err, FeedbackError::Network(_)));
}
