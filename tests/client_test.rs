use hn_checks::{HnError, RequestOptions, RestClient, RetryPolicy};
use httpmock::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

fn no_delay_policy(attempts: u32, status_codes: Vec<u16>) -> RetryPolicy {
    RetryPolicy {
        attempts,
        delay: Duration::ZERO,
        status_codes,
    }
}

#[tokio::test]
async fn test_get_returns_response_envelope() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/v0/topstories.json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!([1, 2, 3]));
    });

    let client = RestClient::new(RetryPolicy::default(), false);
    let response = client
        .get(
            &server.url("/v0/topstories.json"),
            RequestOptions {
                expect_status: Some(200),
                message: Some("get top stories".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    mock.assert();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(response.json().unwrap(), serde_json::json!([1, 2, 3]));
}

#[tokio::test]
async fn test_retries_on_configured_status_then_fails() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/busy");
        then.status(429).body("slow down");
    });

    let client = RestClient::new(no_delay_policy(2, vec![429]), false);
    let err = client
        .get(
            &server.url("/busy"),
            RequestOptions {
                expect_status: Some(200),
                message: Some("get busy resource".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    // initial attempt plus two retries
    assert_eq!(mock.hits(), 3);
    match err {
        HnError::UnexpectedStatus { message, .. } => {
            assert!(message.contains("429"));
            assert!(message.contains("200 expected"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_does_not_retry_unlisted_status() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/broken");
        then.status(500);
    });

    let client = RestClient::new(no_delay_policy(3, vec![429]), false);
    let response = client
        .get(
            &server.url("/broken"),
            RequestOptions {
                message: Some("get broken resource".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    assert_eq!(mock.hits(), 1);
    assert_eq!(response.status().as_u16(), 500);
}

#[tokio::test]
async fn test_unexpected_status_error_includes_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/missing");
        then.status(404)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"error": "not found"}));
    });

    let client = RestClient::new(RetryPolicy::default(), false);
    let err = client
        .get(
            &server.url("/missing"),
            RequestOptions {
                expect_status: Some(200),
                message: Some("get item".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    let text = err.to_string();
    assert!(text.contains("Failed to get item"));
    assert!(text.contains("404"));
    assert!(text.contains("not found"));
}

#[tokio::test]
async fn test_malformed_json_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/html");
        then.status(200).body("<html>not json</html>");
    });

    let client = RestClient::new(RetryPolicy::default(), false);
    let response = client
        .get(
            &server.url("/html"),
            RequestOptions {
                expect_status: Some(200),
                message: Some("get html page".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    match response.json().unwrap_err() {
        HnError::JsonError { body, .. } => assert!(body.contains("not json")),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_forwards_headers_and_query_params() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/search")
            .header("x-request-id", "abc-123")
            .query_param("print", "pretty");
        then.status(200).json_body(serde_json::json!({}));
    });

    let mut headers = HashMap::new();
    headers.insert("x-request-id".to_string(), "abc-123".to_string());
    let mut params = HashMap::new();
    params.insert("print".to_string(), Some("pretty".to_string()));
    // entries with no value are dropped before sending
    params.insert("orderBy".to_string(), None);

    let client = RestClient::new(RetryPolicy::default(), false);
    let response = client
        .get(
            &server.url("/search"),
            RequestOptions {
                headers: Some(headers),
                params: Some(params),
                expect_status: Some(200),
                message: Some("search items".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    mock.assert();
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn test_redirect_opt_out() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/old");
        then.status(302).header("Location", server.url("/new"));
    });
    server.mock(|when, then| {
        when.method(GET).path("/new");
        then.status(200).json_body(serde_json::json!({"moved": true}));
    });

    let client = RestClient::new(RetryPolicy::default(), false);

    let followed = client
        .get(
            &server.url("/old"),
            RequestOptions {
                message: Some("get moved resource".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(followed.status().as_u16(), 200);

    let raw = client
        .get(
            &server.url("/old"),
            RequestOptions {
                follow_redirects: false,
                message: Some("get moved resource".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(raw.status().as_u16(), 302);
}

#[tokio::test]
async fn test_connection_error_is_api_error() {
    // nothing listens on this port
    let client = RestClient::new(no_delay_policy(0, vec![429]), false);
    let err = client
        .get(
            "http://127.0.0.1:9",
            RequestOptions {
                message: Some("get unreachable host".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, HnError::ApiError(_)));
}
