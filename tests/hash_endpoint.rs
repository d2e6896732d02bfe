//! End-to-end tests for the hashing and health endpoints.

use std::collections::HashSet;

use hash_service::config::ServiceConfig;
use hash_service::hashing::sha256_hex;
use hash_service::observability::Telemetry;
use opentelemetry::Value;
use reqwest::StatusCode;

mod common;

const ABC_DIGEST: &str = "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad";

fn is_lower_hex_digest(s: &str) -> bool {
    s.len() == 64 && s.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}

#[tokio::test]
async fn test_hash_standard_vector() {
    let server = common::start_server(ServiceConfig::default(), Telemetry::disabled()).await;
    let client = common::client();

    let res = client.post(server.url("/hash")).body("abc").send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.text().await.unwrap(), ABC_DIGEST);
}

#[tokio::test]
async fn test_hash_ignores_surrounding_whitespace() {
    let server = common::start_server(ServiceConfig::default(), Telemetry::disabled()).await;
    let client = common::client();

    for body in ["abc", " abc", "abc\n", "\t\r\n abc \n\n"] {
        let res = client.post(server.url("/hash")).body(body).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK, "body {:?}", body);
        assert_eq!(res.text().await.unwrap(), ABC_DIGEST, "body {:?}", body);
    }
}

#[tokio::test]
async fn test_hash_is_deterministic() {
    let server = common::start_server(ServiceConfig::default(), Telemetry::disabled()).await;
    let client = common::client();

    let mut seen = HashSet::new();
    for _ in 0..5 {
        let res = client
            .post(server.url("/hash"))
            .body("the same payload every time")
            .send()
            .await
            .unwrap();
        let digest = res.text().await.unwrap();
        assert!(is_lower_hex_digest(&digest));
        seen.insert(digest);
    }
    assert_eq!(seen.len(), 1);
}

#[tokio::test]
async fn test_blank_input_is_rejected() {
    let server = common::start_server(ServiceConfig::default(), Telemetry::disabled()).await;
    let client = common::client();

    for body in ["", " ", "\n\t"] {
        let res = client.post(server.url("/hash")).body(body).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let json: serde_json::Value = res.json().await.unwrap();
        assert_eq!(json, serde_json::json!({"error": "No input provided"}));
    }
}

#[tokio::test]
async fn test_health_is_idempotent() {
    let server = common::start_server(ServiceConfig::default(), Telemetry::disabled()).await;
    let client = common::client();

    // Health does not depend on prior hashing traffic.
    let _ = client.post(server.url("/hash")).body("").send().await.unwrap();
    let _ = client.post(server.url("/hash")).body("abc").send().await.unwrap();

    for _ in 0..3 {
        let res = client.get(server.url("/health")).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let json: serde_json::Value = res.json().await.unwrap();
        assert_eq!(json, serde_json::json!({"status": "healthy"}));
    }
}

#[tokio::test]
async fn test_concurrent_requests_do_not_interfere() {
    let server = common::start_server(ServiceConfig::default(), Telemetry::disabled()).await;
    let client = common::client();

    let mut tasks = Vec::new();
    for i in 0..50 {
        let client = client.clone();
        let url = server.url("/hash");
        tasks.push(tokio::spawn(async move {
            let input = format!("payload-{}-{}", i, "x".repeat(i));
            let res = client.post(url).body(input.clone()).send().await.unwrap();
            assert_eq!(res.status(), StatusCode::OK);
            (input, res.text().await.unwrap())
        }));
    }

    for task in tasks {
        let (input, digest) = task.await.unwrap();
        assert_eq!(digest, sha256_hex(input.as_bytes()).as_str());
    }
}

#[tokio::test]
async fn test_oversized_body_is_rejected() {
    let mut config = ServiceConfig::default();
    config.limits.max_body_bytes = 16;
    let server = common::start_server(config, Telemetry::disabled()).await;
    let client = common::client();

    let res = client
        .post(server.url("/hash"))
        .body("x".repeat(17))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_responses_carry_request_id() {
    let server = common::start_server(ServiceConfig::default(), Telemetry::disabled()).await;
    let client = common::client();

    let res = client.post(server.url("/hash")).body("abc").send().await.unwrap();
    assert!(res.headers().contains_key("x-request-id"));

    let res = client
        .get(server.url("/health"))
        .header("x-request-id", "trace-me")
        .send()
        .await
        .unwrap();
    assert_eq!(res.headers()["x-request-id"], "trace-me");
}

#[tokio::test]
async fn test_one_span_per_hash_request() {
    let (telemetry, exporter) = common::in_memory_telemetry();
    let server = common::start_server(ServiceConfig::default(), telemetry).await;
    let client = common::client();

    let res = client.post(server.url("/hash")).body("  abc  ").send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let res = client.post(server.url("/hash")).body(" ").send().await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let res = client.get(server.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let spans = exporter.get_finished_spans().unwrap();
    assert_eq!(spans.len(), 2, "health checks are not traced");

    let attr = |i: usize, key: &str| {
        spans[i]
            .attributes
            .iter()
            .find(|kv| kv.key.as_str() == key)
            .map(|kv| kv.value.clone())
    };

    assert_eq!(spans[0].name, "POST /hash");
    assert_eq!(attr(0, "input_length"), Some(Value::I64(3)));
    assert_eq!(attr(0, "hash"), Some(Value::from(ABC_DIGEST)));
    assert_eq!(attr(0, "error"), None);

    assert_eq!(attr(1, "error"), Some(Value::Bool(true)));
    assert_eq!(attr(1, "hash"), None);
}
