//! Integration tests for the transport client against a minimal in-process
//! HTTP stub. Covers the normalization contract: every failure mode settles
//! to a `Failure` outcome, and the probe collapses to a bool.

use hearth::api::{AssistantClient, GenerateOutcome};
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;

/// Serve exactly one connection with a canned HTTP response, returning the
/// base URL to point the client at.
fn serve_once(status: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind stub listener");
    let addr = listener.local_addr().expect("stub addr");
    thread::spawn(move || {
        if let Ok((stream, _)) = listener.accept() {
            handle(stream, status, body);
        }
    });
    format!("http://{addr}")
}

fn handle(mut stream: TcpStream, status: &str, body: &str) {
    let mut reader = BufReader::new(stream.try_clone().expect("clone stream"));
    let mut content_length = 0usize;
    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        if let Some(rest) = line.to_ascii_lowercase().strip_prefix("content-length:") {
            content_length = rest.trim().parse().unwrap_or(0);
        }
    }
    if content_length > 0 {
        let mut request_body = vec![0u8; content_length];
        let _ = reader.read_exact(&mut request_body);
    }
    let response = format!(
        "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

/// A port that nothing listens on.
fn dead_base_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    format!("http://{addr}")
}

#[tokio::test]
async fn generate_returns_output_on_success() {
    let base = serve_once("200 OK", r#"{"output":"hi"}"#);
    let client = AssistantClient::new(base);
    let outcome = client.generate("hello", None).await;
    assert_eq!(outcome, GenerateOutcome::Output("hi".to_string()));
}

#[tokio::test]
async fn generate_surfaces_application_error_from_2xx_body() {
    let base = serve_once("200 OK", r#"{"error":"model not loaded"}"#);
    let client = AssistantClient::new(base);
    let outcome = client.generate("hello", Some(0.2)).await;
    assert_eq!(
        outcome,
        GenerateOutcome::Failure("model not loaded".to_string())
    );
}

#[tokio::test]
async fn generate_treats_http_500_as_failure_regardless_of_body() {
    let base = serve_once("500 Internal Server Error", r#"{"output":"hi"}"#);
    let client = AssistantClient::new(base);
    match client.generate("hello", None).await {
        GenerateOutcome::Failure(message) => assert!(message.contains("500")),
        other => panic!("expected failure, got {other:?}"),
    }
}

#[tokio::test]
async fn generate_normalizes_malformed_json() {
    let base = serve_once("200 OK", "<html>definitely not json</html>");
    let client = AssistantClient::new(base);
    assert!(client.generate("hello", None).await.is_failure());
}

#[tokio::test]
async fn generate_normalizes_connection_refusal() {
    let client = AssistantClient::new(dead_base_url());
    assert!(client.generate("hello", None).await.is_failure());
}

#[tokio::test]
async fn probe_is_true_for_any_200_regardless_of_body() {
    let base = serve_once("200 OK", "<html>docs page</html>");
    let client = AssistantClient::new(base);
    assert!(client.test_connection().await);
}

#[tokio::test]
async fn probe_is_false_for_server_errors() {
    let base = serve_once("503 Service Unavailable", "");
    let client = AssistantClient::new(base);
    assert!(!client.test_connection().await);
}

#[tokio::test]
async fn probe_is_false_when_connection_is_refused() {
    let client = AssistantClient::new(dead_base_url());
    assert!(!client.test_connection().await);
}
