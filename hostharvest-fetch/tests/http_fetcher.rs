//! Integration tests for the HTTP page fetcher against a local socket.

use std::time::Duration;

use hostharvest_fetch::{AuthHeader, FetchError, FetchSettings, HttpPageFetcher, PageSource, RetryPolicy};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::task::JoinHandle;

// ============================================================================
// Canned Server
// ============================================================================

fn http_response(status_line: &str, body: &str) -> String {
    format!(
        "HTTP/1.1 {status_line}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        body.len()
    )
}

async fn read_head(socket: &mut TcpStream) -> String {
    let mut head = Vec::new();
    let mut chunk = [0u8; 1024];
    while !head.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = socket.read(&mut chunk).await.unwrap();
        if n == 0 {
            break;
        }
        head.extend_from_slice(&chunk[..n]);
    }
    String::from_utf8_lossy(&head).into_owned()
}

/// Answers one request with `response` and returns the request head.
async fn serve_once(response: String) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/api/apps", listener.local_addr().unwrap());
    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let head = read_head(&mut socket).await;
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
        head
    });
    (url, handle)
}

fn fetcher(url: &str) -> HttpPageFetcher {
    let mut settings = FetchSettings::new(url);
    settings.retry = RetryPolicy::no_retry();
    HttpPageFetcher::new(&settings).unwrap()
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn test_json_page_is_returned_with_headers_and_params() {
    let (url, server) = serve_once(http_response("200 OK", r#"{"data": [{"name": "A"}]}"#)).await;
    let settings = FetchSettings::new(&url).with_auth(AuthHeader::new("Netskope-Api-Token", "t0k"));
    let fetcher = HttpPageFetcher::new(&settings).unwrap();

    let params = vec![("limit".to_string(), "2".to_string())];
    let page = fetcher.fetch_page(&params).await.unwrap();

    assert_eq!(page, json!({"data": [{"name": "A"}]}));
    let head = server.await.unwrap().to_lowercase();
    assert!(head.starts_with("get /api/apps?limit=2 "), "request line: {head}");
    assert!(head.contains("netskope-api-token: t0k"));
    assert!(head.contains("accept: application/json"));
}

#[tokio::test]
async fn test_server_error_maps_to_status_with_body() {
    let (url, _server) = serve_once(http_response("500 Internal Server Error", "boom")).await;

    let err = fetcher(&url).fetch_page(&[]).await.unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    let FetchError::Status { body, .. } = &err else {
        panic!("expected a status error, got {err:?}");
    };
    assert_eq!(body, "boom");
    assert_eq!(err.to_string(), "API error 500: boom");
}

#[tokio::test]
async fn test_unreadable_error_body_keeps_status() {
    // Declares more body than it sends, then closes.
    let response = "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 100\r\nConnection: close\r\n\r\npartial";
    let (url, _server) = serve_once(response.to_string()).await;

    let err = fetcher(&url).fetch_page(&[]).await.unwrap_err();

    assert_eq!(err.status_code(), Some(503));
}

#[tokio::test]
async fn test_non_json_body_is_invalid_response() {
    let (url, _server) = serve_once(http_response("200 OK", "<html>login</html>")).await;

    let err = fetcher(&url).fetch_page(&[]).await.unwrap_err();

    assert!(matches!(err, FetchError::InvalidResponse(_)), "got {err:?}");
}

#[tokio::test]
async fn test_silent_server_times_out() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/api/apps", listener.local_addr().unwrap());
    let _server = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_head(&mut socket).await;
        tokio::time::sleep(Duration::from_secs(10)).await;
    });

    let mut settings = FetchSettings::new(&url).with_timeout(Duration::from_millis(200));
    settings.retry = RetryPolicy::no_retry();
    let err = HttpPageFetcher::new(&settings)
        .unwrap()
        .fetch_page(&[])
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Timeout(_)), "got {err:?}");
}

#[tokio::test]
async fn test_refused_connection_is_retried_then_fails() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}/api/apps", listener.local_addr().unwrap());
    drop(listener);

    let mut settings = FetchSettings::new(&url);
    settings.retry = RetryPolicy::new(2).with_base_delay(Duration::from_millis(1));
    let err = HttpPageFetcher::new(&settings)
        .unwrap()
        .fetch_page(&[])
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Request(_)), "got {err:?}");
    assert_eq!(err.status_code(), None);
}
