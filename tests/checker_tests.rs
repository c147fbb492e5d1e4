// tests/checker_tests.rs
use site_checker::{check, Checker, FailureKind};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve a single connection: read the request, then hand the socket to `finish`.
async fn serve_once<F>(finish: F) -> String
where
    F: FnOnce(tokio::net::TcpStream) + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = socket.read(&mut buf).await;
        finish(socket);
    });
    addr.to_string()
}

#[tokio::test]
async fn test_ok_site_is_up() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/")
        .with_status(200)
        .with_body("hello")
        .create_async()
        .await;

    let result = check(&format!("{}/", server.url()), 10.0).await.unwrap();

    mock.assert_async().await;
    assert!(result.succeeded());
    assert_eq!(result.status_code(), Some(200));
    assert!(result.elapsed_seconds().unwrap() >= 0.0);
    assert_eq!(result.error_message(), None);
}

#[tokio::test]
async fn test_not_found_is_a_valid_outcome() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/missing")
        .with_status(404)
        .create_async()
        .await;

    let result = check(&format!("{}/missing", server.url()), 10.0)
        .await
        .unwrap();

    assert!(!result.succeeded());
    assert_eq!(result.status_code(), Some(404));
    assert!(result.elapsed_seconds().is_some());
    assert_eq!(result.error_message(), None);
    assert_eq!(result.failure_kind(), None);
}

#[tokio::test]
async fn test_server_error_is_down_with_status() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .with_status(503)
        .create_async()
        .await;

    let result = check(&server.url(), 10.0).await.unwrap();

    assert!(!result.succeeded());
    assert_eq!(result.status_code(), Some(503));
    assert_eq!(result.error_message(), None);
}

#[tokio::test]
async fn test_redirect_is_followed() {
    let mut server = mockito::Server::new_async().await;
    let _old = server
        .mock("GET", "/old")
        .with_status(301)
        .with_header("location", &format!("{}/new", server.url()))
        .create_async()
        .await;
    let _new = server
        .mock("GET", "/new")
        .with_status(200)
        .create_async()
        .await;

    let result = check(&format!("{}/old", server.url()), 10.0)
        .await
        .unwrap();

    assert!(result.succeeded());
    assert_eq!(result.status_code(), Some(200));
}

#[tokio::test]
async fn test_redirect_loop_is_other_failure() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/loop")
        .with_status(302)
        .with_header("location", &format!("{}/loop", server.url()))
        .expect_at_least(1)
        .create_async()
        .await;

    let result = check(&format!("{}/loop", server.url()), 10.0)
        .await
        .unwrap();

    assert!(!result.succeeded());
    assert_eq!(result.status_code(), None);
    assert_eq!(result.failure_kind(), Some(FailureKind::Other));
    assert!(result
        .error_message()
        .unwrap()
        .starts_with("Request failed: "));
}

#[tokio::test]
async fn test_refused_connection() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let result = check(&format!("http://127.0.0.1:{}/", port), 10.0)
        .await
        .unwrap();

    assert!(!result.succeeded());
    assert_eq!(result.status_code(), None);
    assert_eq!(result.elapsed_seconds(), None);
    assert_eq!(
        result.error_message(),
        Some("Connection error - Website might be down")
    );
}

#[tokio::test]
async fn test_unresolvable_host() {
    let result = check("http://this-definitely-does-not-exist.invalid/", 10.0)
        .await
        .unwrap();

    assert!(!result.succeeded());
    assert_eq!(result.status_code(), None);
    assert_eq!(result.elapsed_seconds(), None);
    assert_eq!(
        result.error_message(),
        Some("Connection error - Website might be down")
    );
}

#[tokio::test]
async fn test_silent_server_times_out() {
    // The kernel completes the handshake; nothing ever answers.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let result = check(&format!("http://{}/", addr), 1.0).await.unwrap();

    assert!(!result.succeeded());
    assert_eq!(result.status_code(), None);
    assert_eq!(result.elapsed_seconds(), None);
    assert_eq!(result.failure_kind(), Some(FailureKind::Timeout));
    assert_eq!(
        result.error_message(),
        Some("Request timed out after 1 seconds")
    );
    drop(listener);
}

#[tokio::test]
async fn test_malformed_url_is_reported_not_raised() {
    let result = check("definitely not a url", 10.0).await.unwrap();

    assert!(!result.succeeded());
    assert_eq!(result.status_code(), None);
    assert_eq!(result.failure_kind(), Some(FailureKind::Other));
    let message = result.error_message().unwrap();
    assert!(message.starts_with("Request failed: "));

    let segments: Vec<&str> = message
        .trim_start_matches("Request failed: ")
        .split(": ")
        .collect();
    for (i, segment) in segments.iter().enumerate() {
        assert!(
            !segments[i + 1..].contains(segment),
            "repeated segment {segment:?} in {message:?}"
        );
    }
}

#[tokio::test]
async fn test_reset_connection_is_connection_failure() {
    let addr = serve_once(|socket| {
        socket.set_linger(Some(Duration::ZERO)).unwrap();
        drop(socket);
    })
    .await;

    let result = check(&format!("http://{}/", addr), 5.0).await.unwrap();

    assert_eq!(result.status_code(), None);
    assert_eq!(result.failure_kind(), Some(FailureKind::Connection));
    assert_eq!(
        result.error_message(),
        Some("Connection error - Website might be down")
    );
}

#[tokio::test]
async fn test_closed_before_response_is_connection_failure() {
    let addr = serve_once(drop).await;

    let result = check(&format!("http://{}/", addr), 5.0).await.unwrap();

    assert_eq!(result.status_code(), None);
    assert_eq!(result.failure_kind(), Some(FailureKind::Connection));
    assert_eq!(
        result.error_message(),
        Some("Connection error - Website might be down")
    );
}

#[tokio::test]
async fn test_tls_handshake_failure_is_connection_failure() {
    // Plain HTTP on the other end of an https:// URL.
    let addr = serve_once(|mut socket| {
        tokio::spawn(async move {
            let _ = socket
                .write_all(b"HTTP/1.1 400 Bad Request\r\nContent-Length: 0\r\n\r\n")
                .await;
        });
    })
    .await;

    let result = check(&format!("https://{}/", addr), 5.0).await.unwrap();

    assert!(!result.succeeded());
    assert_eq!(result.status_code(), None);
    assert_eq!(result.failure_kind(), Some(FailureKind::Connection));
}

#[tokio::test]
async fn test_checker_can_be_shared_between_tasks() {
    let mut server = mockito::Server::new_async().await;
    let _ok = server
        .mock("GET", "/a")
        .with_status(200)
        .create_async()
        .await;
    let _gone = server
        .mock("GET", "/b")
        .with_status(410)
        .create_async()
        .await;

    let checker = Arc::new(Checker::new(5.0).unwrap());
    let a = tokio::spawn({
        let checker = checker.clone();
        let url = format!("{}/a", server.url());
        async move { checker.check(&url).await }
    });
    let b = tokio::spawn({
        let checker = checker.clone();
        let url = format!("{}/b", server.url());
        async move { checker.check(&url).await }
    });

    let (a, b) = (a.await.unwrap(), b.await.unwrap());
    assert_eq!(a.status_code(), Some(200));
    assert_eq!(b.status_code(), Some(410));
    assert!(a.succeeded());
    assert!(!b.succeeded());
}
