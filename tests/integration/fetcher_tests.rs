//! Response classification of the HTTP fetcher against a mock server

use shelf_sweep::crawler::{FetchResult, HttpFetcher, PageFetcher};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn fetcher(timeout: Duration) -> HttpFetcher {
    HttpFetcher::new("TestSweep/1.0", timeout).expect("Failed to build fetcher")
}

#[tokio::test]
async fn test_success_sends_user_agent() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/index.html"))
        .and(header("user-agent", "TestSweep/1.0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let result = fetcher(Duration::from_secs(5))
        .fetch(&format!("{}/index.html", mock_server.uri()))
        .await;

    assert_eq!(
        result,
        FetchResult::Success {
            status_code: 200,
            body: "<html>ok</html>".to_string()
        }
    );
}

#[tokio::test]
async fn test_404_is_not_found() {
    let mock_server = MockServer::start().await;

    let result = fetcher(Duration::from_secs(5))
        .fetch(&format!("{}/missing.html", mock_server.uri()))
        .await;

    assert_eq!(result, FetchResult::NotFound);
}

#[tokio::test]
async fn test_server_error_is_failed_with_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let result = fetcher(Duration::from_secs(5))
        .fetch(&format!("{}/index.html", mock_server.uri()))
        .await;

    assert!(matches!(
        result,
        FetchResult::Failed {
            status_code: Some(500),
            ..
        }
    ));
}

#[tokio::test]
async fn test_stalled_peer_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&mock_server)
        .await;

    let result = fetcher(Duration::from_secs(1))
        .fetch(&format!("{}/slow.html", mock_server.uri()))
        .await;

    assert!(matches!(
        result,
        FetchResult::Failed {
            status_code: None,
            ..
        }
    ));
}
