use quillpost_core::{ReleaseClient, ReleaseError, ReleaseSource};
use serde_json::json;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const LATEST_PATH: &str = "/repos/quillpost/quillpost/releases/latest";

fn client_for(server: &MockServer) -> ReleaseClient {
    ReleaseClient::with_api_base(reqwest::Client::new(), server.uri())
}

#[tokio::test]
async fn fetch_latest_parses_release_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LATEST_PATH))
        .and(header("accept", "application/vnd.github+json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 1001,
            "tag_name": "v1.4.0",
            "name": "Quillpost 1.4.0",
            "body": "Drafts now autosave.",
            "html_url": "https://github.com/quillpost/quillpost/releases/tag/v1.4.0",
            "published_at": "2026-10-01T08:15:00Z",
            "draft": false,
            "assets": [
                {
                    "name": "quillpost-1.4.0-windows-x64.msi",
                    "browser_download_url": "https://example.com/quillpost-1.4.0-windows-x64.msi",
                    "size": 1536,
                    "content_type": "application/x-msi"
                },
                {
                    "name": "quillpost-1.4.0-macos-arm64.zip",
                    "browser_download_url": "https://example.com/quillpost-1.4.0-macos-arm64.zip",
                    "size": 2_097_152
                }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let release = client_for(&server)
        .fetch_latest("quillpost", "quillpost")
        .await
        .expect("release should be fetched");

    assert_eq!(release.id, 1001);
    assert_eq!(release.tag, "v1.4.0");
    assert_eq!(release.name, "Quillpost 1.4.0");
    assert_eq!(release.notes, "Drafts now autosave.");
    let sizes: Vec<String> = release.assets.iter().map(|a| a.display_size()).collect();
    assert_eq!(sizes, vec!["2 KB".to_string(), "2 MB".to_string()]);
}

#[tokio::test]
async fn not_found_maps_to_fetch_error_with_registry_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LATEST_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest/releases/releases#get-the-latest-release"
        })))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .fetch_latest("quillpost", "quillpost")
        .await
        .expect_err("404 should fail");

    match error {
        ReleaseError::Fetch { status, reason } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(reason, "Not Found");
        }
        other => panic!("expected fetch error, got {other:?}"),
    }
}

#[tokio::test]
async fn rate_limit_reason_is_kept() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LATEST_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "message": "API rate limit exceeded for 203.0.113.7."
        })))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .fetch_latest("quillpost", "quillpost")
        .await
        .expect_err("403 should fail");

    assert_eq!(
        error.to_string(),
        "release registry responded with HTTP 403: API rate limit exceeded for 203.0.113.7."
    );
}

#[tokio::test]
async fn missing_assets_is_a_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LATEST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "tag_name": "v1.4.0",
            "published_at": "2026-10-01T08:15:00Z"
        })))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .fetch_latest("quillpost", "quillpost")
        .await
        .expect_err("payload without assets should fail");

    assert!(matches!(error, ReleaseError::MalformedResponse(_)));
}

#[tokio::test]
async fn non_json_body_is_a_malformed_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(LATEST_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;

    let error = client_for(&server)
        .fetch_latest("quillpost", "quillpost")
        .await
        .expect_err("html body should fail");

    assert!(matches!(error, ReleaseError::MalformedResponse(_)));
}

#[tokio::test]
async fn refused_connection_is_a_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let address = listener.local_addr().expect("listener address");
    drop(listener);

    let client = ReleaseClient::with_api_base(reqwest::Client::new(), format!("http://{address}"));
    let error = client
        .fetch_latest("quillpost", "quillpost")
        .await
        .expect_err("closed port should fail");

    assert!(matches!(error, ReleaseError::Network(_)));
}
