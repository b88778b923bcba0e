//! Integration tests for OsmClient over real HTTP using wiremock
//!
//! These exercise the reqwest transport: query building, header capture and
//! status classification against a stubbed server.

use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use osm_client::config::ClientConfig;
use osm_client::osm::{
    create_client, ApiErrorKind, OsmApi, OsmClient, ProgrammeSummaryParams, ReqwestClient,
};

fn client_for(server: &MockServer) -> OsmClient<ReqwestClient> {
    let config = ClientConfig::new("test_id", "test_token").with_base_url(server.uri());
    OsmClient::from_config(&config).expect("client should build")
}

fn summary_params() -> ProgrammeSummaryParams {
    ProgrammeSummaryParams {
        sectionid: "1".to_string(),
        termid: "1".to_string(),
    }
}

fn with_rate_limit(template: ResponseTemplate, remaining: &str) -> ResponseTemplate {
    template
        .insert_header("X-RateLimit-Limit", "1000")
        .insert_header("X-RateLimit-Remaining", remaining)
        .insert_header("X-RateLimit-Reset", "1718003600")
}

#[tokio::test]
async fn programme_summary_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ext/programme/"))
        .and(query_param("action", "getProgrammeSummary"))
        .and(query_param("apiid", "test_id"))
        .and(query_param("token", "test_token"))
        .and(query_param("sectionid", "1"))
        .and(query_param("termid", "1"))
        .respond_with(with_rate_limit(
            ResponseTemplate::new(200).set_body_json(json!({
                "items": [{
                    "eveningid": "10",
                    "sectionid": "1",
                    "title": "Orienteering",
                    "notesforparents": "",
                    "parentsrequired": false,
                    "meetingdate": "2025-02-01",
                    "starttime": "19:00",
                    "endtime": "20:30",
                    "parentsattendingcount": 0
                }]
            })),
            "998",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let summary = client.get_programme_summary(&summary_params()).await.unwrap();

    assert_eq!(summary.items.len(), 1);
    assert_eq!(summary.items[0].title, "Orienteering");

    let info = client.rate_limit_info().await.unwrap();
    assert_eq!(info.limit, "1000");
    assert_eq!(info.remaining, "998");
    assert_eq!(info.reset, "1718003600");
}

#[tokio::test]
async fn startup_preamble_is_stripped() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ext/generic/startup/"))
        .and(query_param("action", "getData"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"var data_holder = {"globals":{"email":"leader@example.org","firstname":"Jo","lastname":"Bloggs","terms":[{"termid":"5","sectionid":"1","name":"Autumn","startdate":"2025-09-01","enddate":"2025-12-19","past":false}]}}"#,
        ))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let startup = client.get_startup_data().await.unwrap();

    assert_eq!(startup.globals.firstname, "Jo");
    assert_eq!(startup.globals.terms[0].termid, "5");
}

#[tokio::test]
async fn rate_limited_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ext/programme/"))
        .respond_with(with_rate_limit(ResponseTemplate::new(429), "0"))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get_programme_summary(&summary_params()).await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::RateLimited);
    assert_eq!(err.message, "Rate limit exceeded");
    assert_eq!(err.status, Some(429));
    assert_eq!(err.rate_limit.unwrap().remaining, "0");
    assert_eq!(client.rate_limit_info().await.unwrap().remaining, "0");
}

#[tokio::test]
async fn server_error_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/members/review/deletion/7"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.get_deletable_members("7").await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Http);
    assert_eq!(err.status, Some(500));
    assert_eq!(err.message, "API request failed: Internal Server Error");

    // Headers were absent, so the snapshot is all empty strings
    let info = client.rate_limit_info().await.unwrap();
    assert_eq!(info.limit, "");
    assert_eq!(info.remaining, "");
    assert_eq!(info.reset, "");
}

#[tokio::test]
async fn connection_failure_is_transport_error_without_token() {
    // Nothing listens on port 1
    let config =
        ClientConfig::new("test_id", "secret_token").with_base_url("http://127.0.0.1:1");
    let client = OsmClient::from_config(&config).unwrap();

    let err = client.get_programme_summary(&summary_params()).await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Transport);
    assert!(err.status.is_none());
    assert!(!err.message.contains("secret_token"));
    assert!(client.rate_limit_info().await.is_none());
}

/// Serves one response whose body stops short of its Content-Length
async fn truncated_body_server(status_line: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();

        let mut request = Vec::new();
        let mut chunk = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
        }

        let response = format!(
            "{status_line}\r\n\
             X-RateLimit-Limit: 1000\r\n\
             X-RateLimit-Remaining: 0\r\n\
             X-RateLimit-Reset: 1718003600\r\n\
             Content-Length: 100\r\n\
             \r\n\
             short"
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn rate_limited_with_truncated_body() {
    let base_url = truncated_body_server("HTTP/1.1 429 Too Many Requests").await;
    let config = ClientConfig::new("test_id", "test_token").with_base_url(base_url);
    let client = OsmClient::from_config(&config).unwrap();

    let err = client.get_programme_summary(&summary_params()).await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::RateLimited);
    assert_eq!(err.message, "Rate limit exceeded");
    assert_eq!(err.status, Some(429));
    assert_eq!(client.rate_limit_info().await.unwrap().remaining, "0");
}

#[tokio::test]
async fn truncated_success_body_is_transport_error() {
    let base_url = truncated_body_server("HTTP/1.1 200 OK").await;
    let config = ClientConfig::new("test_id", "test_token").with_base_url(base_url);
    let client = OsmClient::from_config(&config).unwrap();

    let err = client.get_programme_summary(&summary_params()).await.unwrap_err();

    assert_eq!(err.kind, ApiErrorKind::Transport);
    assert!(err.status.is_none());
    assert!(err.message.contains("Failed to read response body"));
    assert!(!err.message.contains("test_token"));

    let info = client.rate_limit_info().await.unwrap();
    assert_eq!(info.limit, "1000");
    assert_eq!(info.remaining, "0");
}

#[tokio::test]
async fn selector_with_credentials_talks_to_server() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v3/risk_assessments/3/categories"))
        .and(query_param("apiid", "test_id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": true,
            "error": null,
            "data": [{"name": "Low Risk"}],
            "meta": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = ClientConfig::new("test_id", "test_token").with_base_url(server.uri());
    let client = create_client(&config).unwrap();

    let response = client.get_risk_assessment_categories("3").await.unwrap();

    assert_eq!(response.data[0].name, "Low Risk");
}

#[tokio::test]
async fn auth_params_come_first_in_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.get_programme_summary(&summary_params()).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].url.query(),
        Some("action=getProgrammeSummary&apiid=test_id&token=test_token&sectionid=1&termid=1")
    );
}
