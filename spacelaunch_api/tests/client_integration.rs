use serde_json::json;
use spacelaunch_api::{Client, Error, LaunchListQuery};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn load_fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

fn endpoint(server: &MockServer) -> String {
    format!("{}/graphql", server.uri())
}

#[tokio::test]
async fn get_launches_success() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("launches_page1.json");

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(header("x-apollo-operation-name", "LaunchList"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&endpoint(&mock_server));
    let result = client.get_launches(&LaunchListQuery::default()).await;
    assert!(result.is_ok());

    let resp = result.unwrap();
    assert!(resp.errors.is_none());
    let connection = resp.data.unwrap().launches;
    assert_eq!(connection.cursor.as_deref(), Some("1583556631"));
    assert!(connection.has_more);
    let launches = connection.into_launches();
    assert_eq!(launches.len(), 2);
    assert_eq!(launches[0].id, "110");
}

#[tokio::test]
async fn get_launches_sends_cursor_variable() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("launches_last.json");

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .and(body_partial_json(json!({
            "operationName": "LaunchList",
            "variables": { "cursor": "1583556631", "pageSize": 5 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&endpoint(&mock_server));
    let query = LaunchListQuery::default()
        .with_cursor(Some("1583556631"))
        .with_page_size(5);
    let resp = client.get_launches(&query).await.unwrap();
    assert!(!resp.data.unwrap().launches.has_more);
}

#[tokio::test]
async fn get_launches_partial_data_keeps_errors() {
    let mock_server = MockServer::start().await;
    let body = load_fixture("launches_partial.json");

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_string(&body))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&endpoint(&mock_server));
    let resp = client
        .get_launches(&LaunchListQuery::default())
        .await
        .unwrap();
    assert_eq!(resp.data.as_ref().unwrap().launches.launches.len(), 1);
    assert_eq!(
        resp.error_message().as_deref(),
        Some("Cannot resolve mission for launch 108 (line 9, column 7)")
    );
}

#[tokio::test]
async fn get_launches_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&endpoint(&mock_server));
    let result = client.get_launches(&LaunchListQuery::default()).await;
    match result {
        Err(Error::HttpStatus { status, body }) => {
            assert_eq!(status, 503);
            assert_eq!(body, "Service Unavailable");
        }
        _ => panic!("expected HttpStatus error"),
    }
}

#[tokio::test]
async fn get_launches_malformed_json() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/graphql"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not valid json}"))
        .mount(&mock_server)
        .await;

    let client = Client::with_base_url(&endpoint(&mock_server));
    let result = client.get_launches(&LaunchListQuery::default()).await;
    assert!(matches!(result, Err(Error::RequestFailed)));
}

#[tokio::test]
async fn invalid_endpoint_fails_without_request() {
    let client = Client::with_base_url("not a url");
    let result = client.get_launches(&LaunchListQuery::default()).await;
    assert!(matches!(result, Err(Error::RequestFailed)));
}
