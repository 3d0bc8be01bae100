mod common;

use common::*;
use reqwest::Method;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zoh_client::executor::{ApiRequest, Service};
use zoh_client::{CancellationToken, Endpoints};

#[tokio::test]
async fn test_bearer_token_attached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/organization/"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server.uri());
    let response = client
        .executor()
        .execute(
            ApiRequest::get(Service::Api, "/api/organization/"),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
}

#[tokio::test]
async fn test_skip_sends_no_authorization() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client(&server.uri());
    client
        .executor()
        .execute(
            ApiRequest::get(Service::Accounts, "/oauth/v2/token/info").without_credentials(),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(received[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn test_content_type_only_on_body_mutations() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = client(&server.uri());
    let cancel = CancellationToken::new();

    let put = ApiRequest::new(Method::PUT, Service::Mail, "/settings")
        .json(&serde_json::json!({"value": ["a"]}))
        .unwrap();
    client.executor().execute(put, &cancel).await.unwrap();
    client
        .executor()
        .execute(ApiRequest::get(Service::Mail, "/settings"), &cancel)
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    let get = received.iter().find(|r| r.method.as_str() == "GET").unwrap();
    assert!(get.headers.get("content-type").is_none());
}

#[tokio::test]
async fn test_services_resolve_against_their_base() {
    let api = MockServer::start().await;
    let mail = MockServer::start().await;
    let accounts = MockServer::start().await;
    for server in [&api, &mail, &accounts] {
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .mount(server)
            .await;
    }

    let client = zoh_client::ZohoClient::builder(zoh_client::StaticToken::new(TOKEN))
        .endpoints(Endpoints {
            api_base: api.uri(),
            mail_base: format!("{}/", mail.uri()),
            accounts_base: accounts.uri(),
        })
        .rate_limit(unthrottled())
        .build()
        .unwrap();
    let cancel = CancellationToken::new();

    for service in [Service::Api, Service::Mail, Service::Accounts] {
        client
            .executor()
            .execute(ApiRequest::get(service, "/ping"), &cancel)
            .await
            .unwrap();
    }

    for server in [&api, &mail, &accounts] {
        let received = server.received_requests().await.unwrap();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].url.path(), "/ping");
    }
}

#[tokio::test]
async fn test_cancelled_client_does_not_send() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = client(&server.uri())
        .with_cancellation(cancel)
        .admin()
        .organization()
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
}
