//! OCM client tests against a mock API server.

use pretty_assertions::assert_eq;
use rosa_oidc_core::ports::OidcConfigRegistry;
use rosa_oidc_core::{Error, NewOidcConfig};
use rosa_oidc_ocm::{OcmClient, OcmConfig};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PATH: &str = "/api/clusters_mgmt/v1/oidc_configs";

fn client(server: &MockServer) -> OcmClient {
    OcmClient::new(OcmConfig {
        api_url: server.uri(),
        token: Some("test-token".to_string()),
    })
}

fn managed_body() -> serde_json::Value {
    json!({
        "kind": "OidcConfig",
        "id": "23ab4cd5efgh",
        "href": "/api/clusters_mgmt/v1/oidc_configs/23ab4cd5efgh",
        "issuer_url": "https://oidc.os1.devshift.org/23ab4cd5efgh",
        "managed": true,
        "reusable": true,
        "creation_timestamp": "2024-03-01T10:00:00Z"
    })
}

#[tokio::test]
async fn test_create_managed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PATH))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(json!({ "managed": true })))
        .respond_with(ResponseTemplate::new(201).set_body_json(managed_body()))
        .expect(1)
        .mount(&server)
        .await;

    let created = client(&server)
        .create_oidc_config(&NewOidcConfig::managed())
        .await
        .unwrap();

    assert_eq!(created.id, "23ab4cd5efgh");
    assert_eq!(created.issuer_url, "https://oidc.os1.devshift.org/23ab4cd5efgh");
    assert!(created.managed);
    assert!(created.creation_timestamp.is_some());
}

#[tokio::test]
async fn test_create_unmanaged_sends_references() {
    let server = MockServer::start().await;
    let secret_arn = "arn:aws:secretsmanager:us-east-1:123456789012:secret:rosa-private-key-oidc-ab12";
    let issuer_url = "https://oidc-ab12.s3.us-east-1.amazonaws.com";

    Mock::given(method("POST"))
        .and(path(PATH))
        .and(body_json(json!({
            "managed": false,
            "secret_arn": secret_arn,
            "issuer_url": issuer_url,
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "id": "unmanaged1",
            "issuer_url": issuer_url,
            "secret_arn": secret_arn,
            "managed": false,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let created = client(&server)
        .create_oidc_config(&NewOidcConfig::unmanaged(secret_arn, issuer_url, None))
        .await
        .unwrap();

    assert_eq!(created.id, "unmanaged1");
    assert_eq!(created.secret_arn.as_deref(), Some(secret_arn));
}

#[tokio::test]
async fn test_create_reports_api_reason() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "kind": "Error",
            "id": "403",
            "code": "CLUSTERS-MGMT-403",
            "reason": "Account is not allowed to create managed OIDC configs"
        })))
        .mount(&server)
        .await;

    let err = client(&server)
        .create_oidc_config(&NewOidcConfig::managed())
        .await
        .unwrap_err();

    match err {
        Error::Registry(message) => assert_eq!(
            message,
            "Account is not allowed to create managed OIDC configs (CLUSTERS-MGMT-403)"
        ),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_list() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PATH))
        .and(query_param("size", "-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "OidcConfigList",
            "page": 1,
            "size": 1,
            "total": 1,
            "items": [managed_body()]
        })))
        .mount(&server)
        .await;

    let configs = client(&server).list_oidc_configs().await.unwrap();
    assert_eq!(configs.len(), 1);
    assert_eq!(configs[0].id, "23ab4cd5efgh");
}

#[tokio::test]
async fn test_get_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("{}/missing", PATH)))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "kind": "Error",
            "reason": "OIDC config 'missing' not found"
        })))
        .mount(&server)
        .await;

    let err = client(&server).get_oidc_config("missing").await.unwrap_err();
    assert!(matches!(err, Error::OidcConfigNotFound(id) if id == "missing"));
}

#[tokio::test]
async fn test_delete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("{}/23ab4cd5efgh", PATH)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).delete_oidc_config("23ab4cd5efgh").await.unwrap();
}

#[tokio::test]
async fn test_delete_keeps_id_in_one_segment() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path(format!("{}/a%2Fb", PATH)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client(&server).delete_oidc_config("a/b").await.unwrap();
}

#[tokio::test]
async fn test_server_error_without_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(PATH))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let err = client(&server).list_oidc_configs().await.unwrap_err();
    assert!(matches!(err, Error::Registry(message) if message.contains("502")));
}
