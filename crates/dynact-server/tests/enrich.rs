use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
    Router,
};
use dynact_connectors::{HttpVerifier, VerifierSettings};
use dynact_core::{
    ActionDefinition, ConfigurationProperty, Connection, ConnectionStore, Connector, ConnectorAction,
    ConnectorStore, DataShape,
};
use dynact_runtime::{EnrichmentEngine, EnrichmentService};
use dynact_server::{create_router, AppState};
use dynact_store::{MemoryConnectionStore, MemoryConnectorStore, MemorySchemaCatalog};
use httpmock::prelude::*;
use indexmap::IndexMap;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

const ACTION_ID: &str = "io.syndesis:salesforce-create-or-update-connector:latest";
const VERIFIER_PATH: &str =
    "/api/v1/connectors/salesforce/actions/io.syndesis:salesforce-create-or-update-connector:latest";

struct TestContext {
    router: Router,
}

impl TestContext {
    async fn new(verifier_url: String) -> Self {
        let parameter = |display: &str| {
            ConfigurationProperty::builder()
                .kind("parameter")
                .display_name(display)
                .required(true)
                .property_type("string")
                .build()
        };
        let definition = ActionDefinition::builder(ACTION_ID)
            .input_data_shape(DataShape::new("json-schema"))
            .output_data_shape(
                DataShape::new("java")
                    .with_type("org.apache.camel.component.salesforce.api.dto.CreateSObjectResult"),
            )
            .step("Select Salesforce object", "", |s| {
                s.property("sObjectName", parameter("Salesforce object type"))
            })
            .step("Select Identifier property", "", |s| {
                s.property("sObjectIdName", parameter("Identifier field name"))
            })
            .build()
            .unwrap();

        let connectors = Arc::new(MemoryConnectorStore::new());
        connectors
            .upsert(&Connector {
                id: "salesforce".into(),
                name: "Salesforce".into(),
                description: None,
                actions: vec![ConnectorAction { name: "Create or update".into(), tags: vec![], definition }],
            })
            .await
            .unwrap();

        let mut configured_properties = IndexMap::new();
        configured_properties.insert("clientId".to_string(), json!("a-client-id"));
        let connections = Arc::new(MemoryConnectionStore::new());
        connections
            .upsert(&Connection {
                id: "5".into(),
                connector_id: "salesforce".into(),
                name: "My Salesforce".into(),
                configured_properties,
            })
            .await
            .unwrap();

        let catalog = Arc::new(MemorySchemaCatalog::new());
        catalog.insert("Contact", r#"{"type":"object","title":"Contact"}"#).await;

        let verifier = HttpVerifier::new(&VerifierSettings::new(verifier_url)).unwrap();
        let engine = EnrichmentEngine::new(Arc::new(verifier), catalog);
        let service = EnrichmentService::new(connectors, connections, engine);
        Self { router: create_router(AppState::new(service)) }
    }

    async fn post(&self, uri: &str, body: &str) -> (StatusCode, Option<String>, Value) {
        let response = self
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .header("x-request-id", "req-42")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let request_id = response
            .headers()
            .get("x-request-id")
            .map(|v| v.to_str().unwrap().to_string());
        let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, request_id, serde_json::from_slice(&bytes).unwrap())
    }
}

fn enrich_uri(connection: &str) -> String {
    format!("/api/v1/connections/{}/actions/{}", connection, ACTION_ID)
}

#[tokio::test]
async fn enrich_returns_suggestions_for_empty_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(VERIFIER_PATH)
                .body(r#"{"clientId":"a-client-id","sObjectName":null,"sObjectIdName":null}"#);
            then.status(200).json_body(json!({"sObjectName": [
                {"value": "Account", "displayValue": "Accounts"},
                {"value": "Contact", "displayValue": "Contacts"}
            ]}));
        })
        .await;

    let ctx = TestContext::new(server.base_url()).await;
    let (status, request_id, body) = ctx.post(&enrich_uri("5"), "").await;

    mock.assert_async().await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(request_id.as_deref(), Some("req-42"));
    assert_eq!(body["actionId"], ACTION_ID);
    assert_eq!(
        body["steps"][0]["properties"]["sObjectName"]["enum"],
        json!([
            {"value": "Account", "label": "Accounts"},
            {"value": "Contact", "label": "Contacts"}
        ])
    );
    assert!(body["steps"][1]["properties"]["sObjectIdName"].get("enum").is_none());
}

#[tokio::test]
async fn enrich_pins_selection_and_resolves_schema() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path(VERIFIER_PATH)
                .body(r#"{"clientId":"a-client-id","sObjectName":"Contact","sObjectIdName":null}"#);
            then.status(200).json_body(json!({
                "sObjectIdName": [
                    {"value": "Id", "displayValue": "Contact ID"},
                    {"value": "Email", "displayValue": "Email"},
                    {"value": "TwitterScreenName__c", "displayValue": "Twitter Screen Name"}
                ],
                "type": "Contact"
            }));
        })
        .await;

    let ctx = TestContext::new(server.base_url()).await;
    let (status, _, body) = ctx.post(&enrich_uri("5"), r#"{"sObjectName":"Contact"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["steps"][0]["properties"]["sObjectName"]["enum"],
        json!([{"value": "Contact", "label": "Contact"}])
    );
    assert_eq!(body["steps"][1]["properties"]["sObjectIdName"]["enum"][2]["value"], "TwitterScreenName__c");
    assert_eq!(body["inputDataShape"]["type"], "Contact");
    assert_eq!(body["inputDataShape"]["specification"], r#"{"type":"object","title":"Contact"}"#);
    assert_eq!(body["outputDataShape"]["kind"], "java");
}

#[tokio::test]
async fn unknown_connection_is_not_found() {
    let server = MockServer::start_async().await;
    let ctx = TestContext::new(server.base_url()).await;
    let (status, _, body) = ctx.post(&enrich_uri("99"), "{}").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], Value::Bool(false));
    assert_eq!(body["error"]["code"], "NOT_FOUND");
    assert_eq!(body["metadata"]["request_id"], "req-42");
}

#[tokio::test]
async fn non_object_body_is_invalid_input() {
    let server = MockServer::start_async().await;
    let ctx = TestContext::new(server.base_url()).await;
    let (status, _, body) = ctx.post(&enrich_uri("5"), r#"["Contact"]"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn verifier_failure_is_bad_gateway() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(VERIFIER_PATH);
            then.status(503).body("maintenance");
        })
        .await;

    let ctx = TestContext::new(server.base_url()).await;
    let (status, _, body) = ctx.post(&enrich_uri("5"), "").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
    assert_eq!(body["error"]["details"]["upstream_status"], 503);
}

#[tokio::test]
async fn unreachable_verifier_is_reported() {
    let ctx = TestContext::new("http://127.0.0.1:1".to_string()).await;
    let (status, _, body) = ctx.post(&enrich_uri("5"), "").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "VERIFIER_UNREACHABLE");
}

#[tokio::test]
async fn health_reports_service() {
    let server = MockServer::start_async().await;
    let ctx = TestContext::new(server.base_url()).await;
    let response = ctx
        .router
        .clone()
        .oneshot(Request::builder().uri("/api/v1/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key("x-request-id"));
    let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["data"]["service"], "dynact-server");
    assert_eq!(body["success"], Value::Bool(true));
}
