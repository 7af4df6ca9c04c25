use dynact_connectors::{build_verifier, HttpVerifier, RetryPolicy, VerifierSettings};
use dynact_core::{
    ActionDefinition, ConfigurationProperty, DataShape, EnrichmentRequest, NoSchemas, PropertyValue,
    PropertyValues, VerificationError, Verifier,
};
use dynact_runtime::EnrichmentEngine;
use httpmock::prelude::*;
use serde_json::json;
use std::sync::Arc;

const ACTION_ID: &str = "io.syndesis:salesforce-create-or-update-connector:latest";
const ACTION_PATH: &str =
    "/api/v1/connectors/salesforce/actions/io.syndesis:salesforce-create-or-update-connector:latest";

fn salesforce_template() -> ActionDefinition {
    let string_parameter = |display: &str, description: &str| {
        ConfigurationProperty::builder()
            .kind("parameter")
            .display_name(display)
            .group("common")
            .required(true)
            .property_type("string")
            .java_type_hint("java.lang.String")
            .component_property(false)
            .description(description)
            .build()
    };

    ActionDefinition::builder(ACTION_ID)
        .input_data_shape(DataShape::new("json-schema"))
        .output_data_shape(
            DataShape::new("java")
                .with_type("org.apache.camel.component.salesforce.api.dto.CreateSObjectResult"),
        )
        .step("Select Salesforce object", "Select Salesforce object type to create", |s| {
            s.property(
                "sObjectName",
                string_parameter("Salesforce object type", "Salesforce object type to create"),
            )
        })
        .step(
            "Select Identifier property",
            "Select Salesforce property that will hold the uniquely identifying value of this object",
            |s| {
                s.property(
                    "sObjectIdName",
                    string_parameter("Identifier field name", "Unique field to hold the identifier value"),
                )
            },
        )
        .build()
        .unwrap()
}

fn request() -> EnrichmentRequest {
    let mut base = PropertyValues::new();
    base.insert("clientId".into(), json!("a-client-id"));
    EnrichmentRequest::new("salesforce").with_base_config(base)
}

fn engine(server: &MockServer) -> EnrichmentEngine {
    let verifier = HttpVerifier::new(&VerifierSettings::new(server.base_url())).unwrap();
    EnrichmentEngine::new(Arc::new(verifier), Arc::new(NoSchemas))
}

#[tokio::test]
async fn test_initial_call_offers_object_types() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(ACTION_PATH)
                .header("accept", "application/json")
                .body(r#"{"clientId":"a-client-id","sObjectName":null,"sObjectIdName":null}"#);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({"sObjectName": [
                    {"value": "Account", "displayValue": "Accounts"},
                    {"value": "Contact", "displayValue": "Contacts"}
                ]}));
        })
        .await;

    let enriched = engine(&server).enrich(&salesforce_template(), &request()).await.unwrap();

    mock.assert_async().await;
    assert_eq!(
        enriched.property("sObjectName").unwrap().candidates,
        vec![PropertyValue::new("Account", "Accounts"), PropertyValue::new("Contact", "Contacts")]
    );
    assert!(enriched.property("sObjectIdName").unwrap().candidates.is_empty());
}

#[tokio::test]
async fn test_selected_object_narrows_identifier_and_input_shape() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(ACTION_PATH)
                .body(r#"{"clientId":"a-client-id","sObjectName":"Contact","sObjectIdName":null}"#);
            then.status(200).json_body(json!({
                "properties": {
                    "sObjectName": [{"value": "Contact", "displayValue": "Contacts"}],
                    "sObjectIdName": [
                        {"value": "Id", "displayValue": "Contact ID"},
                        {"value": "Email", "displayValue": "Email"},
                        {"value": "TwitterScreenName__c", "displayValue": "Twitter Screen Name"}
                    ]
                },
                "inputDataShape": {
                    "kind": "json-schema",
                    "type": "Contact",
                    "specification": "{\"type\":\"object\",\"id\":\"urn:jsonschema:Contact\"}"
                }
            }));
        })
        .await;

    let request = request().with_user_value("sObjectName", json!("Contact"));
    let enriched = engine(&server).enrich(&salesforce_template(), &request).await.unwrap();

    mock.assert_async().await;
    assert_eq!(
        enriched.property("sObjectName").unwrap().candidates,
        vec![PropertyValue::new("Contact", "Contact")]
    );
    assert_eq!(
        enriched.property("sObjectIdName").unwrap().candidates,
        vec![
            PropertyValue::new("Id", "Contact ID"),
            PropertyValue::new("Email", "Email"),
            PropertyValue::new("TwitterScreenName__c", "Twitter Screen Name"),
        ]
    );

    let input = enriched.input_data_shape().unwrap();
    assert_eq!(input.kind, "json-schema");
    assert_eq!(input.shape_type.as_deref(), Some("Contact"));
    assert!(!input.specification.as_deref().unwrap().is_empty());

    let output = enriched.output_data_shape().unwrap();
    assert_eq!(output.kind, "java");
    assert_eq!(
        output.shape_type.as_deref(),
        Some("org.apache.camel.component.salesforce.api.dto.CreateSObjectResult")
    );
}

#[tokio::test]
async fn test_error_status_is_rejected() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(ACTION_PATH);
            then.status(500).body("salesforce login failed");
        })
        .await;

    let verifier = HttpVerifier::new(&VerifierSettings::new(server.base_url())).unwrap();
    let err = verifier.verify("salesforce", ACTION_ID, &PropertyValues::new()).await.unwrap_err();
    match err {
        VerificationError::Rejected { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "salesforce login failed");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_success_status_other_than_ok_is_rejected() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(ACTION_PATH);
            then.status(201).json_body(json!({"sObjectName": [{"value": "Account", "label": "Accounts"}]}));
        })
        .await;

    let verifier = HttpVerifier::new(&VerifierSettings::new(server.base_url())).unwrap();
    let err = verifier.verify("salesforce", ACTION_ID, &PropertyValues::new()).await.unwrap_err();
    assert!(matches!(err, VerificationError::Rejected { status: 201, .. }));
}

#[tokio::test]
async fn test_no_content_is_rejected() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(ACTION_PATH);
            then.status(204);
        })
        .await;

    let verifier = HttpVerifier::new(&VerifierSettings::new(server.base_url())).unwrap();
    let err = verifier.verify("salesforce", ACTION_ID, &PropertyValues::new()).await.unwrap_err();
    assert!(matches!(err, VerificationError::Rejected { status: 204, .. }));
}

#[tokio::test]
async fn test_action_id_with_reserved_characters_stays_one_segment() {
    let server = MockServer::start_async().await;
    let encoded = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/connectors/salesforce/actions/create%23v2");
            then.status(200).json_body(json!({"sObjectName": [{"value": "Lead", "label": "Leads"}]}));
        })
        .await;
    let truncated = server
        .mock_async(|when, then| {
            when.method(POST).path("/api/v1/connectors/salesforce/actions/create");
            then.status(200).json_body(json!({"sObjectName": [{"value": "Account", "label": "Accounts"}]}));
        })
        .await;

    let verifier = HttpVerifier::new(&VerifierSettings::new(server.base_url())).unwrap();
    let result = verifier.verify("salesforce", "create#v2", &PropertyValues::new()).await.unwrap();

    encoded.assert_hits_async(1).await;
    truncated.assert_hits_async(0).await;
    assert_eq!(result.suggestions_for("sObjectName").unwrap(), &[PropertyValue::new("Lead", "Leads")]);
}

#[tokio::test]
async fn test_unparseable_body_is_malformed() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(ACTION_PATH);
            then.status(200).body("<html>oops</html>");
        })
        .await;

    let verifier = HttpVerifier::new(&VerifierSettings::new(server.base_url())).unwrap();
    let err = verifier.verify("salesforce", ACTION_ID, &PropertyValues::new()).await.unwrap_err();
    assert!(matches!(err, VerificationError::Malformed(_)));
}

#[tokio::test]
async fn test_closed_port_is_unreachable_after_retries() {
    let mut settings = VerifierSettings::new("http://127.0.0.1:1");
    settings.connect_timeout_ms = 500;
    settings.call_timeout_ms = 1_000;
    settings.retry = Some(RetryPolicy {
        max_retries: 1,
        initial_delay_ms: 1,
        max_delay_ms: 2,
        backoff_multiplier: 1.0,
    });

    let verifier = build_verifier(&settings).unwrap();
    let err = verifier.verify("salesforce", ACTION_ID, &PropertyValues::new()).await.unwrap_err();
    assert!(err.is_unreachable());
}
