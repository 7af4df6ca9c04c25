use dynact_cli::commands::ValidateCommand;
use dynact_cli::error::CliError;
use std::io::Write;

const MANIFEST: &str = r#"
verifier:
  url: http://localhost:8181

connectors:
  salesforce:
    name: Salesforce
    properties:
      sObjectName:
        kind: parameter
        displayName: Salesforce object type
        required: true
        type: string
    actions:
      - id: io.syndesis:salesforce-create-or-update-connector:latest
        name: Create or update record
        input_data_shape:
          kind: json-schema
        steps:
          - title: Select Salesforce object
            properties: [sObjectName]

connections:
  "5":
    connector: salesforce
    name: My Salesforce
    configured_properties:
      clientId: a-client-id

schemas:
  Contact: '{"type":"object"}'
"#;

#[tokio::test]
async fn test_validate_accepts_manifest() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(MANIFEST.as_bytes()).unwrap();

    ValidateCommand::run(file.path()).await.unwrap();
}

#[tokio::test]
async fn test_validate_rejects_unknown_step_property() {
    let broken = MANIFEST.replace("properties: [sObjectName]", "properties: [sObjectIdName]");
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    file.write_all(broken.as_bytes()).unwrap();

    let err = ValidateCommand::run(file.path()).await.unwrap_err();
    assert!(matches!(err, CliError::Config(_)));
}

#[tokio::test]
async fn test_validate_missing_manifest() {
    let err = ValidateCommand::run(std::path::Path::new("/nonexistent/dynact.yaml"))
        .await
        .unwrap_err();
    assert!(matches!(err, CliError::FileNotFound(_)));
}
