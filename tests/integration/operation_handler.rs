//! Operation handler integration tests.

use crate::common::{PORT_SCHEMA, alice, details, handler};
use config_schema_registry::Owner;
use config_schema_registry::operation_handler::{
    DeleteSchemaRequest, GetSchemaRequest, ListVersionsRequest, RegistryOperationType,
    ResponseData, SaveSchemaRequest, SchemaDetails, Status, ValidateConfigurationRequest,
};

#[tokio::test]
async fn test_save_and_get() {
    let handler = handler();

    let saved = handler
        .handle_operation(SaveSchemaRequest::new(alice(), details("v1"), PORT_SCHEMA))
        .await;
    assert_eq!(saved.status, Status::Ok);
    assert_eq!(saved.message, "Configuration schema saved successfully!");
    assert_eq!(saved.metadata.key.as_deref(), Some("team-a/service-x/v1"));

    let fetched = handler
        .handle_operation(GetSchemaRequest::new(alice(), details("v1")))
        .await;
    assert_eq!(fetched.status, Status::Ok);
    assert_eq!(fetched.metadata.found, Some(true));
    assert_eq!(fetched.schema().unwrap().schema, PORT_SCHEMA);
    assert_eq!(fetched.metadata.fingerprint, saved.metadata.fingerprint);
}

#[tokio::test]
async fn test_list_versions() {
    let handler = handler();
    for version in ["v1", "v2"] {
        let response = handler
            .handle_operation(SaveSchemaRequest::new(alice(), details(version), PORT_SCHEMA))
            .await;
        assert!(response.is_ok());
    }

    let response = handler
        .handle_operation(ListVersionsRequest::new(
            alice(),
            SchemaDetails::unversioned("team-a", "service-x"),
        ))
        .await;

    assert_eq!(response.status, Status::Ok);
    assert_eq!(response.metadata.version_count, Some(2));
    assert!(response.message.starts_with("Found 2"), "{}", response.message);
    let versions: Vec<&str> = response
        .versions()
        .iter()
        .map(|r| r.version.as_str())
        .collect();
    assert_eq!(versions, vec!["v1", "v2"]);
}

#[tokio::test]
async fn test_list_versions_none_found() {
    let handler = handler();
    let response = handler
        .handle_operation(ListVersionsRequest::new(
            alice(),
            SchemaDetails::unversioned("team-a", "nothing-here"),
        ))
        .await;

    assert_eq!(response.status, Status::Ok);
    assert!(response.versions().is_empty());
    assert_eq!(
        response.message,
        "No versions found for schema 'team-a/nothing-here'"
    );
}

#[tokio::test]
async fn test_validate_invalid_configuration() {
    let handler = handler();
    handler
        .handle_operation(SaveSchemaRequest::new(alice(), details("v1"), PORT_SCHEMA))
        .await;

    let response = handler
        .handle_operation(ValidateConfigurationRequest::new(
            alice(),
            details("v1"),
            r#"port: "not-a-number""#,
        ))
        .await;

    assert_eq!(response.status, Status::Ok);
    assert_eq!(response.is_valid(), Some(false));
    let violation = response.first_violation().unwrap();
    assert_eq!(violation.path, "port");
    assert!(violation.message.contains("is not of type"));
    assert!(response.message.starts_with("Configuration is not valid: port:"));
    assert_ne!(response.message, "Configuration is valid!");
}

#[tokio::test]
async fn test_validate_valid_configuration() {
    let handler = handler();
    handler
        .handle_operation(SaveSchemaRequest::new(alice(), details("v1"), PORT_SCHEMA))
        .await;

    let response = handler
        .handle_operation(ValidateConfigurationRequest::new(
            alice(),
            details("v1"),
            "port: 8080",
        ))
        .await;

    assert_eq!(response.status, Status::Ok);
    assert_eq!(response.message, "Configuration is valid!");
    assert_eq!(
        response.data,
        ResponseData::Validation {
            is_valid: true,
            first_violation: None,
        }
    );
}

#[tokio::test]
async fn test_delete_missing_is_ok() {
    let handler = handler();
    let response = handler
        .handle_operation(DeleteSchemaRequest::new(alice(), details("never-saved")))
        .await;

    assert_eq!(response.status, Status::Ok);
    assert_eq!(response.metadata.found, Some(false));
    assert!(response.message.contains("nothing to delete"), "{}", response.message);
}

#[tokio::test]
async fn test_delete_existing() {
    let handler = handler();
    handler
        .handle_operation(SaveSchemaRequest::new(alice(), details("v1"), PORT_SCHEMA))
        .await;

    let response = handler
        .handle_operation(DeleteSchemaRequest::new(alice(), details("v1")))
        .await;
    assert_eq!(response.status, Status::Ok);
    assert_eq!(response.metadata.found, Some(true));

    let response = handler
        .handle_operation(GetSchemaRequest::new(alice(), details("v1")))
        .await;
    assert_eq!(response.metadata.found, Some(false));
}

#[tokio::test]
async fn test_get_missing_is_ok_not_found() {
    let handler = handler();
    let response = handler
        .handle_operation(GetSchemaRequest::new(alice(), details("v1")))
        .await;

    assert_eq!(response.status, Status::Ok);
    assert_eq!(response.metadata.found, Some(false));
    assert!(response.schema().is_none());
    assert_eq!(
        response.message,
        "No schema found for key 'team-a/service-x/v1'"
    );
}

#[tokio::test]
async fn test_validate_missing_schema_is_not_found() {
    let handler = handler();
    let response = handler
        .handle_operation(ValidateConfigurationRequest::new(
            alice(),
            details("v1"),
            "port: 1",
        ))
        .await;

    assert_eq!(response.status, Status::NotFound);
    assert_eq!(response.status.code(), 5);
    assert_eq!(response.is_valid(), None);
}

#[tokio::test]
async fn test_request_validation_is_invalid_argument() {
    let handler = handler();

    let mut no_user = GetSchemaRequest::new(alice(), details("v1"));
    no_user.user = None;
    let response = handler.handle_operation(no_user).await;
    assert_eq!(response.status, Status::InvalidArgument);
    assert_eq!(response.message, "User cannot be empty!");

    let response = handler
        .handle_operation(GetSchemaRequest::new(
            Owner::new("alice", ""),
            details("v1"),
        ))
        .await;
    assert_eq!(response.message, "User's email cannot be empty!");

    let response = handler
        .handle_operation(DeleteSchemaRequest::new(alice(), details("")))
        .await;
    assert_eq!(response.status, Status::InvalidArgument);
    assert_eq!(response.message, "Schema version cannot be empty!");

    let response = handler
        .handle_operation(SaveSchemaRequest::new(
            alice(),
            SchemaDetails::new("team/a", "service-x", "v1"),
            PORT_SCHEMA,
        ))
        .await;
    assert_eq!(response.message, "Schema details must not contain '/'!");

    let response = handler
        .handle_operation(ValidateConfigurationRequest::new(alice(), details("v1"), ""))
        .await;
    assert_eq!(response.message, "Configuration cannot be empty!");
}

#[tokio::test]
async fn test_save_rejects_bad_schemas() {
    let handler = handler();

    let response = handler
        .handle_operation(SaveSchemaRequest::new(alice(), details("v1"), ""))
        .await;
    assert_eq!(response.status, Status::InvalidArgument);
    assert_eq!(response.message, "Schema cannot be empty!");

    let response = handler
        .handle_operation(SaveSchemaRequest::new(
            alice(),
            details("v1"),
            "type: object\n  properties: [",
        ))
        .await;
    assert_eq!(response.status, Status::InvalidArgument);
    assert!(response.message.starts_with("Failed to parse schema"));

    let response = handler
        .handle_operation(SaveSchemaRequest::new(alice(), details("v1"), r#"{"type": 12}"#))
        .await;
    assert_eq!(response.status, Status::InvalidArgument);
    assert!(response.message.starts_with("Invalid JSON-Schema"));

    // Nothing was stored by the rejected saves
    let response = handler
        .handle_operation(GetSchemaRequest::new(alice(), details("v1")))
        .await;
    assert_eq!(response.metadata.found, Some(false));
}

#[tokio::test]
async fn test_validate_unparseable_configuration() {
    let handler = handler();
    handler
        .handle_operation(SaveSchemaRequest::new(alice(), details("v1"), PORT_SCHEMA))
        .await;

    let response = handler
        .handle_operation(ValidateConfigurationRequest::new(
            alice(),
            details("v1"),
            "port: [8080",
        ))
        .await;

    assert_eq!(response.status, Status::InvalidArgument);
    assert!(response.message.starts_with("Failed to parse configuration"));
    assert_eq!(response.is_valid(), None);
}

#[tokio::test]
async fn test_request_ids() {
    let handler = handler();

    let response = handler
        .handle_operation(GetSchemaRequest::new(alice(), details("v1")).with_request_id("trace-42"))
        .await;
    assert_eq!(response.metadata.request_id, "trace-42");
    assert_eq!(response.metadata.operation, RegistryOperationType::Get);

    let first = handler
        .handle_operation(GetSchemaRequest::new(alice(), details("v1")))
        .await;
    let second = handler
        .handle_operation(GetSchemaRequest::new(alice(), details("v1")))
        .await;
    assert!(!first.metadata.request_id.is_empty());
    assert_ne!(first.metadata.request_id, second.metadata.request_id);
}
