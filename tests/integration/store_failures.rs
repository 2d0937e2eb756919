//! Store failures and missed deadlines.

use crate::common::{
    FailingStorage, PORT_SCHEMA, SECRET_ENDPOINT, SlowStorage, alice, details, handler_with,
};
use config_schema_registry::operation_handler::{
    DeleteSchemaRequest, GetSchemaRequest, INTERNAL_ERROR_MESSAGE, ListVersionsRequest,
    RegistryRequest, SaveSchemaRequest, SchemaDetails, Status, ValidateConfigurationRequest,
};
use config_schema_registry::storage::{InMemoryStorage, StorageError};
use config_schema_registry::{ConfigSchemaRegistry, RegistryError, SchemaStore, SchemaTriplet};
use std::time::Duration;

fn all_requests() -> Vec<RegistryRequest> {
    vec![
        SaveSchemaRequest::new(alice(), details("v1"), PORT_SCHEMA).into(),
        GetSchemaRequest::new(alice(), details("v1")).into(),
        DeleteSchemaRequest::new(alice(), details("v1")).into(),
        ListVersionsRequest::new(alice(), SchemaDetails::unversioned("team-a", "service-x"))
            .into(),
        ValidateConfigurationRequest::new(alice(), details("v1"), "port: 1").into(),
    ]
}

#[tokio::test]
async fn test_store_failure_is_internal_without_details() {
    let storage = FailingStorage::default();
    let handler = handler_with(storage.clone(), Duration::from_secs(5));

    for request in all_requests() {
        let operation = request.operation();
        let response = handler.handle_operation(request).await;

        assert_eq!(response.status, Status::Internal, "{}", operation);
        assert_eq!(response.status.code(), 13);
        assert_eq!(response.message, INTERNAL_ERROR_MESSAGE);
        assert!(!response.message.contains(SECRET_ENDPOINT));
        assert_eq!(response.data, Default::default());
    }

    // One attempt per operation, no retries
    assert_eq!(storage.calls(), 5);
}

#[tokio::test]
async fn test_timeout_is_internal_not_absent() {
    let storage = SlowStorage::new(InMemoryStorage::new(), Duration::from_millis(500));
    let handler = handler_with(storage, Duration::from_millis(20));

    let response = handler
        .handle_operation(GetSchemaRequest::new(alice(), details("v1")))
        .await;

    assert_eq!(response.status, Status::Internal);
    assert_eq!(response.message, INTERNAL_ERROR_MESSAGE);
    assert_eq!(response.metadata.found, None);

    let response = handler
        .handle_operation(DeleteSchemaRequest::new(alice(), details("v1")))
        .await;
    assert_eq!(response.status, Status::Internal);
}

#[tokio::test]
async fn test_timeout_surfaces_as_storage_error() {
    let storage = SlowStorage::new(InMemoryStorage::new(), Duration::from_millis(500));
    let store = SchemaStore::with_timeout(storage, Duration::from_millis(20));

    let key = config_schema_registry::storage::StorageKey::new("team-a", "service-x", "v1");
    let err = store.get(&key).await.unwrap_err();
    assert!(err.is_timeout());
    assert!(matches!(err, StorageError::Timeout { .. }));
}

#[tokio::test]
async fn test_slow_store_within_deadline_succeeds() {
    let storage = SlowStorage::new(InMemoryStorage::new(), Duration::from_millis(5));
    let handler = handler_with(storage, Duration::from_secs(5));

    let response = handler
        .handle_operation(SaveSchemaRequest::new(alice(), details("v1"), PORT_SCHEMA))
        .await;
    assert_eq!(response.status, Status::Ok);

    let response = handler
        .handle_operation(GetSchemaRequest::new(alice(), details("v1")))
        .await;
    assert_eq!(response.metadata.found, Some(true));
}

#[tokio::test]
async fn test_typed_api_reports_storage_error() {
    let registry = ConfigSchemaRegistry::with_defaults(FailingStorage::default());
    let err = registry
        .get(&SchemaTriplet::new("team-a", "service-x", "v1"))
        .await
        .unwrap_err();

    assert!(err.is_internal());
    match err {
        RegistryError::Storage(e) => assert!(e.is_temporary()),
        other => panic!("expected storage error, got {:?}", other),
    }
}
