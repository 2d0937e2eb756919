//! # Basic Usage
//!
//! Walks through every registry operation against the in-memory backend, first through
//! the typed registry API and then through the request/response handler a transport
//! would sit on.
//!
//! ```bash
//! cargo run --example basic_usage
//! RUST_LOG=debug cargo run --example basic_usage
//! ```

use config_schema_registry::operation_handler::{
    DeleteSchemaRequest, GetSchemaRequest, ListVersionsRequest, RegistryOperationHandler,
    SaveSchemaRequest, SchemaDetails, ValidateConfigurationRequest,
};
use config_schema_registry::storage::InMemoryStorage;
use config_schema_registry::{ConfigSchemaRegistry, Owner, RegistryConfig, SchemaTriplet};
use std::time::Duration;

const SERVICE_SCHEMA: &str = r#"
type: object
required: [port]
properties:
  port:
    type: integer
  host:
    type: string
"#;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    let config = RegistryConfig::builder()
        .with_timeout(Duration::from_secs(2))
        .build()?;
    let registry = ConfigSchemaRegistry::new(InMemoryStorage::new(), &config);
    let alice = Owner::new("alice", "alice@example.com");

    log::info!("Typed registry API");

    let v1 = SchemaTriplet::new("team-a", "service-x", "v1");
    let v2 = SchemaTriplet::new("team-a", "service-x", "v2");
    let saved = registry.save(&v1, SERVICE_SCHEMA, alice.clone()).await?;
    registry.save(&v2, "type: object", alice.clone()).await?;
    log::info!("Saved {} (fingerprint {})", v1, saved.fingerprint());

    for record in registry.list_versions(&v1).await? {
        log::info!(
            "  version {} saved by {} at {}",
            record.version,
            record.owner.username,
            record.creation_time
        );
    }

    let result = registry.validate(&v1, "port: not-a-number").await?;
    for violation in &result.violations {
        log::info!("  violation {}", violation);
    }

    log::info!("Request/response handler");

    let handler = RegistryOperationHandler::new(registry);
    let details = SchemaDetails::new("team-b", "gateway", "1.0.0");

    let responses = vec![
        handler
            .handle_operation(SaveSchemaRequest::new(
                alice.clone(),
                details.clone(),
                SERVICE_SCHEMA,
            ))
            .await,
        handler
            .handle_operation(GetSchemaRequest::new(alice.clone(), details.clone()))
            .await,
        handler
            .handle_operation(ValidateConfigurationRequest::new(
                alice.clone(),
                details.clone(),
                "port: 8080\nhost: gateway.internal",
            ))
            .await,
        handler
            .handle_operation(ValidateConfigurationRequest::new(
                alice.clone(),
                details.clone(),
                r#"{"port": "eighty"}"#,
            ))
            .await,
        handler
            .handle_operation(ListVersionsRequest::new(
                alice.clone(),
                SchemaDetails::unversioned("team-b", "gateway"),
            ))
            .await,
        handler
            .handle_operation(DeleteSchemaRequest::new(alice.clone(), details.clone()))
            .await,
        handler
            .handle_operation(GetSchemaRequest::new(alice.clone(), details))
            .await,
        handler
            .handle_operation(GetSchemaRequest::new(
                alice,
                SchemaDetails::new("team-b", "gateway", ""),
            ))
            .await,
    ];

    for response in responses {
        log::info!(
            "{} -> {} ({}): {}",
            response.metadata.operation,
            response.status,
            response.status.code(),
            response.message
        );
    }

    Ok(())
}
