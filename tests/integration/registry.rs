//! Registry API integration tests.

use crate::common::{PORT_SCHEMA, PORT_SCHEMA_JSON, alice, registry};
use config_schema_registry::storage::InMemoryStorage;
use config_schema_registry::{ConfigSchemaRegistry, Owner, RegistryError, SchemaTriplet};
use futures::future::join_all;
use std::collections::BTreeSet;

#[tokio::test]
async fn test_save_then_get_returns_identical_text() {
    let registry = registry();
    let triplet = SchemaTriplet::new("team-a", "service-x", "v1");

    registry.save(&triplet, PORT_SCHEMA, alice()).await.unwrap();

    let record = registry.get(&triplet).await.unwrap().unwrap();
    assert_eq!(record.schema, PORT_SCHEMA);
    assert_eq!(record.owner, alice());
    assert_eq!(record.triplet(), triplet);
}

#[tokio::test]
async fn test_round_trip_preserves_formatting() {
    let registry = registry();
    let schemas = [
        PORT_SCHEMA,
        PORT_SCHEMA_JSON,
        "# comment kept verbatim\ntype:   object\n\n",
        "{\n  \"type\": \"string\"\n}",
    ];

    for (i, schema) in schemas.iter().enumerate() {
        let triplet = SchemaTriplet::new("fmt", "schema", format!("v{}", i));
        registry.save(&triplet, schema, alice()).await.unwrap();
        let record = registry.get(&triplet).await.unwrap().unwrap();
        assert_eq!(record.schema, *schema);
    }
}

#[tokio::test]
async fn test_delete_then_get_is_absent() {
    let registry = registry();
    let existing = SchemaTriplet::new("team-a", "service-x", "v1");
    let never_saved = SchemaTriplet::new("team-a", "service-x", "v404");

    registry.save(&existing, PORT_SCHEMA, alice()).await.unwrap();

    for triplet in [&existing, &never_saved] {
        registry.delete(triplet).await.unwrap();
        assert!(registry.get(triplet).await.unwrap().is_none());
    }
}

#[tokio::test]
async fn test_list_versions_returns_exact_set() {
    let registry = registry();
    let versions = ["v3", "v1", "2.0.0", "v2", "1.0.0"];

    for version in versions {
        registry
            .save(
                &SchemaTriplet::new("team-a", "service-x", version),
                PORT_SCHEMA,
                alice(),
            )
            .await
            .unwrap();
    }
    // Neighbours that must not leak into the listing
    for (ns, name) in [
        ("team-a", "service-xy"),
        ("team-a", "service"),
        ("team-ab", "service-x"),
        ("team-b", "service-x"),
    ] {
        registry
            .save(&SchemaTriplet::new(ns, name, "v1"), PORT_SCHEMA, alice())
            .await
            .unwrap();
    }

    let records = registry
        .list_versions(&SchemaTriplet::new("team-a", "service-x", "ignored"))
        .await
        .unwrap();

    let listed: Vec<&str> = records.iter().map(|r| r.version.as_str()).collect();
    let unique: BTreeSet<&str> = listed.iter().copied().collect();
    assert_eq!(listed.len(), unique.len(), "duplicates in {:?}", listed);
    assert_eq!(unique, versions.into_iter().collect::<BTreeSet<_>>());
    assert!(
        records
            .iter()
            .all(|r| r.namespace == "team-a" && r.name == "service-x")
    );

    // Ordered by key
    let mut sorted = listed.clone();
    sorted.sort();
    assert_eq!(listed, sorted);
}

#[tokio::test]
async fn test_list_versions_empty() {
    let registry = registry();
    let records = registry
        .list_versions(&SchemaTriplet::new("nobody", "nothing", "v1"))
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_validation_scenarios() {
    let registry = registry();
    let triplet = SchemaTriplet::new("team-a", "service-x", "v1");
    registry.save(&triplet, PORT_SCHEMA, alice()).await.unwrap();

    let invalid = registry
        .validate(&triplet, r#"port: "not-a-number""#)
        .await
        .unwrap();
    assert!(!invalid.valid);
    let first = invalid.first_violation().unwrap();
    assert_eq!(first.path, "port");
    assert!(first.message.contains("is not of type"), "{}", first.message);

    let valid = registry.validate(&triplet, "port: 8080").await.unwrap();
    assert!(valid.valid);
    assert!(valid.violations.is_empty());
}

#[tokio::test]
async fn test_yaml_and_json_configurations_agree() {
    let registry = registry();
    let yaml = SchemaTriplet::new("team-a", "service-x", "yaml");
    let json = SchemaTriplet::new("team-a", "service-x", "json");
    registry.save(&yaml, PORT_SCHEMA, alice()).await.unwrap();
    registry.save(&json, PORT_SCHEMA_JSON, alice()).await.unwrap();

    for config in ["port: 1", r#"{"port": 1}"#, "port: one", r#"{"port": "one"}"#, "{}"] {
        let from_yaml = registry.validate(&yaml, config).await.unwrap();
        let from_json = registry.validate(&json, config).await.unwrap();
        assert_eq!(from_yaml, from_json, "disagreement on {}", config);
    }
}

#[tokio::test]
async fn test_unparseable_configuration_is_not_a_violation() {
    let registry = registry();
    let triplet = SchemaTriplet::new("team-a", "service-x", "v1");
    registry.save(&triplet, PORT_SCHEMA, alice()).await.unwrap();

    for config in ["port: [8080", "{\"port\": ", "key: value\n  - broken: ["] {
        let err = registry.validate(&triplet, config).await.unwrap_err();
        assert!(
            matches!(err, RegistryError::Validator(_)),
            "expected parse error for {:?}, got {:?}",
            config,
            err
        );
    }
}

#[tokio::test]
async fn test_validate_against_missing_schema() {
    let registry = registry();
    let err = registry
        .validate(&SchemaTriplet::new("team-a", "service-x", "v9"), "port: 1")
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_concurrent_saves_last_write_wins() {
    let registry = registry();
    let triplet = SchemaTriplet::new("team-a", "race", "v1");

    let writers: Vec<_> = (0..16)
        .map(|i| {
            let registry = registry.clone();
            let triplet = triplet.clone();
            tokio::spawn(async move {
                let schema = format!("description: writer {}\ntype: object\n", i);
                let owner = Owner::new(format!("user-{}", i), format!("user-{}@example.com", i));
                registry.save(&triplet, &schema, owner).await?;
                Ok::<_, RegistryError>(schema)
            })
        })
        .collect();

    let written: Vec<String> = join_all(writers)
        .await
        .into_iter()
        .map(|joined| joined.unwrap().unwrap())
        .collect();

    let stored = registry.get(&triplet).await.unwrap().unwrap();
    assert!(written.contains(&stored.schema));

    // Exactly one version survives
    assert_eq!(registry.list_versions(&triplet).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_registries_sharing_storage_see_each_other() {
    let storage = InMemoryStorage::new();
    let writer = ConfigSchemaRegistry::with_defaults(storage.clone());
    let reader = ConfigSchemaRegistry::with_defaults(storage);
    let triplet = SchemaTriplet::new("team-a", "service-x", "v1");

    writer.save(&triplet, PORT_SCHEMA, alice()).await.unwrap();
    assert!(reader.get(&triplet).await.unwrap().is_some());
}
