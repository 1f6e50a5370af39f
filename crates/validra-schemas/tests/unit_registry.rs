//! Unit tests for the schema registry lifecycle
//!
//! Covers create/get round trips, partial updates, versioning, deletion,
//! type/status filters, and configuration-time rejection of malformed
//! configs arriving as JSON or YAML documents.

use serde_json::json;
use validra_schemas::{
    Error, SchemaConfig, SchemaPatch, SchemaRegistry, SchemaStatus, SchemaType,
};

fn config(doc: serde_json::Value) -> SchemaConfig {
    serde_json::from_value(doc).unwrap()
}

mod lifecycle {
    use super::*;

    #[test]
    fn test_create_then_get_reflects_config() {
        let registry = SchemaRegistry::new();
        let id = registry
            .create(&config(json!({
                "type": "entity",
                "required_fields": ["client_name", "device_serial"],
                "field_types": {"client_name": "string"},
                "constraints": {"client_name": {"min_length": 1, "max_length": 120}}
            })))
            .unwrap();

        let schema = registry.get(&id).unwrap();
        assert_eq!(schema.schema_type, SchemaType::Entity);
        assert_eq!(schema.status, SchemaStatus::Active);
        assert_eq!(schema.version, 1);
        assert_eq!(
            schema
                .required_fields
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>(),
            vec!["client_name", "device_serial"]
        );
        assert_eq!(schema.field_types.len(), 1);
        assert_eq!(schema.constraints.len(), 1);
    }

    #[test]
    fn test_partial_update_leaves_other_groups_unchanged() {
        let registry = SchemaRegistry::new();
        let id = registry
            .create(&config(json!({
                "type": "entity",
                "required_fields": ["client_name"],
                "field_types": {"client_name": "string"},
                "custom": {}
            })))
            .unwrap();

        let patch: SchemaPatch = serde_json::from_value(json!({
            "required_fields": ["client_name", "device_serial", "opened_at"]
        }))
        .unwrap();
        registry.update(&id, &patch).unwrap();

        let schema = registry.get(&id).unwrap();
        assert_eq!(schema.version, 2);
        assert_eq!(schema.required_fields.len(), 3);
        // field_types untouched by the patch
        assert_eq!(schema.field_types.len(), 1);
    }

    #[test]
    fn test_updates_are_versioned_monotonically() {
        let registry = SchemaRegistry::new();
        let id = registry.create(&config(json!({"type": "form"}))).unwrap();

        for expected in 2..=5u32 {
            let patch: SchemaPatch =
                serde_json::from_value(json!({"status": "draft"})).unwrap();
            let schema = registry.update(&id, &patch).unwrap();
            assert_eq!(schema.version, expected);
        }
    }

    #[test]
    fn test_delete_then_get_and_update_fail() {
        let registry = SchemaRegistry::new();
        let id = registry.create(&config(json!({"type": "api"}))).unwrap();
        registry.delete(&id).unwrap();

        assert!(matches!(registry.get(&id), Err(Error::NotFound { .. })));
        let patch = SchemaPatch::default();
        assert!(matches!(
            registry.update(&id, &patch),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_list_filters_are_linear_over_store() {
        let registry = SchemaRegistry::new();
        registry.create(&config(json!({"type": "entity"}))).unwrap();
        registry
            .create(&config(json!({"type": "entity", "status": "deprecated"})))
            .unwrap();
        registry.create(&config(json!({"type": "form"}))).unwrap();

        assert_eq!(registry.list_by_type(SchemaType::Entity).len(), 2);
        assert_eq!(registry.list_by_status(SchemaStatus::Deprecated).len(), 1);
        assert_eq!(registry.list_by_status(SchemaStatus::Draft).len(), 0);
        assert_eq!(registry.len(), 3);
    }
}

mod configuration_errors {
    use super::*;

    #[test]
    fn test_unknown_type_is_a_deserialization_error() {
        let result: Result<SchemaConfig, _> =
            serde_json::from_value(json!({"type": "spreadsheet"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_status_is_a_deserialization_error() {
        let result: Result<SchemaConfig, _> =
            serde_json::from_value(json!({"type": "entity", "status": "archived"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_misspelled_rule_group_rejected() {
        let result: Result<SchemaConfig, _> = serde_json::from_value(json!({
            "type": "entity",
            "requird_fields": ["client_name"]
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_path_rejected_at_create() {
        let registry = SchemaRegistry::new();
        let err = registry
            .create(&config(json!({
                "type": "entity",
                "required_fields": ["parts[].quantity"]
            })))
            .unwrap_err();
        assert!(matches!(err, Error::Configuration { .. }));
    }

    #[test]
    fn test_bad_pattern_rejected_at_update() {
        let registry = SchemaRegistry::new();
        let id = registry.create(&config(json!({"type": "entity"}))).unwrap();

        let patch: SchemaPatch = serde_json::from_value(json!({
            "constraints": {"serial": {"pattern": "*broken"}}
        }))
        .unwrap();
        assert!(matches!(
            registry.update(&id, &patch),
            Err(Error::Configuration { .. })
        ));
        assert_eq!(registry.get(&id).unwrap().version, 1);
    }
}

mod wire_formats {
    use super::*;

    #[test]
    fn test_config_parses_from_yaml() {
        let yaml = r#"
type: entity
status: draft
required_fields:
  - client_name
field_types:
  client_name: string
  repair_cost: number
constraints:
  repair_cost:
    minimum: 0.0
    maximum: 10000.0
required_if:
  company_name:
    field: client_kind
    equals: company
"#;
        let config: SchemaConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.schema_type, SchemaType::Entity);
        assert_eq!(config.status, Some(SchemaStatus::Draft));

        let registry = SchemaRegistry::new();
        let id = registry.create(&config).unwrap();
        let schema = registry.get(&id).unwrap();
        assert_eq!(schema.status, SchemaStatus::Draft);
        assert_eq!(schema.conditional_rules.len(), 1);
    }

    #[test]
    fn test_schema_serializes_for_api_consumers() {
        let registry = SchemaRegistry::new();
        let id = registry
            .create(&config(json!({
                "type": "entity",
                "constraints": {"serial": {"pattern": "[A-Z0-9-]+"}}
            })))
            .unwrap();
        let schema = registry.get(&id).unwrap();

        let doc = serde_json::to_value(&*schema).unwrap();
        assert_eq!(doc["type"], "entity");
        assert_eq!(doc["version"], 1);
        assert_eq!(doc["constraints"]["serial"]["string"]["pattern"], "[A-Z0-9-]+");
    }
}
