//! Unit tests for validator behavior across rule categories
//!
//! Covers stage ordering, boundary cases for each constraint family,
//! conditional and dependency activation, and the null/absent-field
//! policy.

use serde_json::json;
use validra_schemas::{
    Error, RuleRegistry, Schema, SchemaConfig, ValidationManager, Validator, ViolationKind,
};

fn build_schema(doc: serde_json::Value) -> Schema {
    let config: SchemaConfig = serde_json::from_value(doc).unwrap();
    let manager = ValidationManager::new();
    let id = manager.create_validation(&config).unwrap();
    let schema = manager.get_validation(&id).unwrap();
    (*schema).clone()
}

fn first_kind(schema: &Schema, doc: serde_json::Value) -> Option<ViolationKind> {
    let rules = RuleRegistry::with_builtins();
    let value = validra_schemas::Value::from_json(&doc).unwrap();
    Validator::new()
        .validate(schema, &value, &rules)
        .err()
        .map(|v| v.kind)
}

mod stage_ordering {
    use super::*;

    #[test]
    fn test_missing_field_reported_before_type_mismatch() {
        let schema = build_schema(json!({
            "type": "entity",
            "required_fields": ["zz_last_declared"],
            "field_types": {"aa_first_declared": "integer"}
        }));
        // Declaration order does not matter: presence wins over type
        let kind = first_kind(&schema, json!({"aa_first_declared": "wrong"}));
        assert_eq!(kind, Some(ViolationKind::MissingRequiredField));
    }

    #[test]
    fn test_type_mismatch_reported_before_constraint() {
        let schema = build_schema(json!({
            "type": "entity",
            "field_types": {"cost": "number"},
            "constraints": {"name": {"min_length": 3}}
        }));
        let kind = first_kind(&schema, json!({"cost": "free", "name": "x"}));
        assert_eq!(kind, Some(ViolationKind::TypeMismatch));
    }

    #[test]
    fn test_constraint_reported_before_custom_rule() {
        let schema = build_schema(json!({
            "type": "entity",
            "constraints": {"name": {"min_length": 3}},
            "custom": {"contact_email": "email"}
        }));
        let kind = first_kind(&schema, json!({"name": "x", "contact_email": "nope"}));
        assert_eq!(kind, Some(ViolationKind::StringConstraintViolation));
    }

    #[test]
    fn test_conditional_runs_after_structural_stages() {
        let schema = build_schema(json!({
            "type": "entity",
            "field_types": {"kind": "string"},
            "required_if": {"company_name": {"field": "kind", "equals": "company"}}
        }));
        let kind = first_kind(&schema, json!({"kind": "company"}));
        assert_eq!(kind, Some(ViolationKind::ConditionalRequirementUnmet));
    }
}

mod number_boundaries {
    use super::*;

    #[test]
    fn test_range_accepts_boundaries_rejects_outside() {
        let schema = build_schema(json!({
            "type": "entity",
            "constraints": {"cost": {"minimum": 0.0, "maximum": 10000.0}}
        }));

        for accepted in [json!({"cost": 0}), json!({"cost": 10000}), json!({"cost": 512.5})] {
            assert_eq!(first_kind(&schema, accepted), None);
        }
        for rejected in [json!({"cost": -10}), json!({"cost": 15000})] {
            assert_eq!(
                first_kind(&schema, rejected),
                Some(ViolationKind::NumberConstraintViolation)
            );
        }
    }

    #[test]
    fn test_multiple_of_with_floating_tolerance() {
        let schema = build_schema(json!({
            "type": "entity",
            "constraints": {"amount": {"multiple_of": 0.05}}
        }));
        assert_eq!(first_kind(&schema, json!({"amount": 12.3})), None);
        assert_eq!(
            first_kind(&schema, json!({"amount": 12.32})),
            Some(ViolationKind::NumberConstraintViolation)
        );
    }
}

mod array_and_object {
    use super::*;

    #[test]
    fn test_item_schema_reports_first_offending_index() {
        let schema = build_schema(json!({
            "type": "entity",
            "constraints": {
                "scores": {"items": {"type": "integer", "minimum": 0.0, "maximum": 100.0}}
            }
        }));

        let rules = RuleRegistry::new();
        let value =
            validra_schemas::Value::from_json(&json!({"scores": [150, -10]})).unwrap();
        let violation = Validator::new()
            .validate(&schema, &value, &rules)
            .unwrap_err();
        assert_eq!(violation.kind, ViolationKind::ArrayConstraintViolation);
        assert_eq!(violation.path.to_string(), "scores[0]");
    }

    #[test]
    fn test_nested_object_shape() {
        let schema = build_schema(json!({
            "type": "entity",
            "constraints": {
                "address": {
                    "required": ["city"],
                    "properties": {"city": {"type": "string"}, "zip": {"pattern": "[0-9]{5}"}}
                }
            }
        }));

        assert_eq!(
            first_kind(&schema, json!({"address": {"city": "Lyon", "zip": "69000"}})),
            None
        );
        assert_eq!(
            first_kind(&schema, json!({"address": {"zip": "69000"}})),
            Some(ViolationKind::ObjectConstraintViolation)
        );
        assert_eq!(
            first_kind(&schema, json!({"address": {"city": "Lyon", "zip": "sixty-nine"}})),
            Some(ViolationKind::ObjectConstraintViolation)
        );
    }
}

mod conditional_and_dependency {
    use super::*;

    #[test]
    fn test_required_if_company() {
        let schema = build_schema(json!({
            "type": "entity",
            "required_if": {"company_name": {"field": "type", "equals": "company"}}
        }));

        assert_eq!(
            first_kind(&schema, json!({"type": "individual", "name": "John Doe"})),
            None
        );
        assert_eq!(
            first_kind(&schema, json!({"type": "company", "name": "John Doe"})),
            Some(ViolationKind::ConditionalRequirementUnmet)
        );
    }

    #[test]
    fn test_unconditional_required_wins_over_conditional() {
        // A field can be both required and conditionally required; the
        // conditional only ever adds a requirement
        let schema = build_schema(json!({
            "type": "entity",
            "required_fields": ["company_name"],
            "required_if": {"company_name": {"field": "type", "equals": "company"}}
        }));
        assert_eq!(
            first_kind(&schema, json!({"type": "individual"})),
            Some(ViolationKind::MissingRequiredField)
        );
    }

    #[test]
    fn test_credit_card_dependency() {
        let schema = build_schema(json!({
            "type": "entity",
            "dependencies": {
                "credit_card": {
                    "field": "payment_method",
                    "equals": "credit_card",
                    "required": ["number", "expiry", "cvv"]
                }
            }
        }));

        let complete = json!({
            "payment_method": "credit_card",
            "credit_card": {"number": "4111111111111111", "expiry": "12/25", "cvv": "123"}
        });
        assert_eq!(first_kind(&schema, complete), None);

        let missing_number = json!({
            "payment_method": "credit_card",
            "credit_card": {"expiry": "12/25", "cvv": "123"}
        });
        assert_eq!(
            first_kind(&schema, missing_number),
            Some(ViolationKind::DependencyUnmet)
        );

        let other_method = json!({"payment_method": "wire"});
        assert_eq!(first_kind(&schema, other_method), None);
    }
}

mod null_policy {
    use super::*;

    #[test]
    fn test_absent_optional_fields_skip_all_checks() {
        let schema = build_schema(json!({
            "type": "entity",
            "field_types": {"notes": "string"},
            "constraints": {"notes": {"min_length": 10}},
            "custom": {"notes": "non_empty"}
        }));
        assert_eq!(first_kind(&schema, json!({})), None);
    }

    #[test]
    fn test_null_fails_type_check_unless_nullable() {
        let schema = build_schema(json!({
            "type": "entity",
            "field_types": {
                "notes": "string",
                "closed_at": {"type": "datetime", "nullable": true}
            }
        }));
        assert_eq!(
            first_kind(&schema, json!({"notes": null})),
            Some(ViolationKind::TypeMismatch)
        );
        assert_eq!(first_kind(&schema, json!({"closed_at": null})), None);
    }

    #[test]
    fn test_null_required_field_is_missing() {
        let schema = build_schema(json!({
            "type": "entity",
            "required_fields": ["client_name"]
        }));
        assert_eq!(
            first_kind(&schema, json!({"client_name": null})),
            Some(ViolationKind::MissingRequiredField)
        );
    }
}

mod manager_surface {
    use super::*;

    #[test]
    fn test_fail_fast_aborts_with_single_violation() {
        let manager = ValidationManager::new();
        let config: SchemaConfig = serde_json::from_value(json!({
            "type": "entity",
            "required_fields": ["a", "b"]
        }))
        .unwrap();
        let id = manager.create_validation(&config).unwrap();

        let err = manager.validate_data(&id, &json!({})).unwrap_err();
        match err {
            Error::Validation(violation) => {
                assert_eq!(violation.kind, ViolationKind::MissingRequiredField)
            }
            other => panic!("expected validation error, got {other}"),
        }

        let all = manager.validate_data_all(&id, &json!({})).unwrap();
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_data_is_never_mutated() {
        let manager = ValidationManager::new();
        let config: SchemaConfig = serde_json::from_value(json!({
            "type": "entity",
            "required_fields": ["name"],
            "field_types": {"cost": "number"}
        }))
        .unwrap();
        let id = manager.create_validation(&config).unwrap();

        let doc = json!({"cost": "free", "extra": [1, 2, 3]});
        let before = doc.clone();
        let _ = manager.validate_data(&id, &doc);
        let _ = manager.validate_data_all(&id, &doc);
        assert_eq!(doc, before);
    }

    #[test]
    fn test_deleted_schema_no_longer_validates() {
        let manager = ValidationManager::new();
        let config: SchemaConfig =
            serde_json::from_value(json!({"type": "entity"})).unwrap();
        let id = manager.create_validation(&config).unwrap();
        manager.delete_validation(&id).unwrap();

        assert!(matches!(
            manager.validate_data(&id, &json!({})),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn test_validation_holds_snapshot_across_delete() {
        let manager = ValidationManager::new();
        let config: SchemaConfig = serde_json::from_value(json!({
            "type": "entity",
            "required_fields": ["name"]
        }))
        .unwrap();
        let id = manager.create_validation(&config).unwrap();

        // A caller that fetched the schema keeps a usable snapshot even
        // after deletion
        let snapshot = manager.get_validation(&id).unwrap();
        manager.delete_validation(&id).unwrap();

        let rules = RuleRegistry::with_builtins();
        let value = validra_schemas::Value::from_json(&json!({"name": "ok"})).unwrap();
        assert!(Validator::new().validate(&snapshot, &value, &rules).is_ok());
    }
}
