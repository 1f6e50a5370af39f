//! Validation demonstration example
//!
//! Copyright (c) 2026 Validra Team
//! Licensed under the Apache-2.0 license

use serde_json::json;
use validra_schemas::{SchemaConfig, ValidationManager};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Validra Record Validation Demo ===\n");

    let manager = ValidationManager::new();

    let config: SchemaConfig = serde_json::from_value(json!({
        "type": "entity",
        "required_fields": ["client_name", "device_serial"],
        "field_types": {
            "client_name": "string",
            "device_serial": "string",
            "repair_cost": "number",
            "opened_at": "datetime"
        },
        "constraints": {
            "client_name": {"min_length": 1, "max_length": 120},
            "device_serial": {"pattern": "[A-Z0-9-]{6,20}"},
            "repair_cost": {"minimum": 0.0, "maximum": 10000.0},
            "parts": {"min_items": 1, "items": {"type": "object"}}
        },
        "custom": {"contact_email": "email"},
        "required_if": {
            "company_name": {"field": "client_kind", "equals": "company"}
        },
        "dependencies": {
            "credit_card": {
                "field": "payment_method",
                "equals": "credit_card",
                "required": ["number", "expiry", "cvv"]
            }
        }
    }))?;

    let id = manager.create_validation(&config)?;
    println!("Created repair-order schema {}\n", id);

    let good_record = json!({
        "client_name": "Dupont",
        "client_kind": "individual",
        "device_serial": "SN-4411-XK",
        "repair_cost": 129.9,
        "opened_at": "2026-03-01T09:30:00Z",
        "contact_email": "dupont@example.com",
        "payment_method": "cash",
        "parts": [{"ref": "screen-a54", "quantity": 1}]
    });

    println!("Validating a complete repair order:");
    match manager.validate_data(&id, &good_record) {
        Ok(_) => println!("   accepted\n"),
        Err(e) => println!("   rejected: {}\n", e),
    }

    let bad_record = json!({
        "client_kind": "company",
        "device_serial": "sn 4411",
        "repair_cost": 15000.0,
        "contact_email": "front desk",
        "payment_method": "credit_card",
        "credit_card": {"expiry": "12/25"}
    });

    println!("Validating a broken repair order (fail-fast):");
    match manager.validate_data(&id, &bad_record) {
        Ok(_) => println!("   unexpectedly accepted"),
        Err(e) => println!("   rejected: {}", e),
    }

    println!("\nSame record, aggregated for form feedback:");
    for violation in manager.validate_data_all(&id, &bad_record)? {
        println!("   - {}", violation);
    }

    Ok(())
}
