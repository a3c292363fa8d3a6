//! Testing utilities for the what-if schema workspace
//!
//! Shared fixtures, builders, and proptest strategies.

#![allow(missing_docs)]

use proptest::prelude::*;
use serde_json::{json, Value};
use whatif_schema::{
    ChangeType, ErrorInfo, PropertyChange, PropertyChangeType, ResourceChange, WhatIfProperties,
    WhatIfResult,
};

/// The worked example: a single VM resized from B1 to B2
pub const VM_RESIZE: &str = r#"{"status":"Succeeded","properties":{"correlationId":"abc-123","changes":[{"resourceId":"/sub/rg/vm1","changeType":"Modify","before":{"size":"Standard_B1"},"after":{"size":"Standard_B2"}}]}}"#;

/// A failed operation with structured error details
pub const FAILED: &str = r#"{
    "status": "Failed",
    "error": {
        "code": "InvalidTemplateDeployment",
        "message": "The template deployment failed because of policy violation.",
        "target": "storageAccount",
        "details": [{"code": "RequestDisallowedByPolicy", "message": "denied", "target": "st1"}],
        "additionalInfo": [{"type": "PolicyViolation", "info": {"policyAssignmentName": "deny-public"}}]
    }
}"#;

pub const SUBSCRIPTION: &str = "/subscriptions/00000000-0000-0000-0000-000000000000";

pub fn resource_id(group: &str, provider_type: &str, name: &str) -> String {
    format!("{SUBSCRIPTION}/resourceGroups/{group}/providers/{provider_type}/{name}")
}

/// Resource state the way the service renders it in `before`/`after`
pub fn resource_state(provider_type: &str, name: &str, properties: Value) -> Value {
    json!({
        "id": resource_id("rg", provider_type, name),
        "name": name,
        "type": provider_type,
        "apiVersion": "2023-01-01",
        "location": "westeurope",
        "properties": properties
    })
}

/// A realistic document covering every change type
pub fn mixed_result() -> WhatIfResult {
    let vnet = "Microsoft.Network/virtualNetworks";
    let storage = "Microsoft.Storage/storageAccounts";

    let delta = PropertyChange::new("properties.addressSpace.addressPrefixes")
        .with_type(PropertyChangeType::Array)
        .with_child(
            PropertyChange::new("0")
                .with_type(PropertyChangeType::Modify)
                .with_before(json!("10.0.0.0/16"))
                .with_after(json!("10.1.0.0/16")),
        );

    let modify = ResourceChange::new(resource_id("rg", vnet, "vnet1"), ChangeType::Modify)
        .with_before(resource_state(
            vnet,
            "vnet1",
            json!({"addressSpace": {"addressPrefixes": ["10.0.0.0/16"]}}),
        ))
        .with_after(resource_state(
            vnet,
            "vnet1",
            json!({"addressSpace": {"addressPrefixes": ["10.1.0.0/16"]}}),
        ))
        .with_property_changes(&[delta])
        .expect("delta encodes");

    let nested = resource_id("rg", "Microsoft.Resources/deployments", "nested");

    WhatIfResult::new(
        "Succeeded",
        WhatIfProperties::new("5a3c9a0e-0000-4000-8000-000000000001").with_changes([
            ResourceChange::new(resource_id("rg", storage, "st1"), ChangeType::Create).with_after(
                resource_state(storage, "st1", json!({"minimumTlsVersion": "TLS1_2"})),
            ),
            ResourceChange::new(resource_id("rg", storage, "old"), ChangeType::Delete)
                .with_before(resource_state(storage, "old", json!({}))),
            ResourceChange::new(resource_id("rg", storage, "st2"), ChangeType::Deploy)
                .with_before(resource_state(storage, "st2", json!({})))
                .with_after(resource_state(storage, "st2", json!({}))),
            ResourceChange::new(resource_id("rg", storage, "manual"), ChangeType::Ignore),
            modify,
            ResourceChange::new(resource_id("rg", storage, "st3"), ChangeType::NoChange)
                .with_before(resource_state(storage, "st3", json!({})))
                .with_after(resource_state(storage, "st3", json!({}))),
            ResourceChange::new(nested, ChangeType::Unsupported).with_unsupported_reason(
                "Changes to the resource declared at nested template could not be predicted.",
            ),
        ]),
    )
}

/// Property change chain of `depth` levels, each with `branching` children
/// on the first node of the level below
pub fn deep_tree(depth: usize, branching: usize) -> PropertyChange {
    let mut node = PropertyChange::new(format!("level{depth}"))
        .with_type(PropertyChangeType::Modify)
        .with_before(json!(depth))
        .with_after(json!(depth + 1));

    for level in (1..depth).rev() {
        let mut parent = PropertyChange::new(format!("level{level}"))
            .with_type(PropertyChangeType::Array)
            .with_child(node);
        for sibling in 1..branching {
            parent = parent.with_child(
                PropertyChange::new(format!("level{level}.sibling{sibling}"))
                    .with_type(PropertyChangeType::Create)
                    .with_after(json!(sibling)),
            );
        }
        node = parent;
    }
    node
}

/// Wrap a delta into a single-change document string
pub fn document_with_delta(delta: &[PropertyChange]) -> String {
    let change = ResourceChange::new("/sub/rg/res", ChangeType::Modify)
        .with_property_changes(delta)
        .expect("delta encodes");
    let result = WhatIfResult::new("Succeeded", WhatIfProperties::new("c").with_change(change));
    whatif_schema::encode_pretty(&result).expect("result encodes")
}

pub fn failed_result() -> WhatIfResult {
    WhatIfResult::new("Failed", WhatIfProperties::default()).with_error(
        ErrorInfo::new("DeploymentFailed", "At least one resource deployment operation failed.")
            .with_target("/sub/rg"),
    )
}

// Proptest strategies

pub fn arb_change_type() -> impl Strategy<Value = ChangeType> {
    prop_oneof![
        Just(ChangeType::Create),
        Just(ChangeType::Delete),
        Just(ChangeType::Deploy),
        Just(ChangeType::Ignore),
        Just(ChangeType::Modify),
        Just(ChangeType::NoChange),
        Just(ChangeType::Unsupported),
        "[A-Z][a-z]{2,8}".prop_map(ChangeType::from),
    ]
}

/// Schema-free JSON; null appears only nested (a top-level null is absence)
pub fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        any::<f64>()
            .prop_filter("finite", |f| f.is_finite())
            .prop_map(Value::from),
        "[a-zA-Z0-9_/.-]{0,12}".prop_map(Value::from),
        any::<String>().prop_map(Value::from),
    ];
    leaf.prop_recursive(3, 24, 4, |inner| {
        let element = prop_oneof![4 => inner, 1 => Just(Value::Null)];
        prop_oneof![
            prop::collection::vec(element.clone(), 0..4).prop_map(Value::Array),
            prop::collection::vec((any::<String>(), element), 0..4)
                .prop_map(|entries| Value::Object(entries.into_iter().collect())),
        ]
    })
}

pub fn arb_resource_change() -> impl Strategy<Value = ResourceChange> {
    (
        "/[a-z]{1,8}/[a-z]{1,8}",
        arb_change_type(),
        prop::option::of(arb_json()),
        prop::option::of(arb_json()),
        prop::option::of(arb_json()),
        prop::option::of("[ -~]{0,20}"),
    )
        .prop_map(|(id, change_type, before, after, delta, reason)| {
            let mut change = ResourceChange::new(id, change_type);
            if let Some(before) = before {
                change = change.with_before(before);
            }
            if let Some(after) = after {
                change = change.with_after(after);
            }
            if let Some(delta) = delta {
                change = change.with_delta(delta);
            }
            if let Some(reason) = reason {
                change = change.with_unsupported_reason(reason);
            }
            change
        })
}

pub fn arb_error_info() -> impl Strategy<Value = ErrorInfo> {
    ("[A-Za-z]{0,12}", "[ -~]{0,24}", "[a-z/]{0,12}")
        .prop_map(|(code, message, target)| ErrorInfo::new(code, message).with_target(target))
}

pub fn arb_what_if_result() -> impl Strategy<Value = WhatIfResult> {
    (
        "[A-Za-z]{0,10}",
        "[a-f0-9-]{0,36}",
        prop::collection::vec(arb_resource_change(), 0..5),
        prop::option::of(arb_error_info()),
    )
        .prop_map(|(status, correlation_id, changes, error)| {
            let result = WhatIfResult::new(
                status,
                WhatIfProperties::new(correlation_id).with_changes(changes),
            );
            match error {
                Some(error) => result.with_error(error),
                None => result,
            }
        })
}
