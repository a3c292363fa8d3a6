use pretty_assertions::assert_eq;
use serde_json::json;
use whatif_schema::{
    decode, decode_str, ChangeType, DecodeError, DecodeOptions, Decoder, ParseError,
    PropertyChangeType, WhatIfResult,
};
use whatif_test_utils::{mixed_result, resource_id, FAILED, VM_RESIZE};

#[test]
fn worked_example() {
    let result = decode(VM_RESIZE.as_bytes()).unwrap();

    assert!(result.is_succeeded());
    assert_eq!(result.properties().correlation_id(), "abc-123");
    assert_eq!(result.changes().len(), 1);

    let change = &result.changes()[0];
    assert_eq!(change.resource_id(), "/sub/rg/vm1");
    assert_eq!(change.change_type(), &ChangeType::Modify);

    let after = change.after_snapshot().unwrap();
    assert_eq!(after.get("size").unwrap(), Some(&json!("Standard_B2")));
}

#[test]
fn failed_document() {
    let result: WhatIfResult = FAILED.parse().unwrap();

    assert!(result.is_failed());
    assert!(result.changes().is_empty());

    let error = result.error().unwrap();
    assert_eq!(error.code(), "InvalidTemplateDeployment");
    assert_eq!(error.target(), "storageAccount");
    assert_eq!(error.details()[0].code(), "RequestDisallowedByPolicy");

    let info = error.additional_info().unwrap();
    assert_eq!(info.len(), 1);
    assert_eq!(info[0].info_type, "PolicyViolation");
}

#[test]
fn unsupported_reason_is_carried_for_any_change_type() {
    for change_type in ChangeType::KNOWN {
        let doc = format!(
            r#"{{"status":"Succeeded","properties":{{"changes":[{{"resourceId":"/x","changeType":"{change_type}","unsupportedReason":"because"}}]}}}}"#
        );
        let result = decode_str(&doc).unwrap();
        assert_eq!(result.changes()[0].unsupported_reason(), Some("because"));
        assert_eq!(result.changes()[0].change_type(), &change_type);
    }
}

#[test]
fn unknown_change_type_is_preserved_or_rejected() {
    let doc = r#"{"status":"Succeeded","properties":{"changes":[{"resourceId":"/x","changeType":"Weird"}]}}"#;

    let lenient = decode_str(doc).unwrap();
    assert_eq!(lenient.changes()[0].change_type().as_str(), "Weird");
    assert!(!lenient.changes()[0].change_type().is_recognized());

    let strict = Decoder::new(DecodeOptions::new().with_strict_enums(true));
    let err = strict.decode_str(doc).unwrap_err();
    assert!(matches!(err, DecodeError::UnrecognizedEnum(ref e) if e.value == "Weird"));
}

#[test]
fn absent_snapshots_are_errors_not_faults() {
    let result = mixed_result();

    let create = &result.changes()[0];
    assert_eq!(create.change_type(), &ChangeType::Create);
    assert_eq!(create.before_snapshot(), Err(ParseError::Absent { field: "before" }));
    assert!(create.after_snapshot().is_ok());

    let delete = &result.changes()[1];
    assert_eq!(delete.after_snapshot(), Err(ParseError::Absent { field: "after" }));

    let ignore = &result.changes()[3];
    assert!(ignore.before_snapshot().is_err());
    assert!(ignore.after_snapshot().is_err());
}

#[test]
fn snapshot_queries_on_fixture() {
    let result = mixed_result();
    let modify = result
        .changes()
        .iter()
        .find(|c| c.change_type() == &ChangeType::Modify)
        .unwrap();

    let before = modify.before_snapshot().unwrap();
    let after = modify.after_snapshot().unwrap();
    assert_eq!(before.resource_type(), Some("Microsoft.Network/virtualNetworks"));
    assert_eq!(
        before.get_str("properties.addressSpace.addressPrefixes[0]").unwrap(),
        Some("10.0.0.0/16")
    );
    assert_eq!(
        after.get_str("properties.addressSpace.addressPrefixes.0").unwrap(),
        Some("10.1.0.0/16")
    );
    assert_eq!(
        after.id(),
        Some(resource_id("rg", "Microsoft.Network/virtualNetworks", "vnet1").as_str())
    );

    let deltas = modify.property_changes().unwrap();
    assert_eq!(deltas[0].property_change_type(), Some(&PropertyChangeType::Array));
    assert_eq!(deltas[0].children()[0].after(), Some(&json!("10.1.0.0/16")));
}

#[test]
fn summary_of_fixture() {
    let summary = mixed_result().summary();
    assert_eq!(summary.total(), 7);
    for change_type in ChangeType::KNOWN {
        assert_eq!(summary.count(&change_type), 1, "{change_type}");
    }
    assert!(summary.has_changes());
}

#[test]
fn null_snapshot_decodes_as_absent() {
    let doc = r#"{"status":"Succeeded","properties":{"changes":[{"resourceId":"/x","changeType":"Create","before":null,"after":{"a":1}}]}}"#;
    let result = decode_str(doc).unwrap();
    assert!(result.changes()[0].before().is_none());
    assert!(matches!(
        result.changes()[0].before_snapshot(),
        Err(ParseError::Absent { .. })
    ));
}

#[test]
fn wrong_shapes_fail_to_decode() {
    let cases = [
        r#"{"status": 1}"#,
        r#"{"status":"Succeeded","properties":"nope"}"#,
        r#"{"status":"Succeeded","properties":{"changes":[{"resourceId":"/x","changeType":7}]}}"#,
        r#"{"status":"Succeeded","properties":{"changes":[{"changeType":"Create"}]}}"#,
        r#"{"status":"Succeeded","properties":{"changes":[{"resourceId":"/x","changeType":"Create","unsupportedReason":{}}]}}"#,
    ];
    for doc in cases {
        assert!(
            matches!(decode_str(doc), Err(DecodeError::Json(_))),
            "expected decode failure for {doc}"
        );
    }
}
