use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Value};
use whatif_schema::{
    decode, decode_str, encode, ChangeType, ResourceChange, WhatIfProperties, WhatIfResult,
};
use whatif_test_utils::{arb_what_if_result, failed_result, mixed_result};

proptest! {
    #[test]
    fn prop_encode_decode_roundtrip(result in arb_what_if_result()) {
        let bytes = encode(&result).unwrap();
        let decoded = decode(&bytes).unwrap();
        prop_assert_eq!(decoded, result);
    }

    #[test]
    fn prop_fractional_state_roundtrip(
        ratio in any::<f64>().prop_filter("finite", |f| f.is_finite()),
    ) {
        let result = with_change(
            ResourceChange::new("/x", ChangeType::Modify).with_after(json!({"ratio": ratio})),
        );
        let decoded = decode(&encode(&result).unwrap()).unwrap();
        prop_assert_eq!(decoded.changes()[0].after(), Some(&json!({"ratio": ratio})));
        prop_assert_eq!(decoded, result);
    }

    #[test]
    fn prop_decode_never_panics(input in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode(&input);
    }

    #[test]
    fn prop_any_change_type_string_decodes(raw in "[A-Za-z]{1,16}") {
        let doc = format!(
            r#"{{"status":"Succeeded","properties":{{"changes":[{{"resourceId":"/x","changeType":"{raw}"}}]}}}}"#
        );
        let result = decode_str(&doc).unwrap();
        prop_assert_eq!(result.changes()[0].change_type().as_str(), raw.as_str());
    }
}

fn with_change(change: ResourceChange) -> WhatIfResult {
    WhatIfResult::new("Succeeded", WhatIfProperties::new("c").with_change(change))
}

#[test]
fn roundtrip_fractional_numbers_exactly() {
    for ratio in [
        1.071_566_039_146_582_6e-75,
        -3.229_514_911_013_633_4e-195,
        0.1,
        2.5e-308,
        1.797_693_134_862_315_7e308,
    ] {
        let result = with_change(
            ResourceChange::new("/x", ChangeType::Modify)
                .with_before(json!({"ratio": 0.5}))
                .with_after(json!({"ratio": ratio, "nested": [ratio, {"r": ratio}]})),
        );
        let decoded = decode(&encode(&result).unwrap()).unwrap();
        assert_eq!(decoded, result, "ratio {ratio:e}");
    }
}

#[test]
fn roundtrip_null_state_stays_absent() {
    let result = with_change(
        ResourceChange::new("/x", ChangeType::Create)
            .with_before(Value::Null)
            .with_after(json!({"tags": {"env": null}}))
            .with_delta(Value::Null),
    );
    let bytes = encode(&result).unwrap();
    let decoded = decode(&bytes).unwrap();
    assert_eq!(decoded, result);
    assert!(decoded.changes()[0].before().is_none());
    assert_eq!(
        decoded.changes()[0].after(),
        Some(&json!({"tags": {"env": null}}))
    );
}

#[test]
fn roundtrip_mixed_document() {
    let result = mixed_result();
    let decoded = decode(&encode(&result).unwrap()).unwrap();
    assert_eq!(decoded, result);
}

#[test]
fn roundtrip_failed_document() {
    let result = failed_result();
    let decoded = decode(&encode(&result).unwrap()).unwrap();
    assert_eq!(decoded, result);
    assert!(decoded.changes().is_empty());
}

#[test]
fn roundtrip_empty_optionals() {
    let result = WhatIfResult::new("Succeeded", WhatIfProperties::default());
    let bytes = encode(&result).unwrap();
    assert_eq!(
        String::from_utf8(bytes.clone()).unwrap(),
        r#"{"status":"Succeeded","properties":{"correlationId":""}}"#
    );
    assert_eq!(decode(&bytes).unwrap(), result);
}

#[test]
fn opaque_values_keep_key_order() {
    let doc = r#"{"status":"Succeeded","properties":{"correlationId":"c","changes":[{"resourceId":"/x","changeType":"Create","after":{"zeta":1,"alpha":{"y":2,"b":3}}}]}}"#;
    let result = decode_str(doc).unwrap();
    assert_eq!(String::from_utf8(encode(&result).unwrap()).unwrap(), doc);
    assert_eq!(result.changes()[0].change_type(), &ChangeType::Create);
}
