use jrmi_jmx::constants::{OBJECT_ARRAY_CLASS, OBJECT_ARRAY_UID};
use jrmi_jmx::{
    build_creation_call, build_identity_call, build_invocation_call, Addressing, CallConfig,
    InvokeArgs,
};
use jrmi_proto::{Call, CALL_HEADER_LEN};
use jrmi_serial::{ClassDesc, Content, FieldType, NewArray, Stream, Value};
use proptest::prelude::*;

fn addressing() -> impl Strategy<Value = Addressing> {
    (any::<i64>(), any::<i32>(), any::<i64>(), any::<i16>()).prop_map(
        |(object_number, uid_number, uid_time, uid_count)| Addressing {
            object_number,
            uid_number,
            uid_time,
            uid_count,
        },
    )
}

fn invoke_pairs() -> impl Strategy<Value = Vec<(String, String)>> {
    prop::collection::vec(("[a-zA-Z.]{1,24}", "\\PC{0,16}"), 0..6)
}

fn to_args(pairs: &[(String, String)]) -> InvokeArgs {
    pairs.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
}

/// Offset of the first argument: message byte, stream header, block-data
/// tag and length, call header.
const ARGUMENTS_OFFSET: usize = 1 + 4 + 2 + CALL_HEADER_LEN;

/// Offset of the addressing fields inside the encoded message.
const ADDRESSING_OFFSET: usize = 1 + 4 + 2;

/// objNum, UID number, UID time and UID count.
const ADDRESSING_LEN: usize = 8 + 4 + 8 + 2;

/// Asserts that `left` and `right` differ at most in the addressing fields.
fn assert_only_addressing_differs(left: &Call, right: &Call) -> Result<(), TestCaseError> {
    let left = left.encode().unwrap();
    let right = right.encode().unwrap();
    prop_assert_eq!(left.len(), right.len());
    prop_assert_eq!(&left[..ADDRESSING_OFFSET], &right[..ADDRESSING_OFFSET]);
    let tail = ADDRESSING_OFFSET + ADDRESSING_LEN;
    prop_assert_eq!(&left[tail..ARGUMENTS_OFFSET], &right[tail..ARGUMENTS_OFFSET]);
    prop_assert_eq!(&left[ARGUMENTS_OFFSET..], &right[ARGUMENTS_OFFSET..]);
    Ok(())
}

/// `Object[]` stream of `values`, built directly from the serialization model.
fn object_array_stream(values: &[&str]) -> Vec<u8> {
    let desc = ClassDesc::new(OBJECT_ARRAY_CLASS, OBJECT_ARRAY_UID)
        .with_annotations(vec![Content::EndBlockData]);
    let array = NewArray::new(
        desc,
        FieldType::object("java.lang.Object"),
        values.iter().map(|v| Content::utf(*v).into()).collect(),
    )
    .unwrap();
    Stream::new(vec![array.into()]).encode().unwrap()
}

fn marshalled_obj_bytes(call: &Call) -> Vec<u8> {
    let Content::Object(marshalled) = &call.arguments()[3] else {
        panic!("fourth argument must be a MarshalledObject");
    };
    let Some(Value::Content(Content::Array(obj_bytes))) = marshalled.field("objBytes") else {
        panic!("objBytes must be a byte array");
    };
    obj_bytes.byte_values().unwrap()
}

proptest! {
    #[test]
    fn identity_call_differs_only_in_addressing(a in addressing(), b in addressing(), name in "\\PC{0,32}") {
        let left = build_identity_call(&CallConfig::new(a, name.clone())).unwrap();
        let right = build_identity_call(&CallConfig::new(b, name)).unwrap();
        assert_only_addressing_differs(&left, &right)?;
    }

    #[test]
    fn creation_call_differs_only_in_addressing(a in addressing(), b in addressing(), name in "\\PC{0,32}") {
        let left = build_creation_call(&CallConfig::new(a, name.clone())).unwrap();
        let right = build_creation_call(&CallConfig::new(b, name)).unwrap();
        assert_only_addressing_differs(&left, &right)?;
    }

    #[test]
    fn invocation_call_differs_only_in_addressing(
        a in addressing(),
        b in addressing(),
        pairs in invoke_pairs(),
        method in "[a-zA-Z]{1,16}",
    ) {
        let args = to_args(&pairs);
        let left = build_invocation_call("d:type=T", &method, &args, &a).unwrap();
        let right = build_invocation_call("d:type=T", &method, &args, &b).unwrap();
        assert_only_addressing_differs(&left, &right)?;
    }

    #[test]
    fn invoke_is_deterministic(pairs in invoke_pairs(), a in addressing()) {
        let args = to_args(&pairs);
        let first = build_invocation_call("d:type=T", "op", &args, &a).unwrap().encode().unwrap();
        let second = build_invocation_call("d:type=T", "op", &args, &a).unwrap().encode().unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn signature_and_value_orders_agree(pairs in invoke_pairs()) {
        let call = build_invocation_call("d:type=T", "op", &to_args(&pairs), &Addressing::default()).unwrap();

        let Content::Array(signatures) = &call.arguments()[4] else {
            panic!("fifth argument must be the signature array");
        };
        let expected: Vec<Value> = pairs
            .iter()
            .map(|(k, _)| Content::utf(k.as_str()).into())
            .collect();
        prop_assert_eq!(signatures.values(), expected.as_slice());

        let values: Vec<&str> = pairs.iter().map(|(_, v)| v.as_str()).collect();
        prop_assert_eq!(marshalled_obj_bytes(&call), object_array_stream(&values));
    }
}
