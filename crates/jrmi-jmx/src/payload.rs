use jrmi_serial::{
    ClassDesc, Content, FieldDesc, FieldType, NewArray, NewObject, PrimitiveType, Stream, Value,
};

use crate::args::InvokeArgs;
use crate::constants::{
    BYTE_ARRAY_CLASS, DEFAULT_MARSHALLED_OBJECT_HASH, MARSHALLED_OBJECT_CLASS,
    OBJECT_ARRAY_CLASS,
};
use crate::error::Result;
use crate::uids::ClassUidTable;

/// Value written into the `hash` field of a `MarshalledObject`.
///
/// The remote side never checks it while deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarshalledObjectHash {
    Fixed(i32),
    /// What `new MarshalledObject(obj)` computes: `31 * h + b` over the
    /// serialized bytes.
    Content,
}

impl Default for MarshalledObjectHash {
    fn default() -> Self {
        MarshalledObjectHash::Fixed(DEFAULT_MARSHALLED_OBJECT_HASH)
    }
}

impl MarshalledObjectHash {
    pub fn resolve(self, obj_bytes: &[u8]) -> i32 {
        match self {
            MarshalledObjectHash::Fixed(hash) => hash,
            MarshalledObjectHash::Content => obj_bytes
                .iter()
                .fold(0i32, |h, b| h.wrapping_mul(31).wrapping_add(i32::from(*b as i8))),
        }
    }
}

/// Serialized `Object[]` of the argument values, as embedded in the
/// `MarshalledObject` passed to `invoke`, using the JRE class UIDs.
///
/// The array is written to its own stream: fresh header and handle table,
/// and a class annotation without the codebase `null` (a marshalled stream
/// keeps locations in `locBytes`).
pub fn encode_invoke_payload(args: &InvokeArgs) -> Result<Vec<u8>> {
    let (_, payload) = split_invoke_args(args, &ClassUidTable::jre())?;
    Ok(payload)
}

/// The `String[]` signature elements and the encoded payload, both taken
/// from one pass over `args`.
pub(crate) fn split_invoke_args(
    args: &InvokeArgs,
    uids: &ClassUidTable,
) -> Result<(Vec<Value>, Vec<u8>)> {
    let (signatures, values): (Vec<Value>, Vec<Value>) = args
        .iter()
        .map(|arg| {
            (
                Value::from(Content::utf(&arg.signature)),
                Value::from(Content::utf(&arg.value)),
            )
        })
        .unzip();
    let payload = encode_object_array(values, uids)?;
    Ok((signatures, payload))
}

fn encode_object_array(values: Vec<Value>, uids: &ClassUidTable) -> Result<Vec<u8>> {
    let desc = ClassDesc::new(OBJECT_ARRAY_CLASS, uids.get(OBJECT_ARRAY_CLASS)?)
        .with_annotations(vec![Content::EndBlockData]);
    let array = NewArray::new(desc, FieldType::object("java.lang.Object"), values)?;
    Ok(Stream::new(vec![array.into()]).encode()?)
}

/// A `java.rmi.MarshalledObject` whose `objBytes` are `obj_bytes`.
pub fn marshalled_object_argument(
    obj_bytes: &[u8],
    hash: MarshalledObjectHash,
    uids: &ClassUidTable,
) -> Result<Content> {
    let byte_array = NewArray::bytes(
        ClassDesc::new(BYTE_ARRAY_CLASS, uids.get(BYTE_ARRAY_CLASS)?),
        obj_bytes,
    )?;

    let desc = ClassDesc::new(MARSHALLED_OBJECT_CLASS, uids.get(MARSHALLED_OBJECT_CLASS)?)
        .with_fields(vec![
            FieldDesc::new("hash", FieldType::Primitive(PrimitiveType::Int)),
            FieldDesc::new("locBytes", FieldType::array(BYTE_ARRAY_CLASS)),
            FieldDesc::new("objBytes", FieldType::array(BYTE_ARRAY_CLASS)),
        ]);
    let object = NewObject::new(
        desc,
        vec![
            Value::Int(hash.resolve(obj_bytes)),
            Content::Null.into(),
            Content::from(byte_array).into(),
        ],
    )?;
    Ok(object.into())
}
