use jrmi_proto::{method_hash, Call, DISPATCH_BY_HASH};
use jrmi_serial::{ClassDesc, Content, FieldType, NewArray};

use crate::args::InvokeArgs;
use crate::config::{Addressing, CallConfig};
use crate::constants::{
    CREATE_MBEAN_SIGNATURE, GET_OBJECT_INSTANCE_SIGNATURE, INVOKE_SIGNATURE, STRING_ARRAY_CLASS,
};
use crate::error::Result;
use crate::object_name::object_name_argument;
use crate::payload::{marshalled_object_argument, split_invoke_args, MarshalledObjectHash};
use crate::uids::ClassUidTable;

/// Client side of `javax.management.remote.rmi.RMIConnection`.
///
/// Holds only read-only settings; every method builds a fresh value tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RmiConnectionStub {
    uids: ClassUidTable,
    marshalled_hash: MarshalledObjectHash,
}

impl RmiConnectionStub {
    pub fn new(uids: ClassUidTable, marshalled_hash: MarshalledObjectHash) -> Self {
        Self {
            uids,
            marshalled_hash,
        }
    }

    pub fn uids(&self) -> &ClassUidTable {
        &self.uids
    }

    pub fn marshalled_hash(&self) -> MarshalledObjectHash {
        self.marshalled_hash
    }

    /// `[ObjectName(name), end-block, null Subject]`
    pub fn get_object_instance_args(&self, name: &str) -> Result<Vec<Content>> {
        Ok(vec![
            object_name_argument(name, &self.uids)?,
            Content::EndBlockData,
            Content::Null,
        ])
    }

    /// `getObjectInstance(ObjectName, Subject)`
    pub fn get_object_instance(&self, config: &CallConfig) -> Result<Call> {
        let arguments = self.get_object_instance_args(&config.name)?;
        tracing::debug!(
            target: "jrmi.jmx",
            method = "getObjectInstance",
            mbean = %config.name,
            "building JMX call"
        );
        dispatch(&config.addressing(), GET_OBJECT_INSTANCE_SIGNATURE, arguments)
    }

    /// `[class name, null ObjectName, null Subject]`
    pub fn create_mbean_args(&self, class_name: &str) -> Vec<Content> {
        vec![Content::utf(class_name), Content::Null, Content::Null]
    }

    /// `createMBean(String, ObjectName, Subject)`
    ///
    /// Only the variant taking a class name is supported; other constructors
    /// have to be reached through [`RmiConnectionStub::invoke`].
    pub fn create_mbean(&self, config: &CallConfig) -> Result<Call> {
        let arguments = self.create_mbean_args(&config.name);
        tracing::debug!(
            target: "jrmi.jmx",
            method = "createMBean",
            class = %config.name,
            "building JMX call"
        );
        dispatch(&config.addressing(), CREATE_MBEAN_SIGNATURE, arguments)
    }

    /// `[ObjectName(object), end-block, method, MarshalledObject(values), String[](signatures), null Subject]`
    pub fn invoke_args(&self, object: &str, method: &str, args: &InvokeArgs) -> Result<Vec<Content>> {
        let (signatures, payload) = split_invoke_args(args, &self.uids)?;
        let marshalled = marshalled_object_argument(&payload, self.marshalled_hash, &self.uids)?;

        let signature_array = NewArray::new(
            ClassDesc::new(STRING_ARRAY_CLASS, self.uids.get(STRING_ARRAY_CLASS)?),
            FieldType::object("java.lang.String"),
            signatures,
        )?;

        tracing::trace!(
            target: "jrmi.jmx",
            arguments = args.len(),
            payload_len = payload.len(),
            "encoded invoke payload"
        );

        Ok(vec![
            object_name_argument(object, &self.uids)?,
            Content::EndBlockData,
            Content::utf(method),
            marshalled,
            signature_array.into(),
            Content::Null,
        ])
    }

    /// [`crate::encode_invoke_payload`] with this stub's class UIDs.
    pub fn invoke_payload(&self, args: &InvokeArgs) -> Result<Vec<u8>> {
        let (_, payload) = split_invoke_args(args, &self.uids)?;
        Ok(payload)
    }

    /// `invoke(ObjectName, String, MarshalledObject, String[], Subject)`
    pub fn invoke(
        &self,
        object: &str,
        method: &str,
        args: &InvokeArgs,
        addressing: &Addressing,
    ) -> Result<Call> {
        let arguments = self.invoke_args(object, method, args)?;
        tracing::debug!(
            target: "jrmi.jmx",
            method = "invoke",
            mbean = %object,
            operation = %method,
            arguments = args.len(),
            "building JMX call"
        );
        dispatch(addressing, INVOKE_SIGNATURE, arguments)
    }
}

fn dispatch(addressing: &Addressing, signature: &str, arguments: Vec<Content>) -> Result<Call> {
    let hash = method_hash(signature)?;
    Ok(Call::new(
        addressing.object_id(),
        DISPATCH_BY_HASH,
        hash,
        arguments,
    ))
}

/// `getObjectInstance` call with the JRE class UIDs.
pub fn build_identity_call(config: &CallConfig) -> Result<Call> {
    RmiConnectionStub::default().get_object_instance(config)
}

/// `createMBean` call with the JRE class UIDs.
pub fn build_creation_call(config: &CallConfig) -> Result<Call> {
    RmiConnectionStub::default().create_mbean(config)
}

/// `invoke` call with the JRE class UIDs.
pub fn build_invocation_call(
    object: &str,
    method: &str,
    args: &InvokeArgs,
    addressing: &Addressing,
) -> Result<Call> {
    RmiConnectionStub::default().invoke(object, method, args, addressing)
}
