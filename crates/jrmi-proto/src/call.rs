use jrmi_serial::{Content, StreamWriter};

use crate::Result;

/// JRMP message byte that introduces a call.
pub const CALL_MESSAGE: u8 = 0x50;

/// Operation number meaning "dispatch on the method hash" (1.2+ stubs).
pub const DISPATCH_BY_HASH: i32 = -1;

/// Size of the block-data header: object number, UID, operation and hash.
pub const CALL_HEADER_LEN: usize = 8 + 4 + 8 + 2 + 4 + 8;

/// `java.rmi.server.UID`: identifies the VM that exported an object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Uid {
    pub number: i32,
    pub time: i64,
    pub count: i16,
}

/// `java.rmi.server.ObjID`: addresses one exported remote object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ObjId {
    pub number: i64,
    pub uid: Uid,
}

/// One remote method invocation, ready to be written to a JRMP connection.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    object_id: ObjId,
    operation: i32,
    hash: i64,
    arguments: Vec<Content>,
}

impl Call {
    pub fn new(object_id: ObjId, operation: i32, hash: i64, arguments: Vec<Content>) -> Self {
        Self {
            object_id,
            operation,
            hash,
            arguments,
        }
    }

    pub fn object_id(&self) -> ObjId {
        self.object_id
    }

    pub fn operation(&self) -> i32 {
        self.operation
    }

    pub fn hash(&self) -> i64 {
        self.hash
    }

    pub fn arguments(&self) -> &[Content] {
        &self.arguments
    }

    /// The call header as written in the stream's leading block-data record.
    pub fn header(&self) -> Vec<u8> {
        let mut writer = StreamWriter::new();
        writer.write_i64(self.object_id.number);
        writer.write_i32(self.object_id.uid.number);
        writer.write_i64(self.object_id.uid.time);
        writer.write_i16(self.object_id.uid.count);
        writer.write_i32(self.operation);
        writer.write_i64(self.hash);
        writer.into_vec()
    }

    /// The serialization stream carrying the header and the arguments.
    pub fn call_data(&self) -> Result<Vec<u8>> {
        let mut writer = StreamWriter::new();
        writer.write_stream_header();
        writer.write_content(&Content::BlockData(self.header()))?;
        for argument in &self.arguments {
            writer.write_content(argument)?;
        }
        Ok(writer.into_vec())
    }

    /// Full JRMP call message: [`CALL_MESSAGE`] followed by the call data.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let call_data = self.call_data()?;
        let mut out = Vec::with_capacity(1 + call_data.len());
        out.push(CALL_MESSAGE);
        out.extend_from_slice(&call_data);

        tracing::debug!(
            target: "jrmi.proto",
            object_number = self.object_id.number,
            operation = self.operation,
            hash = self.hash,
            arguments = self.arguments.len(),
            len = out.len(),
            "encoded RMI call"
        );
        Ok(out)
    }
}
