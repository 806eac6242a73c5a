//! Grammar constants from `java.io.ObjectStreamConstants`.

pub const STREAM_MAGIC: u16 = 0xACED;
pub const STREAM_VERSION: u16 = 5;

pub const TC_NULL: u8 = 0x70;
pub const TC_REFERENCE: u8 = 0x71;
pub const TC_CLASSDESC: u8 = 0x72;
pub const TC_OBJECT: u8 = 0x73;
pub const TC_STRING: u8 = 0x74;
pub const TC_ARRAY: u8 = 0x75;
pub const TC_BLOCKDATA: u8 = 0x77;
pub const TC_ENDBLOCKDATA: u8 = 0x78;
pub const TC_BLOCKDATALONG: u8 = 0x7A;
pub const TC_LONGSTRING: u8 = 0x7C;

/// First handle assigned in every stream.
pub const BASE_WIRE_HANDLE: i32 = 0x7E_0000;

/// Class defines its own `writeObject` method.
pub const SC_WRITE_METHOD: u8 = 0x01;
/// Class implements `java.io.Serializable`.
pub const SC_SERIALIZABLE: u8 = 0x02;

/// Longest string a `writeUTF` record (u16 length prefix) can carry.
pub const MAX_UTF_LEN: usize = 0xFFFF;
/// Longest payload of a short `TC_BLOCKDATA` record.
pub const MAX_SHORT_BLOCK_LEN: usize = 0xFF;
