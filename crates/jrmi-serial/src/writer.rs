use std::collections::HashMap;

use crate::constants::{
    BASE_WIRE_HANDLE, MAX_SHORT_BLOCK_LEN, MAX_UTF_LEN, STREAM_MAGIC, STREAM_VERSION,
    TC_ARRAY, TC_BLOCKDATA, TC_BLOCKDATALONG, TC_CLASSDESC, TC_ENDBLOCKDATA, TC_LONGSTRING,
    TC_NULL, TC_OBJECT, TC_REFERENCE, TC_STRING,
};
use crate::error::{Error, Result};
use crate::model::{ClassDesc, Content, NewArray, NewObject, Value};
use crate::mutf8;

/// Handles assigned so far in one stream.
///
/// Only class descriptors and field type strings are looked up again; the
/// JDK shares those by identity (one `ObjectStreamClass` per class, interned
/// signatures), whereas string and object values are distinct instances.
/// A descriptor is shared only when it is equal in every part (name, UID,
/// flags, fields, annotations and superclass); two differing descriptors
/// with the same name are both written out in full.
#[derive(Debug)]
struct HandleTable {
    next: i32,
    class_descs: Vec<(ClassDesc, i32)>,
    type_strings: HashMap<String, i32>,
}

impl HandleTable {
    fn new() -> Self {
        Self {
            next: BASE_WIRE_HANDLE,
            class_descs: Vec::new(),
            type_strings: HashMap::new(),
        }
    }

    fn assign(&mut self) -> i32 {
        let handle = self.next;
        self.next += 1;
        handle
    }

    fn class_desc(&self, desc: &ClassDesc) -> Option<i32> {
        self.class_descs
            .iter()
            .find(|(written, _)| written == desc)
            .map(|(_, handle)| *handle)
    }
}

/// Big-endian writer for one serialization stream.
pub struct StreamWriter {
    buf: Vec<u8>,
    handles: HandleTable,
}

impl Default for StreamWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamWriter {
    pub fn new() -> Self {
        Self {
            buf: Vec::new(),
            handles: HandleTable::new(),
        }
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn write_u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_i16(&mut self, v: i16) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_i64(&mut self, v: i64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_f32(&mut self, v: f32) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_f64(&mut self, v: f64) {
        self.buf.extend_from_slice(&v.to_be_bytes());
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    /// `DataOutput.writeUTF`: u16 byte length, then modified UTF-8.
    pub fn write_utf(&mut self, s: &str) -> Result<()> {
        let encoded = mutf8::encode(s);
        let len = u16::try_from(encoded.len())
            .map_err(|_| Error::StringTooLong { len: encoded.len() })?;
        self.write_u16(len);
        self.write_bytes(&encoded);
        Ok(())
    }

    pub fn write_stream_header(&mut self) {
        self.write_u16(STREAM_MAGIC);
        self.write_u16(STREAM_VERSION);
    }

    pub fn write_content(&mut self, content: &Content) -> Result<()> {
        match content {
            Content::Null => self.write_u8(TC_NULL),
            Content::EndBlockData => self.write_u8(TC_ENDBLOCKDATA),
            Content::BlockData(data) => self.write_block_data(data)?,
            Content::Utf(s) => self.write_string(s),
            Content::Object(object) => self.write_object(object)?,
            Content::Array(array) => self.write_array(array)?,
        }
        Ok(())
    }

    fn write_reference(&mut self, handle: i32) {
        self.write_u8(TC_REFERENCE);
        self.write_i32(handle);
    }

    fn write_block_data(&mut self, data: &[u8]) -> Result<()> {
        if data.len() <= MAX_SHORT_BLOCK_LEN {
            self.write_u8(TC_BLOCKDATA);
            self.write_u8(data.len() as u8);
        } else {
            let len = i32::try_from(data.len())
                .map_err(|_| Error::BlockDataTooLong { len: data.len() })?;
            self.write_u8(TC_BLOCKDATALONG);
            self.write_i32(len);
        }
        self.write_bytes(data);
        Ok(())
    }

    fn write_string(&mut self, s: &str) {
        self.handles.assign();
        let encoded = mutf8::encode(s);
        if encoded.len() <= MAX_UTF_LEN {
            self.write_u8(TC_STRING);
            self.write_u16(encoded.len() as u16);
        } else {
            self.write_u8(TC_LONGSTRING);
            self.write_i64(encoded.len() as i64);
        }
        self.write_bytes(&encoded);
    }

    fn write_type_string(&mut self, signature: &str) {
        if let Some(handle) = self.handles.type_strings.get(signature).copied() {
            self.write_reference(handle);
            return;
        }
        let handle = self.handles.next;
        self.write_string(signature);
        self.handles
            .type_strings
            .insert(signature.to_string(), handle);
    }

    fn write_class_desc(&mut self, desc: &ClassDesc) -> Result<()> {
        if let Some(handle) = self.handles.class_desc(desc) {
            self.write_reference(handle);
            return Ok(());
        }

        self.write_u8(TC_CLASSDESC);
        let handle = self.handles.assign();
        self.handles.class_descs.push((desc.clone(), handle));

        self.write_utf(desc.name())?;
        self.write_i64(desc.serial_version_uid());
        self.write_u8(desc.flags());
        let field_count = u16::try_from(desc.fields().len()).map_err(|_| Error::ArrayTooLong {
            class: desc.name().to_string(),
            len: desc.fields().len(),
        })?;
        self.write_u16(field_count);
        for field in desc.fields() {
            self.write_u8(field.field_type.type_code());
            self.write_utf(&field.name)?;
            if let Some(signature) = field.field_type.type_string() {
                self.write_type_string(signature);
            }
        }

        for annotation in desc.annotations() {
            self.write_content(annotation)?;
        }

        match desc.super_class() {
            Some(super_class) => self.write_class_desc(super_class),
            None => {
                self.write_u8(TC_NULL);
                Ok(())
            }
        }
    }

    fn write_object(&mut self, object: &NewObject) -> Result<()> {
        self.write_u8(TC_OBJECT);
        self.write_class_desc(object.class_desc())?;
        self.handles.assign();
        for value in object.class_data() {
            self.write_value(value)?;
        }
        Ok(())
    }

    fn write_array(&mut self, array: &NewArray) -> Result<()> {
        self.write_u8(TC_ARRAY);
        self.write_class_desc(array.class_desc())?;
        self.handles.assign();
        // Length fits: `NewArray::new` rejects anything larger.
        self.write_i32(array.len() as i32);
        for value in array.values() {
            self.write_value(value)?;
        }
        Ok(())
    }

    fn write_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Byte(v) => self.write_u8(*v as u8),
            Value::Char(v) => self.write_u16(*v),
            Value::Double(v) => self.write_f64(*v),
            Value::Float(v) => self.write_f32(*v),
            Value::Int(v) => self.write_i32(*v),
            Value::Long(v) => self.write_i64(*v),
            Value::Short(v) => self.write_i16(*v),
            Value::Boolean(v) => self.write_u8(u8::from(*v)),
            Value::Content(content) => self.write_content(content)?,
        }
        Ok(())
    }
}

/// A complete serialization stream: header plus contents.
#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    contents: Vec<Content>,
}

impl Stream {
    pub fn new(contents: Vec<Content>) -> Self {
        Self { contents }
    }

    pub fn contents(&self) -> &[Content] {
        &self.contents
    }

    /// Encode with a fresh handle table.
    pub fn encode(&self) -> Result<Vec<u8>> {
        let mut writer = StreamWriter::new();
        writer.write_stream_header();
        for content in &self.contents {
            writer.write_content(content)?;
        }
        Ok(writer.into_vec())
    }
}
