use crate::constants::{SC_SERIALIZABLE, SC_WRITE_METHOD};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveType {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
}

impl PrimitiveType {
    pub fn type_code(self) -> u8 {
        match self {
            PrimitiveType::Byte => b'B',
            PrimitiveType::Char => b'C',
            PrimitiveType::Double => b'D',
            PrimitiveType::Float => b'F',
            PrimitiveType::Int => b'I',
            PrimitiveType::Long => b'J',
            PrimitiveType::Short => b'S',
            PrimitiveType::Boolean => b'Z',
        }
    }
}

/// Type of a serializable field or of an array's elements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Primitive(PrimitiveType),
    /// Reference type, held as its JVM signature (e.g. `Ljava/lang/Object;`).
    Object(String),
    /// Array type, held as its JVM signature (e.g. `[B`).
    Array(String),
}

impl FieldType {
    /// Reference type for a Java binary class name (`java.lang.Object`).
    pub fn object(class_name: &str) -> Self {
        let internal = class_name.replace('.', "/");
        FieldType::Object(format!("L{internal};"))
    }

    /// Array type from its JVM signature (`[B`, `[Ljava/lang/String;`).
    pub fn array(signature: impl Into<String>) -> Self {
        FieldType::Array(signature.into())
    }

    pub fn type_code(&self) -> u8 {
        match self {
            FieldType::Primitive(ty) => ty.type_code(),
            FieldType::Object(_) => b'L',
            FieldType::Array(_) => b'[',
        }
    }

    /// Signature written after the field name in a class descriptor.
    /// Primitive fields carry none.
    pub fn type_string(&self) -> Option<&str> {
        match self {
            FieldType::Primitive(_) => None,
            FieldType::Object(sig) | FieldType::Array(sig) => Some(sig),
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (FieldType::Primitive(ty), value) => value.primitive_type() == Some(*ty),
            (FieldType::Object(_) | FieldType::Array(_), Value::Content(content)) => {
                content.is_reference()
            }
            _ => false,
        }
    }
}

/// A field entry of a class descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDesc {
    pub name: String,
    pub field_type: FieldType,
}

impl FieldDesc {
    pub fn new(name: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            field_type,
        }
    }
}

/// A `TC_CLASSDESC` record.
///
/// The superclass slot is written as `TC_NULL` unless a serializable
/// superclass descriptor is attached with [`ClassDesc::with_super_class`].
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDesc {
    name: String,
    serial_version_uid: i64,
    flags: u8,
    fields: Vec<FieldDesc>,
    annotations: Vec<Content>,
    super_class: Option<Box<ClassDesc>>,
}

impl ClassDesc {
    /// Descriptor for a plain serializable class with no fields.
    ///
    /// The default class annotation is the one `sun.rmi.server.MarshalOutputStream`
    /// writes: a `null` codebase location followed by the end-block marker.
    pub fn new(name: impl Into<String>, serial_version_uid: i64) -> Self {
        Self {
            name: name.into(),
            serial_version_uid,
            flags: SC_SERIALIZABLE,
            fields: Vec::new(),
            annotations: vec![Content::Null, Content::EndBlockData],
            super_class: None,
        }
    }

    pub fn with_flags(mut self, flags: u8) -> Self {
        self.flags = flags;
        self
    }

    pub fn with_fields(mut self, fields: Vec<FieldDesc>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_annotations(mut self, annotations: Vec<Content>) -> Self {
        self.annotations = annotations;
        self
    }

    pub fn with_super_class(mut self, super_class: ClassDesc) -> Self {
        self.super_class = Some(Box::new(super_class));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn serial_version_uid(&self) -> i64 {
        self.serial_version_uid
    }

    pub fn flags(&self) -> u8 {
        self.flags
    }

    pub fn fields(&self) -> &[FieldDesc] {
        &self.fields
    }

    pub fn annotations(&self) -> &[Content] {
        &self.annotations
    }

    pub fn has_write_method(&self) -> bool {
        self.flags & SC_WRITE_METHOD != 0
    }

    pub fn super_class(&self) -> Option<&ClassDesc> {
        self.super_class.as_deref()
    }

    /// This descriptor and its superclasses, topmost superclass first: the
    /// order in which their field values appear in an object's class data.
    pub fn hierarchy(&self) -> Vec<&ClassDesc> {
        let mut chain: Vec<&ClassDesc> =
            std::iter::successors(Some(self), |desc| desc.super_class()).collect();
        chain.reverse();
        chain
    }

    fn field_count(&self) -> usize {
        self.hierarchy().iter().map(|desc| desc.fields.len()).sum()
    }
}

/// A field value, array element or object annotation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Byte(i8),
    Char(u16),
    Double(f64),
    Float(f32),
    Int(i32),
    Long(i64),
    Short(i16),
    Boolean(bool),
    Content(Content),
}

impl Value {
    fn primitive_type(&self) -> Option<PrimitiveType> {
        let ty = match self {
            Value::Byte(_) => PrimitiveType::Byte,
            Value::Char(_) => PrimitiveType::Char,
            Value::Double(_) => PrimitiveType::Double,
            Value::Float(_) => PrimitiveType::Float,
            Value::Int(_) => PrimitiveType::Int,
            Value::Long(_) => PrimitiveType::Long,
            Value::Short(_) => PrimitiveType::Short,
            Value::Boolean(_) => PrimitiveType::Boolean,
            Value::Content(_) => return None,
        };
        Some(ty)
    }
}

impl From<Content> for Value {
    fn from(content: Content) -> Self {
        Value::Content(content)
    }
}

/// A `TC_OBJECT` record: class descriptor plus its serial data.
///
/// `class_data` holds one value per declared field, class by class from the
/// topmost superclass down and in declaration order within each class,
/// followed (for classes with a `writeObject` method) by the objects the
/// method writes after `defaultWriteObject`. The closing end-block marker is
/// not part of the object; callers place [`Content::EndBlockData`] after it.
/// Only the object's own class may have a `writeObject` method.
#[derive(Debug, Clone, PartialEq)]
pub struct NewObject {
    class_desc: ClassDesc,
    class_data: Vec<Value>,
}

impl NewObject {
    pub fn new(class_desc: ClassDesc, class_data: Vec<Value>) -> Result<Self> {
        let hierarchy = class_desc.hierarchy();
        if let Some(super_class) = hierarchy[..hierarchy.len() - 1]
            .iter()
            .find(|desc| desc.has_write_method())
        {
            return Err(Error::WriteMethodSuperClass {
                class: class_desc.name().to_string(),
                super_class: super_class.name().to_string(),
            });
        }

        let field_count = class_desc.field_count();
        if class_data.len() < field_count {
            return Err(Error::FieldCountMismatch {
                class: class_desc.name().to_string(),
                expected: field_count,
                found: class_data.len(),
            });
        }

        let fields = hierarchy.iter().flat_map(|desc| desc.fields());
        for (field, value) in fields.zip(&class_data) {
            if !field.field_type.accepts(value) {
                return Err(Error::FieldTypeMismatch {
                    class: class_desc.name().to_string(),
                    field: field.name.clone(),
                });
            }
        }

        let annotations = &class_data[field_count..];
        if !annotations.is_empty() && !class_desc.has_write_method() {
            return Err(Error::UnexpectedAnnotations {
                class: class_desc.name().to_string(),
            });
        }
        if annotations
            .iter()
            .any(|value| !matches!(value, Value::Content(_)))
        {
            return Err(Error::InvalidAnnotation {
                class: class_desc.name().to_string(),
            });
        }

        Ok(Self {
            class_desc,
            class_data,
        })
    }

    pub fn class_desc(&self) -> &ClassDesc {
        &self.class_desc
    }

    pub fn class_data(&self) -> &[Value] {
        &self.class_data
    }

    /// Value of the field called `name`.
    ///
    /// A field of the object's own class shadows a superclass field of the
    /// same name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        let mut offset = 0;
        let mut found = None;
        for desc in self.class_desc.hierarchy() {
            if let Some(idx) = desc.fields().iter().position(|field| field.name == name) {
                found = Some(offset + idx);
            }
            offset += desc.fields().len();
        }
        found.and_then(|idx| self.class_data.get(idx))
    }

    /// Objects written by the class's `writeObject` method.
    pub fn annotations(&self) -> &[Value] {
        &self.class_data[self.class_desc.field_count()..]
    }
}

/// A `TC_ARRAY` record.
#[derive(Debug, Clone, PartialEq)]
pub struct NewArray {
    class_desc: ClassDesc,
    element_type: FieldType,
    values: Vec<Value>,
}

impl NewArray {
    pub fn new(class_desc: ClassDesc, element_type: FieldType, values: Vec<Value>) -> Result<Self> {
        if i32::try_from(values.len()).is_err() {
            return Err(Error::ArrayTooLong {
                class: class_desc.name().to_string(),
                len: values.len(),
            });
        }
        if let Some(index) = values.iter().position(|value| !element_type.accepts(value)) {
            return Err(Error::ArrayElementMismatch {
                class: class_desc.name().to_string(),
                index,
            });
        }

        Ok(Self {
            class_desc,
            element_type,
            values,
        })
    }

    /// A `byte[]` holding `bytes`.
    pub fn bytes(class_desc: ClassDesc, bytes: &[u8]) -> Result<Self> {
        let values = bytes.iter().map(|b| Value::Byte(*b as i8)).collect();
        Self::new(
            class_desc,
            FieldType::Primitive(PrimitiveType::Byte),
            values,
        )
    }

    pub fn class_desc(&self) -> &ClassDesc {
        &self.class_desc
    }

    pub fn element_type(&self) -> &FieldType {
        &self.element_type
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Elements of a `byte[]` as unsigned bytes; `None` for other arrays.
    pub fn byte_values(&self) -> Option<Vec<u8>> {
        self.values
            .iter()
            .map(|value| match value {
                Value::Byte(b) => Some(*b as u8),
                _ => None,
            })
            .collect()
    }
}

/// One top-level item of a serialization stream.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Null,
    EndBlockData,
    /// Primitive data written outside any object (`TC_BLOCKDATA`).
    BlockData(Vec<u8>),
    Utf(String),
    Object(NewObject),
    Array(NewArray),
}

impl Content {
    pub fn utf(value: impl Into<String>) -> Self {
        Content::Utf(value.into())
    }

    /// Whether the content can stand where an object reference is expected.
    pub fn is_reference(&self) -> bool {
        matches!(
            self,
            Content::Null | Content::Utf(_) | Content::Object(_) | Content::Array(_)
        )
    }
}

impl From<NewObject> for Content {
    fn from(object: NewObject) -> Self {
        Content::Object(object)
    }
}

impl From<NewArray> for Content {
    fn from(array: NewArray) -> Self {
        Content::Array(array)
    }
}
