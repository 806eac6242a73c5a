use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("class {class} declares {expected} fields but {found} values were supplied")]
    FieldCountMismatch {
        class: String,
        expected: usize,
        found: usize,
    },
    #[error("value for field `{field}` of class {class} does not match its declared type")]
    FieldTypeMismatch { class: String, field: String },
    #[error("class {class} has no writeObject method but carries annotation data")]
    UnexpectedAnnotations { class: String },
    #[error("class {class} extends {super_class}, whose writeObject data cannot be expressed")]
    WriteMethodSuperClass { class: String, super_class: String },
    #[error("annotation data of class {class} must be stream contents, not primitive values")]
    InvalidAnnotation { class: String },
    #[error("element {index} of array {class} does not match the array element type")]
    ArrayElementMismatch { class: String, index: usize },
    #[error("array {class} has {len} elements, more than a Java array can hold")]
    ArrayTooLong { class: String, len: usize },
    #[error("UTF record of {len} bytes exceeds the 65535-byte limit")]
    StringTooLong { len: usize },
    #[error("block data record of {len} bytes is too large")]
    BlockDataTooLong { len: usize },
}
