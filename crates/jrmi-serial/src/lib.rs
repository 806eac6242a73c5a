//! Java Object Serialization Stream encoding.
//!
//! Values are modelled as an immutable tree of [`Content`] nodes (strings,
//! objects, arrays, block data and the `null` / end-block markers) and written
//! with [`Stream::encode`], which produces the exact bytes an
//! `ObjectOutputStream` would: stream header, class descriptors, handle table
//! back-references and block-data framing.
//!
//! Only the encoding direction is implemented.

#![forbid(unsafe_code)]

pub mod constants;
mod error;
pub mod mutf8;
mod model;
mod writer;

pub use crate::error::{Error, Result};
pub use crate::model::{
    ClassDesc, Content, FieldDesc, FieldType, NewArray, NewObject, PrimitiveType, Value,
};
pub use crate::writer::{Stream, StreamWriter};
