//! Java RMI (JRMP) call construction.
//!
//! [`Call`] is the envelope a stub writes for one remote invocation: the
//! target object's [`ObjId`], the operation number (or [`DISPATCH_BY_HASH`]),
//! the method hash and the serialized arguments. [`method_hash`] derives the
//! hash the way `sun.rmi.server.Util.computeMethodHash` does.

#![forbid(unsafe_code)]

mod call;
mod hash;

use thiserror::Error;

pub use call::{Call, ObjId, Uid, CALL_HEADER_LEN, CALL_MESSAGE, DISPATCH_BY_HASH};
pub use hash::method_hash;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Serialization(#[from] jrmi_serial::Error),
}
