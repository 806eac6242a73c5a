//! Calls against `javax.management.remote.rmi.RMIConnectionImpl_Stub`.
//!
//! Builds the exact argument lists a genuine JMX client stub serializes for
//! `getObjectInstance`, `createMBean` and `invoke`, and wraps them in a
//! hash-dispatched [`jrmi_proto::Call`]. Nothing here performs I/O.
//!
//! ```no_run
//! use jrmi_jmx::{build_invocation_call, Addressing, InvokeArgs};
//!
//! let args: InvokeArgs = [("java.lang.String", "http://example.invalid/mlet")]
//!     .into_iter()
//!     .collect();
//! let call = build_invocation_call(
//!     "DefaultDomain:type=MLet",
//!     "getMBeansFromURL",
//!     &args,
//!     &Addressing::default(),
//! )?;
//! let bytes = call.encode()?;
//! # Ok::<(), jrmi_jmx::JmxError>(())
//! ```

#![forbid(unsafe_code)]

mod args;
mod calls;
mod config;
pub mod constants;
mod error;
mod object_name;
mod payload;
mod uids;

pub use crate::args::{InvokeArg, InvokeArgs};
pub use crate::calls::{
    build_creation_call, build_identity_call, build_invocation_call, RmiConnectionStub,
};
pub use crate::config::{Addressing, CallConfig};
pub use crate::error::{JmxError, Result};
pub use crate::object_name::object_name_argument;
pub use crate::payload::{
    encode_invoke_payload, marshalled_object_argument, MarshalledObjectHash,
};
pub use crate::uids::ClassUidTable;
