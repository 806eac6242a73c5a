use jrmi_proto::{ObjId, Uid};
use serde::{Deserialize, Serialize};

/// Identifies the exported `RMIConnectionImpl` instance a call targets.
///
/// The values come from the stub returned by `RMIServer.newClient`; every
/// field defaults to `0`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Addressing {
    pub object_number: i64,
    pub uid_number: i32,
    pub uid_time: i64,
    pub uid_count: i16,
}

impl Addressing {
    pub fn object_id(&self) -> ObjId {
        ObjId {
            number: self.object_number,
            uid: Uid {
                number: self.uid_number,
                time: self.uid_time,
                count: self.uid_count,
            },
        }
    }
}

/// Flat inputs of `getObjectInstance` and `createMBean` calls.
///
/// `name` is the MBean object name (`getObjectInstance`) or the class name to
/// instantiate (`createMBean`); it defaults to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CallConfig {
    pub object_number: i64,
    pub uid_number: i32,
    pub uid_time: i64,
    pub uid_count: i16,
    pub name: String,
}

impl CallConfig {
    pub fn new(addressing: Addressing, name: impl Into<String>) -> Self {
        Self {
            object_number: addressing.object_number,
            uid_number: addressing.uid_number,
            uid_time: addressing.uid_time,
            uid_count: addressing.uid_count,
            name: name.into(),
        }
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self::new(Addressing::default(), name)
    }

    pub fn addressing(&self) -> Addressing {
        Addressing {
            object_number: self.object_number,
            uid_number: self.uid_number,
            uid_time: self.uid_time,
            uid_count: self.uid_count,
        }
    }
}
