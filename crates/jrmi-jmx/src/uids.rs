use std::collections::BTreeMap;

use crate::constants::{
    BYTE_ARRAY_CLASS, BYTE_ARRAY_UID, MARSHALLED_OBJECT_CLASS, MARSHALLED_OBJECT_UID,
    OBJECT_ARRAY_CLASS, OBJECT_ARRAY_UID, OBJECT_NAME_CLASS, OBJECT_NAME_UID,
    STRING_ARRAY_CLASS, STRING_ARRAY_UID,
};
use crate::error::{JmxError, Result};

/// serialVersionUID per class name.
///
/// The remote `ObjectInputStream` rejects a descriptor whose UID differs from
/// its local class, so these must match the target JRE.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassUidTable {
    uids: BTreeMap<String, i64>,
}

impl ClassUidTable {
    /// Values of the classes shipped with every JRE since 1.5.
    pub fn jre() -> Self {
        [
            (OBJECT_NAME_CLASS, OBJECT_NAME_UID),
            (BYTE_ARRAY_CLASS, BYTE_ARRAY_UID),
            (MARSHALLED_OBJECT_CLASS, MARSHALLED_OBJECT_UID),
            (STRING_ARRAY_CLASS, STRING_ARRAY_UID),
            (OBJECT_ARRAY_CLASS, OBJECT_ARRAY_UID),
        ]
        .into_iter()
        .collect()
    }

    /// Returns a copy with `class` mapped to `uid`.
    pub fn with_uid(mut self, class: impl Into<String>, uid: i64) -> Self {
        self.uids.insert(class.into(), uid);
        self
    }

    pub fn get(&self, class: &str) -> Result<i64> {
        self.uids
            .get(class)
            .copied()
            .ok_or_else(|| JmxError::UnknownClass(class.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.uids.iter().map(|(class, uid)| (class.as_str(), *uid))
    }
}

impl Default for ClassUidTable {
    fn default() -> Self {
        Self::jre()
    }
}

impl<K: Into<String>> FromIterator<(K, i64)> for ClassUidTable {
    fn from_iter<I: IntoIterator<Item = (K, i64)>>(iter: I) -> Self {
        Self {
            uids: iter
                .into_iter()
                .map(|(class, uid)| (class.into(), uid))
                .collect(),
        }
    }
}
