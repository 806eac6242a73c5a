use std::str::FromStr;

use crate::error::JmxError;

/// One `invoke` parameter: its declared Java type and its string value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvokeArg {
    /// Entry of the `String[] signature` array, e.g. `java.lang.String`.
    pub signature: String,
    pub value: String,
}

impl InvokeArg {
    pub fn new(signature: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            signature: signature.into(),
            value: value.into(),
        }
    }
}

/// Parses `TYPE=VALUE`, splitting at the first `=`.
impl FromStr for InvokeArg {
    type Err = JmxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('=') {
            Some((signature, value)) if !signature.is_empty() => {
                Ok(InvokeArg::new(signature, value))
            }
            _ => Err(JmxError::InvalidArgument(s.to_string())),
        }
    }
}

/// Ordered `invoke` parameters.
///
/// The signature array and the marshalled value array are both derived from
/// this one sequence, so their orders cannot diverge. Signatures may repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvokeArgs {
    args: Vec<InvokeArg>,
}

impl InvokeArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, signature: impl Into<String>, value: impl Into<String>) {
        self.args.push(InvokeArg::new(signature, value));
    }

    pub fn with(mut self, signature: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(signature, value);
        self
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, InvokeArg> {
        self.args.iter()
    }

    pub fn signatures(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(|arg| arg.signature.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.args.iter().map(|arg| arg.value.as_str())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for InvokeArgs {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            args: iter
                .into_iter()
                .map(|(signature, value)| InvokeArg::new(signature, value))
                .collect(),
        }
    }
}

impl FromIterator<InvokeArg> for InvokeArgs {
    fn from_iter<I: IntoIterator<Item = InvokeArg>>(iter: I) -> Self {
        Self {
            args: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a InvokeArgs {
    type Item = &'a InvokeArg;
    type IntoIter = std::slice::Iter<'a, InvokeArg>;

    fn into_iter(self) -> Self::IntoIter {
        self.args.iter()
    }
}
