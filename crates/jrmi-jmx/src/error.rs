use thiserror::Error;

pub type Result<T> = std::result::Result<T, JmxError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JmxError {
    #[error("no serialVersionUID configured for class {0}")]
    UnknownClass(String),
    #[error("invalid invoke argument `{0}`: expected TYPE=VALUE")]
    InvalidArgument(String),
    #[error(transparent)]
    Serialization(#[from] jrmi_serial::Error),
    #[error(transparent)]
    Protocol(#[from] jrmi_proto::Error),
}
