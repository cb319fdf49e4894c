//! Public error types for proxy creation.
//!
//! Failures of proxied calls are not errors of this kind: they are
//! [`Throwable`](crate::Throwable)s raised from the call.

use miette::Diagnostic;
use thiserror::Error;

/// Why a type or proxy could not be created.
#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum ProxyError {
    /// The requested types cannot be proxied together.
    #[error("{message}")]
    #[diagnostic(
        code(dynproxy::configuration),
        help("a proxy may extend at most one non-final class, and that class needs a public or protected no-argument constructor")
    )]
    Configuration { message: String, types: Vec<String> },

    #[error("type {name} is already defined in loader {loader}")]
    #[diagnostic(code(dynproxy::duplicate_type))]
    DuplicateType { name: String, loader: String },

    #[error("type {name} is not visible from loader {loader}")]
    #[diagnostic(code(dynproxy::unknown_type))]
    UnknownType { name: String, loader: String },

    #[error("invalid type {name}: {reason}")]
    #[diagnostic(code(dynproxy::invalid_type))]
    InvalidType { name: String, reason: String },
}

impl ProxyError {
    pub fn configuration<I, S>(message: impl Into<String>, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ProxyError::Configuration {
            message: message.into(),
            types: types.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, ProxyError::Configuration { .. })
    }

    /// Qualified names of the types the error is about.
    pub fn types(&self) -> Vec<&str> {
        match self {
            ProxyError::Configuration { types, .. } => types.iter().map(String::as_str).collect(),
            ProxyError::DuplicateType { name, .. }
            | ProxyError::UnknownType { name, .. }
            | ProxyError::InvalidType { name, .. } => vec![name.as_str()],
        }
    }
}
