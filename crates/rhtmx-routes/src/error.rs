// File: src/error.rs
// Purpose: Error types for codecs and route trees

use thiserror::Error;

/// Failure of a single codec while decoding (or, for erased codecs, encoding)
/// a value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CodecError {
    /// The wire value has the right shape but cannot be decoded
    #[error("couldn't transform {value:?} to {target}")]
    Parse { value: String, target: &'static str },

    /// The wire value has the wrong shape (e.g. a list where text was expected)
    #[error("expected {expected}, found {found}")]
    Shape {
        expected: &'static str,
        found: &'static str,
    },

    /// A one-of codec exhausted its candidates
    #[error("no matching value for {value:?}")]
    NoMatchingValue { value: String },

    /// An application value of the wrong kind was handed to a codec
    #[error("expected a {expected} value, got {found}")]
    Type {
        expected: &'static str,
        found: &'static str,
    },
}

/// Errors raised while composing a route tree or building/parsing its URLs
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RouteError {
    /// A required (non-wildcard) path capture was missing at parse time
    #[error("insufficient params: missing {}", missing.join(", "))]
    InsufficientParams { missing: Vec<String> },

    /// A codec failed for a key whose failure is not recoverable
    #[error("invalid value for param `{key}`: {source}")]
    Codec {
        key: String,
        #[source]
        source: CodecError,
    },

    /// Interpolation needed a param that was not supplied
    #[error("missing \":{name}\" param")]
    MissingParam { name: String },

    /// A template is malformed
    #[error("invalid template {template:?}: {reason}")]
    InvalidTemplate { template: String, reason: String },

    /// A path codec was declared for a key the template does not capture
    #[error("path codec `{key}` does not match any param of {template:?}")]
    UnknownCodecKey { key: String, template: String },
}

impl RouteError {
    pub(crate) fn invalid_template(template: &str, reason: impl Into<String>) -> Self {
        RouteError::InvalidTemplate {
            template: template.to_string(),
            reason: reason.into(),
        }
    }

    /// True for the errors a caller should read as "this URL does not belong
    /// to this route" rather than a programming mistake.
    pub fn is_mismatch(&self) -> bool {
        matches!(
            self,
            RouteError::InsufficientParams { .. } | RouteError::Codec { .. }
        )
    }
}

pub type Result<T, E = RouteError> = std::result::Result<T, E>;
