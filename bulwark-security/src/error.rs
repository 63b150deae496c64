use thiserror::Error;

/// Reasons a security header cannot be emitted.
#[derive(Error, Debug)]
pub enum HeaderError {
    #[error("Content security policy must be set")]
    MissingPolicy,

    #[error("{header} has an invalid policy: {}", .errors.join(", "))]
    InvalidPolicy { header: String, errors: Vec<String> },

    #[error("{header} is invalid: {reason}")]
    InvalidHeader { header: String, reason: String },

    #[error("Invalid header name: {0}")]
    InvalidHeaderName(#[from] http::header::InvalidHeaderName),

    #[error("Invalid header value: {0}")]
    InvalidHeaderValue(#[from] http::header::InvalidHeaderValue),
}

impl HeaderError {
    pub(crate) fn invalid(header: &str, reason: impl Into<String>) -> Self {
        Self::InvalidHeader {
            header: header.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HeaderError>;
