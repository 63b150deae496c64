use thiserror::Error;

/// Failures outside of policy validation.
///
/// Validation findings are never reported through this type: they are
/// collected as strings in a [`ValidationReport`](crate::ValidationReport).
#[derive(Error, Debug)]
pub enum CspError {
    #[error("Invalid JSON policy configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML policy configuration: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Failed to read policy configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported policy configuration format: {0}")]
    UnsupportedFormat(String),

    #[error("Directive name must not be blank")]
    BlankDirectiveName,

    #[error("Directive {directive} does not accept nonce or hash sources")]
    InlineSourcesUnsupported { directive: String },

    #[error("Secure random source unavailable: {0}")]
    Entropy(String),
}

pub type Result<T> = std::result::Result<T, CspError>;
