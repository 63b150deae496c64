//! Frame Guard (X-Frame-Options)
//!
//! Mitigates clickjacking attacks.

use crate::error::{HeaderError, Result};
use crate::header::SecurityHeader;
use serde::{Deserialize, Serialize};

pub const HEADER_NAME: &str = "X-Frame-Options";

/// Frame Guard options
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FrameGuard {
    /// Deny all framing
    Deny,
    /// Allow framing from same origin
    #[default]
    SameOrigin,
    /// Allow framing from specific origin
    AllowFrom(String),
}

impl FrameGuard {
    pub fn allow_from(origin: impl Into<String>) -> Self {
        Self::AllowFrom(origin.into())
    }

    pub fn to_header_value(&self) -> String {
        match self {
            Self::Deny => "DENY".to_string(),
            Self::SameOrigin => "SAMEORIGIN".to_string(),
            Self::AllowFrom(origin) => format!("ALLOW-FROM {}", origin),
        }
    }
}

impl SecurityHeader for FrameGuard {
    fn header_name(&self) -> &str {
        HEADER_NAME
    }

    fn validate(&mut self) -> Result<()> {
        match self {
            Self::AllowFrom(origin) if origin.trim().is_empty() => Err(HeaderError::invalid(
                HEADER_NAME,
                "When using ALLOW-FROM, a valid origin must be set",
            )),
            _ => Ok(()),
        }
    }

    fn header_value(&self) -> Option<String> {
        Some(self.to_header_value())
    }
}
