//! HTTP Strict Transport Security (HSTS)
//!
//! Forces browsers to use HTTPS.

use crate::error::{HeaderError, Result};
use crate::header::SecurityHeader;
use serde::{Deserialize, Serialize};

pub const HEADER_NAME: &str = "Strict-Transport-Security";

/// One year, in seconds
pub const DEFAULT_MAX_AGE: u64 = 31_536_000;

/// HSTS configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HstsConfig {
    /// Max age in seconds
    pub max_age: u64,

    /// Include subdomains
    pub include_subdomains: bool,

    /// Preload (submit to browser preload list)
    pub preload: bool,
}

impl HstsConfig {
    /// Create a new HSTS configuration
    pub fn new(max_age: u64) -> Self {
        Self {
            max_age,
            include_subdomains: true,
            preload: false,
        }
    }

    pub fn include_subdomains(mut self, include: bool) -> Self {
        self.include_subdomains = include;
        self
    }

    pub fn preload(mut self, preload: bool) -> Self {
        self.preload = preload;
        self
    }

    /// Convert to header value
    pub fn to_header_value(&self) -> String {
        let mut parts = vec![format!("max-age={}", self.max_age)];
        if self.include_subdomains {
            parts.push("includeSubDomains".to_string());
        }
        if self.preload {
            parts.push("preload".to_string());
        }
        parts.join("; ")
    }
}

impl Default for HstsConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_AGE)
    }
}

impl SecurityHeader for HstsConfig {
    fn header_name(&self) -> &str {
        HEADER_NAME
    }

    /// Preload lists only accept one-year policies covering subdomains.
    fn validate(&mut self) -> Result<()> {
        if self.preload && !self.include_subdomains {
            return Err(HeaderError::invalid(
                HEADER_NAME,
                "preload requires includeSubDomains",
            ));
        }
        if self.preload && self.max_age < DEFAULT_MAX_AGE {
            return Err(HeaderError::invalid(
                HEADER_NAME,
                format!("preload requires a max-age of at least {DEFAULT_MAX_AGE}"),
            ));
        }
        Ok(())
    }

    fn header_value(&self) -> Option<String> {
        Some(self.to_header_value())
    }
}
