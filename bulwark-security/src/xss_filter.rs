//! X-XSS-Protection
//!
//! Enables the Cross-site scripting (XSS) filter built into browsers.

use crate::error::{HeaderError, Result};
use crate::header::SecurityHeader;
use serde::{Deserialize, Serialize};

pub const HEADER_NAME: &str = "X-XSS-Protection";

/// XSS filter options
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct XssProtection {
    /// Enable the browser filter
    pub enabled: bool,
    /// Block the page instead of sanitizing it
    pub block: bool,
    /// Violation report endpoint
    pub report_uri: Option<String>,
}

impl XssProtection {
    /// `0`
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            block: false,
            report_uri: None,
        }
    }

    /// `1`
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            block: false,
            report_uri: None,
        }
    }

    /// `1; mode=block`
    pub fn block() -> Self {
        Self {
            enabled: true,
            block: true,
            report_uri: None,
        }
    }

    pub fn report_uri(mut self, uri: impl Into<String>) -> Self {
        self.report_uri = Some(uri.into());
        self
    }

    pub fn to_header_value(&self) -> String {
        if !self.enabled {
            return "0".to_string();
        }
        let mut value = String::from("1");
        if self.block {
            value.push_str("; mode=block");
        }
        if let Some(uri) = &self.report_uri {
            value.push_str("; report=");
            value.push_str(uri);
        }
        value
    }
}

impl Default for XssProtection {
    fn default() -> Self {
        Self::block()
    }
}

impl SecurityHeader for XssProtection {
    fn header_name(&self) -> &str {
        HEADER_NAME
    }

    fn validate(&mut self) -> Result<()> {
        if let Some(uri) = &self.report_uri {
            url::Url::parse(uri)
                .map_err(|_| HeaderError::invalid(HEADER_NAME, "Report url is not a valid URL"))?;
        }
        if !self.enabled {
            if self.block {
                return Err(HeaderError::invalid(
                    HEADER_NAME,
                    "Cannot disable X-XSS-Protection, but require mode=block",
                ));
            }
            if self.report_uri.is_some() {
                return Err(HeaderError::invalid(
                    HEADER_NAME,
                    "Cannot disable X-XSS-Protection, but enable reporting",
                ));
            }
        }
        Ok(())
    }

    fn header_value(&self) -> Option<String> {
        Some(self.to_header_value())
    }
}
