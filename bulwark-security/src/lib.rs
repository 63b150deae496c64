//! Security response headers with validation.
//!
//! Each header type checks its own configuration before it is emitted. The
//! Content-Security-Policy header delegates to [`bulwark_csp`] and refuses to
//! emit a policy with validation errors.
//!
//! # Example
//!
//! ```
//! use bulwark_security::{CspHeader, FrameGuard, HstsConfig, SecurityHeaders};
//! use bulwark_csp::{ContentSecurityPolicy, Directive};
//!
//! // Use default security settings (recommended)
//! let mut headers = SecurityHeaders::recommended();
//! assert!(headers.validate_all().is_empty());
//!
//! // Or customize as needed
//! let policy = ContentSecurityPolicy::new()
//!     .directive(Directive::default_src().allow_self());
//! let headers = SecurityHeaders::new()
//!     .add_header(CspHeader::with_policy(policy))
//!     .add_header(HstsConfig::new(31536000))
//!     .add_header(FrameGuard::Deny);
//!
//! assert_eq!(
//!     headers.format_headers(),
//!     vec![
//!         "Content-Security-Policy: default-src 'self'",
//!         "Strict-Transport-Security: max-age=31536000; includeSubDomains",
//!         "X-Frame-Options: DENY",
//!     ]
//! );
//! ```

pub mod content_type_options;
pub mod csp_header;
pub mod error;
pub mod frame_guard;
pub mod header;
pub mod hsts;
pub mod xss_filter;

pub use content_type_options::ContentTypeOptions;
pub use csp_header::{CspHeader, CspHeaderName};
pub use error::{HeaderError, Result};
pub use frame_guard::FrameGuard;
pub use header::SecurityHeader;
pub use hsts::HstsConfig;
pub use xss_filter::XssProtection;

use http::header::{HeaderMap, HeaderName, HeaderValue};

const ILLEGAL_HEADER_CHARS: [char; 2] = ['\r', '\n'];

/// Ordered collection of security headers
#[derive(Debug, Default)]
pub struct SecurityHeaders {
    headers: Vec<Box<dyn SecurityHeader>>,
}

impl SecurityHeaders {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Every header enabled with recommended defaults
    pub fn recommended() -> Self {
        Self::new()
            .add_header(CspHeader::with_policy(csp_header::default_policy()))
            .add_header(HstsConfig::default())
            .add_header(FrameGuard::Deny)
            .add_header(XssProtection::default())
            .add_header(ContentTypeOptions::NoSniff)
    }

    pub fn add_header(mut self, header: impl SecurityHeader + 'static) -> Self {
        self.headers.push(Box::new(header));
        self
    }

    pub fn headers(&self) -> &[Box<dyn SecurityHeader>] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Validate every header, collecting all failures.
    pub fn validate_all(&mut self) -> Vec<HeaderError> {
        let mut failures = Vec::new();
        for header in &mut self.headers {
            if let Err(e) = header.validate() {
                tracing::warn!(header = %header.header_name(), "Rejected security header: {}", e);
                failures.push(e);
            }
        }
        failures
    }

    /// `(name, value)` pairs with CR and LF removed; headers without a value
    /// are skipped.
    pub fn build_headers(&self) -> Vec<(String, String)> {
        self.headers
            .iter()
            .filter_map(|header| {
                let value = header.header_value()?;
                Some((sanitize(header.header_name()), sanitize(&value)))
            })
            .collect()
    }

    /// `Name: value` lines
    pub fn format_headers(&self) -> Vec<String> {
        self.build_headers()
            .into_iter()
            .map(|(name, value)| format!("{}: {}", name, value))
            .collect()
    }

    /// Validate every header, then set them on `map`, replacing existing
    /// values. Nothing is written when any header fails validation; the first
    /// failure is returned.
    pub fn apply(&mut self, map: &mut HeaderMap) -> Result<()> {
        if let Some(e) = self.validate_all().into_iter().next() {
            return Err(e);
        }

        let mut entries = Vec::with_capacity(self.headers.len());
        for (name, value) in self.build_headers() {
            let name = HeaderName::from_bytes(name.as_bytes())?;
            let value = HeaderValue::from_str(&value)?;
            entries.push((name, value));
        }
        for (name, value) in entries {
            map.insert(name, value);
        }
        Ok(())
    }
}

fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| !ILLEGAL_HEADER_CHARS.contains(c))
        .collect()
}
