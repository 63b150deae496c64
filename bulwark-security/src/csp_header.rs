//! Content Security Policy (CSP) header
//!
//! CSP helps prevent XSS attacks by declaring which dynamic resources are
//! allowed to load. The policy itself is modeled and validated by
//! [`bulwark_csp`]; this module picks the header field and refuses to emit a
//! policy with validation errors.

use crate::error::{HeaderError, Result};
use crate::header::SecurityHeader;
use bulwark_csp::{ContentSecurityPolicy, Directive};
use serde::{Deserialize, Serialize};

/// Header field family a policy is sent under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CspHeaderName {
    /// `Content-Security-Policy`
    #[default]
    Csp,
    /// `X-Content-Security-Policy`
    XCsp,
    /// `X-Webkit-CSP`
    Webkit,
}

impl CspHeaderName {
    pub fn primary(&self) -> &'static str {
        match self {
            Self::Csp => "Content-Security-Policy",
            Self::XCsp => "X-Content-Security-Policy",
            Self::Webkit => "X-Webkit-CSP",
        }
    }

    pub fn report_only(&self) -> &'static str {
        match self {
            Self::Csp => "Content-Security-Policy-Report-Only",
            Self::XCsp => "X-Content-Security-Policy-Report-Only",
            Self::Webkit => "X-Webkit-CSP-Report-Only",
        }
    }
}

/// Content Security Policy header
#[derive(Debug, Clone, Default)]
pub struct CspHeader {
    policy: Option<ContentSecurityPolicy>,
    name: CspHeaderName,
    report_only: bool,
    reduce: bool,
}

impl CspHeader {
    /// A `Content-Security-Policy` header with no policy set
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: ContentSecurityPolicy) -> Self {
        Self::new().policy(policy)
    }

    pub fn policy(mut self, policy: ContentSecurityPolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn with_name(mut self, name: CspHeaderName) -> Self {
        self.name = name;
        self
    }

    /// Report violations only (doesn't enforce)
    pub fn report_only(mut self, enabled: bool) -> Self {
        self.report_only = enabled;
        self
    }

    /// Reduce the policy before it is emitted
    pub fn reduce(mut self, enabled: bool) -> Self {
        self.reduce = enabled;
        self
    }

    pub fn get_policy(&self) -> Option<&ContentSecurityPolicy> {
        self.policy.as_ref()
    }

    pub fn get_policy_mut(&mut self) -> Option<&mut ContentSecurityPolicy> {
        self.policy.as_mut()
    }

    pub fn is_report_only(&self) -> bool {
        self.report_only
    }

    /// Errors from the last [`validate`](SecurityHeader::validate) run
    pub fn validation_errors(&self) -> &[String] {
        self.policy
            .as_ref()
            .map(ContentSecurityPolicy::validation_errors)
            .unwrap_or_default()
    }

    /// Warnings from the last [`validate`](SecurityHeader::validate) run
    pub fn validation_warnings(&self) -> &[String] {
        self.policy
            .as_ref()
            .map(ContentSecurityPolicy::validation_warnings)
            .unwrap_or_default()
    }
}

impl SecurityHeader for CspHeader {
    fn header_name(&self) -> &str {
        if self.report_only {
            self.name.report_only()
        } else {
            self.name.primary()
        }
    }

    fn validate(&mut self) -> Result<()> {
        let header = self.header_name().to_string();
        let policy = self.policy.as_mut().ok_or(HeaderError::MissingPolicy)?;

        policy.reset_validation_report();
        if policy.is_valid() {
            return Ok(());
        }
        Err(HeaderError::InvalidPolicy {
            header,
            errors: policy.validation_errors().to_vec(),
        })
    }

    fn header_value(&self) -> Option<String> {
        let policy = self.policy.as_ref()?;
        if !self.reduce {
            return Some(policy.build());
        }
        let mut reduced = policy.clone();
        reduced.reduce();
        Some(reduced.build())
    }
}

/// Baseline policy used by [`SecurityHeaders::recommended`](crate::SecurityHeaders::recommended)
pub fn default_policy() -> ContentSecurityPolicy {
    ContentSecurityPolicy::new()
        .directive(Directive::default_src().allow_self())
        .directive(Directive::script_src().allow_self())
        .directive(Directive::style_src().allow_self().allow_unsafe_inline())
        .directive(
            Directive::img_src()
                .allow_self()
                .source("data:")
                .source("https:"),
        )
        .directive(Directive::font_src().allow_self())
        .directive(Directive::connect_src().allow_self())
        .directive(Directive::object_src().allow_none())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_names() {
        let header = CspHeader::new();
        assert_eq!(header.header_name(), "Content-Security-Policy");

        let header = CspHeader::new().with_name(CspHeaderName::XCsp).report_only(true);
        assert_eq!(header.header_name(), "X-Content-Security-Policy-Report-Only");
        assert!(header.is_report_only());

        let header = CspHeader::new().with_name(CspHeaderName::Webkit);
        assert_eq!(header.header_name(), "X-Webkit-CSP");
        assert_eq!(CspHeaderName::Webkit.report_only(), "X-Webkit-CSP-Report-Only");
        assert_eq!(
            CspHeaderName::Csp.report_only(),
            "Content-Security-Policy-Report-Only"
        );
    }

    #[test]
    fn test_missing_policy() {
        let mut header = CspHeader::new();
        assert!(matches!(header.validate(), Err(HeaderError::MissingPolicy)));
        assert!(header.header_value().is_none());
        assert!(header.validation_errors().is_empty());
    }

    #[test]
    fn test_default_policy() {
        let mut header = CspHeader::with_policy(default_policy());
        assert!(header.validate().is_ok());

        let value = header.header_value().unwrap();
        assert!(value.starts_with("default-src 'self'; script-src 'self'"));
        assert!(value.contains("img-src 'self' data: https:"));
        assert!(value.ends_with("object-src 'none'"));
    }

    #[test]
    fn test_invalid_policy_lists_errors() {
        let policy = ContentSecurityPolicy::new()
            .directive(Directive::default_src().source("a b"))
            .directive(Directive::img_src().source("http://foo.com:99999"));
        let mut header = CspHeader::with_policy(policy);

        match header.validate() {
            Err(HeaderError::InvalidPolicy { header: name, errors }) => {
                assert_eq!(name, "Content-Security-Policy");
                assert_eq!(errors.len(), 2);
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(header.validation_errors().len(), 2);
    }

    #[test]
    fn test_validate_resets_report() {
        let policy =
            ContentSecurityPolicy::new().directive(Directive::frame_src().allow_self());
        let mut header = CspHeader::with_policy(policy);

        assert!(header.validate().is_ok());
        assert!(header.validate().is_ok());
        assert_eq!(header.validation_warnings().len(), 1);
    }

    #[test]
    fn test_reduce_on_emit() {
        let policy = ContentSecurityPolicy::new()
            .directive(Directive::default_src().allow_self().allow_self())
            .directive(Directive::img_src());

        let plain = CspHeader::with_policy(policy.clone());
        assert_eq!(plain.header_value().as_deref(), Some("default-src 'self' 'self'"));

        let reduced = CspHeader::with_policy(policy).reduce(true);
        assert_eq!(reduced.header_value().as_deref(), Some("default-src 'self'"));
        assert_eq!(reduced.get_policy().map(|p| p.directives().len()), Some(2));
    }
}
