//! # Bulwark CSP
//!
//! Content-Security-Policy directive model, source-list validation and policy
//! composition.
//!
//! ## Features
//!
//! - ✅ **Directive Catalog** - Every CSP1/CSP2 directive plus experimental ones
//! - ✅ **Grammar Validation** - Keywords, scheme-sources, host-sources, base64
//! - ✅ **Inline Sources** - Nonces and hashes on `script-src` / `style-src`
//! - ✅ **Level Checks** - Undefined and deprecated directive warnings
//! - ✅ **Nonce Generation** - ChaCha20 random source with periodic reseeding
//! - ✅ **Configuration** - Policies from JSON or TOML
//!
//! ## Quick Start
//!
//! ```rust
//! use bulwark_csp::{ContentSecurityPolicy, Directive};
//!
//! let mut policy = ContentSecurityPolicy::new()
//!     .directive(Directive::default_src().allow_self().source("http://foobar.com"))
//!     .directive(Directive::object_src().allow_none());
//!
//! policy.reset_validation_report();
//! assert!(policy.is_valid());
//! assert_eq!(
//!     policy.build(),
//!     "default-src 'self' http://foobar.com; object-src 'none'"
//! );
//! ```
//!
//! ## Validation Findings
//!
//! Errors make a policy invalid; warnings never do.
//!
//! ```rust
//! use bulwark_csp::{ContentSecurityPolicy, Directive, PolicyLevel};
//!
//! let mut policy = ContentSecurityPolicy::with_level(PolicyLevel::Csp1)
//!     .directive(Directive::frame_ancestors().allow_self())
//!     .directive(Directive::img_src().source("http://foo.com:789789"));
//!
//! assert!(!policy.is_valid());
//! assert_eq!(policy.validation_warnings().len(), 1);
//! assert!(policy.validation_errors()[0].starts_with("img-src reports a validation error"));
//! ```
//!
//! ## Nonces
//!
//! ```rust
//! use bulwark_csp::{Directive, SecureRandom, generate_nonce};
//!
//! let random = SecureRandom::new().unwrap();
//! let nonce = generate_nonce(&random, 16);
//! let script = Directive::script_src().allow_self().nonce(&nonce);
//!
//! assert!(script.build().ends_with(&format!("'nonce-{nonce}'")));
//! ```

pub mod config;
pub mod directive;
pub mod directives;
pub mod error;
pub mod level;
pub mod nonce;
pub mod policy;
pub mod report;
pub mod source;

pub use config::{DirectiveConfig, HashConfig, PolicyConfig};
pub use directive::{
    ALLOWED_HASH_ALGORITHMS, Directive, DirectiveKind, HashAlgorithm, InlineSources, KeywordRule,
};
pub use directives::SandboxFlag;
pub use error::{CspError, Result};
pub use level::PolicyLevel;
pub use nonce::{RESEED_INTERVAL, SecureRandom, generate_nonce};
pub use policy::ContentSecurityPolicy;
pub use report::ValidationReport;
