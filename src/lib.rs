// Bulwark - Content-Security-Policy modeling and security response headers
//
// This library builds CSP policies from typed directives, validates them
// against the CSP1/CSP2 grammars and emits them alongside the other common
// security headers.

// Re-export core functionality
pub use bulwark_csp::*;

// Re-export optional crates
#[cfg(feature = "security")]
pub use bulwark_security;

// Prelude for common imports
pub mod prelude {
    pub use crate::{
        ContentSecurityPolicy,
        CspError,
        Directive,
        HashAlgorithm,
        PolicyConfig,
        PolicyLevel,
        SandboxFlag,
        SecureRandom,
        ValidationReport,
        generate_nonce,
    };

    #[cfg(feature = "security")]
    pub use crate::bulwark_security::{
        ContentTypeOptions,
        CspHeader,
        CspHeaderName,
        FrameGuard,
        HeaderError,
        HstsConfig,
        SecurityHeader,
        SecurityHeaders,
        XssProtection,
    };
}
