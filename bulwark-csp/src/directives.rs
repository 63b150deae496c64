//! Directive catalog
//!
//! Named constructors for every registered CSP directive, the sandbox flag
//! set and by-value helpers for the common source keywords.
//!
//! ```
//! use bulwark_csp::Directive;
//!
//! let script = Directive::script_src()
//!     .allow_self()
//!     .source("https://cdn.example.com")
//!     .nonce("QUJDRA==");
//!
//! assert_eq!(
//!     script.build(),
//!     "script-src 'self' https://cdn.example.com 'nonce-QUJDRA=='"
//! );
//! ```

use crate::directive::{Directive, DirectiveKind, HashAlgorithm, InlineSources, KeywordRule};
use crate::source::{SRC_KEY_NONE, SRC_KEY_SELF, SRC_UNSAFE_EVAL, SRC_UNSAFE_INLINE, SRC_WILDCARD};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const BASE_URI: &str = "base-uri";
pub const CHILD_SRC: &str = "child-src";
pub const CONNECT_SRC: &str = "connect-src";
pub const DEFAULT_SRC: &str = "default-src";
pub const FONT_SRC: &str = "font-src";
pub const FORM_ACTION: &str = "form-action";
pub const FRAME_ANCESTORS: &str = "frame-ancestors";
pub const FRAME_SRC: &str = "frame-src";
pub const IMG_SRC: &str = "img-src";
pub const MEDIA_SRC: &str = "media-src";
pub const OBJECT_SRC: &str = "object-src";
pub const PLUGIN_TYPES: &str = "plugin-types";
pub const REPORT_URI: &str = "report-uri";
pub const SANDBOX: &str = "sandbox";
pub const SCRIPT_SRC: &str = "script-src";
pub const STYLE_SRC: &str = "style-src";

/// Restriction lifted by a `sandbox` directive value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SandboxFlag {
    AllowForms,
    AllowPointerLock,
    AllowPopups,
    AllowSameOrigin,
    AllowScripts,
    AllowTopNavigation,
}

impl SandboxFlag {
    pub const ALL: [SandboxFlag; 6] = [
        Self::AllowForms,
        Self::AllowPointerLock,
        Self::AllowPopups,
        Self::AllowSameOrigin,
        Self::AllowScripts,
        Self::AllowTopNavigation,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllowForms => "allow-forms",
            Self::AllowPointerLock => "allow-pointer-lock",
            Self::AllowPopups => "allow-popups",
            Self::AllowSameOrigin => "allow-same-origin",
            Self::AllowScripts => "allow-scripts",
            Self::AllowTopNavigation => "allow-top-navigation",
        }
    }
}

impl fmt::Display for SandboxFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

macro_rules! source_list_directives {
    ($($(#[$doc:meta])* $fn_name:ident => $name:ident),* $(,)?) => {
        $(
            $(#[$doc])*
            pub fn $fn_name() -> Self {
                Self::new($name, DirectiveKind::SourceList)
            }
        )*
    };
}

impl Directive {
    source_list_directives! {
        /// `base-uri`: URLs usable in the document's `<base>` element
        base_uri => BASE_URI,
        /// `child-src`: nested browsing contexts and workers
        child_src => CHILD_SRC,
        /// `connect-src`: fetch, XHR, WebSocket and EventSource targets
        connect_src => CONNECT_SRC,
        /// `default-src`: fallback for the other fetch directives
        default_src => DEFAULT_SRC,
        font_src => FONT_SRC,
        /// `form-action`: form submission targets
        form_action => FORM_ACTION,
        /// `frame-src`, deprecated in CSP2 in favor of `child-src`
        frame_src => FRAME_SRC,
        img_src => IMG_SRC,
        media_src => MEDIA_SRC,
        object_src => OBJECT_SRC,
    }

    /// `script-src`; accepts unsafe keywords, nonces and hashes
    pub fn script_src() -> Self {
        Self::new(SCRIPT_SRC, DirectiveKind::Inline(InlineSources::default()))
    }

    /// `style-src`; accepts unsafe keywords, nonces and hashes
    pub fn style_src() -> Self {
        Self::new(STYLE_SRC, DirectiveKind::Inline(InlineSources::default()))
    }

    /// `sandbox`: see [`SandboxFlag`] for the recognized values
    pub fn sandbox() -> Self {
        Self::new(SANDBOX, DirectiveKind::Keyword(KeywordRule::Sandbox))
    }

    /// `plugin-types`: values are `type/subtype` media types
    pub fn plugin_types() -> Self {
        Self::new(PLUGIN_TYPES, DirectiveKind::Keyword(KeywordRule::PluginTypes))
    }

    /// `report-uri`: values are absolute URIs
    pub fn report_uri() -> Self {
        Self::new(REPORT_URI, DirectiveKind::Keyword(KeywordRule::ReportUri))
    }

    /// `frame-ancestors`: values are `'self'`, `'none'`, host-sources or
    /// scheme-sources
    pub fn frame_ancestors() -> Self {
        Self::new(FRAME_ANCESTORS, DirectiveKind::Keyword(KeywordRule::FrameAncestors))
    }

    /// A directive outside the registered set, e.g.
    /// `upgrade-insecure-requests`. Values are only checked against the
    /// character blacklist.
    pub fn experimental(name: impl Into<String>) -> Self {
        Self::new(name, DirectiveKind::Keyword(KeywordRule::Experimental))
    }

    /// Look up a registered directive by its token.
    pub fn from_name(name: &str) -> Option<Self> {
        let directive = match name.trim().to_ascii_lowercase().as_str() {
            BASE_URI => Self::base_uri(),
            CHILD_SRC => Self::child_src(),
            CONNECT_SRC => Self::connect_src(),
            DEFAULT_SRC => Self::default_src(),
            FONT_SRC => Self::font_src(),
            FORM_ACTION => Self::form_action(),
            FRAME_ANCESTORS => Self::frame_ancestors(),
            FRAME_SRC => Self::frame_src(),
            IMG_SRC => Self::img_src(),
            MEDIA_SRC => Self::media_src(),
            OBJECT_SRC => Self::object_src(),
            PLUGIN_TYPES => Self::plugin_types(),
            REPORT_URI => Self::report_uri(),
            SANDBOX => Self::sandbox(),
            SCRIPT_SRC => Self::script_src(),
            STYLE_SRC => Self::style_src(),
            _ => return None,
        };
        Some(directive)
    }

    /// Append a value
    pub fn source(mut self, value: impl AsRef<str>) -> Self {
        self.add_value(value);
        self
    }

    /// Append an experimental value
    pub fn experimental_source(mut self, value: impl AsRef<str>) -> Self {
        self.add_experimental_value(value);
        self
    }

    pub fn allow_self(self) -> Self {
        self.source(SRC_KEY_SELF)
    }

    pub fn allow_none(self) -> Self {
        self.source(SRC_KEY_NONE)
    }

    pub fn allow_any(self) -> Self {
        self.source(SRC_WILDCARD)
    }

    pub fn allow_unsafe_inline(self) -> Self {
        self.source(SRC_UNSAFE_INLINE)
    }

    pub fn allow_unsafe_eval(self) -> Self {
        self.source(SRC_UNSAFE_EVAL)
    }

    pub fn sandbox_flag(self, flag: SandboxFlag) -> Self {
        self.source(flag.as_str())
    }

    pub fn nonce(mut self, nonce: impl AsRef<str>) -> Self {
        self.add_nonce(nonce);
        self
    }

    pub fn hash(mut self, algorithm: impl AsRef<str>, digest: impl AsRef<str>) -> Self {
        self.add_hash(algorithm, digest);
        self
    }

    /// Append the hash source of an inline script or style body
    pub fn hash_of(mut self, algorithm: HashAlgorithm, content: impl AsRef<[u8]>) -> Self {
        self.add_hash_of(algorithm, content);
        self
    }
}
