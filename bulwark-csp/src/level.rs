//! CSP specification levels
//!
//! Each level lists the directive names it defines and the ones it considers
//! deprecated. The table is consulted when a policy is validated.

use crate::directives::{
    BASE_URI, CHILD_SRC, CONNECT_SRC, DEFAULT_SRC, FONT_SRC, FORM_ACTION, FRAME_ANCESTORS,
    FRAME_SRC, IMG_SRC, MEDIA_SRC, OBJECT_SRC, PLUGIN_TYPES, REPORT_URI, SANDBOX, SCRIPT_SRC,
    STYLE_SRC,
};
use serde::{Deserialize, Serialize};
use std::fmt;

const CSP1_DEFINED: &[&str] = &[
    CONNECT_SRC,
    DEFAULT_SRC,
    FONT_SRC,
    FRAME_SRC,
    IMG_SRC,
    MEDIA_SRC,
    OBJECT_SRC,
    REPORT_URI,
    SANDBOX,
    SCRIPT_SRC,
    STYLE_SRC,
];

const CSP2_DEFINED: &[&str] = &[
    BASE_URI,
    CHILD_SRC,
    CONNECT_SRC,
    DEFAULT_SRC,
    FONT_SRC,
    FORM_ACTION,
    FRAME_ANCESTORS,
    FRAME_SRC,
    IMG_SRC,
    MEDIA_SRC,
    OBJECT_SRC,
    PLUGIN_TYPES,
    REPORT_URI,
    SANDBOX,
    SCRIPT_SRC,
    STYLE_SRC,
];

// frame-src is superseded by child-src and frame-ancestors
const CSP2_DEPRECATED: &[&str] = &[FRAME_SRC];

/// The CSP specification version a policy is validated against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PolicyLevel {
    /// Content Security Policy 1.0
    Csp1,
    /// Content Security Policy Level 2
    #[default]
    Csp2,
}

impl PolicyLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csp1 => "CSP1",
            Self::Csp2 => "CSP2",
        }
    }

    /// Directive names recognized at this level
    pub fn defined(&self) -> &'static [&'static str] {
        match self {
            Self::Csp1 => CSP1_DEFINED,
            Self::Csp2 => CSP2_DEFINED,
        }
    }

    /// Directive names recognized but obsolete at this level
    pub fn deprecated(&self) -> &'static [&'static str] {
        match self {
            Self::Csp1 => &[],
            Self::Csp2 => CSP2_DEPRECATED,
        }
    }

    pub fn is_defined(&self, directive: &str) -> bool {
        self.defined().iter().any(|name| *name == directive)
    }

    pub fn is_deprecated(&self, directive: &str) -> bool {
        self.deprecated().iter().any(|name| *name == directive)
    }
}

impl fmt::Display for PolicyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
