//! Source-list grammar
//!
//! Predicates recognizing the CSP source-list sub-grammars: keywords,
//! scheme-sources, host-sources and base64 payloads. Every predicate expects
//! input that has already been trimmed and lower-cased; directives take care
//! of that before calling in.

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::{Component, Path};

/// Wildcard source.
pub const SRC_WILDCARD: &str = "*";
/// The `'none'` source keyword.
pub const SRC_KEY_NONE: &str = "'none'";
/// The `'self'` source keyword.
pub const SRC_KEY_SELF: &str = "'self'";
/// The `'unsafe-inline'` keyword accepted by script-src and style-src.
pub const SRC_UNSAFE_INLINE: &str = "'unsafe-inline'";
/// The `'unsafe-eval'` keyword accepted by script-src and style-src.
pub const SRC_UNSAFE_EVAL: &str = "'unsafe-eval'";

/// Characters that may never appear inside a single directive value.
pub const ILLEGAL_SRC_CHARS: [char; 3] = [' ', ';', ','];

const PORT_MAX: u32 = 65535;

// one letter, then letters, digits, '+', '-' or '.'
const SCHEME_PART: &str = r"[a-zA-Z][a-zA-Z0-9+\-.]*";

// bare '*', or an optional '*.' followed by dot-separated labels
const HOST_PART: &str = r"\*|(?:\*\.)?[A-Za-z0-9\-](?:\.?[A-Za-z0-9\-])*";

const PORT_PART: &str = r"[0-9]+|\*";

const PATH_PART: &str = r"/[-A-Za-z0-9_:@&?=+,.!/~*'%$;()]*";

static HOST_SOURCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"^(?:{SCHEME_PART}://)?(?:{HOST_PART})(?::(?P<port>{PORT_PART}))?(?P<path>{PATH_PART})?$"
    ))
    .unwrap()
});

static SCHEME_SOURCE: Lazy<Regex> =
    Lazy::new(|| Regex::new(&format!(r"^{SCHEME_PART}:$")).unwrap());

static BASE64: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9+/]{4})*(?:[A-Za-z0-9+/]{4}|[A-Za-z0-9+/]{3}=|[A-Za-z0-9+/]{2}==)$")
        .unwrap()
});

/// False if the value is empty or contains a space, semicolon or comma.
pub fn has_valid_characters(value: &str) -> bool {
    !value.is_empty() && !value.contains(ILLEGAL_SRC_CHARS)
}

/// `'self'` or `'none'`.
pub fn is_valid_src_keyword(value: &str) -> bool {
    value == SRC_KEY_SELF || value == SRC_KEY_NONE
}

/// `'unsafe-inline'` or `'unsafe-eval'`.
pub fn is_valid_unsafe_keyword(value: &str) -> bool {
    value == SRC_UNSAFE_INLINE || value == SRC_UNSAFE_EVAL
}

/// A scheme followed by a single colon, e.g. `https:` or `data:`.
pub fn is_valid_scheme_source(value: &str) -> bool {
    SCHEME_SOURCE.is_match(value)
}

/// An optional `scheme://`, a host, an optional port and an optional path.
///
/// A numeric port must fit in `0..=65535`; `*` is accepted as a wildcard
/// port.
pub fn is_valid_host_source(value: &str) -> bool {
    let Some(captures) = HOST_SOURCE.captures(value) else {
        return false;
    };

    if let Some(port) = captures.name("port") {
        let port = port.as_str();
        if port != SRC_WILDCARD {
            match port.parse::<u32>() {
                Ok(port) if port <= PORT_MAX => {}
                _ => return false,
            }
        }
    }

    match captures.name("path") {
        Some(path) => is_decomposable_path(path.as_str()),
        None => true,
    }
}

/// Padded base64 in the standard alphabet.
pub fn is_base64(value: &str) -> bool {
    BASE64.is_match(value)
}

// Syntactic well-formedness only: the path must split into a root followed by
// plain segments.
fn is_decomposable_path(path: &str) -> bool {
    if path.contains('\0') {
        return false;
    }
    let mut components = Path::new(path).components();
    matches!(components.next(), Some(Component::RootDir))
        && components.all(|c| {
            matches!(
                c,
                Component::Normal(_) | Component::CurDir | Component::ParentDir
            )
        })
}
