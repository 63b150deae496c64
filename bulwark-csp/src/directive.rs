//! Directive model
//!
//! Every directive shares one storage record (name, values, experimental
//! values) and one validation entry point that dispatches on the directive
//! kind:
//!
//! - [`DirectiveKind::Keyword`] directives carry bespoke rules
//!   (sandbox, plugin-types, report-uri, frame-ancestors, experimental).
//! - [`DirectiveKind::SourceList`] directives validate every value against the
//!   source-list grammar.
//! - [`DirectiveKind::Inline`] directives (script-src, style-src) additionally
//!   accept the unsafe keywords and carry nonce and hash sources.

use crate::report::ValidationReport;
use crate::source::{
    ILLEGAL_SRC_CHARS, SRC_KEY_NONE, SRC_WILDCARD, has_valid_characters, is_base64,
    is_valid_host_source, is_valid_scheme_source, is_valid_src_keyword, is_valid_unsafe_keyword,
};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha384, Sha512};
use std::collections::HashSet;
use std::fmt;

const QUOTE: char = '\'';
const NONCE_PREFIX: &str = "'nonce-";

/// Hash algorithms accepted in hash sources.
pub const ALLOWED_HASH_ALGORITHMS: [&str; 3] = ["sha256", "sha384", "sha512"];

/// Digest used to build a hash source from inline content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    Sha256,
    Sha384,
    Sha512,
}

impl HashAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// Base64-encoded digest of `content`.
    pub fn digest_base64(&self, content: &[u8]) -> String {
        match self {
            Self::Sha256 => STANDARD.encode(Sha256::digest(content)),
            Self::Sha384 => STANDARD.encode(Sha384::digest(content)),
            Self::Sha512 => STANDARD.encode(Sha512::digest(content)),
        }
    }
}

/// Validation rule of a keyword-only directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordRule {
    /// Any value is accepted.
    Sandbox,
    /// Every value must be a `type/subtype` media type.
    PluginTypes,
    /// Every value must be an absolute URI.
    ReportUri,
    /// Every value must be `'self'`, `'none'`, a host-source or a scheme-source.
    FrameAncestors,
    /// Caller-named directive outside the registered set; only the character
    /// blacklist applies.
    Experimental,
}

/// Nonce and hash sources of an inline-capable directive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InlineSources {
    nonces: Vec<String>,
    hashes: Vec<String>,
}

/// Behavioral variant of a directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveKind {
    Keyword(KeywordRule),
    SourceList,
    Inline(InlineSources),
}

/// One named rule of a Content-Security-Policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    name: String,
    values: Vec<String>,
    experimental_values: Vec<String>,
    kind: DirectiveKind,
}

impl Directive {
    /// Create an empty directive of the given kind.
    ///
    /// Registered directives are normally obtained from the named
    /// constructors such as [`Directive::script_src`].
    pub fn new(name: impl Into<String>, kind: DirectiveKind) -> Self {
        Self {
            name: name.into(),
            values: Vec::new(),
            experimental_values: Vec::new(),
            kind,
        }
    }

    /// The registered directive token, e.g. `script-src`
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &DirectiveKind {
        &self.kind
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn experimental_values(&self) -> &[String] {
        &self.experimental_values
    }

    /// Plain values followed by experimental values
    pub fn all_values(&self) -> Vec<&str> {
        self.values
            .iter()
            .chain(&self.experimental_values)
            .map(String::as_str)
            .collect()
    }

    /// Formatted `'nonce-…'` tokens; always empty for directives that are not
    /// inline-capable
    pub fn nonces(&self) -> &[String] {
        match &self.kind {
            DirectiveKind::Inline(inline) => &inline.nonces,
            _ => &[],
        }
    }

    /// Formatted `'<algorithm>-…'` tokens; always empty for directives that
    /// are not inline-capable
    pub fn hashes(&self) -> &[String] {
        match &self.kind {
            DirectiveKind::Inline(inline) => &inline.hashes,
            _ => &[],
        }
    }

    pub fn is_inline_capable(&self) -> bool {
        matches!(self.kind, DirectiveKind::Inline(_))
    }

    /// Append a value. Blank values are dropped silently.
    pub fn add_value(&mut self, value: impl AsRef<str>) -> &mut Self {
        push_non_blank(&mut self.values, value.as_ref());
        self
    }

    /// Append a value that is outside the formal grammar. Only the character
    /// blacklist is checked during validation. Blank values are dropped
    /// silently.
    pub fn add_experimental_value(&mut self, value: impl AsRef<str>) -> &mut Self {
        push_non_blank(&mut self.experimental_values, value.as_ref());
        self
    }

    /// Append `'nonce-<nonce>'`.
    ///
    /// Ignored, with a warning event, on directives that are not
    /// inline-capable.
    pub fn add_nonce(&mut self, nonce: impl AsRef<str>) -> &mut Self {
        let nonce = nonce.as_ref().trim();
        if nonce.is_empty() {
            return self;
        }
        match self.inline_mut() {
            Some(inline) => inline.nonces.push(format!("{NONCE_PREFIX}{nonce}{QUOTE}")),
            None => self.warn_not_inline("nonce"),
        }
        self
    }

    /// Append `'<algorithm>-<base64>'`. The algorithm is not checked here;
    /// validation reports unsupported algorithms.
    ///
    /// Ignored, with a warning event, on directives that are not
    /// inline-capable.
    pub fn add_hash(&mut self, algorithm: impl AsRef<str>, digest: impl AsRef<str>) -> &mut Self {
        let (algorithm, digest) = (algorithm.as_ref().trim(), digest.as_ref().trim());
        if algorithm.is_empty() || digest.is_empty() {
            return self;
        }
        match self.inline_mut() {
            Some(inline) => inline
                .hashes
                .push(format!("{QUOTE}{algorithm}-{digest}{QUOTE}")),
            None => self.warn_not_inline("hash"),
        }
        self
    }

    /// Hash `content` and append the resulting hash source.
    pub fn add_hash_of(&mut self, algorithm: HashAlgorithm, content: impl AsRef<[u8]>) -> &mut Self {
        let digest = algorithm.digest_base64(content.as_ref());
        self.add_hash(algorithm.as_str(), digest)
    }

    pub fn reset_nonces(&mut self) -> &mut Self {
        if let Some(inline) = self.inline_mut() {
            inline.nonces.clear();
        }
        self
    }

    pub fn reset_hashes(&mut self) -> &mut Self {
        if let Some(inline) = self.inline_mut() {
            inline.hashes.clear();
        }
        self
    }

    /// Drop repeated plain values, keeping the first occurrence of each.
    pub fn remove_internal_duplicates(&mut self) -> &mut Self {
        let mut seen = HashSet::new();
        self.values.retain(|value| seen.insert(value.clone()));
        self
    }

    /// True when the directive has neither plain nor experimental values.
    /// Nonces and hashes alone do not make a directive emittable.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.experimental_values.is_empty()
    }

    /// Serialize as `<name> <values…> <experimental…> <nonces…> <hashes…>`,
    /// or an empty string when [`is_empty`](Self::is_empty) holds.
    pub fn build(&self) -> String {
        if self.is_empty() {
            return String::new();
        }
        std::iter::once(self.name.as_str())
            .chain(self.all_values())
            .chain(self.nonces().iter().map(String::as_str))
            .chain(self.hashes().iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Validate every token, recording findings in `report`.
    pub fn validate_and_report(&self, report: &mut ValidationReport) {
        match &self.kind {
            DirectiveKind::Keyword(rule) => self.validate_keyword_rule(*rule, report),
            DirectiveKind::SourceList => self.validate_source_list(false, report),
            DirectiveKind::Inline(inline) => {
                self.validate_source_list(true, report);
                inline.validate_hashes(&self.name, report);
                inline.validate_nonces(&self.name, report);
            }
        }
    }

    fn validate_source_list(&self, allow_unsafe: bool, report: &mut ValidationReport) {
        if self.values.len() > 1 {
            if self.contains_value(SRC_KEY_NONE) {
                report.add_warning(&self.name, "'none' should not combine with other values");
            }
            if self.contains_value(SRC_WILDCARD) {
                report.add_warning(&self.name, "wildcard * should not combine with other values");
            }
        }
        for value in &self.values {
            self.validate_source_list_value(value, allow_unsafe, report);
        }
        self.validate_experimental_values(report);
    }

    /// Check one value against the source-list grammar.
    fn validate_source_list_value(
        &self,
        raw: &str,
        allow_unsafe: bool,
        report: &mut ValidationReport,
    ) {
        let value = raw.trim().to_lowercase();
        if !self.check_characters(raw, &value, report) {
            return;
        }
        let keyword =
            is_valid_src_keyword(&value) || (allow_unsafe && is_valid_unsafe_keyword(&value));
        if !keyword && !is_valid_scheme_source(&value) && !is_valid_host_source(&value) {
            report.add_error(
                &self.name,
                format_args!("Source value {raw} could not be validated"),
            );
        }
    }

    fn validate_keyword_rule(&self, rule: KeywordRule, report: &mut ValidationReport) {
        match rule {
            KeywordRule::Sandbox => {}
            KeywordRule::PluginTypes => {
                for value in &self.values {
                    if !is_media_type(value) {
                        report.add_error(
                            &self.name,
                            format_args!(
                                "Media type: {value} is not valid. It must contain a value, a slash, and another value"
                            ),
                        );
                    }
                }
            }
            KeywordRule::ReportUri => {
                for value in &self.values {
                    if url::Url::parse(value.trim()).is_err() {
                        report.add_error(
                            &self.name,
                            format_args!("Value {value} could not be parsed into a URI"),
                        );
                    }
                }
            }
            KeywordRule::FrameAncestors => {
                for raw in &self.values {
                    let value = raw.trim().to_lowercase();
                    if !self.check_characters(raw, &value, report) {
                        continue;
                    }
                    if !is_valid_src_keyword(&value)
                        && !is_valid_host_source(&value)
                        && !is_valid_scheme_source(&value)
                    {
                        report.add_error(
                            &self.name,
                            format_args!(
                                "Ancestor source {raw} is not one of host-source, scheme-source, 'self', or 'none'"
                            ),
                        );
                    }
                }
            }
            KeywordRule::Experimental => {
                for raw in &self.values {
                    self.check_characters(raw, raw.trim(), report);
                }
            }
        }
        self.validate_experimental_values(report);
    }

    fn validate_experimental_values(&self, report: &mut ValidationReport) {
        for raw in &self.experimental_values {
            self.check_characters(raw, raw.trim(), report);
        }
    }

    fn check_characters(&self, raw: &str, normalized: &str, report: &mut ValidationReport) -> bool {
        let valid = has_valid_characters(normalized);
        if !valid {
            report.add_error(
                &self.name,
                format_args!(
                    "Source value {raw} contains an illegal character: {:?}",
                    ILLEGAL_SRC_CHARS
                ),
            );
        }
        valid
    }

    fn contains_value(&self, needle: &str) -> bool {
        self.values
            .iter()
            .any(|value| value.trim().eq_ignore_ascii_case(needle))
    }

    fn inline_mut(&mut self) -> Option<&mut InlineSources> {
        match &mut self.kind {
            DirectiveKind::Inline(inline) => Some(inline),
            _ => None,
        }
    }

    fn warn_not_inline(&self, source: &str) {
        tracing::warn!(
            directive = %self.name,
            "Ignoring {} source on a directive that does not accept inline sources",
            source
        );
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}

impl InlineSources {
    fn validate_hashes(&self, directive: &str, report: &mut ValidationReport) {
        for hash in &self.hashes {
            let allowed = hash.strip_prefix(QUOTE).is_some_and(|rest| {
                ALLOWED_HASH_ALGORITHMS
                    .iter()
                    .any(|algorithm| rest.starts_with(algorithm))
            });
            if !allowed {
                report.add_error(directive, format_args!("Hash algorithm {hash} not allowed"));
            }
            match token_body(hash) {
                None => report.add_error(
                    directive,
                    format_args!("Hash: {hash} does not have a valid value"),
                ),
                Some(body) if !is_base64(body) => report.add_error(
                    directive,
                    format_args!("Hash: {hash} is not base-64 encoded"),
                ),
                Some(_) => {}
            }
        }
    }

    fn validate_nonces(&self, directive: &str, report: &mut ValidationReport) {
        for nonce in &self.nonces {
            let body = nonce
                .starts_with(NONCE_PREFIX)
                .then(|| token_body(nonce))
                .flatten();
            match body {
                None => report.add_error(
                    directive,
                    format_args!("Nonce: {nonce} does not have a valid value"),
                ),
                Some(body) if !is_base64(body) => report.add_error(
                    directive,
                    format_args!("Nonce: {nonce} is not base-64 encoded"),
                ),
                Some(_) => {}
            }
        }
    }
}

// The text between the first hyphen and the closing quote.
fn token_body(token: &str) -> Option<&str> {
    let dash = token.find('-')?;
    let quote = token.rfind(QUOTE)?;
    (quote > dash).then(|| &token[dash + 1..quote])
}

fn is_media_type(value: &str) -> bool {
    let mut parts = value.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(kind), Some(subtype), None) => {
            !kind.trim().is_empty() && !subtype.trim().is_empty()
        }
        _ => false,
    }
}

fn push_non_blank(values: &mut Vec<String>, value: &str) {
    let value = value.trim();
    if !value.is_empty() {
        values.push(value.to_string());
    }
}
