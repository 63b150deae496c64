//! Declarative policy configuration
//!
//! Policies can be described in JSON or TOML and turned into a
//! [`ContentSecurityPolicy`]:
//!
//! ```toml
//! level = "CSP2"
//! reduce = true
//!
//! [[directives]]
//! name = "script-src"
//! values = ["'self'", "https://cdn.example.com"]
//! nonces = ["QUJDRA=="]
//!
//! [[directives]]
//! name = "upgrade-insecure-requests"
//! ```
//!
//! Names outside the registered set become experimental directives.

use crate::directive::Directive;
use crate::error::{CspError, Result};
use crate::level::PolicyLevel;
use crate::policy::ContentSecurityPolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Policy description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub level: PolicyLevel,
    /// Reduce the policy after it is assembled
    pub reduce: bool,
    pub directives: Vec<DirectiveConfig>,
}

/// One directive entry of a [`PolicyConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectiveConfig {
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
    #[serde(default)]
    pub experimental: Vec<String>,
    /// Bare nonce values, without the `'nonce-` wrapper
    #[serde(default)]
    pub nonces: Vec<String>,
    #[serde(default)]
    pub hashes: Vec<HashConfig>,
}

/// A precomputed hash source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashConfig {
    pub algorithm: String,
    pub digest: String,
}

impl PolicyConfig {
    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load from a `.json` or `.toml` file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        let content = match extension.as_str() {
            "json" | "toml" => fs::read_to_string(path)?,
            _ => return Err(CspError::UnsupportedFormat(path.display().to_string())),
        };

        tracing::debug!(path = %path.display(), "Loading policy configuration");
        if extension == "json" {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Assemble the described policy.
    ///
    /// Fails when a directive that does not accept inline sources is given
    /// nonces or hashes.
    pub fn into_policy(self) -> Result<ContentSecurityPolicy> {
        let mut policy = ContentSecurityPolicy::with_level(self.level);
        for entry in self.directives {
            policy.add_directive(entry.into_directive()?);
        }
        if self.reduce {
            policy.reduce();
        }
        Ok(policy)
    }
}

impl DirectiveConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn into_directive(self) -> Result<Directive> {
        if self.name.trim().is_empty() {
            return Err(CspError::BlankDirectiveName);
        }
        let mut directive = Directive::from_name(&self.name).unwrap_or_else(|| {
            tracing::debug!(directive = %self.name, "Unregistered directive treated as experimental");
            Directive::experimental(self.name.trim())
        });

        let has_inline = !self.nonces.is_empty() || !self.hashes.is_empty();
        if has_inline && !directive.is_inline_capable() {
            return Err(CspError::InlineSourcesUnsupported {
                directive: directive.name().to_string(),
            });
        }

        for value in &self.values {
            directive.add_value(value);
        }
        for value in &self.experimental {
            directive.add_experimental_value(value);
        }
        for nonce in &self.nonces {
            directive.add_nonce(nonce);
        }
        for hash in &self.hashes {
            directive.add_hash(&hash.algorithm, &hash.digest);
        }
        Ok(directive)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const TOML_POLICY: &str = r#"
        level = "CSP1"
        reduce = true

        [[directives]]
        name = "default-src"
        values = ["'self'", "'self'", "https://example.com"]

        [[directives]]
        name = "script-src"
        values = ["'self'"]
        nonces = ["QUJDRA=="]
        hashes = [{ algorithm = "sha256", digest = "QUJD" }]

        [[directives]]
        name = "img-src"
    "#;

    #[test]
    fn test_toml_policy() {
        let policy = PolicyConfig::from_toml_str(TOML_POLICY)
            .unwrap()
            .into_policy()
            .unwrap();

        assert_eq!(policy.level(), PolicyLevel::Csp1);
        assert_eq!(
            policy.build(),
            "default-src 'self' https://example.com; script-src 'self' 'nonce-QUJDRA==' 'sha256-QUJD'"
        );
    }

    #[test]
    fn test_json_policy_defaults() {
        let config = PolicyConfig::from_json_str(
            r#"{"directives": [{"name": "object-src", "values": ["'none'"]}]}"#,
        )
        .unwrap();

        assert_eq!(config.level, PolicyLevel::Csp2);
        assert!(!config.reduce);
        assert_eq!(config.into_policy().unwrap().build(), "object-src 'none'");
    }

    #[test]
    fn test_unknown_name_is_experimental() {
        let mut entry = DirectiveConfig::new("upgrade-insecure-requests");
        entry.experimental.push("x".to_string());
        let directive = entry.into_directive().unwrap();

        assert_eq!(directive.name(), "upgrade-insecure-requests");
        assert_eq!(directive.build(), "upgrade-insecure-requests x");
    }

    #[test]
    fn test_inline_sources_rejected_on_plain_directive() {
        let mut entry = DirectiveConfig::new("img-src");
        entry.nonces.push("QUJD".to_string());

        match entry.into_directive() {
            Err(CspError::InlineSourcesUnsupported { directive }) => {
                assert_eq!(directive, "img-src")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut entry = DirectiveConfig::new("   ");
        entry.values.push("'self'".to_string());
        assert!(matches!(
            entry.into_directive(),
            Err(CspError::BlankDirectiveName)
        ));

        let result = PolicyConfig::from_json_str(
            r#"{"directives": [
                {"name": "default-src", "values": ["'self'"]},
                {"name": "   ", "values": ["'self'"]}
            ]}"#,
        )
        .unwrap()
        .into_policy();
        assert!(matches!(result, Err(CspError::BlankDirectiveName)));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            PolicyConfig::from_json_str("{not json"),
            Err(CspError::Json(_))
        ));
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            PolicyConfig::from_toml_str("level = = 1"),
            Err(CspError::Toml(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let path = std::env::temp_dir().join(format!("bulwark-csp-{}.toml", std::process::id()));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(TOML_POLICY.as_bytes()).unwrap();
        drop(file);

        let config = PolicyConfig::from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.directives.len(), 3);
    }

    #[test]
    fn test_from_file_unsupported_extension() {
        assert!(matches!(
            PolicyConfig::from_file("policy.yaml"),
            Err(CspError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = PolicyConfig::from_toml_str(TOML_POLICY).unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(PolicyConfig::from_json_str(&json).unwrap(), config);
    }
}
