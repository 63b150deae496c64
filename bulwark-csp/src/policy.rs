//! Content-Security-Policy composition
//!
//! A [`ContentSecurityPolicy`] is an insertion-ordered set of directives keyed
//! by name, validated against a [`PolicyLevel`]. Typical use:
//!
//! 1. add directives,
//! 2. optionally [`reduce`](ContentSecurityPolicy::reduce),
//! 3. [`reset_validation_report`](ContentSecurityPolicy::reset_validation_report)
//!    then [`is_valid`](ContentSecurityPolicy::is_valid),
//! 4. [`build`](ContentSecurityPolicy::build) the header value.

use crate::directive::Directive;
use crate::level::PolicyLevel;
use crate::report::ValidationReport;
use std::fmt;

const DIRECTIVE_SEPARATOR: &str = "; ";

/// Content-Security-Policy builder and validator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentSecurityPolicy {
    directives: Vec<Directive>,
    level: PolicyLevel,
    report: ValidationReport,
}

impl ContentSecurityPolicy {
    /// Create an empty CSP2 policy.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(level: PolicyLevel) -> Self {
        Self {
            level,
            ..Self::default()
        }
    }

    /// Add a directive, replacing any directive with the same name.
    pub fn directive(mut self, directive: Directive) -> Self {
        self.add_directive(directive);
        self
    }

    /// Add a directive, replacing any directive with the same name. The
    /// replacement keeps the position of the directive it replaces.
    ///
    /// A directive with a blank name is ignored.
    pub fn add_directive(&mut self, directive: Directive) -> &mut Self {
        if directive.name().trim().is_empty() {
            tracing::warn!("Ignoring directive without a name");
            return self;
        }
        match self.position(directive.name()) {
            Some(index) => self.directives[index] = directive,
            None => self.directives.push(directive),
        }
        self
    }

    pub fn get_directive(&self, name: &str) -> Option<&Directive> {
        self.directives.iter().find(|d| d.name() == name)
    }

    pub fn get_directive_mut(&mut self, name: &str) -> Option<&mut Directive> {
        self.directives.iter_mut().find(|d| d.name() == name)
    }

    /// Remove and return the directive registered under `name`.
    pub fn remove_directive(&mut self, name: &str) -> Option<Directive> {
        let index = self.position(name)?;
        Some(self.directives.remove(index))
    }

    /// Directives in insertion order
    pub fn directives(&self) -> &[Directive] {
        &self.directives
    }

    pub fn level(&self) -> PolicyLevel {
        self.level
    }

    /// Deduplicate every directive, then drop the ones with neither plain
    /// nor experimental values.
    pub fn reduce(&mut self) -> &mut Self {
        for directive in &mut self.directives {
            directive.remove_internal_duplicates();
        }
        self.directives.retain(|directive| {
            let keep = !directive.is_empty();
            if !keep {
                tracing::debug!(directive = %directive.name(), "Dropping empty directive");
            }
            keep
        });
        self
    }

    /// Clear accumulated errors and warnings.
    pub fn reset_validation_report(&mut self) {
        self.report.reset();
    }

    /// Validate every directive and check it against the policy level.
    ///
    /// Findings are appended to the report, which is not cleared first.
    /// Returns `true` when the report holds no error.
    pub fn is_valid(&mut self) -> bool {
        let level = self.level;
        for directive in &self.directives {
            directive.validate_and_report(&mut self.report);

            let name = directive.name();
            if !level.is_defined(name) {
                self.report
                    .add_warning(name, format_args!("{level} does not define directive {name}"));
            }
            if level.is_deprecated(name) {
                self.report
                    .add_warning(name, format_args!("{level} has deprecated directive {name}"));
            }
        }

        tracing::debug!(
            level = %level,
            errors = self.report.errors().len(),
            warnings = self.report.warnings().len(),
            "Validated content security policy"
        );
        self.report.is_errors_empty()
    }

    pub fn validation_errors(&self) -> &[String] {
        self.report.errors()
    }

    pub fn validation_warnings(&self) -> &[String] {
        self.report.warnings()
    }

    pub fn report(&self) -> &ValidationReport {
        &self.report
    }

    /// Serialize as a header value: non-empty directives joined by `"; "`.
    pub fn build(&self) -> String {
        self.directives
            .iter()
            .map(Directive::build)
            .filter(|built| !built.is_empty())
            .collect::<Vec<_>>()
            .join(DIRECTIVE_SEPARATOR)
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.directives.iter().position(|d| d.name() == name)
    }
}

impl fmt::Display for ContentSecurityPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}
