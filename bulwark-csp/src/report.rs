//! Validation report
//!
//! Errors mark a directive that will not work as written (an unparseable
//! source, a malformed hash). Warnings mark something suspicious that still
//! produces the intended policy, such as a directive unknown to the
//! configured policy level.

use serde::Serialize;
use std::fmt;

/// Accumulates directive-tagged validation errors and warnings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationReport {
    /// Create an empty report
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an error produced by `directive`
    pub fn add_error(&mut self, directive: &str, message: impl fmt::Display) {
        self.errors
            .push(format!("{directive} reports a validation error: {message}"));
    }

    /// Register a warning produced by `directive`
    pub fn add_warning(&mut self, directive: &str, message: impl fmt::Display) {
        self.warnings
            .push(format!("{directive} reports a validation warning: {message}"));
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn is_errors_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_warnings_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Clear both errors and warnings so validation can run again
    pub fn reset(&mut self) {
        self.errors.clear();
        self.warnings.clear();
    }

    /// Convert to JSON representation
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "errors": self.errors,
            "warnings": self.warnings,
        })
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            writeln!(f, "{}", error)?;
        }
        for warning in &self.warnings {
            writeln!(f, "{}", warning)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_errors() {
        let mut report = ValidationReport::new();
        report.add_error("default-src", "Error Report");

        assert!(!report.is_errors_empty());
        assert!(report.is_warnings_empty());
        assert_eq!(
            report.errors()[0],
            "default-src reports a validation error: Error Report"
        );
    }

    #[test]
    fn test_report_warnings() {
        let mut report = ValidationReport::new();
        report.add_warning("default-src", "Warning Report");

        assert!(!report.is_warnings_empty());
        assert!(report.is_errors_empty());
        assert!(report.warnings()[0].contains("Warning Report"));
        assert!(report.warnings()[0].starts_with("default-src"));
    }

    #[test]
    fn test_report_reset() {
        let mut report = ValidationReport::new();
        report.add_warning("img-src", "first");
        report.add_error("img-src", "second");
        report.reset();

        assert!(report.is_warnings_empty());
        assert!(report.is_errors_empty());
    }

    #[test]
    fn test_report_preserves_order() {
        let mut report = ValidationReport::new();
        report.add_error("a", "one");
        report.add_error("b", "two");

        assert!(report.errors()[0].starts_with("a "));
        assert!(report.errors()[1].starts_with("b "));

        let json = report.to_json();
        assert_eq!(json["errors"].as_array().map(Vec::len), Some(2));
        assert_eq!(json["warnings"].as_array().map(Vec::len), Some(0));
    }
}
