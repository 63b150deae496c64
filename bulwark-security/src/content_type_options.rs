//! X-Content-Type-Options
//!
//! Prevents browsers from MIME-sniffing away from declared content type.

use crate::error::Result;
use crate::header::SecurityHeader;
use serde::{Deserialize, Serialize};

pub const HEADER_NAME: &str = "X-Content-Type-Options";

/// Content Type Options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentTypeOptions {
    /// Prevent MIME sniffing
    #[default]
    NoSniff,
}

impl ContentTypeOptions {
    pub fn to_header_value(&self) -> String {
        match self {
            Self::NoSniff => "nosniff".to_string(),
        }
    }
}

impl SecurityHeader for ContentTypeOptions {
    fn header_name(&self) -> &str {
        HEADER_NAME
    }

    fn validate(&mut self) -> Result<()> {
        Ok(())
    }

    fn header_value(&self) -> Option<String> {
        Some(self.to_header_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_options() {
        let mut options = ContentTypeOptions::default();
        assert!(options.validate().is_ok());
        assert_eq!(options.header_name(), "X-Content-Type-Options");
        assert_eq!(options.header_value().as_deref(), Some("nosniff"));
    }
}
