//! Common interface of every security header

use crate::error::Result;
use std::fmt;

/// A response header that can check its own configuration before being
/// emitted.
pub trait SecurityHeader: fmt::Debug + Send + Sync {
    /// Header field name, e.g. `Strict-Transport-Security`
    fn header_name(&self) -> &str;

    /// Check the configuration, failing with the first problem found.
    fn validate(&mut self) -> Result<()>;

    /// Header field value, or `None` when there is nothing to emit.
    fn header_value(&self) -> Option<String>;
}
