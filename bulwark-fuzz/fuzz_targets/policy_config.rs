//! Fuzz target for JSON and TOML policy configuration.
//!
//! Parsing must fail with an error, never a panic, and any configuration
//! that parses must either assemble into a policy or be rejected cleanly.

#![no_main]

use bulwark_csp::PolicyConfig;
use bulwark_security::{CspHeader, SecurityHeader};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    for parsed in [PolicyConfig::from_json_str(data), PolicyConfig::from_toml_str(data)] {
        let Ok(config) = parsed else { continue };
        let Ok(policy) = config.into_policy() else { continue };

        let mut header = CspHeader::with_policy(policy).reduce(true);
        let _ = header.validate();
        let _ = header.header_value();
    }
});
