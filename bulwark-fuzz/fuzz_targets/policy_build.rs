//! Fuzz target for policy assembly, validation and serialization.

#![no_main]

use arbitrary::Arbitrary;
use bulwark_csp::{ContentSecurityPolicy, Directive, PolicyLevel};
use libfuzzer_sys::fuzz_target;

/// Arbitrary directive contents for fuzzing.
#[derive(Debug, Arbitrary)]
struct FuzzDirective {
    /// Directive token, registered or not
    name: String,
    values: Vec<String>,
    experimental: Vec<String>,
    nonces: Vec<String>,
    hashes: Vec<(String, String)>,
}

#[derive(Debug, Arbitrary)]
struct FuzzPolicy {
    csp1: bool,
    reduce: bool,
    directives: Vec<FuzzDirective>,
}

fuzz_target!(|data: FuzzPolicy| {
    let level = if data.csp1 { PolicyLevel::Csp1 } else { PolicyLevel::Csp2 };
    let mut policy = ContentSecurityPolicy::with_level(level);

    for entry in &data.directives {
        let mut directive =
            Directive::from_name(&entry.name).unwrap_or_else(|| Directive::experimental(&entry.name));
        for value in &entry.values {
            directive.add_value(value);
        }
        for value in &entry.experimental {
            directive.add_experimental_value(value);
        }
        for nonce in &entry.nonces {
            directive.add_nonce(nonce);
        }
        for (algorithm, digest) in &entry.hashes {
            directive.add_hash(algorithm, digest);
        }
        policy.add_directive(directive);
    }

    if data.reduce {
        policy.reduce();
        // Reduction is idempotent
        let once = policy.build();
        policy.reduce();
        assert_eq!(once, policy.build());
    }

    policy.reset_validation_report();
    let valid = policy.is_valid();
    assert_eq!(valid, policy.validation_errors().is_empty());

    let built = policy.build();
    assert!(!built.ends_with("; "));
    assert!(!built.starts_with(' '));
});
