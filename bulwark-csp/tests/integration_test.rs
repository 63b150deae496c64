//! Integration tests for bulwark-csp

use bulwark_csp::source::{has_valid_characters, is_valid_host_source};
use bulwark_csp::*;
use proptest::prelude::*;
use std::collections::HashSet;

fn validate(directive: &Directive) -> ValidationReport {
    let mut report = ValidationReport::new();
    directive.validate_and_report(&mut report);
    report
}

#[test]
fn test_script_src_with_inline_sources() {
    let mut policy = ContentSecurityPolicy::new().directive(
        Directive::script_src()
            .allow_self()
            .allow_unsafe_inline()
            .nonce("QUJDRA==")
            .hash("sha256", "qznLcsROx4GACP2dm0UCKCzCG+HiZ1guq6ZZDob/Tng="),
    );

    policy.reset_validation_report();
    assert!(policy.is_valid(), "{}", policy.report());
    assert!(policy.validation_warnings().is_empty());
    assert_eq!(
        policy.build(),
        "script-src 'self' 'unsafe-inline' 'nonce-QUJDRA==' 'sha256-qznLcsROx4GACP2dm0UCKCzCG+HiZ1guq6ZZDob/Tng='"
    );
}

#[test]
fn test_sha1_hash_rejected() {
    let mut policy =
        ContentSecurityPolicy::new().directive(Directive::script_src().hash("sha1", "QUJDRA=="));

    assert!(!policy.is_valid());
    assert_eq!(policy.validation_errors().len(), 1);
    assert!(policy.validation_errors()[0].contains("'sha1-QUJDRA=='"));
}

#[test]
fn test_full_policy_build() {
    let policy = ContentSecurityPolicy::new()
        .directive(Directive::default_src().allow_none())
        .directive(Directive::script_src().allow_self().source("https://cdn.example.com"))
        .directive(Directive::style_src().allow_self().allow_unsafe_inline())
        .directive(Directive::img_src().allow_self().source("data:"))
        .directive(Directive::frame_ancestors().allow_none())
        .directive(Directive::sandbox().sandbox_flag(SandboxFlag::AllowScripts))
        .directive(Directive::plugin_types().source("application/pdf"))
        .directive(Directive::report_uri().source("https://example.com/csp"));

    assert_eq!(
        policy.build(),
        "default-src 'none'; \
         script-src 'self' https://cdn.example.com; \
         style-src 'self' 'unsafe-inline'; \
         img-src 'self' data:; \
         frame-ancestors 'none'; \
         sandbox allow-scripts; \
         plugin-types application/pdf; \
         report-uri https://example.com/csp"
    );

    let mut policy = policy;
    assert!(policy.is_valid());
    assert!(policy.validation_warnings().is_empty());
}

#[test]
fn test_reduce_then_validate_workflow() {
    let mut policy = ContentSecurityPolicy::new()
        .directive(Directive::default_src().allow_self().allow_self())
        .directive(Directive::img_src())
        .directive(Directive::script_src().nonce("QUJD"))
        .directive(Directive::style_src().allow_self().nonce("QUJD"));

    policy.reduce();
    policy.reset_validation_report();

    assert!(policy.is_valid());
    assert_eq!(policy.directives().len(), 2);
    assert!(policy.get_directive("script-src").is_none());
    assert_eq!(
        policy.build(),
        "default-src 'self'; style-src 'self' 'nonce-QUJD'"
    );
}

#[test]
fn test_generated_nonce_validates() {
    let random = SecureRandom::shared().unwrap();
    let nonce = generate_nonce(random, 32);
    let directive = Directive::script_src().nonce(&nonce);

    assert_eq!(nonce.len(), 32);
    assert!(validate(&directive).is_errors_empty());
}

#[test]
fn test_policy_from_json_validates() {
    let mut policy = PolicyConfig::from_json_str(
        r#"{
            "level": "CSP1",
            "directives": [
                {"name": "default-src", "values": ["'self'"]},
                {"name": "base-uri", "values": ["'self'"]},
                {"name": "style-src", "hashes": [{"algorithm": "sha512", "digest": "98765"}]}
            ]
        }"#,
    )
    .unwrap()
    .into_policy()
    .unwrap();

    assert!(!policy.is_valid());
    assert_eq!(policy.validation_errors().len(), 1);
    assert!(policy.validation_errors()[0].contains("is not base-64 encoded"));
    assert_eq!(policy.validation_warnings().len(), 1);
    assert!(policy.validation_warnings()[0].contains("CSP1 does not define directive base-uri"));
}

#[test]
fn test_report_json() {
    let mut policy =
        ContentSecurityPolicy::new().directive(Directive::frame_src().source("http://;"));
    policy.is_valid();

    let json = policy.report().to_json();
    assert_eq!(json["errors"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["warnings"].as_array().map(Vec::len), Some(1));
}

#[test]
fn test_validation_with_subscriber() {
    let _guard = tracing::subscriber::set_default(
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::new("bulwark_csp=debug"))
            .with_test_writer()
            .finish(),
    );

    let mut policy = ContentSecurityPolicy::new()
        .directive(Directive::default_src())
        .directive(Directive::img_src().allow_self());
    policy.reduce();
    assert!(policy.is_valid());
}

proptest! {
    #[test]
    fn illegal_characters_yield_one_error(
        head in "[a-z]{1,8}",
        sep in "[ ;,]",
        tail in "[a-z]{1,8}",
    ) {
        let value = format!("{head}{sep}{tail}");
        prop_assert!(!has_valid_characters(&value));

        let directive = Directive::default_src().source(&value);
        let report = validate(&directive);
        prop_assert_eq!(report.errors().len(), 1);
        prop_assert!(report.errors()[0].contains("illegal character"));
    }

    #[test]
    fn ports_in_range_are_valid(port in 0u32..=65535) {
        let host = format!("https://example.com:{port}");
        prop_assert!(is_valid_host_source(&host));
    }

    #[test]
    fn ports_out_of_range_are_invalid(port in 65536u32..10_000_000) {
        let host = format!("https://example.com:{port}/path");
        prop_assert!(!is_valid_host_source(&host));
    }

    #[test]
    fn dedup_is_idempotent(values in prop::collection::vec("[a-c]\\.com", 0..12)) {
        let mut directive = Directive::img_src();
        for value in &values {
            directive.add_value(value);
        }

        directive.remove_internal_duplicates();
        let once = directive.values().to_vec();
        directive.remove_internal_duplicates();
        prop_assert_eq!(directive.values(), once.as_slice());

        let unique: HashSet<_> = once.iter().collect();
        prop_assert_eq!(unique.len(), once.len());
    }

    #[test]
    fn dedup_keeps_distinct_values(values in prop::collection::hash_set("[a-z]{1,6}\\.org", 0..8)) {
        let values: Vec<_> = values.into_iter().collect();
        let mut directive = Directive::connect_src();
        for value in &values {
            directive.add_value(value);
        }
        directive.remove_internal_duplicates();
        prop_assert_eq!(directive.values(), values.as_slice());
    }

    #[test]
    fn nonce_length_is_multiple_of_four(size in 0usize..128) {
        let random = SecureRandom::shared().unwrap();
        let nonce = generate_nonce(random, size);
        prop_assert_eq!(nonce.len(), size / 4 * 4);
    }

    #[test]
    fn policy_build_has_no_trailing_separator(count in 0usize..6) {
        let names = ["default-src", "img-src", "font-src", "media-src", "connect-src", "child-src"];
        let mut policy = ContentSecurityPolicy::new();
        for name in names.iter().take(count) {
            policy.add_directive(Directive::from_name(name).unwrap().allow_self());
        }
        let built = policy.build();
        prop_assert!(!built.ends_with(';'));
        prop_assert!(!built.ends_with(' '));
        prop_assert_eq!(built.matches("; ").count(), count.saturating_sub(1));
    }
}
