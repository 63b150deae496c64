//! Fuzz target for the source-list grammar.
//!
//! Every predicate must accept arbitrary input without panicking, and a
//! value rejected by the character gate must never be a keyword or a
//! scheme-source.

#![no_main]

use bulwark_csp::source::{
    has_valid_characters, is_base64, is_valid_host_source, is_valid_scheme_source,
    is_valid_src_keyword, is_valid_unsafe_keyword,
};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let value = data.trim().to_lowercase();

    let valid_chars = has_valid_characters(&value);
    let _ = is_valid_host_source(&value);
    let scheme = is_valid_scheme_source(&value);
    let keyword = is_valid_src_keyword(&value) || is_valid_unsafe_keyword(&value);
    let _ = is_base64(data);

    if !valid_chars {
        assert!(!scheme && !keyword);
    }
});
