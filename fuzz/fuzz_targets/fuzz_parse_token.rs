#![no_main]

use libfuzzer_sys::fuzz_target;
use paseto_paserk::core::operations::token::unverified_footer;
use paseto_paserk::core::types::Token;

fuzz_target!(|data: &str| {
    // Structural parsing should never panic
    let _ = data.parse::<Token>();
    let _ = unverified_footer(data);
});
