#![no_main]

use libfuzzer_sys::fuzz_target;
use paseto_paserk::core::types::Key;

fuzz_target!(|data: &str| {
    // Parsing should never panic, and accepted keys must re-serialize exactly
    if let Ok(key) = data.parse::<Key>() {
        assert_eq!(key.to_string(), data);
    }
});
