#![no_main]

use libfuzzer_sys::fuzz_target;
use paseto_paserk::core::types::KeyId;

fuzz_target!(|data: &str| {
    if let Ok(id) = data.parse::<KeyId>() {
        assert_eq!(id.to_string(), data);
    }
});
