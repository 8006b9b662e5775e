#![no_main]

use libfuzzer_sys::fuzz_target;
use paseto_paserk::core::operations::token::open_payload;
use paseto_paserk::core::registry::global;
use paseto_paserk::core::types::{Key, LocalKey};
use paseto_paserk::core::version::Version;

fuzz_target!(|data: &str| {
    // Opening arbitrary input should never panic, whatever the version
    for version in Version::ALL {
        let Ok(key) = LocalKey::from_bytes(version, &[0x42u8; 32]) else {
            continue;
        };
        let key = Key::from(key);
        let _ = open_payload(global(), &key, data, b"");
        let _ = open_payload(global(), &key, data, b"assertion");
    }
});
