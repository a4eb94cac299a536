#![no_main]

use libfuzzer_sys::fuzz_target;
use pseudonym_auth::Certificate;

fuzz_target!(|data: &[u8]| {
    if let Ok(certificate) = Certificate::from_bytes(data) {
        assert_eq!(certificate.to_bytes().as_slice(), data);
    }
});
