#![no_main]

use libfuzzer_sys::fuzz_target;
use pseudonym_auth::{ProofTranscript, Pseudonym};

fuzz_target!(|data: &[u8]| {
    let _ = Pseudonym::from_bytes(data);
    let _ = ProofTranscript::from_bytes(data);
});
