//! Common test utilities shared across integration tests.

use pseudonym_auth::{DeviceIdentity, SecureRng, SystemContext, register};

/// Fixed seed used by the reproducible end-to-end scenarios.
#[allow(dead_code)]
pub const FIXED_SEED: [u8; 32] = [0x5a; 32];

/// Initialize test tracing (call once at the beginning of tests).
///
/// Logs from the library are shown at INFO level through the test writer.
/// Subsequent calls are safe and will be ignored.
#[allow(dead_code)]
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::new("pseudonym_auth=info");

    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}

/// Builds a fresh context and registers one device.
#[allow(dead_code)]
pub fn setup(rng: &mut SecureRng, id: &[u8]) -> (SystemContext, DeviceIdentity) {
    let ctx = SystemContext::initialize(128, rng).expect("Initialization should succeed");
    let (device, _) = register(&ctx, id, rng).expect("Registration should succeed");
    (ctx, device)
}
