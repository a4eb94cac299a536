mod common;

use std::sync::Arc;
use std::thread;

use pseudonym_auth::config::ProtocolConfig;
use pseudonym_auth::protocol::{PROOF_TRANSCRIPT_BYTES, PSEUDONYM_BYTES};
use pseudonym_auth::{
    Bls12381, Certificate, CertificateAuthority, CertificateVerifier, DeviceRegistry,
    PairingGroup, ProofTranscript, Pseudonym, PseudonymSession, SecureRng, SystemContext,
    authenticate_device, generate_pseudonym, register, verify_certificate,
};

#[test]
fn end_to_end_with_fixed_seed() {
    common::init_tracing();
    let mut rng = SecureRng::from_seed(common::FIXED_SEED);

    let ctx = SystemContext::initialize(128, &mut rng).expect("Initialization should succeed");
    let (device, commitment) =
        register(&ctx, b"Device123", &mut rng).expect("Registration should succeed");
    assert!(commitment.matches(b"Device123", device.public_key()));

    let verified =
        generate_pseudonym(&ctx, &device, &mut rng).expect("Pseudonym proof should verify");
    let certificate = CertificateAuthority::new(&ctx).issue(&verified);

    let keys = ctx.public_keys();
    let pseudonym = verified.pseudonym();
    assert!(verify_certificate(
        pseudonym.x(),
        pseudonym.y(),
        certificate.zeta_x(),
        certificate.zeta_y(),
        &keys.h1,
        &keys.h2,
        ctx.params().generator_g2(),
    ));
}

#[test]
fn fixed_seed_reproduces_the_whole_run() {
    let run = || {
        let mut rng = SecureRng::from_seed(common::FIXED_SEED);
        let (ctx, device) = common::setup(&mut rng, b"Device123");
        let auth = authenticate_device(&ctx, &device, &mut rng).unwrap();
        (
            device.commitment(),
            auth.pseudonym().to_bytes(),
            auth.transcript().to_bytes(),
            auth.certificate().to_bytes(),
        )
    };

    assert_eq!(run(), run());
}

#[test]
fn interactive_exchange_over_serialized_messages() {
    common::init_tracing();
    let mut base_station_rng = SecureRng::new();
    let mut device_rng = SecureRng::new();
    let (ctx, device) = common::setup(&mut base_station_rng, b"Device123");

    let session = PseudonymSession::open(&ctx, &mut base_station_rng).unwrap();
    let x_bytes = Bls12381::g1_to_bytes(session.offer());

    // Device side: decode x and answer.
    let x = Bls12381::g1_from_bytes(&x_bytes).unwrap();
    let (pseudonym, transcript) = pseudonym_auth::DeviceProver::new(&device)
        .prove(&x, &mut device_rng)
        .unwrap();
    let pseudonym_bytes = pseudonym.to_bytes();
    let transcript_bytes = transcript.to_bytes();
    assert_eq!(pseudonym_bytes.len(), PSEUDONYM_BYTES);
    assert_eq!(transcript_bytes.len(), PROOF_TRANSCRIPT_BYTES);

    // Base station side: decode and verify.
    let verified = session
        .verify(
            Pseudonym::from_bytes(&pseudonym_bytes).unwrap(),
            ProofTranscript::from_bytes(&transcript_bytes).unwrap(),
        )
        .expect("Decoded proof should verify");

    let certificate_bytes = CertificateAuthority::new(&ctx).issue(&verified).to_bytes();
    let certificate = Certificate::from_bytes(&certificate_bytes).unwrap();
    assert!(
        CertificateVerifier::from_context(&ctx)
            .verify(verified.pseudonym(), &certificate)
            .is_ok()
    );
}

#[test]
fn registry_recognizes_authenticated_device() {
    let mut rng = SecureRng::new();
    let ctx = SystemContext::initialize(128, &mut rng).unwrap();
    let mut registry = DeviceRegistry::in_memory();

    let alice = registry.enroll(&ctx, b"sensor-alice", &mut rng).unwrap();
    let bob = registry.enroll(&ctx, b"sensor-bob", &mut rng).unwrap();

    assert!(registry.recognize(alice.id(), alice.public_key()).is_ok());
    assert!(registry.recognize(bob.id(), bob.public_key()).is_ok());
    assert!(registry.recognize(alice.id(), bob.public_key()).is_err());

    assert!(authenticate_device(&ctx, &alice, &mut rng).is_ok());
    assert!(authenticate_device(&ctx, &bob, &mut rng).is_ok());
}

#[test]
fn devices_authenticate_in_parallel() {
    common::init_tracing();
    let mut rng = SecureRng::new();
    let ctx = Arc::new(SystemContext::initialize(128, &mut rng).unwrap());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let ctx = Arc::clone(&ctx);
            thread::spawn(move || {
                let mut rng = SecureRng::new();
                let id = format!("Device{i}");
                let (device, _) = register(&ctx, id.as_bytes(), &mut rng).unwrap();
                let auth = authenticate_device(&ctx, &device, &mut rng).unwrap();
                *auth.certificate()
            })
        })
        .collect();

    let certificates: Vec<Certificate> = handles
        .into_iter()
        .map(|h| h.join().expect("Worker thread should not panic"))
        .collect();

    for (i, a) in certificates.iter().enumerate() {
        for b in &certificates[i + 1..] {
            assert_ne!(a, b);
        }
    }
}

#[test]
fn independent_base_stations_do_not_cross_verify() {
    let mut rng = SecureRng::new();
    let (station_a, device) = common::setup(&mut rng, b"Device123");
    let station_b = SystemContext::initialize(128, &mut rng).unwrap();

    let auth = authenticate_device(&station_a, &device, &mut rng).unwrap();
    assert!(
        CertificateVerifier::from_context(&station_b)
            .verify(auth.pseudonym(), auth.certificate())
            .is_err()
    );
}

#[test]
fn context_from_config_honours_seed_and_bounds() {
    let config = ProtocolConfig {
        security_bits: 128,
        max_identity_len: 8,
        seed: Some("01".repeat(32)),
    };

    let a = SystemContext::from_config(&config).unwrap();
    let b = SystemContext::from_config(&config).unwrap();
    assert_eq!(a.public_keys(), b.public_keys());
    assert_eq!(a.max_identity_len(), 8);

    let mut rng = SecureRng::new();
    assert!(register(&a, b"Device123", &mut rng).is_err());
    assert!(register(&a, b"Dev123", &mut rng).is_ok());
}

#[test]
fn generator_is_never_reused_as_session_point() {
    let mut rng = SecureRng::new();
    let (ctx, device) = common::setup(&mut rng, b"Device123");

    let verified = generate_pseudonym(&ctx, &device, &mut rng).unwrap();
    assert_ne!(verified.pseudonym().x(), ctx.params().generator());
    assert!(!Bls12381::is_g1_identity(verified.pseudonym().y()));
}
