mod common;

use pseudonym_auth::protocol::{challenge, verify_proof};
use pseudonym_auth::{
    Bls12381, Certificate, CertificateAuthority, CertificateVerifier, DeviceProver, Error,
    PairingGroup, ProofTranscript, Pseudonym, PseudonymSession, SecureRng, Stage, SystemContext,
    Transcript, generate_pseudonym, register,
};

#[test]
fn reject_random_y() {
    let mut rng = SecureRng::new();
    let (ctx, device) = common::setup(&mut rng, b"Device123");

    let session = PseudonymSession::open(&ctx, &mut rng).unwrap();
    let (pseudonym, transcript) = DeviceProver::new(&device)
        .prove(session.offer(), &mut rng)
        .unwrap();

    let forged = Pseudonym::new(*pseudonym.x(), Bls12381::random_g1(&mut rng));
    let err = session
        .verify(forged, transcript)
        .expect_err("Random y should not verify");
    assert!(matches!(err, Error::ProofVerification(_)));
    assert_eq!(err.stage(), Stage::Pseudonym);
}

#[test]
fn reject_y_from_different_device_key() {
    let mut rng = SecureRng::new();
    let (ctx, device) = common::setup(&mut rng, b"Device123");
    let (other, _) = register(&ctx, b"Device123", &mut rng).unwrap();

    let session = PseudonymSession::open(&ctx, &mut rng).unwrap();
    let (_, transcript) = DeviceProver::new(&device)
        .prove(session.offer(), &mut rng)
        .unwrap();
    let other_pseudonym = DeviceProver::new(&other).pseudonym(session.offer()).unwrap();

    assert!(session.verify(other_pseudonym, transcript).is_err());
}

#[test]
fn reject_flipped_y_byte_before_hashing() {
    let mut rng = SecureRng::from_seed(common::FIXED_SEED);
    let (ctx, device) = common::setup(&mut rng, b"Device123");

    let session = PseudonymSession::open(&ctx, &mut rng).unwrap();
    let (pseudonym, transcript) = DeviceProver::new(&device)
        .prove(session.offer(), &mut rng)
        .unwrap();

    let x_bytes = Bls12381::g1_to_bytes(pseudonym.x());
    let mut y_bytes = Bls12381::g1_to_bytes(pseudonym.y());
    y_bytes[47] ^= 0x01;

    let mut mutated = Transcript::new();
    mutated.append_pseudonym(&x_bytes, &y_bytes);
    mutated.append_commitment(&Bls12381::g1_to_bytes(transcript.commitment()));
    let mutated_epsilon = mutated.challenge_scalar();
    assert_ne!(&mutated_epsilon, transcript.challenge());

    // The prover's response was computed for the honest challenge.
    let tampered = ProofTranscript::new(
        *transcript.commitment(),
        transcript.response().clone(),
        mutated_epsilon,
    );
    assert!(matches!(
        verify_proof(&pseudonym, &tampered),
        Err(Error::ProofVerification(_))
    ));

    // A flipped byte either leaves the curve or decodes to a different point.
    if let Ok(y) = Bls12381::g1_from_bytes(&y_bytes) {
        let mutated_pseudonym = Pseudonym::new(*pseudonym.x(), y);
        assert!(session.verify(mutated_pseudonym, transcript).is_err());
    }
}

#[test]
fn challenge_is_deterministic() {
    let mut rng = SecureRng::new();
    let (ctx, device) = common::setup(&mut rng, b"Device123");
    let verified = generate_pseudonym(&ctx, &device, &mut rng).unwrap();
    let pseudonym = verified.pseudonym();
    let commitment = verified.transcript().commitment();

    let a = challenge(pseudonym, commitment);
    let b = challenge(
        &Pseudonym::from_bytes(&pseudonym.to_bytes()).unwrap(),
        &Bls12381::g1_from_bytes(&Bls12381::g1_to_bytes(commitment)).unwrap(),
    );
    assert_eq!(Bls12381::scalar_to_bytes(&a), Bls12381::scalar_to_bytes(&b));
    assert_eq!(&a, verified.transcript().challenge());
}

#[test]
fn reject_replaced_certificate_components() {
    let mut rng = SecureRng::new();
    let (ctx, device) = common::setup(&mut rng, b"Device123");
    let verified = generate_pseudonym(&ctx, &device, &mut rng).unwrap();
    let certificate = CertificateAuthority::new(&ctx).issue(&verified);
    let verifier = CertificateVerifier::from_context(&ctx);

    let bad_x = Certificate::new(Bls12381::random_g1(&mut rng), *certificate.zeta_y());
    let bad_y = Certificate::new(*certificate.zeta_x(), Bls12381::random_g1(&mut rng));

    for forged in [bad_x, bad_y] {
        let err = verifier
            .verify(verified.pseudonym(), &forged)
            .expect_err("Forged certificate should not verify");
        assert!(matches!(err, Error::CertificateVerification(_)));
        assert_eq!(err.stage(), Stage::Verification);
    }
}

#[test]
fn reject_certificate_against_another_session() {
    let mut rng = SecureRng::new();
    let (ctx, device) = common::setup(&mut rng, b"Device123");
    let authority = CertificateAuthority::new(&ctx);
    let verifier = CertificateVerifier::from_context(&ctx);

    let first = generate_pseudonym(&ctx, &device, &mut rng).unwrap();
    let second = generate_pseudonym(&ctx, &device, &mut rng).unwrap();
    let certificate = authority.issue(&first);

    assert!(verifier.verify(first.pseudonym(), &certificate).is_ok());
    assert!(verifier.verify(second.pseudonym(), &certificate).is_err());

    let mixed_x = Pseudonym::new(*second.pseudonym().x(), *first.pseudonym().y());
    let mixed_y = Pseudonym::new(*first.pseudonym().x(), *second.pseudonym().y());
    assert!(verifier.verify(&mixed_x, &certificate).is_err());
    assert!(verifier.verify(&mixed_y, &certificate).is_err());
}

#[test]
fn reject_swapped_pseudonym_halves() {
    let mut rng = SecureRng::new();
    let (ctx, device) = common::setup(&mut rng, b"Device123");
    let verified = generate_pseudonym(&ctx, &device, &mut rng).unwrap();
    let certificate = CertificateAuthority::new(&ctx).issue(&verified);

    let swapped = Pseudonym::new(*verified.pseudonym().y(), *verified.pseudonym().x());
    assert!(
        CertificateVerifier::from_context(&ctx)
            .verify(&swapped, &certificate)
            .is_err()
    );
}

#[test]
fn pseudonyms_are_unlinkable() {
    let mut rng = SecureRng::new();
    let (ctx, device) = common::setup(&mut rng, b"Device123");

    let first = generate_pseudonym(&ctx, &device, &mut rng).unwrap();
    let second = generate_pseudonym(&ctx, &device, &mut rng).unwrap();

    assert_ne!(first.pseudonym().x(), second.pseudonym().x());
    assert_ne!(first.pseudonym().y(), second.pseudonym().y());
    assert_ne!(first.pseudonym().y(), device.public_key());
    assert_ne!(
        first.transcript().commitment(),
        second.transcript().commitment()
    );
}

#[test]
fn reject_identity_session_point() {
    let mut rng = SecureRng::new();
    let (_, device) = common::setup(&mut rng, b"Device123");

    let err = DeviceProver::new(&device)
        .prove(&Bls12381::g1_identity(), &mut rng)
        .expect_err("Identity x must be rejected");
    assert!(matches!(err, Error::DegenerateProofInput(_)));
}

#[test]
fn reject_decoded_identity_points() {
    let identity = Bls12381::g1_to_bytes(&Bls12381::g1_identity());

    let mut pseudonym = identity.clone();
    pseudonym.extend_from_slice(&identity);
    assert!(Pseudonym::from_bytes(&pseudonym).is_err());

    let mut certificate = vec![1u8];
    certificate.extend_from_slice(&identity);
    certificate.extend_from_slice(&identity);
    assert!(Certificate::from_bytes(&certificate).is_err());
}

#[test]
fn reject_out_of_bounds_identities() {
    let mut rng = SecureRng::new();
    let ctx = SystemContext::initialize(128, &mut rng).unwrap();

    let empty = register(&ctx, b"", &mut rng).unwrap_err();
    assert!(matches!(empty, Error::HashInput(_)));
    assert_eq!(empty.stage(), Stage::Registration);

    let long = vec![b'a'; ctx.max_identity_len() + 1];
    assert!(matches!(
        register(&ctx, &long, &mut rng),
        Err(Error::HashInput(_))
    ));

    let exact = vec![b'a'; ctx.max_identity_len()];
    assert!(register(&ctx, &exact, &mut rng).is_ok());
}

#[test]
fn reject_unsupported_security_level() {
    let mut rng = SecureRng::new();
    let err = SystemContext::initialize(192, &mut rng).unwrap_err();
    assert!(matches!(err, Error::ParameterGeneration(_)));
    assert_eq!(err.stage(), Stage::Setup);

    assert!(SystemContext::initialize(Bls12381::SECURITY_BITS, &mut rng).is_ok());
    assert!(SystemContext::initialize(Bls12381::SECURITY_BITS + 1, &mut rng).is_err());
}
