mod common;

use pseudonym_auth::primitives::crypto::field;
use pseudonym_auth::{
    Bls12381, Certificate, CertificateAuthority, CertificateVerifier, DeviceIdentity,
    DeviceProver, PairingGroup, ProofTranscript, Pseudonym, PseudonymSession, SecureRng,
    SystemContext, Transcript, generate_pseudonym,
};
use pseudonym_auth::protocol::Nonce;
use proptest::prelude::*;

fn context(seed: [u8; 32]) -> (SystemContext, SecureRng) {
    let mut rng = SecureRng::from_seed(seed);
    let ctx = SystemContext::initialize(128, &mut rng).expect("Initialization should succeed");
    (ctx, rng)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    #[test]
    fn proof_verifies_for_any_device(seed in any::<[u8; 32]>(), id in "[a-zA-Z0-9]{1,64}") {
        let (ctx, mut rng) = context(seed);
        let d = Bls12381::random_scalar(&mut rng);
        prop_assume!(!Bls12381::scalar_is_zero(&d));
        let device = DeviceIdentity::from_secret(&ctx, id.as_bytes(), d)
            .expect("Device creation should succeed");

        let result = generate_pseudonym(&ctx, &device, &mut rng);
        prop_assert!(result.is_ok(), "Honest proof should verify");
    }

    #[test]
    fn random_y_never_verifies(seed in any::<[u8; 32]>()) {
        let (ctx, mut rng) = context(seed);
        let (device, _) = pseudonym_auth::register(&ctx, b"Device123", &mut rng).unwrap();

        let session = PseudonymSession::open(&ctx, &mut rng).unwrap();
        let (pseudonym, transcript) = DeviceProver::new(&device)
            .prove(session.offer(), &mut rng)
            .unwrap();

        let forged = Pseudonym::new(*pseudonym.x(), Bls12381::random_g1(&mut rng));
        prop_assert!(session.verify(forged, transcript).is_err());
    }

    #[test]
    fn issued_certificates_verify(seed in any::<[u8; 32]>()) {
        let (ctx, mut rng) = context(seed);
        let (device, _) = pseudonym_auth::register(&ctx, b"Device123", &mut rng).unwrap();

        let verified = generate_pseudonym(&ctx, &device, &mut rng).unwrap();
        let certificate = CertificateAuthority::new(&ctx).issue(&verified);

        prop_assert!(CertificateVerifier::from_context(&ctx)
            .verify(verified.pseudonym(), &certificate)
            .is_ok());
    }

    #[test]
    fn public_keys_are_consistent(seed in any::<[u8; 32]>()) {
        let (ctx, _) = context(seed);
        let keys = ctx.public_keys();

        prop_assert!(keys.h1.is_consistent(ctx.params()));
        prop_assert!(keys.h2.is_consistent(ctx.params()));
    }

    #[test]
    fn response_matches_integer_arithmetic(seed in any::<[u8; 32]>()) {
        let (ctx, mut rng) = context(seed);
        let d = Bls12381::random_scalar(&mut rng);
        prop_assume!(!Bls12381::scalar_is_zero(&d));
        let d_int = field::biguint_from_le(&Bls12381::scalar_to_bytes(&d));
        let device = DeviceIdentity::from_secret(&ctx, b"Device123", d).unwrap();

        let delta = Bls12381::random_scalar(&mut rng);
        let epsilon = Bls12381::random_scalar(&mut rng);
        let delta_int = field::biguint_from_le(&Bls12381::scalar_to_bytes(&delta));
        let epsilon_int = field::biguint_from_le(&Bls12381::scalar_to_bytes(&epsilon));

        let z = DeviceProver::new(&device).respond(&Nonce::new(delta), &epsilon);
        let expected = field::mul_add_mod(&delta_int, &epsilon_int, &d_int, ctx.params().order());

        prop_assert_eq!(field::biguint_from_le(&Bls12381::scalar_to_bytes(&z)), expected);
    }

    #[test]
    fn challenge_is_a_function_of_transcript(
        x in prop::collection::vec(any::<u8>(), 0..128),
        y in prop::collection::vec(any::<u8>(), 0..128),
        commitment in prop::collection::vec(any::<u8>(), 0..128),
    ) {
        let mut first = Transcript::new();
        first.append_pseudonym(&x, &y);
        first.append_commitment(&commitment);

        let mut second = Transcript::new();
        second.append_pseudonym(&x, &y);
        second.append_commitment(&commitment);

        prop_assert_eq!(first.challenge_scalar(), second.challenge_scalar());
    }

    #[test]
    fn decoders_never_panic(bytes in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = Pseudonym::from_bytes(&bytes);
        let _ = ProofTranscript::from_bytes(&bytes);
        let _ = Certificate::from_bytes(&bytes);
    }
}
