use mlkem::traits::{Decaps, Encaps, KeyGen, SerDes};
use mlkem::{ml_kem_1024, ml_kem_512, ml_kem_768};
use rand_chacha::rand_core::SeedableRng;


#[test]
fn test_expected_flow_512() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(123);
    for _i in 0..100 {
        // Alice runs KeyGen, and serializes ek for Bob (to bytes)
        let (alice_ek, alice_dk) = ml_kem_512::KG::try_keygen_with_rng(&mut rng).unwrap();
        let alice_ek_bytes = alice_ek.into_bytes();
        assert_eq!(alice_ek_bytes.len(), ml_kem_512::EK_LEN);

        // Bob deserializes ek bytes, runs Encaps, and serializes ct for Alice
        let bob_ek = ml_kem_512::EncapsKey::try_from_bytes(alice_ek_bytes).unwrap();
        let (bob_ssk, bob_ct) = bob_ek.try_encaps_with_rng(&mut rng).unwrap();
        let bob_ct_bytes = bob_ct.into_bytes();
        assert_eq!(bob_ct_bytes.len(), ml_kem_512::CT_LEN);

        // Alice deserializes the ciphertext and runs Decaps
        let alice_ct = ml_kem_512::CipherText::try_from_bytes(bob_ct_bytes).unwrap();
        let alice_ssk = alice_dk.try_decaps(&alice_ct).unwrap();

        // Alice and Bob now have the same shared secret key
        assert_eq!(bob_ssk, alice_ssk);

        // Double check the correspondence of the serialized keypair
        let alice_dk_bytes = alice_dk.into_bytes();
        assert_eq!(alice_dk_bytes.len(), ml_kem_512::DK_LEN);
        assert!(ml_kem_512::KG::validate_keypair_vartime(&alice_ek_bytes, &alice_dk_bytes));
    }
}


#[test]
fn test_expected_flow_768() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(456);
    for _i in 0..100 {
        let (alice_ek, alice_dk) = ml_kem_768::KG::try_keygen_with_rng(&mut rng).unwrap();
        let alice_ek_bytes = alice_ek.into_bytes();
        assert_eq!(alice_ek_bytes.len(), 1184);

        let bob_ek = ml_kem_768::EncapsKey::try_from_bytes(alice_ek_bytes).unwrap();
        let (bob_ssk, bob_ct) = bob_ek.try_encaps_with_rng(&mut rng).unwrap();
        let bob_ct_bytes = bob_ct.into_bytes();
        assert_eq!(bob_ct_bytes.len(), 1088);

        let alice_ct = ml_kem_768::CipherText::try_from_bytes(bob_ct_bytes).unwrap();
        let alice_ssk = alice_dk.try_decaps(&alice_ct).unwrap();
        assert_eq!(bob_ssk.clone().into_bytes().len(), 32);
        assert_eq!(bob_ssk, alice_ssk);

        let alice_dk_bytes = alice_dk.into_bytes();
        assert_eq!(alice_dk_bytes.len(), 2400);
        assert!(ml_kem_768::KG::validate_keypair_vartime(&alice_ek_bytes, &alice_dk_bytes));
    }
}


#[test]
fn test_expected_flow_1024() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(789);
    for _i in 0..100 {
        let (alice_ek, alice_dk) = ml_kem_1024::KG::try_keygen_with_rng(&mut rng).unwrap();
        let alice_ek_bytes = alice_ek.into_bytes();
        assert_eq!(alice_ek_bytes.len(), ml_kem_1024::EK_LEN);

        let bob_ek = ml_kem_1024::EncapsKey::try_from_bytes(alice_ek_bytes).unwrap();
        let (bob_ssk, bob_ct) = bob_ek.try_encaps_with_rng(&mut rng).unwrap();
        let bob_ct_bytes = bob_ct.into_bytes();
        assert_eq!(bob_ct_bytes.len(), ml_kem_1024::CT_LEN);

        let alice_ct = ml_kem_1024::CipherText::try_from_bytes(bob_ct_bytes).unwrap();
        let alice_ssk = alice_dk.try_decaps(&alice_ct).unwrap();
        assert_eq!(bob_ssk, alice_ssk);

        let alice_dk_bytes = alice_dk.into_bytes();
        assert!(ml_kem_1024::KG::validate_keypair_vartime(&alice_ek_bytes, &alice_dk_bytes));
    }
}


/// The module constants and the runtime parameter records must agree.
#[test]
fn test_params_records_match_module_constants() {
    use mlkem::params::ParamSet;

    assert_eq!(ml_kem_512::PARAMS.ek_len(), ml_kem_512::EK_LEN);
    assert_eq!(ml_kem_512::PARAMS.dk_len(), ml_kem_512::DK_LEN);
    assert_eq!(ml_kem_512::PARAMS.ct_len(), ml_kem_512::CT_LEN);
    assert_eq!(ml_kem_768::PARAMS.ek_len(), ml_kem_768::EK_LEN);
    assert_eq!(ml_kem_768::PARAMS.dk_len(), ml_kem_768::DK_LEN);
    assert_eq!(ml_kem_768::PARAMS.ct_len(), ml_kem_768::CT_LEN);
    assert_eq!(ml_kem_1024::PARAMS.ek_len(), ml_kem_1024::EK_LEN);
    assert_eq!(ml_kem_1024::PARAMS.dk_len(), ml_kem_1024::DK_LEN);
    assert_eq!(ml_kem_1024::PARAMS.ct_len(), ml_kem_1024::CT_LEN);

    assert_eq!(ParamSet::by_name("ML-KEM-768").unwrap(), ml_kem_768::PARAMS);
}


/// A fixed RNG seed reproduces byte-identical keys, ciphertexts and secrets
/// across independent runs.
#[test]
fn test_seeded_runs_reproduce() {
    let run = || {
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(0xC0FFEE);
        let (ek, dk) = ml_kem_512::KG::try_keygen_with_rng(&mut rng).unwrap();
        let (ssk, ct) = ek.try_encaps_with_rng(&mut rng).unwrap();
        (ek.into_bytes(), dk.into_bytes(), ssk.into_bytes(), ct.into_bytes())
    };
    let (ek1, dk1, ssk1, ct1) = run();
    let (ek2, dk2, ssk2, ct2) = run();
    assert_eq!(ek1, ek2);
    assert_eq!(dk1, dk2);
    assert_eq!(ssk1, ssk2);
    assert_eq!(ct1, ct2);
}


/// Deterministic keypair derivation from explicit (d, z) seeds.
#[test]
fn test_keygen_from_seed_is_deterministic() {
    let d = [0x11u8; 32];
    let z = [0x22u8; 32];
    let (ek1, dk1) = ml_kem_768::KG::keygen_from_seed(&d, &z).unwrap();
    let (ek2, dk2) = ml_kem_768::KG::keygen_from_seed(&d, &z).unwrap();
    let (ek1_bytes, ek2_bytes) = (ek1.into_bytes(), ek2.into_bytes());
    assert_eq!(ek1_bytes, ek2_bytes);
    let (dk1_bytes, dk2_bytes) = (dk1.into_bytes(), dk2.into_bytes());
    assert_eq!(dk1_bytes[..], dk2_bytes[..]);

    // z lands verbatim at the tail of dk
    assert_eq!(dk1_bytes[ml_kem_768::DK_LEN - 32..], z);

    // a different d seed gives a different keypair
    let (ek3, _dk3) = ml_kem_768::KG::keygen_from_seed(&[0x33u8; 32], &z).unwrap();
    assert_ne!(ek1_bytes, ek3.into_bytes());
}
