//! Implicit rejection, tampering, and deterministic-encapsulation behavior.

use mlkem::traits::{Decaps, Encaps, KeyGen, SerDes};
use mlkem::{ml_kem_1024, ml_kem_512, ml_kem_768, KemError};
use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::Shake256;
use std::collections::HashSet;


/// The implicit-rejection derivation `J(z || ct) = SHAKE-256(z || ct)[..32]`,
/// recomputed independently of the crate internals.
fn j_reference(z: &[u8], ct: &[u8]) -> [u8; 32] {
    let mut hasher = Shake256::default();
    hasher.update(z);
    hasher.update(ct);
    let mut reader = hasher.finalize_xof();
    let mut out = [0u8; 32];
    reader.read(&mut out);
    out
}


/// Flipping the first ciphertext byte must produce a stable pseudorandom
/// key different from the encapsulated one.
#[test]
fn test_tampered_ciphertext_1024() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(1);
    let (ek, dk) = ml_kem_1024::KG::try_keygen_with_rng(&mut rng).unwrap();
    let (ssk, ct) = ek.try_encaps_with_rng(&mut rng).unwrap();

    let mut tampered_bytes = ct.into_bytes();
    tampered_bytes[0] ^= 0x01;
    let tampered = ml_kem_1024::CipherText::try_from_bytes(tampered_bytes).unwrap();

    let rejected1 = dk.try_decaps(&tampered).unwrap();
    let rejected2 = dk.try_decaps(&tampered).unwrap();

    // implicit rejection: well-formed, stable, and unrelated to ssk
    assert_ne!(rejected1, ssk);
    assert_eq!(rejected1, rejected2);
    assert_eq!(rejected1.into_bytes().len(), 32);
}


/// The rejected key is exactly `J(z || ct~)` with z taken from the tail of
/// the serialized decapsulation key.
#[test]
fn test_rejection_key_is_j_of_z_and_ciphertext() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(2);
    let (ek, dk) = ml_kem_768::KG::try_keygen_with_rng(&mut rng).unwrap();
    let (_ssk, ct) = ek.try_encaps_with_rng(&mut rng).unwrap();

    let mut tampered_bytes = ct.into_bytes();
    tampered_bytes[17] ^= 0x80;
    let tampered = ml_kem_768::CipherText::try_from_bytes(tampered_bytes).unwrap();

    let rejected = dk.clone().try_decaps(&tampered).unwrap();
    let dk_bytes = dk.into_bytes();
    let z = &dk_bytes[ml_kem_768::DK_LEN - 32..];
    assert_eq!(rejected.into_bytes(), j_reference(z, &tampered_bytes));
}


/// Any single flipped bit must change the decapsulated key.
#[test]
fn test_single_bit_flips_never_collide_512() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(3);
    let (ek, dk) = ml_kem_512::KG::try_keygen_with_rng(&mut rng).unwrap();
    let (ssk, ct) = ek.try_encaps_with_rng(&mut rng).unwrap();
    let ct_bytes = ct.into_bytes();

    for _ in 0..1000 {
        let bit = rng.gen_range(0..ml_kem_512::CT_LEN * 8);
        let mut tampered_bytes = ct_bytes;
        tampered_bytes[bit / 8] ^= 1 << (bit % 8);
        let tampered = ml_kem_512::CipherText::try_from_bytes(tampered_bytes).unwrap();
        let rejected = dk.try_decaps(&tampered).unwrap();
        assert_ne!(rejected, ssk, "collision after flipping bit {bit}");
    }
}


/// Deterministic encapsulation: distinct messages give distinct outputs,
/// repeated messages give identical ones.
#[test]
fn test_encaps_deterministic_768() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(4);
    let (ek, dk) = ml_kem_768::KG::try_keygen_with_rng(&mut rng).unwrap();

    let (ssk_lo, ct_lo) = ek.encaps_deterministic(&[0x00u8; 32]).unwrap();
    let (ssk_hi, ct_hi) = ek.encaps_deterministic(&[0xFFu8; 32]).unwrap();
    let (ssk_lo2, ct_lo2) = ek.encaps_deterministic(&[0x00u8; 32]).unwrap();
    let (ssk_hi2, ct_hi2) = ek.encaps_deterministic(&[0xFFu8; 32]).unwrap();

    assert_ne!(ssk_lo, ssk_hi);
    let (ct_lo, ct_hi) = (ct_lo.into_bytes(), ct_hi.into_bytes());
    assert_ne!(ct_lo[..], ct_hi[..]);
    assert_eq!(ssk_lo, ssk_lo2);
    assert_eq!(ssk_hi, ssk_hi2);
    assert_eq!(ct_lo[..], ct_lo2.into_bytes()[..]);
    assert_eq!(ct_hi[..], ct_hi2.into_bytes()[..]);

    // and the deterministic ciphertexts decapsulate to the derived secrets
    let back = dk.try_decaps(&ml_kem_768::CipherText::try_from_bytes(ct_lo).unwrap()).unwrap();
    assert_eq!(back, ssk_lo);
}


#[test]
fn test_encaps_deterministic_rejects_short_message() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(5);
    let (ek, _dk) = ml_kem_512::KG::try_keygen_with_rng(&mut rng).unwrap();
    let result = ek.encaps_deterministic(&[0u8; 31]);
    assert!(matches!(result, Err(KemError::InvalidSeed(_))));
    let result = ek.encaps_deterministic(&[0u8; 33]);
    assert!(matches!(result, Err(KemError::InvalidSeed(_))));
}


/// 1000 independent encapsulations must give 1000 distinct shared secrets.
#[test]
fn test_no_duplicate_shared_secrets_768() {
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(6);
    let mut seen = HashSet::new();
    for _ in 0..1000 {
        let (ek, _dk) = ml_kem_768::KG::try_keygen_with_rng(&mut rng).unwrap();
        let (ssk, _ct) = ek.try_encaps_with_rng(&mut rng).unwrap();
        assert!(seen.insert(ssk.into_bytes()), "duplicate shared secret");
    }
}
