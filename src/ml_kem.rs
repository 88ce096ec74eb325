use crate::helpers::{g, h, j};
use crate::k_pke::{k_pke_decrypt, k_pke_encrypt, k_pke_key_gen};
use crate::{KemError, SharedSecretKey};
use rand_core::CryptoRngCore;
use subtle::{ConditionallySelectable, ConstantTimeEq};
use zeroize::Zeroize;


/// Algorithm 16 `ML-KEM.KeyGen_internal(d, z)`: deterministic key
/// generation from the two 32-byte seeds. Writes the encapsulation key and
/// the composite decapsulation key `dk_PKE || ek || H(ek) || z`.
pub(crate) fn ml_kem_key_gen_internal<const K: usize, const ETA1_64: usize>(
    d: &[u8; 32], z: &[u8; 32], eta1: u32, ek: &mut [u8], dk: &mut [u8],
) -> Result<(), KemError> {
    debug_assert_eq!(ek.len(), 384 * K + 32, "ek buffer is not 384k + 32");
    debug_assert_eq!(dk.len(), 768 * K + 96, "dk buffer is not 768k + 96");

    // the KEM encaps key is exactly the PKE encryption key; the PKE
    // decryption key becomes the first section of the decaps key
    let p1 = 384 * K;
    k_pke_key_gen::<K, ETA1_64>(d, eta1, ek, &mut dk[..p1])?;

    let h_ek = h(ek);
    let p2 = p1 + ek.len();
    let p3 = p2 + h_ek.len();
    dk[p1..p2].copy_from_slice(ek);
    dk[p2..p3].copy_from_slice(&h_ek);
    dk[p3..].copy_from_slice(z);
    Ok(())
}


/// Algorithm 19 `ML-KEM.KeyGen()`: draws the seeds `d` and `z` from the
/// caller's generator, then runs deterministic key generation. The seeds
/// are wiped before returning.
pub(crate) fn ml_kem_key_gen<const K: usize, const ETA1_64: usize>(
    rng: &mut impl CryptoRngCore, eta1: u32, ek: &mut [u8], dk: &mut [u8],
) -> Result<(), KemError> {
    let mut d = [0u8; 32];
    rng.try_fill_bytes(&mut d)
        .map_err(|_| KemError::InvalidSeed("random source failed while drawing seed d"))?;

    let mut z = [0u8; 32];
    rng.try_fill_bytes(&mut z)
        .map_err(|_| KemError::InvalidSeed("random source failed while drawing seed z"))?;

    let result = ml_kem_key_gen_internal::<K, ETA1_64>(&d, &z, eta1, ek, dk);
    d.zeroize();
    z.zeroize();
    result
}


/// Algorithm 17 `ML-KEM.Encaps_internal(ek, m)`: derives
/// `(K, r) = G(m || H(ek))`, encrypts `m` under `r`, and returns the shared
/// secret. Deterministic in `ek` and `m`.
pub(crate) fn ml_kem_encaps_internal<const K: usize, const ETA1_64: usize, const ETA2_64: usize>(
    du: u32, dv: u32, eta1: u32, eta2: u32, m: &[u8; 32], ek: &[u8], ct: &mut [u8],
) -> Result<SharedSecretKey, KemError> {
    let h_ek = h(ek);
    let (key, mut r) = g(&[m, &h_ek]);
    k_pke_encrypt::<K, ETA1_64, ETA2_64>(du, dv, eta1, eta2, ek, m, &r, ct)?;
    r.zeroize();
    Ok(SharedSecretKey(key))
}


/// Algorithm 20 `ML-KEM.Encaps(ek)`: draws the 32-byte message from the
/// caller's generator and defers to the internal deterministic form. The
/// message is wiped before returning.
pub(crate) fn ml_kem_encaps<const K: usize, const ETA1_64: usize, const ETA2_64: usize>(
    rng: &mut impl CryptoRngCore, du: u32, dv: u32, eta1: u32, eta2: u32, ek: &[u8],
    ct: &mut [u8],
) -> Result<SharedSecretKey, KemError> {
    debug_assert_eq!(ek.len(), 384 * K + 32, "ek buffer is not 384k + 32");

    let mut m = [0u8; 32];
    rng.try_fill_bytes(&mut m)
        .map_err(|_| KemError::InvalidSeed("random source failed while drawing message m"))?;

    let result = ml_kem_encaps_internal::<K, ETA1_64, ETA2_64>(du, dv, eta1, eta2, &m, ek, ct);
    m.zeroize();
    result
}


/// Algorithms 18/21 `ML-KEM.Decaps(dk, c)`: decrypts, re-encrypts under the
/// re-derived randomness, and selects between the real key `K'` and the
/// implicit-rejection key `K_bar = J(z || c)` without branching on the
/// comparison outcome. Never fails on a tampered (well-sized) ciphertext.
#[allow(clippy::similar_names)]
pub(crate) fn ml_kem_decaps<
    const K: usize,
    const ETA1_64: usize,
    const ETA2_64: usize,
    const CT_LEN: usize,
>(
    du: u32, dv: u32, eta1: u32, eta2: u32, dk: &[u8], ct: &[u8; CT_LEN],
) -> Result<SharedSecretKey, KemError> {
    debug_assert_eq!(dk.len(), 768 * K + 96, "dk buffer is not 768k + 96");
    debug_assert_eq!(
        ct.len(),
        32 * (du as usize * K + dv as usize),
        "ct buffer is not 32(du k + dv)"
    );

    let dk_pke = &dk[0..384 * K];
    let ek_pke = &dk[384 * K..768 * K + 32];
    let h_ek = &dk[768 * K + 32..768 * K + 64];
    let z = &dk[768 * K + 64..768 * K + 96];

    let mut m_prime = k_pke_decrypt::<K>(du, dv, dk_pke, ct)?;
    let (mut k_prime, mut r_prime) = g(&[&m_prime, h_ek]);
    let mut k_bar = j(z, ct);

    let mut c_prime = [0u8; CT_LEN];
    k_pke_encrypt::<K, ETA1_64, ETA2_64>(
        du, dv, eta1, eta2, ek_pke, &m_prime, &r_prime, &mut c_prime,
    )?;

    // implicit rejection: a branchless select on the ciphertext comparison
    k_prime.conditional_assign(&k_bar, ct.ct_ne(&c_prime));

    m_prime.zeroize();
    r_prime.zeroize();
    k_bar.zeroize();
    Ok(SharedSecretKey(k_prime))
}
