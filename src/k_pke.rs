use crate::byte_fns::{byte_decode, byte_encode};
use crate::helpers::{
    compress_coeffs, decompress_coeffs, dot_prod, g, mul_mat_t_vec, mul_mat_vec, prf, xof,
};
use crate::sampling::{sample_ntt, sample_poly_cbd};
use crate::types::{Poly, PolyHat};
use crate::KemError;
use zeroize::Zeroize;


/// Expands the seed `rho` into the `K x K` matrix `A_hat`, always in the
/// NTT basis. Entry `(i, j)` draws from the stream seeded `rho || j || i`;
/// the transposed index order is deliberate and shared by key generation
/// and encryption.
fn gen_a_hat<const K: usize>(rho: &[u8]) -> [[PolyHat; K]; K] {
    core::array::from_fn(|i| {
        core::array::from_fn(|j| sample_ntt(xof(rho, j.to_le_bytes()[0], i.to_le_bytes()[0])))
    })
}


/// Algorithm 13 `K-PKE.KeyGen(d)`: derives the encryption key
/// `ek_PKE = ByteEncode_12(t_hat) || rho` and the decryption key
/// `dk_PKE = ByteEncode_12(s_hat)` from the 32-byte seed `d`.
///
/// The secret is stored in the NTT basis, matching what decryption expects.
#[allow(clippy::similar_names)]
pub(crate) fn k_pke_key_gen<const K: usize, const ETA1_64: usize>(
    d: &[u8; 32], eta1: u32, ek_pke: &mut [u8], dk_pke: &mut [u8],
) -> Result<(), KemError> {
    debug_assert_eq!(ek_pke.len(), 384 * K + 32, "ek_pke buffer is not 384k + 32");
    debug_assert_eq!(dk_pke.len(), 384 * K, "dk_pke buffer is not 384k");

    // (rho, sigma) <- G(d || k); the appended dimension byte keeps the three
    // parameter sets separated even when fed the same seed
    let mut d_k = [0u8; 33];
    d_k[0..32].copy_from_slice(d);
    d_k[32] = K.to_le_bytes()[0];
    let (rho, mut sigma) = g(&[&d_k]);

    let a_hat = gen_a_hat::<K>(&rho);

    let mut n = 0;
    let mut s = [Poly::ZERO; K];
    for s_i in &mut s {
        *s_i = sample_poly_cbd(eta1, &prf::<ETA1_64>(&sigma, n))?;
        n += 1;
    }
    let mut e = [Poly::ZERO; K];
    for e_i in &mut e {
        *e_i = sample_poly_cbd(eta1, &prf::<ETA1_64>(&sigma, n))?;
        n += 1;
    }

    let mut s_hat: [PolyHat; K] = core::array::from_fn(|i| s[i].ntt());
    let e_hat: [PolyHat; K] = core::array::from_fn(|i| e[i].ntt());

    // t_hat = A_hat o s_hat + e_hat
    let a_s = mul_mat_vec(&a_hat, &s_hat);
    let t_hat: [PolyHat; K] = core::array::from_fn(|i| a_s[i].add(&e_hat[i]));

    for (i, chunk) in ek_pke.chunks_mut(384).enumerate().take(K) {
        byte_encode(12, &t_hat[i].0, chunk)?;
    }
    ek_pke[384 * K..].copy_from_slice(&rho);

    for (i, chunk) in dk_pke.chunks_mut(384).enumerate() {
        byte_encode(12, &s_hat[i].0, chunk)?;
    }

    d_k.zeroize();
    sigma.zeroize();
    s.zeroize();
    e.zeroize();
    s_hat.zeroize();
    Ok(())
}


/// Algorithm 14 `K-PKE.Encrypt(ek_PKE, m, r)`: encrypts the 32-byte message
/// under the encryption key using the derandomizing seed `r`.
#[allow(clippy::many_single_char_names, clippy::similar_names, clippy::too_many_arguments)]
pub(crate) fn k_pke_encrypt<const K: usize, const ETA1_64: usize, const ETA2_64: usize>(
    du: u32, dv: u32, eta1: u32, eta2: u32, ek_pke: &[u8], m: &[u8; 32], r: &[u8; 32],
    ct: &mut [u8],
) -> Result<(), KemError> {
    debug_assert_eq!(ek_pke.len(), 384 * K + 32, "ek_pke buffer is not 384k + 32");
    debug_assert_eq!(
        ct.len(),
        32 * (du as usize * K + dv as usize),
        "ct buffer is not 32(du k + dv)"
    );

    let mut t_hat = [PolyHat::ZERO; K];
    for (i, chunk) in ek_pke.chunks(384).enumerate().take(K) {
        byte_decode(12, chunk, &mut t_hat[i].0)?;
    }
    let rho = &ek_pke[384 * K..384 * K + 32];

    let a_hat = gen_a_hat::<K>(rho);

    let mut n = 0;
    let mut y = [Poly::ZERO; K];
    for y_i in &mut y {
        *y_i = sample_poly_cbd(eta1, &prf::<ETA1_64>(r, n))?;
        n += 1;
    }
    let mut e1 = [Poly::ZERO; K];
    for e1_i in &mut e1 {
        *e1_i = sample_poly_cbd(eta2, &prf::<ETA2_64>(r, n))?;
        n += 1;
    }
    let e2 = sample_poly_cbd(eta2, &prf::<ETA2_64>(r, n))?;

    let y_hat: [PolyHat; K] = core::array::from_fn(|i| y[i].ntt());

    // u = NTT^-1(A_hat^T o y_hat) + e1
    let a_t_y = mul_mat_t_vec(&a_hat, &y_hat);
    let mut u: [Poly; K] = core::array::from_fn(|i| a_t_y[i].ntt_inv().add(&e1[i]));

    // mu = Decompress_1(ByteDecode_1(m)) lifts each message bit to 0 or 1665
    let mut mu = Poly::ZERO;
    byte_decode(1, m, &mut mu.0)?;
    decompress_coeffs(1, &mut mu.0);

    // v = NTT^-1(t_hat^T o y_hat) + e2 + mu
    let mut v = dot_prod(&t_hat, &y_hat).ntt_inv().add(&e2).add(&mu);

    let step = 32 * du as usize;
    for (i, chunk) in ct.chunks_mut(step).enumerate().take(K) {
        compress_coeffs(du, &mut u[i].0);
        byte_encode(du, &u[i].0, chunk)?;
    }
    compress_coeffs(dv, &mut v.0);
    byte_encode(dv, &v.0, &mut ct[K * step..])?;

    Ok(())
}


/// Algorithm 15 `K-PKE.Decrypt(dk_PKE, c)`: recovers the 32-byte message
/// as `Compress_1(v' - NTT^-1(s_hat^T o NTT(u')))`.
pub(crate) fn k_pke_decrypt<const K: usize>(
    du: u32, dv: u32, dk_pke: &[u8], ct: &[u8],
) -> Result<[u8; 32], KemError> {
    debug_assert_eq!(dk_pke.len(), 384 * K, "dk_pke buffer is not 384k");
    debug_assert_eq!(
        ct.len(),
        32 * (du as usize * K + dv as usize),
        "ct buffer is not 32(du k + dv)"
    );

    let c1 = &ct[0..32 * du as usize * K];
    let c2 = &ct[32 * du as usize * K..];

    let mut u = [Poly::ZERO; K];
    for (i, chunk) in c1.chunks(32 * du as usize).enumerate().take(K) {
        byte_decode(du, chunk, &mut u[i].0)?;
        decompress_coeffs(du, &mut u[i].0);
    }

    let mut v = Poly::ZERO;
    byte_decode(dv, c2, &mut v.0)?;
    decompress_coeffs(dv, &mut v.0);

    let mut s_hat = [PolyHat::ZERO; K];
    for (i, chunk) in dk_pke.chunks(384).enumerate() {
        byte_decode(12, chunk, &mut s_hat[i].0)?;
    }

    let u_hat: [PolyHat; K] = core::array::from_fn(|i| u[i].ntt());
    let mut w = v.sub(&dot_prod(&s_hat, &u_hat).ntt_inv());

    compress_coeffs(1, &mut w.0);
    let mut m = [0u8; 32];
    byte_encode(1, &w.0, &mut m)?;
    Ok(m)
}
