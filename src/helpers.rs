use crate::types::{PolyHat, Z};
use crate::Q;
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Digest, Sha3_256, Sha3_512, Shake128, Shake256};


/// Early-return with the given error when the condition fails.
macro_rules! ensure {
    ($cond:expr, $err:expr $(,)?) => {
        if !$cond {
            return Err($err);
        }
    };
}

pub(crate) use ensure; // make available throughout crate


/// Matrix by vector multiplication in the NTT basis: `w_hat = A_hat o u_hat`.
#[must_use]
#[allow(clippy::needless_range_loop)] // the zipped alternative is harder to read
pub(crate) fn mul_mat_vec<const K: usize>(
    a_hat: &[[PolyHat; K]; K], u_hat: &[PolyHat; K],
) -> [PolyHat; K] {
    core::array::from_fn(|i| {
        let mut acc = PolyHat::ZERO;
        for j in 0..K {
            acc = acc.add(&a_hat[i][j].mul(&u_hat[j]));
        }
        acc
    })
}


/// Transposed matrix by vector multiplication: `y_hat = A_hat^T o u_hat`.
#[must_use]
#[allow(clippy::needless_range_loop)] // the zipped alternative is harder to read
pub(crate) fn mul_mat_t_vec<const K: usize>(
    a_hat: &[[PolyHat; K]; K], u_hat: &[PolyHat; K],
) -> [PolyHat; K] {
    core::array::from_fn(|i| {
        let mut acc = PolyHat::ZERO;
        for j in 0..K {
            acc = acc.add(&a_hat[j][i].mul(&u_hat[j])); // j,i swapped vs above fn
        }
        acc
    })
}


/// Vector dot product in the NTT basis: `z_hat = u_hat^T o v_hat`.
#[must_use]
#[allow(clippy::needless_range_loop)] // the zipped alternative is harder to read
pub(crate) fn dot_prod<const K: usize>(u_hat: &[PolyHat; K], v_hat: &[PolyHat; K]) -> PolyHat {
    let mut acc = PolyHat::ZERO;
    for j in 0..K {
        acc = acc.add(&u_hat[j].mul(&v_hat[j]));
    }
    acc
}


/// Function `PRF_eta` : SHAKE-256 over the 32-byte seed and a one-byte
/// counter, truncated to `64 * eta` bytes.
#[must_use]
pub(crate) fn prf<const ETA_64: usize>(s: &[u8; 32], b: u8) -> [u8; ETA_64] {
    let mut hasher = Shake256::default();
    hasher.update(s);
    hasher.update(&[b]);
    let mut reader = hasher.finalize_xof();
    let mut result = [0u8; ETA_64];
    reader.read(&mut result);
    result
}


/// Function `XOF` : a streaming SHAKE-128 reader seeded with `rho || i || j`.
///
/// Successive reads continue the same output stream, which the rejection
/// sampler depends on; the reader is never re-seeded between squeezes.
#[must_use]
pub(crate) fn xof(rho: &[u8], i: u8, j: u8) -> impl XofReader {
    let mut hasher = Shake128::default();
    hasher.update(rho);
    hasher.update(&[i]);
    hasher.update(&[j]);
    hasher.finalize_xof()
}


/// Function `G` : SHA3-512 over the concatenated inputs, split 32 + 32.
pub(crate) fn g(bytes: &[&[u8]]) -> ([u8; 32], [u8; 32]) {
    let mut hasher = Sha3_512::new();
    bytes.iter().for_each(|b| Digest::update(&mut hasher, b));
    let digest = hasher.finalize();
    let mut a = [0u8; 32];
    let mut b = [0u8; 32];
    a.copy_from_slice(&digest[0..32]);
    b.copy_from_slice(&digest[32..64]);
    (a, b)
}


/// Function `H` : SHA3-256.
#[must_use]
pub(crate) fn h(bytes: &[u8]) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    Digest::update(&mut hasher, bytes);
    hasher.finalize().into()
}


/// Function `J` : SHAKE-256 over `z || ct`, truncated to 32 bytes; the
/// implicit-rejection key derivation.
#[must_use]
pub(crate) fn j(z: &[u8], ct: &[u8]) -> [u8; 32] {
    let mut hasher = Shake256::default();
    hasher.update(z);
    hasher.update(ct);
    let mut reader = hasher.finalize_xof();
    let mut result = [0u8; 32];
    reader.read(&mut result);
    result
}


/// `Compress_d` : x -> round(2^d / q * x) mod 2^d, in place.
///
/// The reciprocal multiplication computes an exact floor division by q for
/// every numerator this crate produces (below 2^24).
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn compress_coeffs(d: u32, inout: &mut [Z]) {
    const M: u64 = ((1u64 << 36) + Q as u64 - 1) / (Q as u64);
    let mask = (1u64 << d) - 1;
    for x_ref in &mut *inout {
        let y = u64::from((x_ref.get_u32() << d) + (Q >> 1));
        // rounding carries x near q up to 2^d exactly, hence the mask
        x_ref.set_u16((((y * M) >> 36) & mask) as u16);
    }
}


/// `Decompress_d` : y -> round(q / 2^d * y), in place; ties round upward.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn decompress_coeffs(d: u32, inout: &mut [Z]) {
    for y_ref in &mut *inout {
        let qy = Q * y_ref.get_u32() + (1 << (d - 1));
        y_ref.set_u16((qy >> d) as u16);
    }
}
