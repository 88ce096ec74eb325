use crate::helpers::ensure;
use crate::types::Z;
use crate::{KemError, N, Q};


/// Algorithm 3 `BitsToBytes(b)`: packs a bit array into bytes, bit `8i + j`
/// of the input landing in bit `j` (LSB first) of output byte `i`.
pub(crate) fn bits_to_bytes(bits: &[u8], bytes: &mut [u8]) -> Result<(), KemError> {
    ensure!(
        bits.len() == 8 * bytes.len(),
        KemError::InvalidLength("bit array is not 8x the byte array")
    );
    bytes.iter_mut().for_each(|b| *b = 0);
    for (i, bit) in bits.iter().enumerate() {
        bytes[i / 8] |= bit << (i % 8);
    }
    Ok(())
}


/// Algorithm 4 `BytesToBits(B)`: the inverse of `bits_to_bytes`.
pub(crate) fn bytes_to_bits(bytes: &[u8], bits: &mut [u8]) -> Result<(), KemError> {
    ensure!(
        bits.len() == 8 * bytes.len(),
        KemError::InvalidLength("bit array is not 8x the byte array")
    );
    for (i, byte) in bytes.iter().enumerate() {
        for j in 0..8 {
            bits[8 * i + j] = (byte >> j) & 1;
        }
    }
    Ok(())
}


/// Algorithm 5 `ByteEncode<d>(F)`: serializes 256 coefficients at d bits
/// each, little-endian within a coefficient, for 1 <= d <= 12.
///
/// Coefficients must lie below `2^d` (below q when d = 12).
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn byte_encode(d: u32, integers_f: &[Z; N], bytes_b: &mut [u8]) -> Result<(), KemError> {
    ensure!((1..=12).contains(&d), KemError::InvalidParameter("encode width d outside 1..=12"));
    ensure!(
        bytes_b.len() == 32 * d as usize,
        KemError::InvalidLength("encode output is not 32*d bytes")
    );
    let m = if d < 12 { 1u16 << d } else { Q as u16 };
    let d = d as usize;
    let mut bits = [0u8; 12 * N];
    for (i, coeff) in integers_f.iter().enumerate() {
        let mut a = coeff.get_u16();
        ensure!(a < m, KemError::InvalidParameter("coefficient out of encode range"));
        for j in 0..d {
            bits[i * d + j] = (a & 1) as u8;
            a >>= 1;
        }
    }
    bits_to_bytes(&bits[..N * d], bytes_b)
}


/// Algorithm 6 `ByteDecode<d>(B)`: deserializes a 32d-byte string into 256
/// d-bit coefficients, for 1 <= d <= 12.
///
/// For d = 12 the decoded value is reduced mod q (the domain is `Z_q`);
/// narrower widths are full-range by construction.
#[allow(clippy::cast_possible_truncation)]
pub(crate) fn byte_decode(d: u32, bytes_b: &[u8], integers_f: &mut [Z; N]) -> Result<(), KemError> {
    ensure!((1..=12).contains(&d), KemError::InvalidParameter("decode width d outside 1..=12"));
    ensure!(
        bytes_b.len() == 32 * d as usize,
        KemError::InvalidLength("decode input is not 32*d bytes")
    );
    let reduce = d == 12;
    let d = d as usize;
    let mut bits = [0u8; 12 * N];
    bytes_to_bits(bytes_b, &mut bits[..N * d])?;
    for (i, coeff) in integers_f.iter_mut().enumerate() {
        let mut a = 0u16;
        for j in 0..d {
            a |= u16::from(bits[i * d + j]) << j;
        }
        if reduce {
            a %= Q as u16;
        }
        coeff.set_u16(a);
    }
    Ok(())
}
