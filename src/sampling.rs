use crate::byte_fns::bytes_to_bits;
use crate::helpers::ensure;
use crate::types::{Poly, PolyHat, Z};
use crate::{KemError, N, Q};
use sha3::digest::XofReader;


/// Algorithm 7 `SampleNTT(B)`: rejection-samples a uniform element of `T_q`
/// from a SHAKE-128 stream seeded with `rho || i || j`.
///
/// Each 3-byte draw yields two 12-bit candidates; candidates at or above q
/// are discarded. The loop is unbounded but terminates with probability 1.
/// It runs in variable time, which is fine: the stream depends only on
/// `rho`, which crosses the trust boundary in the clear inside the
/// encapsulation key.
pub(crate) fn sample_ntt(mut xof_reader: impl XofReader) -> PolyHat {
    let mut a_hat = [Z::ZERO; N];
    let mut c = [0u8; 3];

    let mut j = 0usize;
    #[allow(clippy::cast_possible_truncation)] // d1 as u16, d2 as u16
    while j < N {
        xof_reader.read(&mut c);

        // three bytes unpack into two little-endian 12-bit values
        let d1 = u32::from(c[0]) + 256 * (u32::from(c[1]) & 0x0F);
        let d2 = (u32::from(c[1]) >> 4) + 16 * u32::from(c[2]);

        if d1 < Q {
            a_hat[j].set_u16(d1 as u16);
            j += 1;
        }
        if (d2 < Q) & (j < N) {
            a_hat[j].set_u16(d2 as u16);
            j += 1;
        }
    }

    PolyHat(a_hat)
}


/// Algorithm 8 `SamplePolyCBD_eta(B)`: the centered binomial distribution on
/// `64 * eta` PRF bytes. Coefficient i is the difference of two eta-bit
/// popcounts, reduced into `[0, q)`.
pub(crate) fn sample_poly_cbd(eta: u32, byte_array_b: &[u8]) -> Result<Poly, KemError> {
    ensure!((eta == 2) | (eta == 3), KemError::InvalidParameter("cbd eta must be 2 or 3"));
    ensure!(
        byte_array_b.len() == 64 * eta as usize,
        KemError::InvalidLength("cbd input is not 64*eta bytes")
    );

    let mut bits = [0u8; 512 * 3];
    bytes_to_bits(byte_array_b, &mut bits[..byte_array_b.len() * 8])?;

    let eta = eta as usize;
    let mut f = [Z::ZERO; N];
    for (i, coeff) in f.iter_mut().enumerate() {
        let mut x = 0u16;
        let mut y = 0u16;
        for j in 0..eta {
            x += u16::from(bits[2 * i * eta + j]);
            y += u16::from(bits[2 * i * eta + eta + j]);
        }
        *coeff = Z::new(x).sub(Z::new(y));
    }
    Ok(Poly(f))
}
