use crate::types::{Poly, PolyHat, Z};
use crate::{N, Q, ZETA};


// 128^{-1} mod q, applied after the Gentleman-Sande pass
const N_INV: Z = Z::new(3303);


impl Poly {
    /// Algorithm 9 `NTT(f)`: the forward negacyclic transform, seven layers
    /// of Cooley-Tukey butterflies with twiddles `zeta^{BitRev_7(k)}` for
    /// k = 1..128.
    #[must_use]
    pub(crate) fn ntt(&self) -> PolyHat {
        let mut f = self.0;
        let mut k = 1;
        for len in [128, 64, 32, 16, 8, 4, 2] {
            for start in (0..N).step_by(2 * len) {
                let zeta = ZETAS[k];
                k += 1;
                for j in start..(start + len) {
                    let t = f[j + len].mul(zeta);
                    f[j + len] = f[j].sub(t);
                    f[j] = f[j].add(t);
                }
            }
        }
        PolyHat(f)
    }
}


impl PolyHat {
    /// Algorithm 10 `NTT^-1(f_hat)`: Gentleman-Sande butterflies walking the
    /// twiddle indices back from 127, then a scale by `128^{-1} = 3303`.
    #[must_use]
    pub(crate) fn ntt_inv(&self) -> Poly {
        let mut f = self.0;
        let mut k = 127;
        for len in [2, 4, 8, 16, 32, 64, 128] {
            for start in (0..N).step_by(2 * len) {
                let zeta = ZETAS[k];
                k -= 1;
                for j in start..(start + len) {
                    let t = f[j];
                    f[j] = t.add(f[j + len]);
                    f[j + len] = zeta.mul(f[j + len].sub(t));
                }
            }
        }
        f.iter_mut().for_each(|item| *item = item.mul(N_INV));
        Poly(f)
    }

    /// Algorithm 11 `MultiplyNTTs(f_hat, g_hat)`: the pointwise product in
    /// the NTT basis, one base-case multiplication per coefficient pair.
    #[must_use]
    pub(crate) fn mul(&self, other: &Self) -> Self {
        let mut h_hat = [Z::ZERO; N];
        for i in 0..128 {
            let (c0, c1) = base_case_multiply(
                self.0[2 * i],
                self.0[2 * i + 1],
                other.0[2 * i],
                other.0[2 * i + 1],
                GAMMAS[i],
            );
            h_hat[2 * i] = c0;
            h_hat[2 * i + 1] = c1;
        }
        Self(h_hat)
    }
}


/// Algorithm 12 `BaseCaseMultiply(a0, a1, b0, b1, gamma)`: the product of
/// two degree-one polynomials modulo `X^2 - gamma`.
fn base_case_multiply(a0: Z, a1: Z, b0: Z, b1: Z, gamma: Z) -> (Z, Z) {
    let c0 = a0.mul(b0).add(a1.mul(b1).mul(gamma));
    let c1 = a0.mul(b1).add(a1.mul(b0));
    (c0, c1)
}


// ----------
// Twiddle tables, computed at compile time.

const fn bitrev7(x: usize) -> usize {
    (x >> 6 & 1)
        | (x >> 4 & 2)
        | (x >> 2 & 4)
        | (x & 8)
        | (x << 2 & 16)
        | (x << 4 & 32)
        | (x << 6 & 64)
}

#[allow(clippy::cast_possible_truncation)] // const fns cannot use u16::try_from() etc.
const fn pow_zeta(mut exp: usize) -> Z {
    let mut x = 1u32;
    while exp > 0 {
        x = (x * ZETA) % Q;
        exp -= 1;
    }
    Z::new(x as u16)
}

const fn gen_zetas() -> [Z; 128] {
    let mut table = [Z::ZERO; 128];
    let mut k = 0;
    while k < 128 {
        table[k] = pow_zeta(bitrev7(k));
        k += 1;
    }
    table
}

const fn gen_gammas() -> [Z; 128] {
    let mut table = [Z::ZERO; 128];
    let mut i = 0;
    while i < 128 {
        table[i] = pow_zeta(2 * bitrev7(i) + 1);
        i += 1;
    }
    table
}

/// `ZETAS[k] = zeta^{BitRev_7(k)} mod q`, the butterfly twiddles.
static ZETAS: [Z; 128] = gen_zetas();

/// `GAMMAS[i] = zeta^{2 BitRev_7(i) + 1} mod q`, the base-case moduli.
static GAMMAS: [Z; 128] = gen_gammas();
