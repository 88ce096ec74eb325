use crate::{N, Q};
use zeroize::Zeroize;

/// A field scalar in `[0, q)`. Stored as `u16`; arithmetic widens to
/// `u32`/`u64` so products can be reduced without overflow.
#[derive(Clone, Copy, Default, Zeroize)]
pub(crate) struct Z(u16);

#[allow(clippy::inline_always)]
impl Z {
    const M: u64 = 2u64.pow(32) / Self::Q64;
    #[allow(clippy::cast_possible_truncation)]
    const Q16: u16 = Q as u16;
    const Q64: u64 = Q as u64;
    pub(crate) const ZERO: Self = Self(0);

    pub(crate) const fn new(a: u16) -> Self { Self(a) }

    pub(crate) fn get_u16(self) -> u16 { self.0 }

    pub(crate) fn get_u32(self) -> u32 { u32::from(self.0) }

    pub(crate) fn set_u16(&mut self, a: u16) { self.0 = a }

    #[inline(always)]
    pub(crate) fn add(self, other: Self) -> Self {
        let sum = self.0 + other.0;
        let (trial, borrow) = sum.overflowing_sub(Self::Q16);
        // fold q back in on borrow without branching on the value
        Self(trial.wrapping_add(Self::Q16 & u16::from(borrow).wrapping_neg()))
    }

    #[inline(always)]
    pub(crate) fn sub(self, other: Self) -> Self {
        let (diff, borrow) = self.0.overflowing_sub(other.0);
        Self(diff.wrapping_add(Self::Q16 & u16::from(borrow).wrapping_neg()))
    }

    /// Product with a single Barrett-style reduction; the quotient estimate
    /// is low by at most one multiple of q, corrected by the final fold.
    #[inline(always)]
    #[allow(clippy::cast_possible_truncation)]
    pub(crate) fn mul(self, other: Self) -> Self {
        let prod = u64::from(self.0) * u64::from(other.0);
        let quot = (prod * Self::M) >> 32;
        let rem = prod - quot * Self::Q64;
        let (trial, borrow) = rem.overflowing_sub(Self::Q64);
        let result = trial.wrapping_add(Self::Q64 & u64::from(borrow).wrapping_neg());
        Self(result as u16)
    }
}


/// A ring element of `R_q` in the standard coefficient basis.
#[derive(Clone, Copy, Zeroize)]
pub(crate) struct Poly(pub(crate) [Z; N]);

/// A ring element in the NTT basis `T_q`.
///
/// Produced only by `Poly::ntt()` and consumed back through
/// `PolyHat::ntt_inv()`; keeping the two bases as distinct types prevents
/// the transforms from being composed the wrong way round.
#[derive(Clone, Copy, Zeroize)]
pub(crate) struct PolyHat(pub(crate) [Z; N]);

impl Poly {
    pub(crate) const ZERO: Self = Self([Z::ZERO; N]);

    pub(crate) fn add(&self, other: &Self) -> Self {
        Self(core::array::from_fn(|i| self.0[i].add(other.0[i])))
    }

    pub(crate) fn sub(&self, other: &Self) -> Self {
        Self(core::array::from_fn(|i| self.0[i].sub(other.0[i])))
    }
}

impl PolyHat {
    pub(crate) const ZERO: Self = Self([Z::ZERO; N]);

    pub(crate) fn add(&self, other: &Self) -> Self {
        Self(core::array::from_fn(|i| self.0[i].add(other.0[i])))
    }
}
