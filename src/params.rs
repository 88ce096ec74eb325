//! The three ML-KEM parameter sets of FIPS 203 table 2, as immutable records.
//!
//! Each parameter-set module of this crate exposes its record as `PARAMS`;
//! the records can also be looked up at runtime by their FIPS 203 name via
//! [`ParamSet::by_name`].

use crate::{KemError, SSK_LEN};


/// An ML-KEM parameter set: the module dimension `k`, the noise widths
/// `eta1`/`eta2`, the ciphertext compression widths `du`/`dv`, and the
/// claimed NIST security category.
///
/// All serialized object sizes derive from these fields; the derivation
/// methods below are `const` so the parameter-set modules can size their
/// key and ciphertext arrays at compile time.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParamSet {
    /// FIPS 203 parameter-set name, e.g. `"ML-KEM-768"`.
    pub name: &'static str,
    /// Module dimension; the matrix `A_hat` is `k x k` ring elements.
    pub k: usize,
    /// Centered-binomial width for the secret and error vectors.
    pub eta1: u32,
    /// Centered-binomial width for the encryption noise.
    pub eta2: u32,
    /// Compression width for the ciphertext vector `u`.
    pub du: u32,
    /// Compression width for the ciphertext polynomial `v`.
    pub dv: u32,
    /// Claimed NIST security category (1, 3 or 5).
    pub security_category: u32,
}

impl ParamSet {
    /// Serialized encapsulation-key length in bytes: `384k + 32`.
    #[must_use]
    pub const fn ek_len(&self) -> usize { 384 * self.k + 32 }

    /// Serialized K-PKE decryption-key length in bytes: `384k`.
    #[must_use]
    pub const fn pke_dk_len(&self) -> usize { 384 * self.k }

    /// Serialized decapsulation-key length in bytes, from its structure
    /// `dk_PKE || ek_PKE || H(ek_PKE) || z`.
    #[must_use]
    pub const fn dk_len(&self) -> usize { self.pke_dk_len() + self.ek_len() + 64 }

    /// Serialized ciphertext length in bytes: `32(du*k + dv)`.
    #[must_use]
    pub const fn ct_len(&self) -> usize { 32 * (self.du as usize * self.k + self.dv as usize) }

    /// Shared-secret length in bytes; 32 for every parameter set.
    #[must_use]
    pub const fn ssk_len(&self) -> usize { SSK_LEN }

    /// Looks up a parameter set by its FIPS 203 name.
    ///
    /// # Errors
    /// Returns `KemError::InvalidParameter` for a name outside
    /// `ML-KEM-{512,768,1024}`.
    pub fn by_name(name: &str) -> Result<Self, KemError> {
        match name {
            "ML-KEM-512" => Ok(ML_KEM_512),
            "ML-KEM-768" => Ok(ML_KEM_768),
            "ML-KEM-1024" => Ok(ML_KEM_1024),
            _ => Err(KemError::InvalidParameter("unknown parameter set name")),
        }
    }
}


/// ML-KEM-512, security category 1.
pub const ML_KEM_512: ParamSet = ParamSet {
    name: "ML-KEM-512",
    k: 2,
    eta1: 3,
    eta2: 2,
    du: 10,
    dv: 4,
    security_category: 1,
};

/// ML-KEM-768, security category 3.
pub const ML_KEM_768: ParamSet = ParamSet {
    name: "ML-KEM-768",
    k: 3,
    eta1: 2,
    eta2: 2,
    du: 10,
    dv: 4,
    security_category: 3,
};

/// ML-KEM-1024, security category 5.
pub const ML_KEM_1024: ParamSet = ParamSet {
    name: "ML-KEM-1024",
    k: 4,
    eta1: 2,
    eta2: 2,
    du: 11,
    dv: 5,
    security_category: 5,
};


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_sizes_match_fips203_table_3() {
        assert_eq!(ML_KEM_512.ek_len(), 800);
        assert_eq!(ML_KEM_512.dk_len(), 1632);
        assert_eq!(ML_KEM_512.ct_len(), 768);

        assert_eq!(ML_KEM_768.ek_len(), 1184);
        assert_eq!(ML_KEM_768.dk_len(), 2400);
        assert_eq!(ML_KEM_768.ct_len(), 1088);

        assert_eq!(ML_KEM_1024.ek_len(), 1568);
        assert_eq!(ML_KEM_1024.dk_len(), 3168);
        assert_eq!(ML_KEM_1024.ct_len(), 1408);

        for p in [ML_KEM_512, ML_KEM_768, ML_KEM_1024] {
            assert_eq!(p.ssk_len(), 32);
            // dk structure and the flat 768k + 96 formula agree
            assert_eq!(p.dk_len(), 768 * p.k + 96);
        }
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(ParamSet::by_name("ML-KEM-768").unwrap(), ML_KEM_768);
        assert_eq!(ParamSet::by_name("ML-KEM-512").unwrap().security_category, 1);
        let err = ParamSet::by_name("ML-KEM-2048").unwrap_err();
        assert!(matches!(err, KemError::InvalidParameter(_)));
    }
}
