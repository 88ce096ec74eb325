#![no_std]
#![deny(clippy::pedantic)]
#![deny(warnings)]
#![deny(missing_docs)]
#![doc = include_str!("../README.md")]


// Implements the FIPS 203 Module-Lattice-based Key-Encapsulation Mechanism
// Standard. See <https://nvlpubs.nist.gov/nistpubs/FIPS/NIST.FIPS.203.pdf>
//
// Functionality map per FIPS 203:
//
// BitsToBytes / BytesToBits                  --> byte_fns.rs
// ByteEncode_d / ByteDecode_d                --> byte_fns.rs
// SampleNTT / SamplePolyCBD_eta              --> sampling.rs
// NTT / NTT^-1 / MultiplyNTTs / BaseCaseMul  --> ntt.rs
// K-PKE KeyGen / Encrypt / Decrypt           --> k_pke.rs
// ML-KEM KeyGen / Encaps / Decaps            --> ml_kem.rs
// PRF, XOF, G, H, J, Compress, Decompress    --> helpers.rs
// Parameter-set records and name lookup      --> params.rs
//
// The three parameter sets are modules in this file with injected macro
// code that connects them to the functionality in ml_kem.rs.

// Supports automatically clearing sensitive data on drop
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::helpers::ensure;
use crate::traits::SerDes;
use subtle::ConstantTimeEq;

mod byte_fns;
mod helpers;
mod k_pke;
mod ml_kem;
mod ntt;
mod sampling;
mod types;

pub mod params;

/// All functionality is covered by traits, such that consumers can utilize trait objects as desired.
pub mod traits;

// Relevant to all parameter sets
pub(crate) const N: usize = 256;
pub(crate) const Q: u32 = 3329;
pub(crate) const ZETA: u32 = 17;

/// Shared secret length for all ML-KEM variants (in bytes)
pub const SSK_LEN: usize = 32;


/// The error kinds surfaced by the fallible operations in this crate.
///
/// Each variant carries a static description naming the offending input.
/// Note that decapsulating a tampered but well-sized ciphertext is *not* an
/// error: implicit rejection returns a pseudorandom key instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KemError {
    /// An input buffer length does not match the size the parameter set requires.
    InvalidLength(&'static str),
    /// An unknown parameter-set name, an out-of-range width or eta, or a
    /// coefficient range violation.
    InvalidParameter(&'static str),
    /// A seed or message that must be exactly 32 bytes was not, or the
    /// randomness source failed to produce one.
    InvalidSeed(&'static str),
}

impl core::fmt::Display for KemError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidLength(what) => write!(f, "invalid length: {what}"),
            Self::InvalidParameter(what) => write!(f, "invalid parameter: {what}"),
            Self::InvalidSeed(what) => write!(f, "invalid seed: {what}"),
        }
    }
}


/// The (opaque) shared secret key that both parties derive; wiped on drop.
#[derive(Clone, Debug, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecretKey([u8; SSK_LEN]);

impl SerDes for SharedSecretKey {
    type ByteArray = [u8; SSK_LEN];

    fn into_bytes(self) -> Self::ByteArray { self.0 }

    fn try_from_bytes(ssk: Self::ByteArray) -> Result<Self, KemError> {
        // No opportunity for validation, but a Result keeps the surface uniform
        Ok(SharedSecretKey(ssk))
    }

    fn try_from_slice(bytes: &[u8]) -> Result<Self, KemError> {
        ensure!(
            bytes.len() == SSK_LEN,
            KemError::InvalidLength("shared secret must be 32 bytes")
        );
        let mut ssk = [0u8; SSK_LEN];
        ssk.copy_from_slice(bytes);
        Ok(SharedSecretKey(ssk))
    }
}

impl PartialEq for SharedSecretKey {
    fn eq(&self, other: &Self) -> bool { self.0.ct_eq(&other.0).into() }
}


// This common functionality is injected into each parameter-set module
macro_rules! functionality {
    () => {
        const K: usize = PARAMS.k;
        const ETA1: u32 = PARAMS.eta1;
        const ETA2: u32 = PARAMS.eta2;
        const DU: u32 = PARAMS.du;
        const DV: u32 = PARAMS.dv;
        const ETA1_64: usize = ETA1 as usize * 64; // Rust does not (yet) allow expressions
        const ETA2_64: usize = ETA2 as usize * 64; // involving constants in generics

        /// Serialized encapsulation key length (in bytes)
        pub const EK_LEN: usize = PARAMS.ek_len();
        /// Serialized decapsulation key length (in bytes)
        pub const DK_LEN: usize = PARAMS.dk_len();
        /// Serialized ciphertext length (in bytes)
        pub const CT_LEN: usize = PARAMS.ct_len();

        use crate::byte_fns::{byte_decode, byte_encode};
        use crate::helpers::{ensure, h};
        use crate::ml_kem::{
            ml_kem_decaps, ml_kem_encaps, ml_kem_encaps_internal, ml_kem_key_gen,
            ml_kem_key_gen_internal,
        };
        use crate::traits::{Decaps, Encaps, KeyGen, SerDes};
        use crate::types::Z;
        use crate::{KemError, SharedSecretKey};
        use rand_core::CryptoRngCore;
        use zeroize::{Zeroize, ZeroizeOnDrop};

        /// Correctly sized encapsulation key specific to this parameter set.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct EncapsKey([u8; EK_LEN]);

        /// Correctly sized decapsulation key specific to this parameter set.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct DecapsKey([u8; DK_LEN]);

        /// Correctly sized ciphertext specific to this parameter set.
        #[derive(Clone, Zeroize, ZeroizeOnDrop)]
        pub struct CipherText([u8; CT_LEN]);

        /// Key generation bundle for this parameter set; all methods come
        /// from the [`KeyGen`](crate::traits::KeyGen) trait.
        pub struct KG();

        impl KeyGen for KG {
            type DecapsByteArray = [u8; DK_LEN];
            type DecapsKey = DecapsKey;
            type EncapsByteArray = [u8; EK_LEN];
            type EncapsKey = EncapsKey;

            fn try_keygen_with_rng(
                rng: &mut impl CryptoRngCore,
            ) -> Result<(EncapsKey, DecapsKey), KemError> {
                let (mut ek, mut dk) = ([0u8; EK_LEN], [0u8; DK_LEN]);
                ml_kem_key_gen::<K, ETA1_64>(rng, ETA1, &mut ek, &mut dk)?;
                Ok((EncapsKey(ek), DecapsKey(dk)))
            }

            fn keygen_from_seed(
                d: &[u8; 32], z: &[u8; 32],
            ) -> Result<(EncapsKey, DecapsKey), KemError> {
                let (mut ek, mut dk) = ([0u8; EK_LEN], [0u8; DK_LEN]);
                ml_kem_key_gen_internal::<K, ETA1_64>(d, z, ETA1, &mut ek, &mut dk)?;
                Ok((EncapsKey(ek), DecapsKey(dk)))
            }

            fn validate_keypair_vartime(
                ek: &Self::EncapsByteArray, dk: &Self::DecapsByteArray,
            ) -> bool {
                let len_dk_pke = 384 * K;
                let len_ek_pke = 384 * K + 32;
                let same_ek = *ek == dk[len_dk_pke..(len_dk_pke + len_ek_pke)];
                let same_h =
                    h(ek) == dk[(len_dk_pke + len_ek_pke)..(len_dk_pke + len_ek_pke + 32)];
                same_ek & same_h
            }
        }

        impl Encaps for EncapsKey {
            type CipherText = CipherText;
            type SharedSecretKey = SharedSecretKey;

            fn try_encaps_with_rng(
                &self, rng: &mut impl CryptoRngCore,
            ) -> Result<(SharedSecretKey, CipherText), KemError> {
                let mut ct = [0u8; CT_LEN];
                let ssk = ml_kem_encaps::<K, ETA1_64, ETA2_64>(
                    rng, DU, DV, ETA1, ETA2, &self.0, &mut ct,
                )?;
                Ok((ssk, CipherText(ct)))
            }

            fn encaps_deterministic(
                &self, m: &[u8],
            ) -> Result<(SharedSecretKey, CipherText), KemError> {
                let m: &[u8; 32] = m.try_into().map_err(|_| {
                    KemError::InvalidSeed("encapsulation message must be exactly 32 bytes")
                })?;
                let mut ct = [0u8; CT_LEN];
                let ssk = ml_kem_encaps_internal::<K, ETA1_64, ETA2_64>(
                    DU, DV, ETA1, ETA2, m, &self.0, &mut ct,
                )?;
                Ok((ssk, CipherText(ct)))
            }
        }

        impl Decaps for DecapsKey {
            type CipherText = CipherText;
            type SharedSecretKey = SharedSecretKey;

            fn try_decaps(&self, ct: &CipherText) -> Result<SharedSecretKey, KemError> {
                ml_kem_decaps::<K, ETA1_64, ETA2_64, CT_LEN>(DU, DV, ETA1, ETA2, &self.0, &ct.0)
            }
        }

        impl SerDes for EncapsKey {
            type ByteArray = [u8; EK_LEN];

            fn into_bytes(self) -> Self::ByteArray { self.0 }

            fn try_from_bytes(ek: Self::ByteArray) -> Result<Self, KemError> {
                // FIPS 203 modulus check: every 12-bit coefficient must
                // already be reduced, i.e. ByteEncode_12(ByteDecode_12(ek))
                // must reproduce ek exactly
                let mut ek_hat = [Z::ZERO; 256];
                let mut round_trip = [0u8; 384];
                for chunk in ek[..384 * K].chunks(384) {
                    byte_decode(12, chunk, &mut ek_hat)?;
                    byte_encode(12, &ek_hat, &mut round_trip)?;
                    ensure!(
                        round_trip[..] == *chunk,
                        KemError::InvalidParameter("encapsulation key fails modulus check")
                    );
                }
                Ok(EncapsKey(ek))
            }

            fn try_from_slice(ek: &[u8]) -> Result<Self, KemError> {
                ensure!(
                    ek.len() == EK_LEN,
                    KemError::InvalidLength("encapsulation key length mismatch for parameter set")
                );
                let mut bytes = [0u8; EK_LEN];
                bytes.copy_from_slice(ek);
                Self::try_from_bytes(bytes)
            }
        }

        impl SerDes for DecapsKey {
            type ByteArray = [u8; DK_LEN];

            fn into_bytes(self) -> Self::ByteArray { self.0 }

            fn try_from_bytes(dk: Self::ByteArray) -> Result<Self, KemError> {
                // the embedded hash must match the embedded encryption key
                let ek_pke = &dk[384 * K..768 * K + 32];
                ensure!(
                    h(ek_pke) == dk[768 * K + 32..768 * K + 64],
                    KemError::InvalidParameter("decapsulation key hash mismatch")
                );
                Ok(DecapsKey(dk))
            }

            fn try_from_slice(dk: &[u8]) -> Result<Self, KemError> {
                ensure!(
                    dk.len() == DK_LEN,
                    KemError::InvalidLength("decapsulation key length mismatch for parameter set")
                );
                let mut bytes = [0u8; DK_LEN];
                bytes.copy_from_slice(dk);
                Self::try_from_bytes(bytes)
            }
        }

        impl SerDes for CipherText {
            type ByteArray = [u8; CT_LEN];

            fn into_bytes(self) -> Self::ByteArray { self.0 }

            fn try_from_bytes(ct: Self::ByteArray) -> Result<Self, KemError> {
                // FIPS 203 puts only a size constraint on the ciphertext,
                // which the fixed-size array already enforces
                Ok(CipherText(ct))
            }

            fn try_from_slice(ct: &[u8]) -> Result<Self, KemError> {
                ensure!(
                    ct.len() == CT_LEN,
                    KemError::InvalidLength("ciphertext length mismatch for parameter set")
                );
                let mut bytes = [0u8; CT_LEN];
                bytes.copy_from_slice(ct);
                Self::try_from_bytes(bytes)
            }
        }
    };
}


/// Functionality for the ML-KEM-512 parameter set (claimed security category 1).
#[cfg(feature = "ml-kem-512")]
pub mod ml_kem_512 {
    //! Typical usage: the originator runs `KG::try_keygen()` and sends the
    //! serialized encaps key; the remote party deserializes it with
    //! `EncapsKey::try_from_bytes()`, runs `try_encaps()` and sends back the
    //! serialized ciphertext; the originator runs `try_decaps()` on it.
    //! Both now hold the same 32-byte shared secret.

    use crate::params::{self, ParamSet};

    /// Parameter-set record: k = 2, eta1 = 3, eta2 = 2, du = 10, dv = 4.
    pub const PARAMS: ParamSet = params::ML_KEM_512;

    functionality!();
}


/// Functionality for the ML-KEM-768 parameter set (claimed security category 3).
#[cfg(feature = "ml-kem-768")]
pub mod ml_kem_768 {
    //! Typical usage: the originator runs `KG::try_keygen()` and sends the
    //! serialized encaps key; the remote party deserializes it with
    //! `EncapsKey::try_from_bytes()`, runs `try_encaps()` and sends back the
    //! serialized ciphertext; the originator runs `try_decaps()` on it.
    //! Both now hold the same 32-byte shared secret.

    use crate::params::{self, ParamSet};

    /// Parameter-set record: k = 3, eta1 = 2, eta2 = 2, du = 10, dv = 4.
    pub const PARAMS: ParamSet = params::ML_KEM_768;

    functionality!();
}


/// Functionality for the ML-KEM-1024 parameter set (claimed security category 5).
#[cfg(feature = "ml-kem-1024")]
pub mod ml_kem_1024 {
    //! Typical usage: the originator runs `KG::try_keygen()` and sends the
    //! serialized encaps key; the remote party deserializes it with
    //! `EncapsKey::try_from_bytes()`, runs `try_encaps()` and sends back the
    //! serialized ciphertext; the originator runs `try_decaps()` on it.
    //! Both now hold the same 32-byte shared secret.

    use crate::params::{self, ParamSet};

    /// Parameter-set record: k = 4, eta1 = 2, eta2 = 2, du = 11, dv = 5.
    pub const PARAMS: ParamSet = params::ML_KEM_1024;

    functionality!();
}
