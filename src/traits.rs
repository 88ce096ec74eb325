//! The crate's public API as traits, so consumers can write code generic
//! over the parameter set and use trait objects where convenient.

use crate::KemError;
use rand_core::CryptoRngCore;

#[cfg(feature = "default-rng")]
use rand_core::OsRng;


/// Key generation for a target parameter set.
pub trait KeyGen {
    /// The (public) encapsulation key sent from the originator to the remote party.
    type EncapsKey;
    /// The (private) decapsulation key retained by the originator.
    type DecapsKey;
    /// A serialized encapsulation key byte array of the correct length.
    type EncapsByteArray;
    /// A serialized decapsulation key byte array of the correct length.
    type DecapsByteArray;

    /// Generates an encapsulation and decapsulation key pair using the OS
    /// default random number generator.
    ///
    /// # Errors
    /// Returns a [`KemError`] if the random number generator fails.
    ///
    /// # Examples
    /// ```rust
    /// # fn main() -> Result<(), mlkem::KemError> {
    /// # #[cfg(feature = "ml-kem-768")] {
    /// use mlkem::ml_kem_768;
    /// use mlkem::traits::{Decaps, Encaps, KeyGen, SerDes};
    ///
    /// // Alice generates both keys and sends the serialized encaps key to Bob
    /// let (alice_ek, alice_dk) = ml_kem_768::KG::try_keygen()?;
    /// let ek_bytes = alice_ek.into_bytes();
    ///
    /// // Bob deserializes it, encapsulates, and returns the ciphertext
    /// let bob_ek = ml_kem_768::EncapsKey::try_from_bytes(ek_bytes)?;
    /// let (bob_ssk, ct) = bob_ek.try_encaps()?;
    ///
    /// // Alice decapsulates; both parties now hold the same shared secret
    /// let alice_ssk = alice_dk.try_decaps(&ct)?;
    /// assert_eq!(alice_ssk, bob_ssk);
    /// # }
    /// # Ok(()) }
    /// ```
    #[cfg(feature = "default-rng")]
    fn try_keygen() -> Result<(Self::EncapsKey, Self::DecapsKey), KemError> {
        Self::try_keygen_with_rng(&mut OsRng)
    }

    /// Generates an encapsulation and decapsulation key pair using the
    /// provided random number generator. The generator is drawn from exactly
    /// twice, for the seeds `d` and `z`.
    ///
    /// # Errors
    /// Returns a [`KemError`] if the random number generator fails.
    fn try_keygen_with_rng(
        rng: &mut impl CryptoRngCore,
    ) -> Result<(Self::EncapsKey, Self::DecapsKey), KemError>;

    /// Deterministically derives a key pair from the seeds `d` and `z`,
    /// e.g. for known-answer testing. Both seeds must be uniformly random
    /// in production use.
    ///
    /// # Errors
    /// Returns a [`KemError`] on an internal encoding failure (not expected
    /// for any seed value).
    fn keygen_from_seed(
        d: &[u8; 32], z: &[u8; 32],
    ) -> Result<(Self::EncapsKey, Self::DecapsKey), KemError>;

    /// Checks the correspondence of a serialized key pair, e.g. after a
    /// store-then-restore cycle: the decapsulation key must embed this
    /// encapsulation key and a matching hash of it. Not constant-time.
    fn validate_keypair_vartime(ek: &Self::EncapsByteArray, dk: &Self::DecapsByteArray) -> bool;
}


/// Encapsulation: generating a shared secret and ciphertext from an
/// encapsulation key.
pub trait Encaps {
    /// The shared secret produced on both sides of the exchange.
    type SharedSecretKey;
    /// The ciphertext transmitted to the decapsulating party.
    type CipherText;

    /// Generates a shared secret and ciphertext using the OS default random
    /// number generator.
    ///
    /// # Errors
    /// Returns a [`KemError`] if the random number generator fails.
    #[cfg(feature = "default-rng")]
    fn try_encaps(&self) -> Result<(Self::SharedSecretKey, Self::CipherText), KemError> {
        self.try_encaps_with_rng(&mut OsRng)
    }

    /// Generates a shared secret and ciphertext using the provided random
    /// number generator. The generator is drawn from exactly once, for the
    /// 32-byte message `m`.
    ///
    /// # Errors
    /// Returns a [`KemError`] if the random number generator fails.
    fn try_encaps_with_rng(
        &self, rng: &mut impl CryptoRngCore,
    ) -> Result<(Self::SharedSecretKey, Self::CipherText), KemError>;

    /// Deterministic encapsulation with a caller-supplied 32-byte message,
    /// intended for known-answer testing: the same `m` against the same key
    /// always yields an identical shared secret and ciphertext.
    ///
    /// # Errors
    /// Returns `KemError::InvalidSeed` when `m` is not exactly 32 bytes.
    ///
    /// # Examples
    /// ```rust
    /// # fn main() -> Result<(), mlkem::KemError> {
    /// # #[cfg(feature = "ml-kem-512")] {
    /// use mlkem::ml_kem_512;
    /// use mlkem::traits::{Encaps, KeyGen, SerDes};
    ///
    /// let (ek, _dk) = ml_kem_512::KG::try_keygen()?;
    /// let (ssk1, ct1) = ek.encaps_deterministic(&[7u8; 32])?;
    /// let (ssk2, ct2) = ek.encaps_deterministic(&[7u8; 32])?;
    /// assert_eq!(ssk1, ssk2);
    /// assert_eq!(ct1.into_bytes(), ct2.into_bytes());
    /// # }
    /// # Ok(()) }
    /// ```
    fn encaps_deterministic(
        &self, m: &[u8],
    ) -> Result<(Self::SharedSecretKey, Self::CipherText), KemError>;
}


/// Decapsulation: recovering the shared secret from a ciphertext.
pub trait Decaps {
    /// The ciphertext received from the encapsulating party.
    type CipherText;
    /// The shared secret produced on both sides of the exchange.
    type SharedSecretKey;

    /// Recovers the shared secret from a ciphertext. A tampered (but
    /// well-sized) ciphertext is not an error: implicit rejection yields a
    /// stable pseudorandom key instead, and the selection between the two
    /// outcomes does not branch on secret data.
    ///
    /// # Errors
    /// Returns a [`KemError`] only on structural failures, never because a
    /// ciphertext fails its re-encryption check.
    fn try_decaps(&self, ct: &Self::CipherText) -> Result<Self::SharedSecretKey, KemError>;
}


/// Serialization and deserialization of fixed-size cryptographic objects.
pub trait SerDes {
    /// The fixed-size byte array holding the serialized form.
    type ByteArray;

    /// Consumes the object and returns its serialized byte array.
    fn into_bytes(self) -> Self::ByteArray;

    /// Deserializes from a correctly-sized byte array, performing any
    /// validation the type supports (e.g. the encapsulation-key modulus
    /// check).
    ///
    /// # Errors
    /// Returns a [`KemError`] on malformed input.
    fn try_from_bytes(ba: Self::ByteArray) -> Result<Self, KemError>
    where
        Self: Sized;

    /// Deserializes from a byte slice, first rejecting any slice whose
    /// length does not match this parameter set.
    ///
    /// # Errors
    /// Returns `KemError::InvalidLength` on a size mismatch, then anything
    /// [`Self::try_from_bytes`] can return.
    ///
    /// # Examples
    /// ```rust
    /// # #[cfg(feature = "ml-kem-768")] {
    /// use mlkem::ml_kem_768;
    /// use mlkem::traits::SerDes;
    /// use mlkem::KemError;
    ///
    /// // a truncated encapsulation key is rejected before any computation
    /// let short = [0u8; ml_kem_768::EK_LEN - 1];
    /// let result = ml_kem_768::EncapsKey::try_from_slice(&short);
    /// assert!(matches!(result, Err(KemError::InvalidLength(_))));
    /// # }
    /// ```
    fn try_from_slice(bytes: &[u8]) -> Result<Self, KemError>
    where
        Self: Sized;
}
